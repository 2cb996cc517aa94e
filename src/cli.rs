use clap::Parser;

/// Every argument is handed to the editor, so the launcher defines no
/// options of its own (not even `--help`).
#[derive(Parser)]
#[command(name = "nvim-launcher")]
#[command(about = "Launches the bundled editor with its fonts and environment")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Arguments passed directly to the editor
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_args() {
        let cli = Cli::parse_from(["nvim-launcher"]);
        assert!(cli.args.is_empty());
    }

    #[test]
    fn test_parse_plain_args() {
        let cli = Cli::parse_from(["nvim-launcher", "file.txt", "other.txt"]);
        assert_eq!(cli.args, vec!["file.txt", "other.txt"]);
    }

    #[test]
    fn test_parse_args_with_dash() {
        let cli = Cli::parse_from(["nvim-launcher", "--frame", "none", "-c", "echo 'hello'"]);
        assert_eq!(cli.args, vec!["--frame", "none", "-c", "echo 'hello'"]);
    }

    #[test]
    fn test_help_is_forwarded() {
        let cli = Cli::parse_from(["nvim-launcher", "--help"]);
        assert_eq!(cli.args, vec!["--help"]);
    }
}
