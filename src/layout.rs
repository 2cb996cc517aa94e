//! Where everything lives relative to the launcher executable.

use std::io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use crate::config::Config;
use crate::env::{EnvAssignment, SearchPath};
use crate::font::ResourceBatch;
use crate::launch::LaunchRequest;
use crate::sequencer::LaunchPlan;

/// Directory containing the running executable.
pub fn install_root() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(|p| p.to_path_buf()).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        )
    })
}

#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
    config: Config,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn fonts(&self) -> ResourceBatch {
        ResourceBatch::from_dir(&self.root.join(&self.config.fonts_dir), &self.config.fonts)
    }

    /// `git/bin` becomes `<sep>git<sep>bin` so it can be glued onto the root.
    pub fn search_path(&self) -> SearchPath {
        let fragments = self
            .config
            .search_path
            .iter()
            .map(|dir| {
                let dir = dir.trim_start_matches('/').replace('/', MAIN_SEPARATOR_STR);
                format!("{}{}", MAIN_SEPARATOR, dir)
            })
            .collect();
        SearchPath::new(self.root.clone(), fragments)
    }

    pub fn assignments(&self) -> Vec<EnvAssignment> {
        self.config
            .env
            .iter()
            .map(|(name, dir)| EnvAssignment::dir(name.clone(), &self.root.join(dir)))
            .collect()
    }

    /// Where the target may live inside the install: the root itself, then
    /// each bundled search-path directory in order.
    fn bundled_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = vec![self.root.join(&self.config.target)];
        candidates.extend(self.config.search_path.iter().map(|dir| {
            self.root
                .join(dir.trim_start_matches('/'))
                .join(&self.config.target)
        }));
        candidates
    }

    /// The bundled executable (install root, then the bundled search-path
    /// directories), else whatever the current `PATH` resolves.
    pub fn target(&self) -> PathBuf {
        let mut candidates = self.bundled_candidates();
        if let Some(found) = candidates.iter().find(|c| c.is_file()) {
            return found.clone();
        }
        match which::which(&self.config.target) {
            Ok(found) => {
                log::info!(
                    "{} not found in {}, using {}",
                    self.config.target,
                    self.root.display(),
                    found.display()
                );
                found
            }
            Err(_) => candidates.swap_remove(0),
        }
    }

    pub fn plan(&self, args: Vec<String>) -> LaunchPlan {
        LaunchPlan {
            fonts: self.fonts(),
            search_path: self.search_path(),
            assignments: self.assignments(),
            request: LaunchRequest::new(self.target(), args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_fonts_are_under_fonts_dir() {
        let layout = Layout::new("/opt/app", Config::default());
        let fonts = layout.fonts();
        assert_eq!(fonts.len(), 5);
        assert_eq!(
            fonts.handles()[0].path(),
            Path::new("/opt/app/fonts/FiraCodeNerdFontMono-Medium.ttf")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_search_path_fragments() {
        let layout = Layout::new("/opt/app", Config::default());
        let search = layout.search_path();
        assert_eq!(search.variable, "PATH");
        assert_eq!(search.base, Path::new("/opt/app"));
        assert_eq!(search.fragments, vec!["/git/bin", "/nvim/bin"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_assignments_point_into_root() {
        let layout = Layout::new("/opt/app", Config::default());
        let assignments = layout.assignments();
        assert_eq!(
            assignments,
            vec![
                EnvAssignment::new("XDG_CONFIG_HOME", "/opt/app/config"),
                EnvAssignment::new("XDG_DATA_HOME", "/opt/app/data"),
                EnvAssignment::new("XDG_STATE_HOME", "/opt/app/data"),
                EnvAssignment::new("XDG_CACHE_HOME", "/opt/app/cache"),
            ]
        );
    }

    #[test]
    fn test_bundled_target_wins() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            target: "editor-bin".into(),
            ..Config::default()
        };
        fs::write(dir.path().join("editor-bin"), b"").unwrap();

        let layout = Layout::new(dir.path(), config);
        assert_eq!(layout.target(), dir.path().join("editor-bin"));
    }

    #[test]
    fn test_target_found_in_bundled_search_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            target: "editor-in-nvim-bin".into(),
            ..Config::default()
        };
        fs::create_dir_all(dir.path().join("nvim").join("bin")).unwrap();
        let bundled = dir.path().join("nvim").join("bin").join("editor-in-nvim-bin");
        fs::write(&bundled, b"").unwrap();

        let layout = Layout::new(dir.path(), config);
        assert_eq!(layout.target(), bundled);
    }

    #[test]
    fn test_root_target_wins_over_search_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            target: "editor-both".into(),
            ..Config::default()
        };
        fs::create_dir_all(dir.path().join("git").join("bin")).unwrap();
        fs::write(dir.path().join("git").join("bin").join("editor-both"), b"").unwrap();
        fs::write(dir.path().join("editor-both"), b"").unwrap();

        let layout = Layout::new(dir.path(), config);
        assert_eq!(layout.target(), dir.path().join("editor-both"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_root_is_kept_in_assignments() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = PathBuf::from(OsStr::from_bytes(b"/opt/app\xff"));
        let layout = Layout::new(root.clone(), Config::default());

        let assignments = layout.assignments();
        assert_eq!(
            assignments[0].value.as_os_str(),
            OsStr::from_bytes(b"/opt/app\xff/config")
        );
        assert_eq!(layout.search_path().base, root);
    }

    #[test]
    fn test_unknown_target_stays_in_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            target: "no-such-editor-7f3a".into(),
            ..Config::default()
        };
        let layout = Layout::new(dir.path(), config);
        assert_eq!(layout.target(), dir.path().join("no-such-editor-7f3a"));
    }

    #[test]
    fn test_plan_forwards_args() {
        let layout = Layout::new("/opt/app", Config::default());
        let plan = layout.plan(vec!["-c".into(), "echo".into()]);
        assert_eq!(plan.request.args, vec!["-c", "echo"]);
        assert_eq!(plan.fonts, layout.fonts());
    }
}
