use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Target executable plus the arguments forwarded to it unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl LaunchRequest {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Arguments joined with single spaces, without any re-quoting.
    pub fn joined_args(&self) -> String {
        self.args.join(" ")
    }

    pub fn command_line(&self) -> String {
        let program = self.program.to_string_lossy();
        if self.args.is_empty() {
            program.into_owned()
        } else {
            format!("{} {}", program, self.joined_args())
        }
    }
}

/// How the child ended. `code` is `None` when it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildExit {
    pub code: Option<i32>,
}

impl fmt::Display for ChildExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to wait for {}: {source}", .program.display())]
    Wait {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// Raw OS error code behind the failure, if any.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            LaunchError::Spawn { source, .. } | LaunchError::Wait { source, .. } => {
                source.raw_os_error()
            }
        }
    }
}

/// Starts a child process and blocks until it exits.
pub trait ProcessLauncher {
    fn run(&mut self, request: &LaunchRequest) -> Result<ChildExit, LaunchError>;
}

impl<T: ProcessLauncher + ?Sized> ProcessLauncher for &mut T {
    fn run(&mut self, request: &LaunchRequest) -> Result<ChildExit, LaunchError> {
        (**self).run(request)
    }
}

/// Launches through `std::process`, inheriting stdio and the current
/// environment. The wait has no timeout: the launcher lives as long as the
/// child does.
#[derive(Debug, Default)]
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
fn build_command(request: &LaunchRequest) -> Command {
    use std::os::windows::process::CommandExt;

    let mut cmd = Command::new(&request.program);
    if !request.args.is_empty() {
        cmd.raw_arg(request.joined_args());
    }
    cmd
}

#[cfg(not(windows))]
fn build_command(request: &LaunchRequest) -> Command {
    let mut cmd = Command::new(&request.program);
    cmd.args(&request.args);
    cmd
}

fn spawn_error(program: &Path, source: io::Error) -> LaunchError {
    LaunchError::Spawn {
        program: program.to_path_buf(),
        source,
    }
}

impl ProcessLauncher for SystemLauncher {
    fn run(&mut self, request: &LaunchRequest) -> Result<ChildExit, LaunchError> {
        let mut child = build_command(request)
            .spawn()
            .map_err(|e| spawn_error(&request.program, e))?;

        log::info!("Started {} (pid {})", request.command_line(), child.id());

        let status = child.wait().map_err(|source| LaunchError::Wait {
            program: request.program.clone(),
            source,
        })?;
        Ok(ChildExit {
            code: status.code(),
        })
    }
}
