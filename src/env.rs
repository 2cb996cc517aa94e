//! Process environment setup for the launched editor.
//!
//! Assignments are applied in order and the first failure stops the run.
//! Assignments that already succeeded are left in place: variables set on
//! this process only reach it and its children, so there is nothing to undo.
//!
//! Values are `OsString`s end to end so install paths that are not valid
//! UTF-8 reach the child byte for byte.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Longest variable value accepted when reading the current environment.
pub const MAX_ENV_VALUE_LEN: usize = 32767;

#[cfg(windows)]
pub const SEARCH_PATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
pub const SEARCH_PATH_SEPARATOR: &str = ":";

pub const SEARCH_PATH_VARIABLE: &str = "PATH";

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("environment variable {name} is not set")]
    NotPresent { name: String },
    #[error("environment variable {name} is {len} characters long (limit {max})")]
    TooLong { name: String, len: usize, max: usize },
    #[error("cannot set environment variable {name:?}: {reason}")]
    Invalid { name: String, reason: &'static str },
}

/// Read/write access to a process environment.
pub trait EnvironmentWriter {
    fn read(&self, name: &str) -> Result<OsString, EnvError>;
    fn write(&mut self, name: &str, value: &OsStr) -> Result<(), EnvError>;
}

impl<T: EnvironmentWriter + ?Sized> EnvironmentWriter for &mut T {
    fn read(&self, name: &str) -> Result<OsString, EnvError> {
        (**self).read(name)
    }

    fn write(&mut self, name: &str, value: &OsStr) -> Result<(), EnvError> {
        (**self).write(name, value)
    }
}

/// The environment of the current process, inherited by spawned children.
#[derive(Debug, Default)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    pub fn new() -> Self {
        Self
    }
}

/// Length in the units the OS limits: UTF-16 code units on Windows,
/// characters elsewhere.
#[cfg(windows)]
fn value_len(value: &OsStr) -> usize {
    use std::os::windows::ffi::OsStrExt;
    value.encode_wide().count()
}

#[cfg(not(windows))]
fn value_len(value: &OsStr) -> usize {
    value.to_string_lossy().chars().count()
}

/// Rejects what `std::env::set_var` would panic on.
fn validate(name: &str, value: &OsStr) -> Result<(), EnvError> {
    let reason = if name.is_empty() {
        Some("empty name")
    } else if name.contains('=') {
        Some("name contains '='")
    } else if name.contains('\0') {
        Some("name contains NUL")
    } else if value.to_string_lossy().contains('\0') {
        Some("value contains NUL")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(EnvError::Invalid {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

impl EnvironmentWriter for ProcessEnvironment {
    fn read(&self, name: &str) -> Result<OsString, EnvError> {
        std::env::var_os(name).ok_or_else(|| EnvError::NotPresent {
            name: name.to_string(),
        })
    }

    fn write(&mut self, name: &str, value: &OsStr) -> Result<(), EnvError> {
        validate(name, value)?;
        std::env::set_var(name, value);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvAssignment {
    pub name: String,
    pub value: OsString,
}

impl EnvAssignment {
    pub fn new(name: impl Into<String>, value: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Assignment whose value is a directory path.
    pub fn dir(name: impl Into<String>, dir: &Path) -> Self {
        Self::new(name, dir.as_os_str())
    }
}

/// Directories appended to a path-like variable.
///
/// Each fragment is appended as `separator + base + fragment`, so fragments
/// carry their own leading path separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    pub variable: String,
    pub base: PathBuf,
    pub fragments: Vec<String>,
}

impl SearchPath {
    pub fn new(base: impl Into<PathBuf>, fragments: Vec<String>) -> Self {
        Self {
            variable: SEARCH_PATH_VARIABLE.to_string(),
            base: base.into(),
            fragments,
        }
    }
}

pub struct Configurator<E> {
    env: E,
}

impl<E: EnvironmentWriter> Configurator<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn into_env(self) -> E {
        self.env
    }

    /// Reads a variable, refusing values longer than [`MAX_ENV_VALUE_LEN`].
    pub fn read_current(&self, name: &str) -> Result<OsString, EnvError> {
        let value = self.env.read(name)?;
        let len = value_len(&value);
        if len > MAX_ENV_VALUE_LEN {
            return Err(EnvError::TooLong {
                name: name.to_string(),
                len,
                max: MAX_ENV_VALUE_LEN,
            });
        }
        Ok(value)
    }

    /// Current value of the search-path variable with every fragment appended.
    /// An empty current value is kept as is.
    pub fn compute_augmented_search_path(
        &self,
        search_path: &SearchPath,
    ) -> Result<EnvAssignment, EnvError> {
        let mut value = self.read_current(&search_path.variable).map_err(|e| {
            log::error!("Failed to get current {}: {}", search_path.variable, e);
            e
        })?;
        for fragment in &search_path.fragments {
            value.push(SEARCH_PATH_SEPARATOR);
            value.push(search_path.base.as_os_str());
            value.push(fragment);
        }
        Ok(EnvAssignment::new(search_path.variable.clone(), value))
    }

    /// Applies each assignment in order, stopping at the first failure.
    pub fn apply_set(&mut self, assignments: &[EnvAssignment]) -> Result<(), EnvError> {
        for assignment in assignments {
            if let Err(e) = self.env.write(&assignment.name, &assignment.value) {
                log::error!("Could not set {} variable: {}", assignment.name, e);
                return Err(e);
            }
            log::debug!(
                "Set {}={}",
                assignment.name,
                assignment.value.to_string_lossy()
            );
        }
        Ok(())
    }
}
