//! Font registration with all-or-nothing batch semantics.
//!
//! A [`Registrar`] drives a [`ResourceLoader`] over a [`ResourceBatch`]. Loading
//! stops at the first failure and unloads, in reverse order, every font that
//! was registered before it. Unloading is best-effort and never fails.

pub mod platform;

use std::path::{Path, PathBuf};

pub use platform::SystemFontLoader;

/// One loadable font file, identified by its resolved path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    path: PathBuf,
}

impl ResourceHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Ordered group of handles loaded and unloaded together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceBatch {
    handles: Vec<ResourceHandle>,
}

impl ResourceBatch {
    pub fn new(handles: Vec<ResourceHandle>) -> Self {
        Self { handles }
    }

    /// Builds a batch by joining each file name onto `dir`, keeping order.
    pub fn from_dir<I, S>(dir: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let handles = names
            .into_iter()
            .map(|name| ResourceHandle::new(dir.join(name)))
            .collect();
        Self { handles }
    }

    pub fn handles(&self) -> &[ResourceHandle] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("font table rejected {}", .path.display())]
    Rejected { path: PathBuf },
    #[error("failed to read font {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("font path {} cannot be passed to the OS", .path.display())]
    InvalidPath { path: PathBuf },
}

impl FontError {
    /// The font the error is about.
    pub fn path(&self) -> &Path {
        match self {
            FontError::Rejected { path }
            | FontError::Io { path, .. }
            | FontError::InvalidPath { path } => path,
        }
    }
}

/// Access to an OS font table.
pub trait ResourceLoader {
    fn load(&mut self, handle: &ResourceHandle) -> Result<(), FontError>;
    fn unload(&mut self, handle: &ResourceHandle) -> Result<(), FontError>;
}

impl<T: ResourceLoader + ?Sized> ResourceLoader for &mut T {
    fn load(&mut self, handle: &ResourceHandle) -> Result<(), FontError> {
        (**self).load(handle)
    }

    fn unload(&mut self, handle: &ResourceHandle) -> Result<(), FontError> {
        (**self).unload(handle)
    }
}

pub struct Registrar<L> {
    loader: L,
}

impl<L: ResourceLoader> Registrar<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn into_loader(self) -> L {
        self.loader
    }

    /// Loads a single font, logging the failure with the font's path.
    pub fn load_one(&mut self, handle: &ResourceHandle) -> Result<(), FontError> {
        match self.loader.load(handle) {
            Ok(()) => {
                log::debug!("Loaded font {}", handle.path().display());
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load font from {}: {}", handle.path().display(), e);
                Err(e)
            }
        }
    }

    /// Unloads a single font. The font may already be gone, so errors are dropped.
    pub fn unload_one(&mut self, handle: &ResourceHandle) {
        if let Err(e) = self.loader.unload(handle) {
            log::debug!("Ignoring unload failure for {}: {}", handle.path().display(), e);
        }
    }

    /// Loads every font in order. On the first failure the fonts already
    /// loaded are unloaded last-to-first and the failure is returned.
    pub fn load_all(&mut self, batch: &ResourceBatch) -> Result<(), FontError> {
        for (index, handle) in batch.handles().iter().enumerate() {
            if let Err(e) = self.load_one(handle) {
                for loaded in batch.handles()[..index].iter().rev() {
                    self.unload_one(loaded);
                }
                return Err(e);
            }
        }
        log::info!("Loaded {} font(s)", batch.len());
        Ok(())
    }

    /// Unloads every font in forward order, ignoring individual failures.
    pub fn unload_all(&mut self, batch: &ResourceBatch) {
        for handle in batch.handles() {
            self.unload_one(handle);
        }
        log::debug!("Unloaded {} font(s)", batch.len());
    }
}
