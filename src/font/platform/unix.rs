//! Fallback for Unix systems without a process-scoped font table.
//!
//! Fontconfig only offers an application-wide add with no matching remove,
//! so loading just checks that the font can be opened and unloading does
//! nothing.

use std::fs::File;

use crate::font::{FontError, ResourceHandle, ResourceLoader};

#[derive(Debug, Default)]
pub struct SystemFontLoader;

impl SystemFontLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ResourceLoader for SystemFontLoader {
    fn load(&mut self, handle: &ResourceHandle) -> Result<(), FontError> {
        File::open(handle.path()).map_err(|source| FontError::Io {
            path: handle.path().to_path_buf(),
            source,
        })?;
        Ok(())
    }

    fn unload(&mut self, _handle: &ResourceHandle) -> Result<(), FontError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_existing_font() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\x00\x01\x00\x00").unwrap();

        let mut loader = SystemFontLoader::new();
        assert!(loader.load(&ResourceHandle::new(file.path())).is_ok());
        assert!(loader.unload(&ResourceHandle::new(file.path())).is_ok());
    }

    #[test]
    fn test_load_missing_font_fails() {
        let mut loader = SystemFontLoader::new();
        let handle = ResourceHandle::new("/definitely/not/here.ttf");
        match loader.load(&handle) {
            Err(FontError::Io { path, .. }) => assert_eq!(path, handle.path()),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
