//! Windows font table via GDI.
//!
//! Fonts added with `AddFontResourceW` stay in the session font table until
//! removed or until the user logs off, so every successful load has to be
//! paired with a `RemoveFontResourceW`.

use std::ffi::OsStr;
use std::iter;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use windows_sys::Win32::Graphics::Gdi::{AddFontResourceW, RemoveFontResourceW};

use crate::font::{FontError, ResourceHandle, ResourceLoader};

#[derive(Debug, Default)]
pub struct SystemFontLoader;

impl SystemFontLoader {
    pub fn new() -> Self {
        Self
    }
}

fn to_wide(path: &Path) -> Result<Vec<u16>, FontError> {
    let wide: Vec<u16> = OsStr::new(path).encode_wide().collect();
    if wide.contains(&0) {
        return Err(FontError::InvalidPath {
            path: path.to_path_buf(),
        });
    }
    Ok(wide.into_iter().chain(iter::once(0)).collect())
}

impl ResourceLoader for SystemFontLoader {
    fn load(&mut self, handle: &ResourceHandle) -> Result<(), FontError> {
        let wide = to_wide(handle.path())?;
        // Returns the number of fonts added; 0 means the file was not accepted.
        let added = unsafe { AddFontResourceW(wide.as_ptr()) };
        if added > 0 {
            Ok(())
        } else {
            Err(FontError::Rejected {
                path: handle.path().to_path_buf(),
            })
        }
    }

    fn unload(&mut self, handle: &ResourceHandle) -> Result<(), FontError> {
        let wide = to_wide(handle.path())?;
        let removed = unsafe { RemoveFontResourceW(wide.as_ptr()) };
        if removed != 0 {
            Ok(())
        } else {
            Err(FontError::Rejected {
                path: handle.path().to_path_buf(),
            })
        }
    }
}
