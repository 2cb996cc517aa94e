//! macOS font table via CoreText, registered with process scope.

use std::ptr;

use objc2_core_foundation::{CFRetained, CFURL};
use objc2_core_text::{
    CTFontManagerRegisterFontsForURL, CTFontManagerScope, CTFontManagerUnregisterFontsForURL,
};

use crate::font::{FontError, ResourceHandle, ResourceLoader};

fn file_url(handle: &ResourceHandle) -> Result<CFRetained<CFURL>, FontError> {
    CFURL::from_file_path(handle.path()).ok_or_else(|| FontError::InvalidPath {
        path: handle.path().to_path_buf(),
    })
}

fn rejected(handle: &ResourceHandle) -> FontError {
    FontError::Rejected {
        path: handle.path().to_path_buf(),
    }
}

#[derive(Debug, Default)]
pub struct SystemFontLoader;

impl SystemFontLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ResourceLoader for SystemFontLoader {
    fn load(&mut self, handle: &ResourceHandle) -> Result<(), FontError> {
        let url = file_url(handle)?;
        // Passing a null error out-pointer tells CoreText not to allocate one.
        let ok = unsafe {
            CTFontManagerRegisterFontsForURL(&url, CTFontManagerScope::Process, ptr::null_mut())
        };
        if ok {
            Ok(())
        } else {
            Err(rejected(handle))
        }
    }

    fn unload(&mut self, handle: &ResourceHandle) -> Result<(), FontError> {
        let url = file_url(handle)?;
        let ok = unsafe {
            CTFontManagerUnregisterFontsForURL(&url, CTFontManagerScope::Process, ptr::null_mut())
        };
        if ok {
            Ok(())
        } else {
            Err(rejected(handle))
        }
    }
}
