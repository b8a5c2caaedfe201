//! `SHQueryRecycleBinW` backend.
//!
//! The shell fills the `SHQUERYRBINFO` the caller hands it. The struct's
//! packing differs between 32-bit and 64-bit processes, so the buffer type
//! picked by the query variant must match the host or the counters land at
//! the wrong offsets.

use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;

use windows_sys::Win32::UI::Shell::{SHQUERYRBINFO, SHQueryRecycleBinW};

use crate::error::{Error, Result};
use crate::layout::{RbInfo32, RbInfo64, StatsBuffer};
use crate::types::QueryStatus;

use super::QuerySurface;

/// Queries the Windows Recycle Bin through `shell32`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellSurface;

impl ShellSurface {
    /// Encode a root path as a NUL-terminated wide string.
    fn wide(root_path: &str) -> Result<Vec<u16>> {
        if root_path.contains('\0') {
            return Err(Error::InvalidPath(format!(
                "root path contains NUL: {root_path:?}"
            )));
        }
        Ok(OsStr::new(root_path)
            .encode_wide()
            .chain(std::iter::once(0))
            .collect())
    }

    /// Call the shell with a buffer whose size matches this process.
    fn call<B: StatsBuffer>(root_path: &str, buffer: &mut B) -> Result<QueryStatus> {
        if std::mem::size_of::<B>() != std::mem::size_of::<SHQUERYRBINFO>() {
            return Err(Error::Unsupported(format!(
                "{}-byte layout does not match this process's SHQUERYRBINFO ({} bytes)",
                std::mem::size_of::<B>(),
                std::mem::size_of::<SHQUERYRBINFO>()
            )));
        }

        let wide = Self::wide(root_path)?;
        // An empty root asks the shell for every bin on every drive.
        let root = if root_path.is_empty() {
            std::ptr::null()
        } else {
            wide.as_ptr()
        };

        #[allow(unsafe_code)]
        // SAFETY: `root` is null or a NUL-terminated buffer that outlives the
        // call, and `buffer` is exclusively borrowed with the size checked
        // against SHQUERYRBINFO above.
        let hr = unsafe { SHQueryRecycleBinW(root, std::ptr::from_mut(buffer).cast()) };

        log::debug!("SHQueryRecycleBinW({root_path:?}) -> 0x{:08X}", hr as u32);
        Ok(QueryStatus(hr))
    }
}

impl QuerySurface<RbInfo32> for ShellSurface {
    fn query(&self, root_path: &str, buffer: &mut RbInfo32) -> Result<QueryStatus> {
        Self::call(root_path, buffer)
    }
}

impl QuerySurface<RbInfo64> for ShellSurface {
    fn query(&self, root_path: &str, buffer: &mut RbInfo64) -> Result<QueryStatus> {
        Self::call(root_path, buffer)
    }
}
