//! Trash directory backend.
//!
//! Computes the same aggregates the Windows shell reports, from a
//! freedesktop.org trash layout:
//!
//! - home trash: `$XDG_DATA_HOME/Trash` (`~/.Trash` on macOS)
//! - per-volume trash: `<root>/.Trash/<uid>` or `<root>/.Trash-<uid>`
//!
//! Items are the top-level entries of the trash's `files/` directory (or the
//! trash directory itself when it has no `files/`, as on macOS). Bytes are
//! the recursive size of those entries.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::layout::StatsBuffer;
use crate::types::QueryStatus;

use super::QuerySurface;

/// Reads recycle bin statistics from trash directories on disk.
#[derive(Debug, Clone, Default)]
pub struct TrashDirSurface {
    home_trash: Option<PathBuf>,
    uid: Option<u32>,
}

impl TrashDirSurface {
    /// Surface with an explicit home trash and the current user's uid.
    pub fn new(home_trash: Option<PathBuf>) -> Self {
        Self {
            home_trash,
            uid: current_uid(),
        }
    }

    /// Surface for the platform's home trash.
    pub fn from_env() -> Self {
        Self::new(default_home_trash())
    }

    /// Override the uid used for per-volume trash names.
    pub fn with_uid(mut self, uid: u32) -> Self {
        self.uid = Some(uid);
        self
    }

    /// The home trash this surface answers empty-root queries with.
    pub fn home_trash(&self) -> Option<&Path> {
        self.home_trash.as_deref()
    }

    /// Trash directories that belong to `root_path`, in lookup order.
    fn candidates(&self, root_path: &str) -> Vec<PathBuf> {
        if root_path.is_empty() {
            return self.home_trash.iter().cloned().collect();
        }

        let root = Path::new(root_path);
        let mut dirs = Vec::new();
        if let Some(uid) = self.uid {
            dirs.push(root.join(".Trash").join(uid.to_string()));
            dirs.push(root.join(format!(".Trash-{uid}")));
        }
        if self.home_trash.as_deref().is_some_and(|h| h.starts_with(root)) {
            dirs.extend(self.home_trash.iter().cloned());
        }
        dirs
    }

    /// Count and size the entries of one trash directory.
    fn scan(trash: &Path) -> Result<(u64, u64)> {
        let files = trash.join("files");
        let dir = if files.is_dir() { files } else { trash.to_path_buf() };

        let read_dir = fs::read_dir(&dir).map_err(|source| Error::Io {
            path: dir.clone(),
            source,
        })?;

        let mut items = 0u64;
        let mut bytes = 0u64;
        for entry in read_dir.flatten() {
            if entry.file_name() == ".DS_Store" {
                continue;
            }
            items += 1;
            bytes += entry_size(&entry.path());
        }
        Ok((items, bytes))
    }
}

impl<B: StatsBuffer> QuerySurface<B> for TrashDirSurface {
    fn query(&self, root_path: &str, buffer: &mut B) -> Result<QueryStatus> {
        let found: Vec<PathBuf> = self
            .candidates(root_path)
            .into_iter()
            .filter(|p| p.is_dir())
            .collect();

        if found.is_empty() {
            log::debug!("no trash directory for {root_path:?}");
            return Ok(QueryStatus::NOT_FOUND);
        }

        let mut items = 0u64;
        let mut bytes = 0u64;
        for trash in &found {
            let (i, b) = Self::scan(trash)?;
            log::debug!("{}: {i} items, {b} bytes", trash.display());
            items += i;
            bytes += b;
        }

        buffer.set(items, bytes);
        Ok(QueryStatus::OK)
    }
}

/// Size of a file, or the recursive size of a directory.
fn entry_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

#[cfg(target_os = "macos")]
fn default_home_trash() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".Trash"))
}

#[cfg(not(target_os = "macos"))]
fn default_home_trash() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("Trash"))
}

#[cfg(unix)]
fn current_uid() -> Option<u32> {
    #[allow(unsafe_code)]
    // SAFETY: getuid has no preconditions and cannot fail.
    let uid = unsafe { libc::getuid() };
    Some(uid)
}

#[cfg(not(unix))]
fn current_uid() -> Option<u32> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{RbInfo32, RbInfo64};

    fn populate(trash: &Path) {
        let files = trash.join("files");
        fs::create_dir_all(files.join("folder")).unwrap();
        fs::write(files.join("notes.txt"), vec![b'x'; 10]).unwrap();
        fs::write(files.join("folder").join("a.bin"), vec![0u8; 5]).unwrap();
        fs::write(files.join("folder").join("b.bin"), vec![0u8; 7]).unwrap();
        fs::create_dir_all(trash.join("info")).unwrap();
        fs::write(trash.join("info").join("notes.txt.trashinfo"), "[Trash Info]").unwrap();
    }

    #[test]
    fn test_home_trash_counts_top_level_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let trash = tmp.path().join("Trash");
        populate(&trash);

        let surface = TrashDirSurface::new(Some(trash));
        let mut buffer = RbInfo64::default();
        let status = surface.query("", &mut buffer).unwrap();

        assert!(status.succeeded());
        assert_eq!(buffer.items(), 2);
        assert_eq!(buffer.bytes(), 22);
    }

    #[test]
    fn test_volume_trash_by_uid() {
        let tmp = tempfile::tempdir().unwrap();
        populate(&tmp.path().join(".Trash-4242"));

        let surface = TrashDirSurface::new(None).with_uid(4242);
        let mut buffer = RbInfo32::default();
        let status = surface
            .query(tmp.path().to_str().unwrap(), &mut buffer)
            .unwrap();

        assert!(status.succeeded());
        assert_eq!(buffer.items(), 2);
        assert_eq!(buffer.bytes(), 22);
    }

    #[test]
    fn test_flat_trash_without_files_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let trash = tmp.path().join(".Trash");
        fs::create_dir_all(&trash).unwrap();
        fs::write(trash.join("old.log"), vec![0u8; 100]).unwrap();
        fs::write(trash.join(".DS_Store"), vec![0u8; 6]).unwrap();

        let surface = TrashDirSurface::new(Some(trash));
        let mut buffer = RbInfo64::default();
        surface.query("", &mut buffer).unwrap();

        assert_eq!(buffer.items(), 1);
        assert_eq!(buffer.bytes(), 100);
    }

    #[test]
    fn test_missing_trash_is_not_found_status() {
        let tmp = tempfile::tempdir().unwrap();
        let surface = TrashDirSurface::new(Some(tmp.path().join("nope"))).with_uid(1);

        let mut buffer = RbInfo64::default();
        let status = surface.query("", &mut buffer).unwrap();
        assert_eq!(status, QueryStatus::NOT_FOUND);

        let status = surface
            .query(tmp.path().to_str().unwrap(), &mut buffer)
            .unwrap();
        assert_eq!(status, QueryStatus::NOT_FOUND);
        assert_eq!(buffer.items(), 0);
    }

    #[test]
    fn test_no_home_trash_configured() {
        let surface = TrashDirSurface::new(None);
        assert!(surface.home_trash().is_none());
        assert!(surface.candidates("").is_empty());
    }
}
