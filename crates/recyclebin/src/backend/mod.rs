use crate::error::Result;
use crate::layout::StatsBuffer;
use crate::types::QueryStatus;

#[cfg(windows)]
pub mod shell;
#[cfg(feature = "trash-dir")]
pub mod trash_dir;

/// The native "query aggregate recycle bin stats" capability.
///
/// Implementations fill a caller-supplied buffer of layout `B` for the bin
/// at `root_path` and return a status code. An empty `root_path` means
/// every bin the surface knows about.
///
/// Returning `Err` is the equivalent of the native side throwing; the
/// query contract swallows it the same way as a failure status.
pub trait QuerySurface<B: StatsBuffer> {
    /// Query the bin at `root_path` into `buffer`
    fn query(&self, root_path: &str, buffer: &mut B) -> Result<QueryStatus>;
}

impl<B: StatsBuffer, S: QuerySurface<B> + ?Sized> QuerySurface<B> for &S {
    fn query(&self, root_path: &str, buffer: &mut B) -> Result<QueryStatus> {
        (**self).query(root_path, buffer)
    }
}

/// The surface used when no other is supplied.
#[cfg(windows)]
pub fn default_surface() -> shell::ShellSurface {
    shell::ShellSurface
}

/// The surface used when no other is supplied.
#[cfg(all(not(windows), feature = "trash-dir"))]
pub fn default_surface() -> trash_dir::TrashDirSurface {
    trash_dir::TrashDirSurface::from_env()
}
