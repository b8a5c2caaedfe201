//! # recyclebin
//!
//! Aggregate "how much is in the recycle bin" queries, hiding the native
//! structure layout differences between 32-bit and 64-bit processes.
//!
//! ## Fail-soft contract
//!
//! A query never returns an error and never panics on a missing bin. Every
//! failure (no bin on the volume, bad path, native call error) leaves the
//! counters at `(0, 0)` and is reported only through a non-success
//! [`QueryStatus`]. Callers treat that as "nothing reclaimable".
//!
//! ## Example
//!
//! ```no_run
//! use recyclebin::RecycleBinQuery;
//!
//! let mut query = recyclebin::default_query();
//! let status = query.query_recycle_bin("");
//! if status.succeeded() {
//!     println!("{} items, {} bytes", query.items(), query.bytes());
//! }
//! ```
//!
//! ## Surfaces
//!
//! - `ShellSurface` (Windows): `SHQueryRecycleBinW` from shell32
//! - `TrashDirSurface` (`trash-dir` feature): freedesktop.org / macOS trash
//!   directories on disk
//!
//! Any type implementing [`QuerySurface`] can stand in, which is how the
//! tests drive the contract.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Native query surfaces.
pub mod backend;
/// Error types raised by query surfaces.
pub mod error;
/// Fixed-layout native buffers.
pub mod layout;
/// The query contract and its layout-specific variants.
pub mod query;
/// Stats and status types.
pub mod types;

pub use backend::QuerySurface;
pub use error::{Error, Result};
pub use layout::{RbInfo32, RbInfo64, StatsBuffer};
pub use query::{LayoutQuery, RecycleBinQuery, RecycleBinQuery32, RecycleBinQuery64, for_host};
pub use types::{QueryStatus, RecycleBinStats, RootReport};

/// Create a query over the platform's default surface, using the layout
/// that matches this process.
#[cfg(any(windows, feature = "trash-dir"))]
pub fn default_query() -> Box<dyn RecycleBinQuery> {
    for_host(backend::default_surface())
}

/// Query each root in turn and total the results.
///
/// Failed roots contribute nothing; their statuses are returned alongside
/// so a caller can still tell them apart.
pub fn query_many<R: AsRef<str>>(
    query: &mut dyn RecycleBinQuery,
    roots: &[R],
) -> (RecycleBinStats, Vec<RootReport>) {
    let mut total = RecycleBinStats::default();
    let mut per_root = Vec::with_capacity(roots.len());

    for root in roots {
        let root = root.as_ref();
        let status = query.query_recycle_bin(root);
        let stats = query.stats();
        total.accumulate(stats);
        per_root.push(RootReport {
            root: root.to_string(),
            status,
            stats,
        });
    }

    (total, per_root)
}
