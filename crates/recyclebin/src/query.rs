use std::marker::PhantomData;

use crate::backend::QuerySurface;
use crate::layout::{RbInfo32, RbInfo64, StatsBuffer};
use crate::types::{QueryStatus, RecycleBinStats};

/// Uniform view of "how much is in the recycle bin for this path".
///
/// Queries are fail-soft: whatever goes wrong underneath, the call returns
/// a status code and leaves the counters at zero. Nothing is propagated.
pub trait RecycleBinQuery {
    /// Query the bin for `root_path`, replacing the stored counters.
    ///
    /// An empty path queries every bin the surface can see.
    fn query_recycle_bin(&mut self, root_path: &str) -> QueryStatus;

    /// Item count from the last query
    fn items(&self) -> u64;

    /// Byte total from the last query
    fn bytes(&self) -> u64;

    /// Both counters from the last query
    fn stats(&self) -> RecycleBinStats {
        RecycleBinStats::new(self.items(), self.bytes())
    }
}

/// A query bound to one native buffer layout.
pub struct LayoutQuery<B, S> {
    surface: S,
    stats: RecycleBinStats,
    layout: PhantomData<fn() -> B>,
}

/// Query using the 32-bit `SHQUERYRBINFO` layout.
pub type RecycleBinQuery32<S> = LayoutQuery<RbInfo32, S>;

/// Query using the 64-bit `SHQUERYRBINFO` layout.
pub type RecycleBinQuery64<S> = LayoutQuery<RbInfo64, S>;

impl<B, S> LayoutQuery<B, S> {
    /// Create a query over `surface` with zeroed counters.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            stats: RecycleBinStats::default(),
            layout: PhantomData,
        }
    }

    /// The surface this query calls into
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<B, S> RecycleBinQuery for LayoutQuery<B, S>
where
    B: StatsBuffer,
    S: QuerySurface<B>,
{
    fn query_recycle_bin(&mut self, root_path: &str) -> QueryStatus {
        self.stats = RecycleBinStats::default();

        let mut buffer = B::default();
        match self.surface.query(root_path, &mut buffer) {
            Ok(status) if status.succeeded() => {
                self.stats = RecycleBinStats::new(buffer.items(), buffer.bytes());
                status
            }
            Ok(status) => {
                log::debug!("recycle bin query for {root_path:?} returned {status}");
                status
            }
            Err(e) => {
                log::debug!("recycle bin query for {root_path:?} failed: {e}");
                e.status()
            }
        }
    }

    fn items(&self) -> u64 {
        self.stats.items
    }

    fn bytes(&self) -> u64 {
        self.stats.bytes
    }
}

/// Pick the variant whose layout matches this process's pointer width.
pub fn for_host<S>(surface: S) -> Box<dyn RecycleBinQuery>
where
    S: QuerySurface<RbInfo32> + QuerySurface<RbInfo64> + 'static,
{
    if cfg!(target_pointer_width = "64") {
        Box::new(RecycleBinQuery64::new(surface))
    } else {
        Box::new(RecycleBinQuery32::new(surface))
    }
}
