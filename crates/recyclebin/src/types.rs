use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate contents of one or more recycle bins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecycleBinStats {
    /// Number of items in the bin
    pub items: u64,
    /// Total size of those items in bytes
    pub bytes: u64,
}

impl RecycleBinStats {
    /// Create stats from an item count and byte total
    pub fn new(items: u64, bytes: u64) -> Self {
        Self { items, bytes }
    }

    /// Returns true if nothing is reclaimable
    pub fn is_empty(&self) -> bool {
        self.items == 0 && self.bytes == 0
    }

    /// Add another bin's totals to these
    pub fn accumulate(&mut self, other: RecycleBinStats) {
        self.items = self.items.saturating_add(other.items);
        self.bytes = self.bytes.saturating_add(other.bytes);
    }
}

/// Outcome of querying one root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootReport {
    /// Root path that was queried (empty for all bins)
    pub root: String,
    /// Status the query returned
    pub status: QueryStatus,
    /// Counters after the query (zero on failure)
    pub stats: RecycleBinStats,
}

/// HRESULT-style status code returned by a recycle bin query.
///
/// Negative values are failures, everything else is success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryStatus(pub i32);

impl QueryStatus {
    /// `S_OK`
    pub const OK: Self = Self(0);
    /// `E_FAIL`
    pub const FAIL: Self = Self(0x8000_4005_u32 as i32);
    /// `E_NOTIMPL`
    pub const NOT_IMPLEMENTED: Self = Self(0x8000_4001_u32 as i32);
    /// `E_INVALIDARG`
    pub const INVALID_ARG: Self = Self(0x8007_0057_u32 as i32);
    /// `HRESULT_FROM_WIN32(ERROR_FILE_NOT_FOUND)`
    pub const NOT_FOUND: Self = Self(0x8007_0002_u32 as i32);
    /// `HRESULT_FROM_WIN32(ERROR_ACCESS_DENIED)`
    pub const ACCESS_DENIED: Self = Self(0x8007_0005_u32 as i32);

    /// Returns true for success codes
    pub fn succeeded(self) -> bool {
        self.0 >= 0
    }

    /// Raw status code
    pub fn code(self) -> i32 {
        self.0
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0 as u32)
    }
}
