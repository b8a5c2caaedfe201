//! Fixed-layout buffers filled by the native recycle bin query.
//!
//! `SHQUERYRBINFO` is declared under `pshpack1.h` for 32-bit Windows and
//! `pshpack8.h` for 64-bit, so the same three fields occupy 20 or 24 bytes
//! depending on the host. Passing the wrong one makes the shell write the
//! counters at the wrong offsets.

use std::mem::size_of;

/// A caller-owned buffer the query surface fills in.
pub trait StatsBuffer: Default {
    /// Item count stored in the buffer
    fn items(&self) -> u64;

    /// Byte total stored in the buffer
    fn bytes(&self) -> u64;

    /// Overwrite both counters (used by non-native surfaces)
    fn set(&mut self, items: u64, bytes: u64);
}

/// `SHQUERYRBINFO` as laid out for 32-bit processes.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy)]
pub struct RbInfo32 {
    /// Size of this struct in bytes, set before the call
    pub cb_size: u32,
    /// Total size of items in the bin
    pub i64_size: i64,
    /// Number of items in the bin
    pub i64_num_items: i64,
}

/// `SHQUERYRBINFO` as laid out for 64-bit processes.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RbInfo64 {
    /// Size of this struct in bytes, set before the call
    pub cb_size: u32,
    /// Total size of items in the bin
    pub i64_size: i64,
    /// Number of items in the bin
    pub i64_num_items: i64,
}

impl Default for RbInfo32 {
    fn default() -> Self {
        Self {
            cb_size: size_of::<Self>() as u32,
            i64_size: 0,
            i64_num_items: 0,
        }
    }
}

impl Default for RbInfo64 {
    fn default() -> Self {
        Self {
            cb_size: size_of::<Self>() as u32,
            i64_size: 0,
            i64_num_items: 0,
        }
    }
}

// Packed fields are copied out by value; never borrowed.
impl StatsBuffer for RbInfo32 {
    fn items(&self) -> u64 {
        let n = self.i64_num_items;
        u64::try_from(n).unwrap_or(0)
    }

    fn bytes(&self) -> u64 {
        let n = self.i64_size;
        u64::try_from(n).unwrap_or(0)
    }

    fn set(&mut self, items: u64, bytes: u64) {
        self.i64_num_items = i64::try_from(items).unwrap_or(i64::MAX);
        self.i64_size = i64::try_from(bytes).unwrap_or(i64::MAX);
    }
}

impl StatsBuffer for RbInfo64 {
    fn items(&self) -> u64 {
        u64::try_from(self.i64_num_items).unwrap_or(0)
    }

    fn bytes(&self) -> u64 {
        u64::try_from(self.i64_size).unwrap_or(0)
    }

    fn set(&mut self, items: u64, bytes: u64) {
        self.i64_num_items = i64::try_from(items).unwrap_or(i64::MAX);
        self.i64_size = i64::try_from(bytes).unwrap_or(i64::MAX);
    }
}
