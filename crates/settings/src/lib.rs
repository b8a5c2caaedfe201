//! # Settings
//!
//! Typed two-level settings backed by an XML document.
//!
//! Values live at `<Root><Parent><Child>text</Child></Parent></Root>` and
//! are read back as strings, booleans, integers or doubles. Reads never
//! fail: a missing element or unparsable text gives the caller's default.
//! Writes create missing elements and leave everything else in the
//! document untouched, including elements this crate knows nothing about.
//! Names that are not valid XML element tags are refused.
//!
//! ## Example
//!
//! ```no_run
//! use settings::SettingsStore;
//!
//! let mut store = SettingsStore::open("/tmp/settings.xml", false)?;
//! let width = store.read("Window", "Width", 800);
//! store.write("Window", "Width", &(width + 10))?;
//! store.write("Options", "DarkMode", &true)?;
//! store.save()?;
//! # Ok::<(), settings::Error>(())
//! ```
//!
//! ## Duplicate names
//!
//! Sibling names are not required to be unique. Lookups take the first
//! match in document order, so a hand-edited file with two `<Window>`
//! groups only ever reads and writes the first.

#![deny(unsafe_code)]

mod document;
mod error;
mod store;
mod tree;
mod value;

pub use document::{DEFAULT_ROOT, Document};
pub use error::{Error, Result};
pub use store::{SettingEntry, SettingsStore};
pub use tree::{Element, Node};
pub use value::{SettingText, SettingValue};
