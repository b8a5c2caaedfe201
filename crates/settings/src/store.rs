use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::tree::{Element, is_valid_name};
use crate::value::{SettingText, SettingValue};

/// One stored `(parent, child) = value` leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingEntry {
    /// Group element under the root
    pub parent: String,
    /// Leaf element under the group
    pub child: String,
    /// Raw stored text
    pub value: String,
}

/// Typed settings addressed by a `(parent, child)` path.
///
/// Reads never fail: a missing path or a value that does not parse as the
/// requested type yields the caller's default. Writes create whatever path
/// elements are missing. Nothing reaches disk until [`save`](Self::save).
#[derive(Debug, Clone)]
pub struct SettingsStore {
    document: Document,
    dirty: bool,
}

impl SettingsStore {
    /// Open the settings file at `path`, starting fresh if it is missing or
    /// unreadable as XML.
    pub fn open(path: impl Into<PathBuf>, create_if_missing: bool) -> Result<Self> {
        Ok(Self::from_document(Document::open(path, create_if_missing)?))
    }

    /// Wrap an already loaded document
    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            dirty: false,
        }
    }

    /// The underlying document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        self.document.path()
    }

    /// Returns true if there are writes not yet saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Raw text at `(parent, child)`, `None` if either element is missing.
    fn lookup(&self, parent: &str, child: &str) -> Option<&str> {
        let leaf = self.document.root().find_child(parent)?.find_child(child)?;
        Some(leaf.text().unwrap_or(""))
    }

    /// Read a typed value, falling back to `default`.
    pub fn read<T: SettingValue>(&self, parent: &str, child: &str, default: T) -> T {
        self.lookup(parent, child)
            .and_then(T::parse_setting)
            .unwrap_or(default)
    }

    /// Read a string, falling back to `default` when unset or empty.
    pub fn read_str(&self, parent: &str, child: &str, default: &str) -> String {
        self.lookup(parent, child)
            .and_then(String::parse_setting)
            .unwrap_or_else(|| default.to_string())
    }

    /// Store `value` at `(parent, child)`, replacing whatever the leaf held.
    ///
    /// Both names must be valid element tags; otherwise nothing is touched
    /// and [`Error::InvalidName`] is returned.
    pub fn write<T: SettingText + ?Sized>(
        &mut self,
        parent: &str,
        child: &str,
        value: &T,
    ) -> Result<()> {
        for name in [parent, child] {
            if !is_valid_name(name) {
                return Err(Error::InvalidName(name.to_string()));
            }
        }

        let text = value.to_setting_text();
        log::debug!("settings: {parent}/{child} = {text:?}");

        self.document
            .root_mut()
            .child_or_insert(parent)
            .child_or_insert(child)
            .set_text(text);
        self.dirty = true;
        Ok(())
    }

    /// Remove the leaf at `(parent, child)`, and the parent if that leaves
    /// it without child elements. Returns true if anything was removed.
    pub fn remove(&mut self, parent: &str, child: &str) -> bool {
        let root = self.document.root_mut();
        let Some(group) = root.find_child_mut(parent) else {
            return false;
        };
        if group.remove_child(child).is_none() {
            return false;
        }
        if group.is_leaf() {
            root.remove_child(parent);
        }
        self.dirty = true;
        true
    }

    /// Every leaf two levels below the root, in document order.
    pub fn entries(&self) -> Vec<SettingEntry> {
        self.document
            .root()
            .elements()
            .flat_map(|group| {
                group
                    .elements()
                    .filter(|leaf| leaf.is_leaf())
                    .map(move |leaf: &Element| SettingEntry {
                        parent: group.name.clone(),
                        child: leaf.name.clone(),
                        value: leaf.text().unwrap_or("").to_string(),
                    })
            })
            .collect()
    }

    /// Persist the whole document.
    pub fn save(&mut self) -> Result<()> {
        self.document.save()?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store() -> SettingsStore {
        SettingsStore::from_document(Document::new("unused.xml"))
    }

    #[test]
    fn test_defaults_without_writes() {
        let s = store();
        assert_eq!(s.read("Window", "Height", 600), 600);
        assert_eq!(s.read("Window", "Height", 600i64), 600);
        assert!(!s.read("Options", "DarkMode", false));
        assert!((s.read("Window", "Zoom", 1.25) - 1.25).abs() < f64::EPSILON);
        assert_eq!(s.read_str("Window", "Title", "tempsweep"), "tempsweep");
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_write_then_read_int() {
        let mut s = store();
        s.write("Window", "Width", &800).unwrap();
        assert_eq!(s.read("Window", "Width", 100), 800);
        assert!(s.is_dirty());
    }

    #[test]
    fn test_write_then_read_bool() {
        let mut s = store();
        s.write("Options", "DarkMode", &true).unwrap();
        assert!(s.read("Options", "DarkMode", false));
    }

    #[test]
    fn test_write_then_read_double_and_string() {
        let mut s = store();
        s.write("Window", "Zoom", &1.75).unwrap();
        s.write("Window", "Title", "Temp & Cache").unwrap();
        s.write("Window", "Owner", &String::from("me")).unwrap();

        assert_eq!(s.read("Window", "Zoom", 0.0), 1.75);
        assert_eq!(s.read_str("Window", "Title", ""), "Temp & Cache");
        assert_eq!(s.read("Window", "Owner", String::new()), "me");
    }

    #[test]
    fn test_overwrite_keeps_single_leaf() {
        let mut s = store();
        s.write("Window", "Width", &800).unwrap();
        s.write("Window", "Width", &1024).unwrap();
        s.write("Window", "Width", &1024).unwrap();

        let window = s.document().root().find_child("Window").unwrap();
        assert_eq!(window.children.len(), 1);
        let leaf = window.find_child("Width").unwrap();
        assert_eq!(leaf.children.len(), 1);
        assert_eq!(s.read("Window", "Width", 0), 1024);
    }

    #[test]
    fn test_empty_string_reads_as_default() {
        let mut s = store();
        s.write("Window", "Title", "").unwrap();
        assert_eq!(s.read_str("Window", "Title", "fallback"), "fallback");
        assert_eq!(s.read("Window", "Title", String::from("d")), "d");
    }

    #[test]
    fn test_malformed_value_reads_as_default() {
        let mut s = store();
        s.write("Window", "Width", "wide").unwrap();
        assert_eq!(s.read("Window", "Width", 640), 640);
        assert!(s.read("Window", "Width", true));
        assert_eq!(s.read("Window", "Width", 2.5), 2.5);
    }

    #[test]
    fn test_parent_without_child_reads_default() {
        let mut s = store();
        s.write("Window", "Width", &800).unwrap();
        assert_eq!(s.read("Window", "Height", 600), 600);
        assert_eq!(s.read("Other", "Width", 1), 1);
    }

    #[test]
    fn test_duplicate_parents_resolve_to_first() {
        let xml = concat!(
            "<Settings>",
            "<Window><Width>1</Width></Window>",
            "<Window><Width>2</Width></Window>",
            "</Settings>"
        );
        let doc = Document::parse("dup.xml", xml).unwrap();
        let mut s = SettingsStore::from_document(doc);

        assert_eq!(s.read("Window", "Width", 0), 1);
        s.write("Window", "Width", &3).unwrap();
        assert_eq!(s.read("Window", "Width", 0), 3);
        assert_eq!(
            s.entries().iter().map(|e| e.value.as_str()).collect::<Vec<_>>(),
            vec!["3", "2"]
        );
    }

    #[test]
    fn test_write_preserves_unrelated_content() {
        let doc = Document::parse(
            "keep.xml",
            r#"<Settings><!-- keep --><Plugin id="x"><Opt>1</Opt></Plugin></Settings>"#,
        )
        .unwrap();
        let mut s = SettingsStore::from_document(doc);
        s.write("Window", "Width", &800).unwrap();

        let xml = s.document().to_xml_string().unwrap();
        assert!(xml.contains("<!-- keep -->"));
        assert!(xml.contains(r#"<Plugin id="x">"#));
        assert!(xml.contains("<Opt>1</Opt>"));
    }

    #[test]
    fn test_remove() {
        let mut s = store();
        s.write("Window", "Width", &800).unwrap();
        s.write("Window", "Height", &600).unwrap();

        assert!(s.remove("Window", "Width"));
        assert_eq!(s.read("Window", "Width", 1), 1);
        assert!(s.document().root().find_child("Window").is_some());

        assert!(s.remove("Window", "Height"));
        assert!(s.document().root().find_child("Window").is_none());
        assert!(!s.remove("Window", "Height"));
    }

    #[test]
    fn test_entries_in_document_order() {
        let mut s = store();
        s.write("Window", "Width", &800).unwrap();
        s.write("Options", "DarkMode", &true).unwrap();
        s.write("Window", "Height", &600).unwrap();

        let entries = s.entries();
        let keys: Vec<_> = entries
            .iter()
            .map(|e| format!("{}/{}={}", e.parent, e.child, e.value))
            .collect();
        assert_eq!(
            keys,
            vec!["Window/Width=800", "Window/Height=600", "Options/DarkMode=True"]
        );
    }

    #[test]
    fn test_save_and_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.xml");

        let mut s = SettingsStore::open(&path, false).unwrap();
        s.write("Window", "Width", &800).unwrap();
        s.write("Options", "DarkMode", &true).unwrap();
        s.write("Window", "Zoom", &0.1).unwrap();
        s.save().unwrap();
        assert!(!s.is_dirty());

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("<DarkMode>True</DarkMode>"));

        let reopened = SettingsStore::open(&path, false).unwrap();
        assert_eq!(reopened.read("Window", "Width", 0), 800);
        assert!(reopened.read("Options", "DarkMode", false));
        assert_eq!(reopened.read("Window", "Zoom", 0.0), 0.1);
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_unsaved_writes_do_not_reach_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.xml");

        let mut s = SettingsStore::open(&path, true).unwrap();
        s.write("Window", "Width", &800).unwrap();
        drop(s);

        let reopened = SettingsStore::open(&path, false).unwrap();
        assert_eq!(reopened.read("Window", "Width", 100), 100);
    }

    #[test]
    fn test_invalid_names_are_rejected_and_file_stays_readable() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.xml");

        let mut s = SettingsStore::open(&path, false).unwrap();
        s.write("Window", "Width", &800).unwrap();
        let bad = [("Window Size", "Height"), ("Window", "2nd"), ("", "X"), ("A", "<b>")];
        for (parent, child) in bad {
            let err = s.write(parent, child, &600).unwrap_err();
            assert!(matches!(err, Error::InvalidName(_)), "{parent}/{child}: {err}");
        }
        s.save().unwrap();

        let reopened = SettingsStore::open(&path, false).unwrap();
        assert_eq!(reopened.read("Window", "Width", -1), 800);
        assert_eq!(reopened.entries().len(), 1);
    }

    #[test]
    fn test_whitespace_string_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.xml");

        let mut s = SettingsStore::open(&path, false).unwrap();
        s.write("Grid", "Sep", "  ").unwrap();
        s.save().unwrap();

        let reopened = SettingsStore::open(&path, false).unwrap();
        assert_eq!(reopened.read_str("Grid", "Sep", "DEF"), "  ");
    }
}
