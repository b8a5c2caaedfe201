//! Settings document lifecycle: load, default, serialise, save.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};

use crate::error::{Error, Result};
use crate::tree::{Element, Node};

/// Root element name of a freshly created document.
pub const DEFAULT_ROOT: &str = "Settings";

/// An XML document bound to a file, with a guaranteed root element.
///
/// Mutations stay in memory until [`save`](Self::save) is called.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    prolog: Vec<Node>,
    root: Element,
}

impl Document {
    /// An empty document with a `Settings` root, bound to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            prolog: Vec::new(),
            root: Element::new(DEFAULT_ROOT),
        }
    }

    /// Load the document at `path`, or start a fresh one.
    ///
    /// A missing file, or one that does not hold a well-formed document,
    /// yields an empty `Settings` tree. When `create_if_missing` is set and
    /// the file was absent, that tree is written out immediately.
    ///
    /// Only IO failures on a file that exists (or on creating it) are
    /// returned as errors.
    pub fn open(path: impl Into<PathBuf>, create_if_missing: bool) -> Result<Self> {
        let path = path.into();

        match fs::read_to_string(&path) {
            Ok(text) => match Self::parse(&path, &text) {
                Ok(doc) => {
                    log::debug!("Loaded settings from {}", path.display());
                    Ok(doc)
                }
                Err(e) => {
                    log::warn!(
                        "Ignoring unreadable settings document {}: {e}",
                        path.display()
                    );
                    Ok(Self::new(path))
                }
            },
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                log::warn!("Settings file {} is not UTF-8, starting fresh", path.display());
                Ok(Self::new(path))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Settings file {} does not exist", path.display());
                let doc = Self::new(path);
                if create_if_missing {
                    doc.save()?;
                }
                Ok(doc)
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// Build a document from XML text.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Result<Self> {
        let (prolog, root) = parse_tree(text)?;
        Ok(Self {
            path: path.into(),
            prolog,
            root,
        })
    }

    /// File this document loads from and saves to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The root element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The root element, mutably
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Serialise the whole tree with an XML declaration and 2-space indent.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        for node in &self.prolog {
            write_node(&mut writer, node)?;
        }
        write_element(&mut writer, &self.root)?;

        let mut text = String::from_utf8(writer.into_inner())
            .map_err(|e| Error::Malformed(e.to_string()))?;
        text.push('\n');
        Ok(text)
    }

    /// Write the current tree to [`path`](Self::path), creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }

        let text = self.to_xml_string()?;
        fs::write(&self.path, text).map_err(|e| Error::io(&self.path, e))?;

        log::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

// ============================================================================
// Reading
// ============================================================================

fn parse_tree(text: &str) -> Result<(Vec<Node>, Element)> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut prolog = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(start_element(&e)?),
            Event::Empty(e) => {
                let element = start_element(&e)?;
                attach(&mut stack, &mut prolog, &mut root, Node::Element(element))?;
            }
            Event::End(_) => {
                let mut element = stack
                    .pop()
                    .ok_or_else(|| Error::Malformed("unbalanced end tag".to_string()))?;
                // Whitespace next to markup is indentation; inside a leaf it is the value.
                if !element.holds_only_text() {
                    element
                        .children
                        .retain(|node| !matches!(node, Node::Text(t) if t.trim().is_empty()));
                }
                attach(&mut stack, &mut prolog, &mut root, Node::Element(element))?;
            }
            Event::Text(e) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(e.unescape()?.into_owned()));
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::CData(text));
                }
            }
            Event::Comment(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                attach(&mut stack, &mut prolog, &mut root, Node::Comment(text))?;
            }
            Event::PI(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                attach(&mut stack, &mut prolog, &mut root, Node::ProcessingInstruction(text))?;
            }
            Event::DocType(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                attach(&mut stack, &mut prolog, &mut root, Node::DocType(text))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Malformed(format!("unclosed element <{}>", open.name)));
    }
    let root = root.ok_or_else(|| Error::Malformed("no root element".to_string()))?;
    Ok((prolog, root))
}

fn start_element(e: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::Malformed(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Hand a finished node to its parent, or to the document level.
fn attach(
    stack: &mut [Element],
    prolog: &mut Vec<Node>,
    root: &mut Option<Element>,
    node: Node,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    match node {
        Node::Element(element) => {
            if root.is_some() {
                return Err(Error::Malformed(format!(
                    "second root element <{}>",
                    element.name
                )));
            }
            *root = Some(element);
        }
        other => prolog.push(other),
    }
    Ok(())
}

// ============================================================================
// Writing
// ============================================================================

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<()> {
    match node {
        Node::Element(e) => write_element(writer, e),
        Node::Text(t) => emit(writer, Event::Text(BytesText::new(t))),
        Node::CData(t) => emit(writer, Event::CData(BytesCData::new(t.as_str()))),
        Node::Comment(c) => emit(writer, Event::Comment(BytesText::from_escaped(c.as_str()))),
        Node::ProcessingInstruction(p) => emit(writer, Event::PI(BytesPI::new(p.as_str()))),
        Node::DocType(d) => emit(writer, Event::DocType(BytesText::from_escaped(d.as_str()))),
    }
}

/// Write one event into the in-memory buffer.
fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Xml(quick_xml::Error::from(e)))
}
