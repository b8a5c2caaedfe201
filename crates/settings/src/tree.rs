//! In-memory element tree.

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Unescaped character data
    Text(String),
    /// `<![CDATA[...]]>` section
    CData(String),
    /// `<!-- ... -->` comment
    Comment(String),
    /// `<?target data?>` processing instruction, without the delimiters
    ProcessingInstruction(String),
    /// `<!DOCTYPE ...>` declaration body
    DocType(String),
}

/// Returns true if `name` can be written as an element tag.
///
/// Follows the XML `Name` production: a letter, `_` or `:` first, then
/// letters, digits, `-`, `.`, `_`, `:` or `·`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == ':')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | ':' | '\u{B7}'))
}

/// An element with its attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Tag name
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// First child element named `name`, in document order.
    ///
    /// Sibling names are not required to be unique; later duplicates are
    /// unreachable through this lookup.
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find_map(|node| match node {
            Node::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// Mutable twin of [`find_child`](Self::find_child).
    pub fn find_child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// First child element named `name`, appending an empty one if absent.
    pub fn child_or_insert(&mut self, name: &str) -> &mut Element {
        let index = self
            .children
            .iter()
            .position(|node| matches!(node, Node::Element(e) if e.name == name));

        let index = match index {
            Some(i) => i,
            None => {
                // A former leaf's whitespace value would become stray indentation.
                self.children
                    .retain(|node| !matches!(node, Node::Text(t) if t.trim().is_empty()));
                self.children.push(Node::Element(Element::new(name)));
                self.children.len() - 1
            }
        };

        match &mut self.children[index] {
            Node::Element(e) => e,
            _ => unreachable!("index points at an element"),
        }
    }

    /// Remove the first child element named `name`.
    pub fn remove_child(&mut self, name: &str) -> Option<Element> {
        let index = self
            .children
            .iter()
            .position(|node| matches!(node, Node::Element(e) if e.name == name))?;
        match self.children.remove(index) {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Child elements in document order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Content of the first text or CDATA child, if any.
    pub fn text(&self) -> Option<&str> {
        self.children.iter().find_map(|node| match node {
            Node::Text(t) | Node::CData(t) => Some(t.as_str()),
            _ => None,
        })
    }

    /// Drop all children and attributes, leaving a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.attributes.clear();
        self.children.clear();
        self.children.push(Node::Text(text.into()));
    }

    /// Returns true if the element has no child elements
    pub fn is_leaf(&self) -> bool {
        self.elements().next().is_none()
    }

    /// Returns true if every child is text or CDATA
    pub(crate) fn holds_only_text(&self) -> bool {
        self.children
            .iter()
            .all(|node| matches!(node, Node::Text(_) | Node::CData(_)))
    }
}
