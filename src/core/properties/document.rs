//! HTML Document Access
//!
//! Thin read-only view over an html5ever DOM: find descendant elements by
//! structural predicates and read their text and attributes.
//!
//! The DOM is reference counted and not `Send`, so documents are parsed and
//! fully read inside synchronous code; nothing here is held across an
//! `.await`.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// A parsed HTML page.
pub struct Document {
    dom: RcDom,
}

impl Document {
    /// Parses a full HTML page. html5ever recovers from malformed markup the
    /// way browsers do, so parsing never fails.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        Self { dom }
    }

    /// The document node; every element of the page is one of its descendants.
    pub fn root(&self) -> Node {
        Node {
            handle: self.dom.document.clone(),
        }
    }
}

/// A node of a parsed [`Document`].
#[derive(Clone)]
pub struct Node {
    handle: Handle,
}

impl Node {
    /// Local tag name, lowercase, for element nodes.
    pub fn tag(&self) -> Option<&str> {
        match &self.handle.data {
            NodeData::Element { name, .. } => Some(&*name.local),
            _ => None,
        }
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        match &self.handle.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .find(|a| &*a.name.local == name)
                .map(|a| a.value.to_string()),
            _ => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// Element children, in document order.
    pub fn children(&self) -> Vec<Node> {
        self.handle
            .children
            .borrow()
            .iter()
            .filter(|h| matches!(h.data, NodeData::Element { .. }))
            .map(|h| Node { handle: h.clone() })
            .collect()
    }

    pub fn first_element_child(&self) -> Option<Node> {
        self.handle
            .children
            .borrow()
            .iter()
            .find(|h| matches!(h.data, NodeData::Element { .. }))
            .map(|h| Node { handle: h.clone() })
    }

    /// Descendant elements in document (pre-)order, excluding `self`.
    pub fn descendants(&self) -> Vec<Node> {
        let mut out = Vec::new();
        let mut stack: Vec<Node> = self.children().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            stack.extend(node.children().into_iter().rev());
            out.push(node);
        }
        out
    }

    pub fn find_all(&self, pred: impl Fn(&Node) -> bool) -> Vec<Node> {
        self.descendants().into_iter().filter(|n| pred(n)).collect()
    }

    pub fn find_first(&self, pred: impl Fn(&Node) -> bool) -> Option<Node> {
        self.descendants().into_iter().find(|n| pred(n))
    }

    /// Elements matching a child-combinator chain such as `sup > i > span`:
    /// the first tag matches any descendant, every following tag a direct
    /// child of the previous match.
    pub fn select_path(&self, path: &[&str]) -> Vec<Node> {
        let Some((first, rest)) = path.split_first() else {
            return Vec::new();
        };
        let mut matches = self.find_all(|n| n.is(first));
        for tag in rest {
            matches = matches
                .iter()
                .flat_map(|m| m.children())
                .filter(|c| c.is(tag))
                .collect();
        }
        matches
    }

    /// Concatenated text of every node below `self`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![self.handle.clone()];
        while let Some(handle) = stack.pop() {
            if let NodeData::Text { contents } = &handle.data {
                out.push_str(&contents.borrow());
            }
            stack.extend(handle.children.borrow().iter().rev().cloned());
        }
        out
    }

    pub fn trimmed_text(&self) -> String {
        self.text().trim().to_string()
    }

    /// Trimmed, concatenated text of all elements matching `path`.
    pub fn path_text(&self, path: &[&str]) -> String {
        self.select_path(path)
            .iter()
            .map(Node::text)
            .collect::<String>()
            .trim()
            .to_string()
    }
}
