//! Views and the markup tree they render into.
//!
//! A [`View`] turns the current [`Environment`] into a [`Node`] tree. Hosts
//! only ever see the serialised HTML produced by [`Node::to_html`], so views
//! stay independent of the DOM and can be rendered in tests.

use alloc::{rc::Rc, string::String, vec::Vec};
use core::fmt::{self, Debug, Write};

use crate::env::Environment;

/// Tags that never carry children or a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// A node of rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// Escaped text content.
    Text(String),
    /// A sequence of sibling nodes without a wrapper element.
    Fragment(Vec<Node>),
}

impl Node {
    /// An empty fragment.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Fragment(Vec::new())
    }

    /// Serialises the tree as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write_html(&mut out);
        out
    }

    /// Writes the tree as HTML into `out`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn write_html(&self, out: &mut impl Write) -> fmt::Result {
        match self {
            Self::Element(element) => element.write_html(out),
            Self::Text(text) => write_escaped(out, text),
            Self::Fragment(nodes) => nodes.iter().try_for_each(|node| node.write_html(out)),
        }
    }

    /// Concatenated text of the tree, without markup.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Element(element) => element
                .children
                .iter()
                .for_each(|child| child.collect_text(out)),
            Self::Text(text) => out.push_str(text),
            Self::Fragment(nodes) => nodes.iter().for_each(|node| node.collect_text(out)),
        }
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// An HTML element under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element with the given tag name.
    pub const fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute. An empty value renders as a bare attribute.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Sets the `class` attribute.
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Appends a child node.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends several child nodes.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    fn write_html(&self, out: &mut impl Write) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            if value.is_empty() {
                write!(out, " {name}")?;
            } else {
                write!(out, " {name}=\"")?;
                write_escaped(out, value)?;
                out.write_char('"')?;
            }
        }
        out.write_char('>')?;
        if VOID_TAGS.contains(&self.tag) {
            return Ok(());
        }
        for child in &self.children {
            child.write_html(out)?;
        }
        write!(out, "</{}>", self.tag)
    }
}

/// Shorthand for [`Element::new`].
pub const fn el(tag: &'static str) -> Element {
    Element::new(tag)
}

fn write_escaped(out: &mut impl Write, text: &str) -> fmt::Result {
    for ch in text.chars() {
        match ch {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            '\'' => out.write_str("&#39;")?,
            _ => out.write_char(ch)?,
        }
    }
    Ok(())
}

/// Something that can be rendered against an [`Environment`].
pub trait View: 'static {
    /// Produces the markup for this view.
    fn render(&self, env: &Environment) -> Node;
}

impl View for Node {
    fn render(&self, _env: &Environment) -> Node {
        self.clone()
    }
}

impl View for Element {
    fn render(&self, _env: &Environment) -> Node {
        Node::Element(self.clone())
    }
}

impl<F> View for F
where
    F: Fn(&Environment) -> Node + 'static,
{
    fn render(&self, env: &Environment) -> Node {
        self(env)
    }
}

/// A type-erased, cheaply clonable [`View`].
#[derive(Clone)]
pub struct AnyView(Rc<dyn View>);

impl AnyView {
    /// Erases the concrete type of `view`.
    pub fn new(view: impl View) -> Self {
        Self(Rc::new(view))
    }
}

impl Debug for AnyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AnyView(..)")
    }
}

impl View for AnyView {
    fn render(&self, env: &Environment) -> Node {
        self.0.render(env)
    }
}
