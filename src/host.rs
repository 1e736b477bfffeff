//! Host nodes an application is mounted into.

use alloc::{
    collections::BTreeMap,
    rc::Rc,
    string::{String, ToString},
};
use core::cell::RefCell;

use crate::error::MountError;

/// A pre-existing document element that receives the rendered application.
pub trait Host {
    /// The element id.
    fn id(&self) -> &str;

    /// Whether an application is already attached to this element.
    fn is_mounted(&self) -> bool;

    /// Replaces the element's content with `html` and marks it as mounted.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::Host`] when the element rejects the write.
    fn attach(&mut self, html: &str) -> Result<(), MountError>;

    /// Replaces the element's content after a navigation.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::Host`] when the element rejects the write.
    fn update(&mut self, html: &str) -> Result<(), MountError>;
}

#[derive(Debug, Default)]
struct HostState {
    content: String,
    mounted: bool,
    writes: usize,
}

/// A buffered host element, shared between its clones.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    id: String,
    state: Rc<RefCell<HostState>>,
}

impl MemoryHost {
    /// Creates an empty host element.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: Rc::default(),
        }
    }

    /// The current inner HTML.
    #[must_use]
    pub fn content(&self) -> String {
        self.state.borrow().content.clone()
    }

    /// How many times the content was written.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }
}

impl Host for MemoryHost {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_mounted(&self) -> bool {
        self.state.borrow().mounted
    }

    fn attach(&mut self, html: &str) -> Result<(), MountError> {
        self.update(html)?;
        self.state.borrow_mut().mounted = true;
        Ok(())
    }

    fn update(&mut self, html: &str) -> Result<(), MountError> {
        let mut state = self.state.borrow_mut();
        state.content = html.to_string();
        state.writes += 1;
        Ok(())
    }
}

/// A set of [`MemoryHost`] elements addressable by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    hosts: BTreeMap<String, MemoryHost>,
}

impl MemoryDocument {
    /// Creates a document with no elements.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty element with the given id.
    #[must_use]
    pub fn with_host(mut self, id: &str) -> Self {
        self.hosts.insert(id.to_string(), MemoryHost::new(id));
        self
    }

    /// Looks up an element by id.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::HostNotFound`] when no element has that id.
    pub fn host(&self, id: &str) -> Result<MemoryHost, MountError> {
        self.hosts
            .get(id)
            .cloned()
            .ok_or_else(|| MountError::HostNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_content() {
        let document = MemoryDocument::new().with_host("app");
        let mut host = document.host("app").expect("host exists");
        host.attach("<p>hi</p>").expect("attach succeeds");
        let again = document.host("app").expect("host exists");
        assert!(again.is_mounted());
        assert_eq!(again.content(), "<p>hi</p>");
        assert_eq!(again.writes(), 1);
    }

    #[test]
    fn test_missing_host() {
        let document = MemoryDocument::new();
        assert_eq!(
            document.host("app").err(),
            Some(MountError::HostNotFound("app".into()))
        );
    }
}
