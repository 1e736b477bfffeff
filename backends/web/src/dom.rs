use signbridge::{Host, MountError};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Window};

use crate::error::WebError;

/// Attribute marking an element that already carries an application.
const MOUNTED_ATTR: &str = "data-signbridge";

/// The document element the application is mounted into.
#[derive(Debug, Clone)]
pub struct DomHost {
    id: String,
    element: Element,
}

impl DomHost {
    /// Locates the element with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::HostNotFound`] if no such element exists.
    pub fn find(document: &Document, id: &str) -> Result<Self, MountError> {
        let element = document
            .get_element_by_id(id)
            .ok_or_else(|| MountError::HostNotFound(id.to_string()))?;
        Ok(Self {
            id: id.to_string(),
            element,
        })
    }

    /// Returns the DOM element representing the mounting point.
    #[must_use]
    pub const fn element(&self) -> &Element {
        &self.element
    }
}

fn host_error(value: JsValue) -> MountError {
    MountError::Host(WebError::from(value).to_string())
}

impl Host for DomHost {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_mounted(&self) -> bool {
        self.element.has_attribute(MOUNTED_ATTR)
    }

    fn attach(&mut self, html: &str) -> Result<(), MountError> {
        self.update(html)?;
        self.element
            .set_attribute(MOUNTED_ATTR, "mounted")
            .map_err(host_error)
    }

    fn update(&mut self, html: &str) -> Result<(), MountError> {
        self.element.set_inner_html(html);
        Ok(())
    }
}

/// Returns the browser window and its document.
pub fn window_and_document() -> Result<(Window, Document), WebError> {
    let window: Window = web_sys::window().ok_or(WebError::DomUnavailable)?;
    let document: Document = window.document().ok_or(WebError::DomUnavailable)?;
    Ok((window, document))
}

/// Value of [`MOUNTED_ATTR`] on the injected `<style>` element.
const STYLES_MARK: &str = "styles";

/// Adds the default stylesheet unless the document already carries it.
///
/// The `<style>` element is tagged with the same attribute hosts use, so a
/// page that ships its own copy can opt out by marking it.
pub fn inject_stylesheet(document: &Document) -> Result<(), WebError> {
    let selector = format!("style[{MOUNTED_ATTR}=\"{STYLES_MARK}\"]");
    if document.query_selector(&selector)?.is_some() {
        return Ok(());
    }

    let style = document.create_element("style")?;
    style.set_attribute(MOUNTED_ATTR, STYLES_MARK)?;
    style.set_text_content(Some(include_str!("../styles/default.css")));

    match (document.head(), document.body()) {
        (Some(head), _) => head.append_child(&style)?,
        (None, Some(body)) => body.append_child(&style)?,
        (None, None) => return Err(WebError::DomUnavailable),
    };
    tracing::debug!("default stylesheet injected");
    Ok(())
}
