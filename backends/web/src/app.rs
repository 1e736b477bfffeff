use std::{cell::RefCell, rc::Rc};

use signbridge::{Config, MountedApp, bootstrap, logging};
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{Element, Event, MouseEvent, Window};

use crate::{
    console::ConsoleWriter,
    dom::{DomHost, inject_stylesheet, window_and_document},
    error::WebError,
    history::{BrowserHistory, strip_base},
};

/// Builder for [`WebApp`].
#[derive(Debug, Clone)]
pub struct WebAppBuilder {
    config: Config,
    inject_default_styles: bool,
}

impl Default for WebAppBuilder {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl WebAppBuilder {
    /// Creates a new builder from the given configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            inject_default_styles: true,
        }
    }

    /// Sets the DOM element identifier that should host the application.
    #[must_use]
    pub fn with_root_id(mut self, id: impl Into<String>) -> Self {
        self.config.host_id = id.into();
        self
    }

    /// Controls whether the backend injects the default stylesheet.
    #[must_use]
    pub const fn inject_default_styles(mut self, inject: bool) -> Self {
        self.inject_default_styles = inject;
        self
    }

    /// Mounts the application and starts listening for navigation.
    ///
    /// # Errors
    ///
    /// Returns an error if the DOM is unavailable, the host element is
    /// missing or already mounted, or the route table is invalid.
    pub fn build(self) -> Result<WebApp, WebError> {
        WebApp::launch(self)
    }
}

/// A mounted application running inside the browser.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WebApp {
    inner: Rc<RefCell<MountedApp<DomHost>>>,
}

impl WebApp {
    fn launch(builder: WebAppBuilder) -> Result<Self, WebError> {
        let (window, document) = window_and_document()?;
        if builder.inject_default_styles {
            inject_stylesheet(&document)?;
        }
        document.set_title(&builder.config.title);

        let host = DomHost::find(&document, &builder.config.host_id)?;
        let history = BrowserHistory::new(window.clone(), &builder.config.base);
        let mounted = bootstrap(&builder.config, history, host)?;

        let app = Self {
            inner: Rc::new(RefCell::new(mounted)),
        };
        app.listen(&window, builder.config.base.trim_end_matches('/'))?;
        Ok(app)
    }

    /// Re-renders after the browser moved through its history.
    fn listen(&self, window: &Window, base: &str) -> Result<(), WebError> {
        let inner = Rc::clone(&self.inner);
        let on_popstate = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            if let Err(err) = inner.borrow_mut().sync() {
                tracing::error!(error = %err, "failed to render after popstate");
            }
        });
        window.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())?;
        on_popstate.forget();

        let inner = Rc::clone(&self.inner);
        let base = base.to_string();
        let element = self.inner.borrow().host().element().clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let Some(href) = intercepted_href(&event) else {
                return;
            };
            event.prevent_default();
            // anchors carry the public URL; the router works below the base
            if let Err(err) = inner.borrow_mut().navigate(strip_base(&base, &href)) {
                tracing::error!(error = %err, "failed to render after navigation");
            }
        });
        element.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
        Ok(())
    }
}

/// Returns the target of a plain left click on an `a[data-link]` anchor.
fn intercepted_href(event: &MouseEvent) -> Option<String> {
    if event.button() != 0
        || event.ctrl_key()
        || event.meta_key()
        || event.shift_key()
        || event.alt_key()
    {
        return None;
    }
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let anchor = target.closest("a[data-link]").ok()??;
    anchor.get_attribute("href")
}

#[wasm_bindgen]
impl WebApp {
    /// Navigates to `path` and re-renders.
    ///
    /// # Errors
    ///
    /// Returns an error if the host element rejects the new content.
    #[wasm_bindgen]
    pub fn navigate(&self, path: &str) -> Result<(), WebError> {
        Ok(self.inner.borrow_mut().navigate(path)?)
    }

    /// Name of the current route.
    #[wasm_bindgen(js_name = currentRoute)]
    #[must_use]
    pub fn current_route(&self) -> Option<String> {
        self.inner
            .borrow()
            .current_route()
            .map(|matched| matched.name().to_string())
    }
}

/// Browser entry point: reads the bundled configuration and mounts the app.
///
/// # Errors
///
/// Returns an error if start-up fails; a missing host element is fatal.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let config = Config::bundled().map_err(WebError::from)?;
    logging::install_tracing_with(&config.log_level, ConsoleWriter);

    match WebAppBuilder::new(config).build() {
        Ok(app) => {
            tracing::info!(route = ?app.current_route(), "signbridge started");
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "signbridge failed to start");
            Err(err.into())
        }
    }
}
