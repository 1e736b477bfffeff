//! The application instance and its mounted form.

use alloc::vec::Vec;
use core::any::type_name;

use crate::{
    env::Environment,
    error::MountError,
    host::Host,
    router::{RouteMatch, Router, RouterHandle},
    view::{AnyView, View},
};

/// A capability provider installed into an application's [`Environment`].
pub trait Plugin: 'static {
    /// Name used to detect double installation.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Makes the plugin available to views.
    fn install(self, env: &mut Environment);
}

/// Represents a signbridge application before it is mounted.
#[derive(Debug)]
pub struct App {
    root: AnyView,
    env: Environment,
    plugins: Vec<&'static str>,
}

impl App {
    /// Create a new application with the given root view.
    pub fn new(root: impl View) -> Self {
        Self {
            root: AnyView::new(root),
            env: Environment::new(),
            plugins: Vec::new(),
        }
    }

    /// Install a plugin.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::PluginAlreadyInstalled`] if a plugin with the same
    /// name was installed before.
    pub fn install(mut self, plugin: impl Plugin) -> Result<Self, MountError> {
        let name = plugin.name();
        // a router handle and a bare router are the same capability
        let name = if name == type_name::<RouterHandle>() {
            type_name::<Router>()
        } else {
            name
        };
        if self.plugins.contains(&name) {
            return Err(MountError::PluginAlreadyInstalled(name));
        }
        plugin.install(&mut self.env);
        self.plugins.push(name);
        tracing::debug!(plugin = name, "plugin installed");
        Ok(self)
    }

    /// Renders the root view into `host`.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::AlreadyMounted`] if `host` carries an application
    /// already, or any error the host raises while writing.
    pub fn mount<H: Host>(self, mut host: H) -> Result<MountedApp<H>, MountError> {
        if host.is_mounted() {
            return Err(MountError::AlreadyMounted(host.id().into()));
        }
        let html = self.root.render(&self.env).to_html();
        host.attach(&html)?;
        tracing::info!(host = host.id(), "app mounted");
        Ok(MountedApp {
            root: self.root,
            env: self.env,
            host,
        })
    }
}

/// An application attached to its host element.
#[derive(Debug)]
pub struct MountedApp<H> {
    root: AnyView,
    env: Environment,
    host: H,
}

impl<H: Host> MountedApp<H> {
    /// The host element.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// The installed router, if any.
    #[must_use]
    pub fn router(&self) -> Option<&RouterHandle> {
        self.env.get::<RouterHandle>()
    }

    /// The current route match.
    #[must_use]
    pub fn current_route(&self) -> Option<RouteMatch> {
        self.router().map(|router| router.borrow().current().clone())
    }

    /// Renders the root view again into the host.
    ///
    /// # Errors
    ///
    /// Returns any error the host raises while writing.
    pub fn render(&mut self) -> Result<(), MountError> {
        let html = self.root.render(&self.env).to_html();
        self.host.update(&html)
    }

    /// Navigates to `path` and re-renders.
    ///
    /// # Errors
    ///
    /// Returns any error the host raises while writing.
    pub fn navigate(&mut self, path: &str) -> Result<(), MountError> {
        self.with_router(|router| {
            router.push(path);
        })
    }

    /// Replaces the current location with `path` and re-renders.
    ///
    /// # Errors
    ///
    /// Returns any error the host raises while writing.
    pub fn replace(&mut self, path: &str) -> Result<(), MountError> {
        self.with_router(|router| {
            router.replace(path);
        })
    }

    /// Steps back and re-renders.
    ///
    /// # Errors
    ///
    /// Returns any error the host raises while writing.
    pub fn back(&mut self) -> Result<(), MountError> {
        self.with_router(|router| {
            router.back();
        })
    }

    /// Steps forward and re-renders.
    ///
    /// # Errors
    ///
    /// Returns any error the host raises while writing.
    pub fn forward(&mut self) -> Result<(), MountError> {
        self.with_router(|router| {
            router.forward();
        })
    }

    /// Picks up a location change made outside the router and re-renders.
    ///
    /// # Errors
    ///
    /// Returns any error the host raises while writing.
    pub fn sync(&mut self) -> Result<(), MountError> {
        self.with_router(|router| {
            router.sync();
        })
    }

    fn with_router(&mut self, f: impl FnOnce(&mut Router)) -> Result<(), MountError> {
        match self.router() {
            Some(router) => router.with_mut(f),
            None => tracing::warn!("navigation requested but no router is installed"),
        }
        self.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        host::{MemoryDocument, MemoryHost},
        router::{MemoryHistory, RouteTable, RouterView},
        view::{Node, el},
    };

    fn router(initial: &str) -> Router {
        let table = RouteTable::builder()
            .route("/", "Home", Node::from("home"))
            .route("/:pathMatch(.*)*", "NotFound", el("h1").child("gone"))
            .build()
            .expect("table should build");
        Router::new(table, MemoryHistory::new(initial))
    }

    #[test]
    fn test_mount_populates_host_once() {
        let host = MemoryHost::new("app");
        let app = App::new(RouterView)
            .install(router("/"))
            .expect("router installs");
        let mounted = app.mount(host.clone()).expect("mount succeeds");
        assert_eq!(host.content(), "home");
        assert_eq!(host.writes(), 1);
        assert_eq!(mounted.current_route().map(|m| m.name().to_string()), Some("Home".into()));
    }

    #[test]
    fn test_second_mount_is_rejected() {
        let document = MemoryDocument::new().with_host("app");
        let first = App::new(RouterView).install(router("/")).expect("installs");
        first
            .mount(document.host("app").expect("host exists"))
            .expect("first mount succeeds");

        let second = App::new(RouterView).install(router("/")).expect("installs");
        let result = second.mount(document.host("app").expect("host exists"));
        assert_eq!(result.err(), Some(MountError::AlreadyMounted("app".into())));
        assert_eq!(document.host("app").expect("host exists").writes(), 1);
    }

    #[test]
    fn test_router_is_installed_once() {
        let app = App::new(RouterView).install(router("/")).expect("installs");
        let result = app.install(RouterHandle::new(router("/")));
        assert!(matches!(result, Err(MountError::PluginAlreadyInstalled(_))));
    }

    #[test]
    fn test_navigate_rerenders() {
        let host = MemoryHost::new("app");
        let mut mounted = App::new(RouterView)
            .install(router("/"))
            .expect("installs")
            .mount(host.clone())
            .expect("mounts");
        mounted.navigate("/unknown/path").expect("navigates");
        assert_eq!(host.content(), "<h1>gone</h1>");
        mounted.back().expect("goes back");
        assert_eq!(host.content(), "home");
        assert_eq!(host.writes(), 3);
    }
}
