//! Client-side routing.
//!
//! A [`Router`] couples a [`RouteTable`] with a [`History`] source and keeps
//! the resolved [`RouteMatch`] for the current location. Installed as a
//! [`Plugin`], it makes itself available to [`RouterView`], which renders the
//! view of the current entry.

mod history;
mod pattern;
mod table;

pub use history::{History, MemoryHistory};
pub use pattern::{ParamValue, Params, PathPattern, Repeat, Segment, split_path};
pub use table::{MatchOrder, RouteEntry, RouteMatch, RouteSummary, RouteTable, RouteTableBuilder};

use alloc::{
    boxed::Box,
    format,
    rc::Rc,
    string::{String, ToString},
    vec::Vec,
};
use core::{
    cell::{Ref, RefCell},
    fmt,
};

use crate::{
    app::Plugin,
    env::Environment,
    error::RouteError,
    view::{Node, View},
};

type Hook = Box<dyn FnMut(&RouteMatch)>;

/// Resolves the history location against a route table.
pub struct Router {
    table: RouteTable,
    history: Box<dyn History>,
    current: RouteMatch,
    hooks: Vec<Hook>,
    base: String,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("table", &self.table)
            .field("current", &self.current)
            .field("base", &self.base)
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}

impl Router {
    /// Creates a router positioned at the history's current location.
    pub fn new(table: RouteTable, history: impl History + 'static) -> Self {
        let current = table.resolve(&history.location());
        Self {
            table,
            history: Box::new(history),
            current,
            hooks: Vec::new(),
            base: String::new(),
        }
    }

    /// Sets the path prefix the application is served under, e.g. `/translator/`.
    #[must_use]
    pub fn with_base(mut self, base: &str) -> Self {
        self.base = base.trim_end_matches('/').to_string();
        self
    }

    /// The route table.
    #[must_use]
    pub const fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The match for the current location.
    #[must_use]
    pub const fn current(&self) -> &RouteMatch {
        &self.current
    }

    /// Public URL of the entry called `name`, including the base path.
    ///
    /// # Errors
    ///
    /// See [`RouteTable::href`].
    pub fn href(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let path = self.table.href(name, params)?;
        Ok(format!("{}{path}", self.base))
    }

    /// Registers a hook that runs after every navigation.
    pub fn after_each(&mut self, hook: impl FnMut(&RouteMatch) + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Navigates to `path`, adding a history entry.
    pub fn push(&mut self, path: &str) -> &RouteMatch {
        self.history.push(path);
        self.sync()
    }

    /// Navigates to `path`, replacing the current history entry.
    pub fn replace(&mut self, path: &str) -> &RouteMatch {
        self.history.replace(path);
        self.sync()
    }

    /// Steps back one history entry.
    pub fn back(&mut self) -> &RouteMatch {
        self.history.back();
        self.sync()
    }

    /// Steps forward one history entry.
    pub fn forward(&mut self) -> &RouteMatch {
        self.history.forward();
        self.sync()
    }

    /// Re-reads the history location, e.g. after the browser changed it.
    pub fn sync(&mut self) -> &RouteMatch {
        let location = self.history.location();
        let matched = self.table.resolve(&location);
        if matched.is_not_found() {
            tracing::warn!(path = %location, "no route matched, rendering not-found view");
        } else {
            tracing::debug!(path = %location, route = matched.name(), "navigated");
        }
        self.current = matched;
        for hook in &mut self.hooks {
            hook(&self.current);
        }
        &self.current
    }
}

/// Shared handle to the installed [`Router`].
#[derive(Clone)]
pub struct RouterHandle(Rc<RefCell<Router>>);

impl fmt::Debug for RouterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RouterHandle").finish()
    }
}

impl RouterHandle {
    /// Wraps a router for sharing.
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self(Rc::new(RefCell::new(router)))
    }

    /// Borrows the router.
    ///
    /// # Panics
    ///
    /// Panics if the router is being navigated, e.g. when called from an
    /// `after_each` hook.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, Router> {
        self.0.borrow()
    }

    /// Runs `f` with mutable access to the router.
    ///
    /// # Panics
    ///
    /// Panics on re-entrant use from within `f`.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Router) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }
}

impl Plugin for Router {
    fn install(self, env: &mut Environment) {
        RouterHandle::new(self).install(env);
    }
}

impl Plugin for RouterHandle {
    fn install(self, env: &mut Environment) {
        env.insert(self);
    }
}

/// Renders the view of the current route.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterView;

impl View for RouterView {
    fn render(&self, env: &Environment) -> Node {
        let Some(handle) = env.get::<RouterHandle>() else {
            tracing::error!("RouterView rendered without an installed router");
            return Node::empty();
        };
        let router = handle.borrow();
        let entry = router.table().entry(router.current());
        entry.view().render(env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::String, vec::Vec};

    fn router(initial: &str) -> Router {
        let table = RouteTable::builder()
            .route("/", "Home", Node::from("home"))
            .route("/about", "About", Node::from("about"))
            .route("/:pathMatch(.*)*", "NotFound", Node::from("missing"))
            .build()
            .expect("table should build");
        Router::new(table, MemoryHistory::new(initial))
    }

    #[test]
    fn test_starts_at_history_location() {
        assert_eq!(router("/about").current().name(), "About");
        assert!(router("/elsewhere").current().is_not_found());
    }

    #[test]
    fn test_navigation_runs_hooks() {
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let mut router = router("/");
        let sink = Rc::clone(&seen);
        router.after_each(move |matched| sink.borrow_mut().push(matched.name().into()));

        assert_eq!(router.push("/about").name(), "About");
        assert_eq!(router.push("/gone").name(), "NotFound");
        assert_eq!(router.back().name(), "About");
        assert_eq!(router.replace("/").name(), "Home");
        assert_eq!(router.forward().name(), "NotFound");

        assert_eq!(*seen.borrow(), ["About", "NotFound", "About", "Home", "NotFound"]);
    }

    #[test]
    fn test_href_includes_base() {
        let served = router("/").with_base("/translator/");
        assert_eq!(served.href("About", &[]), Ok("/translator/about".into()));
        assert_eq!(served.href("Home", &[]), Ok("/translator/".into()));
        assert_eq!(
            served.href("Gone", &[]),
            Err(RouteError::UnknownRoute("Gone".into()))
        );
        let plain = router("/");
        assert_eq!(plain.href("About", &[]), Ok("/about".into()));
    }

    #[test]
    fn test_router_view_renders_current_entry() {
        let mut env = Environment::new();
        let handle = RouterHandle::new(router("/about"));
        handle.clone().install(&mut env);
        assert_eq!(RouterView.render(&env).to_html(), "about");
        handle.with_mut(|router| {
            router.push("/nowhere");
        });
        assert_eq!(RouterView.render(&env).to_html(), "missing");
    }

    #[test]
    fn test_router_view_without_router_is_empty() {
        assert_eq!(RouterView.render(&Environment::new()), Node::empty());
    }
}
