//! The ordered route table and its resolver.

use alloc::{
    collections::{BTreeMap, BTreeSet},
    string::{String, ToString},
    vec::Vec,
};

use serde::{Deserialize, Serialize};

use super::pattern::{Params, PathPattern, split_path};
use crate::{
    error::RouteError,
    view::{AnyView, View},
};

/// Order in which entries are tried against a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOrder {
    /// First match wins by list position.
    #[default]
    Declaration,
    /// Most specific pattern wins; ties keep list position.
    Ranked,
}

/// A mapping from a path pattern to a named view.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    name: String,
    pattern: PathPattern,
    view: AnyView,
}

impl RouteEntry {
    /// Creates an entry.
    ///
    /// # Errors
    ///
    /// Returns an error when `path` is not a valid pattern.
    pub fn new(path: &str, name: impl Into<String>, view: impl View) -> Result<Self, RouteError> {
        Ok(Self {
            name: name.into(),
            pattern: PathPattern::parse(path)?,
            view: AnyView::new(view),
        })
    }

    /// The logical name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The path pattern.
    #[must_use]
    pub const fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The view rendered for this entry.
    #[must_use]
    pub const fn view(&self) -> &AnyView {
        &self.view
    }
}

/// The outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    #[serde(skip)]
    index: usize,
    name: String,
    pattern: String,
    path: String,
    params: Params,
    not_found: bool,
}

impl RouteMatch {
    /// Name of the matched entry.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pattern of the matched entry.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The requested path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Captured parameters.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Whether the path fell through to the catch-all entry.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.not_found
    }
}

/// One line of the table manifest logged at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    /// Entry name.
    pub name: String,
    /// Entry pattern.
    pub path: String,
    /// Whether any path can resolve to the entry.
    pub reachable: bool,
}

/// Builder for [`RouteTable`].
#[derive(Debug, Default)]
#[must_use]
pub struct RouteTableBuilder {
    entries: Vec<Result<RouteEntry, RouteError>>,
    order: MatchOrder,
}

impl RouteTableBuilder {
    /// Appends an entry.
    pub fn route(mut self, path: &str, name: impl Into<String>, view: impl View) -> Self {
        self.entries.push(RouteEntry::new(path, name, view));
        self
    }

    /// Sets the match order.
    pub const fn order(mut self, order: MatchOrder) -> Self {
        self.order = order;
        self
    }

    /// Validates the entries and produces the table.
    ///
    /// # Errors
    ///
    /// Returns the first invalid pattern, a [`RouteError::DuplicateName`], or
    /// [`RouteError::NoFallback`] when no entry matches every path.
    pub fn build(self) -> Result<RouteTable, RouteError> {
        let entries = self.entries.into_iter().collect::<Result<Vec<_>, _>>()?;

        let mut names = BTreeSet::new();
        for entry in &entries {
            if !names.insert(entry.name.as_str()) {
                return Err(RouteError::DuplicateName(entry.name.clone()));
            }
        }

        let fallback = entries
            .iter()
            .position(|entry| entry.pattern.is_universal())
            .ok_or(RouteError::NoFallback)?;

        let mut order: Vec<usize> = (0..entries.len()).collect();
        if self.order == MatchOrder::Ranked {
            // stable sort keeps list position among equal scores
            order.sort_by(|a, b| entries[*b].pattern.score().cmp(&entries[*a].pattern.score()));
        }

        Ok(RouteTable {
            entries,
            order,
            fallback,
            match_order: self.order,
        })
    }
}

/// A fixed, ordered list of [`RouteEntry`] values with a catch-all fallback.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    order: Vec<usize>,
    fallback: usize,
    match_order: MatchOrder,
}

impl RouteTable {
    /// Starts a new table.
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// The configured match order.
    #[must_use]
    pub const fn match_order(&self) -> MatchOrder {
        self.match_order
    }

    /// The catch-all entry that absorbs unmatched paths.
    #[must_use]
    pub fn fallback(&self) -> &RouteEntry {
        &self.entries[self.fallback]
    }

    /// Looks up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// The entry a match was produced from.
    #[must_use]
    pub fn entry(&self, matched: &RouteMatch) -> &RouteEntry {
        self.entries.get(matched.index).unwrap_or_else(|| self.fallback())
    }

    /// Resolves `path` to the first matching entry.
    ///
    /// Paths no concrete entry accepts resolve to the catch-all entry.
    #[must_use]
    pub fn resolve(&self, path: &str) -> RouteMatch {
        let segments = split_path(path);
        let found = self.order.iter().find_map(|&index| {
            self.entries[index]
                .pattern
                .matches(&segments)
                .map(|params| (index, params))
        });

        let (index, params) = found.unwrap_or_else(|| {
            let params = self.fallback().pattern.matches(&segments).unwrap_or_default();
            (self.fallback, params)
        });

        let entry = &self.entries[index];
        let matched = RouteMatch {
            index,
            name: entry.name.clone(),
            pattern: entry.pattern.to_string(),
            path: path.to_string(),
            params,
            not_found: index == self.fallback,
        };
        tracing::trace!(path, route = %matched.name, "resolved route");
        matched
    }

    /// Entries that no path can resolve to because an earlier catch-all
    /// absorbs every request.
    #[must_use]
    pub fn unreachable(&self) -> Vec<&RouteEntry> {
        let Some(cut) = self
            .order
            .iter()
            .position(|&index| self.entries[index].pattern.is_universal())
        else {
            return Vec::new();
        };
        self.order[cut + 1..]
            .iter()
            .map(|&index| &self.entries[index])
            .collect()
    }

    /// Summaries of every entry, in declaration order.
    #[must_use]
    pub fn manifest(&self) -> Vec<RouteSummary> {
        let unreachable: BTreeSet<&str> = self
            .unreachable()
            .into_iter()
            .map(RouteEntry::name)
            .collect();
        self.entries
            .iter()
            .map(|entry| RouteSummary {
                name: entry.name.clone(),
                path: entry.pattern.to_string(),
                reachable: !unreachable.contains(entry.name()),
            })
            .collect()
    }

    /// Builds the path of the entry called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnknownRoute`] for an unknown name and
    /// [`RouteError::MissingParam`] when a required parameter is absent.
    pub fn href(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let entry = self
            .get(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;
        let params: BTreeMap<&str, &str> = params.iter().copied().collect();
        entry.pattern.build(name, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Node;

    fn table(order: MatchOrder) -> RouteTable {
        RouteTable::builder()
            .order(order)
            .route("/", "Home", Node::from("home"))
            .route("/clips/:id", "Clip", Node::from("clip"))
            .route("/:pathMatch(.*)*", "NotFound", Node::from("missing"))
            .route("/late", "Late", Node::from("late"))
            .build()
            .expect("table should build")
    }

    #[test]
    fn test_first_match_wins_by_position() {
        let table = table(MatchOrder::Declaration);
        assert_eq!(table.resolve("/").name(), "Home");
        let clip = table.resolve("/clips/9");
        assert_eq!(clip.name(), "Clip");
        assert!(!clip.is_not_found());
        let late = table.resolve("/late");
        assert_eq!(late.name(), "NotFound");
        assert!(late.is_not_found());
    }

    #[test]
    fn test_ranked_order_prefers_specific_patterns() {
        let table = table(MatchOrder::Ranked);
        assert_eq!(table.resolve("/late").name(), "Late");
        assert_eq!(table.resolve("/").name(), "Home");
        assert_eq!(table.resolve("/nope").name(), "NotFound");
        assert!(table.unreachable().is_empty());
    }

    #[test]
    fn test_unreachable_lists_shadowed_entries() {
        let table = table(MatchOrder::Declaration);
        let names: Vec<&str> = table.unreachable().into_iter().map(RouteEntry::name).collect();
        assert_eq!(names, ["Late"]);
        let manifest = table.manifest();
        assert_eq!(manifest.len(), 4);
        assert!(manifest.iter().all(|s| s.reachable == (s.name != "Late")));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = RouteTable::builder()
            .route("/", "Home", Node::empty())
            .route("/home", "Home", Node::empty())
            .route("/:pathMatch(.*)*", "NotFound", Node::empty())
            .build();
        assert_eq!(result.err(), Some(RouteError::DuplicateName("Home".into())));
    }

    #[test]
    fn test_requires_universal_fallback() {
        let result = RouteTable::builder()
            .route("/", "Home", Node::empty())
            .route("/files/:rest+", "Files", Node::empty())
            .build();
        assert_eq!(result.err(), Some(RouteError::NoFallback));
    }

    #[test]
    fn test_concrete_catch_all_is_a_real_match() {
        let table = RouteTable::builder()
            .route("/files/:rest+", "Files", Node::from("files"))
            .route("/docs/:path(.*)", "Docs", Node::from("docs"))
            .route("/:pathMatch(.*)*", "NotFound", Node::from("missing"))
            .build()
            .expect("table should build");
        let files = table.resolve("/files/a/b");
        assert_eq!(files.name(), "Files");
        assert!(!files.is_not_found());
        let docs = table.resolve("/docs/intro");
        assert_eq!(docs.name(), "Docs");
        assert!(!docs.is_not_found());
        assert!(table.resolve("/files").is_not_found());
    }

    #[test]
    fn test_href_builds_paths() {
        let table = table(MatchOrder::Declaration);
        assert_eq!(table.href("Clip", &[("id", "3")]), Ok("/clips/3".into()));
        assert_eq!(table.href("Home", &[]), Ok("/".into()));
        assert_eq!(
            table.href("Nope", &[]),
            Err(RouteError::UnknownRoute("Nope".into()))
        );
    }
}
