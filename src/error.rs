//! Error types for route table construction, mounting and configuration.

use thiserror::Error;

/// Errors raised while building a [`RouteTable`](crate::router::RouteTable)
/// or generating links from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The pattern does not start with `/`.
    #[error("route pattern `{0}` must start with `/`")]
    NotAbsolute(String),
    /// A `:` segment has no parameter name.
    #[error("route pattern `{pattern}` has an unnamed parameter")]
    UnnamedParam {
        /// The offending pattern.
        pattern: String,
    },
    /// The same parameter name appears twice in one pattern.
    #[error("parameter `{param}` is declared twice in `{pattern}`")]
    DuplicateParam {
        /// The offending pattern.
        pattern: String,
        /// The repeated parameter name.
        param: String,
    },
    /// A custom expression other than `.*` was used.
    #[error("unsupported custom expression `({expr})` in `{pattern}`")]
    UnsupportedPattern {
        /// The offending pattern.
        pattern: String,
        /// The rejected expression.
        expr: String,
    },
    /// A catch-all parameter is followed by more segments.
    #[error("catch-all parameter must be the last segment of `{0}`")]
    CatchAllNotLast(String),
    /// Two entries share the same logical name.
    #[error("route name `{0}` is registered twice")]
    DuplicateName(String),
    /// No entry can match an arbitrary path.
    #[error("route table has no catch-all entry")]
    NoFallback,
    /// Link generation referenced a name that is not in the table.
    #[error("no route named `{0}`")]
    UnknownRoute(String),
    /// Link generation is missing a required parameter.
    #[error("route `{route}` requires parameter `{param}`")]
    MissingParam {
        /// The route being linked.
        route: String,
        /// The missing parameter name.
        param: String,
    },
}

/// Errors raised while attaching an application to its host node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    /// The host node does not exist in the document.
    #[error("failed to find host element with id `{0}`")]
    HostNotFound(String),
    /// The host node already carries a mounted application.
    #[error("host element `{0}` already has an application mounted")]
    AlreadyMounted(String),
    /// A plugin of the same type was installed before.
    #[error("plugin `{0}` is already installed")]
    PluginAlreadyInstalled(&'static str),
    /// The host rejected the write.
    #[error("host error: {0}")]
    Host(String),
}

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    /// The base path is malformed.
    #[error("base path `{0}` must start with `/`")]
    InvalidBase(String),
    /// The host id is empty.
    #[error("host id must not be empty")]
    EmptyHostId,
}

/// Umbrella error returned by [`bootstrap`](crate::bootstrap::bootstrap).
#[derive(Debug, Error)]
pub enum Error {
    /// Route table construction failed.
    #[error(transparent)]
    Route(#[from] RouteError),
    /// Mounting failed.
    #[error(transparent)]
    Mount(#[from] MountError),
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_error_display() {
        let error = MountError::HostNotFound("app".to_string());
        assert_eq!(error.to_string(), "failed to find host element with id `app`");
    }

    #[test]
    fn test_umbrella_is_transparent() {
        let error = Error::from(RouteError::DuplicateName("Main".to_string()));
        assert_eq!(error.to_string(), "route name `Main` is registered twice");
    }
}
