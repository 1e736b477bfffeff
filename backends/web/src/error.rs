use core::fmt;

use signbridge::{ConfigError, Error, MountError};

/// Error type produced by the web backend.
#[derive(Debug, Clone)]
pub enum WebError {
    /// The DOM APIs are not accessible (e.g., when executed outside of a browser).
    DomUnavailable,
    /// Start-up failed before or while mounting.
    Startup(String),
    /// Wrapper around JavaScript exceptions.
    Js(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomUnavailable => write!(f, "DOM is not available"),
            Self::Startup(msg) => write!(f, "signbridge failed to start: {msg}"),
            Self::Js(msg) => write!(f, "JavaScript error: {msg}"),
        }
    }
}

impl std::error::Error for WebError {}

impl From<Error> for WebError {
    fn from(value: Error) -> Self {
        Self::Startup(value.to_string())
    }
}

impl From<MountError> for WebError {
    fn from(value: MountError) -> Self {
        Self::from(Error::from(value))
    }
}

impl From<ConfigError> for WebError {
    fn from(value: ConfigError) -> Self {
        Self::from(Error::from(value))
    }
}

impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Js(format!("{value:?}")), Self::Js)
    }
}

impl From<WebError> for wasm_bindgen::JsValue {
    fn from(value: WebError) -> Self {
        Self::from(value.to_string())
    }
}
