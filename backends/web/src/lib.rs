#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Web/WASM entry point for `signbridge`.
//!
//! On start-up the crate reads the bundled configuration, sends `tracing`
//! output to the browser console, mounts the application into its host
//! element through [`signbridge::bootstrap`], and keeps the router in sync with
//! browser navigation: `popstate` events and clicks on `a[data-link]` anchors.

mod app;
mod console;
mod dom;
mod error;
mod history;

pub use app::{WebApp, WebAppBuilder, start};
pub use console::{ConsoleLine, ConsoleWriter};
pub use dom::DomHost;
pub use error::WebError;
pub use history::BrowserHistory;
