#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

extern crate alloc;

pub mod app;
pub mod bootstrap;
pub mod config;
pub mod env;
pub mod error;
pub mod host;
pub mod logging;
pub mod pages;
pub mod router;
pub mod view;

#[doc(inline)]
pub use app::{App, MountedApp, Plugin};
#[doc(inline)]
pub use bootstrap::bootstrap;
pub use config::Config;
pub use env::Environment;
pub use error::{ConfigError, Error, MountError, RouteError};
pub use host::{Host, MemoryDocument, MemoryHost};
pub use router::{
    History, MatchOrder, MemoryHistory, RouteEntry, RouteMatch, RouteTable, Router, RouterHandle,
    RouterView,
};
#[doc(inline)]
pub use view::{AnyView, Element, Node, View, el};
