//! Start-up sequence: build the routes, create the app, mount it.

use crate::{
    app::{App, MountedApp},
    config::Config,
    error::Error,
    host::Host,
    pages::{self, Shell},
    router::{History, Router},
};

/// Builds the route table, installs the router into a fresh [`App`] and
/// mounts it into `host`.
///
/// Logging is not installed here; entry points do that first so that the
/// start-up events below are recorded.
///
/// # Errors
///
/// Returns an error if the configuration or route table is invalid, or if
/// the host cannot take the application.
pub fn bootstrap<H: Host>(
    config: &Config,
    history: impl History + 'static,
    host: H,
) -> Result<MountedApp<H>, Error> {
    config.validate()?;

    let table = pages::routes(config)?;
    for entry in table.unreachable() {
        tracing::warn!(
            route = entry.name(),
            path = %entry.pattern(),
            "route is shadowed by an earlier catch-all and can never match"
        );
    }
    match serde_json::to_string(&table.manifest()) {
        Ok(manifest) => tracing::info!(routes = %manifest, "router setup complete"),
        Err(err) => {
            tracing::warn!(error = %err, "failed to serialise route manifest");
            tracing::info!(routes = table.entries().len(), "router setup complete");
        }
    }

    let router = Router::new(table, history).with_base(&config.base);
    let app = App::new(Shell::new(config.title.as_str())).install(router)?;
    Ok(app.mount(host)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::MountError,
        host::{MemoryDocument, MemoryHost},
        pages::{NOT_FOUND_MESSAGE, names},
        router::{MatchOrder, MemoryHistory},
    };

    #[test]
    fn test_mounts_landing_page() {
        let host = MemoryHost::new("app");
        let app = bootstrap(&Config::default(), MemoryHistory::new("/"), host.clone())
            .expect("bootstrap succeeds");
        assert!(host.is_mounted());
        assert!(!host.content().is_empty());
        assert!(host.content().contains("Translate sign language"));
        assert_eq!(
            app.current_route().map(|m| m.name().to_string()),
            Some(names::MAIN.to_string())
        );
    }

    #[test]
    fn test_navigation_scenarios() {
        let host = MemoryHost::new("app");
        let mut app = bootstrap(&Config::default(), MemoryHistory::new("/"), host.clone())
            .expect("bootstrap succeeds");

        app.navigate("/text-to-video").expect("navigates");
        let current = app.current_route().expect("router installed");
        assert_eq!(current.name(), names::TEXT_TO_VIDEO);

        app.navigate("/unknown/path").expect("navigates");
        let current = app.current_route().expect("router installed");
        assert_eq!(current.name(), names::NOT_FOUND);
        assert!(host.content().contains(NOT_FOUND_MESSAGE));
    }

    #[test]
    fn test_links_follow_configured_base() {
        let host = MemoryHost::new("app");
        let config = Config {
            base: "/translator/".into(),
            ..Config::default()
        };
        bootstrap(&config, MemoryHistory::new("/"), host.clone()).expect("bootstrap succeeds");
        let html = host.content();
        assert!(html.contains("href=\"/translator/\""));
        assert!(html.contains("href=\"/translator/video-to-text\""));
        assert!(html.contains("href=\"/translator/text-to-video\""));
        assert!(!html.contains("href=\"/video-to-text\""));
    }

    #[test]
    fn test_default_base_links_from_root() {
        let host = MemoryHost::new("app");
        bootstrap(&Config::default(), MemoryHistory::new("/"), host.clone())
            .expect("bootstrap succeeds");
        assert!(host.content().contains("<a href=\"/video-to-text\" data-link>"));
    }

    #[test]
    fn test_initial_location_is_honoured() {
        let host = MemoryHost::new("app");
        let config = Config {
            match_order: MatchOrder::Ranked,
            ..Config::default()
        };
        bootstrap(&config, MemoryHistory::new("/test"), host.clone()).expect("bootstrap succeeds");
        assert!(host.content().contains("<div>Simple inline test</div>"));
    }

    #[test]
    fn test_refuses_duplicate_mount() {
        let document = MemoryDocument::new().with_host("app");
        let config = Config::default();
        let host = document.host(&config.host_id).expect("host exists");
        bootstrap(&config, MemoryHistory::default(), host).expect("first mount succeeds");

        let host = document.host(&config.host_id).expect("host exists");
        let result = bootstrap(&config, MemoryHistory::default(), host);
        assert!(matches!(
            result,
            Err(Error::Mount(MountError::AlreadyMounted(id))) if id == "app"
        ));
        assert_eq!(document.host("app").expect("host exists").writes(), 1);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = Config {
            host_id: String::new(),
            ..Config::default()
        };
        let result = bootstrap(&config, MemoryHistory::default(), MemoryHost::new("app"));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
