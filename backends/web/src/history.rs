use signbridge::History;
use wasm_bindgen::JsValue;
use web_sys::Window;

/// [`History`] backed by `window.history` and `window.location`.
///
/// Paths seen by the router are relative to `base`. `go` only asks the
/// browser to move; the location changes when `popstate` fires.
#[derive(Debug, Clone)]
pub struct BrowserHistory {
    window: Window,
    base: String,
}

impl BrowserHistory {
    /// Creates a history rooted at `base`, e.g. `/` or `/translator/`.
    #[must_use]
    pub fn new(window: Window, base: &str) -> Self {
        Self {
            window,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    fn full_path(&self, path: &str) -> String {
        join_base(&self.base, path)
    }
}

fn join_base(base: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

/// The router path of `pathname`, relative to `base` (no trailing slash).
pub(crate) fn strip_base<'a>(base: &str, pathname: &'a str) -> &'a str {
    let rest = match pathname.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => pathname,
    };
    if rest.is_empty() { "/" } else { rest }
}

fn log_failure(action: &str, err: &JsValue) {
    tracing::warn!(action, error = ?err, "browser history call failed");
}

impl History for BrowserHistory {
    fn location(&self) -> String {
        let location = self.window.location();
        let pathname = location.pathname().unwrap_or_default();
        let search = location.search().unwrap_or_default();
        let hash = location.hash().unwrap_or_default();

        let path = strip_base(&self.base, &pathname);
        format!("{path}{search}{hash}")
    }

    fn push(&mut self, path: &str) {
        let Ok(history) = self.window.history() else {
            return;
        };
        let url = self.full_path(path);
        if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(&url)) {
            log_failure("push", &err);
        }
    }

    fn replace(&mut self, path: &str) {
        let Ok(history) = self.window.history() else {
            return;
        };
        let url = self.full_path(path);
        if let Err(err) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
            log_failure("replace", &err);
        }
    }

    fn go(&mut self, delta: isize) {
        let Ok(history) = self.window.history() else {
            return;
        };
        let delta = i32::try_from(delta).unwrap_or_default();
        if let Err(err) = history.go_with_delta(delta) {
            log_failure("go", &err);
        }
    }
}
