//! The translator's pages and the static route list that maps paths to them.

use alloc::string::{String, ToString};

use crate::{
    config::Config,
    env::Environment,
    error::RouteError,
    router::{RouteTable, RouterHandle, RouterView},
    view::{Node, View, el},
};

/// Route names, in table order.
pub mod names {
    /// Landing page.
    pub const MAIN: &str = "Main";
    /// Sign language video to text.
    pub const VIDEO_TO_TEXT: &str = "VideoToText";
    /// Text to sign language video.
    pub const TEXT_TO_VIDEO: &str = "TextToVideo";
    /// Catch-all for unknown paths.
    pub const NOT_FOUND: &str = "NotFound";
    /// Inline diagnostic page.
    pub const TEST: &str = "Test";
}

/// Text rendered for unknown paths.
pub const NOT_FOUND_MESSAGE: &str = "404 - Page Not Found";

/// Video containers the backend accepts.
const VIDEO_FORMATS: &str = ".mp4,.avi,.mov";

/// Builds the route table.
///
/// The catch-all sits before `/test`, so under [`MatchOrder::Declaration`]
/// the test page is never reached.
///
/// [`MatchOrder::Declaration`]: crate::router::MatchOrder::Declaration
///
/// # Errors
///
/// Returns an error if the table violates a [`RouteTable`] invariant.
pub fn routes(config: &Config) -> Result<RouteTable, RouteError> {
    RouteTable::builder()
        .order(config.match_order)
        .route("/", names::MAIN, MainPage)
        .route(
            "/video-to-text",
            names::VIDEO_TO_TEXT,
            VideoToTextPage::new(config.endpoint("/upload")),
        )
        .route(
            "/text-to-video",
            names::TEXT_TO_VIDEO,
            TextToVideoPage::new(config.endpoint("/generate_video")),
        )
        .route("/:pathMatch(.*)*", names::NOT_FOUND, NotFoundPage)
        .route("/test", names::TEST, TestPage)
        .build()
}

/// A client-side link to the route called `name`, or plain text when no
/// router is installed.
fn link(env: &Environment, name: &str, label: &str) -> Node {
    let Some(router) = env.get::<RouterHandle>() else {
        return Node::from(label);
    };
    match router.borrow().href(name, &[]) {
        Ok(href) => el("a")
            .attr("href", href)
            .attr("data-link", "")
            .child(label)
            .into(),
        Err(err) => {
            tracing::error!(route = name, error = %err, "cannot link to route");
            Node::from(label)
        }
    }
}

/// Page chrome around the routed view.
#[derive(Debug, Clone)]
pub struct Shell {
    title: String,
}

impl Shell {
    /// Creates the shell with a heading.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl View for Shell {
    fn render(&self, env: &Environment) -> Node {
        el("div")
            .class("signbridge")
            .child(
                el("header")
                    .child(el("span").class("brand").child(self.title.as_str()))
                    .child(el("nav").children([
                        link(env, names::MAIN, "Home"),
                        link(env, names::VIDEO_TO_TEXT, "Video to Text"),
                        link(env, names::TEXT_TO_VIDEO, "Text to Video"),
                    ])),
            )
            .child(el("main").child(RouterView.render(env)))
            .into()
    }
}

/// Landing page.
#[derive(Debug, Clone, Copy, Default)]
pub struct MainPage;

impl View for MainPage {
    fn render(&self, env: &Environment) -> Node {
        el("section")
            .class("page main")
            .child(el("h2").child("Translate sign language"))
            .child(el("p").child(
                "Upload a signing video to read it as text, or type a sentence to watch it signed.",
            ))
            .child(el("ul").children([
                el("li").child(link(env, names::VIDEO_TO_TEXT, "Video to Text")),
                el("li").child(link(env, names::TEXT_TO_VIDEO, "Text to Video")),
            ]))
            .into()
    }
}

/// Uploads a signing video for translation.
#[derive(Debug, Clone)]
pub struct VideoToTextPage {
    action: String,
}

impl VideoToTextPage {
    /// Creates the page posting to `action`.
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }
}

impl View for VideoToTextPage {
    fn render(&self, _env: &Environment) -> Node {
        let mode = el("select")
            .attr("name", "mode")
            .child(el("option").attr("value", "sentence").child("Sentence"))
            .child(el("option").attr("value", "word").child("Single word"));

        el("section")
            .class("page video-to-text")
            .child(el("h2").child("Video to Text"))
            .child(
                el("form")
                    .attr("action", self.action.as_str())
                    .attr("method", "post")
                    .attr("enctype", "multipart/form-data")
                    .child(
                        el("input")
                            .attr("type", "file")
                            .attr("name", "video")
                            .attr("accept", VIDEO_FORMATS)
                            .attr("required", ""),
                    )
                    .child(mode)
                    .child(el("button").attr("type", "submit").child("Translate")),
            )
            .child(el("output").attr("name", "translation"))
            .into()
    }
}

/// Turns a sentence into a signing video.
#[derive(Debug, Clone)]
pub struct TextToVideoPage {
    action: String,
}

impl TextToVideoPage {
    /// Creates the page posting to `action`.
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }
}

impl View for TextToVideoPage {
    fn render(&self, _env: &Environment) -> Node {
        el("section")
            .class("page text-to-video")
            .child(el("h2").child("Text to Video"))
            .child(
                el("form")
                    .attr("action", self.action.as_str())
                    .attr("method", "post")
                    .attr("data-encoding", "json")
                    .child(
                        el("textarea")
                            .attr("name", "text")
                            .attr("placeholder", "Type a sentence")
                            .attr("required", ""),
                    )
                    .child(el("button").attr("type", "submit").child("Generate")),
            )
            .child(el("video").attr("controls", "").attr("hidden", ""))
            .into()
    }
}

/// Rendered for any path no concrete route accepts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFoundPage;

impl View for NotFoundPage {
    fn render(&self, _env: &Environment) -> Node {
        el("h1").child(NOT_FOUND_MESSAGE).into()
    }
}

/// Inline diagnostic page.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestPage;

impl View for TestPage {
    fn render(&self, _env: &Environment) -> Node {
        tracing::info!("test route rendered");
        el("div").child("Simple inline test".to_string()).into()
    }
}
