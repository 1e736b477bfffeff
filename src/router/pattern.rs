//! Path pattern parsing and matching.
//!
//! Patterns use the history router syntax: static segments, `:name`
//! parameters with an optional `?`, `*` or `+` modifier, and the custom
//! catch-all expression `(.*)`. Captured values are percent-decoded.

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};
use alloc::borrow::Cow;
use core::fmt;

use serde::Serialize;

use crate::error::RouteError;

/// How many path segments a catch-all parameter consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// `*`: zero or more segments, captured as a list.
    ZeroOrMore,
    /// `+`: one or more segments, captured as a list.
    OneOrMore,
    /// No modifier: the remainder of the path as one value.
    Rest,
}

/// One `/`-separated piece of a [`PathPattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches the literal text, ignoring ASCII case.
    Static(String),
    /// Captures exactly one segment, or none when optional.
    Param {
        /// Capture name.
        name: String,
        /// Whether the segment may be absent.
        optional: bool,
    },
    /// Captures every remaining segment.
    CatchAll {
        /// Capture name.
        name: String,
        /// Multiplicity of the capture.
        repeat: Repeat,
    },
}

impl Segment {
    const fn rank(&self) -> u8 {
        match self {
            Self::Static(_) => 4,
            Self::Param {
                optional: false, ..
            } => 3,
            Self::Param { optional: true, .. } => 2,
            Self::CatchAll { .. } => 1,
        }
    }
}

/// A captured parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A single segment or the joined rest of the path.
    One(String),
    /// Repeated segments.
    Many(Vec<String>),
}

impl ParamValue {
    /// The value as one string; repeated segments are joined with `/`.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::One(value) => value.clone(),
            Self::Many(values) => values.join("/"),
        }
    }
}

/// Captured parameters by name.
pub type Params = BTreeMap<String, ParamValue>;

/// A parsed route path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PathPattern {
    /// Parses a pattern such as `/video-to-text` or `/:pathMatch(.*)*`.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteError`] describing the first malformed segment.
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        if !raw.starts_with('/') {
            return Err(RouteError::NotAbsolute(raw.to_string()));
        }

        let mut segments = Vec::new();
        for piece in raw.split('/').filter(|piece| !piece.is_empty()) {
            if matches!(segments.last(), Some(Segment::CatchAll { .. })) {
                return Err(RouteError::CatchAllNotLast(raw.to_string()));
            }
            let segment = parse_segment(raw, piece)?;
            if let Some(name) = param_name(&segment) {
                if segments.iter().filter_map(param_name).any(|seen| seen == name) {
                    return Err(RouteError::DuplicateParam {
                        pattern: raw.to_string(),
                        param: name.to_string(),
                    });
                }
            }
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the pattern ends in a catch-all parameter.
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll { .. }))
    }

    /// Whether the pattern matches every possible path.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        matches!(
            self.segments.as_slice(),
            [Segment::CatchAll {
                repeat: Repeat::ZeroOrMore | Repeat::Rest,
                ..
            }]
        )
    }

    /// Specificity key used by ranked matching; greater is more specific.
    pub(crate) fn score(&self) -> (bool, Vec<u8>) {
        let ranks = if self.segments.is_empty() {
            // the root path is a static match
            alloc::vec![4]
        } else {
            self.segments.iter().map(Segment::rank).collect()
        };
        (!self.is_catch_all(), ranks)
    }

    /// Matches already split path segments, returning the captures on success.
    #[must_use]
    pub fn matches(&self, path: &[&str]) -> Option<Params> {
        let mut params = Params::new();
        match_from(&self.segments, path, &mut params).then_some(params)
    }

    /// Builds a concrete path from parameter values.
    ///
    /// Catch-all values may contain `/`. Optional parameters and catch-alls
    /// that accept zero segments may be omitted.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MissingParam`] when a required value is absent;
    /// `route` names the entry in the error.
    pub fn build(&self, route: &str, params: &BTreeMap<&str, &str>) -> Result<String, RouteError> {
        let missing = |param: &str| RouteError::MissingParam {
            route: route.to_string(),
            param: param.to_string(),
        };

        let mut pieces: Vec<&str> = Vec::new();
        for segment in &self.segments {
            match segment {
                Segment::Static(text) => pieces.push(text),
                Segment::Param { name, optional } => match params.get(name.as_str()) {
                    Some(value) if !value.is_empty() => pieces.push(value),
                    _ if *optional => {}
                    _ => return Err(missing(name)),
                },
                Segment::CatchAll { name, repeat } => {
                    let value = params
                        .get(name.as_str())
                        .map(|value| value.trim_matches('/'))
                        .unwrap_or_default();
                    if value.is_empty() && *repeat == Repeat::OneOrMore {
                        return Err(missing(name));
                    }
                    if !value.is_empty() {
                        pieces.push(value);
                    }
                }
            }
        }

        let mut path = String::from("/");
        path.push_str(&pieces.join("/"));
        Ok(path)
    }
}

fn param_name(segment: &Segment) -> Option<&str> {
    match segment {
        Segment::Static(_) => None,
        Segment::Param { name, .. } | Segment::CatchAll { name, .. } => Some(name),
    }
}

fn parse_segment(raw: &str, piece: &str) -> Result<Segment, RouteError> {
    let Some(rest) = piece.strip_prefix(':') else {
        return Ok(Segment::Static(piece.to_string()));
    };

    let name_end = rest
        .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
        .unwrap_or(rest.len());
    let (name, mut rest) = rest.split_at(name_end);
    if name.is_empty() {
        return Err(RouteError::UnnamedParam {
            pattern: raw.to_string(),
        });
    }

    let mut custom = false;
    if let Some(inner) = rest.strip_prefix('(') {
        let Some(close) = inner.rfind(')') else {
            return Err(unsupported(raw, inner));
        };
        let expr = &inner[..close];
        if expr != ".*" {
            return Err(unsupported(raw, expr));
        }
        custom = true;
        rest = &inner[close + 1..];
    }

    let name = name.to_string();
    let segment = match (rest, custom) {
        ("", false) => Segment::Param {
            name,
            optional: false,
        },
        ("?", false) => Segment::Param {
            name,
            optional: true,
        },
        ("" | "?", true) => Segment::CatchAll {
            name,
            repeat: Repeat::Rest,
        },
        ("*", _) => Segment::CatchAll {
            name,
            repeat: Repeat::ZeroOrMore,
        },
        ("+", _) => Segment::CatchAll {
            name,
            repeat: Repeat::OneOrMore,
        },
        (other, _) => return Err(unsupported(raw, other)),
    };
    Ok(segment)
}

fn unsupported(raw: &str, expr: &str) -> RouteError {
    RouteError::UnsupportedPattern {
        pattern: raw.to_string(),
        expr: expr.to_string(),
    }
}

fn match_from(segments: &[Segment], path: &[&str], params: &mut Params) -> bool {
    let Some((segment, remaining)) = segments.split_first() else {
        return path.is_empty();
    };

    match segment {
        Segment::Static(text) => match path.split_first() {
            Some((head, tail)) if head.eq_ignore_ascii_case(text) => {
                match_from(remaining, tail, params)
            }
            _ => false,
        },
        Segment::Param { name, optional } => {
            if let Some((head, tail)) = path.split_first() {
                params.insert(name.clone(), ParamValue::One(decode(head)));
                if match_from(remaining, tail, params) {
                    return true;
                }
                params.remove(name);
            }
            *optional && match_from(remaining, path, params)
        }
        Segment::CatchAll { name, repeat } => {
            let value = match repeat {
                Repeat::OneOrMore if path.is_empty() => return false,
                Repeat::ZeroOrMore | Repeat::OneOrMore => {
                    ParamValue::Many(path.iter().copied().map(decode).collect())
                }
                Repeat::Rest => ParamValue::One(
                    path.iter()
                        .copied()
                        .map(decode)
                        .collect::<Vec<_>>()
                        .join("/"),
                ),
            };
            params.insert(name.clone(), value);
            true
        }
    }
}

/// Percent-decodes one segment; invalid UTF-8 keeps the raw text.
fn decode(segment: &str) -> String {
    urlencoding::decode(segment).map_or_else(|_| segment.to_string(), Cow::into_owned)
}

/// Splits a request path into segments, dropping the query string, the
/// fragment and empty segments.
#[must_use]
pub fn split_path(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end]
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(raw: &str) -> PathPattern {
        PathPattern::parse(raw).expect("pattern should parse")
    }

    #[test]
    fn test_static_match_ignores_case_and_trailing_slash() {
        let p = pattern("/video-to-text");
        assert!(p.matches(&split_path("/Video-To-Text/")).is_some());
        assert!(p.matches(&split_path("/video-to-text?lang=he#top")).is_some());
        assert!(p.matches(&split_path("/video-to-text/extra")).is_none());
    }

    #[test]
    fn test_root_matches_only_root() {
        let p = pattern("/");
        assert!(p.matches(&split_path("/")).is_some());
        assert!(p.matches(&split_path("")).is_some());
        assert!(p.matches(&split_path("/x")).is_none());
    }

    #[test]
    fn test_catch_all_captures_remaining_segments() {
        let p = pattern("/:pathMatch(.*)*");
        assert!(p.is_universal());
        let params = p.matches(&split_path("/unknown/path")).expect("catch-all matches");
        assert_eq!(
            params.get("pathMatch"),
            Some(&ParamValue::Many(vec!["unknown".into(), "path".into()]))
        );
        let params = p.matches(&split_path("/")).expect("catch-all matches root");
        assert_eq!(params.get("pathMatch"), Some(&ParamValue::Many(Vec::new())));
    }

    #[test]
    fn test_one_or_more_requires_a_segment() {
        let p = pattern("/files/:rest+");
        assert!(!p.is_universal());
        assert!(p.matches(&split_path("/files")).is_none());
        assert!(p.matches(&split_path("/files/a/b")).is_some());
    }

    #[test]
    fn test_named_and_optional_params() {
        let p = pattern("/clips/:id/:format?");
        let params = p.matches(&split_path("/clips/42")).expect("optional omitted");
        assert_eq!(params.get("id"), Some(&ParamValue::One("42".into())));
        assert!(!params.contains_key("format"));
        let params = p.matches(&split_path("/clips/42/mp4")).expect("optional given");
        assert_eq!(params.get("format").map(ParamValue::joined), Some("mp4".into()));
    }

    #[test]
    fn test_captures_are_percent_decoded() {
        let p = pattern("/clips/:id");
        let params = p.matches(&split_path("/clips/a%20b")).expect("param matches");
        assert_eq!(params.get("id"), Some(&ParamValue::One("a b".into())));

        let catch_all = pattern("/:pathMatch(.*)*");
        let params = catch_all
            .matches(&split_path("/caf%C3%A9/%FF"))
            .expect("catch-all matches");
        assert_eq!(
            params.get("pathMatch"),
            Some(&ParamValue::Many(vec!["café".into(), "%FF".into()]))
        );
    }

    #[test]
    fn test_rest_capture_joins_segments() {
        let p = pattern("/docs/:path(.*)");
        let params = p.matches(&split_path("/docs/a/b/c")).expect("rest matches");
        assert_eq!(params.get("path").map(ParamValue::joined), Some("a/b/c".into()));
    }

    #[test]
    fn test_rejects_malformed_patterns() {
        assert!(matches!(PathPattern::parse("test"), Err(RouteError::NotAbsolute(_))));
        assert!(matches!(
            PathPattern::parse("/:(.*)"),
            Err(RouteError::UnnamedParam { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/:id(\\d+)"),
            Err(RouteError::UnsupportedPattern { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/:rest(.*)*/tail"),
            Err(RouteError::CatchAllNotLast(_))
        ));
        assert!(matches!(
            PathPattern::parse("/:id/:id"),
            Err(RouteError::DuplicateParam { .. })
        ));
    }

    #[test]
    fn test_build_fills_parameters() {
        let p = pattern("/clips/:id/:format?");
        let params = BTreeMap::from([("id", "7")]);
        assert_eq!(p.build("Clip", &params), Ok("/clips/7".to_string()));
        assert_eq!(
            p.build("Clip", &BTreeMap::new()),
            Err(RouteError::MissingParam {
                route: "Clip".into(),
                param: "id".into()
            })
        );
        let catch_all = pattern("/:pathMatch(.*)*");
        let params = BTreeMap::from([("pathMatch", "/a/b")]);
        assert_eq!(catch_all.build("NotFound", &params), Ok("/a/b".to_string()));
    }
}
