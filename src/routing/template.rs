//! Path template parsing, matching, and rendering.
//!
//! # Responsibilities
//! - Parse `{Name}` templates into literal and placeholder segments
//! - Match concrete request paths and extract placeholder bindings
//! - Render concrete paths from bindings, escaping placeholder values
//!
//! # Design Decisions
//! - Templates are parsed once at registration, never per request
//! - Matching and rendering share the same parsed representation
//! - No regex: positional segment alignment keeps matching O(segments)
//! - Placeholder values are percent-decoded on extract, encoded on render,
//!   so values containing path-reserved characters round-trip intact

use std::collections::HashMap;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::routing::error::RouteError;

/// Bindings for the named placeholders of a path template.
pub type RouteParams = HashMap<String, String>;

/// Characters escaped when substituting a value into a path segment.
/// Everything that would alter path structure or terminate the path.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// One parsed segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matched and rendered verbatim.
    Literal(String),
    /// Matches any single non-empty path token; rendered from a binding.
    Param(String),
}

/// A URL path template parsed into an ordered segment list.
///
/// Templates look like `/posts/{ID}`: literal segments interleaved with
/// `{Name}` placeholders, each placeholder spanning a whole segment.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a template string.
    ///
    /// Fails if the template does not begin with `/`, contains an empty or
    /// unterminated placeholder, repeats a placeholder name, or embeds a
    /// brace inside a literal segment.
    pub fn parse(template: &str) -> Result<Self, RouteError> {
        let invalid = |reason| RouteError::InvalidTemplate {
            template: template.to_string(),
            reason,
        };

        let rest = template
            .strip_prefix('/')
            .ok_or_else(|| invalid("must begin with '/'"))?;

        let mut tokens: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };
        // A single trailing slash is tolerated, "/posts/" parses as "/posts".
        if tokens.last() == Some(&"") {
            tokens.pop();
        }

        let mut segments = Vec::with_capacity(tokens.len());
        for token in tokens {
            if token.is_empty() {
                return Err(invalid("empty path segment"));
            }
            if let Some(inner) = token.strip_prefix('{') {
                let name = inner
                    .strip_suffix('}')
                    .ok_or_else(|| invalid("unterminated placeholder"))?;
                if name.is_empty() {
                    return Err(invalid("empty placeholder name"));
                }
                if name.contains(['{', '}']) {
                    return Err(invalid("nested brace in placeholder name"));
                }
                if segments.contains(&Segment::Param(name.to_string())) {
                    return Err(invalid("duplicate placeholder name"));
                }
                segments.push(Segment::Param(name.to_string()));
            } else {
                if token.contains(['{', '}']) {
                    return Err(invalid("placeholder must span a whole segment"));
                }
                segments.push(Segment::Literal(token.to_string()));
            }
        }

        Ok(Self {
            raw: template.to_string(),
            segments,
        })
    }

    /// The template string as registered.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Names of the template's placeholders, in path order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match a concrete request path against this template.
    ///
    /// Returns bindings for exactly the template's placeholders when the
    /// path aligns segment-for-segment, `None` otherwise. Placeholders
    /// accept any non-empty token; extracted values are percent-decoded.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let rest = path.strip_prefix('/')?;
        let mut tokens: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };
        if tokens.last() == Some(&"") {
            tokens.pop();
        }
        if tokens.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, token) in self.segments.iter().zip(tokens) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != token {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if token.is_empty() {
                        return None;
                    }
                    let value = percent_decode_str(token).decode_utf8_lossy();
                    params.insert(name.clone(), value.into_owned());
                }
            }
        }
        Some(params)
    }

    /// Render a concrete path from bindings.
    ///
    /// `route` is the owning route's name, used to attribute errors. Every
    /// placeholder must have a binding; extra bindings are ignored. Pure:
    /// identical inputs always yield the identical path.
    pub fn render(&self, route: &str, params: &RouteParams) -> Result<String, RouteError> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }
        let mut out = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Literal(lit) => out.push_str(lit),
                Segment::Param(name) => {
                    let value = params.get(name).ok_or_else(|| RouteError::MissingParameter {
                        route: route.to_string(),
                        name: name.clone(),
                    })?;
                    out.extend(utf8_percent_encode(value, SEGMENT));
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> RouteParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_literal_and_params() {
        let tmpl = PathTemplate::parse("/posts/{ID}/comments").unwrap();
        assert_eq!(
            tmpl.segments,
            vec![
                Segment::Literal("posts".into()),
                Segment::Param("ID".into()),
                Segment::Literal("comments".into()),
            ]
        );
        assert_eq!(tmpl.param_names().collect::<Vec<_>>(), vec!["ID"]);
    }

    #[test]
    fn parse_rejects_malformed_templates() {
        for bad in [
            "posts",        // no leading slash
            "/posts/{ID",   // unterminated
            "/posts/{}",    // empty name
            "/posts/x{ID}", // brace inside literal
            "/a//b",        // empty segment
            "/{ID}/{ID}",   // duplicate placeholder
        ] {
            assert!(
                matches!(
                    PathTemplate::parse(bad),
                    Err(RouteError::InvalidTemplate { .. })
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn match_extracts_exactly_the_placeholders() {
        let tmpl = PathTemplate::parse("/posts/{ID}").unwrap();
        let got = tmpl.matches("/posts/42").unwrap();
        assert_eq!(got, params(&[("ID", "42")]));

        assert!(tmpl.matches("/posts").is_none());
        assert!(tmpl.matches("/posts/42/extra").is_none());
        assert!(tmpl.matches("/users/42").is_none());
    }

    #[test]
    fn match_tolerates_trailing_slash() {
        let tmpl = PathTemplate::parse("/posts").unwrap();
        assert!(tmpl.matches("/posts/").is_some());
        assert!(tmpl.matches("/posts").is_some());
    }

    #[test]
    fn render_substitutes_and_escapes() {
        let tmpl = PathTemplate::parse("/posts/{ID}").unwrap();
        assert_eq!(
            tmpl.render("post", &params(&[("ID", "42")])).unwrap(),
            "/posts/42"
        );
        assert_eq!(
            tmpl.render("post", &params(&[("ID", "a/b c")])).unwrap(),
            "/posts/a%2Fb%20c"
        );
    }

    #[test]
    fn render_ignores_extra_bindings() {
        let tmpl = PathTemplate::parse("/posts").unwrap();
        assert_eq!(
            tmpl.render("posts", &params(&[("ID", "9")])).unwrap(),
            "/posts"
        );
    }

    #[test]
    fn render_names_the_missing_variable() {
        let tmpl = PathTemplate::parse("/posts/{ID}").unwrap();
        match tmpl.render("post", &RouteParams::new()) {
            Err(RouteError::MissingParameter { route, name }) => {
                assert_eq!(route, "post");
                assert_eq!(name, "ID");
            }
            other => panic!("expected MissingParameter, got {other:?}"),
        }
    }

    #[test]
    fn escaped_values_round_trip_through_matching() {
        let tmpl = PathTemplate::parse("/posts/{ID}").unwrap();
        let bound = params(&[("ID", "a/b c%d")]);
        let path = tmpl.render("post", &bound).unwrap();
        assert_eq!(tmpl.matches(&path).unwrap(), bound);
    }
}
