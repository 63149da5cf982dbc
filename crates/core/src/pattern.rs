use std::fmt;

use crate::error::RouteError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

impl Segment {
    /// Lower ranks win when several patterns match the same path.
    fn rank(&self) -> u8 {
        match self {
            Segment::Static(_) => 0,
            Segment::Param(_) => 1,
            Segment::CatchAll(_) => 2,
        }
    }
}

/// A registered path template such as `/users/:id/orders` or `/files/*path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let rest = raw
            .strip_prefix('/')
            .ok_or_else(|| RouteError::invalid(raw, "must start with '/'"))?;
        if raw.contains('{') || raw.contains('}') {
            return Err(RouteError::invalid(raw, "braces are not allowed"));
        }

        let parts: Vec<&str> = rest.split('/').collect();
        let last = parts.len() - 1;
        let mut segments = Vec::with_capacity(parts.len());

        for (idx, part) in parts.into_iter().enumerate() {
            let segment = if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(RouteError::invalid(raw, "parameter name is empty"));
                }
                Segment::Param(name.to_string())
            } else if let Some(name) = part.strip_prefix('*') {
                if name.is_empty() {
                    return Err(RouteError::invalid(raw, "catch-all name is empty"));
                }
                if idx != last {
                    return Err(RouteError::invalid(
                        raw,
                        "catch-all must be the last segment",
                    ));
                }
                Segment::CatchAll(name.to_string())
            } else {
                Segment::Static(part.to_string())
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Structural match of a concrete path against this template.
    pub fn matches(&self, path: &str) -> bool {
        let Some(rest) = path.strip_prefix('/') else {
            return false;
        };
        let parts: Vec<&str> = rest.split('/').collect();

        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(expected) => {
                    if parts.get(idx) != Some(&expected.as_str()) {
                        return false;
                    }
                }
                Segment::Param(_) => match parts.get(idx) {
                    Some(value) if !value.is_empty() => {}
                    _ => return false,
                },
                Segment::CatchAll(_) => {
                    return parts.get(idx..).is_some_and(|tail| !tail.join("/").is_empty());
                }
            }
        }

        parts.len() == self.segments.len()
    }

    /// Per-segment ranks, compared lexicographically to pick the most specific match.
    pub fn specificity(&self) -> Vec<u8> {
        self.segments.iter().map(Segment::rank).collect()
    }

    /// True when every segment is a literal.
    pub fn is_literal(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Static(_)))
    }

    /// Whether the router would refuse to hold both patterns.
    ///
    /// Once the leading segments agree, a wildcard position must use the
    /// same kind and name in both patterns. A literal next to a wildcard is
    /// fine, the literal wins.
    pub fn conflicts_with(&self, other: &RoutePattern) -> bool {
        for (ours, theirs) in self.segments.iter().zip(&other.segments) {
            match (ours, theirs) {
                (Segment::Static(a), Segment::Static(b)) if a == b => {}
                (Segment::Param(a), Segment::Param(b)) if a == b => {}
                (Segment::CatchAll(a), Segment::CatchAll(b)) => return a != b,
                (Segment::Static(_), _) | (_, Segment::Static(_)) => return false,
                _ => return true,
            }
        }
        false
    }

    /// The pattern in axum's path syntax.
    pub fn to_axum_path(&self) -> String {
        self.render(|segment| match segment {
            Segment::Static(s) => s.clone(),
            Segment::Param(name) => format!("{{{name}}}"),
            Segment::CatchAll(name) => format!("{{*{name}}}"),
        })
    }

    fn render(&self, f: impl Fn(&Segment) -> String) -> String {
        let parts: Vec<String> = self.segments.iter().map(f).collect();
        format!("/{}", parts.join("/"))
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(raw: &str) -> RoutePattern {
        RoutePattern::parse(raw).unwrap()
    }

    #[test]
    fn test_parse_rejects_relative_pattern() {
        let err = RoutePattern::parse("items/:id").unwrap_err();
        assert!(matches!(err, RouteError::InvalidPattern { .. }));
    }

    #[test]
    fn test_parse_rejects_empty_param_name() {
        assert!(RoutePattern::parse("/items/:").is_err());
        assert!(RoutePattern::parse("/files/*").is_err());
    }

    #[test]
    fn test_parse_rejects_catch_all_in_middle() {
        let err = RoutePattern::parse("/files/*path/raw").unwrap_err();
        assert_eq!(
            err,
            RouteError::InvalidPattern {
                pattern: "/files/*path/raw".to_string(),
                reason: "catch-all must be the last segment",
            }
        );
    }

    #[test]
    fn test_parse_rejects_braces() {
        assert!(RoutePattern::parse("/items/{id}").is_err());
    }

    #[test]
    fn test_static_match() {
        let p = pattern("/health");
        assert!(p.matches("/health"));
        assert!(!p.matches("/health/"));
        assert!(!p.matches("/healthz"));
        assert!(!p.matches("health"));
    }

    #[test]
    fn test_root_match() {
        let p = pattern("/");
        assert!(p.matches("/"));
        assert!(!p.matches("/a"));
    }

    #[test]
    fn test_param_match() {
        let p = pattern("/users/:id/orders");
        assert!(p.matches("/users/42/orders"));
        assert!(p.matches("/users/alice/orders"));
        assert!(!p.matches("/users//orders"));
        assert!(!p.matches("/users/42"));
        assert!(!p.matches("/users/42/orders/7"));
    }

    #[test]
    fn test_param_matches_own_pattern_text() {
        let p = pattern("/users/:id/orders");
        assert!(p.matches(p.as_str()));
    }

    #[test]
    fn test_catch_all_match() {
        let p = pattern("/files/*path");
        assert!(p.matches("/files/a"));
        assert!(p.matches("/files/a/b/c.txt"));
        assert!(!p.matches("/files/"));
        assert!(!p.matches("/files"));
    }

    #[test]
    fn test_specificity_orders_static_first() {
        let fixed = pattern("/users/new");
        let param = pattern("/users/:id");
        let wild = pattern("/users/*rest");
        assert!(fixed.specificity() < param.specificity());
        assert!(param.specificity() < wild.specificity());
    }

    #[test]
    fn test_renamed_param_conflicts() {
        assert!(pattern("/a/:x/b").conflicts_with(&pattern("/a/:y/b")));
        assert!(pattern("/a/:x/b").conflicts_with(&pattern("/a/:y/c")));
        assert!(!pattern("/a/:x/b").conflicts_with(&pattern("/a/:x/c")));
    }

    #[test]
    fn test_param_and_catch_all_conflict() {
        assert!(pattern("/u/:id").conflicts_with(&pattern("/u/*rest")));
        assert!(pattern("/u/*rest").conflicts_with(&pattern("/u/:id/x")));
        assert!(!pattern("/u/:id").conflicts_with(&pattern("/u/:id/*rest")));
    }

    #[test]
    fn test_literal_never_conflicts_with_wildcard() {
        assert!(!pattern("/users/new").conflicts_with(&pattern("/users/:id")));
        assert!(!pattern("/files/*path").conflicts_with(&pattern("/files/readme")));
        assert!(!pattern("/a/:x").conflicts_with(&pattern("/b/*y")));
        assert!(!pattern("/u").conflicts_with(&pattern("/u/:id")));
    }

    #[test]
    fn test_is_literal() {
        assert!(pattern("/metrics").is_literal());
        assert!(pattern("/").is_literal());
        assert!(!pattern("/m/:x").is_literal());
        assert!(!pattern("/m/*x").is_literal());
    }

    #[test]
    fn test_to_axum_path() {
        assert_eq!(pattern("/items/:id").to_axum_path(), "/items/{id}");
        assert_eq!(
            pattern("/users/:user_id/files/*path").to_axum_path(),
            "/users/{user_id}/files/{*path}"
        );
        assert_eq!(pattern("/").to_axum_path(), "/");
    }
}
