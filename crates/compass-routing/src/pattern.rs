//! Path template compilation and matching
//!
//! A template is a sequence of `/`-separated segments. A segment
//! starting with `:` captures exactly one non-empty path segment under
//! its name; everything else matches literally. Matching is anchored
//! and case-sensitive. Callers supply already-decoded paths.

use std::collections::BTreeMap;

use crate::error::RouteError;
use crate::Result;

/// Parameters extracted from a matched path, keyed by the `:name`
/// segments of the template.
pub type ParamMap = BTreeMap<String, String>;

/// The catch-all template. It matches every path with an empty
/// [`ParamMap`] and may serve only as the fallback route.
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// An anchored matcher compiled once from a path template.
#[derive(Debug, Clone)]
pub struct Pattern {
    template: String,
    segments: Vec<Segment>,
    wildcard: bool,
}

impl Pattern {
    /// Compile a template such as `/profile/:id` into a matcher.
    pub fn compile(template: &str) -> Result<Self> {
        if template == WILDCARD {
            return Ok(Self {
                template: template.to_string(),
                segments: Vec::new(),
                wildcard: true,
            });
        }

        if !template.starts_with('/') {
            return Err(invalid(template, "must start with '/' or be the wildcard"));
        }

        let mut segments = Vec::new();
        let mut param_names: Vec<&str> = Vec::new();

        for raw in template[1..].split('/') {
            match raw.strip_prefix(':') {
                Some(name) => {
                    if name.is_empty() {
                        return Err(invalid(template, "empty parameter name"));
                    }
                    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                        return Err(invalid(
                            template,
                            "parameter names may only contain letters, digits and underscores",
                        ));
                    }
                    if param_names.contains(&name) {
                        return Err(invalid(template, "duplicate parameter name"));
                    }
                    param_names.push(name);
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Literal(raw.to_string())),
            }
        }

        Ok(Self {
            template: template.to_string(),
            segments,
            wildcard: false,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Test a concrete path against this pattern.
    ///
    /// Returns the extracted parameters on a match, `None` otherwise.
    /// The whole path must match; prefixes never do.
    pub fn matches(&self, path: &str) -> Option<ParamMap> {
        if self.wildcard {
            return Some(ParamMap::new());
        }

        let rest = path.strip_prefix('/')?;
        let parts: Vec<&str> = rest.split('/').collect();

        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = ParamMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), part.to_string());
                }
            }
        }

        Some(params)
    }

    /// Substitute parameters back into the template, producing a
    /// concrete path for named navigation. Extra parameters are
    /// ignored; missing ones fail.
    pub fn expand(&self, params: &ParamMap) -> Result<String> {
        debug_assert!(!self.wildcard, "the fallback has no concrete path");

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Param(name) => match params.get(name) {
                    Some(value) => path.push_str(value),
                    None => {
                        return Err(RouteError::MissingParam {
                            template: self.template.clone(),
                            param: name.clone(),
                        })
                    }
                },
            }
        }

        Ok(path)
    }
}

fn invalid(template: &str, reason: &str) -> RouteError {
    RouteError::InvalidTemplate {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ParamMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_literal_match() {
        let pattern = Pattern::compile("/about").unwrap();
        assert_eq!(pattern.matches("/about"), Some(ParamMap::new()));
        assert_eq!(pattern.matches("/about/us"), None);
        assert_eq!(pattern.matches("/abou"), None);
        // Case-sensitive
        assert_eq!(pattern.matches("/About"), None);
    }

    #[test]
    fn test_root_match() {
        let pattern = Pattern::compile("/").unwrap();
        assert_eq!(pattern.matches("/"), Some(ParamMap::new()));
        assert_eq!(pattern.matches("/home"), None);
    }

    #[test]
    fn test_param_extraction() {
        let pattern = Pattern::compile("/profile/:id").unwrap();
        assert_eq!(
            pattern.matches("/profile/9"),
            Some(params(&[("id", "9")]))
        );
        // A parameter matches exactly one segment
        assert_eq!(pattern.matches("/profile/9/edit"), None);
        assert_eq!(pattern.matches("/profile"), None);
        // Empty segments don't satisfy a parameter
        assert_eq!(pattern.matches("/profile/"), None);
    }

    #[test]
    fn test_multiple_params() {
        let pattern = Pattern::compile("/users/:user/posts/:post").unwrap();
        assert_eq!(
            pattern.matches("/users/ada/posts/42"),
            Some(params(&[("user", "ada"), ("post", "42")]))
        );
        assert_eq!(pattern.matches("/users/ada/comments/42"), None);
    }

    #[test]
    fn test_wildcard() {
        let pattern = Pattern::compile(WILDCARD).unwrap();
        assert!(pattern.is_wildcard());
        assert_eq!(pattern.matches("/anything"), Some(ParamMap::new()));
        assert_eq!(pattern.matches("/a/b/c"), Some(ParamMap::new()));
    }

    #[test]
    fn test_invalid_templates() {
        assert!(Pattern::compile("profile/:id").is_err());
        assert!(Pattern::compile("/profile/:").is_err());
        assert!(Pattern::compile("/profile/:user-id").is_err());
        // Duplicate parameter names are rejected at compile time
        assert!(Pattern::compile("/pair/:id/:id").is_err());
    }

    #[test]
    fn test_expand() {
        let pattern = Pattern::compile("/profile/:id").unwrap();
        assert_eq!(pattern.expand(&params(&[("id", "7")])).unwrap(), "/profile/7");
        // Extra parameters are ignored
        assert_eq!(
            pattern
                .expand(&params(&[("id", "7"), ("tab", "posts")]))
                .unwrap(),
            "/profile/7"
        );
        assert!(matches!(
            pattern.expand(&ParamMap::new()),
            Err(RouteError::MissingParam { .. })
        ));
    }

    #[test]
    fn test_expand_root() {
        let pattern = Pattern::compile("/").unwrap();
        assert_eq!(pattern.expand(&ParamMap::new()).unwrap(), "/");
    }
}
