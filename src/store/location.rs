//! Query-string location adapter.
//!
//! The app mirrors the current category selection into a link of the form
//! `/posts?category=<id>`, the same shape the hosted front-end for this
//! service uses. The link is what `--link` accepts at launch (hydrating the
//! initial selection) and what the `y` keybinding reports for the current
//! state.
//!
//! This adapter deliberately knows nothing about the category store; the
//! app layer keeps the two in sync so the store stays testable on its own.

use std::fmt;
use url::form_urlencoded;

/// Query parameter carrying the selected category id. Absence means no
/// selection.
pub const CATEGORY_PARAM: &str = "category";

/// An in-app location: a path plus an ordered list of query parameters.
///
/// Parameters other than `category` are preserved untouched across
/// selection changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    /// Parse a link like `/posts?category=c1&lang=en`.
    ///
    /// A missing or empty query yields no parameters. The path defaults to
    /// `/` when empty.
    pub fn parse(link: &str) -> Self {
        let (path, query_str) = match link.split_once('?') {
            Some((path, query)) => (path, query),
            None => (link, ""),
        };
        let path = if path.is_empty() { "/" } else { path };

        let query = form_urlencoded::parse(query_str.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Self {
            path: path.to_string(),
            query,
        }
    }

    /// The selected category id carried by this location, if any.
    pub fn category(&self) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == CATEGORY_PARAM)
            .map(|(_, v)| v.as_str())
    }

    /// Rewrite the `category` parameter: set it when `Some`, remove it when
    /// `None`. Other parameters keep their values and relative order; an
    /// existing `category` parameter keeps its position.
    pub fn set_category(&mut self, id: Option<&str>) {
        let existing = self.query.iter().position(|(k, _)| k == CATEGORY_PARAM);
        // Drop duplicates beyond the first occurrence either way.
        let mut seen = false;
        self.query.retain(|(k, _)| {
            if k == CATEGORY_PARAM {
                let keep = !seen && id.is_some();
                seen = true;
                keep
            } else {
                true
            }
        });

        if let Some(id) = id {
            match existing {
                Some(pos) if pos < self.query.len() && self.query[pos].0 == CATEGORY_PARAM => {
                    self.query[pos].1 = id.to_string();
                }
                _ => self.query.push((CATEGORY_PARAM.to_string(), id.to_string())),
            }
        }
    }
}

impl fmt::Display for Location {
    /// Serialize back to a link, percent-encoding parameter values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        if self.query.is_empty() {
            return Ok(());
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in &self.query {
            serializer.append_pair(k, v);
        }
        write!(f, "?{}", serializer.finish())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_plain_path() {
        let loc = Location::parse("/posts");
        assert_eq!(loc.category(), None);
        assert_eq!(loc.to_string(), "/posts");
    }

    #[test]
    fn test_parse_hydrates_selection() {
        let loc = Location::parse("/posts?category=abc");
        assert_eq!(loc.category(), Some("abc"));
    }

    #[test]
    fn test_set_category_adds_param() {
        let mut loc = Location::parse("/posts");
        loc.set_category(Some("abc"));
        assert_eq!(loc.to_string(), "/posts?category=abc");
    }

    #[test]
    fn test_set_category_none_removes_param() {
        let mut loc = Location::parse("/posts?category=abc");
        loc.set_category(None);
        assert_eq!(loc.category(), None);
        assert_eq!(loc.to_string(), "/posts");
    }

    #[test]
    fn test_set_category_preserves_other_params() {
        let mut loc = Location::parse("/posts?lang=en&category=old&page=2");
        loc.set_category(Some("new"));
        assert_eq!(loc.to_string(), "/posts?lang=en&category=new&page=2");

        loc.set_category(None);
        assert_eq!(loc.to_string(), "/posts?lang=en&page=2");
    }

    #[test]
    fn test_set_category_collapses_duplicates() {
        let mut loc = Location::parse("/posts?category=a&category=b");
        loc.set_category(Some("c"));
        assert_eq!(loc.to_string(), "/posts?category=c");
    }

    #[test]
    fn test_roundtrip_encodes_values() {
        let mut loc = Location::parse("/posts");
        loc.set_category(Some("a b&c"));
        assert_eq!(loc.category(), Some("a b&c"));
        let link = loc.to_string();
        assert_eq!(Location::parse(&link), loc);
    }

    #[test]
    fn test_empty_link_defaults_to_root() {
        let loc = Location::parse("");
        assert_eq!(loc.to_string(), "/");
    }
}
