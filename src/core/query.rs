//! core::query
//!
//! Normalization of user input into a changeset query.
//!
//! The loader sends whatever token string it is given. Callers that take
//! input from people (pasted ids, changeset links) can run it through
//! [`ChangesetQuery::parse`] first to get a query made only of numeric ids.
//!
//! # Example
//!
//! ```
//! use changeset_loader::core::query::ChangesetQuery;
//!
//! let query = ChangesetQuery::parse(
//!     "123  https://www.openstreetmap.org/changeset/456",
//!     None,
//! )
//! .unwrap();
//! assert_eq!(query.as_query(), "123 456");
//! ```

use thiserror::Error;

/// Marker preceding the id in a changeset link.
const LINK_MARKER: &str = ".org/changeset/";

/// Default upper bound on ids in one query.
pub const DEFAULT_MAX_CHANGESETS: usize = 20;

/// Errors from query normalization.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("no changeset ids given")]
    Empty,

    #[error("invalid changeset id: {0}")]
    InvalidId(String),

    #[error("too many changesets: {count} given, at most {max} allowed")]
    TooMany { count: usize, max: usize },
}

/// A list of numeric changeset ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesetQuery {
    ids: Vec<String>,
}

impl ChangesetQuery {
    /// Parse whitespace-separated ids or changeset links.
    ///
    /// A token containing `.org/changeset/` after its first character is
    /// replaced by the text following that marker. Every resulting id must
    /// be non-empty ASCII digits. With `max` set, more ids than that is an
    /// error.
    pub fn parse(input: &str, max: Option<usize>) -> Result<Self, QueryError> {
        let ids = input
            .split_whitespace()
            .map(extract_id)
            .collect::<Result<Vec<_>, _>>()?;

        if ids.is_empty() {
            return Err(QueryError::Empty);
        }
        if let Some(max) = max {
            if ids.len() > max {
                return Err(QueryError::TooMany {
                    count: ids.len(),
                    max,
                });
            }
        }

        Ok(Self { ids })
    }

    /// The ids, in input order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// The ids joined by single spaces, ready to hand to the loader.
    pub fn as_query(&self) -> String {
        self.ids.join(" ")
    }
}

impl std::fmt::Display for ChangesetQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query())
    }
}

fn extract_id(token: &str) -> Result<String, QueryError> {
    let id = match token.find(LINK_MARKER) {
        Some(pos) if pos > 0 => &token[pos + LINK_MARKER.len()..],
        _ => token,
    };
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QueryError::InvalidId(id.to_string()));
    }
    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_ids() {
        let query = ChangesetQuery::parse("  1\t22\n333 ", None).unwrap();
        assert_eq!(query.ids(), ["1", "22", "333"]);
        assert_eq!(query.as_query(), "1 22 333");
        assert_eq!(query.to_string(), "1 22 333");
    }

    #[test]
    fn links_are_reduced_to_ids() {
        let query = ChangesetQuery::parse(
            "https://www.openstreetmap.org/changeset/42 http://osm.org/changeset/7",
            None,
        )
        .unwrap();
        assert_eq!(query.as_query(), "42 7");
    }

    #[test]
    fn marker_at_start_is_not_a_link() {
        let err = ChangesetQuery::parse(".org/changeset/5", None).unwrap_err();
        assert_eq!(err, QueryError::InvalidId(".org/changeset/5".into()));
    }

    #[test]
    fn non_numeric_rejected() {
        let err = ChangesetQuery::parse("12 abc", None).unwrap_err();
        assert_eq!(err, QueryError::InvalidId("abc".into()));

        let err =
            ChangesetQuery::parse("https://www.openstreetmap.org/changeset/9/", None).unwrap_err();
        assert_eq!(err, QueryError::InvalidId("9/".into()));
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(ChangesetQuery::parse("   ", None), Err(QueryError::Empty));
    }

    #[test]
    fn max_enforced() {
        assert!(ChangesetQuery::parse("1 2 3", Some(3)).is_ok());
        assert_eq!(
            ChangesetQuery::parse("1 2 3 4", Some(3)),
            Err(QueryError::TooMany { count: 4, max: 3 })
        );
    }

    #[test]
    fn error_display() {
        assert_eq!(
            QueryError::TooMany { count: 21, max: 20 }.to_string(),
            "too many changesets: 21 given, at most 20 allowed"
        );
        assert_eq!(QueryError::Empty.to_string(), "no changeset ids given");
    }
}
