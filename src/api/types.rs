use serde::{Deserialize, Serialize};

// ============================================================================
// Wire Types
// ============================================================================

/// A category as returned by the remote service.
///
/// Categories are replaced wholesale on every list fetch; only the
/// `favorite` flag is mutated client-side (optimistically, confirmed or
/// rolled back by the `PUT /categories/{id}` response).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub favorite: bool,
}

/// Request body for `POST /categories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub favorite: bool,
}

/// Request body for `PUT /categories/{id}`.
///
/// The service expects the full record, so updates echo the current `name`
/// alongside the changed `favorite` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub id: String,
    pub name: String,
    pub favorite: bool,
}

/// A post as returned by `GET /posts?category={id}`.
///
/// Read-only from the client's perspective. `date` is an ISO-8601 string
/// kept verbatim; display formatting parses it leniently (see
/// `ui::posts::format_readable_date`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub description: String,
    pub date: String,
    /// Ordered category ids this post is tagged with. May reference
    /// categories absent from the current list; those render without a name.
    pub categories: Vec<String>,
}

// ============================================================================
// Tests
// ============================================================================
