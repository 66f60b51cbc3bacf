//! HTTP client for the posts/categories service.
//!
//! Every operation issues exactly one request: no retries, no per-request
//! timeout, no caching. Responses are handled in three tiers:
//!
//! - non-2xx status → [`ApiError::Status`] carrying the status code and the
//!   response body text,
//! - `204 No Content` or a zero-length body → a successful empty result
//!   (no parse attempted),
//! - anything else → parsed as JSON, with parse failures reported as
//!   [`ApiError::Parse`] (distinct from an HTTP failure).

use crate::api::types::{Category, CategoryInput, CategoryUpdate, Post};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// Error Types
// ============================================================================

/// Errors produced by API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with a non-2xx status code. Carries the body text so
    /// the UI can surface whatever the server said.
    #[error("API call failed: status {status}, response: {body}")]
    Status { status: u16, body: String },
    /// The response body was present but not valid JSON for the expected type.
    #[error("Failed to parse JSON response from {endpoint}: {source}")]
    Parse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// The configured base URL cannot carry path segments (e.g. `data:`).
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

// ============================================================================
// Client
// ============================================================================

/// Thin wrapper around [`reqwest::Client`] bound to one service base URL.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for the service at `base`.
    ///
    /// Rejects cannot-be-a-base URLs up front so endpoint construction is
    /// infallible afterwards.
    pub fn new(http: reqwest::Client, base: Url) -> Result<Self, ApiError> {
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base.to_string()));
        }
        Ok(Self { http, base })
    }

    /// Base URL this client talks to (for logging and status display).
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        {
            // Infallible: cannot-be-a-base URLs are rejected in `new`.
            let mut path = url
                .path_segments_mut()
                .expect("base URL validated at construction");
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        url
    }

    /// Issue one request and decode the response per the tiers documented
    /// at module level. `Ok(None)` means a successful empty response.
    async fn request<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let endpoint = url.path().to_string();
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        if status == StatusCode::NO_CONTENT || text.is_empty() {
            tracing::debug!(%method, endpoint = %endpoint, "API success: empty response");
            return Ok(None);
        }

        match serde_json::from_str(&text) {
            Ok(data) => {
                tracing::debug!(%method, endpoint = %endpoint, "API success: received data");
                Ok(Some(data))
            }
            Err(source) => {
                tracing::error!(%method, endpoint = %endpoint, error = %source, "Failed to parse API response");
                Err(ApiError::Parse { endpoint, source })
            }
        }
    }

    // ------------------------------------------------------------------------
    // Category operations
    // ------------------------------------------------------------------------

    /// `GET /categories` — the full category list. An empty response body
    /// is treated as an empty list.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.endpoint(&["categories"]);
        self.request::<Vec<Category>, ()>(Method::GET, url, None)
            .await
            .map(Option::unwrap_or_default)
    }

    /// `GET /categories/{id}` — one category, or `None` on an empty response.
    pub async fn get_category(&self, id: &str) -> Result<Option<Category>, ApiError> {
        let url = self.endpoint(&["categories", id]);
        self.request::<Category, ()>(Method::GET, url, None).await
    }

    /// `POST /categories` — create a category.
    pub async fn create_category(
        &self,
        input: &CategoryInput,
    ) -> Result<Option<Category>, ApiError> {
        let url = self.endpoint(&["categories"]);
        self.request(Method::POST, url, Some(input)).await
    }

    /// `PUT /categories/{id}` — replace a category record. Used by the
    /// favorite toggle, which sends the full record with the flag flipped.
    pub async fn update_category(
        &self,
        id: &str,
        update: &CategoryUpdate,
    ) -> Result<Option<Category>, ApiError> {
        let url = self.endpoint(&["categories", id]);
        self.request(Method::PUT, url, Some(update)).await
    }

    /// `DELETE /categories/{id}` — delete a category. Servers commonly
    /// answer 204 here, which resolves to `Ok(None)`.
    pub async fn delete_category(&self, id: &str) -> Result<Option<Category>, ApiError> {
        let url = self.endpoint(&["categories", id]);
        self.request::<Category, ()>(Method::DELETE, url, None)
            .await
    }

    // ------------------------------------------------------------------------
    // Post operations
    // ------------------------------------------------------------------------

    /// `GET /posts?category={id}` — posts tagged with the given category.
    pub async fn list_posts(&self, category_id: &str) -> Result<Vec<Post>, ApiError> {
        let mut url = self.endpoint(&["posts"]);
        url.query_pairs_mut().append_pair("category", category_id);
        self.request::<Vec<Post>, ()>(Method::GET, url, None)
            .await
            .map(Option::unwrap_or_default)
    }
}

// ============================================================================
// Tests
// ============================================================================
