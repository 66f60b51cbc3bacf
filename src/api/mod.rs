//! Client for the remote posts/categories HTTP API.

mod client;
mod types;

pub use client::{ApiClient, ApiError};
pub use types::{Category, CategoryInput, CategoryUpdate, Post};
