//! Client-side state: the category store and the query-string location
//! adapter that mirrors the selection.

mod categories;
mod location;

pub use categories::{CategoryStore, Tab};
pub use location::{Location, CATEGORY_PARAM};
