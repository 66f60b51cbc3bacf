//! bulletin — browse a posts & categories service from the terminal.
//!
//! A sidebar lists categories (with an all/favorites tab filter and a
//! favorite toggle); the main panel lists posts for the selected category.
//! The selection is mirrored into a query-string link (`/posts?category=…`)
//! so a session can be launched pointing at a specific category.

pub mod api;
pub mod app;
pub mod config;
pub mod store;
pub mod ui;
