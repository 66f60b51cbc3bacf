//! Terminal user interface.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling (browse mode and overlays)
//! - `events` - Background task event processing
//! - `render` - View rendering dispatch and overlays
//! - `sidebar` - Category sidebar widget
//! - `posts` - Post list widget
//! - `status` - Status bar widget

mod events;
mod input;
mod loop_runner;
mod posts;
mod render;
mod sidebar;
mod status;

pub use events::handle_app_event;
pub use loop_runner::{run, Action};
pub use posts::format_readable_date;
