//! Application event handling.
//!
//! Processes background task completion events: category and post fetch
//! results, favorite toggle confirmations/rollbacks, and category
//! create/delete outcomes.

use crate::app::{App, AppEvent, PostsState};

/// Apply one background task event to the app state.
///
/// Post fetch results carry a generation tag; anything that does not match
/// the current generation belongs to an abandoned selection and is dropped
/// on the floor, so out-of-order resolution can never show the wrong
/// category's posts.
pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::CategoriesLoaded(result) => {
            let count = result.as_ref().map(Vec::len).unwrap_or(0);
            app.store.apply_fetch(result);
            app.clamp_sidebar_cursor();
            tracing::debug!(count, error = app.store.error().is_some(), "Categories loaded");
        }

        AppEvent::PostsLoaded {
            category_id,
            generation,
            result,
        } => {
            if generation != app.posts_generation {
                tracing::debug!(
                    category_id = %category_id,
                    generation,
                    current = app.posts_generation,
                    "Discarding stale post fetch result"
                );
                return;
            }
            // Belt and suspenders: the generation bump on every selection
            // change already guarantees this matches.
            if app.store.selected_id() != Some(category_id.as_str()) {
                tracing::debug!(category_id = %category_id, "Discarding post result for deselected category");
                return;
            }
            app.posts = match result {
                Ok(posts) => {
                    tracing::debug!(category_id = %category_id, count = posts.len(), "Posts loaded");
                    PostsState::Loaded { category_id, posts }
                }
                Err(error) => {
                    tracing::warn!(category_id = %category_id, error = %error, "Post fetch failed");
                    PostsState::Failed { category_id, error }
                }
            };
            app.posts_fetch_handle = None;
        }

        AppEvent::FavoriteToggled { category_id } => {
            tracing::debug!(category_id = %category_id, "Favorite toggle confirmed by server");
        }

        AppEvent::FavoriteToggleFailed {
            category_id,
            original,
            error,
        } => {
            // Rollback policy: revert the optimistic flip and tell the user.
            app.store.set_favorite(&category_id, original);
            tracing::warn!(category_id = %category_id, error = %error, "Favorite toggle failed, rolled back");
            app.set_status(format!("Failed to update favorite: {}", error));
        }

        AppEvent::CategoryCreated(category) => {
            app.set_status(format!("Created category \"{}\"", category.name));
            app.store.insert(category);
            app.clamp_sidebar_cursor();
        }

        AppEvent::CategoryCreateFailed { name, error } => {
            tracing::warn!(name = %name, error = %error, "Category create failed");
            app.set_status(format!("Failed to create \"{}\": {}", name, error));
        }

        AppEvent::CategoryDeleted { category_id, name } => {
            app.store.remove(&category_id);
            app.clamp_sidebar_cursor();
            // Deleting the selected category clears the selection (and the
            // `category` query parameter with it).
            if app.store.selected_id() == Some(category_id.as_str()) {
                app.store.select(None);
                app.location.set_category(None);
                app.posts = PostsState::Idle;
                app.posts_generation = app.posts_generation.wrapping_add(1);
            }
            app.set_status(format!("Deleted category \"{}\"", name));
        }

        AppEvent::CategoryDeleteFailed { category_id, error } => {
            tracing::warn!(category_id = %category_id, error = %error, "Category delete failed");
            app.set_status(format!("Failed to delete category: {}", error));
        }
    }
}
