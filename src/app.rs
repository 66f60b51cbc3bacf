//! Central application state.
//!
//! `App` owns the category store, the query-string location, and the post
//! list state machine. All network work runs on spawned tokio tasks that
//! report back through [`AppEvent`]s; the UI task is the only place state
//! is mutated, so no locks are involved.

use crate::api::{ApiClient, Category, CategoryInput, Post};
use crate::store::{CategoryStore, Location};
use std::borrow::Cow;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// How long a status-bar message stays visible.
const STATUS_TTL_SECS: u64 = 4;

// ============================================================================
// Focus and Overlays
// ============================================================================

/// Which panel has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Posts,
}

/// Modal overlay state. While set, input is routed to the overlay handler
/// instead of normal dispatch.
pub enum Overlay {
    /// Typing a name for a new category.
    NewCategory { input: String },
    /// Confirming deletion of a category.
    ConfirmDelete { category_id: String, name: String },
}

// ============================================================================
// Post List State Machine
// ============================================================================

/// Post panel state, driven purely by the selected category id.
///
/// Every selection change re-runs the full transition: prior posts and
/// count are cleared before the fetch is issued, and nothing is cached
/// across selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostsState {
    /// No category selected; prompt the user, fetch nothing.
    Idle,
    /// A fetch is in flight for this category.
    Loading { category_id: String },
    /// Posts for this category are displayed.
    Loaded {
        category_id: String,
        posts: Vec<Post>,
    },
    /// The fetch for this category failed.
    Failed { category_id: String, error: String },
}

// ============================================================================
// Background Task Events
// ============================================================================

/// Events from background tasks.
pub enum AppEvent {
    /// The category list fetch resolved.
    CategoriesLoaded(Result<Vec<Category>, String>),
    /// A post fetch resolved.
    ///
    /// `generation` is the counter value captured when the fetch was
    /// spawned; results whose generation no longer matches are stale and
    /// must be discarded (the user selected something else meanwhile).
    PostsLoaded {
        category_id: String,
        generation: u64,
        result: Result<Vec<Post>, String>,
    },
    /// The remote confirmed a favorite toggle.
    FavoriteToggled { category_id: String },
    /// The remote rejected a favorite toggle; roll back to `original`.
    FavoriteToggleFailed {
        category_id: String,
        original: bool,
        error: String,
    },
    /// A category was created on the server.
    CategoryCreated(Category),
    CategoryCreateFailed { name: String, error: String },
    /// A category was deleted on the server.
    CategoryDeleted { category_id: String, name: String },
    CategoryDeleteFailed { category_id: String, error: String },
}

// ============================================================================
// Application State
// ============================================================================

pub struct App {
    pub api: ApiClient,
    pub store: CategoryStore,
    pub location: Location,

    // Post list
    pub posts: PostsState,
    /// Generation counter for post fetches. Incremented on every spawn;
    /// stale responses are rejected by comparing against this.
    pub posts_generation: u64,
    /// Handle to the in-flight post fetch, aborted when a newer one starts.
    pub posts_fetch_handle: Option<tokio::task::JoinHandle<()>>,
    /// Scroll offset within the post panel.
    pub posts_scroll: u16,

    // UI state
    pub focus: Focus,
    /// Highlighted row within the sidebar's visible (tab-filtered) list.
    pub sidebar_cursor: usize,
    /// Whether the sidebar is shown. Narrow terminals hide it regardless.
    pub show_sidebar: bool,
    pub overlay: Option<Overlay>,

    /// Status message with expiry — Cow avoids allocation for static literals.
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders.
    pub needs_redraw: bool,
}

impl App {
    /// Build the app, hydrating the initial selection from the launch
    /// location's `category` parameter.
    pub fn new(api: ApiClient, location: Location) -> Self {
        let mut store = CategoryStore::new();
        let initial = location.category().map(str::to_string);
        store.select(initial);

        Self {
            api,
            store,
            location,
            posts: PostsState::Idle,
            posts_generation: 0,
            posts_fetch_handle: None,
            posts_scroll: 0,
            focus: Focus::Sidebar,
            sidebar_cursor: 0,
            show_sidebar: true,
            overlay: None,
            status_message: None,
            needs_redraw: true,
        }
    }

    // ------------------------------------------------------------------------
    // Status bar
    // ------------------------------------------------------------------------

    pub fn set_status(&mut self, message: impl Into<Cow<'static, str>>) {
        self.status_message = Some((message.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Drop an expired status message. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, since)) = &self.status_message {
            if since.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    // ------------------------------------------------------------------------
    // Selection (store + location + post fetch, kept in lockstep)
    // ------------------------------------------------------------------------

    /// Select a category (or clear the selection with `None`).
    ///
    /// Rewrites the location's `category` parameter and restarts the post
    /// state machine: `None` goes idle, `Some` clears prior posts and
    /// spawns a fresh fetch — including when switching between two
    /// non-null ids.
    pub fn select_category(&mut self, id: Option<String>, event_tx: &mpsc::Sender<AppEvent>) {
        self.store.select(id.clone());
        self.location.set_category(id.as_deref());
        self.posts_scroll = 0;
        tracing::debug!(link = %self.location, "Selection changed");

        match id {
            Some(id) => self.spawn_posts_fetch(id, event_tx),
            None => {
                // Abort any in-flight fetch; its result would be stale anyway.
                if let Some(handle) = self.posts_fetch_handle.take() {
                    handle.abort();
                }
                self.posts_generation = self.posts_generation.wrapping_add(1);
                self.posts = PostsState::Idle;
            }
        }
        self.needs_redraw = true;
    }

    /// Spawn a background post fetch for `category_id`, tagging it with a
    /// fresh generation so a late arrival from a previous selection can
    /// never overwrite this one's result.
    pub fn spawn_posts_fetch(&mut self, category_id: String, event_tx: &mpsc::Sender<AppEvent>) {
        if let Some(handle) = self.posts_fetch_handle.take() {
            handle.abort();
            tracing::debug!("Aborted previous post fetch task");
        }

        self.posts_generation = self.posts_generation.wrapping_add(1);
        let generation = self.posts_generation;
        self.posts = PostsState::Loading {
            category_id: category_id.clone(),
        };

        let api = self.api.clone();
        let tx = event_tx.clone();
        tracing::debug!(category_id = %category_id, generation, "Spawning post fetch");

        self.posts_fetch_handle = Some(tokio::spawn(async move {
            let result = api
                .list_posts(&category_id)
                .await
                .map_err(|e| e.to_string());
            let event = AppEvent::PostsLoaded {
                category_id,
                generation,
                result,
            };
            if let Err(e) = tx.send(event).await {
                tracing::warn!(error = %e, "Failed to send post fetch result (receiver dropped)");
            }
        }));
    }

    // ------------------------------------------------------------------------
    // Category fetch / mutation spawns
    // ------------------------------------------------------------------------

    /// Spawn the category list fetch. Called once at startup, and again on
    /// explicit user refresh.
    pub fn spawn_categories_fetch(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        self.store.begin_fetch();
        let api = self.api.clone();
        let tx = event_tx.clone();

        tokio::spawn(async move {
            let result = api.list_categories().await.map_err(|e| e.to_string());
            if let Err(e) = tx.send(AppEvent::CategoriesLoaded(result)).await {
                tracing::warn!(error = %e, "Failed to send category fetch result (receiver dropped)");
            }
        });
        self.needs_redraw = true;
    }

    /// Optimistically toggle a category's favorite flag, then confirm it
    /// remotely. The flag flips in the displayed list immediately; on
    /// remote failure the event handler rolls it back and surfaces the
    /// error (rollback policy documented in DESIGN.md).
    ///
    /// Never touches the selection — toggling is a separate affordance
    /// from selecting.
    pub fn toggle_favorite(&mut self, category_id: &str, event_tx: &mpsc::Sender<AppEvent>) {
        let Some((update, original)) = self.store.toggle_favorite(category_id) else {
            tracing::debug!(category_id = %category_id, "Ignoring favorite toggle for unknown id");
            return;
        };
        self.needs_redraw = true;

        let api = self.api.clone();
        let tx = event_tx.clone();
        let id = update.id.clone();

        tokio::spawn(async move {
            let event = match api.update_category(&id, &update).await {
                Ok(_) => AppEvent::FavoriteToggled { category_id: id },
                Err(e) => AppEvent::FavoriteToggleFailed {
                    category_id: id,
                    original,
                    error: e.to_string(),
                },
            };
            if let Err(e) = tx.send(event).await {
                tracing::warn!(error = %e, "Failed to send favorite toggle result (receiver dropped)");
            }
        });
    }

    /// Create a category on the server; the list is updated when the
    /// `CategoryCreated` event confirms it.
    pub fn create_category(&mut self, name: String, event_tx: &mpsc::Sender<AppEvent>) {
        let api = self.api.clone();
        let tx = event_tx.clone();
        let input = CategoryInput {
            name: name.clone(),
            favorite: false,
        };

        tokio::spawn(async move {
            let event = match api.create_category(&input).await {
                // A 204/empty body leaves us without the server-assigned id,
                // so there is nothing to insert locally.
                Ok(Some(category)) => AppEvent::CategoryCreated(category),
                Ok(None) => AppEvent::CategoryCreateFailed {
                    name,
                    error: "Server returned no category record".to_string(),
                },
                Err(e) => AppEvent::CategoryCreateFailed {
                    name,
                    error: e.to_string(),
                },
            };
            if let Err(e) = tx.send(event).await {
                tracing::warn!(error = %e, "Failed to send create result (receiver dropped)");
            }
        });
    }

    /// Delete a category on the server; removal from the list happens when
    /// the `CategoryDeleted` event confirms it.
    pub fn delete_category(&mut self, category_id: String, name: String, event_tx: &mpsc::Sender<AppEvent>) {
        let api = self.api.clone();
        let tx = event_tx.clone();

        tokio::spawn(async move {
            let event = match api.delete_category(&category_id).await {
                Ok(_) => AppEvent::CategoryDeleted { category_id, name },
                Err(e) => AppEvent::CategoryDeleteFailed {
                    category_id,
                    error: e.to_string(),
                },
            };
            if let Err(e) = tx.send(event).await {
                tracing::warn!(error = %e, "Failed to send delete result (receiver dropped)");
            }
        });
    }

    // ------------------------------------------------------------------------
    // Sidebar cursor helpers
    // ------------------------------------------------------------------------

    /// Clamp the sidebar cursor to the visible list. Call after any change
    /// to the list or the tab filter.
    pub fn clamp_sidebar_cursor(&mut self) {
        let len = self.store.visible().len();
        if len == 0 {
            self.sidebar_cursor = 0;
        } else if self.sidebar_cursor >= len {
            self.sidebar_cursor = len - 1;
        }
    }

    /// Id of the category under the sidebar cursor, if any.
    pub fn cursor_category_id(&self) -> Option<String> {
        self.store
            .visible()
            .get(self.sidebar_cursor)
            .map(|c| c.id.clone())
    }
}
