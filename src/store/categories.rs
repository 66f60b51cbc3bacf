//! Category state store.
//!
//! Owns the category list, the current selection, and the loading/error
//! flags. Views never touch these fields directly; every mutation goes
//! through a store operation so the state stays testable without any UI or
//! network dependency. Synchronizing the selection with the query-string
//! location is the app layer's job (see `store::location`).

use crate::api::{Category, CategoryUpdate};

// ============================================================================
// Tab Filter
// ============================================================================

/// Sidebar tab: show everything or only favorites.
///
/// Pure client-side filtering of the already-fetched list; switching tabs
/// never refetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    All,
    Favorites,
}

impl Tab {
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            Tab::All => true,
            Tab::Favorites => category.favorite,
        }
    }
}

// ============================================================================
// Store
// ============================================================================

/// Shared category state: list, selection, loading/error flags, tab filter.
#[derive(Debug, Clone)]
pub struct CategoryStore {
    categories: Vec<Category>,
    selected: Option<String>,
    loading: bool,
    error: Option<String>,
    tab: Tab,
}

impl Default for CategoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryStore {
    /// A fresh store, in the loading state until the first fetch resolves.
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            selected: None,
            loading: true,
            error: None,
            tab: Tab::All,
        }
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Currently selected category id. May transiently reference an id
    /// absent from the list (e.g. hydrated from a link before the fetch
    /// resolves, or after a remote delete); that renders as no selection.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Name of the selected category, when the selection resolves against
    /// the current list.
    pub fn selected_name(&self) -> Option<&str> {
        let id = self.selected.as_deref()?;
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    /// Categories visible under the active tab, in fetch order.
    pub fn visible(&self) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| self.tab.matches(c))
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Mark the store loading ahead of a (re)fetch.
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a fetch result: success replaces the list wholesale; failure
    /// records the error and clears the list. Selection is left alone in
    /// both cases — a stale selection simply renders as nothing selected.
    pub fn apply_fetch(&mut self, result: Result<Vec<Category>, String>) {
        self.loading = false;
        match result {
            Ok(categories) => {
                self.error = None;
                self.categories = categories;
            }
            Err(error) => {
                tracing::warn!(error = %error, "Failed to fetch categories");
                self.error = Some(error);
                self.categories.clear();
            }
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Set or clear the selection. Does not validate against the list; see
    /// [`selected_id`](Self::selected_id).
    pub fn select(&mut self, id: Option<String>) {
        self.selected = id;
    }

    /// Optimistically flip a category's favorite flag, returning the full
    /// update payload for the remote `PUT` plus the pre-toggle value for a
    /// potential rollback. Returns `None` for an unknown id.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<(CategoryUpdate, bool)> {
        let category = self.categories.iter_mut().find(|c| c.id == id)?;
        let original = category.favorite;
        category.favorite = !original;
        Some((
            CategoryUpdate {
                id: category.id.clone(),
                name: category.name.clone(),
                favorite: category.favorite,
            },
            original,
        ))
    }

    /// Restore a favorite flag after a failed remote update.
    pub fn set_favorite(&mut self, id: &str, favorite: bool) {
        if let Some(category) = self.categories.iter_mut().find(|c| c.id == id) {
            category.favorite = favorite;
        }
    }

    /// Append a newly created category to the list.
    pub fn insert(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// Remove a category by id. Returns true if it was present. The caller
    /// is responsible for clearing the selection if it pointed here.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        self.categories.len() != before
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: &str, favorite: bool) -> Category {
        Category {
            id: id.to_string(),
            name: format!("Category {}", id),
            favorite,
        }
    }

    fn loaded_store(categories: Vec<Category>) -> CategoryStore {
        let mut store = CategoryStore::new();
        store.apply_fetch(Ok(categories));
        store
    }

    #[test]
    fn test_new_store_is_loading() {
        let store = CategoryStore::new();
        assert!(store.is_loading());
        assert!(store.error().is_none());
        assert!(store.categories().is_empty());
    }

    #[test]
    fn test_apply_fetch_replaces_list() {
        let mut store = loaded_store(vec![cat("a", false)]);
        assert!(!store.is_loading());
        assert_eq!(store.categories().len(), 1);

        store.apply_fetch(Ok(vec![cat("b", true), cat("c", false)]));
        assert_eq!(store.categories().len(), 2);
        assert_eq!(store.categories()[0].id, "b");
    }

    #[test]
    fn test_fetch_failure_sets_error_and_clears_list() {
        let mut store = loaded_store(vec![cat("a", false)]);
        store.apply_fetch(Err("boom".to_string()));
        assert_eq!(store.error(), Some("boom"));
        assert!(store.categories().is_empty());
        assert!(!store.is_loading());
    }

    #[test]
    fn test_favorites_tab_filters_exact_subset() {
        let mut store = loaded_store(vec![cat("a", true), cat("b", false), cat("c", true)]);

        store.set_tab(Tab::Favorites);
        let visible: Vec<&str> = store.visible().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(visible, vec!["a", "c"]);

        store.set_tab(Tab::All);
        assert_eq!(store.visible().len(), 3);
    }

    #[test]
    fn test_toggle_favorite_flips_immediately() {
        let mut store = loaded_store(vec![cat("a", false)]);
        let (update, original) = store.toggle_favorite("a").unwrap();

        // Flag flips locally before any network call happens.
        assert!(store.find("a").unwrap().favorite);
        assert!(update.favorite);
        assert_eq!(update.name, "Category a");
        assert!(!original);
    }

    #[test]
    fn test_toggle_favorite_unknown_id_is_noop() {
        let mut store = loaded_store(vec![cat("a", false)]);
        assert!(store.toggle_favorite("missing").is_none());
        assert!(!store.find("a").unwrap().favorite);
    }

    #[test]
    fn test_toggle_does_not_change_selection() {
        let mut store = loaded_store(vec![cat("a", false), cat("b", false)]);
        store.select(Some("b".to_string()));
        store.toggle_favorite("a");
        assert_eq!(store.selected_id(), Some("b"));
    }

    #[test]
    fn test_rollback_restores_original_flag() {
        let mut store = loaded_store(vec![cat("a", true)]);
        let (_, original) = store.toggle_favorite("a").unwrap();
        assert!(!store.find("a").unwrap().favorite);

        store.set_favorite("a", original);
        assert!(store.find("a").unwrap().favorite);
    }

    #[test]
    fn test_selected_name_missing_id_is_none() {
        let mut store = loaded_store(vec![cat("a", false)]);
        store.select(Some("ghost".to_string()));
        assert_eq!(store.selected_id(), Some("ghost"));
        assert_eq!(store.selected_name(), None);
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut store = loaded_store(vec![cat("a", false)]);
        assert!(store.remove("a"));
        assert!(!store.remove("a"));
        assert!(store.categories().is_empty());
    }
}
