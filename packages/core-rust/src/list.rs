//! List view controller: owns a collection and a [`QuerySpec`], and keeps the
//! derived page in sync after every command.
//!
//! The collection is shared through an `Arc`. Mutating commands go through
//! `Arc::make_mut`, so holders of an earlier reference never observe the
//! change.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::query::{self, Category, QuerySpec, Record, SortColumn};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 4;

/// List settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    /// Rows per page. Must be positive.
    pub page_size: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPageSize`] for a zero page size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize {
                page_size: self.page_size,
            });
        }
        Ok(())
    }
}

/// Page snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T, C> {
    /// Items on the current page.
    pub items: Vec<T>,
    /// Items matching the filter, across all pages.
    pub total_count: usize,
    /// Pager entries; empty when a single page suffices.
    pub pages: Vec<usize>,
    pub query: QuerySpec<C>,
}

/// What the list renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ListView<T, C> {
    /// The underlying collection has no items at all.
    Empty,
    /// The collection is non-empty; the page may still be empty after filtering.
    Page(ListPage<T, C>),
}

impl<T, C> ListView<T, C> {
    #[must_use]
    pub fn page(&self) -> Option<&ListPage<T, C>> {
        match self {
            Self::Empty => None,
            Self::Page(page) => Some(page),
        }
    }
}

/// Drives a list screen over a collection of `T`.
#[derive(Debug)]
pub struct ListViewController<T: Record> {
    items: Arc<Vec<T>>,
    spec: QuerySpec<T::Column>,
    view: ListView<T, T::Column>,
}

impl<T: Record> ListViewController<T> {
    /// Creates a controller over `items`, unfiltered, on page 1.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPageSize`] if `config.page_size` is zero.
    pub fn new(
        items: impl Into<Arc<Vec<T>>>,
        sort: SortColumn<T::Column>,
        config: ListConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut controller = Self {
            items: items.into(),
            spec: QuerySpec::new(sort, config.page_size),
            view: ListView::Empty,
        };
        controller.refresh();
        Ok(controller)
    }

    /// Current shared collection reference.
    #[must_use]
    pub fn items(&self) -> &Arc<Vec<T>> {
        &self.items
    }

    #[must_use]
    pub fn query(&self) -> &QuerySpec<T::Column> {
        &self.spec
    }

    /// Derived view for the current collection and query.
    #[must_use]
    pub fn view(&self) -> &ListView<T, T::Column> {
        &self.view
    }

    /// Replaces the collection, e.g. after a re-fetch.
    pub fn set_items(&mut self, items: impl Into<Arc<Vec<T>>>) {
        self.items = items.into();
        self.refresh();
    }

    /// Filters by `category` (or shows all), clearing any search text.
    pub fn select_category(&mut self, category: Option<Category>) {
        self.spec.select_category(category);
        self.refresh();
    }

    /// Filters by search text, clearing any category.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.spec.set_search(text);
        self.refresh();
    }

    /// Sorts by `column`, toggling direction if it is already active.
    pub fn set_sort(&mut self, column: T::Column) {
        self.spec.set_sort(column);
        self.refresh();
    }

    /// Moves to page `page`. Pages past the end render empty.
    pub fn set_page(&mut self, page: usize) {
        self.spec.set_page(page);
        self.refresh();
    }

    /// Removes the item with `id`. Returns `false` if no such item exists.
    pub fn delete_item(&mut self, id: &str) -> bool {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            return false;
        };
        Arc::make_mut(&mut self.items).remove(index);
        self.refresh();
        true
    }

    /// Flips `flag` on the item with `id`. Returns `false` if no such item exists.
    pub fn toggle_flag(&mut self, id: &str, flag: T::Flag) -> bool {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            return false;
        };
        Arc::make_mut(&mut self.items)[index].toggle_flag(flag);
        self.refresh();
        true
    }

    fn refresh(&mut self) {
        if self.items.is_empty() {
            self.view = ListView::Empty;
            return;
        }
        let result = query::run(self.items.as_slice(), &self.spec);
        debug!(
            total_count = result.total_count,
            page = self.spec.page(),
            shown = result.items.len(),
            "list refreshed"
        );
        self.view = ListView::Page(ListPage {
            pages: query::page_numbers(result.total_count, self.spec.page_size()),
            items: result.items,
            total_count: result.total_count,
            query: self.spec.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::tests::{five_movies, item, Col, Flag, Item};
    use crate::query::SortDirection;

    fn controller(items: Vec<Item>, page_size: usize) -> ListViewController<Item> {
        ListViewController::new(items, SortColumn::asc(Col::Title), ListConfig { page_size }).unwrap()
    }

    fn page_titles(c: &ListViewController<Item>) -> Vec<String> {
        c.view()
            .page()
            .expect("non-empty")
            .items
            .iter()
            .map(|i| i.title.clone())
            .collect()
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = ListViewController::new(five_movies(), SortColumn::asc(Col::Title), ListConfig { page_size: 0 })
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPageSize { page_size: 0 }));
    }

    #[test]
    fn empty_collection_short_circuits() {
        let c = controller(Vec::new(), 4);
        assert_eq!(c.view(), &ListView::Empty);
    }

    #[test]
    fn initial_view_is_first_sorted_page() {
        let c = controller(five_movies(), 2);
        assert_eq!(page_titles(&c), vec!["Airplane", "Avengers"]);
        let page = c.view().page().unwrap();
        assert_eq!(page.total_count, 5);
        assert_eq!(page.pages, vec![1, 2, 3]);
    }

    #[test]
    fn category_then_page_two() {
        let mut c = controller(five_movies(), 2);
        c.select_category(Some(Category::new("a", "Action")));
        c.set_page(2);
        assert_eq!(page_titles(&c), vec!["Terminator"]);
        assert_eq!(c.view().page().unwrap().total_count, 3);
    }

    #[test]
    fn search_resets_category_and_page() {
        let mut c = controller(five_movies(), 2);
        c.select_category(Some(Category::new("b", "Comedy")));
        c.set_page(2);
        c.set_search("x");
        assert!(c.query().selected_category().is_none());
        assert_eq!(c.query().page(), 1);
        let page = c.view().page().unwrap();
        assert_eq!(page.total_count, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn sort_toggles_on_repeat() {
        let mut c = controller(five_movies(), 5);
        c.set_sort(Col::Title);
        assert_eq!(c.query().sort().direction, SortDirection::Desc);
        assert_eq!(page_titles(&c)[0], "Wedding Crashers");
        c.set_sort(Col::Stock);
        assert_eq!(c.query().sort(), SortColumn::asc(Col::Stock));
    }

    #[test]
    fn out_of_range_page_renders_empty_page() {
        let mut c = controller(five_movies(), 2);
        c.set_page(9);
        let page = c.view().page().unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 5);
    }

    #[test]
    fn delete_is_copy_on_write() {
        let mut c = controller(five_movies(), 10);
        let before = Arc::clone(c.items());
        assert!(c.delete_item("3"));
        assert_eq!(before.len(), 5);
        assert_eq!(c.items().len(), 4);
        assert!(!Arc::ptr_eq(&before, c.items()));
        assert!(!c.delete_item("3"));
    }

    #[test]
    fn toggle_is_copy_on_write() {
        let mut c = controller(five_movies(), 10);
        let before = Arc::clone(c.items());
        assert!(c.toggle_flag("1", Flag::Liked));
        assert!(!before.iter().find(|i| i.id == "1").unwrap().liked);
        assert!(c.items().iter().find(|i| i.id == "1").unwrap().liked);
        assert!(!c.toggle_flag("missing", Flag::Liked));
    }

    #[test]
    fn deleting_last_item_shows_empty_state() {
        let mut c = controller(vec![item("1", "Solo", "a", 1)], 4);
        c.delete_item("1");
        assert_eq!(c.view(), &ListView::Empty);
    }

    #[test]
    fn view_serializes_with_state_tag() {
        let c = controller(Vec::new(), 4);
        assert_eq!(
            serde_json::to_value(c.view()).unwrap(),
            serde_json::json!({ "state": "empty" })
        );
    }
}
