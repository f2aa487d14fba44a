//! List query pipeline: filter, then sort, then paginate.
//!
//! All stages are pure and never fail on typed input. The order is fixed by
//! [`run`]: pagination always sees the filtered, sorted sequence, and
//! `total_count` is the post-filter count.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Category dimension an item belongs to (a movie's genre).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Borrowed sort key extracted from an item.
///
/// Values of different variants order by variant: text, then numbers, then
/// booleans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
}

impl SortValue<'_> {
    fn rank(&self) -> u8 {
        match self {
            Self::Text(_) => 0,
            Self::Number(_) => 1,
            Self::Bool(_) => 2,
        }
    }

    /// Total order used by [`sort`].
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// An item that can flow through the pipeline.
pub trait Record: Clone {
    /// Sortable columns of this item type.
    type Column: Copy + Eq + fmt::Debug;
    /// Boolean flags that can be toggled on an item.
    type Flag: Copy + fmt::Debug;

    fn id(&self) -> &str;

    /// Attribute matched by free-text search.
    fn search_text(&self) -> &str;

    /// Id of the item's category.
    fn category_id(&self) -> &str;

    fn sort_value(&self, column: Self::Column) -> SortValue<'_>;

    /// Flips `flag` on this item.
    fn toggle_flag(&mut self, flag: Self::Flag);
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortColumn<C> {
    pub column: C,
    pub direction: SortDirection,
}

impl<C: Copy + Eq> SortColumn<C> {
    #[must_use]
    pub fn asc(column: C) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn desc(column: C) -> Self {
        Self {
            column,
            direction: SortDirection::Desc,
        }
    }

    /// Header click: same column toggles direction, another column starts
    /// ascending.
    #[must_use]
    pub fn raise(self, column: C) -> Self {
        if self.column == column {
            Self {
                column,
                direction: self.direction.toggled(),
            }
        } else {
            Self::asc(column)
        }
    }

    /// Direction indicator for a header: only the active column has one.
    #[must_use]
    pub fn sort_icon(&self, column: C) -> Option<SortDirection> {
        (self.column == column).then_some(self.direction)
    }
}

/// Filter dimension. Search text and category selection exclude each other.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Filter {
    /// No filter: every item passes.
    #[default]
    All,
    /// Case-insensitive prefix match on the search attribute. Never empty.
    Search(String),
    /// Items whose category id equals this category's id.
    Category(Category),
}

/// Full list query: filter, sort, and page window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec<C> {
    filter: Filter,
    sort: SortColumn<C>,
    page: usize,
    page_size: usize,
}

impl<C: Copy + Eq> QuerySpec<C> {
    /// Unfiltered query on page 1.
    #[must_use]
    pub fn new(sort: SortColumn<C>, page_size: usize) -> Self {
        Self {
            filter: Filter::All,
            sort,
            page: 1,
            page_size,
        }
    }

    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Current search text, `""` when search is inactive.
    #[must_use]
    pub fn search_text(&self) -> &str {
        match &self.filter {
            Filter::Search(text) => text,
            _ => "",
        }
    }

    #[must_use]
    pub fn selected_category(&self) -> Option<&Category> {
        match &self.filter {
            Filter::Category(category) => Some(category),
            _ => None,
        }
    }

    #[must_use]
    pub fn sort(&self) -> SortColumn<C> {
        self.sort
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Selects a category (or all), clearing search and returning to page 1.
    pub fn select_category(&mut self, category: Option<Category>) {
        self.filter = category.map_or(Filter::All, Filter::Category);
        self.page = 1;
    }

    /// Sets search text, clearing the category and returning to page 1.
    /// Empty text removes the filter.
    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.filter = if text.is_empty() {
            Filter::All
        } else {
            Filter::Search(text)
        };
        self.page = 1;
    }

    pub fn set_sort(&mut self, column: C) {
        self.sort = self.sort.raise(column);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }
}

/// Result of running the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage<T> {
    /// Number of items that passed the filter, before pagination.
    pub total_count: usize,
    /// Items on the requested page.
    pub items: Vec<T>,
}

/// Keeps the items selected by `filter`, in input order.
pub fn filter<'a, T: Record>(items: &'a [T], filter: &Filter) -> Vec<&'a T> {
    match filter {
        Filter::All => items.iter().collect(),
        Filter::Search(text) => {
            let needle = text.to_lowercase();
            items
                .iter()
                .filter(|item| item.search_text().to_lowercase().starts_with(&needle))
                .collect()
        }
        Filter::Category(category) => items
            .iter()
            .filter(|item| item.category_id() == category.id)
            .collect(),
    }
}

/// Stable sort by `sort.column`; equal keys keep their input order in both
/// directions.
pub fn sort<T: Record>(items: &mut [&T], sort: SortColumn<T::Column>) {
    items.sort_by(|a, b| {
        let ord = a
            .sort_value(sort.column)
            .compare(&b.sort_value(sort.column));
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Slice `[(page-1)*page_size, page*page_size)` clipped to `items`.
///
/// Page 0, a zero page size, or a page past the end yield an empty slice.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Runs filter, sort, and paginate in that order.
pub fn run<T: Record>(items: &[T], spec: &QuerySpec<T::Column>) -> QueryPage<T> {
    let mut matched = filter(items, &spec.filter);
    sort(&mut matched, spec.sort);
    let total_count = matched.len();
    let page = paginate(&matched, spec.page, spec.page_size)
        .iter()
        .map(|item| (*item).clone())
        .collect();
    QueryPage {
        total_count,
        items: page,
    }
}

/// Number of pages needed for `total` items.
#[must_use]
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// Page numbers for a pager. Empty when everything fits on one page.
#[must_use]
pub fn page_numbers(total: usize, page_size: usize) -> Vec<usize> {
    let pages = page_count(total, page_size);
    if pages <= 1 {
        Vec::new()
    } else {
        (1..=pages).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum Col {
        Title,
        Stock,
    }

    #[derive(Debug, Clone, Copy)]
    pub enum Flag {
        Liked,
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Item {
        pub id: String,
        pub title: String,
        pub category: String,
        pub stock: u32,
        pub liked: bool,
    }

    impl Record for Item {
        type Column = Col;
        type Flag = Flag;

        fn id(&self) -> &str {
            &self.id
        }

        fn search_text(&self) -> &str {
            &self.title
        }

        fn category_id(&self) -> &str {
            &self.category
        }

        fn sort_value(&self, column: Col) -> SortValue<'_> {
            match column {
                Col::Title => SortValue::Text(&self.title),
                Col::Stock => SortValue::Number(f64::from(self.stock)),
            }
        }

        fn toggle_flag(&mut self, flag: Flag) {
            match flag {
                Flag::Liked => self.liked = !self.liked,
            }
        }
    }

    pub fn item(id: &str, title: &str, category: &str, stock: u32) -> Item {
        Item {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            stock,
            liked: false,
        }
    }

    pub fn five_movies() -> Vec<Item> {
        vec![
            item("1", "Terminator", "a", 6),
            item("2", "Airplane", "b", 7),
            item("3", "Die Hard", "a", 5),
            item("4", "Wedding Crashers", "b", 7),
            item("5", "Avengers", "a", 7),
        ]
    }

    fn titles(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn category_page_two_holds_third_title() {
        let mut spec = QuerySpec::new(SortColumn::asc(Col::Title), 2);
        spec.select_category(Some(Category::new("a", "Action")));
        spec.set_page(2);

        let page = run(&five_movies(), &spec);
        assert_eq!(page.total_count, 3);
        assert_eq!(titles(&page.items), vec!["Terminator"]);
    }

    #[test]
    fn search_is_case_insensitive_prefix() {
        let items = vec![
            item("1", "Spider-Man", "a", 1),
            item("2", "Speed", "a", 1),
            item("3", "Batman", "b", 1),
            item("4", "Inspector", "b", 1),
        ];
        let kept = filter(&items, &Filter::Search("sp".to_string()));
        let kept: Vec<&str> = kept.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(kept, vec!["Spider-Man", "Speed"]);
    }

    #[test]
    fn unfiltered_returns_everything_in_order() {
        let items = five_movies();
        let kept = filter(&items, &Filter::All);
        assert_eq!(kept.len(), items.len());
        assert!(kept.iter().zip(&items).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn descending_sort_keeps_ties_in_input_order() {
        let items = five_movies();
        let mut refs: Vec<&Item> = items.iter().collect();
        sort(&mut refs, SortColumn::desc(Col::Stock));
        let ids: Vec<&str> = refs.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4", "5", "1", "3"]);
    }

    #[test]
    fn paginate_clips_and_tolerates_out_of_range() {
        let seq = [1, 2, 3, 4, 5];
        assert_eq!(paginate(&seq, 1, 2), &[1, 2]);
        assert_eq!(paginate(&seq, 3, 2), &[5]);
        assert!(paginate(&seq, 4, 2).is_empty());
        assert!(paginate(&seq, 0, 2).is_empty());
        assert!(paginate(&seq, 1, 0).is_empty());
        assert!(paginate(&seq, usize::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn raise_toggles_same_column_and_resets_new_one() {
        let sort = SortColumn::asc(Col::Title);
        let toggled = sort.raise(Col::Title);
        assert_eq!(toggled.direction, SortDirection::Desc);
        assert_eq!(toggled.raise(Col::Title).direction, SortDirection::Asc);

        let other = toggled.raise(Col::Stock);
        assert_eq!(other, SortColumn::asc(Col::Stock));
        assert_eq!(other.sort_icon(Col::Stock), Some(SortDirection::Asc));
        assert_eq!(other.sort_icon(Col::Title), None);
    }

    #[test]
    fn search_after_category_clears_category_and_page() {
        let mut spec = QuerySpec::new(SortColumn::asc(Col::Title), 4);
        spec.select_category(Some(Category::new("b", "Comedy")));
        spec.set_page(3);
        spec.set_search("x");
        assert!(spec.selected_category().is_none());
        assert_eq!(spec.search_text(), "x");
        assert_eq!(spec.page(), 1);

        spec.select_category(None);
        assert_eq!(spec.filter(), &Filter::All);
        assert_eq!(spec.search_text(), "");
    }

    #[test]
    fn pager_hidden_for_single_page() {
        assert_eq!(page_count(9, 4), 3);
        assert_eq!(page_numbers(9, 4), vec![1, 2, 3]);
        assert!(page_numbers(4, 4).is_empty());
        assert!(page_numbers(0, 4).is_empty());
        assert_eq!(page_count(3, 0), 0);
    }

    #[test]
    fn mixed_sort_values_order_by_kind() {
        assert_eq!(
            SortValue::Text("z").compare(&SortValue::Number(0.0)),
            Ordering::Less
        );
        assert_eq!(
            SortValue::Bool(false).compare(&SortValue::Number(9.0)),
            Ordering::Greater
        );
    }

    fn arb_items() -> impl Strategy<Value = Vec<Item>> {
        prop::collection::vec(("[a-dA-D]{0,4}", "[ab]", 0u32..4), 0..24).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (title, cat, stock))| item(&i.to_string(), &title, &cat, stock))
                .collect()
        })
    }

    fn arb_filter() -> impl Strategy<Value = Filter> {
        prop_oneof![
            Just(Filter::All),
            "[a-dA-D]{1,2}".prop_map(Filter::Search),
            "[abc]".prop_map(|id| Filter::Category(Category::new(id, "x"))),
        ]
    }

    #[derive(Debug, Clone)]
    enum Command {
        Category(Option<String>),
        Search(String),
        Sort(bool),
        Page(usize),
    }

    fn arb_command() -> impl Strategy<Value = Command> {
        prop_oneof![
            prop::option::of("[ab]").prop_map(Command::Category),
            "[a-z]{0,2}".prop_map(Command::Search),
            any::<bool>().prop_map(Command::Sort),
            (1usize..6).prop_map(Command::Page),
        ]
    }

    proptest! {
        #[test]
        fn filter_never_grows(items in arb_items(), f in arb_filter()) {
            prop_assert!(filter(&items, &f).len() <= items.len());
        }

        #[test]
        fn sort_is_stable(items in arb_items(), desc in any::<bool>()) {
            let mut refs: Vec<&Item> = items.iter().collect();
            let column = SortColumn { column: Col::Stock, direction: if desc { SortDirection::Desc } else { SortDirection::Asc } };
            sort(&mut refs, column);
            for pair in refs.windows(2) {
                if pair[0].stock == pair[1].stock {
                    let a: usize = pair[0].id.parse().unwrap();
                    let b: usize = pair[1].id.parse().unwrap();
                    prop_assert!(a < b);
                }
            }
        }

        #[test]
        fn pages_never_exceed_page_size(len in 0usize..50, page in 1usize..20, size in 1usize..10) {
            let seq: Vec<usize> = (0..len).collect();
            let slice = paginate(&seq, page, size);
            prop_assert!(slice.len() <= size);
            if (page - 1) * size >= len {
                prop_assert!(slice.is_empty());
            }
        }

        #[test]
        fn search_and_category_never_coexist(commands in prop::collection::vec(arb_command(), 0..20)) {
            let mut spec = QuerySpec::new(SortColumn::asc(Col::Title), 3);
            for command in commands {
                match command {
                    Command::Category(id) => {
                        spec.select_category(id.map(|id| Category::new(id, "x")));
                        prop_assert_eq!(spec.page(), 1);
                    }
                    Command::Search(text) => {
                        spec.set_search(text);
                        prop_assert_eq!(spec.page(), 1);
                    }
                    Command::Sort(title) => spec.set_sort(if title { Col::Title } else { Col::Stock }),
                    Command::Page(n) => spec.set_page(n),
                }
                prop_assert!(spec.search_text().is_empty() || spec.selected_category().is_none());
            }
        }

        #[test]
        fn total_count_is_post_filter(items in arb_items(), f in arb_filter(), page in 1usize..5) {
            let mut spec = QuerySpec::new(SortColumn::asc(Col::Title), 3);
            match f {
                Filter::All => {}
                Filter::Search(text) => spec.set_search(text),
                Filter::Category(category) => spec.select_category(Some(category)),
            }
            spec.set_page(page);
            let result = run(&items, &spec);
            prop_assert_eq!(result.total_count, filter(&items, spec.filter()).len());
            prop_assert!(result.items.len() <= 3);
        }
    }
}
