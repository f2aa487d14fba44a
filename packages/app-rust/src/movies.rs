//! Movies list screen: genre sidebar, search box, sortable table, pager.

use serde::Serialize;
use tracing::{debug, info};
use vidly_core::{ConfigError, ListView, ListViewController, QuerySpec};

use crate::config::AppConfig;
use crate::error::{AppError, SourceError};
use crate::model::{Genre, Movie, MovieColumn, MovieFlag};
use crate::traits::DataSource;

/// Label of the sidebar entry that clears the genre filter.
pub const ALL_GENRES: &str = "All Genres";

/// One entry of the genre sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreOption {
    /// `None` for the "All Genres" entry.
    pub id: Option<String>,
    pub name: String,
    pub active: bool,
}

#[derive(Debug)]
pub struct MoviesList {
    genres: Vec<Genre>,
    list: ListViewController<Movie>,
}

impl MoviesList {
    /// Fetches movies and genres and opens the list on page 1, unfiltered.
    ///
    /// # Errors
    ///
    /// Propagates source failures and an invalid page size.
    pub async fn load(
        movies: &dyn DataSource<Movie>,
        genres: &dyn DataSource<Genre>,
        config: &AppConfig,
    ) -> Result<Self, AppError> {
        let movies = movies.fetch_collection().await?;
        let genres = genres.fetch_collection().await?;
        info!(movies = movies.len(), genres = genres.len(), "catalog loaded");
        Ok(Self::from_parts(movies, genres, config)?)
    }

    /// Builds the list from already fetched collections.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPageSize`] for a zero page size.
    pub fn from_parts(
        movies: Vec<Movie>,
        genres: Vec<Genre>,
        config: &AppConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            genres,
            list: ListViewController::new(movies, config.default_sort, config.list)?,
        })
    }

    #[must_use]
    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    /// Sidebar entries: "All Genres" first, then each genre.
    #[must_use]
    pub fn genre_options(&self) -> Vec<GenreOption> {
        let selected = self.list.query().selected_category();
        let all = GenreOption {
            id: None,
            name: ALL_GENRES.to_string(),
            active: selected.is_none(),
        };
        std::iter::once(all)
            .chain(self.genres.iter().map(|genre| GenreOption {
                id: Some(genre.id.clone()),
                name: genre.name.clone(),
                active: selected == Some(genre),
            }))
            .collect()
    }

    /// Filters by `genre`, or shows all for `None`. Clears the search text.
    pub fn select_genre(&mut self, genre: Option<Genre>) {
        self.list.select_category(genre);
    }

    /// Selects a genre by id; `None` selects "All Genres".
    ///
    /// Returns `false`, leaving the filter unchanged, for an unknown id.
    pub fn select_genre_id(&mut self, id: Option<&str>) -> bool {
        let Some(id) = id else {
            self.select_genre(None);
            return true;
        };
        match self.genres.iter().find(|g| g.id == id).cloned() {
            Some(genre) => {
                self.select_genre(Some(genre));
                true
            }
            None => {
                debug!(id, "unknown genre");
                false
            }
        }
    }

    /// Searches titles by prefix. Clears the genre filter.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.list.set_search(text);
    }

    /// Header click on `column`.
    pub fn set_sort(&mut self, column: MovieColumn) {
        self.list.set_sort(column);
    }

    pub fn set_page(&mut self, page: usize) {
        self.list.set_page(page);
    }

    /// Flips the like heart of movie `id`. Returns `false` if it is not listed.
    pub fn toggle_like(&mut self, id: &str) -> bool {
        self.list.toggle_flag(id, MovieFlag::Liked)
    }

    /// Deletes movie `id` from `source`, then from the list.
    ///
    /// Returns `false` if the movie is not listed; the source is not touched
    /// in that case.
    ///
    /// # Errors
    ///
    /// Propagates failures from `source`; the list is left unchanged.
    pub async fn delete(
        &mut self,
        id: &str,
        source: &dyn DataSource<Movie>,
    ) -> Result<bool, SourceError> {
        if !self.list.items().iter().any(|m| m.id == id) {
            return Ok(false);
        }
        source.remove(id).await?;
        let removed = self.list.delete_item(id);
        info!(id, "movie deleted");
        Ok(removed)
    }

    #[must_use]
    pub fn query(&self) -> &QuerySpec<MovieColumn> {
        self.list.query()
    }

    #[must_use]
    pub fn view(&self) -> &ListView<Movie, MovieColumn> {
        self.list.view()
    }

    /// Heading shown above the table. Counts the movies that pass the
    /// current filter, the same total the pager uses.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.list.view() {
            ListView::Empty => "There are no movies in the database.".to_string(),
            ListView::Page(page) => {
                format!("Showing {} movies in the database.", page.total_count)
            }
        }
    }
}
