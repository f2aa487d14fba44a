//! Catalog entities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vidly_core::{Category, Record, SortValue};

use crate::traits::Entity;

/// A movie genre. Genres are the category dimension of the movie list.
pub type Genre = Category;

/// A rentable movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub genre: Genre,
    pub number_in_stock: u32,
    pub daily_rental_rate: f64,
    #[serde(default)]
    pub liked: bool,
}

/// Sortable columns of the movies table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MovieColumn {
    Title,
    Genre,
    NumberInStock,
    DailyRentalRate,
}

impl MovieColumn {
    pub const ALL: [Self; 4] = [
        Self::Title,
        Self::Genre,
        Self::NumberInStock,
        Self::DailyRentalRate,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Genre => "genre",
            Self::NumberInStock => "numberInStock",
            Self::DailyRentalRate => "dailyRentalRate",
        }
    }

    /// Column header text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Genre => "Genre",
            Self::NumberInStock => "Stock",
            Self::DailyRentalRate => "Rate",
        }
    }
}

impl fmt::Display for MovieColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown column `{s}`, expected one of: {}", names.join(", "))
            })
    }
}

/// Toggleable movie flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieFlag {
    Liked,
}

impl Record for Movie {
    type Column = MovieColumn;
    type Flag = MovieFlag;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> &str {
        &self.title
    }

    fn category_id(&self) -> &str {
        &self.genre.id
    }

    fn sort_value(&self, column: MovieColumn) -> SortValue<'_> {
        match column {
            MovieColumn::Title => SortValue::Text(&self.title),
            MovieColumn::Genre => SortValue::Text(&self.genre.name),
            MovieColumn::NumberInStock => SortValue::Number(f64::from(self.number_in_stock)),
            MovieColumn::DailyRentalRate => SortValue::Number(self.daily_rental_rate),
        }
    }

    fn toggle_flag(&mut self, flag: MovieFlag) {
        match flag {
            MovieFlag::Liked => self.liked = !self.liked,
        }
    }
}

impl Entity for Movie {
    const KIND: &'static str = "movie";

    fn entity_id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Entity for Genre {
    const KIND: &'static str = "genre";

    fn entity_id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}
