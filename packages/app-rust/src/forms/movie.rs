//! Add/edit movie form.
//!
//! The form is reached through a route id: [`NEW_MOVIE_ROUTE`] opens a blank
//! form, anything else loads that movie for editing.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vidly_core::{
    ConfigError, FieldSchema, FormController, FormData, FormSnapshot, Schema, Submission, Value,
};

use super::blank_data;
use crate::error::{AppError, SourceError};
use crate::model::{Genre, Movie};
use crate::traits::{DataSource, Entity};

/// Route id that opens a blank form.
pub const NEW_MOVIE_ROUTE: &str = "new";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MovieField {
    Title,
    GenreId,
    NumberInStock,
    DailyRentalRate,
}

impl MovieField {
    pub const ALL: [Self; 4] = [
        Self::Title,
        Self::GenreId,
        Self::NumberInStock,
        Self::DailyRentalRate,
    ];
}

impl fmt::Display for MovieField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::GenreId => "genreId",
            Self::NumberInStock => "numberInStock",
            Self::DailyRentalRate => "dailyRentalRate",
        })
    }
}

/// Stock is a count of copies.
const WHOLE_NUMBER: &str = r"^\s*\d+\s*$";

/// # Errors
///
/// Returns [`ConfigError::InvalidPattern`] if the stock pattern fails to
/// compile.
pub fn movie_schema() -> Result<Schema<MovieField>, ConfigError> {
    Ok(Schema::new()
        .field(
            MovieField::Title,
            FieldSchema::string().required().label("Title"),
        )
        .field(
            MovieField::GenreId,
            FieldSchema::string().required().label("Genre"),
        )
        .field(
            MovieField::NumberInStock,
            FieldSchema::number()
                .required()
                .min(0.0)
                .max(100.0)
                .pattern(WHOLE_NUMBER)?
                .label("Number in Stock"),
        )
        .field(
            MovieField::DailyRentalRate,
            FieldSchema::number()
                .required()
                .min(0.0)
                .max(10.0)
                .label("Daily Rental Rate"),
        ))
}

/// Maps a stored movie to the form's data object.
#[must_use]
pub fn movie_data(movie: &Movie) -> FormData<MovieField> {
    FormData::new()
        .with(MovieField::Title, movie.title.as_str())
        .with(MovieField::GenreId, movie.genre.id.as_str())
        .with(MovieField::NumberInStock, movie.number_in_stock)
        .with(MovieField::DailyRentalRate, movie.daily_rental_rate)
}

/// Typed values of a validated movie form.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDraft {
    pub title: String,
    pub genre_id: String,
    pub number_in_stock: u32,
    pub daily_rental_rate: f64,
}

impl TryFrom<&FormData<MovieField>> for MovieDraft {
    type Error = SourceError;

    fn try_from(data: &FormData<MovieField>) -> Result<Self, Self::Error> {
        let number = |field: MovieField| {
            data.get(field)
                .and_then(Value::as_number)
                .ok_or_else(|| invalid(format!("{field} is not a number")))
        };
        let stock = number(MovieField::NumberInStock)?;
        Ok(Self {
            title: data.text(MovieField::Title).to_string(),
            genre_id: data.text(MovieField::GenreId).to_string(),
            number_in_stock: whole_number(stock)
                .ok_or_else(|| invalid(format!("numberInStock {stock} is not a whole number")))?,
            daily_rental_rate: number(MovieField::DailyRentalRate)?,
        })
    }
}

fn invalid(reason: String) -> SourceError {
    SourceError::Invalid {
        kind: Movie::KIND,
        reason,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::float_cmp)]
fn whole_number(value: f64) -> Option<u32> {
    let in_range = (0.0..=f64::from(u32::MAX)).contains(&value);
    (in_range && value.trunc() == value).then(|| value as u32)
}

/// Movie form bound to the genres it offers and the movie it edits.
#[derive(Debug)]
pub struct MovieForm {
    editing: Option<Movie>,
    genres: Vec<Genre>,
    form: FormController<MovieField, FormData<MovieField>>,
}

impl MovieForm {
    /// Opens the form for `route_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] (wrapped in [`AppError`]) when
    /// `route_id` names no movie, and propagates source failures.
    pub async fn load(
        movies: &dyn DataSource<Movie>,
        genres: &dyn DataSource<Genre>,
        route_id: &str,
    ) -> Result<Self, AppError> {
        let genres = genres.fetch_collection().await?;
        let editing = if route_id == NEW_MOVIE_ROUTE {
            None
        } else {
            let movie = movies
                .fetch_by_id(route_id)
                .await?
                .ok_or_else(|| SourceError::NotFound {
                    kind: Movie::KIND,
                    id: route_id.to_string(),
                })?;
            Some(movie)
        };
        let data = editing
            .as_ref()
            .map_or_else(|| blank_data(&MovieField::ALL), movie_data);
        let form = FormController::new(movie_schema()?, data, |data: &FormData<MovieField>| {
            data.clone()
        })?;
        debug!(route_id, genres = genres.len(), "movie form loaded");
        Ok(Self {
            editing,
            genres,
            form,
        })
    }

    /// Id of the movie being edited, `None` for a new one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.editing.as_ref().map(|m| m.id.as_str())
    }

    /// Choices for the genre select.
    #[must_use]
    pub fn genre_options(&self) -> &[Genre] {
        &self.genres
    }

    pub fn handle_change(&mut self, field: MovieField, value: impl Into<Value>) {
        self.form.handle_change(field, value);
    }

    #[must_use]
    pub fn controller(&self) -> &FormController<MovieField, FormData<MovieField>> {
        &self.form
    }

    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot<MovieField> {
        self.form.snapshot()
    }

    /// Submits the form and persists the movie.
    ///
    /// Returns `Ok(None)` when validation rejects the data; the errors are then
    /// on [`controller`](Self::controller). Editing keeps the movie's id and
    /// liked flag. After a save the form edits the stored movie.
    ///
    /// # Errors
    ///
    /// [`SourceError::NotFound`] for a genre id outside
    /// [`genre_options`](Self::genre_options), and any failure from `movies`.
    pub async fn save(
        &mut self,
        movies: &dyn DataSource<Movie>,
    ) -> Result<Option<Movie>, SourceError> {
        let data = match self.form.handle_submit() {
            Submission::Submitted(data) => data,
            Submission::Rejected { .. } => return Ok(None),
        };
        let draft = MovieDraft::try_from(&data)?;
        let genre = self
            .genres
            .iter()
            .find(|g| g.id == draft.genre_id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                kind: Genre::KIND,
                id: draft.genre_id.clone(),
            })?;
        let (id, liked) = self
            .editing
            .as_ref()
            .map_or_else(|| (String::new(), false), |m| (m.id.clone(), m.liked));

        let stored = movies
            .persist(Movie {
                id,
                title: draft.title,
                genre,
                number_in_stock: draft.number_in_stock,
                daily_rental_rate: draft.daily_rental_rate,
                liked,
            })
            .await?;
        info!(id = %stored.id, title = %stored.title, "movie saved");
        self.editing = Some(stored.clone());
        Ok(Some(stored))
    }
}
