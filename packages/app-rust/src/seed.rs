//! Starter catalog used by the demo binary and tests.

use crate::model::{Genre, Movie};

#[must_use]
pub fn genres() -> Vec<Genre> {
    vec![
        Genre::new("action", "Action"),
        Genre::new("comedy", "Comedy"),
        Genre::new("thriller", "Thriller"),
    ]
}

#[must_use]
pub fn movies() -> Vec<Movie> {
    let genres = genres();
    let (action, comedy, thriller) = (&genres[0], &genres[1], &genres[2]);
    let movie = |id: &str, title: &str, genre: &Genre, stock: u32, rate: f64| Movie {
        id: id.to_string(),
        title: title.to_string(),
        genre: genre.clone(),
        number_in_stock: stock,
        daily_rental_rate: rate,
        liked: false,
    };
    vec![
        movie("m1", "Terminator", action, 6, 2.5),
        movie("m2", "Die Hard", action, 5, 2.5),
        movie("m3", "Get Out", thriller, 8, 3.5),
        movie("m4", "Trip to Italy", comedy, 7, 3.5),
        movie("m5", "Airplane", comedy, 7, 3.5),
        movie("m6", "Wedding Crashers", comedy, 7, 3.5),
        movie("m7", "Gone Girl", thriller, 7, 4.5),
        movie("m8", "The Sixth Sense", thriller, 4, 3.5),
        movie("m9", "The Avengers", action, 7, 3.5),
    ]
}
