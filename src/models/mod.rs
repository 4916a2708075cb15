use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Account identity as the backend reports it. The role is assigned
/// server-side and never sent back on profile updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// One row of a catalog search result. Search responses carry only the
/// short form; absent fields default rather than failing the whole page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Type", default)]
    pub media_type: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
}

/// Full catalog record for a single movie. Every field is defaulted so the
/// same struct deserializes from an error envelope that carries no movie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Rated", default)]
    pub rated: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    #[serde(rename = "Writer", default)]
    pub writer: Option<String>,
    #[serde(rename = "Language", default)]
    pub language: Option<String>,
    #[serde(rename = "BoxOffice", default)]
    pub box_office: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes", default)]
    pub imdb_votes: Option<String>,
}

impl From<MovieSummary> for MovieDetail {
    fn from(summary: MovieSummary) -> Self {
        Self {
            imdb_id: summary.imdb_id,
            title: summary.title,
            year: summary.year,
            rated: None,
            poster: summary.poster,
            genre: summary.genre,
            plot: summary.plot,
            director: None,
            actors: None,
            writer: None,
            language: None,
            box_office: None,
            imdb_rating: summary.imdb_rating,
            imdb_votes: None,
        }
    }
}

/// A saved movie on a user's watchlist. The rating and genre snapshots are
/// captured at add time so list statistics need no catalog round trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistEntry {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "imdbId")]
    pub imdb_id: String,
    #[serde(rename = "movieTitle", default)]
    pub title: String,
    #[serde(rename = "movieYear", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(rename = "moviePoster", default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(rename = "dateAdded", default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl WatchlistEntry {
    pub fn from_movie(user_id: &str, movie: &MovieDetail) -> Self {
        Self {
            id: None,
            user_id: Some(user_id.to_string()),
            imdb_id: movie.imdb_id.clone(),
            title: movie.title.clone(),
            year: (!movie.year.is_empty()).then(|| movie.year.clone()),
            poster: movie.poster.clone(),
            rating: movie.imdb_rating.clone(),
            genre: movie.genre.clone(),
            added_at: Some(Utc::now()),
        }
    }
}

/// Review author as the backend serializes it: movie listings embed the
/// profile, other endpoints send the bare user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewAuthor {
    Profile {
        #[serde(rename = "_id", default)]
        id: Option<String>,
        #[serde(default)]
        username: Option<String>,
    },
    Id(String),
}

impl ReviewAuthor {
    pub fn username(&self) -> Option<&str> {
        match self {
            ReviewAuthor::Profile { username, .. } => username.as_deref(),
            ReviewAuthor::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userId", default)]
    pub author: Option<ReviewAuthor>,
    #[serde(rename = "movieId", default)]
    pub movie_id: String,
    #[serde(rename = "movieTitle", default)]
    pub movie_title: String,
    #[serde(rename = "movieYear", default)]
    pub movie_year: Option<String>,
    #[serde(rename = "moviePoster", default)]
    pub movie_poster: Option<String>,
    pub rating: u8,
    #[serde(rename = "reviewText", default)]
    pub review_text: Option<String>,
    #[serde(rename = "timestamp", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .and_then(ReviewAuthor::username)
            .unwrap_or("Anonymous")
    }
}

/// An admin-authored catalog record, separate from the external catalog's
/// search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagedMovie {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(rename = "releaseYear", default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(rename = "posterUrl", default)]
    pub poster_url: Option<String>,
}
