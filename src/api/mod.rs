use crate::config::ApiConfig;
use crate::http::{HttpClient, HttpError};
use crate::models::{ManagedMovie, Review, UserProfile, WatchlistEntry};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Typed client for the review backend. Bearer-authenticated endpoints take
/// the token explicitly; the caller decides where it comes from.
#[derive(Clone)]
pub struct BackendClient {
    http: HttpClient,
    config: ApiConfig,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct ProfileUpdateRequest<'a> {
    username: &'a str,
    email: &'a str,
}

/// Login always carries both fields; registration acknowledgements may
/// carry neither.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

#[derive(Debug, Serialize)]
pub struct ReviewSubmission {
    #[serde(rename = "movieId")]
    pub movie_id: String,
    #[serde(rename = "movieTitle")]
    pub movie_title: String,
    #[serde(rename = "movieYear", skip_serializing_if = "Option::is_none")]
    pub movie_year: Option<String>,
    #[serde(rename = "moviePoster", skip_serializing_if = "Option::is_none")]
    pub movie_poster: Option<String>,
    pub rating: u8,
    #[serde(rename = "reviewText", skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
}

/// Review listings for one movie come with the server-computed aggregate.
#[derive(Debug, Deserialize)]
pub struct MovieReviews {
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(rename = "averageRating", default)]
    pub average_rating: f64,
    #[serde(rename = "totalReviews", default)]
    pub total_reviews: u64,
}

#[derive(Debug, Deserialize)]
pub struct UserReviews {
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Deserialize)]
pub struct AdminStats {
    #[serde(rename = "totalUsers", default)]
    pub total_users: u64,
    #[serde(rename = "totalMovies", default)]
    pub total_movies: u64,
    #[serde(rename = "totalReviews", default)]
    pub total_reviews: u64,
}

#[derive(Debug, Deserialize)]
struct AdminUsers {
    #[serde(default)]
    users: Vec<UserProfile>,
}

#[derive(Debug, Serialize)]
pub struct NewMovie {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(rename = "releaseYear", skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(rename = "posterUrl", skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl BackendClient {
    pub fn new(http: HttpClient, config: ApiConfig) -> Self {
        Self { http, config }
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, HttpError> {
        let url = format!("{}/auth/login", self.config.base_url);
        self.http
            .post_json(&url, &LoginRequest { email, password }, None)
            .await
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, HttpError> {
        let url = format!("{}/auth/register", self.config.base_url);
        self.http
            .post_json(
                &url,
                &RegisterRequest {
                    username,
                    email,
                    password,
                },
                None,
            )
            .await
    }

    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &str) -> Result<(), HttpError> {
        let url = format!("{}/auth/logout", self.config.base_url);
        self.http
            .post(&url, &serde_json::json!({}), Some(token))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    pub async fn update_profile(
        &self,
        token: &str,
        user_id: &str,
        username: &str,
        email: &str,
    ) -> Result<(), HttpError> {
        let url = format!("{}/users/{}", self.config.base_url, user_id);
        self.http
            .put(&url, &ProfileUpdateRequest { username, email }, Some(token))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    pub async fn watchlist(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<Vec<WatchlistEntry>, HttpError> {
        let url = format!("{}/users/{}/watchlist", self.config.base_url, user_id);
        self.http.get_json(&url, Some(token)).await
    }

    #[instrument(skip(self, token, entry), fields(movie_id = %entry.imdb_id))]
    pub async fn add_to_watchlist(
        &self,
        token: &str,
        user_id: &str,
        entry: &WatchlistEntry,
    ) -> Result<(), HttpError> {
        let url = format!("{}/users/{}/watchlist", self.config.base_url, user_id);
        self.http.post(&url, entry, Some(token)).await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    pub async fn remove_from_watchlist(
        &self,
        token: &str,
        user_id: &str,
        movie_id: &str,
    ) -> Result<(), HttpError> {
        let url = format!(
            "{}/users/{}/watchlist/{}",
            self.config.base_url, user_id, movie_id
        );
        self.http.delete(&url, Some(token)).await
    }

    #[instrument(skip(self))]
    pub async fn reviews_for_movie(&self, movie_id: &str) -> Result<MovieReviews, HttpError> {
        let url = format!("{}/reviews/movie/{}", self.config.base_url, movie_id);
        self.http.get_json(&url, None).await
    }

    #[instrument(skip(self, token))]
    pub async fn reviews_for_user(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<UserReviews, HttpError> {
        let url = format!("{}/reviews/user/{}", self.config.base_url, user_id);
        self.http.get_json(&url, Some(token)).await
    }

    #[instrument(skip(self, token, review), fields(movie_id = %review.movie_id))]
    pub async fn submit_review(
        &self,
        token: &str,
        review: &ReviewSubmission,
    ) -> Result<(), HttpError> {
        let url = format!("{}/reviews", self.config.base_url);
        self.http.post(&url, review, Some(token)).await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    pub async fn remove_review(&self, token: &str, review_id: &str) -> Result<(), HttpError> {
        let url = format!("{}/reviews/{}", self.config.base_url, review_id);
        self.http.delete(&url, Some(token)).await
    }

    #[instrument(skip(self, token))]
    pub async fn admin_stats(&self, token: &str) -> Result<AdminStats, HttpError> {
        let url = format!("{}/admin/stats", self.config.base_url);
        self.http.get_json(&url, Some(token)).await
    }

    #[instrument(skip(self, token))]
    pub async fn admin_users(&self, token: &str) -> Result<Vec<UserProfile>, HttpError> {
        let url = format!("{}/admin/users", self.config.base_url);
        let response: AdminUsers = self.http.get_json(&url, Some(token)).await?;
        Ok(response.users)
    }

    #[instrument(skip(self, token))]
    pub async fn remove_user(&self, token: &str, user_id: &str) -> Result<(), HttpError> {
        let url = format!("{}/admin/users/{}", self.config.base_url, user_id);
        self.http.delete(&url, Some(token)).await
    }

    #[instrument(skip(self, token))]
    pub async fn managed_movies(&self, token: &str) -> Result<Vec<ManagedMovie>, HttpError> {
        let url = format!("{}/movies", self.config.base_url);
        self.http.get_json(&url, Some(token)).await
    }

    #[instrument(skip(self, token, movie))]
    pub async fn add_managed_movie(&self, token: &str, movie: &NewMovie) -> Result<(), HttpError> {
        let url = format!("{}/movies", self.config.base_url);
        self.http.post(&url, movie, Some(token)).await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    pub async fn remove_managed_movie(&self, token: &str, movie_id: &str) -> Result<(), HttpError> {
        let url = format!("{}/movies/{}", self.config.base_url, movie_id);
        self.http.delete(&url, Some(token)).await
    }
}
