use super::OpState;
use crate::api::{BackendClient, ReviewSubmission};
use crate::models::{MovieDetail, Review};
use crate::session::{self, SharedSession};
use tracing::error;

/// Reviews written by the signed-in user plus the review page for one
/// movie. The movie aggregate (average and count) is always the server's
/// number, never computed locally, so a successful submit re-fetches it.
pub struct ReviewStore {
    api: BackendClient,
    session: SharedSession,
    my_reviews: Vec<Review>,
    movie_reviews: Vec<Review>,
    average_rating: f64,
    total_reviews: u64,
    op: OpState,
}

impl ReviewStore {
    pub fn new(api: BackendClient, session: SharedSession) -> Self {
        Self {
            api,
            session,
            my_reviews: Vec::new(),
            movie_reviews: Vec::new(),
            average_rating: 0.0,
            total_reviews: 0,
            op: OpState::default(),
        }
    }

    fn bearer(&self) -> Option<String> {
        session::lock(&self.session).token().map(str::to_string)
    }

    /// Review pages are public; no token is sent.
    pub async fn fetch_for_movie(&mut self, movie_id: &str) {
        self.op.pending();
        match self.api.reviews_for_movie(movie_id).await {
            Ok(page) => {
                self.movie_reviews = page.reviews;
                self.average_rating = page.average_rating;
                self.total_reviews = page.total_reviews;
                self.op.fulfilled();
            }
            Err(err) => {
                error!("Review fetch failed for {}: {}", movie_id, err);
                self.op.rejected(err.user_message("Failed to fetch reviews"));
            }
        }
    }

    pub async fn fetch_for_user(&mut self, user_id: &str) {
        self.op.pending();
        let token = match self.bearer() {
            Some(token) => token,
            None => {
                self.op.rejected("Please log in to continue");
                return;
            }
        };
        match self.api.reviews_for_user(&token, user_id).await {
            Ok(page) => {
                self.my_reviews = page.reviews;
                self.op.fulfilled();
            }
            Err(err) => {
                error!("User review fetch failed: {}", err);
                self.op
                    .rejected(err.user_message("Failed to fetch user reviews"));
            }
        }
    }

    pub async fn submit(&mut self, movie: &MovieDetail, rating: u8, text: Option<&str>) {
        if !(1..=5).contains(&rating) {
            self.op.rejected("Rating must be between 1 and 5");
            return;
        }
        self.op.pending();
        let token = match self.bearer() {
            Some(token) => token,
            None => {
                self.op.rejected("Please log in to write a review");
                return;
            }
        };
        let submission = ReviewSubmission {
            movie_id: movie.imdb_id.clone(),
            movie_title: movie.title.clone(),
            movie_year: (!movie.year.is_empty()).then(|| movie.year.clone()),
            movie_poster: movie.poster.clone(),
            rating,
            review_text: text.map(str::to_string),
        };
        match self.api.submit_review(&token, &submission).await {
            Ok(()) => self.fetch_for_movie(&movie.imdb_id).await,
            Err(err) => {
                error!("Review submit failed: {}", err);
                self.op
                    .rejected(err.user_message("Failed to submit review"));
            }
        }
    }

    /// Deletes one of the user's own reviews. Only the personal list is
    /// pruned; a movie page showing the review refreshes on its next fetch.
    pub async fn remove(&mut self, review_id: &str) {
        self.op.pending();
        let token = match self.bearer() {
            Some(token) => token,
            None => {
                self.op.rejected("Please log in to continue");
                return;
            }
        };
        match self.api.remove_review(&token, review_id).await {
            Ok(()) => {
                self.my_reviews.retain(|review| review.id != review_id);
                self.op.fulfilled();
            }
            Err(err) => {
                error!("Review delete failed: {}", err);
                self.op
                    .rejected(err.user_message("Failed to delete review"));
            }
        }
    }

    pub fn my_reviews(&self) -> &[Review] {
        &self.my_reviews
    }

    pub fn movie_reviews(&self) -> &[Review] {
        &self.movie_reviews
    }

    pub fn average_rating(&self) -> f64 {
        self.average_rating
    }

    pub fn total_reviews(&self) -> u64 {
        self.total_reviews
    }

    pub fn loading(&self) -> bool {
        self.op.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.op.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.op.clear_error();
    }
}
