use super::OpState;
use crate::api::BackendClient;
use crate::models::{MovieDetail, WatchlistEntry};
use crate::session::{self, SharedSession};
use tracing::error;

/// The signed-in user's saved movies, mirrored locally after each server
/// call so list rendering and membership checks need no extra requests.
pub struct WatchlistStore {
    api: BackendClient,
    session: SharedSession,
    entries: Vec<WatchlistEntry>,
    op: OpState,
}

impl WatchlistStore {
    pub fn new(api: BackendClient, session: SharedSession) -> Self {
        Self {
            api,
            session,
            entries: Vec::new(),
            op: OpState::default(),
        }
    }

    fn bearer(&self) -> Option<String> {
        session::lock(&self.session).token().map(str::to_string)
    }

    pub async fn fetch_all(&mut self, user_id: &str) {
        self.op.pending();
        let token = match self.bearer() {
            Some(token) => token,
            None => {
                self.op.rejected("Please log in to continue");
                return;
            }
        };
        match self.api.watchlist(&token, user_id).await {
            Ok(entries) => {
                self.entries = entries;
                self.op.fulfilled();
            }
            Err(err) => {
                error!("Watchlist fetch failed: {}", err);
                self.op
                    .rejected(err.user_message("Failed to fetch watchlist"));
            }
        }
    }

    /// Saves a movie. The request always goes out; the server deduplicates
    /// on its side and the local list only grows when the movie was not
    /// already mirrored here.
    pub async fn add(&mut self, user_id: &str, movie: &MovieDetail) {
        self.op.pending();
        let token = match self.bearer() {
            Some(token) => token,
            None => {
                self.op
                    .rejected("Please log in to add movies to your watchlist");
                return;
            }
        };
        let entry = WatchlistEntry::from_movie(user_id, movie);
        match self.api.add_to_watchlist(&token, user_id, &entry).await {
            Ok(()) => {
                if !self.contains(&movie.imdb_id) {
                    self.entries.push(entry);
                }
                self.op.fulfilled();
            }
            Err(err) => {
                error!("Watchlist add failed: {}", err);
                self.op
                    .rejected(err.user_message("Failed to add to watchlist"));
            }
        }
    }

    /// Removing a movie that is not on the list succeeds silently without a
    /// request; the visible outcome is the same either way.
    pub async fn remove(&mut self, user_id: &str, movie_id: &str) {
        self.op.pending();
        if !self.contains(movie_id) {
            self.op.fulfilled();
            return;
        }
        let token = match self.bearer() {
            Some(token) => token,
            None => {
                self.op.rejected("Please log in to continue");
                return;
            }
        };
        match self.api.remove_from_watchlist(&token, user_id, movie_id).await {
            Ok(()) => {
                self.entries.retain(|entry| entry.imdb_id != movie_id);
                self.op.fulfilled();
            }
            Err(err) => {
                error!("Watchlist remove failed: {}", err);
                self.op
                    .rejected(err.user_message("Failed to remove from watchlist"));
            }
        }
    }

    pub fn contains(&self, movie_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.imdb_id == movie_id)
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::http::HttpClient;
    use crate::models::{Role, UserProfile};
    use crate::session::SessionStore;
    use httpmock::prelude::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn harness(server: &MockServer, dir: &TempDir, signed_in: bool) -> WatchlistStore {
        let shared = SessionStore::open(dir.path().join("session.json")).into_shared();
        if signed_in {
            session::lock(&shared)
                .persist(
                    "jwt-1".to_string(),
                    UserProfile {
                        id: "u1".to_string(),
                        username: "amy".to_string(),
                        email: "amy@example.com".to_string(),
                        role: Role::User,
                    },
                )
                .unwrap();
        }
        let api = BackendClient::new(
            HttpClient::new(),
            ApiConfig {
                base_url: server.base_url(),
            },
        );
        WatchlistStore::new(api, shared)
    }

    fn movie(imdb_id: &str, title: &str) -> MovieDetail {
        serde_json::from_value(json!({
            "imdbID": imdb_id,
            "Title": title,
            "Year": "2008",
            "Genre": "Action",
            "imdbRating": "9.0"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn adding_twice_posts_twice_but_keeps_one_entry() {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut store = harness(&server, &dir, true);
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/users/u1/watchlist")
                .header("authorization", "Bearer jwt-1")
                .json_body_partial(r#"{"imdbId": "tt1", "movieTitle": "The Dark Knight"}"#);
            then.status(201).json_body(json!({}));
        });

        let dark_knight = movie("tt1", "The Dark Knight");
        store.add("u1", &dark_knight).await;
        store.add("u1", &dark_knight).await;

        mock.assert_hits(2);
        assert!(store.error().is_none());
        assert_eq!(store.entries().len(), 1);
        assert!(store.contains("tt1"));
    }

    #[tokio::test]
    async fn signed_out_add_never_reaches_the_server() {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut store = harness(&server, &dir, false);
        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(201);
        });

        store.add("u1", &movie("tt1", "The Dark Knight")).await;

        mock.assert_hits(0);
        assert_eq!(
            store.error(),
            Some("Please log in to add movies to your watchlist")
        );
        assert!(store.entries().is_empty());
    }

    #[tokio::test]
    async fn removing_an_absent_movie_is_a_silent_no_op() {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut store = harness(&server, &dir, true);
        let mock = server.mock(|when, then| {
            when.method(DELETE);
            then.status(200);
        });

        store.remove("u1", "tt9").await;

        mock.assert_hits(0);
        assert!(!store.loading());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn remove_deletes_locally_and_remotely() {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut store = harness(&server, &dir, true);
        server.mock(|when, then| {
            when.method(GET).path("/users/u1/watchlist");
            then.status(200).json_body(json!([
                {"_id": "w1", "imdbId": "tt1", "movieTitle": "The Dark Knight"},
                {"_id": "w2", "imdbId": "tt2", "movieTitle": "Inception"}
            ]));
        });
        let delete_mock = server.mock(|when, then| {
            when.method(DELETE)
                .path("/users/u1/watchlist/tt1")
                .header("authorization", "Bearer jwt-1");
            then.status(200).json_body(json!({}));
        });

        store.fetch_all("u1").await;
        assert_eq!(store.entries().len(), 2);

        store.remove("u1", "tt1").await;

        delete_mock.assert();
        assert!(store.error().is_none());
        assert_eq!(store.entries().len(), 1);
        assert!(!store.contains("tt1"));
        assert!(store.contains("tt2"));
    }

    #[tokio::test]
    async fn failed_fetch_keeps_the_current_entries() {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut store = harness(&server, &dir, true);
        let mut list_mock = server.mock(|when, then| {
            when.method(GET).path("/users/u1/watchlist");
            then.status(200)
                .json_body(json!([{"imdbId": "tt1", "movieTitle": "The Dark Knight"}]));
        });

        store.fetch_all("u1").await;
        assert_eq!(store.entries().len(), 1);

        list_mock.delete();
        server.mock(|when, then| {
            when.method(GET).path("/users/u1/watchlist");
            then.status(500);
        });

        store.fetch_all("u1").await;

        assert_eq!(store.error(), Some("Failed to fetch watchlist"));
        assert_eq!(store.entries().len(), 1);
    }

    #[tokio::test]
    async fn add_failure_surfaces_the_server_message() {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut store = harness(&server, &dir, true);
        server.mock(|when, then| {
            when.method(POST).path("/users/u1/watchlist");
            then.status(400)
                .json_body(json!({"message": "Movie already in watchlist"}));
        });

        store.add("u1", &movie("tt1", "The Dark Knight")).await;

        assert_eq!(store.error(), Some("Movie already in watchlist"));
        assert!(store.entries().is_empty());
    }

    #[tokio::test]
    async fn signed_out_fetch_asks_for_login() {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir().unwrap();
        let mut store = harness(&server, &dir, false);

        store.fetch_all("u1").await;

        assert_eq!(store.error(), Some("Please log in to continue"));
    }
}
