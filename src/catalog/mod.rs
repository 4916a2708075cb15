use crate::config::CatalogConfig;
use crate::http::{HttpClient, HttpError};
use crate::models::{MovieDetail, MovieSummary};
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::{instrument, warn};

const TRENDING_SEARCHES: [&str; 5] = ["batman", "avengers", "inception", "interstellar", "joker"];
const TRENDING_PICKS: usize = 6;

/// Client for the external movie catalog. The catalog answers every request
/// with 200 and reports logical failures inside the body, so these calls
/// only error on transport problems; callers branch on the envelope.
#[derive(Clone)]
pub struct CatalogClient {
    http: HttpClient,
    config: CatalogConfig,
}

#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Search", default)]
    pub movies: Vec<MovieSummary>,
    #[serde(rename = "totalResults", default)]
    total_results: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl SearchEnvelope {
    pub fn is_success(&self) -> bool {
        self.response == "True"
    }

    /// The total comes over the wire as a decimal string; absent or garbage
    /// values count as zero.
    pub fn total_results(&self) -> u64 {
        self.total_results.parse().unwrap_or(0)
    }
}

#[derive(Debug, Deserialize)]
pub struct DetailEnvelope {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub detail: MovieDetail,
}

impl DetailEnvelope {
    pub fn is_success(&self) -> bool {
        self.response == "True"
    }
}

impl CatalogClient {
    pub fn new(http: HttpClient, config: CatalogConfig) -> Self {
        Self { http, config }
    }

    #[instrument(skip(self))]
    pub async fn search(&self, term: &str, page: u32) -> Result<SearchEnvelope, HttpError> {
        let url = format!(
            "{}/?s={}&page={}&apikey={}",
            self.config.base_url,
            urlencoding::encode(term),
            page,
            self.config.api_key
        );
        self.http.get_json(&url, None).await
    }

    #[instrument(skip(self))]
    pub async fn detail(&self, imdb_id: &str) -> Result<DetailEnvelope, HttpError> {
        let url = format!(
            "{}/?i={}&apikey={}",
            self.config.base_url,
            urlencoding::encode(imdb_id),
            self.config.api_key
        );
        self.http.get_json(&url, None).await
    }

    /// Searches one of a fixed set of popular terms and upgrades the first
    /// few hits to full details. A hit whose detail lookup fails keeps its
    /// search-result form instead of dropping out.
    #[instrument(skip(self))]
    pub async fn trending(&self) -> Result<Vec<MovieDetail>, HttpError> {
        let term = TRENDING_SEARCHES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(TRENDING_SEARCHES[0]);

        let envelope = self.search(term, 1).await?;
        if !envelope.is_success() {
            return Ok(Vec::new());
        }

        let mut picks = Vec::with_capacity(TRENDING_PICKS);
        for movie in envelope.movies.into_iter().take(TRENDING_PICKS) {
            match self.detail(&movie.imdb_id).await {
                Ok(detail) if detail.is_success() => picks.push(detail.detail),
                Ok(_) => picks.push(MovieDetail::from(movie)),
                Err(err) => {
                    warn!("Detail lookup failed for {}: {}", movie.imdb_id, err);
                    picks.push(MovieDetail::from(movie));
                }
            }
        }
        Ok(picks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> CatalogClient {
        CatalogClient::new(
            HttpClient::new(),
            CatalogConfig {
                base_url: server.base_url(),
                api_key: "k".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn search_sends_term_page_and_key() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/")
                .query_param("s", "batman")
                .query_param("page", "2")
                .query_param("apikey", "k");
            then.status(200).json_body(json!({
                "Response": "True",
                "totalResults": "25",
                "Search": [
                    {"imdbID": "tt1", "Title": "Batman Begins", "Year": "2005"},
                    {"imdbID": "tt2", "Title": "Batman Returns", "Year": "1992"}
                ]
            }));
        });

        let envelope = client_for(&server).search("batman", 2).await.unwrap();

        mock.assert();
        assert!(envelope.is_success());
        assert_eq!(envelope.total_results(), 25);
        assert_eq!(envelope.movies.len(), 2);
        assert_eq!(envelope.movies[0].title, "Batman Begins");
    }

    #[tokio::test]
    async fn failed_search_reports_the_catalog_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/").query_param_exists("s");
            then.status(200)
                .json_body(json!({"Response": "False", "Error": "Movie not found!"}));
        });

        let envelope = client_for(&server).search("zzzz", 1).await.unwrap();

        assert!(!envelope.is_success());
        assert_eq!(envelope.error.as_deref(), Some("Movie not found!"));
        assert_eq!(envelope.total_results(), 0);
        assert!(envelope.movies.is_empty());
    }

    #[tokio::test]
    async fn garbage_total_counts_as_zero() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/").query_param_exists("s");
            then.status(200)
                .json_body(json!({"Response": "True", "totalResults": "many", "Search": []}));
        });

        let envelope = client_for(&server).search("batman", 1).await.unwrap();
        assert_eq!(envelope.total_results(), 0);
    }

    #[tokio::test]
    async fn detail_parses_the_flattened_movie() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/").query_param("i", "tt0468569");
            then.status(200).json_body(json!({
                "Response": "True",
                "imdbID": "tt0468569",
                "Title": "The Dark Knight",
                "Year": "2008",
                "Director": "Christopher Nolan",
                "imdbRating": "9.0"
            }));
        });

        let envelope = client_for(&server).detail("tt0468569").await.unwrap();

        mock.assert();
        assert!(envelope.is_success());
        assert_eq!(envelope.detail.title, "The Dark Knight");
        assert_eq!(envelope.detail.director.as_deref(), Some("Christopher Nolan"));
    }

    #[tokio::test]
    async fn trending_falls_back_to_summaries_when_details_fail() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/").query_param_exists("s");
            then.status(200).json_body(json!({
                "Response": "True",
                "totalResults": "2",
                "Search": [
                    {"imdbID": "tt1", "Title": "First", "Year": "2001"},
                    {"imdbID": "tt2", "Title": "Second", "Year": "2002"}
                ]
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/").query_param("i", "tt1");
            then.status(200).json_body(json!({
                "Response": "True",
                "imdbID": "tt1",
                "Title": "First",
                "Year": "2001",
                "Director": "Someone"
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/").query_param("i", "tt2");
            then.status(200)
                .json_body(json!({"Response": "False", "Error": "Movie not found!"}));
        });

        let picks = client_for(&server).trending().await.unwrap();

        assert_eq!(picks.len(), 2);
        assert_eq!(picks[0].director.as_deref(), Some("Someone"));
        assert_eq!(picks[1].title, "Second");
        assert!(picks[1].director.is_none());
    }

    #[tokio::test]
    async fn trending_with_no_hits_is_empty_not_an_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/").query_param_exists("s");
            then.status(200)
                .json_body(json!({"Response": "False", "Error": "Movie not found!"}));
        });

        let picks = client_for(&server).trending().await.unwrap();
        assert!(picks.is_empty());
    }
}
