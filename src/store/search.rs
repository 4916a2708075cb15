use super::OpState;
use crate::catalog::CatalogClient;
use crate::models::{MovieDetail, MovieSummary};
use tracing::error;

/// Catalog search results plus the currently inspected movie. Search and
/// detail lookups track their own loading and error state so a failed
/// detail fetch leaves the result list untouched.
pub struct CatalogSearchStore {
    catalog: CatalogClient,
    movies: Vec<MovieSummary>,
    total_results: u64,
    current_page: u32,
    search_term: String,
    selected: Option<MovieDetail>,
    op: OpState,
    detail_op: OpState,
}

impl CatalogSearchStore {
    pub fn new(catalog: CatalogClient) -> Self {
        Self {
            catalog,
            movies: Vec::new(),
            total_results: 0,
            current_page: 1,
            search_term: String::new(),
            selected: None,
            op: OpState::default(),
            detail_op: OpState::default(),
        }
    }

    /// Runs a search and replaces the result page. A blank term is ignored
    /// rather than treated as an error, matching how an empty search box
    /// behaves. On failure the previous results are cleared so stale rows
    /// never show under an error banner.
    pub async fn search(&mut self, term: &str, page: u32) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }
        self.op.pending();
        match self.catalog.search(term, page).await {
            Ok(envelope) if envelope.is_success() => {
                self.total_results = envelope.total_results();
                self.movies = envelope.movies;
                self.current_page = page;
                self.search_term = term.to_string();
                self.op.fulfilled();
            }
            Ok(envelope) => {
                self.movies.clear();
                self.total_results = 0;
                self.op.rejected(
                    envelope
                        .error
                        .unwrap_or_else(|| "No movies found".to_string()),
                );
            }
            Err(err) => {
                error!("Catalog search failed: {}", err);
                self.movies.clear();
                self.total_results = 0;
                self.op
                    .rejected(err.user_message("Failed to search movies"));
            }
        }
    }

    pub async fn fetch_detail(&mut self, imdb_id: &str) {
        self.detail_op.pending();
        match self.catalog.detail(imdb_id).await {
            Ok(envelope) if envelope.is_success() => {
                self.selected = Some(envelope.detail);
                self.detail_op.fulfilled();
            }
            Ok(envelope) => {
                self.selected = None;
                self.detail_op.rejected(
                    envelope
                        .error
                        .unwrap_or_else(|| "Movie not found".to_string()),
                );
            }
            Err(err) => {
                error!("Detail lookup failed: {}", err);
                self.selected = None;
                self.detail_op
                    .rejected(err.user_message("Failed to fetch movie details"));
            }
        }
    }

    pub fn clear_selected(&mut self) {
        self.selected = None;
    }

    pub fn clear_error(&mut self) {
        self.op.clear_error();
        self.detail_op.clear_error();
    }

    pub fn movies(&self) -> &[MovieSummary] {
        &self.movies
    }

    pub fn selected(&self) -> Option<&MovieDetail> {
        self.selected.as_ref()
    }

    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn loading(&self) -> bool {
        self.op.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.op.error.as_deref()
    }

    pub fn detail_loading(&self) -> bool {
        self.detail_op.loading
    }

    pub fn detail_error(&self) -> Option<&str> {
        self.detail_op.error.as_deref()
    }
}
