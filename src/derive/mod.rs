//! Pure helpers applied over store snapshots: result-list filtering and
//! ordering, watchlist statistics and pagination arithmetic. Nothing here
//! touches the network or mutates a store.

pub mod debounce;

use crate::models::{MovieSummary, WatchlistEntry};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Fixed by the catalog API; search responses always page by ten.
pub const PAGE_SIZE: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Rating,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchlistOrder {
    DateAdded,
    Title,
    Rating,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub total_pages: u64,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistStats {
    pub total_movies: usize,
    pub average_rating: f64,
    pub genre_count: usize,
}

/// Applies the genre filter and sort order a results page offers. The
/// filter is an exact match on the whole genre string; an empty filter
/// keeps everything. Title sorts ascending, rating and year descending
/// with unparsable values ranked as zero, so they land at the bottom.
pub fn filter_and_sort(movies: &[MovieSummary], genre: &str, sort: SortKey) -> Vec<MovieSummary> {
    let mut rows: Vec<MovieSummary> = movies
        .iter()
        .filter(|movie| genre.is_empty() || movie.genre.as_deref() == Some(genre))
        .cloned()
        .collect();
    match sort {
        SortKey::Title => rows.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::Rating => rows.sort_by(|a, b| {
            parse_rating(b.imdb_rating.as_deref()).total_cmp(&parse_rating(a.imdb_rating.as_deref()))
        }),
        SortKey::Year => rows.sort_by(|a, b| parse_year(&b.year).cmp(&parse_year(&a.year))),
    }
    rows
}

/// Distinct genre strings in first-seen order, for populating a filter
/// dropdown. "N/A" stays in the list; it is a value the catalog really
/// sends and filtering on it must be possible.
pub fn genre_options(movies: &[MovieSummary]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options = Vec::new();
    for movie in movies {
        if let Some(genre) = movie.genre.as_deref() {
            if !genre.is_empty() && seen.insert(genre) {
                options.push(genre.to_string());
            }
        }
    }
    options
}

/// Summary numbers for the watchlist footer. The average covers only
/// entries whose rating snapshot parses as a number; "N/A" drops out of
/// both the sum and the count. The result is rounded to one decimal.
pub fn compute_watchlist_stats(entries: &[WatchlistEntry]) -> WatchlistStats {
    let ratings: Vec<f64> = entries
        .iter()
        .filter_map(|entry| entry.rating.as_deref())
        .filter_map(|rating| rating.parse().ok())
        .collect();
    let average_rating = if ratings.is_empty() {
        0.0
    } else {
        let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
        (mean * 10.0).round() / 10.0
    };

    let genres: HashSet<&str> = entries
        .iter()
        .filter_map(|entry| entry.genre.as_deref())
        .filter(|genre| !genre.is_empty() && *genre != "N/A")
        .collect();

    WatchlistStats {
        total_movies: entries.len(),
        average_rating,
        genre_count: genres.len(),
    }
}

pub fn sort_watchlist(entries: &[WatchlistEntry], order: WatchlistOrder) -> Vec<WatchlistEntry> {
    let mut rows: Vec<WatchlistEntry> = entries.to_vec();
    match order {
        WatchlistOrder::DateAdded => rows.sort_by_key(|entry| {
            std::cmp::Reverse(entry.added_at.unwrap_or(DateTime::<Utc>::MIN_UTC))
        }),
        WatchlistOrder::Title => rows.sort_by(|a, b| a.title.cmp(&b.title)),
        WatchlistOrder::Rating => rows.sort_by(|a, b| {
            parse_rating(b.rating.as_deref()).total_cmp(&parse_rating(a.rating.as_deref()))
        }),
        WatchlistOrder::Year => rows.sort_by(|a, b| {
            parse_year(b.year.as_deref().unwrap_or(""))
                .cmp(&parse_year(a.year.as_deref().unwrap_or("")))
        }),
    }
    rows
}

pub fn pagination_state(total_results: u64, current_page: u32) -> PaginationState {
    let total_pages = total_results.div_ceil(PAGE_SIZE);
    PaginationState {
        total_pages,
        has_prev: current_page > 1,
        has_next: u64::from(current_page) < total_pages,
    }
}

fn parse_rating(rating: Option<&str>) -> f64 {
    rating.and_then(|value| value.parse().ok()).unwrap_or(0.0)
}

/// Years arrive as strings and series use ranges like "2005–2008"; the
/// leading digit run is the sortable part.
fn parse_year(year: &str) -> u32 {
    let end = year
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(year.len());
    year[..end].parse().unwrap_or(0)
}
