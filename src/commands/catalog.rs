use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{MovieArgs, SearchArgs};
use crate::derive;
use crate::derive::debounce::{Debouncer, QUIET_WINDOW};
use crate::models::{MovieDetail, Review};
use crate::store::{CatalogSearchStore, ReviewStore};

use super::AppContext;

pub(crate) async fn handle_search(ctx: &AppContext, args: SearchArgs) -> Result<(), String> {
    if args.term.trim().is_empty() {
        return Ok(());
    }

    let mut store = CatalogSearchStore::new(ctx.catalog.clone());
    store.search(&args.term, args.page.max(1)).await;
    if let Some(message) = store.error() {
        return Err(message.to_string());
    }

    let shown = derive::filter_and_sort(store.movies(), &args.genre, args.sort.into());
    println!(
        "Showing {} of {} movies for \"{}\"",
        shown.len(),
        store.total_results(),
        store.search_term()
    );
    for movie in &shown {
        println!(
            "{:<12} {:<6} {:>5}  {}",
            movie.imdb_id,
            movie.year,
            movie.imdb_rating.as_deref().unwrap_or("-"),
            movie.title
        );
    }

    let genres = derive::genre_options(store.movies());
    if !genres.is_empty() {
        println!("Genres: {}", genres.join(", "));
    }

    let pages = derive::pagination_state(store.total_results(), store.current_page());
    if pages.total_pages > 1 {
        let mut line = format!("Page {} of {}", store.current_page(), pages.total_pages);
        if pages.has_prev {
            line.push_str("  [prev]");
        }
        if pages.has_next {
            line.push_str("  [next]");
        }
        println!("{}", line);
    }
    Ok(())
}

pub(crate) async fn handle_movie(ctx: &AppContext, args: MovieArgs) -> Result<(), String> {
    let mut store = CatalogSearchStore::new(ctx.catalog.clone());
    store.fetch_detail(&args.imdb_id).await;
    if let Some(message) = store.detail_error() {
        return Err(message.to_string());
    }
    let movie = match store.selected() {
        Some(movie) => movie,
        None => return Err("Movie not found".to_string()),
    };
    print_detail(movie);

    let mut reviews = ReviewStore::new(ctx.backend.clone(), ctx.session.clone());
    reviews.fetch_for_movie(&args.imdb_id).await;
    if let Some(message) = reviews.error() {
        eprintln!("warning: {}", message);
        return Ok(());
    }
    if reviews.total_reviews() > 0 {
        println!();
        println!(
            "{:.1}/5 from {} reviews",
            reviews.average_rating(),
            reviews.total_reviews()
        );
        for review in reviews.movie_reviews() {
            print_review(review);
        }
    }
    Ok(())
}

pub(crate) async fn handle_trending(ctx: &AppContext) -> Result<(), String> {
    let movies = match ctx.catalog.trending().await {
        Ok(movies) => movies,
        Err(err) => return Err(err.user_message("Failed to fetch trending movies")),
    };
    if movies.is_empty() {
        println!("Nothing trending right now.");
        return Ok(());
    }

    println!("Trending now:");
    for movie in &movies {
        println!(
            "{:<12} {:<6} {:>5}  {}",
            movie.imdb_id,
            movie.year,
            movie.imdb_rating.as_deref().unwrap_or("-"),
            movie.title
        );
    }
    Ok(())
}

/// Reads evolving search terms from stdin and only queries the catalog for
/// terms that survive the quiet window. An empty line or EOF ends the loop.
pub(crate) async fn handle_browse(ctx: &AppContext) -> Result<(), String> {
    let mut store = CatalogSearchStore::new(ctx.catalog.clone());
    let (mut debouncer, mut terms) = Debouncer::new(QUIET_WINDOW);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type a title and pause; an empty line quits.");
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let term = line.trim().to_string();
                        if term.is_empty() {
                            break;
                        }
                        debouncer.input(term);
                    }
                    Ok(None) | Err(_) => break,
                }
            }
            Some(term) = terms.recv() => {
                run_search(&mut store, &term).await;
            }
        }
    }

    // A term typed just before quitting may still be waiting out its window.
    if let Ok(Some(term)) = tokio::time::timeout(QUIET_WINDOW * 2, terms.recv()).await {
        run_search(&mut store, &term).await;
    }
    Ok(())
}

async fn run_search(store: &mut CatalogSearchStore, term: &str) {
    store.search(term, 1).await;
    if let Some(message) = store.error() {
        eprintln!("error: {}", message);
        return;
    }
    println!(
        "-- {} ({} results)",
        store.search_term(),
        store.total_results()
    );
    for movie in store.movies().iter().take(10) {
        println!("{:<12} {:<6} {}", movie.imdb_id, movie.year, movie.title);
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty() && *value != "N/A")
}

fn print_field(label: &str, value: Option<&str>) {
    if let Some(value) = present(value) {
        println!("{}: {}", label, value);
    }
}

fn print_detail(movie: &MovieDetail) {
    match present(Some(movie.year.as_str())) {
        Some(year) => println!("{} ({})", movie.title, year),
        None => println!("{}", movie.title),
    }
    print_field("Rated", movie.rated.as_deref());
    print_field("Genre", movie.genre.as_deref());
    print_field("Director", movie.director.as_deref());
    print_field("Writer", movie.writer.as_deref());
    print_field("Actors", movie.actors.as_deref());
    print_field("Language", movie.language.as_deref());
    print_field("Box office", movie.box_office.as_deref());
    if let Some(rating) = present(movie.imdb_rating.as_deref()) {
        match present(movie.imdb_votes.as_deref()) {
            Some(votes) => println!("IMDb rating: {} ({} votes)", rating, votes),
            None => println!("IMDb rating: {}", rating),
        }
    }
    if let Some(plot) = present(movie.plot.as_deref()) {
        println!();
        println!("{}", plot);
    }
}

fn print_review(review: &Review) {
    match review.created_at {
        Some(created) => println!(
            "  {}/5  {}  {}",
            review.rating,
            review.author_name(),
            created.format("%Y-%m-%d")
        ),
        None => println!("  {}/5  {}", review.rating, review.author_name()),
    }
    if let Some(text) = review.review_text.as_deref().filter(|text| !text.is_empty()) {
        println!("      {}", text);
    }
}
