use crate::cli::{MovieArgs, WatchlistCommand, WatchlistListArgs};
use crate::derive;
use crate::store::{CatalogSearchStore, WatchlistStore};

use super::AppContext;

pub(crate) async fn dispatch(ctx: &AppContext, command: WatchlistCommand) -> Result<(), String> {
    match command {
        WatchlistCommand::List(args) => handle_list(ctx, args).await,
        WatchlistCommand::Add(args) => handle_add(ctx, args).await,
        WatchlistCommand::Remove(args) => handle_remove(ctx, args).await,
    }
}

async fn handle_list(ctx: &AppContext, args: WatchlistListArgs) -> Result<(), String> {
    let user =
        super::signed_in_user(ctx).ok_or_else(|| "Please log in to continue".to_string())?;

    let mut store = WatchlistStore::new(ctx.backend.clone(), ctx.session.clone());
    store.fetch_all(&user.id).await;
    if let Some(message) = store.error() {
        return Err(message.to_string());
    }
    if store.entries().is_empty() {
        println!("Your watchlist is empty.");
        return Ok(());
    }

    for entry in derive::sort_watchlist(store.entries(), args.sort.into()) {
        println!(
            "{:<12} {:<6} {:>5}  {}",
            entry.imdb_id,
            entry.year.as_deref().unwrap_or(""),
            entry.rating.as_deref().unwrap_or("-"),
            entry.title
        );
    }

    let stats = derive::compute_watchlist_stats(store.entries());
    println!(
        "{} movies   Average rating: {:.1}   Distinct genres: {}",
        stats.total_movies, stats.average_rating, stats.genre_count
    );
    Ok(())
}

async fn handle_add(ctx: &AppContext, args: MovieArgs) -> Result<(), String> {
    let user = super::signed_in_user(ctx)
        .ok_or_else(|| "Please log in to add movies to your watchlist".to_string())?;

    // Resolve the full record first so the saved entry carries the
    // title, poster, rating and genre snapshots.
    let mut search = CatalogSearchStore::new(ctx.catalog.clone());
    search.fetch_detail(&args.imdb_id).await;
    if let Some(message) = search.detail_error() {
        return Err(message.to_string());
    }
    let movie = match search.selected() {
        Some(movie) => movie,
        None => return Err("Movie not found".to_string()),
    };

    let mut store = WatchlistStore::new(ctx.backend.clone(), ctx.session.clone());
    store.add(&user.id, movie).await;
    if let Some(message) = store.error() {
        return Err(message.to_string());
    }
    println!("Added {} to your watchlist.", movie.title);
    Ok(())
}

async fn handle_remove(ctx: &AppContext, args: MovieArgs) -> Result<(), String> {
    let user =
        super::signed_in_user(ctx).ok_or_else(|| "Please log in to continue".to_string())?;

    let mut store = WatchlistStore::new(ctx.backend.clone(), ctx.session.clone());
    store.fetch_all(&user.id).await;
    if let Some(message) = store.error() {
        return Err(message.to_string());
    }
    if !store.contains(&args.imdb_id) {
        println!("{} is not in your watchlist.", args.imdb_id);
        return Ok(());
    }

    store.remove(&user.id, &args.imdb_id).await;
    if let Some(message) = store.error() {
        return Err(message.to_string());
    }
    println!("Removed {} from your watchlist.", args.imdb_id);
    Ok(())
}
