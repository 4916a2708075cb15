use crate::cli::{ReviewAddArgs, ReviewCommand, ReviewRemoveArgs};
use crate::store::{CatalogSearchStore, ReviewStore};

use super::AppContext;

pub(crate) async fn dispatch(ctx: &AppContext, command: ReviewCommand) -> Result<(), String> {
    match command {
        ReviewCommand::Add(args) => handle_add(ctx, args).await,
        ReviewCommand::Remove(args) => handle_remove(ctx, args).await,
    }
}

pub(crate) async fn handle_list(ctx: &AppContext) -> Result<(), String> {
    let user =
        super::signed_in_user(ctx).ok_or_else(|| "Please log in to continue".to_string())?;

    let mut store = ReviewStore::new(ctx.backend.clone(), ctx.session.clone());
    store.fetch_for_user(&user.id).await;
    if let Some(message) = store.error() {
        return Err(message.to_string());
    }
    if store.my_reviews().is_empty() {
        println!("You have not written any reviews yet.");
        return Ok(());
    }

    for review in store.my_reviews() {
        let title = if review.movie_title.is_empty() {
            review.movie_id.as_str()
        } else {
            review.movie_title.as_str()
        };
        match review.created_at {
            Some(created) => println!(
                "{:<26} {}/5  {}  {}",
                review.id,
                review.rating,
                created.format("%Y-%m-%d"),
                title
            ),
            None => println!("{:<26} {}/5  {}", review.id, review.rating, title),
        }
        if let Some(text) = review.review_text.as_deref().filter(|text| !text.is_empty()) {
            println!("      {}", text);
        }
    }
    Ok(())
}

async fn handle_add(ctx: &AppContext, args: ReviewAddArgs) -> Result<(), String> {
    // Load the movie the way the detail page would, so the review carries
    // its title and poster snapshots.
    let mut search = CatalogSearchStore::new(ctx.catalog.clone());
    search.fetch_detail(&args.imdb_id).await;
    if let Some(message) = search.detail_error() {
        return Err(message.to_string());
    }
    let movie = match search.selected() {
        Some(movie) => movie,
        None => return Err("Movie not found".to_string()),
    };

    let mut store = ReviewStore::new(ctx.backend.clone(), ctx.session.clone());
    store.submit(movie, args.rating, args.text.as_deref()).await;
    if let Some(message) = store.error() {
        return Err(message.to_string());
    }
    println!(
        "Review saved. {} now sits at {:.1}/5 from {} reviews.",
        movie.title,
        store.average_rating(),
        store.total_reviews()
    );
    Ok(())
}

async fn handle_remove(ctx: &AppContext, args: ReviewRemoveArgs) -> Result<(), String> {
    let mut store = ReviewStore::new(ctx.backend.clone(), ctx.session.clone());
    store.remove(&args.review_id).await;
    if let Some(message) = store.error() {
        return Err(message.to_string());
    }
    println!("Review deleted.");
    Ok(())
}
