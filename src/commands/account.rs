use crate::cli::{LoginArgs, ProfileArgs, RegisterArgs};
use crate::store::{AuthStore, ReviewStore, WatchlistStore};

use super::AppContext;

pub(crate) async fn handle_login(ctx: &AppContext, args: LoginArgs) -> Result<(), String> {
    let mut auth = AuthStore::new(ctx.backend.clone(), ctx.session.clone());
    auth.login(&args.email, &args.password).await;
    if let Some(message) = auth.error() {
        return Err(message.to_string());
    }
    match auth.user() {
        Some(user) => println!("Logged in as {} <{}>", user.username, user.email),
        None => println!("Logged in."),
    }
    Ok(())
}

pub(crate) async fn handle_register(ctx: &AppContext, args: RegisterArgs) -> Result<(), String> {
    let mut auth = AuthStore::new(ctx.backend.clone(), ctx.session.clone());
    auth.register(&args.username, &args.email, &args.password)
        .await;
    if let Some(message) = auth.error() {
        return Err(message.to_string());
    }
    match auth.user() {
        Some(user) if auth.is_authenticated() => {
            println!("Registered and logged in as {} <{}>", user.username, user.email);
        }
        _ => println!("Registered. Run `reelist login` to sign in."),
    }
    Ok(())
}

pub(crate) async fn handle_logout(ctx: &AppContext) -> Result<(), String> {
    let mut auth = AuthStore::new(ctx.backend.clone(), ctx.session.clone());
    auth.logout().await;
    println!("Logged out.");
    Ok(())
}

pub(crate) async fn handle_whoami(ctx: &AppContext) -> Result<(), String> {
    let user = super::signed_in_user(ctx).ok_or_else(|| "Not logged in".to_string())?;

    println!("{} <{}>", user.username, user.email);
    println!("Role: {}", user.role);

    let mut reviews = ReviewStore::new(ctx.backend.clone(), ctx.session.clone());
    reviews.fetch_for_user(&user.id).await;
    let mut watchlist = WatchlistStore::new(ctx.backend.clone(), ctx.session.clone());
    watchlist.fetch_all(&user.id).await;

    // Activity counts are informational; the identity line above already
    // answered the question.
    if reviews.error().is_some() || watchlist.error().is_some() {
        eprintln!("warning: account activity is unavailable right now");
        return Ok(());
    }
    println!("Reviews written: {}", reviews.my_reviews().len());
    println!("Watchlist items: {}", watchlist.entries().len());
    Ok(())
}

pub(crate) async fn handle_profile(ctx: &AppContext, args: ProfileArgs) -> Result<(), String> {
    let mut auth = AuthStore::new(ctx.backend.clone(), ctx.session.clone());
    auth.update_profile(&args.username, &args.email).await;
    if let Some(message) = auth.error() {
        return Err(message.to_string());
    }
    println!("Profile updated.");
    Ok(())
}
