use crate::api::BackendClient;
use crate::catalog::CatalogClient;
use crate::cli::Command;
use crate::models::UserProfile;
use crate::session::{self, SharedSession};

mod account;
mod admin;
mod catalog;
mod reviews;
mod watchlist;

/// Shared clients and session handed to every command handler.
pub struct AppContext {
    pub backend: BackendClient,
    pub catalog: CatalogClient,
    pub session: SharedSession,
}

/// Runs one command to completion. The returned error string is already
/// phrased for the user.
pub async fn dispatch(ctx: &AppContext, command: Command) -> Result<(), String> {
    match command {
        Command::Login(args) => account::handle_login(ctx, args).await,
        Command::Register(args) => account::handle_register(ctx, args).await,
        Command::Logout => account::handle_logout(ctx).await,
        Command::Whoami => account::handle_whoami(ctx).await,
        Command::Profile(args) => account::handle_profile(ctx, args).await,
        Command::Search(args) => catalog::handle_search(ctx, args).await,
        Command::Movie(args) => catalog::handle_movie(ctx, args).await,
        Command::Trending => catalog::handle_trending(ctx).await,
        Command::Browse => catalog::handle_browse(ctx).await,
        Command::Watchlist(command) => watchlist::dispatch(ctx, command).await,
        Command::Reviews => reviews::handle_list(ctx).await,
        Command::Review(command) => reviews::dispatch(ctx, command).await,
        Command::Admin(command) => admin::dispatch_admin(ctx, command).await,
        Command::Movies(command) => admin::dispatch_movies(ctx, command).await,
    }
}

fn signed_in_user(ctx: &AppContext) -> Option<UserProfile> {
    session::lock(&ctx.session).user().cloned()
}

fn bearer_token(ctx: &AppContext) -> Option<String> {
    session::lock(&ctx.session).token().map(str::to_string)
}
