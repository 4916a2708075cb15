use crate::api::{BackendClient, NewMovie};
use crate::cli::{AdminCommand, MovieAddArgs, MovieRemoveArgs, MoviesCommand, RemoveUserArgs};

use super::AppContext;

// Admin data is command-local; nothing here touches the store slices.

pub(crate) async fn dispatch_admin(ctx: &AppContext, command: AdminCommand) -> Result<(), String> {
    let token =
        super::bearer_token(ctx).ok_or_else(|| "Please log in to continue".to_string())?;
    match command {
        AdminCommand::Stats => handle_stats(&ctx.backend, &token).await,
        AdminCommand::Users => handle_users(&ctx.backend, &token).await,
        AdminCommand::RemoveUser(args) => handle_remove_user(&ctx.backend, &token, args).await,
    }
}

pub(crate) async fn dispatch_movies(
    ctx: &AppContext,
    command: MoviesCommand,
) -> Result<(), String> {
    let token =
        super::bearer_token(ctx).ok_or_else(|| "Please log in to continue".to_string())?;
    match command {
        MoviesCommand::List => handle_movies_list(&ctx.backend, &token).await,
        MoviesCommand::Add(args) => handle_movies_add(&ctx.backend, &token, args).await,
        MoviesCommand::Remove(args) => handle_movies_remove(&ctx.backend, &token, args).await,
    }
}

async fn handle_stats(backend: &BackendClient, token: &str) -> Result<(), String> {
    let stats = backend
        .admin_stats(token)
        .await
        .map_err(|err| err.user_message("Failed to fetch admin stats"))?;
    println!("Users:   {}", stats.total_users);
    println!("Movies:  {}", stats.total_movies);
    println!("Reviews: {}", stats.total_reviews);
    Ok(())
}

async fn handle_users(backend: &BackendClient, token: &str) -> Result<(), String> {
    let users = backend
        .admin_users(token)
        .await
        .map_err(|err| err.user_message("Failed to fetch users"))?;
    for user in &users {
        println!(
            "{:<26} {:<6} {} <{}>",
            user.id,
            user.role.to_string(),
            user.username,
            user.email
        );
    }
    Ok(())
}

async fn handle_remove_user(
    backend: &BackendClient,
    token: &str,
    args: RemoveUserArgs,
) -> Result<(), String> {
    backend
        .remove_user(token, &args.user_id)
        .await
        .map_err(|err| err.user_message("Failed to delete user"))?;
    println!("User {} deleted.", args.user_id);
    Ok(())
}

async fn handle_movies_list(backend: &BackendClient, token: &str) -> Result<(), String> {
    let movies = backend
        .managed_movies(token)
        .await
        .map_err(|err| err.user_message("Failed to fetch movies"))?;
    if movies.is_empty() {
        println!("No curated movies yet.");
        return Ok(());
    }
    for movie in &movies {
        let year = movie
            .release_year
            .map(|year| year.to_string())
            .unwrap_or_default();
        println!(
            "{:<26} {:<6} {:<12} {}",
            movie.id,
            year,
            movie.genre.as_deref().unwrap_or("-"),
            movie.title
        );
    }
    Ok(())
}

async fn handle_movies_add(
    backend: &BackendClient,
    token: &str,
    args: MovieAddArgs,
) -> Result<(), String> {
    let movie = NewMovie {
        title: args.title,
        genre: args.genre,
        release_year: args.release_year,
        director: args.director,
        synopsis: args.synopsis,
        poster_url: args.poster_url,
    };
    backend
        .add_managed_movie(token, &movie)
        .await
        .map_err(|err| err.user_message("Failed to add movie"))?;
    println!("Added {}.", movie.title);
    Ok(())
}

async fn handle_movies_remove(
    backend: &BackendClient,
    token: &str,
    args: MovieRemoveArgs,
) -> Result<(), String> {
    backend
        .remove_managed_movie(token, &args.movie_id)
        .await
        .map_err(|err| err.user_message("Failed to delete movie"))?;
    println!("Movie {} deleted.", args.movie_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogClient;
    use crate::config::{ApiConfig, CatalogConfig};
    use crate::http::HttpClient;
    use crate::models::{Role, UserProfile};
    use crate::session::SessionStore;
    use httpmock::prelude::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn context(server: &MockServer, dir: &TempDir, signed_in: bool) -> AppContext {
        let mut session = SessionStore::open(dir.path().join("session.json"));
        if signed_in {
            session
                .persist(
                    "jwt-1".to_string(),
                    UserProfile {
                        id: "u1".to_string(),
                        username: "root".to_string(),
                        email: "root@example.com".to_string(),
                        role: Role::Admin,
                    },
                )
                .unwrap();
        }
        let http = HttpClient::new();
        AppContext {
            backend: BackendClient::new(
                http.clone(),
                ApiConfig {
                    base_url: server.base_url(),
                },
            ),
            catalog: CatalogClient::new(
                http,
                CatalogConfig {
                    base_url: server.base_url(),
                    api_key: "test-key".to_string(),
                },
            ),
            session: session.into_shared(),
        }
    }

    #[tokio::test]
    async fn admin_commands_require_a_session() {
        let server = MockServer::start_async().await;
        let dir = TempDir::new().unwrap();
        let stats = server.mock(|when, then| {
            when.method(GET).path("/admin/stats");
            then.status(200).json_body(json!({}));
        });

        let ctx = context(&server, &dir, false);
        let result = dispatch_admin(&ctx, AdminCommand::Stats).await;

        assert_eq!(result, Err("Please log in to continue".to_string()));
        stats.assert_hits(0);
    }

    #[tokio::test]
    async fn stats_are_fetched_with_the_bearer_token() {
        let server = MockServer::start_async().await;
        let dir = TempDir::new().unwrap();
        let stats = server.mock(|when, then| {
            when.method(GET)
                .path("/admin/stats")
                .header("authorization", "Bearer jwt-1");
            then.status(200).json_body(json!({
                "totalUsers": 12, "totalMovies": 34, "totalReviews": 56
            }));
        });

        let ctx = context(&server, &dir, true);
        let result = dispatch_admin(&ctx, AdminCommand::Stats).await;

        assert!(result.is_ok());
        stats.assert();
    }

    #[tokio::test]
    async fn movie_add_sends_the_wire_shape() {
        let server = MockServer::start_async().await;
        let dir = TempDir::new().unwrap();
        let add = server.mock(|when, then| {
            when.method(POST).path("/movies").json_body(json!({
                "title": "Heat",
                "genre": "Crime",
                "releaseYear": 1995
            }));
            then.status(201).json_body(json!({}));
        });

        let ctx = context(&server, &dir, true);
        let result = dispatch_movies(
            &ctx,
            MoviesCommand::Add(MovieAddArgs {
                title: "Heat".to_string(),
                genre: Some("Crime".to_string()),
                release_year: Some(1995),
                director: None,
                synopsis: None,
                poster_url: None,
            }),
        )
        .await;

        assert!(result.is_ok());
        add.assert();
    }

    #[tokio::test]
    async fn backend_refusals_come_back_verbatim() {
        let server = MockServer::start_async().await;
        let dir = TempDir::new().unwrap();
        server.mock(|when, then| {
            when.method(DELETE).path("/admin/users/u2");
            then.status(403).json_body(json!({"message": "Admin access required"}));
        });

        let ctx = context(&server, &dir, true);
        let result =
            dispatch_admin(&ctx, AdminCommand::RemoveUser(RemoveUserArgs {
                user_id: "u2".to_string(),
            }))
            .await;

        assert_eq!(result, Err("Admin access required".to_string()));
    }
}
