mod auth;
mod review;
mod search;
mod watchlist;

pub use auth::AuthStore;
pub use review::ReviewStore;
pub use search::CatalogSearchStore;
pub use watchlist::WatchlistStore;

/// Per-operation loading flag and error banner. Every slice drives one of
/// these through the same three transitions: pending clears the previous
/// error and raises the flag, fulfilled lowers it, rejected lowers it and
/// records a message for the user.
#[derive(Debug, Default)]
struct OpState {
    loading: bool,
    error: Option<String>,
}

impl OpState {
    fn pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fulfilled(&mut self) {
        self.loading = false;
    }

    fn rejected(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    fn clear_error(&mut self) {
        self.error = None;
    }
}
