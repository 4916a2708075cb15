use crate::derive::{SortKey, WatchlistOrder};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.yaml")]
    pub config: String,

    /// Log level
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login(LoginArgs),
    /// Create an account
    Register(RegisterArgs),
    /// Clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Update username and email on the account
    Profile(ProfileArgs),
    /// Search the movie catalog
    Search(SearchArgs),
    /// Show one movie with its reviews
    Movie(MovieArgs),
    /// Show a trending selection
    Trending,
    /// Interactive search; terms are read from stdin as you type
    Browse,
    /// Manage the personal watchlist
    #[command(subcommand)]
    Watchlist(WatchlistCommand),
    /// List reviews you have written
    Reviews,
    /// Write or delete a review
    #[command(subcommand)]
    Review(ReviewCommand),
    /// Administrative reports and user management
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Manage the admin-curated movie records
    #[command(subcommand)]
    Movies(MoviesCommand),
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Title to search for
    pub term: String,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Keep only movies whose genre equals this value
    #[arg(long, default_value = "")]
    pub genre: String,
    #[arg(long, value_enum, default_value_t = SortArg::Title)]
    pub sort: SortArg,
}

#[derive(Args)]
pub struct MovieArgs {
    /// Catalog id, e.g. tt0468569
    pub imdb_id: String,
}

#[derive(Subcommand)]
pub enum WatchlistCommand {
    /// Show saved movies with summary statistics
    List(WatchlistListArgs),
    /// Save a movie
    Add(MovieArgs),
    /// Drop a movie
    Remove(MovieArgs),
}

#[derive(Args)]
pub struct WatchlistListArgs {
    #[arg(long, value_enum, default_value_t = WatchlistSortArg::Added)]
    pub sort: WatchlistSortArg,
}

#[derive(Subcommand)]
pub enum ReviewCommand {
    /// Review a movie, 1 to 5 stars
    Add(ReviewAddArgs),
    /// Delete one of your reviews
    Remove(ReviewRemoveArgs),
}

#[derive(Args)]
pub struct ReviewAddArgs {
    /// Catalog id of the movie being reviewed
    pub imdb_id: String,
    #[arg(long)]
    pub rating: u8,
    #[arg(long)]
    pub text: Option<String>,
}

#[derive(Args)]
pub struct ReviewRemoveArgs {
    pub review_id: String,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Platform totals
    Stats,
    /// List registered users
    Users,
    /// Delete a user account
    RemoveUser(RemoveUserArgs),
}

#[derive(Args)]
pub struct RemoveUserArgs {
    pub user_id: String,
}

#[derive(Subcommand)]
pub enum MoviesCommand {
    /// List curated movie records
    List,
    /// Create a curated movie record
    Add(MovieAddArgs),
    /// Delete a curated movie record
    Remove(MovieRemoveArgs),
}

#[derive(Args)]
pub struct MovieAddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub genre: Option<String>,
    #[arg(long = "year")]
    pub release_year: Option<i32>,
    #[arg(long)]
    pub director: Option<String>,
    #[arg(long)]
    pub synopsis: Option<String>,
    #[arg(long)]
    pub poster_url: Option<String>,
}

#[derive(Args)]
pub struct MovieRemoveArgs {
    pub movie_id: String,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum SortArg {
    #[default]
    Title,
    Rating,
    Year,
}

impl From<SortArg> for SortKey {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Title => SortKey::Title,
            SortArg::Rating => SortKey::Rating,
            SortArg::Year => SortKey::Year,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum WatchlistSortArg {
    #[default]
    Added,
    Title,
    Rating,
    Year,
}

impl From<WatchlistSortArg> for WatchlistOrder {
    fn from(sort: WatchlistSortArg) -> Self {
        match sort {
            WatchlistSortArg::Added => WatchlistOrder::DateAdded,
            WatchlistSortArg::Title => WatchlistOrder::Title,
            WatchlistSortArg::Rating => WatchlistOrder::Rating,
            WatchlistSortArg::Year => WatchlistOrder::Year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definitions_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_a_search_invocation() {
        let cli = Cli::try_parse_from([
            "reelist", "search", "batman", "--page", "2", "--sort", "rating",
        ])
        .unwrap();

        assert_eq!(cli.config, "config.yaml");
        match cli.command {
            Command::Search(args) => {
                assert_eq!(args.term, "batman");
                assert_eq!(args.page, 2);
                assert!(matches!(args.sort, SortArg::Rating));
                assert_eq!(args.genre, "");
            }
            _ => panic!("expected the search command"),
        }
    }

    #[test]
    fn parses_nested_subcommands_with_global_flags() {
        let cli = Cli::try_parse_from([
            "reelist",
            "watchlist",
            "add",
            "tt0468569",
            "--config",
            "other.yaml",
        ])
        .unwrap();

        assert_eq!(cli.config, "other.yaml");
        match cli.command {
            Command::Watchlist(WatchlistCommand::Add(args)) => {
                assert_eq!(args.imdb_id, "tt0468569");
            }
            _ => panic!("expected watchlist add"),
        }
    }

    #[test]
    fn review_rating_is_numeric() {
        let cli = Cli::try_parse_from([
            "reelist", "review", "add", "tt1", "--rating", "5", "--text", "great",
        ])
        .unwrap();

        match cli.command {
            Command::Review(ReviewCommand::Add(args)) => {
                assert_eq!(args.rating, 5);
                assert_eq!(args.text.as_deref(), Some("great"));
            }
            _ => panic!("expected review add"),
        }

        assert!(Cli::try_parse_from(["reelist", "review", "add", "tt1", "--rating", "many"]).is_err());
    }
}
