use crate::plex::RatingSource;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Create themed playlists from your Plex library",
    long_about = None
)]
pub struct Cli {
    /// TOML config file. (default: ./plex-playlist.toml, if present)
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Plex server URL. (overrides the config file)
    #[clap(long, env = "PLEX_URL", global = true)]
    pub url: Option<String>,

    /// Plex auth token. (overrides the config file)
    #[clap(long, env = "PLEX_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Log debug output
    #[clap(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a themed playlist.
    Create {
        /// Theme to create playlist for (see `list-themes`)
        #[clap(long)]
        theme: String,
        /// Custom playlist name (default: "<Theme> Episodes")
        #[clap(long)]
        name: Option<String>,
        /// Leave movies out
        #[clap(long, default_value_t = false)]
        no_movies: bool,
        /// Leave TV episodes out
        #[clap(long, default_value_t = false)]
        no_tv: bool,
        /// Show what would be added without creating
        #[clap(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Create a playlist of highly rated movies you have not watched.
    HighlyRated {
        /// Minimum rating on Plex's 0-10 scale
        #[clap(long, value_parser = parse_rating)]
        min_rating: Option<f64>,
        /// Rating to judge by
        #[clap(long, value_enum)]
        source: Option<RatingSource>,
        /// Maximum number of movies, 0 for no limit
        #[clap(long)]
        limit: Option<usize>,
        /// Custom playlist name
        #[clap(long)]
        name: Option<String>,
        /// Show what would be added without creating
        #[clap(long, default_value_t = false)]
        dry_run: bool,
    },
    /// List available themes.
    ListThemes,
    /// List existing playlists.
    ListPlaylists,
}

fn parse_rating(s: &str) -> Result<f64, String> {
    let rating: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !rating.is_finite() {
        return Err(format!("{s} is not a finite number"));
    }
    Ok(rating)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_create() {
        let cli = Cli::try_parse_from([
            "plex-playlist",
            "create",
            "--theme",
            "christmas",
            "--no-movies",
            "--dry-run",
            "--url",
            "http://localhost:32400",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://localhost:32400"));
        match cli.command {
            Commands::Create {
                theme,
                name,
                no_movies,
                no_tv,
                dry_run,
            } => {
                assert_eq!(theme, "christmas");
                assert!(name.is_none());
                assert!(no_movies && !no_tv && dry_run);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parse_highly_rated() {
        let cli = Cli::try_parse_from([
            "plex-playlist",
            "highly-rated",
            "--min-rating",
            "8",
            "--source",
            "critic",
        ])
        .unwrap();
        match cli.command {
            Commands::HighlyRated {
                min_rating, source, ..
            } => {
                assert_eq!(min_rating, Some(8.0));
                assert_eq!(source, Some(RatingSource::Critic));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn min_rating_must_be_finite() {
        for value in ["NaN", "inf", "-inf", "high"] {
            let args = ["plex-playlist", "highly-rated", "--min-rating", value];
            assert!(Cli::try_parse_from(args).is_err(), "{value} accepted");
        }
    }

    #[test]
    fn create_needs_theme() {
        assert!(Cli::try_parse_from(["plex-playlist", "create"]).is_err());
    }
}
