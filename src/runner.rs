use crate::{
    cli::{Cli, Commands},
    config::{self, Config, HighlyRated},
    finder::{self, RatingCriteria, Scope},
    library::MediaServer,
    musical::MusicalCatalog,
    playlist,
    plex::{MediaItem, PlexClient, Playlist, RatingSource},
    theme::{self, Selection, ThemeBook},
};
use anyhow::{bail, Context, Result};
use std::time::Duration;

pub async fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref()).await?;
    let themes = ThemeBook::with_custom(config.themes.iter().cloned());

    match cli.command {
        Commands::ListThemes => {
            list_themes(&themes);
            Ok(())
        }
        Commands::ListPlaylists => {
            let client = connect(cli.url.as_deref(), cli.token.as_deref(), &config).await?;
            list_playlists(&client).await
        }
        Commands::Create {
            theme,
            name,
            no_movies,
            no_tv,
            dry_run,
        } => {
            // Unknown themes fail before touching the network.
            let selection = themes.resolve(&theme)?;
            let client = connect(cli.url.as_deref(), cli.token.as_deref(), &config).await?;
            let scope = Scope {
                movies: !no_movies,
                tv: !no_tv,
            };
            let name = name.unwrap_or_else(|| theme::default_playlist_name(&theme));
            create(&client, &config, selection, &theme, scope, &name, dry_run).await
        }
        Commands::HighlyRated {
            min_rating,
            source,
            limit,
            name,
            dry_run,
        } => {
            let defaults = &config.highly_rated;
            let criteria = rating_criteria(min_rating, source, limit, defaults)?;
            let name = name.unwrap_or_else(|| defaults.name.clone());
            let client = connect(cli.url.as_deref(), cli.token.as_deref(), &config).await?;
            highly_rated(&client, criteria, &name, dry_run).await
        }
    }
}

/// Flags win over `[highly_rated]`. A limit of 0 means no limit.
fn rating_criteria(
    min_rating: Option<f64>,
    source: Option<RatingSource>,
    limit: Option<usize>,
    defaults: &HighlyRated,
) -> Result<RatingCriteria> {
    let min_rating = min_rating.unwrap_or(defaults.min_rating);
    if !min_rating.is_finite() {
        bail!("min_rating must be a finite number, got {min_rating}");
    }
    let limit = limit.unwrap_or(defaults.limit);
    Ok(RatingCriteria {
        min_rating,
        source: source.unwrap_or(defaults.source),
        limit: (limit > 0).then_some(limit),
    })
}

const MISSING_URL: &str =
    "Plex server URL not set: pass --url, set PLEX_URL, or set plex.base_url in the config file";
const MISSING_TOKEN: &str =
    "Plex token not set: pass --token, set PLEX_TOKEN, or set plex.token in the config file";

/// Flags and environment win over the config file.
async fn connect(
    url: Option<&str>,
    token: Option<&str>,
    config: &Config,
) -> Result<PlexClient> {
    let url = url.or(config.plex.base_url.as_deref()).context(MISSING_URL)?;
    let token = token.or(config.plex.token.as_deref()).context(MISSING_TOKEN)?;
    PlexClient::new(url, token, Duration::from_secs(config.plex.timeout_s)).await
}

fn list_themes(themes: &ThemeBook) {
    println!("Available themes:\n");
    for theme in themes.iter() {
        println!("  {}: {}", theme.name, theme.description);
    }
    println!(
        "  {}: Musical episodes (Buffy, Scrubs, Sunny, etc.)",
        theme::MUSICAL
    );
}

async fn list_playlists<S: MediaServer>(server: &S) -> Result<()> {
    let playlists = server.playlists().await?;
    for line in describe_playlists(&playlists) {
        println!("{line}");
    }
    Ok(())
}

fn describe_playlists(playlists: &[Playlist]) -> Vec<String> {
    if playlists.is_empty() {
        return vec!["No playlists found.".to_string()];
    }
    let mut lines = vec!["Playlists:\n".to_string()];
    lines.extend(
        playlists
            .iter()
            .map(|p| format!("  • {} ({} items)", p.title, p.leaf_count.unwrap_or(0))),
    );
    lines
}

async fn create<S: MediaServer>(
    server: &S,
    config: &Config,
    selection: Selection<'_>,
    theme: &str,
    scope: Scope,
    name: &str,
    dry_run: bool,
) -> Result<()> {
    println!("Searching for {theme} content...");
    let items = match selection {
        Selection::Keywords(t) => finder::find_themed(server, t, scope).await?,
        Selection::Musical => {
            let mut catalog = MusicalCatalog::builtin();
            catalog.extend(
                config.musical.series.iter().cloned(),
                config.musical.episodes.clone(),
            );
            finder::find_musical(server, &catalog).await?
        }
    };

    if items.is_empty() {
        println!("No {theme} content found in your library.");
        return Ok(());
    }
    publish(server, name, &items, dry_run).await
}

async fn highly_rated<S: MediaServer>(
    server: &S,
    criteria: RatingCriteria,
    name: &str,
    dry_run: bool,
) -> Result<()> {
    println!(
        "Searching for unwatched movies rated {} or higher ({:?})...",
        criteria.min_rating, criteria.source
    );
    let items = finder::find_highly_rated_unwatched(server, criteria).await?;
    if items.is_empty() {
        println!("No unwatched movies rated {} or higher.", criteria.min_rating);
        return Ok(());
    }
    publish(server, name, &items, dry_run).await
}

async fn publish<S: MediaServer>(
    server: &S,
    name: &str,
    items: &[MediaItem],
    dry_run: bool,
) -> Result<()> {
    println!("\nFound {} items:", items.len());
    for line in playlist::preview(items) {
        println!("{line}");
    }

    if dry_run {
        println!("\nDry run - playlist not created");
        return Ok(());
    }

    println!("\nCreating playlist '{name}'...");
    match playlist::replace_playlist(server, name, items).await? {
        Some(_) => println!("Created playlist '{}' with {} items!", name, items.len()),
        None => println!("Failed to create playlist"),
    }
    Ok(())
}
