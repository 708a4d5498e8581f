use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{plex::RatingSource, theme::Theme};

pub const DEFAULT_PATH: &str = "plex-playlist.toml";

#[derive(Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub plex: PlexConfig,
    #[serde(default)]
    pub highly_rated: HighlyRated,
    /// Extra keyword themes. Example:
    ///
    /// ```toml
    /// [[theme]]
    /// name = "starwars"
    /// keywords = ["star wars", "may the fourth"]
    /// ```
    #[serde(default, rename = "theme")]
    pub themes: Vec<Theme>,
    #[serde(default)]
    pub musical: MusicalConfig,
}

#[derive(Deserialize)]
pub struct PlexConfig {
    /// Example: `http://localhost:32400`
    pub base_url: Option<String>,
    pub token: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_s: u64,
}

impl Default for PlexConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout_s: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

#[derive(Deserialize)]
pub struct HighlyRated {
    #[serde(default = "default_min_rating")]
    pub min_rating: f64,
    #[serde(default)]
    pub source: RatingSource,
    /// 0 means unlimited
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_highly_rated_name")]
    pub name: String,
}

impl Default for HighlyRated {
    fn default() -> Self {
        Self {
            min_rating: default_min_rating(),
            source: RatingSource::default(),
            limit: default_limit(),
            name: default_highly_rated_name(),
        }
    }
}

fn default_min_rating() -> f64 {
    7.5
}

fn default_limit() -> usize {
    50
}

fn default_highly_rated_name() -> String {
    "Highly Rated Unwatched".to_string()
}

/// Additions to the built-in musical catalog.
#[derive(Deserialize, Default)]
pub struct MusicalConfig {
    #[serde(default)]
    pub series: Vec<String>,
    /// show title => episode titles
    #[serde(default)]
    pub episodes: BTreeMap<String, Vec<String>>,
}

/// A missing file is only an error when the path was given explicitly.
pub async fn load_config(path: Option<&Path>) -> Result<Config> {
    let (path, explicit) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_PATH), false),
    };
    if !explicit && !tokio::fs::try_exists(path).await.unwrap_or(false) {
        debug!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let config_str = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Cannot read config path {}", path.display()))?;
    let config = toml::from_str::<Config>(&config_str).context("Config file corrupted")?;
    debug!("config loaded from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL: &str = r#"
        [plex]
        base_url = "http://nas.local:32400"
        token = "abc"

        [highly_rated]
        min_rating = 8.5
        source = "audience"
        limit = 0

        [[theme]]
        name = "starwars"
        keywords = ["star wars", "may the fourth"]
        description = "Star Wars day"

        [[theme]]
        name = "easter"
        keywords = ["easter"]

        [musical]
        series = ["Encore!"]

        [musical.episodes]
        "Futurama" = ["The Devil's Hands Are Idle Playthings"]
    "#;

    #[test]
    fn parse_full() {
        let config: Config = toml::from_str(FULL).unwrap();
        assert_eq!(config.plex.base_url.as_deref(), Some("http://nas.local:32400"));
        assert_eq!(config.plex.timeout_s, 30);
        assert_eq!(config.highly_rated.min_rating, 8.5);
        assert_eq!(config.highly_rated.source, RatingSource::Audience);
        assert_eq!(config.highly_rated.limit, 0);
        assert_eq!(config.highly_rated.name, "Highly Rated Unwatched");
        assert_eq!(config.themes.len(), 2);
        assert!(config.themes[1].exclude.is_empty());
        assert_eq!(config.musical.series, ["Encore!"]);
        assert!(config.musical.episodes.contains_key("Futurama"));
    }

    #[test]
    fn parse_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.plex.token.is_none());
        assert_eq!(config.highly_rated.limit, 50);
        assert_eq!(config.highly_rated.source, RatingSource::Any);
        assert!(config.themes.is_empty());
    }

    #[tokio::test]
    async fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();
        let config = load_config(Some(file.path())).await.unwrap();
        assert_eq!(config.plex.token.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml")))
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("Cannot read config path"));
    }

    #[tokio::test]
    async fn corrupted_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[plex\nbase_url = 1").unwrap();
        let err = load_config(Some(file.path())).await.err().unwrap();
        assert_eq!(err.to_string(), "Config file corrupted");
    }
}
