use serde::{de::DeserializeOwned, Deserialize};
use std::fmt;

/// Every JSON answer from the server is wrapped in a `MediaContainer`.
#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(rename = "MediaContainer")]
    pub container: MediaContainer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaContainer {
    pub machine_identifier: Option<String>,
    pub friendly_name: Option<String>,
    #[serde(rename = "Directory", default)]
    pub directories: Vec<serde_json::Value>,
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<serde_json::Value>,
}

impl MediaContainer {
    /// `Metadata` holds items or playlists depending on the endpoint.
    pub fn metadata_as<T: DeserializeOwned>(self) -> serde_json::Result<Vec<T>> {
        self.metadata
            .into_iter()
            .map(serde_json::from_value)
            .collect()
    }

    /// `Directory` holds sections under `/library/sections`, but other
    /// endpoints list untyped entries there.
    pub fn directories_as<T: DeserializeOwned>(self) -> serde_json::Result<Vec<T>> {
        self.directories
            .into_iter()
            .map(serde_json::from_value)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Movie,
    Show,
    Artist,
    Photo,
    #[serde(other)]
    Other,
}

/// A library section, e.g. "Movies" or "TV Shows".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Movie,
    Show,
    Season,
    Episode,
    #[serde(other)]
    Other,
}

/// Which rating a movie is judged by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RatingSource {
    Audience,
    Critic,
    /// The better of the two.
    #[default]
    Any,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub rating_key: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Show title, set on episodes.
    pub grandparent_title: Option<String>,
    /// Season number, set on episodes.
    pub parent_index: Option<u32>,
    pub index: Option<u32>,
    pub year: Option<u32>,
    /// Critic rating, 0-10.
    pub rating: Option<f64>,
    /// Audience rating, 0-10.
    pub audience_rating: Option<f64>,
    pub view_count: Option<u64>,
}

impl MediaItem {
    pub fn is_unwatched(&self) -> bool {
        self.view_count.unwrap_or(0) == 0
    }

    pub fn best_rating(&self, source: RatingSource) -> Option<f64> {
        match source {
            RatingSource::Audience => self.audience_rating,
            RatingSource::Critic => self.rating,
            RatingSource::Any => match (self.rating, self.audience_rating) {
                (Some(c), Some(a)) => Some(c.max(a)),
                (c, a) => c.or(a),
            },
        }
    }

    /// `S01E02` when both numbers are known.
    pub fn episode_code(&self) -> Option<String> {
        Some(format!("S{:02}E{:02}", self.parent_index?, self.index?))
    }
}

impl fmt::Display for MediaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.grandparent_title {
            Some(show) => write!(f, "{} - {}", show, self.title),
            None => match self.year {
                Some(year) if self.kind == ItemKind::Movie => {
                    write!(f, "{} ({})", self.title, year)
                }
                _ => write!(f, "{}", self.title),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub rating_key: String,
    pub title: String,
    pub leaf_count: Option<u64>,
    pub playlist_type: Option<String>,
    #[serde(default)]
    pub smart: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTIONS: &str = r#"{
        "MediaContainer": {
            "size": 3,
            "Directory": [
                {"key": "1", "type": "movie", "title": "Movies", "agent": "tv.plex.agents.movie"},
                {"key": "2", "type": "show", "title": "TV Shows"},
                {"key": "7", "type": "mixed", "title": "Other"}
            ]
        }
    }"#;

    const EPISODES: &str = r#"{
        "MediaContainer": {
            "size": 1,
            "Metadata": [{
                "ratingKey": "1042",
                "type": "episode",
                "title": "Once More, with Feeling",
                "grandparentTitle": "Buffy the Vampire Slayer",
                "parentIndex": 6,
                "index": 7,
                "viewCount": 2
            }]
        }
    }"#;

    const PLAYLISTS: &str = r#"{
        "MediaContainer": {
            "size": 1,
            "Metadata": [{
                "ratingKey": "5001",
                "title": "Christmas Episodes",
                "playlistType": "video",
                "smart": false,
                "leafCount": 12
            }]
        }
    }"#;

    #[test]
    fn parse_sections() {
        let resp: Response = serde_json::from_str(SECTIONS).unwrap();
        assert!(resp.container.metadata.is_empty());
        let sections: Vec<Section> = resp.container.directories_as().unwrap();
        let kinds: Vec<_> = sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [SectionKind::Movie, SectionKind::Show, SectionKind::Other]
        );
    }

    #[test]
    fn parse_identity() {
        let resp: Response = serde_json::from_str(
            r#"{"MediaContainer": {
                "size": 2,
                "friendlyName": "nas",
                "machineIdentifier": "0d9a1c",
                "Directory": [{"count": 1, "key": "activities", "title": "activities"}]
            }}"#,
        )
        .unwrap();
        assert_eq!(resp.container.machine_identifier.as_deref(), Some("0d9a1c"));
        assert_eq!(resp.container.friendly_name.as_deref(), Some("nas"));
    }

    #[test]
    fn parse_episode() {
        let resp: Response = serde_json::from_str(EPISODES).unwrap();
        let items: Vec<MediaItem> = resp.container.metadata_as().unwrap();
        let ep = &items[0];
        assert_eq!(ep.kind, ItemKind::Episode);
        assert_eq!(ep.summary, "");
        assert!(!ep.is_unwatched());
        assert_eq!(ep.episode_code().as_deref(), Some("S06E07"));
        assert_eq!(
            ep.to_string(),
            "Buffy the Vampire Slayer - Once More, with Feeling"
        );
    }

    #[test]
    fn parse_playlist() {
        let resp: Response = serde_json::from_str(PLAYLISTS).unwrap();
        let playlists: Vec<Playlist> = resp.container.metadata_as().unwrap();
        assert_eq!(playlists[0].title, "Christmas Episodes");
        assert_eq!(playlists[0].leaf_count, Some(12));
    }

    #[test]
    fn ratings() {
        let movie: MediaItem = serde_json::from_str(
            r#"{"ratingKey": "9", "type": "movie", "title": "Arrival", "year": 2016,
                "rating": 9.4, "audienceRating": 8.2}"#,
        )
        .unwrap();
        assert!(movie.is_unwatched());
        assert_eq!(movie.best_rating(RatingSource::Critic), Some(9.4));
        assert_eq!(movie.best_rating(RatingSource::Audience), Some(8.2));
        assert_eq!(movie.best_rating(RatingSource::Any), Some(9.4));
        assert_eq!(movie.to_string(), "Arrival (2016)");

        let unrated = MediaItem {
            rating: None,
            audience_rating: Some(6.0),
            ..movie
        };
        assert_eq!(unrated.best_rating(RatingSource::Any), Some(6.0));
        assert_eq!(unrated.best_rating(RatingSource::Critic), None);
    }
}
