use crate::{
    library::MediaServer,
    musical::{self, MusicalCatalog},
    plex::{ItemKind, MediaItem, RatingSource, Section, SectionKind},
    theme::Theme,
};
use anyhow::{Context, Result};
use futures::{StreamExt, TryStreamExt};

/// Episode listings requested at once within a section.
const EPISODE_FETCHES: usize = 8;

/// Which content types a themed search looks at.
#[derive(Debug, Clone, Copy)]
pub struct Scope {
    pub movies: bool,
    pub tv: bool,
}

impl Default for Scope {
    fn default() -> Self {
        Self {
            movies: true,
            tv: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RatingCriteria {
    pub min_rating: f64,
    pub source: RatingSource,
    pub limit: Option<usize>,
}

async fn sections_of<S: MediaServer>(server: &S, kind: SectionKind) -> Result<Vec<Section>> {
    let sections = server.sections().await.context("list library sections")?;
    Ok(sections.into_iter().filter(|s| s.kind == kind).collect())
}

async fn shows_of<S: MediaServer>(server: &S, section: &Section) -> Result<Vec<MediaItem>> {
    server
        .section_items(section)
        .await
        .with_context(|| format!("list shows of {}", section.title))
}

/// `shows` paired with their episodes, in the given order.
async fn with_episodes<S: MediaServer>(
    server: &S,
    shows: Vec<MediaItem>,
) -> Result<Vec<(MediaItem, Vec<MediaItem>)>> {
    futures::stream::iter(shows)
        .map(|show| async move {
            let episodes = server
                .episodes(&show)
                .await
                .with_context(|| format!("list episodes of {}", show.title))?;
            Ok::<_, anyhow::Error>((show, episodes))
        })
        .buffered(EPISODE_FETCHES)
        .try_collect()
        .await
}

/// Episodes first, then movies, each in server order.
pub async fn find_themed<S: MediaServer>(
    server: &S,
    theme: &Theme,
    scope: Scope,
) -> Result<Vec<MediaItem>> {
    let mut items = vec![];

    if scope.tv {
        for section in sections_of(server, SectionKind::Show).await? {
            info!("scanning {}", section.title);
            let shows = shows_of(server, &section).await?;
            for (_, episodes) in with_episodes(server, shows).await? {
                items.extend(
                    episodes
                        .into_iter()
                        .filter(|ep| theme.matches(&ep.title, &ep.summary)),
                );
            }
        }
    }

    if scope.movies {
        for section in sections_of(server, SectionKind::Movie).await? {
            info!("scanning {}", section.title);
            let movies = server
                .section_items(&section)
                .await
                .with_context(|| format!("list movies of {}", section.title))?;
            items.extend(
                movies
                    .into_iter()
                    .filter(|m| theme.matches(&m.title, &m.summary)),
            );
        }
    }

    debug!("theme {} matched {} items", theme.name, items.len());
    Ok(items)
}

/// Whole musical series plus individually listed musical episodes. Only shows
/// named in the catalog have their episodes fetched.
pub async fn find_musical<S: MediaServer>(
    server: &S,
    catalog: &MusicalCatalog,
) -> Result<Vec<MediaItem>> {
    let mut items = vec![];
    for section in sections_of(server, SectionKind::Show).await? {
        info!("scanning {}", section.title);
        let shows = shows_of(server, &section)
            .await?
            .into_iter()
            .filter(|show| {
                catalog.is_musical_series(&show.title) || catalog.targets(&show.title).is_some()
            })
            .collect();
        for (show, episodes) in with_episodes(server, shows).await? {
            if catalog.is_musical_series(&show.title) {
                info!("{}: {} episodes (musical series)", show.title, episodes.len());
                items.extend(episodes);
                continue;
            }
            let Some(targets) = catalog.targets(&show.title) else {
                continue;
            };
            for episode in episodes {
                if musical::matches_episode(targets, &episode.title) {
                    info!(
                        "{} {}: {}",
                        show.title,
                        episode.episode_code().unwrap_or_default(),
                        episode.title
                    );
                    items.push(episode);
                }
            }
        }
    }
    Ok(items)
}

/// Unwatched movies at or above the rating threshold, best first.
pub async fn find_highly_rated_unwatched<S: MediaServer>(
    server: &S,
    criteria: RatingCriteria,
) -> Result<Vec<MediaItem>> {
    let mut rated = vec![];
    for section in sections_of(server, SectionKind::Movie).await? {
        info!("scanning {}", section.title);
        let movies = server
            .section_items(&section)
            .await
            .with_context(|| format!("list movies of {}", section.title))?;
        for movie in movies {
            if movie.kind != ItemKind::Movie || !movie.is_unwatched() {
                continue;
            }
            match movie.best_rating(criteria.source) {
                Some(rating) if rating >= criteria.min_rating => rated.push((rating, movie)),
                Some(_) => {}
                None => trace!("{} has no {:?} rating", movie.title, criteria.source),
            }
        }
    }

    rated.sort_by(|(ra, a), (rb, b)| rb.total_cmp(ra).then_with(|| a.title.cmp(&b.title)));
    let mut items: Vec<_> = rated.into_iter().map(|(_, movie)| movie).collect();
    if let Some(limit) = criteria.limit {
        items.truncate(limit);
    }
    Ok(items)
}
