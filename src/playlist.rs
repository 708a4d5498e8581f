use crate::{
    library::MediaServer,
    plex::{MediaItem, Playlist},
};
use anyhow::{Context, Result};

/// Items sent per create/add request, so the `uri` query stays a sane length.
pub const CHUNK_SIZE: usize = 200;

/// Lines shown before the preview is cut short.
pub const PREVIEW_LINES: usize = 20;

/// Drops every playlist titled `name`, then recreates it from `items`.
/// Nothing is created for an empty item list.
pub async fn replace_playlist<S: MediaServer>(
    server: &S,
    name: &str,
    items: &[MediaItem],
) -> Result<Option<Playlist>> {
    let existing = server.playlists().await.context("list playlists")?;
    for playlist in existing.iter().filter(|p| p.title == name) {
        info!("removing existing playlist '{}'", name);
        server
            .delete_playlist(playlist)
            .await
            .with_context(|| format!("delete playlist '{name}'"))?;
    }

    let mut chunks = items.chunks(CHUNK_SIZE);
    let Some(first) = chunks.next() else {
        return Ok(None);
    };
    let playlist = server
        .create_playlist(name, first)
        .await
        .with_context(|| format!("create playlist '{name}'"))?;
    for chunk in chunks {
        server
            .add_to_playlist(&playlist, chunk)
            .await
            .with_context(|| format!("add items to playlist '{name}'"))?;
    }
    Ok(Some(playlist))
}

/// Bulleted item lines for the terminal.
pub fn preview(items: &[MediaItem]) -> Vec<String> {
    let mut lines: Vec<String> = items
        .iter()
        .take(PREVIEW_LINES)
        .map(|item| format!("  • {item}"))
        .collect();
    if items.len() > PREVIEW_LINES {
        lines.push(format!("  ... and {} more", items.len() - PREVIEW_LINES));
    }
    lines
}
