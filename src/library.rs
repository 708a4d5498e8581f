//! The slice of a media server the playlist builders need.
//!
//! [`PlexClient`] is the real implementation; tests run the finders and the
//! playlist writer against an in-memory server.

use crate::plex::{MediaItem, PlexClient, Playlist, Section};
use anyhow::Result;
use std::future::Future;

pub trait MediaServer: Send + Sync {
    fn sections(&self) -> impl Future<Output = Result<Vec<Section>>> + Send;

    /// Top-level items of a section: shows or movies.
    fn section_items(
        &self,
        section: &Section,
    ) -> impl Future<Output = Result<Vec<MediaItem>>> + Send;

    /// Every episode of a show, in season/episode order.
    fn episodes(&self, show: &MediaItem) -> impl Future<Output = Result<Vec<MediaItem>>> + Send;

    fn playlists(&self) -> impl Future<Output = Result<Vec<Playlist>>> + Send;

    fn create_playlist(
        &self,
        title: &str,
        items: &[MediaItem],
    ) -> impl Future<Output = Result<Playlist>> + Send;

    fn add_to_playlist(
        &self,
        playlist: &Playlist,
        items: &[MediaItem],
    ) -> impl Future<Output = Result<()>> + Send;

    fn delete_playlist(&self, playlist: &Playlist) -> impl Future<Output = Result<()>> + Send;
}

impl MediaServer for PlexClient {
    async fn sections(&self) -> Result<Vec<Section>> {
        PlexClient::sections(self).await
    }

    async fn section_items(&self, section: &Section) -> Result<Vec<MediaItem>> {
        PlexClient::section_items(self, section).await
    }

    async fn episodes(&self, show: &MediaItem) -> Result<Vec<MediaItem>> {
        PlexClient::episodes(self, show).await
    }

    async fn playlists(&self) -> Result<Vec<Playlist>> {
        PlexClient::playlists(self).await
    }

    async fn create_playlist(&self, title: &str, items: &[MediaItem]) -> Result<Playlist> {
        PlexClient::create_playlist(self, title, items).await
    }

    async fn add_to_playlist(&self, playlist: &Playlist, items: &[MediaItem]) -> Result<()> {
        PlexClient::add_to_playlist(self, playlist, items).await
    }

    async fn delete_playlist(&self, playlist: &Playlist) -> Result<()> {
        PlexClient::delete_playlist(self, playlist).await
    }
}
