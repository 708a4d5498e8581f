use super::model::{MediaItem, Playlist, Response, Section};
use anyhow::{bail, Context, Result};
use reqwest::{header, Client, Method};
use std::time::Duration;
use url::Url;

const PRODUCT: &str = "plex-playlist";
const LIBRARY_PROVIDER: &str = "com.plexapp.plugins.library";

pub struct PlexClient {
    inner: Client,
    base_url: Url,
    machine_identifier: String,
}

impl PlexClient {
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("invalid endpoint {path}"))
    }

    /// Connects and reads the server identity, which playlist URIs need.
    pub async fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("invalid Plex URL {base_url:?}"))?;
        // Url::join drops the last segment unless the base ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = header::HeaderMap::new();
        let mut token = header::HeaderValue::from_str(token).context("invalid Plex token")?;
        token.set_sensitive(true);
        headers.insert("X-Plex-Token", token);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert("X-Plex-Product", header::HeaderValue::from_static(PRODUCT));
        headers.insert(
            "X-Plex-Client-Identifier",
            header::HeaderValue::from_static(PRODUCT),
        );
        let client = reqwest::ClientBuilder::new()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let mut this = Self {
            inner: client,
            base_url,
            machine_identifier: String::new(),
        };
        let identity = this
            .request(Method::GET, "", &[])
            .await
            .context("Failed to connect to Plex")?;
        this.machine_identifier = identity
            .container
            .machine_identifier
            .context("server did not report a machineIdentifier")?;
        info!(
            "connected to {} ({})",
            identity.container.friendly_name.as_deref().unwrap_or("Plex"),
            this.machine_identifier
        );
        Ok(this)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Response> {
        let url = self.url(path)?;
        debug!("{method} {url}");
        let resp = self
            .inner
            .request(method.clone(), url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("{method} /{path} failed"))?;
        let status = resp.status();
        if !status.is_success() {
            debug!("body: {:?}", resp.text().await.ok());
            bail!("{method} /{path} failed, status: {status}");
        }
        let body = resp.bytes().await.context("failed to fetch body")?;
        if body.is_empty() {
            return Ok(Response {
                container: Default::default(),
            });
        }
        serde_json::from_slice(&body).with_context(|| format!("{method} /{path}: invalid JSON"))
    }

    /// `server://{machine}/com.plexapp.plugins.library/library/metadata/1,2,3`
    fn items_uri(&self, items: &[MediaItem]) -> String {
        let keys = items
            .iter()
            .map(|i| i.rating_key.as_str())
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "server://{}/{}/library/metadata/{}",
            self.machine_identifier, LIBRARY_PROVIDER, keys
        )
    }

    pub async fn sections(&self) -> Result<Vec<Section>> {
        let resp = self.request(Method::GET, "library/sections", &[]).await?;
        resp.container
            .directories_as()
            .context("unexpected library sections")
    }

    pub async fn section_items(&self, section: &Section) -> Result<Vec<MediaItem>> {
        let path = format!("library/sections/{}/all", section.key);
        let resp = self.request(Method::GET, &path, &[]).await?;
        resp.container
            .metadata_as()
            .with_context(|| format!("unexpected items in section {}", section.title))
    }

    pub async fn episodes(&self, show: &MediaItem) -> Result<Vec<MediaItem>> {
        let path = format!("library/metadata/{}/allLeaves", show.rating_key);
        let resp = self.request(Method::GET, &path, &[]).await?;
        resp.container
            .metadata_as()
            .with_context(|| format!("unexpected episodes of {}", show.title))
    }

    pub async fn playlists(&self) -> Result<Vec<Playlist>> {
        let resp = self.request(Method::GET, "playlists", &[]).await?;
        resp.container
            .metadata_as()
            .context("unexpected playlist listing")
    }

    pub async fn create_playlist(&self, title: &str, items: &[MediaItem]) -> Result<Playlist> {
        let uri = self.items_uri(items);
        let resp = self
            .request(
                Method::POST,
                "playlists",
                &[
                    ("type", "video"),
                    ("title", title),
                    ("smart", "0"),
                    ("uri", uri.as_str()),
                ],
            )
            .await?;
        let mut created: Vec<Playlist> = resp.container.metadata_as()?;
        let playlist = created
            .pop()
            .context("server did not return the new playlist")?;
        info!("playlist {} created with id {}", title, playlist.rating_key);
        Ok(playlist)
    }

    pub async fn add_to_playlist(&self, playlist: &Playlist, items: &[MediaItem]) -> Result<()> {
        let uri = self.items_uri(items);
        let path = format!("playlists/{}/items", playlist.rating_key);
        self.request(Method::PUT, &path, &[("uri", uri.as_str())])
            .await?;
        debug!("added {} items to {}", items.len(), playlist.title);
        Ok(())
    }

    pub async fn delete_playlist(&self, playlist: &Playlist) -> Result<()> {
        let path = format!("playlists/{}", playlist.rating_key);
        self.request(Method::DELETE, &path, &[]).await?;
        info!("playlist {} deleted", playlist.title);
        Ok(())
    }
}
