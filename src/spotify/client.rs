use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    Res, config,
    management::TokenManager,
    types::{
        AlbumRecord, AudioFeatures, AudioFeaturesResponse, GetSeveralAlbumsResponse,
        GetSeveralTracksResponse, PlaylistPage, TrackRecord,
    },
    utils,
};

use super::SpotifyApi;

/// Largest page the playlist tracks endpoint serves.
const PLAYLIST_PAGE_LIMIT: u32 = 100;

/// Spotify Web API client authenticated with a cached user token.
///
/// Requests are issued one at a time; the token manager sits behind a
/// mutex only because refreshing needs `&mut` while the trait hands out
/// `&self`.
pub struct SpotifyClient {
    client: Client,
    api_url: String,
    token_mgr: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(token_mgr: TokenManager) -> Self {
        Self::with_api_url(token_mgr, config::spotify_apiurl())
    }

    pub fn with_api_url(token_mgr: TokenManager, api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            token_mgr: Mutex::new(token_mgr),
        }
    }

    /// Builds a client from the token stored by `sporfeat auth`.
    pub async fn from_cache() -> Res<Self> {
        let token_mgr = TokenManager::load()
            .await
            .map_err(|e| format!("Failed to load token. Please run sporfeat auth\n Error: {}", e))?;
        Ok(Self::new(token_mgr))
    }

    async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Res<T>
    where
        T: DeserializeOwned + Send,
    {
        let token = self.token_mgr.lock().await.get_valid_token().await?;

        let response = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn playlist_tracks(&self, playlist_ref: &str) -> Res<PlaylistPage> {
        let url = format!(
            "{uri}/playlists/{id}/tracks",
            uri = self.api_url,
            id = utils::playlist_id_from_ref(playlist_ref)
        );
        self.get_json(&url, &[("limit", PLAYLIST_PAGE_LIMIT.to_string())])
            .await
    }

    async fn next_page(&self, page: &PlaylistPage) -> Res<PlaylistPage> {
        let Some(next) = page.next.as_deref() else {
            return Err("Playlist page has no next page".into());
        };
        self.get_json(next, &[]).await
    }

    async fn tracks(&self, ids: &[String]) -> Res<Vec<Option<TrackRecord>>> {
        let url = format!("{uri}/tracks", uri = self.api_url);
        let res: GetSeveralTracksResponse = self.get_json(&url, &[("ids", ids.join(","))]).await?;
        Ok(res.tracks)
    }

    async fn albums(&self, ids: &[String]) -> Res<Vec<Option<AlbumRecord>>> {
        let url = format!("{uri}/albums", uri = self.api_url);
        let res: GetSeveralAlbumsResponse = self.get_json(&url, &[("ids", ids.join(","))]).await?;
        Ok(res.albums)
    }

    async fn audio_features(&self, ids: &[String]) -> Res<Vec<Option<AudioFeatures>>> {
        let url = format!("{uri}/audio-features", uri = self.api_url);
        let res: AudioFeaturesResponse = self.get_json(&url, &[("ids", ids.join(","))]).await?;
        Ok(res.audio_features)
    }
}
