//! # Spotify Integration Module
//!
//! This module is the boundary between the extractor and the Spotify Web
//! API. The extraction core never talks HTTP itself; it only sees the
//! [`SpotifyApi`] trait, which exposes paged playlist retrieval and the three
//! batched lookups the pipeline needs.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer
//!     ↓
//! Extraction Core (page walker, batch resolver, row assembler)
//!     ↓
//! SpotifyApi trait
//!     ├── SpotifyClient (reqwest, bearer token from TokenManager)
//!     └── test doubles
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Endpoints
//!
//! - `GET /playlists/{id}/tracks?limit=100` - first page of a playlist
//! - the page's `next` URL - every following page
//! - `GET /tracks?ids=` - several tracks (album reference per track)
//! - `GET /albums?ids=` - several albums (record label per album)
//! - `GET /audio-features?ids=` - audio features of several tracks
//! - `POST /api/token` - token exchange and refresh ([`auth`])
//!
//! ## Batch semantics
//!
//! Every batch call answers with exactly one entry per requested id, in
//! request order, where `None` marks an id Spotify could not resolve.
//! Callers must never pass absent ids; the Web API rejects them.
//!
//! ## Error Handling
//!
//! Non-2xx responses and transport failures are returned as errors. Nothing
//! in this module retries or waits on rate limits; a failed call ends the
//! extraction.

use async_trait::async_trait;

use crate::{
    Res,
    types::{AlbumRecord, AudioFeatures, PlaylistPage, TrackRecord},
};

pub mod auth;
mod client;

pub use client::SpotifyClient;

/// The remote capabilities the extraction core depends on.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Fetches the first page of a playlist's tracks.
    async fn playlist_tracks(&self, playlist_ref: &str) -> Res<PlaylistPage>;

    /// Fetches the page following `page`. Only valid when `page.next` is set.
    async fn next_page(&self, page: &PlaylistPage) -> Res<PlaylistPage>;

    /// Looks up several tracks, one result per id.
    async fn tracks(&self, ids: &[String]) -> Res<Vec<Option<TrackRecord>>>;

    /// Looks up several albums, one result per id.
    async fn albums(&self, ids: &[String]) -> Res<Vec<Option<AlbumRecord>>>;

    /// Looks up audio features for several tracks, one result per id.
    async fn audio_features(&self, ids: &[String]) -> Res<Vec<Option<AudioFeatures>>>;
}
