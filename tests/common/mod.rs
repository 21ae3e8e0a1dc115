#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use serde_json::json;
use sporfeat::{
    Res,
    spotify::SpotifyApi,
    types::{
        AlbumRecord, AlbumRef, AudioFeatures, PlaylistItem, PlaylistPage, TrackRecord, TrackRef,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    PlaylistTracks(String),
    NextPage(String),
    Tracks(Vec<String>),
    Albums(Vec<String>),
    AudioFeatures(Vec<String>),
}

/// In-memory Spotify double. Pages are linked through `page-<n>` cursors.
#[derive(Default)]
pub struct FakeSpotify {
    pub pages: Vec<Vec<Option<String>>>,
    pub tracks: HashMap<String, TrackRecord>,
    pub albums: HashMap<String, AlbumRecord>,
    pub features: HashMap<String, AudioFeatures>,
    pub short_feature_response: bool,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeSpotify {
    /// A playlist whose pages hold the given track ids. Every track has
    /// album `album-<id>` labelled `label-<id>` and a feature record.
    pub fn with_pages(pages: Vec<Vec<Option<String>>>) -> Self {
        let mut fake = FakeSpotify {
            pages,
            ..Default::default()
        };

        let ids: Vec<String> = fake.pages.iter().flatten().flatten().cloned().collect();
        for id in ids {
            let album_id = format!("album-{}", id);
            fake.tracks.insert(id.clone(), track(&id, Some(&album_id)));
            fake.albums
                .insert(album_id.clone(), album(&album_id, Some(&format!("label-{}", id))));
            fake.features.insert(id.clone(), features(&id));
        }
        fake
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn page(&self, idx: usize) -> PlaylistPage {
        let items = self.pages[idx]
            .iter()
            .map(|id| {
                Some(PlaylistItem {
                    track: Some(TrackRef {
                        id: id.clone(),
                        name: None,
                    }),
                })
            })
            .collect();
        let next = (idx + 1 < self.pages.len()).then(|| format!("page-{}", idx + 1));
        PlaylistPage { items, next }
    }
}

#[async_trait]
impl SpotifyApi for FakeSpotify {
    async fn playlist_tracks(&self, playlist_ref: &str) -> Res<PlaylistPage> {
        self.record(Call::PlaylistTracks(playlist_ref.to_string()));
        Ok(self.page(0))
    }

    async fn next_page(&self, page: &PlaylistPage) -> Res<PlaylistPage> {
        let next = page.next.clone().ok_or("next_page called without cursor")?;
        self.record(Call::NextPage(next.clone()));
        let idx: usize = next.trim_start_matches("page-").parse()?;
        Ok(self.page(idx))
    }

    async fn tracks(&self, ids: &[String]) -> Res<Vec<Option<TrackRecord>>> {
        self.record(Call::Tracks(ids.to_vec()));
        Ok(ids.iter().map(|id| self.tracks.get(id).cloned()).collect())
    }

    async fn albums(&self, ids: &[String]) -> Res<Vec<Option<AlbumRecord>>> {
        self.record(Call::Albums(ids.to_vec()));
        Ok(ids.iter().map(|id| self.albums.get(id).cloned()).collect())
    }

    async fn audio_features(&self, ids: &[String]) -> Res<Vec<Option<AudioFeatures>>> {
        self.record(Call::AudioFeatures(ids.to_vec()));
        let mut res: Vec<Option<AudioFeatures>> =
            ids.iter().map(|id| self.features.get(id).cloned()).collect();
        if self.short_feature_response {
            res.pop();
        }
        Ok(res)
    }
}

pub fn ids(prefix: &str, n: usize) -> Vec<Option<String>> {
    (1..=n).map(|i| Some(format!("{}{}", prefix, i))).collect()
}

pub fn track(id: &str, album_id: Option<&str>) -> TrackRecord {
    TrackRecord {
        id: Some(id.to_string()),
        name: Some(format!("Track {}", id)),
        album: Some(AlbumRef {
            id: album_id.map(str::to_string),
        }),
    }
}

pub fn album(id: &str, label: Option<&str>) -> AlbumRecord {
    AlbumRecord {
        id: Some(id.to_string()),
        name: Some(format!("Album {}", id)),
        label: label.map(str::to_string),
    }
}

pub fn features(id: &str) -> AudioFeatures {
    json!({
        "danceability": 0.5,
        "energy": 0.8,
        "key": 5,
        "mode": 1,
        "tempo": 120.0,
        "type": "audio_features",
        "id": id,
        "uri": format!("spotify:track:{}", id),
    })
    .as_object()
    .cloned()
    .unwrap()
}
