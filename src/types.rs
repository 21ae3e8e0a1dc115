use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Opaque Spotify track identifier.
pub type TrackId = String;

/// Opaque Spotify album identifier.
pub type AlbumId = String;

/// One audio-feature record as returned by the Web API, keyed by attribute
/// name (`danceability`, `energy`, `key`, ...). Key order is preserved.
pub type AudioFeatures = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// One page of playlist membership.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistPage {
    #[serde(default)]
    pub items: Vec<Option<PlaylistItem>>,
    pub next: Option<String>,
}

impl PlaylistPage {
    /// Returns one entry per playlist slot: the track id, or `None` for a
    /// slot whose track was removed, is local, or carries no usable id.
    pub fn track_ids(&self) -> Vec<Option<TrackId>> {
        self.items
            .iter()
            .map(|item| {
                item.as_ref()
                    .and_then(|i| i.track.as_ref())
                    .and_then(|t| t.id.clone())
            })
            .collect()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackRef {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<TrackId>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<TrackId>,
    pub name: Option<String>,
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<AlbumId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<AlbumId>,
    pub name: Option<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSeveralTracksResponse {
    pub tracks: Vec<Option<TrackRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSeveralAlbumsResponse {
    pub albums: Vec<Option<AlbumRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeatures>>,
}

// Ids that are null, empty or not strings are treated as absent.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }))
}
