use serde_json::{Value, json};
use sporfeat::types::{
    AudioFeaturesResponse, GetSeveralAlbumsResponse, GetSeveralTracksResponse, PlaylistPage,
};

#[test]
fn test_tracks_response_with_null_entries() {
    let body = json!({
        "tracks": [
            null,
            { "album": { "id": null } },
            { "id": "", "album": { "id": 42 } },
            { "id": "t1", "name": "One", "album": { "id": "a1" } }
        ]
    });

    let response: GetSeveralTracksResponse = serde_json::from_value(body).unwrap();

    assert_eq!(response.tracks.len(), 4);
    assert!(response.tracks[0].is_none());

    let no_album_id = response.tracks[1].as_ref().unwrap();
    assert_eq!(no_album_id.id, None);
    assert_eq!(no_album_id.album.as_ref().unwrap().id, None);

    // empty and non-string ids count as missing
    let odd_ids = response.tracks[2].as_ref().unwrap();
    assert_eq!(odd_ids.id, None);
    assert_eq!(odd_ids.album.as_ref().unwrap().id, None);

    let full = response.tracks[3].as_ref().unwrap();
    assert_eq!(full.id.as_deref(), Some("t1"));
    assert_eq!(full.album.as_ref().unwrap().id.as_deref(), Some("a1"));
}

#[test]
fn test_albums_response_with_null_entries() {
    let body = r#"{
        "albums": [
            { "id": "a1", "name": "First", "label": "Warp" },
            null,
            { "id": "a3", "name": "Third", "label": null },
            { "id": "a4" }
        ]
    }"#;

    let response: GetSeveralAlbumsResponse = serde_json::from_str(body).unwrap();
    let labels: Vec<Option<&str>> = response
        .albums
        .iter()
        .map(|a| a.as_ref().and_then(|a| a.label.as_deref()))
        .collect();

    assert_eq!(labels, vec![Some("Warp"), None, None, None]);
    assert!(response.albums[1].is_none());
    assert_eq!(response.albums[3].as_ref().unwrap().id.as_deref(), Some("a4"));
}

#[test]
fn test_audio_features_response_with_null_entries() {
    let body = r#"{
        "audio_features": [
            { "danceability": 0.5, "energy": 0.8, "type": "audio_features", "id": "t1" },
            null
        ]
    }"#;

    let response: AudioFeaturesResponse = serde_json::from_str(body).unwrap();

    assert_eq!(response.audio_features.len(), 2);
    assert!(response.audio_features[1].is_none());

    let record = response.audio_features[0].as_ref().unwrap();
    let keys: Vec<&str> = record.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["danceability", "energy", "type", "id"]);
    assert_eq!(record["energy"], Value::from(0.8));
}

#[test]
fn test_playlist_page_ignores_unknown_fields() {
    let body = json!({
        "items": [
            { "track": { "id": "t1", "name": "One" } },
            { "track": null },
            { "track": { "id": null, "name": "Local file" } }
        ],
        "next": null,
        "total": 3,
        "limit": 100
    });

    let page: PlaylistPage = serde_json::from_value(body).unwrap();

    assert_eq!(page.track_ids(), vec![Some("t1".to_string()), None, None]);
    assert!(!page.has_next());
}
