mod common;

use common::{FakeSpotify, ids};
use serde_json::Value;
use sporfeat::{
    extract::{FeatureTable, cell_text, extract_playlist_features, parse_cell},
    management::FeatureTableManager,
};

#[tokio::test]
async fn test_persisted_table_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/features.csv");
    let mut fake = FakeSpotify::with_pages(vec![ids("t", 6)]);
    fake.albums.remove("album-t3");

    let table = extract_playlist_features(&fake, "playlist").await.unwrap();
    let table_mgr = FeatureTableManager::new(path.clone());
    assert!(!table_mgr.exists());

    table_mgr.persist(&table).await.unwrap();
    assert!(table_mgr.exists());

    let loaded = table_mgr.load().await.unwrap();
    assert_eq!(loaded, table);
    assert_eq!(loaded.labels().nth(2), Some(None));
}

#[tokio::test]
async fn test_written_csv_has_label_column_last() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("features.csv");
    let fake = FakeSpotify::with_pages(vec![ids("t", 2)]);

    let table = extract_playlist_features(&fake, "playlist").await.unwrap();
    FeatureTableManager::new(path.clone())
        .persist(&table)
        .await
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("danceability,energy,key,mode,tempo,type,id,uri,label")
    );
    assert_eq!(
        lines.next(),
        Some("0.5,0.8,5,1,120.0,audio_features,t1,spotify:track:t1,label-t1")
    );
    assert_eq!(content.lines().count(), 3);
}

#[tokio::test]
async fn test_load_keeps_numeric_looking_ids_as_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("features.csv");
    std::fs::write(
        &path,
        "energy,id,uri,label\n0.3,12345,spotify:track:12345,Warp\n",
    )
    .unwrap();

    let loaded = FeatureTableManager::new(path).load().await.unwrap();
    let row = &loaded.rows()[0];

    assert_eq!(row.features["energy"], Value::from(0.3));
    assert_eq!(row.features["id"], Value::from("12345"));
    assert_eq!(row.label.as_deref(), Some("Warp"));
    assert_eq!(
        loaded.records().next().unwrap(),
        vec!["0.3", "12345", "spotify:track:12345", "Warp"]
    );
}

#[tokio::test]
async fn test_load_without_label_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.csv");
    std::fs::write(&path, "id,energy\nt1,0.3\n").unwrap();

    let result = FeatureTableManager::new(path).load().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_empty_table_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let table_mgr = FeatureTableManager::new(dir.path().join("empty.csv"));

    table_mgr
        .persist(&FeatureTable::default())
        .await
        .unwrap();
    let loaded = table_mgr.load().await.unwrap();

    assert!(loaded.is_empty());
}

#[test]
fn test_cell_text_and_parse_cell() {
    assert_eq!(cell_text(&Value::Null), "");
    assert_eq!(cell_text(&Value::from("Ninja Tune")), "Ninja Tune");
    assert_eq!(cell_text(&Value::from(0.25)), "0.25");
    assert_eq!(cell_text(&Value::from(true)), "true");

    assert_eq!(parse_cell("energy", ""), Value::Null);
    assert_eq!(parse_cell("energy", "0.25"), Value::from(0.25));
    assert_eq!(parse_cell("key", "7"), Value::from(7));
    assert_eq!(parse_cell("mode", "false"), Value::from(false));
    assert_eq!(parse_cell("type", "audio_features"), Value::from("audio_features"));
    assert_eq!(parse_cell("name", "\"quoted\""), Value::from("\"quoted\""));
}

#[test]
fn test_parse_cell_keeps_text_columns_as_strings() {
    assert_eq!(parse_cell("id", "12345"), Value::from("12345"));
    assert_eq!(parse_cell("uri", "true"), Value::from("true"));
    assert_eq!(parse_cell("type", "1e3"), Value::from("1e3"));
    assert_eq!(parse_cell("id", ""), Value::Null);
}
