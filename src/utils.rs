use std::{path::PathBuf, time::Duration};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::config;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Extracts the playlist id from any of the accepted playlist references.
///
/// Accepts a bare id, a `spotify:playlist:<id>` URI or an
/// `https://open.spotify.com/playlist/<id>?si=...` URL. Query strings and
/// trailing slashes are dropped.
pub fn playlist_id_from_ref(playlist_ref: &str) -> String {
    let playlist_ref = playlist_ref.trim();

    let id = if let Some(rest) = playlist_ref.strip_prefix("spotify:playlist:") {
        rest
    } else if let Some(idx) = playlist_ref.find("playlist/") {
        &playlist_ref[idx + "playlist/".len()..]
    } else {
        playlist_ref
    };

    let id = id.split(['?', '#']).next().unwrap_or(id);
    id.trim_end_matches('/').to_string()
}

/// Returns where the feature table of a playlist is cached when no output
/// path is given: `<data-dir>/features/<playlist-id>.csv`.
pub fn default_output_path(playlist_ref: &str) -> PathBuf {
    let mut path = config::data_dir();
    path.push("features");
    path.push(format!("{}.csv", playlist_id_from_ref(playlist_ref)));
    path
}

/// Builds the blue braille spinner used for long-running operations.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
