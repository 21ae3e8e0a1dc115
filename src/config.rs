//! Configuration management for the playlist feature extractor.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_SCOPE: &str = "playlist-read-private playlist-read-collaborative";

/// Number of label-resolution chunks per playlist page when nothing else is
/// configured.
pub const DEFAULT_CHUNK_COUNT: usize = 10;

/// Returns the application's directory inside the platform data directory.
///
/// - Linux: `~/.local/share/sporfeat`
/// - macOS: `~/Library/Application Support/sporfeat`
/// - Windows: `%LOCALAPPDATA%/sporfeat`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporfeat");
    path
}

/// Loads environment variables from `.env` in the local data directory.
///
/// Creates the data directory if needed. A missing `.env` file is not an
/// error, since every key may also come from the real environment. Values
/// already present in the environment are never overwritten.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the address the local OAuth callback server binds to.
///
/// # Panics
///
/// Panics if `SERVER_ADDRESS` is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify application client id.
///
/// # Panics
///
/// Panics if `SPOTIFY_API_AUTH_CLIENT_ID` is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the OAuth redirect URI registered with the Spotify application.
///
/// # Panics
///
/// Panics if `SPOTIFY_API_REDIRECT_URI` is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the OAuth scope. Reading playlists only needs the playlist read
/// scopes, which is the default.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.to_string())
}

/// Returns the OAuth authorization endpoint.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string())
}

/// Returns the Web API base URL, e.g. `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the OAuth token exchange endpoint.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string())
}

/// Returns the configured chunk count for label resolution.
///
/// Reads `SPORFEAT_CHUNK_COUNT`; unset, unparsable or zero values fall back
/// to [`DEFAULT_CHUNK_COUNT`].
pub fn chunk_count() -> usize {
    env::var("SPORFEAT_CHUNK_COUNT")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_CHUNK_COUNT)
}
