//! # CLI Module
//!
//! User-facing commands of the playlist feature extractor. Each command
//! wires configuration, token storage, the Spotify client and the
//! extraction core together and reports progress with the status macros.
//!
//! ## Commands
//!
//! - [`auth`] - authorize with Spotify through the OAuth 2.0 PKCE flow
//! - [`extract`] - extract (or load the saved) feature table of a playlist
//!
//! ## Caching
//!
//! `extract` saves each table as CSV. When the output file already exists
//! it is read back instead of querying Spotify, unless `--force` is given.
//!
//! ## Usage
//!
//! ```bash
//! sporfeat auth
//! sporfeat extract spotify:playlist:37i9dQZF1DXcBWIGoYBM5M
//! sporfeat extract https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M \
//!     --out features.csv --preview 5
//! ```

mod auth;
mod extract;

pub use auth::auth;
pub use extract::extract;
