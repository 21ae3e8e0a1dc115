//! # API Module
//!
//! HTTP endpoints served by the temporary local server that `sporfeat auth`
//! starts while the user authorizes the application in the browser.
//!
//! ## Endpoints
//!
//! - [`callback`] - `GET /callback`, receives Spotify's redirect and
//!   completes the PKCE code exchange
//! - [`health`] - `GET /health`, reports that the server is up
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use sporfeat::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
