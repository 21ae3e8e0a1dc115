use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    Res, config,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{PkceToken, Token},
    utils, warning,
};

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    scope: Option<String>,
    expires_in: u64,
}

impl TokenResponse {
    fn into_token(self, previous_refresh_token: Option<&str>) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .or_else(|| previous_refresh_token.map(str::to_string))
                .unwrap_or_default(),
            scope: self.scope.unwrap_or_default(),
            expires_in: self.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

/// Runs the OAuth 2.0 PKCE flow and persists the resulting token.
///
/// Starts the local callback server, opens the authorization URL in the
/// browser (printing it when no browser can be launched) and waits for the
/// callback handler to store the exchanged token in `shared_state`.
///
/// # Errors
///
/// Fails when the authorization URL cannot be built, when no token arrives
/// within two minutes, or when the token cannot be written to the cache.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Res<()> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    let auth_url = Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", config::spotify_client_id()),
            ("response_type", "code".to_string()),
            ("redirect_uri", config::spotify_redirect_uri()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256".to_string()),
            ("scope", config::spotify_scope()),
        ],
    )?;

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state)
        .await
        .ok_or("Authentication failed or timed out.")?;

    TokenManager::new(token).persist().await?;
    success!("Authentication successful!");
    Ok(())
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    let start = Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        {
            let lock = shared_state.lock().await;
            if let Some(token) = lock.as_ref().and_then(|p| p.token.clone()) {
                return Some(token);
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code plus PKCE verifier for a token.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, reqwest::Error> {
    let client_id = config::spotify_client_id();
    let redirect_uri = config::spotify_redirect_uri();

    let res = Client::new()
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json = res.json::<TokenResponse>().await?;
    Ok(json.into_token(None))
}

/// Requests a fresh access token. Spotify may omit a new refresh token, in
/// which case the current one is kept.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, reqwest::Error> {
    let client_id = config::spotify_client_id();

    let res = Client::new()
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json = res.json::<TokenResponse>().await?;
    Ok(json.into_token(Some(refresh_token)))
}
