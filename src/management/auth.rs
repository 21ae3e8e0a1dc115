use std::path::PathBuf;

use chrono::Utc;

use crate::{Res, config, spotify, types::Token};

/// Seconds before the real expiry at which a token counts as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let content = async_fs::read_to_string(Self::token_path())
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and re-persisting it first when
    /// it is about to expire.
    pub async fn get_valid_token(&mut self) -> Res<String> {
        if self.is_expired() {
            self.token = spotify::auth::refresh_token(&self.token.refresh_token).await?;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        let lifetime = self.token.expires_in.saturating_sub(EXPIRY_MARGIN_SECS);
        now >= self.token.obtained_at + lifetime
    }

    fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        path
    }
}
