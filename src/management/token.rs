use std::path::PathBuf;

use chrono::Utc;
use reqwest::Client;

use crate::{config, types::Token};

/// Safety margin subtracted from the token lifetime so requests in flight
/// never race the actual expiry.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Errors from the token lifecycle.
#[derive(Debug)]
pub enum AuthError {
    /// No usable token exists; the user must run `genrecli auth` again.
    Required,
    /// The refresh endpoint rejected the stored refresh token.
    Refresh(String),
    Io(std::io::Error),
    Serde(serde_json::Error),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Required => write!(f, "authorization required, run genrecli auth"),
            AuthError::Refresh(e) => write!(f, "token refresh failed: {}", e),
            AuthError::Io(e) => write!(f, "token store error: {}", e),
            AuthError::Serde(e) => write!(f, "token parse error: {}", e),
        }
    }
}

impl std::error::Error for AuthError {}

/// Pure expiry check so the policy can be tested without a real clock.
pub fn token_expired(token: &Token, now: u64) -> bool {
    now + EXPIRY_MARGIN_SECS >= token.obtained_at + token.expires_in
}

/// Owns the persisted OAuth token set and its lifecycle.
///
/// The token record lives at `genrecli/cache/token.json` in the local data
/// directory. It is created by the authorization-code exchange, mutated in
/// place on refresh and deleted on logout or refresh failure.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, AuthError> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|_| AuthError::Required)?;
        let token: Token = serde_json::from_str(&content).map_err(AuthError::Serde)?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), AuthError> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await.map_err(AuthError::Io)?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(AuthError::Serde)?;
        async_fs::write(&path, json).await.map_err(AuthError::Io)
    }

    /// Returns a non-expired access token, refreshing transparently.
    ///
    /// An expired record triggers exactly one refresh call. On refresh
    /// failure (revoked or missing refresh token) the stored record is
    /// deleted and `AuthError::Required` is returned; the caller never
    /// proceeds with a stale token.
    pub async fn get_valid_token(&mut self) -> Result<String, AuthError> {
        if self.is_expired() {
            if self.token.refresh_token.is_empty() {
                // cannot be silently renewed
                Self::clear().await?;
                return Err(AuthError::Required);
            }

            match self.refresh_token().await {
                Ok(new_token) => {
                    self.token = new_token;
                    self.persist().await?;
                }
                Err(e) => {
                    Self::clear().await?;
                    crate::warning!("Token refresh rejected: {}", e);
                    return Err(AuthError::Required);
                }
            }
        }

        Ok(self.token.access_token.clone())
    }

    /// Deletes the persisted token record. Idempotent.
    pub async fn clear() -> Result<(), AuthError> {
        match async_fs::remove_file(Self::token_path()).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::Io(e)),
        }
    }

    fn is_expired(&self) -> bool {
        token_expired(&self.token, Utc::now().timestamp() as u64)
    }

    async fn refresh_token(&self) -> Result<Token, String> {
        let client = Client::new();
        let res = client
            .post(&config::spotify_apitoken_url())
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", &self.token.refresh_token),
                ("client_id", &config::spotify_client_id()),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        let json: serde_json::Value = res.json().await.map_err(|e| e.to_string())?;

        let access_token = json["access_token"]
            .as_str()
            .ok_or_else(|| "refresh response carried no access token".to_string())?
            .to_string();

        Ok(Token {
            access_token,
            // the refresh token may or may not rotate
            refresh_token: json["refresh_token"]
                .as_str()
                .unwrap_or(&self.token.refresh_token)
                .to_string(),
            scope: json["scope"]
                .as_str()
                .unwrap_or(&self.token.scope)
                .to_string(),
            expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("genrecli/cache/token.json");
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
