// =============================================================================
// FIREBASE SERVICE ACCOUNT AUTHENTICATION
// =============================================================================
//
// The realtime database REST API accepts a Google OAuth2 access token in the
// `access_token` query parameter. We mint one from the service account key
// (`firebase.json`) with the JWT bearer grant and cache it until shortly
// before it expires.
//
// **Setup:**
// 1. Firebase console > Project settings > Service accounts
// 2. "Generate new private key" and save it next to the bot as `firebase.json`
//    (or point `FIREBASE_CREDENTIALS` at it)

use crate::core::leaderboard::StoreError;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

/// Scopes needed to read and write the realtime database.
const FIREBASE_SCOPES: &str =
    "https://www.googleapis.com/auth/firebase.database https://www.googleapis.com/auth/userinfo.email";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Service account credentials from the JSON key file.
#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountCredentials {
    /// The service account email (used as issuer in JWT).
    client_email: String,

    /// The private key in PEM format.
    private_key: String,

    /// Where to exchange the JWT for an access token.
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// JWT claims for Google OAuth2.
#[derive(Debug, Serialize)]
struct JwtClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: u64,
    /// Max 1 hour after `iat`.
    exp: u64,
}

/// Response from Google's token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Cached access token with expiration.
struct CachedToken {
    token: String,
    expires_at: SystemTime,
}

/// Authenticator that handles OAuth2 with service account credentials.
pub struct ServiceAccountAuth {
    credentials: ServiceAccountCredentials,
    client: Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
}

impl ServiceAccountAuth {
    /// Creates a new authenticator from a JSON key file path.
    pub async fn from_file(path: &str) -> Result<Self, StoreError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            StoreError::Auth(format!("cannot read credential file {}: {}", path, e))
        })?;
        Self::from_json(&content)
    }

    /// Creates a new authenticator from JSON content.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let credentials: ServiceAccountCredentials = serde_json::from_str(json)?;
        Ok(Self {
            credentials,
            client: Client::new(),
            cached_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Service account email, for the startup log line.
    pub fn client_email(&self) -> &str {
        &self.credentials.client_email
    }

    /// Gets a valid access token, refreshing if necessary.
    pub async fn get_access_token(&self) -> Result<String, StoreError> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if token.expires_at > SystemTime::now() + Duration::from_secs(60) {
                    return Ok(token.token.clone());
                }
            }
        }

        let (token, lifetime) = self.fetch_new_token().await?;

        {
            let mut cached = self.cached_token.write().await;
            *cached = Some(CachedToken {
                token: token.clone(),
                expires_at: SystemTime::now() + lifetime,
            });
        }

        tracing::debug!("Refreshed Firebase access token");
        Ok(token)
    }

    /// Fetches a new access token from Google.
    async fn fetch_new_token(&self) -> Result<(String, Duration), StoreError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| StoreError::Auth(e.to_string()))?
            .as_secs();

        let claims = JwtClaims {
            iss: self.credentials.client_email.clone(),
            scope: FIREBASE_SCOPES.to_string(),
            aud: self.credentials.token_uri.clone(),
            iat: now,
            exp: now + 3600,
        };

        let header = Header::new(Algorithm::RS256);
        let key = EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())
            .map_err(|e| StoreError::Auth(format!("invalid private key: {}", e)))?;
        let jwt = encode(&header, &claims, &key).map_err(|e| StoreError::Auth(e.to_string()))?;

        let response = self
            .client
            .post(&self.credentials.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", &jwt),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth(format!(
                "token exchange failed ({}): {}",
                status, text
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        // Refresh a little early; 55 minutes when the endpoint doesn't say.
        let lifetime = token_response
            .expires_in
            .map(|secs| Duration::from_secs(secs.saturating_sub(300)))
            .unwrap_or(Duration::from_secs(55 * 60));

        Ok((token_response.access_token, lifetime))
    }
}
