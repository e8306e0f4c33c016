//! Caller authentication. Tokens are issued by an external identity provider;
//! this service only asks the provider who a bearer token belongs to.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::state::AppState;

const MISSING_HEADER: &str = "Authorization header is missing.";
const INVALID_TOKEN: &str = "Invalid or expired token.";

/// A caller whose token the identity provider accepted.
/// Only `id` is read from the provider's user payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUser {
    pub id: String,
}

/// Resolves a bearer token to a user. Carried in `AppState` as `Arc<dyn IdentityVerifier>`.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// `Unauthorized` when the provider rejects the token,
    /// `Identity` when the provider cannot be reached.
    async fn verify(&self, token: &str) -> Result<AuthUser, AppError>;
}

/// Verifies tokens against a Supabase-compatible `GET /auth/v1/user` endpoint.
#[derive(Clone)]
pub struct SupabaseIdentity {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseIdentity {
    pub fn new(base_url: &str, api_key: String) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl IdentityVerifier for SupabaseIdentity {
    async fn verify(&self, token: &str) -> Result<AuthUser, AppError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::Identity(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Identity(format!("status {status}: {body}")));
        }
        if !status.is_success() {
            debug!("Identity provider rejected token with status {status}");
            return Err(AppError::Unauthorized(INVALID_TOKEN.to_string()));
        }

        response
            .json::<AuthUser>()
            .await
            .map_err(|e| AppError::Identity(format!("malformed user payload: {e}")))
    }
}

/// The credential is the second whitespace-separated token of the header,
/// e.g. `Bearer <token>`.
pub fn bearer_token(header: &str) -> Option<&str> {
    header.split_whitespace().nth(1)
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized(MISSING_HEADER.to_string()))?;

        let token = header
            .to_str()
            .ok()
            .and_then(bearer_token)
            .ok_or_else(|| AppError::Unauthorized(INVALID_TOKEN.to_string()))?;

        let user = state.identity.verify(token).await.inspect_err(|e| {
            if matches!(e, AppError::Unauthorized(_)) {
                warn!("Token rejected, authentication denied");
            }
        })?;

        Ok(user)
    }
}
