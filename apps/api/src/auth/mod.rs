//! Session identity. Tokens are issued by the external auth service; this
//! module only verifies them and exposes the caller's user id.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::state::AppState;

/// JWT payload. `sub` is the user id that owns resumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

#[derive(Clone)]
pub struct JwtKeys {
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    #[cfg(test)]
    secret: String,
}

impl JwtKeys {
    pub fn from_config(config: &Config) -> Self {
        Self {
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            #[cfg(test)]
            secret: config.jwt_secret.clone(),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }

    #[cfg(test)]
    pub fn sign(&self, user_id: Uuid, ttl_secs: i64) -> String {
        use jsonwebtoken::{encode, EncodingKey, Header};

        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            iat: now as usize,
            exp: (now + ttl_secs) as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .unwrap()
    }
}

/// The authenticated caller. Rejects with 401 when the bearer token is
/// missing, malformed, expired, or issued for another audience.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .ok_or(AppError::Unauthorized)?;

        let claims = state.jwt.verify(token).map_err(|e| {
            debug!("Rejected bearer token: {e}");
            AppError::Unauthorized
        })?;

        Ok(CurrentUser(claims.sub))
    }
}
