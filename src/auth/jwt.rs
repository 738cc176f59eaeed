use crate::auth::config::AuthConfig;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, thiserror::Error)]
pub enum SessionJwtError {
    #[error("could not issue token: {0}")]
    Issue(String),
    #[error("verification error: {0}")]
    Verify(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    iss: String,
    aud: String,
    pub sub: String, // employee_id
    pub role: String,
    iat: u64,
    exp: u64,
}

pub fn issue_session_jwt(
    employee_id: &str,
    role: &str,
    cfg: &AuthConfig,
) -> Result<String, SessionJwtError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let claims = SessionClaims {
        iss: cfg.issuer.clone(),
        aud: cfg.audience.clone(),
        sub: employee_id.to_string(),
        role: role.to_string(),
        iat: now,
        exp: now + cfg.expiry_secs,
    };
    let header = Header::new(Algorithm::HS256);
    encode(
        &header,
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
    .map_err(|e| SessionJwtError::Issue(e.to_string()))
}

pub fn verify_session_jwt(token: &str, cfg: &AuthConfig) -> Result<SessionClaims, SessionJwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[cfg.issuer.as_str()]);
    validation.set_audience(&[cfg.audience.as_str()]);
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| SessionJwtError::Verify(e.to_string()))?;
    Ok(data.claims)
}
