//! Session token generation/validation and cookie helpers.
//!
//! The client authenticates against an external identity provider; this
//! server only mints its own HS256-signed session token for the provider's
//! user id. The token travels either as a `Bearer` header or as an
//! HttpOnly cookie named [`SESSION_COOKIE`].

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use taskory_core::types::UserId;

/// Name of the session cookie set by the auth endpoints.
pub const SESSION_COOKIE: &str = "taskory_session";

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the external identity provider's user id.
    pub sub: UserId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for session token generation and validation.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in days (default: 30).
    pub ttl_days: i64,
}

/// Default session lifetime in days.
const DEFAULT_TTL_DAYS: i64 = 30;

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `SESSION_SECRET`   | **yes**  | --      |
    /// | `SESSION_TTL_DAYS` | no       | `30`    |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let ttl_days: i64 = std::env::var("SESSION_TTL_DAYS")
            .unwrap_or_else(|_| DEFAULT_TTL_DAYS.to_string())
            .parse()
            .expect("SESSION_TTL_DAYS must be a valid i64");

        Self { secret, ttl_days }
    }

    /// Session lifetime in seconds, as used for `exp` and cookie max-age.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_days * 24 * 60 * 60
    }
}

/// Generate an HS256 session token for the given user id.
pub fn issue_token(
    user_id: &str,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + config.ttl_secs(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically.
pub fn verify_token(
    token: &str,
    config: &SessionConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// `Set-Cookie` value carrying a freshly issued session token.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        config.ttl_secs()
    )
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
