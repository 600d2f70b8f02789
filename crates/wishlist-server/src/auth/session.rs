//! Shared-password login gate with signed session cookies.

use axum::http::{HeaderMap, header};
use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub const SESSION_COOKIE: &str = "wishlist_session";

const SESSION_SUBJECT: &str = "wishlist";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Wrong password")]
    InvalidCredential,
    #[error("Failed to sign session: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// An authenticated session, created by a successful login and attached to
/// every request that passes the gate.
#[derive(Debug, Clone)]
pub struct SessionContext {
    token: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Single-tenant login gate.
///
/// Holds the digest of the shared password and the key that signs session
/// tokens. There is no per-user identity.
pub struct SessionGate {
    password_hash: Vec<u8>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl SessionGate {
    pub fn new(password: &str, secret_key: &str, ttl_hours: u64) -> Self {
        let ttl_hours = i64::try_from(ttl_hours).unwrap_or(i64::MAX / 3600);
        Self {
            password_hash: hash_credential(password),
            encoding_key: EncodingKey::from_secret(secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret_key.as_bytes()),
            ttl: Duration::try_hours(ttl_hours).unwrap_or(Duration::MAX),
        }
    }

    /// Check the candidate credential and open a session on match.
    pub fn login(&self, candidate: &str) -> Result<SessionContext, AuthError> {
        if !constant_time_eq(&hash_credential(candidate), &self.password_hash) {
            return Err(AuthError::InvalidCredential);
        }

        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        let claims = Claims {
            sub: SESSION_SUBJECT.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)?;

        Ok(SessionContext { token, expires_at })
    }

    /// Validate a session token taken from a cookie.
    pub fn verify(&self, token: &str) -> Option<SessionContext> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding_key, &validation).ok()?;
        if data.claims.sub != SESSION_SUBJECT {
            return None;
        }
        let expires_at = DateTime::from_timestamp(data.claims.exp, 0)?;
        Some(SessionContext {
            token: token.to_string(),
            expires_at,
        })
    }

    /// Resolve the session carried by the request headers, if any.
    pub fn session_from_headers(&self, headers: &HeaderMap) -> Option<SessionContext> {
        let token = session_token(headers)?;
        self.verify(&token)
    }

    /// `Set-Cookie` value that stores the session in the browser.
    pub fn session_cookie(&self, session: &SessionContext) -> String {
        let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE, session.token(), max_age
        )
    }

    /// `Set-Cookie` value that removes the session from the browser.
    pub fn logout_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            SESSION_COOKIE
        )
    }
}

/// Extract the session token from the `Cookie` headers.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

fn hash_credential(value: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn gate() -> SessionGate {
        SessionGate::new("hunter2", "signing-secret", 24)
    }

    #[test]
    fn test_login_with_wrong_password() {
        let err = gate().login("letmein").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential));
    }

    #[test]
    fn test_login_issues_verifiable_token() {
        let gate = gate();
        let session = gate.login("hunter2").unwrap();

        let verified = gate.verify(session.token()).unwrap();
        assert_eq!(verified.expires_at.timestamp(), session.expires_at.timestamp());
        assert!(session.expires_at > Utc::now());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = SessionGate::new("hunter2", "other-secret", 24);
        let session = other.login("hunter2").unwrap();

        assert!(gate().verify(session.token()).is_none());
        assert!(gate().verify("not-a-token").is_none());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: SESSION_SUBJECT.to_string(),
            iat: now - 3600,
            exp: now - 5,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"signing-secret"),
        )
        .unwrap();

        assert!(gate().verify(&token).is_none());
    }

    #[test]
    fn test_login_compares_full_digest() {
        let gate = gate();
        assert!(gate.login("hunter").is_err());
        assert!(gate.login("hunter22").is_err());
        assert!(gate.login("").is_err());
        assert!(gate.login("hunter2").is_ok());
    }

    #[test]
    fn test_cookie_round_trip_through_headers() {
        let gate = gate();
        let session = gate.login("hunter2").unwrap();
        let cookie = gate.session_cookie(&session);
        assert!(cookie.contains("HttpOnly"));

        let pair = cookie.split(';').next().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}", pair)).unwrap(),
        );

        assert_eq!(session_token(&headers).as_deref(), Some(session.token()));
        assert!(gate.session_from_headers(&headers).is_some());
    }

    #[test]
    fn test_logout_cookie_clears_value() {
        let cookie = gate().logout_cookie();
        assert!(cookie.starts_with("wishlist_session=;"));
        assert!(cookie.contains("Max-Age=0"));

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("wishlist_session="));
        assert!(session_token(&headers).is_none());
    }
}
