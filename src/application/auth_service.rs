use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{AppError, AppResult};
use crate::infrastructure::token_registry::TokenRegistry;

pub const TOKEN_TTL_MS: i64 = 60 * 60 * 1000;
pub const ROLE: &str = "admin";

pub trait Clock: Send + Sync + 'static {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 { Utc::now().timestamp_millis() }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock(AtomicI64);

impl ManualClock {
    pub fn new(now_ms: i64) -> Self { Self(AtomicI64::new(now_ms)) }
    pub fn set(&self, now_ms: i64) { self.0.store(now_ms, Ordering::SeqCst) }
    pub fn advance(&self, by_ms: i64) { self.0.fetch_add(by_ms, Ordering::SeqCst); }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 { self.0.load(Ordering::SeqCst) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    pub exp_ms: i64,
}

/// Issues bearer tokens for the configured operator and checks them on
/// every protected request.
pub struct AuthService {
    credentials: Credentials,
    key: EncodingKey,
    registry: TokenRegistry,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    pub fn new(credentials: Credentials, secret: &str, registry: TokenRegistry, clock: Arc<dyn Clock>) -> Self {
        Self { credentials, key: EncodingKey::from_secret(secret.as_bytes()), registry, clock }
    }

    /// `authorization` is the raw `Authorization` header value, if any.
    pub async fn login(&self, authorization: Option<&str>) -> AppResult<IssuedToken> {
        let supplied = authorization.and_then(basic_credentials).ok_or(AppError::MissingCredentials)?;
        if supplied != self.credentials {
            tracing::warn!(username = %supplied.username, "login rejected");
            return Err(AppError::InvalidCredentials);
        }

        let issued_ms = self.clock.now_ms();
        let exp_ms = issued_ms + TOKEN_TTL_MS;
        let claims = Claims {
            sub: supplied.username,
            role: ROLE.to_string(),
            iat: issued_ms.div_euclid(1000),
            exp: exp_ms.div_euclid(1000),
            jti: Uuid::new_v4().to_string(),
        };
        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.key)
            .map_err(|e| AppError::Internal(e.into()))?;
        self.registry.insert(token.clone(), exp_ms).await;
        tracing::info!(sub = %claims.sub, exp_ms, "token issued");
        Ok(IssuedToken { token, exp_ms })
    }

    pub async fn authorize(&self, authorization: Option<&str>) -> AppResult<()> {
        let token = authorization.and_then(bearer_token).ok_or(AppError::MissingCredentials)?;
        if self.registry.is_valid(token, self.clock.now_ms()).await {
            Ok(())
        } else {
            Err(AppError::InvalidOrExpiredToken)
        }
    }
}

fn basic_credentials(header: &str) -> Option<Credentials> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(Credentials { username: username.to_string(), password: password.to_string() })
}

fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}
