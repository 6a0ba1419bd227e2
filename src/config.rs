use std::net::SocketAddr;

use anyhow::Context;

use crate::application::auth_service::Credentials;

pub const DEFAULT_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub credentials: Credentials,
    pub jwt_secret: String,
}

impl Config {
    /// Reads `BIND_ADDR`, `AUTH_USERNAME`, `AUTH_PASSWORD` and `JWT_SECRET`,
    /// falling back to development defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:3000".to_string());
        let bind_addr = bind_addr.parse().with_context(|| format!("invalid BIND_ADDR `{bind_addr}`"))?;
        Ok(Self {
            bind_addr,
            credentials: Credentials {
                username: lookup("AUTH_USERNAME").unwrap_or_else(|| "admin".to_string()),
                password: lookup("AUTH_PASSWORD").unwrap_or_else(|| "password".to_string()),
            },
            jwt_secret: lookup("JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
        })
    }
}
