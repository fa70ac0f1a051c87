use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

pub struct ServerConfig {
    pub addr: SocketAddr,
    pub db_path: PathBuf,
    pub jwt_secret: String,
    pub token_ttl_days: i64,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = get("MOODTUNES_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("MOODTUNES_JWT_SECRET is unset or still a placeholder; set it in your .env file");
        }

        let host = get("MOODTUNES_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = get("MOODTUNES_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("MOODTUNES_PORT must be a port number")?;
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .context("MOODTUNES_HOST must be an IP address")?;

        let db_path: PathBuf = get("MOODTUNES_DB_PATH")
            .unwrap_or_else(|| "moodtunes.db".into())
            .into();

        let token_ttl_days = get("MOODTUNES_TOKEN_TTL_DAYS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            addr,
            db_path,
            jwt_secret,
            token_ttl_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let cfg = ServerConfig::from_lookup(lookup(&[("MOODTUNES_JWT_SECRET", "abc")])).unwrap();
        assert_eq!(cfg.addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.db_path, PathBuf::from("moodtunes.db"));
        assert_eq!(cfg.token_ttl_days, 30);
    }

    #[test]
    fn placeholder_or_missing_secret_is_rejected() {
        assert!(ServerConfig::from_lookup(lookup(&[])).is_err());
        assert!(
            ServerConfig::from_lookup(lookup(&[("MOODTUNES_JWT_SECRET", "dev-secret-change-me")])).is_err()
        );
    }

    #[test]
    fn bad_port_is_an_error() {
        let res = ServerConfig::from_lookup(lookup(&[
            ("MOODTUNES_JWT_SECRET", "abc"),
            ("MOODTUNES_PORT", "eighty"),
        ]));
        assert!(res.is_err());
    }
}
