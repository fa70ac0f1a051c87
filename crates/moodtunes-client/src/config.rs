use std::path::PathBuf;
use std::time::Duration;

/// Client settings, normally taken from `MOODTUNES_*` environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub storage_path: PathBuf,
    pub preview_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:3000".into(),
            storage_path: "moodtunes-local.db".into(),
            preview_url: "https://itunes.apple.com".into(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: get("MOODTUNES_API_URL").unwrap_or(defaults.api_url),
            storage_path: get("MOODTUNES_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            preview_url: get("MOODTUNES_PREVIEW_URL").unwrap_or(defaults.preview_url),
            timeout: get("MOODTUNES_HTTP_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_and_defaults() {
        let cfg = ClientConfig::from_lookup(|key: &str| match key {
            "MOODTUNES_API_URL" => Some("http://10.0.0.2:8080".into()),
            "MOODTUNES_HTTP_TIMEOUT_SECS" => Some("not-a-number".into()),
            _ => None,
        });
        assert_eq!(cfg.api_url, "http://10.0.0.2:8080");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert_eq!(cfg.preview_url, "https://itunes.apple.com");
        assert_eq!(cfg.storage_path, PathBuf::from("moodtunes-local.db"));
    }
}
