use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::gateway::API_URL;

/// Credentials and endpoint for a [`crate::Client`].
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub webhook_secret: String,
    pub base_url: String,
}

fn default_base_url() -> String {
    API_URL.to_string()
}

/// File contents before environment overrides; every key may be missing.
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    api_key: Option<String>,
    webhook_secret: Option<String>,
    base_url: Option<String>,
}

impl Config {
    pub fn new(api_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            webhook_secret: webhook_secret.into(),
            base_url: default_base_url(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("webhook_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".clickup")
        .join("config.toml")
}

/// Load `~/.clickup/config.toml`, with `CLICKUP_*` environment variables taking precedence.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    let file = if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?
    } else {
        ConfigFile::default()
    };

    resolve(file, |name| std::env::var(name).ok(), path)
}

fn resolve(
    file: ConfigFile,
    env: impl Fn(&str) -> Option<String>,
    path: &Path,
) -> Result<Config> {
    let api_key = env("CLICKUP_API_KEY").or(file.api_key);
    let webhook_secret = env("CLICKUP_WEBHOOK_SECRET").or(file.webhook_secret);
    let base_url = env("CLICKUP_BASE_URL")
        .or(file.base_url)
        .unwrap_or_else(default_base_url);

    let Some(api_key) = api_key.filter(|k| !k.is_empty()) else {
        bail!(
            "No API key configured. Set CLICKUP_API_KEY or api_key in {}",
            path.display()
        );
    };

    // An empty HMAC key would let anyone forge a valid signature.
    let Some(webhook_secret) = webhook_secret.filter(|s| !s.is_empty()) else {
        bail!(
            "No webhook secret configured. Set CLICKUP_WEBHOOK_SECRET or webhook_secret in {}",
            path.display()
        );
    };

    Ok(Config {
        api_key,
        webhook_secret,
        base_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn parse(contents: &str) -> ConfigFile {
        toml::from_str(contents).unwrap()
    }

    #[test]
    fn reads_all_keys_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_key = \"pk_1\"\nwebhook_secret = \"s3cret\"\nbase_url = \"http://localhost:9000\"\n",
        )
        .unwrap();

        let file = parse(&std::fs::read_to_string(&path).unwrap());
        let config = resolve(file, no_env, &path).unwrap();
        assert_eq!(config.api_key, "pk_1");
        assert_eq!(config.webhook_secret, "s3cret");
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    fn base_url_defaults_to_production() {
        let config = resolve(
            parse("api_key = \"pk_1\"\nwebhook_secret = \"s\""),
            no_env,
            Path::new("c.toml"),
        )
        .unwrap();
        assert_eq!(config.base_url, API_URL);
    }

    #[test]
    fn missing_webhook_secret_is_an_error() {
        let err =
            resolve(parse("api_key = \"pk_1\""), no_env, Path::new("/tmp/c.toml")).unwrap_err();
        assert!(err.to_string().contains("No webhook secret configured"));
        assert!(err.to_string().contains("/tmp/c.toml"));
    }

    #[test]
    fn empty_webhook_secret_is_an_error() {
        let err = resolve(
            parse("api_key = \"pk_1\"\nwebhook_secret = \"\""),
            no_env,
            Path::new("c.toml"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("No webhook secret configured"));
    }

    #[test]
    fn environment_overrides_file() {
        let env: HashMap<&str, &str> = [
            ("CLICKUP_API_KEY", "pk_env"),
            ("CLICKUP_BASE_URL", "http://stub"),
        ]
        .into_iter()
        .collect();

        let config = resolve(
            parse("api_key = \"pk_file\"\nwebhook_secret = \"file_secret\""),
            |name| env.get(name).map(|v| v.to_string()),
            Path::new("c.toml"),
        )
        .unwrap();
        assert_eq!(config.api_key, "pk_env");
        assert_eq!(config.webhook_secret, "file_secret");
        assert_eq!(config.base_url, "http://stub");
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = resolve(ConfigFile::default(), no_env, Path::new("/tmp/c.toml")).unwrap_err();
        assert!(err.to_string().contains("/tmp/c.toml"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_key = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn debug_redacts_secrets() {
        let debug = format!("{:?}", Config::new("pk_live", "whsec"));
        assert!(!debug.contains("pk_live"));
        assert!(!debug.contains("whsec"));
    }
}
