//! Configuration management

use crate::core::api::normalize_base;
use crate::error::Result;
use crate::types::Config;
use crate::utils::paths::{ensure_dir, get_config_path};
use std::path::Path;
use tokio::fs;
use tokio::process::Command;
use tracing::warn;

/// Environment variable overriding the configured API base
pub const API_BASE_ENV: &str = "VIDEO_DASH_API_BASE";

/// Load configuration from the default location
pub async fn load_config() -> Result<Config> {
    load_config_from(&get_config_path()).await
}

/// Load configuration from file, falling back to defaults for anything missing
pub async fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Like [`load_config_from`], but an unreadable file yields defaults.
///
/// Used by `--edit`, which has to work on a broken file.
pub async fn load_config_or_default_from(path: &Path) -> Config {
    match load_config_from(path).await {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            Config::default()
        }
    }
}

/// Save configuration to file
pub async fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content).await?;
    Ok(())
}

/// Apply overrides and validate.
///
/// The API base comes from, in order: the command line, the environment, the
/// config file, the built-in default.
pub fn resolve(
    mut config: Config,
    cli_base: Option<String>,
    env_base: Option<String>,
) -> Result<Config> {
    if let Some(base) = cli_base.or(env_base).filter(|b| !b.trim().is_empty()) {
        config.api_base = base;
    }
    config.api_base = normalize_base(&config.api_base)?;
    Ok(config)
}

/// Open config file in editor
pub async fn edit_config(editor: &str) -> Result<()> {
    let config_path = get_config_path();

    // Ensure config file exists
    if !config_path.exists() {
        save_config_to(&config_path, &Config::default()).await?;
    }

    Command::new(editor)
        .arg(&config_path)
        .status()
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.json")).await.unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let cfg = Config {
            api_base: "https://videos.example.com".into(),
            request_timeout_secs: Some(5),
            ..Config::default()
        };

        save_config_to(&path, &cfg).await.unwrap();
        assert_eq!(load_config_from(&path).await.unwrap(), cfg);
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = load_config_from(&path).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ParseError);
    }

    #[tokio::test]
    async fn test_malformed_file_still_loads_for_editing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let cfg = load_config_or_default_from(&path).await;
        assert_eq!(cfg.editor, Config::default().editor);
    }

    #[test]
    fn test_resolve_precedence() {
        let file = Config {
            api_base: "http://from-file:8000".into(),
            ..Config::default()
        };

        let cli = Some("http://from-cli/".to_string());
        let cfg = resolve(file.clone(), cli, Some("http://from-env".into())).unwrap();
        assert_eq!(cfg.api_base, "http://from-cli");

        let cfg = resolve(file.clone(), None, Some("http://from-env".into())).unwrap();
        assert_eq!(cfg.api_base, "http://from-env");

        let cfg = resolve(file, None, Some("  ".into())).unwrap();
        assert_eq!(cfg.api_base, "http://from-file:8000");

        let cfg = resolve(Config::default(), None, None).unwrap();
        assert_eq!(cfg.api_base, "http://localhost:8000");
    }

    #[test]
    fn test_resolve_rejects_bad_scheme() {
        let err = resolve(Config::default(), Some("ftp://videos".into()), None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
    }
}
