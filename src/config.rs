use crate::error::{EyeScanError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 解析サービスURLの環境変数
pub const SERVER_URL_ENV: &str = "EYE_SCAN_SERVER_URL";

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    /// 未設定ならタイムアウトなし
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "設定ファイルなし、既定値を使用");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            EyeScanError::Config(format!("{}: {}", config_path.display(), e))
        })?;
        tracing::debug!(path = %config_path.display(), server_url = %config.server_url, "設定を読み込みました");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        tracing::info!(path = %config_path.display(), "設定を保存しました");
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| EyeScanError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("eye-scan").join("config.json"))
    }

    /// 解析サービスURL（引数 > 環境変数 > 設定ファイル）
    pub fn resolve_server_url(&self, cli_override: Option<&str>) -> String {
        let url = match cli_override {
            Some(url) => url.to_string(),
            None => std::env::var(SERVER_URL_ENV)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| self.server_url.clone()),
        };
        url.trim().trim_end_matches('/').to_string()
    }

    pub fn set_server_url(&mut self, url: String) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(EyeScanError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.server_url = url;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert!(config.timeout_seconds.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"timeout_seconds": 30}"#).unwrap();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.timeout_seconds, Some(30));
    }

    #[test]
    fn test_cli_override_wins() {
        let config = Config::default();
        let url = config.resolve_server_url(Some("http://example.test:8080/"));
        assert_eq!(url, "http://example.test:8080");
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_load_from_broken_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ server_url: ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, EyeScanError::Config(ref msg) if msg.contains("config.json")));
    }
}
