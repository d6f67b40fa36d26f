use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use blogscope_core::source::http::DEFAULT_API_URL;
use blogscope_core::{Locale, Period};
use colored::Colorize;
use serde::Deserialize;

static CONFIG: OnceLock<BlogscopeConfig> = OnceLock::new();

pub const CONFIG_ENV: &str = "BLOGSCOPE_CONFIG";
pub const API_URL_ENV: &str = "BLOGSCOPE_API_URL";
pub const TOKEN_ENV: &str = "BLOGSCOPE_TOKEN";
pub const LOCALE_ENV: &str = "BLOGSCOPE_LOCALE";

/// Contents of `~/.config/blogscope/config.toml`
///
/// ```toml
/// [api]
/// url = "https://admin.example.com/api"
/// token = "..."
///
/// [display]
/// locale = "uz"
/// period = "weekly"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogscopeConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    pub url: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    pub locale: Option<String>,
    pub period: Option<String>,
}

impl BlogscopeConfig {
    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|d| d.join("blogscope").join("config.toml"))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Load once per process. A missing file means defaults; a broken one warns and falls back.
    pub fn load() -> &'static BlogscopeConfig {
        CONFIG.get_or_init(|| {
            let Some(path) = Self::config_path() else {
                return Self::default();
            };
            if !path.exists() {
                return Self::default();
            }
            match Self::from_path(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded config");
                    config
                }
                Err(e) => {
                    eprintln!("{}", format!("Warning: {:#}", e).yellow());
                    Self::default()
                }
            }
        })
    }

    /// Priority: flag > BLOGSCOPE_API_URL > config file > default
    pub fn api_url(&self, flag: Option<String>) -> String {
        pick(flag, API_URL_ENV, self.api.url.as_deref())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn token(&self, flag: Option<String>) -> Option<String> {
        pick(flag, TOKEN_ENV, self.api.token.as_deref())
    }

    pub fn locale(&self, flag: Option<String>) -> Result<Locale> {
        match pick(flag, LOCALE_ENV, self.display.locale.as_deref()) {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(Locale::default()),
        }
    }

    pub fn period(&self, flag: Option<Period>) -> Result<Period> {
        if let Some(period) = flag {
            return Ok(period);
        }
        match self.display.period.as_deref() {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(Period::default()),
        }
    }
}

fn pick(flag: Option<String>, env_var: &str, file_value: Option<&str>) -> Option<String> {
    flag.or_else(|| std::env::var(env_var).ok().filter(|v| !v.is_empty()))
        .or_else(|| file_value.map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::NamedTempFile;

    fn config_from(toml_src: &str) -> BlogscopeConfig {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn test_empty_config_defaults() {
        let config = config_from("");
        assert!(config.api.url.is_none());
        assert!(config.display.locale.is_none());
    }

    #[test]
    fn test_from_path_reads_sections() {
        let file = NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            "[api]\nurl = \"https://cms.example.com\"\n\n[display]\nlocale = \"uz\"\nperiod = \"monthly\"\n",
        )
        .unwrap();

        let config = BlogscopeConfig::from_path(file.path()).unwrap();
        assert_eq!(config.api.url.as_deref(), Some("https://cms.example.com"));
        assert_eq!(config.display.locale.as_deref(), Some("uz"));
        assert_eq!(config.period(None).unwrap(), Period::Monthly);
    }

    #[test]
    fn test_from_path_rejects_bad_toml() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "[api\nurl = ").unwrap();
        assert!(BlogscopeConfig::from_path(file.path()).is_err());
    }

    #[test]
    #[serial]
    fn test_api_url_precedence() {
        let config = config_from("[api]\nurl = \"https://from-file\"\n");

        std::env::remove_var(API_URL_ENV);
        assert_eq!(config.api_url(None), "https://from-file");

        std::env::set_var(API_URL_ENV, "https://from-env");
        assert_eq!(config.api_url(None), "https://from-env");
        assert_eq!(
            config.api_url(Some("https://from-flag".to_string())),
            "https://from-flag"
        );
        std::env::remove_var(API_URL_ENV);

        assert_eq!(BlogscopeConfig::default().api_url(None), DEFAULT_API_URL);
    }

    #[test]
    #[serial]
    fn test_empty_env_is_ignored() {
        let config = config_from("[api]\ntoken = \"file-token\"\n");
        std::env::set_var(TOKEN_ENV, "");
        assert_eq!(config.token(None).as_deref(), Some("file-token"));
        std::env::remove_var(TOKEN_ENV);
    }

    #[test]
    #[serial]
    fn test_locale_resolution() {
        std::env::remove_var(LOCALE_ENV);
        let config = config_from("[display]\nlocale = \"uz-UZ\"\n");
        assert_eq!(config.locale(None).unwrap(), Locale::Uz);
        assert_eq!(config.locale(Some("en".to_string())).unwrap(), Locale::En);
        assert!(config.locale(Some("klingon".to_string())).is_err());
        assert_eq!(BlogscopeConfig::default().locale(None).unwrap(), Locale::En);
    }

    #[test]
    fn test_period_flag_wins() {
        let config = config_from("[display]\nperiod = \"yearly\"\n");
        assert_eq!(config.period(Some(Period::Weekly)).unwrap(), Period::Weekly);
        assert_eq!(config.period(None).unwrap(), Period::Yearly);

        let broken = config_from("[display]\nperiod = \"fortnightly\"\n");
        assert!(broken.period(None).is_err());
    }
}
