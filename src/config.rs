//! Configuration management for bookfinder.
//!
//! Everything has a default, so a missing config file is not an error.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Largest page size either provider accepts.
pub const MAX_PAGE_SIZE: usize = 40;

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "BOOKFINDER_CONFIG";

/// Environment variable overriding the configured provider.
pub const PROVIDER_ENV: &str = "BOOKFINDER_PROVIDER";

/// Which catalog to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Google,
    #[value(name = "openlibrary", alias = "ol")]
    OpenLibrary,
}

impl ProviderKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "google" | "googlebooks" | "google-books" => Some(Self::Google),
            "openlibrary" | "open-library" | "ol" => Some(Self::OpenLibrary),
            _ => None,
        }
    }
}

/// Shape of the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormLayout {
    /// Separate title, author and subject inputs
    #[default]
    Fields,
    /// One free-text input
    FreeText,
}

/// Main configuration structure for bookfinder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderKind,
    pub layout: FormLayout,
    pub page_size: usize,
    pub google_url: String,
    pub openlibrary_url: String,
    pub request_timeout_secs: u64,
    pub greeting_secs: u64,
    pub error_secs: u64,
    pub greeting_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Google,
            layout: FormLayout::Fields,
            page_size: 20,
            google_url: "https://www.googleapis.com/books/v1/volumes".to_string(),
            openlibrary_url: "https://openlibrary.org/search.json".to_string(),
            request_timeout_secs: 15,
            greeting_secs: 20,
            error_secs: 5,
            greeting_name: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.page_size = config.page_size.clamp(1, MAX_PAGE_SIZE);
        Ok(config)
    }

    /// Load from `$BOOKFINDER_CONFIG` or the default location, then apply
    /// environment overrides. Falls back to defaults when no file exists.
    pub fn discover() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(Self::default_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from {:?}", path);
                Self::load(&path)?
            }
            _ => Self::default(),
        };

        if let Ok(name) = std::env::var(PROVIDER_ENV) {
            config.provider = ProviderKind::parse(&name)
                .ok_or_else(|| Error::Config(format!("unknown provider: {name}")))?;
        }

        Ok(config)
    }

    /// `<config dir>/bookfinder/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bookfinder").join("config.toml"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn greeting_duration(&self) -> Duration {
        Duration::from_secs(self.greeting_secs)
    }

    pub fn error_duration(&self) -> Duration {
        Duration::from_secs(self.error_secs)
    }

    pub fn greeting(&self) -> String {
        match self.greeting_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("👋 Welcome, {name}!"),
            _ => "👋 Welcome!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_provider_and_layout() {
        let config = Config::from_toml(
            r#"
provider = "openlibrary"
layout = "free_text"
greeting_name = "Alex"
"#,
        )
        .unwrap();
        assert_eq!(config.provider, ProviderKind::OpenLibrary);
        assert_eq!(config.layout, FormLayout::FreeText);
        assert_eq!(config.greeting(), "👋 Welcome, Alex!");
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_page_size_is_clamped() {
        assert_eq!(Config::from_toml("page_size = 0").unwrap().page_size, 1);
        assert_eq!(
            Config::from_toml("page_size = 500").unwrap().page_size,
            MAX_PAGE_SIZE
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("provider = \"altavista\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "error_secs = 2\nrequest_timeout_secs = 3").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.error_duration(), Duration::from_secs(2));
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_provider_names() {
        assert_eq!(ProviderKind::parse("Google"), Some(ProviderKind::Google));
        assert_eq!(ProviderKind::parse("ol"), Some(ProviderKind::OpenLibrary));
        assert_eq!(ProviderKind::parse("bing"), None);
    }

    #[test]
    fn test_blank_greeting_name() {
        let config = Config {
            greeting_name: Some("  ".to_string()),
            ..Config::default()
        };
        assert_eq!(config.greeting(), "👋 Welcome!");
    }
}
