//! Persisted user preferences.
//!
//! A small JSON key-value file in the local data directory. The only key in
//! use today is `theme`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

const THEME_KEY: &str = "theme";

/// Light or dark appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

/// Key-value store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct Preferences {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl Preferences {
    /// `<local data dir>/bookfinder/preferences.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("bookfinder").join("preferences.json"))
    }

    /// Store that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: BTreeMap::new(),
        }
    }

    /// Open the store at the default location.
    pub fn open_default() -> Self {
        match Self::default_path() {
            Some(path) => Self::open(path),
            None => {
                tracing::warn!("No local data directory, preferences will not persist");
                Self::in_memory()
            }
        }
    }

    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::read(&path) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("Ignoring unreadable preferences at {:?}: {}", path, e);
                BTreeMap::new()
            }
        };

        Self {
            path: Some(path),
            values,
        }
    }

    fn read(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set `key` and write the store through to disk.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Saved theme; anything other than `"dark"` means light.
    pub fn theme(&self) -> ThemeMode {
        match self.get(THEME_KEY) {
            Some("dark") => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    pub fn set_theme(&mut self, theme: ThemeMode) -> Result<()> {
        self.set(THEME_KEY, theme.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_defaults_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::open(dir.path().join("preferences.json"));
        assert_eq!(prefs.theme(), ThemeMode::Light);
    }

    #[test]
    fn test_theme_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let mut prefs = Preferences::open(&path);
        prefs.set_theme(ThemeMode::Dark).unwrap();

        let reloaded = Preferences::open(&path);
        assert_eq!(reloaded.theme(), ThemeMode::Dark);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"theme\": \"dark\""));
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "not json").unwrap();

        let mut prefs = Preferences::open(&path);
        assert_eq!(prefs.theme(), ThemeMode::Light);

        prefs.set_theme(ThemeMode::Dark).unwrap();
        assert_eq!(Preferences::open(&path).theme(), ThemeMode::Dark);
    }

    #[test]
    fn test_unknown_value_means_light() {
        let mut prefs = Preferences::in_memory();
        prefs.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(prefs.theme(), ThemeMode::Light);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert!(ThemeMode::Light.toggled().is_dark());
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }
}
