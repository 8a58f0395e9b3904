use crate::api::Options;
use config::{ConfigBuilder, ConfigError, File, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const DEFAULT_SUGGESTION_LIMIT: i64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionSettings {
    /// Maximum number of suggestions returned per keystroke.
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenerSettings {
    /// A quote must pass every rule (`true`) or any rule (`false`).
    pub require_all: bool,
}

/// Settings file layout:
///
/// ```toml
/// [suggestions]
/// limit = 10
///
/// [screener]
/// require_all = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub suggestions: SuggestionSettings,
    pub screener: ScreenerSettings,
}

impl Default for Settings {
    fn default() -> Self {
        let options = Options::default();
        Settings {
            suggestions: SuggestionSettings { limit: options.suggestion_limit },
            screener: ScreenerSettings { require_all: options.require_all },
        }
    }
}

impl Settings {
    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .set_default("suggestions.limit", DEFAULT_SUGGESTION_LIMIT)?
            .set_default("screener.require_all", true)
    }

    /// Load settings from the given TOML file; missing keys take defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let cfg = Self::builder()?.add_source(File::from(path)).build()?;
        let settings: Settings = cfg.try_deserialize()?;
        info!(path = %path.display(), limit = settings.suggestions.limit, "settings loaded");
        Ok(settings)
    }

    /// Load settings from `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::builder()?.build()?.try_deserialize(),
        }
    }

    pub fn options(&self) -> Options {
        Options { suggestion_limit: self.suggestions.limit, require_all: self.screener.require_all }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_a_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.options().suggestion_limit, 10);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[suggestions]\nlimit = 3").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.suggestions.limit, 3);
        assert!(settings.screener.require_all);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Settings::from_file(Path::new("/nonexistent/screener.toml")).is_err());
    }
}
