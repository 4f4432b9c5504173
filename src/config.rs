//! Viewer configuration.
//!
//! [`Config`] is the optional, partially filled layer read from the TOML config file or
//! built from command-line flags. Layers are merged and resolved into [`Settings`], the
//! validated values the application runs with.

use crate::error::{MedlistError, Result};
use crate::listing::PageSize;
use crate::records::RecordKind;
use crate::render::ui::ColorTheme;
use serde::Deserialize;
use std::time::Duration;

#[cfg(feature = "config")]
use std::path::{Path, PathBuf};

const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// One configuration layer. Unset fields fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub page_size: Option<usize>,
    pub theme: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub default_tab: Option<String>,
}

impl Config {
    /// Overlay `other` on top of `self`; values set in `other` win
    pub fn merge(self, other: Config) -> Config {
        Config {
            page_size: other.page_size.or(self.page_size),
            theme: other.theme.or(self.theme),
            poll_interval_ms: other.poll_interval_ms.or(self.poll_interval_ms),
            default_tab: other.default_tab.or(self.default_tab),
        }
    }

    /// Validate and fill in defaults
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::default();
        if let Some(size) = self.page_size {
            settings.page_size = PageSize::try_from(size)?;
        }
        if let Some(theme) = &self.theme {
            settings.theme = theme.parse()?;
        }
        if let Some(ms) = self.poll_interval_ms {
            if ms == 0 {
                return Err(MedlistError::config("poll_interval_ms must be positive"));
            }
            settings.poll_interval = Duration::from_millis(ms);
        }
        if let Some(tab) = &self.default_tab {
            settings.initial_tab = parse_tab(tab)?;
        }
        Ok(settings)
    }
}

#[cfg(feature = "config")]
impl Config {
    /// `<config_dir>/medlist/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("medlist").join("config.toml"))
    }

    /// Read the default config file. A missing file is an empty layer.
    pub fn load_default() -> Result<Config> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MedlistError::file_error(format!("Failed to read config {}", path.display()), e)
        })?;
        log::debug!("loaded config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Config> {
        toml::from_str(contents).map_err(|e| MedlistError::config(e.to_string()))
    }
}

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub page_size: PageSize,
    pub theme: ColorTheme,
    /// How long the input thread waits for an event before checking for shutdown
    pub poll_interval: Duration,
    pub initial_tab: RecordKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            theme: ColorTheme::default(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            initial_tab: RecordKind::Lab,
        }
    }
}

/// Parse a panel name as used by `--tab` and `default_tab`
pub fn parse_tab(name: &str) -> Result<RecordKind> {
    match name.trim().to_ascii_lowercase().as_str() {
        "labs" | "lab" => Ok(RecordKind::Lab),
        "medications" | "medication" | "meds" => Ok(RecordKind::Medication),
        other => Err(MedlistError::config(format!(
            "unknown tab '{other}' (expected labs or medications)"
        ))),
    }
}
