use livemark_engine::{MarkerKind, MarkerKinds};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// User settings, read from `~/.config/livemark/config.toml`.
///
/// Every field is optional in the file:
///
/// ```toml
/// hidden_markers = ["heading-mark", "quote-mark"]
/// scroll_margin = 5
/// untitled_path = "~/notes/scratch.md"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Marker kinds the editor hides. An empty list turns masking off.
    pub hidden_markers: Vec<MarkerKind>,
    /// Lines kept between the caret and the top or bottom of the screen.
    pub scroll_margin: usize,
    /// Where a document opened without a file is saved.
    pub untitled_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hidden_markers: MarkerKind::ALL.to_vec(),
            scroll_margin: 3,
            untitled_path: PathBuf::from("document.md"),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded path
        config.untitled_path =
            Self::expand_path(&config.untitled_path).unwrap_or(config.untitled_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/livemark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// The configured marker kinds as a set for the masking engine.
    pub fn marker_kinds(&self) -> MarkerKinds {
        self.hidden_markers.iter().collect()
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
