//! Export configuration

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up under the user's config directory
pub const SETTINGS_FILE: &str = "config.json";

/// Directory name under the user's config directory
pub const SETTINGS_DIR: &str = "dds-exporter";

/// Configuration for the export process
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Location of texconv.exe, fixed per installation
    pub texconv_path: PathBuf,

    /// Where intermediate PNGs are written (None = system temp dir)
    pub staging_dir: Option<PathBuf>,
}

impl ExportConfig {
    /// Create a new export configuration
    pub fn new(texconv_path: PathBuf) -> Self {
        Self {
            texconv_path,
            staging_dir: None,
        }
    }

    /// Write intermediate files to a specific directory
    pub fn with_staging_dir(mut self, dir: PathBuf) -> Self {
        self.staging_dir = Some(dir);
        self
    }

    /// Directory intermediate files go to
    pub fn staging_dir(&self) -> PathBuf {
        self.staging_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Resolve the configuration for this installation
    ///
    /// `texconv_path` is the value from the command line or `TEXCONV_PATH` and
    /// wins over the settings file. `settings_path` defaults to
    /// [`default_settings_path`] when it exists.
    pub fn resolve(
        texconv_path: Option<PathBuf>,
        settings_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let settings = match settings_path {
            Some(path) => Settings::load(path)?,
            None => match default_settings_path().filter(|p| p.is_file()) {
                Some(path) => Settings::load(&path)?,
                None => Settings::default(),
            },
        };

        let texconv_path = texconv_path
            .map(|p| expand(&p.to_string_lossy()))
            .or_else(|| settings.texconv_path.as_deref().map(expand))
            .ok_or(ConfigError::MissingToolPath)?;

        let mut config = Self::new(texconv_path);
        if let Some(dir) = settings.staging_dir.as_deref() {
            config = config.with_staging_dir(expand(dir));
        }

        log::debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }
}

/// Contents of the optional JSON settings file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Absolute path to texconv.exe (`~` is expanded)
    pub texconv_path: Option<String>,

    /// Directory for intermediate files
    pub staging_dir: Option<String>,
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }
}

/// `<config dir>/dds-exporter/config.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("texconv path is not configured (use --texconv, TEXCONV_PATH or texconv_path in the settings file)")]
    MissingToolPath,
}
