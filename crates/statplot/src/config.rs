//! Render configuration
//!
//! Image sizes, formats and the output directory, optionally loaded from a
//! YAML file. Every key is optional; absent keys keep the per-figure
//! defaults.
//!
//! ```yaml
//! out_dir: img
//! sigma:
//!   width: 1400
//! climate:
//!   format: svg
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::render::ImageFormat;

/// Default directory figures are written to
pub const DEFAULT_OUT_DIR: &str = "img";

/// Size and encoding of one figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureSettings {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

impl FigureSettings {
    pub fn sigma() -> Self {
        Self {
            width: 1150,
            height: 450,
            format: ImageFormat::Svg,
        }
    }

    pub fn distributions() -> Self {
        Self {
            width: 1200,
            height: 600,
            format: ImageFormat::Svg,
        }
    }

    pub fn climate() -> Self {
        Self {
            width: 1600,
            height: 700,
            format: ImageFormat::Png,
        }
    }

    fn merge(mut self, overrides: &FigureOverrides) -> Self {
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        self
    }
}

/// Resolved configuration for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderConfig {
    pub out_dir: PathBuf,
    pub sigma: FigureSettings,
    pub distributions: FigureSettings,
    pub climate: FigureSettings,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            sigma: FigureSettings::sigma(),
            distributions: FigureSettings::distributions(),
            climate: FigureSettings::climate(),
        }
    }
}

/// On-disk shape of the YAML file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    out_dir: Option<PathBuf>,
    sigma: FigureOverrides,
    distributions: FigureOverrides,
    climate: FigureOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FigureOverrides {
    width: Option<u32>,
    height: Option<u32>,
    format: Option<ImageFormat>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        message: String,
    },
    InvalidSize {
        figure: &'static str,
        width: u32,
        height: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "invalid config {}: {}", path.display(), message)
            }
            ConfigError::InvalidSize {
                figure,
                width,
                height,
            } => write!(f, "{figure} figure size {width}x{height} must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl RenderConfig {
    /// Parse a YAML document on top of the defaults.
    pub fn from_yaml(yaml: &str, origin: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = if yaml.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_saphyr::from_str(yaml).map_err(|e| ConfigError::Parse {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?
        };

        let defaults = Self::default();
        let config = Self {
            out_dir: file.out_dir.unwrap_or(defaults.out_dir),
            sigma: defaults.sigma.merge(&file.sigma),
            distributions: defaults.distributions.merge(&file.distributions),
            climate: defaults.climate.merge(&file.climate),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&yaml, path)?;
        tracing::debug!(path = %path.display(), ?config, "loaded render config");
        Ok(config)
    }

    /// Apply command-line overrides, which win over the file.
    pub fn with_overrides(mut self, out_dir: Option<PathBuf>, format: Option<ImageFormat>) -> Self {
        if let Some(out_dir) = out_dir {
            self.out_dir = out_dir;
        }
        if let Some(format) = format {
            self.sigma.format = format;
            self.distributions.format = format;
            self.climate.format = format;
        }
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (figure, settings) in [
            ("sigma", &self.sigma),
            ("distributions", &self.distributions),
            ("climate", &self.climate),
        ] {
            if settings.width == 0 || settings.height == 0 {
                return Err(ConfigError::InvalidSize {
                    figure,
                    width: settings.width,
                    height: settings.height,
                });
            }
        }
        Ok(())
    }
}
