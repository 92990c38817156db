//! qrstamp runtime configuration handling

use crate::error::{Error, Result};
use crate::render::{ColorMask, ModuleDrawer, StyleOptions};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// URL encoded when no text argument is given
pub const DEFAULT_URL: &str = "https://openclaw.35-195-246-45.nip.io";
/// Image written when no output argument is given
pub const DEFAULT_OUTPUT: &str = "openclaw-qrcode.png";
/// Logo looked up when no logo argument is given
pub const DEFAULT_LOGO: &str = "logo.png";

/// Top-level configuration structure loaded from disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrstampConfig {
    /// Generation defaults and styling
    pub generator: GeneratorOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrstampConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrstamp.toml / qrstamp.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrstamp.toml", "qrstamp.yaml", "qrstamp.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrstamp");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.generator.apply_env_overrides();
        self.logging.apply_env_overrides();
    }
}

/// Defaults for the three positional arguments plus rendering style
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Text encoded when none is given on the command line
    pub url: String,
    /// Output image path when none is given on the command line
    pub output: PathBuf,
    /// Logo path, or `none` to disable, when none is given on the command line
    pub logo: String,
    /// Pixels per module
    pub box_size: u32,
    /// Quiet zone width in modules
    pub border: u32,
    /// Module shape (`rounded` or `square`)
    pub drawer: ModuleDrawer,
    /// RGB color of dark modules
    pub front_color: [u8; 3],
    /// RGB background color
    pub back_color: [u8; 3],
    /// Logo width as a fraction of the image width
    pub logo_ratio: f32,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        let style = StyleOptions::default();
        Self {
            url: DEFAULT_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            logo: DEFAULT_LOGO.to_string(),
            box_size: style.box_size,
            border: style.border,
            drawer: style.drawer,
            front_color: [0, 0, 0],
            back_color: [255, 255, 255],
            logo_ratio: style.logo_ratio,
        }
    }
}

impl GeneratorOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("QRSTAMP_URL") {
            self.url = url;
        }
        if let Ok(output) = env::var("QRSTAMP_OUTPUT") {
            self.output = PathBuf::from(output);
        }
        if let Ok(logo) = env::var("QRSTAMP_LOGO") {
            self.logo = logo;
        }
        if let Ok(size) = env::var("QRSTAMP_BOX_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.box_size = parsed;
            }
        }
        if let Ok(border) = env::var("QRSTAMP_BORDER") {
            if let Ok(parsed) = border.parse::<u32>() {
                self.border = parsed;
            }
        }
        if let Ok(drawer) = env::var("QRSTAMP_DRAWER") {
            if let Some(parsed) = ModuleDrawer::parse(&drawer) {
                self.drawer = parsed;
            }
        }
    }

    /// Validate and convert into rendering options.
    pub fn to_style(&self) -> Result<StyleOptions> {
        if !(self.logo_ratio > 0.0 && self.logo_ratio <= 0.5) {
            return Err(Error::Config(format!(
                "logo_ratio {} out of range, expected (0, 0.5]",
                self.logo_ratio
            )));
        }

        let style = StyleOptions {
            box_size: self.box_size,
            border: self.border,
            drawer: self.drawer,
            mask: ColorMask::solid(self.front_color, self.back_color),
            logo_ratio: self.logo_ratio,
            ..StyleOptions::default()
        };
        style.validate()?;
        Ok(style)
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRSTAMP_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stderr logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRSTAMP_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRSTAMP_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRSTAMP_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("QRSTAMP_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}
