//! Configuration management for pattern schemas
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (patterns.toml)
//! - Environment variables (PATTERNS__*)
//!
//! ## Example config file (patterns.toml):
//! ```toml
//! [render]
//! developer_mode = true
//! template_extension = "hbs"
//! notify_validation = true
//!
//! [cache]
//! enabled = true
//!
//! [templates]
//! directory = "./templates"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for building property trees
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Render settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Prototype cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Template lookup settings
    #[serde(default)]
    pub templates: TemplateConfig,
}

/// Render configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Validate every component before it is rendered
    #[serde(default)]
    pub developer_mode: bool,

    /// Suffix of the implicit `<schema name>.<ext>` template identifier
    #[serde(default = "default_template_extension")]
    pub template_extension: String,

    /// Log validation errors found during a developer mode render
    #[serde(default = "default_true")]
    pub notify_validation: bool,
}

/// Prototype cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Reuse constructed prototype trees between loads
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Template configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Directory holding template files
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_template_extension() -> String {
    "hbs".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            developer_mode: false,
            template_extension: default_template_extension(),
            notify_validation: true,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Settings {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["patterns.toml", ".patterns.toml", "config/patterns.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "patterns", "pattern-schemas") {
            let xdg_config = config_dir.config_dir().join("patterns.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // PATTERNS__RENDER__DEVELOPER_MODE=true
        builder = builder.add_source(
            Environment::with_prefix("PATTERNS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get the template directory (resolves relative paths)
    pub fn template_directory(&self) -> Option<PathBuf> {
        self.templates.directory.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                std::env::current_dir().unwrap_or_default().join(p)
            }
        })
    }
}
