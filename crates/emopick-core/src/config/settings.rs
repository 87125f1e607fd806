//! Picker configuration loaded from a TOML file.
//!
//! Every field has a default, so the picker works without a config file:
//!
//! ```toml
//! [sanitize]
//! max_graphemes = 8
//! max_utf16_units = 16
//! segmenter = "grapheme"   # or "code_point", "utf16"
//!
//! [flags]
//! locales = ["fr", "en"]
//! marker = "drapeau"
//!
//! [library]
//! path = "/etc/emopick/library.toml"
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::index::CatalogBuilder;
use crate::error::{read_file, CoreError, CoreResult};
use crate::flags::{BuiltinRegionNames, FlagSynthesizer};
use crate::text::sanitize::{
    SanitizeLimits, Sanitizer, SegmenterKind, DEFAULT_MAX_GRAPHEMES, DEFAULT_MAX_UTF16_UNITS,
};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sanitize: SanitizeConfig,
    #[serde(default)]
    pub flags: FlagConfig,
    #[serde(default)]
    pub library: LibraryConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed or a
    ///   `[sanitize]` limit is zero.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = read_file(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        config.sanitize.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], except that a missing file is not an error.
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        match Self::load(path) {
            Err(CoreError::NotFound(_)) => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// A sanitizer honoring `[sanitize]`.
    #[must_use]
    pub fn sanitizer(&self) -> Sanitizer {
        Sanitizer::new(self.sanitize.limits(), self.sanitize.segmenter)
    }

    /// A flag synthesizer honoring `[flags]`, backed by the built-in name table.
    #[must_use]
    pub fn flag_synthesizer(&self) -> FlagSynthesizer {
        FlagSynthesizer::new(Arc::new(BuiltinRegionNames), &self.flags)
    }

    /// A catalog builder honoring `[sanitize]` and `[flags]`.
    #[must_use]
    pub fn catalog_builder(&self) -> CatalogBuilder {
        CatalogBuilder::new(self.sanitizer(), self.flag_synthesizer())
    }
}

/// Symbol sanitizing bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizeConfig {
    #[serde(default = "default_max_graphemes")]
    pub max_graphemes: usize,
    #[serde(default = "default_max_utf16_units")]
    pub max_utf16_units: usize,
    #[serde(default)]
    pub segmenter: SegmenterKind,
}

impl SanitizeConfig {
    /// Both limits must be at least 1, otherwise every symbol would sanitize
    /// to nothing.
    ///
    /// # Errors
    ///
    /// [`CoreError::ConfigParse`] naming the offending key.
    pub fn validate(&self) -> CoreResult<()> {
        for (key, value) in [
            ("max_graphemes", self.max_graphemes),
            ("max_utf16_units", self.max_utf16_units),
        ] {
            if value == 0 {
                return Err(CoreError::ConfigParse(format!(
                    "sanitize.{key} must be at least 1"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn limits(&self) -> SanitizeLimits {
        SanitizeLimits {
            max_graphemes: self.max_graphemes,
            max_utf16_units: self.max_utf16_units,
        }
    }
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            max_graphemes: default_max_graphemes(),
            max_utf16_units: default_max_utf16_units(),
            segmenter: SegmenterKind::default(),
        }
    }
}

/// Flag synthesis preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagConfig {
    /// Locales tried in order when a flag record has no explicit name.
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    /// Localized "flag" word seeded into every flag's keywords.
    #[serde(default = "default_marker")]
    pub marker: String,
}

impl Default for FlagConfig {
    fn default() -> Self {
        Self {
            locales: default_locales(),
            marker: default_marker(),
        }
    }
}

/// Where the emoji library comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// A library TOML file replacing the bundled one.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_max_graphemes() -> usize {
    DEFAULT_MAX_GRAPHEMES
}

fn default_max_utf16_units() -> usize {
    DEFAULT_MAX_UTF16_UNITS
}

fn default_locales() -> Vec<String> {
    vec!["fr".to_string(), "en".to_string()]
}

fn default_marker() -> String {
    "drapeau".to_string()
}
