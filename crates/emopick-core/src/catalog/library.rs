//! Library definitions and the bundled default library.
//!
//! A library is an ordered list of [`CategoryDefinition`]s stored as TOML:
//!
//! ```toml
//! [[categories]]
//! key = "smileys"
//! label = "Smileys"
//! block = """
//! 😀|Grinning Face|smile,happy
//! """
//!
//! [[categories]]
//! key = "flags"
//! label = "Flags"
//! flags = ["FR|France", { code = "DE" }]
//! ```
//!
//! The default library ships inside the binary (`data/library.toml`) and is
//! parsed and indexed on first use.

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::index::{Catalog, CatalogBuilder, CategoryDefinition};
use crate::error::{read_file, CoreError, CoreResult};

const BUNDLED_LIBRARY: &str = include_str!("../../data/library.toml");

/// An ordered set of category definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryDefinition {
    #[serde(default)]
    pub categories: Vec<CategoryDefinition>,
}

impl LibraryDefinition {
    /// Parses a library from TOML source.
    ///
    /// # Errors
    ///
    /// [`CoreError::LibraryParse`] if the TOML is malformed or a category
    /// sets more than one item source.
    pub fn from_toml_str(source: &str) -> CoreResult<Self> {
        toml::from_str(source).map_err(|e| CoreError::LibraryParse(e.to_string()))
    }

    /// Loads a library file.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::LibraryParse`] if the content is not a valid library.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
    }

    /// Serializes the library back to TOML.
    ///
    /// # Errors
    ///
    /// [`CoreError::LibraryParse`] if serialization fails.
    pub fn to_toml_string(&self) -> CoreResult<String> {
        toml::to_string_pretty(self).map_err(|e| CoreError::LibraryParse(e.to_string()))
    }

    /// Builds a catalog with the default pipeline.
    #[must_use]
    pub fn build(&self) -> Catalog {
        Catalog::build(&self.categories)
    }

    /// Builds a catalog with a configured pipeline.
    #[must_use]
    pub fn build_with(&self, builder: &CatalogBuilder) -> Catalog {
        builder.build(&self.categories)
    }
}

fn bundled_library() -> &'static LibraryDefinition {
    static LIBRARY: OnceLock<LibraryDefinition> = OnceLock::new();
    LIBRARY.get_or_init(|| match LibraryDefinition::from_toml_str(BUNDLED_LIBRARY) {
        Ok(library) => library,
        Err(e) => {
            tracing::error!(error = %e, "bundled emoji library is unreadable");
            LibraryDefinition::default()
        }
    })
}

/// Builds a catalog from `definitions`.
#[must_use]
pub fn create_helper(definitions: &[CategoryDefinition]) -> Catalog {
    Catalog::build(definitions)
}

/// The catalog built from the bundled library, shared for the whole process.
#[must_use]
pub fn default_helper() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| bundled_library().build())
}

/// An owned copy of the bundled library definition.
#[must_use]
pub fn default_library() -> LibraryDefinition {
    bundled_library().clone()
}
