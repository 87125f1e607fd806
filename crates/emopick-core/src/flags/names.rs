//! Region display names.
//!
//! [`RegionNames`] is the locale-aware lookup the flag synthesizer consults
//! when a record carries no explicit name. The built-in implementation is
//! backed by a small embedded table; [`NoRegionNames`] models an environment
//! with no localization support at all.

use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Resolves a two-letter region code to a display name in a locale.
pub trait RegionNames: Send + Sync {
    /// Display name of `code` (uppercase) in `locale`, or `None` when the
    /// locale or the region is unknown.
    fn display_name(&self, code: &str, locale: &str) -> Option<String>;
}

/// Resolver that never knows any name.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegionNames;

impl RegionNames for NoRegionNames {
    fn display_name(&self, _code: &str, _locale: &str) -> Option<String> {
        None
    }
}

/// locale → (code → name)
type NameTable = BTreeMap<String, BTreeMap<String, String>>;

const REGIONS_TOML: &str = include_str!("../../data/regions.toml");

/// Resolver backed by the embedded `regions.toml` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRegionNames;

impl BuiltinRegionNames {
    fn table() -> &'static NameTable {
        static TABLE: OnceLock<NameTable> = OnceLock::new();
        TABLE.get_or_init(|| match parse_table(REGIONS_TOML) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!(error = %e, "embedded region table is unreadable");
                NameTable::new()
            }
        })
    }

    /// Locales the embedded table knows about.
    #[must_use]
    pub fn locales() -> Vec<&'static str> {
        Self::table().keys().map(String::as_str).collect()
    }
}

impl RegionNames for BuiltinRegionNames {
    fn display_name(&self, code: &str, locale: &str) -> Option<String> {
        let locale = locale.trim().to_lowercase();
        Self::table()
            .get(&locale)
            .and_then(|names| names.get(code))
            .cloned()
    }
}

fn parse_table(source: &str) -> Result<NameTable, toml::de::Error> {
    toml::from_str(source)
}
