//! The catalog index: categories, a flat item list, and the query surface.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::item::{EmojiCategory, EmojiItem};
use super::parse::{parse_emoji_block, RawRecord};
use crate::flags::{FlagRecord, FlagSynthesizer};
use crate::text::normalize::normalize_search;
use crate::text::sanitize::Sanitizer;

/// Where a category's items come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSource {
    /// Records that are already split into fields.
    Records(Vec<RawRecord>),
    /// A pipe/newline block run through [`parse_emoji_block`].
    Block(String),
    /// Region-flag records synthesized into flag items.
    Flags(Vec<FlagRecord>),
}

/// Input for one catalog category.
///
/// A missing or blank `key` becomes `category-<index>`; a missing or blank
/// `label` falls back to the key. In TOML exactly one of `items`, `block` or
/// `flags` may be given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCategory", into = "RawCategory")]
pub struct CategoryDefinition {
    pub key: Option<String>,
    pub label: Option<String>,
    pub source: ItemSource,
}

impl CategoryDefinition {
    /// A category whose items come from a pipe/newline block.
    #[must_use]
    pub fn block(
        key: impl Into<String>,
        label: impl Into<String>,
        block: impl Into<String>,
    ) -> Self {
        Self {
            key: Some(key.into()),
            label: Some(label.into()),
            source: ItemSource::Block(block.into()),
        }
    }

    /// A category from pre-split records.
    #[must_use]
    pub fn records(
        key: impl Into<String>,
        label: impl Into<String>,
        records: Vec<RawRecord>,
    ) -> Self {
        Self {
            key: Some(key.into()),
            label: Some(label.into()),
            source: ItemSource::Records(records),
        }
    }

    /// A category of synthesized region flags.
    #[must_use]
    pub fn flags(
        key: impl Into<String>,
        label: impl Into<String>,
        records: impl IntoIterator<Item = impl Into<FlagRecord>>,
    ) -> Self {
        Self {
            key: Some(key.into()),
            label: Some(label.into()),
            source: ItemSource::Flags(records.into_iter().map(Into::into).collect()),
        }
    }
}

/// Serialized shape of a [`CategoryDefinition`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<RawRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flags: Option<Vec<FlagRecord>>,
}

impl TryFrom<RawCategory> for CategoryDefinition {
    type Error = String;

    fn try_from(raw: RawCategory) -> Result<Self, Self::Error> {
        let source = match (raw.items, raw.block, raw.flags) {
            (Some(items), None, None) => ItemSource::Records(items),
            (None, Some(block), None) => ItemSource::Block(block),
            (None, None, Some(flags)) => ItemSource::Flags(flags),
            (None, None, None) => ItemSource::Records(Vec::new()),
            _ => {
                return Err(format!(
                    "category {:?} sets more than one of `items`, `block`, `flags`",
                    raw.key.unwrap_or_default()
                ))
            }
        };
        Ok(Self {
            key: raw.key,
            label: raw.label,
            source,
        })
    }
}

impl From<CategoryDefinition> for RawCategory {
    fn from(def: CategoryDefinition) -> Self {
        let mut raw = RawCategory {
            key: def.key,
            label: def.label,
            ..RawCategory::default()
        };
        match def.source {
            ItemSource::Records(items) => raw.items = Some(items),
            ItemSource::Block(block) => raw.block = Some(block),
            ItemSource::Flags(flags) => raw.flags = Some(flags),
        }
        raw
    }
}

/// Query for [`Catalog::filter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Restrict to the category with this key. Blank means no restriction.
    pub category: Option<String>,
    /// Free-text query, normalized before matching. Blank matches everything.
    pub query: Option<String>,
}

impl FilterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, key: impl Into<String>) -> Self {
        self.category = Some(key.into());
        self
    }

    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// Builds a [`Catalog`] with a chosen sanitizer and flag synthesizer.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    sanitizer: Sanitizer,
    flags: FlagSynthesizer,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new(sanitizer: Sanitizer, flags: FlagSynthesizer) -> Self {
        Self { sanitizer, flags }
    }

    /// Sanitizes, indexes and groups every definition.
    ///
    /// Records whose symbol sanitizes to nothing are dropped, then categories
    /// left without items are dropped.
    #[must_use]
    pub fn build(&self, definitions: &[CategoryDefinition]) -> Catalog {
        let mut categories = Vec::with_capacity(definitions.len());
        let mut seen_keys = HashSet::new();
        let mut dropped = 0usize;

        for (index, def) in definitions.iter().enumerate() {
            let synthetic = format!("category-{index}");
            let key = match def.key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
                Some(key) if seen_keys.contains(key) => {
                    tracing::warn!(
                        category = %key,
                        fallback = %synthetic,
                        "duplicate category key"
                    );
                    synthetic
                }
                Some(key) => key.to_owned(),
                None => synthetic,
            };
            if seen_keys.contains(&key) {
                tracing::warn!(category = %key, "category key already taken, dropping category");
                continue;
            }
            let label = def
                .label
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map_or_else(|| key.clone(), str::to_owned);

            let records = self.records_for(&def.source);
            let total = records.len();
            let items: Vec<EmojiItem> = records
                .into_iter()
                .filter_map(|record| self.item_for(record, &key, &label))
                .collect();
            dropped += total - items.len();

            if items.is_empty() {
                tracing::debug!(category = %key, "dropping category without items");
                continue;
            }
            seen_keys.insert(key.clone());
            categories.push(EmojiCategory { key, label, items });
        }

        let items: Vec<EmojiItem> = categories
            .iter()
            .flat_map(|c| c.items.iter().cloned())
            .collect();

        tracing::debug!(
            categories = categories.len(),
            items = items.len(),
            dropped,
            "catalog built"
        );

        Catalog {
            categories,
            items,
            sanitizer: self.sanitizer.clone(),
        }
    }

    fn records_for(&self, source: &ItemSource) -> Vec<RawRecord> {
        match source {
            ItemSource::Records(records) => records.clone(),
            ItemSource::Block(block) => parse_emoji_block(block),
            ItemSource::Flags(records) => self
                .flags
                .build(records.iter().cloned())
                .into_iter()
                .map(|entry| entry.into_record())
                .collect(),
        }
    }

    fn item_for(&self, record: RawRecord, key: &str, label: &str) -> Option<EmojiItem> {
        let symbol = self.sanitizer.sanitize(&record.symbol);
        if symbol.is_empty() {
            tracing::trace!(name = %record.name, "dropping record with empty symbol");
            return None;
        }
        let name = record.name.trim().to_owned();
        let search = search_index(&symbol, &name, &record.keywords);
        Some(EmojiItem::new(symbol, name, record.keywords, search, key, label))
    }
}

/// Normalized symbol, name and keywords joined on spaces, empties dropped.
fn search_index(symbol: &str, name: &str, keywords: &[String]) -> String {
    std::iter::once(symbol)
        .chain(std::iter::once(name))
        .chain(keywords.iter().map(String::as_str))
        .map(normalize_search)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Immutable emoji index.
///
/// Built once, then only read. Accessors return owned snapshots so callers
/// can never alter the index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<EmojiCategory>,
    items: Vec<EmojiItem>,
    sanitizer: Sanitizer,
}

impl Catalog {
    /// Builds a catalog with the default sanitizer and flag synthesizer.
    ///
    /// ```
    /// use emopick_core::{Catalog, CategoryDefinition, FilterOptions};
    ///
    /// let catalog = Catalog::build(&[CategoryDefinition::block(
    ///     "animals",
    ///     "Animals",
    ///     "🐱|Cat Face|chat,kitty\n🐶|Dog Face|",
    /// )]);
    /// let hits = catalog.filter(&FilterOptions::new().query("Chat"));
    /// assert_eq!(hits[0].items.len(), 1);
    /// ```
    #[must_use]
    pub fn build(definitions: &[CategoryDefinition]) -> Self {
        CatalogBuilder::default().build(definitions)
    }

    /// Snapshot of every category, in definition order.
    #[must_use]
    pub fn categories(&self) -> Vec<EmojiCategory> {
        self.categories.clone()
    }

    /// Snapshot of every item, category order then item order.
    #[must_use]
    pub fn list_all(&self) -> Vec<EmojiItem> {
        self.items.clone()
    }

    /// Filters by category and/or query, preserving catalog order.
    ///
    /// Unlike [`CatalogBuilder::build`], categories without a match are kept
    /// with an empty item list. An unknown category key yields no category.
    #[must_use]
    pub fn filter(&self, options: &FilterOptions) -> Vec<EmojiCategory> {
        let query = options
            .query
            .as_deref()
            .map(normalize_search)
            .unwrap_or_default();
        let selected: Vec<&EmojiCategory> = match options
            .category
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
        {
            Some(key) => self.category(key).into_iter().collect(),
            None => self.categories.iter().collect(),
        };

        selected
            .into_iter()
            .map(|category| EmojiCategory {
                key: category.key.clone(),
                label: category.label.clone(),
                items: category
                    .items
                    .iter()
                    .filter(|item| query.is_empty() || item.matches(&query))
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// The category with `key`. Keys are unique within a catalog.
    #[must_use]
    pub fn category(&self, key: &str) -> Option<&EmojiCategory> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// The first item whose symbol equals `symbol` once sanitized with the
    /// sanitizer the catalog was built with.
    #[must_use]
    pub fn find_symbol(&self, symbol: &str) -> Option<&EmojiItem> {
        let wanted = self.sanitizer.sanitize(symbol);
        if wanted.is_empty() {
            return None;
        }
        self.items.iter().find(|item| item.symbol() == wanted)
    }

    /// Total number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog holds no item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of categories.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}
