//! Catalog entries.

use serde::Serialize;

/// A sanitized, searchable emoji.
///
/// Items are only created by [`Catalog::build`](super::Catalog::build),
/// which guarantees a non-empty symbol and a precomputed search string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiItem {
    symbol: String,
    name: String,
    keywords: Vec<String>,
    search: String,
    category: String,
    category_label: String,
}

impl EmojiItem {
    pub(crate) fn new(
        symbol: String,
        name: String,
        keywords: Vec<String>,
        search: String,
        category: &str,
        category_label: &str,
    ) -> Self {
        Self {
            symbol,
            name,
            keywords,
            search,
            category: category.to_owned(),
            category_label: category_label.to_owned(),
        }
    }

    /// The display glyph. Never empty.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Human-readable label; may be empty.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Supplementary search terms, in definition order.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Normalized haystack queries are matched against.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Key of the owning category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Display label of the owning category.
    #[must_use]
    pub fn category_label(&self) -> &str {
        &self.category_label
    }

    /// Whether the search string contains an already-normalized query.
    pub(crate) fn matches(&self, normalized_query: &str) -> bool {
        self.search.contains(normalized_query)
    }
}

/// An ordered group of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiCategory {
    pub key: String,
    pub label: String,
    pub items: Vec<EmojiItem>,
}

impl EmojiCategory {
    /// Number of items in the category.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the category holds no item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
