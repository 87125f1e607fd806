//! Display-value sanitizing for emoji symbols.
//!
//! A symbol coming from a definition file or from user input is collapsed,
//! trimmed and bounded before it is stored. Legitimate multi-code-point
//! glyphs (flags, skin tones, ZWJ families) survive; runaway modifier chains
//! do not.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Default maximum number of user-perceived characters kept in a symbol.
pub const DEFAULT_MAX_GRAPHEMES: usize = 8;

/// Default hard cap on the sanitized value, in UTF-16 code units.
pub const DEFAULT_MAX_UTF16_UNITS: usize = 16;

/// A strategy that cuts a string after a number of "characters".
///
/// Implementations return `None` when they cannot handle the input; the
/// [`Sanitizer`] then falls back to the next, weaker strategy.
pub trait GraphemeSegmenter: Send + Sync {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &'static str;

    /// Returns the longest prefix of `value` holding at most `limit` units.
    fn prefix<'a>(&self, value: &'a str, limit: usize) -> Option<&'a str>;
}

/// Extended grapheme clusters (UAX #29) via `unicode-segmentation`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtendedGraphemes;

impl GraphemeSegmenter for ExtendedGraphemes {
    fn name(&self) -> &'static str {
        "grapheme"
    }

    fn prefix<'a>(&self, value: &'a str, limit: usize) -> Option<&'a str> {
        let end = value
            .grapheme_indices(true)
            .nth(limit)
            .map_or(value.len(), |(idx, _)| idx);
        Some(&value[..end])
    }
}

/// Unicode scalar values.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodePoints;

impl GraphemeSegmenter for CodePoints {
    fn name(&self) -> &'static str {
        "code_point"
    }

    fn prefix<'a>(&self, value: &'a str, limit: usize) -> Option<&'a str> {
        let end = value
            .char_indices()
            .nth(limit)
            .map_or(value.len(), |(idx, _)| idx);
        Some(&value[..end])
    }
}

/// UTF-16 code units. Never splits a code point, so an astral character
/// that would straddle the limit is dropped whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf16Units;

impl GraphemeSegmenter for Utf16Units {
    fn name(&self) -> &'static str {
        "utf16"
    }

    fn prefix<'a>(&self, value: &'a str, limit: usize) -> Option<&'a str> {
        Some(truncate_utf16(value, limit))
    }
}

/// Segmentation strategy selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmenterKind {
    /// Extended grapheme clusters.
    #[default]
    Grapheme,
    /// Unicode scalar values.
    CodePoint,
    /// UTF-16 code units.
    Utf16,
}

impl SegmenterKind {
    /// The strategy itself followed by every weaker one.
    fn chain(self) -> Vec<Arc<dyn GraphemeSegmenter>> {
        let all: [Arc<dyn GraphemeSegmenter>; 3] = [
            Arc::new(ExtendedGraphemes),
            Arc::new(CodePoints),
            Arc::new(Utf16Units),
        ];
        let skip = match self {
            Self::Grapheme => 0,
            Self::CodePoint => 1,
            Self::Utf16 => 2,
        };
        all.into_iter().skip(skip).collect()
    }
}

/// Length bounds applied by the [`Sanitizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeLimits {
    pub max_graphemes: usize,
    pub max_utf16_units: usize,
}

impl Default for SanitizeLimits {
    fn default() -> Self {
        Self {
            max_graphemes: DEFAULT_MAX_GRAPHEMES,
            max_utf16_units: DEFAULT_MAX_UTF16_UNITS,
        }
    }
}

/// Normalizes and bounds symbol strings.
///
/// The segmentation strategies are chosen once at construction; each call
/// walks them in order until one accepts the input.
#[derive(Clone)]
pub struct Sanitizer {
    limits: SanitizeLimits,
    segmenters: Vec<Arc<dyn GraphemeSegmenter>>,
}

impl Sanitizer {
    /// Creates a sanitizer starting at the given strategy.
    #[must_use]
    pub fn new(limits: SanitizeLimits, kind: SegmenterKind) -> Self {
        Self {
            limits,
            segmenters: kind.chain(),
        }
    }

    /// Creates a sanitizer that tries `segmenter` first, then the built-in chain.
    #[must_use]
    pub fn with_segmenter(limits: SanitizeLimits, segmenter: Arc<dyn GraphemeSegmenter>) -> Self {
        let mut segmenters = vec![segmenter];
        segmenters.extend(SegmenterKind::Grapheme.chain());
        Self { limits, segmenters }
    }

    /// The bounds this sanitizer enforces.
    #[must_use]
    pub fn limits(&self) -> SanitizeLimits {
        self.limits
    }

    /// Sanitizes `value` into a bounded display string.
    ///
    /// Returns an empty string when nothing printable is left; callers
    /// treat that as "no symbol".
    #[must_use]
    pub fn sanitize(&self, value: &str) -> String {
        let collapsed = collapse_whitespace(value);
        if collapsed.is_empty() {
            return String::new();
        }
        let limited = self.limit_graphemes(&collapsed);
        truncate_utf16(limited, self.limits.max_utf16_units)
            .trim_end()
            .to_string()
    }

    fn limit_graphemes<'a>(&self, value: &'a str) -> &'a str {
        for segmenter in &self.segmenters {
            if let Some(prefix) = segmenter.prefix(value, self.limits.max_graphemes) {
                return prefix;
            }
            tracing::trace!(strategy = segmenter.name(), "segmenter declined input");
        }
        truncate_utf16(value, self.limits.max_graphemes)
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(SanitizeLimits::default(), SegmenterKind::default())
    }
}

impl fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.segmenters.iter().map(|s| s.name()).collect();
        f.debug_struct("Sanitizer")
            .field("limits", &self.limits)
            .field("segmenters", &names)
            .finish()
    }
}

/// Sanitizes with the default limits and grapheme segmentation.
#[must_use]
pub fn sanitize_value(value: &str) -> String {
    Sanitizer::default().sanitize(value)
}

/// Like [`sanitize_value`], mapping a missing value to an empty string.
#[must_use]
pub fn sanitize_optional(value: Option<&str>) -> String {
    value.map(sanitize_value).unwrap_or_default()
}

/// Collapses whitespace runs to a single space and trims both ends.
pub(crate) fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Longest prefix of `value` whose UTF-16 length is at most `limit`.
fn truncate_utf16(value: &str, limit: usize) -> &str {
    let mut units = 0;
    for (idx, ch) in value.char_indices() {
        units += ch.len_utf16();
        if units > limit {
            return &value[..idx];
        }
    }
    value
}
