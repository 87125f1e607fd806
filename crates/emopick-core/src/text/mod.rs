//! Text pipeline stages shared by the catalog and the flag synthesizer.
//!
//! - [`sanitize`]: bounds symbol strings for display ([`sanitize::Sanitizer`]).
//! - [`normalize`]: folds free text into search tokens.

pub mod normalize;
pub mod sanitize;

pub use normalize::{normalize_search, search_tokens};
pub use sanitize::{
    sanitize_optional, sanitize_value, GraphemeSegmenter, SanitizeLimits, Sanitizer,
    SegmenterKind,
};
