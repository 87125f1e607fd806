//! emopick core library: the engine behind the emoji picker input.
//!
//! `emopick-core` is UI-agnostic. A frontend builds (or borrows) a
//! [`Catalog`] once and queries it synchronously on every keystroke.
//!
//! # Modules
//!
//! - [`catalog`]: definition loader, the immutable [`Catalog`] index, and the bundled library.
//! - [`text`]: symbol sanitizing ([`Sanitizer`]) and search normalization.
//! - [`flags`]: region-flag synthesis from two-letter codes.
//! - [`config`]: TOML settings ([`Config`]).
//! - [`error`]: unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod catalog;
pub mod config;
pub mod error;
pub mod flags;
pub mod text;

pub use catalog::{
    create_helper, default_helper, default_library, parse_emoji_block, Catalog, CatalogBuilder,
    CategoryDefinition, EmojiCategory, EmojiItem, FilterOptions, ItemSource, LibraryDefinition,
    RawRecord,
};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use flags::{build_flag_entries, FlagEntry, FlagRecord, FlagSpec, FlagSynthesizer};
pub use text::{normalize_search, sanitize_value, Sanitizer};

