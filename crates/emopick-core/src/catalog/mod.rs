//! The emoji catalog.
//!
//! [`parse`] reads the pipe/newline definition format, [`index`] builds the
//! immutable [`Catalog`](index::Catalog) and serves queries, and [`library`]
//! holds the bundled default definitions.

pub mod index;
pub mod item;
pub mod library;
pub mod parse;

pub use index::{Catalog, CatalogBuilder, CategoryDefinition, FilterOptions, ItemSource};
pub use item::{EmojiCategory, EmojiItem};
pub use library::{create_helper, default_helper, default_library, LibraryDefinition};
pub use parse::{parse_emoji_block, RawRecord};
