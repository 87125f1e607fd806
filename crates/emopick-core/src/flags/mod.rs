//! Region flags.
//!
//! [`region::FlagSynthesizer`] turns two-letter region codes into flag
//! glyphs with searchable names and keywords; [`names::RegionNames`] supplies
//! localized region names when a record has none.

pub mod names;
pub mod region;

pub use names::{BuiltinRegionNames, NoRegionNames, RegionNames};
pub use region::{
    build_flag_entries, flag_symbol, FlagEntry, FlagRecord, FlagSpec, FlagSynthesizer,
};
