//! Configuration management for the picker.
//!
//! Settings ([`settings::Config`]) are stored as a TOML file and loaded at
//! startup; a missing file means defaults.

pub mod settings;

pub use settings::{Config, FlagConfig, LibraryConfig, SanitizeConfig};
