//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Browse and search the emoji picker catalog.
#[derive(Debug, Parser)]
#[command(name = "emopick", version, about)]
pub struct Cli {
    /// Config file (default: $HOME/.config/emopick/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Library TOML file replacing the bundled library.
    #[arg(long, global = true)]
    pub library: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter the catalog by query and/or category.
    Search {
        /// Free-text query (accent and case insensitive).
        query: Option<String>,
        /// Restrict to one category key.
        #[arg(short, long)]
        category: Option<String>,
        /// Also list categories without a match.
        #[arg(long)]
        all: bool,
    },
    /// List category keys, labels and item counts.
    Categories,
    /// Synthesize region flags from `CODE|Name|kw1,kw2` records.
    Flags {
        #[arg(required = true)]
        records: Vec<String>,
    },
    /// Show how a value is sanitized for display.
    Sanitize { value: String },
    /// Show the search tokens for a value.
    Normalize { value: String },
    /// Dump the library definition in use.
    Library {
        /// Print TOML instead of JSON.
        #[arg(long)]
        toml: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_search_with_category() {
        let cli = Cli::parse_from(["emopick", "search", "chat", "--category", "animals"]);
        match cli.command {
            Command::Search {
                query, category, ..
            } => {
                assert_eq!(query.as_deref(), Some("chat"));
                assert_eq!(category.as_deref(), Some("animals"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["emopick", "categories", "--json", "--config", "/tmp/c.toml"]);
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn flags_requires_records() {
        assert!(Cli::try_parse_from(["emopick", "flags"]).is_err());
    }
}
