//! Command execution. Every command renders to a `String` so `main` only
//! has to print it.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use emopick_core::text::search_tokens;
use emopick_core::{
    Catalog, Config, EmojiCategory, FilterOptions, FlagRecord, LibraryDefinition,
};

use crate::cli::{Cli, Command};

/// Config, library and the catalog built from them.
pub struct Session {
    config: Config,
    library: LibraryDefinition,
    catalog: Catalog,
}

impl Session {
    /// Loads the config (missing file means defaults), then the library
    /// named by `--library`, the config, or the bundled one.
    pub fn open(config_path: Option<&Path>, library_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => match default_config_path() {
                Some(path) => Config::load_or_default(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => Config::default(),
            },
        };

        let library_path = library_path
            .map(Path::to_path_buf)
            .or_else(|| config.library.path.clone());
        let library = match library_path {
            Some(path) => LibraryDefinition::load(&path)
                .with_context(|| format!("loading library {}", path.display()))?,
            None => emopick_core::default_library(),
        };

        Ok(Self::from_parts(config, library))
    }

    pub fn from_parts(config: Config, library: LibraryDefinition) -> Self {
        let catalog = library.build_with(&config.catalog_builder());
        tracing::info!(
            categories = catalog.category_count(),
            items = catalog.len(),
            "catalog ready"
        );
        Self {
            config,
            library,
            catalog,
        }
    }

    /// Runs `command` and returns what should be printed.
    pub fn run(&self, command: &Command, json: bool) -> anyhow::Result<String> {
        match command {
            Command::Search {
                query,
                category,
                all,
            } => self.search(query.as_deref(), category.as_deref(), *all, json),
            Command::Categories => self.categories(json),
            Command::Flags { records } => self.flags(records, json),
            Command::Sanitize { value } => {
                let sanitized = self.config.sanitizer().sanitize(value);
                if json {
                    Ok(serde_json::to_string_pretty(&sanitized)?)
                } else {
                    Ok(sanitized)
                }
            }
            Command::Normalize { value } => {
                if json {
                    Ok(serde_json::to_string_pretty(&search_tokens(value))?)
                } else {
                    Ok(emopick_core::normalize_search(value))
                }
            }
            Command::Library { toml } => {
                if *toml {
                    Ok(self.library.to_toml_string()?)
                } else {
                    Ok(serde_json::to_string_pretty(&self.library)?)
                }
            }
        }
    }

    fn search(
        &self,
        query: Option<&str>,
        category: Option<&str>,
        all: bool,
        json: bool,
    ) -> anyhow::Result<String> {
        let options = FilterOptions {
            category: category.map(str::to_owned),
            query: query.map(str::to_owned),
        };
        let results: Vec<EmojiCategory> = self
            .catalog
            .filter(&options)
            .into_iter()
            .filter(|c| all || !c.is_empty())
            .collect();

        if json {
            return Ok(serde_json::to_string_pretty(&results)?);
        }

        let mut out = String::new();
        for category in &results {
            writeln!(out, "{} ({})", category.label, category.key)?;
            for item in &category.items {
                writeln!(out, "  {}  {}", item.symbol(), item.name())?;
            }
        }
        if results.iter().all(EmojiCategory::is_empty) {
            out.push_str("no match\n");
        }
        Ok(out)
    }

    fn categories(&self, json: bool) -> anyhow::Result<String> {
        let rows: Vec<(String, String, usize)> = self
            .catalog
            .categories()
            .into_iter()
            .map(|c| {
                let len = c.len();
                (c.key, c.label, len)
            })
            .collect();

        if json {
            let value: Vec<serde_json::Value> = rows
                .iter()
                .map(|(key, label, count)| {
                    serde_json::json!({ "key": key, "label": label, "count": count })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        let width = rows.iter().map(|(key, _, _)| key.len()).max().unwrap_or(0);
        let mut out = String::new();
        for (key, label, count) in &rows {
            writeln!(out, "{key:<width$}  {count:>4}  {label}")?;
        }
        Ok(out)
    }

    fn flags(&self, records: &[String], json: bool) -> anyhow::Result<String> {
        let entries = self
            .config
            .flag_synthesizer()
            .build(records.iter().cloned().map(FlagRecord::from));

        if json {
            return Ok(serde_json::to_string_pretty(&entries)?);
        }

        let mut out = String::new();
        for entry in &entries {
            writeln!(
                out,
                "{}  {}  {}  [{}]",
                entry.symbol,
                entry.code,
                entry.name,
                entry.keywords.join(", ")
            )?;
        }
        if entries.len() < records.len() {
            writeln!(out, "skipped {} malformed record(s)", records.len() - entries.len())?;
        }
        Ok(out)
    }
}

/// `$HOME/.config/emopick/config.toml`, if `HOME` is set.
fn default_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config/emopick/config.toml"))
}

/// Opens the session described by `cli` and runs its command.
pub fn execute(cli: &Cli) -> anyhow::Result<String> {
    let session = Session::open(cli.config.as_deref(), cli.library.as_deref())?;
    session.run(&cli.command, cli.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emopick_core::CategoryDefinition;
    use std::fs;
    use tempfile::TempDir;

    fn small_session() -> Session {
        let library = LibraryDefinition {
            categories: vec![
                CategoryDefinition::block("smileys", "Smileys", "😀|Grinning Face|smile"),
                CategoryDefinition::block(
                    "animals",
                    "Animaux",
                    "🐱|Cat Face|chat\n🐶|Dog Face|chien",
                ),
            ],
        };
        Session::from_parts(Config::default(), library)
    }

    fn search(query: Option<&str>, category: Option<&str>, all: bool) -> Command {
        Command::Search {
            query: query.map(str::to_owned),
            category: category.map(str::to_owned),
            all,
        }
    }

    #[test]
    fn search_text_hides_empty_categories() {
        let out = small_session().run(&search(Some("chat"), None, false), false).unwrap();
        assert_eq!(out, "Animaux (animals)\n  🐱  Cat Face\n");
    }

    #[test]
    fn search_all_keeps_empty_categories() {
        let out = small_session().run(&search(Some("chat"), None, true), false).unwrap();
        assert!(out.starts_with("Smileys (smileys)\nAnimaux (animals)\n"));
    }

    #[test]
    fn search_without_match_says_so() {
        let out = small_session().run(&search(Some("zebra"), None, false), false).unwrap();
        assert_eq!(out, "no match\n");
    }

    #[test]
    fn search_json_serializes_items() {
        let out = small_session()
            .run(&search(None, Some("animals"), false), true)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["key"], "animals");
        assert_eq!(value[0]["items"][1]["symbol"], "🐶");
        assert_eq!(value[0]["items"][1]["category_label"], "Animaux");
    }

    #[test]
    fn categories_text_lists_counts() {
        let out = small_session().run(&Command::Categories, false).unwrap();
        assert_eq!(out, "smileys     1  Smileys\nanimals     2  Animaux\n");
    }

    #[test]
    fn categories_json() {
        let out = small_session().run(&Command::Categories, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[1]["count"], 2);
    }

    #[test]
    fn flags_report_skipped_records() {
        let command = Command::Flags {
            records: vec!["FR|France".to_string(), "FRA".to_string()],
        };
        let out = small_session().run(&command, false).unwrap();
        assert!(out.starts_with("\u{1F1EB}\u{1F1F7}  FR  France  [drapeau, flag, fr, france]\n"));
        assert!(out.ends_with("skipped 1 malformed record(s)\n"));
    }

    #[test]
    fn sanitize_and_normalize() {
        let session = small_session();
        let sanitized = session
            .run(&Command::Sanitize { value: "  😀   ".into() }, false)
            .unwrap();
        assert_eq!(sanitized, "😀");

        let normalized = session
            .run(&Command::Normalize { value: "Crème Brûlée!".into() }, true)
            .unwrap();
        let tokens: Vec<String> = serde_json::from_str(&normalized).unwrap();
        assert_eq!(tokens, vec!["creme", "brulee"]);
    }

    #[test]
    fn library_dump_round_trips() {
        let session = small_session();
        let toml_out = session.run(&Command::Library { toml: true }, false).unwrap();
        let back = LibraryDefinition::from_toml_str(&toml_out).unwrap();
        assert_eq!(back.categories.len(), 2);
    }

    #[test]
    fn open_reads_config_and_library_files() {
        let tmp = TempDir::new().unwrap();
        let library_path = tmp.path().join("library.toml");
        fs::write(
            &library_path,
            "[[categories]]\nkey = \"f\"\nlabel = \"F\"\nflags = [\"DE\"]\n",
        )
        .unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(
            &config_path,
            format!(
                "[flags]\nlocales = [\"en\"]\n\n[library]\npath = {:?}\n",
                library_path.display().to_string()
            ),
        )
        .unwrap();

        let session = Session::open(Some(&config_path), None).unwrap();
        let out = session.run(&search(None, None, false), false).unwrap();
        assert!(out.contains("Germany"));
    }

    #[test]
    fn open_with_missing_explicit_config_fails() {
        let tmp = TempDir::new().unwrap();
        let result = Session::open(Some(&tmp.path().join("nope.toml")), None);
        assert!(result.is_err());
    }
}
