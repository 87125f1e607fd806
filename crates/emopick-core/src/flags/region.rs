//! Flag synthesis from two-letter region codes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::names::{BuiltinRegionNames, RegionNames};
use crate::catalog::parse::{parse_line, RawRecord};
use crate::config::settings::FlagConfig;
use crate::text::normalize::search_tokens;

/// Code point of REGIONAL INDICATOR SYMBOL LETTER A.
const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

/// Literal English marker every flag entry is searchable by.
const FLAG_TOKEN: &str = "flag";

/// Structured flag input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSpec {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl FlagSpec {
    /// A spec with only a code; the name is resolved at build time.
    #[must_use]
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// A spec with a code and an explicit display name.
    #[must_use]
    pub fn named(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: Some(name.into()),
            keywords: Vec::new(),
        }
    }
}

/// One flag record: a `CODE|Name|kw1,kw2` line or a structured spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagRecord {
    Line(String),
    Spec(FlagSpec),
}

impl FlagRecord {
    fn into_spec(self) -> Option<FlagSpec> {
        match self {
            Self::Spec(spec) => Some(spec),
            Self::Line(line) => parse_line(&line).map(|record| FlagSpec {
                code: record.symbol,
                name: Some(record.name).filter(|n| !n.is_empty()),
                keywords: record.keywords,
            }),
        }
    }
}

impl From<&str> for FlagRecord {
    fn from(line: &str) -> Self {
        Self::Line(line.to_owned())
    }
}

impl From<String> for FlagRecord {
    fn from(line: String) -> Self {
        Self::Line(line)
    }
}

impl From<FlagSpec> for FlagRecord {
    fn from(spec: FlagSpec) -> Self {
        Self::Spec(spec)
    }
}

/// A synthesized flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagEntry {
    /// Validated uppercase region code.
    pub code: String,
    pub symbol: String,
    pub name: String,
    pub keywords: Vec<String>,
}

impl FlagEntry {
    /// Converts the entry into a loader record for merging into a catalog.
    #[must_use]
    pub fn into_record(self) -> RawRecord {
        RawRecord {
            symbol: self.symbol,
            name: self.name,
            keywords: self.keywords,
        }
    }
}

/// Builds [`FlagEntry`] values with a chosen name resolver and locale order.
#[derive(Clone)]
pub struct FlagSynthesizer {
    names: Arc<dyn RegionNames>,
    locales: Vec<String>,
    marker: String,
}

impl FlagSynthesizer {
    /// Creates a synthesizer using `names` and the locale order and marker
    /// word from `config`.
    #[must_use]
    pub fn new(names: Arc<dyn RegionNames>, config: &FlagConfig) -> Self {
        Self {
            names,
            locales: config.locales.clone(),
            marker: config.marker.clone(),
        }
    }

    /// Builds one entry per well-formed record, in input order.
    /// Malformed records are skipped.
    pub fn build<I, R>(&self, records: I) -> Vec<FlagEntry>
    where
        I: IntoIterator<Item = R>,
        R: Into<FlagRecord>,
    {
        records
            .into_iter()
            .filter_map(|record| {
                let Some(spec) = record.into().into_spec() else {
                    tracing::debug!("skipping unparsable flag record");
                    return None;
                };
                let entry = self.entry(&spec);
                if entry.is_none() {
                    tracing::debug!(code = %spec.code, "skipping invalid flag code");
                }
                entry
            })
            .collect()
    }

    fn entry(&self, spec: &FlagSpec) -> Option<FlagEntry> {
        let code = validate_code(&spec.code)?;
        let symbol = flag_symbol(&code)?;
        let name = self.resolve_name(&code, spec.name.as_deref());

        let mut keywords = Vec::new();
        for token in search_tokens(&self.marker) {
            push_unique(&mut keywords, token);
        }
        push_unique(&mut keywords, FLAG_TOKEN.to_owned());
        push_unique(&mut keywords, code.to_lowercase());
        for token in search_tokens(&name) {
            push_unique(&mut keywords, token);
        }
        for keyword in &spec.keywords {
            for token in search_tokens(keyword) {
                push_unique(&mut keywords, token);
            }
        }

        Some(FlagEntry {
            code,
            symbol,
            name,
            keywords,
        })
    }

    fn resolve_name(&self, code: &str, explicit: Option<&str>) -> String {
        if let Some(name) = explicit.map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_owned();
        }
        self.locales
            .iter()
            .find_map(|locale| self.names.display_name(code, locale))
            .unwrap_or_else(|| code.to_owned())
    }
}

impl Default for FlagSynthesizer {
    fn default() -> Self {
        Self::new(Arc::new(BuiltinRegionNames), &FlagConfig::default())
    }
}

impl std::fmt::Debug for FlagSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagSynthesizer")
            .field("locales", &self.locales)
            .field("marker", &self.marker)
            .finish_non_exhaustive()
    }
}

/// Builds flag entries with the built-in name table, preferring French
/// names, then English.
///
/// ```
/// use emopick_core::flags::{build_flag_entries, FlagSpec};
///
/// let flags = build_flag_entries([FlagSpec::named("FR", "France")]);
/// assert_eq!(flags[0].symbol, "\u{1F1EB}\u{1F1F7}");
/// assert!(flags[0].keywords.contains(&"fr".to_string()));
/// ```
pub fn build_flag_entries<I, R>(records: I) -> Vec<FlagEntry>
where
    I: IntoIterator<Item = R>,
    R: Into<FlagRecord>,
{
    FlagSynthesizer::default().build(records)
}

/// The flag glyph for a two-letter uppercase code, or `None` if the code
/// is malformed.
#[must_use]
pub fn flag_symbol(code: &str) -> Option<String> {
    let code = validate_code(code)?;
    code.bytes().map(regional_indicator).collect()
}

/// Trims and uppercases `code`; `Some` only for exactly two letters A–Z.
fn validate_code(code: &str) -> Option<String> {
    let code = code.trim().to_uppercase();
    (code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())).then_some(code)
}

fn regional_indicator(letter: u8) -> Option<char> {
    char::from_u32(REGIONAL_INDICATOR_A + u32::from(letter - b'A'))
}

fn push_unique(keywords: &mut Vec<String>, token: String) {
    if !token.is_empty() && !keywords.contains(&token) {
        keywords.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::names::NoRegionNames;

    const FR_FLAG: &str = "\u{1F1EB}\u{1F1F7}";

    #[test]
    fn builds_france_from_spec() {
        let flags = build_flag_entries([FlagSpec::named("FR", "France")]);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].symbol, FR_FLAG);
        assert_eq!(flags[0].symbol.chars().count(), 2);
        assert_eq!(flags[0].name, "France");
        assert!(flags[0].keywords.contains(&"flag".to_string()));
        assert!(flags[0].keywords.contains(&"fr".to_string()));
    }

    #[test]
    fn keyword_order_is_marker_flag_code_then_name() {
        let flags = build_flag_entries([FlagSpec::named("CI", "Côte d’Ivoire")]);
        assert_eq!(
            flags[0].keywords,
            vec!["drapeau", "flag", "ci", "cote", "d", "ivoire"]
        );
    }

    #[test]
    fn rejects_malformed_codes() {
        let flags = build_flag_entries([
            FlagSpec::code("1A"),
            FlagSpec::code("FRA"),
            FlagSpec::code("fr"),
        ]);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].code, "FR");
        assert_eq!(flags[0].symbol, FR_FLAG);
    }

    #[test]
    fn rejects_empty_and_non_ascii_codes() {
        let flags = build_flag_entries([
            FlagSpec::code(""),
            FlagSpec::code("É1"),
            FlagSpec::code("Ü"),
            FlagSpec::code(" "),
        ]);
        assert!(flags.is_empty());
    }

    #[test]
    fn code_is_trimmed_before_validation() {
        let flags = build_flag_entries([FlagSpec::code("  de ")]);
        assert_eq!(flags[0].code, "DE");
    }

    #[test]
    fn parses_pipe_lines() {
        let flags = build_flag_entries(["be|Belgique|bruxelles,Wallonie"]);
        assert_eq!(flags[0].code, "BE");
        assert_eq!(flags[0].name, "Belgique");
        assert_eq!(
            flags[0].keywords,
            vec!["drapeau", "flag", "be", "belgique", "bruxelles", "wallonie"]
        );
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        let flags = build_flag_entries(["", "# EU", "XX1|Nope"]);
        assert!(flags.is_empty());
    }

    #[test]
    fn name_prefers_french_then_english() {
        let flags = build_flag_entries([FlagSpec::code("DE")]);
        assert_eq!(flags[0].name, "Allemagne");
        assert!(flags[0].keywords.contains(&"allemagne".to_string()));
    }

    #[test]
    fn locale_order_comes_from_config() {
        let config = FlagConfig {
            locales: vec!["en".to_string()],
            marker: "flag".to_string(),
        };
        let synth = FlagSynthesizer::new(Arc::new(BuiltinRegionNames), &config);
        let flags = synth.build([FlagSpec::code("DE")]);
        assert_eq!(flags[0].name, "Germany");
        assert_eq!(flags[0].keywords, vec!["flag", "de", "germany"]);
    }

    #[test]
    fn unresolvable_name_falls_back_to_code() {
        let synth = FlagSynthesizer::new(Arc::new(NoRegionNames), &FlagConfig::default());
        let flags = synth.build([FlagSpec::code("JP")]);
        assert_eq!(flags[0].name, "JP");
        // The code token already exists, so the name adds nothing.
        assert_eq!(flags[0].keywords, vec!["drapeau", "flag", "jp"]);
    }

    #[test]
    fn unknown_region_falls_back_to_code() {
        let flags = build_flag_entries([FlagSpec::code("QQ")]);
        assert_eq!(flags[0].name, "QQ");
        assert_eq!(flags[0].symbol, "\u{1F1F6}\u{1F1F6}");
    }

    #[test]
    fn blank_explicit_name_is_ignored() {
        let flags = build_flag_entries([FlagSpec::named("IT", "   ")]);
        assert_eq!(flags[0].name, "Italie");
    }

    #[test]
    fn supplemental_keywords_are_deduplicated() {
        let spec = FlagSpec {
            code: "FR".to_string(),
            name: Some("France".to_string()),
            keywords: vec!["FRANCE".into(), "Hexagone".into(), "flag".into()],
        };
        let flags = build_flag_entries([spec]);
        assert_eq!(
            flags[0].keywords,
            vec!["drapeau", "flag", "fr", "france", "hexagone"]
        );
    }

    #[test]
    fn mixed_record_kinds_keep_input_order() {
        let records: Vec<FlagRecord> = vec![
            "US|United States".into(),
            FlagSpec::code("zz9").into(),
            FlagSpec::named("CA", "Canada").into(),
        ];
        let codes: Vec<String> = build_flag_entries(records)
            .into_iter()
            .map(|f| f.code)
            .collect();
        assert_eq!(codes, vec!["US", "CA"]);
    }

    #[test]
    fn entry_converts_to_record() {
        let flags = build_flag_entries([FlagSpec::named("FR", "France")]);
        let record = flags[0].clone().into_record();
        assert_eq!(record.symbol, FR_FLAG);
        assert_eq!(record.name, "France");
        assert_eq!(record.keywords, flags[0].keywords);
    }

    #[test]
    fn flag_symbol_helper() {
        assert_eq!(flag_symbol("fr").as_deref(), Some(FR_FLAG));
        assert_eq!(flag_symbol("F"), None);
        assert_eq!(
            flag_symbol("AZ").as_deref(),
            Some("\u{1F1E6}\u{1F1FF}")
        );
    }

    #[test]
    fn malformed_records_are_skipped_in_place() {
        let synth = FlagSynthesizer::new(Arc::new(NoRegionNames), &FlagConfig::default());
        let records: Vec<FlagRecord> = vec![
            "".into(),
            FlagSpec::code("F1").into(),
            "JP|Japan".into(),
            FlagSpec::code("USA").into(),
            FlagSpec::named("it", "Italia").into(),
        ];

        let entries = synth.build(records);

        let codes: Vec<&str> = entries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["JP", "IT"]);
        assert_eq!(entries[1].name, "Italia");
    }

    #[test]
    fn flag_records_deserialize_untagged() {
        let json = r#"["FR|France", {"code": "DE"}]"#;
        let records: Vec<FlagRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0], FlagRecord::Line("FR|France".to_string()));
        assert_eq!(records[1], FlagRecord::Spec(FlagSpec::code("DE")));
    }
}
