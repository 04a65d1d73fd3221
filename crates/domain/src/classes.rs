//! Spell/class secondary matcher.
//!
//! Queries like "spell wizard" or "show mage spells" list the spells banked
//! for one character class. The alias table, the per-class keyword
//! fragments, and the spell-name indicators are all data: they ship with
//! sensible defaults and can be replaced wholesale from configuration
//! without touching any matching code.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ItemRecord};

/// Data-driven tables for class resolution and spell detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassConfig {
    /// Abbreviation / alternate spelling -> canonical class key.
    pub aliases: HashMap<String, String>,
    /// Canonical class key -> characteristic spell-name fragments. A
    /// heuristic fallback for items whose name never mentions the class.
    pub keywords: HashMap<String, Vec<String>>,
    /// Name fragments that mark an item as a spell at ingestion time.
    pub spell_indicators: Vec<String>,
}

impl Default for ClassConfig {
    fn default() -> Self {
        let alias_table: &[(&str, &str)] = &[
            ("mag", "magician"),
            ("mage", "magician"),
            ("magician", "magician"),
            ("nec", "necromancer"),
            ("necro", "necromancer"),
            ("necromancer", "necromancer"),
            ("wiz", "wizard"),
            ("wizard", "wizard"),
            ("enc", "enchanter"),
            ("enchanter", "enchanter"),
            ("dru", "druid"),
            ("druid", "druid"),
            ("sha", "shaman"),
            ("sham", "shaman"),
            ("shaman", "shaman"),
            ("cle", "cleric"),
            ("clr", "cleric"),
            ("cleric", "cleric"),
            ("pal", "paladin"),
            ("paladin", "paladin"),
            ("sk", "shadowknight"),
            ("shadow", "shadowknight"),
            ("shadowknight", "shadowknight"),
            ("ran", "ranger"),
            ("rng", "ranger"),
            ("ranger", "ranger"),
            ("bst", "beastlord"),
            ("beast", "beastlord"),
            ("beastlord", "beastlord"),
        ];

        let keyword_table: &[(&str, &[&str])] = &[
            ("magician", &["summon", "elemental"]),
            ("necromancer", &["lich", "bone walk"]),
            ("wizard", &["burnout", "ice comet"]),
            ("enchanter", &["illusion", "clarity"]),
            ("druid", &["wolf form", "thorncoat"]),
            ("shaman", &["totem", "spirit of"]),
            ("cleric", &["celestial heal", "resurrection"]),
            ("paladin", &["lay hands", "valor"]),
            ("shadowknight", &["harm touch", "fear"]),
            ("ranger", &["snare", "eagle eye"]),
            ("beastlord", &["spirit of the", "feral"]),
        ];

        Self {
            aliases: alias_table
                .iter()
                .map(|(a, c)| (a.to_string(), c.to_string()))
                .collect(),
            keywords: keyword_table
                .iter()
                .map(|(class, fragments)| {
                    (
                        class.to_string(),
                        fragments.iter().map(|f| f.to_string()).collect(),
                    )
                })
                .collect(),
            spell_indicators: [
                "spell:",
                "song:",
                "tome of",
                "words of",
                "rune of",
                "scroll of",
                "incantation of",
                "chant of",
                "hymn of",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl ClassConfig {
    /// Resolve an alias or abbreviation to the canonical class key. Unknown
    /// tokens pass through lowercased, so classes absent from the table
    /// still hit the index lookup.
    pub fn canonical_class(&self, token: &str) -> String {
        let lowered = token.trim().to_lowercase();
        self.aliases.get(&lowered).cloned().unwrap_or(lowered)
    }

    /// Whether an item name mentions a class: the canonical name, the raw
    /// alias token as typed, or any characteristic keyword fragment.
    pub fn class_name_appears(&self, item_name: &str, canonical: &str, raw_token: &str) -> bool {
        let name = item_name.to_lowercase();
        if name.contains(canonical) || name.contains(&raw_token.to_lowercase()) {
            return true;
        }
        self.keywords
            .get(canonical)
            .map(|fragments| fragments.iter().any(|f| name.contains(f.as_str())))
            .unwrap_or(false)
    }

    /// Whether an item name looks like a spell, per the indicator table.
    /// Used at ingestion when the source does not classify records.
    pub fn looks_like_spell(&self, item_name: &str) -> bool {
        let name = item_name.to_lowercase();
        self.spell_indicators
            .iter()
            .any(|indicator| name.contains(indicator.as_str()))
    }
}

/// Recognize a spell-listing query and extract the class token.
///
/// Accepted shapes: "spell X", "spells X", "X spell", "X spells",
/// "show X spells", "list X spells". Returns the class token as typed
/// (lowercased); anything else is `None` and falls through to item search.
pub fn parse_spell_query(query: &str) -> Option<String> {
    let lowered = query.trim().to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();

    let is_spell_word = |t: &str| t == "spell" || t == "spells";

    match tokens.as_slice() {
        [keyword, class] if is_spell_word(keyword) => Some((*class).to_string()),
        [class, keyword] if is_spell_word(keyword) => Some((*class).to_string()),
        [verb, class, keyword]
            if (*verb == "show" || *verb == "list") && is_spell_word(keyword) =>
        {
            Some((*class).to_string())
        }
        _ => None,
    }
}

/// List banked spells for a class.
///
/// The pre-sorted per-class index is authoritative; the linear scan over
/// the whole catalog is a fallback for classes the index never saw, capped
/// at `cap` results and sorted by display name.
pub fn resolve_spells(
    catalog: &Catalog,
    config: &ClassConfig,
    class_token: &str,
    cap: usize,
) -> Vec<ItemRecord> {
    let canonical = config.canonical_class(class_token);

    let indexed = catalog.spells_for_class(&canonical);
    if !indexed.is_empty() {
        return indexed.into_iter().cloned().collect();
    }

    let mut results: Vec<ItemRecord> = Vec::new();
    for (_, record) in catalog.iter() {
        if record.is_spell && config.class_name_appears(&record.name, &canonical, class_token) {
            results.push(record.clone());
            if results.len() >= cap {
                break;
            }
        }
    }
    results.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    results
}
