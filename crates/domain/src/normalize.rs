//! Name normalization shared by catalog construction and incoming queries.
//!
//! Item names arrive from two messy sources: copy/paste out of the bank
//! website (stray punctuation, "(2)" stock counts, "Enchanted" suffixes)
//! and free-typed request lines. Both sides of every lookup go through the
//! same pipeline so that keys agree.

/// Produce the canonical lookup key for an item name.
///
/// Pipeline, in order: collapse whitespace runs, drop parenthesized integer
/// counts such as "(2)", strip characters outside letters / digits /
/// whitespace / apostrophe / hyphen, drop standalone quality-tier words,
/// collapse whitespace again, trim, lowercase.
///
/// Count removal runs before the punctuation strip; the other way around
/// the strip eats the parentheses and the count pattern can never match.
///
/// Deterministic, total, and idempotent: `normalize(normalize(x)) ==
/// normalize(x)`. Display casing is preserved separately on the catalog
/// record, never here.
pub fn normalize(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw);
    let without_counts = strip_parenthesized_counts(&collapsed);
    let stripped: String = without_counts
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '\'' || *c == '-')
        .collect();
    let without_quality = strip_quality_words(&stripped);
    collapse_whitespace(&without_quality).to_lowercase()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove "(N)" groups where N is all digits. Anything else between
/// parentheses is left for the punctuation strip.
fn strip_parenthesized_counts(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '(' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            if j > i + 1 && j < chars.len() && chars[j] == ')' {
                i = j + 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

fn strip_quality_words(s: &str) -> String {
    s.split_whitespace()
        .filter(|word| {
            !word.eq_ignore_ascii_case("raw")
                && !word.eq_ignore_ascii_case("enchanted")
                && !word.eq_ignore_ascii_case("legendary")
        })
        .collect::<Vec<_>>()
        .join(" ")
}
