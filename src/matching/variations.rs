//! Candidate-name generation for make and model strings.
//!
//! Upstream vehicle databases disagree on naming: "Harley Davidson" vs
//! "Harley-Davidson", "Z1000 JHF R" vs "Z1000", "6 SkyActiv Estate" vs
//! "6". These helpers produce an ordered, de-duplicated list of alternate
//! spellings to try against a source, with the original input always
//! first. Callers walk the list in order and stop at the first usable
//! result; every extra variant is another request against a rate-limited
//! API, so the list is kept short.

use std::sync::LazyLock;

use regex::Regex;

/// Leading model code of 3-5 caps/digits followed by a remainder,
/// e.g. "FXLR Low Rider" -> "Low Rider".
static LEADING_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{3,5}\s+(.+)$").expect("valid regex"));

/// Trim/body-style suffixes stripped to reach the base model name.
const TRIM_SUFFIXES: &[&str] = &["Estate", "Saloon", "Sport", "Touring", "Hatchback", "Sedan"];

/// Generate candidate spellings for a model name.
pub fn model_variations(model: &str) -> Vec<String> {
    let mut variations = vec![model.to_string()];

    // Leading significant word(s): "Z1000 JHF R" -> "Z1000", "Z1000 JHF";
    // trailing trim codes: "Z1000 JHF R" -> "JHF R".
    let words: Vec<&str> = model.split_whitespace().collect();
    if words.len() > 1 {
        push_unique(&mut variations, words[0].to_string());
        if words.len() > 2 {
            push_unique(&mut variations, words[..2].join(" "));
            push_unique(&mut variations, words[words.len() - 2..].join(" "));
        }
    }

    // Model code prefix stripped: "FXLR Low Rider" -> "Low Rider".
    if let Some(caps) = LEADING_CODE.captures(model) {
        push_unique(&mut variations, caps[1].to_string());
    }

    for suffix in TRIM_SUFFIXES {
        if let Some(stripped) = remove_ignore_ascii_case(model, suffix) {
            push_unique(&mut variations, stripped);
        }
    }

    variations
}

/// Generate candidate spellings for a make name.
pub fn make_variations(make: &str) -> Vec<String> {
    let mut variations = vec![make.to_string()];

    // "Harley Davidson" <-> "Harley-Davidson"
    if make.contains(' ') {
        push_unique(&mut variations, make.replace(' ', "-"));
    }
    if make.contains('-') {
        push_unique(&mut variations, make.replace('-', " "));
    }

    for variant in variations.clone() {
        push_unique(&mut variations, variant.to_lowercase());
    }

    variations
}

/// Append a derived form, preserving first-seen order and skipping
/// duplicates and variants that collapsed to nothing.
fn push_unique(variations: &mut Vec<String>, candidate: String) {
    if !candidate.is_empty() && !variations.contains(&candidate) {
        variations.push(candidate);
    }
}

/// Remove every occurrence of `needle` (ASCII case-insensitive) from
/// `input` and trim the ends. Returns `None` when the needle is absent.
fn remove_ignore_ascii_case(input: &str, needle: &str) -> Option<String> {
    let haystack = input.to_ascii_lowercase();
    let needle = needle.to_ascii_lowercase();

    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;
    let mut found = false;
    while let Some(pos) = haystack[cursor..].find(&needle) {
        let start = cursor + pos;
        out.push_str(&input[cursor..start]);
        cursor = start + needle.len();
        found = true;
    }
    if !found {
        return None;
    }
    out.push_str(&input[cursor..]);
    Some(out.trim().to_string())
}
