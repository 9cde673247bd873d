//! Model-name similarity scoring.
//!
//! Produces a 0-100 confidence score that two free-text model names denote
//! the same vehicle model. Numeric designators are the strongest
//! disambiguator in model naming ("ZX6R" vs "ZX9R" are different bikes no
//! matter how similar the letters look), so a digit mismatch zeroes the
//! score before any textual comparison runs.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use strsim::levenshtein;

static DIGIT_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Score how likely `target` and `candidate` denote the same model.
///
/// Stages, first match wins: disjoint number tokens -> 0, equal after
/// normalization -> 100, one contains the other -> 90, otherwise a
/// Levenshtein ratio scaled to 0-100.
pub fn similarity(target: &str, candidate: &str) -> f64 {
    let target = target.trim().to_lowercase();
    let candidate = candidate.trim().to_lowercase();

    let target_numbers = number_tokens(&target);
    let candidate_numbers = number_tokens(&candidate);
    if !target_numbers.is_empty()
        && !candidate_numbers.is_empty()
        && target_numbers.is_disjoint(&candidate_numbers)
    {
        return 0.0;
    }

    let target = strip_separators(&target);
    let candidate = strip_separators(&candidate);

    if target == candidate {
        return 100.0;
    }

    if target.contains(&candidate) || candidate.contains(&target) {
        return 90.0;
    }

    let max_len = target.chars().count().max(candidate.chars().count());
    if max_len == 0 {
        return 0.0;
    }

    let distance = levenshtein(&target, &candidate);
    (100.0 * (1.0 - distance as f64 / max_len as f64)).max(0.0)
}

/// Contiguous digit runs as a set of tokens ("CB 650 R" -> {"650"}).
fn number_tokens(input: &str) -> HashSet<String> {
    DIGIT_RUNS
        .find_iter(input)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn strip_separators(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}
