use std::collections::BTreeSet;

use chrono::NaiveDate;
use strsim::normalized_levenshtein;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::domain::MailingAddress;

/// Similarity floor applied when one name's token set contains the other's
/// (middle names, initials). Above the default agreement threshold, below
/// the 1.0 reserved for exact matches.
const SUBSET_SIMILARITY_FLOOR: f64 = 0.9;

/// Corporate suffixes ignored when comparing employer names.
const CORPORATE_SUFFIXES: [&str; 7] = ["inc", "corp", "llc", "llp", "ltd", "co", "company"];

/// Outcome of a single field comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    pub agrees: bool,
    pub confidence: f64,
}

impl MatchScore {
    fn miss() -> Self {
        Self {
            agrees: false,
            confidence: 0.0,
        }
    }
}

/// Deterministic comparator for claimed vs extracted field values. Replaces
/// the hosted-model similarity judgement with local string algorithms so
/// evaluations are reproducible offline.
#[derive(Debug, Clone)]
pub struct FieldMatcher {
    name_threshold: f64,
    address_threshold: f64,
}

impl FieldMatcher {
    pub fn new(name_threshold: f64, address_threshold: f64) -> Self {
        Self {
            name_threshold,
            address_threshold,
        }
    }

    /// Free-text comparison; agreement boundary is inclusive.
    pub fn compare_name(&self, claimed: &str, extracted: &str) -> MatchScore {
        let similarity = text_similarity(claimed, extracted);
        MatchScore {
            agrees: similarity > 0.0 && similarity >= self.name_threshold,
            confidence: similarity,
        }
    }

    /// Employer comparison: free-text similarity with corporate suffixes
    /// (Inc, LLC, ...) stripped from both sides first.
    pub fn compare_employer(&self, claimed: &str, extracted: &str) -> MatchScore {
        let similarity = text_similarity(
            &strip_corporate_suffixes(claimed),
            &strip_corporate_suffixes(extracted),
        );
        MatchScore {
            agrees: similarity > 0.0 && similarity >= self.name_threshold,
            confidence: similarity,
        }
    }

    /// Calendar dates either match or they do not; no fuzziness.
    pub fn compare_date(claimed: NaiveDate, extracted: NaiveDate) -> MatchScore {
        if claimed == extracted {
            MatchScore {
                agrees: true,
                confidence: 1.0,
            }
        } else {
            MatchScore::miss()
        }
    }

    /// Component-wise address comparison: exact on state/zip, fuzzy on
    /// street/city, aggregated as the mean of the four component scores.
    pub fn compare_address(&self, claimed: &MailingAddress, extracted: &MailingAddress) -> MatchScore {
        let street = text_similarity(&claimed.street, &extracted.street);
        let city = text_similarity(&claimed.city, &extracted.city);
        let state = exact_component(&claimed.state, &extracted.state);
        let zip = exact_component(&claimed.zip, &extracted.zip);

        let aggregate = (street + city + state + zip) / 4.0;
        MatchScore {
            agrees: aggregate > 0.0 && aggregate >= self.address_threshold,
            confidence: aggregate,
        }
    }
}

/// NFKD-fold a raw value: decompose, drop combining marks, lowercase, map
/// punctuation to spaces, collapse whitespace. Visually-equivalent names
/// normalize identically so diacritics are never penalized.
pub(crate) fn normalize_text(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    for ch in raw.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            folded.extend(ch.to_lowercase());
        } else {
            folded.push(' ');
        }
    }
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized similarity in [0, 1]: the better of the Levenshtein ratio and
/// the Sørensen–Dice token coefficient, floored for token-subset names.
/// Empty input on either side scores 0.0.
pub(crate) fn text_similarity(claimed: &str, extracted: &str) -> f64 {
    let a = normalize_text(claimed);
    let b = normalize_text(extracted);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let edit_ratio = normalized_levenshtein(&a, &b);

    let a_tokens: BTreeSet<&str> = a.split(' ').collect();
    let b_tokens: BTreeSet<&str> = b.split(' ').collect();
    let shared = a_tokens.intersection(&b_tokens).count();
    let dice = 2.0 * shared as f64 / (a_tokens.len() + b_tokens.len()) as f64;

    let mut similarity = edit_ratio.max(dice);
    if shared > 0 && (a_tokens.is_subset(&b_tokens) || b_tokens.is_subset(&a_tokens)) {
        similarity = similarity.max(SUBSET_SIMILARITY_FLOOR);
    }

    similarity.clamp(0.0, 1.0)
}

fn exact_component(claimed: &str, extracted: &str) -> f64 {
    let a = normalize_text(claimed);
    let b = normalize_text(extracted);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        1.0
    } else {
        0.0
    }
}

fn strip_corporate_suffixes(raw: &str) -> String {
    normalize_text(raw)
        .split(' ')
        .filter(|token| !CORPORATE_SUFFIXES.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}
