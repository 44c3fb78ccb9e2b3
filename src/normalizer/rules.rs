//! Static normalization tables: brand aliases and model replacement rules.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Informal or abbreviated brand spellings mapped to canonical brand names.
/// Keys are stored in collapsed form (uppercase, alphanumeric only); values
/// are display names and pass through the same collapse before use, so alias
/// targets and brand keys live in the same key space.
pub static BRAND_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("VW", "VOLKSWAGEN"),
        ("MERCEDES", "MERCEDES-BENZ"),
        ("MB", "MERCEDES-BENZ"),
        ("TOFAS", "FIAT"),
        ("VAUXHALL", "OPEL"),
        ("DAEWOO", "DAEWOO - CHEVROLET"),
        ("CHEVROLET", "DAEWOO - CHEVROLET"),
        ("ALFA", "ALFA ROMEO"),
        ("ROVER", "LAND ROVER"),
    ])
});

/// Whole-word model substitutions, applied in order after base cleanup.
/// Each rule scans the full current string, so a later rule may match text
/// produced by an earlier one (CONVERTIBLE ends up as CABRIO).
const MODEL_REPLACEMENTS: &[(&str, &str)] = &[
    ("CONVERTIBLE", "CABRIOLET"),
    ("CABRIOLET", "CABRIO"),
    ("STATION WAGON", "SW"),
    ("ESTATE", "SW"),
    ("HATCHBACK", "HB"),
    ("SALOON", "SEDAN"),
];

/// Replacement rules compiled with word-boundary anchors. Case-sensitive:
/// input is already upper-cased by the time rules run.
pub static REPLACEMENT_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    MODEL_REPLACEMENTS
        .iter()
        .map(|(key, value)| {
            let pattern = format!(r"\b{}\b", regex::escape(key));
            (Regex::new(&pattern).expect("static rule pattern"), *value)
        })
        .collect()
});
