//! Brand and model name normalization.
//!
//! Collapses free-form names scraped from supplier portals into deterministic
//! lookup keys. Both the canonical catalog entries (at load time) and every
//! incoming query string pass through the same functions, so normalization is
//! idempotent: re-normalizing a normalized string returns it unchanged.

mod rules;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

use rules::{BRAND_ALIASES, REPLACEMENT_RULES};

static PAREN_AFTER_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\S)\(").expect("static pattern"));
static SEPARATOR_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-_.]+").expect("static pattern"));
static COMMA_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*").expect("static pattern"));
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").expect("static pattern"));

/// Normalizer with per-instance memoization caches.
///
/// Caches are keyed by the trimmed raw input and are purely observational:
/// they only ever hold values the normalization itself produced. Instance
/// scope keeps parallel test runs from sharing state.
pub struct NameNormalizer {
    brand_cache: HashMap<String, String>,
    model_cache: HashMap<String, String>,
}

impl NameNormalizer {
    pub fn new() -> Self {
        Self {
            brand_cache: HashMap::new(),
            model_cache: HashMap::new(),
        }
    }

    /// Collapse a raw brand string into its canonical lookup key.
    ///
    /// Upper-cased, diacritics stripped, everything but ASCII letters and
    /// digits removed, then routed through the alias table. An alias value
    /// is itself re-collapsed ("DAEWOO - CHEVROLET" becomes
    /// "DAEWOOCHEVROLET"). Unknown brands fall back to the collapsed form;
    /// empty input yields an empty key, which matches nothing.
    pub fn normalize_brand(&mut self, raw: &str) -> String {
        let trimmed = raw.trim();
        if let Some(hit) = self.brand_cache.get(trimmed) {
            return hit.clone();
        }

        let collapsed = collapse_brand(trimmed);
        let key = match BRAND_ALIASES.get(collapsed.as_str()) {
            Some(canonical) => collapse_brand(canonical),
            None => collapsed,
        };

        self.brand_cache.insert(trimmed.to_string(), key.clone());
        key
    }

    /// Normalize a raw model string for catalog lookup.
    pub fn normalize_model(&mut self, raw: &str) -> String {
        let trimmed = raw.trim();
        if let Some(hit) = self.model_cache.get(trimmed) {
            return hit.clone();
        }

        let mut s = strip_diacritics(&trimmed.to_uppercase());

        // Source data truncates trailing parenthetical qualifiers; repair the
        // common single-character case only. Not a general balancer.
        if s.matches('(').count() > s.matches(')').count() {
            s.push(')');
        }

        s = s.replace(',', " ");
        s = s.replace('İ', "I");
        s = s.replace(['|', '/'], " ");
        s = PAREN_AFTER_TEXT.replace_all(&s, "$1 (").into_owned();
        s = SEPARATOR_RUNS.replace_all(&s, " ").into_owned();
        s = COMMA_SPACING.replace_all(&s, ",").into_owned();
        // keep parenthesized content, drop only the delimiters
        s = s.replace(['(', ')'], "");
        s = MULTI_SPACE.replace_all(&s, " ").into_owned();
        let mut s = s.trim().to_string();

        for (pattern, replacement) in REPLACEMENT_RULES.iter() {
            s = pattern.replace_all(&s, *replacement).into_owned();
        }

        self.model_cache.insert(trimmed.to_string(), s.clone());
        s
    }
}

fn collapse_brand(raw: &str) -> String {
    strip_diacritics(&raw.to_uppercase())
        .replace('İ', "I")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// NFD-decompose and drop combining marks (U+0300–U+036F). The Turkish
/// dotted capital İ is mapped to plain I separately by the callers.
fn strip_diacritics(s: &str) -> String {
    s.nfd()
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_normalization_is_idempotent() {
        let mut n = NameNormalizer::new();
        let once = n.normalize_brand("Škoda Auto a.s.");
        let twice = n.normalize_brand(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn model_normalization_is_idempotent() {
        let mut n = NameNormalizer::new();
        for raw in [
            "Golf IV (1J1, 1J5)",
            "PASSAT Variant (3B6",
            "astra-g_station wagon",
            "İbiza 1.4 | 16V",
        ] {
            let once = n.normalize_model(raw);
            let twice = n.normalize_model(&once);
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn alias_converges_to_canonical_brand() {
        let mut n = NameNormalizer::new();
        assert_eq!(n.normalize_brand("VW"), n.normalize_brand("VOLKSWAGEN"));
        assert_eq!(n.normalize_brand("Mercedes"), n.normalize_brand("MERCEDES-BENZ"));
    }

    #[test]
    fn alias_value_is_collapsed_into_key_space() {
        let mut n = NameNormalizer::new();
        assert_eq!(n.normalize_brand("Daewoo"), "DAEWOOCHEVROLET");
        assert_eq!(n.normalize_brand("DAEWOO - CHEVROLET"), "DAEWOOCHEVROLET");
    }

    #[test]
    fn brand_keys_are_diacritic_insensitive() {
        let mut n = NameNormalizer::new();
        assert_eq!(n.normalize_brand("ŠKODA"), n.normalize_brand("SKODA"));
        assert_eq!(n.normalize_brand("Citroën"), n.normalize_brand("CITROEN"));
    }

    #[test]
    fn turkish_dotted_i_maps_to_plain_i() {
        let mut n = NameNormalizer::new();
        assert_eq!(n.normalize_model("İnsignia"), n.normalize_model("Insignia"));
        assert_eq!(n.normalize_brand("HİDROMEK"), n.normalize_brand("HIDROMEK"));
    }

    #[test]
    fn repairs_single_missing_closing_paren() {
        let mut n = NameNormalizer::new();
        assert_eq!(
            n.normalize_model("TOURAN (1T1"),
            n.normalize_model("TOURAN (1T1)")
        );
    }

    #[test]
    fn paren_delimiters_are_stripped_but_content_kept() {
        let mut n = NameNormalizer::new();
        assert_eq!(n.normalize_model("GOLF(1K1)"), "GOLF 1K1");
    }

    #[test]
    fn replacement_rules_respect_word_boundaries() {
        let mut n = NameNormalizer::new();
        // CABRIOLET as a sub-token of a longer token must not fire
        assert_eq!(n.normalize_model("MEGANE CABRIOLETX"), "MEGANE CABRIOLETX");
        assert_eq!(n.normalize_model("MEGANE CABRIOLET"), "MEGANE CABRIO");
    }

    #[test]
    fn later_rules_match_text_produced_by_earlier_rules() {
        let mut n = NameNormalizer::new();
        assert_eq!(n.normalize_model("A4 Convertible"), "A4 CABRIO");
    }

    #[test]
    fn separator_runs_collapse_to_single_space() {
        let mut n = NameNormalizer::new();
        assert_eq!(n.normalize_model("e-class_t.model"), "E CLASS T MODEL");
        assert_eq!(n.normalize_model("306 | 1.9 D/TD"), "306 1 9 D TD");
    }

    #[test]
    fn empty_input_normalizes_to_empty_key() {
        let mut n = NameNormalizer::new();
        assert_eq!(n.normalize_brand("   "), "");
        assert_eq!(n.normalize_model(""), "");
    }
}
