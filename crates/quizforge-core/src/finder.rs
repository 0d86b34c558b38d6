//! Locating term occurrences in source text.
//!
//! Matching is case-insensitive and bounded by Unicode word boundaries on
//! both sides, but every occurrence keeps the span exactly as it appears in
//! the source so the answer key shows the original casing.

use regex::RegexBuilder;

use crate::model::{Occurrence, Term};

/// Find every whole-token match of `term.word` in `source`, left to right.
///
/// Empty or whitespace-only words produce no matches. Multi-word terms must
/// appear as the same contiguous phrase.
pub fn find_occurrences<'t>(source: &str, term: &'t Term) -> Vec<Occurrence<'t>> {
    if term.word.trim().is_empty() {
        return Vec::new();
    }

    let pattern = format!(r"\b{}\b", regex::escape(&term.word));
    let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("skipping term '{}': {}", term.word, e);
            return Vec::new();
        }
    };

    re.find_iter(source)
        .map(|m| Occurrence {
            start: m.start(),
            length: m.len(),
            matched_text: m.as_str().to_string(),
            term,
        })
        .collect()
}

/// Like [`find_occurrences`], keeping only the first `max` matches.
pub fn find_capped<'t>(source: &str, term: &'t Term, max: usize) -> Vec<Occurrence<'t>> {
    let mut found = find_occurrences(source, term);
    found.truncate(max);
    found
}

/// Collect capped occurrences for every term, in term order.
pub fn find_all<'t>(source: &str, terms: &'t [Term], max_per_term: usize) -> Vec<Occurrence<'t>> {
    terms
        .iter()
        .flat_map(|term| find_capped(source, term, max_per_term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(word: &str) -> Term {
        Term::new(word, 0.8, "key_concept")
    }

    #[test]
    fn case_insensitive_preserves_source_casing() {
        let t = term("photosynthesis");
        let found = find_occurrences("Photosynthesis needs light. photosynthesis!", &t);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].start, 0);
        assert_eq!(found[0].matched_text, "Photosynthesis");
        assert_eq!(found[1].start, 28);
        assert_eq!(found[1].matched_text, "photosynthesis");
    }

    #[test]
    fn respects_word_boundaries() {
        let t = term("cell");
        let found = find_occurrences("cells and cellular cell, a cell.", &t);
        let starts: Vec<usize> = found.iter().map(|o| o.start).collect();
        assert_eq!(starts, vec![19, 27]);
    }

    #[test]
    fn multi_word_phrase() {
        let t = term("carbon dioxide");
        let found = find_occurrences("absorb Carbon Dioxide from air; carbon  dioxide", &t);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].matched_text, "Carbon Dioxide");
        assert_eq!(found[0].length, 14);
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let t = term("C.O");
        let found = find_occurrences("C.O and CxO", &t);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, 0);
    }

    #[test]
    fn empty_terms_find_nothing() {
        assert!(find_occurrences("some text", &term("")).is_empty());
        assert!(find_occurrences("some   text", &term("  ")).is_empty());
    }

    #[test]
    fn cap_keeps_earliest() {
        let t = term("ATP");
        let found = find_capped("ATP, atp and Atp", &t, 2);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].start, 0);
        assert_eq!(found[1].start, 5);
    }

    #[test]
    fn non_ascii_offsets_are_byte_offsets() {
        let t = term("Zürich");
        let source = "Café in ZÜRICH";
        let found = find_occurrences(source, &t);
        assert_eq!(found.len(), 1);
        assert_eq!(&source[found[0].start..found[0].end()], "ZÜRICH");
    }

    #[test]
    fn find_all_flattens_in_term_order() {
        let terms = vec![term("glucose"), term(""), term("oxygen")];
        let found = find_all("oxygen and glucose, glucose, glucose", &terms, 2);
        let words: Vec<&str> = found.iter().map(|o| o.term.word.as_str()).collect();
        assert_eq!(words, vec!["glucose", "glucose", "oxygen"]);
    }
}
