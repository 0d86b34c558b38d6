//! Overlap resolution across all candidate occurrences.
//!
//! Candidates are ordered by start offset descending (longer span first on a
//! tie, then higher importance) and accepted greedily. The accepted set comes
//! back in that same descending order, which is the order the assembler must
//! splice in.

use std::cmp::Ordering;

use crate::model::Occurrence;

/// Priority order: later start first, then longer span, then higher importance.
fn priority(a: &Occurrence<'_>, b: &Occurrence<'_>) -> Ordering {
    b.start
        .cmp(&a.start)
        .then_with(|| b.length.cmp(&a.length))
        .then_with(|| b.term.importance.total_cmp(&a.term.importance))
}

/// Select a non-overlapping subset of `candidates`.
///
/// The result is sorted by start offset descending.
pub fn resolve_overlaps(mut candidates: Vec<Occurrence<'_>>) -> Vec<Occurrence<'_>> {
    // Stable sort keeps term order for exact duplicates.
    candidates.sort_by(priority);

    let mut accepted: Vec<Occurrence<'_>> = Vec::with_capacity(candidates.len());
    for occ in candidates {
        if accepted.iter().any(|taken| taken.overlaps(&occ)) {
            tracing::debug!(
                "dropping overlapping occurrence '{}' at {}",
                occ.matched_text,
                occ.start
            );
            continue;
        }
        accepted.push(occ);
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Term;

    fn occ<'t>(term: &'t Term, start: usize, length: usize) -> Occurrence<'t> {
        Occurrence {
            start,
            length,
            matched_text: "x".repeat(length),
            term,
        }
    }

    #[test]
    fn same_start_prefers_longer_span() {
        let new = Term::new("New", 0.9, "vocabulary");
        let new_york = Term::new("New York", 0.4, "key_concept");
        let accepted = resolve_overlaps(vec![occ(&new, 10, 3), occ(&new_york, 10, 8)]);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].term.word, "New York");
    }

    #[test]
    fn same_span_prefers_higher_importance() {
        let low = Term::new("cell", 0.2, "vocabulary");
        let high = Term::new("Cell", 0.95, "key_concept");
        let accepted = resolve_overlaps(vec![occ(&low, 4, 4), occ(&high, 4, 4)]);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].term.importance, 0.95);
    }

    #[test]
    fn later_occurrence_wins_collision() {
        // "York City" starting inside "New York" is accepted first.
        let a = Term::new("New York", 0.9, "key_concept");
        let b = Term::new("York City", 0.1, "key_concept");
        let accepted = resolve_overlaps(vec![occ(&a, 0, 8), occ(&b, 4, 9)]);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].term.word, "York City");
    }

    #[test]
    fn output_is_descending_and_disjoint() {
        let t = Term::new("t", 0.5, "vocabulary");
        let accepted = resolve_overlaps(vec![
            occ(&t, 0, 3),
            occ(&t, 20, 5),
            occ(&t, 2, 4),
            occ(&t, 10, 3),
            occ(&t, 12, 2),
        ]);
        let starts: Vec<usize> = accepted.iter().map(|o| o.start).collect();
        assert_eq!(starts, vec![20, 12, 2]);
        for (i, a) in accepted.iter().enumerate() {
            for b in &accepted[i + 1..] {
                assert!(!a.overlaps(b));
            }
        }
    }

    #[test]
    fn importance_outside_nominal_range_still_orders() {
        let wild = Term::new("x", 7.5, "vocabulary");
        let neg = Term::new("y", -1.0, "vocabulary");
        let accepted = resolve_overlaps(vec![occ(&neg, 0, 2), occ(&wild, 0, 2)]);
        assert_eq!(accepted[0].term.word, "x");
    }

    #[test]
    fn empty_input() {
        assert!(resolve_overlaps(Vec::new()).is_empty());
    }
}
