//! Candidate match collection and resolution
//!
//! Rules drop every candidate span into a `MatchCollector`, keyed by start
//! offset. Embedded languages then carve their regions out of what is
//! already there, and finally the collector is reduced to one
//! non-overlapping span per position, longest match first.

use std::collections::BTreeMap;

use super::span::MatchResult;

/// Accepted spans grouped by style key, each list in ascending offset order
pub type StyleMap = BTreeMap<String, Vec<MatchResult>>;

/// Candidate spans keyed by start offset
///
/// Candidates sharing an offset keep their insertion order, which is what
/// breaks ties between equally long matches.
#[derive(Debug, Clone, Default)]
pub struct MatchCollector {
    matches: BTreeMap<usize, Vec<MatchResult>>,
}

impl MatchCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate under its start offset
    pub fn add(&mut self, span: MatchResult) {
        self.matches.entry(span.offset()).or_default().push(span);
    }

    /// Remove every candidate overlapping `[start, end)`
    ///
    /// Candidates inside the range are dropped, candidates crossing one
    /// edge of it are cut back to the part outside. A candidate crossing
    /// both edges is left as it is.
    pub fn remove_range(&mut self, start: usize, end: usize) {
        let mut moved = Vec::new();

        // Nothing at or after `end` can overlap
        for (&offset, candidates) in self.matches.range_mut(..end) {
            candidates.retain_mut(|span| {
                let span_end = span.end();
                if span_end <= start {
                    true
                } else if offset >= start && span_end <= end {
                    false
                } else if span_end <= end {
                    // Crosses `start`: keep the head
                    *span = span.with_range(offset, start - offset);
                    true
                } else if offset >= start {
                    // Crosses `end`: the tail now starts at `end`
                    moved.push(span.with_range(end, span_end - end));
                    false
                } else {
                    // Crosses both edges: left alone
                    true
                }
            });
        }

        self.matches.retain(|_, candidates| !candidates.is_empty());
        for span in moved {
            self.add(span);
        }
    }

    /// Pick the winning spans, longest first, without overlaps
    ///
    /// Offsets are visited in ascending order starting at `from`. Offsets
    /// already covered by an accepted span are skipped; otherwise the
    /// longest candidate wins, the earliest one on a tie.
    pub fn resolve(&self, from: usize) -> StyleMap {
        let mut styles = StyleMap::new();
        let mut cursor = from;

        for (&offset, candidates) in self.matches.range(from..) {
            if offset < cursor {
                continue;
            }
            let Some(best) = longest(candidates) else {
                continue;
            };
            cursor = best.end();
            styles
                .entry(best.style_key().to_string())
                .or_default()
                .push(best.clone());
        }

        styles
    }

    /// Iterate over all candidates by offset, then insertion order
    pub fn iter(&self) -> impl Iterator<Item = &MatchResult> {
        self.matches.values().flatten()
    }

    /// Candidates starting at `offset`
    pub fn at(&self, offset: usize) -> &[MatchResult] {
        self.matches.get(&offset).map_or(&[][..], Vec::as_slice)
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.matches.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// First candidate with the greatest length
fn longest(candidates: &[MatchResult]) -> Option<&MatchResult> {
    let mut best: Option<&MatchResult> = None;
    for span in candidates {
        if best.map_or(true, |b| span.length() > b.length()) {
            best = Some(span);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(offset: usize, length: usize, key: &str) -> MatchResult {
        MatchResult::new(offset, length, key, None)
    }

    fn accepted(styles: &StyleMap) -> Vec<(usize, usize, &str)> {
        let mut all: Vec<_> = styles
            .iter()
            .flat_map(|(key, spans)| spans.iter().map(move |s| (s.offset(), s.length(), key.as_str())))
            .collect();
        all.sort();
        all
    }

    fn ranges(matches: &MatchCollector) -> Vec<(usize, usize, String)> {
        matches
            .iter()
            .map(|m| (m.offset(), m.length(), m.style_key().to_string()))
            .collect()
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut matches = MatchCollector::new();
        matches.add(span(5, 3, "a"));
        matches.add(span(1, 1, "b"));
        matches.add(span(5, 5, "c"));
        assert_eq!(matches.len(), 3);
        let at_five: Vec<_> = matches.at(5).iter().map(|m| m.style_key()).collect();
        assert_eq!(at_five, vec!["a", "c"]);
        assert!(matches.at(2).is_empty());
    }

    #[test]
    fn test_remove_disjoint_untouched() {
        let mut matches = MatchCollector::new();
        matches.add(span(0, 5, "before"));
        matches.add(span(9, 3, "after"));
        matches.remove_range(5, 9);
        assert_eq!(
            ranges(&matches),
            vec![(0, 5, "before".to_string()), (9, 3, "after".to_string())]
        );
    }

    #[test]
    fn test_remove_contained() {
        let mut matches = MatchCollector::new();
        matches.add(span(5, 4, "exact"));
        matches.add(span(6, 1, "inside"));
        matches.remove_range(5, 9);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_remove_splits_edges() {
        let mut matches = MatchCollector::new();
        matches.add(span(2, 5, "left"));
        matches.add(span(7, 5, "right"));
        matches.remove_range(5, 9);
        assert_eq!(
            ranges(&matches),
            vec![(2, 3, "left".to_string()), (9, 3, "right".to_string())]
        );
        // The right fragment is found under its new start
        assert_eq!(matches.at(9).len(), 1);
        assert!(matches.at(7).is_empty());
    }

    #[test]
    fn test_remove_leaves_spanning_match() {
        let mut matches = MatchCollector::new();
        matches.add(span(0, 20, "host"));
        matches.remove_range(5, 9);
        assert_eq!(ranges(&matches), vec![(0, 20, "host".to_string())]);
    }

    #[test]
    fn test_resolve_longest_wins() {
        let mut matches = MatchCollector::new();
        matches.add(span(5, 3, "short"));
        matches.add(span(5, 5, "long"));
        let styles = matches.resolve(0);
        assert_eq!(accepted(&styles), vec![(5, 5, "long")]);
    }

    #[test]
    fn test_resolve_first_wins_on_tie() {
        let mut matches = MatchCollector::new();
        matches.add(span(5, 4, "first"));
        matches.add(span(5, 4, "second"));
        let styles = matches.resolve(0);
        assert_eq!(accepted(&styles), vec![(5, 4, "first")]);
        assert!(!styles.contains_key("second"));
    }

    #[test]
    fn test_resolve_skips_covered_offsets() {
        let mut matches = MatchCollector::new();
        matches.add(span(0, 6, "comment"));
        matches.add(span(2, 2, "keyword"));
        matches.add(span(6, 1, "keyword"));
        let styles = matches.resolve(0);
        assert_eq!(accepted(&styles), vec![(0, 6, "comment"), (6, 1, "keyword")]);
        assert_eq!(styles["keyword"].len(), 1);
    }

    #[test]
    fn test_resolve_groups_by_style_in_order() {
        let mut matches = MatchCollector::new();
        matches.add(span(8, 2, "number"));
        matches.add(span(0, 3, "keyword"));
        matches.add(span(4, 2, "number"));
        let styles = matches.resolve(0);
        let numbers: Vec<_> = styles["number"].iter().map(|m| m.offset()).collect();
        assert_eq!(numbers, vec![4, 8]);
        assert_eq!(styles.len(), 2);
    }

    #[test]
    fn test_resolve_starts_at_cursor() {
        let mut matches = MatchCollector::new();
        matches.add(span(10, 2, "number"));
        assert_eq!(accepted(&matches.resolve(10)), vec![(10, 2, "number")]);
        assert!(MatchCollector::new().resolve(0).is_empty());
    }
}
