use std::collections::HashSet;

use crate::extract::ExtractedRecord;

/// Keep the first record seen for each link, in input order, and stop pulling
/// from `records` once `max_count` have been kept.
pub fn dedupe_and_limit<I>(records: I, max_count: usize) -> Vec<ExtractedRecord>
where
    I: IntoIterator<Item = ExtractedRecord>,
{
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    if max_count == 0 {
        return kept;
    }
    for rec in records {
        if !seen.insert(rec.link.clone()) {
            continue;
        }
        kept.push(rec);
        if kept.len() >= max_count {
            break;
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn rec(title: &str, link: &str) -> ExtractedRecord {
        ExtractedRecord {
            title: title.to_string(),
            link: link.to_string(),
            summary: String::new(),
            raw_date: None,
        }
    }

    fn titles(recs: &[ExtractedRecord]) -> Vec<&str> {
        recs.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn first_occurrence_wins() {
        let input = vec![
            rec("a", "https://x/1"),
            rec("b", "https://x/2"),
            rec("a-again", "https://x/1"),
            rec("c", "https://x/3"),
            rec("b-again", "https://x/2"),
        ];
        let out = dedupe_and_limit(input, 40);
        assert_eq!(titles(&out), vec!["a", "b", "c"]);
    }

    #[test]
    fn truncates_to_max() {
        let input = (0..5).map(|i| rec(&format!("t{i}"), &format!("https://x/{i}")));
        let out = dedupe_and_limit(input, 1);
        assert_eq!(titles(&out), vec!["t0"]);
    }

    #[test]
    fn duplicates_do_not_count_toward_the_limit() {
        let input = vec![
            rec("a", "https://x/1"),
            rec("dup", "https://x/1"),
            rec("b", "https://x/2"),
            rec("c", "https://x/3"),
        ];
        let out = dedupe_and_limit(input, 2);
        assert_eq!(titles(&out), vec!["a", "b"]);
    }

    #[test]
    fn stops_consuming_once_full() {
        let pulled = Cell::new(0);
        let input = (0..10).map(|i| {
            pulled.set(pulled.get() + 1);
            rec(&format!("t{i}"), &format!("https://x/{i}"))
        });
        let out = dedupe_and_limit(input, 3);
        assert_eq!(out.len(), 3);
        assert_eq!(pulled.get(), 3);
    }

    #[test]
    fn zero_limit_and_empty_input() {
        assert!(dedupe_and_limit(vec![rec("a", "https://x/1")], 0).is_empty());
        assert!(dedupe_and_limit(Vec::new(), 40).is_empty());
    }
}
