//! Search index - ranked approximate matching over an in-memory collection.
//!
//! The index is built once from a snapshot of the records and is read-only
//! afterwards. When the collection changes, build a new index.
//!
//! ```ignore
//! let index = SearchIndex::build(commands, &["command", "device"], DEFAULT_THRESHOLD);
//! let hits = index.query("bgp");
//! ```

mod matcher;

use std::cmp::Ordering;

pub use matcher::{score, substring_distance};

/// Threshold used when none is configured. Admits roughly one typo per
/// three query characters.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Trait for records that expose named text fields to the search index.
///
/// Usually derived with `#[derive(Searchable)]`.
pub trait Searchable {
    /// Names of every searchable field, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Text of the field called `name`, or None if there is no such field.
    fn field(&self, name: &str) -> Option<&str>;
}

/// One ranked search result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a, R> {
    pub record: &'a R,
    /// Position of the record in the indexed collection.
    pub position: usize,
    /// Best field score; 0.0 for pass-through results.
    pub score: f64,
    /// Field that produced the best score. None for pass-through results.
    pub field: Option<&'a str>,
}

/// A built fuzzy index over a collection of records.
#[derive(Debug, Clone)]
pub struct SearchIndex<R> {
    records: Vec<R>,
    fields: Vec<String>,
    // per record, per field: lowercased characters
    texts: Vec<Vec<Vec<char>>>,
    threshold: f64,
}

impl<R: Searchable> SearchIndex<R> {
    /// Index `fields` of every record. `threshold` is clamped to
    /// `[0.0, 1.0]`; 0.0 admits exact substring matches only and 1.0 admits
    /// every record.
    pub fn build(records: Vec<R>, fields: &[&str], threshold: f64) -> Self {
        let threshold = if threshold.is_nan() {
            DEFAULT_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        let texts = records
            .iter()
            .map(|record| {
                fields
                    .iter()
                    .map(|name| {
                        record
                            .field(name)
                            .unwrap_or_default()
                            .to_lowercase()
                            .chars()
                            .collect()
                    })
                    .collect()
            })
            .collect();
        log::debug!(
            "built search index over {} records ({} fields, threshold {})",
            records.len(),
            fields.len(),
            threshold
        );

        Self {
            records,
            fields,
            texts,
            threshold,
        }
    }

    /// Index every field the record type declares, with the default threshold.
    pub fn with_all_fields(records: Vec<R>) -> Self {
        Self::build(records, R::FIELDS, DEFAULT_THRESHOLD)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ranked hits for `text`, best first; ties keep collection order.
    ///
    /// Blank text returns every record in collection order.
    pub fn search(&self, text: &str) -> Vec<SearchHit<'_, R>> {
        let pattern = text.trim();
        if pattern.is_empty() {
            return self
                .records
                .iter()
                .enumerate()
                .map(|(position, record)| SearchHit {
                    record,
                    position,
                    score: 0.0,
                    field: None,
                })
                .collect();
        }
        let pattern: Vec<char> = pattern.to_lowercase().chars().collect();

        let mut hits: Vec<SearchHit<'_, R>> = self
            .texts
            .iter()
            .enumerate()
            .filter_map(|(position, field_texts)| {
                let (field, best) = field_texts
                    .iter()
                    .enumerate()
                    .map(|(index, text)| (index, score(&pattern, text)))
                    .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))?;
                (best <= self.threshold).then(|| SearchHit {
                    record: &self.records[position],
                    position,
                    score: best,
                    field: Some(self.fields[field].as_str()),
                })
            })
            .collect();

        // stable: equal scores stay in collection order
        hits.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
        hits
    }

    /// Matching records for `text`, best first.
    pub fn query(&self, text: &str) -> Vec<&R> {
        self.search(text).into_iter().map(|hit| hit.record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Line {
        text: String,
        tag: String,
    }

    impl Searchable for Line {
        const FIELDS: &'static [&'static str] = &["text", "tag"];

        fn field(&self, name: &str) -> Option<&str> {
            match name {
                "text" => Some(&self.text),
                "tag" => Some(&self.tag),
                _ => None,
            }
        }
    }

    fn line(text: &str, tag: &str) -> Line {
        Line {
            text: text.into(),
            tag: tag.into(),
        }
    }

    fn routing_lines() -> Vec<Line> {
        vec![
            line("show ip bgp summary", "cisco"),
            line("show ip ospf neighbor", "cisco"),
        ]
    }

    #[test]
    fn blank_query_passes_everything_through() {
        let index = SearchIndex::build(routing_lines(), &["text"], DEFAULT_THRESHOLD);
        for query in ["", "   "] {
            let results = index.query(query);
            assert_eq!(results.len(), 2);
            assert_eq!(results[0].text, "show ip bgp summary");
            assert_eq!(results[1].text, "show ip ospf neighbor");
        }
    }

    #[test]
    fn exact_match_ranks_first() {
        let index = SearchIndex::build(routing_lines(), &["text"], DEFAULT_THRESHOLD);
        let results = index.query("bgp");
        assert_eq!(results[0].text, "show ip bgp summary");
        assert!(results.iter().all(|r| r.text != "show ip ospf neighbor"));
    }

    #[test]
    fn bgp_ranks_ahead_even_when_everything_is_admitted() {
        let index = SearchIndex::build(routing_lines(), &["text"], 1.0);
        let results = index.query("bgp");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "show ip bgp summary");
        assert_eq!(results[1].text, "show ip ospf neighbor");
    }

    #[test]
    fn unmatched_query_returns_nothing() {
        let index = SearchIndex::build(routing_lines(), &["text"], 0.3);
        assert!(index.query("xyz123notfound").is_empty());
    }

    #[test]
    fn tolerates_a_typo() {
        let index = SearchIndex::build(routing_lines(), &["text"], DEFAULT_THRESHOLD);
        let results = index.query("neighbr");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "show ip ospf neighbor");
    }

    #[test]
    fn zero_threshold_requires_exact_substring() {
        let index = SearchIndex::build(routing_lines(), &["text"], 0.0);
        assert!(index.query("neighbr").is_empty());
        assert_eq!(index.query("NEIGHBOR").len(), 1);
    }

    #[test]
    fn matches_any_indexed_field() {
        let lines = vec![line("display bgp peer", "huawei"), line("show version", "cisco")];
        let index = SearchIndex::build(lines, &["text", "tag"], DEFAULT_THRESHOLD);

        let hits = index.search("huawei");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].field, Some("tag"));
        assert_eq!(hits[0].position, 0);
    }

    #[test]
    fn unindexed_fields_are_ignored() {
        let index = SearchIndex::build(routing_lines(), &["text"], 0.0);
        assert!(index.query("cisco").is_empty());
    }

    #[test]
    fn equal_scores_keep_collection_order() {
        let lines = vec![
            line("show interface brief", "b"),
            line("show interface status", "a"),
            line("show interface counters", "c"),
        ];
        let index = SearchIndex::build(lines, &["text"], DEFAULT_THRESHOLD);
        let tags: Vec<_> = index.query("interface").iter().map(|l| l.tag.as_str()).collect();
        assert_eq!(tags, vec!["b", "a", "c"]);
    }

    #[test]
    fn threshold_is_clamped() {
        let high = SearchIndex::build(routing_lines(), &["text"], 7.0);
        assert_eq!(high.threshold(), 1.0);
        let low = SearchIndex::build(routing_lines(), &["text"], -1.0);
        assert_eq!(low.threshold(), 0.0);
    }

    #[test]
    fn unknown_field_names_index_as_empty_text() {
        let index = SearchIndex::build(routing_lines(), &["nope"], 0.5);
        assert!(index.query("bgp").is_empty());
        assert_eq!(index.query(" ").len(), 2);
    }
}
