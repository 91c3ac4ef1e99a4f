//! Approximate substring scoring.

/// Smallest edit distance between `pattern` and any substring of `text`.
///
/// Insertions, deletions and substitutions all cost 1; the match may start
/// and end anywhere in `text`. An empty pattern has distance 0.
pub fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 {
        return 0;
    }

    // column[i]: cost of matching pattern[..i] ending at the current text position
    let mut column: Vec<usize> = (0..=m).collect();
    let mut best = m;

    for &c in text {
        let mut diagonal = column[0];
        column[0] = 0;
        for i in 1..=m {
            let substitute = diagonal + usize::from(pattern[i - 1] != c);
            let delete = column[i] + 1;
            let insert = column[i - 1] + 1;
            diagonal = column[i];
            column[i] = substitute.min(delete).min(insert);
        }
        best = best.min(column[m]);
        if best == 0 {
            break;
        }
    }

    best
}

/// Normalized score in `[0.0, 1.0]`: 0.0 is an exact substring match,
/// 1.0 means no character of the pattern could be placed.
pub fn score(pattern: &[char], text: &[char]) -> f64 {
    if pattern.is_empty() {
        return 0.0;
    }
    substring_distance(pattern, text) as f64 / pattern.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn exact_substring_is_zero() {
        assert_eq!(substring_distance(&chars("bgp"), &chars("show ip bgp summary")), 0);
    }

    #[test]
    fn single_typo_costs_one() {
        assert_eq!(substring_distance(&chars("neighbr"), &chars("show ip ospf neighbor")), 1);
        assert_eq!(substring_distance(&chars("ospg"), &chars("show ip ospf neighbor")), 1);
    }

    #[test]
    fn unrelated_text_scores_high() {
        let s = score(&chars("xyz123notfound"), &chars("show ip bgp summary"));
        assert!(s > 0.3, "score was {}", s);
        assert!(s <= 1.0);
    }

    #[test]
    fn empty_text_costs_whole_pattern() {
        assert_eq!(substring_distance(&chars("abc"), &[]), 3);
        assert_eq!(score(&chars("abc"), &[]), 1.0);
    }

    #[test]
    fn empty_pattern_matches_everything() {
        assert_eq!(score(&[], &chars("anything")), 0.0);
    }
}
