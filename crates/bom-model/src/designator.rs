//! Designator helpers: sub-part naming and natural ordering.
//!
//! Natural order compares `R2` before `R10`: the leading letters are compared
//! case-insensitively, the first run of digits numerically, and whatever
//! follows textually. Ties fall back to the raw strings so the order is total.

use std::cmp::Ordering;

use crate::fields::SUBPART_SEPARATOR;

/// Builds the synthetic designator of a sub-part (`U1` + 2 → `U1#2`).
pub fn subpart_designator(designator: &str, index: usize) -> String {
    format!("{designator}{SUBPART_SEPARATOR}{index}")
}

fn split_designator(designator: &str) -> (&str, Option<u64>, &str) {
    let digits_start = designator
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(designator.len());
    let (prefix, rest) = designator.split_at(digits_start);
    let digits_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (digits, remainder) = rest.split_at(digits_len);
    (prefix, digits.parse().ok(), remainder)
}

/// Reference prefix of a designator: everything before the first digit,
/// trimmed (`R12` → `R`, `U1#2` → `U`).
pub fn designator_prefix(designator: &str) -> &str {
    split_designator(designator).0.trim()
}

/// Compares two designators in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (prefix_a, num_a, rest_a) = split_designator(a);
    let (prefix_b, num_b, rest_b) = split_designator(b);
    prefix_a
        .to_ascii_lowercase()
        .cmp(&prefix_b.to_ascii_lowercase())
        .then(num_a.cmp(&num_b))
        .then_with(|| rest_a.cmp(rest_b))
        .then_with(|| a.cmp(b))
}

/// Compares two designator lists element by element in natural order.
///
/// A list that is a prefix of the other sorts first.
pub fn compare_designator_lists<S: AsRef<str>>(a: &[S], b: &[S]) -> Ordering {
    for (left, right) in a.iter().zip(b) {
        let ordering = natural_cmp(left.as_ref(), right.as_ref());
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}

/// Sorts designators in natural order.
pub fn sort_designators(designators: &mut [String]) {
    designators.sort_by(|a, b| natural_cmp(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subpart_designator() {
        assert_eq!(subpart_designator("U1", 2), "U1#2");
    }

    #[test]
    fn test_designator_prefix() {
        assert_eq!(designator_prefix("R12"), "R");
        assert_eq!(designator_prefix("U1#2"), "U");
        assert_eq!(designator_prefix("LED"), "LED");
        assert_eq!(designator_prefix("5V"), "");
    }

    #[test]
    fn test_numeric_body_compares_numerically() {
        assert_eq!(natural_cmp("R2", "R10"), Ordering::Less);
        assert_eq!(natural_cmp("R10", "R9"), Ordering::Greater);
    }

    #[test]
    fn test_prefix_compares_case_insensitively() {
        assert_eq!(natural_cmp("c1", "R1"), Ordering::Less);
        assert_eq!(natural_cmp("C1", "c1"), Ordering::Less); // raw fallback
    }

    #[test]
    fn test_subparts_follow_their_base() {
        let mut refs = vec![
            "U1#2".to_string(),
            "U10".to_string(),
            "U1".to_string(),
            "U1#1".to_string(),
        ];
        sort_designators(&mut refs);
        assert_eq!(refs, vec!["U1", "U1#1", "U1#2", "U10"]);
    }

    #[test]
    fn test_list_comparison() {
        assert_eq!(
            compare_designator_lists(&["R2", "R3"], &["R10"]),
            Ordering::Less
        );
        assert_eq!(compare_designator_lists(&["R2"], &["R2", "R3"]), Ordering::Less);
        assert_eq!(
            compare_designator_lists(&["R2", "R3"], &["R2", "R3"]),
            Ordering::Equal
        );
    }
}
