//! Designator list collapsing and expansion.
//!
//! `R3,R4,R7,R8,R9,R10,R11` ⇄ `R3,R4,R7-R11`. Runs of three or more
//! consecutive numbers with the same prefix collapse into a range.

use std::sync::LazyLock;

use bom_model::{OrganizeError, Result};
use regex::Regex;
use tracing::trace;

/// Prefix and number of a designator. The prefix may contain digits but must
/// end with a letter or one of `+-=_.()$*&` or whitespace; the number may
/// carry a decimal part and a sub-part index (`U1#2`).
static PART_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<prefix>[a-z+\-=\s_.()$*&\d]*[a-z+\-=\s_.()$*&])(?P<num>(\d+(\.\d+)?)(#\d+)?)?$",
    )
    .expect("Invalid part reference regex")
});

/// A token that names a group of designators: word characters then a digit.
static GROUPED_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+\d").expect("Invalid grouped reference regex"));

/// Minimum run length written as a range.
const MIN_RANGE_LEN: usize = 3;

/// Largest number of designators one range may expand to.
const MAX_RANGE_LEN: u64 = 10_000;

/// Number part of one designator.
#[derive(Debug)]
struct RefNumber<'a> {
    text: &'a str,
    /// Whole number, or `None` for sub-parts, decimals and missing numbers.
    value: Option<u64>,
    /// Leading integer used for ordering.
    order: Option<u64>,
}

impl<'a> RefNumber<'a> {
    fn new(text: &'a str) -> Self {
        let digits_len = text
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len());
        Self {
            text,
            value: text.parse().ok(),
            order: text[..digits_len].parse().ok(),
        }
    }
}

/// Length of the run of consecutive whole numbers starting at `nums[0]`.
fn run_len(nums: &[RefNumber<'_>]) -> usize {
    let Some(mut previous) = nums.first().and_then(|num| num.value) else {
        return 0;
    };
    let mut len = 1;
    for num in &nums[1..] {
        match num.value {
            Some(value) if previous.checked_add(1) == Some(value) => {
                previous = value;
                len += 1;
            }
            _ => break,
        }
    }
    len
}

/// Collapses designators into a compact, comma-separated list.
///
/// Prefixes appear in order of first use; numbers within a prefix are sorted.
/// Fails on a designator the reference pattern does not recognize.
pub fn collapse_refs<S: AsRef<str>>(refs: &[S]) -> Result<String> {
    let mut prefixes: Vec<(&str, Vec<RefNumber<'_>>)> = Vec::new();
    for reference in refs {
        let reference = reference.as_ref();
        let captures = PART_REF.captures(reference).ok_or_else(|| {
            OrganizeError::UnrecognizedReference {
                reference: reference.to_string(),
            }
        })?;
        let prefix = captures.name("prefix").map_or("", |m| m.as_str());
        let number = RefNumber::new(captures.name("num").map_or("", |m| m.as_str()));
        match prefixes.iter_mut().find(|(seen, _)| *seen == prefix) {
            Some((_, numbers)) => numbers.push(number),
            None => prefixes.push((prefix, vec![number])),
        }
    }

    let mut collapsed = Vec::new();
    for (prefix, mut numbers) in prefixes {
        numbers.sort_by_key(|num| num.order);
        let mut idx = 0;
        while idx < numbers.len() {
            let len = run_len(&numbers[idx..]);
            if len >= MIN_RANGE_LEN {
                let first = numbers[idx].text;
                let last = numbers[idx + len - 1].text;
                collapsed.push(format!("{prefix}{first}-{prefix}{last}"));
                idx += len;
            } else {
                collapsed.push(format!("{prefix}{}", numbers[idx].text));
                idx += 1;
            }
        }
    }
    Ok(collapsed.join(","))
}

fn leading_non_digits(text: &str) -> &str {
    let end = text
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(text.len());
    &text[..end]
}

fn trailing_digits(text: &str) -> &str {
    let start = text
        .rfind(|c: char| !c.is_ascii_digit())
        .map_or(0, |idx| idx + 1);
    &text[start..]
}

/// `D33-D36`, `D33-36`, `R2.1-R2.4`.
///
/// Ranges longer than [`MAX_RANGE_LEN`] designators are rejected.
fn expand_range(token: &str) -> Result<Vec<String>> {
    let invalid = || OrganizeError::InvalidReferenceRange {
        token: token.to_string(),
    };
    let prefix = leading_non_digits(token);
    let mut bounds = token.split('-');
    let (Some(first), Some(second)) = (bounds.next(), bounds.next()) else {
        return Err(invalid());
    };
    let first = first.strip_prefix(prefix).unwrap_or(first);
    let second = second.strip_prefix(prefix).unwrap_or(second);

    // Decimal-style leader shared by both bounds: `2.` in `R2.1-R2.4`.
    let leader_len = first
        .find(|c: char| !c.is_ascii_digit())
        .filter(|&idx| idx > 0)
        .and_then(|idx| first[idx..].chars().next().map(|c| idx + c.len_utf8()))
        .unwrap_or(0);
    let leader = &first[..leader_len];

    let start: u64 = trailing_digits(first).parse().map_err(|_| invalid())?;
    let end: u64 = trailing_digits(second).parse().map_err(|_| invalid())?;
    let (low, high) = if start <= end { (start, end) } else { (end, start) };
    if high - low >= MAX_RANGE_LEN {
        return Err(invalid());
    }
    Ok((low..=high).map(|n| format!("{prefix}{leader}{n}")).collect())
}

/// `C17/18/19/20` or `C17\18\19\20`.
fn expand_list(token: &str) -> Vec<String> {
    let prefix = leading_non_digits(token);
    token
        .split(['/', '\\'])
        .map(|item| format!("{prefix}{}", item.strip_prefix(prefix).unwrap_or(item)))
        .collect()
}

/// Expands a designator list text into single designators.
///
/// Accepts `,`/`;` separated items, each a designator, a range (`D33-D36`,
/// `D33-36`) or a shared-prefix list (`C17/18/19`). A bare name without a
/// number gets `0` appended.
pub fn expand_refs(text: &str) -> Result<Vec<String>> {
    let mut refs = Vec::new();
    for item in text.split([',', ';']) {
        let token: String = item
            .trim()
            .chars()
            .filter(|c| !matches!(c, '+' | '(' | ')' | '*'))
            .collect();
        if token.is_empty() {
            continue;
        }
        if GROUPED_REF.is_match(&token) {
            if token.contains('-') {
                refs.extend(expand_range(&token)?);
            } else if token.contains(['/', '\\']) {
                refs.extend(expand_list(&token));
            } else {
                refs.push(token);
            }
        } else {
            let mut name: String = token
                .chars()
                .filter(|c| !matches!(c, '-' | '/' | '\\'))
                .collect();
            if !name.ends_with(|c: char| c.is_ascii_digit()) {
                name.push('0');
            }
            refs.push(name);
        }
    }
    trace!(text = %text, count = refs.len(), "Expanded references");
    Ok(refs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_ranges() {
        let refs = ["R3", "R4", "R7", "R8", "R9", "R10", "R11", "R13", "R14"];
        assert_eq!(collapse_refs(&refs).unwrap(), "R3,R4,R7-R11,R13,R14");
    }

    #[test]
    fn test_collapse_sorts_numbers() {
        let refs = ["C3", "C1", "C2", "C10"];
        assert_eq!(collapse_refs(&refs).unwrap(), "C1-C3,C10");
    }

    #[test]
    fn test_collapse_keeps_prefix_order() {
        let refs = ["R2", "C1", "R1"];
        assert_eq!(collapse_refs(&refs).unwrap(), "R1,R2,C1");
    }

    #[test]
    fn test_collapse_subparts_never_in_range() {
        let refs = ["U1#1", "U1#2", "U1#3", "U2", "U3", "U4"];
        assert_eq!(collapse_refs(&refs).unwrap(), "U1#1,U1#2,U1#3,U2-U4");
    }

    #[test]
    fn test_collapse_gap_breaks_run() {
        let refs = ["R1", "R3", "R3"];
        assert_eq!(collapse_refs(&refs).unwrap(), "R1,R3,R3");
    }

    #[test]
    fn test_collapse_unrecognized() {
        let err = collapse_refs(&["R1", "R#"]).unwrap_err();
        assert!(matches!(
            err,
            OrganizeError::UnrecognizedReference { reference } if reference == "R#"
        ));
    }

    #[test]
    fn test_collapse_empty() {
        let refs: [&str; 0] = [];
        assert_eq!(collapse_refs(&refs).unwrap(), "");
    }

    #[test]
    fn test_expand_ranges() {
        let expected = vec!["D33", "D34", "D35", "D36"];
        assert_eq!(expand_refs("D33-D36").unwrap(), expected);
        assert_eq!(expand_refs("D33-36").unwrap(), expected);
        assert_eq!(expand_refs("D36-D33").unwrap(), expected);
    }

    #[test]
    fn test_expand_lists() {
        let expected = vec!["C17", "C18", "C19", "C20"];
        assert_eq!(expand_refs("C17/18/19/20").unwrap(), expected);
        assert_eq!(expand_refs(r"C17\18\19\20").unwrap(), expected);
    }

    #[test]
    fn test_expand_decimal_leader() {
        assert_eq!(
            expand_refs("R2.1-R2.3").unwrap(),
            vec!["R2.1", "R2.2", "R2.3"]
        );
    }

    #[test]
    fn test_expand_mixed_items() {
        assert_eq!(
            expand_refs(" R1 ; C2-C4,, U5 ").unwrap(),
            vec!["R1", "C2", "C3", "C4", "U5"]
        );
    }

    #[test]
    fn test_expand_bare_names() {
        assert_eq!(expand_refs("LED").unwrap(), vec!["LED0"]);
        assert_eq!(expand_refs("+5V").unwrap(), vec!["5V0"]);
    }

    #[test]
    fn test_expand_invalid_range() {
        let err = expand_refs("R1-RX").unwrap_err();
        assert!(matches!(err, OrganizeError::InvalidReferenceRange { .. }));
    }

    #[test]
    fn test_expand_oversized_range() {
        let err = expand_refs("R1-R99999999999").unwrap_err();
        assert!(matches!(
            err,
            OrganizeError::InvalidReferenceRange { token } if token == "R1-R99999999999"
        ));
        assert_eq!(expand_refs("R1-R10000").unwrap().len(), 10_000);
        assert!(expand_refs("R0-R10000").is_err());
    }

    #[test]
    fn test_collapse_then_expand() {
        let refs = ["R3", "R4", "R7", "R8", "R9", "R10", "R11", "R13", "R14"];
        let collapsed = collapse_refs(&refs).unwrap();
        assert_eq!(expand_refs(&collapsed).unwrap(), refs);
    }
}
