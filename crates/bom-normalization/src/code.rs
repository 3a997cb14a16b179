//! Compound manufacturer/distributor codes.
//!
//! A code field may pack a quantity multiplier and a list of codes:
//!
//! - `7:ADUM3150BRSZ-RL7` or `ADUM3150BRSZ-RL7:7` → seven parts per designator
//! - `PARTG1;PARTG2` → two sub-parts sharing one schematic symbol
//!
//! A separator preceded by `\` is literal: `AB\;CD` is a single code `AB;CD`.

use std::sync::LazyLock;

use bom_model::fields::{ESCAPE_CHAR, PART_SEPARATORS, QTY_SEPARATOR};
use regex::Regex;
use tracing::trace;

/// Escaped separator with the whitespace around it.
static ESCAPED_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\s*([;,:])\s*").expect("Invalid escaped separator regex"));

/// Simple, fractional and decimal quantities. Also matches the empty string,
/// which stands for a forgotten quantity.
static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[-+]?\s*[0-9]*\s*[./]*\s*?[0-9]*\s*$").expect("Invalid quantity regex")
});

/// Quantity used when a code carries no multiplier.
pub const DEFAULT_QTY: &str = "1";

/// Quantity and code of one compound-code entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCode {
    pub qty: String,
    pub code: String,
}

impl DecodedCode {
    fn new(qty: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            qty: qty.into(),
            code: code.into(),
        }
    }
}

/// Splits on unescaped separators, trimming whitespace around each piece.
///
/// A separator counts as escaped when the last non-blank character before it
/// is the escape character. Always returns at least one piece.
fn split_unescaped(value: &str, is_separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, c) in value.char_indices() {
        if !is_separator(c) {
            continue;
        }
        let before = value[start..idx].trim_end();
        if before.ends_with(ESCAPE_CHAR) {
            continue;
        }
        pieces.push(before.trim_start());
        start = idx + c.len_utf8();
    }
    pieces.push(value[start..].trim());
    pieces
}

/// Removes the escape character from escaped separators.
pub fn unescape_separators(value: &str) -> String {
    ESCAPED_SEPARATOR.replace_all(value, "$1").into_owned()
}

/// Splits a code field into its sub-part entries.
///
/// Entries are left escaped; [`decode_compound_code`] unescapes them.
pub fn split_part_list(value: &str) -> Vec<String> {
    split_unescaped(value.trim(), |c| PART_SEPARATORS.contains(&c))
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn looks_like_quantity(segment: &str) -> bool {
    QUANTITY.is_match(segment)
}

fn quantity_len(segment: &str) -> usize {
    segment.chars().filter(|c| !matches!(c, '.' | '/')).count()
}

/// Decodes one compound-code entry into its quantity and code.
///
/// Never fails: input without a clear quantity/code split yields quantity
/// `"1"` and the whole text as code.
pub fn decode_compound_code(entry: &str) -> DecodedCode {
    let segments = split_unescaped(entry, |c| c == QTY_SEPARATOR);
    let decoded = match segments.as_slice() {
        [code] => DecodedCode::new(DEFAULT_QTY, unescape_separators(code)),
        [first, second] => {
            let (qty, code) = match (looks_like_quantity(first), looks_like_quantity(second)) {
                (true, false) => (*first, *second),
                (false, true) => (*second, *first),
                // A purely numeric code: the shorter one is the quantity.
                (true, true) if quantity_len(first) < quantity_len(second) => (*first, *second),
                (true, true) => (*second, *first),
                (false, false) => {
                    let code = format!("{first}{second}");
                    return finish(entry, DecodedCode::new(DEFAULT_QTY, unescape_separators(&code)));
                }
            };
            let qty = if qty.is_empty() { DEFAULT_QTY } else { qty };
            DecodedCode::new(qty, unescape_separators(code))
        }
        _ => DecodedCode::new(DEFAULT_QTY, unescape_separators(&segments.concat())),
    };
    finish(entry, decoded)
}

fn finish(entry: &str, decoded: DecodedCode) -> DecodedCode {
    trace!(entry = %entry, qty = %decoded.qty, code = %decoded.code, "Decoded compound code");
    decoded
}
