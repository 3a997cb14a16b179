//! Canonical field vocabulary and separator characters.
//!
//! EDA parsers hand over records keyed by whatever the designer typed in the
//! schematic. After normalization every record uses the names below; anything
//! else is a free-form field (footprint, datasheet, ...) that takes part in
//! identical-component grouping as-is.

/// Manufacturer name.
pub const MANF: &str = "manf";
/// Manufacturer part number.
pub const MANF_NUM: &str = "manf#";
/// Component value (10k, 100nF, ...).
pub const VALUE: &str = "value";
/// Description.
pub const DESC: &str = "desc";
/// Variant assignment list.
pub const VARIANT: &str = "variant";
/// Do-not-populate flag.
pub const DNP: &str = "dnp";
/// Reference prefix of the designator (`R`, `C`, `U`, ...).
pub const REFERENCE: &str = "reference";

/// Suffix of the per-code quantity multiplier field (`manf#_qty`).
pub const QTY_SUFFIX: &str = "_qty";
/// Namespace of per-instance overrides (`local:dnp`, `local:variant`).
pub const LOCAL_NAMESPACE: &str = "local";

/// Marks tool-private field names and labels merged field lines.
pub const FIELD_SEPARATOR: char = ':';
/// Separates the quantity from the code inside a compound code.
pub const QTY_SEPARATOR: char = ':';
/// Separate the entries of a compound code list.
pub const PART_SEPARATORS: [char; 2] = [';', ','];
/// Escapes a following separator so it is taken literally.
pub const ESCAPE_CHAR: char = '\\';
/// Joins a designator and its sub-part index (`U1#2`).
pub const SUBPART_SEPARATOR: char = '#';
/// Manufacturer name entry meaning "same as the previous sub-part".
pub const REPLICATE_MANF: &str = "~";
/// Joins the lines of a merged field.
pub const GROUP_LINE_SEPARATOR: &str = "\n";

/// Default reference-prefix priority used to order groups.
pub const DEFAULT_BOM_ORDER: &str = "u,q,d,t,y,x,c,r,s,j,p,cnn,con";

/// Name of the quantity multiplier field that accompanies a code field.
pub fn qty_field(field: &str) -> String {
    format!("{field}{QTY_SUFFIX}")
}

/// Name of the per-instance override of a field (`local:dnp`).
pub fn local_field(field: &str) -> String {
    format!("{LOCAL_NAMESPACE}{FIELD_SEPARATOR}{field}")
}

/// Returns true if the field belongs to a specific tool and must not be used
/// to decide whether two components are identical.
pub fn is_tool_private(field: &str) -> bool {
    field.contains(FIELD_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qty_field() {
        assert_eq!(qty_field(MANF_NUM), "manf#_qty");
        assert_eq!(qty_field("digikey#"), "digikey#_qty");
    }

    #[test]
    fn test_local_field() {
        assert_eq!(local_field(DNP), "local:dnp");
        assert!(is_tool_private(&local_field(VARIANT)));
    }

    #[test]
    fn test_tool_private() {
        assert!(is_tool_private("kicad:footprint"));
        assert!(!is_tool_private("footprint"));
    }
}
