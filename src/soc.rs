//! Occupation code (SOC) normalization
//!
//! Source tables encode the same occupation in slightly different shapes:
//! padded whitespace, typographic dashes, and decimal suffixes such as
//! `15-1252.00`. Every code passes through [`normalize`] before it is used
//! as a join key, so tables from different publishers line up.

/// Length of a detailed occupation code after normalization, e.g. `15-1252`
pub const DETAILED_CODE_LEN: usize = 7;

/// Normalize an occupation code for joining across tables
///
/// Trims surrounding whitespace, replaces en and em dashes with an ASCII
/// hyphen, and drops any decimal suffix. Missing input stays missing;
/// malformed input passes through cleaned rather than rejected, so the
/// function never fails.
#[must_use]
pub fn normalize(code: Option<&str>) -> Option<String> {
    let trimmed = code?.trim();
    let dashed = trimmed.replace(['\u{2013}', '\u{2014}'], "-");
    let cleaned = match dashed.find('.') {
        Some(pos) => dashed[..pos].to_string(),
        None => dashed,
    };
    Some(cleaned)
}

/// Whether a normalized code has the detailed `NN-NNNN` shape
///
/// Summary rows in the OEWS snapshots carry codes of other lengths and are
/// filtered out before joining.
#[must_use]
pub fn is_detailed(code: &str) -> bool {
    code.chars().count() == DETAILED_CODE_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize(Some(" 15-1252 ")), Some("15-1252".to_string()));
    }

    #[test]
    fn test_normalize_drops_decimal_suffix() {
        assert_eq!(normalize(Some("15-1252.00")), Some("15-1252".to_string()));
    }

    #[test]
    fn test_normalize_unifies_dashes() {
        assert_eq!(normalize(Some("15\u{2013}1252")), Some("15-1252".to_string()));
        assert_eq!(normalize(Some("15\u{2014}1252")), Some("15-1252".to_string()));
    }

    #[test]
    fn test_normalize_missing_stays_missing() {
        assert_eq!(normalize(None), None);
    }

    #[test]
    fn test_normalize_keeps_empty_string() {
        assert_eq!(normalize(Some("")), Some(String::new()));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(Some(" 15\u{2013}1252.00 ")).unwrap();
        let twice = normalize(Some(once.as_str())).unwrap();
        assert_eq!(once, "15-1252");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_is_detailed() {
        assert!(is_detailed("15-1252"));
        assert!(is_detailed("00-0000"));
        assert!(!is_detailed("15-125"));
        assert!(!is_detailed(""));
    }
}
