//! Reference extraction from formula text

use ahash::AHashSet;
use once_cell::sync::Lazy;
use regex::Regex;

use cellscope_core::{CellAddress, CellRange, Result};

/// Matches a whole-token cell coordinate ("B3") or rectangular range
/// ("A1:B2"). Word boundaries keep substrings of longer identifiers from
/// matching.
static ADDRESS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z]+[1-9][0-9]*(?::[A-Z]+[1-9][0-9]*)?\b").expect("address pattern compiles")
});

/// Extract every cell referenced by `formula`
///
/// Range tokens are expanded to their constituent addresses (row-major).
/// The result is deduplicated preserving first-seen order, so extraction
/// is idempotent and deterministic. A formula with no references yields
/// an empty vector.
///
/// Tokens that match the pattern are parsed as addresses without checking
/// whether the cell exists; existence is the store's concern. Tokens whose
/// coordinates exceed the sheet bounds fail here.
pub fn extract_refs(formula: &str) -> Result<Vec<CellAddress>> {
    let mut seen = AHashSet::new();
    let mut refs = Vec::new();

    for m in ADDRESS_PATTERN.find_iter(formula) {
        let token = m.as_str();
        if token.contains(':') {
            for addr in CellRange::parse(token)?.cells() {
                if seen.insert(addr) {
                    refs.push(addr);
                }
            }
        } else {
            let addr = CellAddress::parse(token)?;
            if seen.insert(addr) {
                refs.push(addr);
            }
        }
    }

    Ok(refs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn addrs(refs: &[CellAddress]) -> Vec<String> {
        refs.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_no_references() {
        assert_eq!(extract_refs("=1+2").unwrap(), vec![]);
        assert_eq!(extract_refs("").unwrap(), vec![]);
        assert_eq!(extract_refs("=PI()").unwrap(), vec![]);
    }

    #[test]
    fn test_single_references() {
        let refs = extract_refs("=A1+B2*C3").unwrap();
        assert_eq!(addrs(&refs), vec!["A1", "B2", "C3"]);
    }

    #[test]
    fn test_function_names_not_captured() {
        // "SUM" carries no digits, so only the arguments match
        let refs = extract_refs("=SUM(A1,B1)").unwrap();
        assert_eq!(addrs(&refs), vec!["A1", "B1"]);
    }

    #[test]
    fn test_range_expansion() {
        let refs = extract_refs("=SUM(A1:B2)").unwrap();
        assert_eq!(addrs(&refs), vec!["A1", "B1", "A2", "B2"]);
    }

    #[test]
    fn test_reversed_range_same_cells() {
        let forward = extract_refs("=SUM(A1:B2)").unwrap();
        let reversed = extract_refs("=SUM(B2:A1)").unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let refs = extract_refs("=B1+A1+B1+C1").unwrap();
        assert_eq!(addrs(&refs), vec!["B1", "A1", "C1"]);
    }

    #[test]
    fn test_overlapping_range_and_cell() {
        // A2 appears both alone and inside the range; counted once
        let refs = extract_refs("=A2+SUM(A1:A3)").unwrap();
        assert_eq!(addrs(&refs), vec!["A2", "A1", "A3"]);
    }

    #[test]
    fn test_lowercase_not_matched() {
        // The pattern is uppercase-only, like the sheet's own formulas
        assert_eq!(extract_refs("=a1+b2").unwrap(), vec![]);
    }

    #[test]
    fn test_idempotent() {
        let formula = "=SUM(A1:A3)+B5+A1";
        assert_eq!(
            extract_refs(formula).unwrap(),
            extract_refs(formula).unwrap()
        );
    }

    #[test]
    fn test_out_of_bounds_token_fails() {
        // XFE is one column past the sheet limit
        assert!(extract_refs("=XFE1").is_err());
        assert!(extract_refs("=SUM(A1:XFE1)").is_err());
    }
}
