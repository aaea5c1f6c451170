//! Property tests for the OSC pattern matcher, plus the concrete
//! pattern-semantics table.

use proptest::prelude::*;
use sygaldry::osc::osc_match_pattern;

proptest! {
    /// The matcher must terminate without panicking on arbitrary printable
    /// input, malformed brackets and all.
    #[test]
    fn matcher_never_panics(
        pattern in "[ -~]{0,24}",
        address in "[ -~]{0,24}",
    ) {
        let _ = osc_match_pattern(&pattern, &address);
    }

    /// A pattern with no meta characters matches exactly itself.
    #[test]
    fn literal_patterns_match_themselves(
        segments in proptest::collection::vec("[a-z0-9_]{1,8}", 1..4),
    ) {
        let address = format!("/{}", segments.join("/"));
        let address_with_extra_segment = format!("{}/x", address);
        let address_with_extra_suffix = format!("{}y", address);
        prop_assert!(osc_match_pattern(&address, &address));
        prop_assert!(!osc_match_pattern(&address, &address_with_extra_segment));
        prop_assert!(!osc_match_pattern(&address_with_extra_suffix, &address));
    }

    /// `/*` matches any single-segment address.
    #[test]
    fn single_glob_matches_one_segment(segment in "[a-z0-9_]{1,12}") {
        let single_segment_address = format!("/{}", segment);
        let double_segment_address = format!("/{}/{}", segment, segment);
        prop_assert!(osc_match_pattern("/*", &single_segment_address));
        prop_assert!(!osc_match_pattern("/*", &double_segment_address));
    }

    /// `//name` finds the segment at any depth.
    #[test]
    fn descendant_matches_at_any_depth(
        prefix in proptest::collection::vec("[a-z]{1,6}", 0..4),
    ) {
        let mut address = String::new();
        for segment in &prefix {
            address.push('/');
            address.push_str(segment);
        }
        address.push_str("/leaf");
        prop_assert!(osc_match_pattern("//leaf", &address));
    }
}

// ── Concrete semantics table ─────────────────────────────────

#[test]
fn pattern_semantics_table() {
    // Single-character wildcard.
    assert!(osc_match_pattern("/???", "/123"));
    assert!(!osc_match_pattern("/foo.?", "/foo.42"));

    // Glob stays within one segment.
    assert!(osc_match_pattern("/*", "/123"));
    assert!(!osc_match_pattern("/*", "/123/456"));

    // Inverted range set.
    assert!(osc_match_pattern("/[!1-9]", "/a"));
    assert!(!osc_match_pattern("/[!1-9]", "/5"));

    // Alternation.
    assert!(osc_match_pattern("/{apple,banana}/pie", "/banana/pie"));
    assert!(!osc_match_pattern("/{apple,banana}/pie", "/sugar/pie"));

    // Descendant-or-self.
    assert!(osc_match_pattern("//foo", "/a/b/foo"));
    assert!(osc_match_pattern("/banana//pie", "/banana/pie"));
}
