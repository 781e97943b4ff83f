use crate::core::models::topology::BondOrder;

/// Tolerance (Angstroms) applied when matching an interatomic distance
/// against a reference bond length.
pub const DISTANCE_TOLERANCE: f64 = 0.07;

// Reference bond lengths (Angstroms) keyed by the lexicographically sorted
// pair of lower-cased element symbols. Values are empirically tuned per
// element pair; the entries flagged as approximations in the reference data
// (N-O triple, O-O double) are kept as data rather than corrected.
static REFERENCE_LENGTHS: &[(&str, &str, f64, BondOrder)] = &[
    ("br", "br", 2.34, BondOrder::Single),
    ("br", "h", 1.43, BondOrder::Single),
    ("c", "c", 1.53, BondOrder::Single),
    ("c", "c", 1.39, BondOrder::Single),
    ("c", "c", 1.33, BondOrder::Double),
    ("c", "c", 1.21, BondOrder::Triple),
    ("c", "cl", 1.80, BondOrder::Single),
    ("c", "f", 1.38, BondOrder::Single),
    ("c", "h", 1.10, BondOrder::Single),
    ("c", "n", 1.46, BondOrder::Single),
    ("c", "n", 1.38, BondOrder::Single),
    ("c", "n", 1.27, BondOrder::Double),
    ("c", "n", 1.16, BondOrder::Triple),
    ("c", "o", 1.42, BondOrder::Single),
    ("c", "o", 1.20, BondOrder::Double),
    ("c", "o", 1.14, BondOrder::Triple),
    ("c", "s", 1.84, BondOrder::Single),
    ("cl", "cl", 2.05, BondOrder::Single),
    ("cl", "h", 1.30, BondOrder::Single),
    ("f", "f", 1.41, BondOrder::Single),
    ("f", "h", 0.93, BondOrder::Single),
    ("h", "h", 0.76, BondOrder::Single),
    ("h", "n", 1.03, BondOrder::Single),
    ("h", "o", 0.97, BondOrder::Single),
    ("h", "s", 1.36, BondOrder::Single),
    ("n", "n", 1.44, BondOrder::Single),
    ("n", "n", 1.24, BondOrder::Double),
    ("n", "n", 1.17, BondOrder::Triple),
    ("n", "o", 1.43, BondOrder::Single),
    ("n", "o", 1.20, BondOrder::Double),
    ("n", "o", 1.06, BondOrder::Triple),
    ("o", "o", 1.46, BondOrder::Single),
    ("o", "o", 1.21, BondOrder::Double),
    ("o", "s", 1.73, BondOrder::Single),
];

/// Classifies the distance between two atoms as a bond order, or `None` when
/// no reference length matches.
///
/// The lookup is order-independent: the element pair is sorted before the
/// table scan. A distance matches an entry when `|distance - reference| <`
/// [`DISTANCE_TOLERANCE`]. When several entries match, the one with the
/// shortest reference length wins, so double/triple classifications take
/// precedence over single. Non-finite distances never match.
pub fn classify(element_a: &str, element_b: &str, distance: f64) -> Option<BondOrder> {
    if !distance.is_finite() {
        return None;
    }
    let (lo, hi) = if element_a <= element_b {
        (element_a, element_b)
    } else {
        (element_b, element_a)
    };

    let mut best: Option<(f64, BondOrder)> = None;
    for &(e1, e2, length, order) in REFERENCE_LENGTHS {
        if e1 == lo && e2 == hi && (distance - length).abs() < DISTANCE_TOLERANCE {
            match best {
                Some((best_length, _)) if best_length <= length => {}
                _ => best = Some((length, order)),
            }
        }
    }
    best.map(|(_, order)| order)
}

/// Longest reference length in the table; together with the tolerance this
/// bounds how far apart two bonded atoms can be.
pub fn max_reference_length() -> f64 {
    REFERENCE_LENGTHS
        .iter()
        .map(|&(_, _, length, _)| length)
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carbon_carbon_classification_is_table_driven() {
        assert_eq!(classify("c", "c", 1.53), Some(BondOrder::Single));
        assert_eq!(classify("c", "c", 1.39), Some(BondOrder::Single));
        assert_eq!(classify("c", "c", 1.33), Some(BondOrder::Double));
        assert_eq!(classify("c", "c", 1.21), Some(BondOrder::Triple));
        assert_eq!(classify("c", "c", 2.00), None);
    }

    #[test]
    fn lookup_is_element_order_independent() {
        assert_eq!(classify("o", "c", 1.20), classify("c", "o", 1.20));
        assert_eq!(classify("h", "c", 1.10), Some(BondOrder::Single));
        assert_eq!(classify("s", "o", 1.73), Some(BondOrder::Single));
    }

    #[test]
    fn tolerance_is_strict() {
        // 1.53 + 0.05 is inside the window, 1.53 + 0.09 is outside.
        assert_eq!(classify("c", "c", 1.58), Some(BondOrder::Single));
        assert_eq!(classify("c", "c", 1.62), None);
    }

    #[test]
    fn overlapping_matches_prefer_the_shortest_reference_length() {
        // 1.27 is within tolerance of both the 1.33 double and the 1.21
        // triple C-C entries; the shorter reference wins.
        assert_eq!(classify("c", "c", 1.27), Some(BondOrder::Triple));
    }

    #[test]
    fn approximate_reference_entries_are_preserved() {
        assert_eq!(classify("n", "o", 1.06), Some(BondOrder::Triple));
        assert_eq!(classify("o", "o", 1.21), Some(BondOrder::Double));
    }

    #[test]
    fn every_tabulated_pair_matches_at_its_reference_length() {
        for &(e1, e2, length, order) in REFERENCE_LENGTHS {
            let classified = classify(e1, e2, length);
            assert!(
                classified.is_some(),
                "no match for {}-{} at {}",
                e1,
                e2,
                length
            );
            // At the exact reference length the entry itself is always within
            // tolerance; a shorter overlapping entry may still win.
            if classified != Some(order) {
                assert!(matches!(
                    classified,
                    Some(BondOrder::Double) | Some(BondOrder::Triple)
                ));
            }
        }
    }

    #[test]
    fn unknown_element_pairs_never_bond() {
        assert_eq!(classify("fe", "c", 1.53), None);
        assert_eq!(classify("xx", "yy", 1.0), None);
    }

    #[test]
    fn non_finite_distances_never_bond() {
        assert_eq!(classify("c", "c", f64::NAN), None);
        assert_eq!(classify("c", "c", f64::INFINITY), None);
    }

    #[test]
    fn max_reference_length_is_the_bromine_pair() {
        assert!((max_reference_length() - 2.34).abs() < 1e-12);
    }
}
