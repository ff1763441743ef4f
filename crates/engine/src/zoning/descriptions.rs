//! Human-readable zone descriptions

/// Generate one description per zone, ordered lowest → highest vigor.
///
/// Deterministic pure function of the zone count; the returned vector
/// always has exactly `zone_count` elements.
pub fn zone_descriptions(zone_count: usize) -> Vec<String> {
    match zone_count {
        2 => vec![
            "Lower performing area - may require attention".to_string(),
            "Higher performing area - good crop health".to_string(),
        ],
        3 => vec![
            "Low vigor area - may require additional inputs or investigation".to_string(),
            "Moderate vigor area - average performance".to_string(),
            "High vigor area - optimal performance".to_string(),
        ],
        n => (0..n)
            .map(|i| {
                if i == 0 {
                    "Lowest vigor area".to_string()
                } else if i == n - 1 {
                    "Highest vigor area".to_string()
                } else {
                    format!("Moderate vigor area (level {} of {})", i + 1, n)
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_matches_zone_count() {
        for n in 2..=10 {
            assert_eq!(zone_descriptions(n).len(), n);
        }
    }

    #[test]
    fn test_two_and_three_zone_wording() {
        let two = zone_descriptions(2);
        assert!(two[0].starts_with("Lower performing"));
        assert!(two[1].starts_with("Higher performing"));

        let three = zone_descriptions(3);
        assert!(three[0].starts_with("Low vigor"));
        assert!(three[1].starts_with("Moderate vigor"));
        assert!(three[2].starts_with("High vigor"));
    }

    #[test]
    fn test_interior_template_from_four_zones() {
        for n in 4..=10 {
            let descs = zone_descriptions(n);
            assert_eq!(descs[0], "Lowest vigor area");
            assert_eq!(descs[n - 1], "Highest vigor area");
            for (i, d) in descs.iter().enumerate().take(n - 1).skip(1) {
                assert_eq!(*d, format!("Moderate vigor area (level {} of {})", i + 1, n));
            }
        }
    }
}
