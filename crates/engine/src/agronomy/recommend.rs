//! Recommendation generation
//!
//! Turns reduced NDVI statistics plus zoning and crop/rainfall context
//! into an ordered list of recommendation strings. Category order is
//! fixed: NDVI tier → crop-specific → zone count → rainfall.

use agrizone_core::RegionStats;

use crate::agronomy::crop::Crop;
use crate::agronomy::rainfall::RainfallSummary;

// Mean-NDVI thresholds for the messaging tiers
const STRESS_NDVI: f64 = 0.3;
const MODERATE_NDVI: f64 = 0.5;

// Rainfall is flagged outside [0.7, 1.3] × the crop optimum
const RAINFALL_LOW_FACTOR: f64 = 0.7;
const RAINFALL_HIGH_FACTOR: f64 = 1.3;

/// Zone count from which variable-rate application becomes worthwhile
pub const VARIABLE_RATE_MIN_ZONES: usize = 3;

/// Generate recommendations for an analyzed field
pub fn generate_recommendations(
    stats: &RegionStats,
    zone_count: usize,
    crop: Crop,
    rainfall: Option<&RainfallSummary>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    // NDVI tier
    if stats.mean < STRESS_NDVI {
        recommendations.push(
            "The field shows signs of stress. Consider irrigation or nutrient assessment."
                .to_string(),
        );
        recommendations
            .push("Low NDVI values may indicate bare soil or early growth stage.".to_string());
    } else if stats.mean < MODERATE_NDVI {
        recommendations.push(
            "Field has moderate vegetation health. Monitor for changes in coming weeks."
                .to_string(),
        );
        recommendations.push(
            "Consider targeted fertilizer application in lower-performing zones.".to_string(),
        );
    } else {
        recommendations.push("Field shows good overall vegetation health.".to_string());
        recommendations.push("Focus on maintaining current management practices.".to_string());
    }

    // Crop-specific
    recommendations.extend(crop.recommendations().iter().map(|s| s.to_string()));

    // Zone-based
    if zone_count >= VARIABLE_RATE_MIN_ZONES {
        recommendations.push(format!(
            "Consider variable rate application based on the {} identified management zones.",
            zone_count
        ));
        recommendations.push(
            "Take soil samples from each zone to determine specific nutrient requirements."
                .to_string(),
        );
    }

    // Rainfall bounds
    if let Some(rain) = rainfall {
        let optimal = crop.optimal_rainfall();
        if rain.total < optimal * RAINFALL_LOW_FACTOR {
            recommendations.push(format!(
                "Total rainfall ({:.1} mm) is below optimal for {}. Consider irrigation.",
                rain.total, crop
            ));
        } else if rain.total > optimal * RAINFALL_HIGH_FACTOR {
            recommendations.push(format!(
                "Total rainfall ({:.1} mm) is above optimal for {}. Monitor for disease pressure.",
                rain.total, crop
            ));
        }
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(mean: f64) -> RegionStats {
        RegionStats {
            mean,
            std_dev: 0.05,
            min: mean - 0.1,
            max: mean + 0.1,
        }
    }

    fn rain(total: f64) -> RainfallSummary {
        RainfallSummary {
            total,
            average: total / 30.0,
            maximum: total / 5.0,
        }
    }

    #[test]
    fn test_stressed_field_messaging() {
        let recs = generate_recommendations(&stats(0.2), 2, Crop::Other, None);
        assert!(recs[0].contains("signs of stress"));
        assert_eq!(recs.len(), 2, "no crop, zone or rainfall messages expected");
    }

    #[test]
    fn test_healthy_field_with_variable_rate() {
        let recs = generate_recommendations(&stats(0.6), 4, Crop::Other, None);
        assert!(recs.iter().any(|r| r.contains("good overall vegetation health")));
        assert!(recs
            .iter()
            .any(|r| r.contains("variable rate application based on the 4 identified")));
    }

    #[test]
    fn test_two_zones_no_variable_rate() {
        let recs = generate_recommendations(&stats(0.6), 2, Crop::Other, None);
        assert!(!recs.iter().any(|r| r.contains("variable rate")));
    }

    #[test]
    fn test_rainfall_bounds_for_other_crop() {
        // Optimal for Other is 100 mm: flags below 70 and above 130
        let low = generate_recommendations(&stats(0.6), 2, Crop::Other, Some(&rain(50.0)));
        assert!(low.iter().any(|r| r.contains("below optimal") && r.contains("50.0 mm")));

        let high = generate_recommendations(&stats(0.6), 2, Crop::Other, Some(&rain(140.0)));
        assert!(high
            .iter()
            .any(|r| r.contains("above optimal") && r.contains("disease pressure")));

        let ok = generate_recommendations(&stats(0.6), 2, Crop::Other, Some(&rain(90.0)));
        assert!(!ok.iter().any(|r| r.contains("rainfall")));
    }

    #[test]
    fn test_category_order() {
        let recs =
            generate_recommendations(&stats(0.4), 3, Crop::Wheat, Some(&rain(30.0)));
        let moderate = recs
            .iter()
            .position(|r| r.contains("moderate vegetation health"))
            .unwrap();
        let crop_specific = recs
            .iter()
            .position(|r| r.contains("nitrogen deficiency"))
            .unwrap();
        let zones = recs
            .iter()
            .position(|r| r.contains("variable rate application"))
            .unwrap();
        let rainfall = recs.iter().position(|r| r.contains("below optimal")).unwrap();
        assert!(moderate < crop_specific);
        assert!(crop_specific < zones);
        assert!(zones < rainfall);
    }
}
