//! Crop lookup tables
//!
//! Static agronomic context per crop: typical peak-growth NDVI range,
//! optimal monthly rainfall, growth stages and fixed recommendation lists.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Supported crop types. Anything unrecognized maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Crop {
    Wheat,
    Maize,
    Rice,
    Soybeans,
    Cotton,
    Sugarcane,
    Other,
}

impl FromStr for Crop {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Ok(match normalized.as_str() {
            "wheat" => Crop::Wheat,
            "corn" | "maize" | "corn/maize" => Crop::Maize,
            "rice" => Crop::Rice,
            "soybeans" | "soybean" => Crop::Soybeans,
            "cotton" => Crop::Cotton,
            "sugarcane" => Crop::Sugarcane,
            _ => Crop::Other,
        })
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Crop::Wheat => "Wheat",
            Crop::Maize => "Corn/Maize",
            Crop::Rice => "Rice",
            Crop::Soybeans => "Soybeans",
            Crop::Cotton => "Cotton",
            Crop::Sugarcane => "Sugarcane",
            Crop::Other => "Other",
        };
        f.write_str(name)
    }
}

impl Crop {
    /// Typical NDVI range at peak growth
    pub fn ndvi_range(&self) -> &'static str {
        match self {
            Crop::Wheat => "0.4-0.9",
            Crop::Maize => "0.5-0.9",
            Crop::Rice => "0.4-0.8",
            Crop::Soybeans => "0.4-0.9",
            Crop::Cotton => "0.4-0.8",
            Crop::Sugarcane => "0.5-0.9",
            Crop::Other => "0.3-0.8",
        }
    }

    /// Optimal monthly rainfall in millimetres
    pub fn optimal_rainfall(&self) -> f64 {
        match self {
            Crop::Wheat => 80.0,
            Crop::Maize => 120.0,
            Crop::Rice => 180.0,
            Crop::Soybeans => 100.0,
            Crop::Cotton => 70.0,
            Crop::Sugarcane => 150.0,
            Crop::Other => 100.0,
        }
    }

    /// Growth stages, in order
    pub fn growth_stages(&self) -> &'static [&'static str] {
        match self {
            Crop::Wheat => &[
                "Germination",
                "Tillering",
                "Stem Extension",
                "Heading",
                "Grain Fill",
                "Maturity",
            ],
            Crop::Maize => &[
                "Emergence",
                "Vegetative",
                "Tasseling",
                "Silking",
                "Grain Fill",
                "Maturity",
            ],
            Crop::Rice => &[
                "Germination",
                "Seedling",
                "Tillering",
                "Stem Extension",
                "Panicle",
                "Grain Fill",
            ],
            Crop::Soybeans => &[
                "Emergence",
                "Vegetative",
                "Flowering",
                "Pod Fill",
                "Maturity",
            ],
            Crop::Cotton => &[
                "Emergence",
                "Squaring",
                "Flowering",
                "Boll Development",
                "Maturity",
            ],
            Crop::Sugarcane => &["Germination", "Tillering", "Grand Growth", "Maturation"],
            Crop::Other => &[
                "Early/Emergence",
                "Vegetative",
                "Reproductive/Flowering",
                "Maturity",
            ],
        }
    }

    /// Crop-specific recommendations; empty for unknown crops
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            Crop::Wheat => &[
                "Monitor for nitrogen deficiency if NDVI is below 0.4",
                "Watch for disease pressure in dense canopy areas",
                "Consider fungicide application during heading stage",
            ],
            Crop::Maize => &[
                "Evaluate water stress if NDVI is below 0.5",
                "Ensure adequate nitrogen for grain fill period",
                "Monitor for pest pressure in high-vigor areas",
            ],
            Crop::Rice => &[
                "Verify water levels and nutrient availability",
                "Monitor for blast disease in dense areas",
                "Consider split nitrogen application",
            ],
            Crop::Cotton => &[
                "Consider growth regulators for high NDVI areas",
                "Monitor for bollworm pressure",
                "Adjust irrigation based on growth stage",
            ],
            Crop::Soybeans => &[
                "Monitor for sudden death syndrome in low-vigor areas",
                "Consider foliar fertilizer application",
                "Watch for aphid pressure",
            ],
            Crop::Sugarcane => &[
                "Monitor for borer damage",
                "Consider ratoon management practices",
                "Adjust fertilizer based on zone performance",
            ],
            Crop::Other => &[],
        }
    }
}
