//! Unit conversion registry.
//!
//! Units are grouped into families of mutually convertible units. Every
//! family stores a direct transform for each ordered pair of distinct units,
//! so a conversion never goes through an intermediate base unit and never
//! compounds rounding error.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::ConversionError;

/// A pure numeric transform between two units.
pub type Transform = fn(f64) -> f64;

/// One row of a family table: `(from, to, transform)`.
pub type PairEntry = (&'static str, &'static str, Transform);

const TEMPERATURE_UNITS: &[&str] = &["kelvin", "rankine", "celsius", "fahrenheit"];

const TEMPERATURE: &[PairEntry] = &[
    ("kelvin", "rankine", |v| v * 1.8),
    ("kelvin", "celsius", |v| v - 273.15),
    ("kelvin", "fahrenheit", |v| v * 1.8 - 459.67),
    ("rankine", "kelvin", |v| v / 1.8),
    ("rankine", "celsius", |v| (v - 491.67) / 1.8),
    ("rankine", "fahrenheit", |v| v - 459.67),
    ("celsius", "kelvin", |v| v + 273.15),
    ("celsius", "rankine", |v| (v + 273.15) * 1.8),
    ("celsius", "fahrenheit", |v| v * 1.8 + 32.0),
    ("fahrenheit", "kelvin", |v| (v + 459.67) / 1.8),
    ("fahrenheit", "rankine", |v| v + 459.67),
    ("fahrenheit", "celsius", |v| (v - 32.0) / 1.8),
];

const VOLUME_UNITS: &[&str] = &[
    "liters",
    "gallons",
    "cups",
    "tablespoons",
    "cubic feet",
    "cubic inches",
];

// US customary volumes. One gallon is 231 cubic inches, 16 cups or 256
// tablespoons; one cubic foot is 1728 cubic inches.
const VOLUME: &[PairEntry] = &[
    ("liters", "gallons", |v| v * 0.2641720524),
    ("liters", "cups", |v| v * 4.2267528377),
    ("liters", "tablespoons", |v| v * 67.6280454),
    ("liters", "cubic feet", |v| v * 0.0353146667),
    ("liters", "cubic inches", |v| v * 61.0237441),
    ("gallons", "liters", |v| v * 3.785411784),
    ("gallons", "cups", |v| v * 16.0),
    ("gallons", "tablespoons", |v| v * 256.0),
    ("gallons", "cubic feet", |v| v * 231.0 / 1728.0),
    ("gallons", "cubic inches", |v| v * 231.0),
    ("cups", "liters", |v| v * 0.2365882365),
    ("cups", "gallons", |v| v / 16.0),
    ("cups", "tablespoons", |v| v * 16.0),
    ("cups", "cubic feet", |v| v * 14.4375 / 1728.0),
    ("cups", "cubic inches", |v| v * 14.4375),
    ("tablespoons", "liters", |v| v * 0.01478676478),
    ("tablespoons", "gallons", |v| v / 256.0),
    ("tablespoons", "cups", |v| v / 16.0),
    ("tablespoons", "cubic feet", |v| v * 0.90234375 / 1728.0),
    ("tablespoons", "cubic inches", |v| v * 0.90234375),
    ("cubic feet", "liters", |v| v * 28.316846592),
    ("cubic feet", "gallons", |v| v * 1728.0 / 231.0),
    ("cubic feet", "cups", |v| v * 1728.0 / 14.4375),
    ("cubic feet", "tablespoons", |v| v * 1728.0 / 0.90234375),
    ("cubic feet", "cubic inches", |v| v * 1728.0),
    ("cubic inches", "liters", |v| v * 0.016387064),
    ("cubic inches", "gallons", |v| v / 231.0),
    ("cubic inches", "cups", |v| v / 14.4375),
    ("cubic inches", "tablespoons", |v| v / 0.90234375),
    ("cubic inches", "cubic feet", |v| v / 1728.0),
];

/// Slack, in ULPs of the operands, within which a converted value counts as a tie.
const TIE_ULPS: f64 = 4.0;

/// Round to one decimal place, halves away from zero.
///
/// Negative zero is returned as `0.0`.
pub fn round_tenth(value: f64) -> f64 {
    positive_zero((value * 10.0).round() / 10.0)
}

/// Round the output of a transform applied to `input`.
///
/// Outputs within a few ULPs of a tie round as that tie, so `100 - 273.15`
/// rounds like the `-173.15` it stands for.
fn round_converted(input: f64, output: f64) -> f64 {
    let scaled = output * 10.0;
    let slack = TIE_ULPS * f64::EPSILON * 10.0 * (input.abs() + output.abs());
    let fraction = scaled - scaled.trunc();
    if (fraction.abs() - 0.5).abs() <= slack {
        positive_zero((scaled.trunc() + scaled.signum()) / 10.0)
    } else {
        round_tenth(output)
    }
}

fn positive_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Normalize a unit name: trim, collapse inner whitespace, lower-case.
pub fn normalize_unit(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A named group of mutually convertible units.
#[derive(Debug, Clone)]
pub struct Family {
    name: &'static str,
    units: Vec<&'static str>,
    transforms: HashMap<(String, String), Transform>,
}

impl Family {
    /// Build a family from its unit list and pairwise table.
    pub fn new(name: &'static str, units: &[&'static str], table: &[PairEntry]) -> Self {
        let transforms = table
            .iter()
            .map(|(from, to, f)| ((from.to_string(), to.to_string()), *f))
            .collect();
        Self {
            name,
            units: units.to_vec(),
            transforms,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Units in catalogue order.
    pub fn units(&self) -> &[&'static str] {
        &self.units
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.units.iter().any(|u| *u == unit)
    }

    fn transform(&self, from: &str, to: &str) -> Option<Transform> {
        self.transforms
            .get(&(from.to_string(), to.to_string()))
            .copied()
    }
}

/// Lookup table from family name, then ordered unit pair, to a transform.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    families: Vec<Family>,
}

impl Registry {
    /// An empty registry. Only self-conversions succeed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_family(mut self, family: Family) -> Self {
        self.families.push(family);
        self
    }

    /// The built-in temperature and volume catalogue.
    pub fn standard() -> &'static Registry {
        static STANDARD: OnceLock<Registry> = OnceLock::new();
        STANDARD.get_or_init(|| {
            Registry::new()
                .with_family(Family::new("temperature", TEMPERATURE_UNITS, TEMPERATURE))
                .with_family(Family::new("volume", VOLUME_UNITS, VOLUME))
        })
    }

    pub fn families(&self) -> &[Family] {
        &self.families
    }

    /// Name of the family a unit belongs to, if any.
    pub fn family_of(&self, unit: &str) -> Option<&'static str> {
        let unit = normalize_unit(unit);
        self.families
            .iter()
            .find(|f| f.contains(&unit))
            .map(|f| f.name)
    }

    /// Unrounded transform for a pair of distinct units.
    pub fn resolve(&self, from: &str, to: &str) -> Result<Transform, ConversionError> {
        let from = normalize_unit(from);
        let to = normalize_unit(to);
        self.families
            .iter()
            .find_map(|f| f.transform(&from, &to))
            .ok_or(ConversionError::Unsupported { from, to })
    }

    pub fn is_supported(&self, from: &str, to: &str) -> bool {
        normalize_unit(from) == normalize_unit(to) || self.resolve(from, to).is_ok()
    }

    /// Convert `value` and round the result to one decimal place.
    ///
    /// Converting a unit to itself always succeeds, even for names outside
    /// every family.
    pub fn convert(&self, from: &str, to: &str, value: f64) -> Result<f64, ConversionError> {
        if normalize_unit(from) == normalize_unit(to) {
            return Ok(round_tenth(value));
        }
        let transform = self.resolve(from, to)?;
        Ok(round_converted(value, transform(value)))
    }
}

/// Convert with the standard registry.
pub fn convert(from: &str, to: &str, value: f64) -> Result<f64, ConversionError> {
    Registry::standard().convert(from, to, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(registry: &Registry) -> Vec<(&'static str, &'static str)> {
        let mut out = Vec::new();
        for family in registry.families() {
            for a in family.units() {
                for b in family.units() {
                    if a != b {
                        out.push((*a, *b));
                    }
                }
            }
        }
        out
    }

    #[test]
    fn every_pair_in_a_family_is_defined() {
        let registry = Registry::standard();
        let all = pairs(registry);
        assert_eq!(all.len(), 4 * 3 + 6 * 5);
        for (a, b) in all {
            assert!(registry.resolve(a, b).is_ok(), "{a} -> {b}");
        }
    }

    #[test]
    fn conversion_matrix_at_one_hundred() {
        let expected: &[(&str, &[(&str, f64)])] = &[
            (
                "kelvin",
                &[
                    ("kelvin", 100.0),
                    ("rankine", 180.0),
                    ("celsius", -173.2),
                    ("fahrenheit", -279.7),
                ],
            ),
            (
                "rankine",
                &[
                    ("kelvin", 55.6),
                    ("rankine", 100.0),
                    ("celsius", -217.6),
                    ("fahrenheit", -359.7),
                ],
            ),
            (
                "celsius",
                &[
                    ("kelvin", 373.2),
                    ("rankine", 671.7),
                    ("celsius", 100.0),
                    ("fahrenheit", 212.0),
                ],
            ),
            (
                "fahrenheit",
                &[
                    ("kelvin", 310.9),
                    ("rankine", 559.7),
                    ("celsius", 37.8),
                    ("fahrenheit", 100.0),
                ],
            ),
            (
                "liters",
                &[
                    ("liters", 100.0),
                    ("gallons", 26.4),
                    ("cups", 422.7),
                    ("tablespoons", 6762.8),
                    ("cubic feet", 3.5),
                    ("cubic inches", 6102.4),
                ],
            ),
            (
                "gallons",
                &[
                    ("liters", 378.5),
                    ("gallons", 100.0),
                    ("cups", 1600.0),
                    ("tablespoons", 25600.0),
                    ("cubic feet", 13.4),
                    ("cubic inches", 23100.0),
                ],
            ),
            (
                "cups",
                &[
                    ("liters", 23.7),
                    ("gallons", 6.3),
                    ("cups", 100.0),
                    ("tablespoons", 1600.0),
                    ("cubic feet", 0.8),
                    ("cubic inches", 1443.8),
                ],
            ),
            (
                "tablespoons",
                &[
                    ("liters", 1.5),
                    ("gallons", 0.4),
                    ("cups", 6.3),
                    ("tablespoons", 100.0),
                    ("cubic feet", 0.1),
                    ("cubic inches", 90.2),
                ],
            ),
            (
                "cubic feet",
                &[
                    ("liters", 2831.7),
                    ("gallons", 748.1),
                    ("cups", 11968.8),
                    ("tablespoons", 191501.3),
                    ("cubic feet", 100.0),
                    ("cubic inches", 172800.0),
                ],
            ),
            (
                "cubic inches",
                &[
                    ("liters", 1.6),
                    ("gallons", 0.4),
                    ("cups", 6.9),
                    ("tablespoons", 110.8),
                    ("cubic feet", 0.1),
                    ("cubic inches", 100.0),
                ],
            ),
        ];

        for (from, targets) in expected {
            for (to, want) in *targets {
                let got = convert(from, to, 100.0).unwrap();
                assert_eq!(got, *want, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn temperature_round_trips_within_two_tenths() {
        let registry = Registry::standard();
        for (a, b) in pairs(registry) {
            if registry.family_of(a) != Some("temperature") {
                continue;
            }
            for i in -500..500 {
                let x = f64::from(i) / 10.0;
                let there = registry.convert(a, b, x).unwrap();
                let back = registry.convert(b, a, there).unwrap();
                assert!((back - x).abs() <= 0.2, "{a} -> {b} -> {a} at {x}: {back}");
            }
        }
    }

    #[test]
    fn volume_round_trips_within_one_rounding_step() {
        // The intermediate value is rounded to 0.1 of the target unit, so the
        // error on the way back scales with the reverse transform's slope.
        let registry = Registry::standard();
        for (a, b) in pairs(registry) {
            if registry.family_of(a) != Some("volume") {
                continue;
            }
            let back_fn = registry.resolve(b, a).unwrap();
            let slope = (back_fn(1.0) - back_fn(0.0)).abs();
            let tolerance = (0.05 * slope + 0.15).max(0.2);
            for i in 0..1000 {
                let x = f64::from(i) / 10.0;
                let there = registry.convert(a, b, x).unwrap();
                let back = registry.convert(b, a, there).unwrap();
                assert!(
                    (back - x).abs() <= tolerance,
                    "{a} -> {b} -> {a} at {x}: {back}"
                );
            }
        }
    }

    #[test]
    fn self_conversion_rounds_any_unit() {
        assert_eq!(convert("celsius", "celsius", 12.345).unwrap(), 12.3);
        assert_eq!(convert("furlongs", "furlongs", 1.25).unwrap(), 1.3);
        assert_eq!(convert(" Not A Unit ", "not a unit", -0.04).unwrap(), 0.0);
    }

    #[test]
    fn unsupported_pairs_fail() {
        assert!(convert("not a unit", "also not a unit", 123.123).is_err());
        assert!(convert("celsius", "cubic inches", 234.567).is_err());
        assert!(convert("liters", "rankine", 234.567).is_err());
        assert!(convert("liters", "not even close to a unit 0.0", 123.123).is_err());

        let err = convert("Celsius", "Cups", 1.0).unwrap_err();
        assert_eq!(
            err,
            ConversionError::Unsupported {
                from: "celsius".into(),
                to: "cups".into(),
            }
        );
    }

    #[test]
    fn unit_names_are_normalized() {
        assert_eq!(normalize_unit("  Cubic   FEET "), "cubic feet");
        assert_eq!(convert(" LITERS", "Cups ", 100.0).unwrap(), 422.7);
        assert_eq!(convert("cubic  inches", "cubic feet", 1728.0).unwrap(), 1.0);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_tenth(0.05), 0.1);
        assert_eq!(round_tenth(0.15), 0.2);
        assert_eq!(round_tenth(-0.05), -0.1);
        assert_eq!(round_tenth(2.25), 2.3);
        assert_eq!(round_tenth(2.249), 2.2);
        assert!(round_tenth(-0.01).is_sign_positive());
    }

    #[test]
    fn near_ties_round_plainly() {
        assert_eq!(round_tenth(0.0499999999), 0.0);
        assert_eq!(round_tenth(4.6499999999), 4.6);
        assert_eq!(convert("liters", "liters", 0.0499999999).unwrap(), 0.0);
        assert_eq!(convert("cups", "cups", -2.2499999999).unwrap(), -2.2);
    }

    #[test]
    fn converted_ties_absorb_float_error() {
        assert_eq!(round_converted(100.0, 100.0 - 273.15), -173.2);
        assert_eq!(convert("kelvin", "celsius", 100.0).unwrap(), -173.2);
        // 31.91 F is exactly -0.05 C.
        assert_eq!(convert("fahrenheit", "celsius", 31.91).unwrap(), -0.1);
        assert_eq!(round_converted(1.0, 0.0499999999), 0.0);
        assert!(round_converted(0.0, -0.04).is_sign_positive());
    }

    #[test]
    fn introspection() {
        let registry = Registry::standard();
        let names: Vec<_> = registry.families().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["temperature", "volume"]);
        assert_eq!(registry.family_of("Cups"), Some("volume"));
        assert_eq!(registry.family_of("parsecs"), None);
        assert!(registry.is_supported("kelvin", "celsius"));
        assert!(registry.is_supported("parsecs", "parsecs"));
        assert!(!registry.is_supported("kelvin", "cups"));
    }

    #[test]
    fn empty_registry_only_self_converts() {
        let registry = Registry::new();
        assert_eq!(registry.convert("kelvin", "kelvin", 1.0).unwrap(), 1.0);
        assert!(registry.convert("kelvin", "celsius", 1.0).is_err());
    }
}
