//! # Candy Jar Planner
//!
//! Weight, click, and diecut-stop planning for Midi and Maxi candy jars.
//!
//! For the jar counts the shop actually runs, the planning table carries
//! calibrated overrides that were tuned on the line; those win outright.
//! Any other count falls back to first-principles arithmetic (wrappers per
//! jar, pieces per kg, wrappers per click, plus a per-product safety
//! multiplier). Overrides are never blended with the formula — there is no
//! interpolation between calibrated jar counts.

use serde::{Deserialize, Serialize};

use crate::rounding::round_to_nearest_5;

/// Wrapped pieces per jar, by product type.
const WRAPPERS_PER_JAR_MIDI: f64 = 40.0;
const WRAPPERS_PER_JAR_MAXI: f64 = 85.0;

/// Candy pieces per kilogram.
const PIECES_PER_KG: f64 = 190.0;

/// Wrappers cut per press click.
const WRAPPERS_PER_CLICK: f64 = 48.0;

/// Material consumed per click, in meters.
const CLICK_LENGTH_M: f64 = 0.976;

/// Safety multipliers applied to the formula's raw click count.
const SAFETY_FACTOR_MIDI: f64 = 1.18;
const SAFETY_FACTOR_MAXI: f64 = 1.22;

/// Jar product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JarProductType {
    Midi,
    Maxi,
}

impl JarProductType {
    fn wrappers_per_jar(&self) -> f64 {
        match self {
            JarProductType::Midi => WRAPPERS_PER_JAR_MIDI,
            JarProductType::Maxi => WRAPPERS_PER_JAR_MAXI,
        }
    }

    fn safety_factor(&self) -> f64 {
        match self {
            JarProductType::Midi => SAFETY_FACTOR_MIDI,
            JarProductType::Maxi => SAFETY_FACTOR_MAXI,
        }
    }

    fn overrides(&self) -> &'static [JarOverride] {
        match self {
            JarProductType::Midi => MIDI_OVERRIDES,
            JarProductType::Maxi => MAXI_OVERRIDES,
        }
    }
}

/// A calibrated planning-table row. `meters: None` means the diecut stop is
/// derived from the click count at the standard click length.
#[derive(Debug, Clone, Copy)]
struct JarOverride {
    jars: f64,
    kg: f64,
    clicks: u64,
    meters: Option<f64>,
}

const MIDI_OVERRIDES: &[JarOverride] = &[
    JarOverride { jars: 12.0, kg: 2.5, clicks: 30, meters: Some(25.0) },
    JarOverride { jars: 24.0, kg: 4.5, clicks: 30, meters: Some(25.0) },
    JarOverride { jars: 48.0, kg: 9.0, clicks: 55, meters: Some(45.0) },
    JarOverride { jars: 96.0, kg: 18.0, clicks: 105, meters: Some(95.0) },
    JarOverride { jars: 324.0, kg: 65.0, clicks: 305, meters: None },
    JarOverride { jars: 648.0, kg: 122.0, clicks: 625, meters: None },
    JarOverride { jars: 1296.0, kg: 244.0, clicks: 1212, meters: None },
];

const MAXI_OVERRIDES: &[JarOverride] = &[
    JarOverride { jars: 12.0, kg: 5.0, clicks: 30, meters: Some(25.0) },
    JarOverride { jars: 24.0, kg: 10.0, clicks: 55, meters: Some(45.0) },
    JarOverride { jars: 48.0, kg: 20.0, clicks: 105, meters: Some(95.0) },
    JarOverride { jars: 96.0, kg: 40.0, clicks: 200, meters: Some(190.0) },
    JarOverride { jars: 324.0, kg: 122.0, clicks: 625, meters: None },
    JarOverride { jars: 648.0, kg: 260.0, clicks: 1320, meters: None },
    JarOverride { jars: 1296.0, kg: 517.0, clicks: 7530, meters: None },
];

/// Planning result for a jar job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JarPlan {
    /// Approximate candy weight in kg (1 decimal on the formula path)
    pub kg: f64,
    /// Total clicks to run
    pub clicks: u64,
    /// Approximate diecut stop in meters, a multiple of 5
    pub meters: f64,
}

/// Diecut stop for a click count at the standard click length.
fn meters_for_clicks(clicks: u64) -> f64 {
    round_to_nearest_5(clicks as f64 * CLICK_LENGTH_M)
}

/// Plan a jar job.
///
/// Returns `None` for a non-finite or non-positive jar count. An exact
/// match in the calibrated table takes precedence; otherwise the formula
/// path runs.
pub fn plan(product_type: JarProductType, jars: f64) -> Option<JarPlan> {
    if !jars.is_finite() || jars <= 0.0 {
        return None;
    }

    if let Some(entry) = product_type.overrides().iter().find(|o| o.jars == jars) {
        return Some(JarPlan {
            kg: entry.kg,
            clicks: entry.clicks,
            meters: entry.meters.unwrap_or_else(|| meters_for_clicks(entry.clicks)),
        });
    }

    let wrappers = jars * product_type.wrappers_per_jar();
    let kg = (wrappers / PIECES_PER_KG * 10.0).round() / 10.0;
    let base_clicks = wrappers / WRAPPERS_PER_CLICK;
    let clicks = (base_clicks * product_type.safety_factor()).ceil() as u64;

    Some(JarPlan {
        kg,
        clicks,
        meters: meters_for_clicks(clicks),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_precedence() {
        // Calibrated row wins outright; the formula would give different
        // numbers for 12 midi jars.
        let plan = plan(JarProductType::Midi, 12.0).unwrap();
        assert_eq!(plan, JarPlan { kg: 2.5, clicks: 30, meters: 25.0 });
    }

    #[test]
    fn test_override_derives_missing_meters() {
        // 305 clicks * 0.976 = 297.68 -> nearest 5 -> 300.
        let midi = plan(JarProductType::Midi, 324.0).unwrap();
        assert_eq!(midi.kg, 65.0);
        assert_eq!(midi.clicks, 305);
        assert_eq!(midi.meters, 300.0);

        // 7530 clicks * 0.976 = 7349.28 -> 7350.
        let plan = plan(JarProductType::Maxi, 1296.0).unwrap();
        assert_eq!(plan.clicks, 7530);
        assert_eq!(plan.meters, 7350.0);
    }

    #[test]
    fn test_midi_formula_path() {
        // 100 jars * 40 = 4000 wrappers; kg = 4000/190 = 21.05 -> 21.1;
        // clicks = ceil(4000/48 * 1.18) = ceil(98.33) = 99;
        // meters = 99 * 0.976 = 96.6 -> 95.
        let plan = plan(JarProductType::Midi, 100.0).unwrap();
        assert_eq!(plan.kg, 21.1);
        assert_eq!(plan.clicks, 99);
        assert_eq!(plan.meters, 95.0);
    }

    #[test]
    fn test_maxi_formula_path() {
        // 100 jars * 85 = 8500 wrappers; kg = 44.7;
        // clicks = ceil(8500/48 * 1.22) = ceil(216.04) = 217;
        // meters = 217 * 0.976 = 211.8 -> 210.
        let plan = plan(JarProductType::Maxi, 100.0).unwrap();
        assert_eq!(plan.kg, 44.7);
        assert_eq!(plan.clicks, 217);
        assert_eq!(plan.meters, 210.0);
    }

    #[test]
    fn test_near_miss_jar_count_uses_formula() {
        // 12.5 jars is not a calibrated count; no blending with the 12-jar
        // row.
        let plan = plan(JarProductType::Midi, 12.5).unwrap();
        assert_eq!(plan.kg, 2.6);
        assert_eq!(plan.clicks, 13);
        assert_eq!(plan.meters, 15.0);
    }

    #[test]
    fn test_invalid_jar_counts() {
        assert!(plan(JarProductType::Midi, 0.0).is_none());
        assert!(plan(JarProductType::Maxi, -4.0).is_none());
        assert!(plan(JarProductType::Midi, f64::NAN).is_none());
        assert!(plan(JarProductType::Maxi, f64::INFINITY).is_none());
    }
}
