//! # Roll Length Calculator
//!
//! Converts roll geometry into spooled material length. The formula is the
//! standard cross-sectional-area approximation of an Archimedean spiral:
//! the annulus between the roll's outer disc and the core's inner disc,
//! divided by the material thickness, gives the unrolled length:
//!
//! ```text
//! L_mm = (π / (4 t_mm)) × (Dₒ_mm² − Dᵢ_mm²)
//! ```
//!
//! Operators measure diameters in cm and thickness in mm; everything is
//! converted to mm inside the formula and the result reported in meters.
//!
//! Validation is ordered and first-match-wins: the operator sees one
//! message naming the first thing wrong with the inputs.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{PlanError, PlanResult};
use crate::rounding::round_to_decimals;

/// Input parameters for a roll length calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollLengthInput {
    /// Total material thickness in mm
    pub thickness_mm: f64,
    /// Core outer diameter in cm (or the inner diameter directly, when
    /// `core_is_inner` is set)
    pub core_outer_cm: f64,
    /// Core wall thickness in cm (one side of the cardboard tube)
    pub core_wall_cm: f64,
    /// Roll outer diameter in cm. `None` when the field is still blank.
    pub roll_outer_cm: Option<f64>,
    /// The supplied core value is already the inner (hole) diameter
    pub core_is_inner: bool,
}

/// Result of a roll length calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollLengthResult {
    /// Spooled length in meters, 1 decimal
    pub length_m: f64,
    /// Core inner diameter the formula used, in cm, 2 decimals
    pub inner_diameter_cm: f64,
}

/// Calculate spooled roll length.
///
/// Fails with an [`PlanError::InvalidInput`] whose message names the first
/// failing condition:
/// 1. Roll outer diameter blank
/// 2. Any numeric input non-finite or ≤ 0
/// 3. Computed inner diameter ≤ 0
/// 4. Roll outer diameter ≤ inner diameter
/// 5. Computed length non-finite or ≤ 0
pub fn calculate(input: &RollLengthInput) -> PlanResult<RollLengthResult> {
    let roll_outer_cm = input.roll_outer_cm.ok_or_else(|| {
        PlanError::invalid_input("roll_outer_cm", "", "Roll outer diameter is required.")
    })?;

    let values = [
        ("thickness_mm", input.thickness_mm),
        ("core_outer_cm", input.core_outer_cm),
        ("core_wall_cm", input.core_wall_cm),
        ("roll_outer_cm", roll_outer_cm),
    ];
    for (field, value) in values {
        if !value.is_finite() || value <= 0.0 {
            return Err(PlanError::invalid_input(
                field,
                value.to_string(),
                "All numeric inputs must be greater than 0.",
            ));
        }
    }

    let inner_cm = if input.core_is_inner {
        input.core_outer_cm
    } else {
        input.core_outer_cm - 2.0 * input.core_wall_cm
    };
    if !inner_cm.is_finite() || inner_cm <= 0.0 {
        return Err(PlanError::invalid_input(
            "core_outer_cm",
            inner_cm.to_string(),
            "Core inner diameter must be greater than 0.",
        ));
    }

    if roll_outer_cm <= inner_cm {
        return Err(PlanError::invalid_input(
            "roll_outer_cm",
            roll_outer_cm.to_string(),
            "Roll outer diameter must be greater than the inner diameter.",
        ));
    }

    let outer_mm = roll_outer_cm * 10.0;
    let inner_mm = inner_cm * 10.0;
    let length_mm = (PI / (4.0 * input.thickness_mm)) * (outer_mm * outer_mm - inner_mm * inner_mm);
    let length_m = length_mm / 1000.0;

    if !length_m.is_finite() || length_m <= 0.0 {
        return Err(PlanError::invalid_input(
            "length_m",
            length_m.to_string(),
            "Calculated length is invalid. Check your inputs.",
        ));
    }

    Ok(RollLengthResult {
        length_m: round_to_decimals(length_m, 1),
        inner_diameter_cm: round_to_decimals(inner_cm, 2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> RollLengthInput {
        RollLengthInput {
            thickness_mm: 0.110,
            core_outer_cm: 9.7,
            core_wall_cm: 1.0,
            roll_outer_cm: Some(30.0),
            core_is_inner: false,
        }
    }

    #[test]
    fn test_reference_roll() {
        let result = calculate(&base_input()).unwrap();

        // Dᵢ = 9.7 - 2*1.0 = 7.7 cm
        assert_eq!(result.inner_diameter_cm, 7.7);

        // L = π/(4*0.110) * (300² - 77²) / 1000 m, to 1 decimal
        let expected = PI / (4.0 * 0.110) * (300.0f64.powi(2) - 77.0f64.powi(2)) / 1000.0;
        assert_eq!(result.length_m, round_to_decimals(expected, 1));
        assert!((result.length_m - 600.3).abs() < 0.05);
    }

    #[test]
    fn test_core_is_inner_skips_wall_deduction() {
        let mut input = base_input();
        input.core_is_inner = true;
        let result = calculate(&input).unwrap();
        assert_eq!(result.inner_diameter_cm, 9.7);
    }

    #[test]
    fn test_blank_roll_outer() {
        let mut input = base_input();
        input.roll_outer_cm = None;
        let err = calculate(&input).unwrap_err();
        assert!(err.to_string().contains("Roll outer diameter is required."));
    }

    #[test]
    fn test_non_positive_inputs() {
        let mut input = base_input();
        input.thickness_mm = 0.0;
        let err = calculate(&input).unwrap_err();
        assert!(err
            .to_string()
            .contains("All numeric inputs must be greater than 0."));

        let mut input = base_input();
        input.core_wall_cm = f64::NAN;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_inner_diameter_must_be_positive() {
        // Wall thicker than half the core: 4.0 - 2*2.5 < 0.
        let mut input = base_input();
        input.core_outer_cm = 4.0;
        input.core_wall_cm = 2.5;
        let err = calculate(&input).unwrap_err();
        assert!(err
            .to_string()
            .contains("Core inner diameter must be greater than 0."));
    }

    #[test]
    fn test_roll_must_exceed_core() {
        let mut input = base_input();
        input.roll_outer_cm = Some(7.0);
        let err = calculate(&input).unwrap_err();
        assert!(err
            .to_string()
            .contains("Roll outer diameter must be greater than the inner diameter."));
    }

    #[test]
    fn test_first_matching_condition_wins() {
        // Both the blank-field and non-positive conditions apply; the blank
        // check fires first.
        let mut input = base_input();
        input.roll_outer_cm = None;
        input.thickness_mm = -1.0;
        let err = calculate(&input).unwrap_err();
        assert!(err.to_string().contains("Roll outer diameter is required."));
    }
}
