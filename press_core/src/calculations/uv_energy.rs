//! # DC330 UV Energy Calculator
//!
//! Derives the UV curing target for a substrate/coating/speed combination,
//! with heat-limit safety. Stages run in a fixed order:
//!
//! 1. Speed-zero short-circuit (sentinel result, single warning)
//! 2. Process classification from the coating (varnish vs lamination)
//! 3. Reference energy: substrate base + coating modifier at 20 m/min
//! 4. Target energy: reference scaled linearly by speed / 20
//! 5. Cure gradient: target / speed, ceiled to 50, clamped to [50, 500]
//! 6. Thermal cap: thin films cap the gradient under lamination
//! 7. Minimum energy: the 1000 W table floor
//! 8. Predicted achievable energy, capped at the 3000 W machine ceiling
//! 9. Warnings, in evaluation order
//!
//! Heat limiting is a harder constraint than any speed recommendation, so
//! the speed/power warning family is suppressed while heat-limited — the
//! operator gets one consistent instruction, not two conflicting ones.

use serde::{Deserialize, Serialize};

use crate::materials::{Coating, ProcessType, Substrate};
use crate::rounding::{ceil_to_step, floor_to_step};

/// Speed at which substrate/coating reference energies were calibrated.
pub const REFERENCE_SPEED_MPM: f64 = 20.0;

/// UV power floor and ceiling of the unit (W).
pub const MIN_UV_W: f64 = 1000.0;
pub const MAX_UV_W: f64 = 3000.0;

/// Gradient floor and ceiling of the unit.
pub const MIN_GRADIENT: f64 = 50.0;
pub const MAX_GRADIENT: f64 = 500.0;

/// Fastest the web can run (m/min).
pub const MAX_SPEED_MPM: f64 = 40.0;

const WARN_WEB_NOT_MOVING: &str = "Web not moving (speed = 0).";
const WARN_HEAT_LIMITED: &str = "HEAT-LIMITED: Gradient capped to prevent web softening/curling/cutting. If bonding/cure is insufficient: reduce speed, reduce coat weight, add cooling, or change adhesive.";
const WARN_CURL_RISK: &str = "CURL RISK: Thin BOPP may curl after UV due to heat. Keep gradient low and maximize cooling after UV.";
const WARN_UNREACHABLE_ANY_SPEED: &str =
    "Power capped at 3000 W; target UV cannot be reached at any speed with this UV_ref.";
const WARN_GRADIENT_CAPPED: &str =
    "Gradient capped at 500; target UV cannot be reached at this speed.";
const WARN_POWER_CAPPED: &str =
    "Power capped at 3000 W; target UV cannot be reached at this speed.";

/// Input parameters for a UV energy calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UvEnergyInput {
    /// Web speed in m/min
    pub speed_mpm: f64,
    pub substrate: Substrate,
    pub coating: Coating,
}

/// Result of a UV energy calculation. All energies in W.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UvEnergyResult {
    /// Target energy before display rounding
    pub target_uv_raw: f64,
    /// Target energy ceiled to 100 W; `None` when the web is not moving
    pub target_uv_display: Option<f64>,
    /// Recommended minimum energy (the table floor absent an override)
    pub recommended_min_uv: f64,
    /// Recommended gradient after the thermal cap
    pub recommended_gradient: f64,
    /// Achievable energy at this speed before display rounding
    pub predicted_uv_raw: f64,
    /// Achievable energy ceiled to 100 W
    pub predicted_uv: f64,
    /// Whether the thermal cap actually reduced the gradient
    pub heat_limited: bool,
    /// Speed at which the target becomes reachable, when one exists
    pub recommended_max_speed: Option<f64>,
    /// Advisory messages, in evaluation order
    pub warnings: Vec<String>,
    /// The speed-zero sentinel fired
    pub speed_zero: bool,
}

/// Calculate the UV energy recommendation.
pub fn calculate(input: &UvEnergyInput) -> UvEnergyResult {
    let speed = input.speed_mpm;

    if speed == 0.0 {
        return UvEnergyResult {
            target_uv_raw: 0.0,
            target_uv_display: None,
            recommended_min_uv: MIN_UV_W,
            recommended_gradient: MIN_GRADIENT,
            predicted_uv_raw: MIN_UV_W,
            predicted_uv: MIN_UV_W,
            heat_limited: false,
            recommended_max_speed: None,
            warnings: vec![WARN_WEB_NOT_MOVING.to_string()],
            speed_zero: true,
        };
    }

    let process = input.coating.process_type();

    // Reference energy at 20 m/min. Unknown substrates/coatings contribute
    // 0 W rather than failing.
    let uv_ref_combo = input.substrate.base_uv_ref() + input.coating.modifier_w();

    let target_uv_raw = uv_ref_combo * (speed / REFERENCE_SPEED_MPM);
    let target_uv_display = ceil_to_step(target_uv_raw, 100.0);

    // Cure-based gradient, before the thermal cap.
    let gradient_raw = target_uv_raw / speed;
    let gradient_cure = ceil_to_step(gradient_raw, 50.0).clamp(MIN_GRADIENT, MAX_GRADIENT);

    let thermal_cap = input.substrate.thermal_gradient_cap(process);
    let recommended_gradient = gradient_cure.min(thermal_cap);
    let heat_limited = recommended_gradient < gradient_cure;

    let recommended_min_uv = ceil_to_step(MIN_UV_W, 100.0).clamp(MIN_UV_W, MAX_UV_W);

    let predicted_uv_raw = recommended_min_uv
        .max(speed * recommended_gradient)
        .min(MAX_UV_W);
    let predicted_uv = ceil_to_step(predicted_uv_raw, 100.0);

    let mut warnings = Vec::new();

    if heat_limited {
        warnings.push(WARN_HEAT_LIMITED.to_string());
        if input.substrate.is_thin_film() && process == ProcessType::Lamination {
            warnings.push(WARN_CURL_RISK.to_string());
        }
    }

    let mut recommended_max_speed = None;

    if predicted_uv_raw < target_uv_raw {
        if target_uv_raw > MAX_UV_W {
            // Even at the best-case gradient the power ceiling is passed at
            // every speed.
            if !heat_limited {
                warnings.push(WARN_UNREACHABLE_ANY_SPEED.to_string());
            }
        } else {
            let max_speed_raw = target_uv_raw / MAX_GRADIENT;
            let max_speed = floor_to_step(max_speed_raw, 0.5).clamp(0.0, MAX_SPEED_MPM);
            recommended_max_speed = Some(max_speed);
            if !heat_limited {
                warnings.push(format!(
                    "Reduce speed to ≤ {max_speed} m/min for proper curing."
                ));
            }
        }

        if !heat_limited {
            if recommended_gradient == MAX_GRADIENT && predicted_uv_raw < target_uv_raw {
                warnings.push(WARN_GRADIENT_CAPPED.to_string());
            }
            if predicted_uv_raw == MAX_UV_W
                && (predicted_uv_raw < target_uv_raw || target_uv_raw > MAX_UV_W)
            {
                warnings.push(WARN_POWER_CAPPED.to_string());
            }
        }
    }

    UvEnergyResult {
        target_uv_raw,
        target_uv_display: Some(target_uv_display),
        recommended_min_uv,
        recommended_gradient,
        predicted_uv_raw,
        predicted_uv,
        heat_limited,
        recommended_max_speed,
        warnings,
        speed_zero: false,
    }
}
