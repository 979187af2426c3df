//! # UV Curing Recipe Calculator
//!
//! Recipe-based UV settings: each substrate carries a calibrated baseline
//! (recommended gradient, recommended minimum UV, notes, risk level), each
//! recipe coating adds on top, and the operator can override either setting
//! manually. Every resolved setting carries its provenance so the UI can
//! show whether the number came from the recipe or from the operator.
//!
//! Unlike the energy calculator, the output here is advisory-first: the
//! predicted power always lands inside machine limits, and warnings are
//! leveled (info / warn / danger) rather than suppressed.

use serde::{Deserialize, Serialize};

use crate::materials::{RecipeCoating, Substrate};
use crate::rounding::round_to_step;

/// Machine limits of the DC330 Mini.
pub const SPEED_MIN_MPM: f64 = 0.0;
pub const SPEED_MAX_MPM: f64 = 40.0;
pub const UV_MIN_FLOOR_W: f64 = 1000.0;
pub const UV_MIN_CEIL_W: f64 = 3000.0;
pub const GRADIENT_MIN: f64 = 50.0;
pub const GRADIENT_MAX: f64 = 500.0;

/// Warning thresholds.
const SPEED_LIMITED_WATTS_DANGER: f64 = 3000.0;
const SPEED_LIMITED_WATTS_WARN: f64 = 2900.0;
const LOW_SPEED_MPM: f64 = 10.0;
const LOW_ENERGY_WATTS: f64 = 1400.0;
const BULB_EOL_EXTRA_PERCENT: f64 = 0.15;

/// Risk tier of a substrate baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Where a resolved setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingSource {
    Recommended,
    Manual,
}

/// A resolved machine setting with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub value: f64,
    pub source: SettingSource,
}

/// Severity of a recipe warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    Info,
    Warn,
    Danger,
}

/// One leveled advisory message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeWarning {
    pub level: WarningLevel,
    pub message: String,
}

/// What the job is for; a setup test strip gets an extra reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JobType {
    #[default]
    #[serde(rename = "Production")]
    Production,
    #[serde(rename = "Setup test strip")]
    SetupTestStrip,
}

/// Reported lamp condition; a tired bulb earns an energy-margin note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BulbCondition {
    #[default]
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Near end-of-life")]
    NearEndOfLife,
}

/// Operator overrides. Individual values only apply while `enabled` is set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UvRecipeOverrides {
    pub enabled: bool,
    pub uv_min_w: Option<f64>,
    pub gradient: Option<f64>,
}

/// Input parameters for a recipe calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UvRecipeInput {
    pub speed_mpm: f64,
    pub substrate: Substrate,
    pub coating: RecipeCoating,
    #[serde(default)]
    pub job_type: JobType,
    #[serde(default)]
    pub bulb_condition: BulbCondition,
    #[serde(default)]
    pub overrides: UvRecipeOverrides,
}

/// Result of a recipe calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UvRecipeResult {
    pub uv_min: Setting,
    pub gradient: Setting,
    pub predicted_watts: f64,
    /// Recipe notes (coating tag + substrate baseline notes)
    pub notes: String,
    pub warnings: Vec<RecipeWarning>,
}

/// A resolved substrate+coating recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub recommended_gradient: f64,
    pub recommended_min_uv: f64,
    pub notes: String,
    pub risk_level: RiskLevel,
}

/// Substrate baseline: (gradient, min UV, notes, risk).
fn baseline(substrate: Substrate) -> Option<(f64, f64, &'static str, RiskLevel)> {
    let row = match substrate {
        Substrate::CaPpUcoWhite => (
            220.0,
            1600.0,
            "Baseline for coated PP (white). Adjust after cure tests.",
            RiskLevel::Medium,
        ),
        Substrate::CaPpUcoClear => (
            240.0,
            1700.0,
            "Baseline for coated PP (clear). Clear films can be trickier—watch tack/odor.",
            RiskLevel::Medium,
        ),
        Substrate::PpSilverFtc50 => (
            260.0,
            1800.0,
            "Silver facestock—monitor reflectivity + cure on dense ink/varnish areas.",
            RiskLevel::Medium,
        ),
        Substrate::PpBlueGray => (
            240.0,
            1700.0,
            "Colored PP baseline. Confirm cure on heavy coverage.",
            RiskLevel::Medium,
        ),
        Substrate::ForestPeWhiteFtc85 => (
            280.0,
            1900.0,
            "PE typically needs more surface energy management; verify adhesion/cure.",
            RiskLevel::High,
        ),
        Substrate::ForestPeClearFtc85 => (
            300.0,
            2000.0,
            "Clear PE baseline. If bonding issues appear, review corona + adhesive choice.",
            RiskLevel::High,
        ),
        Substrate::SynBoppWhite20 => (
            240.0,
            1700.0,
            "SYN-BOPP 20µ white baseline. Refine after your lamp + speed trials.",
            RiskLevel::Medium,
        ),
        Substrate::SynBoppMetallic20 => (
            270.0,
            1900.0,
            "Metallized film can behave differently (reflection/heat). Verify cure carefully.",
            RiskLevel::High,
        ),
        Substrate::SynBoppClear20 => (
            250.0,
            1800.0,
            "SYN-BOPP 20µ clear baseline. Watch curl/tack on long runs.",
            RiskLevel::Medium,
        ),
        Substrate::SynBoppMatPeach20 => (
            260.0,
            1900.0,
            "Matt/peach-touch style: often needs more energy. Validate scuff resistance.",
            RiskLevel::High,
        ),
        Substrate::SynBoppMat20 => (
            260.0,
            1900.0,
            "Matt film baseline: validate cure on solid areas and after lamination.",
            RiskLevel::High,
        ),
        Substrate::Unknown => return None,
    };
    Some(row)
}

/// Combine substrate baseline and coating adders, or fall back to the
/// default recipe when either side is unknown.
pub fn recipe_for(substrate: Substrate, coating: RecipeCoating) -> Recipe {
    match (baseline(substrate), coating.note_tag()) {
        (Some((gradient, min_uv, notes, risk_level)), Some(tag)) => Recipe {
            recommended_gradient: gradient + coating.gradient_add(),
            recommended_min_uv: min_uv + coating.min_uv_add(),
            notes: format!("{tag}: {notes}"),
            risk_level,
        },
        _ => Recipe {
            recommended_gradient: 250.0,
            recommended_min_uv: 1800.0,
            notes: "Default recipe (fallback).".to_string(),
            risk_level: RiskLevel::Medium,
        },
    }
}

/// Calculate recipe-based UV settings.
pub fn calculate(input: &UvRecipeInput) -> UvRecipeResult {
    let speed = input.speed_mpm.clamp(SPEED_MIN_MPM, SPEED_MAX_MPM);
    let recipe = recipe_for(input.substrate, input.coating);

    let uv_min_manual = input.overrides.enabled && input.overrides.uv_min_w.is_some();
    let grad_manual = input.overrides.enabled && input.overrides.gradient.is_some();

    let uv_min_value = if uv_min_manual {
        input.overrides.uv_min_w.unwrap_or_default()
    } else {
        recipe.recommended_min_uv
    };
    let grad_value = if grad_manual {
        input.overrides.gradient.unwrap_or_default()
    } else {
        recipe.recommended_gradient
    };

    let uv_min = round_to_step(uv_min_value, 100.0).clamp(UV_MIN_FLOOR_W, UV_MIN_CEIL_W);
    let gradient = round_to_step(grad_value, 10.0).clamp(GRADIENT_MIN, GRADIENT_MAX);

    let raw = uv_min.max(speed * gradient);
    let predicted = raw.clamp(0.0, UV_MIN_CEIL_W);

    let mut warnings = Vec::new();

    if predicted >= SPEED_LIMITED_WATTS_DANGER {
        warnings.push(RecipeWarning {
            level: WarningLevel::Danger,
            message: format!(
                "Speed-limited: predicted UV hits {UV_MIN_CEIL_W}W. Reduce speed or verify cure at max."
            ),
        });
    } else if predicted >= SPEED_LIMITED_WATTS_WARN {
        warnings.push(RecipeWarning {
            level: WarningLevel::Warn,
            message: format!(
                "Near limit: predicted UV is {predicted:.0}W (≥ {SPEED_LIMITED_WATTS_WARN}W)."
            ),
        });
    }

    if speed <= LOW_SPEED_MPM && predicted <= LOW_ENERGY_WATTS {
        warnings.push(RecipeWarning {
            level: WarningLevel::Warn,
            message: format!(
                "Under-cure risk heuristic: low speed ({speed} m/min) + low predicted power ({predicted:.0}W). Consider raising UV Min / Gradient or verify cure."
            ),
        });
    }

    if input.bulb_condition == BulbCondition::NearEndOfLife {
        let extra = (predicted * BULB_EOL_EXTRA_PERCENT).round();
        let percent = (BULB_EOL_EXTRA_PERCENT * 100.0).round();
        warnings.push(RecipeWarning {
            level: WarningLevel::Info,
            message: format!(
                "Bulb near end-of-life: consider ~+{percent}% energy margin (≈ +{extra}W) and confirm cure."
            ),
        });
    }

    if input.job_type == JobType::SetupTestStrip {
        warnings.push(RecipeWarning {
            level: WarningLevel::Info,
            message: "Setup mode: run a short test strip and confirm cure/adhesion before full production."
                .to_string(),
        });
    }

    UvRecipeResult {
        uv_min: Setting {
            value: uv_min,
            source: if uv_min_manual {
                SettingSource::Manual
            } else {
                SettingSource::Recommended
            },
        },
        gradient: Setting {
            value: gradient,
            source: if grad_manual {
                SettingSource::Manual
            } else {
                SettingSource::Recommended
            },
        },
        predicted_watts: predicted,
        notes: recipe.notes,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(speed_mpm: f64, substrate: Substrate, coating: RecipeCoating) -> UvRecipeInput {
        UvRecipeInput {
            speed_mpm,
            substrate,
            coating,
            job_type: JobType::Production,
            bulb_condition: BulbCondition::Good,
            overrides: UvRecipeOverrides::default(),
        }
    }

    #[test]
    fn test_recommended_recipe() {
        let result = calculate(&input(
            20.0,
            Substrate::SynBoppClear20,
            RecipeCoating::UvLaminationAdhesive,
        ));

        // Baseline 250/1800 + adhesive adders 30/150 -> gradient 280, min
        // UV 1950 rounded to 2000.
        assert_eq!(result.gradient.value, 280.0);
        assert_eq!(result.gradient.source, SettingSource::Recommended);
        assert_eq!(result.uv_min.value, 2000.0);
        assert_eq!(result.uv_min.source, SettingSource::Recommended);

        // predicted = max(2000, 20 * 280) clamped to 3000 -> danger
        assert_eq!(result.predicted_watts, 3000.0);
        assert_eq!(result.warnings[0].level, WarningLevel::Danger);
        assert!(result.warnings[0].message.contains("Speed-limited"));

        assert!(result.notes.starts_with("Adhesive (lamination):"));
    }

    #[test]
    fn test_manual_override_provenance() {
        let mut job = input(10.0, Substrate::CaPpUcoWhite, RecipeCoating::UvVarnish);
        job.overrides = UvRecipeOverrides {
            enabled: true,
            uv_min_w: Some(2840.0),
            gradient: None,
        };
        let result = calculate(&job);

        // Manual min UV rounds to 2800; gradient stays recommended (220).
        assert_eq!(result.uv_min.value, 2800.0);
        assert_eq!(result.uv_min.source, SettingSource::Manual);
        assert_eq!(result.gradient.value, 220.0);
        assert_eq!(result.gradient.source, SettingSource::Recommended);
    }

    #[test]
    fn test_disabled_overrides_are_ignored() {
        let mut job = input(10.0, Substrate::CaPpUcoWhite, RecipeCoating::UvVarnish);
        job.overrides = UvRecipeOverrides {
            enabled: false,
            uv_min_w: Some(2840.0),
            gradient: Some(490.0),
        };
        let result = calculate(&job);

        assert_eq!(result.uv_min.value, 1600.0);
        assert_eq!(result.uv_min.source, SettingSource::Recommended);
        assert_eq!(result.gradient.value, 220.0);
    }

    #[test]
    fn test_settings_clamped_to_machine_limits() {
        let mut job = input(20.0, Substrate::CaPpUcoWhite, RecipeCoating::UvVarnish);
        job.overrides = UvRecipeOverrides {
            enabled: true,
            uv_min_w: Some(9000.0),
            gradient: Some(2.0),
        };
        let result = calculate(&job);

        assert_eq!(result.uv_min.value, 3000.0);
        assert_eq!(result.gradient.value, 50.0);
    }

    #[test]
    fn test_under_cure_heuristic() {
        let mut job = input(5.0, Substrate::CaPpUcoWhite, RecipeCoating::UvVarnish);
        job.overrides = UvRecipeOverrides {
            enabled: true,
            uv_min_w: Some(1000.0),
            gradient: Some(50.0),
        };
        let result = calculate(&job);

        // predicted = max(1000, 5 * 50) = 1000 <= 1400 at speed <= 10.
        assert_eq!(result.predicted_watts, 1000.0);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.level == WarningLevel::Warn && w.message.contains("Under-cure")));
    }

    #[test]
    fn test_bulb_end_of_life_margin() {
        let mut job = input(5.0, Substrate::CaPpUcoClear, RecipeCoating::UvVarnish);
        job.bulb_condition = BulbCondition::NearEndOfLife;
        let result = calculate(&job);

        // predicted = max(1700, 5 * 240) = 1700; extra = round(255) = 255
        assert_eq!(result.predicted_watts, 1700.0);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.level == WarningLevel::Info && w.message.contains("+255W")));
    }

    #[test]
    fn test_setup_test_strip_note() {
        let mut job = input(15.0, Substrate::PpBlueGray, RecipeCoating::UvVarnish);
        job.job_type = JobType::SetupTestStrip;
        let result = calculate(&job);

        assert!(result
            .warnings
            .iter()
            .any(|w| w.level == WarningLevel::Info && w.message.contains("Setup mode")));
    }

    #[test]
    fn test_unknown_substrate_gets_fallback_recipe() {
        let result = calculate(&input(10.0, Substrate::Unknown, RecipeCoating::UvVarnish));
        assert_eq!(result.notes, "Default recipe (fallback).");
        assert_eq!(result.gradient.value, 250.0);
        assert_eq!(result.uv_min.value, 1800.0);
    }

    #[test]
    fn test_speed_is_clamped() {
        let result = calculate(&input(60.0, Substrate::CaPpUcoWhite, RecipeCoating::UvVarnish));
        // Speed clamps to 40; predicted = max(1600, 40 * 220) -> 3000 cap.
        assert_eq!(result.predicted_watts, 3000.0);
    }
}
