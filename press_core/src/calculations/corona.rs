//! # Corona Treatment Advisor
//!
//! Rule-based advice on corona treatment before coating or laminating: a
//! target surface energy (dyne/cm), whether to run the corona station, and
//! how confident the advice is.
//!
//! Scoring: PE substrates start at 43 dyne, PP at 41; lamination intent,
//! high-risk surfaces, and aged or contaminated material each push the
//! target up; the sum clamps to [38, 46]. Pre-treated stock in known-good
//! condition is the only case where corona is skipped with high confidence —
//! everything else gets treated, and anything outside the stock list is
//! treated unconditionally.

use serde::{Deserialize, Serialize};

use crate::materials::{Coating, CoronaIntent, PolymerGroup, Substrate, SurfaceRisk};

/// Dyne target bounds.
pub const MIN_TARGET_DYNE: u32 = 38;
pub const MAX_TARGET_DYNE: u32 = 46;

/// Condition of the substrate surface at press time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SurfaceCondition {
    #[serde(rename = "Fresh/clean")]
    FreshClean,
    /// The safe assumption when the operator has not said otherwise.
    #[default]
    #[serde(rename = "Aged/unknown")]
    AgedUnknown,
    #[serde(rename = "Contamination risk")]
    ContaminationRisk,
}

/// Confidence tier of the advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoronaConfidence {
    Low,
    Medium,
    High,
}

/// Input parameters for corona advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoronaInput {
    pub substrate: Substrate,
    pub coating: Coating,
    /// Defaults to aged/unknown when unspecified
    pub surface_condition: Option<SurfaceCondition>,
}

/// Corona treatment advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoronaAdvice {
    /// Target surface energy in dyne/cm, within [38, 46]
    pub target_dyne: u32,
    pub corona_recommended: bool,
    pub confidence: CoronaConfidence,
    /// Operating instructions, in order
    pub notes: Vec<String>,
    /// Risk callouts, in order (possibly empty)
    pub warnings: Vec<String>,
}

/// Advise on corona treatment.
pub fn advise(input: &CoronaInput) -> CoronaAdvice {
    let surface_condition = input.surface_condition.unwrap_or_default();
    let profile = input.substrate.corona_profile();
    let intent = input.coating.intent();

    let base_target = match profile {
        Some(p) if p.polymer_group == PolymerGroup::Pe => 43,
        _ => 41,
    };

    let mut adjustments = 0;
    if intent == CoronaIntent::Lamination {
        adjustments += 1;
    }
    if matches!(profile, Some(p) if p.surface_risk == SurfaceRisk::High) {
        adjustments += 1;
    }
    // The two condition adjustments are mutually exclusive.
    match surface_condition {
        SurfaceCondition::AgedUnknown => adjustments += 1,
        SurfaceCondition::ContaminationRisk => adjustments += 2,
        SurfaceCondition::FreshClean => {}
    }

    let target_dyne = (base_target + adjustments).clamp(MIN_TARGET_DYNE, MAX_TARGET_DYNE);

    let (corona_recommended, confidence) = match profile {
        Some(p) if p.pre_treated => {
            let recommended = surface_condition != SurfaceCondition::FreshClean
                || p.surface_risk == SurfaceRisk::High
                || intent == CoronaIntent::Lamination;
            let confidence = if surface_condition == SurfaceCondition::FreshClean
                && p.surface_risk == SurfaceRisk::Normal
                && intent == CoronaIntent::CoatingOverprint
            {
                CoronaConfidence::High
            } else {
                CoronaConfidence::Medium
            };
            (recommended, confidence)
        }
        // Not known to be pre-treated: always treat, and say so firmly.
        _ => (true, CoronaConfidence::High),
    };

    let mut notes = vec!["Measure surface energy with dyne pens before production.".to_string()];
    if corona_recommended {
        notes.push("Apply corona until dyne ≥ target; re-test across the web.".to_string());
    } else {
        notes.push("Corona likely not required, but verify dyne before running.".to_string());
    }

    let mut warnings = Vec::new();
    if intent == CoronaIntent::Lamination && target_dyne < 42 {
        warnings.push(
            "Lamination is sensitive; ensure dyne meets target to avoid bond failure.".to_string(),
        );
    }
    if matches!(profile, Some(p) if p.surface_risk == SurfaceRisk::High) {
        warnings.push(
            "High-risk surface (matte/metallized/soft-touch): adhesion may require higher dyne and careful testing."
                .to_string(),
        );
    }
    if surface_condition != SurfaceCondition::FreshClean {
        warnings.push(
            "Aged/handled material can lose treatment; verify dyne and consider corona refresh."
                .to_string(),
        );
    }

    CoronaAdvice {
        target_dyne,
        corona_recommended,
        confidence,
        notes,
        warnings,
    }
}
