//! # Flowpack Print Planner
//!
//! Click/length planning for flowpack candy wrappers. The wrapping line has
//! 3 lanes total (machine-wide, not per product), and the shop's planning
//! table was calibrated in two regimes:
//!
//! - **Same design on all 3 lanes**: one design occupies the whole web; the
//!   table is read directly at that design's kilograms.
//! - **One design per lane** (mix): the table is read at total kilograms ÷ 3,
//!   i.e. on a per-lane-equivalent basis.
//!
//! Interpolated values then pass through a finalize stage: a partial click
//! is still a click, so clicks round up first, and the diecut stop is
//! re-derived from the *rounded* click count before snapping to 5 m. The
//! order matters; reversing it changes results.

use serde::{Deserialize, Serialize};

use crate::lanes;
use crate::rounding::round_to_nearest_5;
use crate::table::CalibrationCurve;

/// Total lanes on the flowpack line.
pub const MAX_LANES_TOTAL: f64 = 3.0;

/// Calibrated kg breakpoints shared by both planning tables.
pub const KG_POINTS: &[f64] = &[
    5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 75.0, 100.0,
];

/// "One design per lane" (mix) calibration.
pub const MIX_CURVE: CalibrationCurve = CalibrationCurve {
    breakpoints: KG_POINTS,
    clicks: &[
        90.0, 165.0, 235.0, 315.0, 385.0, 455.0, 530.0, 605.0, 671.0, 830.0, 1125.0, 1495.0,
    ],
    meters: &[
        80.0, 150.0, 220.0, 295.0, 360.0, 435.0, 505.0, 580.0, 645.0, 795.0, 1090.0, 1440.0,
    ],
};

/// "Same design on all 3 lanes" calibration.
pub const SAME_DESIGN_CURVE: CalibrationCurve = CalibrationCurve {
    breakpoints: KG_POINTS,
    clicks: &[
        35.0, 60.0, 85.0, 110.0, 135.0, 155.0, 180.0, 205.0, 230.0, 280.0, 380.0, 500.0,
    ],
    meters: &[
        25.0, 45.0, 70.0, 95.0, 115.0, 140.0, 165.0, 190.0, 210.0, 260.0, 360.0, 475.0,
    ],
};

/// One flowpack design row, as entered by the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowpackDesign {
    pub name: String,
    /// Kilograms of candy to wrap in this design
    pub kg: f64,
    /// Requested lane count (clamped against the 3-lane budget)
    pub lanes: f64,
}

/// Which calibration regime the job matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowpackMode {
    /// Exactly one active design occupying all 3 lanes
    SameDesignAllLanes,
    /// Any other active configuration; table read at total kg ÷ 3
    OnePerLane,
}

/// Planning result for a flowpack job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowpackPlan {
    pub mode: FlowpackMode,
    /// The kg value the calibration table was read at
    pub kg_for_table: f64,
    /// Whole clicks to run (partial clicks round up)
    pub clicks: u64,
    /// Diecut stop in meters, snapped to a multiple of 5
    pub meters: f64,
    /// Sum of active designs' kilograms
    pub total_kg: f64,
    /// Sum of active designs' effective lane counts
    pub used_lanes: f64,
    /// Whether any row's lane request was cut down by the lane budget
    pub lanes_clamped: bool,
}

/// Finalize an interpolated `(clicks, meters)` pair.
///
/// Non-finite or non-positive input yields `(0, 0)`. Otherwise clicks are
/// rounded up to a whole click first, then meters are re-derived from the
/// rounded click count at the original meters-per-click ratio and snapped
/// to the nearest 5 m.
pub fn finalize(clicks: f64, meters: f64) -> (u64, f64) {
    if !clicks.is_finite() || clicks <= 0.0 || !meters.is_finite() || meters <= 0.0 {
        return (0, 0.0);
    }
    let whole_clicks = clicks.ceil();
    let meters_per_click = meters / clicks;
    let final_meters = round_to_nearest_5(whole_clicks * meters_per_click);
    (whole_clicks as u64, final_meters)
}

/// Plan a flowpack job.
///
/// A design is active only if both its kilograms and its effective lane
/// count are positive. Returns `None` when no design is active.
pub fn plan(designs: &[FlowpackDesign]) -> Option<FlowpackPlan> {
    let requests: Vec<f64> = designs.iter().map(|d| d.lanes).collect();
    let (effective, lanes_clamped) = lanes::allocate_sequence(&requests, MAX_LANES_TOTAL);

    let active: Vec<(&FlowpackDesign, f64)> = designs
        .iter()
        .zip(effective.iter().copied())
        .filter(|(d, eff)| d.kg > 0.0 && *eff > 0.0)
        .collect();
    if active.is_empty() {
        return None;
    }

    let total_kg: f64 = active.iter().map(|(d, _)| d.kg).sum();
    let used_lanes: f64 = active.iter().map(|(_, eff)| eff).sum();

    let (mode, kg_for_table, base) =
        if active.len() == 1 && active[0].1 == MAX_LANES_TOTAL {
            let kg = active[0].0.kg;
            (FlowpackMode::SameDesignAllLanes, kg, SAME_DESIGN_CURVE.sample(kg))
        } else {
            let kg = total_kg / MAX_LANES_TOTAL;
            (FlowpackMode::OnePerLane, kg, MIX_CURVE.sample(kg))
        };

    let (clicks, meters) = finalize(base.0, base.1);

    Some(FlowpackPlan {
        mode,
        kg_for_table,
        clicks,
        meters,
        total_kg,
        used_lanes,
        lanes_clamped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn design(name: &str, kg: f64, lanes: f64) -> FlowpackDesign {
        FlowpackDesign {
            name: name.to_string(),
            kg,
            lanes,
        }
    }

    #[test]
    fn test_same_design_mode_reads_table_directly() {
        let plan = plan(&[design("Design 1", 20.0, 3.0)]).unwrap();
        assert_eq!(plan.mode, FlowpackMode::SameDesignAllLanes);
        assert_eq!(plan.kg_for_table, 20.0);
        // Table point: 110 clicks / 95 m; already whole, so finalize only
        // re-snaps meters (95 is already a multiple of 5).
        assert_eq!(plan.clicks, 110);
        assert_eq!(plan.meters, 95.0);
    }

    #[test]
    fn test_mix_mode_reads_per_lane_equivalent() {
        let plan = plan(&[
            design("Design 1", 20.0, 1.0),
            design("Design 2", 20.0, 1.0),
            design("Design 3", 20.0, 1.0),
        ])
        .unwrap();
        assert_eq!(plan.mode, FlowpackMode::OnePerLane);
        assert_eq!(plan.kg_for_table, 20.0);
        assert_eq!(plan.total_kg, 60.0);
        // Mix table point at 20 kg: 315 clicks / 295 m.
        assert_eq!(plan.clicks, 315);
        assert_eq!(plan.meters, 295.0);
    }

    #[test]
    fn test_single_design_on_fewer_lanes_is_mix_mode() {
        // One active design but only 2 lanes -> not the same-design regime.
        let plan = plan(&[design("Design 1", 30.0, 2.0)]).unwrap();
        assert_eq!(plan.mode, FlowpackMode::OnePerLane);
        assert_eq!(plan.kg_for_table, 10.0);
    }

    #[test]
    fn test_finalize_rounds_clicks_up_then_rederives_meters() {
        // 12.3 clicks -> 13; meters re-derived at 10/12.3 per click:
        // 13 * 0.813 = 10.569 -> nearest 5 -> 10.
        let (clicks, meters) = finalize(12.3, 10.0);
        assert_eq!(clicks, 13);
        assert_eq!(meters, 10.0);

        // Larger run: 101.4 clicks / 97 m -> 102 clicks, 102 * (97/101.4)
        // = 97.57 -> 100.
        let (clicks, meters) = finalize(101.4, 97.0);
        assert_eq!(clicks, 102);
        assert_eq!(meters, 100.0);
    }

    #[test]
    fn test_finalize_monotonicity() {
        // Clicks always land on a whole count >= the input; meters always
        // land on a multiple of 5.
        for &(c, m) in &[(0.1, 0.2), (35.0, 25.0), (87.5, 71.2), (1494.9, 1439.7)] {
            let (clicks, meters) = finalize(c, m);
            assert!(clicks as f64 >= c);
            assert_eq!(meters % 5.0, 0.0);
        }
    }

    #[test]
    fn test_finalize_guards() {
        assert_eq!(finalize(0.0, 10.0), (0, 0.0));
        assert_eq!(finalize(10.0, 0.0), (0, 0.0));
        assert_eq!(finalize(f64::NAN, 10.0), (0, 0.0));
        assert_eq!(finalize(10.0, f64::INFINITY), (0, 0.0));
    }

    #[test]
    fn test_interpolated_kg_runs_through_finalize() {
        // 22.5 kg on all 3 lanes: halfway between the 20 and 25 points of
        // the same-design table -> 122.5 clicks / 105 m, finalized to 123
        // clicks and 105 m (123 * (105/122.5) = 105.43 -> 105).
        let plan = plan(&[design("Design 1", 22.5, 3.0)]).unwrap();
        assert_eq!(plan.clicks, 123);
        assert_eq!(plan.meters, 105.0);
    }

    #[test]
    fn test_lane_clamping() {
        let plan = plan(&[design("Design 1", 10.0, 2.0), design("Design 2", 10.0, 2.0)]).unwrap();
        assert!(plan.lanes_clamped);
        assert_eq!(plan.used_lanes, 3.0);
        assert_eq!(plan.mode, FlowpackMode::OnePerLane);
    }

    #[test]
    fn test_no_active_designs_yields_none() {
        assert!(plan(&[design("Design 1", 0.0, 3.0)]).is_none());
        assert!(plan(&[design("Design 1", 10.0, 0.0)]).is_none());
        assert!(plan(&[]).is_none());
    }
}
