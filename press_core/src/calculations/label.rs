//! # Label Print Planner
//!
//! Computes press click counts and per-lane production/waste for a label
//! job. The operator picks a product, enters one row per design (total
//! labels wanted and how many lanes to give it), and the planner distributes
//! lanes and quantities.
//!
//! Two click algorithms exist, selected by the product's
//! [`PlanningMode`](crate::products::PlanningMode):
//!
//! - **Standard**: the job's total labels are pooled across all active
//!   lanes. Clicks = total / labels-per-click + setup clicks, rounded up to
//!   the next 10. Each lane yields `labels_per_click / total_lanes` per
//!   click.
//! - **High-precision single-lane** (Penta-Petit): every lane yields the
//!   full `labels_per_click` per click, so clicks are sized to the single
//!   most demanding lane plus an extra-labels buffer
//!   (`labels_per_click × extra_clicks` added to that lane, not to all).
//!
//! Waste is `produced − required` per lane and may come out negative when
//! designs are distributed unevenly; that is an accepted display artifact,
//! not an error.

use serde::{Deserialize, Serialize};

use crate::lanes::{self, LaneEntry};
use crate::products::{LabelProduct, PlanningMode};
use crate::rounding::round_up_to_next_10;

/// One design row of a label job, as entered by the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDesign {
    pub name: String,
    /// Total labels wanted for this design, across all its lanes
    pub total_labels: f64,
    /// Requested lane count (clamped against the product's lane budget)
    pub lanes: f64,
}

/// One result row: a single lane of a single design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelResultRow {
    /// 1-based lane index within the design
    pub lane: u32,
    pub design_name: String,
    /// Labels this lane must yield
    pub required: f64,
    /// Labels this lane yields per click (fractional under Standard mode)
    pub labels_per_click: f64,
    /// Job-wide click count (same on every row)
    pub total_clicks: u64,
    /// Labels this lane will actually produce
    pub produced: f64,
    /// produced − required; may be negative
    pub waste: f64,
}

/// Planning result for a label job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPlan {
    /// Algorithm the product selected
    pub mode: PlanningMode,
    /// Clicks to print for the whole job
    pub total_clicks: u64,
    /// One row per active lane, in design order
    pub rows: Vec<LabelResultRow>,
    /// Sum of active designs' label quantities
    pub total_job_labels: f64,
    /// Sum of active designs' effective lane counts
    pub total_lanes: f64,
    /// Standard mode: clicks before rounding (incl. setup allowance)
    pub raw_clicks: f64,
    /// High-precision mode: the largest per-lane requirement
    pub max_required: f64,
    /// High-precision mode: the extra-labels buffer added to that lane
    pub extra_labels: f64,
    /// Whether any row's lane request was cut down by the lane budget
    pub lanes_clamped: bool,
}

/// Plan a label job.
///
/// Lane requests are clamped in row order against the product's lane
/// budget. A design is active only if both its label quantity and its
/// effective lane count are positive; inactive rows are excluded from the
/// totals and produce no result rows.
///
/// Returns `None` when there is nothing to plan: no active lane entries, or
/// a product with a non-positive click yield. (An absent product selection
/// is the caller's concern — there is no product to pass here.)
pub fn plan(product: &LabelProduct, designs: &[LabelDesign]) -> Option<LabelPlan> {
    if product.labels_per_click <= 0.0 {
        return None;
    }

    let requests: Vec<f64> = designs.iter().map(|d| d.lanes).collect();
    let (effective, lanes_clamped) = lanes::allocate_sequence(&requests, product.max_lanes);

    let active: Vec<(&LabelDesign, f64)> = designs
        .iter()
        .zip(effective.iter().copied())
        .filter(|(d, eff)| d.total_labels > 0.0 && *eff > 0.0)
        .collect();

    let entries: Vec<LaneEntry> = active
        .iter()
        .flat_map(|(d, eff)| lanes::distribute(&d.name, d.total_labels, *eff))
        .collect();
    if entries.is_empty() {
        return None;
    }

    let total_job_labels: f64 = active.iter().map(|(d, _)| d.total_labels).sum();
    let total_lanes: f64 = active.iter().map(|(_, eff)| eff).sum();

    let labels_per_click = product.labels_per_click;
    let extra_clicks = product.extra_clicks;

    let mut raw_clicks = 0.0;
    let mut max_required = 0.0;
    let mut extra_labels = 0.0;

    let clicks = match product.planning_mode {
        PlanningMode::HighPrecisionSingleLane => {
            // Buffer goes on top of the most demanding lane, not the sum.
            extra_labels = labels_per_click * extra_clicks;
            max_required = entries.iter().map(|e| e.required).fold(0.0, f64::max);
            ((max_required + extra_labels) / labels_per_click).ceil()
        }
        PlanningMode::Standard => {
            raw_clicks = total_job_labels / labels_per_click + extra_clicks;
            round_up_to_next_10(raw_clicks)
        }
    };
    let total_clicks = clicks as u64;

    let rows = entries
        .into_iter()
        .map(|entry| {
            let (per_lane_yield, produced) = match product.planning_mode {
                PlanningMode::HighPrecisionSingleLane => {
                    (labels_per_click, total_clicks as f64 * labels_per_click)
                }
                PlanningMode::Standard => {
                    let per_lane_yield = labels_per_click / total_lanes;
                    let produced = (total_clicks as f64 * per_lane_yield).round();
                    (per_lane_yield, produced)
                }
            };
            LabelResultRow {
                lane: entry.lane_index,
                design_name: entry.design_name,
                required: entry.required,
                labels_per_click: per_lane_yield,
                total_clicks,
                produced,
                waste: produced - entry.required,
            }
        })
        .collect();

    Some(LabelPlan {
        mode: product.planning_mode,
        total_clicks,
        rows,
        total_job_labels,
        total_lanes,
        raw_clicks,
        max_required,
        extra_labels,
        lanes_clamped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_product() -> LabelProduct {
        LabelProduct {
            id: "p76x51".to_string(),
            label: "76×51 Standard".to_string(),
            max_lanes: 6.0,
            labels_per_click: 102.0,
            extra_clicks: 20.0,
            is_custom: false,
            planning_mode: PlanningMode::Standard,
        }
    }

    fn penta_product() -> LabelProduct {
        LabelProduct {
            id: "p196x48".to_string(),
            label: "Penta-Petit 196×48".to_string(),
            max_lanes: 5.0,
            labels_per_click: 48.0,
            extra_clicks: 4.0,
            is_custom: false,
            planning_mode: PlanningMode::HighPrecisionSingleLane,
        }
    }

    fn design(name: &str, total_labels: f64, lanes: f64) -> LabelDesign {
        LabelDesign {
            name: name.to_string(),
            total_labels,
            lanes,
        }
    }

    #[test]
    fn test_standard_plan() {
        let plan = plan(
            &standard_product(),
            &[design("Design 1", 10000.0, 2.0), design("Design 2", 5000.0, 1.0)],
        )
        .unwrap();

        assert_eq!(plan.total_job_labels, 15000.0);
        assert_eq!(plan.total_lanes, 3.0);
        // 15000 / 102 + 20 = 167.06 -> next 10 -> 170
        assert!((plan.raw_clicks - 167.0588).abs() < 0.001);
        assert_eq!(plan.total_clicks, 170);
        assert!(!plan.lanes_clamped);

        assert_eq!(plan.rows.len(), 3);
        let row = &plan.rows[0];
        assert_eq!(row.required, 5000.0);
        assert_eq!(row.labels_per_click, 34.0);
        assert_eq!(row.produced, 5780.0);
        assert_eq!(row.waste, 780.0);
    }

    #[test]
    fn test_high_precision_plan() {
        let plan = plan(
            &penta_product(),
            &[design("Design 1", 10000.0, 2.0), design("Design 2", 3000.0, 1.0)],
        )
        .unwrap();

        // Buffer = 48 * 4 = 192 on the busiest lane (5000), so
        // clicks = ceil(5192 / 48) = 109 -- no next-10 rounding.
        assert_eq!(plan.extra_labels, 192.0);
        assert_eq!(plan.max_required, 5000.0);
        assert_eq!(plan.total_clicks, 109);

        // Every lane yields the full click count.
        for row in &plan.rows {
            assert_eq!(row.labels_per_click, 48.0);
            assert_eq!(row.produced, 109.0 * 48.0);
        }
        assert_eq!(plan.rows[2].required, 3000.0);
        assert_eq!(plan.rows[2].waste, 5232.0 - 3000.0);
    }

    #[test]
    fn test_mode_split_changes_click_formula() {
        // Identical job, identical yields; only the planning mode differs.
        let mut standard = standard_product();
        standard.labels_per_click = 100.0;
        standard.extra_clicks = 2.0;
        let mut precise = penta_product();
        precise.labels_per_click = 100.0;
        precise.extra_clicks = 2.0;
        precise.max_lanes = 6.0;

        let designs = [design("Design 1", 4000.0, 2.0)];
        let a = plan(&standard, &designs).unwrap();
        let b = plan(&precise, &designs).unwrap();

        // Standard: 4000/100 + 2 = 42 -> 50. High-precision:
        // ceil((2000 + 200) / 100) = 22.
        assert_eq!(a.total_clicks, 50);
        assert_eq!(b.total_clicks, 22);
    }

    #[test]
    fn test_negative_waste_is_reproduced() {
        // Uneven designs: the pooled per-lane yield underfeeds the heavy
        // design's lanes. Produced < required is reported as-is.
        let mut product = standard_product();
        product.labels_per_click = 10.0;
        product.extra_clicks = 0.0;

        let plan = plan(
            &product,
            &[design("Heavy", 10000.0, 2.0), design("Light", 100.0, 1.0)],
        )
        .unwrap();

        // raw = 10100 / 10 = 1010 -> clicks 1010; yield 10/3 per lane;
        // produced = round(1010 * 3.333) = 3367 < 5000 required.
        assert_eq!(plan.total_clicks, 1010);
        let heavy = &plan.rows[0];
        assert_eq!(heavy.required, 5000.0);
        assert_eq!(heavy.produced, 3367.0);
        assert!(heavy.waste < 0.0);
    }

    #[test]
    fn test_inactive_rows_are_excluded() {
        let plan = plan(
            &standard_product(),
            &[
                design("Active", 5000.0, 2.0),
                design("No labels", 0.0, 2.0),
                design("No lanes", 4000.0, 0.0),
            ],
        )
        .unwrap();

        assert_eq!(plan.total_job_labels, 5000.0);
        assert_eq!(plan.total_lanes, 2.0);
        assert_eq!(plan.rows.len(), 2);
    }

    #[test]
    fn test_lane_budget_is_clamped_in_row_order() {
        let plan = plan(
            &standard_product(),
            &[design("First", 6000.0, 4.0), design("Second", 6000.0, 4.0)],
        )
        .unwrap();

        assert!(plan.lanes_clamped);
        // First row gets its 4 lanes; the second is cut to the remaining 2.
        assert_eq!(plan.total_lanes, 6.0);
        assert_eq!(plan.rows.iter().filter(|r| r.design_name == "First").count(), 4);
        assert_eq!(plan.rows.iter().filter(|r| r.design_name == "Second").count(), 2);
        // Second design's 6000 labels are spread over its 2 effective lanes.
        let second = plan.rows.iter().find(|r| r.design_name == "Second").unwrap();
        assert_eq!(second.required, 3000.0);
    }

    #[test]
    fn test_no_active_designs_yields_none() {
        assert!(plan(&standard_product(), &[design("Empty", 0.0, 0.0)]).is_none());
        assert!(plan(&standard_product(), &[]).is_none());
    }

    #[test]
    fn test_zero_yield_product_yields_none() {
        let mut product = standard_product();
        product.labels_per_click = 0.0;
        assert!(plan(&product, &[design("Design 1", 1000.0, 1.0)]).is_none());
    }
}
