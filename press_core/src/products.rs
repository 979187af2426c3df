//! # Label Products
//!
//! Product definitions for the label planner and the store that manages
//! them. A fixed set of built-in products is always present; operators can
//! add, edit, and delete their own custom records, which are the only ones
//! persisted (see [`crate::file_io`]).
//!
//! The store is an explicit object handed to the planner-invoking layer —
//! there is no process-wide singleton. Its merge contract: the product list
//! is built-ins ∪ persisted-custom records, and built-ins win identifier
//! collisions.
//!
//! ## Example
//!
//! ```rust
//! use press_core::products::{NewProduct, ProductStore};
//!
//! let mut store = ProductStore::with_builtins();
//! let id = store
//!     .add(NewProduct {
//!         label: "55×25 Promo".to_string(),
//!         max_lanes: 8.0,
//!         labels_per_click: 128.0,
//!         extra_clicks: 12.0,
//!     })
//!     .id
//!     .clone();
//! assert!(store.get(&id).unwrap().is_custom);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::{PlanError, PlanResult};

/// How the label planner computes clicks for a product.
///
/// This used to be an identifier comparison buried in the planner; it is an
/// explicit variant so both algorithms stay independently testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlanningMode {
    /// Pooled clicks: total labels across all lanes divided by the click
    /// yield, plus setup clicks, rounded up to the next 10.
    #[default]
    Standard,
    /// Each lane yields the full click count; clicks are sized to the single
    /// most demanding lane plus an extra-labels buffer.
    HighPrecisionSingleLane,
}

/// A label product: die layout and press yield parameters.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "p76x51",
///   "label": "76×51 Standard",
///   "maxLanes": 6.0,
///   "labelsPerClick": 102.0,
///   "extraClicks": 20.0,
///   "isCustom": false,
///   "planningMode": "Standard"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelProduct {
    /// Stable identifier. Built-in identifiers are reserved; custom records
    /// get fresh UUIDs.
    pub id: String,

    /// Display label (e.g., "76×51 Standard")
    pub label: String,

    /// Maximum total lanes a job on this product may use
    pub max_lanes: f64,

    /// Labels produced per press click across the full web
    pub labels_per_click: f64,

    /// Fixed setup-click allowance added to every job
    pub extra_clicks: f64,

    /// Operator-created record (persisted; editable; deletable)
    #[serde(default)]
    pub is_custom: bool,

    /// Click-count algorithm for this product
    #[serde(default)]
    pub planning_mode: PlanningMode,
}

/// Parameters for a new custom product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub label: String,
    pub max_lanes: f64,
    pub labels_per_click: f64,
    pub extra_clicks: f64,
}

/// Field updates for an existing custom product. `None` leaves the field
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductChanges {
    pub label: Option<String>,
    pub max_lanes: Option<f64>,
    pub labels_per_click: Option<f64>,
    pub extra_clicks: Option<f64>,
}

/// Reserved identifier of the built-in high-precision product.
pub const PENTA_PETIT_ID: &str = "p196x48";

static BUILTIN_PRODUCTS: Lazy<Vec<LabelProduct>> = Lazy::new(|| {
    vec![
        LabelProduct {
            id: "p76x51".to_string(),
            label: "76×51 Standard".to_string(),
            max_lanes: 6.0,
            labels_per_click: 102.0,
            extra_clicks: 20.0,
            is_custom: false,
            planning_mode: PlanningMode::Standard,
        },
        LabelProduct {
            id: "p102x76".to_string(),
            label: "102×76 Standard".to_string(),
            max_lanes: 4.0,
            labels_per_click: 72.0,
            extra_clicks: 15.0,
            is_custom: false,
            planning_mode: PlanningMode::Standard,
        },
        LabelProduct {
            id: "p148x105".to_string(),
            label: "148×105 Wide".to_string(),
            max_lanes: 3.0,
            labels_per_click: 48.0,
            extra_clicks: 10.0,
            is_custom: false,
            planning_mode: PlanningMode::Standard,
        },
        LabelProduct {
            id: PENTA_PETIT_ID.to_string(),
            label: "Penta-Petit 196×48".to_string(),
            max_lanes: 5.0,
            labels_per_click: 48.0,
            extra_clicks: 4.0,
            is_custom: false,
            planning_mode: PlanningMode::HighPrecisionSingleLane,
        },
    ]
});

/// The built-in product set. Always present, never persisted, immutable.
pub fn builtin_products() -> &'static [LabelProduct] {
    &BUILTIN_PRODUCTS
}

/// In-memory product list with the load/merge/save contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductStore {
    products: Vec<LabelProduct>,
}

impl ProductStore {
    /// Create a store holding only the built-in products.
    pub fn with_builtins() -> Self {
        ProductStore {
            products: builtin_products().to_vec(),
        }
    }

    /// All products, built-ins first, in insertion order.
    pub fn products(&self) -> &[LabelProduct] {
        &self.products
    }

    /// Look up a product by identifier.
    pub fn get(&self, id: &str) -> Option<&LabelProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    /// The persisted subset: custom records only.
    pub fn custom_products(&self) -> impl Iterator<Item = &LabelProduct> {
        self.products.iter().filter(|p| p.is_custom)
    }

    /// Add a new custom product with a fresh identifier.
    pub fn add(&mut self, new: NewProduct) -> &LabelProduct {
        self.products.push(LabelProduct {
            id: Uuid::new_v4().to_string(),
            label: new.label,
            max_lanes: new.max_lanes,
            labels_per_click: new.labels_per_click,
            extra_clicks: new.extra_clicks,
            is_custom: true,
            planning_mode: PlanningMode::Standard,
        });
        self.products.last().expect("just pushed")
    }

    /// Apply field changes to a custom product. Built-ins are immutable.
    pub fn update(&mut self, id: &str, changes: ProductChanges) -> PlanResult<()> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PlanError::product_not_found(id))?;
        if !product.is_custom {
            return Err(PlanError::immutable_product(id));
        }
        if let Some(label) = changes.label {
            product.label = label;
        }
        if let Some(max_lanes) = changes.max_lanes {
            product.max_lanes = max_lanes;
        }
        if let Some(labels_per_click) = changes.labels_per_click {
            product.labels_per_click = labels_per_click;
        }
        if let Some(extra_clicks) = changes.extra_clicks {
            product.extra_clicks = extra_clicks;
        }
        Ok(())
    }

    /// Delete a custom product. Built-ins cannot be removed.
    pub fn remove(&mut self, id: &str) -> PlanResult<LabelProduct> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PlanError::product_not_found(id))?;
        if !self.products[index].is_custom {
            return Err(PlanError::immutable_product(id));
        }
        Ok(self.products.remove(index))
    }

    /// Discard all custom products, returning to the built-in set.
    pub fn reset(&mut self) {
        self.products = builtin_products().to_vec();
    }

    /// Merge a persisted record list into the store.
    ///
    /// The resulting list is built-ins followed by the surviving persisted
    /// records. A persisted record whose identifier collides with a
    /// built-in's and is not marked custom is dropped — built-ins always win
    /// identity conflicts.
    pub fn merge_persisted(&mut self, persisted: Vec<LabelProduct>) {
        let mut products = builtin_products().to_vec();
        products.extend(
            persisted
                .into_iter()
                .filter(|p| p.is_custom || builtin_products().iter().all(|b| b.id != p.id)),
        );
        self.products = products;
    }

    /// Import products from a JSON payload.
    ///
    /// The payload must be a JSON array of objects each carrying string
    /// `id` and `label` and numeric `maxLanes`, `labelsPerClick`, and
    /// `extraClicks`; otherwise the whole import is rejected. Accepted
    /// records are assigned fresh identifiers and marked custom before
    /// merging. Returns the number of imported records.
    pub fn import_json(&mut self, json: &str) -> PlanResult<usize> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| PlanError::import_rejected(format!("invalid JSON: {e}")))?;
        let items = value
            .as_array()
            .ok_or_else(|| PlanError::import_rejected("top-level value is not an array"))?;

        let mut imported = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let record = parse_import_record(item)
                .ok_or_else(|| PlanError::import_rejected(format!("element {index} is not a valid product")))?;
            imported.push(record);
        }

        let count = imported.len();
        self.products.extend(imported);
        Ok(count)
    }

    /// Export the full current product list (built-in + custom) as
    /// pretty-printed JSON.
    pub fn export_json(&self) -> PlanResult<String> {
        serde_json::to_string_pretty(&self.products).map_err(|e| PlanError::SerializationError {
            reason: e.to_string(),
        })
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        ProductStore::with_builtins()
    }
}

/// Validate one import element and convert it to a fresh custom record.
fn parse_import_record(item: &Value) -> Option<LabelProduct> {
    let obj = item.as_object()?;
    obj.get("id")?.as_str()?;
    let label = obj.get("label")?.as_str()?;
    let max_lanes = obj.get("maxLanes")?.as_f64()?;
    let labels_per_click = obj.get("labelsPerClick")?.as_f64()?;
    let extra_clicks = obj.get("extraClicks")?.as_f64()?;
    Some(LabelProduct {
        id: Uuid::new_v4().to_string(),
        label: label.to_string(),
        max_lanes,
        labels_per_click,
        extra_clicks,
        is_custom: true,
        planning_mode: PlanningMode::Standard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_present() {
        let store = ProductStore::with_builtins();
        assert_eq!(store.products().len(), 4);
        assert!(store.get(PENTA_PETIT_ID).is_some());
        assert_eq!(
            store.get(PENTA_PETIT_ID).unwrap().planning_mode,
            PlanningMode::HighPrecisionSingleLane
        );
    }

    #[test]
    fn test_add_assigns_fresh_custom_id() {
        let mut store = ProductStore::with_builtins();
        let id = store
            .add(NewProduct {
                label: "Test".to_string(),
                max_lanes: 2.0,
                labels_per_click: 64.0,
                extra_clicks: 5.0,
            })
            .id
            .clone();
        let product = store.get(&id).unwrap();
        assert!(product.is_custom);
        assert_eq!(product.planning_mode, PlanningMode::Standard);
    }

    #[test]
    fn test_builtins_are_immutable() {
        let mut store = ProductStore::with_builtins();
        let err = store
            .update("p76x51", ProductChanges::default())
            .unwrap_err();
        assert_eq!(err.error_code(), "IMMUTABLE_PRODUCT");

        let err = store.remove("p76x51").unwrap_err();
        assert_eq!(err.error_code(), "IMMUTABLE_PRODUCT");
    }

    #[test]
    fn test_update_and_remove_custom() {
        let mut store = ProductStore::with_builtins();
        let id = store
            .add(NewProduct {
                label: "Old".to_string(),
                max_lanes: 2.0,
                labels_per_click: 64.0,
                extra_clicks: 5.0,
            })
            .id
            .clone();

        store
            .update(
                &id,
                ProductChanges {
                    label: Some("New".to_string()),
                    labels_per_click: Some(80.0),
                    ..Default::default()
                },
            )
            .unwrap();
        let product = store.get(&id).unwrap();
        assert_eq!(product.label, "New");
        assert_eq!(product.labels_per_click, 80.0);
        assert_eq!(product.max_lanes, 2.0);

        store.remove(&id).unwrap();
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn test_merge_drops_builtin_collisions() {
        let mut store = ProductStore::with_builtins();
        let stale_builtin = LabelProduct {
            // Same identifier as a built-in, not marked custom: an old
            // persisted copy of a built-in. Dropped on merge.
            id: "p76x51".to_string(),
            label: "Stale copy".to_string(),
            max_lanes: 1.0,
            labels_per_click: 1.0,
            extra_clicks: 0.0,
            is_custom: false,
            planning_mode: PlanningMode::Standard,
        };
        let custom = LabelProduct {
            id: "custom-1".to_string(),
            label: "Mine".to_string(),
            max_lanes: 2.0,
            labels_per_click: 64.0,
            extra_clicks: 5.0,
            is_custom: true,
            planning_mode: PlanningMode::Standard,
        };
        store.merge_persisted(vec![stale_builtin, custom]);

        assert_eq!(store.get("p76x51").unwrap().label, "76×51 Standard");
        assert_eq!(store.get("custom-1").unwrap().label, "Mine");
        assert_eq!(store.products().len(), 5);
    }

    #[test]
    fn test_import_valid_payload() {
        let mut store = ProductStore::with_builtins();
        let json = r#"[
            {"id": "x", "label": "Imported", "maxLanes": 4, "labelsPerClick": 96, "extraClicks": 8}
        ]"#;
        let count = store.import_json(json).unwrap();
        assert_eq!(count, 1);

        let imported = store.products().last().unwrap();
        assert!(imported.is_custom);
        assert_ne!(imported.id, "x"); // fresh identifier assigned
        assert_eq!(imported.label, "Imported");
    }

    #[test]
    fn test_import_rejects_non_array() {
        let mut store = ProductStore::with_builtins();
        let err = store.import_json(r#"{"id": "x"}"#).unwrap_err();
        assert_eq!(err.error_code(), "IMPORT_REJECTED");
        assert_eq!(store.products().len(), 4);
    }

    #[test]
    fn test_import_rejects_invalid_element() {
        let mut store = ProductStore::with_builtins();
        // maxLanes is a string -> whole import rejected, nothing merged.
        let json = r#"[
            {"id": "a", "label": "Good", "maxLanes": 4, "labelsPerClick": 96, "extraClicks": 8},
            {"id": "b", "label": "Bad", "maxLanes": "4", "labelsPerClick": 96, "extraClicks": 8}
        ]"#;
        let err = store.import_json(json).unwrap_err();
        assert_eq!(err.error_code(), "IMPORT_REJECTED");
        assert_eq!(store.products().len(), 4);
    }

    #[test]
    fn test_export_includes_builtins() {
        let store = ProductStore::with_builtins();
        let json = store.export_json().unwrap();
        let parsed: Vec<LabelProduct> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 4);
        assert!(json.contains("labelsPerClick"));
    }

    #[test]
    fn test_wire_format_defaults() {
        // Records persisted before planningMode existed still load.
        let json = r#"{"id": "legacy", "label": "Legacy", "maxLanes": 2,
                       "labelsPerClick": 64, "extraClicks": 5, "isCustom": true}"#;
        let product: LabelProduct = serde_json::from_str(json).unwrap();
        assert_eq!(product.planning_mode, PlanningMode::Standard);
        assert!(product.is_custom);
    }
}
