//! # Production Calculations
//!
//! This module contains the print-shop calculators. Each calculator follows
//! the pattern:
//!
//! - `*Input` / input record - job parameters (JSON-serializable)
//! - `*Plan` / `*Result` - derived production figures (JSON-serializable)
//! - one pure entry point - no I/O, no internal state
//!
//! Planner-style calculators (`label`, `flowpack`, `jar`) return `Option`:
//! an absent result means "insufficient input", never a fault. The roll
//! length calculator returns `PlanResult` carrying a human-readable input
//! error instead; the UV and corona calculators always return a result and
//! attach advisory warnings.
//!
//! ## Available Calculations
//!
//! - [`label`] - Label job click counts and per-lane production/waste
//! - [`flowpack`] - Flowpack click/length planning from calibration tables
//! - [`jar`] - Candy jar weight/click/length planning
//! - [`roll_length`] - Spooled material length from roll geometry
//! - [`uv_energy`] - DC330 UV target energy with heat-limit safety
//! - [`uv_recipe`] - UV curing recipe with operator overrides
//! - [`corona`] - Corona treatment advice

pub mod corona;
pub mod flowpack;
pub mod jar;
pub mod label;
pub mod roll_length;
pub mod uv_energy;
pub mod uv_recipe;

pub use corona::{CoronaAdvice, CoronaInput, SurfaceCondition};
pub use flowpack::{FlowpackDesign, FlowpackMode, FlowpackPlan};
pub use jar::{JarPlan, JarProductType};
pub use label::{LabelDesign, LabelPlan, LabelResultRow};
pub use roll_length::{RollLengthInput, RollLengthResult};
pub use uv_energy::{UvEnergyInput, UvEnergyResult};
pub use uv_recipe::{UvRecipeInput, UvRecipeResult};
