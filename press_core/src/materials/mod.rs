//! # Materials
//!
//! Closed enumerations of the substrates and coatings the shop runs on the
//! DC330 Mini, together with their calibration data: base UV reference
//! energies, coating energy modifiers, thermal gradient caps, and corona
//! treatment profiles.
//!
//! Both enums carry an explicit `Unknown` variant. Operators explore
//! hypothetical combinations, so unrecognized keys degrade to a documented
//! zero-contribution default instead of failing — `Unknown` makes that
//! fallback a first-class, exhaustively checked case.

pub mod coating;
pub mod substrate;

pub use coating::{Coating, CoronaIntent, ProcessType, RecipeCoating};
pub use substrate::{CoronaProfile, PolymerGroup, Substrate, SurfaceRisk};
