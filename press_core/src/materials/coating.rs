//! Coating definitions: UV energy modifiers, process classification, and
//! corona treatment intent.
//!
//! Two coating vocabularies exist side by side. [`Coating`] is the DC330
//! energy calculator's list (specific varnish/adhesive recipes with additive
//! W modifiers); [`RecipeCoating`] is the coarser list the curing-recipe
//! calculator uses (gradient/min-UV adders). They share nothing but the
//! concept, so they stay separate types.

use serde::{Deserialize, Serialize};

/// Curing process class derived from the coating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProcessType {
    Varnish,
    Lamination,
}

/// Treatment intent a coating implies for corona advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoronaIntent {
    #[serde(rename = "Coating/Overprint")]
    CoatingOverprint,
    #[serde(rename = "Lamination")]
    Lamination,
}

/// Coatings known to the DC330 energy calculator.
///
/// Serialized names are the recipe display strings. Anything else
/// deserializes to [`Coating::Unknown`], which contributes 0 W and is
/// classified as lamination (the conservative process class — only the one
/// varnish entry cures as varnish).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Coating {
    UvVarnishStandardGloss,
    UvLaminatingAdhesiveStandard,
    UvLaminatingAdhesiveHeavyPremium,
    /// Any coating not in the recipe list. Contributes 0 W.
    Unknown,
}

impl From<String> for Coating {
    fn from(s: String) -> Self {
        Coating::parse(&s)
    }
}

impl From<Coating> for String {
    fn from(coating: Coating) -> Self {
        coating.display_name().to_string()
    }
}

impl Coating {
    /// All known coatings, for UI selection. Excludes `Unknown`.
    pub const ALL: [Coating; 3] = [
        Coating::UvVarnishStandardGloss,
        Coating::UvLaminatingAdhesiveStandard,
        Coating::UvLaminatingAdhesiveHeavyPremium,
    ];

    /// Get display name (the recipe string)
    pub fn display_name(&self) -> &'static str {
        match self {
            Coating::UvVarnishStandardGloss => "UV Varnish – Standard Gloss",
            Coating::UvLaminatingAdhesiveStandard => "UV Laminating Adhesive – Standard",
            Coating::UvLaminatingAdhesiveHeavyPremium => "UV Laminating Adhesive – Heavy / Premium",
            Coating::Unknown => "Unknown",
        }
    }

    /// Parse from a recipe display string. Unrecognized names map to
    /// `Unknown` rather than failing.
    pub fn parse(s: &str) -> Self {
        Coating::ALL
            .into_iter()
            .find(|c| c.display_name() == s)
            .unwrap_or(Coating::Unknown)
    }

    /// Additive energy modifier (W) at the 20 m/min reference speed.
    pub fn modifier_w(&self) -> f64 {
        match self {
            Coating::UvVarnishStandardGloss => 300.0,
            Coating::UvLaminatingAdhesiveStandard => 700.0,
            Coating::UvLaminatingAdhesiveHeavyPremium => 900.0,
            Coating::Unknown => 0.0,
        }
    }

    /// Process class this coating cures as. Only the standard gloss varnish
    /// counts as varnish; every other coating (including unknown ones) is
    /// lamination.
    pub fn process_type(&self) -> ProcessType {
        match self {
            Coating::UvVarnishStandardGloss => ProcessType::Varnish,
            _ => ProcessType::Lamination,
        }
    }

    /// Treatment intent for corona advice. Unknown coatings default to
    /// coating/overprint.
    pub fn intent(&self) -> CoronaIntent {
        match self {
            Coating::UvLaminatingAdhesiveStandard | Coating::UvLaminatingAdhesiveHeavyPremium => {
                CoronaIntent::Lamination
            }
            Coating::UvVarnishStandardGloss | Coating::Unknown => CoronaIntent::CoatingOverprint,
        }
    }
}

impl std::fmt::Display for Coating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Coatings known to the curing-recipe calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecipeCoating {
    UvVarnish,
    UvLaminationAdhesive,
    ColdFoilAdhesive,
    /// Any coating outside the recipe list; triggers the fallback recipe.
    Unknown,
}

impl From<String> for RecipeCoating {
    fn from(s: String) -> Self {
        RecipeCoating::parse(&s)
    }
}

impl From<RecipeCoating> for String {
    fn from(coating: RecipeCoating) -> Self {
        coating.display_name().to_string()
    }
}

impl RecipeCoating {
    /// All known recipe coatings, for UI selection. Excludes `Unknown`.
    pub const ALL: [RecipeCoating; 3] = [
        RecipeCoating::UvVarnish,
        RecipeCoating::UvLaminationAdhesive,
        RecipeCoating::ColdFoilAdhesive,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RecipeCoating::UvVarnish => "UV Varnish",
            RecipeCoating::UvLaminationAdhesive => "UV Lamination Adhesive",
            RecipeCoating::ColdFoilAdhesive => "Cold-foil Adhesive",
            RecipeCoating::Unknown => "Unknown",
        }
    }

    /// Parse from a display string. Unrecognized names map to `Unknown`
    /// rather than failing.
    pub fn parse(s: &str) -> Self {
        RecipeCoating::ALL
            .into_iter()
            .find(|c| c.display_name() == s)
            .unwrap_or(RecipeCoating::Unknown)
    }

    /// Additive gradient adjustment on top of the substrate baseline.
    pub fn gradient_add(&self) -> f64 {
        match self {
            RecipeCoating::UvVarnish => 0.0,
            RecipeCoating::UvLaminationAdhesive => 30.0,
            RecipeCoating::ColdFoilAdhesive => 40.0,
            RecipeCoating::Unknown => 0.0,
        }
    }

    /// Additive minimum-UV adjustment (W) on top of the substrate baseline.
    pub fn min_uv_add(&self) -> f64 {
        match self {
            RecipeCoating::UvVarnish => 0.0,
            RecipeCoating::UvLaminationAdhesive => 150.0,
            RecipeCoating::ColdFoilAdhesive => 200.0,
            RecipeCoating::Unknown => 0.0,
        }
    }

    /// Tag prefixed to the recipe notes, or `None` for unknown coatings.
    pub fn note_tag(&self) -> Option<&'static str> {
        match self {
            RecipeCoating::UvVarnish => Some("Varnish"),
            RecipeCoating::UvLaminationAdhesive => Some("Adhesive (lamination)"),
            RecipeCoating::ColdFoilAdhesive => Some("Adhesive (cold-foil)"),
            RecipeCoating::Unknown => None,
        }
    }
}

impl std::fmt::Display for RecipeCoating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
