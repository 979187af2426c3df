//! Substrate definitions and calibration data.
//!
//! Each substrate carries a base UV reference energy (W at the 20 m/min
//! reference speed), a thermal-gradient behavior, and a corona treatment
//! profile. Values were calibrated on the DC330 Mini and refined after lamp
//! and speed trials.

use serde::{Deserialize, Serialize};

use super::coating::ProcessType;

/// Film substrates run on the press.
///
/// Serialized names are the stock-list display strings so persisted jobs and
/// UI payloads round-trip unchanged. Anything else deserializes to
/// [`Substrate::Unknown`], which contributes 0 W to every energy lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Substrate {
    CaPpUcoWhite,
    CaPpUcoClear,
    PpSilverFtc50,
    PpBlueGray,
    ForestPeWhiteFtc85,
    ForestPeClearFtc85,
    SynBoppWhite20,
    SynBoppMetallic20,
    SynBoppClear20,
    SynBoppMatPeach20,
    SynBoppMat20,
    /// Any substrate not in the stock list. Contributes 0 W and has no
    /// corona profile (treated as not pre-treated).
    Unknown,
}

impl From<String> for Substrate {
    fn from(s: String) -> Self {
        Substrate::parse(&s)
    }
}

impl From<Substrate> for String {
    fn from(substrate: Substrate) -> Self {
        substrate.display_name().to_string()
    }
}

impl Substrate {
    /// All stocked substrates, for UI selection. Excludes `Unknown`.
    pub const ALL: [Substrate; 11] = [
        Substrate::CaPpUcoWhite,
        Substrate::CaPpUcoClear,
        Substrate::PpSilverFtc50,
        Substrate::PpBlueGray,
        Substrate::ForestPeWhiteFtc85,
        Substrate::ForestPeClearFtc85,
        Substrate::SynBoppWhite20,
        Substrate::SynBoppMetallic20,
        Substrate::SynBoppClear20,
        Substrate::SynBoppMatPeach20,
        Substrate::SynBoppMat20,
    ];

    /// Get display name (the stock-list string)
    pub fn display_name(&self) -> &'static str {
        match self {
            Substrate::CaPpUcoWhite => "CA PP UCO White",
            Substrate::CaPpUcoClear => "CA PP UCO Clear",
            Substrate::PpSilverFtc50 => "PP Silver FTC 50",
            Substrate::PpBlueGray => "PP BlueGray",
            Substrate::ForestPeWhiteFtc85 => "Forest PE White FTC 85",
            Substrate::ForestPeClearFtc85 => "Forest PE Clear FTC 85",
            Substrate::SynBoppWhite20 => "SYN-BOPP White 20",
            Substrate::SynBoppMetallic20 => "SYN-BOPP Metallic 20",
            Substrate::SynBoppClear20 => "SYN-BOPP Clear 20",
            Substrate::SynBoppMatPeach20 => "SYN-BOPP Mat Peach 20",
            Substrate::SynBoppMat20 => "SYN-BOPP Mat 20",
            Substrate::Unknown => "Unknown",
        }
    }

    /// Parse from a stock-list display string. Unrecognized names map to
    /// `Unknown` rather than failing.
    pub fn parse(s: &str) -> Self {
        Substrate::ALL
            .into_iter()
            .find(|sub| sub.display_name() == s)
            .unwrap_or(Substrate::Unknown)
    }

    /// Base UV reference energy (W) at the 20 m/min reference speed.
    pub fn base_uv_ref(&self) -> f64 {
        match self {
            Substrate::CaPpUcoWhite => 2600.0,
            Substrate::CaPpUcoClear => 2500.0,
            Substrate::PpSilverFtc50 => 3000.0,
            Substrate::PpBlueGray => 2700.0,
            Substrate::ForestPeWhiteFtc85 => 3200.0,
            Substrate::ForestPeClearFtc85 => 3100.0,
            Substrate::SynBoppWhite20 => 2600.0,
            Substrate::SynBoppMetallic20 => 3000.0,
            Substrate::SynBoppClear20 => 2400.0,
            Substrate::SynBoppMatPeach20 => 2900.0,
            Substrate::SynBoppMat20 => 2800.0,
            Substrate::Unknown => 0.0,
        }
    }

    /// Whether this is one of the thin 20 µ SYN-BOPP films. These soften
    /// and curl under UV heat, so lamination gradients are hard-capped.
    pub fn is_thin_film(&self) -> bool {
        matches!(
            self,
            Substrate::SynBoppWhite20
                | Substrate::SynBoppMetallic20
                | Substrate::SynBoppClear20
                | Substrate::SynBoppMatPeach20
                | Substrate::SynBoppMat20
        )
    }

    /// Thermal gradient ceiling for this substrate under the given process.
    ///
    /// Thin SYN-BOPP 20 films are capped at 50 under lamination; every other
    /// combination is effectively uncapped at the machine maximum of 500.
    pub fn thermal_gradient_cap(&self, process: ProcessType) -> f64 {
        if self.is_thin_film() && process == ProcessType::Lamination {
            50.0
        } else {
            500.0
        }
    }

    /// Corona treatment profile, or `None` for substrates outside the stock
    /// list (those are not known to be pre-treated).
    pub fn corona_profile(&self) -> Option<CoronaProfile> {
        let profile = match self {
            Substrate::CaPpUcoWhite => CoronaProfile::pre_treated(PolymerGroup::Pp, SurfaceRisk::Normal),
            Substrate::CaPpUcoClear => CoronaProfile::pre_treated(PolymerGroup::Pp, SurfaceRisk::Normal),
            Substrate::PpSilverFtc50 => CoronaProfile::pre_treated(PolymerGroup::Pp, SurfaceRisk::High),
            Substrate::PpBlueGray => CoronaProfile::pre_treated(PolymerGroup::Pp, SurfaceRisk::Normal),
            Substrate::ForestPeWhiteFtc85 => {
                CoronaProfile::pre_treated(PolymerGroup::Pe, SurfaceRisk::Normal)
            }
            Substrate::ForestPeClearFtc85 => {
                CoronaProfile::pre_treated(PolymerGroup::Pe, SurfaceRisk::Normal)
            }
            Substrate::SynBoppWhite20 => CoronaProfile::pre_treated(PolymerGroup::Pp, SurfaceRisk::Normal),
            Substrate::SynBoppMetallic20 => {
                CoronaProfile::pre_treated(PolymerGroup::Pp, SurfaceRisk::High)
            }
            Substrate::SynBoppClear20 => CoronaProfile::pre_treated(PolymerGroup::Pp, SurfaceRisk::Normal),
            Substrate::SynBoppMatPeach20 => {
                CoronaProfile::pre_treated(PolymerGroup::Pp, SurfaceRisk::High)
            }
            Substrate::SynBoppMat20 => CoronaProfile::pre_treated(PolymerGroup::Pp, SurfaceRisk::High),
            Substrate::Unknown => return None,
        };
        Some(profile)
    }
}

impl std::fmt::Display for Substrate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Polymer family a substrate belongs to. PE needs more surface energy
/// management than PP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolymerGroup {
    Pp,
    Pe,
}

/// Adhesion risk tier of a substrate's surface (matte, metallized, and
/// soft-touch finishes are high risk).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceRisk {
    Normal,
    High,
}

/// Corona classification of a stocked substrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoronaProfile {
    pub polymer_group: PolymerGroup,
    pub surface_risk: SurfaceRisk,
    pub pre_treated: bool,
}

impl CoronaProfile {
    fn pre_treated(polymer_group: PolymerGroup, surface_risk: SurfaceRisk) -> Self {
        CoronaProfile {
            polymer_group,
            surface_risk,
            pre_treated: true,
        }
    }
}
