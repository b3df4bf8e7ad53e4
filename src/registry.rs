//! Location registry: country name ↔ location code.
//!
//! The table is the single source of truth for both directions of the
//! lookup. `Unknown` is a reserved sentinel: it has a name so it can
//! round-trip, but it is never offered as a selectable country.

use serde::{Deserialize, Serialize};

// ============================================================================
// TYPES
// ============================================================================

/// European locations with temperature data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    At,
    Be,
    Bg,
    Ch,
    Cz,
    De,
    Dk,
    Ee,
    Es,
    Fi,
    Fr,
    Gb,
    Gr,
    Hr,
    Hu,
    Ie,
    It,
    Lt,
    Lu,
    Lv,
    Nl,
    No,
    Pl,
    Pt,
    Ro,
    Se,
    Si,
    Sk,
    Unknown,
}

/// Lookup of a name that is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    UnknownLocation(String),
}

// ============================================================================
// TABLE
// ============================================================================

/// Name table, sorted by name. Both lookup directions read from here.
const LOCATIONS: &[(Location, &str)] = &[
    (Location::At, "Austria"),
    (Location::Be, "Belgium"),
    (Location::Bg, "Bulgaria"),
    (Location::Hr, "Croatia"),
    (Location::Cz, "Czech Republic"),
    (Location::Dk, "Denmark"),
    (Location::Ee, "Estonia"),
    (Location::Fi, "Finland"),
    (Location::Fr, "France"),
    (Location::De, "Germany"),
    (Location::Gr, "Greece"),
    (Location::Hu, "Hungary"),
    (Location::Ie, "Ireland"),
    (Location::It, "Italy"),
    (Location::Lv, "Latvia"),
    (Location::Lt, "Lithuania"),
    (Location::Lu, "Luxembourg"),
    (Location::Nl, "Netherlands"),
    (Location::No, "Norway"),
    (Location::Pl, "Poland"),
    (Location::Pt, "Portugal"),
    (Location::Ro, "Romania"),
    (Location::Sk, "Slovakia"),
    (Location::Si, "Slovenia"),
    (Location::Es, "Spain"),
    (Location::Se, "Sweden"),
    (Location::Ch, "Switzerland"),
    (Location::Gb, "United Kingdom"),
    (Location::Unknown, "Unknown"),
];

// ============================================================================
// LOOKUPS
// ============================================================================

impl Location {
    /// Country used when no location filter is supplied.
    pub const DEFAULT: Location = Location::De;

    /// Display name of this location.
    pub fn name(self) -> &'static str {
        LOCATIONS
            .iter()
            .find(|(loc, _)| *loc == self)
            .map(|(_, name)| *name)
            .unwrap_or("Unknown")
    }

    /// Reverse lookup. Fails on names the registry does not know.
    pub fn from_name(name: &str) -> Result<Location, LookupError> {
        LOCATIONS
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(loc, _)| *loc)
            .ok_or_else(|| LookupError::UnknownLocation(name.to_string()))
    }

    /// Every location a user may pick, in display order. Excludes `Unknown`.
    pub fn selectable() -> impl Iterator<Item = Location> {
        LOCATIONS
            .iter()
            .map(|(loc, _)| *loc)
            .filter(|loc| *loc != Location::Unknown)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::UnknownLocation(name) => write!(f, "Unknown location: {}", name),
        }
    }
}

impl std::error::Error for LookupError {}

// ============================================================================
// TESTS
// ============================================================================
