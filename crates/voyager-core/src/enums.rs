//! Exoplanet type tag.
//!
//! Serialized exactly as stored in the `type` column: `"Terrestrial"` or
//! `"GasGiant"`. Every branch on planet kind is an exhaustive `match` over this
//! enum, so adding a kind is a compile-time-checked change.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// The kind of an exoplanet. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ExoplanetType {
    Terrestrial,
    GasGiant,
}

impl ExoplanetType {
    /// All known kinds, in declaration order.
    pub const ALL: [Self; 2] = [Self::Terrestrial, Self::GasGiant];

    /// Return the string representation used in SQL storage and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Terrestrial => "Terrestrial",
            Self::GasGiant => "GasGiant",
        }
    }

    /// Whether planets of this kind must carry a positive mass.
    #[must_use]
    pub const fn requires_mass(self) -> bool {
        match self {
            Self::Terrestrial => true,
            Self::GasGiant => false,
        }
    }
}

impl fmt::Display for ExoplanetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExoplanetType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownType(s.to_string()))
    }
}
