//! The exoplanet entity.
//!
//! Maps to the `exoplanets` table. The derived `gravity` column is not part of
//! the entity; it is recomputed from the fields on every write.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::ExoplanetType;
use crate::errors::CoreError;

/// A single exoplanet record.
///
/// `id` is assigned by the store on creation; any `id` sent by a client is
/// ignored. `mass` is only meaningful for terrestrial planets; it is omitted
/// from JSON when zero, and a missing or `null` mass reads as zero.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Exoplanet {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub description: String,
    pub distance: f64,
    pub radius: f64,
    #[serde(
        default,
        deserialize_with = "null_as_zero",
        skip_serializing_if = "is_unset"
    )]
    #[schemars(with = "Option<f64>")]
    pub mass: f64,
    #[serde(rename = "type")]
    pub kind: ExoplanetType,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_unset(mass: &f64) -> bool {
    *mass == 0.0
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

impl Exoplanet {
    /// Construct an unsaved exoplanet (`id == 0`) of the given kind.
    #[must_use]
    pub fn new(
        kind: ExoplanetType,
        name: impl Into<String>,
        description: impl Into<String>,
        distance: f64,
        radius: f64,
        mass: f64,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            distance,
            radius,
            mass,
            kind,
        }
    }

    /// Construct an unsaved exoplanet from a textual type tag.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownType` if `type_tag` is neither
    /// `"Terrestrial"` nor `"GasGiant"`.
    pub fn build(
        type_tag: &str,
        name: impl Into<String>,
        description: impl Into<String>,
        distance: f64,
        radius: f64,
        mass: f64,
    ) -> Result<Self, CoreError> {
        let kind = type_tag.parse()?;
        Ok(Self::new(kind, name, description, distance, radius, mass))
    }

    /// Return a copy carrying the given store-assigned identity.
    #[must_use]
    pub fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }
}
