//! Entity validator, run before every create and update.

use crate::entities::Exoplanet;
use crate::errors::ValidationError;

impl Exoplanet {
    /// Check required fields and the type-specific mass constraint.
    ///
    /// # Errors
    ///
    /// - `ValidationError::InvalidData` if `name` or `description` is empty,
    ///   or `distance`/`radius` is not positive.
    /// - `ValidationError::MissingMass` if a terrestrial planet has a
    ///   non-positive mass.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty()
            || self.description.is_empty()
            || !is_positive(self.distance)
            || !is_positive(self.radius)
        {
            return Err(ValidationError::InvalidData);
        }
        if self.kind.requires_mass() && !is_positive(self.mass) {
            return Err(ValidationError::MissingMass);
        }
        Ok(())
    }
}

/// False for NaN as well as for zero and negatives.
fn is_positive(value: f64) -> bool {
    value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ExoplanetType;
    use rstest::rstest;

    fn valid_terrestrial() -> Exoplanet {
        Exoplanet::new(
            ExoplanetType::Terrestrial,
            "Planet X",
            "A mysterious planet.",
            4500.0,
            50.0,
            5.0,
        )
    }

    #[test]
    fn accepts_well_formed_terrestrial() {
        assert_eq!(valid_terrestrial().validate(), Ok(()));
    }

    #[test]
    fn accepts_gas_giant_without_mass() {
        let planet = Exoplanet::new(ExoplanetType::GasGiant, "Giant", "Banded", 800.0, 70.0, 0.0);
        assert_eq!(planet.validate(), Ok(()));
    }

    #[rstest]
    #[case::empty_name(Exoplanet { name: String::new(), ..valid_terrestrial() })]
    #[case::empty_description(Exoplanet { description: String::new(), ..valid_terrestrial() })]
    #[case::zero_distance(Exoplanet { distance: 0.0, ..valid_terrestrial() })]
    #[case::negative_distance(Exoplanet { distance: -10.0, ..valid_terrestrial() })]
    #[case::zero_radius(Exoplanet { radius: 0.0, ..valid_terrestrial() })]
    #[case::nan_radius(Exoplanet { radius: f64::NAN, ..valid_terrestrial() })]
    fn rejects_invalid_data(#[case] planet: Exoplanet) {
        assert_eq!(planet.validate(), Err(ValidationError::InvalidData));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-2.0)]
    fn rejects_terrestrial_without_mass(#[case] mass: f64) {
        let planet = Exoplanet { mass, ..valid_terrestrial() };
        assert_eq!(planet.validate(), Err(ValidationError::MissingMass));
    }

    #[test]
    fn invalid_data_reported_before_missing_mass() {
        let planet = Exoplanet { name: String::new(), mass: 0.0, ..valid_terrestrial() };
        assert_eq!(planet.validate(), Err(ValidationError::InvalidData));
    }
}
