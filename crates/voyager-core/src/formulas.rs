//! Formula engine: surface gravity and trip fuel estimates.
//!
//! Units are whatever the caller stores; the formulas are relative
//! approximations, not physics.

use crate::entities::Exoplanet;
use crate::enums::ExoplanetType;
use crate::errors::CoreError;

/// Mass stand-in used for gas giants, whose stored mass is not meaningful.
pub const GAS_GIANT_MASS_FACTOR: f64 = 0.5;

impl Exoplanet {
    /// Surface gravity: `mass / radius²`, or `0.5 / radius²` for gas giants.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if `radius` is not a positive finite
    /// number. Validated entities always pass.
    pub fn gravity(&self) -> Result<f64, CoreError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(CoreError::InvalidInput(format!(
                "radius must be positive to compute gravity, got {}",
                self.radius
            )));
        }
        let mass = match self.kind {
            ExoplanetType::GasGiant => GAS_GIANT_MASS_FACTOR,
            ExoplanetType::Terrestrial => self.mass,
        };
        Ok(mass / (self.radius * self.radius))
    }

    /// Fuel needed to reach this planet: `(distance / gravity²) * crew_capacity`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if `crew_capacity <= 0`, or if the
    /// computed gravity is not positive (which would divide by zero).
    pub fn estimate_fuel(&self, crew_capacity: i64) -> Result<f64, CoreError> {
        if crew_capacity <= 0 {
            return Err(CoreError::InvalidInput("invalid crew capacity".into()));
        }
        let gravity = self.gravity()?;
        if gravity <= 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "gravity must be positive to estimate fuel, got {gravity}"
            )));
        }
        #[allow(clippy::cast_precision_loss)]
        let crew = crew_capacity as f64;
        Ok((self.distance / (gravity * gravity)) * crew)
    }
}
