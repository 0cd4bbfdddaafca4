//! Shared test utilities for voyager-db unit tests.

use voyager_core::entities::Exoplanet;
use voyager_core::enums::ExoplanetType;

use crate::service::VoyagerService;

/// Create an in-memory, fully migrated service.
pub async fn test_service() -> VoyagerService {
    VoyagerService::new_local(crate::MEMORY_PATH).await.unwrap()
}

pub fn planet_x() -> Exoplanet {
    Exoplanet::new(
        ExoplanetType::Terrestrial,
        "Planet X",
        "A mysterious planet.",
        4500.0,
        50.0,
        5.0,
    )
}

pub fn gas_giant(name: &str, distance: f64) -> Exoplanet {
    Exoplanet::new(ExoplanetType::GasGiant, name, "Swirling clouds", distance, 70.0, 0.0)
}

pub fn terrestrial(name: &str, distance: f64) -> Exoplanet {
    Exoplanet::new(ExoplanetType::Terrestrial, name, "Rocky", distance, 1.2, 0.8)
}
