//! Repository modules implementing CRUD operations.
//!
//! Each module adds methods to `VoyagerService` via `impl VoyagerService` blocks.

pub mod exoplanet;
