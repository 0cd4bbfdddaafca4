//! # voyager-core
//!
//! Core types and pure domain logic for the Space Voyagers service.
//!
//! This crate has no I/O. It provides:
//! - The `Exoplanet` entity and its `ExoplanetType` tag
//! - The formula engine (gravity and fuel estimation)
//! - The entity validator run before every create/update
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod formulas;
pub mod validation;
