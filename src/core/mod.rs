// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;
pub mod density;

// Re-export public types for convenient access via `regdm::core::TypeName`
pub use error::{DmError, QubitLoc, Result};
pub use state::StateVector;
pub use density::DensityMatrix;

pub mod constants;
pub use constants::tolerances;
