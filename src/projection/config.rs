// src/projection/config.rs
use crate::core::tolerances;

/// Settings for a [`Projector`](super::Projector).
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectorConfig {
    /// Tolerance used by the optional input and output checks.
    pub tolerance: f64,
    /// Reject states whose squared norm deviates from 1 by more than `tolerance`.
    pub validate_input: bool,
    /// Check the projected matrix is Hermitian within `tolerance`.
    pub validate_output: bool,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            tolerance: tolerances::NORM,
            validate_input: false,
            validate_output: false,
        }
    }
}

impl ProjectorConfig {
    /// Sets the tolerance for both checks.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enables or disables the normalization check on inputs.
    pub fn with_input_validation(mut self, enabled: bool) -> Self {
        self.validate_input = enabled;
        self
    }

    /// Enables or disables the Hermiticity check on outputs.
    pub fn with_output_validation(mut self, enabled: bool) -> Self {
        self.validate_output = enabled;
        self
    }
}
