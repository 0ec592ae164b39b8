//! Numerical tolerances shared by validation and projection.

/// Default tolerances used when the caller does not supply one.
pub mod tolerances {
    /// Allowed deviation of Σ|aᵢ|² (or of a trace) from 1.
    pub const NORM: f64 = 1e-9;
    /// Allowed element-wise deviation when comparing complex matrices.
    pub const ELEMENT: f64 = 1e-10;
    /// Squared norms below this are treated as zero.
    pub const AMPLITUDE: f64 = 1e-24;
    /// Diagonal shift applied before the positivity (Cholesky) test.
    pub const PSD_SHIFT: f64 = 1e-9;
}
