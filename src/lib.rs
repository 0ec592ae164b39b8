// src/lib.rs

//! `regdm` - Density matrices from quantum register state vectors
//!
//! Converts the in-memory state of a quantum register (a pure state vector
//! with little-endian qubit indexing) into its density matrix `|ψ⟩⟨ψ|`, or
//! into the reduced density matrix over a focused subset of qubits. The
//! resulting matrices are plain complex arrays ready to hand to an analysis
//! library.

pub mod core;
pub mod register;
pub mod projection;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use crate::core::{DensityMatrix, DmError, QubitLoc, Result, StateVector};
pub use register::Register;
pub use projection::{project, project_amplitudes, Projector, ProjectorConfig};
pub use validation::{
    check_amplitudes_normalized,
    check_hermitian,
    check_normalization,
    check_positive_semidefinite,
    check_trace,
    validate_density_matrix,
};

// Example 1: Projecting a single-qubit superposition
/// ```
/// use regdm::{project, StateVector, DmError};
/// use std::f64::consts::FRAC_1_SQRT_2;
///
/// let plus = StateVector::from_real(&[FRAC_1_SQRT_2, FRAC_1_SQRT_2])?;
/// let rho = project(&plus);
/// println!("{}", rho);
///
/// for i in 0..2 {
///     for j in 0..2 {
///         assert!((rho.get(i, j).re - 0.5).abs() < 1e-12);
///     }
/// }
///
/// // Three amplitudes cannot describe a whole number of qubits.
/// assert_eq!(
///     StateVector::from_real(&[1.0, 0.0, 0.0]),
///     Err(DmError::InvalidDimension { len: 3 })
/// );
/// # Ok::<(), DmError>(())
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: Reduced density matrix of one half of a Bell pair
/// ```
/// use regdm::{Projector, QubitLoc, Register, validate_density_matrix, DmError};
///
/// let mut bell = Register::ghz_state(2)?;
/// bell.focus(&[QubitLoc(0)])?;
///
/// let rho = Projector::new().project_register(&bell)?;
/// assert_eq!(rho.dim(), 2);
/// // Tracing out one qubit of a Bell pair leaves the maximally mixed state.
/// assert!((rho.get(0, 0).re - 0.5).abs() < 1e-12);
/// assert!((rho.get(1, 1).re - 0.5).abs() < 1e-12);
/// assert!(rho.get(0, 1).norm() < 1e-12);
/// assert!((rho.purity() - 0.5).abs() < 1e-12);
/// validate_density_matrix(&rho)?;
/// # Ok::<(), DmError>(())
/// ```
#[doc(hidden)]
const _: () = ();
