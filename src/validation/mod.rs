// src/validation/mod.rs

//! Checks that states and density matrices describe physical quantum states.

use crate::core::{tolerances, DensityMatrix, DmError, Result, StateVector};
use num_complex::Complex;
use num_traits::Zero;

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `tolerances::NORM`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(DmError::Incoherence)` if normalization fails.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<()> {
    check_amplitudes_normalized(state.amplitudes(), tolerance)
}

/// Same as [`check_normalization`] for a borrowed amplitude slice.
pub fn check_amplitudes_normalized(
    amplitudes: &[Complex<f64>],
    tolerance: Option<f64>,
) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(tolerances::NORM);
    let norm_sq: f64 = amplitudes.iter().map(|c| c.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(DmError::Incoherence {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks `ρ == ρ†` element-wise within `tolerance` (default `tolerances::ELEMENT`).
pub fn check_hermitian(rho: &DensityMatrix, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(tolerances::ELEMENT);
    let deviation = rho.hermitian_deviation();
    if deviation > effective_tolerance {
        return Err(DmError::Incoherence {
            message: format!(
                "Matrix is not Hermitian. Max |rho_ij - conj(rho_ji)| = {:.3e}",
                deviation
            ),
        });
    }
    Ok(())
}

/// Checks `Tr ρ ≈ 1` within `tolerance` (default `tolerances::NORM`).
pub fn check_trace(rho: &DensityMatrix, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(tolerances::NORM);
    let trace = rho.trace();
    if (trace - Complex::new(1.0, 0.0)).norm() > effective_tolerance {
        return Err(DmError::Incoherence {
            message: format!("Trace must be 1, got {:.6}", trace),
        });
    }
    Ok(())
}

/// Checks ρ is positive semi-definite by factoring `ρ + shift·I` as `L L†`.
///
/// The factorization only succeeds when every eigenvalue of ρ exceeds `-shift`
/// (default `tolerances::PSD_SHIFT`). ρ is assumed Hermitian.
pub fn check_positive_semidefinite(rho: &DensityMatrix, shift: Option<f64>) -> Result<()> {
    let shift = shift.unwrap_or(tolerances::PSD_SHIFT);
    let n = rho.dim();
    let mut l = vec![Complex::<f64>::zero(); n * n];

    for k in 0..n {
        let mut pivot = rho.get(k, k).re + shift;
        for j in 0..k {
            pivot -= l[k * n + j].norm_sqr();
        }
        if !(pivot > 0.0) {
            return Err(DmError::Incoherence {
                message: format!(
                    "Matrix is not positive semi-definite (pivot {} = {:.3e})",
                    k, pivot
                ),
            });
        }
        let pivot = pivot.sqrt();
        l[k * n + k] = Complex::new(pivot, 0.0);

        for i in (k + 1)..n {
            let mut acc = rho.get(i, k);
            for j in 0..k {
                acc -= l[i * n + j] * l[k * n + j].conj();
            }
            l[i * n + k] = acc / pivot;
        }
    }
    Ok(())
}

/// Runs the Hermiticity, trace and positivity checks with default tolerances,
/// stopping at the first failure.
pub fn validate_density_matrix(rho: &DensityMatrix) -> Result<()> {
    check_hermitian(rho, None)?;
    check_trace(rho, None)?;
    check_positive_semidefinite(rho, None)?;
    Ok(())
}
