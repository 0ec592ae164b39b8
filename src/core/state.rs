// src/core/state.rs

use super::error::{qubits_for_len, DmError, Result};
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// A pure state over `n` qubits: `2^n` complex amplitudes.
///
/// Index `i` encodes the computational basis state little-endian, so bit `k`
/// of `i` is the state of qubit location `k` (the `k+1`-th qubit). Amplitudes
/// are not required to be normalized; see
/// [`check_normalization`](crate::validation::check_normalization).
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// Wraps `amplitudes`, failing with `InvalidDimension` when the length is
    /// not a power of two.
    pub fn new(amplitudes: Vec<Complex<f64>>) -> Result<Self> {
        let num_qubits = qubits_for_len(amplitudes.len())?;
        Ok(Self { amplitudes, num_qubits })
    }

    /// Builds a state from purely real amplitudes.
    pub fn from_real(amplitudes: &[f64]) -> Result<Self> {
        Self::new(amplitudes.iter().map(|&re| Complex::new(re, 0.0)).collect())
    }

    /// The computational basis state `|index⟩` over `num_qubits` qubits.
    pub fn basis(num_qubits: usize, index: usize) -> Result<Self> {
        let dim = 1usize.checked_shl(num_qubits as u32).ok_or_else(|| DmError::InvalidOperation {
            message: format!("{} qubits overflow the addressable state dimension", num_qubits),
        })?;
        if index >= dim {
            return Err(DmError::InvalidOperation {
                message: format!("basis index {} out of range for dimension {}", index, dim),
            });
        }
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[index] = Complex::new(1.0, 0.0);
        Ok(Self { amplitudes, num_qubits })
    }

    /// Read-only view of the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Consumes the state, returning its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex<f64>> {
        self.amplitudes
    }

    /// Number of qubits `n`.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Dimension `2^n`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Σ|aᵢ|².
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Rescales to unit norm.
    pub fn normalized(mut self) -> Result<Self> {
        normalize_in_place(&mut self.amplitudes)?;
        Ok(self)
    }
}

pub(crate) fn normalize_in_place(amplitudes: &mut [Complex<f64>]) -> Result<()> {
    let norm_sq: f64 = amplitudes.iter().map(|c| c.norm_sqr()).sum();
    if norm_sq < super::constants::tolerances::AMPLITUDE {
        return Err(DmError::ZeroNorm);
    }
    let scale = norm_sq.sqrt().recip();
    amplitudes.iter_mut().for_each(|c| *c *= scale);
    Ok(())
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
