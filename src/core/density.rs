// src/core/density.rs

use super::error::{qubits_for_len, DmError, Result};
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// A `2^n × 2^n` complex matrix representing the state of `n` qubits.
///
/// Elements are stored row-major and use the same little-endian basis
/// indexing as [`StateVector`](super::StateVector). Values are produced by
/// projection and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityMatrix {
    elements: Vec<Complex<f64>>,
    dim: usize,
    num_qubits: usize,
}

impl DensityMatrix {
    /// Wraps row-major `elements` of a `dim × dim` matrix. (Internal visibility)
    pub(crate) fn from_raw(dim: usize, elements: Vec<Complex<f64>>) -> Self {
        debug_assert_eq!(elements.len(), dim * dim);
        Self {
            elements,
            dim,
            num_qubits: dim.trailing_zeros() as usize,
        }
    }

    /// Builds a matrix from explicit rows. Fails with `InvalidDimension` when
    /// the row count is not a power of two and with `ShapeMismatch` when a row
    /// has the wrong length.
    pub fn from_rows(rows: &[Vec<Complex<f64>>]) -> Result<Self> {
        let dim = rows.len();
        qubits_for_len(dim)?;
        let mut elements = Vec::with_capacity(dim * dim);
        for row in rows {
            if row.len() != dim {
                return Err(DmError::ShapeMismatch { expected: dim, actual: row.len() });
            }
            elements.extend_from_slice(row);
        }
        Ok(Self::from_raw(dim, elements))
    }

    /// Side length `2^n`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of qubits `n`.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Element `(row, col)`. Panics if out of range, like slice indexing.
    pub fn get(&self, row: usize, col: usize) -> Complex<f64> {
        self.elements[row * self.dim + col]
    }

    /// Row-major view of all elements.
    pub fn as_slice(&self) -> &[Complex<f64>] {
        &self.elements
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Complex<f64>]> {
        self.elements.chunks(self.dim)
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> Complex<f64> {
        (0..self.dim).map(|i| self.get(i, i)).sum()
    }

    /// Tr(ρ²). Equals 1 for pure normalized states.
    pub fn purity(&self) -> f64 {
        // Tr(ρρ) = Σ_ij ρ_ij ρ_ji
        let mut acc = Complex::zero();
        for i in 0..self.dim {
            for j in 0..self.dim {
                acc += self.get(i, j) * self.get(j, i);
            }
        }
        acc.re
    }

    /// ρ†.
    pub fn conj_transpose(&self) -> Self {
        let mut elements = Vec::with_capacity(self.elements.len());
        for i in 0..self.dim {
            for j in 0..self.dim {
                elements.push(self.get(j, i).conj());
            }
        }
        Self::from_raw(self.dim, elements)
    }

    /// Largest element-wise deviation `|ρ_ij - conj(ρ_ji)|`.
    pub fn hermitian_deviation(&self) -> f64 {
        let mut worst: f64 = 0.0;
        for i in 0..self.dim {
            for j in i..self.dim {
                worst = worst.max((self.get(i, j) - self.get(j, i).conj()).norm());
            }
        }
        worst
    }

    /// True when ρ equals ρ† within `tolerance`.
    pub fn is_hermitian(&self, tolerance: f64) -> bool {
        self.hermitian_deviation() <= tolerance
    }

    /// Element-wise comparison within `tolerance`. Matrices of different sizes are never equal.
    pub fn approx_eq(&self, other: &DensityMatrix, tolerance: f64) -> bool {
        self.dim == other.dim
            && self
                .elements
                .iter()
                .zip(&other.elements)
                .all(|(a, b)| (a - b).norm() <= tolerance)
    }
}

impl fmt::Display for DensityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DensityMatrix({} qubits, {}x{}):", self.num_qubits, self.dim, self.dim)?;
        for row in self.rows() {
            write!(f, "  [")?;
            for (j, c) in row.iter().enumerate() {
                write!(f, "{}{:.4}", if j > 0 { ", " } else { "" }, c)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
