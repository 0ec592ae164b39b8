// src/register/mod.rs

//! Batched quantum registers with a focus on a subset of active qubits.
//!
//! A [`Register`] is the in-memory form a circuit simulator hands over: one or
//! more state vectors of equal size (the batch) plus the ordered list of qubits
//! that are currently *active*. Projection uses the active qubits and traces
//! out the rest.

use crate::core::state::normalize_in_place;
use crate::core::{DmError, QubitLoc, Result, StateVector};
use num_complex::Complex;
use num_traits::Zero;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use std::collections::HashSet;
use std::f64::consts::{FRAC_1_SQRT_2, TAU};
use std::fmt;

/// A batch of pure states over `num_qubits` qubits with an ordered set of active qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct Register {
    num_qubits: usize,
    batch: usize,
    /// Member `b` occupies `amplitudes[b * dim .. (b + 1) * dim]`.
    amplitudes: Vec<Complex<f64>>,
    /// Active qubit `j` is physical location `active[j]`.
    active: Vec<QubitLoc>,
}

impl Register {
    /// Creates a single-member register from `amplitudes` (length `2^num_qubits`).
    pub fn new(num_qubits: usize, amplitudes: Vec<Complex<f64>>) -> Result<Self> {
        Self::batched(num_qubits, 1, amplitudes)
    }

    /// Creates a register carrying `batch` states laid out one after another.
    pub fn batched(
        num_qubits: usize,
        batch: usize,
        amplitudes: Vec<Complex<f64>>,
    ) -> Result<Self> {
        if batch == 0 {
            return Err(DmError::BatchSize { batch });
        }
        let expected = batch_len(num_qubits, batch)?;
        if amplitudes.len() != expected {
            return Err(DmError::ShapeMismatch { expected, actual: amplitudes.len() });
        }
        Ok(Self {
            num_qubits,
            batch,
            amplitudes,
            active: (0..num_qubits).map(QubitLoc).collect(),
        })
    }

    /// Single-member register holding `state`.
    pub fn from_state(state: StateVector) -> Self {
        let num_qubits = state.num_qubits();
        Self {
            num_qubits,
            batch: 1,
            amplitudes: state.into_amplitudes(),
            active: (0..num_qubits).map(QubitLoc).collect(),
        }
    }

    /// |0…0⟩.
    pub fn zero_state(num_qubits: usize) -> Result<Self> {
        Ok(Self::from_state(StateVector::basis(num_qubits, 0)?))
    }

    /// Product basis state; `bits[k]` is the value of qubit location `k`.
    pub fn product_state(bits: &[bool]) -> Result<Self> {
        let index = bits
            .iter()
            .enumerate()
            .fold(0usize, |acc, (k, &b)| if b { acc | (1 << k) } else { acc });
        Ok(Self::from_state(StateVector::basis(bits.len(), index)?))
    }

    /// (|0…0⟩ + |1…1⟩)/√2. Requires at least one qubit.
    pub fn ghz_state(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(DmError::InvalidOperation {
                message: "GHZ state needs at least one qubit".to_string(),
            });
        }
        let dim = dim_for(num_qubits)?;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::new(FRAC_1_SQRT_2, 0.0);
        amplitudes[dim - 1] = Complex::new(FRAC_1_SQRT_2, 0.0);
        Self::new(num_qubits, amplitudes)
    }

    /// Equal superposition of every basis state.
    pub fn uniform_state(num_qubits: usize) -> Result<Self> {
        let dim = dim_for(num_qubits)?;
        let amp = Complex::new((dim as f64).sqrt().recip(), 0.0);
        Self::new(num_qubits, vec![amp; dim])
    }

    /// Normalized random state with Gaussian-distributed amplitudes.
    /// The same `seed` always yields the same state.
    pub fn random_state(num_qubits: usize, seed: u64) -> Result<Self> {
        Self::random_batch(num_qubits, 1, seed)
    }

    /// `batch` independent normalized random states drawn from one seeded stream.
    pub fn random_batch(num_qubits: usize, batch: usize, seed: u64) -> Result<Self> {
        if batch == 0 {
            return Err(DmError::BatchSize { batch });
        }
        let len = batch_len(num_qubits, batch)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut amplitudes = Vec::with_capacity(len);
        for _ in 0..len {
            amplitudes.push(gaussian_complex(&mut rng));
        }
        let mut reg = Self::batched(num_qubits, batch, amplitudes)?;
        reg.normalize()?;
        log::trace!(
            "drew random {}-qubit register (batch {}) from seed {}",
            num_qubits,
            batch,
            seed
        );
        Ok(reg)
    }

    /// Total number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of active qubits.
    pub fn num_active(&self) -> usize {
        self.active.len()
    }

    /// Active qubits, in focus order.
    pub fn active(&self) -> &[QubitLoc] {
        &self.active
    }

    /// Batch size.
    pub fn batch(&self) -> usize {
        self.batch
    }

    /// Dimension `2^num_qubits` of each member.
    pub fn dim(&self) -> usize {
        1 << self.num_qubits
    }

    /// True when every qubit is active in natural order.
    pub fn is_relaxed(&self) -> bool {
        self.active.len() == self.num_qubits
            && self.active.iter().enumerate().all(|(j, loc)| loc.0 == j)
    }

    /// Amplitudes of batch member `index`.
    pub fn member(&self, index: usize) -> Result<&[Complex<f64>]> {
        if index >= self.batch {
            return Err(DmError::BatchIndex { index, batch: self.batch });
        }
        let dim = self.dim();
        Ok(&self.amplitudes[index * dim..(index + 1) * dim])
    }

    /// Batch member `index` as an owned state vector.
    pub fn state(&self, index: usize) -> Result<StateVector> {
        StateVector::new(self.member(index)?.to_vec())
    }

    /// Makes `locs` the active qubits, in the given order.
    pub fn focus(&mut self, locs: &[QubitLoc]) -> Result<&mut Self> {
        if locs.is_empty() {
            return Err(DmError::InvalidOperation {
                message: "focus requires at least one qubit".to_string(),
            });
        }
        let mut seen = HashSet::with_capacity(locs.len());
        for &loc in locs {
            if loc.0 >= self.num_qubits {
                return Err(DmError::QubitOutOfRange { loc, num_qubits: self.num_qubits });
            }
            if !seen.insert(loc) {
                return Err(DmError::DuplicateQubit { loc });
            }
        }
        self.active = locs.to_vec();
        log::debug!("focused register on {:?}", self.active);
        Ok(self)
    }

    /// Makes every qubit active again, in natural order.
    pub fn relax(&mut self) -> &mut Self {
        self.active = (0..self.num_qubits).map(QubitLoc).collect();
        self
    }

    /// Rescales every batch member to unit norm.
    pub fn normalize(&mut self) -> Result<&mut Self> {
        let dim = self.dim();
        for member in self.amplitudes.chunks_mut(dim) {
            normalize_in_place(member)?;
        }
        Ok(self)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Register({} qubits, batch {}, active [", self.num_qubits, self.batch)?;
        for (j, loc) in self.active.iter().enumerate() {
            write!(f, "{}{}", if j > 0 { ", " } else { "" }, loc)?;
        }
        write!(f, "])")
    }
}

fn dim_for(num_qubits: usize) -> Result<usize> {
    1usize.checked_shl(num_qubits as u32).ok_or_else(|| DmError::InvalidOperation {
        message: format!("{} qubits overflow the addressable state dimension", num_qubits),
    })
}

/// Total amplitude count of `batch` members over `num_qubits` qubits.
fn batch_len(num_qubits: usize, batch: usize) -> Result<usize> {
    dim_for(num_qubits)?
        .checked_mul(batch)
        .ok_or_else(|| DmError::InvalidOperation {
            message: format!(
                "batch of {} states over {} qubits overflows the addressable length",
                batch, num_qubits
            ),
        })
}

/// Box-Muller sample of a standard complex Gaussian.
fn gaussian_complex(rng: &mut StdRng) -> Complex<f64> {
    // 1 - u keeps the logarithm argument in (0, 1].
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    let r = (-2.0 * u1.ln()).sqrt();
    Complex::from_polar(r, TAU * u2)
}
