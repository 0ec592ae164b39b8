// src/projection/mod.rs

//! Projects pure states onto density matrices.
//!
//! The full projection is the outer product `ρ = |ψ⟩⟨ψ|`. When a register is
//! focused on a subset of its qubits, the inactive ones are traced out and
//! the result is the reduced density matrix over the active qubits, in focus
//! order and with little-endian basis indexing.

mod config;

pub use config::ProjectorConfig;

use crate::core::{DensityMatrix, DmError, Result, StateVector};
use crate::register::Register;
use crate::validation;
use num_complex::Complex;
use num_traits::Zero;

/// `ρ[i, j] = state[i] · conj(state[j])`.
///
/// Hermitian by construction, with trace equal to the squared norm of `state`.
pub fn project(state: &StateVector) -> DensityMatrix {
    outer_product(state.amplitudes())
}

/// Same as [`project`] for a raw amplitude slice; fails with
/// `InvalidDimension` if its length is not a power of two.
pub fn project_amplitudes(amplitudes: &[Complex<f64>]) -> Result<DensityMatrix> {
    if !amplitudes.len().is_power_of_two() {
        return Err(DmError::InvalidDimension { len: amplitudes.len() });
    }
    Ok(outer_product(amplitudes))
}

fn outer_product(psi: &[Complex<f64>]) -> DensityMatrix {
    let dim = psi.len();
    let mut elements = Vec::with_capacity(dim * dim);
    for a in psi {
        elements.extend(psi.iter().map(|b| a * b.conj()));
    }
    DensityMatrix::from_raw(dim, elements)
}

/// Configurable entry point for projecting registers.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    config: ProjectorConfig,
}

impl Projector {
    /// Creates a projector with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a projector with the given settings.
    pub fn with_config(config: ProjectorConfig) -> Self {
        Self { config }
    }

    /// Projects a single state, applying the input and output checks the
    /// configuration enables.
    pub fn project(&self, state: &StateVector) -> Result<DensityMatrix> {
        if self.config.validate_input {
            validation::check_normalization(state, Some(self.config.tolerance))?;
        }
        let rho = project(state);
        self.check_output(&rho)?;
        Ok(rho)
    }

    /// Projects a register with a batch dimension of one.
    ///
    /// # Returns
    /// * the full `|ψ⟩⟨ψ|` if every qubit is active in natural order,
    /// * otherwise the reduced density matrix over the active qubits.
    /// * `Err(DmError::BatchSize)` if the register carries more than one state.
    pub fn project_register(&self, register: &Register) -> Result<DensityMatrix> {
        if register.batch() != 1 {
            return Err(DmError::BatchSize { batch: register.batch() });
        }
        self.project_member(register, 0)
    }

    /// Projects every batch member independently.
    pub fn project_batch(&self, register: &Register) -> Result<Vec<DensityMatrix>> {
        (0..register.batch())
            .map(|b| self.project_member(register, b))
            .collect()
    }

    fn project_member(&self, register: &Register, index: usize) -> Result<DensityMatrix> {
        let psi = register.member(index)?;
        if self.config.validate_input {
            validation::check_amplitudes_normalized(psi, Some(self.config.tolerance))?;
        }

        let rho = if register.is_relaxed() {
            log::debug!("projecting {}-qubit state (member {})", register.num_qubits(), index);
            outer_product(psi)
        } else {
            log::debug!(
                "projecting member {} onto {} of {} qubits",
                index,
                register.num_active(),
                register.num_qubits()
            );
            reduced(psi, register)
        };

        self.check_output(&rho)?;
        Ok(rho)
    }

    fn check_output(&self, rho: &DensityMatrix) -> Result<()> {
        if self.config.validate_output {
            validation::check_hermitian(rho, Some(self.config.tolerance))?;
        }
        Ok(())
    }
}

/// Reduced density matrix of `psi` over the register's active qubits.
///
/// Active qubit `j` occupies bit `j` of the reduced index; the inactive qubits
/// are summed over.
fn reduced(psi: &[Complex<f64>], register: &Register) -> DensityMatrix {
    let active: Vec<usize> = register.active().iter().map(|loc| loc.0).collect();
    let active_mask = register.active().iter().fold(0usize, |m, loc| m | loc.mask());
    let env: Vec<usize> = (0..register.num_qubits())
        .filter(|&k| active_mask & (1 << k) == 0)
        .collect();

    let sub_dim = 1usize << active.len();
    let env_dim = 1usize << env.len();

    // Physical offsets contributed by each reduced index and each environment index.
    let sub_offsets: Vec<usize> = (0..sub_dim).map(|r| scatter(r, &active)).collect();
    let env_offsets: Vec<usize> = (0..env_dim).map(|e| scatter(e, &env)).collect();
    log::trace!("reduced projection: sub_dim={}, env_dim={}", sub_dim, env_dim);

    let mut elements = vec![Complex::zero(); sub_dim * sub_dim];
    for &env in &env_offsets {
        for (r, &row_off) in sub_offsets.iter().enumerate() {
            let a = psi[row_off | env];
            if a.is_zero() {
                continue;
            }
            for (c, &col_off) in sub_offsets.iter().enumerate() {
                elements[r * sub_dim + c] += a * psi[col_off | env].conj();
            }
        }
    }
    DensityMatrix::from_raw(sub_dim, elements)
}

/// Places bit `j` of `bits` at physical location `locs[j]`.
fn scatter(bits: usize, locs: &[usize]) -> usize {
    locs.iter()
        .enumerate()
        .filter(|(j, _)| (bits >> j) & 1 == 1)
        .fold(0usize, |acc, (_, loc)| acc | (1 << loc))
}
