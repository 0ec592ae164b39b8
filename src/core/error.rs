//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Location of a qubit inside a register.
///
/// Locations are 0-based and follow little-endian basis indexing: location `k`
/// is bit `k` of a basis-state index. They are displayed 1-based (`q1`, `q2`, ...)
/// so that bit 0 reads as the first qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitLoc(pub usize);

impl QubitLoc {
    /// Mask selecting this qubit's bit in a basis-state index.
    pub fn mask(self) -> usize {
        1 << self.0
    }
}

impl fmt::Display for QubitLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0 + 1)
    }
}

/// Errors raised while building registers or projecting them onto density matrices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DmError {
    /// A vector or matrix side length is not a power of two.
    #[error("Invalid Dimension: length {len} is not a power of two")]
    InvalidDimension {
        /// The offending length
        len: usize,
    },

    /// Data does not have the length its declared shape requires.
    #[error("Shape Mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch {
        /// Length required by the declared shape
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// Projection of a single pure state requires a batch dimension of exactly one.
    #[error("Batch Size: expected a batch of 1, register carries {batch}")]
    BatchSize {
        /// Batch size of the register
        batch: usize,
    },

    /// A batch member was requested that the register does not carry.
    #[error("Batch Index: member {index} requested from a batch of {batch}")]
    BatchIndex {
        /// Requested member
        index: usize,
        /// Batch size of the register
        batch: usize,
    },

    /// A qubit location lies outside the register.
    #[error("Qubit Out Of Range: {loc} does not exist in a {num_qubits}-qubit register")]
    QubitOutOfRange {
        /// The offending location
        loc: QubitLoc,
        /// Number of qubits in the register
        num_qubits: usize,
    },

    /// The same qubit was listed twice in a focus.
    #[error("Duplicate Qubit: {loc} appears more than once")]
    DuplicateQubit {
        /// The repeated location
        loc: QubitLoc,
    },

    /// A state with zero norm cannot be normalized.
    #[error("Zero Norm: state vector has vanishing norm")]
    ZeroNorm,

    /// A state or matrix failed a physical-validity check (norm, trace, Hermiticity, positivity).
    #[error("Incoherence Violation: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// The requested operation is inconsistent with the arguments given.
    #[error("Invalid Operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DmError>;

/// Returns `n` such that `len == 2^n`, or `InvalidDimension`.
pub(crate) fn qubits_for_len(len: usize) -> Result<usize> {
    if len.is_power_of_two() {
        Ok(len.trailing_zeros() as usize)
    } else {
        Err(DmError::InvalidDimension { len })
    }
}
