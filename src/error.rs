use thiserror::Error;

/// Errors raised by set-algebra operations and checked accessors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BitSetError {
    /// Dense operands must hold the same number of bits.
    #[error("size mismatch: receiver holds {left} bits, operand holds {right}")]
    SizeMismatch { left: u64, right: u64 },
    /// A dense container was combined with a paged one.
    #[error("kind mismatch: cannot combine a {left} container with a {right} container")]
    KindMismatch {
        left: &'static str,
        right: &'static str,
    },
    #[error("bit index {index} is out of range for a {size}-bit vector")]
    IndexOutOfRange { index: u64, size: u64 },
}
