use thiserror::Error;

/// An internal consistency fault.
///
/// These indicate a computation that must be exact (for example, a pitch
/// that was just aligned not dividing evenly by the alignment) was not.
/// They are never recovered from; the surface layout would be wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// A division that must be exact left a remainder.
    #[error("Inexact division: {dividend} is not a multiple of {divisor}")]
    InexactDivision {
        /// The value being divided.
        dividend: u64,
        /// The value it was divided by.
        divisor: u64,
    },

    /// A division by zero was attempted.
    #[error("Division of {0} by zero")]
    DivisionByZero(u64),

    /// The bank swap width of a bank swapped surface resolved to zero.
    #[error("Bank swap width resolved to zero")]
    ZeroBankSwapWidth,

    /// A computed value did not fit the integer type it is stored in.
    #[error("Value {0} overflows its storage type")]
    Overflow(u64),
}
