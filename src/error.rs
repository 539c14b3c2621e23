//! Runtime interpreter error implementation

use crate::environment::Address;

use thiserror::Error;

use std::convert::Infallible as StdInfallible;
use std::error::Error as StdError;
use std::{fmt, io};

/// Failure to decode a bytecode buffer. Decoding never partially succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DecodeError {
    /// The byte at `position` isn't an opcode of the instruction set.
    #[error("unknown opcode {opcode:#04x} at byte {position}")]
    UnknownOpcode {
        /// Offending byte.
        opcode: u8,
        /// Offset of the byte in the buffer.
        position: usize,
    },
    /// The buffer ended before all the operands of an instruction were read.
    #[error(
        "truncated bytecode: opcode {opcode:#04x} at byte {position} expects {expected} operand bytes, {available} \
         available"
    )]
    TruncatedBytecode {
        /// Opcode of the incomplete instruction.
        opcode: u8,
        /// Offset of the opcode in the buffer.
        position: usize,
        /// Operand bytes required by the opcode.
        expected: usize,
        /// Bytes left in the buffer after the opcode.
        available: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[non_exhaustive]
/// Revert reason representation for the interpreter.
///
/// A revert is a deterministic, expected outcome of a frame: it must never be retried.
pub enum RevertReason {
    /// Found `REVERT` instruction.
    ExplicitRevert = 0x01,
    /// Execution ran out of gas.
    OutOfGas = 0x02,
    /// Division by the zero field element.
    DivisionByZero = 0x03,
    /// The maximum nesting of contract calls was reached.
    CallDepthExceeded = 0x04,
    /// Attempt to modify the state inside a static call.
    StaticCallStateModification = 0x05,
    /// Jump target outside of the program.
    InvalidJumpDestination = 0x06,
    /// A memory range doesn't fit the address space.
    MemoryOverflow = 0x07,
    /// The requested environment variable doesn't exist.
    InvalidEnvironmentVariable = 0x08,
    /// No bytecode is deployed at the called address.
    ContractNotFound = 0x09,
    /// The called contract bytecode couldn't be decoded.
    MalformedBytecode = 0x0a,
    /// A memory cell used as a size or gas amount holds a value too large for it.
    OperandOutOfRange = 0x0b,
    /// The nullifier was already emitted by the contract.
    DuplicateNullifier = 0x0c,
    /// A memory window is longer than the VM allows to materialize at once.
    SliceTooLarge = 0x0d,
}

impl RevertReason {
    /// Return `true` if the frame ended with the `REVERT` instruction.
    ///
    /// Every other reason is an exceptional halt that consumes all the gas of the frame.
    pub const fn is_explicit(&self) -> bool {
        matches!(self, Self::ExplicitRevert)
    }
}

impl fmt::Display for RevertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl StdError for RevertReason {}

/// Interpreter runtime error variants.
///
/// Reverts are not errors: they are reported as a reverted
/// [`CallResult`](crate::state::CallResult). This type covers the failures the caller of the
/// VM is expected to handle, possibly with a retry.
#[derive(Debug, Error)]
pub enum InterpreterError {
    /// The bytecode of the called contract is malformed.
    #[error("Failed to decode the bytecode: {0}")]
    Decode(#[from] DecodeError),
    /// No bytecode is deployed at the called address.
    #[error("No bytecode found for {0}")]
    BytecodeNotFound(Address),
    /// I/O and OS related errors.
    #[error("Unrecoverable error: {0}")]
    Io(#[from] io::Error),
}

impl InterpreterError {
    /// Produces a `halt` error from `io`.
    pub fn from_io<E>(e: E) -> Self
    where
        E: Into<io::Error>,
    {
        Self::Io(e.into())
    }

    /// Return the revert reason a callee frame reports when this error happens during a nested
    /// call, if the error is attributable to the callee.
    pub const fn callee_revert_reason(&self) -> Option<RevertReason> {
        match self {
            Self::Decode(_) => Some(RevertReason::MalformedBytecode),
            Self::BytecodeNotFound(_) => Some(RevertReason::ContractNotFound),
            Self::Io(_) => None,
        }
    }
}

impl From<InterpreterError> for io::Error {
    fn from(e: InterpreterError) -> Self {
        io::Error::new(io::ErrorKind::Other, e)
    }
}

impl PartialEq for InterpreterError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Decode(s), Self::Decode(o)) => s == o,
            (Self::BytecodeNotFound(s), Self::BytecodeNotFound(o)) => s == o,
            (Self::Io(s), Self::Io(o)) => s.kind() == o.kind(),
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
/// Runtime error description that should either be specified in the protocol or
/// halt the execution.
pub enum RuntimeError {
    /// Specified error with well-formed fallback strategy: the frame reverts.
    #[error(transparent)]
    Revert(#[from] RevertReason),
    /// Unspecified error that should halt the execution.
    #[error(transparent)]
    Halt(#[from] io::Error),
}

impl RuntimeError {
    /// Produces a `halt` error from `io`.
    pub fn from_io<E>(e: E) -> Self
    where
        E: Into<io::Error>,
    {
        Self::Halt(e.into())
    }
}

impl PartialEq for RuntimeError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RuntimeError::Revert(s), RuntimeError::Revert(o)) => s == o,
            (RuntimeError::Halt(s), RuntimeError::Halt(o)) => s.kind() == o.kind(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Infallible implementation that converts into [`io::Error`].
pub struct Infallible(StdInfallible);

impl fmt::Display for Infallible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl StdError for Infallible {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.0)
    }
}

impl<E> From<E> for Infallible
where
    E: Into<StdInfallible>,
{
    fn from(e: E) -> Infallible {
        Self(e.into())
    }
}

impl From<Infallible> for io::Error {
    fn from(_e: Infallible) -> io::Error {
        unreachable!()
    }
}
