//! Trait definitions for storage backend

use crate::environment::Address;
use crate::field::Fr;

use std::borrow::Cow;
use std::error::Error as StdError;
use std::io;

mod memory;

pub use memory::MemoryStorage;

/// World state consumed by the interpreter: deployed bytecode, public storage and nullifiers.
///
/// Every call frame runs inside a checkpoint. A frame that halts commits its checkpoint into
/// the enclosing one; a frame that reverts discards every storage write and nullifier recorded
/// since its checkpoint, including those of the nested frames it committed. Reads always
/// observe the writes of the enclosing frames.
pub trait StateManager {
    /// Error implementation for reasons unspecified in the protocol.
    type DataError: StdError + Into<io::Error>;

    /// Bytecode deployed at `address`, if any.
    fn bytecode(&self, address: &Address) -> Result<Option<Cow<'_, [u8]>>, Self::DataError>;

    /// Value of a public storage slot. Unset slots read as zero.
    fn storage_read(&self, address: &Address, slot: &Fr) -> Result<Fr, Self::DataError>;

    /// Write a public storage slot.
    fn storage_write(&mut self, address: &Address, slot: &Fr, value: Fr) -> Result<(), Self::DataError>;

    /// Return `true` if `nullifier` was emitted by the contract at `address`, either in a
    /// previous transaction or by a frame of the current execution.
    fn nullifier_exists(&self, address: &Address, nullifier: &Fr) -> Result<bool, Self::DataError>;

    /// Record a nullifier of the contract at `address`.
    fn nullifier_write(&mut self, address: &Address, nullifier: Fr) -> Result<(), Self::DataError>;

    /// Open a checkpoint for a new frame.
    fn checkpoint(&mut self) -> Result<(), Self::DataError>;

    /// Merge the innermost checkpoint into the enclosing one.
    fn commit_checkpoint(&mut self) -> Result<(), Self::DataError>;

    /// Discard every write performed since the innermost checkpoint.
    fn revert_checkpoint(&mut self) -> Result<(), Self::DataError>;
}

impl<S> StateManager for &mut S
where
    S: StateManager,
{
    type DataError = S::DataError;

    fn bytecode(&self, address: &Address) -> Result<Option<Cow<'_, [u8]>>, Self::DataError> {
        <S as StateManager>::bytecode(self, address)
    }

    fn storage_read(&self, address: &Address, slot: &Fr) -> Result<Fr, Self::DataError> {
        <S as StateManager>::storage_read(self, address, slot)
    }

    fn storage_write(&mut self, address: &Address, slot: &Fr, value: Fr) -> Result<(), Self::DataError> {
        <S as StateManager>::storage_write(self, address, slot, value)
    }

    fn nullifier_exists(&self, address: &Address, nullifier: &Fr) -> Result<bool, Self::DataError> {
        <S as StateManager>::nullifier_exists(self, address, nullifier)
    }

    fn nullifier_write(&mut self, address: &Address, nullifier: Fr) -> Result<(), Self::DataError> {
        <S as StateManager>::nullifier_write(self, address, nullifier)
    }

    fn checkpoint(&mut self) -> Result<(), Self::DataError> {
        <S as StateManager>::checkpoint(self)
    }

    fn commit_checkpoint(&mut self) -> Result<(), Self::DataError> {
        <S as StateManager>::commit_checkpoint(self)
    }

    fn revert_checkpoint(&mut self) -> Result<(), Self::DataError> {
        <S as StateManager>::revert_checkpoint(self)
    }
}
