use crate::environment::Address;
use crate::error::Infallible;
use crate::field::Fr;
use crate::storage::StateManager;

use sha3::{Digest, Keccak256};

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

/// Change undone when its checkpoint is reverted.
#[derive(Debug, Clone, PartialEq, Eq)]
enum JournalEntry {
    /// A slot was written; `previous` is restored.
    Storage {
        address: Address,
        slot: Fr,
        previous: Option<Fr>,
    },
    /// A nullifier was recorded; it is removed.
    Nullifier { address: Address, nullifier: Fr },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// In-memory storage implementation for the interpreter.
///
/// Writes are applied in place and recorded in an undo journal, one layer per open
/// checkpoint. Committing a checkpoint hands its layer to the enclosing one, so an outer
/// revert also undoes the committed writes of the inner frames.
pub struct MemoryStorage {
    contracts: HashMap<Address, Vec<u8>>,
    state: HashMap<(Address, Fr), Fr>,
    nullifiers: HashSet<(Address, Fr)>,
    journal: Vec<Vec<JournalEntry>>,
}

impl MemoryStorage {
    /// Create a new memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Content address of `bytecode`: its keccak256 digest reduced into the field.
    pub fn bytecode_address(bytecode: &[u8]) -> Address {
        let digest = Keccak256::digest(bytecode);

        Address::from(Fr::from_be_bytes_mod_order(digest.as_slice()))
    }

    /// Deploy `bytecode` at its content address.
    pub fn deploy(&mut self, bytecode: Vec<u8>) -> Address {
        let address = Self::bytecode_address(&bytecode);

        tracing::debug!(%address, len = bytecode.len(), "deployed bytecode");

        self.contracts.insert(address.clone(), bytecode);

        address
    }

    /// Deploy `bytecode` at an arbitrary address, replacing any previous bytecode.
    pub fn insert_contract(&mut self, address: Address, bytecode: Vec<u8>) -> Option<Vec<u8>> {
        self.contracts.insert(address, bytecode)
    }

    /// Fetch a slot of the contract state.
    pub fn contract_state(&self, address: &Address, slot: &Fr) -> Fr {
        self.state
            .get(&(address.clone(), slot.clone()))
            .cloned()
            .unwrap_or_default()
    }

    /// Record a nullifier outside of any checkpoint, as emitted by a previous transaction.
    pub fn insert_nullifier(&mut self, address: Address, nullifier: Fr) -> bool {
        self.nullifiers.insert((address, nullifier))
    }

    /// Return `true` if the contract at `address` emitted `nullifier`.
    pub fn contains_nullifier(&self, address: &Address, nullifier: &Fr) -> bool {
        self.nullifiers.contains(&(address.clone(), nullifier.clone()))
    }

    fn record(&mut self, entry: JournalEntry) {
        if let Some(layer) = self.journal.last_mut() {
            layer.push(entry);
        }
    }

    /// Number of open checkpoints.
    pub fn checkpoints(&self) -> usize {
        self.journal.len()
    }
}

impl StateManager for MemoryStorage {
    type DataError = Infallible;

    fn bytecode(&self, address: &Address) -> Result<Option<Cow<'_, [u8]>>, Infallible> {
        Ok(self.contracts.get(address).map(|b| Cow::Borrowed(b.as_slice())))
    }

    fn storage_read(&self, address: &Address, slot: &Fr) -> Result<Fr, Infallible> {
        Ok(self.contract_state(address, slot))
    }

    fn storage_write(&mut self, address: &Address, slot: &Fr, value: Fr) -> Result<(), Infallible> {
        let previous = self.state.insert((address.clone(), slot.clone()), value);

        self.record(JournalEntry::Storage {
            address: address.clone(),
            slot: slot.clone(),
            previous,
        });

        Ok(())
    }

    fn nullifier_exists(&self, address: &Address, nullifier: &Fr) -> Result<bool, Infallible> {
        Ok(self.contains_nullifier(address, nullifier))
    }

    fn nullifier_write(&mut self, address: &Address, nullifier: Fr) -> Result<(), Infallible> {
        if self.nullifiers.insert((address.clone(), nullifier.clone())) {
            self.record(JournalEntry::Nullifier {
                address: address.clone(),
                nullifier,
            });
        }

        Ok(())
    }

    fn checkpoint(&mut self) -> Result<(), Infallible> {
        self.journal.push(vec![]);

        Ok(())
    }

    fn commit_checkpoint(&mut self) -> Result<(), Infallible> {
        match (self.journal.pop(), self.journal.last_mut()) {
            (Some(layer), Some(parent)) => parent.extend(layer),
            (None, _) => tracing::warn!("commit without an open checkpoint"),
            _ => (),
        }

        Ok(())
    }

    fn revert_checkpoint(&mut self) -> Result<(), Infallible> {
        let layer = match self.journal.pop() {
            Some(layer) => layer,
            None => {
                tracing::warn!("revert without an open checkpoint");
                return Ok(());
            }
        };

        layer.into_iter().rev().for_each(|entry| match entry {
            JournalEntry::Storage {
                address,
                slot,
                previous: Some(value),
            } => {
                self.state.insert((address, slot), value);
            }

            JournalEntry::Storage {
                address,
                slot,
                previous: None,
            } => {
                self.state.remove(&(address, slot));
            }

            JournalEntry::Nullifier { address, nullifier } => {
                self.nullifiers.remove(&(address, nullifier));
            }
        });

        Ok(())
    }
}
