//! Side effects emitted by a call.

use crate::environment::Address;
use crate::field::Fr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// Effect of a frame on the world, reported to the caller once the frame halts.
///
/// A frame accumulates its own side effects in emission order. When it halts, they are
/// appended to the ones of its caller; when it reverts, they are dropped together with the
/// side effects of every frame it called.
pub enum SideEffect {
    /// New note hash.
    NoteHash {
        /// Contract emitting the note hash.
        address: Address,
        /// Note hash, as computed by the contract.
        value: Fr,
    },
    /// New nullifier.
    Nullifier {
        /// Contract emitting the nullifier.
        address: Address,
        /// Nullifier, unique per contract.
        value: Fr,
    },
    /// Public log.
    UnencryptedLog {
        /// Contract emitting the log.
        address: Address,
        /// Log payload.
        data: Vec<Fr>,
    },
    /// Message to an L1 contract.
    L2ToL1Message {
        /// Contract sending the message.
        sender: Address,
        /// Recipient on L1.
        recipient: Fr,
        /// Message content.
        content: Fr,
    },
}

impl SideEffect {
    /// Contract that emitted the side effect.
    pub const fn address(&self) -> &Address {
        match self {
            Self::NoteHash { address, .. }
            | Self::Nullifier { address, .. }
            | Self::UnencryptedLog { address, .. }
            | Self::L2ToL1Message { sender: address, .. } => address,
        }
    }

    /// Return `true` if this is a nullifier.
    pub const fn is_nullifier(&self) -> bool {
        matches!(self, Self::Nullifier { .. })
    }
}
