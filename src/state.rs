//! Runtime state representation for the VM

use crate::error::RevertReason;
use crate::field::Fr;
use crate::side_effect::SideEffect;

use std::mem;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
/// Resulting state of an instruction set execution.
pub enum ExecuteState {
    /// The VM should proceed normally with the execution.
    #[default]
    Proceed,
    /// The current frame halted, returning some data.
    Return(Vec<Fr>),
    /// The current frame reverted.
    Revert {
        /// Cause of the revert.
        reason: RevertReason,
        /// Data returned with the revert. Empty unless the frame executed `REVERT`.
        data: Vec<Fr>,
    },
}

impl ExecuteState {
    /// Return true if the VM execution should continue.
    pub const fn should_continue(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// Outcome of a call, as seen by its caller.
pub struct CallResult {
    return_data: Vec<Fr>,
    reverted: bool,
    revert_reason: Option<RevertReason>,
    gas_used: u64,
    side_effects: Vec<SideEffect>,
}

impl CallResult {
    /// Successful call, with the side effects of the callee and its nested calls.
    pub const fn success(return_data: Vec<Fr>, side_effects: Vec<SideEffect>, gas_used: u64) -> Self {
        Self {
            return_data,
            reverted: false,
            revert_reason: None,
            gas_used,
            side_effects,
        }
    }

    /// Reverted call.
    pub const fn revert(reason: RevertReason, data: Vec<Fr>, gas_used: u64) -> Self {
        Self {
            return_data: data,
            reverted: true,
            revert_reason: Some(reason),
            gas_used,
            side_effects: vec![],
        }
    }

    /// Data returned by the call, or passed to `REVERT`.
    pub fn return_data(&self) -> &[Fr] {
        self.return_data.as_slice()
    }

    /// Consume the result, returning its data.
    pub fn into_return_data(self) -> Vec<Fr> {
        self.return_data
    }

    /// Whether the call reverted.
    pub const fn reverted(&self) -> bool {
        self.reverted
    }

    /// Cause of the revert, if any.
    pub const fn revert_reason(&self) -> Option<RevertReason> {
        self.revert_reason
    }

    /// Gas consumed by the call, including its nested calls.
    pub const fn gas_used(&self) -> u64 {
        self.gas_used
    }

    /// Side effects of the call in emission order. Always empty for a reverted call.
    pub fn side_effects(&self) -> &[SideEffect] {
        self.side_effects.as_slice()
    }

    /// Move the side effects out of the result.
    pub fn take_side_effects(&mut self) -> Vec<SideEffect> {
        mem::take(&mut self.side_effects)
    }
}
