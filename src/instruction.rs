//! AVM instruction set.
//!
//! All operands are `u32`. Depending on the opcode they are either memory offsets
//! (`*_offset`), instruction indices (`loc`) or immediate values. Sizes and offsets known only
//! at run time are read from the memory cell an operand points to.

use itertools::Itertools;

use std::fmt;

impl_instructions! {
    "Adds two field elements."
    0x01 ADD add [a_offset b_offset dst_offset]
    "Subtracts two field elements."
    0x02 SUB sub [a_offset b_offset dst_offset]
    "Multiplies two field elements."
    0x03 MUL mul [a_offset b_offset dst_offset]
    "Divides two field elements."
    0x04 DIV div [a_offset b_offset dst_offset]
    "Compares two field elements for equality."
    0x05 EQ eq [a_offset b_offset dst_offset]
    "Less than comparison of the canonical integers."
    0x06 LT lt [a_offset b_offset dst_offset]
    "Less than or equal comparison of the canonical integers."
    0x07 LTE lte [a_offset b_offset dst_offset]

    "Sets a memory cell to an immediate value."
    0x10 SET set [value dst_offset]
    "Copies a memory cell."
    0x11 MOV mov [src_offset dst_offset]
    "Copies a window of the calldata into memory."
    0x12 CALLDATACOPY calldata_copy [cd_offset copy_size dst_offset]
    "Writes the length of the data returned by the last nested call."
    0x13 RETURNDATASIZE returndata_size [dst_offset]
    "Copies a window of the data returned by the last nested call into memory."
    0x14 RETURNDATACOPY returndata_copy [rd_start_offset copy_size_offset dst_offset]

    "Reads an environment variable."
    0x20 GETENVVAR get_env_var [var dst_offset]

    "Jumps to an instruction index."
    0x30 JUMP jump [loc]
    "Jumps to an instruction index if the condition cell is not zero."
    0x31 JUMPI jumpi [loc cond_offset]
    "Halts the frame returning a memory slice."
    0x32 RETURN ret [ret_offset ret_size]
    "Reverts the frame returning a memory slice."
    0x33 REVERT revert [ret_offset ret_size]

    "Reads a public storage slot of the current contract."
    0x40 SLOAD sload [slot_offset dst_offset]
    "Writes a public storage slot of the current contract."
    0x41 SSTORE sstore [src_offset slot_offset]

    "Calls another contract."
    0x50 CALL call [gas_offset addr_offset args_offset args_size_offset ret_offset ret_size success_offset]
    "Calls another contract, forbidding state modifications."
    0x51 STATICCALL static_call [gas_offset addr_offset args_offset args_size_offset ret_offset ret_size success_offset]

    "Emits a note hash."
    0x60 EMITNOTEHASH emit_note_hash [note_hash_offset]
    "Emits a nullifier of the current contract."
    0x61 EMITNULLIFIER emit_nullifier [nullifier_offset]
    "Checks whether a contract emitted a nullifier."
    0x62 NULLIFIEREXISTS nullifier_exists [nullifier_offset address_offset dst_offset]
    "Emits a public log."
    0x63 EMITUNENCRYPTEDLOG emit_unencrypted_log [log_offset log_size_offset]
    "Sends a message to L1."
    0x64 SENDL2TOL1MSG send_l2_to_l1_message [recipient_offset content_offset]
}

/// Arguments shared by the call family of instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallArgs {
    /// Memory cell holding the gas to forward.
    pub gas_offset: u32,
    /// Memory cell holding the target address.
    pub addr_offset: u32,
    /// Start of the arguments in memory.
    pub args_offset: u32,
    /// Memory cell holding the number of arguments.
    pub args_size_offset: u32,
    /// Start of the memory window receiving the return data.
    pub ret_offset: u32,
    /// Number of return words to write back.
    pub ret_size: u32,
    /// Memory cell receiving `1` on success, `0` on revert.
    pub success_offset: u32,
}

impl From<CALL> for CallArgs {
    fn from(op: CALL) -> Self {
        let (gas_offset, addr_offset, args_offset, args_size_offset, ret_offset, ret_size, success_offset) = op.unpack();

        Self {
            gas_offset,
            addr_offset,
            args_offset,
            args_size_offset,
            ret_offset,
            ret_size,
            success_offset,
        }
    }
}

impl From<STATICCALL> for CallArgs {
    fn from(op: STATICCALL) -> Self {
        let (gas_offset, addr_offset, args_offset, args_size_offset, ret_offset, ret_size, success_offset) = op.unpack();

        Self {
            gas_offset,
            addr_offset,
            args_offset,
            args_size_offset,
            ret_offset,
            ret_size,
            success_offset,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.opcode(), self.operands().iter().join(", "))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
