use super::Memory;
use crate::error::RevertReason;
use crate::field::Fr;
use crate::instruction::Instruction;
use crate::state::ExecuteState;

/// Status of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineStatus {
    /// The frame is executing.
    Running,
    /// The frame returned normally.
    Halted {
        /// Data returned to the caller.
        return_data: Vec<Fr>,
    },
    /// The frame reverted.
    Reverted {
        /// Cause of the revert.
        reason: RevertReason,
        /// Data returned to the caller.
        data: Vec<Fr>,
    },
}

impl MachineStatus {
    /// Return `true` if the frame stopped.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Mutable state of a frame, owned by exactly one interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    memory: Memory,
    instructions: Vec<Instruction>,
    pc: usize,
    gas_limit: u64,
    gas_left: u64,
    status: MachineStatus,
    nested_return_data: Vec<Fr>,
}

impl MachineState {
    /// Running state at `pc = 0` with an empty memory.
    pub fn new(instructions: Vec<Instruction>, gas_limit: u64) -> Self {
        Self {
            memory: Memory::new(),
            instructions,
            pc: 0,
            gas_limit,
            gas_left: gas_limit,
            status: MachineStatus::Running,
            nested_return_data: vec![],
        }
    }

    /// Memory of the frame.
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mutable memory of the frame.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Value of the cell at `offset`; zero if never written.
    pub fn read_memory(&self, offset: u32) -> Fr {
        self.memory.read(offset)
    }

    /// Overwrite the cell at `offset`.
    pub fn write_memory(&mut self, offset: u32, value: Fr) {
        self.memory.write(offset, value)
    }

    /// Values of `[offset, offset + size[`.
    pub fn read_slice(&self, offset: u32, size: u32) -> Result<Vec<Fr>, RevertReason> {
        self.memory.read_slice(offset, size)
    }

    /// Write `values` starting at `offset`.
    pub fn write_slice(&mut self, offset: u32, values: Vec<Fr>) -> Result<(), RevertReason> {
        self.memory.write_slice(offset, values)
    }

    /// Complete data returned, or passed to `REVERT`, by the last nested call of the frame.
    ///
    /// Empty until the frame performs a call.
    pub fn nested_return_data(&self) -> &[Fr] {
        self.nested_return_data.as_slice()
    }

    /// Replace the data of the last nested call.
    pub fn set_nested_return_data(&mut self, data: Vec<Fr>) {
        self.nested_return_data = data;
    }

    /// Decoded program of the frame.
    pub fn instructions(&self) -> &[Instruction] {
        self.instructions.as_slice()
    }

    /// Instruction at the program counter, if the counter is inside the program.
    pub fn current_instruction(&self) -> Option<&Instruction> {
        self.instructions.get(self.pc)
    }

    /// Index of the next instruction.
    pub const fn pc(&self) -> usize {
        self.pc
    }

    /// Assign the program counter.
    pub fn set_pc(&mut self, pc: usize) {
        self.pc = pc;
    }

    /// Move to the next instruction.
    pub fn inc_pc(&mut self) {
        self.pc = self.pc.saturating_add(1);
    }

    /// Return `true` if the program counter moved past the last instruction.
    pub fn is_past_end(&self) -> bool {
        self.pc >= self.instructions.len()
    }

    /// Gas available to the frame.
    pub const fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Gas not consumed yet.
    pub const fn gas_left(&self) -> u64 {
        self.gas_left
    }

    /// Gas consumed so far.
    pub const fn gas_used(&self) -> u64 {
        self.gas_limit - self.gas_left
    }

    /// Consume `gas`, failing without consuming anything if not enough is left.
    pub fn consume_gas(&mut self, gas: u64) -> Result<(), RevertReason> {
        self.gas_left = self.gas_left.checked_sub(gas).ok_or(RevertReason::OutOfGas)?;

        Ok(())
    }

    /// Status of the frame.
    pub const fn status(&self) -> &MachineStatus {
        &self.status
    }

    /// Return `true` if the frame stopped.
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Stop the frame normally.
    pub fn halt(&mut self, return_data: Vec<Fr>) {
        self.status = MachineStatus::Halted { return_data };
    }

    /// Stop the frame with a revert.
    ///
    /// Any reason but [`RevertReason::ExplicitRevert`] consumes all the gas left.
    pub fn revert(&mut self, reason: RevertReason, data: Vec<Fr>) {
        if !reason.is_explicit() {
            self.gas_left = 0;
        }

        self.status = MachineStatus::Reverted { reason, data };
    }

    /// Execution state matching a terminal status.
    pub fn terminal_state(&self) -> Option<ExecuteState> {
        match &self.status {
            MachineStatus::Running => None,
            MachineStatus::Halted { return_data } => Some(ExecuteState::Return(return_data.clone())),
            MachineStatus::Reverted { reason, data } => Some(ExecuteState::Revert {
                reason: *reason,
                data: data.clone(),
            }),
        }
    }
}
