//! [`Interpreter`] implementation

use crate::environment::ExecutionEnvironment;
use crate::instruction::Instruction;
use crate::params::VmParams;
use crate::side_effect::SideEffect;

mod alu;
mod blockchain;
mod contract;
mod executors;
mod flow;
mod gas;
mod machine;
mod memory;
mod metadata;
mod side_effect;

pub use machine::{MachineState, MachineStatus};
pub use memory::Memory;

#[derive(Debug)]
/// VM interpreter of a single call frame.
///
/// The interpreter owns the machine state of its frame and borrows the state manager shared
/// by every frame of the execution. Nested calls run in a new interpreter over the same
/// state manager; frames never share memory. Side effects are accumulated per frame and
/// handed to the caller when the frame halts.
pub struct Interpreter<'a, S> {
    environment: ExecutionEnvironment,
    machine: MachineState,
    storage: &'a mut S,
    params: VmParams,
    side_effects: Vec<SideEffect>,
}

impl<'a, S> Interpreter<'a, S> {
    /// Create a frame at `pc = 0` over the decoded `instructions`.
    pub fn new(
        storage: &'a mut S,
        environment: ExecutionEnvironment,
        instructions: Vec<Instruction>,
        gas_limit: u64,
        params: VmParams,
    ) -> Self {
        Self {
            environment,
            machine: MachineState::new(instructions, gas_limit),
            storage,
            params,
            side_effects: vec![],
        }
    }

    /// Environment of the frame.
    pub const fn environment(&self) -> &ExecutionEnvironment {
        &self.environment
    }

    /// Machine state of the frame.
    pub const fn machine(&self) -> &MachineState {
        &self.machine
    }

    /// Mutable machine state of the frame.
    pub fn machine_mut(&mut self) -> &mut MachineState {
        &mut self.machine
    }

    /// Memory of the frame.
    pub const fn memory(&self) -> &Memory {
        self.machine.memory()
    }

    /// Mutable memory of the frame.
    pub fn memory_mut(&mut self) -> &mut Memory {
        self.machine.memory_mut()
    }

    /// State manager of the execution.
    pub fn storage(&self) -> &S {
        &*self.storage
    }

    /// Side effects emitted so far by the frame and the nested calls it completed.
    pub fn side_effects(&self) -> &[SideEffect] {
        self.side_effects.as_slice()
    }

    /// VM parameters.
    pub const fn params(&self) -> &VmParams {
        &self.params
    }
}
