//! Aztec public VM implementation

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(unused_must_use)]
// Opcode types follow the uppercase mnemonics of the instruction table.
#![allow(clippy::upper_case_acronyms)]

#[macro_use]
mod macros;

pub mod consts;
pub mod decoder;
pub mod environment;
pub mod error;
pub mod executor;
pub mod field;
pub mod gas;
pub mod instruction;
pub mod interpreter;
pub mod params;
pub mod side_effect;
pub mod state;
pub mod storage;
pub mod util;

pub mod prelude {
    //! Required implementations for full functionality
    #[doc(no_inline)]
    pub use crate::decoder::{decode, encode, InstructionSet};
    #[doc(no_inline)]
    pub use crate::environment::{Address, EnvironmentVariable, ExecutionEnvironment, GlobalVariables};
    #[doc(no_inline)]
    pub use crate::error::{DecodeError, Infallible, InterpreterError, RevertReason, RuntimeError};
    #[doc(no_inline)]
    pub use crate::executor::Executor;
    #[doc(no_inline)]
    pub use crate::field::Fr;
    #[doc(no_inline)]
    pub use crate::instruction::{Instruction, Opcode};
    #[doc(no_inline)]
    pub use crate::interpreter::{Interpreter, MachineState, MachineStatus, Memory};
    #[doc(no_inline)]
    pub use crate::params::{StaticCallPolicy, VmParams};
    #[doc(no_inline)]
    pub use crate::side_effect::SideEffect;
    #[doc(no_inline)]
    pub use crate::state::{CallResult, ExecuteState};
    #[doc(no_inline)]
    pub use crate::storage::{MemoryStorage, StateManager};

    #[cfg(feature = "test-helpers")]
    pub use crate::util::test_helpers::TestBuilder;
}
