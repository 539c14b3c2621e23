use crate::error::InterpreterError;
use crate::interpreter::Interpreter;
use crate::state::{CallResult, ExecuteState};
use crate::storage::StateManager;

use std::mem;

impl<S> Interpreter<'_, S>
where
    S: StateManager,
{
    /// Step the frame until it halts or reverts.
    ///
    /// Reverts are part of the returned [`CallResult`], without side effects; an `Err` means the
    /// state manager failed and the outcome of the frame is unknown.
    pub fn run(&mut self) -> Result<CallResult, InterpreterError> {
        let state = loop {
            let state = self.step()?;

            if !state.should_continue() {
                break state;
            }
        };

        let gas_used = self.machine.gas_used();

        let result = match state {
            ExecuteState::Return(data) => CallResult::success(data, mem::take(&mut self.side_effects), gas_used),
            ExecuteState::Revert { reason, data } => CallResult::revert(reason, data, gas_used),
            ExecuteState::Proceed => unreachable!("the loop only breaks on terminal states"),
        };

        Ok(result)
    }
}
