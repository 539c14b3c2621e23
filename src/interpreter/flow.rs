use super::Interpreter;
use crate::error::{RevertReason, RuntimeError};
use crate::field::Fr;
use crate::gas::GasUnit;
use crate::state::ExecuteState;

impl<S> Interpreter<'_, S> {
    pub(crate) fn jump(&mut self, loc: u32) -> Result<(), RuntimeError> {
        let loc = loc as usize;

        if loc >= self.machine.instructions().len() {
            return Err(RevertReason::InvalidJumpDestination.into());
        }

        self.machine.set_pc(loc);

        Ok(())
    }

    pub(crate) fn jump_if(&mut self, loc: u32, cond: u32) -> Result<(), RuntimeError> {
        if self.machine.read_memory(cond).is_zero() {
            self.machine.inc_pc();

            Ok(())
        } else {
            self.jump(loc)
        }
    }

    pub(crate) fn ret(&mut self, offset: u32, size: u32) -> Result<ExecuteState, RuntimeError> {
        let data = self.return_data(offset, size)?;

        self.machine.halt(data.clone());

        Ok(ExecuteState::Return(data))
    }

    pub(crate) fn revert(&mut self, offset: u32, size: u32) -> Result<ExecuteState, RuntimeError> {
        let data = self.return_data(offset, size)?;
        let reason = RevertReason::ExplicitRevert;

        tracing::debug!(address = %self.environment.address(), len = data.len(), "explicit revert");

        self.machine.revert(reason, data.clone());

        Ok(ExecuteState::Revert { reason, data })
    }

    fn return_data(&mut self, offset: u32, size: u32) -> Result<Vec<Fr>, RuntimeError> {
        self.check_window(offset, size)?;
        self.gas_charge(GasUnit::MemoryRead(size as u64).cost())?;

        Ok(self.machine.read_slice(offset, size)?)
    }
}
