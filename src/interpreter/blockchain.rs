use super::Interpreter;
use crate::error::RuntimeError;
use crate::storage::StateManager;

impl<S> Interpreter<'_, S>
where
    S: StateManager,
{
    pub(crate) fn sload(&mut self, slot: u32, dst: u32) -> Result<(), RuntimeError> {
        let slot = self.machine.read_memory(slot);
        let value = self
            .storage
            .storage_read(self.environment.address(), &slot)
            .map_err(RuntimeError::from_io)?;

        self.machine.write_memory(dst, value);
        self.machine.inc_pc();

        Ok(())
    }

    pub(crate) fn sstore(&mut self, src: u32, slot: u32) -> Result<(), RuntimeError> {
        self.assert_not_static()?;

        let value = self.machine.read_memory(src);
        let slot = self.machine.read_memory(slot);

        self.storage
            .storage_write(self.environment.address(), &slot, value)
            .map_err(RuntimeError::from_io)?;

        self.machine.inc_pc();

        Ok(())
    }
}
