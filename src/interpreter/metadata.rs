use super::Interpreter;
use crate::environment::EnvironmentVariable;
use crate::error::{RevertReason, RuntimeError};

impl<S> Interpreter<'_, S> {
    pub(crate) fn get_env_var(&mut self, var: u32, dst: u32) -> Result<(), RuntimeError> {
        let var = EnvironmentVariable::try_from(var).map_err(|_| RevertReason::InvalidEnvironmentVariable)?;
        let value = self.environment.variable(var);

        self.machine.write_memory(dst, value);
        self.machine.inc_pc();

        Ok(())
    }
}
