use super::memory::padded_window;
use super::Interpreter;
use crate::environment::{Address, ExecutionEnvironment};
use crate::error::{RevertReason, RuntimeError};
use crate::executor;
use crate::field::Fr;
use crate::gas::GasUnit;
use crate::instruction::CallArgs;
use crate::params::StaticCallPolicy;
use crate::state::CallResult;
use crate::storage::StateManager;

/// Flavor of a nested call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallKind {
    Call,
    StaticCall,
}

impl<S> Interpreter<'_, S>
where
    S: StateManager,
{
    /// Run a nested frame and write its outcome into this frame.
    ///
    /// The callee failing, for whatever protocol reason, only sets the success flag to zero.
    /// Side effects of a successful callee are appended to the ones of this frame. The complete
    /// data of the callee stays readable with `RETURNDATASIZE` and `RETURNDATACOPY` until the
    /// next call.
    pub(crate) fn call(&mut self, args: CallArgs, kind: CallKind) -> Result<(), RuntimeError> {
        let CallArgs {
            gas_offset,
            addr_offset,
            args_offset,
            args_size_offset,
            ret_offset,
            ret_size,
            success_offset,
        } = args;

        let args_size = self.read_u32(args_size_offset)?;

        self.check_window(args_offset, args_size)?;
        self.check_window(ret_offset, ret_size)?;

        self.gas_charge(
            GasUnit::MemoryRead(args_size as u64)
                .join(GasUnit::MemoryWrite(ret_size as u64 + 1))
                .cost(),
        )?;

        // a request larger than the gas left forwards everything
        let gas = self
            .machine
            .read_memory(gas_offset)
            .to_u64()
            .unwrap_or(u64::MAX)
            .min(self.machine.gas_left());

        let target = Address::from(self.machine.read_memory(addr_offset));
        let calldata = self.machine.read_slice(args_offset, args_size)?;

        let mut result = match self.nested_environment(target, calldata, kind) {
            Some(environment) => self.nested_call(environment, gas)?,
            None => {
                tracing::debug!(
                    depth = self.environment.contract_call_depth(),
                    max = self.params.max_call_depth,
                    "call depth exceeded"
                );

                // no gas is consumed by a frame that never started
                CallResult::revert(RevertReason::CallDepthExceeded, vec![], 0)
            }
        };

        self.gas_charge(result.gas_used())?;

        let success = !result.reverted();

        self.side_effects.extend(result.take_side_effects());
        self.machine.set_nested_return_data(result.into_return_data());

        let data = padded_window(self.machine.nested_return_data(), 0, ret_size);

        self.machine.write_slice(ret_offset, data)?;
        self.machine.write_memory(success_offset, Fr::from(success));
        self.machine.inc_pc();

        Ok(())
    }

    /// Environment of the callee, or `None` if the call depth limit is reached.
    fn nested_environment(&self, target: Address, calldata: Vec<Fr>, kind: CallKind) -> Option<ExecutionEnvironment> {
        if self.environment.contract_call_depth() >= self.params.max_call_depth {
            return None;
        }

        let function_name = calldata.first().map(ToString::to_string).unwrap_or_default();

        let is_static = match (kind, self.params.static_call_policy) {
            (CallKind::StaticCall, _) => true,
            (CallKind::Call, StaticCallPolicy::Sticky) => self.environment.is_static_call(),
            (CallKind::Call, StaticCallPolicy::Explicit) => false,
        };

        let environment = if is_static {
            self.environment
                .derive_for_nested_static_call(target, calldata, function_name)
        } else {
            self.environment.derive_for_nested_call(target, calldata, function_name)
        };

        Some(environment)
    }

    fn nested_call(&mut self, environment: ExecutionEnvironment, gas: u64) -> Result<CallResult, RuntimeError> {
        let target = environment.address().clone();

        match executor::execute_frame(&mut *self.storage, environment, gas, self.params) {
            Ok(result) => Ok(result),

            Err(e) => match e.callee_revert_reason() {
                Some(reason) => {
                    tracing::debug!(%target, error = %e, "nested call failed");

                    Ok(CallResult::revert(reason, vec![], gas))
                }

                None => Err(RuntimeError::from_io(e)),
            },
        }
    }
}
