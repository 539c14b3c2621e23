//! Entry point of a contract call.

use crate::decoder::decode;
use crate::environment::ExecutionEnvironment;
use crate::error::InterpreterError;
use crate::field::Fr;
use crate::instruction::Instruction;
use crate::interpreter::Interpreter;
use crate::params::VmParams;
use crate::state::CallResult;
use crate::storage::StateManager;

#[derive(Debug, Clone)]
/// Top-level caller of a contract.
///
/// Holds no state across calls other than the state manager.
pub struct Executor<S> {
    storage: S,
    environment: ExecutionEnvironment,
    params: VmParams,
}

impl<S> Executor<S> {
    /// Create an executor calling `environment.address()`.
    pub const fn new(storage: S, environment: ExecutionEnvironment, params: VmParams) -> Self {
        Self {
            storage,
            environment,
            params,
        }
    }

    /// State manager.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable state manager.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Consume the executor, returning its state manager.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Environment of the top-level frame, without calldata.
    pub const fn environment(&self) -> &ExecutionEnvironment {
        &self.environment
    }

    /// VM parameters.
    pub const fn params(&self) -> &VmParams {
        &self.params
    }
}

impl<S> Executor<S>
where
    S: StateManager,
{
    /// Call the contract with `calldata`, using the whole gas limit of the parameters.
    ///
    /// A revert is a successful outcome of this function; errors are reserved to a missing or
    /// malformed contract and to state manager failures.
    pub fn call(&mut self, calldata: Vec<Fr>) -> Result<CallResult, InterpreterError> {
        let environment = self.environment.with_calldata(calldata);

        execute_frame(&mut self.storage, environment, self.params.gas_limit, self.params)
    }
}

/// Resolve, decode and run the contract of `environment` inside its own storage checkpoint.
///
/// The checkpoint is committed if the frame halts and reverted otherwise.
pub(crate) fn execute_frame<S>(
    storage: &mut S,
    environment: ExecutionEnvironment,
    gas_limit: u64,
    params: VmParams,
) -> Result<CallResult, InterpreterError>
where
    S: StateManager,
{
    let address = environment.address().clone();
    let depth = environment.contract_call_depth();

    let instructions = {
        let bytecode = storage
            .bytecode(&address)
            .map_err(InterpreterError::from_io)?
            .ok_or_else(|| InterpreterError::BytecodeNotFound(address.clone()))?;

        decode::<Instruction>(&bytecode)?
    };

    tracing::debug!(
        %address,
        depth,
        gas_limit,
        function = environment.function_name(),
        static_call = environment.is_static_call(),
        instructions = instructions.len(),
        "entering frame"
    );

    storage.checkpoint().map_err(InterpreterError::from_io)?;

    let result = Interpreter::new(&mut *storage, environment, instructions, gas_limit, params).run();

    match &result {
        Ok(r) if r.reverted() => storage.revert_checkpoint().map_err(InterpreterError::from_io)?,
        Ok(_) => storage.commit_checkpoint().map_err(InterpreterError::from_io)?,

        Err(e) => {
            tracing::debug!(%address, depth, error = %e, "frame aborted");

            if let Err(e) = storage.revert_checkpoint() {
                tracing::warn!(%address, error = %e, "failed to revert the checkpoint of an aborted frame");
            }
        }
    }

    if let Ok(r) = &result {
        tracing::debug!(
            %address,
            depth,
            reverted = r.reverted(),
            reason = ?r.revert_reason(),
            gas_used = r.gas_used(),
            "leaving frame"
        );
    }

    result
}
