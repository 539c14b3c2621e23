use crate::error::{InterpreterError, RuntimeError};
use crate::instruction::Instruction;
use crate::interpreter::contract::CallKind;
use crate::interpreter::Interpreter;
use crate::state::ExecuteState;
use crate::storage::StateManager;

impl<S> Interpreter<'_, S>
where
    S: StateManager,
{
    /// Execute the instruction at the program counter.
    ///
    /// A stopped frame is left untouched and reports its terminal state again. Running past
    /// the last instruction halts the frame with empty return data, within the same step as the
    /// last instruction.
    ///
    /// Protocol failures revert the frame and are reported as [`ExecuteState::Revert`]; only
    /// state manager failures are returned as errors.
    pub fn step(&mut self) -> Result<ExecuteState, InterpreterError> {
        if let Some(state) = self.machine.terminal_state() {
            return Ok(state);
        }

        let instruction = match self.machine.current_instruction() {
            Some(instruction) => *instruction,
            None => return Ok(self.fall_off()),
        };

        tracing::trace!(pc = self.machine.pc(), %instruction, gas_left = self.machine.gas_left());

        match self.instruction(instruction) {
            Ok(ExecuteState::Proceed) if self.machine.is_past_end() => Ok(self.fall_off()),

            Ok(state) => Ok(state),

            Err(RuntimeError::Revert(reason)) => {
                tracing::debug!(pc = self.machine.pc(), %instruction, %reason, "frame reverted");

                self.machine.revert(reason, vec![]);

                Ok(ExecuteState::Revert { reason, data: vec![] })
            }

            Err(RuntimeError::Halt(e)) => Err(InterpreterError::Io(e)),
        }
    }

    fn fall_off(&mut self) -> ExecuteState {
        self.machine.halt(vec![]);

        ExecuteState::Return(vec![])
    }

    /// Charge the base gas of `instruction` and execute it.
    pub(crate) fn instruction(&mut self, instruction: Instruction) -> Result<ExecuteState, RuntimeError> {
        self.gas_charge(Self::gas_cost_base(instruction.opcode()))?;

        match instruction {
            Instruction::ADD(op) => {
                let (a, b, dst) = op.unpack();
                self.alu_add(a, b, dst)?;
            }

            Instruction::SUB(op) => {
                let (a, b, dst) = op.unpack();
                self.alu_sub(a, b, dst)?;
            }

            Instruction::MUL(op) => {
                let (a, b, dst) = op.unpack();
                self.alu_mul(a, b, dst)?;
            }

            Instruction::DIV(op) => {
                let (a, b, dst) = op.unpack();
                self.alu_div(a, b, dst)?;
            }

            Instruction::EQ(op) => {
                let (a, b, dst) = op.unpack();
                self.alu_eq(a, b, dst)?;
            }

            Instruction::LT(op) => {
                let (a, b, dst) = op.unpack();
                self.alu_lt(a, b, dst)?;
            }

            Instruction::LTE(op) => {
                let (a, b, dst) = op.unpack();
                self.alu_lte(a, b, dst)?;
            }

            Instruction::SET(op) => {
                let (value, dst) = op.unpack();
                self.set(value, dst)?;
            }

            Instruction::MOV(op) => {
                let (src, dst) = op.unpack();
                self.mov(src, dst)?;
            }

            Instruction::CALLDATACOPY(op) => {
                let (cd_offset, size, dst) = op.unpack();
                self.calldata_copy(cd_offset, size, dst)?;
            }

            Instruction::RETURNDATASIZE(op) => {
                let (dst,) = op.unpack();
                self.returndata_size(dst)?;
            }

            Instruction::RETURNDATACOPY(op) => {
                let (rd_start, copy_size, dst) = op.unpack();
                self.returndata_copy(rd_start, copy_size, dst)?;
            }

            Instruction::GETENVVAR(op) => {
                let (var, dst) = op.unpack();
                self.get_env_var(var, dst)?;
            }

            Instruction::JUMP(op) => {
                let (loc,) = op.unpack();
                self.jump(loc)?;
            }

            Instruction::JUMPI(op) => {
                let (loc, cond) = op.unpack();
                self.jump_if(loc, cond)?;
            }

            Instruction::RETURN(op) => {
                let (offset, size) = op.unpack();
                return self.ret(offset, size);
            }

            Instruction::REVERT(op) => {
                let (offset, size) = op.unpack();
                return self.revert(offset, size);
            }

            Instruction::SLOAD(op) => {
                let (slot, dst) = op.unpack();
                self.sload(slot, dst)?;
            }

            Instruction::SSTORE(op) => {
                let (src, slot) = op.unpack();
                self.sstore(src, slot)?;
            }

            Instruction::CALL(op) => {
                self.call(op.into(), CallKind::Call)?;
            }

            Instruction::STATICCALL(op) => {
                self.call(op.into(), CallKind::StaticCall)?;
            }

            Instruction::EMITNOTEHASH(op) => {
                let (note_hash,) = op.unpack();
                self.emit_note_hash(note_hash)?;
            }

            Instruction::EMITNULLIFIER(op) => {
                let (nullifier,) = op.unpack();
                self.emit_nullifier(nullifier)?;
            }

            Instruction::NULLIFIEREXISTS(op) => {
                let (nullifier, address, dst) = op.unpack();
                self.nullifier_exists(nullifier, address, dst)?;
            }

            Instruction::EMITUNENCRYPTEDLOG(op) => {
                let (log, log_size) = op.unpack();
                self.emit_unencrypted_log(log, log_size)?;
            }

            Instruction::SENDL2TOL1MSG(op) => {
                let (recipient, content) = op.unpack();
                self.send_l2_to_l1_message(recipient, content)?;
            }
        }

        Ok(ExecuteState::Proceed)
    }
}
