use super::Interpreter;
use crate::error::RuntimeError;
use crate::gas::GasUnit;
use crate::instruction::Opcode;

impl<S> Interpreter<'_, S> {
    /// Gas charged before executing any instruction with opcode `op`.
    ///
    /// Instructions working on memory ranges, and the call family, charge an additional
    /// per-word cost before touching the range.
    pub(crate) const fn gas_cost_base(op: Opcode) -> u64 {
        use Opcode::*;

        match op {
            ADD | SUB | EQ | LT | LTE => GasUnit::Arithmetic(1)
                .join(GasUnit::MemoryRead(2))
                .join(GasUnit::MemoryWrite(1)),

            MUL | DIV => GasUnit::ArithmeticExpensive(1)
                .join(GasUnit::MemoryRead(2))
                .join(GasUnit::MemoryWrite(1)),

            SET | GETENVVAR | RETURNDATASIZE => GasUnit::Atom(1).join(GasUnit::MemoryWrite(1)),

            MOV => GasUnit::MemoryRead(1).join(GasUnit::MemoryWrite(1)),

            CALLDATACOPY | RETURN | REVERT => GasUnit::Atom(1),

            RETURNDATACOPY => GasUnit::Atom(1).join(GasUnit::MemoryRead(2)),

            JUMP => GasUnit::Branching(1),

            JUMPI => GasUnit::Branching(1).join(GasUnit::MemoryRead(1)),

            SLOAD => GasUnit::StorageRead(1)
                .join(GasUnit::MemoryRead(1))
                .join(GasUnit::MemoryWrite(1)),

            SSTORE => GasUnit::StorageWrite(1).join(GasUnit::MemoryRead(2)),

            CALL | STATICCALL => GasUnit::Call(1).join(GasUnit::MemoryRead(3)),

            EMITNOTEHASH => GasUnit::SideEffect(1).join(GasUnit::MemoryRead(1)),

            EMITNULLIFIER => GasUnit::SideEffect(1)
                .join(GasUnit::StorageRead(1))
                .join(GasUnit::MemoryRead(1)),

            NULLIFIEREXISTS => GasUnit::StorageRead(1)
                .join(GasUnit::MemoryRead(2))
                .join(GasUnit::MemoryWrite(1)),

            EMITUNENCRYPTEDLOG => GasUnit::SideEffect(1).join(GasUnit::MemoryRead(1)),

            SENDL2TOL1MSG => GasUnit::SideEffect(1).join(GasUnit::MemoryRead(2)),
        }
        .cost()
    }

    pub(crate) fn gas_charge(&mut self, gas: u64) -> Result<(), RuntimeError> {
        self.machine.consume_gas(gas).map_err(RuntimeError::from)
    }
}
