use super::Interpreter;
use crate::error::{RevertReason, RuntimeError};
use crate::field::Fr;

impl<S> Interpreter<'_, S> {
    /// Set `m[dst] = f(m[a], m[b])`.
    pub(crate) fn alu_binary<F>(&mut self, a: u32, b: u32, dst: u32, f: F) -> Result<(), RuntimeError>
    where
        F: FnOnce(&Fr, &Fr) -> Result<Fr, RevertReason>,
    {
        let result = f(&self.machine.read_memory(a), &self.machine.read_memory(b))?;

        self.machine.write_memory(dst, result);
        self.machine.inc_pc();

        Ok(())
    }

    pub(crate) fn alu_add(&mut self, a: u32, b: u32, dst: u32) -> Result<(), RuntimeError> {
        self.alu_binary(a, b, dst, |a, b| Ok(a + b))
    }

    pub(crate) fn alu_sub(&mut self, a: u32, b: u32, dst: u32) -> Result<(), RuntimeError> {
        self.alu_binary(a, b, dst, |a, b| Ok(a - b))
    }

    pub(crate) fn alu_mul(&mut self, a: u32, b: u32, dst: u32) -> Result<(), RuntimeError> {
        self.alu_binary(a, b, dst, |a, b| Ok(a * b))
    }

    pub(crate) fn alu_div(&mut self, a: u32, b: u32, dst: u32) -> Result<(), RuntimeError> {
        self.alu_binary(a, b, dst, |a, b| a.checked_div(b).ok_or(RevertReason::DivisionByZero))
    }

    // Comparators order the canonical representatives, not the wrapped values.

    pub(crate) fn alu_eq(&mut self, a: u32, b: u32, dst: u32) -> Result<(), RuntimeError> {
        self.alu_binary(a, b, dst, |a, b| Ok(Fr::from(a == b)))
    }

    pub(crate) fn alu_lt(&mut self, a: u32, b: u32, dst: u32) -> Result<(), RuntimeError> {
        self.alu_binary(a, b, dst, |a, b| Ok(Fr::from(a < b)))
    }

    pub(crate) fn alu_lte(&mut self, a: u32, b: u32, dst: u32) -> Result<(), RuntimeError> {
        self.alu_binary(a, b, dst, |a, b| Ok(Fr::from(a <= b)))
    }
}
