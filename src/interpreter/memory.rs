use super::Interpreter;
use crate::error::{RevertReason, RuntimeError};
use crate::field::Fr;
use crate::gas::GasUnit;

use std::collections::HashMap;

/// Sparse word-addressed memory of a frame.
///
/// Every `u32` offset is addressable, including `u32::MAX`; cells that were never written
/// read as zero.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: HashMap<u32, Fr>,
}

impl Memory {
    /// Create an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the cell at `offset`.
    pub fn read(&self, offset: u32) -> Fr {
        self.cells.get(&offset).cloned().unwrap_or_default()
    }

    /// Overwrite the cell at `offset`.
    pub fn write(&mut self, offset: u32, value: Fr) {
        if value.is_zero() {
            self.cells.remove(&offset);
        } else {
            self.cells.insert(offset, value);
        }
    }

    /// Assert `[offset, offset + size[` fits the address space.
    ///
    /// The last cell of a non-empty range must be addressable; an empty range always fits.
    pub fn check_range(offset: u32, size: u32) -> Result<(), RevertReason> {
        match size {
            0 => Ok(()),
            _ => offset
                .checked_add(size - 1)
                .map(|_| ())
                .ok_or(RevertReason::MemoryOverflow),
        }
    }

    /// Values of `[offset, offset + size[`.
    pub fn read_slice(&self, offset: u32, size: u32) -> Result<Vec<Fr>, RevertReason> {
        Self::check_range(offset, size)?;

        Ok((0..size).map(|i| self.read(offset + i)).collect())
    }

    /// Write `values` starting at `offset`.
    pub fn write_slice(&mut self, offset: u32, values: Vec<Fr>) -> Result<(), RevertReason> {
        let size = u32::try_from(values.len()).map_err(|_| RevertReason::MemoryOverflow)?;

        Self::check_range(offset, size)?;

        (0..size)
            .zip(values)
            .for_each(|(i, value)| self.write(offset + i, value));

        Ok(())
    }

    /// Number of non-zero cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Return `true` if every cell is zero.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// `source[offset..offset + size]`, zero padded past the end of `source`.
pub(super) fn padded_window(source: &[Fr], offset: u32, size: u32) -> Vec<Fr> {
    (0..size as usize)
        .map(|i| {
            (offset as usize)
                .checked_add(i)
                .and_then(|idx| source.get(idx))
                .cloned()
                .unwrap_or_default()
        })
        .collect()
}

impl<S> Interpreter<'_, S> {
    /// Assert a window of `size` words at `offset` fits the address space and the
    /// [`VmParams::max_slice_len`](crate::params::VmParams::max_slice_len) bound.
    pub(crate) fn check_window(&self, offset: u32, size: u32) -> Result<(), RevertReason> {
        Memory::check_range(offset, size)?;

        if size > self.params.max_slice_len {
            return Err(RevertReason::SliceTooLarge);
        }

        Ok(())
    }

    /// Read a memory cell used as a size or an offset.
    pub(crate) fn read_u32(&self, offset: u32) -> Result<u32, RevertReason> {
        self.machine
            .read_memory(offset)
            .to_u32()
            .ok_or(RevertReason::OperandOutOfRange)
    }

    pub(crate) fn set(&mut self, value: u32, dst: u32) -> Result<(), RuntimeError> {
        self.machine.write_memory(dst, Fr::from(value));
        self.machine.inc_pc();

        Ok(())
    }

    pub(crate) fn mov(&mut self, src: u32, dst: u32) -> Result<(), RuntimeError> {
        let value = self.machine.read_memory(src);

        self.machine.write_memory(dst, value);
        self.machine.inc_pc();

        Ok(())
    }

    pub(crate) fn calldata_copy(&mut self, cd_offset: u32, size: u32, dst: u32) -> Result<(), RuntimeError> {
        self.check_window(dst, size)?;
        self.gas_charge(GasUnit::MemoryWrite(size as u64).cost())?;

        let values = padded_window(self.environment.calldata(), cd_offset, size);

        self.machine.write_slice(dst, values)?;
        self.machine.inc_pc();

        Ok(())
    }

    pub(crate) fn returndata_size(&mut self, dst: u32) -> Result<(), RuntimeError> {
        let size = self.machine.nested_return_data().len() as u64;

        self.machine.write_memory(dst, Fr::from(size));
        self.machine.inc_pc();

        Ok(())
    }

    pub(crate) fn returndata_copy(&mut self, rd_start: u32, copy_size: u32, dst: u32) -> Result<(), RuntimeError> {
        let rd_start = self.read_u32(rd_start)?;
        let size = self.read_u32(copy_size)?;

        self.check_window(dst, size)?;
        self.gas_charge(GasUnit::MemoryWrite(size as u64).cost())?;

        let values = padded_window(self.machine.nested_return_data(), rd_start, size);

        self.machine.write_slice(dst, values)?;
        self.machine.inc_pc();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_cells_read_zero() {
        let mut memory = Memory::new();

        assert_eq!(memory.read(u32::MAX), Fr::zero());

        memory.write(3, Fr::from(9u64));
        assert_eq!(memory.read(3), Fr::from(9u64));

        memory.write(3, Fr::zero());
        assert!(memory.is_empty());
    }

    #[test]
    fn slices_are_contiguous() {
        let mut memory = Memory::new();

        memory
            .write_slice(10, vec![Fr::from(1u64), Fr::from(2u64)])
            .expect("failed to write");

        assert_eq!(
            memory.read_slice(9, 4),
            Ok(vec![Fr::zero(), Fr::from(1u64), Fr::from(2u64), Fr::zero()])
        );
        assert_eq!(memory.read_slice(9, 0), Ok(vec![]));
    }

    #[test]
    fn slices_past_the_address_space_overflow() {
        let mut memory = Memory::new();

        assert_eq!(memory.read_slice(u32::MAX, 2), Err(RevertReason::MemoryOverflow));
        assert_eq!(
            memory.write_slice(u32::MAX - 1, vec![Fr::one(); 3]),
            Err(RevertReason::MemoryOverflow)
        );
        assert_eq!(Memory::check_range(u32::MAX, 0), Ok(()));
    }

    #[test]
    fn last_cell_is_part_of_slices() {
        let mut memory = Memory::new();

        memory
            .write_slice(u32::MAX - 1, vec![Fr::from(1u64), Fr::from(2u64)])
            .expect("failed to write");

        assert_eq!(memory.read(u32::MAX), Fr::from(2u64));
        assert_eq!(memory.read_slice(u32::MAX, 1), Ok(vec![Fr::from(2u64)]));
        assert_eq!(
            memory.read_slice(u32::MAX - 1, 2),
            Ok(vec![Fr::from(1u64), Fr::from(2u64)])
        );
    }

    #[test]
    fn windows_are_padded_past_the_source() {
        let source = vec![Fr::from(1u64), Fr::from(2u64), Fr::from(3u64)];

        assert_eq!(padded_window(&source, 1, 2), source[1..].to_vec());
        assert_eq!(
            padded_window(&source, 2, 3),
            vec![Fr::from(3u64), Fr::zero(), Fr::zero()]
        );
        assert_eq!(padded_window(&source, u32::MAX, 1), vec![Fr::zero()]);
        assert!(padded_window(&source, 0, 0).is_empty());
    }
}
