//! Bytecode wire format.
//!
//! A program is a flat big-endian byte buffer made of repeated
//! `[opcode: 1 byte][operand: 4 bytes] * arity` records, with no header.

use crate::consts::{OPCODE_SIZE, OPERAND_SIZE};
use crate::error::DecodeError;

use std::fmt;

/// The byte can't be mapped to any known opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidOpcode(pub u8);

impl fmt::Display for InvalidOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid opcode {:#04x}", self.0)
    }
}

impl std::error::Error for InvalidOpcode {}

/// Instruction table the decoder works against.
///
/// Implemented by the `Instruction` type generated by `impl_instructions!`; the arity and
/// the constructor of every opcode are derived from the same table row.
pub trait InstructionSet: Sized {
    /// Number of operands of `opcode`, or `None` if the opcode isn't part of the set.
    fn arity(opcode: u8) -> Option<usize>;

    /// Build the instruction from its opcode and exactly `arity` operands.
    fn from_operands(opcode: u8, operands: &[u32]) -> Option<Self>;

    /// Opcode byte of this instruction.
    fn opcode_byte(&self) -> u8;

    /// Operands of this instruction in wire order.
    fn operands(&self) -> Vec<u32>;

    /// Append the wire representation of this instruction to `buf`.
    fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.push(self.opcode_byte());
        self.operands()
            .into_iter()
            .for_each(|operand| buf.extend_from_slice(&operand.to_be_bytes()));
    }
}

/// Decode a full program.
///
/// Either the whole buffer is consumed into instructions or an error is returned; a
/// malformed program is never partially decoded.
pub fn decode<I>(bytecode: &[u8]) -> Result<Vec<I>, DecodeError>
where
    I: InstructionSet,
{
    let mut instructions = vec![];
    let mut position = 0;

    while position < bytecode.len() {
        let opcode = bytecode[position];
        let arity = I::arity(opcode).ok_or(DecodeError::UnknownOpcode { opcode, position })?;

        let start = position + OPCODE_SIZE;
        let expected = arity * OPERAND_SIZE;
        let available = bytecode.len() - start;

        if available < expected {
            return Err(DecodeError::TruncatedBytecode {
                opcode,
                position,
                expected,
                available,
            });
        }

        let operands: Vec<u32> = bytecode[start..start + expected]
            .chunks_exact(OPERAND_SIZE)
            .map(|chunk| {
                let mut word = [0u8; OPERAND_SIZE];
                word.copy_from_slice(chunk);

                u32::from_be_bytes(word)
            })
            .collect();

        let instruction =
            I::from_operands(opcode, &operands).ok_or(DecodeError::UnknownOpcode { opcode, position })?;

        instructions.push(instruction);
        position = start + expected;
    }

    tracing::trace!(len = bytecode.len(), instructions = instructions.len(), "decoded bytecode");

    Ok(instructions)
}

/// Encode a program into its wire representation.
pub fn encode<'a, I, T>(instructions: T) -> Vec<u8>
where
    I: InstructionSet + 'a,
    T: IntoIterator<Item = &'a I>,
{
    let mut buf = vec![];

    instructions
        .into_iter()
        .for_each(|instruction| instruction.encode_into(&mut buf));

    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    mod two_opcodes {
        impl_instructions! {
            "Instruction with two operands."
            0x0a INSTA inst_a [x y]
            "Instruction with one operand."
            0x0b INSTB inst_b [z]
        }
    }

    use two_opcodes::{inst_a, inst_b, Instruction as TwoOp};

    #[test]
    fn decode_two_opcodes_with_distinct_arities() {
        let program = vec![inst_a(1, 0xdeadbeef), inst_b(2), inst_a(u32::MAX, 0)];
        let bytecode = encode(&program);

        assert_eq!(bytecode.len(), 9 + 5 + 9);
        assert_eq!(&bytecode[..5], &[0x0a, 0, 0, 0, 1]);

        let decoded = decode::<TwoOp>(&bytecode).expect("failed to decode");

        assert_eq!(decoded, program);
    }

    #[test]
    fn decode_empty_bytecode() {
        let decoded = decode::<TwoOp>(&[]).expect("failed to decode");

        assert!(decoded.is_empty());
    }

    #[test]
    fn unknown_opcode_reports_position() {
        let mut bytecode = encode(&[inst_b(7)]);
        bytecode.push(0xff);
        bytecode.extend(encode(&[inst_b(8)]));

        assert_eq!(
            decode::<TwoOp>(&bytecode),
            Err(DecodeError::UnknownOpcode {
                opcode: 0xff,
                position: 5
            })
        );
    }

    #[test]
    fn truncated_operand_is_rejected() {
        let mut bytecode = encode(&[inst_a(1, 2)]);
        bytecode.truncate(bytecode.len() - 1);

        assert_eq!(
            decode::<TwoOp>(&bytecode),
            Err(DecodeError::TruncatedBytecode {
                opcode: 0x0a,
                position: 0,
                expected: 8,
                available: 7
            })
        );

        // opcode byte without any operand
        assert_eq!(
            decode::<TwoOp>(&[0x0b]),
            Err(DecodeError::TruncatedBytecode {
                opcode: 0x0b,
                position: 0,
                expected: 4,
                available: 0
            })
        );
    }

    #[test]
    fn opcode_table_of_a_custom_set() {
        use two_opcodes::Opcode;

        assert_eq!(Opcode::INSTA.arity(), 2);
        assert_eq!(Opcode::INSTB.arity(), 1);
        assert_eq!(Opcode::try_from(0x0c), Err(InvalidOpcode(0x0c)));
    }
}
