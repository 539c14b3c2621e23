use aztec_avm::prelude::*;

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use strum::IntoEnumIterator;

#[derive(Debug, Clone)]
struct Program(Vec<Instruction>);

impl Arbitrary for Program {
    fn arbitrary(g: &mut Gen) -> Self {
        let opcodes: Vec<Opcode> = Opcode::iter().collect();
        let len = usize::arbitrary(g) % 32;

        let program = (0..len)
            .map(|_| {
                let opcode = *g.choose(&opcodes).expect("non-empty opcode set");
                let operands: Vec<u32> = (0..opcode.arity()).map(|_| u32::arbitrary(g)).collect();

                Instruction::from_operands(opcode as u8, &operands).expect("valid operands")
            })
            .collect();

        Program(program)
    }
}

#[quickcheck]
fn decoding_inverts_encoding(program: Program) -> bool {
    let bytecode = encode(&program.0);
    let expected_len: usize = program.0.iter().map(|i| i.opcode().encoded_size()).sum();

    bytecode.len() == expected_len && decode::<Instruction>(&bytecode) == Ok(program.0)
}

#[quickcheck]
fn every_truncation_fails(program: Program) -> bool {
    let bytecode = encode(&program.0);

    // cutting at an instruction boundary yields a shorter, valid program
    (0..bytecode.len()).all(|len| match decode::<Instruction>(&bytecode[..len]) {
        Ok(decoded) => decoded.len() < program.0.len(),
        Err(DecodeError::TruncatedBytecode { .. }) => true,
        Err(DecodeError::UnknownOpcode { .. }) => false,
    })
}

#[test]
fn end_to_end_add_bytecode() {
    let bytecode = [0x01, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 2];

    let decoded = decode::<Instruction>(&bytecode).expect("failed to decode");

    assert_eq!(decoded, vec![aztec_avm::instruction::add(0, 1, 2)]);
}

#[test]
fn unknown_opcode_does_not_misalign() {
    let mut bytecode = encode(&[aztec_avm::instruction::jump(0)]);
    bytecode.push(0x00);
    bytecode.extend(encode(&[aztec_avm::instruction::jump(0)]));

    assert_eq!(
        decode::<Instruction>(&bytecode),
        Err(DecodeError::UnknownOpcode {
            opcode: 0x00,
            position: Opcode::JUMP.encoded_size()
        })
    );
}

#[test]
fn operands_are_big_endian() {
    let bytecode = encode(&[aztec_avm::instruction::set(0x0102_0304, 0xffff_fffe)]);

    assert_eq!(bytecode, vec![0x10, 0x01, 0x02, 0x03, 0x04, 0xff, 0xff, 0xff, 0xfe]);
}
