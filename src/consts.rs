//! VM parameters

/* WIRE FORMAT */

/// Length of an encoded opcode, in bytes.
pub const OPCODE_SIZE: usize = 1;

/// Length of an encoded operand, in bytes.
pub const OPERAND_SIZE: usize = 4;

/* FIELD */

/// Big-endian bytes of the BN254 scalar field modulus.
pub const FIELD_MODULUS_BYTES: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d, 0x28, 0x33, 0xe8,
    0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

/// Length of a serialized field element, in bytes.
pub const FIELD_SIZE: usize = 32;

/* EXECUTION */

/// Default gas limit of a top-level call.
pub const DEFAULT_GAS_LIMIT: u64 = 10_000_000;

/// Default maximum nesting of contract calls.
///
/// Nested calls recurse on the host stack, so this also bounds the stack usage of the
/// interpreter.
pub const DEFAULT_MAX_CALL_DEPTH: u32 = 64;

/// Default maximum length of a memory window copied by a single instruction, in words.
pub const DEFAULT_MAX_SLICE_LEN: u32 = 1 << 16;

/* END */
