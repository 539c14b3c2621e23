//! # The `impl_instructions!` macro
//!
//! The heart of the instruction set: every opcode is declared exactly once as a row of a
//! table, and everything the decoder and the interpreter need about it is derived from that
//! row.
//!
//! ```rust,ignore
//! impl_instructions! {
//!     "Adds two memory cells."
//!     0x01 ADD add [a_offset b_offset dst_offset]
//!     "Subtracts two memory cells."
//!     0x02 SUB sub [a_offset b_offset dst_offset]
//!     // ...
//! }
//! ```
//!
//! Each instruction's row includes:
//!
//! - A short docstring.
//! - The Opcode byte value.
//! - An uppercase identifier (for generating variants and types).
//! - A lowercase identifier (for generating the shorthand instruction constructor).
//! - The operand names, in wire order. Every operand is a big-endian `u32`.
//!
//! From the table the macro generates:
//!
//! - The `Opcode` enum, with `TryFrom<u8>` and the operand count (`arity`) of every opcode.
//! - One struct per opcode holding its operands as named fields.
//! - The `Instruction` enum wrapping those structs.
//! - A shorthand constructor function per opcode, i.e. `add(0, 1, 2)`.
//! - The [`InstructionSet`](crate::decoder::InstructionSet) implementation used by the
//!   decoder.
//!
//! Since the arity and the constructor of an opcode come from the same row, an opcode can't
//! be decodable without being constructible or vice versa. Two rows sharing an opcode byte
//! are rejected by the compiler as duplicated discriminants.

macro_rules! impl_instructions {
    // Operand count of a row.
    (@count) => { 0usize };
    (@count $head:ident $($tail:ident)*) => {
        1usize + impl_instructions!(@count $($tail)*)
    };

    // Every operand is a `u32`.
    (@operand $field:ident) => { u32 };

    (
        $(
            $doc:literal $ix:literal $Op:ident $op:ident [$($field:ident)*]
        )*
    ) => {
        /// Solely the opcode portion of an instruction represented as a single byte.
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, strum::EnumIter)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        pub enum Opcode {
            $(
                #[doc = $doc]
                $Op = $ix,
            )*
        }

        impl Opcode {
            /// Number of operands following the opcode byte.
            pub const fn arity(self) -> usize {
                match self {
                    $(
                        Self::$Op => impl_instructions!(@count $($field)*),
                    )*
                }
            }

            /// Encoded size of an instruction with this opcode, in bytes.
            pub const fn encoded_size(self) -> usize {
                $crate::consts::OPCODE_SIZE + self.arity() * $crate::consts::OPERAND_SIZE
            }
        }

        impl ::core::convert::TryFrom<u8> for Opcode {
            type Error = $crate::decoder::InvalidOpcode;

            fn try_from(u: u8) -> Result<Self, Self::Error> {
                match u {
                    $(
                        $ix => Ok(Opcode::$Op),
                    )*
                    _ => Err($crate::decoder::InvalidOpcode(u)),
                }
            }
        }

        $(
            #[doc = $doc]
            #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
            #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
            pub struct $Op {
                $(
                    #[allow(missing_docs)]
                    pub $field: u32,
                )*
            }

            impl $Op {
                /// The associated 8-bit Opcode value.
                pub const OPCODE: Opcode = Opcode::$Op;

                /// Construct the instruction from its parts.
                pub const fn new($($field: u32),*) -> Self {
                    Self { $($field),* }
                }

                /// Convert the instruction into its parts.
                pub const fn unpack(self) -> ($(impl_instructions!(@operand $field),)*) {
                    ($(self.$field,)*)
                }

                /// Operands in wire order.
                pub fn operands(&self) -> Vec<u32> {
                    vec![$(self.$field),*]
                }
            }

            impl From<$Op> for Instruction {
                fn from(op: $Op) -> Self {
                    Instruction::$Op(op)
                }
            }

            #[doc = $doc]
            pub const fn $op($($field: u32),*) -> Instruction {
                Instruction::$Op($Op::new($($field),*))
            }
        )*

        /// Representation of a single instruction for the interpreter.
        ///
        /// The opcode is represented in the tag (variant), or may be retrieved in the form of an
        /// `Opcode` byte using the `opcode` method.
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Instruction {
            $(
                #[doc = $doc]
                $Op($Op),
            )*
        }

        impl Instruction {
            /// This instruction's opcode.
            pub const fn opcode(&self) -> Opcode {
                match self {
                    $(
                        Self::$Op(_) => Opcode::$Op,
                    )*
                }
            }

            /// Operands of this instruction in wire order.
            pub fn operands(&self) -> Vec<u32> {
                match self {
                    $(
                        Self::$Op(op) => op.operands(),
                    )*
                }
            }
        }

        impl $crate::decoder::InstructionSet for Instruction {
            fn arity(opcode: u8) -> Option<usize> {
                Opcode::try_from(opcode).ok().map(Opcode::arity)
            }

            fn from_operands(opcode: u8, operands: &[u32]) -> Option<Self> {
                match Opcode::try_from(opcode).ok()? {
                    $(
                        Opcode::$Op => {
                            let [$($field),*] =
                                <[u32; impl_instructions!(@count $($field)*)]>::try_from(operands).ok()?;

                            Some(Self::$Op($Op { $($field),* }))
                        }
                    )*
                }
            }

            fn opcode_byte(&self) -> u8 {
                self.opcode() as u8
            }

            fn operands(&self) -> Vec<u32> {
                Instruction::operands(self)
            }
        }
    };
}
