//! x86/x86-64 instruction decoder for the objdis disassembler.
//!
//! This crate owns the static opcode maps and the single-instruction decode
//! pipeline: prefix scanning, table traversal, ModR/M + SIB + displacement +
//! immediate extraction, operand typing, and VEX/EVEX/MVEX/XOP feature
//! decoding. It knows nothing about object files; the driver crate attaches
//! symbols and relocations to the decoded fields.
//!
//! Decoding is deterministic, allocation-free and does not depend on any
//! global mutable state; the tables are immutable statics shared by all
//! instances.

pub mod decoded;
pub mod decoder;
pub mod optype;
pub mod registers;
pub mod swizzle;
pub mod tables;

pub use decoded::{Decoded, Errors, MemFlags, VexKind, Warnings1, Warnings2};
pub use decoder::{Decoder, MAX_INSTRUCTION_LEN};
