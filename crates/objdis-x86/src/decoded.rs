//! Per-instruction decode state.
//!
//! One [`Decoded`] is produced per instruction and reinitialized on each
//! decode. The driver attaches relocation indices after decode; everything
//! else is filled by the decoder pipeline.

use crate::swizzle::SwizSpec;
use crate::tables::{OpcodeDef, ILLEGAL};
use bitflags::bitflags;

bitflags! {
    /// Errors that prevent execution or are unlikely to be intentional.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Errors: u32 {
        const RESERVED_OPCODE     = 0x01;
        const ILLEGAL_PREFIX      = 0x02;
        const PREFIX_CONFLICT     = 0x04;
        const TRUNCATED           = 0x08;
        const WRONG_MODE          = 0x10;
        const RELOC_SIZE_MISMATCH = 0x20;
        const VEX_MISUSE          = 0x40;
        const REX_ON_BYTE_OP      = 0x80;
        const TOO_LONG            = 0x100;
    }
}

bitflags! {
    /// Conditions that could be intentional but look suboptimal.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Warnings1: u32 {
        const PREFIX_NO_EFFECT  = 0x01;
        const OPSIZE_ON_JUMP    = 0x02;
        const NONCANONICAL_DISP = 0x04;
        const MULTIBYTE_NOP     = 0x08;
        const UNALIGNED_MEM     = 0x10;
        const RELOC_DEGRADED    = 0x20;
    }
}

bitflags! {
    /// Conditions that suggest the bytes may be misinterpreted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Warnings2: u32 {
        const DEPRECATED      = 0x01;
        const AMD_ONLY        = 0x02;
        const INTEL_ONLY      = 0x04;
        const DUBIOUS         = 0x08;
        const MISPLACED_LABEL = 0x10;
        const UNDOCUMENTED    = 0x20;
    }
}

bitflags! {
    /// Memory-operand shape flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MemFlags: u32 {
        const HAS_MEM      = 0x01;
        const HAS_MODRM    = 0x02;
        const HAS_SIB      = 0x04;
        const HAS_VEX      = 0x08;
        const RIP_RELATIVE = 0x100;
        const VSIB         = 0x200;
    }
}

/// Which instruction-extension prefix introduced this encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VexKind {
    #[default]
    None,
    Vex2,
    Vex3,
    Evex,
    Mvex,
    Xop,
}

// Prefix category indices for `Decoded::prefixes`.
pub const CAT_SEG: usize = 0;
pub const CAT_ASIZE: usize = 1;
pub const CAT_LOCK: usize = 2;
pub const CAT_REP: usize = 3;
pub const CAT_OSIZE: usize = 4;
pub const CAT_OTYPE: usize = 5;
pub const CAT_VEX: usize = 6;
pub const CAT_WRXB: usize = 7;

// Bits stored in `prefixes[CAT_WRXB]`.
pub const RXB_B: u8 = 0x01;
pub const RXB_X: u8 = 0x02;
pub const RXB_R: u8 = 0x04;
pub const RXB_W: u8 = 0x08;
pub const RXB_VEX2: u8 = 0x10;
pub const RXB_VEX3: u8 = 0x20;
pub const RXB_REX: u8 = 0x40;
pub const RXB_XOP: u8 = 0x80;

/// Scratch state for one decoded instruction.
#[derive(Debug, Clone)]
pub struct Decoded {
    /// Offset of the first byte of the instruction in the section.
    pub begin: u32,
    /// Offset one past the last byte.
    pub end: u32,
    /// Final opcode map entry.
    pub opcode_def: &'static OpcodeDef,
    /// Last prefix seen in each category.
    pub prefixes: [u8; 8],
    /// Count of overridden prefixes per category.
    pub conflicts: [u8; 8],
    pub errors: Errors,
    pub warnings1: Warnings1,
    pub warnings2: Warnings2,
    /// Effective address size in bits (16/32/64).
    pub address_size: u32,
    /// Effective operand size in bits (16/32/64).
    pub operand_size: u32,
    /// Resolved vector length in bytes (16/32/64/128).
    pub vector_len: u32,
    pub vexkind: VexKind,
    pub mflags: MemFlags,
    /// ModR/M fields; `modrm_reg` and `modrm_rm` include the REX extensions.
    pub modrm_mod: u8,
    pub modrm_reg: u8,
    pub modrm_rm: u8,
    /// Base/index register + 1 for memory operands; 0 = none.
    pub base_reg: u8,
    pub index_reg: u8,
    /// log2 of the index scale factor.
    pub scale: u8,
    /// VEX.vvvv (already complemented) with V' extension.
    pub vreg: u8,
    /// EVEX.aaa / MVEX.kkk mask register.
    pub kreg: u8,
    /// EVEX z/L'L/b bits, or MVEX E/sss bits (bit 3 = z or E).
    pub esss: u8,
    /// Selected MVEX swizzle record, if any.
    pub swiz: Option<&'static SwizSpec>,
    /// Multiplier for single-byte compressed displacements.
    pub offset_multiplier: u32,
    /// Broadcast element count for `{1toN}` decoration; 0 = none.
    pub broadcast: u32,
    /// EVEX rounding/SAE decoration.
    pub rounding: Option<&'static str>,
    /// Resolved operand descriptors (lattice values + source bits).
    pub operands: [u32; 5],
    /// Index of the first opcode byte (after prefixes).
    pub opcode_start1: u32,
    /// Index of the last opcode byte (before ModR/M and operands).
    pub opcode_start2: u32,
    pub address_field: u32,
    pub address_field_size: u32,
    /// Relocation new-index + 1 attached to the address field; 0 = none.
    pub address_relocation: u32,
    pub immediate_field: u32,
    pub immediate_field_size: u32,
    /// Relocation new-index + 1 attached to the immediate field; 0 = none.
    pub immediate_relocation: u32,
}

impl Default for Decoded {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Decoded {
    pub fn new(begin: u32) -> Self {
        Self {
            begin,
            end: begin,
            opcode_def: &ILLEGAL,
            prefixes: [0; 8],
            conflicts: [0; 8],
            errors: Errors::empty(),
            warnings1: Warnings1::empty(),
            warnings2: Warnings2::empty(),
            address_size: 0,
            operand_size: 0,
            vector_len: 16,
            vexkind: VexKind::None,
            mflags: MemFlags::empty(),
            modrm_mod: 0,
            modrm_reg: 0,
            modrm_rm: 0,
            base_reg: 0,
            index_reg: 0,
            scale: 0,
            vreg: 0,
            kreg: 0,
            esss: 0,
            swiz: None,
            offset_multiplier: 0,
            broadcast: 0,
            rounding: None,
            operands: [0; 5],
            opcode_start1: begin,
            opcode_start2: begin,
            address_field: 0,
            address_field_size: 0,
            address_relocation: 0,
            immediate_field: 0,
            immediate_field_size: 0,
            immediate_relocation: 0,
        }
    }

    /// Instruction length in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.begin
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.begin
    }

    /// Any VEX/EVEX/MVEX/XOP prefix present.
    #[inline]
    pub fn has_vex(&self) -> bool {
        self.vexkind != VexKind::None
    }

    /// W bit from REX or VEX.
    #[inline]
    pub fn w_bit(&self) -> bool {
        self.prefixes[CAT_WRXB] & RXB_W != 0
    }

    /// Any REX prefix present (changes 8-bit register naming).
    #[inline]
    pub fn rex_present(&self) -> bool {
        self.prefixes[CAT_WRXB] & (RXB_REX | RXB_VEX2 | RXB_VEX3) != 0
    }

    /// VEX.L / EVEX.L'L bits (0-3).
    #[inline]
    pub fn ll_bits(&self) -> u8 {
        match self.vexkind {
            VexKind::None => 0,
            VexKind::Vex2 | VexKind::Vex3 | VexKind::Xop => (self.prefixes[CAT_VEX] >> 5) & 1,
            VexKind::Evex => (self.esss >> 1) & 3,
            VexKind::Mvex => 2,
        }
    }

    /// True if decoding failed hard enough that the bytes should be emitted
    /// as data.
    #[inline]
    pub fn is_undecodable(&self) -> bool {
        self.errors.intersects(Errors::RESERVED_OPCODE | Errors::TRUNCATED | Errors::WRONG_MODE)
    }
}
