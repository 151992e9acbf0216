//! Operand-type lattice.
//!
//! Operand descriptors are packed `u32` values carved into independent
//! fields. The opcode tables store the low 16 bits (base class, vector-size
//! field, register/memory constraint); the decoder ORs in the
//! addressing-source and immediate-field bits while resolving operands, and
//! the symbol table reuses the same values to classify symbols (code / data /
//! dubious). The numeric encodings are load-bearing: the opcode tables are
//! the source of truth and are written against these exact values.
//!
//! Layout:
//!
//! | bits  | field |
//! |-------|------------------------------------------------|
//! | 0-7   | base size/class                                |
//! | 8-11  | vector-size field                              |
//! | 12-13 | register-only / memory-only constraint         |
//! | 16-19 | addressing source (how the operand is encoded) |
//! | 20-21 | immediate-field use                            |
//! | 24-26 | symbol classification (code / dubious / data)  |

// Base classes, bits 0-7.
pub const T_NONE: u32 = 0;
pub const T_INT8: u32 = 1;
pub const T_INT16: u32 = 2;
pub const T_INT32: u32 = 3;
pub const T_INT64: u32 = 4;
pub const T_INT80: u32 = 5; // 80-bit integer memory (x87 fbld/fbstp)
pub const T_INT_OTHER: u32 = 6; // integer memory, other size
pub const T_MEM48: u32 = 7; // 48-bit memory (far pointer, lgdt image)
pub const T_INT_WO: u32 = 8; // 16/32 by 66 prefix
pub const T_INT_WDQ: u32 = 9; // 16/32/64 by 66 / REX.W
pub const T_INT_WDQ_ADDR: u32 = 0x0A; // 16/32/64, default = address size
pub const T_NEAR_PTR_JMP: u32 = 0x0B; // near indirect jump pointer
pub const T_NEAR_PTR_CALL: u32 = 0x0C; // near indirect call pointer
pub const T_FAR_PTR: u32 = 0x0D; // seg:offset far indirect pointer

// Constant classes. Bit 4 set = constant; 0x20 = signed, 0x30 = hexadecimal.
pub const T_CONST8: u32 = 0x11;
pub const T_CONST16: u32 = 0x12;
pub const T_CONST32: u32 = 0x13;
pub const T_CONST_WO: u32 = 0x18; // 16/32 unsigned
pub const T_CONST_WDQ: u32 = 0x19; // 16/32/64 unsigned
pub const T_CONST8_S: u32 = 0x21;
pub const T_CONST16_S: u32 = 0x22;
pub const T_CONST32_S: u32 = 0x23;
pub const T_CONST_WO_S: u32 = 0x28;
pub const T_CONST_WDQ_S: u32 = 0x29;
pub const T_CONST8_X: u32 = 0x31;
pub const T_CONST16_X: u32 = 0x32;
pub const T_CONST32_X: u32 = 0x33;
pub const T_CONST64_X: u32 = 0x34;
pub const T_CONST_WO_X: u32 = 0x38;
pub const T_CONST_WDQ_X: u32 = 0x39;

// Floating point.
pub const T_F80_ST: u32 = 0x40; // x87 register or unknown size
pub const T_F32_X87: u32 = 0x43;
pub const T_F64_X87: u32 = 0x44;
pub const T_F80_X87: u32 = 0x45;
pub const T_FLOAT_SSE: u32 = 0x48; // SSE float, unknown size
pub const T_F16: u32 = 0x4A;
pub const T_F32: u32 = 0x4B; // ss / ps
pub const T_F64: u32 = 0x4C; // sd / pd
pub const T_FLOAT_PFX: u32 = 0x4F; // none=ps, 66=pd, F2=sd, F3=ss
pub const T_VECTOR_A: u32 = 0x50; // full vector, aligned
pub const T_VECTOR_U: u32 = 0x51; // full vector, unaligned

// Branch targets (encoded as immediate fields).
pub const T_JMP_SHORT: u32 = 0x81;
pub const T_JMP_NEAR: u32 = 0x82;
pub const T_CALL_NEAR: u32 = 0x83;
pub const T_JMP_FAR: u32 = 0x84;
pub const T_CALL_FAR: u32 = 0x85;

// Special register files.
pub const T_SEG_REG: u32 = 0x91;
pub const T_CTL_REG: u32 = 0x92;
pub const T_DBG_REG: u32 = 0x93;
pub const T_TST_REG: u32 = 0x94;
pub const T_MASK_REG: u32 = 0x95;
pub const T_BND_REG: u32 = 0x98;

// Implicit operands.
pub const T_AL: u32 = 0xA1;
pub const T_AX: u32 = 0xA2;
pub const T_EAX: u32 = 0xA3;
pub const T_RAX: u32 = 0xA4;
pub const T_AX_EAX: u32 = 0xA8;
pub const T_AX_EAX_RAX: u32 = 0xA9;
pub const T_XMM0: u32 = 0xAE;
pub const T_ST0: u32 = 0xAF;
pub const T_ONE: u32 = 0xB1;
pub const T_DX: u32 = 0xB2;
pub const T_CL: u32 = 0xB3;
pub const T_MEM_BX: u32 = 0xC0; // [bx] / [ebx] / [rbx] (xlat)
pub const T_MEM_SI: u32 = 0xC1; // [si] / [esi] / [rsi]
pub const T_MEM_DI: u32 = 0xC2; // es:[di] / es:[edi] / [rdi]

// Vector-size field, bits 8-11. OR'ed onto a base class.
pub const V_MMX_XMM: u32 = 0x100; // mmx/xmm/ymm/zmm by 66 prefix + VEX.L/LL
pub const V_XMM_UP: u32 = 0x200; // xmm/ymm/zmm by VEX.L/LL
pub const V_MMX: u32 = 0x300;
pub const V_XMM: u32 = 0x400;
pub const V_YMM: u32 = 0x500;
pub const V_ZMM: u32 = 0x600;
pub const V_FUT128: u32 = 0x700; // future 128-byte vector
pub const V_HALF: u32 = 0xF00; // half the size given by VEX.L/LL

// Register/memory constraint, bits 12-13.
pub const C_REG_ONLY: u32 = 0x1000;
pub const C_MEM_ONLY: u32 = 0x2000;

// Addressing source, bits 16-19. Applied to decoded operand slots only.
pub const SRC_DIRECT_MEM: u32 = 0x10000; // moffs, no ModR/M
pub const SRC_OPCODE_REG: u32 = 0x20000; // low opcode bits + REX.B
pub const SRC_RM: u32 = 0x30000; // ModR/M rm (+SIB)
pub const SRC_REG: u32 = 0x40000; // ModR/M reg + REX.R
pub const SRC_DREX: u32 = 0x50000; // DREX dest bits (AMD SSE5, reserved)
pub const SRC_VVVV: u32 = 0x60000; // VEX.vvvv
pub const SRC_IMM_HI: u32 = 0x70000; // bits 4-7 of immediate byte
pub const SRC_IMM_LO: u32 = 0x80000; // bits 0-3 of immediate byte (reserved)
pub const SRC_MASK: u32 = 0xF0000;

// Immediate-field use, bits 20-21.
pub const IMM_FIELD: u32 = 0x100000; // immediate field, or first part of it
pub const IMM_FIELD2: u32 = 0x200000; // second part of the immediate field

// Symbol classification, bits 24-26. Used by the symbol table.
pub const SYM_CODE: u32 = 0x1000000;
pub const SYM_DUBIOUS: u32 = 0x2000000;
pub const SYM_DATA: u32 = 0x4000000;

// Symbol-only bits from the object file reader.
pub const SYM_IFUNC: u32 = 0x40000000; // GNU indirect function
pub const SYM_SEGMENT: u32 = 0x80000000; // symbol is a segment

/// Base size/class field.
#[inline]
pub fn base(t: u32) -> u32 {
    t & 0xFF
}

/// Vector-size field.
#[inline]
pub fn vector_field(t: u32) -> u32 {
    t & 0xF00
}

/// Addressing-source field.
#[inline]
pub fn source_bits(t: u32) -> u32 {
    t & SRC_MASK
}

/// True for constant classes (immediate data, not branch targets).
#[inline]
pub fn is_constant(t: u32) -> bool {
    matches!(base(t), 0x11..=0x39)
}

/// True for near/short/far branch-target classes.
#[inline]
pub fn is_branch_target(t: u32) -> bool {
    matches!(base(t), 0x81..=0x85)
}

/// True if the constant class renders in signed decimal.
#[inline]
pub fn is_signed(t: u32) -> bool {
    base(t) & 0xF0 == 0x20
}

/// True if the constant class renders in hexadecimal.
#[inline]
pub fn is_hex(t: u32) -> bool {
    base(t) & 0xF0 == 0x30
}

/// Byte size of an operand of type `t` under the given effective operand
/// size (16/32/64) and resolved vector length in bytes.
///
/// This is the single place that maps lattice values to sizes; both the
/// decoder (field widths) and the emitter (size overrides, data directives)
/// go through it.
pub fn element_size(t: u32, operand_size: u32, vector_len: u32) -> u32 {
    if vector_field(t) != 0 {
        return match vector_field(t) {
            V_MMX => 8,
            V_XMM => 16,
            V_YMM => 32,
            V_ZMM => 64,
            V_FUT128 => 128,
            V_HALF => (vector_len / 2).max(8),
            _ => vector_len,
        };
    }
    match base(t) {
        T_INT8 | T_CONST8 | T_CONST8_S | T_CONST8_X | T_JMP_SHORT | T_AL | T_CL | T_ONE => 1,
        T_INT16 | T_CONST16 | T_CONST16_S | T_CONST16_X | T_AX | T_DX | T_SEG_REG => 2,
        T_INT32 | T_CONST32 | T_CONST32_S | T_CONST32_X | T_F32_X87 | T_F32 | T_EAX => 4,
        T_INT64 | T_CONST64_X | T_F64_X87 | T_F64 | T_RAX => 8,
        T_INT80 => 10,
        T_MEM48 => 6,
        T_F16 => 2,
        T_F80_X87 | T_F80_ST => 10,
        T_INT_WO | T_CONST_WO | T_CONST_WO_S | T_CONST_WO_X | T_AX_EAX | T_JMP_NEAR
        | T_CALL_NEAR => {
            if operand_size == 16 {
                2
            } else {
                4
            }
        }
        T_INT_WDQ | T_INT_WDQ_ADDR | T_CONST_WDQ | T_CONST_WDQ_S | T_CONST_WDQ_X | T_AX_EAX_RAX
        | T_NEAR_PTR_JMP | T_NEAR_PTR_CALL => operand_size / 8,
        T_FAR_PTR | T_JMP_FAR | T_CALL_FAR => operand_size / 8 + 2,
        T_CTL_REG | T_DBG_REG | T_TST_REG => operand_size / 8,
        T_MASK_REG => 8,
        T_BND_REG => 16,
        T_XMM0 => 16,
        T_FLOAT_SSE | T_FLOAT_PFX | T_VECTOR_A | T_VECTOR_U => vector_len.max(16),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composed_descriptor_splits_back_into_fields() {
        let t = T_F32 | V_XMM_UP | C_MEM_ONLY | SRC_RM;
        assert_eq!(base(t), T_F32);
        assert_eq!(vector_field(t), V_XMM_UP);
        assert_eq!(t & C_MEM_ONLY, C_MEM_ONLY);
        assert_eq!(source_bits(t), SRC_RM);
    }

    #[test]
    fn constant_classes() {
        assert!(is_constant(T_CONST8));
        assert!(is_constant(T_CONST_WDQ_X));
        assert!(!is_constant(T_INT32));
        assert!(is_signed(T_CONST8_S));
        assert!(is_hex(T_CONST64_X));
        assert!(!is_hex(T_CONST16));
    }

    #[test]
    fn width_dependent_sizes() {
        assert_eq!(element_size(T_INT_WDQ, 64, 0), 8);
        assert_eq!(element_size(T_INT_WDQ, 16, 0), 2);
        assert_eq!(element_size(T_INT_WO, 32, 0), 4);
        assert_eq!(element_size(T_F32 | V_ZMM, 32, 64), 64);
        assert_eq!(element_size(T_F32 | V_HALF, 32, 32), 16);
    }
}
