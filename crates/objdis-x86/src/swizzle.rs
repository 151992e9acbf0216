//! MVEX swizzle/conversion tables and EVEX rounding-mode names.
//!
//! An MVEX-prefixed instruction modifies one operand through the 3-bit `sss`
//! field: a register permutation, a memory broadcast, or an up/down
//! conversion. Which table applies is selected by bits 0-4 of the opcode
//! entry's `mvex` metadata; the E bit switches register forms over to the
//! rounding table when the metadata allows it.

/// One swizzle table entry.
#[derive(Debug, Clone, Copy)]
pub struct SwizSpec {
    /// Memory operand type (operand-type lattice value).
    pub memop: u32,
    /// Memory operand size in bytes; also the single-byte offset multiplier
    /// and the required alignment.
    pub memopsize: u32,
    /// Element size before conversion, for broadcast/gather/scatter.
    pub elementsize: u32,
    /// Permutation, conversion or broadcast decoration. Empty = none.
    pub name: &'static str,
}

const fn sw(memop: u32, memopsize: u32, elementsize: u32, name: &'static str) -> SwizSpec {
    SwizSpec { memop, memopsize, elementsize, name }
}

// Register-form permutations for 32-bit element operands.
#[rustfmt::skip]
static SWIZ_REG_32: [SwizSpec; 8] = [
    sw(0x650, 64, 4, ""),
    sw(0x650, 64, 4, "cdab"),
    sw(0x650, 64, 4, "badc"),
    sw(0x650, 64, 4, "dacb"),
    sw(0x650, 64, 4, "aaaa"),
    sw(0x650, 64, 4, "bbbb"),
    sw(0x650, 64, 4, "cccc"),
    sw(0x650, 64, 4, "dddd"),
];

// Register-form permutations for 64-bit element operands.
#[rustfmt::skip]
static SWIZ_REG_64: [SwizSpec; 8] = [
    sw(0x650, 64, 8, ""),
    sw(0x650, 64, 8, "cdab"),
    sw(0x650, 64, 8, "badc"),
    sw(0x650, 64, 8, "dacb"),
    sw(0x650, 64, 8, "aaaa"),
    sw(0x650, 64, 8, "bbbb"),
    sw(0x650, 64, 8, "cccc"),
    sw(0x650, 64, 8, "dddd"),
];

// Memory-form broadcasts and up-conversions for 32-bit float operands.
#[rustfmt::skip]
static SWIZ_MEM_F32: [SwizSpec; 8] = [
    sw(0x64B, 64, 4, ""),
    sw(0x44B, 4,  4, "{1to16}"),
    sw(0x44B, 16, 4, "{4to16}"),
    sw(0,     0,  0, ""),
    sw(0x64A, 32, 2, "float16"),
    sw(0x601, 16, 1, "uint8"),
    sw(0x601, 16, 1, "sint8"),
    sw(0x602, 32, 2, "uint16"),
];

#[rustfmt::skip]
static SWIZ_MEM_F64: [SwizSpec; 8] = [
    sw(0x64C, 64, 8, ""),
    sw(0x44C, 8,  8, "{1to8}"),
    sw(0x44C, 32, 8, "{4to8}"),
    sw(0, 0, 0, ""), sw(0, 0, 0, ""), sw(0, 0, 0, ""), sw(0, 0, 0, ""), sw(0, 0, 0, ""),
];

#[rustfmt::skip]
static SWIZ_MEM_I32: [SwizSpec; 8] = [
    sw(0x603, 64, 4, ""),
    sw(0x403, 4,  4, "{1to16}"),
    sw(0x403, 16, 4, "{4to16}"),
    sw(0,     0,  0, ""),
    sw(0,     0,  0, ""),
    sw(0x601, 16, 1, "uint8"),
    sw(0x601, 16, 1, "sint8"),
    sw(0x602, 32, 2, "uint16"),
];

#[rustfmt::skip]
static SWIZ_MEM_I64: [SwizSpec; 8] = [
    sw(0x604, 64, 8, ""),
    sw(0x404, 8,  8, "{1to8}"),
    sw(0x404, 32, 8, "{4to8}"),
    sw(0, 0, 0, ""), sw(0, 0, 0, ""), sw(0, 0, 0, ""), sw(0, 0, 0, ""), sw(0, 0, 0, ""),
];

// Down-conversions (store direction).
#[rustfmt::skip]
static SWIZ_MEM_D32: [SwizSpec; 8] = [
    sw(0x64B, 64, 4, ""),
    sw(0, 0, 0, ""), sw(0, 0, 0, ""), sw(0, 0, 0, ""),
    sw(0x64A, 32, 2, "float16"),
    sw(0x601, 16, 1, "uint8"),
    sw(0x601, 16, 1, "sint8"),
    sw(0x602, 32, 2, "uint16"),
];

/// Rounding-mode decorations selected by `sss` when MVEX.E is set.
#[rustfmt::skip]
static SWIZ_ROUND: [SwizSpec; 8] = [
    sw(0, 0, 0, "{rn}"),
    sw(0, 0, 0, "{rd}"),
    sw(0, 0, 0, "{ru}"),
    sw(0, 0, 0, "{rz}"),
    sw(0, 0, 0, "{rn-sae}"),
    sw(0, 0, 0, "{rd-sae}"),
    sw(0, 0, 0, "{ru-sae}"),
    sw(0, 0, 0, "{rz-sae}"),
];

/// EVEX static-rounding decorations, indexed by L'L; index 4 is bare SAE.
pub static EVEX_ROUNDING: [&str; 5] =
    ["{rn-sae}", "{rd-sae}", "{ru-sae}", "{rz-sae}", "{sae}"];

/// Look up the swizzle record for an MVEX-prefixed instruction.
///
/// `meta` is the opcode entry's `mvex` field, `sss` the decoded sss bits,
/// `is_mem` whether the modified operand is in memory, `e` the MVEX.E bit.
pub fn swizzle_lookup(meta: u16, sss: u8, is_mem: bool, e: bool) -> Option<&'static SwizSpec> {
    let sel = meta & 0x1F;
    let sss = (sss & 7) as usize;
    if sel == 0 {
        return None;
    }
    if !is_mem {
        if e {
            // E selects rounding/SAE decorations when the metadata allows.
            return match meta & 0x700 {
                0x100 | 0x200 | 0x300 => Some(&SWIZ_ROUND[sss]),
                0x400 => None,
                _ => None,
            };
        }
        return match sel {
            4 | 6 | 0x14 | 0x15 | 0x16 => Some(&SWIZ_REG_32[sss]),
            5 | 7 => Some(&SWIZ_REG_64[sss]),
            _ => None,
        };
    }
    match sel {
        4 | 8 | 0x10 | 0x15 | 0x16 => Some(&SWIZ_MEM_F32[sss]),
        5 | 9 | 0x11 => Some(&SWIZ_MEM_F64[sss]),
        6 | 0xA | 0x12 | 0x14 => Some(&SWIZ_MEM_I32[sss]),
        7 | 0xB | 0x13 => Some(&SWIZ_MEM_I64[sss]),
        0xC | 0xE => Some(&SWIZ_MEM_D32[sss]),
        0xD | 0xF => Some(&SWIZ_MEM_F64[sss]),
        1 | 2 => Some(&SWIZ_MEM_F32[0]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_entry_has_element_multiplier() {
        let s = swizzle_lookup(0x1304, 1, true, false).unwrap();
        assert_eq!(s.name, "{1to16}");
        assert_eq!(s.memopsize, 4);
    }

    #[test]
    fn register_swizzle_by_sss() {
        let s = swizzle_lookup(0x1304, 4, false, false).unwrap();
        assert_eq!(s.name, "aaaa");
    }

    #[test]
    fn e_bit_selects_rounding() {
        let s = swizzle_lookup(0x1304, 5, false, true).unwrap();
        assert_eq!(s.name, "{rd-sae}");
    }
}
