//! Opcode maps.
//!
//! The maps form a forest: a 256-entry primary map plus subtables reached
//! through [`Link`] routers. A terminal entry has `link == Link::None` and a
//! nonzero format; a router carries the discriminant and the id of the next
//! table. An index past the end of a table resolves to [`ILLEGAL`].
//!
//! Field encodings follow the packed conventions documented per field below.
//! The table literals use raw hex for these fields; naming every OR'ed
//! constant would make the rows unreadably wide, so look the values up here.
//!
//! `instset` (some values OR'ed):
//!   0-8 = 8086..Pentium II, 0x11-0x18 = SSE..CLMUL, 0x19 = AVX,
//!   0x1A = FMA3, 0x1C = AVX2, 0x1D = BMI/ADX/TSX group, 0x20-0x25 = AVX-512
//!   families, 0x80 = MIC Knights Corner, 0x100/0x101 = 8087/80387,
//!   0x800 = privileged, 0x1001-0x1007 = AMD-specific families,
//!   0x4000 = 64-bit mode only, 0x8000 = not in 64-bit mode,
//!   0x10000 = proposed, 0x20000 = proposed and never implemented.
//!
//! `prefixes` (values OR'ed):
//!   1 = address-size prefix meaningful without ModR/M, 2 = stack operation,
//!   4 = segment prefix meaningful without ModR/M, 8 = branch-hint/BND,
//!   0x10 = LOCK, 0x20 = REP, 0x40 = REPE/REPNE, 0x80 = jump (66 truncates
//!   IP), 0x100 = 66 selects integer operand size, 0x200 = 66 reused (pd vs
//!   ps, xmm vs mmx, or mandatory), 0x400 = F3 reused (ss), 0x800 = F2
//!   reused (sd), 0xE00 = none/66/F2/F3 select ps/pd/sd/ss,
//!   0x1000 = REX.W selects g.p. operand size (or s/d suffix), 0x2000 =
//!   REX.W allowed but ignored, 0x3000 = W selects d/q or ps/pd, 0x4000 =
//!   VEX.W selects b/w, 0x5000 = 66+W select b/w/d/q, 0x7000 = W swaps last
//!   two operands, 0x8000 = mandatory prefix required, 0x10000 = VEX/XOP
//!   allowed, 0x20000 = VEX/EVEX/XOP required, 0x40000 = VEX.L allowed,
//!   0x80000 = VEX.vvvv in use, 0x100000 = VEX.L required, 0x200000 = L
//!   only if pp < 2, 0x400000 = MVEX allowed, 0x800000 = EVEX allowed.
//!
//! `format`:
//!   0 = illegal. 1 = no ModR/M, implicit operands. 2 = no ModR/M, no
//!   operands. 3 = register in opcode bits 0-2. 4 = VEX, no ModR/M, register
//!   in VEX.vvvv. 0x10 = ModR/M present (low bits select the operand
//!   configuration): 0x11 one r/m operand, 0x12 reg <- r/m, 0x13 r/m <- reg,
//!   0x14/0x15 = DREX forms (AMD SSE5, parsed but reserved), 0x18 = NDD
//!   (dest = vvvv, src = r/m), 0x19 = NDS (dest = reg, src1 = vvvv, src2 =
//!   r/m), 0x1A = dest = r/m, src1 = vvvv, src2 = reg, 0x1B = dest = reg,
//!   src1 = r/m, src2 = vvvv, 0x1C = four operands, src3 = imm[7:4], 0x1D =
//!   four operands, src1 = imm[7:4], 0x1E = VSIB.
//!   Immediate field (OR'ed): 0x20 = 2 bytes, 0x40 = 1 byte, 0x60 = 2+1,
//!   0x80 = 2/4 by operand size (near jump), 0x100 = 2/4/8 by operand size,
//!   0x200 = far direct 2+2/4+2, 0x400 = direct memory (moffs),
//!   0x800 = far indirect memory operand.
//!   0x2000 = reserved opcode, 0x4000 = undocumented, 0x8000 = prefix byte.
//!
//! `dest`/`src1`/`src2`/`src3`: operand-type lattice values (see `optype`).
//!
//! `evex` meta: bits 0-3 = L'L/b meaning (1 = broadcast allowed, 2 = SAE
//!   only, 6 = rounding + SAE, 8 = scalar), bits 4-7 = masking (0x10 allow,
//!   0x20 allow + zeroing, 0x50 mask required, 0x80 mask written), bits
//!   12-15 = compressed-displacement multiplier source (0 = memory operand
//!   size, 0x1000 = element size, 0x2200/0x2400/0x2600 = 1/2, 1/4, 1/8 of
//!   the largest vector).
//!
//! `mvex` meta: bits 0-4 = swizzle-table selector (sss meaning), bits 6-7 =
//!   offset-multiplier source, bits 8-10 = E-bit rounding gate (0x100 =
//!   rounding, 0x200 = SAE, 0x300 = both, 0x400 = neither), bit 11 = E bit
//!   repurposed, bits 12-13 = kkk meaning (0x1000 = masking, 0x2000 = mask
//!   destination, 0x3000 = both).
//!
//! `options` (values OR'ed):
//!   1 = append size/type suffix to the name, 2 = prepend `v` under VEX,
//!   4 = does not write its destination, 8 = clobbers other registers
//!   (calls), 0x10 = unconditional jump, 0x20 = prefixes are explicit,
//!   0x40 = may be used as NOP/filler, 0x80 = shorter form exists,
//!   0x100 = memory operand must be aligned, 0x200 = never alignment
//!   checked, 0x400 = name differs in 64-bit mode, 0x800 = no size
//!   specifier on memory operand, 0x1000 = append "32"/"64" suffix.

mod groups;
mod map0;
mod map0f;
mod map38;
mod x87;

pub use groups::*;
pub use map0::MAP0;
pub use map0f::MAP_0F;
pub use map38::{MAP_0F38, MAP_0F3A, MAP_3DNOW, MAP_XOP8, MAP_XOP9, MAP_XOPA};
pub use x87::*;

/// One entry in an opcode map: either a terminal instruction definition or a
/// router to a subtable.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeDef {
    pub name: &'static str,
    pub instset: u32,
    pub prefixes: u32,
    pub format: u16,
    pub dest: u16,
    pub src1: u16,
    pub src2: u16,
    pub src3: u16,
    pub evex: u16,
    pub mvex: u16,
    pub link: Link,
    pub options: u16,
}

/// Router discriminant: how the index into the linked table is derived.
/// The payload is the target table id (index into [`TABLES`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    None,
    /// Following byte is the index (256 entries).
    ByByte(u16),
    /// ModR/M.reg (0..7).
    ByReg(u16),
    /// ModR/M.mod: 0 = memory form, 1 = register form.
    ByMod(u16),
    /// reg for mod<3 (0..7), reg+8 for mod==3.
    ByModReg(u16),
    /// ModR/M.rm (0..7).
    ByRm(u16),
    /// First immediate byte, read after the operand fields.
    ByImm(u16),
    /// CPU mode: 16/32/64 -> 0/1/2.
    ByMode(u16),
    /// Effective operand size: 16/32/64 -> 0/1/2.
    ByOpSize(u16),
    /// Mandatory prefix: none/66/F2/F3 -> 0/1/2/3.
    ByPrefix(u16),
    /// Effective address size: 16/32/64 -> 0/1/2.
    ByAddrSize(u16),
    /// VEX presence + L: 0 = none, 1 = L0, 2 = L1, 3 = LL2, 4 = LL3.
    ByVexL(u16),
    /// VEX.W bit.
    ByVexW(u16),
    /// Vector size by L/LL bits: 0..3.
    ByVectorSize(u16),
    /// VEX prefix width: 0 = none/2-byte/3-byte VEX, 1 = EVEX/MVEX.
    ByVexWidth(u16),
    /// MVEX.E bit.
    ByMvexE(u16),
    /// Assembly dialect: MASM/NASM/GAS -> 0/1/2.
    ByDialect(u16),
    /// Prefix family: none/VEX/EVEX/MVEX -> 0/1/2/3.
    ByPrefixFamily(u16),
    /// Code byte after all prefixes.
    ByByteAfterPrefixes(u16),
}

/// Shared illegal-opcode entry: zero format, no link.
pub const ILLEGAL: OpcodeDef = OpcodeDef {
    name: "",
    instset: 0,
    prefixes: 0,
    format: 0,
    dest: 0,
    src1: 0,
    src2: 0,
    src3: 0,
    evex: 0,
    mvex: 0,
    link: Link::None,
    options: 0,
};

/// Terminal entry.
pub const fn op(
    name: &'static str,
    instset: u32,
    prefixes: u32,
    format: u16,
    dest: u16,
    src1: u16,
    src2: u16,
    options: u16,
) -> OpcodeDef {
    OpcodeDef {
        name,
        instset,
        prefixes,
        format,
        dest,
        src1,
        src2,
        src3: 0,
        evex: 0,
        mvex: 0,
        link: Link::None,
        options,
    }
}

/// Terminal entry with EVEX/MVEX metadata and an optional fourth operand.
#[allow(clippy::too_many_arguments)]
pub const fn opv(
    name: &'static str,
    instset: u32,
    prefixes: u32,
    format: u16,
    dest: u16,
    src1: u16,
    src2: u16,
    src3: u16,
    evex: u16,
    mvex: u16,
    options: u16,
) -> OpcodeDef {
    OpcodeDef {
        name,
        instset,
        prefixes,
        format,
        dest,
        src1,
        src2,
        src3,
        evex,
        mvex,
        link: Link::None,
        options,
    }
}

/// Router entry. `format` matters only for [`Link::ByImm`], where the operand
/// fields must be parsed before the immediate byte can be read.
pub const fn lnk(link: Link, format: u16) -> OpcodeDef {
    OpcodeDef {
        name: "",
        instset: 0,
        prefixes: 0,
        format,
        dest: 0,
        src1: 0,
        src2: 0,
        src3: 0,
        evex: 0,
        mvex: 0,
        link,
        options: 0,
    }
}

/// Prefix byte entry. The prefix scanner consumes these before map
/// traversal; the entries exist so every byte of the primary map is defined.
pub const fn pfx(name: &'static str, format: u16) -> OpcodeDef {
    OpcodeDef {
        name,
        instset: 0,
        prefixes: 0,
        format,
        dest: 0,
        src1: 0,
        src2: 0,
        src3: 0,
        evex: 0,
        mvex: 0,
        link: Link::None,
        options: 0,
    }
}

// Table ids. Must match the order of `TABLES`.
pub const T_MAP0: u16 = 0;
pub const T_0F: u16 = 1;
pub const T_0F38: u16 = 2;
pub const T_0F3A: u16 = 3;
pub const T_GRP1_80: u16 = 4;
pub const T_GRP1_81: u16 = 5;
pub const T_GRP1_82: u16 = 6;
pub const T_GRP1_83: u16 = 7;
pub const T_GRP1A: u16 = 8;
pub const T_GRP2_C0: u16 = 9;
pub const T_GRP2_C1: u16 = 10;
pub const T_GRP2_D0: u16 = 11;
pub const T_GRP2_D1: u16 = 12;
pub const T_GRP2_D2: u16 = 13;
pub const T_GRP2_D3: u16 = 14;
pub const T_GRP3_F6: u16 = 15;
pub const T_GRP3_F7: u16 = 16;
pub const T_GRP4: u16 = 17;
pub const T_GRP5: u16 = 18;
pub const T_GRP6: u16 = 19;
pub const T_GRP7: u16 = 20;
pub const T_GRP7_R1: u16 = 21;
pub const T_GRP7_R2: u16 = 22;
pub const T_GRP7_R7: u16 = 23;
pub const T_GRP8: u16 = 24;
pub const T_GRP9: u16 = 25;
pub const T_GRP9_CX: u16 = 26;
pub const T_GRP11_C6: u16 = 27;
pub const T_GRP11_C7: u16 = 28;
pub const T_GRP12: u16 = 29;
pub const T_GRP13: u16 = 30;
pub const T_GRP14: u16 = 31;
pub const T_GRP15: u16 = 32;
pub const T_GRP16: u16 = 33;
pub const T_GRP17: u16 = 34;
pub const T_MODE_40: u16 = 35;
pub const T_MODE_48: u16 = 36;
pub const T_MODE_63: u16 = 37;
pub const T_MODE_9C: u16 = 38;
pub const T_MODE_9D: u16 = 39;
pub const T_SIZE_98: u16 = 40;
pub const T_SIZE_99: u16 = 41;
pub const T_SIZE_CF: u16 = 42;
pub const T_ADDR_E3: u16 = 43;
pub const T_PFX_90: u16 = 44;
pub const T_X87_D8: u16 = 45;
pub const T_X87_D9: u16 = 46;
pub const T_X87_D9_2: u16 = 47;
pub const T_X87_D9_4: u16 = 48;
pub const T_X87_D9_5: u16 = 49;
pub const T_X87_D9_6: u16 = 50;
pub const T_X87_D9_7: u16 = 51;
pub const T_X87_DA: u16 = 52;
pub const T_X87_DA_5: u16 = 53;
pub const T_X87_DB: u16 = 54;
pub const T_X87_DB_4: u16 = 55;
pub const T_X87_DC: u16 = 56;
pub const T_X87_DD: u16 = 57;
pub const T_X87_DE: u16 = 58;
pub const T_X87_DE_3: u16 = 59;
pub const T_X87_DF: u16 = 60;
pub const T_X87_DF_4: u16 = 61;
pub const T_0F10: u16 = 62;
pub const T_0F11: u16 = 63;
pub const T_0F12: u16 = 64;
pub const T_0F12_NONE: u16 = 65;
pub const T_0F16: u16 = 66;
pub const T_0F16_NONE: u16 = 67;
pub const T_0F2A: u16 = 68;
pub const T_0F2C: u16 = 69;
pub const T_0F2D: u16 = 70;
pub const T_0F5A: u16 = 71;
pub const T_0F5B: u16 = 72;
pub const T_0F6F: u16 = 73;
pub const T_0F70: u16 = 74;
pub const T_0F77: u16 = 75;
pub const T_0F7E: u16 = 76;
pub const T_0F7F: u16 = 77;
pub const T_0FB8: u16 = 78;
pub const T_0FBC: u16 = 79;
pub const T_0FBD: u16 = 80;
pub const T_0FD6: u16 = 81;
pub const T_0FE6: u16 = 82;
pub const T_3DNOW: u16 = 83;
pub const T_PREFETCH_0D: u16 = 84;
pub const T_KMASK_41: u16 = 85;
pub const T_KMASK_42: u16 = 86;
pub const T_KMASK_44: u16 = 87;
pub const T_KMASK_45: u16 = 88;
pub const T_KMASK_46: u16 = 89;
pub const T_KMASK_47: u16 = 90;
pub const T_38F0: u16 = 91;
pub const T_38F1: u16 = 92;
pub const T_38F5: u16 = 93;
pub const T_38F6: u16 = 94;
pub const T_38F7: u16 = 95;
pub const T_XOP8: u16 = 96;
pub const T_XOP9: u16 = 97;
pub const T_XOPA: u16 = 98;
pub const T_0FE7: u16 = 99;
pub const T_0FF7: u16 = 100;

/// All opcode tables, indexed by table id.
pub static TABLES: &[&[OpcodeDef]] = &[
    &MAP0,          // 0
    &MAP_0F,        // 1
    &MAP_0F38,      // 2
    &MAP_0F3A,      // 3
    &GRP1_80,       // 4
    &GRP1_81,       // 5
    &GRP1_82,       // 6
    &GRP1_83,       // 7
    &GRP1A,         // 8
    &GRP2_C0,       // 9
    &GRP2_C1,       // 10
    &GRP2_D0,       // 11
    &GRP2_D1,       // 12
    &GRP2_D2,       // 13
    &GRP2_D3,       // 14
    &GRP3_F6,       // 15
    &GRP3_F7,       // 16
    &GRP4,          // 17
    &GRP5,          // 18
    &GRP6,          // 19
    &GRP7,          // 20
    &GRP7_R1,       // 21
    &GRP7_R2,       // 22
    &GRP7_R7,       // 23
    &GRP8,          // 24
    &GRP9,          // 25
    &GRP9_CX,       // 26
    &GRP11_C6,      // 27
    &GRP11_C7,      // 28
    &GRP12,         // 29
    &GRP13,         // 30
    &GRP14,         // 31
    &GRP15,         // 32
    &GRP16,         // 33
    &GRP17,         // 34
    &MODE_40,       // 35
    &MODE_48,       // 36
    &MODE_63,       // 37
    &MODE_9C,       // 38
    &MODE_9D,       // 39
    &SIZE_98,       // 40
    &SIZE_99,       // 41
    &SIZE_CF,       // 42
    &ADDR_E3,       // 43
    &PFX_90,        // 44
    &X87_D8,        // 45
    &X87_D9,        // 46
    &X87_D9_2,      // 47
    &X87_D9_4,      // 48
    &X87_D9_5,      // 49
    &X87_D9_6,      // 50
    &X87_D9_7,      // 51
    &X87_DA,        // 52
    &X87_DA_5,      // 53
    &X87_DB,        // 54
    &X87_DB_4,      // 55
    &X87_DC,        // 56
    &X87_DD,        // 57
    &X87_DE,        // 58
    &X87_DE_3,      // 59
    &X87_DF,        // 60
    &X87_DF_4,      // 61
    &PFX_0F10,      // 62
    &PFX_0F11,      // 63
    &PFX_0F12,      // 64
    &MOD_0F12,      // 65
    &PFX_0F16,      // 66
    &MOD_0F16,      // 67
    &PFX_0F2A,      // 68
    &PFX_0F2C,      // 69
    &PFX_0F2D,      // 70
    &PFX_0F5A,      // 71
    &PFX_0F5B,      // 72
    &PFX_0F6F,      // 73
    &PFX_0F70,      // 74
    &VEXL_0F77,     // 75
    &PFX_0F7E,      // 76
    &PFX_0F7F,      // 77
    &PFX_0FB8,      // 78
    &PFX_0FBC,      // 79
    &PFX_0FBD,      // 80
    &PFX_0FD6,      // 81
    &PFX_0FE6,      // 82
    &MAP_3DNOW,     // 83
    &PREFETCH_0D,   // 84
    &KMASK_41,      // 85
    &KMASK_42,      // 86
    &KMASK_44,      // 87
    &KMASK_45,      // 88
    &KMASK_46,      // 89
    &KMASK_47,      // 90
    &PFX_38F0,      // 91
    &PFX_38F1,      // 92
    &PFX_38F5,      // 93
    &PFX_38F6,      // 94
    &PFX_38F7,      // 95
    &MAP_XOP8,      // 96
    &MAP_XOP9,      // 97
    &MAP_XOPA,      // 98
    &PFX_0FE7,      // 99
    &PFX_0FF7,      // 100
];

/// Look up `index` in table `table`, falling back to the illegal entry when
/// the index is out of range.
#[inline]
pub fn entry(table: u16, index: usize) -> &'static OpcodeDef {
    TABLES
        .get(table as usize)
        .and_then(|t| t.get(index))
        .unwrap_or(&ILLEGAL)
}

/// Initial table for a VEX/EVEX/MVEX map selector (`mmmmm` bits).
/// Map 0 is the legacy primary map (no escape consumed yet).
pub fn vex_start_page(mmmm: u8) -> Option<u16> {
    match mmmm {
        0 => Some(T_MAP0),
        1 => Some(T_0F),
        2 => Some(T_0F38),
        3 => Some(T_0F3A),
        _ => None,
    }
}

/// Initial table for an XOP map selector.
pub fn xop_start_page(mmmm: u8) -> Option<u16> {
    match mmmm {
        8 => Some(T_XOP8),
        9 => Some(T_XOP9),
        0xA => Some(T_XOPA),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_dense_and_matches_ids() {
        assert_eq!(TABLES.len(), T_0FF7 as usize + 1);
        assert_eq!(TABLES[T_MAP0 as usize].len(), 256);
        assert_eq!(TABLES[T_0F as usize].len(), 256);
    }

    #[test]
    fn out_of_range_lookup_is_illegal() {
        let e = entry(T_0F38, 0xFFF);
        assert_eq!(e.format, 0);
        assert_eq!(e.link, Link::None);
        let e = entry(0x7FFF, 0);
        assert_eq!(e.format, 0);
    }

    #[test]
    fn every_router_targets_a_real_table() {
        for (ti, table) in TABLES.iter().enumerate() {
            for (i, e) in table.iter().enumerate() {
                let target = match e.link {
                    Link::None => continue,
                    Link::ByByte(t)
                    | Link::ByReg(t)
                    | Link::ByMod(t)
                    | Link::ByModReg(t)
                    | Link::ByRm(t)
                    | Link::ByImm(t)
                    | Link::ByMode(t)
                    | Link::ByOpSize(t)
                    | Link::ByPrefix(t)
                    | Link::ByAddrSize(t)
                    | Link::ByVexL(t)
                    | Link::ByVexW(t)
                    | Link::ByVectorSize(t)
                    | Link::ByVexWidth(t)
                    | Link::ByMvexE(t)
                    | Link::ByDialect(t)
                    | Link::ByPrefixFamily(t)
                    | Link::ByByteAfterPrefixes(t) => t,
                };
                assert!(
                    (target as usize) < TABLES.len(),
                    "table {ti} entry {i} links to missing table {target}"
                );
            }
        }
    }
}
