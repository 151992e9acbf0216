//! Single-instruction decoder.
//!
//! The pipeline runs in fixed stages: prefix scan, opcode-map traversal,
//! operand-field extraction, operand typing, then EVEX/MVEX feature
//! decoding. Every stage writes into the [`Decoded`] scratch record.
//!
//! Progress guarantee: `decode` always returns `end > begin`, or sets
//! [`Errors::TRUNCATED`] when the section ends mid-instruction.

use crate::decoded::*;
use crate::optype::{self, element_size};
use crate::swizzle::{swizzle_lookup, EVEX_ROUNDING};
use crate::tables::{self, entry, Link, OpcodeDef, ILLEGAL};

/// Architectural instruction length limit.
pub const MAX_INSTRUCTION_LEN: u32 = 15;

/// Decoder over one section's bytes. Cheap to construct; holds no state
/// between instructions.
pub struct Decoder<'a> {
    bytes: &'a [u8],
    limit: u32,
    mode: u32,
    dialect: u8,
}

impl<'a> Decoder<'a> {
    /// `mode` is the segment word size: 16, 32 or 64.
    pub fn new(bytes: &'a [u8], mode: u32) -> Self {
        Self {
            bytes,
            limit: bytes.len() as u32,
            mode,
            dialect: 0,
        }
    }

    /// Restrict decoding to the first `limit` bytes (initialized data).
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.min(self.bytes.len() as u32);
        self
    }

    /// Dialect index for dialect-routed opcode names (0 MASM, 1 NASM, 2 GAS).
    pub fn with_dialect(mut self, dialect: u8) -> Self {
        self.dialect = dialect;
        self
    }

    #[inline]
    fn byte(&self, pos: u32) -> u8 {
        if pos < self.limit {
            self.bytes[pos as usize]
        } else {
            0
        }
    }

    #[inline]
    fn in_range(&self, pos: u32) -> bool {
        pos < self.limit
    }

    /// Decode one instruction starting at `begin`.
    pub fn decode(&self, begin: u32) -> Decoded {
        let mut d = Decoded::new(begin);
        if !self.in_range(begin) {
            d.errors |= Errors::TRUNCATED;
            d.end = begin;
            return d;
        }

        self.scan_prefixes(&mut d);
        if d.errors.contains(Errors::TRUNCATED) {
            d.end = self.limit.max(begin + 1).min(self.bytes.len() as u32);
            return d;
        }

        self.find_map_entry(&mut d);
        self.find_operands(&mut d);
        self.find_operand_types(&mut d);
        self.find_broadcast(&mut d);
        self.swizzle_fields(&mut d);
        self.check_errors(&mut d);

        if d.end <= d.begin {
            d.end = (d.begin + 1).min(self.limit);
            if d.end <= d.begin {
                d.end = d.begin + 1;
            }
        }
        d
    }

    fn store_prefix(&self, d: &mut Decoded, cat: usize, byte: u8) {
        if d.prefixes[cat] != 0 && d.prefixes[cat] != byte {
            d.conflicts[cat] += 1;
        }
        d.prefixes[cat] = byte;
    }

    fn scan_prefixes(&self, d: &mut Decoded) {
        let mut pos = d.begin;
        loop {
            if !self.in_range(pos) {
                d.errors |= Errors::TRUNCATED;
                return;
            }
            if pos - d.begin >= MAX_INSTRUCTION_LEN {
                d.errors |= Errors::TOO_LONG;
                break;
            }
            let b = self.byte(pos);
            match b {
                0x26 | 0x2E | 0x36 | 0x3E | 0x64 | 0x65 => {
                    self.store_prefix(d, CAT_SEG, b);
                    pos += 1;
                }
                0x67 => {
                    self.store_prefix(d, CAT_ASIZE, b);
                    pos += 1;
                }
                0xF0 => {
                    self.store_prefix(d, CAT_LOCK, b);
                    pos += 1;
                }
                0xF2 | 0xF3 => {
                    self.store_prefix(d, CAT_REP, b);
                    self.store_prefix(d, CAT_OTYPE, b);
                    pos += 1;
                }
                0x66 => {
                    self.store_prefix(d, CAT_OSIZE, b);
                    self.store_prefix(d, CAT_OTYPE, b);
                    pos += 1;
                }
                0x40..=0x4F if self.mode == 64 => {
                    if d.prefixes[CAT_WRXB] & RXB_REX != 0 {
                        d.conflicts[CAT_WRXB] += 1;
                    }
                    d.prefixes[CAT_WRXB] = (b & 0x0F) | RXB_REX;
                    pos += 1;
                }
                0xC5 => {
                    // 2-byte VEX; LDS in 16/32-bit mode unless ModRM.mod==3.
                    if !self.in_range(pos + 1) {
                        d.errors |= Errors::TRUNCATED;
                        return;
                    }
                    if self.mode != 64 && self.byte(pos + 1) & 0xC0 != 0xC0 {
                        break;
                    }
                    let p = self.byte(pos + 1);
                    d.vexkind = VexKind::Vex2;
                    self.store_prefix(d, CAT_REP, b);
                    let l = (p >> 2) & 1;
                    d.prefixes[CAT_VEX] = 1 | (l << 5);
                    let mut wrxb = RXB_VEX2;
                    if p & 0x80 == 0 {
                        wrxb |= RXB_R;
                    }
                    d.prefixes[CAT_WRXB] |= wrxb;
                    d.vreg = (!p >> 3) & 0x0F;
                    self.store_pp(d, p & 3);
                    d.opcode_start1 = pos + 2;
                    self.finish_prefixes(d);
                    return;
                }
                0xC4 => {
                    // 3-byte VEX; LES in 16/32-bit mode unless ModRM.mod==3.
                    if !self.in_range(pos + 1) {
                        d.errors |= Errors::TRUNCATED;
                        return;
                    }
                    if self.mode != 64 && self.byte(pos + 1) & 0xC0 != 0xC0 {
                        break;
                    }
                    if !self.in_range(pos + 2) {
                        d.errors |= Errors::TRUNCATED;
                        return;
                    }
                    let p1 = self.byte(pos + 1);
                    let p2 = self.byte(pos + 2);
                    d.vexkind = VexKind::Vex3;
                    self.store_prefix(d, CAT_REP, b);
                    let l = (p2 >> 2) & 1;
                    d.prefixes[CAT_VEX] = (p1 & 0x1F) | (l << 5);
                    let mut wrxb = RXB_VEX3;
                    if p1 & 0x80 == 0 {
                        wrxb |= RXB_R;
                    }
                    if p1 & 0x40 == 0 {
                        wrxb |= RXB_X;
                    }
                    if p1 & 0x20 == 0 {
                        wrxb |= RXB_B;
                    }
                    if p2 & 0x80 != 0 {
                        wrxb |= RXB_W;
                    }
                    d.prefixes[CAT_WRXB] |= wrxb;
                    d.vreg = (!p2 >> 3) & 0x0F;
                    self.store_pp(d, p2 & 3);
                    d.opcode_start1 = pos + 3;
                    self.finish_prefixes(d);
                    return;
                }
                0x62 => {
                    // EVEX/MVEX; BOUND in 16/32-bit mode unless ModRM.mod==3.
                    if !self.in_range(pos + 1) {
                        d.errors |= Errors::TRUNCATED;
                        return;
                    }
                    if self.mode != 64 && self.byte(pos + 1) & 0xC0 != 0xC0 {
                        break;
                    }
                    if !self.in_range(pos + 3) {
                        d.errors |= Errors::TRUNCATED;
                        return;
                    }
                    let p0 = self.byte(pos + 1);
                    let p1 = self.byte(pos + 2);
                    let p2 = self.byte(pos + 3);
                    let is_evex = p1 & 0x04 != 0;
                    d.vexkind = if is_evex { VexKind::Evex } else { VexKind::Mvex };
                    self.store_prefix(d, CAT_REP, b);
                    d.prefixes[CAT_VEX] =
                        (p0 & 0x07) | 0x40 | if is_evex { 0x20 } else { 0 };
                    let mut wrxb = RXB_VEX3;
                    if p0 & 0x80 == 0 {
                        wrxb |= RXB_R;
                    }
                    if p0 & 0x40 == 0 {
                        wrxb |= RXB_X;
                    }
                    if p0 & 0x20 == 0 {
                        wrxb |= RXB_B;
                    }
                    if p1 & 0x80 != 0 {
                        wrxb |= RXB_W;
                    }
                    d.prefixes[CAT_WRXB] |= wrxb;
                    d.vreg = (!p1 >> 3) & 0x0F;
                    if p2 & 0x08 == 0 {
                        // V' extends vvvv to 32 registers.
                        d.vreg |= 0x10;
                    }
                    d.kreg = p2 & 0x07;
                    d.esss = p2 >> 4;
                    self.store_pp(d, p1 & 3);
                    d.opcode_start1 = pos + 4;
                    self.finish_prefixes(d);
                    return;
                }
                0x8F => {
                    // XOP unless ModRM.reg==0 (POP r/m).
                    if !self.in_range(pos + 1) {
                        d.errors |= Errors::TRUNCATED;
                        return;
                    }
                    if self.byte(pos + 1) & 0x38 == 0 {
                        break;
                    }
                    if !self.in_range(pos + 2) {
                        d.errors |= Errors::TRUNCATED;
                        return;
                    }
                    let p1 = self.byte(pos + 1);
                    let p2 = self.byte(pos + 2);
                    d.vexkind = VexKind::Xop;
                    self.store_prefix(d, CAT_REP, b);
                    let l = (p2 >> 2) & 1;
                    d.prefixes[CAT_VEX] = (p1 & 0x1F) | (l << 5);
                    let mut wrxb = RXB_XOP | RXB_VEX3;
                    if p1 & 0x80 == 0 {
                        wrxb |= RXB_R;
                    }
                    if p1 & 0x40 == 0 {
                        wrxb |= RXB_X;
                    }
                    if p1 & 0x20 == 0 {
                        wrxb |= RXB_B;
                    }
                    if p2 & 0x80 != 0 {
                        wrxb |= RXB_W;
                    }
                    d.prefixes[CAT_WRXB] |= wrxb;
                    d.vreg = (!p2 >> 3) & 0x0F;
                    self.store_pp(d, p2 & 3);
                    d.opcode_start1 = pos + 3;
                    self.finish_prefixes(d);
                    return;
                }
                _ => break,
            }
        }
        d.opcode_start1 = pos;
        self.finish_prefixes(d);
    }

    /// Record a VEX `pp` field as a synthetic operand-type prefix.
    fn store_pp(&self, d: &mut Decoded, pp: u8) {
        let b = match pp {
            1 => 0x66,
            2 => 0xF3,
            3 => 0xF2,
            _ => 0,
        };
        if b != 0 {
            self.store_prefix(d, CAT_OTYPE, b);
        }
    }

    fn finish_prefixes(&self, d: &mut Decoded) {
        let osz = d.prefixes[CAT_OSIZE] == 0x66;
        let asz = d.prefixes[CAT_ASIZE] == 0x67;
        d.address_size = match self.mode {
            16 => {
                if asz {
                    32
                } else {
                    16
                }
            }
            32 => {
                if asz {
                    16
                } else {
                    32
                }
            }
            _ => {
                if asz {
                    32
                } else {
                    64
                }
            }
        };
        d.operand_size = match self.mode {
            16 => {
                if osz {
                    32
                } else {
                    16
                }
            }
            32 => {
                if osz {
                    16
                } else {
                    32
                }
            }
            _ => {
                if d.w_bit() {
                    64
                } else if osz {
                    16
                } else {
                    32
                }
            }
        };
        d.vector_len = match d.ll_bits() {
            0 => 16,
            1 => 32,
            2 => 64,
            _ => 128,
        };
        if d.has_vex() {
            d.mflags |= MemFlags::HAS_VEX;
        }
    }

    fn find_map_entry(&self, d: &mut Decoded) {
        let mut pos = d.opcode_start1;

        // Initial table: legacy root, or the map selected by VEX.mmmmm.
        let mmmm = d.prefixes[CAT_VEX] & 0x1F;
        let start = if d.has_vex() {
            let page = if d.vexkind == VexKind::Xop {
                tables::xop_start_page(mmmm)
            } else {
                tables::vex_start_page(mmmm)
            };
            match page {
                Some(t) => t,
                None => {
                    d.errors |= Errors::RESERVED_OPCODE;
                    d.opcode_def = &ILLEGAL;
                    d.opcode_start2 = pos;
                    return;
                }
            }
        } else {
            tables::T_MAP0
        };

        if !self.in_range(pos) {
            d.errors |= Errors::TRUNCATED;
            return;
        }
        let mut e: &'static OpcodeDef = entry(start, self.byte(pos) as usize);
        d.opcode_start2 = pos;
        pos += 1;

        loop {
            let (link_table, index) = match e.link {
                Link::None => break,
                Link::ByByte(t) => {
                    if !self.in_range(pos) {
                        d.errors |= Errors::TRUNCATED;
                        return;
                    }
                    d.opcode_start2 = pos;
                    let i = self.byte(pos) as usize;
                    pos += 1;
                    (t, i)
                }
                Link::ByReg(t) => (t, ((self.byte(pos) >> 3) & 7) as usize),
                Link::ByMod(t) => (t, usize::from(self.byte(pos) >> 6 == 3)),
                Link::ByModReg(t) => {
                    let m = self.byte(pos);
                    let i = ((m >> 3) & 7) as usize + if m >> 6 == 3 { 8 } else { 0 };
                    (t, i)
                }
                Link::ByRm(t) => (t, (self.byte(pos) & 7) as usize),
                Link::ByImm(t) => {
                    let imm_pos = self.layout_after_modrm(d, pos);
                    (t, self.byte(imm_pos) as usize)
                }
                Link::ByMode(t) => (t, (self.mode / 16).trailing_zeros() as usize),
                Link::ByOpSize(t) => (t, (d.operand_size / 16).trailing_zeros() as usize),
                Link::ByPrefix(t) => (t, otype_index(d.prefixes[CAT_OTYPE])),
                Link::ByAddrSize(t) => (t, (d.address_size / 16).trailing_zeros() as usize),
                Link::ByVexL(t) => {
                    let i = if !d.has_vex() {
                        0
                    } else {
                        1 + d.ll_bits() as usize
                    };
                    (t, i)
                }
                Link::ByVexW(t) => (t, usize::from(d.w_bit())),
                Link::ByVectorSize(t) => (t, d.ll_bits() as usize),
                Link::ByVexWidth(t) => (
                    t,
                    usize::from(matches!(d.vexkind, VexKind::Evex | VexKind::Mvex)),
                ),
                Link::ByMvexE(t) => (t, usize::from(d.esss & 0x08 != 0)),
                Link::ByDialect(t) => (t, self.dialect as usize),
                Link::ByPrefixFamily(t) => {
                    let i = match d.vexkind {
                        VexKind::None => 0,
                        VexKind::Vex2 | VexKind::Vex3 | VexKind::Xop => 1,
                        VexKind::Evex => 2,
                        VexKind::Mvex => 3,
                    };
                    (t, i)
                }
                Link::ByByteAfterPrefixes(t) => (t, self.byte(d.opcode_start1) as usize),
            };
            e = entry(link_table, index);
        }
        d.opcode_def = e;
        let _ = pos;
    }

    /// Position just past ModR/M + SIB + displacement, given `pos` pointing
    /// at the ModR/M byte. Used for table links keyed on the immediate byte.
    fn layout_after_modrm(&self, d: &Decoded, pos: u32) -> u32 {
        let m = self.byte(pos);
        let md = m >> 6;
        let rm = m & 7;
        let mut p = pos + 1;
        if md != 3 {
            if d.address_size == 16 {
                p += match (md, rm) {
                    (0, 6) => 2,
                    (1, _) => 1,
                    (2, _) => 2,
                    _ => 0,
                };
            } else {
                let mut disp = match md {
                    1 => 1,
                    2 => 4,
                    _ => 0,
                };
                if rm == 4 {
                    let sib = self.byte(p);
                    p += 1;
                    if md == 0 && sib & 7 == 5 {
                        disp = 4;
                    }
                } else if md == 0 && rm == 5 {
                    disp = 4;
                }
                p += disp;
            }
        }
        p
    }

    fn find_operands(&self, d: &mut Decoded) {
        let fmt = d.opcode_def.format;
        let mut pos = d.opcode_start2 + 1;

        if fmt & 0x10 != 0 {
            if !self.in_range(pos) {
                d.errors |= Errors::TRUNCATED;
                d.end = self.limit;
                return;
            }
            let m = self.byte(pos);
            pos += 1;
            d.mflags |= MemFlags::HAS_MODRM;
            d.modrm_mod = m >> 6;
            let wrxb = d.prefixes[CAT_WRXB];
            d.modrm_reg = ((m >> 3) & 7) | if wrxb & RXB_R != 0 { 8 } else { 0 };
            d.modrm_rm = m & 7;

            if d.modrm_mod != 3 {
                d.mflags |= MemFlags::HAS_MEM;
                if d.address_size == 16 {
                    const BASES16: [(u8, u8); 8] = [
                        (4, 7),
                        (4, 8),
                        (6, 7),
                        (6, 8),
                        (7, 0),
                        (8, 0),
                        (6, 0),
                        (4, 0),
                    ];
                    let (b, i) = BASES16[d.modrm_rm as usize];
                    d.base_reg = b;
                    d.index_reg = i;
                    let disp = match (d.modrm_mod, d.modrm_rm) {
                        (0, 6) => {
                            d.base_reg = 0;
                            2
                        }
                        (1, _) => 1,
                        (2, _) => 2,
                        _ => 0,
                    };
                    if disp != 0 {
                        d.address_field = pos;
                        d.address_field_size = disp;
                        pos += disp;
                    }
                } else {
                    let mut disp: u32 = match d.modrm_mod {
                        1 => 1,
                        2 => 4,
                        _ => 0,
                    };
                    if d.modrm_rm == 4 {
                        if !self.in_range(pos) {
                            d.errors |= Errors::TRUNCATED;
                            d.end = self.limit;
                            return;
                        }
                        let sib = self.byte(pos);
                        pos += 1;
                        d.mflags |= MemFlags::HAS_SIB;
                        d.scale = sib >> 6;
                        let index = ((sib >> 3) & 7) | if wrxb & RXB_X != 0 { 8 } else { 0 };
                        let base = (sib & 7) | if wrxb & RXB_B != 0 { 8 } else { 0 };
                        // index 4 without REX.X means no index register.
                        let vsib = fmt & 0x1F == 0x1E;
                        if vsib {
                            d.mflags |= MemFlags::VSIB;
                            d.index_reg = index + 1;
                        } else if index != 4 {
                            d.index_reg = index + 1;
                        }
                        if sib & 7 == 5 && d.modrm_mod == 0 {
                            disp = 4;
                        } else {
                            d.base_reg = base + 1;
                        }
                    } else {
                        if d.modrm_mod == 0 && d.modrm_rm == 5 {
                            disp = 4;
                            if self.mode == 64 {
                                d.mflags |= MemFlags::RIP_RELATIVE;
                            }
                        } else {
                            d.base_reg =
                                (d.modrm_rm | if wrxb & RXB_B != 0 { 8 } else { 0 }) + 1;
                        }
                    }
                    if disp != 0 {
                        d.address_field = pos;
                        d.address_field_size = disp;
                        pos += disp;
                    }
                }
            } else {
                d.modrm_rm |= if wrxb & RXB_B != 0 { 8 } else { 0 };
            }
        } else if fmt & 0x1F == 3 {
            // Register in opcode low bits, extended by REX.B.
            let wrxb = d.prefixes[CAT_WRXB];
            d.modrm_rm =
                (self.byte(d.opcode_start2) & 7) | if wrxb & RXB_B != 0 { 8 } else { 0 };
        }

        // AMD DREX byte (SSE5 drafts, parsed but emitted as reserved).
        if fmt & 0x1F == 0x14 || fmt & 0x1F == 0x15 {
            d.vreg = self.byte(pos) >> 4;
            d.prefixes[CAT_WRXB] |= RXB_XOP;
            pos += 1;
        }

        // Direct memory operand (moffs) uses the address field.
        if fmt & 0x400 != 0 {
            d.address_field = pos;
            d.address_field_size = d.address_size / 8;
            d.mflags |= MemFlags::HAS_MEM;
            pos += d.address_field_size;
        }

        let imm: u32 = match fmt & 0x3E0 {
            0x20 => 2,
            0x40 => 1,
            0x60 => 3,
            0x80 => {
                if d.operand_size == 16 {
                    2
                } else {
                    4
                }
            }
            0x100 => d.operand_size / 8,
            0x200 => {
                if d.operand_size == 16 {
                    4
                } else {
                    6
                }
            }
            _ => 0,
        };
        if imm != 0 {
            d.immediate_field = pos;
            d.immediate_field_size = imm;
            pos += imm;
        }

        d.end = pos;
        if pos > self.limit {
            d.errors |= Errors::TRUNCATED;
            d.end = self.limit;
        }
        if d.end - d.begin > MAX_INSTRUCTION_LEN {
            d.errors |= Errors::TOO_LONG;
        }
    }

    fn find_operand_types(&self, d: &mut Decoded) {
        let def = d.opcode_def;
        let slots = [def.dest, def.src1, def.src2, def.src3];
        let sources = format_sources(def.format);
        let mut next_source = 0usize;
        let mut imm_seen = false;

        for (i, &slot) in slots.iter().enumerate() {
            if slot == 0 {
                continue;
            }
            let mut t = slot as u32;
            let base = optype::base(t);

            if optype::is_constant(t) || optype::is_branch_target(t) {
                t |= if imm_seen {
                    optype::IMM_FIELD2
                } else {
                    optype::IMM_FIELD
                };
                imm_seen = true;
            } else if (0xA1..=0xC2).contains(&base) || base == 0xB1 {
                // Implicit operand, not present in the encoding.
            } else if def.format & 0x400 != 0 && base < 0x10 {
                t |= optype::SRC_DIRECT_MEM;
            } else if let Some(&src) = sources.get(next_source) {
                next_source += 1;
                if src == optype::SRC_VVVV && !d.has_vex() {
                    // vvvv operand drops out of the legacy form.
                    d.operands[i] = 0;
                    continue;
                }
                t |= src;
            }

            d.operands[i] = self.resolve_type(d, t);
        }
    }

    /// Resolve prefix-dependent type selections on one operand descriptor.
    fn resolve_type(&self, d: &Decoded, t: u32) -> u32 {
        let mut t = t;
        let def = d.opcode_def;
        let base = optype::base(t);

        if base == optype::T_FLOAT_PFX {
            let resolved = if def.prefixes & 0x3000 == 0x3000 {
                // VEX.W selects single/double.
                if d.w_bit() {
                    optype::T_F64
                } else {
                    optype::T_F32
                }
            } else {
                match d.prefixes[CAT_OTYPE] {
                    0x66 => optype::T_F64,
                    0xF2 => {
                        // Scalar double: no vector field.
                        return (t & !0xFFF) | optype::T_F64;
                    }
                    0xF3 => {
                        return (t & !0xFFF) | optype::T_F32;
                    }
                    _ => optype::T_F32,
                }
            };
            t = (t & !0xFF) | resolved;
        }

        match optype::vector_field(t) {
            optype::V_MMX_XMM => {
                let v = if d.prefixes[CAT_OTYPE] == 0x66 || d.has_vex() {
                    0x400 + 0x100 * d.ll_bits() as u32
                } else {
                    optype::V_MMX
                };
                t = (t & !0xF00) | v;
            }
            optype::V_XMM_UP => {
                t = (t & !0xF00) | (0x400 + 0x100 * d.ll_bits() as u32);
            }
            _ => {}
        }
        t
    }

    fn find_broadcast(&self, d: &mut Decoded) {
        if d.vexkind != VexKind::Evex {
            return;
        }
        let meta = d.opcode_def.evex as u32;
        if meta == 0 {
            return;
        }

        // Element size of the vector operands (for broadcast and the
        // compressed-displacement multiplier).
        let elem = self.vector_element_size(d);

        d.offset_multiplier = match meta & 0xF000 {
            0x1000 => elem,
            0x2200 => d.vector_len / 2,
            0x2400 => d.vector_len / 4,
            0x2600 => d.vector_len / 8,
            _ => self.memop_size(d),
        }
        .max(1);

        let b = d.esss & 1 != 0;
        if b {
            if d.mflags.contains(MemFlags::HAS_MEM) {
                if meta & 0x01 != 0 && elem > 0 {
                    d.broadcast = d.vector_len / elem;
                    d.offset_multiplier = elem;
                } else {
                    d.errors |= Errors::VEX_MISUSE;
                }
            } else if meta & 0x06 == 0x06 {
                // Rounding control: L'L becomes the rounding mode and the
                // vector length is the full 512 bits.
                d.rounding = Some(EVEX_ROUNDING[(d.ll_bits() & 3) as usize]);
                if meta & 0x08 == 0 {
                    d.vector_len = 64;
                }
            } else if meta & 0x02 != 0 {
                d.rounding = Some(EVEX_ROUNDING[4]);
            } else {
                d.errors |= Errors::VEX_MISUSE;
            }
        }
        if meta & 0x08 != 0 {
            // Scalar: L'L ignored.
            d.vector_len = 16;
        }
        if d.kreg == 0 && meta & 0xF0 == 0x50 {
            d.errors |= Errors::VEX_MISUSE;
        }
        if d.kreg != 0 && meta & 0xF0 == 0 {
            d.errors |= Errors::VEX_MISUSE;
        }
    }

    fn swizzle_fields(&self, d: &mut Decoded) {
        if d.vexkind != VexKind::Mvex {
            return;
        }
        let meta = d.opcode_def.mvex;
        if meta == 0 {
            return;
        }
        d.vector_len = 64;
        let is_mem = d.mflags.contains(MemFlags::HAS_MEM);
        let e = d.esss & 0x08 != 0;
        d.swiz = swizzle_lookup(meta, d.esss & 7, is_mem, e);
        if let Some(s) = d.swiz {
            d.offset_multiplier = if meta & 0x40 != 0 {
                s.elementsize
            } else {
                s.memopsize
            }
            .max(1);
        }
    }

    /// Element size in bytes of the widest vector operand.
    fn vector_element_size(&self, d: &Decoded) -> u32 {
        for &t in &d.operands {
            if t == 0 {
                continue;
            }
            if optype::vector_field(t) != 0 {
                let e = element_size(optype::base(t), d.operand_size, 0);
                if e > 0 {
                    return e;
                }
                // Packed integers default to dword elements.
                return 4;
            }
        }
        4
    }

    /// Size in bytes of the memory operand, if any.
    fn memop_size(&self, d: &Decoded) -> u32 {
        for &t in &d.operands {
            if t == 0 {
                continue;
            }
            if optype::source_bits(t) == optype::SRC_RM || t & optype::C_MEM_ONLY != 0 {
                return element_size(t, d.operand_size, d.vector_len).max(1);
            }
        }
        d.vector_len
    }

    fn check_errors(&self, d: &mut Decoded) {
        let def = d.opcode_def;

        if def.format == 0 {
            d.errors |= Errors::RESERVED_OPCODE;
            // Make sure an illegal opcode still consumes its opcode bytes.
            if d.end <= d.opcode_start2 {
                d.end = (d.opcode_start2 + 1).min(self.limit.max(d.begin + 1));
            }
            return;
        }
        if def.format & 0x2000 != 0 {
            d.errors |= Errors::RESERVED_OPCODE;
        }
        if def.format & 0x4000 != 0 {
            d.warnings2 |= Warnings2::UNDOCUMENTED;
        }
        if def.instset & 0x4000 != 0 && self.mode != 64 {
            d.errors |= Errors::WRONG_MODE;
        }
        if def.instset & 0x8000 != 0 && self.mode == 64 {
            d.errors |= Errors::WRONG_MODE;
        }
        if def.instset & 0x1000 != 0 && def.instset & 0xF000 == 0x1000 {
            d.warnings2 |= Warnings2::AMD_ONLY;
        }
        if def.instset & 0x20000 != 0 {
            d.errors |= Errors::RESERVED_OPCODE;
        }

        if d.prefixes[CAT_LOCK] != 0 && def.prefixes & 0x10 == 0 {
            d.errors |= Errors::ILLEGAL_PREFIX;
        }
        if d.prefixes[CAT_OSIZE] == 0x66 && def.prefixes & 0x80 != 0 {
            if self.mode == 64 {
                d.errors |= Errors::ILLEGAL_PREFIX;
            } else {
                d.warnings1 |= Warnings1::OPSIZE_ON_JUMP;
            }
        }
        let conflicts: u32 = d.conflicts.iter().map(|&c| c as u32).sum();
        if conflicts != 0 {
            d.errors |= Errors::PREFIX_CONFLICT;
        }

        if d.has_vex() {
            if def.prefixes & 0x30000 == 0
                && def.prefixes & 0xC00000 == 0
                && def.format & 0x1F < 0x18
            {
                d.errors |= Errors::VEX_MISUSE;
            }
            if d.vexkind == VexKind::Evex && def.prefixes & 0x800000 == 0 {
                d.errors |= Errors::VEX_MISUSE;
            }
            if d.vexkind == VexKind::Mvex && def.prefixes & 0x400000 == 0 {
                d.errors |= Errors::VEX_MISUSE;
            }
            if d.ll_bits() != 0
                && d.vexkind != VexKind::Evex
                && d.vexkind != VexKind::Mvex
                && def.prefixes & 0x140000 == 0
            {
                d.errors |= Errors::VEX_MISUSE;
            }
        } else if def.prefixes & 0x20000 != 0 {
            // VEX-only encoding reached without a VEX prefix.
            d.errors |= Errors::RESERVED_OPCODE;
        }

        // REX.W on an operation with no 64-bit form.
        if d.w_bit()
            && self.mode == 64
            && d.vexkind == VexKind::None
            && def.prefixes & 0xF000 == 0
        {
            let byte_only = optype::base(d.operands[0]) == optype::T_INT8;
            if byte_only {
                d.errors |= Errors::REX_ON_BYTE_OP;
            } else {
                d.warnings1 |= Warnings1::PREFIX_NO_EFFECT;
            }
        }

        // A displacement field wider than its value needs to be.
        if d.address_field_size == 4 && d.address_relocation == 0 && d.modrm_mod == 2 {
            let disp = self.read_u32(d.address_field);
            if (disp as i32) >= -128 && (disp as i32) < 128 {
                d.warnings1 |= Warnings1::NONCANONICAL_DISP;
            }
        }
    }

    /// Little-endian u32 read, zero past the limit.
    pub fn read_u32(&self, pos: u32) -> u32 {
        let mut v = 0u32;
        let mut i = 0;
        while i < 4 {
            v |= (self.byte(pos + i) as u32) << (8 * i);
            i += 1;
        }
        v
    }

    /// Little-endian read of `size` bytes (1/2/4/8), sign-extended to i64.
    pub fn read_signed(&self, pos: u32, size: u32) -> i64 {
        let mut v = 0u64;
        for i in 0..size.min(8) {
            v |= (self.byte(pos + i) as u64) << (8 * i);
        }
        let bits = size.min(8) * 8;
        if bits < 64 && v & (1 << (bits - 1)) != 0 {
            v |= !0u64 << bits;
        }
        v as i64
    }

    /// Little-endian read of `size` bytes, zero-extended.
    pub fn read_unsigned(&self, pos: u32, size: u32) -> u64 {
        let mut v = 0u64;
        for i in 0..size.min(8) {
            v |= (self.byte(pos + i) as u64) << (8 * i);
        }
        v
    }
}

/// Operand-source assignment order for each ModR/M format.
fn format_sources(format: u16) -> &'static [u32] {
    use crate::optype::*;
    match format & 0x1F {
        3 => &[SRC_OPCODE_REG],
        4 => &[SRC_VVVV],
        0x11 => &[SRC_RM],
        0x12 => &[SRC_REG, SRC_RM],
        0x13 => &[SRC_RM, SRC_REG],
        0x14 | 0x15 => &[SRC_DREX, SRC_REG, SRC_RM],
        0x18 => &[SRC_VVVV, SRC_RM],
        0x19 => &[SRC_REG, SRC_VVVV, SRC_RM],
        0x1A => &[SRC_RM, SRC_VVVV, SRC_REG],
        0x1B => &[SRC_REG, SRC_RM, SRC_VVVV],
        0x1C => &[SRC_REG, SRC_VVVV, SRC_RM, SRC_IMM_HI],
        0x1D => &[SRC_REG, SRC_IMM_HI, SRC_RM, SRC_VVVV],
        0x1E => &[SRC_REG, SRC_RM, SRC_VVVV],
        _ => &[],
    }
}

/// Index for mandatory-prefix table links: none/66/F2/F3 -> 0/1/2/3.
fn otype_index(prefix: u8) -> usize {
    match prefix {
        0x66 => 1,
        0xF2 => 2,
        0xF3 => 3,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optype;

    fn decode64(bytes: &[u8]) -> Decoded {
        Decoder::new(bytes, 64).decode(0)
    }

    #[test]
    fn mov_reg_reg() {
        // mov rbx, rax
        let d = decode64(&[0x48, 0x89, 0xC3]);
        assert_eq!(d.len(), 3);
        assert_eq!(d.opcode_def.name, "mov");
        assert_eq!(d.operand_size, 64);
        assert_eq!(d.modrm_rm, 3);
        assert_eq!(d.modrm_reg, 0);
        assert!(d.errors.is_empty());
    }

    #[test]
    fn two_byte_nop_is_xchg_ax_ax() {
        let d = decode64(&[0x66, 0x90]);
        assert_eq!(d.len(), 2);
        assert_eq!(d.opcode_def.name, "xchg");
    }

    #[test]
    fn rip_relative_load() {
        // mov rax, [rip+0]
        let d = decode64(&[0x48, 0x8B, 0x05, 0, 0, 0, 0]);
        assert_eq!(d.len(), 7);
        assert!(d.mflags.contains(MemFlags::RIP_RELATIVE));
        assert_eq!(d.address_field, 3);
        assert_eq!(d.address_field_size, 4);
    }

    #[test]
    fn short_jump_has_immediate_target() {
        let d = decode64(&[0xEB, 0x02]);
        assert_eq!(d.len(), 2);
        assert_eq!(d.opcode_def.name, "jmp");
        assert_eq!(d.immediate_field, 1);
        assert_eq!(d.immediate_field_size, 1);
        assert_eq!(optype::base(d.operands[0]), optype::T_JMP_SHORT);
    }

    #[test]
    fn illegal_0f_ff_consumes_both_bytes() {
        let d = decode64(&[0x0F, 0xFF, 0x90]);
        assert!(d.errors.contains(Errors::RESERVED_OPCODE));
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn group_dispatch_by_reg() {
        // sub rsp, 40
        let d = decode64(&[0x48, 0x83, 0xEC, 0x28]);
        assert_eq!(d.opcode_def.name, "sub");
        assert_eq!(d.len(), 4);
        assert_eq!(d.immediate_field_size, 1);
    }

    #[test]
    fn sib_with_scaled_index() {
        // jmp [rdx+rcx*8]
        let d = decode64(&[0xFF, 0x24, 0xCA]);
        assert_eq!(d.opcode_def.name, "jmp");
        assert!(d.mflags.contains(MemFlags::HAS_SIB));
        assert_eq!(d.base_reg, 3); // rdx + 1
        assert_eq!(d.index_reg, 2); // rcx + 1
        assert_eq!(d.scale, 3);
    }

    #[test]
    fn vex_ndi_form() {
        // vaddps xmm1, xmm2, xmm3 (C5 E8 58 CB)
        let d = decode64(&[0xC5, 0xE8, 0x58, 0xCB]);
        assert_eq!(d.opcode_def.name, "add");
        assert_eq!(d.vexkind, VexKind::Vex2);
        assert_eq!(d.vreg, 2);
        assert!(d.errors.is_empty());
        assert_eq!(d.len(), 4);
    }

    #[test]
    fn evex_broadcast_load() {
        // vaddps zmm0{k1}, zmm1, dword [rax]{1to16}
        let d = decode64(&[0x62, 0xF1, 0x74, 0x59, 0x58, 0x00]);
        assert_eq!(d.vexkind, VexKind::Evex);
        assert_eq!(d.opcode_def.name, "add");
        assert_eq!(d.kreg, 1);
        assert_eq!(d.broadcast, 16);
        assert_eq!(d.offset_multiplier, 4);
        assert_eq!(d.vector_len, 64);
        assert!(d.errors.is_empty());
    }

    #[test]
    fn truncated_instruction_reports_error() {
        let d = decode64(&[0x48, 0x8B]);
        assert!(d.errors.contains(Errors::TRUNCATED));
    }

    #[test]
    fn progress_on_single_prefix_byte() {
        let d = decode64(&[0x66]);
        assert!(d.errors.contains(Errors::TRUNCATED));
        assert!(d.end >= 1);
    }
}
