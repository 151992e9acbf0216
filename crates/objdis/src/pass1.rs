//! Pass 1: code/data classification, function and label discovery, missing
//! symbol and relocation synthesis, jump-table follow-through.
//!
//! The pass walks every code section instruction by instruction. It may be
//! repeated (bounded by the driver) when analysis discovers something that
//! would have changed earlier decisions: a backward label, data in a code
//! section, a jump table.

use crate::function::{FunctionRecord, FUNCTION_END_UNKNOWN};
use crate::reloc::{Relocation, REL_RELOCATED, REL_SELF};
use crate::section::SectionKind;
use crate::symtab::Scope;
use crate::tracer::Trace;
use crate::Disassembler;
use objdis_x86::optype;
use objdis_x86::{Decoded, Decoder, Errors, MemFlags};
use tracing::{debug, trace};

impl Disassembler {
    pub(crate) fn pass1(&mut self) {
        let code_sections: Vec<i32> = self
            .sections
            .indices()
            .filter(|&i| self.sections.get(i).unwrap().kind.is_codeish())
            .collect();
        for section in code_sections {
            self.pass1_section(section);
        }
    }

    fn pass1_section(&mut self, section: i32) {
        let (bytes, init_size, word_size, kind) = {
            let s = self.sections.get(section).unwrap();
            (s.bytes.clone(), s.init_size, s.word_size, s.kind)
        };
        let decoder = Decoder::new(&bytes, word_size)
            .with_limit(init_size)
            .with_dialect(self.dialect.index());

        self.tracer.reset();
        let mut current_fn: Option<usize> = None;
        let mut pos: u32 = 0;
        // Dubious-code bookkeeping: reclassify as data when a failure span
        // outgrows the longest successful run since the last label.
        let mut longest_ok_run: u32 = 0;
        let mut ok_since: u32 = 0;
        let mut fail_since: Option<u32> = None;

        while pos < init_size {
            let hit = self.symbols.find_by_address(section, pos);
            if let Some(si) = hit.exact {
                self.tracer.reset();
                longest_ok_run = longest_ok_run.max(pos.saturating_sub(ok_since));
                ok_since = pos;
                fail_since = None;

                // A symbol already classified as data is skipped as a block.
                let s = self.symbols.get(si).unwrap();
                if s.is_data() && !s.is_code() {
                    let size = s.size.max(1);
                    let stop = match hit.after {
                        0 => init_size,
                        a => self.symbols.get(a).unwrap().offset,
                    };
                    pos = (pos + size).min(stop.max(pos + 1)).min(init_size);
                    continue;
                }
            }

            if current_fn.is_none() {
                current_fn = Some(self.function_begin(section, pos, hit.exact));
            }

            let mut d = decoder.decode(pos);
            self.find_relocations(section, &mut d);

            if d.is_undecodable() {
                trace!(section, offset = pos, "undecodable bytes");
                if kind == SectionKind::Unknown {
                    let start = *fail_since.get_or_insert(pos);
                    pos += 1;
                    if pos - start > longest_ok_run.max(4) {
                        self.mark_data(section, start, pos - start);
                        fail_since = None;
                    }
                    continue;
                }
                // In a known code section the illegal bytes stay at the
                // decoded boundary; pass 2 emits them as raw data. They
                // still belong to the surrounding function.
                pos = d.end.max(pos + 1);
                if let Some(rec) = current_fn.and_then(|f| self.functions.get_mut(f)) {
                    if rec.end < pos {
                        rec.end = pos;
                    }
                }
                continue;
            }
            fail_since = None;

            self.update_instruction_set(&d);
            self.update_symbols(section, &mut d, current_fn);
            self.update_tracer(section, &d);

            if let Some(f) = current_fn {
                let closes = d.opcode_def.options & 0x10 != 0;
                if let Some(rec) = self.functions.get_mut(f) {
                    if rec.end < d.end && (rec.flags & FUNCTION_END_UNKNOWN != 0 || rec.end <= d.begin)
                    {
                        rec.end = d.end;
                    }
                    if closes && rec.end <= d.end {
                        rec.end = d.end;
                        rec.flags &= !FUNCTION_END_UNKNOWN;
                        current_fn = None;
                    }
                }
            }

            pos = d.end.max(pos + 1);
        }

        if let Some(f) = current_fn {
            if let Some(rec) = self.functions.get_mut(f) {
                if rec.end < init_size {
                    rec.end = init_size;
                }
                rec.flags &= !FUNCTION_END_UNKNOWN;
            }
        }
    }

    /// Open a function record at `pos`, synthesizing an entry label when the
    /// position has none.
    fn function_begin(&mut self, section: i32, pos: u32, symbol: Option<u32>) -> usize {
        if let Some(f) = self.functions.find(section, pos) {
            return f;
        }
        let si = match symbol {
            Some(si) => si,
            None => self.symbols.new_symbol(section, pos, Scope::FILE_LOCAL),
        };
        let (scope, old) = {
            let s = self.symbols.get(si).unwrap();
            (s.scope, s.old_index)
        };
        if let Some(sym) = self.symbols.get_mut(si) {
            sym.sym_type |= optype::SYM_CODE;
        }
        debug!(section, offset = pos, "function begins");
        self.functions.insert(FunctionRecord {
            section,
            start: pos,
            end: pos,
            scope: if scope.is_empty() { Scope::FILE_LOCAL } else { scope },
            flags: FUNCTION_END_UNKNOWN,
            old_symbol: old,
        })
    }

    /// Attach relocations to the displacement and immediate fields.
    pub(crate) fn find_relocations(&mut self, section: i32, d: &mut Decoded) {
        if d.address_field_size > 0 {
            if let Some(i) = self.relocations.find_in_range(
                section,
                d.address_field,
                d.address_field + d.address_field_size,
            ) {
                let r = self.relocations.get(i).unwrap();
                if r.size != d.address_field_size && d.offset_multiplier <= 1 {
                    d.errors |= Errors::RELOC_SIZE_MISMATCH;
                }
                d.address_relocation = i;
            }
        }
        if d.immediate_field_size > 0 {
            if let Some(i) = self.relocations.find_in_range(
                section,
                d.immediate_field,
                d.immediate_field + d.immediate_field_size,
            ) {
                let r = self.relocations.get(i).unwrap();
                if r.size != d.immediate_field_size {
                    d.errors |= Errors::RELOC_SIZE_MISMATCH;
                }
                d.immediate_relocation = i;
            }
        }
    }

    fn update_instruction_set(&mut self, d: &Decoded) {
        let set = d.opcode_def.instset & 0x3FFF;
        if set == 0 {
            return;
        }
        if set & 0x1000 != 0 {
            self.instruction_set_amd_max = self.instruction_set_amd_max.max(set & 0xFFF);
        } else {
            let base = set & 0x7FF;
            self.instruction_set_max = self.instruction_set_max.max(base);
            self.instruction_set_or |= base;
        }
        if d.prefixes[objdis_x86::decoded::CAT_SEG] == 0x64 {
            self.masm_options |= 1;
        }
        if d.prefixes[objdis_x86::decoded::CAT_SEG] == 0x65 {
            self.masm_options |= 2;
        }
    }

    /// Synthesize symbols and relocations for inline addresses and register
    /// branch targets, and track function extents across branches.
    fn update_symbols(&mut self, section: i32, d: &mut Decoded, current_fn: Option<usize>) {
        let decoder_end = d.end;

        for i in 0..d.operands.len() {
            let t = d.operands[i];
            if t == 0 {
                continue;
            }

            if optype::is_branch_target(t) && t & optype::IMM_FIELD != 0 {
                // Self-relative branch. Make sure a target symbol and a
                // relocation exist, then extend the function extent.
                let target_new = if d.immediate_relocation != 0 {
                    let r = *self.relocations.get(d.immediate_relocation).unwrap();
                    self.symbols.old_to_new(r.target_old)
                } else {
                    let sec = self.sections.get(section).unwrap();
                    let disp = read_signed_bytes(
                        &sec.bytes,
                        d.immediate_field,
                        d.immediate_field_size.min(4),
                    );
                    let target = decoder_end as i64 + disp;
                    if target < 0 || target as u32 >= sec.init_size {
                        continue;
                    }
                    let target = target as u32;
                    let (irel, tnew) = self.make_missing_relocation(
                        section,
                        d.immediate_field,
                        d.immediate_field_size,
                        REL_SELF,
                        section,
                        target,
                        decoder_end,
                    );
                    d.immediate_relocation = irel;
                    if target <= d.begin {
                        self.repeat_requested = true;
                    }
                    tnew
                };
                if target_new != 0 {
                    let (tsec, toff) = {
                        let s = self.symbols.get(target_new).unwrap();
                        (s.section, s.offset)
                    };
                    if let Some(sym) = self.symbols.get_mut(target_new) {
                        sym.sym_type |= optype::SYM_CODE;
                    }
                    if tsec == section {
                        if let Some(f) = current_fn {
                            self.check_jump_target(f, toff);
                        }
                    }
                }
                continue;
            }

            // Direct (moffs) operand holding an absolute address in an
            // executable: translate through the image base.
            if optype::source_bits(t) == optype::SRC_DIRECT_MEM
                && d.address_relocation == 0
                && self.exe_type == crate::ExeType::Executable
            {
                let sec = self.sections.get(section).unwrap();
                let abs =
                    read_unsigned_bytes(&sec.bytes, d.address_field, d.address_field_size.min(8));
                let address = abs as i64 - self.image_base;
                if address >= 0 {
                    if let Some((tsec, toff)) = self.sections.find_by_address(address as u32) {
                        let (irel, tnew) = self.make_missing_relocation(
                            section,
                            d.address_field,
                            d.address_field_size,
                            crate::reloc::REL_DIRECT | REL_RELOCATED,
                            tsec,
                            toff,
                            decoder_end,
                        );
                        d.address_relocation = irel;
                        if let Some(sym) = self.symbols.get_mut(tnew) {
                            sym.sym_type |= optype::SYM_DATA;
                        }
                    }
                }
            }

            // RIP-relative memory reference without a relocation: synthesize
            // one when the image layout lets us resolve the target.
            if optype::source_bits(t) == optype::SRC_RM
                && d.mflags.contains(MemFlags::RIP_RELATIVE)
                && d.address_relocation == 0
                && d.address_field_size == 4
                && self.exe_type != crate::ExeType::Object
            {
                let sec = self.sections.get(section).unwrap();
                let disp = read_signed_bytes(&sec.bytes, d.address_field, 4);
                let address = sec.address as i64 + decoder_end as i64 + disp;
                if address >= 0 {
                    if let Some((tsec, toff)) = self.sections.find_by_address(address as u32) {
                        let (irel, tnew) = self.make_missing_relocation(
                            section,
                            d.address_field,
                            4,
                            REL_SELF | REL_RELOCATED,
                            tsec,
                            toff,
                            decoder_end,
                        );
                        d.address_relocation = irel;
                        if let Some(sym) = self.symbols.get_mut(tnew) {
                            sym.sym_type |= optype::SYM_DATA;
                        }
                    }
                }
            }

            // Memory reference through an existing relocation: classify the
            // target as data of the operand's element size.
            if optype::source_bits(t) == optype::SRC_RM && d.address_relocation != 0 {
                let r = *self.relocations.get(d.address_relocation).unwrap();
                let tnew = self.symbols.old_to_new(r.target_old);
                if tnew != 0 {
                    if let Some(sym) = self.symbols.get_mut(tnew) {
                        if sym.sym_type & (optype::SYM_CODE | optype::SYM_DATA) == 0 {
                            sym.sym_type |= optype::SYM_DATA | optype::base(t);
                        }
                    }
                }
            }
        }

        // Indirect jump or call through a traced table base.
        let base = optype::base(d.operands[0]);
        if (base == optype::T_NEAR_PTR_JMP || base == optype::T_NEAR_PTR_CALL)
            && d.mflags.contains(MemFlags::HAS_MEM)
            && d.base_reg > 0
        {
            if let Trace::SymbolBase(table_old, extra) = self.tracer.get(d.base_reg - 1) {
                let scale = 1u32 << d.scale;
                self.follow_jump_table(section, current_fn, table_old, extra, scale.max(1));
            }
        }
    }

    /// Probe a discovered jump table and register every case label.
    fn follow_jump_table(
        &mut self,
        code_section: i32,
        current_fn: Option<usize>,
        table_old: u32,
        table_extra: u32,
        scale: u32,
    ) {
        let table_new = self.symbols.old_to_new(table_old);
        let (tsec, toff, tsize) = match self.symbols.get(table_new) {
            Some(s) => {
                if s.sym_type == optype::SYM_DATA | optype::T_NEAR_PTR_JMP {
                    // Already followed on an earlier repetition.
                    return;
                }
                (s.section, s.offset + table_extra, s.size)
            }
            None => return,
        };
        let Some(tsec_ref) = self.sections.get(tsec) else {
            return;
        };
        if !tsec_ref.kind.is_data() && tsec_ref.kind != SectionKind::Unknown {
            return;
        }
        let elsize = if scale > 1 { scale } else { tsec_ref.word_size / 8 };
        let section_end = tsec_ref.init_size;

        debug!(
            table_section = tsec,
            table_offset = toff,
            elsize,
            "following jump table"
        );

        let mut count = 0u32;
        loop {
            let off = toff + count * elsize;
            if off + elsize > section_end {
                break;
            }
            if tsize != 0 && count * elsize >= tsize {
                break;
            }
            if count > 0 && self.symbols.find_by_address(tsec, off).exact.is_some() {
                // Ran into the next labeled object.
                break;
            }
            let Some(irel) = self.relocations.find(tsec, off) else {
                break;
            };
            let target_old = self.relocations.get(irel).unwrap().target_old;
            let target_new = self.symbols.old_to_new(target_old);
            let (target_sec, target_off) = match self.symbols.get(target_new) {
                Some(s) => (s.section, s.offset),
                None => break,
            };
            if target_sec != code_section {
                break;
            }
            if let Some(sym) = self.symbols.get_mut(target_new) {
                sym.sym_type |= optype::SYM_CODE;
            }
            if let Some(f) = current_fn {
                self.check_jump_target(f, target_off);
            }
            count += 1;
        }

        if count > 0 {
            self.repeat_requested = true;
            if let Some(sym) = self.symbols.get_mut(table_new) {
                sym.sym_type = optype::SYM_DATA | optype::T_NEAR_PTR_JMP;
                if sym.size == 0 {
                    sym.size = count * elsize;
                }
            }
        }
    }

    /// Extend the current function to cover a branch target that lies after
    /// its present end (bounded by the next function). The extent is
    /// exclusive, so the target instruction itself must be covered.
    fn check_jump_target(&mut self, function: usize, target: u32) {
        let (start, end) = match self.functions.get(function) {
            Some(f) => (f.start, f.end),
            None => return,
        };
        if target > start && target >= end {
            self.functions.extend_to(function, target + 1);
        }
    }

    /// Create a relocation (and target symbol if needed) for an inline
    /// address the object file did not describe. Idempotent across pass-1
    /// repetitions. Returns `(relocation index, target new index)`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn make_missing_relocation(
        &mut self,
        section: i32,
        offset: u32,
        size: u32,
        rel_type: u32,
        target_section: i32,
        target_offset: u32,
        instruction_end: u32,
    ) -> (u32, u32) {
        let target_new = self.symbols.new_symbol(target_section, target_offset, Scope::FILE_LOCAL);
        let target_old = self.symbols.get(target_new).unwrap().old_index;

        if let Some(existing) = self.relocations.find(section, offset) {
            return (existing, target_new);
        }
        // Self-relative addends count from the end of the instruction.
        let addend = if rel_type & REL_SELF != 0 {
            -((instruction_end - offset) as i32)
        } else {
            0
        };
        trace!(section, offset, target_section, target_offset, "synthesized relocation");
        let irel = self.relocations.add(Relocation {
            section,
            offset,
            rel_type,
            size,
            addend,
            target_old,
            ref_old: 0,
            invalid: false,
        });
        (irel, target_new)
    }

    /// Reclassify a run of undecodable bytes as data.
    fn mark_data(&mut self, section: i32, start: u32, len: u32) {
        debug!(section, offset = start, len, "reclassifying dubious bytes as data");
        let si = self.symbols.new_symbol(section, start, Scope::FILE_LOCAL);
        if let Some(sym) = self.symbols.get_mut(si) {
            sym.sym_type |= optype::SYM_DATA | optype::SYM_DUBIOUS;
            if sym.size == 0 {
                sym.size = len;
            }
        }
        self.repeat_requested = true;
    }

    /// Propagate the tracer across one instruction.
    fn update_tracer(&mut self, section: i32, d: &Decoded) {
        let def = d.opcode_def;

        // Calls and indirect transfers clobber the volatile registers.
        if def.options & 8 != 0 {
            self.tracer.invalidate_clobbered();
        }

        // Which register does this instruction write?
        let dest = d.operands[0];
        let dest_reg = match optype::source_bits(dest) {
            optype::SRC_REG => Some(d.modrm_reg),
            optype::SRC_OPCODE_REG => Some(d.modrm_rm),
            optype::SRC_RM if !d.mflags.contains(MemFlags::HAS_MEM) => Some(d.modrm_rm),
            _ => None,
        };
        let Some(reg) = dest_reg else { return };
        if def.options & 4 != 0 {
            // Does not change its destination (cmp, test).
            return;
        }

        let is_lea = def.name == "lea";
        let is_mov = def.name == "mov";

        if is_lea && d.address_relocation != 0 {
            let r = self.relocations.get(d.address_relocation).unwrap();
            self.tracer.set(reg, Trace::SymbolBase(r.target_old, 0));
            return;
        }
        if is_mov && d.immediate_relocation != 0 {
            let r = self.relocations.get(d.immediate_relocation).unwrap();
            self.tracer.set(reg, Trace::SymbolBase(r.target_old, 0));
            return;
        }
        if is_mov && d.mflags.contains(MemFlags::HAS_MEM) && d.address_relocation != 0 {
            let r = self.relocations.get(d.address_relocation).unwrap();
            self.tracer.set(reg, Trace::ImageBase(r.target_old));
            return;
        }
        if is_mov && d.immediate_field_size > 0 && d.immediate_relocation == 0 {
            let sec = self.sections.get(section).unwrap();
            let v = read_unsigned_bytes(&sec.bytes, d.immediate_field, d.immediate_field_size.min(4));
            self.tracer.set(reg, Trace::Const(v as u32));
            return;
        }
        self.tracer.wide_write(reg);
    }
}

fn read_signed_bytes(bytes: &[u8], pos: u32, size: u32) -> i64 {
    let mut v = 0u64;
    for i in 0..size.min(8) {
        v |= (*bytes.get((pos + i) as usize).unwrap_or(&0) as u64) << (8 * i);
    }
    let bits = size.min(8) * 8;
    if bits > 0 && bits < 64 && v & (1 << (bits - 1)) != 0 {
        v |= !0u64 << bits;
    }
    v as i64
}

fn read_unsigned_bytes(bytes: &[u8], pos: u32, size: u32) -> u64 {
    let mut v = 0u64;
    for i in 0..size.min(8) {
        v |= (*bytes.get((pos + i) as usize).unwrap_or(&0) as u64) << (8 * i);
    }
    v
}
