//! Pass 2: emission.
//!
//! Walks every section again and writes the listing: segment directives,
//! publics/externals, function and label lines, instructions with their
//! operands in the selected dialect, data items, and diagnostic comments.
//! Errors found in pass 1 become trailing comments; emission itself cannot
//! fail.

use crate::dialect::Dialect;
use crate::reloc::{REL_GOT, REL_GOT_SELF, REL_IFUNC_PLT, REL_PLT, REL_PLT_SELF};
use crate::section::SectionKind;
use crate::symtab::Scope;
use crate::text::{COL_COMMENT, COL_OPCODE, COL_OPERAND};
use crate::Disassembler;
use objdis_x86::decoded::{CAT_OTYPE, CAT_SEG};
use objdis_x86::optype;
use objdis_x86::registers;
use objdis_x86::{Decoded, Decoder, Errors, MemFlags, VexKind, Warnings1, Warnings2};

impl Disassembler {
    pub(crate) fn pass2(&mut self) {
        self.write_file_begin();
        self.write_publics_and_externals();
        for i in self.sections.indices() {
            let kind = self.sections.get(i).unwrap().kind;
            match kind {
                k if k.is_codeish() => self.write_code_section(i),
                k if k.is_data() => self.write_data_section(i),
                _ => {}
            }
        }
        self.write_file_end();
    }

    fn comment(&mut self, text: &str) {
        let sep = self.dialect.comment_separator();
        self.out.put(sep);
        self.out.put(text);
        self.out.new_line();
    }

    fn write_file_begin(&mut self) {
        let word_size = self
            .sections
            .indices()
            .map(|i| self.sections.get(i).unwrap().word_size)
            .max()
            .unwrap_or(32);

        self.comment("Disassembly of input file");
        self.comment(&format!("Mode: {word_size} bits"));
        let dialect_name = match self.dialect {
            Dialect::Masm => "MASM/ML64",
            Dialect::Nasm => "NASM/YASM",
            Dialect::Gas => "GAS (AT&T)",
        };
        self.comment(&format!("Syntax: {dialect_name}"));
        self.comment(&format!(
            "Instruction set: {}",
            instruction_set_name(self.instruction_set_max, self.instruction_set_amd_max)
        ));
        if self.relocations_in_source > 0 {
            self.comment(&format!(
                "Relocations in source: {}",
                self.relocations_in_source
            ));
        }
        self.out.new_line();

        match self.dialect {
            Dialect::Masm => {
                let dotted_names = self
                    .sections
                    .indices()
                    .any(|i| self.sections.get(i).unwrap().name.starts_with('.'));
                if dotted_names {
                    self.out.put("OPTION DOTNAME");
                    self.out.new_line();
                }
                if word_size == 32 {
                    self.out.put(".686");
                    self.out.new_line();
                    if self.instruction_set_max >= 0x11 {
                        self.out.put(".xmm");
                        self.out.new_line();
                    }
                    self.out.put(".model flat");
                    self.out.new_line();
                }
                if self.masm_options & 3 != 0 {
                    // fs/gs references need the assume to stay quiet.
                    if self.masm_options & 1 != 0 {
                        self.out.put("ASSUME fs:NOTHING");
                        self.out.new_line();
                    }
                    if self.masm_options & 2 != 0 {
                        self.out.put("ASSUME gs:NOTHING");
                        self.out.new_line();
                    }
                }
            }
            Dialect::Nasm => {
                if word_size == 64 {
                    self.out.put("default rel");
                    self.out.new_line();
                }
            }
            Dialect::Gas => {}
        }
        self.out.new_line();
    }

    fn write_file_end(&mut self) {
        if self.dialect == Dialect::Masm {
            self.out.put("END");
            self.out.new_line();
        }
    }

    fn write_publics_and_externals(&mut self) {
        let mut publics: Vec<(String, bool)> = Vec::new();
        let mut externals: Vec<(String, u32, Option<String>)> = Vec::new();
        for i in self.symbols.indices() {
            let s = self.symbols.get(i).unwrap();
            let Some(name) = s.name.clone() else { continue };
            if s.scope.intersects(Scope::PUBLIC | Scope::WEAK) && s.section > 0 {
                publics.push((name, s.scope.contains(Scope::WEAK)));
            } else if s.section == 0 && s.scope.contains(Scope::EXTERNAL) {
                externals.push((name, s.sym_type, s.dll_name.clone()));
            }
        }

        for (name, weak) in publics {
            match self.dialect {
                Dialect::Masm => self.out.put(&format!("PUBLIC {name}")),
                Dialect::Nasm => self.out.put(&format!("global {name}")),
                Dialect::Gas => self.out.put(&format!(".globl {name}")),
            }
            if weak {
                self.out.tabulate(COL_COMMENT);
                let sep = self.dialect.comment_separator();
                self.out.put(sep);
                self.out.put("weak");
            }
            self.out.new_line();
        }
        for (name, sym_type, dll) in externals {
            match self.dialect {
                Dialect::Masm => {
                    let kind = if sym_type & optype::SYM_CODE != 0 || sym_type == 0 {
                        "NEAR".to_owned()
                    } else {
                        masm_extern_type(sym_type)
                    };
                    self.out.put(&format!("EXTRN {name}:{kind}"));
                }
                Dialect::Nasm => self.out.put(&format!("extern {name}")),
                Dialect::Gas => {
                    // GAS treats undefined symbols as external automatically.
                    let sep = self.dialect.comment_separator();
                    self.out.put(sep);
                    self.out.put(&format!("extern {name}"));
                }
            }
            if let Some(dll) = dll {
                self.out.tabulate(COL_COMMENT);
                let sep = self.dialect.comment_separator();
                self.out.put(sep);
                self.out.put(&format!("imported from {dll}"));
            }
            self.out.new_line();
        }
        self.out.new_line();
    }

    fn write_segment_begin(&mut self, section: i32) {
        let (name, align, kind, word_size) = {
            let s = self.sections.get(section).unwrap();
            (s.name.clone(), 1u32 << s.align, s.kind, s.word_size)
        };
        let class = match kind {
            SectionKind::Code | SectionKind::Unknown => "CODE",
            SectionKind::Bss => "BSS",
            SectionKind::Const => "CONST",
            _ => "DATA",
        };
        match self.dialect {
            Dialect::Masm => {
                self.out.put(&format!("{name} SEGMENT ALIGN({align}) '{class}'"));
                self.out.tabulate(COL_COMMENT);
                self.out.put(&format!("; section {section}, {word_size} bit"));
            }
            Dialect::Nasm => {
                self.out.put(&format!("SECTION {name} align={align}"));
                self.out.tabulate(COL_COMMENT);
                self.out.put(&format!("; section {section}, {class}, {word_size} bit"));
            }
            Dialect::Gas => {
                self.out.put(&format!(".section {name}"));
                self.out.new_line();
                self.out.put(&format!(".align {align}"));
                self.out.tabulate(COL_COMMENT);
                self.out.put(&format!("# section {section}, {class}, {word_size} bit"));
            }
        }
        self.out.new_line();
        self.out.new_line();
    }

    fn write_segment_end(&mut self, section: i32) {
        self.out.new_line();
        if self.dialect == Dialect::Masm {
            let name = self.sections.get(section).unwrap().name.clone();
            self.out.put(&format!("{name} ENDS"));
            self.out.new_line();
        }
        self.out.new_line();
    }

    /// Write every label defined exactly at `(section, pos)`, in the form
    /// the dialect and the position's function role call for.
    fn write_labels_at(&mut self, section: i32, pos: u32) {
        let mut names: Vec<(String, Scope)> = Vec::new();
        let mut i = self.symbols.find_by_address(section, pos).exact;
        // Collect duplicates sharing the address.
        while let Some(idx) = i {
            let s = self.symbols.get(idx).unwrap();
            if s.section != section || s.offset != pos {
                break;
            }
            if let Some(n) = &s.name {
                names.push((n.clone(), s.scope));
            }
            self.symbols.get_mut(idx).unwrap().scope |= Scope::EMITTED;
            i = Some(idx + 1).filter(|&n| n as usize <= self.symbols.count());
        }

        let function_start = self
            .functions
            .find(section, pos)
            .map(|f| self.functions.get(f).unwrap().start == pos)
            .unwrap_or(false);

        for (name, scope) in names {
            match self.dialect {
                Dialect::Masm if function_start => {
                    self.out.put(&format!("{name} PROC"));
                    self.out.new_line();
                }
                Dialect::Gas => {
                    if function_start && scope.intersects(Scope::PUBLIC | Scope::WEAK) {
                        self.out.put(&format!(".type {name}, @function"));
                        self.out.new_line();
                    }
                    self.out.put(&format!("{name}:"));
                    self.out.new_line();
                }
                _ => {
                    self.out.put(&format!("{name}:"));
                    self.out.new_line();
                }
            }
        }
    }

    fn write_function_end_at(&mut self, section: i32, pos: u32) {
        if self.dialect != Dialect::Masm {
            return;
        }
        // A MASM PROC closes with name ENDP at its end offset.
        for fi in 0..self.functions.count() {
            let f = self.functions.get(fi).unwrap();
            if f.section == section && f.end == pos {
                let new = self.symbols.old_to_new(f.old_symbol);
                let name = self.symbols.name(new).to_owned();
                if !name.is_empty() {
                    self.out.put(&format!("{name} ENDP"));
                    self.out.new_line();
                }
            }
        }
    }

    fn write_code_section(&mut self, section: i32) {
        self.write_segment_begin(section);

        let (bytes, init_size, word_size) = {
            let s = self.sections.get(section).unwrap();
            (s.bytes.clone(), s.init_size, s.word_size)
        };
        let decoder = Decoder::new(&bytes, word_size)
            .with_limit(init_size)
            .with_dialect(self.dialect.index());

        let mut pos: u32 = 0;
        while pos < init_size {
            self.write_labels_at(section, pos);

            // Data symbol inside a code section: emit its bytes as data.
            if let Some(si) = self.symbols.find_by_address(section, pos).exact {
                let s = self.symbols.get(si).unwrap();
                if s.is_data() && !s.is_code() {
                    let size = s.size.max(1).min(init_size - pos);
                    let dubious = s.sym_type & optype::SYM_DUBIOUS != 0;
                    self.write_byte_run(&bytes, pos, size, dubious.then_some("dubious bytes"));
                    pos += size;
                    self.write_function_end_at(section, pos);
                    continue;
                }
            }

            let mut d = decoder.decode(pos);
            self.find_relocations(section, &mut d);

            if d.is_undecodable() {
                let len = (d.end.max(pos + 1) - pos).min(init_size - pos);
                self.write_byte_run(&bytes, pos, len, Some("illegal opcode"));
                pos += len;
                self.write_function_end_at(section, pos);
                continue;
            }

            // Filler coalescing: a run of NOPs reaching an alignment
            // boundary collapses to one directive.
            if d.opcode_def.options & 0x40 != 0 {
                if let Some(run_end) = self.filler_run_end(&decoder, section, pos, init_size) {
                    if run_end > d.end && run_end % 16 == 0 {
                        self.write_align(16, run_end - pos);
                        pos = run_end;
                        self.write_function_end_at(section, pos);
                        continue;
                    }
                }
            }

            self.write_instruction(section, &decoder, &d);
            pos = d.end.max(pos + 1);
            self.write_function_end_at(section, pos);
        }

        self.write_segment_end(section);
    }

    /// End of a run of filler instructions starting at `pos`, stopping at
    /// labels. None when the run is a single instruction.
    fn filler_run_end(
        &self,
        decoder: &Decoder,
        section: i32,
        pos: u32,
        limit: u32,
    ) -> Option<u32> {
        let mut p = pos;
        let mut count = 0;
        while p < limit {
            if count > 0 && self.symbols.find_by_address(section, p).exact.is_some() {
                break;
            }
            let d = decoder.decode(p);
            if d.is_undecodable() || d.opcode_def.options & 0x40 == 0 {
                break;
            }
            p = d.end.max(p + 1);
            count += 1;
        }
        (count > 1).then_some(p)
    }

    fn write_align(&mut self, alignment: u32, len: u32) {
        self.out.tabulate(COL_OPCODE);
        match self.dialect {
            Dialect::Masm => self.out.put(&format!("ALIGN {alignment}")),
            Dialect::Nasm => self.out.put(&format!("align {alignment}")),
            Dialect::Gas => self.out.put(&format!(".balign {alignment}")),
        }
        self.out.tabulate(COL_COMMENT);
        let sep = self.dialect.comment_separator();
        self.out.put(sep);
        self.out.put(&format!("filler, {len} bytes"));
        self.out.new_line();
    }

    /// Emit raw bytes as data with an optional reason comment.
    fn write_byte_run(&mut self, bytes: &[u8], pos: u32, len: u32, reason: Option<&str>) {
        let mut off = pos;
        let end = pos + len;
        let mut first = true;
        while off < end {
            let n = (end - off).min(8);
            self.out.tabulate(COL_OPCODE);
            self.out.put(self.dialect.data_directive(1));
            self.out.tabulate(COL_OPERAND);
            let items: Vec<String> = (0..n)
                .map(|k| self.dialect.hex(bytes[(off + k) as usize] as u64))
                .collect();
            self.out.put(&items.join(", "));
            if first {
                if let Some(r) = reason {
                    self.out.tabulate(COL_COMMENT);
                    let sep = self.dialect.comment_separator();
                    self.out.put(sep);
                    self.out.put(r);
                }
                first = false;
            }
            self.out.new_line();
            off += n;
        }
    }

    fn write_instruction(&mut self, section: i32, decoder: &Decoder, d: &Decoded) {
        let name = self.mnemonic(d);
        self.out.tabulate(COL_OPCODE);
        self.out.put(&name);

        let operands = self.operand_strings(section, decoder, d);
        if !operands.is_empty() {
            self.out.tabulate(COL_OPERAND);
            self.out.put(&operands.join(", "));
        }
        if let Some(r) = d.rounding {
            self.out.put(", ");
            self.out.put(r);
        }

        self.write_code_comment(section, d);
        self.out.new_line();
    }

    /// Hex listing of the instruction bytes plus diagnostics.
    fn write_code_comment(&mut self, section: i32, d: &Decoded) {
        self.out.tabulate(COL_COMMENT);
        let sep = self.dialect.comment_separator();
        self.out.put(sep);
        let bytes = &self.sections.get(section).unwrap().bytes;
        let hex: Vec<String> = (d.begin..d.end.min(bytes.len() as u32))
            .map(|i| format!("{:02X}", bytes[i as usize]))
            .collect();
        let line = format!("{:04X} _ {}", d.begin, hex.join(" "));
        self.out.put(&line);

        // Indirect transfers through an import-table pointer name the DLL.
        for irel in [d.address_relocation, d.immediate_relocation] {
            if irel == 0 {
                continue;
            }
            let dll = self
                .relocations
                .get(irel)
                .map(|r| self.symbols.old_to_new(r.target_old))
                .and_then(|n| self.symbols.get(n))
                .and_then(|s| s.dll_name.clone());
            if let Some(dll) = dll {
                self.out.put(&format!(". imported from {dll}"));
            }
        }

        // A symbol pointing into the middle of this instruction is bogus
        // (bad relocation or mis-typed symbol); it cannot get a label line.
        let after = self.symbols.find_by_address(section, d.begin).after;
        if let Some(s) = self.symbols.get(after) {
            if s.section == section && s.offset < d.end {
                self.out.put(". Warning: label points inside this instruction");
            }
        }

        for text in diagnostic_texts(d) {
            self.out.put(". ");
            self.out.put(text);
        }
    }

    /// Assemble the mnemonic with its dialect- and prefix-driven suffixes.
    fn mnemonic(&self, d: &Decoded) -> String {
        let def = d.opcode_def;
        let mut name = String::from(def.name);
        if def.options & 2 != 0 && d.has_vex() && !name.starts_with('v') {
            name.insert(0, 'v');
        }
        if def.options & 1 != 0 {
            name.push_str(self.name_suffix(d));
        }
        if def.options & 0x1000 != 0 {
            name.push_str(if d.operand_size == 64 { "64" } else { "32" });
        }
        // The prefix scanner consumed LOCK/REP; put them back in front.
        let mut prefix = String::new();
        if d.prefixes[objdis_x86::decoded::CAT_LOCK] == 0xF0 {
            prefix.push_str("lock ");
        }
        match d.prefixes[objdis_x86::decoded::CAT_REP] {
            0xF3 if def.prefixes & 0x20 != 0 => prefix.push_str("rep "),
            0xF3 if def.prefixes & 0x40 != 0 => prefix.push_str("repe "),
            0xF2 if def.prefixes & 0x40 != 0 => prefix.push_str("repne "),
            _ => {}
        }
        format!("{prefix}{name}")
    }

    fn name_suffix(&self, d: &Decoded) -> &'static str {
        let a = d.opcode_def.prefixes;
        let w = d.w_bit();
        let p66 = d.prefixes[CAT_OTYPE] == 0x66;
        let int_width = |bits: u32| -> &'static str {
            match bits {
                16 => "w",
                64 => "q",
                _ => {
                    if self.dialect.is_att() {
                        "l"
                    } else {
                        "d"
                    }
                }
            }
        };

        if a & 0x3000 == 0x3000 {
            // W selects between two widths; float classes use the ps/pd or
            // ss/sd pairs, everything else d/q.
            let float = matches!(optype::base(d.opcode_def.dest as u32), 0x40..=0x4F);
            let scalar = optype::vector_field(d.opcode_def.dest as u32) == 0;
            return match (float, scalar, w) {
                (true, false, false) => "ps",
                (true, false, true) => "pd",
                (true, true, false) => "ss",
                (true, true, true) => "sd",
                (false, _, false) => "d",
                (false, _, true) => "q",
            };
        }
        if a & 0x5000 == 0x5000 {
            return match (p66, w) {
                (true, false) => "b",
                (false, false) => "w",
                (true, true) => "d",
                (false, true) => "q",
            };
        }
        if a & 0x4000 != 0 {
            return if w { "w" } else { "b" };
        }
        if a & 0xE00 != 0 && a & 0x100 == 0 {
            return match d.prefixes[CAT_OTYPE] {
                0x66 => "pd",
                0xF2 => "sd",
                0xF3 => "ss",
                _ => "ps",
            };
        }
        if a & 0x100 != 0 {
            // Integer width by operand size (string instructions, ins/outs).
            return int_width(d.operand_size);
        }
        if a & 0x1000 != 0 {
            return if p66 { "d" } else { "s" };
        }
        int_width(d.operand_size)
    }

    /// Build the textual operands in emission order.
    fn operand_strings(&self, section: i32, decoder: &Decoder, d: &Decoded) -> Vec<String> {
        let mut list: Vec<String> = Vec::new();
        for (i, &t) in d.operands.iter().enumerate() {
            if t == 0 {
                continue;
            }
            let Some(mut s) = self.operand_string(section, decoder, d, t) else {
                continue;
            };
            // AT&T marks indirect branch targets with a star.
            if self.dialect.is_att()
                && matches!(
                    optype::base(t),
                    optype::T_NEAR_PTR_JMP | optype::T_NEAR_PTR_CALL | optype::T_FAR_PTR
                )
            {
                s.insert(0, '*');
            }
            if i == 0 && d.kreg != 0 {
                s.push_str(&format!("{{k{}}}", d.kreg));
                if d.vexkind == VexKind::Evex && d.esss & 0x08 != 0 && d.broadcast == 0 {
                    s.push_str("{z}");
                }
            }
            if optype::source_bits(t) == optype::SRC_RM && !d.mflags.contains(MemFlags::HAS_MEM) {
                if let Some(sw) = d.swiz {
                    if !sw.name.is_empty() {
                        s.push_str(&brace(sw.name));
                    }
                }
            }
            list.push(s);
        }
        if self.dialect.is_att() {
            list.reverse();
        }
        list
    }

    fn operand_string(
        &self,
        section: i32,
        decoder: &Decoder,
        d: &Decoded,
        t: u32,
    ) -> Option<String> {
        let base = optype::base(t);

        // Implicit operands.
        if (0xA1..=0xC2).contains(&base) {
            return self.implicit_operand(d, base);
        }

        if t & (optype::IMM_FIELD | optype::IMM_FIELD2) != 0 {
            return Some(self.immediate_operand(section, decoder, d, t));
        }

        match optype::source_bits(t) {
            optype::SRC_DIRECT_MEM => Some(self.direct_mem_operand(section, decoder, d, t)),
            optype::SRC_RM => {
                if d.mflags.contains(MemFlags::HAS_MEM) {
                    Some(self.memory_operand(section, decoder, d, t))
                } else {
                    Some(self.register_operand(d, d.modrm_rm as u32, t))
                }
            }
            optype::SRC_REG => Some(self.register_operand(d, d.modrm_reg as u32, t)),
            optype::SRC_OPCODE_REG => Some(self.register_operand(d, d.modrm_rm as u32, t)),
            optype::SRC_VVVV | optype::SRC_DREX => {
                Some(self.register_operand(d, d.vreg as u32, t))
            }
            optype::SRC_IMM_HI => {
                let imm = decoder.read_unsigned(d.immediate_field, 1) as u32;
                Some(self.register_operand(d, imm >> 4, t))
            }
            _ => None,
        }
    }

    fn implicit_operand(&self, d: &Decoded, base: u32) -> Option<String> {
        let pc = |s: &str| {
            if self.dialect.is_att() {
                format!("%{s}")
            } else {
                s.to_owned()
            }
        };
        Some(match base {
            optype::T_AL => pc("al"),
            optype::T_AX => pc("ax"),
            optype::T_EAX => pc("eax"),
            optype::T_RAX => pc("rax"),
            optype::T_AX_EAX => pc(if d.operand_size == 16 { "ax" } else { "eax" }),
            optype::T_AX_EAX_RAX => pc(match d.operand_size {
                16 => "ax",
                64 => "rax",
                _ => "eax",
            }),
            optype::T_XMM0 => pc("xmm0"),
            optype::T_ST0 => self.st_name(0),
            optype::T_ONE => {
                if self.dialect.is_att() {
                    "$1".to_owned()
                } else {
                    "1".to_owned()
                }
            }
            optype::T_DX => pc("dx"),
            optype::T_CL => pc("cl"),
            // Implicit string-op pointers are not spelled out.
            _ => return None,
        })
    }

    fn st_name(&self, i: u32) -> String {
        match self.dialect {
            Dialect::Masm => format!("st({i})"),
            Dialect::Nasm => format!("st{i}"),
            Dialect::Gas => format!("%st({i})"),
        }
    }

    /// Effective size in bits of an integer-class operand.
    fn operand_bits(&self, d: &Decoded, t: u32) -> u32 {
        let base = optype::base(t);
        // Default-64 types: stack and branch pointers need no REX.W.
        if matches!(
            base,
            optype::T_INT_WDQ_ADDR | optype::T_NEAR_PTR_JMP | optype::T_NEAR_PTR_CALL
        ) && d.address_size == 64
        {
            return 64;
        }
        optype::element_size(t, d.operand_size, d.vector_len).max(1) * 8
    }

    fn register_operand(&self, d: &Decoded, reg: u32, t: u32) -> String {
        let base = optype::base(t);
        let name: String = match base {
            0x40..=0x47 => return self.st_name(reg & 7),
            0x48..=0x51 => {
                let bytes = if optype::vector_field(t) != 0 {
                    optype::element_size(t, d.operand_size, d.vector_len).max(16)
                } else {
                    16
                };
                registers::vector_name(reg, bytes)
            }
            optype::T_SEG_REG => registers::REG_SEG[(reg & 7) as usize].to_owned(),
            optype::T_CTL_REG => registers::REG_CR[(reg & 15) as usize].to_owned(),
            optype::T_DBG_REG => registers::REG_DR[(reg & 15) as usize].to_owned(),
            optype::T_TST_REG => format!("tr{}", reg & 7),
            optype::T_MASK_REG => format!("k{}", reg & 7),
            optype::T_BND_REG => format!("bnd{}", reg & 3),
            _ if optype::vector_field(t) != 0 => {
                let bytes = optype::element_size(t, d.operand_size, d.vector_len).max(8);
                registers::vector_name(reg, bytes)
            }
            _ => {
                let bits = self.operand_bits(d, t);
                registers::gp_name(reg, bits, d.rex_present()).to_owned()
            }
        };
        if self.dialect.is_att() {
            format!("%{name}")
        } else {
            name
        }
    }

    /// Relocation-target expression: symbol name plus net addend.
    fn reloc_target(&self, section: i32, d: &Decoded, irel: u32, field: u32, size: u32, decoder: &Decoder) -> String {
        let Some(r) = self.relocations.get(irel) else {
            return String::new();
        };
        let target_new = self.symbols.old_to_new(r.target_old);
        let name = self.symbols.name(target_new);
        if name.is_empty() {
            return self.dialect.hex(decoder.read_unsigned(field, size));
        }
        let inline = decoder.read_signed(field, size);
        let mut offset: i64 = 0;
        if r.is_self_relative() {
            // Inline value counts from instruction end; the symbol should
            // land exactly on the computed target.
            let target = d.end as i64 + inline;
            if let Some(sym) = self.symbols.get(target_new) {
                if sym.section == section {
                    offset = target - sym.offset as i64;
                }
            }
        } else if r.rel_type & crate::reloc::REL_RELOCATED != 0 {
            // Inline value is an absolute address in the loaded image.
            if let Some(sym) = self.symbols.get(target_new) {
                let target_addr = self
                    .sections
                    .get(sym.section)
                    .map(|s| s.address)
                    .unwrap_or(0) as i64
                    + sym.offset as i64;
                offset = inline - self.image_base - target_addr + r.addend as i64;
            }
        } else {
            offset = inline + r.addend as i64;
        }
        let suffix = match r.rel_type {
            t if t & (REL_PLT | REL_IFUNC_PLT) != 0 || t == REL_PLT_SELF => match self.dialect {
                Dialect::Gas => "@PLT",
                Dialect::Nasm => " wrt ..plt",
                Dialect::Masm => "",
            },
            t if t == REL_GOT || t == REL_GOT_SELF => match self.dialect {
                Dialect::Gas => "@GOTPCREL",
                Dialect::Nasm => " wrt ..got",
                Dialect::Masm => "",
            },
            _ => "",
        };
        if offset != 0 {
            format!("{name}{}{suffix}", self.dialect.signed_hex(offset))
        } else {
            format!("{name}{suffix}")
        }
    }

    fn immediate_operand(&self, section: i32, decoder: &Decoder, d: &Decoded, t: u32) -> String {
        // Field layout: a second immediate part is the trailing byte.
        let (field, size) = if t & optype::IMM_FIELD2 != 0 {
            (
                d.immediate_field + d.immediate_field_size - 1,
                1,
            )
        } else {
            let second = d.operands.iter().any(|&o| o & optype::IMM_FIELD2 != 0);
            (
                d.immediate_field,
                d.immediate_field_size - if second { 1 } else { 0 },
            )
        };

        if optype::is_branch_target(t) {
            if d.immediate_relocation != 0 {
                return self.reloc_target(section, d, d.immediate_relocation, field, size, decoder);
            }
            let target = d.end as i64 + decoder.read_signed(field, size);
            if target >= 0 {
                let hit = self.symbols.find_by_address(section, target as u32);
                if let Some(si) = hit.exact {
                    let n = self.symbols.name(si);
                    if !n.is_empty() {
                        return n.to_owned();
                    }
                }
            }
            let sec_addr = self.sections.get(section).map(|s| s.address).unwrap_or(0);
            return self.dialect.hex((sec_addr as i64 + target) as u64);
        }

        if d.immediate_relocation != 0 && t & optype::IMM_FIELD != 0 {
            let expr = self.reloc_target(section, d, d.immediate_relocation, field, size, decoder);
            return if self.dialect.is_att() {
                format!("${expr}")
            } else {
                expr
            };
        }

        let text = if optype::is_signed(t) {
            format!("{}", decoder.read_signed(field, size))
        } else if optype::is_hex(t) {
            self.dialect.hex(decoder.read_unsigned(field, size))
        } else {
            format!("{}", decoder.read_unsigned(field, size))
        };
        if self.dialect.is_att() {
            format!("${text}")
        } else {
            text
        }
    }

    fn seg_override(&self, d: &Decoded) -> Option<&'static str> {
        match d.prefixes[CAT_SEG] {
            0x26 => Some("es"),
            0x2E => Some("cs"),
            0x36 => Some("ss"),
            0x3E => Some("ds"),
            0x64 => Some("fs"),
            0x65 => Some("gs"),
            _ => None,
        }
    }

    fn direct_mem_operand(&self, section: i32, decoder: &Decoder, d: &Decoded, t: u32) -> String {
        let expr = if d.address_relocation != 0 {
            self.reloc_target(
                section,
                d,
                d.address_relocation,
                d.address_field,
                d.address_field_size,
                decoder,
            )
        } else {
            self.dialect
                .hex(decoder.read_unsigned(d.address_field, d.address_field_size))
        };
        match self.dialect {
            Dialect::Gas => match self.seg_override(d) {
                Some(s) => format!("%{s}:{expr}"),
                None => expr,
            },
            _ => {
                let size = self.dialect.size_keyword(self.operand_bits(d, t) / 8);
                match self.seg_override(d) {
                    Some(s) => format!("{size}{s}:[{expr}]"),
                    None => format!("{size}[{expr}]"),
                }
            }
        }
    }

    /// Size in bytes written before a memory operand.
    fn mem_size_bytes(&self, d: &Decoded, t: u32) -> u32 {
        if d.broadcast != 0 {
            // Broadcast loads one element.
            return d.offset_multiplier.max(1);
        }
        if let Some(sw) = d.swiz {
            if sw.memopsize != 0 {
                return sw.memopsize;
            }
        }
        self.operand_bits(d, t) / 8
    }

    fn memory_operand(&self, section: i32, decoder: &Decoder, d: &Decoded, t: u32) -> String {
        let disp_expr: Option<String> = if d.address_relocation != 0 {
            Some(self.reloc_target(
                section,
                d,
                d.address_relocation,
                d.address_field,
                d.address_field_size,
                decoder,
            ))
        } else {
            None
        };
        let mut disp_val: i64 = if d.address_field_size > 0 {
            decoder.read_signed(d.address_field, d.address_field_size)
        } else {
            0
        };
        if d.address_field_size == 1 && d.offset_multiplier > 1 {
            // EVEX/MVEX compressed displacement.
            disp_val *= d.offset_multiplier as i64;
        }

        let base = if d.base_reg > 0 {
            Some(registers::gp_name((d.base_reg - 1) as u32, d.address_size, d.rex_present()).to_owned())
        } else {
            None
        };
        let index = if d.index_reg > 0 {
            if d.mflags.contains(MemFlags::VSIB) {
                Some(registers::vector_name((d.index_reg - 1) as u32, d.vector_len))
            } else {
                Some(
                    registers::gp_name((d.index_reg - 1) as u32, d.address_size, d.rex_present())
                        .to_owned(),
                )
            }
        } else {
            None
        };
        let scale = 1u32 << d.scale;
        let rip = d.mflags.contains(MemFlags::RIP_RELATIVE);

        let mut s = String::new();
        if self.dialect.is_att() {
            if let Some(seg) = self.seg_override(d) {
                s.push('%');
                s.push_str(seg);
                s.push(':');
            }
            match &disp_expr {
                Some(e) => s.push_str(e),
                None if disp_val != 0 || (base.is_none() && index.is_none() && !rip) => {
                    s.push_str(&format!("{disp_val}"))
                }
                None => {}
            }
            if rip {
                s.push_str("(%rip)");
            } else if base.is_some() || index.is_some() {
                s.push('(');
                if let Some(b) = &base {
                    s.push('%');
                    s.push_str(b);
                }
                if let Some(i) = &index {
                    s.push_str(",%");
                    s.push_str(i);
                    s.push_str(&format!(",{scale}"));
                }
                s.push(')');
            }
            if d.broadcast != 0 {
                s.push_str(&format!("{{1to{}}}", d.broadcast));
            }
            return s;
        }

        // Intel syntaxes.
        if self.dialect.size_keyword(1) != "" && d.opcode_def.options & 0x800 == 0 {
            s.push_str(self.dialect.size_keyword(self.mem_size_bytes(d, t)));
        }
        if let Some(seg) = self.seg_override(d) {
            s.push_str(seg);
            s.push(':');
        }
        s.push('[');
        let mut first = true;
        if rip {
            match &disp_expr {
                Some(e) => {
                    if self.dialect == Dialect::Nasm {
                        s.push_str("rel ");
                    }
                    s.push_str(e);
                }
                None => {
                    // No relocation: show the resolved target address.
                    let sec_addr = self.sections.get(section).map(|x| x.address).unwrap_or(0);
                    let target = sec_addr as i64 + d.end as i64 + disp_val;
                    if self.dialect == Dialect::Nasm {
                        s.push_str("rel ");
                    }
                    s.push_str(&self.dialect.hex(target.max(0) as u64));
                }
            }
            first = false;
        } else {
            if let Some(b) = &base {
                s.push_str(b);
                first = false;
            }
            if let Some(i) = &index {
                if !first {
                    s.push('+');
                }
                s.push_str(i);
                if scale > 1 {
                    s.push_str(&format!("*{scale}"));
                }
                first = false;
            }
            match &disp_expr {
                Some(e) => {
                    if !first {
                        s.push('+');
                    }
                    s.push_str(e);
                    first = false;
                }
                None => {
                    if disp_val != 0 || first {
                        if first {
                            s.push_str(&self.dialect.hex(disp_val as u64 & 0xFFFF_FFFF));
                            first = false;
                        } else {
                            s.push_str(&self.dialect.signed_hex(disp_val));
                        }
                    }
                }
            }
        }
        let _ = first;
        s.push(']');
        if d.broadcast != 0 {
            s.push_str(&format!("{{1to{}}}", d.broadcast));
        }
        if let Some(sw) = d.swiz {
            if !sw.name.is_empty() {
                s.push_str(&brace(sw.name));
            }
        }
        s
    }

    // ---- data sections ----

    fn write_data_section(&mut self, section: i32) {
        self.write_segment_begin(section);

        let (bytes, init_size, total_size) = {
            let s = self.sections.get(section).unwrap();
            (s.bytes.clone(), s.init_size, s.total_size)
        };
        let decoder_bytes = bytes.clone();
        let decoder = Decoder::new(&decoder_bytes, 64);

        let mut pos: u32 = 0;
        while pos < total_size.max(init_size) {
            self.write_labels_at(section, pos);
            let table_comment = self
                .symbols
                .find_by_address(section, pos)
                .exact
                .map(|si| self.symbols.get(si).unwrap().sym_type)
                .filter(|t| optype::base(*t) == optype::T_NEAR_PTR_JMP)
                .map(|_| "switch/case jump table");

            let next_label = self
                .symbols
                .find_by_address(section, pos)
                .after
                .and_then_nonzero(|a| self.symbols.get(a).map(|s| s.offset))
                .unwrap_or(total_size.max(init_size));

            if pos >= init_size {
                // Uninitialized tail.
                let len = total_size.saturating_sub(pos).min(next_label - pos).max(1);
                self.write_uninit(len);
                pos += len;
                continue;
            }

            if let Some(irel) = self.relocations.find(section, pos) {
                let r = *self.relocations.get(irel).unwrap();
                let size = r.size.max(1);
                self.out.tabulate(COL_OPCODE);
                self.out.put(self.dialect.data_directive(size));
                self.out.tabulate(COL_OPERAND);
                let d = Decoded::new(pos);
                let expr = {
                    // Borrow a fresh Decoded with the right end for
                    // self-relative arithmetic.
                    let mut dd = d;
                    dd.end = pos + size;
                    self.reloc_target(section, &dd, irel, pos, size, &decoder)
                };
                self.out.put(&expr);
                if let Some(c) = table_comment {
                    self.out.tabulate(COL_COMMENT);
                    let sep = self.dialect.comment_separator();
                    self.out.put(sep);
                    self.out.put(c);
                }
                self.out.new_line();
                pos += size;
                continue;
            }

            // Plain bytes up to the next label, relocation or line limit.
            let next_reloc = self
                .relocations
                .find_in_range(section, pos, init_size)
                .and_then(|i| self.relocations.get(i))
                .map(|r| r.offset)
                .unwrap_or(init_size);
            let stop = init_size.min(next_label).min(next_reloc).max(pos + 1);
            let len = (stop - pos).min(16);
            self.write_data_bytes(&bytes, pos, len, table_comment);
            pos += len;
        }

        self.write_segment_end(section);
    }

    fn write_uninit(&mut self, len: u32) {
        self.out.tabulate(COL_OPCODE);
        match self.dialect {
            Dialect::Masm => {
                self.out.put("db");
                self.out.tabulate(COL_OPERAND);
                self.out.put(&format!("{len} dup (?)"));
            }
            Dialect::Nasm => {
                self.out.put("resb");
                self.out.tabulate(COL_OPERAND);
                self.out.put(&format!("{len}"));
            }
            Dialect::Gas => {
                self.out.put(".zero");
                self.out.tabulate(COL_OPERAND);
                self.out.put(&format!("{len}"));
            }
        }
        self.out.new_line();
    }

    fn write_data_bytes(&mut self, bytes: &[u8], pos: u32, len: u32, comment: Option<&str>) {
        self.out.tabulate(COL_OPCODE);
        self.out.put(self.dialect.data_directive(1));
        self.out.tabulate(COL_OPERAND);
        let items: Vec<String> = (0..len)
            .map(|k| {
                self.dialect
                    .hex(*bytes.get((pos + k) as usize).unwrap_or(&0) as u64)
            })
            .collect();
        self.out.put(&items.join(", "));

        self.out.tabulate(COL_COMMENT);
        let sep = self.dialect.comment_separator();
        self.out.put(sep);
        if let Some(c) = comment {
            self.out.put(c);
            self.out.put(". ");
        }
        let ascii: String = (0..len)
            .map(|k| {
                let b = *bytes.get((pos + k) as usize).unwrap_or(&0);
                if (0x20..0x7F).contains(&b) {
                    b as char
                } else {
                    '.'
                }
            })
            .collect();
        self.out.put(&ascii);
        self.out.new_line();
    }
}

/// Wrap a swizzle decoration in braces unless it already has them.
fn brace(name: &str) -> String {
    if name.starts_with('{') {
        name.to_owned()
    } else {
        format!("{{{name}}}")
    }
}

fn masm_extern_type(sym_type: u32) -> String {
    match optype::element_size(sym_type, 64, 16) {
        1 => "BYTE",
        2 => "WORD",
        4 => "DWORD",
        8 => "QWORD",
        _ => "NEAR",
    }
    .to_owned()
}

fn diagnostic_texts(d: &Decoded) -> Vec<&'static str> {
    let mut v = Vec::new();
    let e = d.errors;
    if e.contains(Errors::RESERVED_OPCODE) {
        v.push("Error: illegal opcode");
    }
    if e.contains(Errors::ILLEGAL_PREFIX) {
        v.push("Error: illegal prefix");
    }
    if e.contains(Errors::PREFIX_CONFLICT) {
        v.push("Error: conflicting prefixes");
    }
    if e.contains(Errors::TRUNCATED) {
        v.push("Error: instruction truncated by section end");
    }
    if e.contains(Errors::WRONG_MODE) {
        v.push("Error: not available in this mode");
    }
    if e.contains(Errors::RELOC_SIZE_MISMATCH) {
        v.push("Error: relocation size mismatch");
    }
    if e.contains(Errors::VEX_MISUSE) {
        v.push("Error: illegal VEX/EVEX encoding");
    }
    if e.contains(Errors::REX_ON_BYTE_OP) {
        v.push("Error: REX prefix on byte operation");
    }
    if e.contains(Errors::TOO_LONG) {
        v.push("Error: instruction exceeds 15 bytes");
    }
    let w = d.warnings1;
    if w.contains(Warnings1::PREFIX_NO_EFFECT) {
        v.push("Note: prefix has no effect");
    }
    if w.contains(Warnings1::OPSIZE_ON_JUMP) {
        v.push("Warning: operand size prefix on jump");
    }
    if w.contains(Warnings1::NONCANONICAL_DISP) {
        v.push("Note: displacement longer than necessary");
    }
    if w.contains(Warnings1::UNALIGNED_MEM) {
        v.push("Warning: unaligned memory operand");
    }
    if w.contains(Warnings1::RELOC_DEGRADED) {
        v.push("Warning: relocation ignored, literal value written");
    }
    let w2 = d.warnings2;
    if w2.contains(Warnings2::DEPRECATED) {
        v.push("Warning: deprecated instruction");
    }
    if w2.contains(Warnings2::AMD_ONLY) {
        v.push("Note: AMD-specific instruction");
    }
    if w2.contains(Warnings2::INTEL_ONLY) {
        v.push("Note: Intel-specific instruction");
    }
    if w2.contains(Warnings2::UNDOCUMENTED) {
        v.push("Warning: undocumented opcode");
    }
    if w2.contains(Warnings2::DUBIOUS) {
        v.push("Warning: dubious code");
    }
    v
}

fn instruction_set_name(max: u32, amd_max: u32) -> String {
    let base = match max {
        0 => "8086",
        1 => "80186",
        2 => "80286",
        3 => "80386",
        4 => "80486",
        5 => "Pentium",
        6 => "Pentium Pro",
        7 => "MMX",
        8 => "Pentium II",
        0x11 => "SSE",
        0x12 => "SSE2",
        0x13 => "SSE3",
        0x14 => "Suppl. SSE3",
        0x15 => "SSE4.1",
        0x16 => "SSE4.2",
        0x17 => "AES",
        0x18 => "CLMUL",
        0x19 => "AVX",
        0x1A => "FMA3",
        0x1C => "AVX2",
        0x1D => "BMI etc.",
        0x20..=0x25 => "AVX-512",
        0x80 => "Knights Corner",
        0x100 | 0x101 => "x87",
        _ => "unknown",
    };
    if amd_max != 0 {
        format!("{base}, plus AMD-specific extensions")
    } else {
        base.to_owned()
    }
}

// Small helper so `u32` "0 = none" indices chain like options.
trait NonZeroExt {
    fn and_then_nonzero<T>(self, f: impl FnOnce(u32) -> Option<T>) -> Option<T>;
}

impl NonZeroExt for u32 {
    fn and_then_nonzero<T>(self, f: impl FnOnce(u32) -> Option<T>) -> Option<T> {
        if self == 0 {
            None
        } else {
            f(self)
        }
    }
}
