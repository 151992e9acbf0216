//! Two-pass x86/x86-64 object-code disassembler.
//!
//! Object-file readers feed sections, symbols and relocations into a
//! [`Disassembler`], then call [`Disassembler::go`]. Pass 1 classifies code
//! and data, discovers functions and labels and synthesizes symbols for
//! inline addresses; pass 2 writes a complete assembly listing in the
//! selected dialect. The instance owns all of its state, so callers may run
//! several disassemblers in parallel; only the static opcode tables are
//! shared.
//!
//! ```no_run
//! use objdis::{Disassembler, Dialect, ExeType, SectionKind};
//!
//! let mut dis = Disassembler::new();
//! dis.init(ExeType::Object, 0);
//! dis.set_dialect(Dialect::Nasm);
//! dis.add_section(&[0x48, 0x89, 0xC3, 0xC3], 4, 4, 0, SectionKind::Code, 4, 64, ".text");
//! dis.go();
//! let listing = dis.output();
//! ```

mod dialect;
mod function;
mod pass1;
mod pass2;
mod reloc;
mod section;
mod symtab;
mod text;
mod tracer;

pub use dialect::Dialect;
pub use reloc::{Relocation, RelocationStore};
pub use section::{Section, SectionKind, SectionStore};
pub use symtab::{Scope, Symbol, SymbolTable};
pub use text::LineEnding;

pub use function::{FunctionList, FunctionRecord};
pub use tracer::{Trace, Tracer};

use text::TextBuffer;
use thiserror::Error;
use tracing::debug;

/// How the image was linked; decides how absolute addresses are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExeType {
    /// Relocatable object file.
    #[default]
    Object,
    /// Position-independent shared object.
    SharedObject,
    /// Executable with addresses relocated to the image base.
    Executable,
}

/// Global (not per-instruction) diagnostics. Localizable defects mark the
/// offending record invalid and the run continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisasmError {
    #[error("section {0}: initialized size {1:#x} exceeds total size {2:#x}")]
    MalformedSection(i32, u32, u32),

    #[error("duplicate symbol old index {0}")]
    DuplicateOldIndex(u32),

    #[error("relocation at {0}:{1:#x} points outside any section")]
    RelocationOutOfRange(i32, u32),

    #[error("relocation at {0}:{1:#x} targets unknown symbol {2}")]
    RelocationBadTarget(i32, u32, u32),

    #[error("{0} symbol names contained characters invalid in the selected dialect")]
    NamesChanged(u32),

    #[error("pass 1 did not converge after {0} repetitions")]
    NoConvergence(u32),
}

/// Pass progression: init -> pass1 (repeating) -> pass2 -> done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PassState {
    #[default]
    Init,
    Pass1Running,
    Pass2Running,
    Done,
}

const PASS1_REPEAT_CAP: u32 = 4;

/// The disassembler driver. Owns every table for the lifetime of the run.
pub struct Disassembler {
    pub(crate) sections: SectionStore,
    pub(crate) symbols: SymbolTable,
    pub(crate) relocations: RelocationStore,
    pub(crate) functions: FunctionList,
    pub(crate) tracer: Tracer,
    pub(crate) image_base: i64,
    pub(crate) exe_type: ExeType,
    pub(crate) dialect: Dialect,
    pub(crate) out: TextBuffer,
    global_errors: Vec<DisasmError>,
    state: PassState,

    // Pass-shared analysis results.
    pub(crate) repeat_requested: bool,
    pub(crate) instruction_set_max: u32,
    pub(crate) instruction_set_amd_max: u32,
    pub(crate) instruction_set_or: u32,
    /// MASM prologue needs: 1 = fs used, 2 = gs used.
    pub(crate) masm_options: u32,
    pub(crate) relocations_in_source: u32,
}

impl Default for Disassembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Disassembler {
    pub fn new() -> Self {
        Self {
            sections: SectionStore::new(),
            symbols: SymbolTable::new(),
            relocations: RelocationStore::new(),
            functions: FunctionList::new(),
            tracer: Tracer::new(),
            image_base: 0,
            exe_type: ExeType::Object,
            dialect: Dialect::default(),
            out: TextBuffer::new(),
            global_errors: Vec::new(),
            state: PassState::Init,
            repeat_requested: false,
            instruction_set_max: 0,
            instruction_set_amd_max: 0,
            instruction_set_or: 0,
            masm_options: 0,
            relocations_in_source: 0,
        }
    }

    /// Define the file type and image base before adding sections.
    pub fn init(&mut self, exe_type: ExeType, image_base: i64) {
        self.exe_type = exe_type;
        self.image_base = image_base;
    }

    pub fn set_dialect(&mut self, dialect: Dialect) {
        self.dialect = dialect;
    }

    pub fn set_line_ending(&mut self, ending: LineEnding) {
        self.out.line_ending = ending;
    }

    /// Define a section. Returns the 1-based section index.
    #[allow(clippy::too_many_arguments)]
    pub fn add_section(
        &mut self,
        bytes: &[u8],
        init_size: u32,
        total_size: u32,
        section_address: u32,
        kind: SectionKind,
        align: u32,
        word_size: u32,
        name: &str,
    ) -> i32 {
        let mut init_size = init_size;
        if init_size > total_size {
            let index = self.sections.count() as i32 + 1;
            self.global_errors
                .push(DisasmError::MalformedSection(index, init_size, total_size));
            init_size = total_size;
        }
        self.sections.push(Section {
            bytes: bytes.to_vec(),
            address: section_address,
            init_size: init_size.min(bytes.len() as u32),
            total_size,
            kind,
            align,
            word_size,
            name: name.to_owned(),
            group: 0,
        })
    }

    /// Define a symbol. Returns the old index callers use in relocations
    /// (assigned here when `old_index` is 0).
    #[allow(clippy::too_many_arguments)]
    pub fn add_symbol(
        &mut self,
        section: i32,
        offset: u32,
        size: u32,
        sym_type: u32,
        scope: Scope,
        old_index: u32,
        name: Option<&str>,
        dll_name: Option<&str>,
    ) -> u32 {
        if old_index != 0 && self.symbols.old_to_new(old_index) != 0 {
            self.global_errors
                .push(DisasmError::DuplicateOldIndex(old_index));
        }
        let (_, old) = self.symbols.add(
            section, offset, size, sym_type, scope, old_index, name, dll_name,
        );
        old
    }

    /// Define a relocation or cross-reference.
    #[allow(clippy::too_many_arguments)]
    pub fn add_relocation(
        &mut self,
        section: i32,
        offset: u32,
        addend: i32,
        rel_type: u32,
        size: u32,
        target_old: u32,
        ref_old: u32,
    ) {
        self.relocations_in_source += 1;
        self.relocations.add(Relocation {
            section,
            offset,
            rel_type,
            size,
            addend,
            target_old,
            ref_old,
            invalid: false,
        });
    }

    /// Define a section group (OMF). Returns the group's section index.
    /// Call repeatedly with the same name to add members.
    pub fn add_section_group(&mut self, name: &str, member_section: i32) -> i32 {
        let mut group = 0;
        for i in self.sections.indices() {
            let s = self.sections.get(i).unwrap();
            if s.kind == SectionKind::Group && s.name == name {
                group = i;
                break;
            }
        }
        if group == 0 {
            group = self.sections.push(Section {
                kind: SectionKind::Group,
                name: name.to_owned(),
                ..Default::default()
            });
        }
        if let Some(member) = self.sections.get_mut(member_section) {
            member.group = group;
        }
        group
    }

    /// Run both passes and produce the listing.
    pub fn go(&mut self) {
        debug_assert_eq!(self.state, PassState::Init);
        self.initial_error_check();
        self.fix_relocation_targets();

        self.state = PassState::Pass1Running;
        let mut iterations = 0;
        loop {
            iterations += 1;
            self.repeat_requested = false;
            self.pass1();
            if !self.repeat_requested {
                break;
            }
            if iterations >= PASS1_REPEAT_CAP {
                self.global_errors
                    .push(DisasmError::NoConvergence(iterations));
                break;
            }
            debug!(iteration = iterations + 1, "pass 1 repeating");
        }

        self.symbols.assign_names();
        let changed = self
            .symbols
            .sanitize_names(self.dialect.extra_name_chars());
        if changed > 0 {
            self.global_errors.push(DisasmError::NamesChanged(changed));
        }

        self.state = PassState::Pass2Running;
        self.pass2();
        self.state = PassState::Done;
        self.final_error_check();
    }

    /// The finished listing (valid after [`go`](Self::go)).
    pub fn output(&self) -> &str {
        self.out.as_str()
    }

    /// Take the listing buffer, consuming the instance.
    pub fn into_output(self) -> Vec<u8> {
        self.out.into_string().into_bytes()
    }

    /// Global diagnostics accumulated over the run.
    pub fn global_errors(&self) -> &[DisasmError] {
        &self.global_errors
    }

    /// Check caller-supplied relocations before pass 1; localizable defects
    /// mark the record invalid.
    fn initial_error_check(&mut self) {
        let mut bad = Vec::new();
        for i in self.relocations.indices() {
            let r = *self.relocations.get(i).unwrap();
            let in_section = self
                .sections
                .get(r.section)
                .map(|s| r.offset + r.size <= s.total_size.max(s.bytes.len() as u32))
                .unwrap_or(r.section < 0);
            if !in_section {
                bad.push((i, DisasmError::RelocationOutOfRange(r.section, r.offset)));
                continue;
            }
            if r.target_old != 0 && self.symbols.old_to_new(r.target_old) == 0 {
                bad.push((
                    i,
                    DisasmError::RelocationBadTarget(r.section, r.offset, r.target_old),
                ));
            }
        }
        for (i, e) in bad {
            if let Some(r) = self.relocations.get_mut(i) {
                r.invalid = true;
            }
            self.global_errors.push(e);
        }
    }

    /// Resolve symbols carrying the image-relative pseudo-section to a
    /// concrete `(section, offset)` by address lookup.
    fn fix_relocation_targets(&mut self) {
        let mut fixes = Vec::new();
        for i in self.symbols.indices() {
            let s = self.symbols.get(i).unwrap();
            if s.section == section::SECTION_IMGREL {
                if let Some((sect, off)) = self.sections.find_by_address(s.offset) {
                    fixes.push((i, sect, off));
                }
            }
        }
        let resort = !fixes.is_empty();
        for (i, sect, off) in fixes {
            debug!(symbol = i, section = sect, offset = off, "resolved image-relative symbol");
            if let Some(s) = self.symbols.get_mut(i) {
                s.section = sect;
                s.offset = off;
            }
        }
        if resort {
            self.symbols.resort();
        }
    }

    /// Consistency checks after pass 2.
    fn final_error_check(&mut self) {
        let mut seen = std::collections::HashSet::new();
        let mut dups = Vec::new();
        for i in self.symbols.indices() {
            let old = self.symbols.get(i).unwrap().old_index;
            if old != 0 && !seen.insert(old) {
                dups.push(old);
            }
        }
        for old in dups {
            self.global_errors.push(DisasmError::DuplicateOldIndex(old));
        }
    }
}
