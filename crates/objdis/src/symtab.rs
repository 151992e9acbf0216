//! Symbol table: address-keyed store with old-index translation and name
//! assignment.
//!
//! Symbols stay sorted by `(section, offset)`. New indices are positions in
//! the sorted list; they are stable within a pass but shift when pass-1
//! analysis inserts synthesized symbols, so cross-pass holders keep old
//! indices and translate again.

use bitflags::bitflags;
use objdis_x86::optype;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Scope: u32 {
        const LOCAL      = 0x01;
        const FILE_LOCAL = 0x02;
        const PUBLIC     = 0x04;
        const WEAK       = 0x08;
        const COMMUNAL   = 0x10;
        const EXTERNAL   = 0x20;
        /// Label has been written during pass 2.
        const EMITTED    = 0x100;
    }
}

#[derive(Debug, Clone, Default)]
pub struct Symbol {
    /// Section index; 0 = external, negative = pseudo-section.
    pub section: i32,
    /// Offset into the section (value for absolute symbols).
    pub offset: u32,
    /// Bytes covered by the symbol; 0 = unknown.
    pub size: u32,
    /// Operand-type lattice value; 0 = unknown.
    pub sym_type: u32,
    pub name: Option<String>,
    pub dll_name: Option<String>,
    pub scope: Scope,
    /// Caller-visible identifier used by relocations; 0 only transiently.
    pub old_index: u32,
}

impl Symbol {
    fn key(&self) -> (i32, u32) {
        (self.section, self.offset)
    }

    pub fn is_code(&self) -> bool {
        self.sym_type & optype::SYM_CODE != 0
    }

    pub fn is_data(&self) -> bool {
        self.sym_type & optype::SYM_DATA != 0
    }
}

/// Result of an address lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressHit {
    /// Exact match, if any.
    pub exact: Option<u32>,
    /// Last symbol at or before the address (0 = none).
    pub before: u32,
    /// First symbol after the address (0 = none).
    pub after: u32,
}

/// Sorted symbol list; entry 0 is the reserved "none" slot.
#[derive(Debug)]
pub struct SymbolTable {
    list: Vec<Symbol>,
    /// old index -> new index; rebuilt on every insertion.
    translate: Vec<u32>,
    old_num: u32,
    unnamed_num: u32,
    /// Prefix for invented names of nameless symbols.
    pub unnamed_prefix: &'static str,
    /// Prefix for import-table pointer names.
    pub import_prefix: &'static str,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            list: vec![Symbol::default()],
            translate: vec![0],
            old_num: 1,
            unnamed_num: 0,
            unnamed_prefix: "?_",
            import_prefix: "imp_",
        }
    }

    pub fn count(&self) -> usize {
        self.list.len() - 1
    }

    /// Highest old index + 1.
    pub fn old_limit(&self) -> u32 {
        self.old_num
    }

    pub fn get(&self, new_index: u32) -> Option<&Symbol> {
        if new_index == 0 {
            return None;
        }
        self.list.get(new_index as usize)
    }

    pub fn get_mut(&mut self, new_index: u32) -> Option<&mut Symbol> {
        if new_index == 0 {
            return None;
        }
        self.list.get_mut(new_index as usize)
    }

    pub fn indices(&self) -> impl Iterator<Item = u32> {
        1..self.list.len() as u32
    }

    /// Add a symbol from the object file. Deduplicates against an existing
    /// symbol at the same address when the names agree or one side is
    /// nameless. Returns `(new_index, old_index)`.
    #[allow(clippy::too_many_arguments)]
    pub fn add(
        &mut self,
        section: i32,
        offset: u32,
        size: u32,
        sym_type: u32,
        scope: Scope,
        old_index: u32,
        name: Option<&str>,
        dll_name: Option<&str>,
    ) -> (u32, u32) {
        let old_index = if old_index == 0 {
            self.next_old_index()
        } else {
            self.old_num = self.old_num.max(old_index + 1);
            old_index
        };

        if let Some(exact) = self.find_exact(section, offset) {
            let merge = {
                let existing = &self.list[exact as usize];
                match (&existing.name, name) {
                    (_, None) => true,
                    (None, _) => true,
                    (Some(a), Some(b)) => a == b,
                }
            };
            if merge {
                let existing = &mut self.list[exact as usize];
                if existing.name.is_none() {
                    existing.name = name.map(str::to_owned);
                }
                if existing.sym_type == 0 {
                    existing.sym_type = sym_type;
                }
                if existing.size == 0 {
                    existing.size = size;
                }
                existing.scope |= scope;
                if existing.dll_name.is_none() {
                    existing.dll_name = dll_name.map(str::to_owned);
                }
                let eo = existing.old_index;
                self.map_old(old_index, exact);
                return (exact, eo.max(old_index));
            }
        }

        let sym = Symbol {
            section,
            offset,
            size,
            sym_type,
            name: name.map(str::to_owned),
            dll_name: dll_name.map(str::to_owned),
            scope,
            old_index,
        };
        let new_index = self.insert_sorted(sym);
        (new_index, old_index)
    }

    /// Synthesize a nameless symbol; the name is invented at finalize time.
    pub fn new_symbol(&mut self, section: i32, offset: u32, scope: Scope) -> u32 {
        if let Some(exact) = self.find_exact(section, offset) {
            self.list[exact as usize].scope |= scope;
            return exact;
        }
        let old_index = self.next_old_index();
        self.insert_sorted(Symbol {
            section,
            offset,
            scope,
            old_index,
            ..Default::default()
        })
    }

    fn next_old_index(&mut self) -> u32 {
        let i = self.old_num;
        self.old_num += 1;
        i
    }

    fn insert_sorted(&mut self, sym: Symbol) -> u32 {
        let key = sym.key();
        let pos = 1 + self.list[1..].partition_point(|s| s.key() <= key);
        self.list.insert(pos, sym);
        self.rebuild_index();
        pos as u32
    }

    fn rebuild_index(&mut self) {
        self.translate = vec![0; self.old_num as usize];
        for (i, s) in self.list.iter().enumerate().skip(1) {
            if (s.old_index as usize) < self.translate.len() {
                self.translate[s.old_index as usize] = i as u32;
            }
        }
    }

    fn map_old(&mut self, old_index: u32, new_index: u32) {
        if self.translate.len() < self.old_num as usize {
            self.translate.resize(self.old_num as usize, 0);
        }
        self.translate[old_index as usize] = new_index;
    }

    /// Re-establish the sort after keys were mutated in place (for example
    /// when image-relative symbols were resolved to concrete sections).
    pub fn resort(&mut self) {
        self.list[1..].sort_by_key(Symbol::key);
        self.rebuild_index();
    }

    /// Translate a caller-supplied old index to the current new index.
    pub fn old_to_new(&self, old_index: u32) -> u32 {
        self.translate
            .get(old_index as usize)
            .copied()
            .unwrap_or(0)
    }

    fn find_exact(&self, section: i32, offset: u32) -> Option<u32> {
        let items = &self.list[1..];
        let pos = items.partition_point(|s| s.key() < (section, offset));
        let s = items.get(pos)?;
        if s.key() == (section, offset) {
            Some(pos as u32 + 1)
        } else {
            None
        }
    }

    /// Exact, last-before-or-at, and next-after lookups in one pass.
    pub fn find_by_address(&self, section: i32, offset: u32) -> AddressHit {
        let items = &self.list[1..];
        let pos = items.partition_point(|s| s.key() < (section, offset));
        let exact = items
            .get(pos)
            .filter(|s| s.key() == (section, offset))
            .map(|_| pos as u32 + 1);
        let before = if exact.is_some() {
            pos as u32 + 1
        } else if pos > 0 && items[pos - 1].section == section {
            pos as u32
        } else {
            0
        };
        // Skip past duplicates of the exact hit.
        let mut after_pos = pos;
        while after_pos < items.len() && items[after_pos].key() == (section, offset) {
            after_pos += 1;
        }
        let after = items
            .get(after_pos)
            .filter(|s| s.section == section)
            .map(|_| after_pos as u32 + 1)
            .unwrap_or(0);
        AddressHit {
            exact,
            before,
            after,
        }
    }

    /// Invent names for nameless symbols whose section is known.
    pub fn assign_names(&mut self) {
        for i in 1..self.list.len() {
            if self.list[i].name.is_some() {
                continue;
            }
            if self.list[i].section == 0 && self.list[i].scope.contains(Scope::EXTERNAL) {
                continue;
            }
            self.unnamed_num += 1;
            let name = format!("{}{:03}", self.unnamed_prefix, self.unnamed_num);
            self.list[i].name = Some(name);
        }
    }

    /// Symbol name by new index; empty string when unnamed.
    pub fn name(&self, new_index: u32) -> &str {
        self.get(new_index)
            .and_then(|s| s.name.as_deref())
            .unwrap_or("")
    }

    /// Rewrite characters the selected dialect cannot accept in identifiers.
    /// Returns the number of renamed symbols.
    pub fn sanitize_names(&mut self, allowed_extra: &str) -> u32 {
        let mut changed = 0;
        for i in 1..self.list.len() {
            if let Some(name) = &self.list[i].name {
                if name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || allowed_extra.contains(c))
                {
                    continue;
                }
                let fixed: String = name
                    .chars()
                    .map(|c| {
                        if c.is_ascii_alphanumeric() || c == '_' || allowed_extra.contains(c) {
                            c
                        } else {
                            '_'
                        }
                    })
                    .collect();
                self.list[i].name = Some(fixed);
                changed += 1;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_insert_and_address_lookup() {
        let mut t = SymbolTable::new();
        t.add(1, 0x20, 0, 0, Scope::PUBLIC, 0, Some("b"), None);
        t.add(1, 0x08, 0, 0, Scope::LOCAL, 0, Some("a"), None);
        t.add(2, 0x00, 0, 0, Scope::LOCAL, 0, Some("c"), None);

        let hit = t.find_by_address(1, 0x20);
        assert!(hit.exact.is_some());
        assert_eq!(t.name(hit.exact.unwrap()), "b");

        let hit = t.find_by_address(1, 0x10);
        assert!(hit.exact.is_none());
        assert_eq!(t.name(hit.before), "a");
        assert_eq!(t.name(hit.after), "b");
    }

    #[test]
    fn old_to_new_is_total_over_old_limit() {
        let mut t = SymbolTable::new();
        let (_, o1) = t.add(1, 0x20, 0, 0, Scope::LOCAL, 7, Some("x"), None);
        let (_, o2) = t.add(1, 0x04, 0, 0, Scope::LOCAL, 3, Some("y"), None);
        let s = t.new_symbol(1, 0x10, Scope::FILE_LOCAL);
        let o3 = t.get(s).unwrap().old_index;

        for old in [o1, o2, o3] {
            let new = t.old_to_new(old);
            assert_ne!(new, 0);
            assert_eq!(t.get(new).unwrap().old_index, old);
        }
        // The reverse map restricted to old-bearing symbols is injective.
        let mut seen = std::collections::HashSet::new();
        for i in t.indices() {
            let old = t.get(i).unwrap().old_index;
            assert!(seen.insert(old), "old index {old} mapped twice");
        }
    }

    #[test]
    fn dedup_by_address_when_names_match_or_nameless() {
        let mut t = SymbolTable::new();
        let (n1, _) = t.add(1, 0x10, 0, 0, Scope::LOCAL, 0, Some("f"), None);
        let (n2, _) = t.add(1, 0x10, 4, 0, Scope::PUBLIC, 0, None, None);
        assert_eq!(n1, n2);
        assert_eq!(t.count(), 1);
        assert!(t.get(n1).unwrap().scope.contains(Scope::PUBLIC));
        assert_eq!(t.get(n1).unwrap().size, 4);

        // Different name at the same address stays separate.
        let (n3, _) = t.add(1, 0x10, 0, 0, Scope::LOCAL, 0, Some("g"), None);
        assert_ne!(n1, n3);
    }

    #[test]
    fn assign_names_covers_every_nameless_internal_symbol() {
        let mut t = SymbolTable::new();
        t.new_symbol(1, 0x10, Scope::FILE_LOCAL);
        t.new_symbol(1, 0x20, Scope::FILE_LOCAL);
        t.assign_names();
        for i in t.indices() {
            assert!(t.get(i).unwrap().name.is_some());
        }
        assert_eq!(t.name(1), "?_001");
    }

    #[test]
    fn sanitize_rewrites_forbidden_characters() {
        let mut t = SymbolTable::new();
        t.add(1, 0, 0, 0, Scope::PUBLIC, 0, Some("a.b$c"), None);
        let changed = t.sanitize_names("$");
        assert_eq!(changed, 1);
        assert_eq!(t.name(1), "a_b$c");
    }
}
