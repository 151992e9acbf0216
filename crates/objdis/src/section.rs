//! Section store.

/// No section / external.
pub const SECTION_NONE: i32 = 0;
/// Absolute symbol.
pub const SECTION_ABSOLUTE: i32 = -1;
/// Flat group for non-segmented code.
pub const SECTION_FLAT: i32 = -2;
/// Segment register assumed to nothing.
pub const SECTION_NOTHING: i32 = -3;
/// Segment register assumed unusable.
pub const SECTION_ERROR: i32 = -4;
/// Offset is image-relative; resolve to a section by address.
pub const SECTION_IMGREL: i32 = -16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionKind {
    #[default]
    Unknown,
    Code,
    Data,
    Bss,
    Const,
    Debug,
    Exception,
    Group,
    Communal,
}

impl SectionKind {
    /// Pass 1 walks these as code.
    pub fn is_codeish(self) -> bool {
        matches!(self, SectionKind::Code | SectionKind::Unknown)
    }

    pub fn is_data(self) -> bool {
        matches!(
            self,
            SectionKind::Data | SectionKind::Bss | SectionKind::Const | SectionKind::Communal
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Section {
    pub bytes: Vec<u8>,
    /// Image-relative address of the section start.
    pub address: u32,
    /// Size of initialized data; bytes beyond this are zero-filled.
    pub init_size: u32,
    /// Total size including uninitialized data.
    pub total_size: u32,
    pub kind: SectionKind,
    /// Alignment = 1 << align.
    pub align: u32,
    /// Segment word size: 16, 32 or 64.
    pub word_size: u32,
    pub name: String,
    /// Group membership: 0 = none, -2 = flat, > 0 = group section index.
    pub group: i32,
}

/// 1-based flat list of sections; entry 0 is the reserved "none" slot.
#[derive(Debug, Default)]
pub struct SectionStore {
    list: Vec<Section>,
}

impl SectionStore {
    pub fn new() -> Self {
        Self {
            list: vec![Section::default()],
        }
    }

    pub fn push(&mut self, section: Section) -> i32 {
        self.list.push(section);
        (self.list.len() - 1) as i32
    }

    pub fn get(&self, index: i32) -> Option<&Section> {
        if index <= 0 {
            return None;
        }
        self.list.get(index as usize)
    }

    pub fn get_mut(&mut self, index: i32) -> Option<&mut Section> {
        if index <= 0 {
            return None;
        }
        self.list.get_mut(index as usize)
    }

    /// Number of real sections (excluding the reserved slot).
    pub fn count(&self) -> usize {
        self.list.len() - 1
    }

    /// Iterate 1-based indices of real sections.
    pub fn indices(&self) -> impl Iterator<Item = i32> {
        1..self.list.len() as i32
    }

    /// Resolve an image-relative address to `(section, offset)`.
    pub fn find_by_address(&self, address: u32) -> Option<(i32, u32)> {
        for i in self.indices() {
            let s = &self.list[i as usize];
            if s.kind == SectionKind::Group {
                continue;
            }
            if address >= s.address && address < s.address + s.total_size.max(1) {
                return Some((i, address - s.address));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_zero_is_reserved() {
        let mut st = SectionStore::new();
        assert_eq!(st.count(), 0);
        let i = st.push(Section {
            address: 0x1000,
            total_size: 0x100,
            ..Default::default()
        });
        assert_eq!(i, 1);
        assert!(st.get(0).is_none());
        assert!(st.get(1).is_some());
    }

    #[test]
    fn address_lookup() {
        let mut st = SectionStore::new();
        st.push(Section {
            address: 0x1000,
            total_size: 0x100,
            ..Default::default()
        });
        st.push(Section {
            address: 0x2000,
            total_size: 0x80,
            ..Default::default()
        });
        assert_eq!(st.find_by_address(0x1010), Some((1, 0x10)));
        assert_eq!(st.find_by_address(0x2000), Some((2, 0)));
        assert_eq!(st.find_by_address(0x3000), None);
    }
}
