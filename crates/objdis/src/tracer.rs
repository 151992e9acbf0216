//! Light register tracing.
//!
//! Tracks which general-purpose registers are known to hold the address of a
//! symbol, so an indirect `jmp [reg + index*scale]` can be paired with the
//! `lea reg, [table]` that loaded the table base. Anything more than that is
//! deliberately out of scope: a slot falls back to `Unknown` on any write
//! the tracer does not recognize.

/// What a register slot is known to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trace {
    #[default]
    Unknown,
    /// Address of a symbol (old index) plus a byte offset.
    SymbolBase(u32, u32),
    /// Image base plus the address of a symbol (old index).
    ImageBase(u32),
    /// Known constant.
    Const(u32),
}

#[derive(Debug, Default)]
pub struct Tracer {
    regs: [Trace; 16],
}

// Caller-clobbered registers in both the SysV and Win64 conventions:
// rax, rcx, rdx, rsi, rdi, r8-r11.
const CLOBBERED: [usize; 9] = [0, 1, 2, 6, 7, 8, 9, 10, 11];

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all slots; done at every label.
    pub fn reset(&mut self) {
        self.regs = [Trace::Unknown; 16];
    }

    pub fn set(&mut self, reg: u8, value: Trace) {
        if let Some(slot) = self.regs.get_mut(reg as usize) {
            *slot = value;
        }
    }

    pub fn get(&self, reg: u8) -> Trace {
        self.regs.get(reg as usize).copied().unwrap_or_default()
    }

    /// A write the tracer does not model.
    pub fn wide_write(&mut self, reg: u8) {
        self.set(reg, Trace::Unknown);
    }

    /// Call or indirect jump: drop everything a callee may change.
    pub fn invalidate_clobbered(&mut self) {
        for &r in &CLOBBERED {
            self.regs[r] = Trace::Unknown;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_keeps_callee_saved_slots() {
        let mut t = Tracer::new();
        t.set(3, Trace::SymbolBase(7, 0)); // rbx
        t.set(0, Trace::SymbolBase(8, 0)); // rax
        t.invalidate_clobbered();
        assert_eq!(t.get(3), Trace::SymbolBase(7, 0));
        assert_eq!(t.get(0), Trace::Unknown);
    }

    #[test]
    fn reset_clears_all() {
        let mut t = Tracer::new();
        t.set(5, Trace::Const(42));
        t.reset();
        assert_eq!(t.get(5), Trace::Unknown);
    }
}
