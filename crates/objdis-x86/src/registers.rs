//! Register name tables.

/// 8-bit registers without REX prefix (AH..BH at 4-7).
pub static REG8: [&str; 8] = ["al", "cl", "dl", "bl", "ah", "ch", "dh", "bh"];

/// 8-bit registers when any REX prefix is present (SPL..DIL at 4-7).
pub static REG8_REX: [&str; 16] = [
    "al", "cl", "dl", "bl", "spl", "bpl", "sil", "dil", "r8b", "r9b", "r10b", "r11b", "r12b",
    "r13b", "r14b", "r15b",
];

pub static REG16: [&str; 16] = [
    "ax", "cx", "dx", "bx", "sp", "bp", "si", "di", "r8w", "r9w", "r10w", "r11w", "r12w", "r13w",
    "r14w", "r15w",
];

pub static REG32: [&str; 16] = [
    "eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi", "r8d", "r9d", "r10d", "r11d", "r12d",
    "r13d", "r14d", "r15d",
];

pub static REG64: [&str; 16] = [
    "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10", "r11", "r12",
    "r13", "r14", "r15",
];

pub static REG_SEG: [&str; 8] = ["es", "cs", "ss", "ds", "fs", "gs", "?6", "?7"];

pub static REG_CR: [&str; 16] = [
    "cr0", "cr1", "cr2", "cr3", "cr4", "cr5", "cr6", "cr7", "cr8", "cr9", "cr10", "cr11", "cr12",
    "cr13", "cr14", "cr15",
];

pub static REG_DR: [&str; 16] = [
    "dr0", "dr1", "dr2", "dr3", "dr4", "dr5", "dr6", "dr7", "dr8", "dr9", "dr10", "dr11", "dr12",
    "dr13", "dr14", "dr15",
];

/// General-purpose register name for `reg` (0-15) at the given width in bits.
/// `rex_present` selects spl/bpl/sil/dil over ah/ch/dh/bh for width 8.
pub fn gp_name(reg: u32, bits: u32, rex_present: bool) -> &'static str {
    let i = (reg & 15) as usize;
    match bits {
        8 => {
            if rex_present {
                REG8_REX[i]
            } else {
                REG8[i & 7]
            }
        }
        16 => REG16[i],
        64 => REG64[i],
        _ => REG32[i],
    }
}

/// Vector register name for `reg` (0-31) of `bytes` size (8/16/32/64).
pub fn vector_name(reg: u32, bytes: u32) -> String {
    let prefix = match bytes {
        8 => "mm",
        32 => "ymm",
        64 => "zmm",
        _ => "xmm",
    };
    if bytes == 8 {
        format!("{}{}", prefix, reg & 7)
    } else {
        format!("{}{}", prefix, reg & 31)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_register_names_depend_on_rex() {
        assert_eq!(gp_name(4, 8, false), "ah");
        assert_eq!(gp_name(4, 8, true), "spl");
        assert_eq!(gp_name(12, 8, true), "r12b");
    }

    #[test]
    fn vector_names() {
        assert_eq!(vector_name(0, 16), "xmm0");
        assert_eq!(vector_name(17, 64), "zmm17");
        assert_eq!(vector_name(3, 8), "mm3");
    }
}
