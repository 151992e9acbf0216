//! Group tables and small dispatch tables reached from the primary and 0F
//! maps: immediate groups 1-17, mode/operand-size/address-size routers, and
//! the mandatory-prefix routers for the SSE families.

use super::{lnk, op, opv, pfx, Link, OpcodeDef, ILLEGAL};
use super::{T_0F12_NONE, T_0F16_NONE, T_GRP7_R1, T_GRP7_R2, T_GRP7_R7, T_GRP9_CX};

#[rustfmt::skip]
pub static GRP1_80: [OpcodeDef; 8] = [
    op("add", 0, 0x10, 0x51, 0x01, 0x21, 0, 0),
    op("or",  0, 0x10, 0x51, 0x01, 0x11, 0, 0),
    op("adc", 0, 0x10, 0x51, 0x01, 0x21, 0, 0),
    op("sbb", 0, 0x10, 0x51, 0x01, 0x21, 0, 0),
    op("and", 0, 0x10, 0x51, 0x01, 0x11, 0, 0),
    op("sub", 0, 0x10, 0x51, 0x01, 0x21, 0, 0),
    op("xor", 0, 0x10, 0x51, 0x01, 0x11, 0, 0),
    op("cmp", 0, 0,    0x51, 0x01, 0x21, 0, 4),
];

#[rustfmt::skip]
pub static GRP1_81: [OpcodeDef; 8] = [
    op("add", 0, 0x1110, 0x91, 0x09, 0x29, 0, 0),
    op("or",  0, 0x1110, 0x91, 0x09, 0x19, 0, 0),
    op("adc", 0, 0x1110, 0x91, 0x09, 0x29, 0, 0),
    op("sbb", 0, 0x1110, 0x91, 0x09, 0x29, 0, 0),
    op("and", 0, 0x1110, 0x91, 0x09, 0x19, 0, 0),
    op("sub", 0, 0x1110, 0x91, 0x09, 0x29, 0, 0),
    op("xor", 0, 0x1110, 0x91, 0x09, 0x19, 0, 0),
    op("cmp", 0, 0x1100, 0x91, 0x09, 0x29, 0, 4),
];

// 0x82 is an alias of 0x80, valid only outside 64-bit mode.
#[rustfmt::skip]
pub static GRP1_82: [OpcodeDef; 8] = [
    op("add", 0x8000, 0x10, 0x51, 0x01, 0x21, 0, 0),
    op("or",  0x8000, 0x10, 0x51, 0x01, 0x11, 0, 0),
    op("adc", 0x8000, 0x10, 0x51, 0x01, 0x21, 0, 0),
    op("sbb", 0x8000, 0x10, 0x51, 0x01, 0x21, 0, 0),
    op("and", 0x8000, 0x10, 0x51, 0x01, 0x11, 0, 0),
    op("sub", 0x8000, 0x10, 0x51, 0x01, 0x21, 0, 0),
    op("xor", 0x8000, 0x10, 0x51, 0x01, 0x11, 0, 0),
    op("cmp", 0x8000, 0,    0x51, 0x01, 0x21, 0, 4),
];

#[rustfmt::skip]
pub static GRP1_83: [OpcodeDef; 8] = [
    op("add", 0, 0x1110, 0x51, 0x09, 0x21, 0, 0),
    op("or",  0, 0x1110, 0x51, 0x09, 0x21, 0, 0),
    op("adc", 0, 0x1110, 0x51, 0x09, 0x21, 0, 0),
    op("sbb", 0, 0x1110, 0x51, 0x09, 0x21, 0, 0),
    op("and", 0, 0x1110, 0x51, 0x09, 0x21, 0, 0),
    op("sub", 0, 0x1110, 0x51, 0x09, 0x21, 0, 0),
    op("xor", 0, 0x1110, 0x51, 0x09, 0x21, 0, 0),
    op("cmp", 0, 0x1100, 0x51, 0x09, 0x21, 0, 4),
];

#[rustfmt::skip]
pub static GRP1A: [OpcodeDef; 8] = [
    op("pop", 0, 0x102, 0x11, 0x0A, 0, 0, 0),
    ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL,
];

const fn shift8(name: &'static str, src: u16) -> OpcodeDef {
    op(name, 1, 0, if src == 0x11 { 0x51 } else { 0x11 }, 0x01, src, 0, 0)
}
const fn shiftv(name: &'static str, src: u16) -> OpcodeDef {
    op(name, 1, 0x1100, if src == 0x11 { 0x51 } else { 0x11 }, 0x09, src, 0, 0)
}

#[rustfmt::skip]
pub static GRP2_C0: [OpcodeDef; 8] = [
    shift8("rol", 0x11), shift8("ror", 0x11), shift8("rcl", 0x11), shift8("rcr", 0x11),
    shift8("shl", 0x11), shift8("shr", 0x11), shift8("shl", 0x11), shift8("sar", 0x11),
];
#[rustfmt::skip]
pub static GRP2_C1: [OpcodeDef; 8] = [
    shiftv("rol", 0x11), shiftv("ror", 0x11), shiftv("rcl", 0x11), shiftv("rcr", 0x11),
    shiftv("shl", 0x11), shiftv("shr", 0x11), shiftv("shl", 0x11), shiftv("sar", 0x11),
];
#[rustfmt::skip]
pub static GRP2_D0: [OpcodeDef; 8] = [
    shift8("rol", 0xB1), shift8("ror", 0xB1), shift8("rcl", 0xB1), shift8("rcr", 0xB1),
    shift8("shl", 0xB1), shift8("shr", 0xB1), shift8("shl", 0xB1), shift8("sar", 0xB1),
];
#[rustfmt::skip]
pub static GRP2_D1: [OpcodeDef; 8] = [
    shiftv("rol", 0xB1), shiftv("ror", 0xB1), shiftv("rcl", 0xB1), shiftv("rcr", 0xB1),
    shiftv("shl", 0xB1), shiftv("shr", 0xB1), shiftv("shl", 0xB1), shiftv("sar", 0xB1),
];
#[rustfmt::skip]
pub static GRP2_D2: [OpcodeDef; 8] = [
    shift8("rol", 0xB3), shift8("ror", 0xB3), shift8("rcl", 0xB3), shift8("rcr", 0xB3),
    shift8("shl", 0xB3), shift8("shr", 0xB3), shift8("shl", 0xB3), shift8("sar", 0xB3),
];
#[rustfmt::skip]
pub static GRP2_D3: [OpcodeDef; 8] = [
    shiftv("rol", 0xB3), shiftv("ror", 0xB3), shiftv("rcl", 0xB3), shiftv("rcr", 0xB3),
    shiftv("shl", 0xB3), shiftv("shr", 0xB3), shiftv("shl", 0xB3), shiftv("sar", 0xB3),
];

#[rustfmt::skip]
pub static GRP3_F6: [OpcodeDef; 8] = [
    op("test", 0, 0,    0x51, 0x01, 0x11, 0, 4),
    op("test", 0, 0,    0x51, 0x01, 0x11, 0, 4),
    op("not",  0, 0x10, 0x11, 0x01, 0,    0, 0),
    op("neg",  0, 0x10, 0x11, 0x01, 0,    0, 0),
    op("mul",  0, 0,    0x11, 0x01, 0,    0, 8),
    op("imul", 0, 0,    0x11, 0x01, 0,    0, 8),
    op("div",  0, 0,    0x11, 0x01, 0,    0, 8),
    op("idiv", 0, 0,    0x11, 0x01, 0,    0, 8),
];

#[rustfmt::skip]
pub static GRP3_F7: [OpcodeDef; 8] = [
    op("test", 0, 0x1100, 0x91, 0x09, 0x19, 0, 4),
    op("test", 0, 0x1100, 0x91, 0x09, 0x19, 0, 4),
    op("not",  0, 0x1110, 0x11, 0x09, 0,    0, 0),
    op("neg",  0, 0x1110, 0x11, 0x09, 0,    0, 0),
    op("mul",  0, 0x1100, 0x11, 0x09, 0,    0, 8),
    op("imul", 0, 0x1100, 0x11, 0x09, 0,    0, 8),
    op("div",  0, 0x1100, 0x11, 0x09, 0,    0, 8),
    op("idiv", 0, 0x1100, 0x11, 0x09, 0,    0, 8),
];

#[rustfmt::skip]
pub static GRP4: [OpcodeDef; 8] = [
    op("inc", 0, 0x10, 0x11, 0x01, 0, 0, 0),
    op("dec", 0, 0x10, 0x11, 0x01, 0, 0, 0),
    ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL,
];

#[rustfmt::skip]
pub static GRP5: [OpcodeDef; 8] = [
    op("inc",  0, 0x1110, 0x11, 0x09, 0, 0, 0),
    op("dec",  0, 0x1110, 0x11, 0x09, 0, 0, 0),
    op("call", 0, 0x1102, 0x11, 0x0C, 0, 0, 8),
    op("call", 0, 0x102,  0x811, 0x0D, 0, 0, 8),
    op("jmp",  0, 0x1100, 0x11, 0x0B, 0, 0, 0x10),
    op("jmp",  0, 0x100,  0x811, 0x0D, 0, 0, 0x10),
    op("push", 0, 0x102,  0x11, 0x0A, 0, 0, 0),
    ILLEGAL,
];

#[rustfmt::skip]
pub static GRP6: [OpcodeDef; 8] = [
    op("sldt", 2, 0x1100, 0x11, 0x09, 0, 0, 0),
    op("str",  2, 0x1100, 0x11, 0x09, 0, 0, 0),
    op("lldt", 0x802, 0,  0x11, 0x02, 0, 0, 0),
    op("ltr",  0x802, 0,  0x11, 0x02, 0, 0, 0),
    op("verr", 2, 0,      0x11, 0x02, 0, 0, 0),
    op("verw", 2, 0,      0x11, 0x02, 0, 0, 0),
    ILLEGAL, ILLEGAL,
];

#[rustfmt::skip]
pub static GRP7: [OpcodeDef; 16] = [
    // mod < 3
    op("sgdt",   2, 0,     0x11, 0x2006, 0, 0, 0x800),
    op("sidt",   2, 0,     0x11, 0x2006, 0, 0, 0x800),
    op("lgdt",   0x802, 0, 0x11, 0x2006, 0, 0, 0x800),
    op("lidt",   0x802, 0, 0x11, 0x2006, 0, 0, 0x800),
    op("smsw",   2, 0x1100, 0x11, 0x09, 0, 0, 0),
    ILLEGAL,
    op("lmsw",   0x802, 0, 0x11, 0x02, 0, 0, 0),
    op("invlpg", 0x804, 0, 0x11, 0x2006, 0, 0, 0x800),
    // mod == 3
    ILLEGAL,
    lnk(Link::ByRm(T_GRP7_R1), 0),
    lnk(Link::ByRm(T_GRP7_R2), 0),
    ILLEGAL,
    op("smsw",   2, 0x1100, 0x11, 0x09, 0, 0, 0),
    ILLEGAL,
    op("lmsw",   0x802, 0, 0x11, 0x02, 0, 0, 0),
    lnk(Link::ByRm(T_GRP7_R7), 0),
];

#[rustfmt::skip]
pub static GRP7_R1: [OpcodeDef; 8] = [
    op("monitor", 0x13, 0, 2, 0, 0, 0, 0),
    op("mwait",   0x13, 0, 2, 0, 0, 0, 0),
    op("clac",    0x1D, 0, 2, 0, 0, 0, 0),
    op("stac",    0x1D, 0, 2, 0, 0, 0, 0),
    ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL,
];

#[rustfmt::skip]
pub static GRP7_R2: [OpcodeDef; 8] = [
    op("xgetbv", 0x19, 0, 2, 0, 0, 0, 0),
    op("xsetbv", 0x819, 0, 2, 0, 0, 0, 0),
    ILLEGAL,
    ILLEGAL,
    op("vmfunc", 0x1D, 0, 2, 0, 0, 0, 0),
    op("xend",   0x1D, 0, 2, 0, 0, 0, 0),
    op("xtest",  0x1D, 0, 2, 0, 0, 0, 0),
    ILLEGAL,
];

#[rustfmt::skip]
pub static GRP7_R7: [OpcodeDef; 8] = [
    op("swapgs", 0x4800, 0, 2, 0, 0, 0, 0),
    op("rdtscp", 0x16, 0,   2, 0, 0, 0, 0),
    ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL,
];

#[rustfmt::skip]
pub static GRP8: [OpcodeDef; 8] = [
    ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL,
    op("bt",  3, 0x1100, 0x51, 0x09, 0x11, 0, 4),
    op("bts", 3, 0x1110, 0x51, 0x09, 0x11, 0, 0),
    op("btr", 3, 0x1110, 0x51, 0x09, 0x11, 0, 0),
    op("btc", 3, 0x1110, 0x51, 0x09, 0x11, 0, 0),
];

#[rustfmt::skip]
pub static GRP9: [OpcodeDef; 16] = [
    // mod < 3
    ILLEGAL,
    lnk(Link::ByVexW(T_GRP9_CX), 0),
    ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL,
    // mod == 3
    ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL,
    op("rdrand", 0x1D, 0x1100, 0x11, 0x1009, 0, 0, 0),
    op("rdseed", 0x1D, 0x1100, 0x11, 0x1009, 0, 0, 0),
];

#[rustfmt::skip]
pub static GRP9_CX: [OpcodeDef; 2] = [
    op("cmpxchg8b",  5, 0x10, 0x11, 0x2004, 0, 0, 0x800),
    op("cmpxchg16b", 0x4000 | 0x12, 0x10, 0x11, 0x2006, 0, 0, 0x800),
];

#[rustfmt::skip]
pub static GRP11_C6: [OpcodeDef; 8] = [
    op("mov", 0, 0, 0x51, 0x01, 0x11, 0, 0),
    ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL,
    op("xabort", 0x1D, 0, 0x51, 0, 0x31, 0, 0x10),
];

#[rustfmt::skip]
pub static GRP11_C7: [OpcodeDef; 8] = [
    op("mov", 0, 0x1100, 0x91, 0x09, 0x19, 0, 0),
    ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL,
    op("xbegin", 0x1D, 0, 0x91, 0x82, 0, 0, 0),
];

// Groups 12-14: immediate shifts of vector registers; register form only,
// destination in VEX.vvvv when a VEX prefix is present.
const fn vshift(name: &'static str) -> OpcodeDef {
    op(name, 7, 0x8D0200, 0x58, 0x1150, 0x11, 0, 2)
}

#[rustfmt::skip]
pub static GRP12: [OpcodeDef; 8] = [
    ILLEGAL, ILLEGAL, vshift("psrlw"), ILLEGAL, vshift("psraw"), ILLEGAL, vshift("psllw"), ILLEGAL,
];
#[rustfmt::skip]
pub static GRP13: [OpcodeDef; 8] = [
    ILLEGAL, ILLEGAL, vshift("psrld"), ILLEGAL, vshift("psrad"), ILLEGAL, vshift("pslld"), ILLEGAL,
];
#[rustfmt::skip]
pub static GRP14: [OpcodeDef; 8] = [
    ILLEGAL, ILLEGAL,
    vshift("psrlq"),
    op("psrldq", 0x12, 0x8D8200, 0x58, 0x1450, 0x11, 0, 2),
    ILLEGAL, ILLEGAL,
    vshift("psllq"),
    op("pslldq", 0x12, 0x8D8200, 0x58, 0x1450, 0x11, 0, 2),
];

#[rustfmt::skip]
pub static GRP15: [OpcodeDef; 16] = [
    // mod < 3
    op("fxsave",  0x11, 0, 0x11, 0x2006, 0, 0, 0x800),
    op("fxrstor", 0x11, 0, 0x11, 0x2006, 0, 0, 0x800),
    op("ldmxcsr", 0x11, 0x10000, 0x11, 0x2003, 0, 0, 2),
    op("stmxcsr", 0x11, 0x10000, 0x11, 0x2003, 0, 0, 2),
    op("xsave",   0x19, 0, 0x11, 0x2006, 0, 0, 0x800),
    op("xrstor",  0x19, 0, 0x11, 0x2006, 0, 0, 0x800),
    op("xsaveopt", 0x1D, 0, 0x11, 0x2006, 0, 0, 0x800),
    op("clflush", 0x12, 0, 0x11, 0x2001, 0, 0, 0x800),
    // mod == 3
    ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL,
    op("lfence", 0x12, 0, 2, 0, 0, 0, 0),
    op("mfence", 0x12, 0, 2, 0, 0, 0, 0),
    op("sfence", 0x11, 0, 2, 0, 0, 0, 0),
];

#[rustfmt::skip]
pub static GRP16: [OpcodeDef; 16] = [
    // mod < 3
    op("prefetchnta", 8, 0, 0x11, 0x2001, 0, 0, 0x800),
    op("prefetcht0",  8, 0, 0x11, 0x2001, 0, 0, 0x800),
    op("prefetcht1",  8, 0, 0x11, 0x2001, 0, 0, 0x800),
    op("prefetcht2",  8, 0, 0x11, 0x2001, 0, 0, 0x800),
    op("nop", 6, 0x1100, 0x11, 0x09, 0, 0, 0),
    op("nop", 6, 0x1100, 0x11, 0x09, 0, 0, 0),
    op("nop", 6, 0x1100, 0x11, 0x09, 0, 0, 0),
    op("nop", 6, 0x1100, 0x11, 0x09, 0, 0, 0),
    // mod == 3
    op("nop", 6, 0x1100, 0x11, 0x09, 0, 0, 0),
    op("nop", 6, 0x1100, 0x11, 0x09, 0, 0, 0),
    op("nop", 6, 0x1100, 0x11, 0x09, 0, 0, 0),
    op("nop", 6, 0x1100, 0x11, 0x09, 0, 0, 0),
    op("nop", 6, 0x1100, 0x11, 0x09, 0, 0, 0),
    op("nop", 6, 0x1100, 0x11, 0x09, 0, 0, 0),
    op("nop", 6, 0x1100, 0x11, 0x09, 0, 0, 0),
    op("nop", 6, 0x1100, 0x11, 0x09, 0, 0, 0),
];

#[rustfmt::skip]
pub static GRP17: [OpcodeDef; 8] = [
    ILLEGAL,
    op("blsr",   0x1D, 0xA1000, 0x18, 0x1009, 0x09, 0, 0),
    op("blsmsk", 0x1D, 0xA1000, 0x18, 0x1009, 0x09, 0, 0),
    op("blsi",   0x1D, 0xA1000, 0x18, 0x1009, 0x09, 0, 0),
    ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL,
];

// 40-4F: inc/dec outside 64-bit mode, REX prefix bytes in 64-bit mode. The
// prefix scanner consumes REX before map traversal, so the mode-2 entries
// exist only to keep the map total.
#[rustfmt::skip]
pub static MODE_40: [OpcodeDef; 3] = [
    op("inc", 0, 0x100, 3, 0x08, 0, 0, 0),
    op("inc", 0, 0x100, 3, 0x08, 0, 0, 0),
    pfx("rex", 0x8000),
];
#[rustfmt::skip]
pub static MODE_48: [OpcodeDef; 3] = [
    op("dec", 0, 0x100, 3, 0x08, 0, 0, 0),
    op("dec", 0, 0x100, 3, 0x08, 0, 0, 0),
    pfx("rex", 0x8000),
];

#[rustfmt::skip]
pub static MODE_63: [OpcodeDef; 3] = [
    op("arpl",   2, 0, 0x13, 0x02, 0x02, 0, 0),
    op("arpl",   2, 0, 0x13, 0x02, 0x02, 0, 0),
    op("movsxd", 0x4000, 0x1100, 0x12, 0x09, 0x03, 0, 0),
];

#[rustfmt::skip]
pub static MODE_9C: [OpcodeDef; 3] = [
    op("pushf",  0, 2, 2, 0, 0, 0, 0),
    op("pushfd", 3, 2, 2, 0, 0, 0, 0),
    op("pushfq", 0x4003, 2, 2, 0, 0, 0, 0),
];
#[rustfmt::skip]
pub static MODE_9D: [OpcodeDef; 3] = [
    op("popf",  0, 2, 2, 0, 0, 0, 0),
    op("popfd", 3, 2, 2, 0, 0, 0, 0),
    op("popfq", 0x4003, 2, 2, 0, 0, 0, 0),
];

#[rustfmt::skip]
pub static SIZE_98: [OpcodeDef; 3] = [
    op("cbw",  0, 0x100, 2, 0, 0, 0, 0),
    op("cwde", 3, 0x100, 2, 0, 0, 0, 0),
    op("cdqe", 0x4003, 0x1000, 2, 0, 0, 0, 0),
];
#[rustfmt::skip]
pub static SIZE_99: [OpcodeDef; 3] = [
    op("cwd", 0, 0x100, 2, 0, 0, 0, 0),
    op("cdq", 3, 0x100, 2, 0, 0, 0, 0),
    op("cqo", 0x4003, 0x1000, 2, 0, 0, 0, 0),
];
#[rustfmt::skip]
pub static SIZE_CF: [OpcodeDef; 3] = [
    op("iret",  0, 0x100, 2, 0, 0, 0, 0x10),
    op("iretd", 3, 0x100, 2, 0, 0, 0, 0x10),
    op("iretq", 0x4003, 0x1000, 2, 0, 0, 0, 0x10),
];

#[rustfmt::skip]
pub static ADDR_E3: [OpcodeDef; 3] = [
    op("jcxz",  0, 1, 0x42, 0x81, 0, 0, 0),
    op("jecxz", 3, 1, 0x42, 0x81, 0, 0, 0),
    op("jrcxz", 0x4003, 1, 0x42, 0x81, 0, 0, 0),
];

// 90 alone is NOP; with 66 it is xchg ax,ax; with F3 it is PAUSE.
#[rustfmt::skip]
pub static PFX_90: [OpcodeDef; 4] = [
    op("nop",  0, 0, 2, 0, 0, 0, 0x40),
    op("xchg", 0, 0x100, 1, 0xA2, 0xA2, 0, 0x40),
    op("nop",  0, 0, 2, 0, 0, 0, 0x40),
    op("pause", 8, 0, 2, 0, 0, 0, 0),
];

// ---- mandatory-prefix routers for the 0F map ----

#[rustfmt::skip]
pub static PFX_0F10: [OpcodeDef; 4] = [
    opv("movups", 0x11, 0x8D0000, 0x12, 0x251, 0x251, 0, 0, 0x0020, 0, 2),
    opv("movupd", 0x12, 0x8D8200, 0x12, 0x251, 0x251, 0, 0, 0x0020, 0, 2),
    opv("movsd",  0x12, 0x8D8800, 0x12, 0x4C, 0x4C, 0, 0, 0x0028, 0, 2),
    opv("movss",  0x11, 0x8D8400, 0x12, 0x4B, 0x4B, 0, 0, 0x0028, 0, 2),
];
#[rustfmt::skip]
pub static PFX_0F11: [OpcodeDef; 4] = [
    opv("movups", 0x11, 0x8D0000, 0x13, 0x251, 0x251, 0, 0, 0x0020, 0, 2),
    opv("movupd", 0x12, 0x8D8200, 0x13, 0x251, 0x251, 0, 0, 0x0020, 0, 2),
    opv("movsd",  0x12, 0x8D8800, 0x13, 0x4C, 0x4C, 0, 0, 0x0028, 0, 2),
    opv("movss",  0x11, 0x8D8400, 0x13, 0x4B, 0x4B, 0, 0, 0x0028, 0, 2),
];
#[rustfmt::skip]
pub static PFX_0F12: [OpcodeDef; 4] = [
    lnk(Link::ByMod(T_0F12_NONE), 0),
    op("movlpd",   0x12, 0x858200, 0x12, 0x44C, 0x204C, 0, 2),
    op("movddup",  0x13, 0x8D8800, 0x12, 0x24C, 0x24C, 0, 2),
    op("movsldup", 0x13, 0x8D8400, 0x12, 0x24B, 0x24B, 0, 2),
];
#[rustfmt::skip]
pub static MOD_0F12: [OpcodeDef; 2] = [
    op("movlps",  0x11, 0x850000, 0x12, 0x44B, 0x204B, 0, 2),
    op("movhlps", 0x11, 0x8D0000, 0x19, 0x44B, 0x144B, 0x144B, 2),
];
#[rustfmt::skip]
pub static PFX_0F16: [OpcodeDef; 4] = [
    lnk(Link::ByMod(T_0F16_NONE), 0),
    op("movhpd",   0x12, 0x858200, 0x12, 0x44C, 0x204C, 0, 2),
    ILLEGAL,
    op("movshdup", 0x13, 0x8D8400, 0x12, 0x24B, 0x24B, 0, 2),
];
#[rustfmt::skip]
pub static MOD_0F16: [OpcodeDef; 2] = [
    op("movhps",  0x11, 0x850000, 0x12, 0x44B, 0x204B, 0, 2),
    op("movlhps", 0x11, 0x8D0000, 0x19, 0x44B, 0x144B, 0x144B, 2),
];
#[rustfmt::skip]
pub static PFX_0F2A: [OpcodeDef; 4] = [
    op("cvtpi2ps", 0x11, 0,        0x12, 0x44B, 0x304, 0, 0),
    op("cvtpi2pd", 0x12, 0x200,    0x12, 0x44C, 0x304, 0, 0),
    op("cvtsi2sd", 0x12, 0x8D9800, 0x19, 0x44C, 0x44C, 0x09, 2),
    op("cvtsi2ss", 0x11, 0x8D9400, 0x19, 0x44B, 0x44B, 0x09, 2),
];
#[rustfmt::skip]
pub static PFX_0F2C: [OpcodeDef; 4] = [
    op("cvttps2pi", 0x11, 0,        0x12, 0x304, 0x44B, 0, 0),
    op("cvttpd2pi", 0x12, 0x200,    0x12, 0x304, 0x44C, 0, 0),
    op("cvttsd2si", 0x12, 0x459800, 0x12, 0x1009, 0x44C, 0, 2),
    op("cvttss2si", 0x11, 0x459400, 0x12, 0x1009, 0x44B, 0, 2),
];
#[rustfmt::skip]
pub static PFX_0F2D: [OpcodeDef; 4] = [
    op("cvtps2pi", 0x11, 0,        0x12, 0x304, 0x44B, 0, 0),
    op("cvtpd2pi", 0x12, 0x200,    0x12, 0x304, 0x44C, 0, 0),
    op("cvtsd2si", 0x12, 0x459800, 0x12, 0x1009, 0x44C, 0, 2),
    op("cvtss2si", 0x11, 0x459400, 0x12, 0x1009, 0x44B, 0, 2),
];
#[rustfmt::skip]
pub static PFX_0F5A: [OpcodeDef; 4] = [
    opv("cvtps2pd", 0x12, 0x8D0000, 0x12, 0x24C, 0xF4B, 0, 0, 0x1027, 0, 2),
    opv("cvtpd2ps", 0x12, 0x8D8200, 0x12, 0xF4B, 0x24C, 0, 0, 0x1027, 0, 2),
    op("cvtsd2ss",  0x12, 0x8D9800, 0x19, 0x44B, 0x44C, 0x44C, 2),
    op("cvtss2sd",  0x12, 0x8D9400, 0x19, 0x44C, 0x44B, 0x44B, 2),
];
#[rustfmt::skip]
pub static PFX_0F5B: [OpcodeDef; 4] = [
    opv("cvtdq2ps",  0x12, 0x8D0000, 0x12, 0x24B, 0x203, 0, 0, 0x1027, 0, 2),
    opv("cvtps2dq",  0x12, 0x8D8200, 0x12, 0x203, 0x24B, 0, 0, 0x1027, 0, 2),
    ILLEGAL,
    opv("cvttps2dq", 0x12, 0x8D8400, 0x12, 0x203, 0x24B, 0, 0, 0x1023, 0, 2),
];
#[rustfmt::skip]
pub static PFX_0F6F: [OpcodeDef; 4] = [
    op("movq",   7,    0,        0x12, 0x304, 0x304, 0, 0),
    opv("movdqa", 0x12, 0x8D8200, 0x12, 0x250, 0x250, 0, 0, 0x0020, 0, 2),
    ILLEGAL,
    opv("movdqu", 0x12, 0x8D8400, 0x12, 0x251, 0x251, 0, 0, 0x0020, 0, 2),
];
#[rustfmt::skip]
pub static PFX_0F70: [OpcodeDef; 4] = [
    op("pshufw",  8,    0,        0x52, 0x304, 0x304, 0x11, 0),
    op("pshufd",  0x12, 0x458200, 0x52, 0x250, 0x250, 0x11, 2),
    op("pshuflw", 0x12, 0x458800, 0x52, 0x250, 0x250, 0x11, 2),
    op("pshufhw", 0x12, 0x458400, 0x52, 0x250, 0x250, 0x11, 2),
];
#[rustfmt::skip]
pub static VEXL_0F77: [OpcodeDef; 5] = [
    op("emms",       7,    0,       2, 0, 0, 0, 0),
    op("vzeroupper", 0x19, 0x20000, 2, 0, 0, 0, 0),
    op("vzeroall",   0x19, 0x120000, 2, 0, 0, 0, 0),
    ILLEGAL,
    ILLEGAL,
];
#[rustfmt::skip]
pub static PFX_0F7E: [OpcodeDef; 4] = [
    op("mov",  7,    0x3000,   0x13, 0x09, 0x304, 0, 1),
    op("mov",  0x12, 0x13200,  0x13, 0x09, 0x404, 0, 3),
    ILLEGAL,
    op("movq", 0x12, 0x458400, 0x12, 0x404, 0x404, 0, 2),
];
#[rustfmt::skip]
pub static PFX_0F7F: [OpcodeDef; 4] = [
    op("movq",   7,    0,        0x13, 0x304, 0x304, 0, 0),
    opv("movdqa", 0x12, 0x8D8200, 0x13, 0x250, 0x250, 0, 0, 0x0020, 0, 2),
    ILLEGAL,
    opv("movdqu", 0x12, 0x8D8400, 0x13, 0x251, 0x251, 0, 0, 0x0020, 0, 2),
];
#[rustfmt::skip]
pub static PFX_0FB8: [OpcodeDef; 4] = [
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("popcnt", 0x16, 0x9100, 0x12, 0x09, 0x09, 0, 0),
];
#[rustfmt::skip]
pub static PFX_0FBC: [OpcodeDef; 4] = [
    op("bsf",   3,    0x1100, 0x12, 0x09, 0x09, 0, 0),
    op("bsf",   3,    0x1100, 0x12, 0x09, 0x09, 0, 0),
    ILLEGAL,
    op("tzcnt", 0x1D, 0x9100, 0x12, 0x09, 0x09, 0, 0),
];
#[rustfmt::skip]
pub static PFX_0FBD: [OpcodeDef; 4] = [
    op("bsr",   3,    0x1100, 0x12, 0x09, 0x09, 0, 0),
    op("bsr",   3,    0x1100, 0x12, 0x09, 0x09, 0, 0),
    ILLEGAL,
    op("lzcnt", 0x1D, 0x9100, 0x12, 0x09, 0x09, 0, 0),
];
#[rustfmt::skip]
pub static PFX_0FD6: [OpcodeDef; 4] = [
    ILLEGAL,
    op("movq",    0x12, 0x458200, 0x13, 0x404, 0x404, 0, 2),
    op("movdq2q", 0x12, 0x800,    0x12, 0x304, 0x1404, 0, 0),
    op("movq2dq", 0x12, 0x400,    0x12, 0x404, 0x1304, 0, 0),
];
#[rustfmt::skip]
pub static PFX_0FE6: [OpcodeDef; 4] = [
    ILLEGAL,
    op("cvttpd2dq", 0x12, 0x458200, 0x12, 0xF03, 0x24C, 0, 2),
    op("cvtpd2dq",  0x12, 0x458800, 0x12, 0xF03, 0x24C, 0, 2),
    op("cvtdq2pd",  0x12, 0x458400, 0x12, 0x24C, 0xF03, 0, 2),
];
#[rustfmt::skip]
pub static PFX_0FE7: [OpcodeDef; 4] = [
    op("movntq",  8,    0,        0x13, 0x2304, 0x304, 0, 0),
    opv("movntdq", 0x12, 0x858200, 0x13, 0x2250, 0x250, 0, 0, 0x0000, 0, 2),
    ILLEGAL,
    ILLEGAL,
];
#[rustfmt::skip]
pub static PFX_0FF7: [OpcodeDef; 4] = [
    op("maskmovq",   8,    0,        0x12, 0x1304, 0x1304, 0, 0),
    op("maskmovdqu", 0x12, 0x458200, 0x12, 0x1450, 0x1450, 0, 2),
    ILLEGAL,
    ILLEGAL,
];

#[rustfmt::skip]
pub static PREFETCH_0D: [OpcodeDef; 8] = [
    op("prefetch",  0x1001, 0, 0x11, 0x2001, 0, 0, 0x800),
    op("prefetchw", 0x1001, 0, 0x11, 0x2001, 0, 0, 0x800),
    op("prefetch",  0x1001, 0, 0x11, 0x2001, 0, 0, 0x800),
    op("prefetch",  0x1001, 0, 0x11, 0x2001, 0, 0, 0x800),
    op("prefetch",  0x1001, 0, 0x11, 0x2001, 0, 0, 0x800),
    op("prefetch",  0x1001, 0, 0x11, 0x2001, 0, 0, 0x800),
    op("prefetch",  0x1001, 0, 0x11, 0x2001, 0, 0, 0x800),
    op("prefetch",  0x1001, 0, 0x11, 0x2001, 0, 0, 0x800),
];

// Opcode-mask instructions share encodings with CMOVcc; the prefix family
// separates them. The b/w/d/q suffix is selected by 66 + VEX.W.
const fn kmask(name: &'static str) -> OpcodeDef {
    op(name, 0x20, 0xE5000, 0x19, 0x1095, 0x1095, 0x1095, 1)
}
const fn cmov(name: &'static str) -> OpcodeDef {
    op(name, 6, 0x1100, 0x12, 0x09, 0x09, 0, 0)
}

pub static KMASK_41: [OpcodeDef; 4] = [cmov("cmovno"), kmask("kand"), ILLEGAL, ILLEGAL];
pub static KMASK_42: [OpcodeDef; 4] = [cmov("cmovb"), kmask("kandn"), ILLEGAL, ILLEGAL];
pub static KMASK_44: [OpcodeDef; 4] = [
    cmov("cmove"),
    op("knot", 0x20, 0xE5000, 0x12, 0x1095, 0x1095, 0, 1),
    ILLEGAL,
    ILLEGAL,
];
pub static KMASK_45: [OpcodeDef; 4] = [cmov("cmovne"), kmask("kor"), ILLEGAL, ILLEGAL];
pub static KMASK_46: [OpcodeDef; 4] = [cmov("cmovbe"), kmask("kxnor"), ILLEGAL, ILLEGAL];
pub static KMASK_47: [OpcodeDef; 4] = [cmov("cmova"), kmask("kxor"), ILLEGAL, ILLEGAL];

// ---- 0F38 mandatory-prefix routers ----

#[rustfmt::skip]
pub static PFX_38F0: [OpcodeDef; 4] = [
    op("movbe", 0x16, 0x1100, 0x12, 0x09, 0x2009, 0, 0),
    op("movbe", 0x16, 0x1100, 0x12, 0x09, 0x2009, 0, 0),
    op("crc32", 0x16, 0x9000, 0x12, 0x1003, 0x01, 0, 0),
    ILLEGAL,
];
#[rustfmt::skip]
pub static PFX_38F1: [OpcodeDef; 4] = [
    op("movbe", 0x16, 0x1100, 0x13, 0x2009, 0x09, 0, 0),
    op("movbe", 0x16, 0x1100, 0x13, 0x2009, 0x09, 0, 0),
    op("crc32", 0x16, 0x9000, 0x12, 0x1003, 0x09, 0, 0),
    ILLEGAL,
];
#[rustfmt::skip]
pub static PFX_38F5: [OpcodeDef; 4] = [
    op("bzhi", 0x1D, 0xA1000, 0x1B, 0x1009, 0x09, 0x1009, 0),
    ILLEGAL,
    op("pdep", 0x1D, 0xA1000, 0x19, 0x1009, 0x1009, 0x09, 0),
    op("pext", 0x1D, 0xA1000, 0x19, 0x1009, 0x1009, 0x09, 0),
];
#[rustfmt::skip]
pub static PFX_38F6: [OpcodeDef; 4] = [
    ILLEGAL,
    op("adcx", 0x1D, 0x9100, 0x12, 0x1009, 0x09, 0, 0),
    op("mulx", 0x1D, 0xA1000, 0x19, 0x1009, 0x1009, 0x09, 0),
    op("adox", 0x1D, 0x9100, 0x12, 0x1009, 0x09, 0, 0),
];
#[rustfmt::skip]
pub static PFX_38F7: [OpcodeDef; 4] = [
    op("bextr", 0x1D, 0xA1000, 0x1B, 0x1009, 0x09, 0x1009, 0),
    op("shlx",  0x1D, 0xA1000, 0x1B, 0x1009, 0x09, 0x1009, 0),
    op("shrx",  0x1D, 0xA1000, 0x1B, 0x1009, 0x09, 0x1009, 0),
    op("sarx",  0x1D, 0xA1000, 0x1B, 0x1009, 0x09, 0x1009, 0),
];
