//! Secondary (0F) opcode map.

use super::{lnk, op, opv, Link, OpcodeDef, ILLEGAL};
use super::{
    T_0F10, T_0F11, T_0F12, T_0F16, T_0F2A, T_0F2C, T_0F2D, T_0F38, T_0F3A, T_0F5A, T_0F5B,
    T_0F6F, T_0F70, T_0F77, T_0F7E, T_0F7F, T_0FB8, T_0FBC, T_0FBD, T_0FD6, T_0FE6, T_0FE7,
    T_0FF7, T_3DNOW,
    T_GRP12, T_GRP13, T_GRP14, T_GRP15, T_GRP16, T_GRP6, T_GRP7, T_GRP8, T_GRP9, T_KMASK_41,
    T_KMASK_42, T_KMASK_44, T_KMASK_45, T_KMASK_46, T_KMASK_47, T_PREFETCH_0D,
};

// Packed-integer MMX/SSE2 entry: 66 prefix selects xmm over mmx, VEX forms
// take vvvv, EVEX allowed where AVX-512BW/DQ defines the op.
const fn pi(name: &'static str, instset: u32) -> OpcodeDef {
    opv(name, instset, 0x8D0200, 0x19, 0x150, 0x150, 0x150, 0, 0x0020, 0, 2)
}

// Packed-float ps/pd/ss/sd family: suffix by operand-type prefix, VEX NDS,
// EVEX with broadcast + rounding + masking.
const fn ps4(name: &'static str, instset: u32, evex: u16) -> OpcodeDef {
    opv(name, instset, 0xCD0E00, 0x19, 0x24F, 0x24F, 0x24F, 0, evex, 0x1304, 3)
}

#[rustfmt::skip]
pub static MAP_0F: [OpcodeDef; 256] = {
    let mut t = [ILLEGAL; 256];
    t[0x00] = lnk(Link::ByReg(T_GRP6), 0);
    t[0x01] = lnk(Link::ByModReg(T_GRP7), 0);
    t[0x02] = op("lar",    2, 0x1100, 0x12, 0x09, 0x02, 0,    0);
    t[0x03] = op("lsl",    2, 0x1100, 0x12, 0x09, 0x02, 0,    0);
    t[0x05] = op("syscall", 0x4000, 0, 2,   0,    0,    0,    8);
    t[0x06] = op("clts",   0x802, 0,  2,    0,    0,    0,    0);
    t[0x07] = op("sysret", 0x4800, 0, 2,    0,    0,    0,    0x10);
    t[0x08] = op("invd",   0x804, 0,  2,    0,    0,    0,    0);
    t[0x09] = op("wbinvd", 0x804, 0,  2,    0,    0,    0,    0);
    t[0x0B] = op("ud2",    6, 0,      2,    0,    0,    0,    0x10);
    t[0x0D] = lnk(Link::ByReg(T_PREFETCH_0D), 0);
    t[0x0E] = op("femms",  0x1001, 0, 2,    0,    0,    0,    0);
    t[0x0F] = lnk(Link::ByImm(T_3DNOW), 0x52);
    t[0x10] = lnk(Link::ByPrefix(T_0F10), 0);
    t[0x11] = lnk(Link::ByPrefix(T_0F11), 0);
    t[0x12] = lnk(Link::ByPrefix(T_0F12), 0);
    t[0x13] = op("movlp",  0x11, 0x850200, 0x13, 0x204C, 0x44C, 0, 1);
    t[0x14] = opv("unpckl", 0x11, 0x8D0200, 0x19, 0x24F, 0x24F, 0x24F, 0, 0x1021, 0, 3);
    t[0x15] = opv("unpckh", 0x11, 0x8D0200, 0x19, 0x24F, 0x24F, 0x24F, 0, 0x1021, 0, 3);
    t[0x16] = lnk(Link::ByPrefix(T_0F16), 0);
    t[0x17] = op("movhp",  0x11, 0x850200, 0x13, 0x204C, 0x44C, 0, 1);
    t[0x18] = lnk(Link::ByModReg(T_GRP16), 0);
    t[0x19] = op("nop",    6, 0x1100,  0x11, 0x09, 0,   0,    0);
    t[0x1A] = op("nop",    6, 0x1100,  0x11, 0x09, 0,   0,    0);
    t[0x1B] = op("nop",    6, 0x1100,  0x11, 0x09, 0,   0,    0);
    t[0x1C] = op("nop",    6, 0x1100,  0x11, 0x09, 0,   0,    0);
    t[0x1D] = op("nop",    6, 0x1100,  0x11, 0x09, 0,   0,    0);
    t[0x1E] = op("nop",    6, 0x1100,  0x11, 0x09, 0,   0,    0);
    t[0x1F] = op("nop",    6, 0x1100,  0x11, 0x09, 0,   0,    0x40);
    t[0x20] = op("mov",    0x803, 0,  0x12, 0x100A, 0x92, 0,  0);
    t[0x21] = op("mov",    0x803, 0,  0x12, 0x100A, 0x93, 0,  0);
    t[0x22] = op("mov",    0x803, 0,  0x13, 0x92, 0x100A, 0,  0);
    t[0x23] = op("mov",    0x803, 0,  0x13, 0x93, 0x100A, 0,  0);
    t[0x24] = op("mov",    0x2003, 0, 0x2012, 0x1003, 0x94, 0, 0);
    t[0x26] = op("mov",    0x2003, 0, 0x2013, 0x94, 0x1003, 0, 0);
    t[0x28] = op("movap",  0x11, 0x8D0200, 0x12, 0x250, 0x250, 0, 3);
    t[0x29] = op("movap",  0x11, 0x8D0200, 0x13, 0x250, 0x250, 0, 3);
    t[0x2A] = lnk(Link::ByPrefix(T_0F2A), 0);
    t[0x2B] = op("movntp", 0x11, 0x850200, 0x13, 0x2250, 0x250, 0, 1);
    t[0x2C] = lnk(Link::ByPrefix(T_0F2C), 0);
    t[0x2D] = lnk(Link::ByPrefix(T_0F2D), 0);
    t[0x2E] = op("ucomis", 0x11, 0x851200, 0x12, 0x4F, 0x4F, 0, 3);
    t[0x2F] = op("comis",  0x11, 0x851200, 0x12, 0x4F, 0x4F, 0, 3);
    t[0x30] = op("wrmsr",  0x805, 0,  2,    0,    0,    0,    0);
    t[0x31] = op("rdtsc",  5, 0,      2,    0,    0,    0,    0);
    t[0x32] = op("rdmsr",  0x805, 0,  2,    0,    0,    0,    0);
    t[0x33] = op("rdpmc",  0x806, 0,  2,    0,    0,    0,    0);
    t[0x34] = op("sysenter", 8, 0,    2,    0,    0,    0,    8);
    t[0x35] = op("sysexit", 0x808, 0, 2,    0,    0,    0,    0x10);
    t[0x37] = op("getsec", 0x15, 0,   2,    0,    0,    0,    0);
    t[0x38] = lnk(Link::ByByte(T_0F38), 0);
    t[0x3A] = lnk(Link::ByByte(T_0F3A), 0);
    t[0x40] = op("cmovo",  6, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x41] = lnk(Link::ByPrefixFamily(T_KMASK_41), 0);
    t[0x42] = lnk(Link::ByPrefixFamily(T_KMASK_42), 0);
    t[0x43] = op("cmovae", 6, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x44] = lnk(Link::ByPrefixFamily(T_KMASK_44), 0);
    t[0x45] = lnk(Link::ByPrefixFamily(T_KMASK_45), 0);
    t[0x46] = lnk(Link::ByPrefixFamily(T_KMASK_46), 0);
    t[0x47] = lnk(Link::ByPrefixFamily(T_KMASK_47), 0);
    t[0x48] = op("cmovs",  6, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x49] = op("cmovns", 6, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x4A] = op("cmovp",  6, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x4B] = op("cmovnp", 6, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x4C] = op("cmovl",  6, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x4D] = op("cmovge", 6, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x4E] = op("cmovle", 6, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x4F] = op("cmovg",  6, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x50] = op("movmskp", 0x11, 0x450200, 0x12, 0x1003, 0x1250, 0, 3);
    t[0x51] = ps4("sqrt", 0x11, 0x1027);
    t[0x52] = op("rsqrtp", 0x11, 0x8D0600, 0x19, 0x24B, 0x24B, 0x24B, 3);
    t[0x53] = op("rcpp",   0x11, 0x8D0600, 0x19, 0x24B, 0x24B, 0x24B, 3);
    t[0x54] = opv("andp",  0x11, 0x8D0200, 0x19, 0x24F, 0x24F, 0x24F, 0, 0x1021, 0, 3);
    t[0x55] = opv("andnp", 0x11, 0x8D0200, 0x19, 0x24F, 0x24F, 0x24F, 0, 0x1021, 0, 3);
    t[0x56] = opv("orp",   0x11, 0x8D0200, 0x19, 0x24F, 0x24F, 0x24F, 0, 0x1021, 0, 3);
    t[0x57] = opv("xorp",  0x11, 0x8D0200, 0x19, 0x24F, 0x24F, 0x24F, 0, 0x1021, 0, 3);
    t[0x58] = ps4("add", 0x11, 0x1027);
    t[0x59] = ps4("mul", 0x11, 0x1027);
    t[0x5A] = lnk(Link::ByPrefix(T_0F5A), 0);
    t[0x5B] = lnk(Link::ByPrefix(T_0F5B), 0);
    t[0x5C] = ps4("sub", 0x11, 0x1027);
    t[0x5D] = ps4("min", 0x11, 0x1023);
    t[0x5E] = ps4("div", 0x11, 0x1027);
    t[0x5F] = ps4("max", 0x11, 0x1023);
    t[0x60] = pi("punpcklbw", 7);
    t[0x61] = pi("punpcklwd", 7);
    t[0x62] = pi("punpckldq", 7);
    t[0x63] = pi("packsswb", 7);
    t[0x64] = pi("pcmpgtb", 7);
    t[0x65] = pi("pcmpgtw", 7);
    t[0x66] = pi("pcmpgtd", 7);
    t[0x67] = pi("packuswb", 7);
    t[0x68] = pi("punpckhbw", 7);
    t[0x69] = pi("punpckhwd", 7);
    t[0x6A] = pi("punpckhdq", 7);
    t[0x6B] = pi("packssdw", 7);
    t[0x6C] = opv("punpcklqdq", 0x12, 0x8D8200, 0x19, 0x450, 0x450, 0x450, 0, 0x0020, 0, 2);
    t[0x6D] = opv("punpckhqdq", 0x12, 0x8D8200, 0x19, 0x450, 0x450, 0x450, 0, 0x0020, 0, 2);
    t[0x6E] = op("mov",    7, 0x13200, 0x12, 0x150, 0x09, 0,  3);
    t[0x6F] = lnk(Link::ByPrefix(T_0F6F), 0);
    t[0x70] = lnk(Link::ByPrefix(T_0F70), 0);
    t[0x71] = lnk(Link::ByReg(T_GRP12), 0);
    t[0x72] = lnk(Link::ByReg(T_GRP13), 0);
    t[0x73] = lnk(Link::ByReg(T_GRP14), 0);
    t[0x74] = pi("pcmpeqb", 7);
    t[0x75] = pi("pcmpeqw", 7);
    t[0x76] = pi("pcmpeqd", 7);
    t[0x77] = lnk(Link::ByVexL(T_0F77), 0);
    t[0x78] = op("vmread", 0x2013, 0, 0x2013, 0x0A, 0x0A, 0,  0);
    t[0x79] = op("vmwrite", 0x2013, 0, 0x2012, 0x0A, 0x0A, 0, 0);
    t[0x7C] = op("hadd",   0x13, 0x8DA200, 0x19, 0x24F, 0x24F, 0x24F, 3);
    t[0x7D] = op("hsub",   0x13, 0x8DA200, 0x19, 0x24F, 0x24F, 0x24F, 3);
    t[0x7E] = lnk(Link::ByPrefix(T_0F7E), 0);
    t[0x7F] = lnk(Link::ByPrefix(T_0F7F), 0);
    t[0x80] = op("jo",     3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x81] = op("jno",    3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x82] = op("jb",     3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x83] = op("jae",    3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x84] = op("je",     3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x85] = op("jne",    3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x86] = op("jbe",    3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x87] = op("ja",     3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x88] = op("js",     3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x89] = op("jns",    3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x8A] = op("jp",     3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x8B] = op("jnp",    3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x8C] = op("jl",     3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x8D] = op("jge",    3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x8E] = op("jle",    3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x8F] = op("jg",     3, 0x80,   0x82, 0x82, 0,    0,    0);
    t[0x90] = op("seto",   3, 0,      0x11, 0x01, 0,    0,    0);
    t[0x91] = op("setno",  3, 0,      0x11, 0x01, 0,    0,    0);
    t[0x92] = op("setb",   3, 0,      0x11, 0x01, 0,    0,    0);
    t[0x93] = op("setae",  3, 0,      0x11, 0x01, 0,    0,    0);
    t[0x94] = op("sete",   3, 0,      0x11, 0x01, 0,    0,    0);
    t[0x95] = op("setne",  3, 0,      0x11, 0x01, 0,    0,    0);
    t[0x96] = op("setbe",  3, 0,      0x11, 0x01, 0,    0,    0);
    t[0x97] = op("seta",   3, 0,      0x11, 0x01, 0,    0,    0);
    t[0x98] = op("sets",   3, 0,      0x11, 0x01, 0,    0,    0);
    t[0x99] = op("setns",  3, 0,      0x11, 0x01, 0,    0,    0);
    t[0x9A] = op("setp",   3, 0,      0x11, 0x01, 0,    0,    0);
    t[0x9B] = op("setnp",  3, 0,      0x11, 0x01, 0,    0,    0);
    t[0x9C] = op("setl",   3, 0,      0x11, 0x01, 0,    0,    0);
    t[0x9D] = op("setge",  3, 0,      0x11, 0x01, 0,    0,    0);
    t[0x9E] = op("setle",  3, 0,      0x11, 0x01, 0,    0,    0);
    t[0x9F] = op("setg",   3, 0,      0x11, 0x01, 0,    0,    0);
    t[0xA0] = op("push fs", 3, 2,     2,    0,    0,    0,    0);
    t[0xA1] = op("pop fs", 3, 2,      2,    0,    0,    0,    0);
    t[0xA2] = op("cpuid",  4, 0,      2,    0,    0,    0,    8);
    t[0xA3] = op("bt",     3, 0x1100, 0x13, 0x09, 0x09, 0,    4);
    t[0xA4] = op("shld",   3, 0x1100, 0x53, 0x09, 0x09, 0x11, 0);
    t[0xA5] = op("shld",   3, 0x1100, 0x13, 0x09, 0x09, 0xB3, 0);
    t[0xA8] = op("push gs", 3, 2,     2,    0,    0,    0,    0);
    t[0xA9] = op("pop gs", 3, 2,      2,    0,    0,    0,    0);
    t[0xAA] = op("rsm",    0x803, 0,  2,    0,    0,    0,    0);
    t[0xAB] = op("bts",    3, 0x1110, 0x13, 0x09, 0x09, 0,    0);
    t[0xAC] = op("shrd",   3, 0x1100, 0x53, 0x09, 0x09, 0x11, 0);
    t[0xAD] = op("shrd",   3, 0x1100, 0x13, 0x09, 0x09, 0xB3, 0);
    t[0xAE] = lnk(Link::ByModReg(T_GRP15), 0);
    t[0xAF] = op("imul",   3, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0xB0] = op("cmpxchg", 4, 0x10,  0x13, 0x01, 0x01, 0,    0);
    t[0xB1] = op("cmpxchg", 4, 0x1110, 0x13, 0x09, 0x09, 0,   0);
    t[0xB2] = op("lss",    3, 0x100,  0x12, 0x08, 0x200D, 0,  0);
    t[0xB3] = op("btr",    3, 0x1110, 0x13, 0x09, 0x09, 0,    0);
    t[0xB4] = op("lfs",    3, 0x100,  0x12, 0x08, 0x200D, 0,  0);
    t[0xB5] = op("lgs",    3, 0x100,  0x12, 0x08, 0x200D, 0,  0);
    t[0xB6] = op("movzx",  3, 0x1100, 0x12, 0x09, 0x01, 0,    0);
    t[0xB7] = op("movzx",  3, 0x1100, 0x12, 0x09, 0x02, 0,    0);
    t[0xB8] = lnk(Link::ByPrefix(T_0FB8), 0);
    t[0xB9] = op("ud1",    6, 0,      0x12, 0x09, 0x09, 0,    0);
    t[0xBA] = lnk(Link::ByReg(T_GRP8), 0);
    t[0xBB] = op("btc",    3, 0x1110, 0x13, 0x09, 0x09, 0,    0);
    t[0xBC] = lnk(Link::ByPrefix(T_0FBC), 0);
    t[0xBD] = lnk(Link::ByPrefix(T_0FBD), 0);
    t[0xBE] = op("movsx",  3, 0x1100, 0x12, 0x09, 0x01, 0,    0);
    t[0xBF] = op("movsx",  3, 0x1100, 0x12, 0x09, 0x02, 0,    0);
    t[0xC0] = op("xadd",   4, 0x10,   0x13, 0x01, 0x01, 0,    0);
    t[0xC1] = op("xadd",   4, 0x1110, 0x13, 0x09, 0x09, 0,    0);
    t[0xC2] = opv("cmp",   0x11, 0xCD0E00, 0x59, 0x24F, 0x24F, 0x24F, 0x11, 0x1023, 0, 3);
    t[0xC3] = op("movnti", 0x12, 0x1100, 0x13, 0x2003, 0x03, 0, 0);
    t[0xC4] = opv("pinsrw", 8, 0x8D0200, 0x59, 0x450, 0x450, 0x03, 0x11, 0x20, 0, 2);
    t[0xC5] = op("pextrw", 8, 0x450200, 0x52, 0x1003, 0x1150, 0x11, 2);
    t[0xC6] = opv("shufp", 0x11, 0x8D0200, 0x59, 0x24F, 0x24F, 0x24F, 0x11, 0x1021, 0, 3);
    t[0xC7] = lnk(Link::ByModReg(T_GRP9), 0);
    t[0xC8] = op("bswap",  4, 0x1000, 3, 0x09, 0, 0, 0);
    t[0xC9] = op("bswap",  4, 0x1000, 3, 0x09, 0, 0, 0);
    t[0xCA] = op("bswap",  4, 0x1000, 3, 0x09, 0, 0, 0);
    t[0xCB] = op("bswap",  4, 0x1000, 3, 0x09, 0, 0, 0);
    t[0xCC] = op("bswap",  4, 0x1000, 3, 0x09, 0, 0, 0);
    t[0xCD] = op("bswap",  4, 0x1000, 3, 0x09, 0, 0, 0);
    t[0xCE] = op("bswap",  4, 0x1000, 3, 0x09, 0, 0, 0);
    t[0xCF] = op("bswap",  4, 0x1000, 3, 0x09, 0, 0, 0);
    t[0xD0] = op("addsub", 0x13, 0x8DA200, 0x19, 0x24F, 0x24F, 0x24F, 3);
    t[0xD1] = pi("psrlw", 7);
    t[0xD2] = pi("psrld", 7);
    t[0xD3] = pi("psrlq", 7);
    t[0xD4] = pi("paddq", 0x12);
    t[0xD5] = pi("pmullw", 7);
    t[0xD6] = lnk(Link::ByPrefix(T_0FD6), 0);
    t[0xD7] = op("pmovmskb", 8, 0x450200, 0x12, 0x1003, 0x1150, 0, 2);
    t[0xD8] = pi("psubusb", 7);
    t[0xD9] = pi("psubusw", 7);
    t[0xDA] = pi("pminub", 8);
    t[0xDB] = pi("pand", 7);
    t[0xDC] = pi("paddusb", 7);
    t[0xDD] = pi("paddusw", 7);
    t[0xDE] = pi("pmaxub", 8);
    t[0xDF] = pi("pandn", 7);
    t[0xE0] = pi("pavgb", 8);
    t[0xE1] = pi("psraw", 7);
    t[0xE2] = pi("psrad", 7);
    t[0xE3] = pi("pavgw", 8);
    t[0xE4] = pi("pmulhuw", 8);
    t[0xE5] = pi("pmulhw", 7);
    t[0xE6] = lnk(Link::ByPrefix(T_0FE6), 0);
    t[0xE7] = lnk(Link::ByPrefix(T_0FE7), 0);
    t[0xE8] = pi("psubsb", 7);
    t[0xE9] = pi("psubsw", 7);
    t[0xEA] = pi("pminsw", 8);
    t[0xEB] = pi("por", 7);
    t[0xEC] = pi("paddsb", 7);
    t[0xED] = pi("paddsw", 7);
    t[0xEE] = pi("pmaxsw", 8);
    t[0xEF] = pi("pxor", 7);
    t[0xF0] = op("lddqu",  0x13, 0x8DA800, 0x12, 0x251, 0x2251, 0, 2);
    t[0xF1] = pi("psllw", 7);
    t[0xF2] = pi("pslld", 7);
    t[0xF3] = pi("psllq", 7);
    t[0xF4] = pi("pmuludq", 0x12);
    t[0xF5] = pi("pmaddwd", 7);
    t[0xF6] = pi("psadbw", 8);
    t[0xF7] = lnk(Link::ByPrefix(T_0FF7), 0);
    t[0xF8] = pi("psubb", 7);
    t[0xF9] = pi("psubw", 7);
    t[0xFA] = pi("psubd", 7);
    t[0xFB] = pi("psubq", 0x12);
    t[0xFC] = pi("paddb", 7);
    t[0xFD] = pi("paddw", 7);
    t[0xFE] = pi("paddd", 7);
    // 0xFF (ud0) deliberately stays illegal: it decodes as a reserved
    // opcode and is emitted as raw bytes.
    t
};
