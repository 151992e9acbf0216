//! Primary (one-byte) opcode map.

use super::{lnk, op, pfx, Link, OpcodeDef, ILLEGAL};
use super::{
    T_0F, T_ADDR_E3, T_GRP11_C6, T_GRP11_C7, T_GRP1A, T_GRP1_80, T_GRP1_81, T_GRP1_82, T_GRP1_83,
    T_GRP2_C0, T_GRP2_C1, T_GRP2_D0, T_GRP2_D1, T_GRP2_D2, T_GRP2_D3, T_GRP3_F6, T_GRP3_F7,
    T_GRP4, T_GRP5, T_MODE_40, T_MODE_48, T_MODE_63, T_MODE_9C, T_MODE_9D, T_PFX_90, T_SIZE_98,
    T_SIZE_99, T_SIZE_CF, T_X87_D8, T_X87_D9, T_X87_DA, T_X87_DB, T_X87_DC, T_X87_DD, T_X87_DE,
    T_X87_DF,
};

#[rustfmt::skip]
pub static MAP0: [OpcodeDef; 256] = {
    let mut t = [ILLEGAL; 256];
    t[0x00] = op("add",    0, 0x10,   0x13, 0x01, 0x01, 0,    0);
    t[0x01] = op("add",    0, 0x1110, 0x13, 0x09, 0x09, 0,    0);
    t[0x02] = op("add",    0, 0,      0x12, 0x01, 0x01, 0,    0);
    t[0x03] = op("add",    0, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x04] = op("add",    0, 0,      0x41, 0xA1, 0x21, 0,    0);
    t[0x05] = op("add",    0, 0x1100, 0x81, 0xA9, 0x29, 0,    0);
    t[0x06] = op("push es", 0x8000, 2, 2,   0,    0,    0,    0);
    t[0x07] = op("pop es",  0x8000, 2, 2,   0,    0,    0,    0);
    t[0x08] = op("or",     0, 0x10,   0x13, 0x01, 0x01, 0,    0);
    t[0x09] = op("or",     0, 0x1110, 0x13, 0x09, 0x09, 0,    0);
    t[0x0A] = op("or",     0, 0,      0x12, 0x01, 0x01, 0,    0);
    t[0x0B] = op("or",     0, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x0C] = op("or",     0, 0,      0x41, 0xA1, 0x11, 0,    0);
    t[0x0D] = op("or",     0, 0x1100, 0x81, 0xA9, 0x19, 0,    0);
    t[0x0E] = op("push cs", 0x8000, 2, 2,   0,    0,    0,    0);
    t[0x0F] = lnk(Link::ByByte(T_0F), 0);
    t[0x10] = op("adc",    0, 0x10,   0x13, 0x01, 0x01, 0,    0);
    t[0x11] = op("adc",    0, 0x1110, 0x13, 0x09, 0x09, 0,    0);
    t[0x12] = op("adc",    0, 0,      0x12, 0x01, 0x01, 0,    0);
    t[0x13] = op("adc",    0, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x14] = op("adc",    0, 0,      0x41, 0xA1, 0x21, 0,    0);
    t[0x15] = op("adc",    0, 0x1100, 0x81, 0xA9, 0x29, 0,    0);
    t[0x16] = op("push ss", 0x8000, 2, 2,   0,    0,    0,    0);
    t[0x17] = op("pop ss",  0x8000, 2, 2,   0,    0,    0,    0);
    t[0x18] = op("sbb",    0, 0x10,   0x13, 0x01, 0x01, 0,    0);
    t[0x19] = op("sbb",    0, 0x1110, 0x13, 0x09, 0x09, 0,    0);
    t[0x1A] = op("sbb",    0, 0,      0x12, 0x01, 0x01, 0,    0);
    t[0x1B] = op("sbb",    0, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x1C] = op("sbb",    0, 0,      0x41, 0xA1, 0x21, 0,    0);
    t[0x1D] = op("sbb",    0, 0x1100, 0x81, 0xA9, 0x29, 0,    0);
    t[0x1E] = op("push ds", 0x8000, 2, 2,   0,    0,    0,    0);
    t[0x1F] = op("pop ds",  0x8000, 2, 2,   0,    0,    0,    0);
    t[0x20] = op("and",    0, 0x10,   0x13, 0x01, 0x01, 0,    0);
    t[0x21] = op("and",    0, 0x1110, 0x13, 0x09, 0x09, 0,    0);
    t[0x22] = op("and",    0, 0,      0x12, 0x01, 0x01, 0,    0);
    t[0x23] = op("and",    0, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x24] = op("and",    0, 0,      0x41, 0xA1, 0x11, 0,    0);
    t[0x25] = op("and",    0, 0x1100, 0x81, 0xA9, 0x19, 0,    0);
    t[0x26] = pfx("es:", 0x8001);
    t[0x27] = op("daa",    0x8000, 0, 2,    0,    0,    0,    0);
    t[0x28] = op("sub",    0, 0x10,   0x13, 0x01, 0x01, 0,    0);
    t[0x29] = op("sub",    0, 0x1110, 0x13, 0x09, 0x09, 0,    0);
    t[0x2A] = op("sub",    0, 0,      0x12, 0x01, 0x01, 0,    0);
    t[0x2B] = op("sub",    0, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x2C] = op("sub",    0, 0,      0x41, 0xA1, 0x21, 0,    0);
    t[0x2D] = op("sub",    0, 0x1100, 0x81, 0xA9, 0x29, 0,    0);
    t[0x2E] = pfx("cs:", 0x8001);
    t[0x2F] = op("das",    0x8000, 0, 2,    0,    0,    0,    0);
    t[0x30] = op("xor",    0, 0x10,   0x13, 0x01, 0x01, 0,    0);
    t[0x31] = op("xor",    0, 0x1110, 0x13, 0x09, 0x09, 0,    0);
    t[0x32] = op("xor",    0, 0,      0x12, 0x01, 0x01, 0,    0);
    t[0x33] = op("xor",    0, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x34] = op("xor",    0, 0,      0x41, 0xA1, 0x11, 0,    0);
    t[0x35] = op("xor",    0, 0x1100, 0x81, 0xA9, 0x19, 0,    0);
    t[0x36] = pfx("ss:", 0x8001);
    t[0x37] = op("aaa",    0x8000, 0, 2,    0,    0,    0,    0);
    t[0x38] = op("cmp",    0, 0,      0x13, 0x01, 0x01, 0,    4);
    t[0x39] = op("cmp",    0, 0x1100, 0x13, 0x09, 0x09, 0,    4);
    t[0x3A] = op("cmp",    0, 0,      0x12, 0x01, 0x01, 0,    4);
    t[0x3B] = op("cmp",    0, 0x1100, 0x12, 0x09, 0x09, 0,    4);
    t[0x3C] = op("cmp",    0, 0,      0x41, 0xA1, 0x21, 0,    4);
    t[0x3D] = op("cmp",    0, 0x1100, 0x81, 0xA9, 0x29, 0,    4);
    t[0x3E] = pfx("ds:", 0x8001);
    t[0x3F] = op("aas",    0x8000, 0, 2,    0,    0,    0,    0);
    // 40-4F: inc/dec in 16/32-bit mode, REX prefixes in 64-bit mode.
    let mut i = 0x40;
    while i < 0x48 {
        t[i] = lnk(Link::ByMode(T_MODE_40), 0);
        i += 1;
    }
    while i < 0x50 {
        t[i] = lnk(Link::ByMode(T_MODE_48), 0);
        i += 1;
    }
    t[0x50] = op("push",   0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x51] = op("push",   0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x52] = op("push",   0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x53] = op("push",   0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x54] = op("push",   0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x55] = op("push",   0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x56] = op("push",   0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x57] = op("push",   0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x58] = op("pop",    0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x59] = op("pop",    0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x5A] = op("pop",    0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x5B] = op("pop",    0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x5C] = op("pop",    0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x5D] = op("pop",    0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x5E] = op("pop",    0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x5F] = op("pop",    0, 0x102,  3,    0x0A, 0,    0,    0);
    t[0x60] = op("pusha",  0x8001, 0x102, 2, 0,   0,    0,    0);
    t[0x61] = op("popa",   0x8001, 0x102, 2, 0,   0,    0,    0);
    t[0x62] = op("bound",  0x8001, 0x100, 0x12, 0x08, 0x2006, 0, 0);
    t[0x63] = lnk(Link::ByMode(T_MODE_63), 0);
    t[0x64] = pfx("fs:", 0x8001);
    t[0x65] = pfx("gs:", 0x8001);
    t[0x66] = pfx("66", 0x8000);
    t[0x67] = pfx("67", 0x8000);
    t[0x68] = op("push",   1, 0x102,  0x82, 0,    0x29, 0,    0);
    t[0x69] = op("imul",   1, 0x1100, 0x92, 0x09, 0x09, 0x29, 0);
    t[0x6A] = op("push",   1, 0x102,  0x42, 0,    0x21, 0,    0);
    t[0x6B] = op("imul",   1, 0x1100, 0x52, 0x09, 0x09, 0x21, 0);
    t[0x6C] = op("insb",   1, 0x21,   2,    0,    0,    0,    0);
    t[0x6D] = op("ins",    1, 0x121,  2,    0,    0,    0,    1);
    t[0x6E] = op("outsb",  1, 0x21,   2,    0,    0,    0,    0);
    t[0x6F] = op("outs",   1, 0x121,  2,    0,    0,    0,    1);
    t[0x70] = op("jo",     0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x71] = op("jno",    0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x72] = op("jb",     0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x73] = op("jae",    0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x74] = op("je",     0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x75] = op("jne",    0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x76] = op("jbe",    0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x77] = op("ja",     0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x78] = op("js",     0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x79] = op("jns",    0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x7A] = op("jp",     0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x7B] = op("jnp",    0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x7C] = op("jl",     0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x7D] = op("jge",    0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x7E] = op("jle",    0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x7F] = op("jg",     0, 0x80,   0x42, 0x81, 0,    0,    0);
    t[0x80] = lnk(Link::ByReg(T_GRP1_80), 0);
    t[0x81] = lnk(Link::ByReg(T_GRP1_81), 0);
    t[0x82] = lnk(Link::ByReg(T_GRP1_82), 0);
    t[0x83] = lnk(Link::ByReg(T_GRP1_83), 0);
    t[0x84] = op("test",   0, 0,      0x13, 0x01, 0x01, 0,    4);
    t[0x85] = op("test",   0, 0x1100, 0x13, 0x09, 0x09, 0,    4);
    t[0x86] = op("xchg",   0, 0x10,   0x13, 0x01, 0x01, 0,    0);
    t[0x87] = op("xchg",   0, 0x1110, 0x13, 0x09, 0x09, 0,    0);
    t[0x88] = op("mov",    0, 0,      0x13, 0x01, 0x01, 0,    0);
    t[0x89] = op("mov",    0, 0x1100, 0x13, 0x09, 0x09, 0,    0);
    t[0x8A] = op("mov",    0, 0,      0x12, 0x01, 0x01, 0,    0);
    t[0x8B] = op("mov",    0, 0x1100, 0x12, 0x09, 0x09, 0,    0);
    t[0x8C] = op("mov",    0, 0x1100, 0x13, 0x09, 0x91, 0,    0);
    t[0x8D] = op("lea",    0, 0x1100, 0x12, 0x09, 0x2006, 0,  0x800);
    t[0x8E] = op("mov",    0, 0,      0x12, 0x91, 0x02, 0,    0);
    t[0x8F] = lnk(Link::ByReg(T_GRP1A), 0);
    t[0x90] = lnk(Link::ByPrefix(T_PFX_90), 0);
    t[0x91] = op("xchg",   0, 0x1100, 3,    0xA9, 0x09, 0,    0);
    t[0x92] = op("xchg",   0, 0x1100, 3,    0xA9, 0x09, 0,    0);
    t[0x93] = op("xchg",   0, 0x1100, 3,    0xA9, 0x09, 0,    0);
    t[0x94] = op("xchg",   0, 0x1100, 3,    0xA9, 0x09, 0,    0);
    t[0x95] = op("xchg",   0, 0x1100, 3,    0xA9, 0x09, 0,    0);
    t[0x96] = op("xchg",   0, 0x1100, 3,    0xA9, 0x09, 0,    0);
    t[0x97] = op("xchg",   0, 0x1100, 3,    0xA9, 0x09, 0,    0);
    t[0x98] = lnk(Link::ByOpSize(T_SIZE_98), 0);
    t[0x99] = lnk(Link::ByOpSize(T_SIZE_99), 0);
    t[0x9A] = op("call",   0x8000, 0, 0x202, 0x85, 0,   0,    8);
    t[0x9B] = op("fwait",  0x100, 0,  2,    0,    0,    0,    0);
    t[0x9C] = lnk(Link::ByMode(T_MODE_9C), 0);
    t[0x9D] = lnk(Link::ByMode(T_MODE_9D), 0);
    t[0x9E] = op("sahf",   0, 0,      2,    0,    0,    0,    0);
    t[0x9F] = op("lahf",   0, 0,      2,    0,    0,    0,    0);
    t[0xA0] = op("mov",    0, 4,      0x401, 0xA1, 0x01, 0,   0);
    t[0xA1] = op("mov",    0, 0x1104, 0x401, 0xA9, 0x09, 0,   0);
    t[0xA2] = op("mov",    0, 4,      0x401, 0x01, 0xA1, 0,   0);
    t[0xA3] = op("mov",    0, 0x1104, 0x401, 0x09, 0xA9, 0,   0);
    t[0xA4] = op("movsb",  0, 0x25,   2,    0,    0,    0,    0);
    t[0xA5] = op("movs",   0, 0x1125, 2,    0,    0,    0,    1);
    t[0xA6] = op("cmpsb",  0, 0x45,   2,    0,    0,    0,    0);
    t[0xA7] = op("cmps",   0, 0x1145, 2,    0,    0,    0,    1);
    t[0xA8] = op("test",   0, 0,      0x41, 0xA1, 0x11, 0,    4);
    t[0xA9] = op("test",   0, 0x1100, 0x81, 0xA9, 0x19, 0,    4);
    t[0xAA] = op("stosb",  0, 0x25,   2,    0,    0,    0,    0);
    t[0xAB] = op("stos",   0, 0x1125, 2,    0,    0,    0,    1);
    t[0xAC] = op("lodsb",  0, 0x25,   2,    0,    0,    0,    0);
    t[0xAD] = op("lods",   0, 0x1125, 2,    0,    0,    0,    1);
    t[0xAE] = op("scasb",  0, 0x45,   2,    0,    0,    0,    0);
    t[0xAF] = op("scas",   0, 0x1145, 2,    0,    0,    0,    1);
    t[0xB0] = op("mov",    0, 0,      0x43, 0x01, 0x11, 0,    0);
    t[0xB1] = op("mov",    0, 0,      0x43, 0x01, 0x11, 0,    0);
    t[0xB2] = op("mov",    0, 0,      0x43, 0x01, 0x11, 0,    0);
    t[0xB3] = op("mov",    0, 0,      0x43, 0x01, 0x11, 0,    0);
    t[0xB4] = op("mov",    0, 0,      0x43, 0x01, 0x11, 0,    0);
    t[0xB5] = op("mov",    0, 0,      0x43, 0x01, 0x11, 0,    0);
    t[0xB6] = op("mov",    0, 0,      0x43, 0x01, 0x11, 0,    0);
    t[0xB7] = op("mov",    0, 0,      0x43, 0x01, 0x11, 0,    0);
    t[0xB8] = op("mov",    0, 0x1100, 0x103, 0x09, 0x39, 0,   0);
    t[0xB9] = op("mov",    0, 0x1100, 0x103, 0x09, 0x39, 0,   0);
    t[0xBA] = op("mov",    0, 0x1100, 0x103, 0x09, 0x39, 0,   0);
    t[0xBB] = op("mov",    0, 0x1100, 0x103, 0x09, 0x39, 0,   0);
    t[0xBC] = op("mov",    0, 0x1100, 0x103, 0x09, 0x39, 0,   0);
    t[0xBD] = op("mov",    0, 0x1100, 0x103, 0x09, 0x39, 0,   0);
    t[0xBE] = op("mov",    0, 0x1100, 0x103, 0x09, 0x39, 0,   0);
    t[0xBF] = op("mov",    0, 0x1100, 0x103, 0x09, 0x39, 0,   0);
    t[0xC0] = lnk(Link::ByReg(T_GRP2_C0), 0);
    t[0xC1] = lnk(Link::ByReg(T_GRP2_C1), 0);
    t[0xC2] = op("ret",    0, 2,      0x22, 0,    0x12, 0,    0x10);
    t[0xC3] = op("ret",    0, 2,      2,    0,    0,    0,    0x10);
    t[0xC4] = op("les",    0x8000, 0x100, 0x12, 0x08, 0x200D, 0, 0);
    t[0xC5] = op("lds",    0x8000, 0x100, 0x12, 0x08, 0x200D, 0, 0);
    t[0xC6] = lnk(Link::ByReg(T_GRP11_C6), 0);
    t[0xC7] = lnk(Link::ByReg(T_GRP11_C7), 0);
    t[0xC8] = op("enter",  1, 2,      0x62, 0,    0x12, 0x11, 0);
    t[0xC9] = op("leave",  1, 2,      2,    0,    0,    0,    0);
    t[0xCA] = op("retf",   0, 2,      0x22, 0,    0x12, 0,    0x10);
    t[0xCB] = op("retf",   0, 2,      2,    0,    0,    0,    0x10);
    t[0xCC] = op("int3",   0, 0,      2,    0,    0,    0,    0x40);
    t[0xCD] = op("int",    0, 0,      0x42, 0,    0x31, 0,    8);
    t[0xCE] = op("into",   0x8000, 0, 2,    0,    0,    0,    0);
    t[0xCF] = lnk(Link::ByOpSize(T_SIZE_CF), 0);
    t[0xD0] = lnk(Link::ByReg(T_GRP2_D0), 0);
    t[0xD1] = lnk(Link::ByReg(T_GRP2_D1), 0);
    t[0xD2] = lnk(Link::ByReg(T_GRP2_D2), 0);
    t[0xD3] = lnk(Link::ByReg(T_GRP2_D3), 0);
    t[0xD4] = op("aam",    0x8000, 0, 0x42, 0,    0x31, 0,    0);
    t[0xD5] = op("aad",    0x8000, 0, 0x42, 0,    0x31, 0,    0);
    t[0xD6] = op("salc",   0x8000, 0, 0x4002, 0,  0,    0,    0);
    t[0xD7] = op("xlatb",  0, 5,      1,    0,    0xC0, 0,    0x800);
    t[0xD8] = lnk(Link::ByModReg(T_X87_D8), 0);
    t[0xD9] = lnk(Link::ByModReg(T_X87_D9), 0);
    t[0xDA] = lnk(Link::ByModReg(T_X87_DA), 0);
    t[0xDB] = lnk(Link::ByModReg(T_X87_DB), 0);
    t[0xDC] = lnk(Link::ByModReg(T_X87_DC), 0);
    t[0xDD] = lnk(Link::ByModReg(T_X87_DD), 0);
    t[0xDE] = lnk(Link::ByModReg(T_X87_DE), 0);
    t[0xDF] = lnk(Link::ByModReg(T_X87_DF), 0);
    t[0xE0] = op("loopne", 0, 1,      0x42, 0x81, 0,    0,    0);
    t[0xE1] = op("loope",  0, 1,      0x42, 0x81, 0,    0,    0);
    t[0xE2] = op("loop",   0, 1,      0x42, 0x81, 0,    0,    0);
    t[0xE3] = lnk(Link::ByAddrSize(T_ADDR_E3), 0);
    t[0xE4] = op("in",     0, 0,      0x41, 0xA1, 0x31, 0,    0);
    t[0xE5] = op("in",     0, 0x100,  0x41, 0xA8, 0x31, 0,    0);
    t[0xE6] = op("out",    0, 0,      0x41, 0x31, 0xA1, 0,    0);
    t[0xE7] = op("out",    0, 0x100,  0x41, 0x31, 0xA8, 0,    0);
    t[0xE8] = op("call",   0, 0x80,   0x82, 0x83, 0,    0,    8);
    t[0xE9] = op("jmp",    0, 0x80,   0x82, 0x82, 0,    0,    0x10);
    t[0xEA] = op("jmp",    0x8000, 0, 0x202, 0x84, 0,   0,    0x10);
    t[0xEB] = op("jmp",    0, 0x80,   0x42, 0x81, 0,    0,    0x10);
    t[0xEC] = op("in",     0, 0,      1,    0xA1, 0xB2, 0,    0);
    t[0xED] = op("in",     0, 0x100,  1,    0xA8, 0xB2, 0,    0);
    t[0xEE] = op("out",    0, 0,      1,    0xB2, 0xA1, 0,    0);
    t[0xEF] = op("out",    0, 0x100,  1,    0xB2, 0xA8, 0,    0);
    t[0xF0] = pfx("lock", 0x8000);
    t[0xF1] = op("icebp",  0, 0,      0x4002, 0,  0,    0,    0);
    t[0xF2] = pfx("repne", 0x8000);
    t[0xF3] = pfx("rep", 0x8000);
    t[0xF4] = op("hlt",    0x800, 0,  2,    0,    0,    0,    0);
    t[0xF5] = op("cmc",    0, 0,      2,    0,    0,    0,    0);
    t[0xF6] = lnk(Link::ByReg(T_GRP3_F6), 0);
    t[0xF7] = lnk(Link::ByReg(T_GRP3_F7), 0);
    t[0xF8] = op("clc",    0, 0,      2,    0,    0,    0,    0);
    t[0xF9] = op("stc",    0, 0,      2,    0,    0,    0,    0);
    t[0xFA] = op("cli",    0x800, 0,  2,    0,    0,    0,    0);
    t[0xFB] = op("sti",    0x800, 0,  2,    0,    0,    0,    0);
    t[0xFC] = op("cld",    0, 0,      2,    0,    0,    0,    0);
    t[0xFD] = op("std",    0, 0,      2,    0,    0,    0,    0);
    t[0xFE] = lnk(Link::ByReg(T_GRP4), 0);
    t[0xFF] = lnk(Link::ByReg(T_GRP5), 0);
    t
};
