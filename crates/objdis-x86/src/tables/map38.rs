//! Three-byte opcode maps (0F 38 and 0F 3A), the AMD 3DNow immediate map
//! and the AMD XOP maps.

use super::{lnk, op, opv, Link, OpcodeDef, ILLEGAL};
use super::{T_38F0, T_38F1, T_38F5, T_38F6, T_38F7, T_GRP17};

// SSSE3 packed-integer op: mmx or xmm by 66 prefix, VEX/EVEX widening.
const fn s3(name: &'static str) -> OpcodeDef {
    opv(name, 0x14, 0x8D0200, 0x19, 0x150, 0x150, 0x150, 0, 0x0020, 0, 2)
}
// SSE4.1 packed-integer op: 66 mandatory, xmm and up.
const fn s41(name: &'static str) -> OpcodeDef {
    opv(name, 0x15, 0x8D8200, 0x19, 0x250, 0x250, 0x250, 0, 0x0020, 0, 2)
}
// Packed sign/zero extension: half-width memory source.
const fn pmov(name: &'static str, src: u16) -> OpcodeDef {
    opv(name, 0x15, 0x8D8200, 0x12, 0x250, src, 0, 0, 0x2220, 0, 2)
}
// FMA3 packed: ps/pd suffix by VEX.W.
const fn fma(name: &'static str) -> OpcodeDef {
    opv(name, 0x1A, 0x8EB200, 0x19, 0x24F, 0x24F, 0x24F, 0, 0x1027, 0, 1)
}
// FMA3 scalar: ss/sd suffix by VEX.W.
const fn fmas(name: &'static str) -> OpcodeDef {
    opv(name, 0x1A, 0x8AB200, 0x19, 0x4F, 0x4F, 0x4F, 0, 0x002E, 0, 1)
}
// AES round op.
const fn aes(name: &'static str) -> OpcodeDef {
    op(name, 0x17, 0x8D8200, 0x19, 0x450, 0x450, 0x450, 2)
}

#[rustfmt::skip]
pub static MAP_0F38: [OpcodeDef; 256] = {
    let mut t = [ILLEGAL; 256];
    t[0x00] = s3("pshufb");
    t[0x01] = s3("phaddw");
    t[0x02] = s3("phaddd");
    t[0x03] = s3("phaddsw");
    t[0x04] = s3("pmaddubsw");
    t[0x05] = s3("phsubw");
    t[0x06] = s3("phsubd");
    t[0x07] = s3("phsubsw");
    t[0x08] = s3("psignb");
    t[0x09] = s3("psignw");
    t[0x0A] = s3("psignd");
    t[0x0B] = s3("pmulhrsw");
    t[0x0C] = op("vpermilps", 0x19, 0xAE8200, 0x19, 0x24B, 0x24B, 0x24B, 0);
    t[0x0D] = op("vpermilpd", 0x19, 0xAE8200, 0x19, 0x24C, 0x24C, 0x24C, 0);
    t[0x0E] = op("vtestps", 0x19, 0x6E8200, 0x12, 0x24B, 0x24B, 0, 4);
    t[0x0F] = op("vtestpd", 0x19, 0x6E8200, 0x12, 0x24C, 0x24C, 0, 4);
    t[0x10] = op("pblendvb", 0x15, 0x8200, 0x12, 0x450, 0x450, 0xAE, 0);
    t[0x14] = op("blendvps", 0x15, 0x8200, 0x12, 0x44B, 0x44B, 0xAE, 0);
    t[0x15] = op("blendvpd", 0x15, 0x8200, 0x12, 0x44C, 0x44C, 0xAE, 0);
    t[0x17] = op("ptest", 0x15, 0x4D8200, 0x12, 0x250, 0x250, 0, 6);
    t[0x18] = opv("vbroadcastss", 0x19, 0xEE8200, 0x12, 0x24B, 0x44B, 0, 0, 0x1020, 0, 0);
    t[0x19] = opv("vbroadcastsd", 0x19, 0xEE8200, 0x12, 0x54C, 0x44C, 0, 0, 0x1020, 0, 0);
    t[0x1A] = op("vbroadcastf128", 0x19, 0x2E8200, 0x12, 0x550, 0x2450, 0, 0);
    t[0x1C] = s3("pabsb");
    t[0x1D] = s3("pabsw");
    t[0x1E] = s3("pabsd");
    t[0x20] = pmov("pmovsxbw", 0xF01);
    t[0x21] = pmov("pmovsxbd", 0xF01);
    t[0x22] = pmov("pmovsxbq", 0xF01);
    t[0x23] = pmov("pmovsxwd", 0xF02);
    t[0x24] = pmov("pmovsxwq", 0xF02);
    t[0x25] = pmov("pmovsxdq", 0xF03);
    t[0x28] = s41("pmuldq");
    t[0x29] = s41("pcmpeqq");
    t[0x2A] = opv("movntdqa", 0x15, 0x8D8200, 0x12, 0x250, 0x2250, 0, 0, 0x0000, 0, 2);
    t[0x2B] = s41("packusdw");
    t[0x2C] = op("vmaskmovps", 0x19, 0xAE8200, 0x19, 0x24B, 0x24B, 0x224B, 0);
    t[0x2D] = op("vmaskmovpd", 0x19, 0xAE8200, 0x19, 0x24C, 0x24C, 0x224C, 0);
    t[0x2E] = op("vmaskmovps", 0x19, 0xAE8200, 0x1A, 0x224B, 0x24B, 0x24B, 0);
    t[0x2F] = op("vmaskmovpd", 0x19, 0xAE8200, 0x1A, 0x224C, 0x24C, 0x24C, 0);
    t[0x30] = pmov("pmovzxbw", 0xF01);
    t[0x31] = pmov("pmovzxbd", 0xF01);
    t[0x32] = pmov("pmovzxbq", 0xF01);
    t[0x33] = pmov("pmovzxwd", 0xF02);
    t[0x34] = pmov("pmovzxwq", 0xF02);
    t[0x35] = pmov("pmovzxdq", 0xF03);
    t[0x36] = op("vpermd", 0x1C, 0xAE8200, 0x19, 0x503, 0x503, 0x503, 0);
    t[0x37] = s41("pcmpgtq");
    t[0x38] = s41("pminsb");
    t[0x39] = s41("pminsd");
    t[0x3A] = s41("pminuw");
    t[0x3B] = s41("pminud");
    t[0x3C] = s41("pmaxsb");
    t[0x3D] = s41("pmaxsd");
    t[0x3E] = s41("pmaxuw");
    t[0x3F] = s41("pmaxud");
    t[0x40] = s41("pmulld");
    t[0x41] = op("phminposuw", 0x15, 0x8200, 0x12, 0x450, 0x450, 0, 0);
    t[0x45] = op("vpsrlv", 0x1C, 0xAFB200, 0x19, 0x250, 0x250, 0x250, 1);
    t[0x46] = op("vpsravd", 0x1C, 0xAE8200, 0x19, 0x203, 0x203, 0x203, 0);
    t[0x47] = op("vpsllv", 0x1C, 0xAFB200, 0x19, 0x250, 0x250, 0x250, 1);
    t[0x58] = opv("vpbroadcastd", 0x1C, 0xEE8200, 0x12, 0x203, 0x403, 0, 0, 0x1020, 0, 0);
    t[0x59] = opv("vpbroadcastq", 0x1C, 0xEE8200, 0x12, 0x204, 0x404, 0, 0, 0x1020, 0, 0);
    t[0x5A] = op("vbroadcasti128", 0x1C, 0x2E8200, 0x12, 0x550, 0x2450, 0, 0);
    t[0x78] = opv("vpbroadcastb", 0x1C, 0xEE8200, 0x12, 0x201, 0x401, 0, 0, 0x1020, 0, 0);
    t[0x79] = opv("vpbroadcastw", 0x1C, 0xEE8200, 0x12, 0x202, 0x402, 0, 0, 0x1020, 0, 0);
    t[0x8C] = op("vpmaskmov", 0x1C, 0xAFB200, 0x19, 0x250, 0x250, 0x2250, 1);
    t[0x8E] = op("vpmaskmov", 0x1C, 0xAFB200, 0x1A, 0x2250, 0x250, 0x250, 1);
    t[0x90] = op("vpgatherd", 0x1C, 0xAFB200, 0x1E, 0x250, 0x2250, 0x250, 1);
    t[0x91] = op("vpgatherq", 0x1C, 0xAFB200, 0x1E, 0x250, 0x2250, 0x250, 1);
    t[0x92] = op("vgatherd", 0x1C, 0xAFB200, 0x1E, 0x24F, 0x224F, 0x24F, 1);
    t[0x93] = op("vgatherq", 0x1C, 0xAFB200, 0x1E, 0x24F, 0x224F, 0x24F, 1);
    t[0x96] = fma("vfmaddsub132");
    t[0x97] = fma("vfmsubadd132");
    t[0x98] = fma("vfmadd132");
    t[0x99] = fmas("vfmadd132");
    t[0x9A] = fma("vfmsub132");
    t[0x9B] = fmas("vfmsub132");
    t[0x9C] = fma("vfnmadd132");
    t[0x9D] = fmas("vfnmadd132");
    t[0x9E] = fma("vfnmsub132");
    t[0x9F] = fmas("vfnmsub132");
    t[0xA6] = fma("vfmaddsub213");
    t[0xA7] = fma("vfmsubadd213");
    t[0xA8] = fma("vfmadd213");
    t[0xA9] = fmas("vfmadd213");
    t[0xAA] = fma("vfmsub213");
    t[0xAB] = fmas("vfmsub213");
    t[0xAC] = fma("vfnmadd213");
    t[0xAD] = fmas("vfnmadd213");
    t[0xAE] = fma("vfnmsub213");
    t[0xAF] = fmas("vfnmsub213");
    t[0xB6] = fma("vfmaddsub231");
    t[0xB7] = fma("vfmsubadd231");
    t[0xB8] = fma("vfmadd231");
    t[0xB9] = fmas("vfmadd231");
    t[0xBA] = fma("vfmsub231");
    t[0xBB] = fmas("vfmsub231");
    t[0xBC] = fma("vfnmadd231");
    t[0xBD] = fmas("vfnmadd231");
    t[0xBE] = fma("vfnmsub231");
    t[0xBF] = fmas("vfnmsub231");
    t[0xDB] = op("aesimc", 0x17, 0x8D8200, 0x12, 0x450, 0x450, 0, 2);
    t[0xDC] = aes("aesenc");
    t[0xDD] = aes("aesenclast");
    t[0xDE] = aes("aesdec");
    t[0xDF] = aes("aesdeclast");
    t[0xF0] = lnk(Link::ByPrefix(T_38F0), 0);
    t[0xF1] = lnk(Link::ByPrefix(T_38F1), 0);
    t[0xF2] = op("andn", 0x1D, 0xA1000, 0x19, 0x1009, 0x1009, 0x09, 0);
    t[0xF3] = lnk(Link::ByReg(T_GRP17), 0);
    t[0xF5] = lnk(Link::ByPrefix(T_38F5), 0);
    t[0xF6] = lnk(Link::ByPrefix(T_38F6), 0);
    t[0xF7] = lnk(Link::ByPrefix(T_38F7), 0);
    t
};

// SSE4.1 packed op with an immediate selector byte.
const fn s41i(name: &'static str, set: u32, dest: u16) -> OpcodeDef {
    op(name, set, 0x8D8200, 0x59, dest, dest, 0x11, 2)
}

#[rustfmt::skip]
pub static MAP_0F3A: [OpcodeDef; 256] = {
    let mut t = [ILLEGAL; 256];
    t[0x04] = op("vpermilps", 0x19, 0x6E8200, 0x52, 0x24B, 0x24B, 0x11, 0);
    t[0x05] = op("vpermilpd", 0x19, 0x6E8200, 0x52, 0x24C, 0x24C, 0x11, 0);
    t[0x06] = op("vperm2f128", 0x19, 0x3E8200, 0x59, 0x550, 0x550, 0x11, 0);
    t[0x08] = op("roundps", 0x15, 0x4D8200, 0x52, 0x24B, 0x24B, 0x11, 2);
    t[0x09] = op("roundpd", 0x15, 0x4D8200, 0x52, 0x24C, 0x24C, 0x11, 2);
    t[0x0A] = op("roundss", 0x15, 0x8D8200, 0x59, 0x4B, 0x4B, 0x11, 2);
    t[0x0B] = op("roundsd", 0x15, 0x8D8200, 0x59, 0x4C, 0x4C, 0x11, 2);
    t[0x0C] = s41i("blendps", 0x15, 0x24B);
    t[0x0D] = s41i("blendpd", 0x15, 0x24C);
    t[0x0E] = s41i("pblendw", 0x15, 0x250);
    t[0x0F] = op("palignr", 0x14, 0x8D0200, 0x59, 0x150, 0x150, 0x11, 2);
    t[0x14] = op("pextrb", 0x15, 0x458200, 0x53, 0x01, 0x1450, 0x11, 2);
    t[0x15] = op("pextrw", 0x15, 0x458200, 0x53, 0x02, 0x1450, 0x11, 2);
    t[0x16] = op("pextr", 0x15, 0x45B200, 0x53, 0x09, 0x1450, 0x11, 3);
    t[0x17] = op("extractps", 0x15, 0x458200, 0x53, 0x03, 0x1450, 0x11, 2);
    t[0x18] = op("vinsertf128", 0x19, 0x3E8200, 0x59, 0x550, 0x450, 0x11, 0);
    t[0x19] = op("vextractf128", 0x19, 0x3E8200, 0x53, 0x450, 0x1550, 0x11, 0);
    t[0x1D] = op("vcvtps2ph", 0x1D, 0x4D8200, 0x53, 0xF4A, 0x24B, 0x11, 0);
    t[0x20] = op("pinsrb", 0x15, 0x8D8200, 0x59, 0x450, 0x450, 0x01, 2);
    t[0x21] = op("insertps", 0x15, 0x8D8200, 0x59, 0x44B, 0x44B, 0x11, 2);
    t[0x22] = op("pinsr", 0x15, 0x8DB200, 0x59, 0x450, 0x450, 0x09, 3);
    t[0x38] = op("vinserti128", 0x1C, 0x3E8200, 0x59, 0x550, 0x450, 0x11, 0);
    t[0x39] = op("vextracti128", 0x1C, 0x3E8200, 0x53, 0x450, 0x1550, 0x11, 0);
    t[0x40] = s41i("dpps", 0x15, 0x24B);
    t[0x41] = s41i("dppd", 0x15, 0x44C);
    t[0x42] = s41i("mpsadbw", 0x15, 0x250);
    t[0x44] = op("pclmulqdq", 0x18, 0x8D8200, 0x59, 0x450, 0x450, 0x11, 2);
    t[0x46] = op("vperm2i128", 0x1C, 0x3E8200, 0x59, 0x550, 0x550, 0x11, 0);
    t[0x4A] = opv("vblendvps", 0x19, 0x6E8200, 0x1C, 0x24B, 0x24B, 0x24B, 0x24B, 0, 0, 0);
    t[0x4B] = opv("vblendvpd", 0x19, 0x6E8200, 0x1C, 0x24C, 0x24C, 0x24C, 0x24C, 0, 0, 0);
    t[0x4C] = opv("vpblendvb", 0x1C, 0x6E8200, 0x1C, 0x250, 0x250, 0x250, 0x250, 0, 0, 0);
    t[0x60] = op("pcmpestrm", 0x16, 0x458200, 0x52, 0x1450, 0x450, 0x11, 0x0A);
    t[0x61] = op("pcmpestri", 0x16, 0x458200, 0x52, 0x1450, 0x450, 0x11, 0x0A);
    t[0x62] = op("pcmpistrm", 0x16, 0x458200, 0x52, 0x1450, 0x450, 0x11, 0x0A);
    t[0x63] = op("pcmpistri", 0x16, 0x458200, 0x52, 0x1450, 0x450, 0x11, 0x0A);
    t[0xDF] = op("aeskeygenassist", 0x17, 0x458200, 0x52, 0x450, 0x450, 0x11, 2);
    t
};

// 3DNow: 0F 0F /r imm8, the immediate byte selects the operation.
const fn now3(name: &'static str) -> OpcodeDef {
    op(name, 0x1001, 0, 0x52, 0x304, 0x304, 0, 0)
}

#[rustfmt::skip]
pub static MAP_3DNOW: [OpcodeDef; 256] = {
    let mut t = [ILLEGAL; 256];
    t[0x0C] = now3("pi2fw");
    t[0x0D] = now3("pi2fd");
    t[0x1C] = now3("pf2iw");
    t[0x1D] = now3("pf2id");
    t[0x8A] = now3("pfnacc");
    t[0x8E] = now3("pfpnacc");
    t[0x90] = now3("pfcmpge");
    t[0x94] = now3("pfmin");
    t[0x96] = now3("pfrcp");
    t[0x97] = now3("pfrsqrt");
    t[0x9A] = now3("pfsub");
    t[0x9E] = now3("pfadd");
    t[0xA0] = now3("pfcmpgt");
    t[0xA4] = now3("pfmax");
    t[0xA6] = now3("pfrcpit1");
    t[0xA7] = now3("pfrsqit1");
    t[0xAA] = now3("pfsubr");
    t[0xAE] = now3("pfacc");
    t[0xB0] = now3("pfcmpeq");
    t[0xB4] = now3("pfmul");
    t[0xB6] = now3("pfrcpit2");
    t[0xB7] = now3("pmulhrw");
    t[0xBB] = now3("pswapd");
    t[0xBF] = now3("pavgusb");
    t
};

// AMD XOP four-operand multiply-accumulate.
const fn xmac(name: &'static str) -> OpcodeDef {
    op(name, 0x1005, 0xA0000, 0x1C, 0x450, 0x450, 0x450, 0)
}

#[rustfmt::skip]
pub static MAP_XOP8: [OpcodeDef; 256] = {
    let mut t = [ILLEGAL; 256];
    t[0x85] = xmac("vpmacssww");
    t[0x86] = xmac("vpmacsswd");
    t[0x87] = xmac("vpmacssdql");
    t[0x8E] = xmac("vpmacssdd");
    t[0x8F] = xmac("vpmacssdqh");
    t[0x95] = xmac("vpmacsww");
    t[0x96] = xmac("vpmacswd");
    t[0x97] = xmac("vpmacsdql");
    t[0x9E] = xmac("vpmacsdd");
    t[0x9F] = xmac("vpmacsdqh");
    t[0xA6] = xmac("vpmadcsswd");
    t[0xB6] = xmac("vpmadcswd");
    t[0xC0] = op("vprotb", 0x1005, 0x20000, 0x52, 0x450, 0x450, 0x11, 0);
    t[0xC1] = op("vprotw", 0x1005, 0x20000, 0x52, 0x450, 0x450, 0x11, 0);
    t[0xC2] = op("vprotd", 0x1005, 0x20000, 0x52, 0x450, 0x450, 0x11, 0);
    t[0xC3] = op("vprotq", 0x1005, 0x20000, 0x52, 0x450, 0x450, 0x11, 0);
    t
};

#[rustfmt::skip]
pub static MAP_XOP9: [OpcodeDef; 256] = {
    let mut t = [ILLEGAL; 256];
    t[0x80] = op("vfrczps", 0x1005, 0x60000, 0x12, 0x24B, 0x24B, 0, 0);
    t[0x81] = op("vfrczpd", 0x1005, 0x60000, 0x12, 0x24C, 0x24C, 0, 0);
    t[0x82] = op("vfrczss", 0x1005, 0x20000, 0x12, 0x44B, 0x44B, 0, 0);
    t[0x83] = op("vfrczsd", 0x1005, 0x20000, 0x12, 0x44C, 0x44C, 0, 0);
    t[0x90] = op("vprotb", 0x1005, 0xA0000, 0x1B, 0x450, 0x450, 0x450, 0);
    t[0x91] = op("vprotw", 0x1005, 0xA0000, 0x1B, 0x450, 0x450, 0x450, 0);
    t[0x92] = op("vprotd", 0x1005, 0xA0000, 0x1B, 0x450, 0x450, 0x450, 0);
    t[0x93] = op("vprotq", 0x1005, 0xA0000, 0x1B, 0x450, 0x450, 0x450, 0);
    t
};

#[rustfmt::skip]
pub static MAP_XOPA: [OpcodeDef; 256] = {
    let mut t = [ILLEGAL; 256];
    t[0x10] = op("bextr", 0x1007, 0x20000, 0x92, 0x09, 0x09, 0x13, 0);
    t
};
