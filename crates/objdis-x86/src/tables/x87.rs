//! x87 floating-point opcode tables (D8-DF).
//!
//! Each escape byte dispatches on (mod, reg); the register forms of D9, DA,
//! DB, DE and DF need a further dispatch on rm for the no-operand opcodes.

use super::{lnk, op, Link, OpcodeDef, ILLEGAL};
use super::{T_X87_D9_2, T_X87_D9_4, T_X87_D9_5, T_X87_D9_6, T_X87_D9_7, T_X87_DA_5, T_X87_DB_4, T_X87_DE_3, T_X87_DF_4};

// Memory operand forms.
const fn fm(name: &'static str, memtype: u16) -> OpcodeDef {
    op(name, 0x100, 0, 0x11, memtype | 0x2000, 0, 0, 0)
}
// st(0) <- st(i) register forms.
const fn f0i(name: &'static str) -> OpcodeDef {
    op(name, 0x100, 0, 0x11, 0xAF, 0x1040, 0, 0)
}
// st(i) <- st(0) register forms.
const fn fi0(name: &'static str) -> OpcodeDef {
    op(name, 0x100, 0, 0x11, 0x1040, 0xAF, 0, 0)
}
// Single st(i) operand.
const fn fi(name: &'static str) -> OpcodeDef {
    op(name, 0x100, 0, 0x11, 0x1040, 0, 0, 0)
}
// No operands.
const fn f_(name: &'static str) -> OpcodeDef {
    op(name, 0x100, 0, 2, 0, 0, 0, 0)
}

#[rustfmt::skip]
pub static X87_D8: [OpcodeDef; 16] = [
    fm("fadd", 0x43), fm("fmul", 0x43), fm("fcom", 0x43), fm("fcomp", 0x43),
    fm("fsub", 0x43), fm("fsubr", 0x43), fm("fdiv", 0x43), fm("fdivr", 0x43),
    f0i("fadd"), f0i("fmul"), fi("fcom"), fi("fcomp"),
    f0i("fsub"), f0i("fsubr"), f0i("fdiv"), f0i("fdivr"),
];

#[rustfmt::skip]
pub static X87_D9: [OpcodeDef; 16] = [
    fm("fld", 0x43), ILLEGAL, fm("fst", 0x43), fm("fstp", 0x43),
    fm("fldenv", 0x06), fm("fldcw", 0x02), fm("fnstenv", 0x06), fm("fnstcw", 0x02),
    fi("fld"), fi("fxch"),
    lnk(Link::ByRm(T_X87_D9_2), 0),
    ILLEGAL,
    lnk(Link::ByRm(T_X87_D9_4), 0),
    lnk(Link::ByRm(T_X87_D9_5), 0),
    lnk(Link::ByRm(T_X87_D9_6), 0),
    lnk(Link::ByRm(T_X87_D9_7), 0),
];

#[rustfmt::skip]
pub static X87_D9_2: [OpcodeDef; 8] = [
    f_("fnop"), ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL,
];
#[rustfmt::skip]
pub static X87_D9_4: [OpcodeDef; 8] = [
    f_("fchs"), f_("fabs"), ILLEGAL, ILLEGAL, f_("ftst"), f_("fxam"), ILLEGAL, ILLEGAL,
];
#[rustfmt::skip]
pub static X87_D9_5: [OpcodeDef; 8] = [
    f_("fld1"), f_("fldl2t"), f_("fldl2e"), f_("fldpi"),
    f_("fldlg2"), f_("fldln2"), f_("fldz"), ILLEGAL,
];
#[rustfmt::skip]
pub static X87_D9_6: [OpcodeDef; 8] = [
    f_("f2xm1"), f_("fyl2x"), f_("fptan"), f_("fpatan"),
    f_("fxtract"), f_("fprem1"), f_("fdecstp"), f_("fincstp"),
];
#[rustfmt::skip]
pub static X87_D9_7: [OpcodeDef; 8] = [
    f_("fprem"), f_("fyl2xp1"), f_("fsqrt"), f_("fsincos"),
    f_("frndint"), f_("fscale"), f_("fsin"), f_("fcos"),
];

#[rustfmt::skip]
pub static X87_DA: [OpcodeDef; 16] = [
    fm("fiadd", 0x03), fm("fimul", 0x03), fm("ficom", 0x03), fm("ficomp", 0x03),
    fm("fisub", 0x03), fm("fisubr", 0x03), fm("fidiv", 0x03), fm("fidivr", 0x03),
    f0i("fcmovb"), f0i("fcmove"), f0i("fcmovbe"), f0i("fcmovu"),
    ILLEGAL,
    lnk(Link::ByRm(T_X87_DA_5), 0),
    ILLEGAL, ILLEGAL,
];

#[rustfmt::skip]
pub static X87_DA_5: [OpcodeDef; 8] = [
    ILLEGAL, f_("fucompp"), ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL,
];

#[rustfmt::skip]
pub static X87_DB: [OpcodeDef; 16] = [
    fm("fild", 0x03), fm("fisttp", 0x03), fm("fist", 0x03), fm("fistp", 0x03),
    ILLEGAL, fm("fld", 0x45), ILLEGAL, fm("fstp", 0x45),
    f0i("fcmovnb"), f0i("fcmovne"), f0i("fcmovnbe"), f0i("fcmovnu"),
    lnk(Link::ByRm(T_X87_DB_4), 0),
    f0i("fucomi"), f0i("fcomi"), ILLEGAL,
];

#[rustfmt::skip]
pub static X87_DB_4: [OpcodeDef; 8] = [
    f_("fneni"), f_("fndisi"), f_("fnclex"), f_("fninit"), f_("fsetpm"),
    ILLEGAL, ILLEGAL, ILLEGAL,
];

#[rustfmt::skip]
pub static X87_DC: [OpcodeDef; 16] = [
    fm("fadd", 0x44), fm("fmul", 0x44), fm("fcom", 0x44), fm("fcomp", 0x44),
    fm("fsub", 0x44), fm("fsubr", 0x44), fm("fdiv", 0x44), fm("fdivr", 0x44),
    fi0("fadd"), fi0("fmul"), ILLEGAL, ILLEGAL,
    fi0("fsubr"), fi0("fsub"), fi0("fdivr"), fi0("fdiv"),
];

#[rustfmt::skip]
pub static X87_DD: [OpcodeDef; 16] = [
    fm("fld", 0x44), fm("fisttp", 0x04), fm("fst", 0x44), fm("fstp", 0x44),
    fm("frstor", 0x06), ILLEGAL, fm("fnsave", 0x06), fm("fnstsw", 0x02),
    fi("ffree"), ILLEGAL, fi("fst"), fi("fstp"),
    fi("fucom"), fi("fucomp"), ILLEGAL, ILLEGAL,
];

#[rustfmt::skip]
pub static X87_DE: [OpcodeDef; 16] = [
    fm("fiadd", 0x02), fm("fimul", 0x02), fm("ficom", 0x02), fm("ficomp", 0x02),
    fm("fisub", 0x02), fm("fisubr", 0x02), fm("fidiv", 0x02), fm("fidivr", 0x02),
    fi0("faddp"), fi0("fmulp"), ILLEGAL,
    lnk(Link::ByRm(T_X87_DE_3), 0),
    fi0("fsubrp"), fi0("fsubp"), fi0("fdivrp"), fi0("fdivp"),
];

#[rustfmt::skip]
pub static X87_DE_3: [OpcodeDef; 8] = [
    ILLEGAL, f_("fcompp"), ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL,
];

#[rustfmt::skip]
pub static X87_DF: [OpcodeDef; 16] = [
    fm("fild", 0x02), fm("fisttp", 0x02), fm("fist", 0x02), fm("fistp", 0x02),
    fm("fbld", 0x05), fm("fild", 0x04), fm("fbstp", 0x05), fm("fistp", 0x04),
    fi("ffreep"), ILLEGAL, ILLEGAL, ILLEGAL,
    lnk(Link::ByRm(T_X87_DF_4), 0),
    f0i("fucomip"), f0i("fcomip"), ILLEGAL,
];

#[rustfmt::skip]
pub static X87_DF_4: [OpcodeDef; 8] = [
    op("fnstsw", 0x100, 0, 1, 0xA2, 0, 0, 0),
    ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL, ILLEGAL,
];
