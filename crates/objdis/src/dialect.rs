//! Assembly dialect selection and shared formatting helpers.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// MASM / TASM (Intel syntax, Microsoft directives).
    Masm,
    /// NASM / YASM (Intel syntax).
    #[default]
    Nasm,
    /// GNU assembler (AT&T syntax).
    Gas,
}

impl Dialect {
    /// Index used by dialect-routed opcode tables.
    pub fn index(self) -> u8 {
        match self {
            Dialect::Masm => 0,
            Dialect::Nasm => 1,
            Dialect::Gas => 2,
        }
    }

    pub fn comment_separator(self) -> &'static str {
        match self {
            Dialect::Gas => "# ",
            _ => "; ",
        }
    }

    /// The "current position" operator in address expressions.
    pub fn here_operator(self) -> &'static str {
        match self {
            Dialect::Gas => ".",
            _ => "$",
        }
    }

    pub fn is_att(self) -> bool {
        self == Dialect::Gas
    }

    /// Characters beyond `[A-Za-z0-9_]` acceptable in identifiers.
    pub fn extra_name_chars(self) -> &'static str {
        match self {
            Dialect::Masm => "?$@",
            Dialect::Nasm => "?$@.~#",
            Dialect::Gas => "$.",
        }
    }

    /// Unsigned value in the dialect's hexadecimal notation.
    /// MASM and NASM use the `0FFH` suffix form, GAS uses `0xff`.
    pub fn hex(self, value: u64) -> String {
        if self == Dialect::Gas {
            return format!("0x{value:x}");
        }
        if value < 10 {
            return format!("{value}");
        }
        let s = format!("{value:X}");
        if s.as_bytes()[0].is_ascii_digit() {
            format!("{s}H")
        } else {
            format!("0{s}H")
        }
    }

    /// Signed displacement with an explicit sign, hexadecimal magnitude.
    pub fn signed_hex(self, value: i64) -> String {
        if value < 0 {
            format!("-{}", self.hex(value.unsigned_abs()))
        } else {
            format!("+{}", self.hex(value as u64))
        }
    }

    /// Size keyword written before a memory operand, or "" when the size has
    /// no keyword in this dialect.
    pub fn size_keyword(self, bytes: u32) -> &'static str {
        match self {
            Dialect::Masm => match bytes {
                1 => "byte ptr ",
                2 => "word ptr ",
                4 => "dword ptr ",
                6 => "fword ptr ",
                8 => "qword ptr ",
                10 => "tbyte ptr ",
                16 => "xmmword ptr ",
                32 => "ymmword ptr ",
                64 => "zmmword ptr ",
                _ => "",
            },
            Dialect::Nasm => match bytes {
                1 => "byte ",
                2 => "word ",
                4 => "dword ",
                6 => "fword ",
                8 => "qword ",
                10 => "tword ",
                16 => "oword ",
                32 => "yword ",
                64 => "zword ",
                _ => "",
            },
            Dialect::Gas => "",
        }
    }

    /// Directive that defines one initialized data element of `bytes` size.
    pub fn data_directive(self, bytes: u32) -> &'static str {
        match self {
            Dialect::Gas => match bytes {
                2 => ".short",
                4 => ".int",
                8 => ".quad",
                _ => ".byte",
            },
            _ => match bytes {
                2 => "dw",
                4 => "dd",
                8 => "dq",
                10 => "dt",
                _ => "db",
            },
        }
    }

    /// AT&T mnemonic suffix letter for an operand size in bits.
    pub fn att_suffix(self, bits: u32) -> &'static str {
        match bits {
            8 => "b",
            16 => "w",
            64 => "q",
            _ => "l",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masm_hex_has_leading_zero_before_letters() {
        assert_eq!(Dialect::Masm.hex(0x0F), "0FH");
        assert_eq!(Dialect::Masm.hex(0xFF), "0FFH");
        assert_eq!(Dialect::Masm.hex(0x28), "28H");
        assert_eq!(Dialect::Masm.hex(5), "5");
        assert_eq!(Dialect::Gas.hex(0xFF), "0xff");
    }

    #[test]
    fn signed_displacement() {
        assert_eq!(Dialect::Nasm.signed_hex(-8), "-8");
        assert_eq!(Dialect::Nasm.signed_hex(0x40), "+40H");
    }
}
