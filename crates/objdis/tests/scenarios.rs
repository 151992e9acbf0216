//! End-to-end disassembly scenarios over literal byte sequences.

use objdis::{Dialect, Disassembler, ExeType, Scope, SectionKind};

const REL_SELF: u32 = 0x02;

fn disasm_code(bytes: &[u8], dialect: Dialect) -> String {
    let mut dis = Disassembler::new();
    dis.init(ExeType::Object, 0);
    dis.set_dialect(dialect);
    dis.add_section(
        bytes,
        bytes.len() as u32,
        bytes.len() as u32,
        0,
        SectionKind::Code,
        4,
        64,
        ".text",
    );
    dis.go();
    dis.output().to_owned()
}

fn line_with<'a>(out: &'a str, needle: &str) -> Option<&'a str> {
    out.lines().find(|l| l.contains(needle))
}

#[test]
fn two_byte_nop_plus_mov() {
    let out = disasm_code(&[0x66, 0x90, 0x48, 0x89, 0xC3], Dialect::Nasm);
    let xchg = line_with(&out, "xchg").expect("xchg line");
    assert!(xchg.contains("ax, ax"), "{xchg}");
    let mov = line_with(&out, "mov").expect("mov line");
    assert!(mov.contains("rbx, rax"), "{mov}");
    // The xchg must come first.
    assert!(out.find("xchg").unwrap() < out.find("mov").unwrap());
}

#[test]
fn two_byte_nop_at_and_t() {
    let out = disasm_code(&[0x66, 0x90, 0x48, 0x89, 0xC3], Dialect::Gas);
    let mov = line_with(&out, "mov").expect("mov line");
    // AT&T order: source first.
    assert!(mov.contains("%rax, %rbx"), "{mov}");
}

#[test]
fn rip_relative_load_with_relocation() {
    let mut dis = Disassembler::new();
    dis.init(ExeType::Object, 0);
    dis.set_dialect(Dialect::Nasm);
    dis.add_section(
        &[0x48, 0x8B, 0x05, 0x00, 0x00, 0x00, 0x00],
        7,
        7,
        0,
        SectionKind::Code,
        4,
        64,
        ".text",
    );
    let foo = dis.add_symbol(0, 0, 0, 0, Scope::EXTERNAL, 0, Some("foo"), None);
    dis.add_relocation(1, 3, -4, REL_SELF, 4, foo, 0);
    dis.go();
    let out = dis.output();

    let mov = line_with(out, "mov").expect("mov line");
    assert!(mov.contains("rax"), "{mov}");
    assert!(mov.contains("foo"), "{mov}");
    // The displacement must resolve symbolically, never as a literal rip+0.
    assert!(!mov.contains("rip+0"), "{mov}");
    assert!(mov.contains("qword"), "{mov}");
}

#[test]
fn short_jump_forward_gets_a_label() {
    let out = disasm_code(&[0xEB, 0x02, 0xCC, 0xCC, 0x90], Dialect::Nasm);

    // The branch target at offset 4 gets an invented label, and the jump
    // refers to it by name.
    let jmp = line_with(&out, "jmp").expect("jmp line");
    assert!(jmp.contains("?_"), "{jmp}");
    let code_part = jmp.split(';').next().unwrap();
    let target = code_part.split_whitespace().last().unwrap();
    assert!(
        out.lines().any(|l| l.starts_with(&format!("{target}:"))),
        "no label line for {target}"
    );

    // The filler bytes in between emit as int3, not as an align directive.
    assert_eq!(out.matches("int3").count(), 2, "{out}");
    assert!(line_with(&out, "nop").is_some());
    assert!(!out.contains("filler"), "{out}");
}

#[test]
fn indirect_jump_table_is_followed() {
    let mut dis = Disassembler::new();
    dis.init(ExeType::Object, 0);
    dis.set_dialect(Dialect::Nasm);

    // Section A: lea rdx, [rel table]; jmp [rdx+rcx*8]; ret; ret; ret; ret
    let code = [
        0x48, 0x8D, 0x15, 0x00, 0x00, 0x00, 0x00, // lea rdx, [rip+0]
        0xFF, 0x24, 0xCA, // jmp [rdx+rcx*8]
        0xC3, 0xC3, 0xC3, 0xC3, // the four cases
    ];
    dis.add_section(&code, code.len() as u32, code.len() as u32, 0, SectionKind::Code, 4, 64, ".text");
    let data = [0u8; 32];
    dis.add_section(&data, 32, 32, 0x100, SectionKind::Data, 3, 64, ".rodata");

    let table = dis.add_symbol(2, 0, 32, 0, Scope::FILE_LOCAL, 0, Some("table"), None);
    let mut cases = Vec::new();
    for (i, off) in [10u32, 11, 12, 13].iter().enumerate() {
        let old = dis.add_symbol(
            1,
            *off,
            0,
            0,
            Scope::FILE_LOCAL,
            0,
            Some(&format!("case{i}")),
            None,
        );
        cases.push(old);
    }
    // LEA displacement targets the table.
    dis.add_relocation(1, 3, -4, REL_SELF, 4, table, 0);
    // Table entries target the case labels.
    for (i, &old) in cases.iter().enumerate() {
        dis.add_relocation(2, (i * 8) as u32, 0, REL_SELF, 8, old, 0);
    }
    dis.go();
    let out = dis.output();

    // The table data renders as qword entries naming each case.
    for i in 0..4 {
        let line = line_with(out, &format!("case{i}")).unwrap_or("");
        assert!(!line.is_empty(), "case{i} missing:\n{out}");
    }
    let dq0 = out
        .lines()
        .find(|l| l.contains("dq") && l.contains("case0"))
        .expect("dq case0 line");
    assert!(dq0.contains("jump table"), "{dq0}");

    // All four case labels appear in the code section, each before a ret.
    for i in 0..4 {
        assert!(out.contains(&format!("case{i}:")), "label case{i} missing");
    }
    assert_eq!(out.matches("ret").count(), 4, "{out}");
}

#[test]
fn evex_broadcast_operand() {
    let out = disasm_code(&[0x62, 0xF1, 0x74, 0x59, 0x58, 0x00, 0xC3], Dialect::Nasm);
    let v = line_with(&out, "vaddps").expect("vaddps line");
    assert!(v.contains("zmm0{k1}"), "{v}");
    assert!(v.contains("zmm1"), "{v}");
    assert!(v.contains("[rax]{1to16}"), "{v}");
    // Broadcast element is 4 bytes.
    assert!(v.contains("dword"), "{v}");
}

#[test]
fn illegal_opcode_recovers_at_next_byte() {
    let out = disasm_code(&[0x0F, 0xFF, 0x90], Dialect::Nasm);
    let db = line_with(&out, "db").expect("db line");
    assert!(db.contains("0FH"), "{db}");
    assert!(db.contains("0FFH"), "{db}");
    assert!(db.contains("illegal opcode"), "{db}");
    assert!(line_with(&out, "nop").is_some(), "{out}");
}

#[test]
fn masm_listing_has_segment_brackets() {
    let out = disasm_code(&[0x48, 0x89, 0xC3, 0xC3], Dialect::Masm);
    assert!(out.contains("SEGMENT"), "{out}");
    assert!(out.contains("ENDS"), "{out}");
    assert!(out.trim_end().ends_with("END"), "{out}");
    assert!(line_with(&out, "PROC").is_some(), "{out}");
    assert!(line_with(&out, "ENDP").is_some(), "{out}");
}

#[test]
fn emission_is_deterministic() {
    let bytes = [0x66, 0x90, 0x48, 0x89, 0xC3, 0xEB, 0x00, 0xC3];
    let a = disasm_code(&bytes, Dialect::Nasm);
    let b = disasm_code(&bytes, Dialect::Nasm);
    assert_eq!(a, b);
}

#[test]
fn every_global_dialect_produces_output() {
    for d in [Dialect::Masm, Dialect::Nasm, Dialect::Gas] {
        let out = disasm_code(&[0x48, 0x89, 0xC3, 0xC3], d);
        assert!(line_with(&out, "mov").is_some(), "{d:?}:\n{out}");
    }
}
