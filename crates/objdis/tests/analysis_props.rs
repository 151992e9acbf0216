//! Generated-input invariants for the full two-pass pipeline.

use objdis::{Dialect, Disassembler, ExeType, SectionKind};
use proptest::prelude::*;

fn run(bytes: &[u8], kind: SectionKind, dialect: Dialect) -> String {
    let mut dis = Disassembler::new();
    dis.init(ExeType::Object, 0);
    dis.set_dialect(dialect);
    dis.add_section(
        bytes,
        bytes.len() as u32,
        bytes.len() as u32,
        0,
        kind,
        4,
        64,
        ".text",
    );
    dis.go();
    dis.output().to_owned()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Both passes terminate on arbitrary bytes and produce a listing, even
    /// when nothing in the input decodes.
    #[test]
    fn passes_terminate_on_arbitrary_code(
        bytes in proptest::collection::vec(any::<u8>(), 1..128),
    ) {
        let out = run(&bytes, SectionKind::Code, Dialect::Nasm);
        prop_assert!(out.contains("SECTION"));
    }

    /// Unknown-kind sections go through the dubious-code reclassification
    /// path; the bounded fixpoint must still converge.
    #[test]
    fn unknown_sections_converge(
        bytes in proptest::collection::vec(any::<u8>(), 1..96),
    ) {
        let out = run(&bytes, SectionKind::Unknown, Dialect::Nasm);
        prop_assert!(!out.is_empty());
    }

    /// Emitting the same analyzed input twice yields identical listings.
    #[test]
    fn emission_is_deterministic(
        bytes in proptest::collection::vec(any::<u8>(), 1..64),
    ) {
        let a = run(&bytes, SectionKind::Code, Dialect::Nasm);
        let b = run(&bytes, SectionKind::Code, Dialect::Nasm);
        prop_assert_eq!(a, b);
    }

    /// Every dialect emits without panicking on arbitrary input.
    #[test]
    fn all_dialects_emit(
        bytes in proptest::collection::vec(any::<u8>(), 1..48),
    ) {
        for d in [Dialect::Masm, Dialect::Nasm, Dialect::Gas] {
            let out = run(&bytes, SectionKind::Code, d);
            prop_assert!(!out.is_empty());
        }
    }
}
