//! Generated-input invariants for the decoder.

use objdis_x86::decoder::{Decoder, MAX_INSTRUCTION_LEN};
use objdis_x86::Errors;
use proptest::prelude::*;

proptest! {
    /// For any byte sequence and any starting offset, the decoder either
    /// advances the cursor or reports a truncation error at the section end.
    #[test]
    fn decode_always_makes_progress(
        bytes in proptest::collection::vec(any::<u8>(), 1..64),
        mode in prop_oneof![Just(16u32), Just(32u32), Just(64u32)],
    ) {
        let dec = Decoder::new(&bytes, mode);
        let mut pos = 0u32;
        while (pos as usize) < bytes.len() {
            let d = dec.decode(pos);
            if d.end > pos {
                prop_assert!(d.end as usize <= bytes.len());
                pos = d.end;
            } else {
                // No progress is only permitted for a truncated tail.
                prop_assert!(d.errors.contains(Errors::TRUNCATED));
                break;
            }
        }
    }

    /// Decoded instructions never exceed the coverage of the input and the
    /// field offsets stay inside the instruction.
    #[test]
    fn decoded_fields_stay_in_bounds(
        bytes in proptest::collection::vec(any::<u8>(), 1..64),
    ) {
        let dec = Decoder::new(&bytes, 64);
        let mut pos = 0u32;
        while (pos as usize) < bytes.len() {
            let d = dec.decode(pos);
            if d.end <= pos {
                break;
            }
            if d.address_field_size > 0 && !d.errors.contains(Errors::TRUNCATED) {
                prop_assert!(d.address_field >= d.begin);
                prop_assert!(d.address_field + d.address_field_size <= d.end);
            }
            if d.immediate_field_size > 0 && !d.errors.contains(Errors::TRUNCATED) {
                prop_assert!(d.immediate_field >= d.begin);
                prop_assert!(d.immediate_field + d.immediate_field_size <= d.end);
            }
            pos = d.end;
        }
    }

    /// No decode claims more than the architectural length limit plus the
    /// truncation that the section boundary forces.
    #[test]
    fn length_is_bounded(bytes in proptest::collection::vec(any::<u8>(), 1..64)) {
        let dec = Decoder::new(&bytes, 64);
        let mut pos = 0u32;
        while (pos as usize) < bytes.len() {
            let d = dec.decode(pos);
            if d.end <= pos {
                break;
            }
            if !d.errors.contains(Errors::TOO_LONG) {
                prop_assert!(d.end - d.begin <= MAX_INSTRUCTION_LEN);
            }
            pos = d.end;
        }
    }
}
