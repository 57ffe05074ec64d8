use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;

use crate::{CodepageTable, SUBSTITUTE, sequence::ESC};

/// Property: encoding writes exactly one byte per character.
#[quickcheck_macros::quickcheck]
fn one_byte_per_char(text: String) -> bool {
    CodepageTable::cp437().encode(&text).len() == text.chars().count()
}

/// Property: characters without a byte become `?`, everything else keeps its
/// identity.
#[quickcheck_macros::quickcheck]
fn substitution_only_for_unmappable(ch: char) -> bool {
    let table = CodepageTable::cp437();
    let byte = table.encode_char_lossy(ch);
    let mappable = table.encode_char(ch).is_some() || u32::from(ch) <= 0xFF;
    mappable || byte == SUBSTITUTE
}

/// Property: text drawn from the table survives encode then decode.
#[test]
fn glyph_text_round_trips_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(picks: Vec<u8>) -> bool {
        let table = CodepageTable::cp437();
        // Skip the glyph that encodes to ESC; decoding would read it as the
        // start of a sequence.
        let text: String = picks
            .iter()
            .map(|&b| table.decode_byte(b))
            .filter(|&ch| table.encode_char_lossy(ch) != ESC)
            .collect();
        table.decode_all(&table.encode(&text)) == text
    }

    QuickCheck::new()
        .tests(super::property_partition::tests())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}
