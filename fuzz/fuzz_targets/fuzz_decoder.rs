#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use cp437modem::{CodepageTable, Cp437Decoder, DecoderOptions, chunk_utils::split_by_sizes};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

const HEADER: usize = 5; // 1 flag + 4-byte seed

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Building blocks of a terminal stream, weighted towards the byte patterns
/// that exercise sequence boundaries.
#[derive(Debug, Arbitrary)]
enum Token {
    Csi { params: Vec<u8>, terminator: u8 },
    OscBel(Vec<u8>),
    OscSt(Vec<u8>),
    Charset { introducer: u8, designator: u8 },
    LoneEsc,
    LongCsi(u8),
    LongOsc(u8),
    Raw(Vec<u8>),
}

impl Token {
    fn write(&self, out: &mut Vec<u8>) {
        match self {
            Token::Csi { params, terminator } => {
                out.extend_from_slice(b"\x1b[");
                out.extend(params.iter().map(|b| b'0' + b % 12));
                out.push(0x40 + terminator % 0x3F);
            }
            Token::OscBel(payload) => {
                out.extend_from_slice(b"\x1b]");
                out.extend_from_slice(payload);
                out.push(0x07);
            }
            Token::OscSt(payload) => {
                out.extend_from_slice(b"\x1b]");
                out.extend_from_slice(payload);
                out.extend_from_slice(b"\x1b\\");
            }
            Token::Charset {
                introducer,
                designator,
            } => {
                out.push(0x1B);
                out.push(b"()*+"[usize::from(*introducer % 4)]);
                out.push(*designator);
            }
            Token::LoneEsc => out.push(0x1B),
            Token::LongCsi(extra) => {
                out.extend_from_slice(b"\x1b[");
                out.extend(std::iter::repeat_n(b'9', 90 + usize::from(*extra % 20)));
            }
            Token::LongOsc(extra) => {
                out.extend_from_slice(b"\x1b]");
                out.extend(std::iter::repeat_n(b'x', 190 + usize::from(*extra % 20)));
            }
            Token::Raw(bytes) => out.extend_from_slice(bytes),
        }
    }
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if max_size <= HEADER {
        return fuzzer_mutate(data, size, max_size);
    }
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x0F);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let entropy: Vec<u8> = with_rng(|rng| (0..max_size).map(|_| rng.random::<u8>()).collect());
        let mut u = Unstructured::new(&entropy);
        let mut stream = Vec::new();
        while let Ok(token) = Token::arbitrary(&mut u) {
            token.write(&mut stream);
            if stream.len() >= max_size - HEADER || u.is_empty() {
                break;
            }
        }

        let len = stream.len().min(max_size - HEADER);
        data[HEADER..HEADER + len].copy_from_slice(&stream[..len]);
        HEADER + len
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

fn decoder(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u32::from_le_bytes([data[1], data[2], data[3], data[4]]);
    let data = &data[HEADER..];

    let options = DecoderOptions {
        // Small limits in half the runs so the abandon paths are hit often.
        csi_scan_limit: if flags & 1 != 0 { 3 + usize::from(flags >> 4) } else { 100 },
        osc_scan_limit: if flags & 2 != 0 { 3 + usize::from(flags >> 3) } else { 200 },
        home_after_clear: false,
    };
    let table = CodepageTable::shared();
    let whole = table.decode_with(data, &[], &options);

    let mut rng = SmallRng::seed_from_u64(u64::from(split_seed));
    let splits: Vec<usize> = (0..data.len()).map(|_| rng.random_range(0..16)).collect();

    let mut streaming = Cp437Decoder::new(table, options);
    let mut text = String::new();
    for chunk in split_by_sizes(data, &splits) {
        text.push_str(&streaming.feed(chunk));
        assert!(streaming.pending().len() <= options.max_pending());
        assert!(streaming.pending().first().is_none_or(|&b| b == 0x1B));
    }
    assert_eq!(text, whole.text);
    assert_eq!(streaming.pending(), whole.pending.as_slice());
    assert_eq!(
        whole.text.chars().count() + whole.pending.len(),
        data.len()
    );

    if flags & 4 != 0 {
        assert_eq!(table.encode(&whole.text).len(), whole.text.chars().count());
    }
}

fuzz_target!(|data: &[u8]| decoder(data));
