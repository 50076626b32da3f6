#![no_main]

use cobs_decoder::{decode, Deframer};
use cobs_encoder::{encode, encode_frame, encoded_len};
use cobs_wire::{max_encoded_size, FramingConfig};
use libfuzzer_sys::fuzz_target;

// Fuzz target: encode → decode must reproduce the input, through both the
// slice API and the deframer.
//
// Catches bugs in:
// - The 254-byte block break on the last source byte
// - encoded_len drifting from what encode writes
// - Zero bytes leaking into the encoding
fuzz_target!(|data: &[u8]| {
    let mut encoded = vec![0u8; max_encoded_size(data.len())];
    let len = encode(data, &mut encoded);
    encoded.truncate(len);

    assert_eq!(len, encoded_len(data));
    assert!(!encoded.contains(&0), "encoding contains a zero byte");

    let mut decoded = vec![0u8; data.len()];
    assert_eq!(decode(&encoded, &mut decoded), Ok(data.len()));
    assert_eq!(decoded, data);

    let mut deframer = Deframer::new(FramingConfig::with_max_frame_len(data.len()));
    let mut frames = deframer.feed(&encode_frame(data));
    assert_eq!(frames.len(), 1);
    let frame = frames.remove(0).expect("deframer rejected a valid frame");
    assert_eq!(&frame[..], data);
});
