#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: block layout walk over arbitrary bytes.
//
// Catches bugs in:
// - Truncated final blocks
// - Zero bytes in code or literal positions
// - Disagreement between the layout walk and the decoder
fuzz_target!(|data: &[u8]| {
    let walked = cobs_wire::decoded_len(data);
    let decoded = cobs_decoder::decode_to_vec(data);

    match (walked, decoded) {
        (Ok(len), Ok(bytes)) => assert_eq!(len, bytes.len()),
        (Err(_), Err(_)) => {}
        (walked, decoded) => panic!("layout walk {walked:?} disagrees with decoder {decoded:?}"),
    }
});
