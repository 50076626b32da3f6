#![no_main]

use arbitrary::Arbitrary;
use cobs_decoder::DecodeContext;
use libfuzzer_sys::fuzz_target;

// Fuzz target: DecodeContext fed arbitrary bytes into an arbitrary-sized
// buffer.
//
// Catches bugs in:
// - The code-byte capacity check (out-of-bounds writes panic)
// - Deferred-zero accounting at block boundaries
// - Fail-fast: no byte is accepted after the first rejection
#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u16,
    bytes: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let mut ctx = DecodeContext::start(vec![0u8; usize::from(input.capacity % 2048)]);

    let mut failed = false;
    for &byte in &input.bytes {
        let accepted = ctx.step(byte);
        assert!(!(failed && accepted), "byte accepted after failure");
        failed |= !accepted;
        assert!(ctx.decoded_len() <= ctx.capacity());
    }

    if let Ok(len) = ctx.finish() {
        assert!(!failed);
        assert_eq!(len, ctx.decoded().len());
    }
});
