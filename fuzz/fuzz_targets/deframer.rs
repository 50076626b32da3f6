#![no_main]

use arbitrary::Arbitrary;
use cobs_decoder::Deframer;
use cobs_wire::FramingConfig;
use libfuzzer_sys::fuzz_target;

// Fuzz target: Deframer over an arbitrary byte stream with arbitrary
// framing options.
//
// Catches bugs in:
// - Resynchronisation after a rejected frame
// - Context restart between frames
// - Statistics drifting from the outcomes actually returned
#[derive(Debug, Arbitrary)]
struct Input {
    max_frame_len: u16,
    skip_empty_frames: bool,
    stream: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let config = FramingConfig {
        max_frame_len: usize::from(input.max_frame_len % 4096),
        skip_empty_frames: input.skip_empty_frames,
        ..FramingConfig::default()
    };
    let mut deframer = Deframer::new(config);
    let outcomes = deframer.feed(&input.stream);

    let mut ok = 0u64;
    for outcome in &outcomes {
        if let Ok(frame) = outcome {
            assert!(frame.len() <= config.max_frame_len);
            ok += 1;
        }
    }
    let stats = deframer.stats();
    assert_eq!(stats.frames, ok);
    assert_eq!(stats.frames + stats.errors, outcomes.len() as u64);
});
