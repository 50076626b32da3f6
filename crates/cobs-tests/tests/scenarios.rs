//! Reference scenarios for the codec.
//!
//! Each vector is checked in both directions: the encoder must produce the
//! exact bytes, and the decoder, fed one byte at a time into a buffer of
//! exactly the decoded length, must reproduce the input.

use cobs_decoder::{DecodeContext, decode};
use cobs_encoder::{encode, encoded_len};
use cobs_tests::{VECTORS, nonzero_payload, unhex};
use cobs_wire::{max_encoded_size, overhead};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn encode_vec(src: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; max_encoded_size(src.len())];
    let len = encode(src, &mut dst);
    dst.truncate(len);
    dst
}

// ── Vectors ───────────────────────────────────────────────────────────────────

#[test]
fn reference_vectors_encode() {
    for &(decoded, encoded) in VECTORS {
        let src = unhex(decoded);
        assert_eq!(
            hex::encode(encode_vec(&src)),
            hex::encode(unhex(encoded)),
            "encoding {decoded:?}"
        );
        assert_eq!(encoded_len(&src), unhex(encoded).len());
    }
}

#[test]
fn reference_vectors_decode_bytewise() {
    for &(decoded, encoded) in VECTORS {
        let expected = unhex(decoded);
        let mut buf = vec![0u8; expected.len()];
        let mut ctx = DecodeContext::start(&mut buf[..]);
        for byte in unhex(encoded) {
            assert!(ctx.step(byte), "decoding {encoded:?} rejected {byte:#04x}");
        }
        assert_eq!(ctx.finish(), Ok(expected.len()));
        assert_eq!(ctx.decoded(), &expected[..]);
    }
}

// ── Numbered scenarios ────────────────────────────────────────────────────────

#[test]
fn empty_input_is_one_code_byte() {
    assert_eq!(encode_vec(b""), [0x01]);
}

#[test]
fn single_zero_is_two_empty_blocks() {
    assert_eq!(encode_vec(&[0x00]), [0x01, 0x01]);
}

#[test]
fn hello() {
    assert_eq!(encode_vec(b"Hello"), b"\x06Hello");
}

#[test]
fn hello_world_with_zeros() {
    assert_eq!(
        encode_vec(b"Hello\x00w\x00rld"),
        unhex("06 48656c6c6f 02 77 04 726c64")
    );
}

#[test]
fn decode_into_exact_buffer() {
    let mut dst = [0u8; 5];
    assert_eq!(decode(b"\x06Hello", &mut dst), Ok(5));
    assert_eq!(&dst, b"Hello");
}

#[test]
fn full_block_has_no_continuation() {
    let src = nonzero_payload(254);
    let encoded = encode_vec(&src);
    assert_eq!(encoded.len(), 255);
    assert_eq!(encoded[0], 0xFF);
    assert_eq!(&encoded[1..], &src[..]);

    let mut dst = vec![0u8; 254];
    assert_eq!(decode(&encoded, &mut dst), Ok(254));
    assert_eq!(dst, src);
}

#[test]
fn full_block_plus_one_breaks_once() {
    let src = nonzero_payload(255);
    let encoded = encode_vec(&src);
    assert_eq!(encoded.len(), 257);
    assert_eq!(encoded[0], 0xFF);
    assert_eq!(&encoded[1..255], &src[..254]);
    assert_eq!(encoded[255], 0x02);
    assert_eq!(encoded[256], src[254]);
    assert_eq!(encoded.len(), src.len() + overhead(src.len()));
}
