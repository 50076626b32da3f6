//! Shared fixtures for the integration tests and benches.
//!
//! The reference vectors are written as hex so a failing assertion can be
//! compared byte for byte against a capture from a logic analyser.

/// `(decoded, encoded)` pairs, both as hex, with no frame delimiter.
pub const VECTORS: &[(&str, &str)] = &[
    ("", "01"),
    ("00", "0101"),
    ("0000", "010101"),
    ("48656c6c6f", "0648656c6c6f"),
    ("48656c6c6f007700726c64", "0648656c6c6f 0277 04726c64"),
    ("616200", "03616201"),
    ("0011002200", "01 0211 0222 01"),
];

/// Parse a hex fixture, ignoring embedded spaces.
///
/// # Panics
///
/// On malformed hex; fixtures are compile-time constants.
#[must_use]
pub fn unhex(s: &str) -> Vec<u8> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&compact).unwrap_or_else(|e| panic!("bad hex fixture {s:?}: {e}"))
}

/// `len` bytes with no zeros, so every byte is a literal.
#[must_use]
pub fn nonzero_payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 255) as u8 + 1).collect()
}

/// `len` bytes where roughly one byte in `every` is zero.
#[must_use]
pub fn sparse_zero_payload(len: usize, every: usize) -> Vec<u8> {
    (0..len)
        .map(|i| if i % every == 0 { 0 } else { (i % 251) as u8 | 1 })
        .collect()
}
