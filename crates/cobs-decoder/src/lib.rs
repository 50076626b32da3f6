#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![warn(clippy::pedantic)]

pub mod decoder;
pub mod error;

#[cfg(feature = "std")]
pub mod deframer;
#[cfg(feature = "std")]
pub mod owned;
#[cfg(feature = "std")]
pub mod streaming;

pub use decoder::{DecodeContext, decode};
pub use error::DecodeError;

#[cfg(feature = "std")]
pub use deframer::{Deframer, DeframerStats};
#[cfg(feature = "std")]
pub use error::FrameError;
#[cfg(feature = "std")]
pub use owned::decode_to_vec;
#[cfg(feature = "std")]
pub use streaming::FrameReader;
