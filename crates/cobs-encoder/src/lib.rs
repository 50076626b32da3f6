#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;

#[cfg(feature = "std")]
pub mod owned;
#[cfg(feature = "std")]
pub mod streaming;

pub use encoder::{encode, encoded_len, try_encode};
pub use error::EncodeError;

#[cfg(feature = "std")]
pub use owned::{encode_frame, encode_to_vec};
#[cfg(feature = "std")]
pub use streaming::FrameWriter;
