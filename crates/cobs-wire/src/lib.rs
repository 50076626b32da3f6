#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![warn(clippy::pedantic)]

pub mod block;
pub mod config;
pub mod error;
pub mod size;

pub use block::{Block, BlockCode, Blocks, decoded_len};
pub use config::FramingConfig;
pub use error::WireError;
pub use size::{max_encoded_size, overhead};
