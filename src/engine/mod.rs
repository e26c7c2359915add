//! Encoder-facing engine: parameter sets for re-encoding and crop geometry

pub mod crop;
pub mod reencode;

pub use crop::{CropRequest, CropWindow};
pub use reencode::{Codec, EncodeParams, ReencodeSettings};
