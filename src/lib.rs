//! # Baseline grayscale JPEG encoder
//!
//! Encodes 8 bit images as single component baseline JPEG (JFIF) files
//! using the standard luminance quantization and Huffman tables.
//! Color input is reduced to luminance before encoding.
//!
//! ## Example
//! ```no_run
//! # use luma_jpeg::EncodingError;
//! # pub fn main() -> Result<(), EncodingError> {
//! use luma_jpeg::{ColorType, Encoder};
//!
//! // An 8x8 gradient
//! let data: Vec<u8> = (0..64).map(|i| (i * 4) as u8).collect();
//!
//! let mut out = Vec::new();
//! let encoder = Encoder::new(&mut out);
//! encoder.encode(&data, 8, 8, ColorType::Luma)?;
//! # Ok(())
//! # }
//! ```
//!
//! The entropy-coded segment alone is available through
//! [Encoder::encode_scan] for callers that write their own container.
//!
//! ## Crate features
//! - `std` (default): `std::io::Write` sinks and `std::error::Error`
//! - `rayon`: transform blocks in parallel

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bitstream;
mod block;
mod color_transform;
mod encoder;
mod error;
mod fdct;
mod huffman;
mod image_buffer;
mod marker;
mod quantization;
mod rle;
mod writer;
mod zigzag;

#[cfg(test)]
mod tests;

pub use bitstream::BitStream;
pub use block::{RasterBlock, ZigzagBlock, BLOCK_LEN};
pub use color_transform::{level_shift, rgb_to_luma, LumaPlane};
pub use encoder::{ColorType, EncodedScan, Encoder};
pub use error::{EncoderResult, EncodingError, Resource};
pub use fdct::DctMethod;
pub use huffman::{CodingClass, HuffmanEncoder, HuffmanTable, HuffmanTables};
pub use image_buffer::{
    BgrImage, BgraImage, GrayImage, ImageBuffer, LumaPixel, PixelImage, RgbImage, RgbaImage,
};
pub use quantization::QuantizationTable;
pub use rle::{decode_amplitude, encode_block, DcPredictor, Symbol, SymbolBuffer};
pub use writer::JfifWrite;

#[cfg(feature = "benchmark")]
pub use fdct::{forward_dct, forward_dct_fast, forward_dct_matrix};
#[cfg(feature = "benchmark")]
pub use quantization::quantize;
#[cfg(feature = "benchmark")]
pub use rle::{amplitude_code, bit_length};

/// # Pixel density of the image
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Density {
    /// No pixel density is set, which means "1 pixel per pixel"
    None,

    /// Horizontal and vertical dots per inch (dpi)
    Inch { x: u16, y: u16 },

    /// Horizontal and vertical dots per centimeters
    Centimeter { x: u16, y: u16 },
}

impl Default for Density {
    fn default() -> Self {
        Density::None
    }
}
