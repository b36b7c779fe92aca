use alloc::string::String;
use core::fmt::Display;

#[cfg(feature = "std")]
use std::error::Error;

use crate::huffman::CodingClass;

/// # The buffer a capacity error refers to
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Resource {
    /// The run-length symbol sequence
    Symbols,

    /// The entropy-coded output bytes
    OutputBytes,
}

impl Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Resource::Symbols => write!(f, "symbol buffer"),
            Resource::OutputBytes => write!(f, "output buffer"),
        }
    }
}

/// # The error type for encoding
#[derive(Debug)]
pub enum EncodingError {
    /// Width or height is zero
    InvalidDimensions { width: u16, height: u16 },

    /// A symbol or byte would not fit into the configured capacity
    CapacityExceeded { resource: Resource, capacity: usize },

    /// Input buffer is too short for the declared layout
    MalformedInput { length: usize, required: usize },

    /// A coefficient does not fit the baseline magnitude categories
    CoefficientOutOfRange { value: i32, class: CodingClass },

    /// A symbol has no code in the Huffman table of its class
    UnknownSymbol { class: CodingClass, category: u8 },

    /// An io error occurred during writing
    #[cfg(feature = "std")]
    IoError(std::io::Error),

    /// An io error occurred during writing (Should be used in no_std cases instead of IoError)
    Write(String),
}

pub type EncoderResult<T> = Result<T, EncodingError>;

#[cfg(feature = "std")]
impl From<std::io::Error> for EncodingError {
    fn from(err: std::io::Error) -> EncodingError {
        EncodingError::IoError(err)
    }
}

impl Display for EncodingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use EncodingError::*;
        match self {
            InvalidDimensions { width, height } => {
                write!(f, "Invalid image dimensions: {}x{}", width, height)
            }
            CapacityExceeded { resource, capacity } => {
                write!(f, "Capacity of {} exceeded: {} entries", resource, capacity)
            }
            MalformedInput { length, required } => write!(
                f,
                "Image data too small for dimensions and color_type: {} need at least {}",
                length, required
            ),
            CoefficientOutOfRange { value, class } => {
                write!(f, "{:?} coefficient {} out of baseline range", class, value)
            }
            UnknownSymbol { class, category } => {
                write!(f, "No {:?} Huffman code for symbol 0x{:02X}", class, category)
            }
            #[cfg(feature = "std")]
            IoError(err) => err.fmt(f),
            Write(err) => write!(f, "{}", err),
        }
    }
}

#[cfg(feature = "std")]
impl Error for EncodingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EncodingError::IoError(err) => Some(err),
            _ => None,
        }
    }
}
