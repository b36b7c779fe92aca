use alloc::vec::Vec;

use crate::block::ZigzagBlock;
use crate::error::{EncoderResult, EncodingError, Resource};
use crate::huffman::CodingClass;

/// AC symbol: all remaining coefficients of the block are zero
pub const EOB: u8 = 0x00;

/// AC symbol: sixteen zero coefficients
pub const ZRL: u8 = 0xF0;

/// Largest DC difference magnitude of baseline JPEG (category 11)
const MAX_DC_DIFF: i32 = 2047;

/// Largest AC magnitude of baseline JPEG (category 10)
const MAX_AC_VALUE: i32 = 1023;

/// # One run-length symbol
///
/// `category` is the byte looked up in the Huffman table of `class`:
/// the magnitude category for DC, `(run << 4) | size` for AC.
/// `code` holds the `code_bits` amplitude bits following the Huffman code.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Symbol {
    pub class: CodingClass,
    pub category: u8,
    pub code: u16,
    pub code_bits: u8,
}

impl Symbol {
    pub const EOB: Symbol = Symbol {
        class: CodingClass::Ac,
        category: EOB,
        code: 0,
        code_bits: 0,
    };

    pub const ZRL: Symbol = Symbol {
        class: CodingClass::Ac,
        category: ZRL,
        code: 0,
        code_bits: 0,
    };

    pub fn dc(size: u8, code: u16) -> Symbol {
        Symbol {
            class: CodingClass::Dc,
            category: size,
            code,
            code_bits: size,
        }
    }

    pub fn ac(run: u8, size: u8, code: u16) -> Symbol {
        Symbol {
            class: CodingClass::Ac,
            category: (run << 4) | size,
            code,
            code_bits: size,
        }
    }

    /// Zero run of an AC symbol
    pub fn run(&self) -> u8 {
        self.category >> 4
    }
}

/// Number of bits of the magnitude of `value`, 0 for 0
#[inline]
pub fn bit_length(value: i32) -> u8 {
    (32 - value.unsigned_abs().leading_zeros()) as u8
}

/// Amplitude bits of `value` in a category of `size` bits
///
/// Negative values are stored as `value + 2^size - 1`, i.e. the one's
/// complement of the magnitude.
#[inline]
pub fn amplitude_code(value: i32, size: u8) -> u16 {
    if value >= 0 {
        value as u16
    } else {
        (value + (1i32 << size) - 1) as u16
    }
}

/// Inverse of [`amplitude_code`]
pub fn decode_amplitude(size: u8, code: u16) -> i32 {
    if size == 0 {
        return 0;
    }

    let code = i32::from(code);
    if code >= 1 << (size - 1) {
        code
    } else {
        code - (1 << size) + 1
    }
}

/// # DC value of the previous block
///
/// Starts at zero for every image and advances once per block in scan order.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DcPredictor {
    last: i16,
}

impl DcPredictor {
    pub fn new() -> DcPredictor {
        DcPredictor { last: 0 }
    }

    pub fn value(&self) -> i16 {
        self.last
    }

    /// Difference to the previous DC value, then remember `dc`
    #[inline]
    fn advance(&mut self, dc: i16) -> i32 {
        let diff = i32::from(dc) - i32::from(self.last);
        self.last = dc;
        diff
    }
}

/// # Append-only symbol sequence with an optional capacity
#[derive(Clone, Debug, Default)]
pub struct SymbolBuffer {
    symbols: Vec<Symbol>,
    capacity: Option<usize>,
}

impl SymbolBuffer {
    pub fn new(capacity: Option<usize>) -> SymbolBuffer {
        SymbolBuffer {
            symbols: Vec::new(),
            capacity,
        }
    }

    #[inline]
    pub fn push(&mut self, symbol: Symbol) -> EncoderResult<()> {
        if let Some(capacity) = self.capacity {
            if self.symbols.len() >= capacity {
                return Err(EncodingError::CapacityExceeded {
                    resource: Resource::Symbols,
                    capacity,
                });
            }
        }
        self.symbols.push(symbol);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn into_vec(self) -> Vec<Symbol> {
        self.symbols
    }
}

/// Run-length encode one zigzag ordered block
///
/// Blocks must be passed in raster scan order, the predictor carries the
/// DC value from one block to the next.
pub fn encode_block(
    block: &ZigzagBlock<i16>,
    predictor: &mut DcPredictor,
    out: &mut SymbolBuffer,
) -> EncoderResult<()> {
    let diff = predictor.advance(block.0[0]);
    if diff.abs() > MAX_DC_DIFF {
        return Err(EncodingError::CoefficientOutOfRange {
            value: diff,
            class: CodingClass::Dc,
        });
    }

    let size = bit_length(diff);
    out.push(Symbol::dc(size, amplitude_code(diff, size)))?;

    let last_nonzero = block.last_nonzero_ac();
    let mut zero_run = 0u8;

    for &value in &block.0[1..last_nonzero + 1] {
        if value == 0 {
            zero_run += 1;
            continue;
        }

        let value = i32::from(value);
        if value.abs() > MAX_AC_VALUE {
            return Err(EncodingError::CoefficientOutOfRange {
                value,
                class: CodingClass::Ac,
            });
        }

        while zero_run >= 16 {
            out.push(Symbol::ZRL)?;
            zero_run -= 16;
        }

        let size = bit_length(value);
        out.push(Symbol::ac(zero_run, size, amplitude_code(value, size)))?;

        zero_run = 0;
    }

    if last_nonzero < 63 {
        out.push(Symbol::EOB)?;
    }

    Ok(())
}
