use alloc::vec::Vec;

use crate::bitstream::BitStream;
use crate::error::{EncoderResult, EncodingError};
use crate::rle::Symbol;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CodingClass {
    Dc = 0,
    Ac = 1,
}

static DEFAULT_LUMA_DC_CODE_LENGTHS: [u8; 16] = [
    0x00, 0x01, 0x05, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

static DEFAULT_LUMA_DC_VALUES: [u8; 12] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
];

static DEFAULT_LUMA_AC_CODE_LENGTHS: [u8; 16] = [
    0x00, 0x02, 0x01, 0x03, 0x03, 0x02, 0x04, 0x03, 0x05, 0x05, 0x04, 0x04, 0x00, 0x00, 0x01, 0x7D,
];

static DEFAULT_LUMA_AC_VALUES: [u8; 162] = [
    0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21, 0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07,
    0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08, 0x23, 0x42, 0xB1, 0xC1, 0x15, 0x52, 0xD1, 0xF0,
    0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x25, 0x26, 0x27, 0x28,
    0x29, 0x2A, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49,
    0x4A, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69,
    0x6A, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89,
    0x8A, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7,
    0xA8, 0xA9, 0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5,
    0xC6, 0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2,
    0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8,
    0xF9, 0xFA,
];

/// # Canonical Huffman code table
///
/// Maps every symbol byte to its `(length, code)` pair. A length of zero
/// marks a symbol without a code.
#[derive(Clone, Debug)]
pub struct HuffmanTable {
    lookup_table: [(u8, u16); 256],
    length: [u8; 16],
    values: Vec<u8>,
}

impl HuffmanTable {
    pub(crate) fn new(length: &[u8; 16], values: &[u8]) -> HuffmanTable {
        HuffmanTable {
            lookup_table: create_lookup_table(length, values),
            length: *length,
            values: values.to_vec(),
        }
    }

    pub fn default_luma_dc() -> HuffmanTable {
        Self::new(&DEFAULT_LUMA_DC_CODE_LENGTHS, &DEFAULT_LUMA_DC_VALUES)
    }

    pub fn default_luma_ac() -> HuffmanTable {
        Self::new(&DEFAULT_LUMA_AC_CODE_LENGTHS, &DEFAULT_LUMA_AC_VALUES)
    }

    /// `(length, code)` for a symbol, None if the table has no code for it
    #[inline]
    pub fn get_for_value(&self, value: u8) -> Option<(u8, u16)> {
        let res = self.lookup_table[value as usize];
        if res.0 > 0 {
            Some(res)
        } else {
            None
        }
    }

    /// Number of codes per length 1..=16, as written to a DHT segment
    pub fn length(&self) -> &[u8; 16] {
        &self.length
    }

    /// Symbols in code order, as written to a DHT segment
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// All assigned `(value, length, code)` triples
    pub fn codes(&self) -> impl Iterator<Item = (u8, u8, u16)> + '_ {
        self.values.iter().map(move |&v| {
            let (length, code) = self.lookup_table[v as usize];
            (v, length, code)
        })
    }
}

fn create_lookup_table(code_lengths: &[u8; 16], values: &[u8]) -> [(u8, u16); 256] {
    let mut table = [(0u8, 0u16); 256];

    let mut v = 0;
    let mut code: u32 = 0;

    for (i, &num_codes) in code_lengths.iter().enumerate() {
        for _ in 0..num_codes {
            table[values[v] as usize] = ((i + 1) as u8, code as u16);
            code += 1;
            v += 1;
        }
        code <<= 1;
    }

    table
}

/// # The DC and AC tables of one component
///
/// Built once and only borrowed afterwards.
#[derive(Clone, Debug)]
pub struct HuffmanTables {
    pub dc: HuffmanTable,
    pub ac: HuffmanTable,
}

impl HuffmanTables {
    /// The standard luminance tables from Annex K.3
    pub fn standard_luma() -> HuffmanTables {
        log::trace!("Building standard luminance Huffman tables");

        HuffmanTables {
            dc: HuffmanTable::default_luma_dc(),
            ac: HuffmanTable::default_luma_ac(),
        }
    }

    #[inline]
    pub fn for_class(&self, class: CodingClass) -> &HuffmanTable {
        match class {
            CodingClass::Dc => &self.dc,
            CodingClass::Ac => &self.ac,
        }
    }
}

/// # Entropy coder for a symbol sequence
pub struct HuffmanEncoder<'a> {
    tables: &'a HuffmanTables,
}

impl<'a> HuffmanEncoder<'a> {
    pub fn new(tables: &'a HuffmanTables) -> HuffmanEncoder<'a> {
        HuffmanEncoder { tables }
    }

    /// Write the Huffman code of a symbol followed by its amplitude bits
    #[inline]
    pub fn encode_symbol(&self, symbol: &Symbol, stream: &mut BitStream) -> EncoderResult<()> {
        let (size, code) = self
            .tables
            .for_class(symbol.class)
            .get_for_value(symbol.category)
            .ok_or(EncodingError::UnknownSymbol {
                class: symbol.class,
                category: symbol.category,
            })?;

        stream.put_bits(code, size)?;

        if symbol.code_bits > 0 {
            stream.put_bits(symbol.code, symbol.code_bits)?;
        }

        Ok(())
    }

    /// Encode all symbols and flush the stream
    ///
    /// Returns the entropy-coded bytes, stuffing included.
    pub fn encode(&self, symbols: &[Symbol], mut stream: BitStream) -> EncoderResult<Vec<u8>> {
        for symbol in symbols {
            self.encode_symbol(symbol, &mut stream)?;
        }
        stream.finish()
    }
}
