use core::num::NonZeroU16;

use crate::block::{RasterBlock, BLOCK_LEN};
use crate::zigzag::ZIGZAG_TO_RASTER;

/// Sample luminance table given in Annex K (Clause K.1) of Recommendation ITU-T T.81 (1992) | ISO/IEC 10918-1:1994.
///
/// Row-major order.
static STD_LUMA_TABLE: [u16; 64] = [
    16, 11, 10, 16, 24, 40, 51, 61, 12, 12, 14, 19, 26, 58, 60, 55, 14, 13, 16, 24, 40, 57, 69, 56,
    14, 17, 22, 29, 51, 87, 80, 62, 18, 22, 37, 56, 68, 109, 103, 77, 24, 35, 55, 64, 81, 104, 113,
    92, 49, 64, 78, 87, 103, 121, 120, 101, 72, 92, 95, 98, 112, 100, 103, 99,
];

/// # Quantization step table
///
/// Steps are stored in raster order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizationTable {
    table: [NonZeroU16; 64],
}

impl QuantizationTable {
    /// The standard luminance table
    pub fn luma() -> QuantizationTable {
        Self::new_with_table(&STD_LUMA_TABLE)
    }

    fn new_with_table(table: &[u16; 64]) -> QuantizationTable {
        let mut q_table = [NonZeroU16::new(1).unwrap(); 64];
        for (q, &v) in q_table.iter_mut().zip(table.iter()) {
            *q = NonZeroU16::new(v.clamp(1, 255)).unwrap();
        }
        QuantizationTable { table: q_table }
    }

    /// Step for the raster index
    #[inline]
    pub fn get(&self, index: usize) -> u16 {
        self.table[index].get()
    }

    /// Steps in zigzag order, as written to a DQT segment
    pub fn zigzag_values(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        for (dst, &src) in out.iter_mut().zip(ZIGZAG_TO_RASTER.iter()) {
            // Baseline tables are 8 bit, enforced in new_with_table
            *dst = self.table[src as usize].get() as u8;
        }
        out
    }

    /// Divide every coefficient by its step and round half away from zero
    pub fn quantize_block(&self, coefficients: &RasterBlock<f32>) -> RasterBlock<i16> {
        let mut out = [0i16; BLOCK_LEN];
        for (i, q) in out.iter_mut().enumerate() {
            *q = quantize(coefficients.0[i], self.table[i].get());
        }
        RasterBlock(out)
    }
}

/// `round(value / step)` with ties away from zero, saturated to i16
#[inline]
pub fn quantize(value: f32, step: u16) -> i16 {
    let scaled = value / f32::from(step);

    let truncated = scaled as i32;
    let fraction = scaled - truncated as f32;

    let rounded = if fraction >= 0.5 {
        truncated.saturating_add(1)
    } else if fraction <= -0.5 {
        truncated.saturating_sub(1)
    } else {
        truncated
    };

    rounded.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}
