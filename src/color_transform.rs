//! Grayscale conversion and 8x8 tiling of the input image.

use alloc::vec;
use alloc::vec::Vec;

use arrayref::{array_mut_ref, array_ref};

use crate::block::RasterBlock;
use crate::error::{EncoderResult, EncodingError};
use crate::image_buffer::ImageBuffer;

/// Integer luminance approximation of BT.601 weights, truncating
#[inline]
pub fn rgb_to_luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 77 * u32::from(r) + 150 * u32::from(g) + 29 * u32::from(b);
    (y >> 8) as u8
}

/// Center an unsigned sample around zero
#[inline]
pub fn level_shift(sample: u8) -> i8 {
    (i16::from(sample) - 128) as i8
}

#[inline]
fn padded(size: u16) -> usize {
    (usize::from(size) + 7) & !7
}

/// # Level-shifted luminance samples padded to whole blocks
///
/// Samples past the last input row or column repeat that row or column.
#[derive(Clone, Debug)]
pub struct LumaPlane {
    samples: Vec<i8>,
    width: usize,
    height: usize,
    original_width: u16,
    original_height: u16,
}

impl LumaPlane {
    pub fn from_image<I: ImageBuffer>(image: &I) -> EncoderResult<LumaPlane> {
        let original_width = image.width();
        let original_height = image.height();

        if original_width == 0 || original_height == 0 {
            return Err(EncodingError::InvalidDimensions {
                width: original_width,
                height: original_height,
            });
        }

        image.validate()?;

        let width = padded(original_width);
        let height = padded(original_height);
        let source_width = usize::from(original_width);
        let source_height = usize::from(original_height);

        if width != source_width || height != source_height {
            log::trace!(
                "Padding {}x{} to {}x{} by edge replication",
                original_width,
                original_height,
                width,
                height
            );
        }

        let mut samples = vec![0i8; width * height];
        let mut row = vec![0u8; source_width];

        for (y, line) in samples.chunks_exact_mut(width).enumerate() {
            if y < source_height {
                image.fill_luma_row(y as u16, &mut row);
            }

            for (dst, &src) in line.iter_mut().zip(row.iter()) {
                *dst = level_shift(src);
            }

            let last = level_shift(row[source_width - 1]);
            for dst in &mut line[source_width..] {
                *dst = last;
            }
        }

        Ok(LumaPlane {
            samples,
            width,
            height,
            original_width,
            original_height,
        })
    }

    /// Padded width, a multiple of 8
    pub fn width(&self) -> usize {
        self.width
    }

    /// Padded height, a multiple of 8
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn original_width(&self) -> u16 {
        self.original_width
    }

    pub fn original_height(&self) -> u16 {
        self.original_height
    }

    pub fn blocks_wide(&self) -> usize {
        self.width / 8
    }

    pub fn blocks_high(&self) -> usize {
        self.height / 8
    }

    pub fn block_count(&self) -> usize {
        self.blocks_wide() * self.blocks_high()
    }

    pub fn samples(&self) -> &[i8] {
        &self.samples
    }

    /// Copy out the tile at block row `row` and block column `col`
    pub fn block(&self, row: usize, col: usize) -> RasterBlock<i8> {
        debug_assert!(row < self.blocks_high() && col < self.blocks_wide());

        let mut block = RasterBlock([0i8; 64]);
        let origin = row * 8 * self.width + col * 8;

        for y in 0..8 {
            let line = array_ref!(self.samples, origin + y * self.width, 8);
            array_mut_ref!(block.0, y * 8, 8).copy_from_slice(line);
        }

        block
    }
}
