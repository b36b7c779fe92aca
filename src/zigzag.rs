use crate::block::{RasterBlock, ZigzagBlock, BLOCK_LEN};

/// Raster position of every zigzag index: `zigzag[i] = raster[ZIGZAG_TO_RASTER[i]]`
pub static ZIGZAG_TO_RASTER: [u8; 64] = [
    0, 1, 8, 16, 9, 2, 3, 10, 17, 24, 32, 25, 18, 11, 4, 5, 12, 19, 26, 33, 40, 48, 41, 34, 27,
    20, 13, 6, 7, 14, 21, 28, 35, 42, 49, 56, 57, 50, 43, 36, 29, 22, 15, 23, 30, 37, 44, 51, 58,
    59, 52, 45, 38, 31, 39, 46, 53, 60, 61, 54, 47, 55, 62, 63,
];

/// Zigzag position of every raster index
pub static RASTER_TO_ZIGZAG: [u8; 64] = [
    0, 1, 5, 6, 14, 15, 27, 28, 2, 4, 7, 13, 16, 26, 29, 42, 3, 8, 12, 17, 25, 30, 41, 43, 9, 11,
    18, 24, 31, 40, 44, 53, 10, 19, 23, 32, 39, 45, 52, 54, 20, 22, 33, 38, 46, 51, 55, 60, 21,
    34, 37, 47, 50, 56, 59, 61, 35, 36, 48, 49, 57, 58, 62, 63,
];

impl<T: Copy> RasterBlock<T> {
    /// Reorder into zigzag order
    pub fn to_zigzag(&self) -> ZigzagBlock<T> {
        let mut out = [self.0[0]; BLOCK_LEN];
        for (dst, &src) in out.iter_mut().zip(ZIGZAG_TO_RASTER.iter()) {
            *dst = self.0[src as usize];
        }
        ZigzagBlock(out)
    }
}

impl<T: Copy> ZigzagBlock<T> {
    /// Reorder back into raster order
    pub fn to_raster(&self) -> RasterBlock<T> {
        let mut out = [self.0[0]; BLOCK_LEN];
        for (dst, &src) in out.iter_mut().zip(RASTER_TO_ZIGZAG.iter()) {
            *dst = self.0[src as usize];
        }
        RasterBlock(out)
    }
}
