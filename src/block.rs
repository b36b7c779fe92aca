/// Number of samples or coefficients in one 8x8 block
pub const BLOCK_LEN: usize = 64;

/// # 64 values of one 8x8 block in row-major order
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RasterBlock<T>(pub [T; BLOCK_LEN]);

/// # 64 values of one 8x8 block in zigzag (frequency ascending) order
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZigzagBlock<T>(pub [T; BLOCK_LEN]);

impl<T: Copy + Default> Default for RasterBlock<T> {
    fn default() -> Self {
        RasterBlock([T::default(); BLOCK_LEN])
    }
}

impl<T: Copy + Default> Default for ZigzagBlock<T> {
    fn default() -> Self {
        ZigzagBlock([T::default(); BLOCK_LEN])
    }
}

impl<T> RasterBlock<T> {
    /// Value at row `y`, column `x`
    #[inline]
    pub fn at(&self, y: usize, x: usize) -> &T {
        &self.0[y * 8 + x]
    }
}

impl ZigzagBlock<i16> {
    /// Index of the last nonzero AC coefficient, 0 if all AC coefficients are zero
    pub fn last_nonzero_ac(&self) -> usize {
        self.0[1..]
            .iter()
            .rposition(|&v| v != 0)
            .map_or(0, |i| i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_nonzero_ac() {
        let mut block = ZigzagBlock([0i16; 64]);
        block.0[0] = 12;
        assert_eq!(block.last_nonzero_ac(), 0);

        block.0[5] = -1;
        assert_eq!(block.last_nonzero_ac(), 5);

        block.0[63] = 1;
        assert_eq!(block.last_nonzero_ac(), 63);
    }

    #[test]
    fn test_raster_at() {
        let mut values = [0u8; 64];
        values[3 * 8 + 5] = 9;
        assert_eq!(*RasterBlock(values).at(3, 5), 9);
    }
}
