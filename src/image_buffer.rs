use rgb::alt::{BGR8, BGRA8};
use rgb::{RGB8, RGBA8};

use crate::color_transform::rgb_to_luma;
use crate::error::{EncoderResult, EncodingError};

/// # Buffer used as input value for image encoding
///
/// Images are read row by row. Every row is delivered as luminance samples,
/// so any pixel layout can be encoded by implementing this trait.
pub trait ImageBuffer {
    /// Width of the image
    fn width(&self) -> u16;

    /// Height of the image
    fn height(&self) -> u16;

    /// Writes the luminance of row `y` into `row`, which holds exactly `width` samples
    fn fill_luma_row(&self, y: u16, row: &mut [u8]);

    /// Check that every row can be read before encoding starts
    ///
    /// # Errors
    ///
    /// Returns [EncodingError::MalformedInput] if the backing data is shorter than
    /// the declared dimensions require
    fn validate(&self) -> EncoderResult<()> {
        Ok(())
    }
}

pub(crate) fn check_data_len(
    length: usize,
    width: u16,
    height: u16,
    samples_per_pixel: usize,
) -> EncoderResult<()> {
    let required = usize::from(width) * usize::from(height) * samples_per_pixel;

    if length < required {
        return Err(EncodingError::MalformedInput { length, required });
    }

    Ok(())
}

fn get_line(data: &[u8], y: u16, width: u16, num_colors: usize) -> &[u8] {
    let width = usize::from(width);
    let y = usize::from(y);

    let start = y * width * num_colors;
    let end = start + width * num_colors;

    &data[start..end]
}

/// GrayImage represents a contiguous 8 bit image with 1 sample per pixel
pub struct GrayImage<'a>(pub &'a [u8], pub u16, pub u16);

impl<'a> ImageBuffer for GrayImage<'a> {
    fn width(&self) -> u16 {
        self.1
    }

    fn height(&self) -> u16 {
        self.2
    }

    fn fill_luma_row(&self, y: u16, row: &mut [u8]) {
        row.copy_from_slice(get_line(self.0, y, self.width(), 1));
    }

    fn validate(&self) -> EncoderResult<()> {
        check_data_len(self.0.len(), self.1, self.2, 1)
    }
}

macro_rules! rgb_image {
    ($name:ident, $num_colors:expr, $o1:expr, $o2:expr, $o3:expr) => {
        pub struct $name<'a>(pub &'a [u8], pub u16, pub u16);

        impl<'a> ImageBuffer for $name<'a> {
            fn width(&self) -> u16 {
                self.1
            }

            fn height(&self) -> u16 {
                self.2
            }

            fn fill_luma_row(&self, y: u16, row: &mut [u8]) {
                let line = get_line(self.0, y, self.width(), $num_colors);

                for (pixel, luma) in line.chunks_exact($num_colors).zip(row.iter_mut()) {
                    *luma = rgb_to_luma(pixel[$o1], pixel[$o2], pixel[$o3]);
                }
            }

            fn validate(&self) -> EncoderResult<()> {
                check_data_len(self.0.len(), self.1, self.2, $num_colors)
            }
        }
    };
}

rgb_image!(RgbImage, 3, 0, 1, 2);
rgb_image!(RgbaImage, 4, 0, 1, 2);
rgb_image!(BgrImage, 3, 2, 1, 0);
rgb_image!(BgraImage, 4, 2, 1, 0);

/// A pixel type that can be reduced to a luminance sample
pub trait LumaPixel: Copy {
    fn luma(self) -> u8;
}

impl LumaPixel for u8 {
    #[inline]
    fn luma(self) -> u8 {
        self
    }
}

macro_rules! luma_pixel {
    ($($ty:ty),*) => {
        $(
            impl LumaPixel for $ty {
                #[inline]
                fn luma(self) -> u8 {
                    rgb_to_luma(self.r, self.g, self.b)
                }
            }
        )*
    };
}

luma_pixel!(RGB8, RGBA8, BGR8, BGRA8);

/// PixelImage wraps a slice of typed pixels from the `rgb` crate
///
/// Alpha channels are ignored.
pub struct PixelImage<'a, P: LumaPixel>(pub &'a [P], pub u16, pub u16);

impl<'a, P: LumaPixel> ImageBuffer for PixelImage<'a, P> {
    fn width(&self) -> u16 {
        self.1
    }

    fn height(&self) -> u16 {
        self.2
    }

    fn fill_luma_row(&self, y: u16, row: &mut [u8]) {
        let width = usize::from(self.1);
        let start = usize::from(y) * width;

        for (pixel, luma) in self.0[start..start + width].iter().zip(row.iter_mut()) {
            *luma = pixel.luma();
        }
    }

    fn validate(&self) -> EncoderResult<()> {
        check_data_len(self.0.len(), self.1, self.2, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn row_of<I: ImageBuffer>(image: &I, y: u16) -> Vec<u8> {
        let mut row = vec![0u8; usize::from(image.width())];
        image.fill_luma_row(y, &mut row);
        row
    }

    #[test]
    fn test_gray_rows() {
        let data = [1, 2, 3, 4, 5, 6];
        let image = GrayImage(&data, 3, 2);

        assert_eq!(row_of(&image, 0), vec![1, 2, 3]);
        assert_eq!(row_of(&image, 1), vec![4, 5, 6]);
    }

    #[test]
    fn test_rgb_weights() {
        let data = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let image = RgbImage(&data, 4, 1);

        // 77 * 255 >> 8, 150 * 255 >> 8, 29 * 255 >> 8, 256 * 255 >> 8
        assert_eq!(row_of(&image, 0), vec![76, 149, 28, 255]);
    }

    #[test]
    fn test_channel_orders_agree() {
        let rgb = [10, 200, 30, 250, 5, 90];
        let rgba = [10, 200, 30, 0, 250, 5, 90, 255];
        let bgr = [30, 200, 10, 90, 5, 250];
        let bgra = [30, 200, 10, 7, 90, 5, 250, 7];

        let expected = row_of(&RgbImage(&rgb, 2, 1), 0);
        assert_eq!(row_of(&RgbaImage(&rgba, 2, 1), 0), expected);
        assert_eq!(row_of(&BgrImage(&bgr, 2, 1), 0), expected);
        assert_eq!(row_of(&BgraImage(&bgra, 2, 1), 0), expected);

        let pixels = [RGB8::new(10, 200, 30), RGB8::new(250, 5, 90)];
        assert_eq!(row_of(&PixelImage(&pixels, 2, 1), 0), expected);

        let pixels = [
            BGRA8 { b: 30, g: 200, r: 10, a: 0 },
            BGRA8 { b: 90, g: 5, r: 250, a: 0 },
        ];
        assert_eq!(row_of(&PixelImage(&pixels, 2, 1), 0), expected);
    }

    #[test]
    fn test_validate_lengths() {
        assert!(GrayImage(&[0; 6], 3, 2).validate().is_ok());
        assert!(BgraImage(&[0; 32], 4, 2).validate().is_ok());
        assert!(PixelImage(&[RGB8::new(0, 0, 0); 4], 2, 2).validate().is_ok());

        assert!(matches!(
            GrayImage(&[0; 5], 3, 2).validate(),
            Err(EncodingError::MalformedInput {
                length: 5,
                required: 6
            })
        ));
        assert!(matches!(
            RgbaImage(&[0; 31], 4, 2).validate(),
            Err(EncodingError::MalformedInput {
                length: 31,
                required: 32
            })
        ));
        assert!(matches!(
            PixelImage(&[RGB8::new(0, 0, 0); 3], 2, 2).validate(),
            Err(EncodingError::MalformedInput {
                length: 3,
                required: 4
            })
        ));
    }

    #[test]
    fn test_pixel_image_second_row() {
        let pixels = [
            RGBA8::new(0, 0, 0, 255),
            RGBA8::new(0, 0, 0, 255),
            RGBA8::new(255, 255, 255, 0),
            RGBA8::new(255, 255, 255, 0),
        ];
        assert_eq!(row_of(&PixelImage(&pixels, 2, 2), 1), vec![255, 255]);
    }
}
