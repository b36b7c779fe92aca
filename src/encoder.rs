use alloc::vec::Vec;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::bitstream::BitStream;
use crate::block::ZigzagBlock;
use crate::color_transform::LumaPlane;
use crate::error::{EncoderResult, EncodingError};
use crate::fdct::{forward_dct, DctMethod};
use crate::huffman::{CodingClass, HuffmanEncoder, HuffmanTables};
use crate::image_buffer::*;
use crate::marker::Marker;
use crate::quantization::QuantizationTable;
use crate::rle::{encode_block, DcPredictor, SymbolBuffer};
use crate::writer::{JfifWrite, JfifWriter};
use crate::Density;

#[cfg(feature = "std")]
use std::io::BufWriter;

#[cfg(feature = "std")]
use std::fs::File;

#[cfg(feature = "std")]
use std::path::Path;

/// # Color types for input images
///
/// Available color input formats for [Encoder::encode]. Other types can be used
/// by implementing an [ImageBuffer](crate::ImageBuffer).
/// Color inputs are reduced to luminance, the output always has one component.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColorType {
    /// Grayscale with 1 byte per pixel
    Luma,

    /// RGB with 3 bytes per pixel
    Rgb,

    /// Red, Green, Blue with 4 bytes per pixel. The alpha channel will be ignored during encoding.
    Rgba,

    /// BGR with 3 bytes per pixel, the row layout of BMP files
    Bgr,

    /// BGRA with 4 bytes per pixel. The alpha channel will be ignored during encoding.
    Bgra,
}

/// # Entropy-coded segment of one image
///
/// The payload between the SOS header and the EOI marker, byte stuffing included.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncodedScan {
    pub data: Vec<u8>,
    /// Width of the input image
    pub width: u32,
    /// Height of the input image
    pub height: u32,
    /// Width rounded up to whole blocks
    pub padded_width: u32,
    /// Height rounded up to whole blocks
    pub padded_height: u32,
    /// Number of run-length symbols that were entropy coded
    pub symbol_count: usize,
}

/// # The JPEG encoder
pub struct Encoder<W: JfifWrite> {
    writer: JfifWriter<W>,
    density: Density,
    dct_method: DctMethod,
    symbol_capacity: Option<usize>,
    output_capacity: Option<usize>,
    quantization_table: QuantizationTable,
    huffman_tables: HuffmanTables,
}

impl<W: JfifWrite> Encoder<W> {
    /// Create a new encoder
    ///
    /// The encoder uses the standard luminance quantization and Huffman tables.
    /// The tables are built here once and reused by every encode call.
    pub fn new(w: W) -> Encoder<W> {
        Encoder {
            writer: JfifWriter::new(w),
            density: Density::default(),
            dct_method: DctMethod::default(),
            symbol_capacity: None,
            output_capacity: None,
            quantization_table: QuantizationTable::luma(),
            huffman_tables: HuffmanTables::standard_luma(),
        }
    }

    /// Set pixel density for the image
    ///
    /// By default, this value is None which is equal to "1 pixel per pixel".
    pub fn set_density(&mut self, density: Density) {
        self.density = density;
    }

    /// Return pixel density
    pub fn density(&self) -> Density {
        self.density
    }

    /// Select the forward DCT implementation
    ///
    /// Both methods compute the same transform up to float rounding.
    pub fn set_dct_method(&mut self, method: DctMethod) {
        self.dct_method = method;
    }

    pub fn dct_method(&self) -> DctMethod {
        self.dct_method
    }

    /// Limit the number of run-length symbols per image
    ///
    /// Encoding fails with [EncodingError::CapacityExceeded] once the limit is hit.
    pub fn set_symbol_capacity(&mut self, capacity: Option<usize>) {
        self.symbol_capacity = capacity;
    }

    pub fn symbol_capacity(&self) -> Option<usize> {
        self.symbol_capacity
    }

    /// Limit the size of the entropy-coded segment in bytes
    pub fn set_output_capacity(&mut self, capacity: Option<usize>) {
        self.output_capacity = capacity;
    }

    pub fn output_capacity(&self) -> Option<usize> {
        self.output_capacity
    }

    pub fn quantization_table(&self) -> &QuantizationTable {
        &self.quantization_table
    }

    pub fn huffman_tables(&self) -> &HuffmanTables {
        &self.huffman_tables
    }

    /// Encode an image
    ///
    /// Data format and length must conform to specified width, height and color type.
    pub fn encode(
        self,
        data: &[u8],
        width: u16,
        height: u16,
        color_type: ColorType,
    ) -> Result<(), EncodingError> {
        match color_type {
            ColorType::Luma => self.encode_image(GrayImage(data, width, height)),
            ColorType::Rgb => self.encode_image(RgbImage(data, width, height)),
            ColorType::Rgba => self.encode_image(RgbaImage(data, width, height)),
            ColorType::Bgr => self.encode_image(BgrImage(data, width, height)),
            ColorType::Bgra => self.encode_image(BgraImage(data, width, height)),
        }
    }

    /// Encode a slice of typed pixels, e.g. `rgb::RGB8`
    pub fn encode_pixels<P: LumaPixel>(
        self,
        pixels: &[P],
        width: u16,
        height: u16,
    ) -> Result<(), EncodingError> {
        self.encode_image(PixelImage(pixels, width, height))
    }

    /// Encode an image
    pub fn encode_image<I: ImageBuffer>(mut self, image: I) -> Result<(), EncodingError> {
        let plane = LumaPlane::from_image(&image)?;
        let scan = self.encode_plane(&plane)?;

        self.writer.write_marker(Marker::SOI)?;
        self.writer.write_header(&self.density)?;
        self.writer
            .write_quantization_segment(&self.quantization_table)?;
        self.writer
            .write_frame_header(plane.original_width(), plane.original_height())?;
        self.writer
            .write_huffman_segment(CodingClass::Dc, 0, &self.huffman_tables.dc)?;
        self.writer
            .write_huffman_segment(CodingClass::Ac, 0, &self.huffman_tables.ac)?;
        self.writer.write_scan_header()?;
        self.writer.write(&scan.data)?;
        self.writer.write_marker(Marker::EOI)?;

        Ok(())
    }

    /// Run the entropy coding pipeline without writing a container
    pub fn encode_scan<I: ImageBuffer>(&self, image: &I) -> EncoderResult<EncodedScan> {
        let plane = LumaPlane::from_image(image)?;
        self.encode_plane(&plane)
    }

    /// Like [encode_scan](Encoder::encode_scan) for raw data in one of the [ColorType] layouts
    pub fn encode_scan_data(
        &self,
        data: &[u8],
        width: u16,
        height: u16,
        color_type: ColorType,
    ) -> EncoderResult<EncodedScan> {
        match color_type {
            ColorType::Luma => self.encode_scan(&GrayImage(data, width, height)),
            ColorType::Rgb => self.encode_scan(&RgbImage(data, width, height)),
            ColorType::Rgba => self.encode_scan(&RgbaImage(data, width, height)),
            ColorType::Bgr => self.encode_scan(&BgrImage(data, width, height)),
            ColorType::Bgra => self.encode_scan(&BgraImage(data, width, height)),
        }
    }

    /// Transform, quantize, run-length and Huffman code a prepared plane
    pub fn encode_plane(&self, plane: &LumaPlane) -> EncoderResult<EncodedScan> {
        log::debug!(
            "Encoding {}x{} image, {} blocks, {:?} DCT",
            plane.original_width(),
            plane.original_height(),
            plane.block_count(),
            self.dct_method
        );

        let blocks = self.transform_blocks(plane);

        let mut symbols = SymbolBuffer::new(self.symbol_capacity);
        let mut predictor = DcPredictor::new();
        for block in &blocks {
            encode_block(block, &mut predictor, &mut symbols)?;
        }

        let stream = BitStream::new(self.output_capacity);
        let data = HuffmanEncoder::new(&self.huffman_tables).encode(symbols.as_slice(), stream)?;

        log::debug!(
            "Encoded {} symbols into {} bytes",
            symbols.len(),
            data.len()
        );

        Ok(EncodedScan {
            data,
            width: u32::from(plane.original_width()),
            height: u32::from(plane.original_height()),
            padded_width: plane.width() as u32,
            padded_height: plane.height() as u32,
            symbol_count: symbols.len(),
        })
    }

    /// DCT, quantization and zigzag reordering of the block at raster block `index`
    fn transform_block(&self, plane: &LumaPlane, index: usize) -> ZigzagBlock<i16> {
        let blocks_wide = plane.blocks_wide();
        let samples = plane.block(index / blocks_wide, index % blocks_wide);
        let coefficients = forward_dct(self.dct_method, &samples);
        self.quantization_table
            .quantize_block(&coefficients)
            .to_zigzag()
    }

    /// Transform every block, in raster block order
    fn transform_blocks(&self, plane: &LumaPlane) -> Vec<ZigzagBlock<i16>> {
        let transform = |index: usize| self.transform_block(plane, index);

        #[cfg(feature = "rayon")]
        let blocks = (0..plane.block_count())
            .into_par_iter()
            .map(transform)
            .collect();
        #[cfg(not(feature = "rayon"))]
        let blocks = (0..plane.block_count()).map(transform).collect();

        blocks
    }
}

#[cfg(feature = "std")]
impl Encoder<BufWriter<File>> {
    /// Create a new encoder that writes into a file
    ///
    /// See [new](Encoder::new) for further information.
    ///
    /// # Errors
    ///
    /// Returns an `IoError(std::io::Error)` if the file can't be created
    pub fn new_file<P: AsRef<Path>>(path: P) -> Result<Encoder<BufWriter<File>>, EncodingError> {
        let file = File::create(path)?;
        let buf = BufWriter::new(file);
        Ok(Self::new(buf))
    }
}
