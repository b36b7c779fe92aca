use alloc::vec::Vec;

use byteorder::{BigEndian, ByteOrder};

use crate::huffman::{CodingClass, HuffmanTable};
use crate::marker::Marker;
use crate::quantization::QuantizationTable;
use crate::{Density, EncodingError};

/// Component id of the single luminance component
const LUMA_COMPONENT_ID: u8 = 1;

/// Represents an data endpoint for the container writer
pub trait JfifWrite {
    /// Writes the whole buffer. The behavior must be identical to std::io::Write::write_all
    /// # Errors
    ///
    /// Return an error if the data can't be written
    fn write_all(&mut self, buf: &[u8]) -> Result<(), EncodingError>;
}

#[cfg(not(feature = "std"))]
impl<W: JfifWrite + ?Sized> JfifWrite for &mut W {
    fn write_all(&mut self, buf: &[u8]) -> Result<(), EncodingError> {
        (**self).write_all(buf)
    }
}

#[cfg(not(feature = "std"))]
impl JfifWrite for Vec<u8> {
    fn write_all(&mut self, buf: &[u8]) -> Result<(), EncodingError> {
        self.extend_from_slice(buf);
        Ok(())
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write + ?Sized> JfifWrite for W {
    #[inline(always)]
    fn write_all(&mut self, buf: &[u8]) -> Result<(), EncodingError> {
        self.write_all(buf)?;
        Ok(())
    }
}

/// # Marker segment writer
///
/// Serializes the fixed segments around one baseline grayscale scan.
pub(crate) struct JfifWriter<W: JfifWrite> {
    w: W,
}

impl<W: JfifWrite> JfifWriter<W> {
    pub fn new(w: W) -> Self {
        JfifWriter { w }
    }

    #[inline(always)]
    pub fn write(&mut self, buf: &[u8]) -> Result<(), EncodingError> {
        self.w.write_all(buf)
    }

    #[inline(always)]
    pub fn write_u8(&mut self, value: u8) -> Result<(), EncodingError> {
        self.w.write_all(&[value])
    }

    #[inline(always)]
    pub fn write_u16(&mut self, value: u16) -> Result<(), EncodingError> {
        let mut buf = [0u8; 2];
        BigEndian::write_u16(&mut buf, value);
        self.w.write_all(&buf)
    }

    pub fn write_marker(&mut self, marker: Marker) -> Result<(), EncodingError> {
        self.write(&[0xFF, marker.into()])
    }

    pub fn write_segment(&mut self, marker: Marker, data: &[u8]) -> Result<(), EncodingError> {
        self.write_marker(marker)?;
        self.write_u16(data.len() as u16 + 2)?;
        self.write(data)?;

        Ok(())
    }

    pub fn write_header(&mut self, density: &Density) -> Result<(), EncodingError> {
        self.write_marker(Marker::APP(0))?;
        self.write_u16(16)?;

        self.write(b"JFIF\0")?;
        self.write(&[0x01, 0x01])?;

        match *density {
            Density::None => {
                self.write_u8(0x00)?;
                self.write_u16(1)?;
                self.write_u16(1)?;
            }
            Density::Inch { x, y } => {
                self.write_u8(0x01)?;
                self.write_u16(x)?;
                self.write_u16(y)?;
            }
            Density::Centimeter { x, y } => {
                self.write_u8(0x02)?;
                self.write_u16(x)?;
                self.write_u16(y)?;
            }
        }

        // No thumbnail
        self.write(&[0x00, 0x00])
    }

    /// Table 0, 8 bit precision, steps in zigzag order
    pub fn write_quantization_segment(
        &mut self,
        table: &QuantizationTable,
    ) -> Result<(), EncodingError> {
        let mut buf = [0u8; 65];
        buf[0] = 0x00;
        buf[1..].copy_from_slice(&table.zigzag_values());

        self.write_segment(Marker::DQT, &buf)
    }

    pub fn write_frame_header(&mut self, width: u16, height: u16) -> Result<(), EncodingError> {
        let mut buf = [0u8; 9];

        buf[0] = 8; // Sample precision
        BigEndian::write_u16(&mut buf[1..3], height);
        BigEndian::write_u16(&mut buf[3..5], width);
        buf[5] = 1; // Number of components
        buf[6] = LUMA_COMPONENT_ID;
        buf[7] = 0x11; // 1x1 sampling
        buf[8] = 0; // Quantization table 0

        self.write_segment(Marker::SOF0, &buf)
    }

    pub fn write_huffman_segment(
        &mut self,
        class: CodingClass,
        destination: u8,
        table: &HuffmanTable,
    ) -> Result<(), EncodingError> {
        debug_assert!(destination < 4, "Bad destination: {}", destination);

        let mut buf: Vec<u8> = Vec::with_capacity(17 + table.values().len());
        buf.push(((class as u8) << 4) | destination);
        buf.extend_from_slice(table.length());
        buf.extend_from_slice(table.values());

        self.write_segment(Marker::DHT, &buf)
    }

    pub fn write_scan_header(&mut self) -> Result<(), EncodingError> {
        let buf = [
            1, // Number of components
            LUMA_COMPONENT_ID,
            0x00, // DC table 0, AC table 0
            0,    // Spectral selection start
            63,   // Spectral selection end
            0,    // Successive approximation
        ];

        self.write_segment(Marker::SOS, &buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::HuffmanTables;
    use alloc::vec;

    #[test]
    fn test_header_no_density() {
        let mut out = Vec::new();
        JfifWriter::new(&mut out).write_header(&Density::None).unwrap();

        assert_eq!(
            out,
            vec![
                0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00,
                0x01, 0x00, 0x01, 0x00, 0x00
            ]
        );
    }

    #[test]
    fn test_header_inch_density() {
        let mut out = Vec::new();
        JfifWriter::new(&mut out)
            .write_header(&Density::Inch { x: 96, y: 300 })
            .unwrap();

        assert_eq!(&out[11..16], &[0x01, 0x00, 96, 0x01, 0x2C]);
    }

    #[test]
    fn test_frame_header() {
        let mut out = Vec::new();
        JfifWriter::new(&mut out).write_frame_header(300, 20).unwrap();

        assert_eq!(
            out,
            vec![0xFF, 0xC0, 0x00, 0x0B, 8, 0x00, 20, 0x01, 0x2C, 1, 1, 0x11, 0]
        );
    }

    #[test]
    fn test_quantization_segment() {
        let mut out = Vec::new();
        JfifWriter::new(&mut out)
            .write_quantization_segment(&QuantizationTable::luma())
            .unwrap();

        assert_eq!(out.len(), 2 + 2 + 65);
        assert_eq!(&out[..5], &[0xFF, 0xDB, 0x00, 0x43, 0x00]);
        assert_eq!(&out[5..8], &[16, 11, 12]);
    }

    #[test]
    fn test_huffman_segments() {
        let tables = HuffmanTables::standard_luma();

        let mut out = Vec::new();
        let mut writer = JfifWriter::new(&mut out);
        writer
            .write_huffman_segment(CodingClass::Dc, 0, &tables.dc)
            .unwrap();
        writer
            .write_huffman_segment(CodingClass::Ac, 0, &tables.ac)
            .unwrap();

        // 2 + 2 + 1 + 16 + 12 and 2 + 2 + 1 + 16 + 162
        assert_eq!(out.len(), 33 + 183);
        assert_eq!(&out[..5], &[0xFF, 0xC4, 0x00, 0x1F, 0x00]);
        assert_eq!(&out[33..38], &[0xFF, 0xC4, 0x00, 0xB5, 0x10]);
    }

    #[test]
    fn test_scan_header() {
        let mut out = Vec::new();
        JfifWriter::new(&mut out).write_scan_header().unwrap();

        assert_eq!(out, vec![0xFF, 0xDA, 0x00, 0x08, 1, 1, 0x00, 0, 63, 0]);
    }
}
