#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Marker {
    /// Start of image
    SOI,
    /// Application segment
    APP(u8),
    /// Define quantization table
    DQT,
    /// Start of frame, baseline DCT
    SOF0,
    /// Define Huffman table
    DHT,
    /// Start of scan
    SOS,
    /// End of image
    EOI,
}

impl From<Marker> for u8 {
    fn from(marker: Marker) -> Self {
        use self::Marker::*;
        match marker {
            SOI => 0xD8,
            APP(n) => n | 0xE0,
            DQT => 0xDB,
            SOF0 => 0xC0,
            DHT => 0xC4,
            SOS => 0xDA,
            EOI => 0xD9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Marker;

    #[test]
    fn test_marker_bytes() {
        assert_eq!(u8::from(Marker::SOI), 0xD8);
        assert_eq!(u8::from(Marker::APP(0)), 0xE0);
        assert_eq!(u8::from(Marker::APP(15)), 0xEF);
        assert_eq!(u8::from(Marker::SOF0), 0xC0);
        assert_eq!(u8::from(Marker::EOI), 0xD9);
    }
}
