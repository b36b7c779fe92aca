use alloc::vec;
use alloc::vec::Vec;

use jpeg_decoder::{Decoder, PixelFormat};
use rgb::RGB8;

use crate::{ColorType, DctMethod, Density, Encoder, EncodingError, RgbImage};

fn decode(data: &[u8]) -> (Vec<u8>, u16, u16) {
    let mut decoder = Decoder::new(data);
    let pixels = decoder.decode().unwrap();
    let info = decoder.info().unwrap();

    assert_eq!(info.pixel_format, PixelFormat::L8);
    assert_eq!(pixels.len(), usize::from(info.width) * usize::from(info.height));

    (pixels, info.width, info.height)
}

fn gradient(width: u16, height: u16) -> Vec<u8> {
    let mut data = Vec::with_capacity(usize::from(width) * usize::from(height));
    for y in 0..height {
        for x in 0..width {
            data.push((x * 4 + y * 2).min(255) as u8);
        }
    }
    data
}

fn check_close(expected: &[u8], actual: &[u8], max_mean: f64, max_diff: u8) {
    assert_eq!(expected.len(), actual.len());

    let mut sum = 0u64;
    for (&e, &a) in expected.iter().zip(actual.iter()) {
        let diff = (i16::from(e) - i16::from(a)).unsigned_abs() as u8;
        assert!(diff <= max_diff, "Pixel differs by {}", diff);
        sum += u64::from(diff);
    }

    let mean = sum as f64 / expected.len() as f64;
    assert!(mean <= max_mean, "Mean difference {} too high", mean);
}

fn encode_luma(data: &[u8], width: u16, height: u16, method: DctMethod) -> Vec<u8> {
    let mut out = Vec::new();
    let mut encoder = Encoder::new(&mut out);
    encoder.set_dct_method(method);
    encoder.encode(data, width, height, ColorType::Luma).unwrap();
    out
}

#[test]
fn test_solid_gray_decodes_exactly() {
    for &value in &[0u8, 37, 128, 200, 255] {
        let data = vec![value; 16 * 16];
        let out = encode_luma(&data, 16, 16, DctMethod::Matrix);

        let (pixels, width, height) = decode(&out);
        assert_eq!((width, height), (16, 16));
        check_close(&data, &pixels, 1.0, 1);
    }
}

#[test]
fn test_gradient_matrix() {
    let data = gradient(32, 32);
    let out = encode_luma(&data, 32, 32, DctMethod::Matrix);

    let (pixels, _, _) = decode(&out);
    check_close(&data, &pixels, 4.0, 32);
}

#[test]
fn test_gradient_fast() {
    let data = gradient(32, 32);
    let out = encode_luma(&data, 32, 32, DctMethod::Fast);

    let (pixels, _, _) = decode(&out);
    check_close(&data, &pixels, 4.0, 32);
}

#[test]
fn test_dct_methods_agree() {
    let data = gradient(24, 16);

    let (matrix, _, _) = decode(&encode_luma(&data, 24, 16, DctMethod::Matrix));
    let (fast, _, _) = decode(&encode_luma(&data, 24, 16, DctMethod::Fast));

    check_close(&matrix, &fast, 1.0, 8);
}

#[test]
fn test_odd_dimensions() {
    for &(width, height) in &[(1u16, 1u16), (13, 7), (9, 17), (64, 3)] {
        let data = gradient(width, height);
        let out = encode_luma(&data, width, height, DctMethod::Matrix);

        let (pixels, w, h) = decode(&out);
        assert_eq!((w, h), (width, height));
        assert_eq!(pixels.len(), data.len());
    }
}

#[test]
fn test_color_inputs_match_gray() {
    let (width, height) = (13u16, 11u16);
    let gray = gradient(width, height);

    let rgb: Vec<u8> = gray.iter().flat_map(|&v| [v, v, v]).collect();
    let bgra: Vec<u8> = gray.iter().flat_map(|&v| [v, v, v, 0]).collect();
    let pixels: Vec<RGB8> = gray.iter().map(|&v| RGB8::new(v, v, v)).collect();

    let expected = encode_luma(&gray, width, height, DctMethod::Matrix);

    let mut out = Vec::new();
    Encoder::new(&mut out)
        .encode(&rgb, width, height, ColorType::Rgb)
        .unwrap();
    assert_eq!(out, expected);

    let mut out = Vec::new();
    Encoder::new(&mut out)
        .encode(&bgra, width, height, ColorType::Bgra)
        .unwrap();
    assert_eq!(out, expected);

    let mut out = Vec::new();
    Encoder::new(&mut out)
        .encode_pixels(&pixels, width, height)
        .unwrap();
    assert_eq!(out, expected);
}

#[test]
fn test_density() {
    let data = vec![128u8; 64];
    let mut out = Vec::new();
    let mut encoder = Encoder::new(&mut out);
    encoder.set_density(Density::Centimeter { x: 40, y: 50 });
    encoder.encode(&data, 8, 8, ColorType::Luma).unwrap();

    assert_eq!(&out[13..18], &[0x02, 0x00, 40, 0x00, 50]);
    decode(&out);
}

#[test]
fn test_payload_matches_scan() {
    let data = gradient(20, 12);
    let encoder = Encoder::new(Vec::new());
    let scan = encoder.encode_scan_data(&data, 20, 12, ColorType::Luma).unwrap();

    let out = encode_luma(&data, 20, 12, DctMethod::Matrix);

    // SOS segment is 10 bytes, followed by the payload and EOI
    let sos = out
        .windows(2)
        .position(|w| w == [0xFF, 0xDA])
        .unwrap();
    assert_eq!(&out[sos + 10..out.len() - 2], scan.data.as_slice());
}

#[test]
fn test_frame_keeps_original_size() {
    let data = gradient(13, 7);
    let out = encode_luma(&data, 13, 7, DctMethod::Matrix);

    let sof = out
        .windows(2)
        .position(|w| w == [0xFF, 0xC0])
        .unwrap();
    assert_eq!(&out[sof + 5..sof + 9], &[0x00, 7, 0x00, 13]);
}

#[test]
fn test_zero_dimensions() {
    let mut out = Vec::new();
    let res = Encoder::new(&mut out).encode(&[], 0, 8, ColorType::Luma);

    assert!(matches!(
        res,
        Err(EncodingError::InvalidDimensions {
            width: 0,
            height: 8
        })
    ));
    assert!(out.is_empty());
}

#[test]
fn test_short_buffer() {
    let data = vec![0u8; 8 * 8 * 3 - 1];
    let mut out = Vec::new();
    let res = Encoder::new(&mut out).encode(&data, 8, 8, ColorType::Rgb);

    assert!(matches!(
        res,
        Err(EncodingError::MalformedInput {
            length: 191,
            required: 192
        })
    ));
    assert!(out.is_empty());
}

#[test]
fn test_short_image_buffer() {
    let data = [0u8; 20];
    let mut out = Vec::new();
    let res = Encoder::new(&mut out).encode_image(RgbImage(&data, 4, 4));

    assert!(matches!(
        res,
        Err(EncodingError::MalformedInput {
            length: 20,
            required: 48
        })
    ));
    assert!(out.is_empty());

    let pixels = [RGB8::new(0, 0, 0); 15];
    let res = Encoder::new(&mut out).encode_pixels(&pixels, 4, 4);

    assert!(matches!(
        res,
        Err(EncodingError::MalformedInput {
            length: 15,
            required: 16
        })
    ));
    assert!(out.is_empty());
}

#[test]
fn test_capacity_error_writes_nothing() {
    let data = gradient(32, 32);
    let mut out = Vec::new();
    let mut encoder = Encoder::new(&mut out);
    encoder.set_output_capacity(Some(4));

    assert!(encoder.encode(&data, 32, 32, ColorType::Luma).is_err());
    assert!(out.is_empty());
}

#[cfg(feature = "std")]
#[test]
fn test_io_error() {
    struct FailingWriter;

    impl std::io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let data = vec![0u8; 64];
    let res = Encoder::new(FailingWriter).encode(&data, 8, 8, ColorType::Luma);
    assert!(matches!(res, Err(EncodingError::IoError(_))));
}
