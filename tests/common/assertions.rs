//! Assertion helpers for tests.

use allrgb_engine::generate_palette;
use pretty_assertions::assert_eq;
use std::io::Cursor;

/// Decoded PNG: dimensions plus row-major RGB pixels
pub struct DecodedPng {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

/// Decode PNG bytes to RGB, expanding palettes produced by oxipng
pub fn decode_png(bytes: &[u8]) -> DecodedPng {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder.read_info().expect("Invalid PNG header");
    let mut data = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut data).expect("Invalid PNG data");
    data.truncate(info.buffer_size());

    assert_eq!(
        info.color_type,
        png::ColorType::Rgb,
        "Expected RGB output after expansion"
    );
    let pixels = data.chunks_exact(3).map(|p| [p[0], p[1], p[2]]).collect();
    DecodedPng {
        width: info.width,
        height: info.height,
        pixels,
    }
}

/// Assert bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert the image uses every color of the depth's palette exactly once
pub fn assert_every_color_once(image: &DecodedPng, depth: u32) {
    let mut expected: Vec<[u8; 3]> = generate_palette(depth)
        .expect("Invalid depth")
        .into_iter()
        .map(|c| c.to_bytes())
        .collect();
    let mut got = image.pixels.clone();

    assert_eq!(
        got.len(),
        expected.len(),
        "Pixel count does not match palette size"
    );
    expected.sort_unstable();
    got.sort_unstable();
    assert_eq!(got, expected);
}
