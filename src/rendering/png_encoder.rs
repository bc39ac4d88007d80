//! PNG output for filled grids.

use crate::error::RenderError;
use std::io::Cursor;

/// Encode a row-major 8-bit RGB buffer as a PNG.
///
/// Uses fast settings; run the result through [`optimize`] for a smaller file.
pub fn encode_rgb(width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>, RenderError> {
    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(RenderError::BufferSize {
            width,
            height,
            expected,
            got: rgb.len(),
        });
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgb)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Re-compress a PNG with oxipng (zopfli + adaptive filter selection)
pub fn optimize(png_bytes: &[u8]) -> Result<Vec<u8>, RenderError> {
    let optimized = oxipng::optimize_from_memory(
        png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .map_err(|e| RenderError::Optimize(e.to_string()))?;

    tracing::debug!(
        before = png_bytes.len(),
        after = optimized.len(),
        "Optimized PNG"
    );
    Ok(optimized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(png::Transformations::EXPAND);
        let mut reader = decoder.read_info().unwrap();
        let mut data = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut data).unwrap();
        data.truncate(info.buffer_size());
        (info, data)
    }

    #[test]
    fn test_encode_rgb_roundtrip() {
        let rgb: Vec<u8> = vec![
            255, 0, 0, 0, 255, 0, //
            0, 0, 255, 255, 255, 255,
        ];
        let bytes = encode_rgb(2, 2, &rgb).unwrap();

        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let (info, data) = decode(&bytes);
        assert_eq!((info.width, info.height), (2, 2));
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert_eq!(info.bit_depth, png::BitDepth::Eight);
        assert_eq!(data, rgb);
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let err = encode_rgb(2, 2, &[0u8; 9]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::BufferSize {
                expected: 12,
                got: 9,
                ..
            }
        ));
    }

    #[test]
    fn test_optimize_preserves_pixels() {
        let rgb: Vec<u8> = (0..8 * 8 * 3).map(|i| (i * 7 % 256) as u8).collect();
        let bytes = encode_rgb(8, 8, &rgb).unwrap();
        let optimized = optimize(&bytes).unwrap();

        let (info, data) = decode(&optimized);
        assert_eq!((info.width, info.height), (8, 8));
        // palette reduction is expanded back to RGB on decode
        assert_eq!(data, rgb);
    }

    #[test]
    fn test_optimize_rejects_garbage() {
        let err = optimize(b"not a png").unwrap_err();
        assert!(matches!(err, RenderError::Optimize(_)));
    }
}
