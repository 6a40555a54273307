//! Images the page serves itself: the flag placeholder and the loading
//! background. Both are drawn at startup instead of being read from disk.

use crate::prelude::*;
use base64::Engine;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, ImageFormat, Rgba, RgbaImage};
use std::f32::consts::TAU;
use std::io::Cursor;

/// Same size as the remote flags.
pub const PLACEHOLDER_WIDTH: u32 = 64;
pub const PLACEHOLDER_HEIGHT: u32 = 48;

const LOADING_SIZE: u32 = 96;
const LOADING_FRAMES: u32 = 8;
const LOADING_FRAME_MS: u32 = 100;

const BORDER: Rgba<u8> = Rgba([0x9c, 0xa3, 0xaf, 0xff]);
const FILL: Rgba<u8> = Rgba([0xe5, 0xe7, 0xeb, 0xff]);
const BACKGROUND: Rgba<u8> = Rgba([0xf3, 0xf4, 0xf6, 0xff]);
const DOT: Rgba<u8> = Rgba([0x4b, 0x55, 0x63, 0xff]);

/// Grey flag-sized rectangle with a one pixel border, PNG encoded.
pub fn placeholder_png() -> Result<Vec<u8>> {
    let image = RgbaImage::from_fn(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, |x, y| {
        let edge = x == 0 || y == 0 || x == PLACEHOLDER_WIDTH - 1 || y == PLACEHOLDER_HEIGHT - 1;
        if edge {
            BORDER
        } else {
            FILL
        }
    });

    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .context("Failed to encode placeholder image")?;

    Ok(buf)
}

/// Placeholder PNG inlined as a `data:` URI, for pages opened without the
/// server behind them.
pub fn placeholder_data_uri() -> Result<String> {
    let png = placeholder_png()?;
    Ok(f!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&png)
    ))
}

/// Looping spinner: a dot travelling around a circle.
pub fn loading_gif() -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        encoder
            .set_repeat(Repeat::Infinite)
            .context("Failed to configure loading animation")?;
        encoder
            .encode_frames((0..LOADING_FRAMES).map(loading_frame))
            .context("Failed to encode loading animation")?;
    }

    Ok(buf)
}

fn loading_frame(step: u32) -> Frame {
    let center = LOADING_SIZE as f32 / 2.0;
    let orbit = LOADING_SIZE as f32 / 3.0;
    let radius = LOADING_SIZE as f32 / 12.0;

    let angle = TAU * step as f32 / LOADING_FRAMES as f32;
    let (dot_x, dot_y) = (center + orbit * angle.cos(), center + orbit * angle.sin());

    let image = RgbaImage::from_fn(LOADING_SIZE, LOADING_SIZE, |x, y| {
        let (dx, dy) = (x as f32 - dot_x, y as f32 - dot_y);
        if dx * dx + dy * dy <= radius * radius {
            DOT
        } else {
            BACKGROUND
        }
    });

    Frame::from_parts(
        image,
        0,
        0,
        Delay::from_numer_denom_ms(LOADING_FRAME_MS, 1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_png_decodes_at_flag_size() {
        let bytes = placeholder_png().unwrap();

        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!(decoded.width(), PLACEHOLDER_WIDTH);
        assert_eq!(decoded.height(), PLACEHOLDER_HEIGHT);
    }

    #[test]
    fn test_placeholder_data_uri_embeds_png() {
        let uri = placeholder_data_uri().unwrap();

        let encoded = uri.strip_prefix("data:image/png;base64,").unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(decoded, placeholder_png().unwrap());
    }

    #[test]
    fn test_loading_gif_header() {
        let bytes = loading_gif().unwrap();

        assert!(bytes.starts_with(b"GIF89a"));
        assert_eq!(bytes.last(), Some(&0x3b));
    }

    #[test]
    fn test_loading_frames_differ() {
        let first = loading_frame(0).into_buffer();
        let second = loading_frame(1).into_buffer();

        assert_ne!(first, second);
    }
}
