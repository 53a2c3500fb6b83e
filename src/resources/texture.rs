//! Texture decoding
//!
//! Fetched bytes are decoded with the `image` crate, then uploaded as a
//! macroquad texture. Upload must happen on the main thread.

use macroquad::prelude::{FilterMode, Texture2D};

use super::ResourceError;

/// Decoded RGBA8 pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u16,
    pub height: u16,
    pub pixels: Vec<u8>,
}

/// Decode PNG/JPEG/BMP bytes to RGBA8
pub fn decode_rgba(url: &str, bytes: &[u8]) -> Result<RgbaImage, ResourceError> {
    let img = image::load_from_memory(bytes).map_err(|e| ResourceError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let too_large = |what: &str, v: u32| ResourceError::Decode {
        url: url.to_string(),
        message: format!("{} {} exceeds {}", what, v, u16::MAX),
    };
    let width = u16::try_from(width).map_err(|_| too_large("width", width))?;
    let height = u16::try_from(height).map_err(|_| too_large("height", height))?;

    Ok(RgbaImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Decode and upload a texture. Call from the main thread only.
pub fn decode_texture(url: &str, bytes: &[u8]) -> Result<Texture2D, ResourceError> {
    let image = decode_rgba(url, bytes)?;
    let texture = Texture2D::from_rgba8(image.width, image.height, &image.pixels);
    texture.set_filter(FilterMode::Linear);
    Ok(texture)
}
