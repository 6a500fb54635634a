use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::assets::decode::{decode_raster_resized, rasterize_svg_resized};
use crate::foundation::error::{HandwriteError, HandwriteResult};

/// Cursor marker image, already resampled to its displayed size.
#[derive(Clone, Debug)]
pub struct MarkerImage {
    width: u32,
    height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    rgba8_premul: Arc<Vec<u8>>,
}

impl MarkerImage {
    /// Load a marker file and resample it to `width x height`.
    ///
    /// Files ending in `.svg` are rasterized; everything else goes through the raster decoders.
    pub fn from_path(path: &Path, width: u32, height: u32) -> HandwriteResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read marker image '{}'", path.display()))
            .map_err(|e| HandwriteError::resource(format!("{e:#}")))?;
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

        if is_svg {
            Self::from_svg_bytes(&bytes, width, height)
        } else {
            Self::from_raster_bytes(&bytes, width, height)
        }
    }

    /// Decode raster image bytes (PNG, JPEG, ...) with their alpha channel.
    pub fn from_raster_bytes(bytes: &[u8], width: u32, height: u32) -> HandwriteResult<Self> {
        let data = decode_raster_resized(bytes, width, height)?;
        Ok(Self::from_parts(width, height, data))
    }

    /// Rasterize SVG bytes.
    pub fn from_svg_bytes(bytes: &[u8], width: u32, height: u32) -> HandwriteResult<Self> {
        let data = rasterize_svg_resized(bytes, width, height)?;
        Ok(Self::from_parts(width, height, data))
    }

    /// Build a marker from premultiplied RGBA8 pixels.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> HandwriteResult<Self> {
        if width == 0 || height == 0 {
            return Err(HandwriteError::validation(
                "marker width/height must be non-zero",
            ));
        }
        if data.len() != width as usize * height as usize * 4 {
            return Err(HandwriteError::validation(
                "marker data size mismatch with width*height*4",
            ));
        }
        Ok(Self::from_parts(width, height, data))
    }

    fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        }
    }

    /// Displayed width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Displayed height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 pixels.
    pub fn rgba8_premul(&self) -> &[u8] {
        self.rgba8_premul.as_slice()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/marker.rs"]
mod tests;
