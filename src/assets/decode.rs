use crate::foundation::error::{HandwriteError, HandwriteResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Largest marker edge we agree to rasterize.
const MAX_DIM: u32 = 4_096;

/// Decode a raster image (PNG, JPEG, ...) and resample it to `width x height`.
///
/// Output is premultiplied RGBA8, row-major, tightly packed.
pub(crate) fn decode_raster_resized(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> HandwriteResult<Vec<u8>> {
    check_dims(width, height)?;
    let img = image::load_from_memory(bytes)
        .map_err(|e| HandwriteError::resource(format!("decode marker image: {e}")))?;
    let rgba = img.to_rgba8();
    let resized = if rgba.dimensions() == (width, height) {
        rgba
    } else {
        image::imageops::resize(&rgba, width, height, image::imageops::FilterType::CatmullRom)
    };

    let mut data = resized.into_raw();
    premultiply_rgba8_in_place(&mut data);
    Ok(data)
}

/// Parse an SVG document and rasterize it to exactly `width x height`.
///
/// Output is premultiplied RGBA8, row-major, tightly packed.
pub(crate) fn rasterize_svg_resized(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> HandwriteResult<Vec<u8>> {
    check_dims(width, height)?;
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| HandwriteError::resource(format!("parse marker svg: {e}")))?;

    let size = tree.size();
    if !size.width().is_finite() || size.width() <= 0.0 || !size.height().is_finite() {
        return Err(HandwriteError::resource("svg has invalid width/height"));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| HandwriteError::resource("failed to allocate svg pixmap"))?;
    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap.data().to_vec())
}

fn check_dims(width: u32, height: u32) -> HandwriteResult<()> {
    if width == 0 || height == 0 {
        return Err(HandwriteError::validation(
            "marker width/height must be non-zero",
        ));
    }
    if width > MAX_DIM || height > MAX_DIM {
        return Err(HandwriteError::validation(format!(
            "marker size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
