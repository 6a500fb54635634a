use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{HandwriteError, HandwriteResult};
use crate::foundation::math::Fnv1a64;
use crate::layout::scene::PageScene;

/// One output frame: opaque RGB8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb8 {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 3` bytes in `r, g, b` order.
    pub data: Vec<u8>,
}

impl FrameRgb8 {
    /// Frame filled with a single color.
    pub fn filled(canvas: Canvas, color: Rgb8) -> Self {
        let px = color.to_array();
        let mut data = Vec::with_capacity(canvas.rgb8_len());
        for _ in 0..(canvas.width as usize * canvas.height as usize) {
            data.extend_from_slice(&px);
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Color at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        let px = self.data.get(i..i + 3)?;
        Some(Rgb8::new(px[0], px[1], px[2]))
    }

    /// Return `true` when every pixel equals `color`.
    pub fn is_uniform(&self, color: Rgb8) -> bool {
        let px = color.to_array();
        self.data.chunks_exact(3).all(|c| c == px)
    }

    /// Stable 64-bit FNV-1a digest of dimensions and pixels.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&self.data);
        h.finish()
    }

    /// Check that `data` matches the declared dimensions.
    pub fn validate(&self) -> HandwriteResult<()> {
        if self.data.len() != self.canvas().rgb8_len() {
            return Err(HandwriteError::validation(
                "frame.data size mismatch with width*height*3",
            ));
        }
        Ok(())
    }
}

/// Glyph measurement plus page rasterization.
pub trait PageBackend {
    /// Size of every frame this backend produces.
    fn canvas(&self) -> Canvas;

    /// Advance width in pixels of `text` laid out on a single line.
    fn measure_line(&mut self, text: &str) -> HandwriteResult<f64>;

    /// Rasterize a full frame: background, every scene line, then the cursor marker.
    fn render_page(&mut self, scene: &PageScene<'_>) -> HandwriteResult<FrameRgb8>;
}

impl<B: PageBackend + ?Sized> PageBackend for &mut B {
    fn canvas(&self) -> Canvas {
        (**self).canvas()
    }

    fn measure_line(&mut self, text: &str) -> HandwriteResult<f64> {
        (**self).measure_line(text)
    }

    fn render_page(&mut self, scene: &PageScene<'_>) -> HandwriteResult<FrameRgb8> {
        (**self).render_page(scene)
    }
}

impl<B: PageBackend + ?Sized> PageBackend for Box<B> {
    fn canvas(&self) -> Canvas {
        (**self).canvas()
    }

    fn measure_line(&mut self, text: &str) -> HandwriteResult<f64> {
        (**self).measure_line(text)
    }

    fn render_page(&mut self, scene: &PageScene<'_>) -> HandwriteResult<FrameRgb8> {
        (**self).render_page(scene)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
