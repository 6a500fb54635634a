use std::borrow::Cow;
use std::collections::HashMap;

use crate::assets::font::{FontAsset, register_family};
use crate::assets::marker::MarkerImage;
use crate::foundation::core::{Canvas, Point, Rgb8};
use crate::foundation::error::{HandwriteError, HandwriteResult};
use crate::foundation::math::flatten_premul_rgba8_to_rgb8;
use crate::layout::params::LayoutParams;
use crate::layout::scene::PageScene;
use crate::render::backend::{FrameRgb8, PageBackend};

/// Upper bound on cached line layouts before the cache is dropped wholesale.
const LAYOUT_CACHE_CAPACITY: usize = 256;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Styling for [`CpuBackend`].
#[derive(Clone, Debug)]
pub struct CpuBackendOpts {
    /// Output frame size.
    pub canvas: Canvas,
    /// Glyph size in pixels.
    pub font_size: f32,
    /// Text color.
    pub ink: Rgb8,
    /// Page color.
    pub background: Rgb8,
}

impl CpuBackendOpts {
    /// Derive backend styling from layout parameters.
    pub fn from_params(params: &LayoutParams) -> Self {
        Self {
            canvas: params.canvas,
            font_size: params.font_size as f32,
            ink: params.ink,
            background: params.background,
        }
    }
}

/// CPU page renderer: Parley shapes and measures, `vello_cpu` rasterizes.
pub struct CpuBackend {
    opts: CpuBackendOpts,
    width: u16,
    height: u16,

    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
    font: vello_cpu::peniko::FontData,
    layouts: HashMap<String, parley::Layout<TextBrushRgba8>>,

    marker: vello_cpu::Image,
    marker_size: (f64, f64),

    pixmap: vello_cpu::Pixmap,
}

impl CpuBackend {
    /// Build a backend that draws with `font` and stamps `marker` as the cursor.
    pub fn new(
        font: &FontAsset,
        marker: &MarkerImage,
        opts: CpuBackendOpts,
    ) -> HandwriteResult<Self> {
        if !opts.font_size.is_finite() || opts.font_size <= 0.0 {
            return Err(HandwriteError::validation(
                "font size must be finite and > 0",
            ));
        }
        let width: u16 = opts
            .canvas
            .width
            .try_into()
            .map_err(|_| HandwriteError::validation("canvas width exceeds u16"))?;
        let height: u16 = opts
            .canvas
            .height
            .try_into()
            .map_err(|_| HandwriteError::validation("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(HandwriteError::validation(
                "canvas width/height must be non-zero",
            ));
        }

        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx.collection, &font.shared_bytes())?;
        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
            0,
        );

        let marker_pixmap =
            premul_bytes_to_pixmap(marker.rgba8_premul(), marker.width(), marker.height())?;
        let marker_paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(marker_pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        tracing::debug!(
            family = %family,
            font_size = opts.font_size,
            width,
            height,
            "cpu backend ready"
        );

        Ok(Self {
            width,
            height,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font: font_data,
            layouts: HashMap::new(),
            marker: marker_paint,
            marker_size: (f64::from(marker.width()), f64::from(marker.height())),
            pixmap: vello_cpu::Pixmap::new(width, height),
            opts,
        })
    }

    /// Family name the text is shaped with.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Drop the layout cache if `incoming` new entries would push it past capacity.
    ///
    /// Must run before any of the entries it makes room for are shaped.
    fn reserve_layouts(&mut self, incoming: usize) {
        if self.layouts.len() + incoming > LAYOUT_CACHE_CAPACITY {
            self.layouts.clear();
        }
    }

    fn ensure_layout(&mut self, text: &str) {
        if self.layouts.contains_key(text) {
            return;
        }

        let ink = self.opts.ink;
        let brush = TextBrushRgba8 {
            r: ink.r,
            g: ink.g,
            b: ink.b,
            a: 255,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.opts.font_size));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        self.layouts.insert(text.to_string(), layout);
    }
}

impl PageBackend for CpuBackend {
    fn canvas(&self) -> Canvas {
        self.opts.canvas
    }

    fn measure_line(&mut self, text: &str) -> HandwriteResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        if !self.layouts.contains_key(text) {
            self.reserve_layouts(1);
        }
        self.ensure_layout(text);
        let layout = self
            .layouts
            .get(text)
            .ok_or_else(|| HandwriteError::render("text layout missing after shaping"))?;
        Ok(f64::from(layout.full_width()))
    }

    fn render_page(&mut self, scene: &PageScene<'_>) -> HandwriteResult<FrameRgb8> {
        if scene.is_blank() {
            return Ok(FrameRgb8::filled(self.opts.canvas, self.opts.background));
        }

        let missing = scene
            .lines
            .iter()
            .filter(|l| !l.text.is_empty() && !self.layouts.contains_key(l.text))
            .count();
        self.reserve_layouts(missing);
        for line in &scene.lines {
            if !line.text.is_empty() {
                self.ensure_layout(line.text);
            }
        }

        let bg = self.opts.background;
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));

        for line in scene.lines.iter().filter(|l| !l.text.is_empty()) {
            let layout = self.layouts.get(line.text).ok_or_else(|| {
                HandwriteError::render(format!("text layout missing for line {:?}", line.text))
            })?;
            ctx.set_transform(translate(line.origin));
            for visual in layout.lines() {
                for item in visual.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };

                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));

                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&self.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }

        if let Some(cursor) = scene.cursor {
            // Snap to whole pixels.
            let at = Point::new(cursor.x.round(), cursor.y.round());
            ctx.set_transform(translate(at));
            ctx.set_paint(self.marker.clone());
            let (w, h) = self.marker_size;
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        let mut frame = FrameRgb8 {
            width: self.opts.canvas.width,
            height: self.opts.canvas.height,
            data: vec![0u8; self.opts.canvas.rgb8_len()],
        };
        if !flatten_premul_rgba8_to_rgb8(
            &mut frame.data,
            self.pixmap.data_as_u8_slice(),
            bg.to_array(),
        ) {
            return Err(HandwriteError::render(
                "pixmap size mismatch with canvas during readback",
            ));
        }
        Ok(frame)
    }
}

fn translate(p: Point) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::translate((p.x, p.y))
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> HandwriteResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| HandwriteError::resource("marker width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| HandwriteError::resource("marker height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(HandwriteError::resource("marker byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
