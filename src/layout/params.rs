use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Fps, Point, Rgb8};
use crate::foundation::error::{HandwriteError, HandwriteResult};

/// Vertical gap added to the glyph size to obtain the line pitch.
pub const LINE_GAP_PX: u32 = 8;

/// Layout and timing parameters for one run.
///
/// Every field has a default, so a JSON config only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutParams {
    /// Glyph size in pixels.
    pub font_size: u32,
    /// Lines per page before the canvas resets.
    pub max_lines: u32,
    /// Hold frames emitted at each page transition and once at the end.
    pub delay_frames: u32,
    /// Output frame rate.
    pub fps: u32,
    /// Output frame size.
    pub canvas: Canvas,
    /// Left margin in pixels.
    pub margin_left: u32,
    /// Top margin in pixels.
    pub margin_top: u32,
    /// Displayed cursor marker width; also reserved as right-hand wrap margin.
    pub marker_width: u32,
    /// Displayed cursor marker height.
    pub marker_height: u32,
    /// How far the marker is raised above the line's top edge.
    pub marker_lift: u32,
    /// Page color.
    pub background: Rgb8,
    /// Text color.
    pub ink: Rgb8,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            font_size: 30,
            max_lines: 8,
            delay_frames: 10,
            fps: 3,
            canvas: Canvas {
                width: 640,
                height: 360,
            },
            margin_left: 20,
            margin_top: 20,
            marker_width: 30,
            marker_height: 30,
            marker_lift: 5,
            background: Rgb8::WHITE,
            ink: Rgb8::BLACK,
        }
    }
}

impl LayoutParams {
    /// Parse parameters from JSON; missing keys take their defaults.
    pub fn from_json_str(s: &str) -> HandwriteResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| HandwriteError::validation(format!("invalid layout params JSON: {e}")))
    }

    /// Read parameters from a JSON file.
    pub fn from_json_path(path: &Path) -> HandwriteResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read layout params '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check value ranges. Call before building a sequencer.
    pub fn validate(&self) -> HandwriteResult<()> {
        if self.font_size == 0 {
            return Err(HandwriteError::validation("font_size must be > 0"));
        }
        if self.max_lines == 0 {
            return Err(HandwriteError::validation("max_lines must be > 0"));
        }
        if self.fps == 0 {
            return Err(HandwriteError::validation("fps must be > 0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(HandwriteError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        if self.canvas.width > u32::from(u16::MAX) || self.canvas.height > u32::from(u16::MAX) {
            return Err(HandwriteError::validation(
                "canvas width/height must fit in u16",
            ));
        }
        if self.marker_width == 0 || self.marker_height == 0 {
            return Err(HandwriteError::validation(
                "marker width/height must be non-zero",
            ));
        }
        if self.margin_left + self.marker_width >= self.canvas.width {
            return Err(HandwriteError::validation(
                "margin_left + marker_width leaves no room for text",
            ));
        }
        Ok(())
    }

    /// Vertical distance between consecutive line slots.
    pub fn line_spacing(&self) -> u32 {
        self.font_size + LINE_GAP_PX
    }

    /// Output frame rate as a rational.
    pub fn frame_rate(&self) -> HandwriteResult<Fps> {
        Fps::whole(self.fps)
    }

    /// Top-left corner of line slot `index`.
    pub fn line_origin(&self, index: usize) -> Point {
        Point::new(
            f64::from(self.margin_left),
            f64::from(self.margin_top) + index as f64 * f64::from(self.line_spacing()),
        )
    }

    /// Marker position for a line of `text_width` pixels in slot `index`.
    pub fn cursor_origin(&self, index: usize, text_width: f64) -> Point {
        let line = self.line_origin(index);
        Point::new(line.x + text_width, line.y - f64::from(self.marker_lift))
    }

    /// Return `true` when a line of `text_width` pixels runs into the marker margin.
    ///
    /// The comparison is strict: a line ending exactly at the limit still fits.
    pub fn overflows(&self, text_width: f64) -> bool {
        let limit = f64::from(self.canvas.width) - f64::from(self.marker_width);
        text_width + f64::from(self.margin_left) > limit
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/params.rs"]
mod tests;
