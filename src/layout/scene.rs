use crate::foundation::core::Point;

/// One line of text placed on the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLine<'a> {
    /// Text to draw, without line-break markers.
    pub text: &'a str,
    /// Top-left corner of the line box.
    pub origin: Point,
}

/// Everything a backend draws for one frame, on top of the background.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageScene<'a> {
    /// Lines in slot order.
    pub lines: Vec<SceneLine<'a>>,
    /// Top-left corner of the cursor marker, if shown.
    pub cursor: Option<Point>,
}

impl<'a> PageScene<'a> {
    /// Background only.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Return `true` when nothing but the background is drawn.
    pub fn is_blank(&self) -> bool {
        self.cursor.is_none() && self.lines.iter().all(|l| l.text.is_empty())
    }
}

/// The drawable part of a line: line-break markers have no glyph.
pub fn visible_text(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

#[cfg(test)]
#[path = "../../tests/unit/layout/scene.rs"]
mod tests;
