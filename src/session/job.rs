use std::path::{Path, PathBuf};

use crate::assets::font::FontAsset;
use crate::assets::marker::MarkerImage;
use crate::document::DocumentText;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::FrameSink;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::HandwriteResult;
use crate::layout::params::LayoutParams;
use crate::render::backend::FrameRgb8;
use crate::render::cpu::{CpuBackend, CpuBackendOpts};
use crate::sequence::sequencer::FrameSequencer;
use crate::session::stream::{RenderStats, render_frame_at, render_to_sink};

/// Everything one animation needs, loaded and validated up front.
///
/// A job never fails halfway through loading: document, font and marker are all read before the
/// first frame is rendered.
#[derive(Clone, Debug)]
pub struct HandwriteJob {
    text: DocumentText,
    font: FontAsset,
    marker: MarkerImage,
    params: LayoutParams,
}

impl HandwriteJob {
    /// Load the document, font and marker from disk.
    ///
    /// The marker is resized to the marker size in `params`.
    #[tracing::instrument(level = "debug", skip(params))]
    pub fn load(
        doc: &Path,
        font: &Path,
        marker: &Path,
        params: LayoutParams,
    ) -> HandwriteResult<Self> {
        params.validate()?;
        let text = DocumentText::from_path(doc)?;
        let font = FontAsset::from_path(font)?;
        let marker = MarkerImage::from_path(marker, params.marker_width, params.marker_height)?;
        tracing::debug!(
            chars = text.char_count(),
            family = font.family(),
            "job loaded"
        );
        Ok(Self::from_parts(text, font, marker, params))
    }

    /// Assemble a job from already-loaded parts.
    pub fn from_parts(
        text: DocumentText,
        font: FontAsset,
        marker: MarkerImage,
        params: LayoutParams,
    ) -> Self {
        Self {
            text,
            font,
            marker,
            params,
        }
    }

    /// Document characters in reading order.
    pub fn text(&self) -> &DocumentText {
        &self.text
    }

    /// Loaded font resource.
    pub fn font(&self) -> &FontAsset {
        &self.font
    }

    /// Layout and timing parameters.
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Fresh CPU backend for this job's font, marker and colors.
    pub fn backend(&self) -> HandwriteResult<CpuBackend> {
        CpuBackend::new(
            &self.font,
            &self.marker,
            CpuBackendOpts::from_params(&self.params),
        )
    }

    /// Fresh frame sequence over the whole document.
    pub fn sequencer(&self) -> HandwriteResult<FrameSequencer<'_, CpuBackend>> {
        FrameSequencer::new(self.text.as_str(), self.backend()?, self.params.clone())
    }

    /// Stream every frame into `sink`.
    pub fn render(&self, sink: &mut dyn FrameSink) -> HandwriteResult<RenderStats> {
        render_to_sink(self.sequencer()?, sink)
    }

    /// Encode the animation to an MP4 at `out` with the system `ffmpeg`.
    pub fn render_to_mp4(&self, out: impl Into<PathBuf>) -> HandwriteResult<RenderStats> {
        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(out));
        self.render(&mut sink)
    }

    /// Render a single frame of the animation.
    pub fn render_frame(&self, index: FrameIndex) -> HandwriteResult<FrameRgb8> {
        render_frame_at(self.sequencer()?, index)
    }
}
