//! Handwriting-style text reveal animations.
//!
//! A document is revealed one character per frame on a page-like canvas, with a hand-shaped
//! cursor marker following the last written glyph. Lines wrap at character granularity, pages
//! reset after `max_lines` lines, and the resulting frames stream into an encoder.
//!
//! - Load a [`HandwriteJob`] (document, font, marker, [`LayoutParams`])
//! - Iterate a [`FrameSequencer`] directly, or
//! - Stream every frame into a [`FrameSink`] such as [`FfmpegSink`] with [`render_to_sink`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod assets;
pub(crate) mod document;
/// Encoding sinks.
pub mod encode;
pub(crate) mod layout;
/// Page rasterization backends.
pub mod render;
pub(crate) mod sequence;
pub(crate) mod session;


pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rgb8};
pub use crate::foundation::error::{HandwriteError, HandwriteResult};

pub use crate::assets::font::FontAsset;
pub use crate::assets::marker::MarkerImage;
pub use crate::document::DocumentText;
pub use crate::encode::ffmpeg::{DEFAULT_OUTPUT_NAME, FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::layout::params::{LINE_GAP_PX, LayoutParams};
pub use crate::layout::scene::{PageScene, SceneLine, visible_text};
pub use crate::layout::state::{LineCommit, RenderState};
pub use crate::render::backend::{FrameRgb8, PageBackend};
pub use crate::render::cpu::{CpuBackend, CpuBackendOpts};
pub use crate::sequence::sequencer::{FrameSequencer, SequenceStats};
pub use crate::session::job::HandwriteJob;
pub use crate::session::stream::{RenderStats, render_frame_at, render_to_sink};
