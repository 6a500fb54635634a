use std::time::Instant;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{HandwriteError, HandwriteResult};
use crate::foundation::math::Fnv1a64;
use crate::render::backend::{FrameRgb8, PageBackend};
use crate::sequence::sequencer::{FrameSequencer, SequenceStats};

/// Summary of a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct RenderStats {
    /// Frames pushed into the sink.
    pub frames_total: u64,
    /// Breakdown by frame origin.
    pub sequence: SequenceStats,
    /// Playback length of the output at the configured frame rate.
    pub duration_secs: f64,
    /// FNV-1a digest over every frame's fingerprint, in order.
    pub fingerprint: u64,
}

/// Drain `seq` into `sink`, one frame at a time.
///
/// `sink.begin` is called before the first frame and `sink.end` only after the sequence ends
/// cleanly. Any error stops the run immediately and is returned as is.
#[tracing::instrument(level = "debug", skip_all)]
pub fn render_to_sink<B: PageBackend>(
    mut seq: FrameSequencer<'_, B>,
    sink: &mut dyn FrameSink,
) -> HandwriteResult<RenderStats> {
    let params = seq.params();
    let fps = params.frame_rate()?;
    sink.begin(SinkConfig {
        width: params.canvas.width,
        height: params.canvas.height,
        fps,
    })?;

    let started = Instant::now();
    let mut digest = Fnv1a64::new_default();
    let mut next = 0u64;
    for frame in seq.by_ref() {
        let frame = frame?;
        digest.write_bytes(&frame.fingerprint().to_le_bytes());
        sink.push_frame(FrameIndex(next), &frame)?;
        next += 1;
    }
    sink.end()?;

    let stats = RenderStats {
        frames_total: next,
        sequence: seq.stats(),
        duration_secs: fps.frames_to_secs(next),
        fingerprint: digest.finish(),
    };
    tracing::info!(
        frames = stats.frames_total,
        pages = stats.sequence.pages_completed,
        video_secs = stats.duration_secs,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "render complete"
    );
    Ok(stats)
}

/// Run `seq` up to frame `index` and return that frame.
///
/// Earlier frames are rendered and dropped; the sequence has no random access.
pub fn render_frame_at<B: PageBackend>(
    mut seq: FrameSequencer<'_, B>,
    index: FrameIndex,
) -> HandwriteResult<FrameRgb8> {
    let n = usize::try_from(index.0)
        .map_err(|_| HandwriteError::validation("frame index exceeds usize"))?;
    match seq.nth(n) {
        Some(frame) => frame,
        None => Err(HandwriteError::validation(format!(
            "frame {} is out of range: the sequence has {} frames",
            index.0,
            seq.stats().total_frames()
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/stream.rs"]
mod tests;
