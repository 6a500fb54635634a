use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{Canvas, Rgb8};
use crate::layout::params::LayoutParams;
use crate::layout::scene::PageScene;

const CANVAS: Canvas = Canvas {
    width: 100,
    height: 60,
};

/// Fills the frame with a shade that encodes how many lines the scene holds.
struct Shades;

impl PageBackend for Shades {
    fn canvas(&self) -> Canvas {
        CANVAS
    }

    fn measure_line(&mut self, text: &str) -> HandwriteResult<f64> {
        Ok(text.chars().count() as f64 * 5.0)
    }

    fn render_page(&mut self, scene: &PageScene<'_>) -> HandwriteResult<FrameRgb8> {
        let shade = 255 - (scene.lines.len() as u8) * 10 - u8::from(scene.cursor.is_some());
        Ok(FrameRgb8::filled(CANVAS, Rgb8::new(shade, shade, shade)))
    }
}

fn params(delay_frames: u32) -> LayoutParams {
    LayoutParams {
        font_size: 10,
        max_lines: 2,
        delay_frames,
        canvas: CANVAS,
        ..LayoutParams::default()
    }
}

struct FailingSink {
    pushed: u64,
    fail_at: u64,
    ended: bool,
}

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> HandwriteResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &FrameRgb8) -> HandwriteResult<()> {
        if self.pushed == self.fail_at {
            return Err(HandwriteError::render("pipe closed"));
        }
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> HandwriteResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[test]
fn frames_reach_the_sink_in_order_with_config() {
    let seq = FrameSequencer::new("ab\nc", Shades, params(2)).unwrap();
    let mut sink = InMemorySink::new();
    let stats = render_to_sink(seq, &mut sink).unwrap();

    assert!(sink.is_ended());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (100, 60));
    assert_eq!(cfg.fps.as_f64(), 3.0);

    // "ab\n" fills one line, "c" is committed at the end; no page fills up.
    assert_eq!(stats.frames_total, 4 + 2);
    assert_eq!(stats.sequence.char_frames, 4);
    assert_eq!(stats.sequence.tail_frames, 2);
    assert_eq!(stats.sequence.pages_completed, 0);
    assert!((stats.duration_secs - 2.0).abs() < 1e-9);

    let indices: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn fingerprint_is_stable_across_runs() {
    let run = || {
        let seq = FrameSequencer::new("hello\nworld", Shades, params(1)).unwrap();
        render_to_sink(seq, &mut InMemorySink::new()).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn sink_error_stops_the_run_without_end() {
    let seq = FrameSequencer::new("abcdef", Shades, params(1)).unwrap();
    let mut sink = FailingSink {
        pushed: 0,
        fail_at: 3,
        ended: false,
    };
    let err = render_to_sink(seq, &mut sink).unwrap_err();
    assert!(matches!(err, HandwriteError::Render(_)));
    assert_eq!(sink.pushed, 3);
    assert!(!sink.ended);
}

#[test]
fn single_frame_matches_streamed_frame() {
    let seq = FrameSequencer::new("ab\nc", Shades, params(2)).unwrap();
    let mut sink = InMemorySink::new();
    render_to_sink(seq, &mut sink).unwrap();

    for (idx, expected) in sink.frames() {
        let seq = FrameSequencer::new("ab\nc", Shades, params(2)).unwrap();
        let frame = render_frame_at(seq, *idx).unwrap();
        assert_eq!(&frame, expected, "frame {}", idx.0);
    }
}

#[test]
fn frame_past_the_end_is_a_validation_error() {
    let seq = FrameSequencer::new("ab", Shades, params(1)).unwrap();
    let err = render_frame_at(seq, FrameIndex(3)).unwrap_err();
    assert!(matches!(err, HandwriteError::Validation(_)));
    assert!(err.to_string().contains("3 frames"));
}
