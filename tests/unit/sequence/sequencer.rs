use super::*;
use crate::foundation::core::{Canvas, Point, Rgb8};

const CANVAS: Canvas = Canvas {
    width: 100,
    height: 60,
};

/// Monospace stand-in: every visible character is `advance` pixels wide.
struct Mono {
    advance: f64,
    measured: usize,
    fail_measure_at: Option<usize>,
    blank_renders: usize,
}

impl Mono {
    fn new(advance: f64) -> Self {
        Self {
            advance,
            measured: 0,
            fail_measure_at: None,
            blank_renders: 0,
        }
    }
}

impl PageBackend for Mono {
    fn canvas(&self) -> Canvas {
        CANVAS
    }

    fn measure_line(&mut self, text: &str) -> HandwriteResult<f64> {
        self.measured += 1;
        if self.fail_measure_at == Some(self.measured) {
            return Err(HandwriteError::render("glyph lookup failed"));
        }
        Ok(text.chars().count() as f64 * self.advance)
    }

    fn render_page(&mut self, scene: &PageScene<'_>) -> HandwriteResult<FrameRgb8> {
        if scene.is_blank() {
            self.blank_renders += 1;
        }
        Ok(FrameRgb8::filled(CANVAS, Rgb8::WHITE))
    }
}

fn params(max_lines: u32, delay_frames: u32) -> LayoutParams {
    LayoutParams {
        font_size: 10,
        max_lines,
        delay_frames,
        canvas: CANVAS,
        ..LayoutParams::default()
    }
}

#[test]
fn scene_places_lines_in_slots_and_cursor_after_text() {
    let p = params(4, 0);
    let mut state = RenderState::new(p.max_lines);
    for ch in "ab\ncd".chars() {
        state.push_char(ch);
        if ch == '\n' {
            state.commit_line();
        }
    }

    let scene = page_scene(&p, &state, Some(20.0));
    assert_eq!(
        scene.lines,
        vec![
            SceneLine {
                text: "ab",
                origin: Point::new(20.0, 20.0),
            },
            SceneLine {
                text: "cd",
                origin: Point::new(20.0, 38.0),
            },
        ]
    );
    assert_eq!(scene.cursor, Some(Point::new(40.0, 33.0)));

    let hold = page_scene(&p, &state, None);
    assert_eq!(hold.cursor, None);
}

#[test]
fn first_error_ends_the_stream() {
    let mut backend = Mono::new(10.0);
    backend.fail_measure_at = Some(2);
    let mut seq = FrameSequencer::new("abc", backend, params(8, 2)).unwrap();

    assert!(matches!(seq.next(), Some(Ok(_))));
    assert!(matches!(seq.next(), Some(Err(HandwriteError::Render(_)))));
    assert!(seq.next().is_none());
    assert!(seq.next().is_none());
    assert_eq!(seq.stats().total_frames(), 1);
}

#[test]
fn canvas_mismatch_is_rejected() {
    let p = LayoutParams::default();
    let err = FrameSequencer::new("x", Mono::new(10.0), p).err().unwrap();
    assert!(matches!(err, HandwriteError::Validation(_)));
}

#[test]
fn invalid_params_are_rejected_before_any_frame() {
    let p = LayoutParams {
        max_lines: 0,
        ..params(1, 0)
    };
    assert!(FrameSequencer::new("x", Mono::new(10.0), p).is_err());
}

#[test]
fn line_index_stays_in_range_for_the_whole_run() {
    let mut seq =
        FrameSequencer::new("a\nbb\nccc\ndddd\ne", Mono::new(10.0), params(2, 1)).unwrap();
    while let Some(frame) = seq.next() {
        frame.unwrap();
        assert!(seq.state().line_index() < 2);
    }
    assert_eq!(seq.stats().pages_completed, 2);
}

#[test]
fn page_hold_frame_is_rendered_once_per_transition() {
    let mut seq = FrameSequencer::new("a\nb\n", Mono::new(10.0), params(1, 5)).unwrap();
    let frames: Vec<_> = seq.by_ref().collect::<HandwriteResult<_>>().unwrap();
    // 4 characters, 2 page transitions of 5 frames, 5 tail frames.
    assert_eq!(frames.len(), 4 + 10 + 5);
    let backend = seq.into_backend();
    // One blank render per page transition plus one for the empty final page.
    assert_eq!(backend.blank_renders, 3);
}

#[test]
fn newline_is_measured_without_its_marker() {
    let mut seq = FrameSequencer::new("abc\n", Mono::new(10.0), params(8, 0)).unwrap();
    for _ in 0..3 {
        seq.next().unwrap().unwrap();
    }
    // The '\n' frame keeps the cursor where "abc" ended.
    let width = seq.backend.measure_line(visible_text("abc\n")).unwrap();
    assert_eq!(width, 30.0);
    seq.next().unwrap().unwrap();
    assert_eq!(seq.state().completed(), &["abc\n".to_string()]);
}
