use std::iter::FusedIterator;

use crate::foundation::error::{HandwriteError, HandwriteResult};
use crate::layout::params::LayoutParams;
use crate::layout::scene::{PageScene, SceneLine, visible_text};
use crate::layout::state::{LineCommit, RenderState};
use crate::render::backend::{FrameRgb8, PageBackend};

/// Frame counts by origin, updated as frames are yielded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SequenceStats {
    /// One per input character.
    pub char_frames: u64,
    /// Background-only frames emitted at page transitions.
    pub page_hold_frames: u64,
    /// Final hold frames showing the last page.
    pub tail_frames: u64,
    /// Number of times the line index reached `max_lines`.
    pub pages_completed: u64,
}

impl SequenceStats {
    /// Frames yielded so far.
    pub fn total_frames(&self) -> u64 {
        self.char_frames + self.page_hold_frames + self.tail_frames
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Writing,
    PageHold { remaining: u32 },
    Tail { remaining: u32 },
    Done,
}

/// Lazy, single-pass frame stream for a handwriting animation.
///
/// Yields one frame per character (with the cursor marker after the text), `delay_frames` blank
/// frames whenever a page fills up, and finally `delay_frames` frames holding the last page
/// without a cursor. A line ends on `\n` or when the measured line width crosses the marker
/// margin; the character that ends a line is drawn in its own frame before the break.
///
/// The first error ends the stream. Regenerating requires a new sequencer.
pub struct FrameSequencer<'t, B> {
    chars: std::str::Chars<'t>,
    backend: B,
    params: LayoutParams,
    state: RenderState,
    phase: Phase,
    stats: SequenceStats,
    held: Option<FrameRgb8>,
}

impl<'t, B: PageBackend> FrameSequencer<'t, B> {
    /// Validate `params` against `backend` and prepare to write `text`.
    pub fn new(text: &'t str, backend: B, params: LayoutParams) -> HandwriteResult<Self> {
        params.validate()?;
        if backend.canvas() != params.canvas {
            return Err(HandwriteError::validation(format!(
                "backend canvas {}x{} does not match layout canvas {}x{}",
                backend.canvas().width,
                backend.canvas().height,
                params.canvas.width,
                params.canvas.height
            )));
        }

        Ok(Self {
            chars: text.chars(),
            backend,
            state: RenderState::new(params.max_lines),
            params,
            phase: Phase::Writing,
            stats: SequenceStats::default(),
            held: None,
        })
    }

    /// Counts of frames yielded so far.
    pub fn stats(&self) -> SequenceStats {
        self.stats
    }

    /// Current page state.
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Parameters this sequencer lays out with.
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Give the backend back, e.g. to inspect it after a run.
    pub fn into_backend(self) -> B {
        self.backend
    }

    fn write_char(&mut self, ch: char) -> HandwriteResult<FrameRgb8> {
        self.state.push_char(ch);

        let width = self
            .backend
            .measure_line(visible_text(self.state.in_progress()))?;
        let scene = page_scene(&self.params, &self.state, Some(width));
        let frame = self.backend.render_page(&scene)?;
        self.stats.char_frames += 1;

        if (ch == '\n' || self.params.overflows(width))
            && let LineCommit::PageFull(page) = self.state.commit_line()
        {
            self.stats.pages_completed += 1;
            tracing::debug!(
                page = self.stats.pages_completed,
                lines = page.len(),
                "page complete"
            );
            self.phase = Phase::PageHold {
                remaining: self.params.delay_frames,
            };
        }

        Ok(frame)
    }

    fn hold_frame(&mut self, blank: bool, last: bool) -> HandwriteResult<FrameRgb8> {
        if self.held.is_none() {
            let scene = if blank {
                PageScene::blank()
            } else {
                page_scene(&self.params, &self.state, None)
            };
            self.held = Some(self.backend.render_page(&scene)?);
        }

        let frame = if last {
            self.held.take()
        } else {
            self.held.clone()
        };
        frame.ok_or_else(|| HandwriteError::render("hold frame missing"))
    }

    fn step(&mut self) -> Option<HandwriteResult<FrameRgb8>> {
        loop {
            match self.phase {
                Phase::Writing => {
                    let Some(ch) = self.chars.next() else {
                        self.state.finish();
                        self.held = None;
                        self.phase = Phase::Tail {
                            remaining: self.params.delay_frames,
                        };
                        continue;
                    };
                    return Some(self.write_char(ch));
                }
                Phase::PageHold { remaining: 0 } => {
                    self.held = None;
                    self.phase = Phase::Writing;
                }
                Phase::PageHold { remaining } => {
                    self.phase = Phase::PageHold {
                        remaining: remaining - 1,
                    };
                    self.stats.page_hold_frames += 1;
                    return Some(self.hold_frame(true, remaining == 1));
                }
                Phase::Tail { remaining: 0 } => {
                    self.phase = Phase::Done;
                    tracing::debug!(
                        frames = self.stats.total_frames(),
                        pages = self.stats.pages_completed,
                        "sequence finished"
                    );
                }
                Phase::Tail { remaining } => {
                    self.phase = Phase::Tail {
                        remaining: remaining - 1,
                    };
                    self.stats.tail_frames += 1;
                    return Some(self.hold_frame(false, remaining == 1));
                }
                Phase::Done => return None,
            }
        }
    }
}

impl<B: PageBackend> Iterator for FrameSequencer<'_, B> {
    type Item = HandwriteResult<FrameRgb8>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.step();
        if matches!(item, Some(Err(_))) {
            self.phase = Phase::Done;
            self.held = None;
        }
        item
    }
}

impl<B: PageBackend> FusedIterator for FrameSequencer<'_, B> {}

/// Place the current page: completed lines in their slots, the in-progress line in the current
/// slot, and the cursor after a line of `cursor_width` pixels when given.
fn page_scene<'s>(
    params: &LayoutParams,
    state: &'s RenderState,
    cursor_width: Option<f64>,
) -> PageScene<'s> {
    let mut lines: Vec<SceneLine<'s>> = state
        .completed()
        .iter()
        .enumerate()
        .map(|(i, line)| SceneLine {
            text: visible_text(line),
            origin: params.line_origin(i),
        })
        .collect();

    if !state.in_progress().is_empty() {
        lines.push(SceneLine {
            text: visible_text(state.in_progress()),
            origin: params.line_origin(state.line_index()),
        });
    }

    PageScene {
        lines,
        cursor: cursor_width.map(|w| params.cursor_origin(state.line_index(), w)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/sequencer.rs"]
mod tests;
