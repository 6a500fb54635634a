/// Outcome of committing the in-progress line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineCommit {
    /// The page still has free line slots.
    SamePage,
    /// The last slot was used; carries the finished page's lines, oldest first.
    PageFull(Vec<String>),
}

/// Mutable text state of the page currently being written.
///
/// Invariant: `line_index() < max_lines` between calls. Filling the last slot hands the page back
/// through [`LineCommit::PageFull`] and starts an empty one.
#[derive(Clone, Debug)]
pub struct RenderState {
    in_progress: String,
    completed: Vec<String>,
    line_index: usize,
    max_lines: usize,
}

impl RenderState {
    /// Empty first page with room for `max_lines` lines.
    pub fn new(max_lines: u32) -> Self {
        let max_lines = max_lines.max(1) as usize;
        Self {
            in_progress: String::new(),
            completed: Vec::with_capacity(max_lines),
            line_index: 0,
            max_lines,
        }
    }

    /// Append one character to the in-progress line.
    pub fn push_char(&mut self, ch: char) {
        self.in_progress.push(ch);
    }

    /// The line currently being revealed.
    pub fn in_progress(&self) -> &str {
        &self.in_progress
    }

    /// Finalized lines of the current page, oldest first.
    pub fn completed(&self) -> &[String] {
        &self.completed
    }

    /// Slot of the in-progress line within the page.
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    /// Move the in-progress line into the completed set and advance to the next slot.
    pub fn commit_line(&mut self) -> LineCommit {
        self.completed.push(std::mem::take(&mut self.in_progress));
        self.line_index += 1;

        if self.line_index < self.max_lines {
            return LineCommit::SamePage;
        }

        self.line_index = 0;
        let page = std::mem::replace(&mut self.completed, Vec::with_capacity(self.max_lines));
        LineCommit::PageFull(page)
    }

    /// Commit a non-empty in-progress line at end of input.
    ///
    /// The slot index is left alone: no more characters follow, so no page break can happen.
    pub fn finish(&mut self) {
        if !self.in_progress.is_empty() {
            self.completed.push(std::mem::take(&mut self.in_progress));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/state.rs"]
mod tests;
