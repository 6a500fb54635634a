//! Frame rasterization.
//!
//! [`PageBackend`] is the seam between the sequencer and the glyph/compositing machinery: the
//! sequencer decides what goes where, a backend measures text and turns a [`PageScene`] into
//! pixels.
//!
//! [`PageScene`]: crate::PageScene

/// Frame type and backend trait.
pub mod backend;
/// CPU backend built on Parley and `vello_cpu`.
pub mod cpu;
