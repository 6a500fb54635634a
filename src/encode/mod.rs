//! Encoding sinks.
//!
//! Sinks consume frames in output order and are driven by [`crate::render_to_sink`].

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
