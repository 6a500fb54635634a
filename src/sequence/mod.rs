//! The frame sequencer: character-by-character reveal with line wrap and pagination.

pub(crate) mod sequencer;
