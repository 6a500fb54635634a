//! Page layout: parameters, per-page render state, and the scene handed to a backend.

pub(crate) mod params;
pub(crate) mod scene;
pub(crate) mod state;
