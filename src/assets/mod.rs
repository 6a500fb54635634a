//! Resource loading: the font used for measurement and drawing, and the cursor marker image.
//!
//! Both are loaded and validated before sequencing starts.

pub(crate) mod decode;
pub(crate) mod font;
pub(crate) mod marker;
