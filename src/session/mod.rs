pub(crate) mod job;
pub(crate) mod stream;
