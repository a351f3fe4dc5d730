#![forbid(unsafe_code)]

mod framing;
mod stdio;

pub(crate) use stdio::run_stdio;
#[cfg(test)]
pub(crate) use {framing::MAX_CONTENT_LENGTH_BYTES, stdio::serve};
