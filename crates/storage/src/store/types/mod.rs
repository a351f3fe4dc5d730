#![forbid(unsafe_code)]

mod evidence;
mod review;
mod stats;

pub use evidence::*;
pub use review::*;
pub use stats::*;
