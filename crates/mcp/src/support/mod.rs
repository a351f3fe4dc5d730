#![forbid(unsafe_code)]

mod build_info;
mod jsonrpc;
mod logging;
mod runtime;

pub(crate) use build_info::*;
pub(crate) use jsonrpc::*;
pub(crate) use logging::*;
pub(crate) use runtime::*;
