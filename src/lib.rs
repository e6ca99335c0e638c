#![doc = include_str!("../README.md")]

mod channel;
mod chunk;
mod codec;
pub mod error;
pub mod records;
mod sink;
mod write;

pub use channel::Channel;
pub use error::{TideError, TideResult};
pub use sink::ByteSink;
pub use write::LogWriter;
