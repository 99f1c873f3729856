//! Data models for Budget Bridge

mod budget;
mod event;
mod slack;

pub use budget::*;
pub use event::*;
pub use slack::*;
