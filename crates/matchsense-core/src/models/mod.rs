//! Domain models for the matching pipeline.

mod matching;
mod purchase;
mod register;

pub use matching::*;
pub use purchase::*;
pub use register::*;
