//! HTTP Handlers

mod example;
mod generate;
mod health;

pub use example::*;
pub use generate::*;
pub use health::*;
