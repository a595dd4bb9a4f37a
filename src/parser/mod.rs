//! Parser module: recursive-descent parser with a precedence ladder.

pub mod core;
pub mod declarations;
pub mod expressions;
#[cfg(test)]
mod tests;

pub use core::{ParseResult, Parser};
