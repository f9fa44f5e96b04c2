// Public API exports

pub mod ast;
pub mod error;
pub mod parser;
pub mod emitter;
pub mod generator;
pub mod output;

#[cfg(test)]
mod fixtures;
