//! Shared source-text primitives for the lexer and parser crates.

pub mod position;
pub mod text_slice;

pub use position::Position;
pub use text_slice::TextSlice;
