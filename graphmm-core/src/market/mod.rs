//! Matrix Market coordinate format support.
//!
//! The writer always emits `matrix coordinate real general` with explicit
//! entries for both directions of an undirected edge, so no symmetry
//! annotation is ever needed. The reader accepts the same layout.

mod reader;
mod writer;

pub use reader::MatrixMarketReader;
pub use writer::MatrixMarketWriter;

/// First line of every document produced by [`MatrixMarketWriter`].
pub const BANNER: &str = "%%MatrixMarket matrix coordinate real general";
