//! Edge list to Matrix Market conversion.
//!
//! The pipeline runs in three stages: [`GraphReader`] parses a plain-text
//! edge list into a [`Graph`], [`SparseMatrix::from_graph`] materialises its
//! adjacency matrix in coordinate form, and [`MatrixMarketWriter`] emits the
//! `coordinate real general` document. [`Converter`] drives all three for a
//! single input and output.

mod converter;
mod error;
mod graph;
pub mod market;
mod matrix;
mod reader;

pub use crate::{
    converter::{ConversionSummary, Converter, ConverterBuilder},
    error::{
        ConvertError, ConvertErrorCode, FormatReason, MarketError, MarketErrorCode, MatrixError,
        MatrixErrorCode, ReadError, ReadErrorCode, Result, WriteError, WriteErrorCode,
    },
    graph::{Edge, Graph, GraphKind, NodeId},
    market::{MatrixMarketReader, MatrixMarketWriter},
    matrix::{EDGE_WEIGHT, Entry, SparseMatrix},
    reader::{CommentPolicy, GraphReader},
};
