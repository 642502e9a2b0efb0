//! Error types for the graphmm pipeline.
//!
//! Each stage owns an error enum with a stable machine-readable code so the
//! CLI can log failures without matching on display strings. [`ConvertError`]
//! wraps the stage errors for callers driving the whole pipeline.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident
                    $( { $($fields:tt)* } )? $( ( $($elems:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($fields)* } )? $( ( $($elems)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Explains why an edge-list line was rejected.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormatReason {
    /// The line did not split into exactly two whitespace-separated fields.
    TokenCount {
        /// Number of fields found on the line.
        found: usize,
    },
    /// A field was not a non-negative integer.
    InvalidNodeId {
        /// The offending field.
        token: String,
    },
}

impl fmt::Display for FormatReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenCount { found } => write!(f, "expected 2 fields but found {found}"),
            Self::InvalidNodeId { token } => {
                write!(f, "`{token}` is not a non-negative integer node id")
            }
        }
    }
}

/// Errors raised while reading an edge list.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ReadError {
    /// The edge-list file could not be opened or read.
    #[error("failed to read edge list `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading from a caller-supplied stream failed.
    #[error("failed to read edge list stream: {source}")]
    Stream {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A line did not describe a single edge.
    #[error("line {line}: {reason}: `{content}`")]
    Format {
        /// One-based line number.
        line: usize,
        /// The line as read, without its terminator.
        content: String,
        /// Why the line was rejected.
        reason: FormatReason,
    },
}

define_error_codes! {
    /// Stable codes describing [`ReadError`] variants.
    enum ReadErrorCode for ReadError {
        /// The edge-list file could not be opened or read.
        Io => Io { .. } => "READ_IO",
        /// Reading from a caller-supplied stream failed.
        Stream => Stream { .. } => "READ_STREAM",
        /// A line did not describe a single edge.
        Format => Format { .. } => "READ_FORMAT",
    }
}

/// Errors raised while materialising a sparse matrix.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MatrixError {
    /// `max_id + 1` does not fit the dimension type.
    #[error("node id {max_id} leaves no room for a matrix dimension")]
    DimensionOverflow {
        /// Largest node id in the graph.
        max_id: u64,
    },
}

define_error_codes! {
    /// Stable codes describing [`MatrixError`] variants.
    enum MatrixErrorCode for MatrixError {
        /// `max_id + 1` does not fit the dimension type.
        DimensionOverflow => DimensionOverflow { .. } => "MATRIX_DIMENSION_OVERFLOW",
    }
}

/// Errors raised while writing a Matrix Market file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum WriteError {
    /// The output path could not be written.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Writing to a caller-supplied stream failed.
    #[error("failed to write Matrix Market stream: {source}")]
    Stream {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

define_error_codes! {
    /// Stable codes describing [`WriteError`] variants.
    enum WriteErrorCode for WriteError {
        /// The output path could not be written.
        Io => Io { .. } => "WRITE_IO",
        /// Writing to a caller-supplied stream failed.
        Stream => Stream { .. } => "WRITE_STREAM",
    }
}

/// Errors raised while parsing a Matrix Market file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MarketError {
    /// The file could not be opened or read.
    #[error("failed to read Matrix Market file `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading from a caller-supplied stream failed.
    #[error("failed to read Matrix Market stream: {source}")]
    Stream {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The first line was not a `%%MatrixMarket` banner.
    #[error("missing `%%MatrixMarket` banner")]
    MissingBanner,
    /// The banner named a layout other than `matrix coordinate real general`.
    #[error("unsupported Matrix Market banner `{banner}`")]
    UnsupportedBanner {
        /// The banner line as read.
        banner: String,
    },
    /// The file ended before the size line.
    #[error("missing size line")]
    MissingSizeLine,
    /// The size line was not three non-negative integers.
    #[error("line {line}: invalid size line `{content}`")]
    InvalidSizeLine {
        /// One-based line number.
        line: usize,
        /// The line as read.
        content: String,
    },
    /// An entry line was not `row col value`.
    #[error("line {line}: invalid entry `{content}`")]
    InvalidEntry {
        /// One-based line number.
        line: usize,
        /// The line as read.
        content: String,
    },
    /// An entry referenced a coordinate outside the declared dimensions.
    #[error("line {line}: entry ({row}, {col}) lies outside a {rows}x{cols} matrix")]
    EntryOutOfBounds {
        /// One-based line number.
        line: usize,
        /// One-based row as written.
        row: u64,
        /// One-based column as written.
        col: u64,
        /// Declared row count.
        rows: u64,
        /// Declared column count.
        cols: u64,
    },
    /// The number of entries did not match the size line.
    #[error("size line declares {declared} entries but {found} were present")]
    EntryCountMismatch {
        /// Entry count from the size line.
        declared: u64,
        /// Entry lines actually read.
        found: u64,
    },
}

define_error_codes! {
    /// Stable codes describing [`MarketError`] variants.
    enum MarketErrorCode for MarketError {
        /// The file could not be opened or read.
        Io => Io { .. } => "MARKET_IO",
        /// Reading from a caller-supplied stream failed.
        Stream => Stream { .. } => "MARKET_STREAM",
        /// The first line was not a `%%MatrixMarket` banner.
        MissingBanner => MissingBanner => "MARKET_MISSING_BANNER",
        /// The banner named an unsupported layout.
        UnsupportedBanner => UnsupportedBanner { .. } => "MARKET_UNSUPPORTED_BANNER",
        /// The file ended before the size line.
        MissingSizeLine => MissingSizeLine => "MARKET_MISSING_SIZE_LINE",
        /// The size line was malformed.
        InvalidSizeLine => InvalidSizeLine { .. } => "MARKET_INVALID_SIZE_LINE",
        /// An entry line was malformed.
        InvalidEntry => InvalidEntry { .. } => "MARKET_INVALID_ENTRY",
        /// An entry lay outside the declared dimensions.
        EntryOutOfBounds => EntryOutOfBounds { .. } => "MARKET_ENTRY_OUT_OF_BOUNDS",
        /// The entry count did not match the size line.
        EntryCountMismatch => EntryCountMismatch { .. } => "MARKET_ENTRY_COUNT_MISMATCH",
    }
}

/// Error type produced by [`crate::Converter`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Reading the edge list failed.
    #[error(transparent)]
    Read(#[from] ReadError),
    /// Building the sparse matrix failed.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    /// Writing the Matrix Market output failed.
    #[error(transparent)]
    Write(#[from] WriteError),
}

define_error_codes! {
    /// Stable codes describing the pipeline stage behind a [`ConvertError`].
    enum ConvertErrorCode for ConvertError {
        /// Reading the edge list failed.
        Read => Read(..) => "CONVERT_READ",
        /// Building the sparse matrix failed.
        Matrix => Matrix(..) => "CONVERT_MATRIX",
        /// Writing the Matrix Market output failed.
        Write => Write(..) => "CONVERT_WRITE",
    }
}

impl ConvertError {
    /// Retrieve the code of the stage error wrapped by this error.
    #[must_use]
    pub const fn stage_code(&self) -> &'static str {
        match self {
            Self::Read(error) => error.code().as_str(),
            Self::Matrix(error) => error.code().as_str(),
            Self::Write(error) => error.code().as_str(),
        }
    }
}

/// Convenient alias for results returned by the pipeline.
pub type Result<T> = core::result::Result<T, ConvertError>;
