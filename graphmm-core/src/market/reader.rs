//! Matrix Market parsing for `coordinate real general` documents.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::instrument;

use super::BANNER;
use crate::{
    error::MarketError,
    matrix::{Entry, SparseMatrix},
};

/// Upper bound on entries reserved up front from an untrusted size line.
const MAX_PREALLOCATED_ENTRIES: usize = 1 << 20;

/// Reads Matrix Market coordinate files back into [`SparseMatrix`] values.
///
/// Only the `matrix coordinate real general` layout is accepted, which is the
/// layout produced by [`crate::MatrixMarketWriter`]. Repeated coordinates are
/// kept as separate entries.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use graphmm_core::{Entry, MatrixMarketReader};
///
/// let text = "%%MatrixMarket matrix coordinate real general\n% note\n2 2 1\n2 1 1.0\n";
/// let matrix = MatrixMarketReader::read_from(Cursor::new(text))?;
/// assert_eq!(matrix.entries(), &[Entry::new(1, 0, 1.0)]);
/// # Ok::<(), graphmm_core::MarketError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixMarketReader;

impl MatrixMarketReader {
    /// Reads the Matrix Market file stored at `path`.
    ///
    /// # Errors
    /// Returns [`MarketError::Io`] when the file cannot be read, or any
    /// [`MarketError`] produced by [`Self::read_from`].
    #[instrument(name = "market.read_path", err, fields(path = %path.display()))]
    pub fn read_path(path: &Path) -> Result<SparseMatrix, MarketError> {
        let file = File::open(path).map_err(|source| MarketError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::read_from(BufReader::new(file)).map_err(|err| match err {
            MarketError::Stream { source } => MarketError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Reads a Matrix Market document from any buffered reader.
    ///
    /// # Errors
    /// Returns [`MarketError::MissingBanner`] or
    /// [`MarketError::UnsupportedBanner`] for an unexpected first line,
    /// [`MarketError::InvalidSizeLine`] or [`MarketError::InvalidEntry`] for
    /// malformed lines, [`MarketError::EntryOutOfBounds`] for coordinates
    /// outside the declared shape, and [`MarketError::EntryCountMismatch`]
    /// when the entry count disagrees with the size line.
    pub fn read_from<R: BufRead>(reader: R) -> Result<SparseMatrix, MarketError> {
        let mut lines = (1..).zip(reader.lines());

        let banner = match lines.next() {
            Some((_, line)) => line.map_err(|source| MarketError::Stream { source })?,
            None => return Err(MarketError::MissingBanner),
        };
        check_banner(&banner)?;

        let mut shape: Option<Shape> = None;
        let mut entries = Vec::new();
        for (line, raw) in lines {
            let content = raw.map_err(|source| MarketError::Stream { source })?;
            let trimmed = content.trim();
            if trimmed.is_empty() || trimmed.starts_with('%') {
                continue;
            }
            match shape {
                None => {
                    let parsed = Shape::parse(line, trimmed)?;
                    entries.reserve(parsed.declared_capacity());
                    shape = Some(parsed);
                }
                Some(ref declared) => entries.push(declared.parse_entry(line, trimmed)?),
            }
        }

        let shape = shape.ok_or(MarketError::MissingSizeLine)?;
        let found = u64::try_from(entries.len()).unwrap_or(u64::MAX);
        if found != shape.nnz {
            return Err(MarketError::EntryCountMismatch {
                declared: shape.nnz,
                found,
            });
        }
        Ok(SparseMatrix::from_checked_parts(
            shape.rows, shape.cols, entries,
        ))
    }
}

fn check_banner(banner: &str) -> Result<(), MarketError> {
    let found: Vec<&str> = banner.split_whitespace().collect();
    if !found
        .first()
        .is_some_and(|word| word.eq_ignore_ascii_case("%%MatrixMarket"))
    {
        return Err(MarketError::MissingBanner);
    }
    let expected: Vec<&str> = BANNER.split_whitespace().collect();
    let supported = found.len() == expected.len()
        && found
            .iter()
            .zip(&expected)
            .all(|(word, wanted)| word.eq_ignore_ascii_case(wanted));
    if !supported {
        return Err(MarketError::UnsupportedBanner {
            banner: banner.to_owned(),
        });
    }
    Ok(())
}

struct Shape {
    rows: u64,
    cols: u64,
    nnz: u64,
}

impl Shape {
    fn parse(line: usize, content: &str) -> Result<Self, MarketError> {
        let invalid = || MarketError::InvalidSizeLine {
            line,
            content: content.to_owned(),
        };
        let fields: Vec<&str> = content.split_whitespace().collect();
        let [rows, cols, nnz] = fields.as_slice() else {
            return Err(invalid());
        };
        Ok(Self {
            rows: rows.parse().map_err(|_| invalid())?,
            cols: cols.parse().map_err(|_| invalid())?,
            nnz: nnz.parse().map_err(|_| invalid())?,
        })
    }

    fn declared_capacity(&self) -> usize {
        usize::try_from(self.nnz)
            .unwrap_or(usize::MAX)
            .min(MAX_PREALLOCATED_ENTRIES)
    }

    fn parse_entry(&self, line: usize, content: &str) -> Result<Entry, MarketError> {
        let invalid = || MarketError::InvalidEntry {
            line,
            content: content.to_owned(),
        };
        let fields: Vec<&str> = content.split_whitespace().collect();
        let [row, col, value] = fields.as_slice() else {
            return Err(invalid());
        };
        let row: u64 = row.parse().map_err(|_| invalid())?;
        let col: u64 = col.parse().map_err(|_| invalid())?;
        let value: f64 = value.parse().map_err(|_| invalid())?;

        let in_bounds = |index: u64, extent: u64| (1..=extent).contains(&index);
        if !in_bounds(row, self.rows) || !in_bounds(col, self.cols) {
            return Err(MarketError::EntryOutOfBounds {
                line,
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(Entry::new(row - 1, col - 1, value))
    }
}
