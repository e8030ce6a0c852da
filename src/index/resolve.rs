use std::fmt;

use crate::error::{MatrixError, Result};
use crate::index::{canonical_index, IndexExpr};

/// One of the two matrix axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Rows,
    Cols,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Rows => write!(f, "row"),
            Axis::Cols => write!(f, "column"),
        }
    }
}

/// Row and column indices an expression reduces to.
///
/// Scalars and list entries are kept as written (they may be negative);
/// slice entries are already canonical. Materialization wraps them through
/// [`Matrix::coord_to_offset`](crate::math::Matrix::coord_to_offset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection {
    pub rows: Vec<isize>,
    pub cols: Vec<isize>,
}

impl ResolvedSelection {
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.cols.len())
    }

    /// True when exactly one element is selected.
    pub fn is_scalar(&self) -> bool {
        self.rows.len() == 1 && self.cols.len() == 1
    }
}

/// Resolves a single-axis expression against an axis of length `len`.
pub fn resolve_axis(expr: &IndexExpr, axis: Axis, len: usize) -> Result<Vec<isize>> {
    match expr {
        IndexExpr::Scalar(index) => {
            canonical_index(*index, len)?;
            Ok(vec![*index])
        }
        IndexExpr::List(indices) => {
            for &index in indices {
                canonical_index(index, len)?;
            }
            Ok(indices.clone())
        }
        IndexExpr::Range(slice) => slice.resolve(len),
        IndexExpr::Pair(..) => Err(MatrixError::index_type(format!(
            "invalid tuple index type for the {} axis",
            axis
        ))),
    }
}

/// Resolves a full expression against a `rows` x `cols` matrix.
///
/// A bare (non-pair) expression selects rows and keeps every column.
pub fn resolve(expr: &IndexExpr, rows: usize, cols: usize) -> Result<ResolvedSelection> {
    let selection = match expr {
        IndexExpr::Pair(row_expr, col_expr) => {
            if row_expr.is_pair() || col_expr.is_pair() {
                return Err(MatrixError::index_type("invalid tuple index type: nested tuple"));
            }
            ResolvedSelection {
                rows: resolve_axis(row_expr, Axis::Rows, rows)?,
                cols: resolve_axis(col_expr, Axis::Cols, cols)?,
            }
        }
        single => ResolvedSelection {
            rows: resolve_axis(single, Axis::Rows, rows)?,
            cols: (0..cols).map(|c| c as isize).collect(),
        },
    };
    log::trace!(
        "resolved {:?} against ({}, {}) to {} rows x {} cols",
        expr,
        rows,
        cols,
        selection.rows.len(),
        selection.cols.len()
    );
    Ok(selection)
}
