//! matrix-index: a row-major matrix over flat storage with NumPy-style
//! advanced indexing.
//!
//! A [`Tensor`] validates that a shape and a flat buffer agree; a [`Matrix`]
//! wraps a two-dimensional tensor and answers index expressions with either a
//! single value or a freshly copied sub-matrix:
//!
//! ```rust
//! use matrix_index::{Matrix, Slice};
//!
//! let m = Matrix::new((10, 10), (0..100).collect()).unwrap();
//! assert_eq!(m.get((1, 1)).unwrap().into_scalar(), Some(11));
//!
//! let odd_rows = m.get(Slice::range(1, 7).with_step(2)).unwrap();
//! assert_eq!(odd_rows.into_matrix().unwrap().shape(), (3, 10));
//!
//! let block = m.query("[1, 4], [1, 4]").unwrap().into_matrix().unwrap();
//! assert_eq!(block.to_vec(), vec![11, 14, 41, 44]);
//! ```
//!
//! Matrices are immutable; no operation writes to existing storage.
pub mod config;
pub mod display;
pub mod error;
pub mod index;
pub mod math;

pub use config::{Alignment, FormatConfig};
pub use error::{ErrorKind, MatrixError, Result};
pub use index::{Axis, IndexExpr, ResolvedSelection, Slice};
pub use math::{Matrix, Selection, Shape, Tensor};
