use std::fmt;
use std::ops::Index;

use itertools::iproduct;
use num_traits::{One, Zero};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::FormatConfig;
use crate::display;
use crate::error::{MatrixError, Result};
use crate::index::{self, canonical_index, IndexExpr, ResolvedSelection};
use crate::math::tensor::{json_type_name, Shape, Tensor};

/// Row-major 2-D view over a validated [`Tensor`].
///
/// Matrices are never mutated after construction; every sub-selection copies
/// the selected values into a new matrix.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Matrix<V> {
    tensor: Tensor<V>,
    rows: usize,
    cols: usize,
}

/// Result of [`Matrix::get`]: a single value or a sub-matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection<V> {
    Scalar(V),
    Matrix(Matrix<V>),
}

impl<V> Matrix<V> {
    /// Builds a `rows` x `cols` matrix from row-major `data`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidDimension`] when either dimension is zero or
    /// `rows * cols != data.len()`.
    pub fn new(dimension: (usize, usize), data: Vec<V>) -> Result<Self> {
        let tensor = Tensor::new(dimension, data)?;
        Ok(Self::from_tensor(tensor, dimension))
    }

    pub fn from_shape_vec(shape: (usize, usize), data: Vec<V>) -> Result<Self> {
        Self::new(shape, data)
    }

    /// Builds a matrix from a list of equally long rows.
    pub fn from_rows(rows: Vec<Vec<V>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if let Some(r) = rows.iter().position(|row| row.len() != ncols) {
            return Err(MatrixError::dimension(format!(
                "row {} has {} elements, expected {}",
                r,
                rows[r].len(),
                ncols
            )));
        }
        Self::new((nrows, ncols), rows.into_iter().flatten().collect())
    }

    // Selection results may have a zero-length axis.
    fn from_selection(rows: usize, cols: usize, data: Vec<V>) -> Self {
        let tensor = Tensor::from_selection(Shape::new(vec![rows, cols]), data);
        Self::from_tensor(tensor, (rows, cols))
    }

    fn from_tensor(tensor: Tensor<V>, (rows, cols): (usize, usize)) -> Self {
        Self { tensor, rows, cols }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total element count, `rows * cols`.
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    /// Only selections can be empty; constructors reject zero dimensions.
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    pub fn as_slice(&self) -> &[V] {
        self.tensor.storage()
    }

    pub fn tensor(&self) -> &Tensor<V> {
        &self.tensor
    }

    pub fn into_tensor(self) -> Tensor<V> {
        self.tensor
    }

    pub fn row_slice(&self, row: usize) -> &[V] {
        let start = row * self.cols;
        &self.as_slice()[start..start + self.cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[V]> + '_ {
        (0..self.rows).map(move |r| self.row_slice(r))
    }

    pub fn to_vec(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.as_slice().to_vec()
    }

    /// Flat offset of `(row, col)`; negative coordinates count from the end.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexRange`] unless `-rows <= row < rows` and
    /// `-cols <= col < cols`.
    pub fn coord_to_offset(&self, row: isize, col: isize) -> Result<usize> {
        let r = canonical_index(row, self.rows)?;
        let c = canonical_index(col, self.cols)?;
        Ok(r * self.cols + c)
    }

    /// Row-major decomposition of a flat offset.
    pub fn offset_to_coord(&self, flat: usize) -> Result<(usize, usize)> {
        if flat >= self.len() {
            return Err(MatrixError::FlatIndexRange {
                index: flat,
                len: self.len(),
            });
        }
        Ok((flat / self.cols, flat % self.cols))
    }

    /// Resolves `expr` to concrete row and column indices without copying.
    pub fn resolve(&self, expr: &IndexExpr) -> Result<ResolvedSelection> {
        index::resolve(expr, self.rows, self.cols)
    }

    /// Indexes the matrix.
    ///
    /// A selection of exactly one row and one column yields
    /// [`Selection::Scalar`]; anything else, empty selections included,
    /// yields a new [`Matrix`] of shape `(selected rows, selected cols)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use matrix_index::{Matrix, Selection};
    ///
    /// let m = Matrix::new((3, 3), (0..9).collect()).unwrap();
    /// assert_eq!(m.get((1, 1)).unwrap(), Selection::Scalar(4));
    /// let last_row = m.get(-1).unwrap().into_matrix().unwrap();
    /// assert_eq!(last_row.to_vec(), vec![6, 7, 8]);
    /// let corners = m.get((vec![0, 2], vec![0, 2])).unwrap().into_matrix().unwrap();
    /// assert_eq!(corners.to_vec(), vec![0, 2, 6, 8]);
    /// ```
    pub fn get(&self, expr: impl Into<IndexExpr>) -> Result<Selection<V>>
    where
        V: Clone,
    {
        let selection = self.resolve(&expr.into())?;
        self.materialize(&selection)
    }

    /// Parses `expr` as NumPy subscript text, then indexes with it.
    pub fn query(&self, expr: &str) -> Result<Selection<V>>
    where
        V: Clone,
    {
        self.get(expr.parse::<IndexExpr>()?)
    }

    fn materialize(&self, selection: &ResolvedSelection) -> Result<Selection<V>>
    where
        V: Clone,
    {
        let data = self.as_slice();
        if selection.is_scalar() {
            let offset = self.coord_to_offset(selection.rows[0], selection.cols[0])?;
            return Ok(Selection::Scalar(data[offset].clone()));
        }
        let values = iproduct!(selection.rows.iter(), selection.cols.iter())
            .map(|(&r, &c)| self.coord_to_offset(r, c).map(|offset| data[offset].clone()))
            .collect::<Result<Vec<V>>>()?;
        let (rows, cols) = selection.shape();
        log::debug!(
            "materialized {}x{} selection from {}x{} matrix",
            rows,
            cols,
            self.rows,
            self.cols
        );
        Ok(Selection::Matrix(Matrix::from_selection(rows, cols, values)))
    }

    pub fn mapv<U, F>(&self, f: F) -> Matrix<U>
    where
        F: FnMut(&V) -> U,
    {
        let data: Vec<U> = self.as_slice().iter().map(f).collect();
        Matrix::from_selection(self.rows, self.cols, data)
    }

    /// Renders the matrix as a grid using `config`.
    pub fn render(&self, config: &FormatConfig) -> String
    where
        V: fmt::Display,
    {
        display::render(self, config)
    }

    /// Grid rendering with the default [`FormatConfig`].
    pub fn to_display_string(&self) -> String
    where
        V: fmt::Display,
    {
        self.render(&FormatConfig::default())
    }
}

impl<V: Clone> Matrix<V> {
    pub fn from_elem(dimension: (usize, usize), value: V) -> Result<Self> {
        let len = dimension.0.checked_mul(dimension.1).ok_or_else(|| {
            MatrixError::dimension(format!(
                "volume of shape ({}, {}) overflows usize",
                dimension.0, dimension.1
            ))
        })?;
        Self::new(dimension, vec![value; len])
    }
}

impl<V: Clone + Zero> Matrix<V> {
    pub fn zeros(dimension: (usize, usize)) -> Result<Self> {
        Self::from_elem(dimension, V::zero())
    }
}

impl<V: Clone + One> Matrix<V> {
    pub fn ones(dimension: (usize, usize)) -> Result<Self> {
        Self::from_elem(dimension, V::one())
    }
}

impl<V: DeserializeOwned> Matrix<V> {
    /// Validates loosely-typed input. `dimension` must be a two-element JSON
    /// array and `data` an array of values deserializable into `V`.
    pub fn from_json(dimension: &Value, data: &Value) -> Result<Self> {
        if !dimension.is_array() {
            return Err(MatrixError::TypeShape {
                found: json_type_name(dimension).to_string(),
            });
        }
        Self::try_from(Tensor::from_json(dimension, data)?)
    }
}

impl<V> TryFrom<Tensor<V>> for Matrix<V> {
    type Error = MatrixError;

    fn try_from(tensor: Tensor<V>) -> Result<Self> {
        let dimension = match tensor.shape().dims() {
            &[rows, cols] => (rows, cols),
            dims => {
                return Err(MatrixError::dimension(format!(
                    "a matrix needs 2 dimensions, found {}",
                    dims.len()
                )))
            }
        };
        Ok(Self::from_tensor(tensor, dimension))
    }
}

impl<V> Index<(usize, usize)> for Matrix<V> {
    type Output = V;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.rows && col < self.cols,
            "matrix index ({}, {}) out of bounds for shape ({}, {})",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.as_slice()[row * self.cols + col]
    }
}

impl<V: fmt::Display> fmt::Display for Matrix<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl<V> Selection<V> {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Selection::Scalar(_))
    }

    pub fn into_scalar(self) -> Option<V> {
        match self {
            Selection::Scalar(value) => Some(value),
            Selection::Matrix(_) => None,
        }
    }

    pub fn into_matrix(self) -> Option<Matrix<V>> {
        match self {
            Selection::Matrix(matrix) => Some(matrix),
            Selection::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&V> {
        match self {
            Selection::Scalar(value) => Some(value),
            Selection::Matrix(_) => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Matrix<V>> {
        match self {
            Selection::Matrix(matrix) => Some(matrix),
            Selection::Scalar(_) => None,
        }
    }
}

impl<V: fmt::Display> fmt::Display for Selection<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Scalar(value) => write!(f, "{}", value),
            Selection::Matrix(matrix) => write!(f, "{}", matrix),
        }
    }
}
