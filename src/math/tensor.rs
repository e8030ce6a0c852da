//! Validated shape/storage pair shared by every container in the crate.
//!
//! A `Tensor` only checks that a shape and a flat, row-major buffer agree;
//! all indexing lives in [`crate::math::matrix`].
use std::fmt;
use std::slice::Iter;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{MatrixError, Result};

/// Ordered list of dimension lengths.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shape(Vec<usize>);

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        Shape(dims)
    }

    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.0.get(axis).copied()
    }

    /// Product of all dimension lengths, saturating at `usize::MAX`.
    pub fn volume(&self) -> usize {
        self.checked_volume().unwrap_or(usize::MAX)
    }

    /// Product of all dimension lengths, or `None` if it overflows `usize`.
    pub fn checked_volume(&self) -> Option<usize> {
        self.0.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(MatrixError::dimension("shape must have at least one dimension"));
        }
        if let Some(axis) = self.0.iter().position(|&d| d == 0) {
            return Err(MatrixError::dimension(format!(
                "dimension {} of shape {} is not a positive integer",
                axis, self
            )));
        }
        if self.checked_volume().is_none() {
            return Err(MatrixError::dimension(format!(
                "volume of shape {} overflows usize",
                self
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        if self.0.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

impl From<usize> for Shape {
    fn from(len: usize) -> Self {
        Shape(vec![len])
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape(dims.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Shape(dims.to_vec())
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape(vec![rows, cols])
    }
}

/// A shape together with row-major storage whose length matches its volume.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tensor<V> {
    shape: Shape,
    storage: Vec<V>,
}

impl<V> Tensor<V> {
    /// Validates `shape` against `storage` and takes ownership of both.
    ///
    /// Fails with [`MatrixError::InvalidDimension`] when the shape is empty,
    /// has a zero-length dimension, or its volume differs from `storage.len()`.
    pub fn new(shape: impl Into<Shape>, storage: Vec<V>) -> Result<Self> {
        let shape = shape.into();
        shape.validate()?;
        if shape.volume() != storage.len() {
            return Err(MatrixError::dimension(format!(
                "shape {} has volume {} but storage holds {} elements",
                shape,
                shape.volume(),
                storage.len()
            )));
        }
        log::trace!("validated tensor of shape {}", shape);
        Ok(Self { shape, storage })
    }

    /// Builds a tensor from a selection result. Zero-length dimensions are
    /// allowed here; the volume must still match.
    pub(crate) fn from_selection(shape: Shape, storage: Vec<V>) -> Self {
        debug_assert_eq!(shape.volume(), storage.len());
        Self { shape, storage }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    pub fn storage(&self) -> &[V] {
        &self.storage
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, V> {
        self.storage.iter()
    }

    pub fn into_storage(self) -> Vec<V> {
        self.storage
    }

    pub fn into_parts(self) -> (Shape, Vec<V>) {
        (self.shape, self.storage)
    }
}

impl<V: DeserializeOwned> Tensor<V> {
    /// Validates loosely-typed input.
    ///
    /// `shape` must be a JSON integer or an array, and `storage` must be an
    /// array whose elements deserialize into `V`. Both type checks run before
    /// any dimension is inspected.
    pub fn from_json(shape: &Value, storage: &Value) -> Result<Self> {
        let dims = shape_entries(shape)?;
        let storage = storage_from_json(storage)?;
        let shape = dims
            .iter()
            .enumerate()
            .map(|(axis, item)| match json_integer(item) {
                Some(len) => positive_dim(len, axis),
                None => Err(MatrixError::dimension(format!(
                    "dimension {} is not an integer: {}",
                    axis, item
                ))),
            })
            .collect::<Result<Vec<usize>>>()?;
        Tensor::new(shape, storage)
    }
}

// Top-level shape type check only; the entries are validated later.
fn shape_entries(value: &Value) -> Result<Vec<&Value>> {
    match value {
        Value::Number(n) if json_integer(value).is_none() => Err(MatrixError::TypeShape {
            found: format!("number {}", n),
        }),
        Value::Number(_) => Ok(vec![value]),
        Value::Array(items) => Ok(items.iter().collect()),
        other => Err(MatrixError::TypeShape {
            found: json_type_name(other).to_string(),
        }),
    }
}

fn json_integer(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

fn positive_dim(len: i128, axis: usize) -> Result<usize> {
    match usize::try_from(len) {
        Ok(len) if len > 0 => Ok(len),
        _ => Err(MatrixError::dimension(format!(
            "dimension {} is not a positive integer: {}",
            axis, len
        ))),
    }
}

fn storage_from_json<V: DeserializeOwned>(value: &Value) -> Result<Vec<V>> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item.clone()).map_err(|e| MatrixError::TypeStorage {
                    found: format!("element {} ({}): {}", i, json_type_name(item), e),
                })
            })
            .collect(),
        other => Err(MatrixError::TypeStorage {
            found: json_type_name(other).to_string(),
        }),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<V: fmt::Display> fmt::Display for Tensor<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.storage.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.storage.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
