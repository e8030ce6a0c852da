//! Containers: the shape/storage validator and the 2-D matrix built on it.
pub mod matrix;
pub mod tensor;

pub use matrix::{Matrix, Selection};
pub use tensor::{Shape, Tensor};
