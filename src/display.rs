use std::fmt;

use itertools::Itertools;

use crate::config::FormatConfig;
use crate::math::Matrix;

/// Renders `matrix` as a bracketed grid, one line per row:
///
/// ```text
/// [
///    0   1
///   10  11
/// ]
/// ```
///
/// Every cell is padded to the width of the longest rendered value.
pub fn render<V: fmt::Display>(matrix: &Matrix<V>, config: &FormatConfig) -> String {
    let cells: Vec<String> = matrix.as_slice().iter().map(|v| v.to_string()).collect();
    let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    let indent = " ".repeat(config.indent);
    let cols = matrix.ncols();

    let mut out = String::from("[\n");
    for row in 0..matrix.nrows() {
        let line = cells[row * cols..(row + 1) * cols]
            .iter()
            .map(|cell| config.alignment.pad(cell, width))
            .join(&config.separator);
        out.push_str(&indent);
        out.push_str(&line);
        out.push('\n');
    }
    out.push(']');
    out
}
