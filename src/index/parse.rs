//! NumPy subscript syntax for [`IndexExpr`].
//!
//! `"1"`, `"-1"`, `"[1, 4]"`, `"1:7:2"`, `"::-1"`, `"1:4, [1, 4]"` and
//! `"(:, 0)"` all parse. A lone parenthesized expression without a comma is
//! just that expression; with a comma it is a tuple and must have exactly
//! two entries.
use std::str::FromStr;

use crate::error::{MatrixError, Result};
use crate::index::{IndexExpr, Slice};

impl FromStr for IndexExpr {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        parse_tuple_or_expr(s)
    }
}

fn parse_tuple_or_expr(text: &str) -> Result<IndexExpr> {
    let (parts, trailing_comma) = split_top_level(text)?;
    if parts.len() == 1 && !trailing_comma {
        return parse_expr(parts[0]);
    }
    let items = parts
        .into_iter()
        .map(parse_expr)
        .collect::<Result<Vec<_>>>()?;
    IndexExpr::tuple(items)
}

fn parse_expr(text: &str) -> Result<IndexExpr> {
    let text = text.trim();
    if let Some(inner) = strip_delimiters(text, '(', ')') {
        return parse_tuple_or_expr(inner);
    }
    if let Some(inner) = strip_delimiters(text, '[', ']') {
        return parse_list(inner);
    }
    if text.contains(':') {
        return parse_slice(text);
    }
    text.parse::<isize>()
        .map(IndexExpr::Scalar)
        .map_err(|_| MatrixError::index_type(format!("unsupported index '{}'", text)))
}

fn parse_list(inner: &str) -> Result<IndexExpr> {
    if inner.trim().is_empty() {
        return Ok(IndexExpr::List(Vec::new()));
    }
    let (parts, _) = split_top_level(inner)?;
    parts
        .into_iter()
        .map(|part| {
            let part = part.trim();
            part.parse::<isize>().map_err(|_| {
                MatrixError::index_type(format!("invalid list index type: '{}'", part))
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(IndexExpr::List)
}

fn parse_slice(text: &str) -> Result<IndexExpr> {
    let fields: Vec<&str> = text.split(':').map(str::trim).collect();
    if fields.len() > 3 {
        return Err(MatrixError::index_type(format!(
            "slice '{}' has more than three fields",
            text
        )));
    }
    let field = |i: usize| -> Result<Option<isize>> {
        match fields.get(i) {
            None => Ok(None),
            Some(f) if f.is_empty() => Ok(None),
            Some(f) => f.parse::<isize>().map(Some).map_err(|_| {
                MatrixError::index_type(format!("invalid slice field '{}' in '{}'", f, text))
            }),
        }
    };
    Ok(IndexExpr::Range(Slice::new(field(0)?, field(1)?, field(2)?)))
}

/// Returns the text between `open` and `close` when they wrap the whole of
/// `text` (not just its two ends).
fn strip_delimiters(text: &str, open: char, close: char) -> Option<&str> {
    let inner = text.strip_prefix(open)?.strip_suffix(close)?;
    let mut depth = 0i32;
    for ch in inner.chars() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    Some(inner)
}

/// Splits on commas outside brackets. The flag reports a trailing comma,
/// which turns a single entry into a one-element tuple.
fn split_top_level(text: &str) -> Result<(Vec<&str>, bool)> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut begin = 0;
    for (pos, ch) in text.char_indices() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&text[begin..pos]);
                begin = pos + 1;
            }
            _ => {}
        }
        if depth < 0 {
            return Err(MatrixError::index_type(format!("unbalanced brackets in '{}'", text)));
        }
    }
    if depth != 0 {
        return Err(MatrixError::index_type(format!("unbalanced brackets in '{}'", text)));
    }
    parts.push(&text[begin..]);

    let trailing_comma = parts.len() > 1 && parts.last().map_or(false, |p| p.trim().is_empty());
    if trailing_comma {
        parts.pop();
    }
    if parts.iter().any(|p| p.trim().is_empty()) {
        return Err(MatrixError::index_type(format!("empty index in '{}'", text)));
    }
    Ok((parts, trailing_comma))
}
