//! Index expressions accepted by [`Matrix::get`](crate::math::Matrix::get).
//!
//! An [`IndexExpr`] is one of four shapes:
//!
//! | expression            | Rust value                  | text form        |
//! |-----------------------|-----------------------------|------------------|
//! | scalar                | `1`, `-1`                   | `"1"`            |
//! | list                  | `vec![1, 4]`, `[1, 4]`      | `"[1, 4]"`       |
//! | slice                 | `1..4`, `..`, `Slice`       | `"1:7:2"`        |
//! | pair (row, column)    | `(1..4, [1, 4])`            | `"1:4, [1, 4]"`  |
//!
//! Integers follow wraparound rules: on an axis of length `n` the valid range
//! is `[-n, n)` and `-1` names the last entry.
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::{MatrixError, Result};

mod parse;
pub mod resolve;

pub use resolve::{resolve, resolve_axis, Axis, ResolvedSelection};

/// Start/stop/step selector. Missing fields take defaults that depend on the
/// sign of `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Slice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl Slice {
    pub const fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Slice { start, stop, step }
    }

    /// Equivalent of `:`.
    pub const fn full() -> Self {
        Slice::new(None, None, None)
    }

    pub const fn range(start: isize, stop: isize) -> Self {
        Slice::new(Some(start), Some(stop), None)
    }

    pub const fn with_step(self, step: isize) -> Self {
        Slice {
            step: Some(step),
            ..self
        }
    }

    /// Normalizes this slice against an axis of length `len`, returning the
    /// concrete `(start, stop, step)` triple.
    ///
    /// With a positive step the bounds are `[0, len]`; with a negative step
    /// they are `[-1, len - 1]`. Missing `start`/`stop` take the bound the
    /// step walks away from / towards. Explicit negative values are offset by
    /// `len`, then anything outside the bounds is clamped onto them.
    pub fn indices(&self, len: usize) -> Result<(isize, isize, isize)> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(MatrixError::ZeroStep);
        }
        let len = axis_len(len);
        let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };
        let clamp = |value: Option<isize>, default: isize| match value {
            None => default,
            Some(v) if v < 0 => (v + len).max(lower),
            Some(v) => v.min(upper),
        };
        let (start, stop) = if step > 0 {
            (clamp(self.start, lower), clamp(self.stop, upper))
        } else {
            (clamp(self.start, upper), clamp(self.stop, lower))
        };
        Ok((start, stop, step))
    }

    /// Enumerates the canonical indices this slice selects on an axis of
    /// length `len`. The result may be empty.
    pub fn resolve(&self, len: usize) -> Result<Vec<isize>> {
        let (start, stop, step) = self.indices(len)?;
        let mut out = Vec::new();
        let mut i = start;
        while (step > 0 && i < stop) || (step < 0 && i > stop) {
            out.push(i);
            i += step;
        }
        Ok(out)
    }
}

/// A parsed selector for one or both matrix axes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexExpr {
    Scalar(isize),
    List(Vec<isize>),
    Range(Slice),
    Pair(Box<IndexExpr>, Box<IndexExpr>),
}

impl IndexExpr {
    pub fn pair(rows: impl Into<IndexExpr>, cols: impl Into<IndexExpr>) -> Self {
        IndexExpr::Pair(Box::new(rows.into()), Box::new(cols.into()))
    }

    /// Builds a pair from a tuple of arbitrary arity. Anything but exactly
    /// two entries is rejected.
    pub fn tuple(items: Vec<IndexExpr>) -> Result<Self> {
        let arity = items.len();
        let mut items = items.into_iter();
        match (items.next(), items.next(), items.next()) {
            (Some(rows), Some(cols), None) => Ok(IndexExpr::pair(rows, cols)),
            _ => Err(MatrixError::index_type(format!(
                "invalid tuple index type: expected 2 entries, found {}",
                arity
            ))),
        }
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, IndexExpr::Pair(..))
    }
}

/// Maps `index` onto `[0, len)` with wraparound, failing when it lies outside
/// `[-len, len)`.
pub fn canonical_index(index: isize, len: usize) -> Result<usize> {
    let n = axis_len(len);
    if index < -n || index >= n {
        return Err(MatrixError::IndexRange { index, bound: len });
    }
    Ok(index.rem_euclid(n) as usize)
}

// Vec lengths never exceed isize::MAX.
fn axis_len(len: usize) -> isize {
    isize::try_from(len).unwrap_or(isize::MAX)
}

macro_rules! signed_index_conversions {
    ($($t:ty),*) => {$(
        impl From<$t> for IndexExpr {
            fn from(index: $t) -> Self {
                IndexExpr::Scalar(signed(index))
            }
        }
        impl_collection_conversions!($t, signed);
    )*};
}

macro_rules! unsigned_index_conversions {
    ($($t:ty),*) => {$(
        impl From<$t> for IndexExpr {
            fn from(index: $t) -> Self {
                IndexExpr::Scalar(unsigned(index))
            }
        }
        impl_collection_conversions!($t, unsigned);
    )*};
}

macro_rules! impl_collection_conversions {
    ($t:ty, $cast:ident) => {
        impl From<Vec<$t>> for IndexExpr {
            fn from(indices: Vec<$t>) -> Self {
                IndexExpr::List(indices.into_iter().map($cast).collect())
            }
        }
        impl From<&[$t]> for IndexExpr {
            fn from(indices: &[$t]) -> Self {
                IndexExpr::List(indices.iter().copied().map($cast).collect())
            }
        }
        impl<const N: usize> From<[$t; N]> for IndexExpr {
            fn from(indices: [$t; N]) -> Self {
                IndexExpr::List(indices.into_iter().map($cast).collect())
            }
        }
        impl From<Range<$t>> for IndexExpr {
            fn from(range: Range<$t>) -> Self {
                IndexExpr::Range(Slice::range($cast(range.start), $cast(range.end)))
            }
        }
        impl From<RangeFrom<$t>> for IndexExpr {
            fn from(range: RangeFrom<$t>) -> Self {
                IndexExpr::Range(Slice::new(Some($cast(range.start)), None, None))
            }
        }
        impl From<RangeTo<$t>> for IndexExpr {
            fn from(range: RangeTo<$t>) -> Self {
                IndexExpr::Range(Slice::new(None, Some($cast(range.end)), None))
            }
        }
    };
}

// Out-of-range values saturate so that resolution reports them.
fn signed<T: TryInto<isize> + PartialOrd + Default>(index: T) -> isize {
    let negative = index < T::default();
    index
        .try_into()
        .unwrap_or(if negative { isize::MIN } else { isize::MAX })
}

fn unsigned<T: TryInto<isize>>(index: T) -> isize {
    index.try_into().unwrap_or(isize::MAX)
}

signed_index_conversions!(i32, i64, isize);
unsigned_index_conversions!(u32, u64, usize);

impl From<RangeFull> for IndexExpr {
    fn from(_: RangeFull) -> Self {
        IndexExpr::Range(Slice::full())
    }
}

impl From<Slice> for IndexExpr {
    fn from(slice: Slice) -> Self {
        IndexExpr::Range(slice)
    }
}

impl<A, B> From<(A, B)> for IndexExpr
where
    A: Into<IndexExpr>,
    B: Into<IndexExpr>,
{
    fn from((rows, cols): (A, B)) -> Self {
        IndexExpr::pair(rows, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Straightforward model of the slice convention: walk every candidate
    /// index and keep the ones the normalized bounds admit.
    fn reference(len: isize, start: Option<isize>, stop: Option<isize>, step: isize) -> Vec<isize> {
        let norm = |v: isize| if v < 0 { v + len } else { v };
        let mut out = Vec::new();
        if step > 0 {
            let mut i = start.map(norm).unwrap_or(0).max(0);
            let end = stop.map(norm).unwrap_or(len).min(len);
            while i < end {
                out.push(i);
                i += step;
            }
        } else {
            let mut i = start.map(norm).unwrap_or(len - 1).min(len - 1);
            let end = stop.map(norm).unwrap_or(-1).max(-1);
            while i > end {
                out.push(i);
                i += step;
            }
        }
        out
    }

    #[test]
    fn slice_resolution_matches_reference_model() {
        let window: Vec<Option<isize>> = std::iter::once(None)
            .chain((-8..=8).map(Some))
            .collect();
        for len in 0..6usize {
            for &start in &window {
                for &stop in &window {
                    for step in [-3, -2, -1, 1, 2, 3] {
                        let slice = Slice::new(start, stop, Some(step));
                        let got = slice.resolve(len).unwrap();
                        let want = reference(len as isize, start, stop, step);
                        assert_eq!(
                            got, want,
                            "len={} start={:?} stop={:?} step={}",
                            len, start, stop, step
                        );
                        assert!(got.iter().all(|&i| 0 <= i && (i as usize) < len));
                    }
                }
            }
        }
    }

    #[test]
    fn negative_step_defaults_walk_backwards() {
        let slice = Slice::full().with_step(-1);
        assert_eq!(slice.indices(5).unwrap(), (4, -1, -1));
        assert_eq!(slice.resolve(5).unwrap(), vec![4, 3, 2, 1, 0]);
        assert_eq!(Slice::new(Some(-2), None, Some(-2)).resolve(6).unwrap(), vec![4, 2, 0]);
    }

    #[test]
    fn out_of_range_bounds_are_clamped() {
        assert_eq!(Slice::range(-100, 100).resolve(3).unwrap(), vec![0, 1, 2]);
        assert_eq!(Slice::range(7, 9).resolve(3).unwrap(), Vec::<isize>::new());
        assert_eq!(
            Slice::new(Some(100), Some(-100), Some(-1)).resolve(3).unwrap(),
            vec![2, 1, 0]
        );
    }

    #[test]
    fn zero_step_is_rejected() {
        let err = Slice::full().with_step(0).resolve(4).unwrap_err();
        assert_eq!(err, MatrixError::ZeroStep);
    }

    #[test]
    fn canonical_index_wraps_negatives() {
        assert_eq!(canonical_index(-1, 10).unwrap(), 9);
        assert_eq!(canonical_index(-10, 10).unwrap(), 0);
        assert_eq!(canonical_index(9, 10).unwrap(), 9);
        assert!(canonical_index(10, 10).is_err());
        assert!(canonical_index(-11, 10).is_err());
        assert!(canonical_index(0, 0).is_err());
    }

    #[test]
    fn conversions_build_the_expected_variants() {
        assert_eq!(IndexExpr::from(3), IndexExpr::Scalar(3));
        assert_eq!(IndexExpr::from(vec![1, 4]), IndexExpr::List(vec![1, 4]));
        assert_eq!(IndexExpr::from([2usize, 0]), IndexExpr::List(vec![2, 0]));
        assert_eq!(IndexExpr::from(1..4), IndexExpr::Range(Slice::range(1, 4)));
        assert_eq!(
            IndexExpr::from(..4),
            IndexExpr::Range(Slice::new(None, Some(4), None))
        );
        assert_eq!(
            IndexExpr::from((.., -1)),
            IndexExpr::pair(Slice::full(), -1)
        );
        assert_eq!(IndexExpr::from(usize::MAX), IndexExpr::Scalar(isize::MAX));
    }

    #[test]
    fn tuple_requires_two_entries() {
        assert!(IndexExpr::tuple(vec![IndexExpr::Scalar(1)]).is_err());
        assert!(IndexExpr::tuple(vec![1.into(), 2.into(), 3.into()]).is_err());
        assert_eq!(
            IndexExpr::tuple(vec![1.into(), 2.into()]).unwrap(),
            IndexExpr::pair(1, 2)
        );
    }
}
