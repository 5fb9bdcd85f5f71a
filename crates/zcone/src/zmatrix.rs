//! Exact integer vectors and matrices.
//!
//! Purpose
//! - `ZVector`: a fixed-length row of arbitrary-precision integers (`BigInt`).
//! - `ZMatrix`: rows of equal width, stored densely in a `nalgebra::DMatrix<BigInt>`.
//!   A matrix with zero rows still carries its width (0×n is meaningful).
//!
//! Conventions
//! - Values are exact; there is no tolerance anywhere in this crate.
//! - Narrowing to machine width (`narrow::<i32>()`, `narrow::<i64>()`) never fails:
//!   entries that do not fit are replaced by 0 and reported as
//!   `ConeWarning::RangeOverflow` next to the degraded result.

use std::fmt;
use std::ops::{Index, Neg};

use nalgebra::DMatrix;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{ConeError, ConeWarning, Flagged, Result};

/// Machine integer types a caller may narrow results into.
pub trait MachineInt: Copy + Default + fmt::Debug {
    /// Name used in warnings.
    const NAME: &'static str;

    /// `None` if `value` does not fit.
    fn from_big(value: &BigInt) -> Option<Self>;
}

impl MachineInt for i32 {
    const NAME: &'static str = "i32";

    #[inline]
    fn from_big(value: &BigInt) -> Option<Self> {
        value.to_i32()
    }
}

impl MachineInt for i64 {
    const NAME: &'static str = "i64";

    #[inline]
    fn from_big(value: &BigInt) -> Option<Self> {
        value.to_i64()
    }
}

/// Narrow one entry; counts misses instead of failing.
#[inline]
fn narrow_entry<T: MachineInt>(value: &BigInt, overflowed: &mut usize) -> T {
    match T::from_big(value) {
        Some(x) => x,
        None => {
            *overflowed += 1;
            T::default()
        }
    }
}

fn finish_narrowing<T, V: MachineInt>(value: T, overflowed: usize) -> Flagged<T> {
    if overflowed == 0 {
        return Flagged::clean(value);
    }
    tracing::warn!(
        entries = overflowed,
        width = V::NAME,
        "narrowing overflow, entries replaced by 0"
    );
    Flagged {
        value,
        warnings: vec![ConeWarning::RangeOverflow {
            width: V::NAME,
            entries: overflowed,
        }],
    }
}

/// Narrow a single value: 0 and a `RangeOverflow` warning if it does not fit.
pub fn narrow_scalar<T: MachineInt>(value: &BigInt) -> Flagged<T> {
    let mut overflowed = 0usize;
    let out: T = narrow_entry(value, &mut overflowed);
    finish_narrowing::<_, T>(out, overflowed)
}

/// Row vector of arbitrary-precision integers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZVector(Vec<BigInt>);

impl ZVector {
    /// Zero vector of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self(vec![BigInt::zero(); n])
    }

    /// `k`-th standard basis vector of length `n`.
    pub fn unit(n: usize, k: usize) -> Self {
        let mut v = Self::zeros(n);
        if k < n {
            v.0[k] = BigInt::one();
        }
        v
    }

    pub fn from_i64(values: &[i64]) -> Self {
        Self(values.iter().map(|&x| BigInt::from(x)).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, BigInt> {
        self.0.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[BigInt] {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> Vec<BigInt> {
        self.0
    }

    /// Inner product. Lengths are the caller's responsibility; extra entries are ignored.
    pub fn dot(&self, other: &ZVector) -> BigInt {
        self.0
            .iter()
            .zip(&other.0)
            .fold(BigInt::zero(), |acc, (a, b)| acc + a * b)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(Zero::is_zero)
    }

    /// All coordinates strictly positive (vacuously true for length 0).
    pub fn is_positive(&self) -> bool {
        self.0.iter().all(Signed::is_positive)
    }

    /// `a * self + b * other`.
    pub fn combine(&self, a: &BigInt, other: &ZVector, b: &BigInt) -> ZVector {
        ZVector(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(x, y)| a * x + b * y)
                .collect(),
        )
    }

    /// Entrywise sum (lengths must agree).
    pub fn add(&self, other: &ZVector) -> ZVector {
        ZVector(self.0.iter().zip(&other.0).map(|(x, y)| x + y).collect())
    }

    /// Gcd of the absolute values of all entries (0 for the zero vector).
    pub fn content(&self) -> BigInt {
        self.0.iter().fold(BigInt::zero(), |g, x| g.gcd(x))
    }

    /// Divide by the content; keeps the direction. The zero vector is returned unchanged.
    pub fn primitive(self) -> ZVector {
        let g = self.content();
        if g.is_zero() || g.is_one() {
            return self;
        }
        ZVector(self.0.into_iter().map(|x| x / &g).collect())
    }

    /// Entries from `start` on.
    pub(crate) fn tail(&self, start: usize) -> ZVector {
        ZVector(self.0[start.min(self.0.len())..].to_vec())
    }

    pub(crate) fn set(&mut self, k: usize, value: BigInt) {
        self.0[k] = value;
    }

    /// Narrow to machine width; out-of-range entries become 0 and are reported.
    pub fn narrow<T: MachineInt>(&self) -> Flagged<Vec<T>> {
        let mut overflowed = 0usize;
        let out: Vec<T> = self
            .0
            .iter()
            .map(|x| narrow_entry(x, &mut overflowed))
            .collect();
        finish_narrowing::<_, T>(out, overflowed)
    }
}

impl From<Vec<BigInt>> for ZVector {
    fn from(values: Vec<BigInt>) -> Self {
        Self(values)
    }
}

impl Index<usize> for ZVector {
    type Output = BigInt;

    #[inline]
    fn index(&self, k: usize) -> &BigInt {
        &self.0[k]
    }
}

impl Neg for ZVector {
    type Output = ZVector;

    fn neg(self) -> ZVector {
        ZVector(self.0.into_iter().map(|x| -x).collect())
    }
}

impl Neg for &ZVector {
    type Output = ZVector;

    fn neg(self) -> ZVector {
        ZVector(self.0.iter().map(|x| -x).collect())
    }
}

impl fmt::Display for ZVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (k, x) in self.0.iter().enumerate() {
            if k > 0 {
                write!(f, ",")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, ")")
    }
}

/// Matrix of arbitrary-precision integers; rows are the meaningful unit.
///
/// Invariants:
/// - Every row has exactly `width()` entries.
/// - A 0-row matrix keeps its width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZMatrix {
    data: DMatrix<BigInt>,
}

impl ZMatrix {
    /// Empty matrix (no rows) of the given width.
    pub fn empty(width: usize) -> Self {
        Self {
            data: DMatrix::from_row_slice(0, width, &[]),
        }
    }

    /// Build from rows; every row must have length `width`.
    pub fn from_rows(width: usize, rows: &[ZVector]) -> Result<Self> {
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(ConeError::mismatch("matrix row", width, bad.len()));
        }
        Ok(Self::from_rows_unchecked(width, rows))
    }

    /// Rows of machine integers; the width is the array length.
    pub fn from_i64<const N: usize>(rows: &[[i64; N]]) -> Self {
        let rows: Vec<ZVector> = rows.iter().map(|r| ZVector::from_i64(r)).collect();
        Self::from_rows_unchecked(N, &rows)
    }

    pub(crate) fn from_rows_unchecked(width: usize, rows: &[ZVector]) -> Self {
        let flat: Vec<BigInt> = rows.iter().flat_map(|r| r.iter().cloned()).collect();
        Self {
            data: DMatrix::from_row_slice(rows.len(), width, &flat),
        }
    }

    /// Identity matrix of size `n`.
    pub fn identity(n: usize) -> Self {
        Self {
            data: DMatrix::from_fn(n, n, |i, j| {
                if i == j {
                    BigInt::one()
                } else {
                    BigInt::zero()
                }
            }),
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> ZVector {
        ZVector(self.data.row(i).iter().cloned().collect())
    }

    /// Copies of all rows, top to bottom.
    pub fn rows(&self) -> Vec<ZVector> {
        (0..self.height()).map(|i| self.row(i)).collect()
    }

    /// Rows of `self` followed by rows of `other`.
    pub fn stacked(&self, other: &ZMatrix) -> Result<ZMatrix> {
        if self.width() != other.width() {
            return Err(ConeError::mismatch("stacked matrix", self.width(), other.width()));
        }
        let mut rows = self.rows();
        rows.extend(other.rows());
        Ok(Self::from_rows_unchecked(self.width(), &rows))
    }

    pub fn transpose(&self) -> ZMatrix {
        Self {
            data: self.data.transpose(),
        }
    }

    pub fn negated(&self) -> ZMatrix {
        Self {
            data: self.data.map(|x| -x),
        }
    }

    /// Narrow every entry to machine width; out-of-range entries become 0 and are reported.
    pub fn narrow<T: MachineInt>(&self) -> Flagged<Vec<Vec<T>>> {
        let mut overflowed = 0usize;
        let mut out = Vec::with_capacity(self.height());
        for i in 0..self.height() {
            let row: Vec<T> = self
                .data
                .row(i)
                .iter()
                .map(|x| narrow_entry(x, &mut overflowed))
                .collect();
            out.push(row);
        }
        finish_narrowing::<_, T>(out, overflowed)
    }
}

impl Index<(usize, usize)> for ZMatrix {
    type Output = BigInt;

    #[inline]
    fn index(&self, ij: (usize, usize)) -> &BigInt {
        &self.data[ij]
    }
}
