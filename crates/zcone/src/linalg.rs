//! Exact linear algebra on integer rows.
//!
//! - `Echelon`: fraction-free reduced row echelon form. Rows are primitive, pivots
//!   positive, and every pivot column is zero in all other rows. For a given row
//!   space this form is unique, so it doubles as the canonical basis.
//! - `unimodular_echelon`: echelon form by unimodular row operations (lattice
//!   preserving), used for integer kernels and quotient lattices.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::zmatrix::ZVector;

/// Canonical row echelon form of a set of rows of common width.
#[derive(Clone, Debug)]
pub(crate) struct Echelon {
    width: usize,
    rows: Vec<ZVector>,
    pivots: Vec<usize>,
}

impl Echelon {
    pub(crate) fn new(width: usize, input: &[ZVector]) -> Self {
        let mut rows: Vec<ZVector> = input
            .iter()
            .filter(|r| !r.is_zero())
            .map(|r| r.clone().primitive())
            .collect();
        let mut pivots = Vec::new();
        for col in 0..width {
            let rank = pivots.len();
            if rank == rows.len() {
                break;
            }
            let Some(p) = (rank..rows.len()).find(|&i| !rows[i][col].is_zero()) else {
                continue;
            };
            rows.swap(rank, p);
            if rows[rank][col].is_negative() {
                rows[rank] = -&rows[rank];
            }
            let pivot_row = rows[rank].clone();
            let pivot = pivot_row[col].clone();
            for (i, row) in rows.iter_mut().enumerate() {
                if i == rank || row[col].is_zero() {
                    continue;
                }
                let factor = -row[col].clone();
                *row = row.combine(&pivot, &pivot_row, &factor).primitive();
            }
            pivots.push(col);
        }
        rows.truncate(pivots.len());
        Self {
            width,
            rows,
            pivots,
        }
    }

    #[inline]
    pub(crate) fn rank(&self) -> usize {
        self.pivots.len()
    }

    #[inline]
    pub(crate) fn rows(&self) -> &[ZVector] {
        &self.rows
    }

    pub(crate) fn into_rows(self) -> Vec<ZVector> {
        self.rows
    }

    /// Canonical representative of `v` modulo the row span: zero in every pivot
    /// column, primitive, positively scaled from `v`.
    pub(crate) fn reduce(&self, v: &ZVector) -> ZVector {
        let mut out = v.clone();
        for (row, &col) in self.rows.iter().zip(&self.pivots) {
            if out[col].is_zero() {
                continue;
            }
            let factor = -out[col].clone();
            out = out.combine(&row[col], row, &factor);
        }
        out.primitive()
    }

    /// Integer basis of the right kernel `{x : row·x = 0 for every row}`.
    ///
    /// One vector per free column; the basis spans the kernel over Q (it need not
    /// be a lattice basis; see `lattice_kernel` for that).
    pub(crate) fn kernel(&self) -> Vec<ZVector> {
        let scale = self
            .rows
            .iter()
            .zip(&self.pivots)
            .fold(BigInt::one(), |acc, (row, &col)| acc.lcm(&row[col]));
        let mut out = Vec::with_capacity(self.width - self.rank());
        for free in (0..self.width).filter(|c| !self.pivots.contains(c)) {
            let mut x = ZVector::zeros(self.width);
            x.set(free, scale.clone());
            for (row, &col) in self.rows.iter().zip(&self.pivots) {
                if row[free].is_zero() {
                    continue;
                }
                x.set(col, -(&scale / &row[col]) * &row[free]);
            }
            out.push(x.primitive());
        }
        out
    }
}

/// Echelon form on the first `cols` columns using only unimodular row operations.
///
/// Returns the number of pivot rows. Rows from that index on are zero in the first
/// `cols` columns; the whole row set still generates the same lattice as before.
pub(crate) fn unimodular_echelon(rows: &mut [ZVector], cols: usize) -> usize {
    let mut rank = 0usize;
    for col in 0..cols {
        if rank == rows.len() {
            break;
        }
        for i in rank + 1..rows.len() {
            if rows[i][col].is_zero() {
                continue;
            }
            if rows[rank][col].is_zero() {
                rows.swap(rank, i);
                continue;
            }
            let a = rows[rank][col].clone();
            let b = rows[i][col].clone();
            let ext = a.extended_gcd(&b);
            let g = ext.gcd;
            // [[x, y], [-b/g, a/g]] has determinant 1.
            let top = rows[rank].combine(&ext.x, &rows[i], &ext.y);
            let bottom = rows[i].combine(&(&a / &g), &rows[rank], &-(&b / &g));
            rows[rank] = top;
            rows[i] = bottom;
        }
        if !rows[rank][col].is_zero() {
            rank += 1;
        }
    }
    rank
}

/// Lattice basis of `Z^width ∩ {x : row·x = 0 for every row}` (a saturated lattice).
pub(crate) fn lattice_kernel(width: usize, rows: &[ZVector]) -> Vec<ZVector> {
    let m = rows.len();
    let mut augmented: Vec<ZVector> = (0..width)
        .map(|j| {
            let mut entries: Vec<BigInt> = rows.iter().map(|r| r[j].clone()).collect();
            entries.extend((0..width).map(|k| {
                if k == j {
                    BigInt::one()
                } else {
                    BigInt::zero()
                }
            }));
            ZVector::from(entries)
        })
        .collect();
    let rank = unimodular_echelon(&mut augmented, m);
    augmented[rank..].iter().map(|r| r.tail(m)).collect()
}
