//! Double description: generators of `{x : A x >= 0, E x = 0}`.
//!
//! Algorithm
//! - Start from the subspace `ker E`, held entirely as lineality.
//! - Add inequalities one at a time. While the inequality is not constant on the
//!   lineality, cut one lineality direction `l0` into a ray and project the other
//!   generators into the hyperplane. Otherwise split rays into `+`, `0`, `-` and
//!   combine adjacent `(+,-)` pairs.
//! - Adjacency is the combinatorial test: `p`, `n` are adjacent iff no third ray
//!   is tight on every inequality that is tight on both. Exact arithmetic makes
//!   the zero sets exact, so the test is sound on the pointed quotient.
//!
//! All vectors are kept primitive so entries stay small.

use std::collections::BTreeSet;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::linalg::Echelon;
use crate::zmatrix::ZVector;

/// Generators of a cone: extreme rays (modulo lineality) and a lineality basis.
#[derive(Clone, Debug, Default)]
pub(crate) struct Generators {
    pub rays: Vec<ZVector>,
    pub lineality: Vec<ZVector>,
}

/// A ray together with the indices of the processed inequalities tight on it.
#[derive(Clone, Debug)]
struct Ray {
    v: ZVector,
    zeros: BTreeSet<usize>,
}

/// Extreme rays and lineality basis of `{x : a·x >= 0, e·x = 0}` for `a` in
/// `inequalities` and `e` in `equations`.
pub(crate) fn generators_from_constraints(
    width: usize,
    inequalities: &[ZVector],
    equations: &[ZVector],
) -> Generators {
    let mut lineality = Echelon::new(width, equations).kernel();
    let mut rays: Vec<Ray> = Vec::new();
    let mut processed: BTreeSet<usize> = BTreeSet::new();

    for (idx, a) in inequalities.iter().enumerate() {
        if a.is_zero() {
            continue;
        }
        match lineality.iter().position(|l| !a.dot(l).is_zero()) {
            Some(k) => cut_lineality(a, idx, k, &mut lineality, &mut rays, &processed),
            None => rays = add_inequality(a, idx, rays),
        }
        processed.insert(idx);
    }

    tracing::debug!(
        width,
        inequalities = inequalities.len(),
        equations = equations.len(),
        rays = rays.len(),
        lineality = lineality.len(),
        "double description finished"
    );
    Generators {
        rays: rays.into_iter().map(|r| r.v).collect(),
        lineality,
    }
}

/// Cut lineality direction `k` by the inequality `a` (which is non-constant on it).
fn cut_lineality(
    a: &ZVector,
    idx: usize,
    k: usize,
    lineality: &mut Vec<ZVector>,
    rays: &mut Vec<Ray>,
    processed: &BTreeSet<usize>,
) {
    let mut l0 = lineality.remove(k);
    let mut s0 = a.dot(&l0);
    if s0.is_negative() {
        l0 = -l0;
        s0 = -s0;
    }
    for l in lineality.iter_mut() {
        let s = a.dot(l);
        if !s.is_zero() {
            *l = l.combine(&s0, &l0, &-s).primitive();
        }
    }
    for ray in rays.iter_mut() {
        let s = a.dot(&ray.v);
        if !s.is_zero() {
            ray.v = ray.v.combine(&s0, &l0, &-s).primitive();
        }
        ray.zeros.insert(idx);
    }
    // `l0` was lineality, so it is tight on everything processed before `a`.
    rays.push(Ray {
        v: l0.primitive(),
        zeros: processed.clone(),
    });
}

/// Intersect the current cone with `{a·x >= 0}` when `a` vanishes on the lineality.
fn add_inequality(a: &ZVector, idx: usize, rays: Vec<Ray>) -> Vec<Ray> {
    let values: Vec<BigInt> = rays.iter().map(|r| a.dot(&r.v)).collect();
    if values.iter().all(|s| !s.is_negative()) {
        return rays
            .into_iter()
            .zip(&values)
            .map(|(mut r, s)| {
                if s.is_zero() {
                    r.zeros.insert(idx);
                }
                r
            })
            .collect();
    }

    let positive: Vec<usize> = (0..rays.len()).filter(|&i| values[i].is_positive()).collect();
    let negative: Vec<usize> = (0..rays.len()).filter(|&i| values[i].is_negative()).collect();

    let mut next: Vec<Ray> = Vec::with_capacity(rays.len());
    for (r, s) in rays.iter().zip(&values) {
        if s.is_negative() {
            continue;
        }
        let mut r = r.clone();
        if s.is_zero() {
            r.zeros.insert(idx);
        }
        next.push(r);
    }
    for &p in &positive {
        for &n in &negative {
            let common: BTreeSet<usize> =
                rays[p].zeros.intersection(&rays[n].zeros).copied().collect();
            if !adjacent(&rays, p, n, &common) {
                continue;
            }
            // values[p] > 0 and -values[n] > 0: a positive combination on the hyperplane.
            let v = rays[n]
                .v
                .combine(&values[p], &rays[p].v, &-&values[n])
                .primitive();
            let mut zeros = common;
            zeros.insert(idx);
            next.push(Ray { v, zeros });
        }
    }
    next
}

fn adjacent(rays: &[Ray], p: usize, n: usize, common: &BTreeSet<usize>) -> bool {
    !rays
        .iter()
        .enumerate()
        .any(|(i, r)| i != p && i != n && common.is_subset(&r.zeros))
}
