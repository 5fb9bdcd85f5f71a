//! Canonical (minimal, normalized) representations.
//!
//! Normal form
//! - Equations and lineality: the canonical echelon basis of their span.
//! - Facets: each reduced modulo the equation span, made primitive, sorted, deduplicated.
//! - Rays: each reduced modulo the lineality span, made primitive, sorted, deduplicated.
//!
//! Two cones are equal as point sets iff their `Minimal` forms are equal.

use num_traits::Zero;

use crate::linalg::Echelon;
use crate::zmatrix::ZVector;

use super::dd::{generators_from_constraints, Generators};

/// Minimal H- and V-representation of one cone, both in normal form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Minimal {
    pub facets: Vec<ZVector>,
    pub equations: Vec<ZVector>,
    pub rays: Vec<ZVector>,
    pub lineality: Vec<ZVector>,
}

/// Normalize `rows` modulo the span held by `modulo`; drops rows inside the span.
fn normalize_modulo(modulo: &Echelon, rows: &[ZVector]) -> Vec<ZVector> {
    let mut out: Vec<ZVector> = rows
        .iter()
        .map(|r| modulo.reduce(r))
        .filter(|r| !r.is_zero())
        .collect();
    out.sort();
    out.dedup();
    out
}

/// True if the generators `rays`, `lineality` span a space of dimension
/// `width - rank(linear)`, i.e. the equations `linear` cut out the whole linear part.
pub(crate) fn linear_part_holds(
    width: usize,
    linear: &[ZVector],
    rays: &[ZVector],
    lineality: &[ZVector],
) -> bool {
    let mut span = rays.to_vec();
    span.extend(lineality.iter().cloned());
    Echelon::new(width, &span).rank() == width - Echelon::new(width, linear).rank()
}

/// True if `{x : rows·x >= 0, linear·x = 0}`, with generators `g`, has exactly the
/// linear part `linear` and every row of `rows` defines a facet.
///
/// Read through duality this checks extreme rays and a complete lineality instead.
fn certifies(width: usize, rows: &[ZVector], linear: &[ZVector], g: &Generators) -> bool {
    if !linear_part_holds(width, linear, &g.rays, &g.lineality) {
        return false;
    }
    let dim = width - Echelon::new(width, linear).rank();
    let Some(facet_dim) = dim.checked_sub(1) else {
        return rows.is_empty();
    };
    rows.iter().all(|a| {
        let mut tight: Vec<ZVector> = g
            .rays
            .iter()
            .filter(|r| a.dot(r).is_zero())
            .cloned()
            .collect();
        tight.extend(g.lineality.iter().cloned());
        Echelon::new(width, &tight).rank() == facet_dim
    })
}

impl Minimal {
    /// Normal form from a V-representation (rays may be redundant, lineality may be dependent).
    pub(crate) fn from_generators(width: usize, rays: &[ZVector], lineality: &[ZVector]) -> Self {
        // Duality: the facets of cone(rays) + span(lineality) are the extreme rays of
        // {a : a·r >= 0, a·l = 0}.
        let dual = generators_from_constraints(width, rays, lineality);
        let primal = generators_from_constraints(width, &dual.rays, &dual.lineality);
        Self::finish(width, dual, primal)
    }

    /// Normal form from an H-representation (inequalities may be redundant).
    pub(crate) fn from_constraints(
        width: usize,
        inequalities: &[ZVector],
        equations: &[ZVector],
    ) -> Self {
        let primal = generators_from_constraints(width, inequalities, equations);
        let dual = generators_from_constraints(width, &primal.rays, &primal.lineality);
        Self::finish(width, dual, primal)
    }

    /// Normal form when the inequalities are claimed to be facets and the equations complete.
    ///
    /// The claim is checked against the generators; a false claim falls back to
    /// the full conversion.
    pub(crate) fn from_facets(width: usize, facets: &[ZVector], equations: &[ZVector]) -> Self {
        let primal = generators_from_constraints(width, facets, equations);
        if !certifies(width, facets, equations, &primal) {
            tracing::debug!("facet hint does not hold; recomputing");
            let dual = generators_from_constraints(width, &primal.rays, &primal.lineality);
            return Self::finish(width, dual, primal);
        }
        let dual = Generators {
            rays: facets.to_vec(),
            lineality: equations.to_vec(),
        };
        Self::finish(width, dual, primal)
    }

    /// Normal form when the rays are claimed to be extreme and the lineality complete.
    pub(crate) fn from_extreme_rays(width: usize, rays: &[ZVector], lineality: &[ZVector]) -> Self {
        let dual = generators_from_constraints(width, rays, lineality);
        if !certifies(width, rays, lineality, &dual) {
            tracing::debug!("extreme ray hint does not hold; recomputing");
            let primal = generators_from_constraints(width, &dual.rays, &dual.lineality);
            return Self::finish(width, dual, primal);
        }
        let primal = Generators {
            rays: rays.to_vec(),
            lineality: lineality.to_vec(),
        };
        Self::finish(width, dual, primal)
    }

    fn finish(width: usize, dual: Generators, primal: Generators) -> Self {
        let equations = Echelon::new(width, &dual.lineality);
        let lineality = Echelon::new(width, &primal.lineality);
        let facets = normalize_modulo(&equations, &dual.rays);
        let rays = normalize_modulo(&lineality, &primal.rays);
        Self {
            facets,
            equations: equations.into_rows(),
            rays,
            lineality: lineality.into_rows(),
        }
    }

    /// Dimension of the cone (rank of its span).
    pub(crate) fn dimension(&self, width: usize) -> usize {
        width - self.equations.len()
    }

    /// The same data for the dual cone.
    pub(crate) fn dual(&self) -> Self {
        Self {
            facets: self.rays.clone(),
            equations: self.lineality.clone(),
            rays: self.facets.clone(),
            lineality: self.equations.clone(),
        }
    }

    /// The same data for `-C`.
    pub(crate) fn negated(&self, width: usize) -> Self {
        let neg = |rows: &[ZVector]| rows.iter().map(|r| -r).collect::<Vec<_>>();
        let equations = Echelon::new(width, &self.equations);
        let lineality = Echelon::new(width, &self.lineality);
        Self {
            facets: normalize_modulo(&equations, &neg(&self.facets)),
            equations: equations.into_rows(),
            rays: normalize_modulo(&lineality, &neg(&self.rays)),
            lineality: lineality.into_rows(),
        }
    }
}
