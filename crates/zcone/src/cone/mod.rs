//! Rational polyhedral cones with exact, lazily completed dual representations.
//!
//! Purpose
//! - `Cone` holds a V-representation (rays + lineality) and an H-representation
//!   (inequalities `a·x >= 0` + equations `e·x = 0`). One is given at construction,
//!   the other is computed by the hull engine on first use and cached.
//! - Derived operations (dual, negation, intersection, link, faces) return fresh,
//!   independently owned cones.
//!
//! Why this design (short)
//! - Each representation slot is a `OnceCell`: absent until first needed, then
//!   present for the rest of the instance's life. No `&mut` is needed to read.
//! - A third cell caches the normal form (`Minimal`), which answers equality,
//!   dimensions, facets, rays and lattice queries.
//! - Construction never runs the hull engine; `canonicalize` and `intersection` do.
//!
//! Assumptions and conventions
//! - Inequalities read `a·x >= 0`. All entries are exact `BigInt`s.
//! - Every matrix carries its width, so a cone with no inequalities still knows
//!   its ambient dimension.
//! - `Cone` is `Send` but not `Sync`: share it across threads only by cloning or
//!   after every query you need has been answered once.
//!
//! References
//! - Related code: `crate::hull` (conversions and normal forms), `crate::zmatrix`.

mod access;
mod display;
mod ops;
mod types;

pub use types::{Cone, ConeSpec, KnownFlags};

#[cfg(test)]
mod tests;
