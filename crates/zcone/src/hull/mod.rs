//! Hull engine: exact conversions between cone representations.
//!
//! Purpose
//! - H→V: extreme rays and lineality of `{x : A x >= 0, E x = 0}` (double description).
//! - V→H: facets and equations of `cone(R) + span(L)`, by duality through the same routine.
//! - Normal forms (`Minimal`) that make two descriptions of one cone compare equal.
//! - Lattice data: the quotient lattice of the span modulo the lineality.
//!
//! Why this design (short)
//! - One routine for both directions keeps the engine small and auditable.
//! - Everything is exact (`BigInt`); there are no tolerances.
//!
//! References
//! - Fukuda, Prodon: "Double description method revisited" (1996).
//! - Related code: `crate::linalg` for echelon forms and kernels.

mod canonical;
mod dd;
mod lattice;

pub(crate) use canonical::{linear_part_holds, Minimal};
pub(crate) use dd::generators_from_constraints;
pub(crate) use lattice::{orient_into, quotient_lattice_basis};
