//! Curated API surface.
//!
//! Important
//! - Prefer these re-exports over deep module paths; the module layout may change.

// Cones
pub use crate::cone::{Cone, ConeSpec, KnownFlags};
// Errors and warnings
pub use crate::error::{ConeError, ConeWarning, Flagged, Result};
// Exact integer rows
pub use crate::zmatrix::{narrow_scalar, MachineInt, ZMatrix, ZVector};
// Random cones
pub use crate::sample::{
    ConeGenerator, ConeSample, RandomInequalitiesGenerator, RandomInequalitiesParams,
    RandomRaysGenerator, RandomRaysParams, SeedReplay,
};
