//! Reproducible random cones.
//!
//! Purpose
//! - Seeded cone streams for property tests, benchmarks and the CLI `sample` command.
//!
//! Why this design
//! - Every sample carries the params snapshot plus a replay token (the seed).
//! - `ConeGenerator` exposes both streaming (`generate_next`) and replay (`regenerate`)
//!   entry points so callers can take either path without duplicating logic.
//! - Entries are small integers drawn uniformly from `[-max_entry, max_entry]`.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::cone::Cone;
use crate::error::{ConeError, Result};
use crate::zmatrix::{ZMatrix, ZVector};

/// A single cone plus replay metadata.
#[derive(Clone, Debug)]
pub struct ConeSample<P> {
    pub cone: Cone,
    pub params: P,
    pub replay: SeedReplay,
}

/// Replay token storing the seed that regenerates the same cone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedReplay {
    pub seed: u64,
}

/// Common trait for reproducible cone sources.
pub trait ConeGenerator {
    type Params: Clone;

    fn params(&self) -> &Self::Params;

    fn generate_next(&mut self) -> Result<ConeSample<Self::Params>>;

    fn regenerate(&self, replay: &SeedReplay) -> Result<Cone>;
}

fn check_common(ambient_dim: usize, max_entry: i64) -> Result<()> {
    if ambient_dim == 0 {
        return Err(ConeError::invalid("ambient_dim must be >= 1"));
    }
    if max_entry < 1 {
        return Err(ConeError::invalid("max_entry must be >= 1"));
    }
    Ok(())
}

fn draw_rows(rng: &mut StdRng, count: usize, width: usize, max_entry: i64) -> ZMatrix {
    let rows: Vec<ZVector> = (0..count)
        .map(|_| {
            let entries: Vec<i64> = (0..width)
                .map(|_| rng.gen_range(-max_entry..=max_entry))
                .collect();
            ZVector::from_i64(&entries)
        })
        .collect();
    ZMatrix::from_rows_unchecked(width, &rows)
}

/// Parameters for cones spanned by random rays (plus optional lineality rows).
#[derive(Clone, Debug)]
pub struct RandomRaysParams {
    pub ambient_dim: usize,
    pub rays: usize,
    pub lineality: usize,
    pub max_entry: i64,
}

impl RandomRaysParams {
    fn validate(&self) -> Result<()> {
        check_common(self.ambient_dim, self.max_entry)?;
        if self.rays == 0 && self.lineality == 0 {
            return Err(ConeError::invalid("need at least one ray or lineality row"));
        }
        Ok(())
    }
}

/// Generator for `cone(random rays) + span(random lineality rows)`.
pub struct RandomRaysGenerator {
    params: RandomRaysParams,
    master_rng: StdRng,
}

impl RandomRaysGenerator {
    pub fn new(params: RandomRaysParams, seed: u64) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            master_rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn generate_single(params: &RandomRaysParams, seed: u64) -> Result<Cone> {
        params.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let d = params.ambient_dim;
        let rays = draw_rows(&mut rng, params.rays, d, params.max_entry);
        let lineality = draw_rows(&mut rng, params.lineality, d, params.max_entry);
        Cone::from_rays(&rays, &lineality)
    }
}

impl ConeGenerator for RandomRaysGenerator {
    type Params = RandomRaysParams;

    fn params(&self) -> &Self::Params {
        &self.params
    }

    fn generate_next(&mut self) -> Result<ConeSample<Self::Params>> {
        let seed = self.master_rng.next_u64();
        let cone = Self::generate_single(&self.params, seed)?;
        Ok(ConeSample {
            cone,
            params: self.params.clone(),
            replay: SeedReplay { seed },
        })
    }

    fn regenerate(&self, replay: &SeedReplay) -> Result<Cone> {
        Self::generate_single(&self.params, replay.seed)
    }
}

/// Parameters for cones cut out by random inequalities and equations.
#[derive(Clone, Debug)]
pub struct RandomInequalitiesParams {
    pub ambient_dim: usize,
    pub inequalities: usize,
    pub equations: usize,
    pub max_entry: i64,
}

impl RandomInequalitiesParams {
    fn validate(&self) -> Result<()> {
        check_common(self.ambient_dim, self.max_entry)?;
        if self.equations > self.ambient_dim {
            return Err(ConeError::invalid("equations must be <= ambient_dim"));
        }
        Ok(())
    }
}

/// Generator for `{x : A x >= 0, E x = 0}` with random `A`, `E`.
pub struct RandomInequalitiesGenerator {
    params: RandomInequalitiesParams,
    master_rng: StdRng,
}

impl RandomInequalitiesGenerator {
    pub fn new(params: RandomInequalitiesParams, seed: u64) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            master_rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn generate_single(params: &RandomInequalitiesParams, seed: u64) -> Result<Cone> {
        params.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let d = params.ambient_dim;
        let inequalities = draw_rows(&mut rng, params.inequalities, d, params.max_entry);
        let equations = draw_rows(&mut rng, params.equations, d, params.max_entry);
        Cone::from_inequalities(&inequalities, &equations)
    }
}

impl ConeGenerator for RandomInequalitiesGenerator {
    type Params = RandomInequalitiesParams;

    fn params(&self) -> &Self::Params {
        &self.params
    }

    fn generate_next(&mut self) -> Result<ConeSample<Self::Params>> {
        let seed = self.master_rng.next_u64();
        let cone = Self::generate_single(&self.params, seed)?;
        Ok(ConeSample {
            cone,
            params: self.params.clone(),
            replay: SeedReplay { seed },
        })
    }

    fn regenerate(&self, replay: &SeedReplay) -> Result<Cone> {
        Self::generate_single(&self.params, replay.seed)
    }
}
