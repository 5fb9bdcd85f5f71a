//! JSON documents read and written by the CLI.
//!
//! Input cones use machine integers (`i64`); output matrices are narrowed back to
//! `i64` under the core's overflow contract and carry an `overflow` flag.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use zcone::api::{Cone, ConeSpec, Flagged, ZMatrix, ZVector};

/// A cone description as stored on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConeDoc {
    Rays {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<usize>,
        rays: Vec<Vec<i64>>,
        #[serde(default)]
        lineality: Vec<Vec<i64>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        known: Option<i64>,
    },
    Inequalities {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<usize>,
        inequalities: Vec<Vec<i64>>,
        #[serde(default)]
        equations: Vec<Vec<i64>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        known: Option<i64>,
    },
    FullSpace {
        ambient_dim: i64,
    },
}

/// Width of a matrix: its own first row, else the document width.
fn matrix(rows: &[Vec<i64>], fallback: usize) -> Result<ZMatrix> {
    let width = rows.first().map_or(fallback, Vec::len);
    let rows: Vec<ZVector> = rows.iter().map(|r| ZVector::from_i64(r)).collect();
    Ok(ZMatrix::from_rows(width, &rows)?)
}

fn doc_width(explicit: Option<usize>, a: &[Vec<i64>], b: &[Vec<i64>]) -> Result<usize> {
    match explicit.or_else(|| a.first().or(b.first()).map(Vec::len)) {
        Some(w) => Ok(w),
        None => bail!("cannot infer the ambient dimension of a cone without rows; set `width`"),
    }
}

impl ConeDoc {
    pub fn into_spec(self) -> Result<ConeSpec> {
        Ok(match self {
            ConeDoc::Rays {
                width,
                rays,
                lineality,
                known,
            } => {
                let w = doc_width(width, &rays, &lineality)?;
                ConeSpec::Rays {
                    rays: matrix(&rays, w)?,
                    lineality: Some(matrix(&lineality, w)?),
                    known,
                }
            }
            ConeDoc::Inequalities {
                width,
                inequalities,
                equations,
                known,
            } => {
                let w = doc_width(width, &inequalities, &equations)?;
                ConeSpec::Inequalities {
                    inequalities: matrix(&inequalities, w)?,
                    equations: Some(matrix(&equations, w)?),
                    known,
                }
            }
            ConeDoc::FullSpace { ambient_dim } => ConeSpec::FullSpace { ambient_dim },
        })
    }

    /// Rays document of a cone (extreme rays and lineality basis), narrowed to `i64`.
    pub fn rays_of(cone: &Cone) -> Flagged<ConeDoc> {
        let rays = cone.rays().narrow::<i64>();
        let lineality = cone.generators_of_lineality_space().narrow::<i64>();
        let mut warnings = rays.warnings;
        warnings.extend(lineality.warnings);
        Flagged {
            value: ConeDoc::Rays {
                width: Some(cone.ambient_dimension()),
                rays: rays.value,
                lineality: lineality.value,
                known: None,
            },
            warnings,
        }
    }
}

pub fn load(path: &Path) -> Result<Cone> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let doc: ConeDoc =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    let cone = Cone::build(doc.into_spec()?)
        .with_context(|| format!("building cone from {}", path.display()))?;
    tracing::debug!(path = %path.display(), ambient_dim = cone.ambient_dimension(), "loaded cone");
    Ok(cone)
}

/// Summary of a cone for JSON output.
#[derive(Debug, Serialize)]
pub struct ConeReport {
    pub ambient_dim: usize,
    pub dimension: usize,
    pub lineality_dimension: usize,
    pub facets: Vec<Vec<i64>>,
    pub equations: Vec<Vec<i64>>,
    pub rays: Vec<Vec<i64>>,
    pub lineality: Vec<Vec<i64>>,
    pub multiplicity: i64,
    pub overflow: bool,
}

impl ConeReport {
    pub fn from_cone(cone: &Cone) -> Self {
        let facets = cone.facets().narrow::<i64>();
        let equations = cone.equations().narrow::<i64>();
        let rays = cone.rays().narrow::<i64>();
        let lineality = cone.generators_of_lineality_space().narrow::<i64>();
        let multiplicity = cone.multiplicity_narrow::<i64>();
        let overflow = facets.overflowed()
            || equations.overflowed()
            || rays.overflowed()
            || lineality.overflowed()
            || multiplicity.overflowed();
        Self {
            ambient_dim: cone.ambient_dimension(),
            dimension: cone.dimension(),
            lineality_dimension: cone.lineality_dimension(),
            facets: facets.value,
            equations: equations.value,
            rays: rays.value,
            lineality: lineality.value,
            multiplicity: multiplicity.value,
            overflow,
        }
    }
}

/// Parse `1,-2,0` into a vector.
pub fn parse_point(text: &str) -> Result<ZVector> {
    let entries = text
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().with_context(|| format!("not an integer: {s:?}")))
        .collect::<Result<Vec<i64>>>()?;
    Ok(ZVector::from_i64(&entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use zcone::api::ConeError;

    #[test]
    fn loads_rays_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quadrant.json");
        fs::write(&path, r#"{"kind": "rays", "rays": [[1, 0], [0, 1]]}"#).unwrap();
        let cone = load(&path).unwrap();
        assert_eq!(cone.ambient_dimension(), 2);
        assert_eq!(cone.dimension(), 2);
        assert!(cone.is_simplicial());
    }

    #[test]
    fn loads_inequalities_with_equations() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ray.json");
        fs::write(
            &path,
            r#"{"kind": "inequalities", "inequalities": [[1, 0]], "equations": [[0, 1]]}"#,
        )
        .unwrap();
        let report = ConeReport::from_cone(&load(&path).unwrap());
        assert_eq!(report.dimension, 1);
        assert_eq!(report.rays, vec![vec![1, 0]]);
        assert!(!report.overflow);
    }

    #[test]
    fn width_mismatch_is_reported() {
        let doc = ConeDoc::Rays {
            width: None,
            rays: vec![vec![1, 0]],
            lineality: vec![vec![0, 0, 1]],
            known: None,
        };
        let err = Cone::build(doc.into_spec().unwrap()).unwrap_err();
        assert!(matches!(err, ConeError::DimensionMismatch { .. }));
    }

    #[test]
    fn empty_document_needs_width() {
        let doc = ConeDoc::Inequalities {
            width: None,
            inequalities: vec![],
            equations: vec![],
            known: None,
        };
        assert!(doc.into_spec().is_err());
        let doc = ConeDoc::Inequalities {
            width: Some(3),
            inequalities: vec![],
            equations: vec![],
            known: None,
        };
        let cone = Cone::build(doc.into_spec().unwrap()).unwrap();
        assert!(cone.is_full_space());
    }

    #[test]
    fn negative_full_space_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"kind": "full_space", "ambient_dim": -2}"#).unwrap();
        assert!(load(&path).is_err());
    }

    #[test]
    fn rays_document_round_trips_the_cone() {
        let cone = Cone::from_rays(
            &ZMatrix::from_i64(&[[1, 0, 0], [0, 1, 0], [1, 1, 0]]),
            &ZMatrix::from_i64(&[[0, 0, 1]]),
        )
        .unwrap();
        let doc = ConeDoc::rays_of(&cone);
        assert!(doc.is_clean());
        let text = serde_json::to_string(&doc.value).unwrap();
        let back: ConeDoc = serde_json::from_str(&text).unwrap();
        assert_eq!(Cone::build(back.into_spec().unwrap()).unwrap(), cone);
    }

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("1, -2,0").unwrap(), ZVector::from_i64(&[1, -2, 0]));
        assert!(parse_point("1,x").is_err());
    }
}
