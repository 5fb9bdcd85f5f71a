use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;
use zcone::api::{Cone, ConeGenerator, RandomRaysGenerator, RandomRaysParams};

mod doc;

use doc::{ConeDoc, ConeReport};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Inspect and combine rational polyhedral cones")]
struct Cmd {
    /// Log hull-engine details (DEBUG level)
    #[arg(long, global = true)]
    verbose: bool,

    /// Print a JSON report instead of the text dump
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print a cone given as a JSON document
    Show { input: PathBuf },
    /// Print the dual cone
    Dual { input: PathBuf },
    /// Print the intersection of two cones
    Intersect { a: PathBuf, b: PathBuf },
    /// Print the link of a cone at an apex
    Link {
        input: PathBuf,
        /// Comma separated coordinates, e.g. `1,0,0`
        #[arg(long, allow_hyphen_values = true)]
        apex: String,
    },
    /// Test whether a point lies in a cone (or in its relative interior)
    Contains {
        input: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        point: String,
        #[arg(long)]
        relatively: bool,
    },
    /// Draw random cones and print them as rays documents
    Sample {
        #[arg(long, default_value_t = 3)]
        dim: usize,
        #[arg(long, default_value_t = 5)]
        rays: usize,
        #[arg(long, default_value_t = 0)]
        lineality: usize,
        #[arg(long, default_value_t = 3)]
        max_entry: i64,
        #[arg(long, default_value_t = 1)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Show { input } => emit(&doc::load(&input)?, cmd.json),
        Action::Dual { input } => emit(&doc::load(&input)?.dual(), cmd.json),
        Action::Intersect { a, b } => {
            let a = doc::load(&a)?;
            let b = doc::load(&b)?;
            emit(&a.intersection(&b).context("intersecting cones")?, cmd.json)
        }
        Action::Link { input, apex } => link(input, &apex, cmd.json),
        Action::Contains {
            input,
            point,
            relatively,
        } => contains(input, &point, relatively),
        Action::Sample {
            dim,
            rays,
            lineality,
            max_entry,
            count,
            seed,
        } => sample(
            RandomRaysParams {
                ambient_dim: dim,
                rays,
                lineality,
                max_entry,
            },
            count,
            seed,
        ),
    }
}

fn emit(cone: &Cone, json: bool) -> Result<()> {
    if json {
        let report = ConeReport::from_cone(cone);
        if report.overflow {
            tracing::warn!("some entries exceed i64 and were replaced by 0");
        }
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{cone}");
    }
    Ok(())
}

fn link(input: PathBuf, apex: &str, json: bool) -> Result<()> {
    let cone = doc::load(&input)?;
    let apex = doc::parse_point(apex)?;
    // An apex outside the cone is logged by the core and does not fail the command.
    let link = cone.link(&apex).context("computing link")?;
    emit(&link.value, json)
}

fn contains(input: PathBuf, point: &str, relatively: bool) -> Result<()> {
    let cone = doc::load(&input)?;
    let point = doc::parse_point(point)?;
    let inside = if relatively {
        cone.contains_relatively(&point)?
    } else {
        cone.contains_point(&point)?
    };
    tracing::info!(input = %input.display(), relatively, inside, "contains");
    println!("{inside}");
    Ok(())
}

fn sample(params: RandomRaysParams, count: usize, seed: u64) -> Result<()> {
    let mut generator = RandomRaysGenerator::new(params, seed)?;
    for _ in 0..count {
        let sample = generator.generate_next()?;
        let doc = ConeDoc::rays_of(&sample.cone);
        if !doc.is_clean() {
            tracing::warn!(seed = sample.replay.seed, "sample does not fit i64");
        }
        tracing::info!(seed = sample.replay.seed, dim = sample.cone.dimension(), "sample");
        println!("{}", serde_json::to_string(&doc.value)?);
    }
    Ok(())
}
