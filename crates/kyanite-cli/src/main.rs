// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Kyanite developer CLI.
//!
//! `kyanite transform` composes a placement matrix and its inverse;
//! `kyanite collide` runs the broad and narrow phase over a JSON scene.
//! Saved collision prefs supply defaults; flags override them.

mod report;
mod scene;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use kyanite_app_core::config::{ConfigError, LoadedPrefs, PrefsService};
use kyanite_app_core::prefs::CollisionPrefs;
use kyanite_config_fs::FsPrefsStore;
use kyanite_geom::broad::{AabbTree, BroadPhase};
use kyanite_geom::{BasicTransformable, CollisionAlgorithm, Transformable};
use kyanite_math::Vec2;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use report::{CollideReport, TransformReport};
use scene::SceneFile;

#[derive(Parser, Debug)]
#[command(author, version, about = "Kyanite transform and collision tools")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Read prefs from this directory instead of the platform config dir
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the matrix and inverse for a placement
    Transform(TransformArgs),
    /// Report colliding shape pairs in a scene file
    Collide(CollideArgs),
}

#[derive(Args, Debug)]
struct TransformArgs {
    /// Position as X,Y
    #[arg(long, default_value = "0,0", value_parser = parse_pair, allow_hyphen_values = true)]
    position: Vec2,
    /// Rotation in degrees, clockwise
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotation: f32,
    /// Scale as X,Y
    #[arg(long, default_value = "1,1", value_parser = parse_pair, allow_hyphen_values = true)]
    scale: Vec2,
    /// Origin as X,Y
    #[arg(long, default_value = "0,0", value_parser = parse_pair, allow_hyphen_values = true)]
    origin: Vec2,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Args, Debug)]
struct CollideArgs {
    /// Scene file (JSON)
    scene: PathBuf,
    /// Narrow-phase algorithm; defaults to the saved preference
    #[arg(long, value_enum)]
    algorithm: Option<AlgorithmArg>,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Aabb,
    Edges,
}

impl From<AlgorithmArg> for CollisionAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Aabb => Self::Aabb,
            AlgorithmArg::Edges => Self::Edges,
        }
    }
}

fn parse_pair(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got `{s}`"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x `{x}`: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y `{y}`: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_prefs(cli.config_dir.as_deref());
    let prefs = loaded
        .as_ref()
        .map(|l| l.prefs.collision.clone())
        .unwrap_or_default();
    init_tracing(cli.verbose, prefs.verbose)?;
    match &loaded {
        Ok(l) => {
            for issue in &l.issues {
                warn!(%issue, "ignoring prefs section; using defaults");
            }
            debug!(?prefs, "collision prefs");
        }
        Err(err) => warn!(%err, "could not load prefs; using defaults"),
    }

    match cli.cmd {
        Command::Transform(args) => run_transform(&args),
        Command::Collide(args) => run_collide(&args, &prefs),
    }
}

fn load_prefs(dir: Option<&Path>) -> Result<LoadedPrefs, ConfigError> {
    let store = match dir {
        Some(dir) => FsPrefsStore::in_dir(dir),
        None => FsPrefsStore::user()?,
    };
    PrefsService::new(store).load()
}

fn init_tracing(verbose: u8, prefs_verbose: bool) -> Result<()> {
    let level = match (verbose, prefs_verbose) {
        (0, false) => "warn",
        (1, _) => "info",
        (0, true) | (2, _) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

fn run_transform(args: &TransformArgs) -> Result<()> {
    let placement =
        BasicTransformable::with_parts(args.position, args.rotation, args.scale, args.origin);
    info!(
        position = ?placement.position(),
        rotation = placement.rotation(),
        scale = ?placement.scale(),
        origin = ?placement.origin(),
        "composing transform"
    );
    let report = TransformReport::new(&placement.transform(), &placement.inverse_transform());
    match args.format {
        Format::Text => println!("{}", report.to_text()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn run_collide(args: &CollideArgs, prefs: &CollisionPrefs) -> Result<()> {
    let algorithm = args.algorithm.map_or(prefs.algorithm, CollisionAlgorithm::from);
    let shapes = SceneFile::load(&args.scene)?
        .into_shapes(prefs.circle_point_count)
        .with_context(|| format!("invalid scene {}", args.scene.display()))?;
    info!(shapes = shapes.len(), ?algorithm, "scene loaded");

    let mut broad = AabbTree::new();
    for (index, (_, shape)) in shapes.iter().enumerate() {
        broad.upsert(index, shape.global_bounds());
    }
    let candidates = broad.pairs();

    let mut pairs: Vec<(usize, usize)> = candidates
        .iter()
        .filter(|&&(a, b)| shapes[a].1.intersects(&shapes[b].1, algorithm))
        .map(|&(a, b)| {
            let (ia, ib) = (shapes[a].0, shapes[b].0);
            (ia.min(ib), ia.max(ib))
        })
        .collect();
    pairs.sort_unstable();

    let report = CollideReport {
        algorithm,
        shapes: shapes.len(),
        candidates: candidates.len(),
        pairs,
    };
    match args.format {
        Format::Text => println!("{}", report.to_text()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
