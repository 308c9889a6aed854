// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Assemble wall panels along a plain-text floor plan (OBJ output)
//!
//! Usage:
//!   floorplan-to-walls --floorplan room.dat --panel panel.json --save room.obj

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wallkit_floorplan::{
    build_scene, load_panel, plan_floor, DirectionPriority, FloorLayout, LayoutConfig,
    MeshScene, SceneBuilder,
};

/// Build a single-level wall model from a floor plan grid
#[derive(Parser, Debug)]
#[command(name = "floorplan-to-walls")]
#[command(about = "Place one wall panel between every pair of adjacent wall cells")]
struct Args {
    /// Floor plan grid of 1 / -1 / 0 tokens
    #[arg(short = 'f', long = "floorplan", value_name = "FILE")]
    floorplan: PathBuf,

    /// Panel primitive descriptor (JSON)
    #[arg(short = 'p', long = "panel", value_name = "FILE")]
    panel: PathBuf,

    /// Output model path (Wavefront OBJ)
    #[arg(short = 's', long = "save", value_name = "FILE")]
    save: PathBuf,

    /// World units between adjacent cells [default: panel length]
    #[arg(long)]
    spacing: Option<f64>,

    /// Neighbor probing order, e.g. up,down,left,right
    #[arg(long)]
    priority: Option<DirectionPriority>,

    /// Also write the traced runs and placements as JSON
    #[arg(long, value_name = "FILE")]
    dump: Option<PathBuf>,

    /// Log every traced run
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "info,wallkit_floorplan=debug,floorplan_to_walls=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = LayoutConfig::from_env().context("Invalid environment configuration")?;
    run(&args, config)?;
    Ok(())
}

/// Command line flags take precedence over `base` (defaults plus environment)
fn layout_config(args: &Args, base: LayoutConfig) -> LayoutConfig {
    let mut config = base;
    if let Some(spacing) = args.spacing {
        config.grid_spacing = Some(spacing);
    }
    if let Some(priority) = args.priority {
        config.priority = priority;
    }
    config
}

/// Read the inputs, lay out the walls and write every requested output.
///
/// Outputs are first written next to their destination and only moved into
/// place once all of them succeeded, so a failed run leaves no output behind.
fn run(args: &Args, base: LayoutConfig) -> Result<FloorLayout> {
    let config = layout_config(args, base);

    let text = fs::read_to_string(&args.floorplan)
        .with_context(|| format!("Cannot read floor plan '{}'", args.floorplan.display()))?;
    let panel = load_panel(&args.panel)
        .with_context(|| format!("Cannot load panel '{}'", args.panel.display()))?;

    info!(
        floorplan = %args.floorplan.display(),
        thickness = panel.thickness,
        height = panel.height,
        length = panel.length,
        priority = %config.priority,
        "Loaded inputs"
    );

    let layout = plan_floor(&text, &panel, &config)
        .with_context(|| format!("Cannot lay out '{}'", args.floorplan.display()))?;

    let mut scene = MeshScene::new(&panel).context("Cannot build panel primitive")?;
    build_scene(&layout, &mut scene)?;

    let mut outputs = StagedOutputs::default();

    if let Some(dump) = &args.dump {
        let json = serde_json::to_string_pretty(&layout)?;
        let staging = outputs.stage(dump)?;
        fs::write(&staging, json)
            .with_context(|| format!("Cannot write layout dump '{}'", dump.display()))?;
    }

    let staging = outputs.stage(&args.save)?;
    scene
        .export(&staging)
        .with_context(|| format!("Cannot write model '{}'", args.save.display()))?;

    outputs.commit()?;

    info!(
        output = %args.save.display(),
        runs = layout.runs.len(),
        panels = layout.panel_count(),
        vertices = scene.mesh().vertex_count(),
        "Saved wall model"
    );

    Ok(layout)
}

/// Output files written under a temporary sibling name until `commit`.
/// Anything not committed is removed on drop.
#[derive(Debug, Default)]
struct StagedOutputs {
    pending: Vec<(PathBuf, PathBuf)>,
}

impl StagedOutputs {
    /// Register `target` and return the path to write it to for now
    fn stage(&mut self, target: &Path) -> Result<PathBuf> {
        let mut name = target
            .file_name()
            .ok_or_else(|| anyhow!("Output path '{}' has no file name", target.display()))?
            .to_os_string();
        name.push(".partial");
        let staging = target.with_file_name(name);
        self.pending.push((staging.clone(), target.to_path_buf()));
        Ok(staging)
    }

    /// Move every staged file onto its target
    fn commit(mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending);
        let mut committed: Vec<PathBuf> = Vec::with_capacity(pending.len());

        for (index, (staging, target)) in pending.iter().enumerate() {
            if let Err(err) = fs::rename(staging, target) {
                // Undo earlier moves so outputs appear together or not at all
                for path in &committed {
                    let _ = fs::remove_file(path);
                }
                self.pending = pending[index..].to_vec();
                return Err(err)
                    .with_context(|| format!("Cannot move output into '{}'", target.display()));
            }
            committed.push(target.clone());
        }

        Ok(())
    }
}

impl Drop for StagedOutputs {
    fn drop(&mut self) {
        for (staging, _) in &self.pending {
            if staging.exists() {
                if let Err(err) = fs::remove_file(staging) {
                    warn!(path = %staging.display(), error = %err, "Cannot remove partial output");
                }
            }
        }
    }
}
