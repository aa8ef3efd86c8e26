//! Roomforge CLI - export room-scan captures as 3D scene bundles

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roomforge_core::prelude::*;
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser)]
#[command(name = "roomforge")]
#[command(about = "Turn room-scan captures into renderable 3D scenes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a capture and export the scene bundle
    Export {
        /// Capture JSON file produced by the scanning service
        #[arg(short, long)]
        input: PathBuf,

        /// Destination directory for Room.glb and Room.json
        #[arg(short, long, default_value = "Export")]
        out_dir: PathBuf,

        /// Scene asset format (glb or gltf)
        #[arg(short, long, default_value = "glb")]
        format: String,
    },

    /// Print a summary of a capture file
    Inspect {
        /// Capture JSON file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            out_dir,
            format,
        } => run_export(&input, &out_dir, &format),
        Commands::Inspect { input } => run_inspect(&input),
    }
}

fn run_export(input: &PathBuf, out_dir: &PathBuf, format: &str) -> Result<()> {
    let format = ExportFormat::from_extension(format)
        .with_context(|| format!("unsupported format: {format} (expected glb or gltf)"))?;

    let room = load_capture(input)?;
    let registry = ShapeRegistry::standard();
    let assembly = assemble(&room, &registry);

    for issue in &assembly.issues {
        warn!("skipped entity: {issue}");
    }

    let artifacts = export_bundle(&room, &assembly.graph, out_dir, format)?;

    println!(
        "Assembled {} nodes from {} entities ({} skipped)",
        assembly.graph.node_count(),
        room.entity_count(),
        assembly.issues.len()
    );
    println!("Scene:   {}", artifacts.scene_path.display());
    println!("Capture: {}", artifacts.capture_path.display());

    Ok(())
}

fn run_inspect(input: &PathBuf) -> Result<()> {
    let room = load_capture(input)?;

    println!("Capture: {}", input.display());
    for kind in SurfaceKind::ALL {
        println!("  {:<8} {}", kind.as_str(), room.surfaces(kind).len());
    }
    println!("  objects  {}", room.objects.len());
    for (i, object) in room.objects.iter().enumerate() {
        let d = object.dimensions;
        println!(
            "    [{i}] {} {:.2}x{:.2}x{:.2} m",
            object.category.as_str(),
            d.x,
            d.y,
            d.z
        );
    }

    Ok(())
}

fn load_capture(input: &PathBuf) -> Result<CapturedRoom> {
    let bytes =
        std::fs::read(input).with_context(|| format!("cannot read {}", input.display()))?;
    CapturedRoom::from_json_slice(&bytes)
        .with_context(|| format!("cannot decode {}", input.display()))
}
