//! meshful command-line tool.
//!
//! # Commands
//!
//! - `meshful info <FILE>` - Print triangle count, bounds, volume and area
//! - `meshful convert <IN> <OUT> [--ascii]` - Convert between STL and OBJ
//!
//! Logging goes to stderr. `RUST_LOG` overrides the `-v` level.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use meshful::io::{load_mesh, save_mesh, save_stl, MeshFormat};
use meshful::MeshReport;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Inspect and convert triangle meshes.
#[derive(Parser)]
#[command(name = "meshful")]
#[command(about = "Inspect and convert STL/OBJ triangle meshes", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a geometric summary of a mesh file
    Info {
        /// Mesh file (.stl or .obj)
        #[arg(name = "FILE")]
        path: PathBuf,
    },

    /// Convert a mesh file to another format (chosen by extension)
    Convert {
        /// Input mesh file
        #[arg(name = "IN")]
        input: PathBuf,

        /// Output mesh file
        #[arg(name = "OUT")]
        output: PathBuf,

        /// Write ASCII instead of binary STL
        #[arg(long)]
        ascii: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Info { path } => run_info(&path),
        Commands::Convert {
            input,
            output,
            ascii,
        } => run_convert(&input, &output, ascii),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_info(path: &Path) -> Result<()> {
    let mesh = load_mesh(path).with_context(|| format!("Failed to load {}", path.display()))?;
    print!("{}", MeshReport::new(&mesh));
    Ok(())
}

fn run_convert(input: &Path, output: &Path, ascii: bool) -> Result<()> {
    let mesh = load_mesh(input).with_context(|| format!("Failed to load {}", input.display()))?;

    match MeshFormat::from_path(output) {
        Some(MeshFormat::Stl) if ascii => save_stl(&mesh, output, false),
        Some(MeshFormat::Obj) if ascii => bail!("--ascii only applies to STL output"),
        _ => save_mesh(&mesh, output),
    }
    .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        from = %input.display(),
        to = %output.display(),
        triangles = mesh.len(),
        "Converted"
    );
    Ok(())
}
