//! sussy-export - Sussy mesh export tool
//!
//! Converts OBJ/glTF meshes to `.sussy` files, and `.sussy` files back to OBJ.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sussy_export::{format_dump, manifest, mesh, Registry, SUSSY_EXT};

#[derive(Parser)]
#[command(name = "sussy-export")]
#[command(about = "Sussy mesh export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a single mesh file
    Mesh {
        /// Input mesh file (glTF/GLB/OBJ)
        input: PathBuf,

        /// Output .sussy file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a .sussy file into a host mesh format
    Import {
        /// Input .sussy file
        input: PathBuf,

        /// Output mesh file (default: input with .obj extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the tables and triangles of a .sussy file
    Dump {
        /// Input .sussy file
        input: PathBuf,
    },

    /// Build meshes from a manifest file
    Build {
        /// Path to sussy.toml manifest
        #[arg(default_value = "sussy.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without building
    Check {
        /// Path to sussy.toml manifest
        #[arg(default_value = "sussy.toml")]
        manifest: PathBuf,
    },

    /// List supported source formats
    Formats,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = Registry::new();

    match cli.command {
        Commands::Mesh { input, output } => {
            let output = output.unwrap_or_else(|| input.with_extension(SUSSY_EXT));
            tracing::info!("Converting {:?} -> {:?}", input, output);
            mesh::convert_mesh(&registry, &input, &output)?;
            tracing::info!("Done!");
        }

        Commands::Import { input, output } => {
            let output = output.unwrap_or_else(|| input.with_extension("obj"));
            tracing::info!("Importing {:?} -> {:?}", input, output);
            let writer = registry.importer_for(&output)?;
            let decoded = sussy_export::import_file(&input)
                .with_context(|| format!("Failed to read {:?}", input))?;
            writer(&decoded, &output)?;
            tracing::info!(
                "Imported {} triangles ({} pos/normals, {} uvs)",
                decoded.triangles.len(),
                decoded.pos_normals.len(),
                decoded.uvs.len()
            );
        }

        Commands::Dump { input } => {
            let decoded = sussy_export::import_file(&input)
                .with_context(|| format!("Failed to read {:?}", input))?;
            print!("{}", format_dump(&decoded));
        }

        Commands::Build {
            manifest,
            output,
            verbose,
        } => {
            if verbose {
                tracing::info!("Building meshes from {:?}", manifest);
            }
            let config = manifest::load_manifest(&manifest)?;
            let written = manifest::build_all(&config, &registry, output.as_deref())?;
            tracing::info!("Build complete! {} meshes written", written.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config, &registry)?;
            tracing::info!("Manifest is valid!");
        }

        Commands::Formats => {
            for (ext, label) in registry.exporters() {
                println!(".{:<6} {}", ext, label);
            }
        }
    }

    Ok(())
}
