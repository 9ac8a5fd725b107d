//! Tilepak CLI - Converts Aseprite tilemaps into tile renderer blobs.
//!
//! This is the main entry point for the tilepak command-line application.

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tilepak::prelude::*;

/// Tilepak - Aseprite tilemap to tile renderer converter
#[derive(Parser)]
#[command(name = "tilepak")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an Aseprite file into palette, pattern and name table blobs
    Convert {
        /// Input .ase/.aseprite file
        #[arg(short, long, env = "TILEPAK_INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, env = "TILEPAK_OUTPUT")]
        output: PathBuf,
    },

    /// Show the decoded contents of an Aseprite file
    Inspect {
        /// Input .ase/.aseprite file
        #[arg(short, long, env = "TILEPAK_INPUT")]
        input: PathBuf,

        /// Print the document as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { input, output } => {
            cmd_convert(&input, &output)?;
        }
        Commands::Inspect { input, json } => {
            cmd_inspect(&input, json)?;
        }
    }

    Ok(())
}

fn load_document(input: &Path) -> Result<AseDocument> {
    let data = fs::read(input)
        .with_context(|| format!("Failed to read input file {}", input.display()))?;

    let start = Instant::now();
    let doc = AseDocument::parse(&data).context("Failed to decode Aseprite file")?;
    debug!(elapsed = ?start.elapsed(), "Decoded {}", input.display());

    Ok(doc)
}

fn cmd_convert(input: &Path, output: &Path) -> Result<()> {
    info!("Converting: {} -> {}", input.display(), output.display());

    let doc = load_document(input)?;
    let blobs = convert(&doc).context("Failed to convert document")?;

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    for blob in &blobs {
        let path = output.join(blob.name.to_string());
        fs::write(&path, &blob.data)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {} ({} bytes)", path.display(), blob.data.len());
    }

    for &layer_index in doc.cels.keys() {
        if let Some(layer) = doc.layer(layer_index) {
            info!(
                "layer={} name={} tileset={}",
                layer_index,
                layer.name_lossy(),
                layer
                    .tileset_index
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".into())
            );
        }
    }

    info!("Conversion complete: {} blobs", blobs.len());

    Ok(())
}

fn cmd_inspect(input: &Path, json: bool) -> Result<()> {
    let doc = load_document(input)?;

    if json {
        let text = serde_json::to_string_pretty(&doc).context("Failed to serialize document")?;
        println!("{}", text);
        return Ok(());
    }

    let header = &doc.header;
    println!(
        "Canvas: {}x{}, {} frame(s), {} bpp, grid {}x{}",
        header.width,
        header.height,
        header.frames,
        header.color_depth,
        header.grid_width,
        header.grid_height
    );

    match &doc.palette {
        Some(palette @ Palette::Legacy(legacy)) => println!(
            "Palette: legacy, {} packet(s), {} colors",
            legacy.packets.len(),
            palette.color_count()
        ),
        Some(Palette::Indexed(indexed)) => println!(
            "Palette: indexed, entries {}..={}",
            indexed.first_index, indexed.last_index
        ),
        None => println!("Palette: none"),
    }

    println!("\nTilesets: {}", doc.tilesets.len());
    for (id, tileset) in &doc.tilesets {
        let source = match &tileset.source {
            TilesetSource::Embedded { pixels, .. } => {
                format!("embedded, {} pixel bytes", pixels.len())
            }
            TilesetSource::External { file_id, tileset_id } => {
                format!("external file {} tileset {}", file_id, tileset_id)
            }
        };
        println!(
            "  [{}] {:?}: {} tiles of {}x{} ({})",
            id,
            tileset.name_lossy(),
            tileset.tile_count,
            tileset.tile_width,
            tileset.tile_height,
            source
        );
    }

    println!("\nLayers: {}", doc.layers.len());
    for (index, layer) in doc.layers.iter().enumerate() {
        let tileset = layer
            .tileset_index
            .map(|id| format!(" tileset={}", id))
            .unwrap_or_default();
        println!(
            "  [{}] {:?} {:?}{}",
            index,
            layer.name_lossy(),
            layer.kind,
            tileset
        );
    }

    println!("\nCels: {}", doc.cels.len());
    for (layer_index, cel) in &doc.cels {
        match cel.tilemap() {
            Some(tilemap) => println!(
                "  layer {}: {:?} {}x{} at ({}, {})",
                layer_index,
                cel.content.cel_type(),
                tilemap.width,
                tilemap.height,
                cel.x,
                cel.y
            ),
            None => println!(
                "  layer {}: {:?} at ({}, {})",
                layer_index,
                cel.content.cel_type(),
                cel.x,
                cel.y
            ),
        }
    }

    if !doc.unhandled_chunks.is_empty() {
        println!("\nUnhandled chunks: {}", doc.unhandled_chunks.len());
        for chunk in &doc.unhandled_chunks {
            println!("  type 0x{:04X}, {} bytes", chunk.chunk_type, chunk.size);
        }
    }

    Ok(())
}
