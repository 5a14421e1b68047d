use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tilespace_common::{AtlasTexture, TextureId, Tile, TileRect};
use tilespace_map::ChunkedTileMap;
use tilespace_render::RecordingTarget;
use tilespace_tools::MapInspector;

#[derive(Parser)]
#[command(name = "tilespace-cli", about = "CLI tool for tilespace operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Generate a procedural map and report its cache state
    Generate {
        /// Map width in tiles
        #[arg(long, default_value = "1000")]
        width: u32,
        /// Map height in tiles
        #[arg(long, default_value = "1000")]
        height: u32,
        /// RNG seed for deterministic generation
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Write the tile grid as JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Generate a map, then drive render frames against a recording target
    Render {
        /// Map width in tiles
        #[arg(long, default_value = "1000")]
        width: u32,
        /// Map height in tiles
        #[arg(long, default_value = "1000")]
        height: u32,
        /// RNG seed for deterministic generation
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Number of frames to render
        #[arg(short, long, default_value = "5")]
        frames: usize,
        /// Tile writes applied between frames
        #[arg(long, default_value = "3")]
        writes_per_frame: u32,
        /// Viewport edge length in tiles (full map when omitted)
        #[arg(long)]
        view: Option<u32>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("tilespace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", tilespace_common::crate_info());
            println!("map: {}", tilespace_map::crate_info());
            println!("render: {}", tilespace_render::crate_info());
            println!("tools: {}", tilespace_tools::crate_info());
        }
        Commands::Generate {
            width,
            height,
            seed,
            out,
        } => {
            println!("Generating {width}x{height} map, seed={seed}");
            let map = generate_map(width, height, seed)?;
            println!("{}", MapInspector::summary(&map));

            if let Some(path) = out {
                let json = serde_json::to_string(map.grid())?;
                std::fs::write(&path, json)?;
                println!("Wrote tile grid to {}", path.display());
            }
        }
        Commands::Render {
            width,
            height,
            seed,
            frames,
            writes_per_frame,
            view,
        } => {
            println!("Render demo: {width}x{height} map, seed={seed}, {frames} frames");
            let mut map = generate_map(width, height, seed)?;
            let mut rng = seed;

            let view_rect = match view {
                Some(edge) => TileRect::new(0, 0, edge.saturating_sub(1), edge.saturating_sub(1)),
                None => TileRect::covering(width, height),
            };

            for frame in 0..frames {
                if frame > 0 {
                    for _ in 0..writes_per_frame {
                        rng = splitmix64(rng);
                        let x = (rng % width as u64) as u32;
                        rng = splitmix64(rng);
                        let y = (rng % height as u64) as u32;
                        map.set(x, y, Tile::new((rng % 4) as u32, false));
                    }
                }

                let mut target = RecordingTarget::new();
                let stats = map.render(&mut target, view_rect);
                println!(
                    "Frame {frame}: drawn={} rebuilt={} quads={} draw_calls={}",
                    stats.chunks_drawn,
                    stats.chunks_rebuilt,
                    stats.quads,
                    target.calls().len()
                );
            }

            println!("{}", MapInspector::summary(&map));
        }
    }

    Ok(())
}

/// Build the demo map: a border of open floor tiles around an interior
/// sprinkled with solid obstacle tiles at roughly 20% density, leaving the
/// top-left 20x20 spawn area clear.
fn generate_map(width: u32, height: u32, seed: u64) -> anyhow::Result<ChunkedTileMap> {
    // 32px atlas of 8px tiles: indices 0..=15 are valid cells.
    let atlas = AtlasTexture::new(TextureId(0), 32, 32);
    let mut map = ChunkedTileMap::new(width, height, Some(atlas), 8)?;

    let mut rng = seed;
    for y in 0..height {
        for x in 0..width {
            if y == 0 || x == 0 || x == width - 1 || y == height - 1 {
                map.set(x, y, Tile::new(0, false));
            } else if x > 20 || y > 20 {
                rng = splitmix64(rng);
                if frac(rng) > 0.8 {
                    rng = splitmix64(rng);
                    map.set(x, y, Tile::new(1 + (rng % 3) as u32, true));
                }
            }
        }
    }
    Ok(map)
}

/// Splitmix64: fast, high-quality deterministic PRNG step function.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Map a PRNG output to [0, 1).
fn frac(value: u64) -> f64 {
    (value >> 11) as f64 / (1u64 << 53) as f64
}
