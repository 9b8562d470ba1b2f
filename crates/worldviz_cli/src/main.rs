//! Load a world file and print its markers as JSON.
//!
//! Run with: cargo run -- worlds/office.yaml
//!
//! Model directories come from `GAZEBO_MODEL_PATH` and `$HOME/.gazebo/models`.

use std::env;
use std::io::{self, Write};

use anyhow::{Context, Result};
use worldviz_core::load_world_from_env;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: worldviz <path-to-world.yaml>");
        eprintln!("\nExample:");
        eprintln!("  GAZEBO_MODEL_PATH=/opt/models worldviz worlds/office.yaml");
        std::process::exit(2);
    }

    let path = &args[1];
    log::info!("Loading world file: {}", path);

    if let Err(e) = run(path) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Load `path` and write its markers to stdout as pretty JSON.
fn run(path: &str) -> Result<()> {
    let markers = load_world_from_env(path)
        .with_context(|| format!("Failed to load world {}", path))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &markers).context("Failed to write markers")?;
    writeln!(out)?;

    Ok(())
}
