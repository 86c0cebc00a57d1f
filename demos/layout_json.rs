//! Lays out a JSON collection description and prints every frame as JSON
//!
//! Usage:
//!   cargo run --example layout_json -- <collection.json>              # Output JSON to stdout
//!   cargo run --example layout_json -- <collection.json> -o out.json  # Output JSON to file
//!
//! Set `RUST_LOG=flexlayout=debug` to see pass summaries and skipped items.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use flexlayout::{CollectionConfig, LayoutAttributes, Size};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Output {
    content_size: Size,
    warnings: Vec<String>,
    attributes: Vec<LayoutAttributes>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flexlayout=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: layout_json <collection.json> [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    let text = match fs::read_to_string(input_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let config = match CollectionConfig::from_json(&text) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error parsing collection: {}", e);
            std::process::exit(1);
        }
    };

    let (layout, stats) = match config.layout() {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Layout failed: {}", e);
            std::process::exit(1);
        }
    };

    let mut attributes: Vec<LayoutAttributes> = layout.cache().iter().collect();
    attributes.sort_by_key(|a| a.element);

    let output = Output {
        content_size: layout.content_size(),
        warnings: stats.warnings.iter().map(ToString::to_string).collect(),
        attributes,
    };

    let json = match serde_json::to_string_pretty(&output) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
