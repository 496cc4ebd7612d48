//! CLI tool for importing PowerPoint files into a slide store.

use anyhow::{Context, Result};
use clap::Parser;
use deck_core::JsonDirStore;
use deck_pptx::{ImportOptions, PptxImporter};
use std::path::{Path, PathBuf};

/// Import .pptx files as slide and presentation documents.
#[derive(Parser, Debug)]
#[command(name = "deck-import")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file(s) (.pptx)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Presentation title (default: input file name without extension)
    #[arg(short, long)]
    title: Option<String>,

    /// Owner id stored on each created presentation
    #[arg(short, long)]
    user_id: Option<u64>,

    /// Directory holding the document store
    #[arg(short, long, default_value = "deck-store")]
    store: PathBuf,

    /// Print the synthesized slides without writing to the store
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Print single-line JSON instead of pretty-printed JSON
    #[arg(short, long)]
    compact: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let importer = PptxImporter::new();
    let mut store = if args.dry_run {
        None
    } else {
        let store = JsonDirStore::open(&args.store)
            .with_context(|| format!("Failed to open store at {}", args.store.display()))?;
        Some(store)
    };

    let mut failures = 0usize;
    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &importer, store.as_mut()) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} file(s) failed to import", failures, args.input.len());
    }

    Ok(())
}

/// Import a single file and render the result as JSON.
fn process_file(
    input_path: &Path,
    args: &Args,
    importer: &PptxImporter,
    store: Option<&mut JsonDirStore>,
) -> Result<String> {
    let data = std::fs::read(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;
    log::debug!("Read {} bytes from {}", data.len(), input_path.display());

    let filename = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let value = match store {
        Some(store) => {
            let options = import_options(args);
            let presentation = importer
                .import(&data, filename, &options, store)
                .with_context(|| format!("Failed to import {}", filename))?;

            if args.verbose {
                eprintln!(
                    "  Created presentation {} with {} slides in {}",
                    presentation.id,
                    presentation.slides.len(),
                    store.root().display()
                );
            }
            serde_json::to_value(&presentation)?
        }
        None => {
            let deck = importer
                .extract(&data)
                .with_context(|| format!("Failed to read {}", filename))?;

            if args.verbose {
                eprintln!(
                    "  Found {} slides ({} with warnings)",
                    deck.slides.len(),
                    deck.warnings.len()
                );
            }
            serde_json::to_value(&deck)?
        }
    };

    let output = if args.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };

    Ok(output)
}

fn import_options(args: &Args) -> ImportOptions {
    let mut options = ImportOptions::new();
    if let Some(title) = &args.title {
        options = options.with_title(title.clone());
    }
    if let Some(user_id) = args.user_id {
        options = options.with_user_id(user_id);
    }
    options
}
