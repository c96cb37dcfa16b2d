use anyhow::{bail, Context, Result};
use cookbook::{logging, normalize, Cookbook};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    logging::init("warn");

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("parse") if args.len() > 2 => run_parse(&args[2..].join(" ")),
        Some("summary") if args.len() > 3 => run_summary(Path::new(&args[2]), &args[3..].join(" ")),
        _ => {
            eprintln!("Usage:");
            eprintln!("  cookbook parse <name...>");
            eprintln!("  cookbook summary <entries.json> <recipe name...>");
            std::process::exit(2);
        }
    }
}

fn run_parse(input: &str) -> Result<()> {
    match normalize(input) {
        Some(name) => {
            println!("{}", name);
            Ok(())
        }
        None => bail!("{:?} has no letters to make a name from", input),
    }
}

fn run_summary(entries_path: &Path, name: &str) -> Result<()> {
    let cookbook = load_cookbook(entries_path)?;
    let summary = cookbook.summarize(name)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Load a JSON array of entry objects (the same shape POST /entry accepts)
fn load_cookbook(path: &Path) -> Result<Cookbook> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let payloads: Vec<Value> =
        serde_json::from_str(&raw).with_context(|| format!("{} is not a JSON array", path.display()))?;

    let cookbook = Cookbook::new();
    for (i, payload) in payloads.iter().enumerate() {
        cookbook
            .insert(payload)
            .with_context(|| format!("Entry #{} in {} was rejected", i + 1, path.display()))?;
    }

    eprintln!("✓ Loaded {} entries from {}", cookbook.len(), path.display());
    Ok(cookbook)
}
