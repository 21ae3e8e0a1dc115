//! Build script for the playlist feature extractor.
//!
//! Copies the `.env.example` configuration template into the user's local
//! data directory so it sits next to the `.env` file the binary loads.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root into the local data directory.
///
/// # Destination
///
/// - Linux: `~/.local/share/sporfeat/.env.example`
/// - macOS: `~/Library/Application Support/sporfeat/.env.example`
/// - Windows: `%LOCALAPPDATA%/sporfeat/.env.example`
///
/// A missing template only produces a cargo warning; directory or copy
/// failures fail the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("sporfeat");
    fs::create_dir_all(&out_dir)?;

    if template.is_file() {
        fs::copy(&template, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
    }

    Ok(())
}
