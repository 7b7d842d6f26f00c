//! Build script for trackmap.
//!
//! Copies the `.env.example` template into the user's local data directory so
//! the configuration layout is discoverable after `cargo install`.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` to `<data_local_dir>/trackmap/.env.example`.
///
/// # Destination
///
/// - Linux: `~/.local/share/trackmap/.env.example`
/// - macOS: `~/Library/Application Support/trackmap/.env.example`
/// - Windows: `%LOCALAPPDATA%/trackmap/.env.example`
///
/// Every failure is reported as a cargo warning; the build itself never fails
/// because the template could not be copied.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("trackmap");

    let copied = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::read_to_string(&env_example_path))
        .and_then(|contents| fs::write(out_dir.join(".env.example"), contents));

    if let Err(e) = copied {
        println!(
            "cargo:warning=could not copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
