//! Build script for the Spotify Playlist Exporter CLI.
//!
//! Copies the `.env.example` configuration template to the user's local data
//! directory so it sits next to where `spotilist` looks for its `.env` file:
//! - Linux: `~/.local/share/spotilist/.env.example`
//! - macOS: `~/Library/Application Support/spotilist/.env.example`
//! - Windows: `%LOCALAPPDATA%/spotilist/.env.example`
//!
//! A missing template only produces a cargo warning. Failing to create the
//! directory or write the file fails the build.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotilist");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
