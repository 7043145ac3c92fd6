//! Build script for bakerscale
//!
//! Bumps `build_number.txt` on each recompilation and embeds the number and
//! a UTC timestamp as `BAKERSCALE_BUILD_*` environment variables.

use std::fs;
use std::path::Path;

const BUILD_NUMBER_FILE: &str = "build_number.txt";

/// Last recorded build number; a missing or garbled file counts as 0
fn read_build_number(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn main() {
    // Only rerun when src/ files change
    println!("cargo:rerun-if-changed=src");

    let path = Path::new(BUILD_NUMBER_FILE);
    let build_number = read_build_number(path) + 1;

    if let Err(e) = fs::write(path, build_number.to_string()) {
        println!("cargo:warning=Could not record build number in {}: {}", BUILD_NUMBER_FILE, e);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    println!("cargo:rustc-env=BAKERSCALE_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=BAKERSCALE_BUILD_TIMESTAMP={}", timestamp);
}
