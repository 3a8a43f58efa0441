// Copies the static page to `dist/`. The wasm pkg itself is built by `cargo run`
// (see src/main.rs) so that wasm-pack never re-enters this script.
use std::{fs, path::Path};

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let out_dir = Path::new("dist");
    if out_dir.exists() {
        fs::remove_dir_all(out_dir).ok();
    }
    fs::create_dir_all(out_dir).ok();

    let static_dir = Path::new("static");
    if static_dir.exists() {
        let options = CopyOptions {
            content_only: true,
            overwrite: true,
            ..CopyOptions::new()
        };
        if let Err(e) = copy(static_dir, out_dir, &options) {
            println!("cargo:warning=copying static/ failed: {e}");
        }
    }
}
