//! Build script for the storefront crate.
//!
//! Fingerprints `static/css/main.css` so templates can link an immutable,
//! cache-busted stylesheet URL. The hash is exposed to the crate as the
//! `CSS_HASH` compile-time env var and a hashed copy is written next to the
//! original for `ServeDir` to pick up.

use std::{env, fs, path::PathBuf};

use sha2::{Digest, Sha256};

const HASH_LEN: usize = 8;

fn main() {
    let manifest_dir = PathBuf::from(
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo"),
    );
    let css_path = manifest_dir.join("static/css/main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    let Ok(content) = fs::read(&css_path) else {
        // Fresh checkouts may not have assets yet; templates then link the
        // unhashed name
        println!("cargo:warning=Could not read {}", css_path.display());
        println!("cargo:rustc-env=CSS_HASH=");
        return;
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = digest.chars().take(HASH_LEN).collect::<String>();

    println!("cargo:rustc-env=CSS_HASH={short_hash}");

    let derived_dir = manifest_dir.join("static/css/derived");
    fs::create_dir_all(&derived_dir).expect("Failed to create derived CSS directory");
    fs::copy(&css_path, derived_dir.join(format!("main.{short_hash}.css")))
        .expect("Failed to copy CSS to derived directory");
}
