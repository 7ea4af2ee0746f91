//! Writes `include/hopsan_stub.h`: the C declarations of the stub's entry
//! points, in the shape `libhopsanc` exports them.

use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=src/engine.rs");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let crate_dir = Path::new(&manifest_dir);
    let header = crate_dir.join("include").join("hopsan_stub.h");

    let config = cbindgen::Config::from_file(crate_dir.join("cbindgen.toml"))
        .expect("failed to read cbindgen.toml");
    fs::create_dir_all(crate_dir.join("include")).expect("failed to create include/");
    cbindgen::generate_with_config(crate_dir, config)
        .expect("cbindgen failed to generate the stub engine header")
        .write_to_file(header);
}
