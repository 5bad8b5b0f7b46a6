//! Minify WGSL shaders.

use std::path::Path;

use naga::{
    back::wgsl::WriterFlags,
    valid::{Capabilities, ValidationFlags, Validator},
};

/// Validate a WGSL shader, strip unused items and write the minified source to file.
fn minify_wgsl(source: impl AsRef<Path>, target: impl AsRef<Path>) {
    // Read the source WGSL
    let source = std::fs::read_to_string(source).expect("Error reading WGSL shader file");

    // Parse into NAGA module
    let mut module = naga::front::wgsl::parse_str(&source).expect("Error compiling WGSL shader");

    // Remove unused items before validating, so the module info matches what gets written
    naga::compact::compact(&mut module);

    // Create the validator
    let info = Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .expect("Error while validating WGSL shader");

    // Compile back into WGSL
    let output = naga::back::wgsl::write_string(&module, &info, WriterFlags::empty())
        .expect("Error converting WGSL module back to WGSL code");

    // Minify the WGSL
    let output = wgsl_minifier::minify_wgsl_source(&output);

    // Convert to bytes
    std::fs::write(target, output).expect("Error writing minified WGSL shader to file");
}

fn main() {
    // Rerun build script if shaders changed
    println!("cargo::rerun-if-changed=shaders/rounded_rect.wgsl");
    println!("cargo::rerun-if-changed=shaders/upscale.wgsl");

    let out_dir_str = std::env::var_os("OUT_DIR").expect("Cargo always sets OUT_DIR");
    let out_dir = Path::new(&out_dir_str);

    // Validate and minify the shaders into the OUT_DIR
    minify_wgsl("shaders/rounded_rect.wgsl", out_dir.join("rounded_rect.wgsl"));
    minify_wgsl("shaders/upscale.wgsl", out_dir.join("upscale.wgsl"));
}
