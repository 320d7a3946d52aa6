//! Adds the `defmt` linker script when logging is enabled. The memory layout comes from
//! `stm32f7xx-hal` through its chip feature.

use std::env;

fn main() {
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg=-Tdefmt.x");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
