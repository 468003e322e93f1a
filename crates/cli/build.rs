// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

/// Environment variables read by `costq`, exposed as `env_vars::NAME` consts.
const ENV_VARS: &[&str] = &["COSTQ_LOG", "COSTQ_USER", "NO_COLOR", "COLOR"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::env::var("OUT_DIR")?;
    let mut f = std::fs::File::create(std::path::Path::new(&out_dir).join("env_vars.rs"))?;
    for name in ENV_VARS {
        writeln!(f, "pub const {name}: &str = \"{name}\";")?;
    }
    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
