//! Puts `memory.x` on the linker search path and records the build time.
//!
//! The build time is exported as `THERMOCLOCK_BUILD_DATE` (`"Mmm dd yyyy"`)
//! and `THERMOCLOCK_BUILD_TIME` (`"hh:mm:ss"`), UTC. `SOURCE_DATE_EPOCH`
//! overrides the current time for reproducible builds.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

fn main() {
    // Put `memory.x` in our output directory and ensure it's
    // on the linker search path.
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    // By default, Cargo will re-run a build script whenever
    // any file in the project changes. Only memory.x and the
    // reproducible-build override matter here.
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let built_at = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);

    // Same shape as the C `__DATE__` / `__TIME__` macros
    println!(
        "cargo:rustc-env=THERMOCLOCK_BUILD_DATE={}",
        built_at.format("%b %e %Y")
    );
    println!(
        "cargo:rustc-env=THERMOCLOCK_BUILD_TIME={}",
        built_at.format("%H:%M:%S")
    );
}
