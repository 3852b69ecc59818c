//! Build script to stamp the binary with the source revision

use std::process::Command;

fn main() {
    // Release pipelines without a checkout can pass the revision in directly
    let git_hash = std::env::var("TRANSIT_GIT_HASH").ok().unwrap_or_else(|| {
        match Command::new("git").args(["rev-parse", "--short", "HEAD"]).output() {
            Ok(output) if output.status.success() => {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            }
            _ => String::from("unknown"),
        }
    });

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rerun-if-env-changed=TRANSIT_GIT_HASH");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
