// Licensed under the Apache-2.0 license

use anyhow::{bail, Context, Result};
use std::process::Command;

/// Firmware target the size analysis runs against.
const TARGET: &str = "riscv32imac-unknown-none-elf";

/// Run cargo-bloat once and print the table.
pub fn analyze(release: bool) -> Result<()> {
    let output = bloat_command(release, &[])
        .output()
        .context("failed to run cargo bloat - install it with 'cargo install cargo-bloat'")?;

    if !output.status.success() {
        bail!(
            "cargo bloat failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    print!("{}", String::from_utf8_lossy(&output.stdout));
    Ok(())
}

/// Write per-function and per-crate release size reports into `out_dir`.
pub fn report(out_dir: &str) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {out_dir}"))?;

    for (name, extra) in [("functions", &[][..]), ("crates", &["--crates"][..])] {
        let output = bloat_command(true, extra)
            .output()
            .context("failed to run cargo bloat")?;
        if !output.status.success() {
            bail!(
                "cargo bloat failed: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }
        let path = format!("{out_dir}/{name}.txt");
        std::fs::write(&path, &output.stdout)
            .with_context(|| format!("failed to write {path}"))?;
        println!("wrote {path}");
    }
    Ok(())
}

fn bloat_command(release: bool, extra: &[&str]) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["bloat", "--target", TARGET]);
    if release {
        cmd.arg("--release");
    }
    cmd.args(extra);
    cmd
}
