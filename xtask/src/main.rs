// Licensed under the Apache-2.0 license

mod bloat;

use anyhow::{bail, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut args = args.iter().map(String::as_str);

    match args.next() {
        Some("bloat") => {
            let release = args.any(|a| a == "--release");
            bloat::analyze(release)
        }
        Some("bloat-report") => {
            let out_dir = args.next().unwrap_or("target/bloat-report");
            bloat::report(out_dir)
        }
        Some(other) => bail!("unknown task `{other}`\n{USAGE}"),
        None => {
            println!("{USAGE}");
            Ok(())
        }
    }
}

const USAGE: &str = "\
tasks:
  bloat [--release]     run cargo-bloat for the firmware target
  bloat-report [DIR]    write per-function and per-crate size reports";
