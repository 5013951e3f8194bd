use std::process::Command;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Chromatic workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the loom model-checking suite (`--cfg loom` builds)
    Loom {
        /// Preemption bound passed to loom; lower is faster, higher is
        /// more thorough
        #[arg(long, default_value_t = 3)]
        max_preemptions: usize,
    },
    /// Run the criterion benchmarks
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Loom { max_preemptions } => run_loom(max_preemptions),
        Commands::Bench { quick } => run_benchmarks(quick),
    }
}

fn run_loom(max_preemptions: usize) -> Result<()> {
    println!("Running loom models (max_preemptions = {max_preemptions})...");
    let start = Instant::now();

    // Loom substitutes its model-checked atomics behind `--cfg loom`; the
    // in-crate models live behind `cfg(all(test, loom))` and the
    // integration models in tests/loom.rs.
    for target in [&["--lib"][..], &["--test", "loom"][..]] {
        let status = Command::new("cargo")
            .arg("test")
            .arg("--release")
            .args(target)
            .env("RUSTFLAGS", "--cfg loom")
            .env("LOOM_MAX_PREEMPTIONS", max_preemptions.to_string())
            .status()?;
        if !status.success() {
            anyhow::bail!("loom run failed for target {target:?}");
        }
    }

    println!("Loom suite passed in {:.1?}", start.elapsed());
    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Running benchmarks...");

    let mut cmd = Command::new("cargo");
    cmd.arg("bench");
    if quick {
        cmd.args(["--", "--quick"]);
    }
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("benchmark run failed");
    }
    Ok(())
}
