use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for thicket")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc, then a short simulation
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Run the chunk window timing bench
    Bench,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Run a short seeded headless simulation as a smoke test
    Smoke {
        #[arg(short, long, default_value = "300")]
        frames: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            run_fmt()?;
            run_clippy()?;
            run_tests()?;
            run_doc()?;
            run_smoke(120)?;
        }
        Commands::Fmt => run_fmt()?,
        Commands::Clippy => run_clippy()?,
        Commands::Test => run_tests()?,
        Commands::Bench => run_bench()?,
        Commands::Doc => run_doc()?,
        Commands::Build => run_build()?,
        Commands::Smoke { frames } => run_smoke(frames)?,
    }

    Ok(())
}

/// Run `cargo` with `args`, failing with `what` if it exits non-zero.
fn cargo(args: &[&str], what: &str) -> Result<()> {
    println!("==> Running cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("{what} failed");
    }
    Ok(())
}

fn run_fmt() -> Result<()> {
    cargo(&["fmt", "--all", "--", "--check"], "cargo fmt check")
}

fn run_clippy() -> Result<()> {
    cargo(
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
        "cargo clippy",
    )
}

fn run_tests() -> Result<()> {
    cargo(&["test", "--workspace"], "cargo test")
}

fn run_bench() -> Result<()> {
    cargo(
        &[
            "bench",
            "-p",
            "thicket-stream",
            "--bench",
            "bench_chunk_window",
        ],
        "chunk window bench",
    )
}

fn run_doc() -> Result<()> {
    cargo(&["doc", "--workspace", "--no-deps"], "cargo doc")
}

fn run_build() -> Result<()> {
    cargo(&["build", "--workspace"], "cargo build")
}

fn run_smoke(frames: u64) -> Result<()> {
    let scratch = std::env::temp_dir().join("thicket-smoke-highscore.txt");
    let frames = frames.to_string();
    let scratch = scratch.to_string_lossy();
    cargo(
        &[
            "run",
            "-p",
            "thicket-cli",
            "--",
            "simulate",
            "--frames",
            &frames,
            "--seed",
            "1",
            "--highscore-file",
            &scratch,
        ],
        "headless simulation",
    )
}
