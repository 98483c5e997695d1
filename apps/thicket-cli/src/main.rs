mod autopilot;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use thicket_assets::AssetTable;
use thicket_input::FrameInput;
use thicket_kernel::{GameConfig, WorldState};
use thicket_persist::HighScoreStore;
use thicket_render::{DebugTextRenderer, DrawRecorder};
use thicket_tools::WorldInspector;
use tracing_subscriber::EnvFilter;

use crate::autopilot::Autopilot;

/// Longest frame step the real-time clock may report.
const MAX_FRAME_STEP: f32 = 0.1;

#[derive(Parser)]
#[command(name = "thicket-cli", about = "Headless runner for the thicket forest shooter")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the game loop with scripted input and a recording renderer
    Simulate(SimulateArgs),
    /// Inspect or clear the high-score file
    Highscore {
        /// High-score file
        #[arg(long, default_value = "highscore.txt")]
        file: PathBuf,

        #[command(subcommand)]
        action: HighscoreAction,
    },
}

#[derive(Args)]
struct SimulateArgs {
    /// Number of frames to run before quitting
    #[arg(short, long, default_value = "600")]
    frames: u64,
    /// Fixed seconds per frame
    #[arg(long, default_value = "0.016")]
    dt: f32,
    /// RNG seed; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,
    /// JSON game config
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// JSON model table; the stock forest table is used otherwise
    #[arg(long)]
    assets: Option<PathBuf>,
    /// Check that every model file exists under this directory
    #[arg(long)]
    asset_root: Option<PathBuf>,
    /// High-score file, loaded at start and saved on exit
    #[arg(long, default_value = "highscore.txt")]
    highscore_file: PathBuf,
    /// Pace frames at `dt` and measure the step from the monotonic clock
    #[arg(long)]
    realtime: bool,
    /// Print every submission of this frame as text
    #[arg(long)]
    dump_frame: Option<u64>,
    /// Log a world summary every N frames
    #[arg(long, default_value = "60")]
    report_every: u64,
}

#[derive(Subcommand)]
enum HighscoreAction {
    /// Print the stored high score
    Show,
    /// Reset the stored high score to zero
    Reset,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("thicket-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", thicket_common::crate_info());
            println!("input: {}", thicket_input::crate_info());
            println!("render: {}", thicket_render::crate_info());
            println!("stream: {}", thicket_stream::crate_info());
            println!("kernel: {}", thicket_kernel::crate_info());
            println!("persist: {}", thicket_persist::crate_info());
            println!("assets: {}", thicket_assets::crate_info());
            println!("tools: {}", thicket_tools::crate_info());
        }
        Commands::Simulate(args) => simulate(&args)?,
        Commands::Highscore { file, action } => {
            let store = HighScoreStore::new(&file);
            match action {
                HighscoreAction::Show => {
                    let score = store
                        .try_load()
                        .with_context(|| format!("reading {}", file.display()))?;
                    println!("High score: {score}");
                }
                HighscoreAction::Reset => {
                    store.reset()?;
                    println!("High score reset ({})", file.display());
                }
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> anyhow::Result<GameConfig> {
    let mut config = match path {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

fn load_assets(manifest: Option<&Path>, root: Option<&Path>) -> anyhow::Result<AssetTable> {
    let table = match manifest {
        Some(path) => AssetTable::load(path)
            .with_context(|| format!("loading model table {}", path.display()))?,
        None => AssetTable::forest(),
    };
    if let Some(root) = root {
        table.verify_files(root)?;
    }
    Ok(table)
}

/// Distance from the player to the closest enemy.
fn nearest_enemy_distance(world: &WorldState) -> Option<f32> {
    WorldInspector::nearest_enemy(world).map(|e| e.position.distance(world.camera().position()))
}

/// Chunk window extent followed by one line per live entity.
fn describe_contents(world: &WorldState) -> String {
    let mut out = String::new();
    let coords = WorldInspector::chunk_coords(world);
    match (coords.first(), coords.last()) {
        (Some(first), Some(last)) => {
            let _ = writeln!(
                out,
                "chunks: {} from ({}, {}) to ({}, {})",
                coords.len(),
                first.x,
                first.z,
                last.x,
                last.z
            );
        }
        _ => out.push_str("chunks: 0\n"),
    }
    for entity in WorldInspector::list_entities(world) {
        let _ = writeln!(out, "{entity}");
    }
    out
}

fn simulate(args: &SimulateArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref(), args.seed)?;
    let table = load_assets(args.assets.as_deref(), args.asset_root.as_deref())?;
    let store = HighScoreStore::new(&args.highscore_file);

    let mut world = WorldState::new(config, table.model_set()?)?.with_high_score(store.load());
    let mut pilot = Autopilot::new(args.frames);
    let mut recorder = DrawRecorder::new();

    let report_every = args.report_every.max(1);
    let mut kills = 0u64;
    let mut deaths = 0u64;
    let mut draws = 0usize;
    let started = Instant::now();
    let mut last_frame = started;

    println!(
        "Simulating {} frames (seed={:?}, dt={}{})",
        args.frames,
        world.config().seed,
        args.dt,
        if args.realtime { ", realtime" } else { "" }
    );

    loop {
        pilot.advance();
        let input = FrameInput::poll(&pilot);
        if input.quit {
            break;
        }

        let dt = if args.realtime {
            let target = last_frame + Duration::from_secs_f32(args.dt.max(0.0));
            if let Some(wait) = target.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
            let now = Instant::now();
            let dt = (now - last_frame).as_secs_f32().min(MAX_FRAME_STEP);
            last_frame = now;
            dt
        } else {
            args.dt
        };

        let outcome = world.update(&input, dt);
        kills += u64::from(outcome.enemies_destroyed);
        if outcome.player_died {
            deaths += 1;
        }

        recorder.clear();
        world.draw(&mut recorder);
        draws += recorder.draws().len();

        if args.dump_frame == Some(world.frame()) {
            let mut text = DebugTextRenderer::new();
            world.draw(&mut text);
            println!("--- frame {} ---\n{}", world.frame(), text.finish());
            print!("{}", describe_contents(&world));
        }

        if world.frame() % report_every == 0 {
            tracing::info!(
                draws = recorder.draws().len(),
                nearest_enemy = ?nearest_enemy_distance(&world),
                "{}",
                WorldInspector::summary(&world)
            );
        }
    }

    let saved = store
        .save(world.score(), world.high_score())
        .with_context(|| format!("saving {}", args.highscore_file.display()))?;

    let frames = world.frame();
    println!("{}", WorldInspector::summary(&world));
    println!(
        "Frames: {frames}, kills: {kills}, deaths: {deaths}, avg draws/frame: {:.1}",
        if frames > 0 { draws as f64 / frames as f64 } else { 0.0 }
    );
    println!("High score saved: {saved}");
    println!("Wall time: {:?}", started.elapsed());

    Ok(())
}
