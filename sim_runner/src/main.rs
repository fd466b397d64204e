//! Headless Pong match runner
//!
//! Plays a seeded AI-vs-AI match at a fixed frame rate and prints the encoded
//! match report.

mod report;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use game_core::{ControllerSpec, Match, MatchConfig, Mode, Modifiers, Phase};
use proto::Report;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Two,
    Four,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Two => Mode::TwoPaddle,
            ModeArg::Four => Mode::FourPaddle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModifierArg {
    Speed,
    Angle,
    Spin,
    Arena,
    All,
}

#[derive(Parser)]
#[command(name = "sim_runner")]
#[command(about = "Run a headless seeded Pong match", long_about = None)]
struct Cli {
    /// Two or four paddles
    #[arg(long, value_enum, default_value = "two")]
    mode: ModeArg,

    /// AI difficulty for every side (easy, normal, hard)
    #[arg(long, default_value = "hard")]
    difficulty: String,

    /// Gameplay modifiers, comma separated
    #[arg(long, value_enum, value_delimiter = ',')]
    modifiers: Vec<ModifierArg>,

    /// RNG seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Give up after this many simulated seconds
    #[arg(long, default_value_t = 900.0)]
    max_seconds: f32,

    /// Encode a frame report every N frames (0 = never)
    #[arg(long, default_value_t = 0)]
    frame_every: u32,
}

fn modifiers(args: &[ModifierArg]) -> Modifiers {
    if args.contains(&ModifierArg::All) {
        return Modifiers::all();
    }
    Modifiers {
        speed_increase: args.contains(&ModifierArg::Speed),
        angular_bounce: args.contains(&ModifierArg::Angle),
        spin: args.contains(&ModifierArg::Spin),
        arena: args.contains(&ModifierArg::Arena),
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if !(cli.fps.is_finite() && cli.fps > 0.0) {
        bail!("--fps must be positive, got {}", cli.fps);
    }

    let mode = Mode::from(cli.mode);
    let controllers = mode
        .sides()
        .iter()
        .map(|side| (*side, ControllerSpec::ai(&cli.difficulty)))
        .collect();
    let setup = MatchConfig::new(mode, controllers)
        .with_modifiers(modifiers(&cli.modifiers))
        .with_seed(cli.seed);
    let mut game = Match::new(setup).context("invalid match setup")?;

    let dt = 1.0 / cli.fps;
    let max_frames = (cli.max_seconds * cli.fps).ceil() as u64;
    let mut frame_bytes = 0usize;
    let mut tick: u32 = 0;

    while game.phase() != Phase::End {
        if u64::from(tick) >= max_frames {
            bail!("match did not finish within {} simulated seconds", cli.max_seconds);
        }
        game.update(dt);
        tick += 1;

        if cli.frame_every > 0 && tick % cli.frame_every == 0 {
            let frame = Report::Frame(report::frame_report(tick, &game.snapshot()));
            let bytes = frame.to_bytes().context("encoding frame report")?;
            debug!(tick, len = bytes.len(), "frame report");
            frame_bytes += bytes.len();
        }
    }

    let result = game
        .take_result()
        .context("match ended without a result")?;
    let report = Report::Result(report::match_report(&result, cli.seed));
    let bytes = report.to_bytes().context("encoding match report")?;

    info!(
        frames = tick,
        winner = ?result.winner,
        scores = ?result.final_scores,
        frame_bytes,
        "match finished"
    );
    println!("{}", hex(&bytes));
    Ok(())
}
