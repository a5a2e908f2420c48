use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::thread;

use clap::Parser;
use grid_snake::config::GameConfig;
use grid_snake::direction_buffer::BufferPolicy;
use grid_snake::game::{GameEvent, Session};
use grid_snake::input::{GameInput, parse_script};
use log::{error, info};

/// Headless driver: feeds a command script to the engine and prints JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Tick rate used with --realtime.
    #[arg(long = "tick-hz")]
    tick_hz: Option<u32>,

    /// Same-tick command handling: drop-repeat or queue-one.
    #[arg(long)]
    policy: Option<BufferPolicy>,

    /// Apple PRNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Command script; reads stdin when omitted.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Sleep one tick interval before every tick.
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        error!("{err}");
        return Err(err);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(&cli)?;
    info!(
        "board {}x{}, {} Hz, {:?}",
        config.width, config.height, config.tick_hz, config.buffer_policy
    );

    let raw = match &cli.script {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw)?;
            raw
        }
    };
    let inputs = parse_script(&raw)?;

    let mut session = Session::new(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for input in inputs {
        if input == GameInput::Quit {
            break;
        }
        if cli.realtime && input == GameInput::Tick {
            thread::sleep(config.tick_interval());
        }
        if let Some(event) = session.handle_input(input)? {
            emit_event(&mut out, &event)?;
        }
    }

    serde_json::to_writer(&mut out, &session.snapshot())?;
    writeln!(out)?;
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, Box<dyn Error>> {
    let mut config = GameConfig::load(cli.config.as_deref())?;

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(tick_hz) = cli.tick_hz {
        config.tick_hz = tick_hz;
    }
    if let Some(policy) = cli.policy {
        config.buffer_policy = policy;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config.validate()?;
    Ok(config)
}

fn emit_event(out: &mut impl Write, event: &GameEvent) -> io::Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    writeln!(out)
}
