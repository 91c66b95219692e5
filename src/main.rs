//! Pixel Pong runner (default binary).
//!
//! Opens the emulated LED matrix on the terminal, starts one input listener
//! per paddle and hands everything to the simulation loop on the main
//! thread. Quit with `q`, `Esc` or `Ctrl-C`.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pixel_pong::core::{GameState, Tuning};
use pixel_pong::engine::{board_for_display, SimulationLoop};
use pixel_pong::input::{
    CancelToken, ChannelSource, InputChannel, KeyboardRouter, ListenerConfig, SourceSpec,
    DEFAULT_KEY_RELEASE_TIMEOUT,
};
use pixel_pong::term::{DisplaySink, Splash, TerminalDisplay};
use pixel_pong::types::{GameConfig, Side};

#[derive(Parser, Debug)]
#[command(name = "pixel-pong", about = "Two-player pong on a tiny pixel matrix")]
struct Cli {
    /// Left paddle input: keys, none, or evdev:<path>
    #[arg(long, default_value = "keys")]
    left: SourceSpec,

    /// Right paddle input: keys, none, or evdev:<path>
    #[arg(long, default_value = "keys")]
    right: SourceSpec,

    /// Simulation ticks per second
    #[arg(long)]
    fps: Option<f64>,

    /// Paddle length in pixels
    #[arg(long)]
    paddle_size: Option<usize>,

    /// Board size in pixels (defaults to the shortest display side)
    #[arg(long)]
    board_size: Option<usize>,

    /// Ticks between ball moves
    #[arg(long)]
    speed_divisor: Option<u32>,

    /// Absolute axis code read from evdev devices
    #[arg(long)]
    axis_code: Option<u16>,

    /// Display brightness between 0.0 and 1.0
    #[arg(long)]
    brightness: Option<f32>,

    /// RNG seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn apply(&self, mut config: GameConfig) -> GameConfig {
        if let Some(v) = self.fps {
            config.frames_per_second = v;
        }
        if let Some(v) = self.paddle_size {
            config.paddle_size = v;
        }
        if self.board_size.is_some() {
            config.board_size = self.board_size;
        }
        if let Some(v) = self.speed_divisor {
            config.ball_speed_divisor = v;
        }
        if let Some(v) = self.axis_code {
            config.axis_code = v;
        }
        if let Some(v) = self.brightness {
            config.brightness = v;
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config = cli.apply(GameConfig::from_env());
    let mut display = TerminalDisplay::open(config.display_width, config.display_height)
        .context("cannot open display")?;

    let board = match board_for_display(&config, &display) {
        Ok(board) => board,
        Err(e) => {
            // Always try to restore terminal state.
            let _ = display.close();
            return Err(e).context("invalid configuration");
        }
    };
    info!(?config, board, left = %cli.left, right = %cli.right, "starting");
    display.set_brightness(config.brightness);

    let cancel = CancelToken::new();
    let (router, left_keys, right_keys) =
        match KeyboardRouter::spawn(cancel.clone(), config.axis_code, DEFAULT_KEY_RELEASE_TIMEOUT) {
            Ok(parts) => parts,
            Err(e) => {
                // Always try to restore terminal state.
                let _ = display.close();
                return Err(e).context("cannot start keyboard router");
            }
        };

    let listener = ListenerConfig::from_config(&config);
    let left = open_channel(Side::Left, &cli.left, left_keys, listener, &cancel);
    let right = open_channel(Side::Right, &cli.right, right_keys, listener, &cancel);

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, "game seeded");
    let game = GameState::seeded(Tuning::from_config(&config, board), seed);

    let mut sim = SimulationLoop::new(
        game,
        left.state(),
        right.state(),
        display,
        config.frame_interval(),
        cancel.clone(),
    )
    .with_splash(Splash::default().with_hold(config.splash_hold));

    let result = sim.run();

    // Always try to restore terminal state.
    let mut display = sim.into_display();
    let _ = display.close();

    cancel.cancel();
    for channel in [left, right] {
        let side = channel.side();
        if !channel.join() {
            warn!(side = side.as_str(), "input listener panicked");
        }
    }
    if !router.join() {
        warn!("keyboard router panicked");
    }

    info!("shutdown complete");
    result
}

fn open_channel(
    side: Side,
    spec: &SourceSpec,
    keys: ChannelSource,
    listener: ListenerConfig,
    cancel: &CancelToken,
) -> InputChannel {
    match spec {
        SourceSpec::Keys => InputChannel::spawn(side, listener, cancel.clone(), move || Ok(keys)),
        SourceSpec::None => InputChannel::disabled(side),
        SourceSpec::Evdev(path) => open_evdev(side, path.clone(), listener, cancel),
    }
}

#[cfg(target_os = "linux")]
fn open_evdev(
    side: Side,
    path: std::path::PathBuf,
    listener: ListenerConfig,
    cancel: &CancelToken,
) -> InputChannel {
    use pixel_pong::input::evdev::EvdevSource;
    InputChannel::spawn(side, listener, cancel.clone(), move || EvdevSource::open(&path))
}

#[cfg(not(target_os = "linux"))]
fn open_evdev(
    side: Side,
    path: std::path::PathBuf,
    listener: ListenerConfig,
    cancel: &CancelToken,
) -> InputChannel {
    use pixel_pong::input::InputError;
    InputChannel::spawn::<ChannelSource, _>(side, listener, cancel.clone(), move || {
        Err(InputError::SourceUnavailable {
            path: path.display().to_string(),
            source: std::io::Error::from(std::io::ErrorKind::Unsupported),
        })
    })
}

/// Logs go to `PONG_LOG_PATH` when set; stdout belongs to the display.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("PONG_LOG_PATH") else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.to_string_lossy()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
