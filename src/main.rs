use std::io;
use std::path::PathBuf;

use clap::Parser;
use cursed_snake::config::Settings;
use cursed_snake::game::{GameState, TickOutcome};
use cursed_snake::input::InputHandler;
use cursed_snake::logging;
use cursed_snake::renderer::{self, Palette};
use cursed_snake::terminal_runtime::{install_panic_hook, TerminalSession};
use log::{debug, error, info};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed for food placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Grid width in cells, including the frame. Defaults to the terminal width.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells, including the frame. Defaults to the terminal height.
    #[arg(long)]
    height: Option<u16>,

    /// Where to write the log file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log debug detail.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let settings = resolve_settings(&cli);

    if let Err(error) = logging::init(&settings.log_path(), cli.verbose) {
        eprintln!("Logging disabled: {error}");
    }

    install_panic_hook();

    match run(&settings) {
        Ok(score) => {
            info!("session finished with score {score}");
            println!("Score: {score}");
            Ok(())
        }
        Err(error) => {
            error!("session aborted: {error}");
            Err(error)
        }
    }
}

fn resolve_settings(cli: &Cli) -> Settings {
    let mut settings = Settings::load().unwrap_or_else(|error| {
        eprintln!("Ignoring settings file: {error}");
        Settings::default()
    });

    if let Some(tick_ms) = cli.tick_ms {
        settings.tick_interval_ms = tick_ms;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    if cli.width.is_some() {
        settings.width = cli.width;
    }
    if cli.height.is_some() {
        settings.height = cli.height;
    }
    if cli.log_file.is_some() {
        settings.log_file = cli.log_file.clone();
    }

    settings
}

fn run(settings: &Settings) -> io::Result<u32> {
    let mut session = TerminalSession::enter()?;
    let screen = session.size()?;
    let width = settings.width.unwrap_or(screen.width);
    let height = settings.height.unwrap_or(screen.height);

    let mut state = GameState::new(width, height, settings.seed)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
    info!(
        "starting {width}x{height} game, seed {:?}, tick {:?}",
        settings.seed,
        settings.tick_interval()
    );

    let mut input = InputHandler::new();
    let mut palette = Palette::default();
    let mut rng = rand::thread_rng();
    let tick_interval = settings.tick_interval();

    loop {
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &state, palette))?;

        let frame_input = input.collect_frame(tick_interval)?;
        if frame_input.quit {
            break;
        }

        if let Some(direction) = frame_input.direction {
            state.set_direction(direction);
        }

        match state.tick() {
            TickOutcome::Continued if state.pending_growth() => {
                palette.food_eaten(&mut rng);
                debug!("food eaten at {:?}", state.snake().head());
            }
            TickOutcome::Ended(score) => info!("snake ran into itself, score {score}"),
            TickOutcome::Stalemate => info!("board full, score {}", state.score()),
            TickOutcome::Continued | TickOutcome::Unchanged => {}
        }
    }

    Ok(state.score())
}
