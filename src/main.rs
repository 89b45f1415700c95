use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

use tui_snake::driver::{Driver, FrameTimer};
use tui_snake::game::{GameConfig, GameSession};
use tui_snake::input::TerminalInput;
use tui_snake::logging;
use tui_snake::render::TerminalPresenter;

#[derive(Parser)]
#[command(name = "tui_snake")]
#[command(version, about = "Snake in the terminal, with a persistent high score")]
struct Cli {
    /// File that receives diagnostic log records
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    /// Most verbose level written to the log file
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = logging::init_logger(&cli.log_file, cli.log_level) {
        eprintln!("Logging disabled: {:#}", err);
    }

    // Grid size and speeds are fixed game constants.
    let session = GameSession::new(GameConfig::default());

    let presenter = TerminalPresenter::enter()?;
    let mut driver = Driver::new(session, TerminalInput::new(), presenter, FrameTimer::new());

    let result = driver.run();

    let (_, _, mut presenter, _) = driver.into_parts();
    // Always try to restore terminal state.
    let restored = presenter.exit();
    log::logger().flush();

    result.and(restored)
}
