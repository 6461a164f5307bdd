//! Side Scroller entry point
//!
//! Sets up logging and the terminal, shows the title prompt and runs play
//! sessions until the player quits.

mod terminal;

use std::fs::File;

use side_scroller::platform::{Color, InputEvent, Key, SystemClock};
use side_scroller::sim::TileGrid;
use side_scroller::{GameOutcome, Settings, Tuning, play};

use terminal::TerminalSession;

const LOG_FILE: &str = "side-scroller.log";

/// The terminal owns the screen, so log lines go to a file
fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    match File::create(LOG_FILE) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("Could not create {}: {}", LOG_FILE, e),
    }
    builder.init();
}

enum TitleChoice {
    Play,
    Quit,
}

fn title_screen(term: &mut TerminalSession) -> std::io::Result<TitleChoice> {
    let surface = &mut term.surface;
    surface.clear_screen()?;
    let mid = surface.rows() / 2;
    surface.print_line(
        mid.saturating_sub(4),
        "S I D E   S C R O L L E R",
        Color::rgb(255, 220, 0),
    )?;
    surface.print_line(mid.saturating_sub(1), "ENTER  play", Color::rgb(255, 255, 255))?;
    surface.print_line(mid, "Q / ESC  quit", Color::rgb(255, 255, 255))?;
    surface.print_line(
        mid + 3,
        "A/D or arrows: move   Space/W/Up: jump   R: restart   Esc: menu",
        Color::rgb(200, 200, 200),
    )?;
    surface.flush()?;

    loop {
        match term.input.wait_key() {
            Some(InputEvent::KeyDown(Key::Enter | Key::Space)) => return Ok(TitleChoice::Play),
            Some(InputEvent::KeyDown(Key::Q | Key::Escape)) | Some(InputEvent::Quit) | None => {
                return Ok(TitleChoice::Quit);
            }
            Some(_) => {}
        }
    }
}

fn run(term: &mut TerminalSession, tuning: Tuning, settings: &Settings) -> std::io::Result<()> {
    let level = TileGrid::main_level();
    loop {
        if let TitleChoice::Quit = title_screen(term)? {
            return Ok(());
        }

        let mut clock = SystemClock::new();
        let outcome = play(
            &mut term.surface,
            &mut term.input,
            &mut clock,
            &level,
            tuning,
            settings,
        )?;
        if outcome == GameOutcome::Quit {
            return Ok(());
        }
    }
}

fn main() -> std::io::Result<()> {
    init_logging();
    log::info!("Side Scroller starting...");

    let settings = Settings::load();
    let tuning = Tuning::load();

    let mut term = TerminalSession::enter((settings.viewport_width, settings.viewport_height))?;
    let result = run(&mut term, tuning, &settings);
    drop(term);

    if let Err(e) = &result {
        log::error!("Exiting with error: {}", e);
    }
    log::info!("Goodbye");
    result
}
