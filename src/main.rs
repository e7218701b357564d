use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::fs::File;
use std::io::{BufWriter, Stdout, Write, stdout};
use std::time::{Duration, Instant};

use termfireworks::config::{Cli, Config};
use termfireworks::random::chance;
use termfireworks::terminal::{HalfBlockPresenter, pointer_effect};
use termfireworks::{Result, SimulationSurface};

fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if cli.verbose > 0 {
        builder.filter_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    } else if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    }

    // stderr shares the alternate screen, so a file keeps the display clean
    if let Some(path) = &cli.log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn is_exit_key(event: &Event) -> bool {
    let Event::Key(key_event) = event else {
        return false;
    };
    key_event.code == KeyCode::Char('q')
        || key_event.code == KeyCode::Esc
        || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(event::KeyModifiers::CONTROL))
}

fn run_display(config: &Config, stdout: &mut BufWriter<Stdout>) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut presenter = HalfBlockPresenter::new(cols as usize, rows as usize, config.scale);
    let (width, height) = presenter.logical_size();
    let mut surface = SimulationSurface::new(width, height, config.background)?;

    let tick = config.tick.as_secs_f32();
    let mut last_frame = Instant::now();
    let mut last_launch = Instant::now();
    let mut accumulator = 0.0f32;

    loop {
        if event::poll(Duration::from_millis(1))? {
            let event = event::read()?;
            if is_exit_key(&event) {
                break;
            }
            if let Event::Resize(cols, rows) = event {
                presenter = HalfBlockPresenter::new(cols as usize, rows as usize, config.scale);
                let (width, height) = presenter.logical_size();
                // a zero-sized report keeps the previous surface
                if let Err(e) = surface.resize(width, height) {
                    log::warn!("{e}");
                }
                execute!(stdout, Clear(ClearType::All))?;
            } else if let Some((kind, column, row)) = pointer_effect(&event) {
                let at = presenter.cell_to_logical(column, row);
                surface.inject_particles(kind, at.x, at.y);
            }
        }

        if let Some(auto) = config.auto_spawn {
            if last_launch.elapsed() >= auto.interval {
                last_launch = Instant::now();
                if chance(auto.chance) {
                    surface.spawn_rocket();
                }
            }
        }

        let now = Instant::now();
        accumulator += now.duration_since(last_frame).as_secs_f32();
        last_frame = now;
        if accumulator > tick * 3.0 {
            accumulator = tick * 3.0;
        }

        let mut ticked = false;
        while accumulator >= tick {
            surface.tick();
            accumulator -= tick;
            ticked = true;
        }

        if ticked {
            presenter.present(surface.frame(), stdout)?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    init_logging(&cli)?;
    log::info!("starting with {config:?}");

    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout());

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All), EnableMouseCapture)?;

    let result = run_display(&config, &mut stdout);

    let restored = restore_terminal(&mut stdout);

    if let Err(e) = &result {
        log::error!("{e}");
    }
    result.and(restored)
}

/// Runs every restore step, then reports the first failure.
fn restore_terminal(stdout: &mut BufWriter<Stdout>) -> Result<()> {
    let screen = execute!(stdout, Show, LeaveAlternateScreen, DisableMouseCapture);
    let raw = terminal::disable_raw_mode();
    let flushed = stdout.flush();
    screen.and(raw).and(flushed)?;
    Ok(())
}
