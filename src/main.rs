mod app;
mod error;
mod helpers;
mod logging;
mod render;
mod style;
mod types;
mod words;

use crate::{
    app::App,
    helpers::{Args, parse_site_url},
    logging::{LoggingConfig, init_logging},
    words::WordSource,
};

use anyhow::Context;
use clap::Parser;
use ratatui::{
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    prelude::*,
};
use std::{
    io::{self, Stdout, Write},
    sync::Arc,
    time::{Duration, Instant},
};

const POLLING_RATE_MS: u64 = 16;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log_filter.clone(),
        log_file: Some(args.log_file.clone()),
    })
    .with_context(|| format!("failed to open log file {}", args.log_file.display()))?;

    let site_url = parse_site_url(&args.site_url)
        .with_context(|| format!("invalid site url {:?}", args.site_url))?;

    let words = Arc::new(WordSource::from_file(&args.words_file));
    let mut app = App::new(
        Arc::clone(&words),
        site_url,
        Duration::from_millis(args.fade_ms),
        args.initial_word(),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    enter_screen(&mut stdout, disable_raw_mode)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);
    app.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    log::info!("served {} words", words.served());
    println!("{}", app.share_url());

    Ok(())
}

/// Switches to the alternate screen, undoing raw mode if that fails.
fn enter_screen<W: Write>(
    out: &mut W,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    if let Err(err) = execute!(out, EnterAlternateScreen) {
        if let Err(restore_err) = restore() {
            log::error!("failed to leave raw mode: {restore_err}");
        }
        return Err(err);
    }

    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> anyhow::Result<()> {
    while !app.should_quit() {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|frame| app.draw_ui(frame, now))?;

        if event::poll(Duration::from_millis(POLLING_RATE_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key, Instant::now());
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn raw_mode_is_restored_when_screen_switch_fails() {
        let restored = Cell::new(false);
        let result = enter_screen(&mut BrokenPipe, || {
            restored.set(true);
            Ok(())
        });

        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn raw_mode_is_kept_when_screen_switch_succeeds() {
        let restored = Cell::new(false);
        let mut out = Vec::new();
        let result = enter_screen(&mut out, || {
            restored.set(true);
            Ok(())
        });

        assert!(result.is_ok());
        assert!(!restored.get());
        assert!(!out.is_empty());
    }
}
