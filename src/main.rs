//! Terminal Wordfall runner (default binary).
//!
//! `wordfall play` runs one package in the terminal at a fixed timestep;
//! `wordfall packages` prints mastery and lock state per package.

use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use wordfall::cli::{parse_args, Command, PackagesArgs, PlayArgs, USAGE};
use wordfall::core::{EngineConfig, ProgressBook, SimpleRng};
use wordfall::input::{handle_key_event, is_restart, should_quit};
use wordfall::term::{GameView, SessionStatus, TerminalRenderer, Viewport};
use wordfall::types::{Difficulty, Package, TICK_MS};
use wordfall::{progress_file, Deck, RoundSession};

fn main() -> Result<()> {
    // Logs go to stderr; keep them quiet unless RUST_LOG asks.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .try_init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args)? {
        Command::Help => println!("{}", USAGE),
        Command::Packages(args) => list_packages(&args)?,
        Command::Play(args) => play(&args)?,
    }
    Ok(())
}

fn load(deck: &std::path::Path, progress: &std::path::Path) -> Result<(Deck, ProgressBook)> {
    let deck = Deck::load(deck).with_context(|| format!("loading deck {}", deck.display()))?;
    let book = progress_file::load(progress)
        .with_context(|| format!("loading progress {}", progress.display()))?;
    Ok((deck, book))
}

fn list_packages(args: &PackagesArgs) -> Result<()> {
    let (deck, book) = load(&args.deck, &args.progress)?;
    let unlocked = deck.unlocked(&book);

    for (package, progress) in deck.ordered().into_iter().zip(deck.progress(&book)) {
        let state = if progress.is_complete() {
            "complete"
        } else if unlocked.contains(&package.id) {
            "unlocked"
        } else {
            "locked"
        };
        println!(
            "{:<12} {:<24} {:>3}/{:<3} {}",
            package.id, package.name, progress.words_with_full_stars, progress.total_words, state
        );
    }
    Ok(())
}

fn choose_package<'a>(
    deck: &'a Deck,
    book: &ProgressBook,
    requested: Option<&str>,
) -> Result<&'a Package> {
    let Some(id) = requested else {
        return deck
            .frontier(book)
            .ok_or_else(|| anyhow!("deck has no playable package"));
    };
    let package = deck
        .package(id)
        .ok_or_else(|| anyhow!("unknown package: {}", id))?;
    if !deck.unlocked(book).contains(id) {
        return Err(anyhow!("package {} is locked", id));
    }
    Ok(package)
}

fn play(args: &PlayArgs) -> Result<()> {
    let (deck, book) = load(&args.deck, &args.progress)?;
    let package = choose_package(&deck, &book, args.package.as_deref())?;

    let mut config = EngineConfig::from_env();
    if args.hard {
        config = config.with_difficulty(Difficulty::Hard);
    }
    let seed = args
        .seed
        .unwrap_or_else(|| SimpleRng::from_clock().next_u32());

    let mut session = RoundSession::new(config, package, book, seed)
        .context("invalid engine configuration")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut session);
    // Always try to restore terminal state.
    let _ = term.exit();

    progress_file::save(&args.progress, session.book())
        .with_context(|| format!("saving progress {}", args.progress.display()))?;
    result?;

    let summary = session.summary();
    println!(
        "{}: {} xp, {} correct, {} wrong",
        session.package_name(),
        summary.total_xp,
        summary.correct,
        summary.wrong
    );
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut RoundSession) -> Result<()> {
    let view = GameView::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let status = SessionStatus {
            package_name: session.package_name().to_string(),
            words_left: session.words_left() as u32,
            correct: session.correct(),
            wrong: session.wrong(),
        };
        let fb = view.render(&session.snapshot(), Some(&status), Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            let ev = event::read()?;
            if let Event::Resize(..) = ev {
                term.invalidate();
            }
            if let Event::Key(key) = ev {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if is_restart(key) {
                        session.restart();
                    } else if session.is_finished() {
                        return Ok(());
                    } else if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.advance(TICK_MS);
        }
    }
}
