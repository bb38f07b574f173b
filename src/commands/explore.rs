//! Interactive line-driven session.
//!
//! Renders the controller's current view as a numbered list and turns each
//! input line into one navigation event.

use crate::navigation::{Event, Mode, NavigationController, Notice, View};
use crate::Result;
use std::io::{BufRead, Write};

const HELP: &str = "[n] select  [b] back  [l] log a feeling  [x] stop logging  [q] quit";

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Select(usize),
    Back,
    Log,
    Exit,
    Quit,
    Help,
    Empty,
}

fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let line = line.trim();
    match line {
        "" => Ok(Command::Empty),
        "b" | "back" => Ok(Command::Back),
        "l" | "log" => Ok(Command::Log),
        "x" | "exit" => Ok(Command::Exit),
        "q" | "quit" => Ok(Command::Quit),
        "h" | "?" | "help" => Ok(Command::Help),
        _ => line
            .parse::<usize>()
            .map(Command::Select)
            .map_err(|_| format!("Unknown choice: {}", line)),
    }
}

/// Run an interactive session until `q` or end of input.
///
/// Returns the number of entries logged during the session.
pub fn explore(
    nav: &mut NavigationController,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<usize> {
    let mut logged = 0;
    render(&mut out, &nav.view())?;

    for line in input.lines() {
        let line = line?;
        let event = match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Empty) => None,
            Ok(Command::Help) => {
                writeln!(out, "{}", HELP)?;
                None
            }
            Ok(Command::Back) => Some(Event::BackRequested),
            Ok(Command::Log) => Some(Event::EnterLogging),
            Ok(Command::Exit) => Some(Event::ExitToBrowsing),
            Ok(Command::Select(n)) => match nav.current_frame().items.get(n.wrapping_sub(1)) {
                Some(emotion) => Some(Event::ItemSelected(emotion.clone())),
                None => {
                    writeln!(out, "No item {}", n)?;
                    None
                }
            },
            Err(msg) => {
                writeln!(out, "{}", msg)?;
                None
            }
        };

        let view = match event {
            Some(event) => {
                let transition = nav.dispatch(event);
                if matches!(transition.notice, Notice::Logged { .. }) {
                    logged += 1;
                }
                write_notice(&mut out, &transition.notice)?;
                transition.view
            }
            None => nav.view(),
        };
        render(&mut out, &view)?;
    }

    if nav.mode() == Mode::Logging {
        nav.dispatch(Event::ExitToBrowsing);
    }
    writeln!(out, "Goodbye.")?;
    out.flush()?;
    Ok(logged)
}

fn render(out: &mut impl Write, view: &View) -> Result<()> {
    writeln!(out)?;
    if view.mode == Mode::Logging {
        writeln!(out, "[{}]", view.window_title)?;
    }
    writeln!(out, "== {} ==", view.frame.title)?;
    if view.frame.items.is_empty() {
        writeln!(out, "  (nothing here)")?;
    }
    for (i, emotion) in view.frame.items.iter().enumerate() {
        writeln!(out, "  {:>2}) {}", i + 1, emotion.name)?;
    }
    write!(out, "{}{}\n> ", HELP, if view.back_enabled { "" } else { " (at top)" })?;
    out.flush()?;
    Ok(())
}

fn write_notice(out: &mut impl Write, notice: &Notice) -> Result<()> {
    match notice {
        Notice::None => {}
        Notice::LeafReached { emotion } => {
            writeln!(out, "Selected: {} (no further detail)", emotion.name)?
        }
        Notice::Logged { entry } => writeln!(out, "Logged: {}", entry.emotion_name)?,
        Notice::SaveFailed { emotion, error } => writeln!(
            out,
            "Failed to save journal entry for {}: {}",
            emotion.name, error
        )?,
        Notice::LoggingCancelled => writeln!(out, "Logging cancelled.")?,
    }
    Ok(())
}
