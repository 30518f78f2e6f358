use std::{future::Future, io::Write};

use tabled::Table;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio_util::sync::CancellationToken;

use crate::{
    cli::connect::{self, LiveSession},
    config,
    error::WallError,
    error, info,
    management::{GridBounds, WallSession},
    success,
    types::Coordinate,
    utils, warning,
};

/// A single line typed at the wall prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WallCommand {
    Place { index: usize, target: Coordinate },
    Remove(Coordinate),
    Reset,
    Show,
    Albums,
    Grid { rows: u32, cols: u32 },
    Load(String),
    Help,
    Quit,
}

impl WallCommand {
    pub fn parse(line: &str) -> Result<Option<WallCommand>, String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((command, args)) = words.split_first() else {
            return Ok(None);
        };

        let parsed = match (command.to_lowercase().as_str(), args) {
            ("place" | "p", [index, cell @ ..]) => WallCommand::Place {
                index: index
                    .trim_start_matches('#')
                    .parse::<usize>()
                    .map_err(|e| format!("invalid album number '{}': {}", index, e))?,
                target: utils::parse_coordinate(cell)?,
            },
            ("remove" | "rm", cell) => WallCommand::Remove(utils::parse_coordinate(cell)?),
            ("reset", []) => WallCommand::Reset,
            ("show" | "ls", []) => WallCommand::Show,
            ("albums", []) => WallCommand::Albums,
            ("grid", [rows, cols]) => WallCommand::Grid {
                rows: rows
                    .parse::<u32>()
                    .map_err(|e| format!("invalid rows '{}': {}", rows, e))?,
                cols: cols
                    .parse::<u32>()
                    .map_err(|e| format!("invalid cols '{}': {}", cols, e))?,
            },
            ("load", [url]) => WallCommand::Load(url.to_string()),
            ("help" | "?", []) => WallCommand::Help,
            ("quit" | "exit" | "q", []) => WallCommand::Quit,
            (other, _) => return Err(format!("unknown or malformed command '{}'", other)),
        };

        Ok(Some(parsed))
    }
}

/// What the prompt got back while waiting for a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Line(String),
    Eof,
    Interrupted,
}

/// Waits for the next input line or for `interrupt`, whichever comes first.
///
/// `next_line` is cancel safe, so losing the race drops no buffered input.
pub async fn next_prompt<R, I>(lines: &mut Lines<R>, interrupt: I) -> std::io::Result<Prompt>
where
    R: AsyncBufRead + Unpin,
    I: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = interrupt => Ok(Prompt::Interrupted),
        line = lines.next_line() => Ok(line?.map(Prompt::Line).unwrap_or(Prompt::Eof)),
    }
}

// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

const HELP: &str = "\
place <n> <x> <y>   drop album #n on cell x-y (moves it if already placed)
remove <x> <y>      clear a cell
reset               clear the whole wall
show                print the wall
albums              list albums with their cells
grid <rows> <cols>  resize the wall (cells outside are cleared)
load <url>          import another playlist (clears the wall)
quit                leave";

/// Interactive wall editor.
///
/// Imports `playlist_url`, then reads commands from stdin until `quit`, EOF or
/// Ctrl-C. Once a load has listened for Ctrl-C the process no longer exits on
/// SIGINT by default, so the prompt listens for it too.
pub async fn wall(playlist_url: String, rows: Option<u32>, cols: Option<u32>) {
    let ingester = match connect::ingester() {
        Ok(i) => i,
        Err(e) => error!("{}", e),
    };

    let bounds = GridBounds::new(
        rows.map(|r| config::clamp_dimension(r, config::MAX_GRID_ROWS))
            .unwrap_or_else(config::grid_rows),
        cols.map(|c| config::clamp_dimension(c, config::MAX_GRID_COLS))
            .unwrap_or_else(config::grid_cols),
    );
    let mut session = WallSession::new(ingester, bounds);

    if let Err(e) = load(&mut session, &playlist_url).await {
        error!("{}", e);
    }
    show(&session);
    info!("Type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("wall> ");
        if let Err(e) = std::io::stdout().flush() {
            warning!("Cannot flush prompt: {}", e);
        }

        let line = match next_prompt(&mut lines, ctrl_c()).await {
            Ok(Prompt::Line(line)) => line,
            Ok(Prompt::Eof) => break,
            Ok(Prompt::Interrupted) => {
                println!();
                info!("Interrupted, leaving the wall");
                break;
            }
            Err(e) => error!("Cannot read input: {}", e),
        };

        let command = match WallCommand::parse(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(e) => {
                warning!("{}", e);
                continue;
            }
        };

        match command {
            WallCommand::Place { index, target } => match session.place_index(index, target) {
                Ok(Some(displaced)) => {
                    success!("Placed #{} on {}, {} is off the wall", index, target, displaced.name)
                }
                Ok(None) => success!("Placed #{} on {}", index, target),
                Err(e) => warning!("{}", e),
            },
            WallCommand::Remove(target) => match session.remove(target) {
                Some(album) => success!("Removed {} from {}", album.name, target),
                None => info!("Cell {} is already empty", target),
            },
            WallCommand::Reset => {
                session.reset();
                success!("Wall cleared");
            }
            WallCommand::Show => show(&session),
            WallCommand::Albums => {
                println!(
                    "{}",
                    Table::new(utils::album_rows(session.albums(), Some(session.store())))
                );
            }
            WallCommand::Grid { rows, cols } => {
                let bounds = GridBounds::new(
                    config::clamp_dimension(rows, config::MAX_GRID_ROWS),
                    config::clamp_dimension(cols, config::MAX_GRID_COLS),
                );
                for (cell, album) in session.resize(bounds) {
                    warning!("{} fell off the wall from {}", album.name, cell);
                }
                success!("Grid is now {} rows x {} cols", bounds.rows, bounds.cols);
            }
            WallCommand::Load(url) => match load(&mut session, &url).await {
                Ok(()) => show(&session),
                Err(e) => warning!("{}", e),
            },
            WallCommand::Help => println!("{}", HELP),
            WallCommand::Quit => break,
        }
    }
}

/// Loads a playlist; Ctrl-C while the request is in flight cancels it and
/// keeps the current wall.
async fn load(session: &mut LiveSession, playlist_url: &str) -> Result<(), WallError> {
    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let pb = utils::spinner("Fetching playlist...");
    let result = session
        .load_playlist_with_cancel(playlist_url, &cancel)
        .await
        .map(|albums| albums.len());
    pb.finish_and_clear();
    watcher.abort();

    let count = result?;
    if count == 0 {
        warning!("Playlist has no albums");
    } else {
        success!("Loaded {} unique albums, wall cleared", count);
    }
    Ok(())
}

fn show(session: &LiveSession) {
    let bounds = session.store().bounds();
    info!(
        "Wall {} rows x {} cols, {} placed",
        bounds.rows,
        bounds.cols,
        session.store().len()
    );
    println!("{}", utils::render_wall(session.albums(), session.store()));
    if !session.store().is_empty() {
        println!("{}", Table::new(utils::placement_rows(session.store())));
    }
}
