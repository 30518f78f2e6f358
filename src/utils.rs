use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    management::GridPlacementStore,
    types::{Album, AlbumTableRow, Coordinate, PlacementTableRow},
};

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Table rows for an album list. Without a store the "placed" column stays empty.
pub fn album_rows(albums: &[Album], store: Option<&GridPlacementStore>) -> Vec<AlbumTableRow> {
    albums
        .iter()
        .enumerate()
        .map(|(i, album)| AlbumTableRow {
            index: i + 1,
            name: album.name.clone(),
            artist: album.artist.clone(),
            placed: store
                .and_then(|s| s.position_of(&album.id))
                .map(|c| c.to_string())
                .unwrap_or_default(),
        })
        .collect()
}

pub fn placement_rows(store: &GridPlacementStore) -> Vec<PlacementTableRow> {
    store
        .placements()
        .map(|(coordinate, album)| PlacementTableRow {
            cell: coordinate.to_string(),
            album: album.name.clone(),
            artist: album.artist.clone(),
        })
        .collect()
}

/// Text sketch of the wall, one line per row, `·` for empty cells.
///
/// Occupied cells show the album's 1-based index in `albums`.
pub fn render_wall(albums: &[Album], store: &GridPlacementStore) -> String {
    let width = albums.len().max(1).to_string().len();

    store
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Some(album) => albums
                        .iter()
                        .position(|a| a.id == album.id)
                        .map(|i| format!("{:>width$}", i + 1, width = width))
                        .unwrap_or_else(|| format!("{:>width$}", "?", width = width)),
                    None => format!("{:>width$}", "·", width = width),
                })
                .collect::<Vec<String>>()
                .join(" ")
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// Parses `"x y"` or `"x-y"` style arguments into a coordinate.
pub fn parse_coordinate(args: &[&str]) -> Result<Coordinate, String> {
    match args {
        [key] => key.parse::<Coordinate>(),
        [x, y] => Ok(Coordinate::new(
            x.parse::<u32>().map_err(|e| format!("invalid x '{}': {}", x, e))?,
            y.parse::<u32>().map_err(|e| format!("invalid y '{}': {}", y, e))?,
        )),
        _ => Err("expected a cell as 'x y' or 'x-y'".to_string()),
    }
}
