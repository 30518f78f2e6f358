use std::collections::{BTreeMap, HashMap};

use crate::types::{Album, Coordinate};

/// Configured size of the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub rows: u32,
    pub cols: u32,
}

impl GridBounds {
    pub fn new(rows: u32, cols: u32) -> Self {
        GridBounds { rows, cols }
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.x < self.cols && coordinate.y < self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

/// Sparse `Coordinate -> Album` assignment with single occupancy per album.
///
/// A reverse index (`album id -> Coordinate`) is kept next to the cell map and
/// every mutation updates both inside one `&mut self` call, so no reader can
/// ever see an album on zero or two cells mid-move.
///
/// The store accepts any coordinate. Keeping gestures inside [`GridBounds`] is
/// up to the caller; only [`set_bounds`](Self::set_bounds) acts on them.
#[derive(Debug, Clone)]
pub struct GridPlacementStore {
    bounds: GridBounds,
    cells: BTreeMap<Coordinate, Album>,
    positions: HashMap<String, Coordinate>,
}

impl GridPlacementStore {
    pub fn new(bounds: GridBounds) -> Self {
        GridPlacementStore {
            bounds,
            cells: BTreeMap::new(),
            positions: HashMap::new(),
        }
    }

    /// Puts `album` on `target`.
    ///
    /// If the album already sits somewhere it leaves that cell first. Whatever
    /// was on `target` is overwritten and becomes unplaced; it is returned so the
    /// caller can report it.
    pub fn place(&mut self, album: Album, target: Coordinate) -> Option<Album> {
        if let Some(previous) = self.positions.remove(&album.id) {
            self.cells.remove(&previous);
        }

        self.positions.insert(album.id.clone(), target);
        let displaced = self.cells.insert(target, album)?;
        self.positions.remove(&displaced.id);
        Some(displaced)
    }

    /// Clears `target`. Returns the album that was there, if any.
    pub fn remove(&mut self, target: Coordinate) -> Option<Album> {
        let album = self.cells.remove(&target)?;
        self.positions.remove(&album.id);
        Some(album)
    }

    pub fn reset(&mut self) {
        self.cells.clear();
        self.positions.clear();
    }

    pub fn query(&self, target: Coordinate) -> Option<&Album> {
        self.cells.get(&target)
    }

    /// Cell currently holding the album with `album_id`.
    pub fn position_of(&self, album_id: &str) -> Option<Coordinate> {
        self.positions.get(album_id).copied()
    }

    /// All placements in row-major order.
    pub fn placements(&self) -> impl Iterator<Item = (&Coordinate, &Album)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn in_bounds(&self, coordinate: Coordinate) -> bool {
        self.bounds.contains(coordinate)
    }

    /// Resizes the grid. Placements outside the new bounds are evicted and
    /// returned in row-major order.
    pub fn set_bounds(&mut self, bounds: GridBounds) -> Vec<(Coordinate, Album)> {
        self.bounds = bounds;

        let outside: Vec<Coordinate> = self
            .cells
            .keys()
            .filter(|c| !bounds.contains(**c))
            .copied()
            .collect();

        outside
            .into_iter()
            .filter_map(|c| self.remove(c).map(|album| (c, album)))
            .collect()
    }

    /// `rows × cols` view of the wall, `None` for empty cells.
    pub fn rows(&self) -> Vec<Vec<Option<&Album>>> {
        (0..self.bounds.rows)
            .map(|y| {
                (0..self.bounds.cols)
                    .map(|x| self.query(Coordinate::new(x, y)))
                    .collect()
            })
            .collect()
    }
}
