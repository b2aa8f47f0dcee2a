use itertools::iproduct;
use std::fmt;

use crate::error::{FieldError, Result};
use crate::estimates::Estimates;
use crate::labels::{self, classify};

/// Button rows in the play area. The outer index of a label grid.
pub const COLUMNS: usize = 8;
/// Buttons per row. The inner index of a label grid.
pub const ROWS: usize = 7;

const INITIAL_PRIOR: f32 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Blue,
    Red,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Unrevealed,
    /// Revealed and claimed by a player.
    Marker(Player),
    /// Revealed, showing how many marker cells surround it.
    Numeric(u8),
    /// Revealed with nothing on it.
    Empty,
}

/// Corners of the inner ring clear more often than the rest of the board in practice.
pub fn prior(Position { x, y }: Position) -> f32 {
    match (x, y) {
        (1, 1) | (1, 5) | (6, 1) | (6, 5) => 0.02,
        (2, 2) | (2, 4) | (5, 2) | (5, 4) => 0.01,
        _ => INITIAL_PRIOR,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    position: Position,
    kind: CellKind,
    estimates: Estimates,
}

impl Cell {
    pub fn new(position: Position, kind: CellKind) -> Self {
        Self { position, kind, estimates: Estimates::new(prior(position)) }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn is_revealed(&self) -> bool {
        self.kind != CellKind::Unrevealed
    }

    pub fn owner(&self) -> Option<Player> {
        match self.kind {
            CellKind::Marker(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_marker(&self) -> bool {
        self.owner().is_some()
    }

    pub fn clue(&self) -> Option<u8> {
        match self.kind {
            CellKind::Numeric(n) => Some(n),
            _ => None,
        }
    }

    pub fn was_empty(&self) -> bool {
        self.kind == CellKind::Empty
    }

    pub fn estimates(&self) -> &Estimates {
        &self.estimates
    }

    pub(crate) fn estimates_mut(&mut self) -> &mut Estimates {
        &mut self.estimates
    }

    pub fn best_estimate(&self) -> f32 {
        self.estimates.best()
    }

    pub fn is_unselectable(&self) -> bool {
        self.estimates.is_unselectable()
    }

    pub fn is_certain(&self) -> bool {
        self.estimates.is_certain()
    }
}

/// The in-bounds positions around `position`, clockwise from above.
pub fn adjacents(Position { x, y }: Position) -> impl Iterator<Item=Position> {
    [(0, -1), (1, -1), (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1)]
        .into_iter()
        .filter_map(move |(dx, dy)| Some(Position::new(x.checked_add_signed(dx)?, y.checked_add_signed(dy)?)))
        .filter(|p| p.x < COLUMNS && p.y < ROWS)
}

/// The play area as last rendered. Rebuilt from scratch for every observed update.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    // column-major, so iteration order is the scan order
    cells: Vec<Cell>,
}

fn index_of(Position { x, y }: Position) -> Option<usize> {
    (x < COLUMNS && y < ROWS).then(|| x*ROWS + y)
}

impl Board {
    pub fn new() -> Self {
        let cells = iproduct!(0..COLUMNS, 0..ROWS)
            .map(|(x, y)| Cell::new(Position::new(x, y), CellKind::Unrevealed))
            .collect();
        Self { cells }
    }

    /// Classify every label of the play area. `labels[x][y]` becomes the cell at `(x, y)`.
    pub fn reconstruct<R, S>(labels: &[R]) -> Result<Self>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        if labels.len() != COLUMNS {
            return Err(FieldError::MalformedGrid(labels.len()));
        }
        let mut cells = Vec::with_capacity(COLUMNS*ROWS);
        for (x, row) in labels.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ROWS {
                return Err(FieldError::RaggedRow { row: x, len: row.len() });
            }
            for (y, label) in row.iter().enumerate() {
                cells.push(classify(label.as_ref(), Position::new(x, y))?);
            }
        }
        Ok(Self { cells })
    }

    /// Whether the explosion that ends a game is shown anywhere in `grid`.
    /// The explosion is not a cell the classifier knows, so this looks at the raw labels.
    pub fn has_end_game_marker<R, S>(grid: &[R]) -> bool
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        grid.iter().any(|row| row.as_ref().iter().any(|label| labels::is_explosion(label.as_ref())))
    }

    pub fn get(&self, position: Position) -> Option<&Cell> {
        index_of(position).map(|i| &self.cells[i])
    }

    pub(crate) fn get_mut(&mut self, position: Position) -> Option<&mut Cell> {
        index_of(position).map(move |i| &mut self.cells[i])
    }

    pub fn cells(&self) -> impl Iterator<Item=&Cell> {
        self.cells.iter()
    }

    pub fn unrevealed(&self) -> impl Iterator<Item=&Cell> {
        self.cells.iter().filter(|c| !c.is_revealed())
    }

    pub fn neighbours(&self, position: Position) -> Vec<&Cell> {
        adjacents(position).filter_map(|p| self.get(p)).collect()
    }

    pub fn marker_count(&self, player: Player) -> usize {
        self.cells.iter().filter(|c| c.owner() == Some(player)).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(ROWS) {
            let shown: Vec<_> = row.iter().map(|c| labels::label_of(c.kind())).collect();
            writeln!(f, "{}", shown.join("|"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::labels::{BLUE, EXPLOSION, RED, UNREVEALED};

    pub(crate) fn grid_with(overrides: &[((usize, usize), &'static str)]) -> Vec<Vec<&'static str>> {
        let mut grid = vec![vec![UNREVEALED; ROWS]; COLUMNS];
        for &((x, y), label) in overrides {
            grid[x][y] = label;
        }
        grid
    }

    #[test]
    fn priors() {
        let board = Board::new();
        assert_eq!(board.get(Position::new(1, 5)).unwrap().best_estimate(), 0.02);
        assert_eq!(board.get(Position::new(5, 2)).unwrap().best_estimate(), 0.01);
        assert_eq!(board.get(Position::new(0, 0)).unwrap().best_estimate(), 0.005);
        assert_eq!(board.get(Position::new(3, 3)).unwrap().best_estimate(), 0.005);
        assert!(board.cells().all(|c| c.estimates().len() == 1));
    }

    #[test]
    fn axes() {
        let board = Board::reconstruct(&grid_with(&[((7, 0), "3"), ((0, 6), BLUE)])).unwrap();
        assert_eq!(board.get(Position::new(7, 0)).unwrap().clue(), Some(3));
        assert_eq!(board.get(Position::new(0, 6)).unwrap().owner(), Some(Player::Blue));
        assert!(board.get(Position::new(8, 0)).is_none());
        assert!(board.get(Position::new(0, 7)).is_none());
    }

    #[test]
    fn variants() {
        let board = Board::reconstruct(&grid_with(&[((0, 0), " "), ((0, 1), RED), ((0, 2), "0")])).unwrap();
        let empty = board.get(Position::new(0, 0)).unwrap();
        assert!(empty.is_revealed() && empty.was_empty() && empty.clue().is_none() && empty.owner().is_none());
        let marker = board.get(Position::new(0, 1)).unwrap();
        assert!(marker.is_revealed() && !marker.was_empty() && marker.owner() == Some(Player::Red));
        let zero = board.get(Position::new(0, 2)).unwrap();
        assert_eq!(zero.clue(), Some(0));
        let hidden = board.get(Position::new(0, 3)).unwrap();
        assert!(!hidden.is_revealed() && !hidden.was_empty() && hidden.clue().is_none());
        assert_eq!(board.marker_count(Player::Red), 1);
        assert_eq!(board.marker_count(Player::Blue), 0);
    }

    #[test]
    fn reconstruct_is_idempotent() {
        let grid = grid_with(&[((3, 3), "2"), ((4, 4), BLUE), ((0, 0), " ")]);
        assert_eq!(Board::reconstruct(&grid).unwrap(), Board::reconstruct(&grid).unwrap());
    }

    #[test]
    fn shape() {
        let mut grid = grid_with(&[]);
        grid.truncate(6);
        assert_eq!(Board::reconstruct(&grid), Err(FieldError::MalformedGrid(6)));

        let mut grid = grid_with(&[]);
        grid[2].pop();
        assert_eq!(Board::reconstruct(&grid), Err(FieldError::RaggedRow { row: 2, len: 6 }));
    }

    #[test]
    fn unknown_label_aborts() {
        let grid = grid_with(&[((5, 5), "?")]);
        assert_eq!(Board::reconstruct(&grid), Err(FieldError::UnknownLabel("?".to_owned())));
    }

    #[test]
    fn neighbour_counts() {
        let board = Board::new();
        for corner in [(0, 0), (7, 0), (0, 6), (7, 6)] {
            assert_eq!(board.neighbours(Position::new(corner.0, corner.1)).len(), 3);
        }
        for edge in [(0, 3), (7, 3), (4, 0), (4, 6)] {
            assert_eq!(board.neighbours(Position::new(edge.0, edge.1)).len(), 5);
        }
        assert_eq!(board.neighbours(Position::new(3, 3)).len(), 8);
        assert!(board.neighbours(Position::new(3, 3)).iter().all(|c| c.position() != Position::new(3, 3)));
    }

    #[test]
    fn neighbour_order_is_stable() {
        let board = Board::new();
        let first: Vec<_> = board.neighbours(Position::new(2, 2)).iter().map(|c| c.position()).collect();
        let second: Vec<_> = board.neighbours(Position::new(2, 2)).iter().map(|c| c.position()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn end_game_marker() {
        assert!(!Board::has_end_game_marker(&grid_with(&[])));
        assert!(Board::has_end_game_marker(&grid_with(&[((6, 2), EXPLOSION)])));
    }

    #[test]
    fn display_round_trips() {
        let board = Board::reconstruct(&grid_with(&[((1, 1), "1"), ((2, 2), RED)])).unwrap();
        let text = board.to_string();
        let grid: Vec<Vec<&str>> = text.lines().map(|l| l.split('|').collect()).collect();
        assert_eq!(Board::reconstruct(&grid).unwrap(), board);
    }
}
