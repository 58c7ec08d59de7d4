//! Dense tile grid tracking which pieces occupy every cell.

use arrayvec::ArrayVec;
use sheepfold_core::{BoardDimensions, BoardView, CellContents, PieceId, Position, MAX_WOLVES};

/// One bear plus the largest permitted pack of wolves.
const MAX_BIG_PIECES: usize = 1 + MAX_WOLVES as usize;

/// Handle identifying a live sheep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct SheepId(u32);

impl SheepId {
    pub(crate) const fn new(value: u32) -> Self {
        Self(value)
    }
}

/// Anything that can stand on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Occupant {
    Piece(PieceId),
    Sheep(SheepId),
    Shepherd,
}

/// Tagged occupant slots for a single tile.
#[derive(Clone, Debug, Default)]
pub(crate) struct Cell {
    pieces: ArrayVec<PieceId, MAX_BIG_PIECES>,
    sheep: Option<SheepId>,
    shepherd: bool,
}

impl Cell {
    pub(crate) fn pieces(&self) -> &[PieceId] {
        &self.pieces
    }

    pub(crate) const fn sheep(&self) -> Option<SheepId> {
        self.sheep
    }

    pub(crate) const fn has_shepherd(&self) -> bool {
        self.shepherd
    }

    pub(crate) fn is_occupied(&self) -> bool {
        !self.pieces.is_empty() || self.sheep.is_some() || self.shepherd
    }

    fn contents(&self) -> CellContents {
        let wolves = self
            .pieces
            .iter()
            .filter(|piece| matches!(piece, PieceId::Wolf(_)))
            .count();
        CellContents {
            bear: self.pieces.contains(&PieceId::Bear),
            wolves: u8::try_from(wolves).unwrap_or(u8::MAX),
            sheep: self.sheep.is_some(),
            shepherd: self.shepherd,
        }
    }
}

/// Row-major grid of tiles with fixed dimensions.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    dimensions: BoardDimensions,
    cells: Vec<Cell>,
}

impl Grid {
    pub(crate) fn new(dimensions: BoardDimensions) -> Self {
        let capacity = usize::try_from(dimensions.area()).unwrap_or(0);
        Self {
            dimensions,
            cells: vec![Cell::default(); capacity],
        }
    }

    pub(crate) const fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    /// Returns the tile at the provided position.
    ///
    /// # Panics
    ///
    /// Panics when the position lies outside the board.
    pub(crate) fn cell(&self, position: Position) -> &Cell {
        let index = self.index(position);
        &self.cells[index]
    }

    pub(crate) fn is_occupied(&self, position: Position) -> bool {
        self.cell(position).is_occupied()
    }

    pub(crate) fn place(&mut self, occupant: Occupant, position: Position) {
        let index = self.index(position);
        let cell = &mut self.cells[index];
        match occupant {
            Occupant::Piece(piece) => {
                if !cell.pieces.contains(&piece) {
                    cell.pieces.push(piece);
                }
            }
            Occupant::Sheep(sheep) => {
                debug_assert!(cell.sheep.is_none(), "two sheep placed on {position}");
                cell.sheep = Some(sheep);
            }
            Occupant::Shepherd => cell.shepherd = true,
        }
    }

    /// Clears the occupant from the tile, reporting whether it was present.
    pub(crate) fn remove(&mut self, occupant: Occupant, position: Position) -> bool {
        let index = self.index(position);
        let cell = &mut self.cells[index];
        match occupant {
            Occupant::Piece(piece) => {
                let before = cell.pieces.len();
                cell.pieces.retain(|present| *present != piece);
                cell.pieces.len() != before
            }
            Occupant::Sheep(sheep) => {
                if cell.sheep == Some(sheep) {
                    cell.sheep = None;
                    true
                } else {
                    false
                }
            }
            Occupant::Shepherd => std::mem::replace(&mut cell.shepherd, false),
        }
    }

    /// Iterator over every tile paired with its position, in row-major order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        let width = self.dimensions.width();
        self.cells.iter().zip(0u32..).map(move |(cell, index)| {
            (Position::new(index / width, index % width), cell)
        })
    }

    pub(crate) fn view(&self) -> BoardView {
        BoardView::new(
            self.dimensions,
            self.cells.iter().map(Cell::contents).collect(),
        )
    }

    fn index(&self, position: Position) -> usize {
        assert!(
            self.dimensions.contains(position),
            "position {position} lies outside the {}x{} board",
            self.dimensions.width(),
            self.dimensions.height()
        );
        let width = self.dimensions.width() as usize;
        position.row() as usize * width + position.column() as usize
    }
}
