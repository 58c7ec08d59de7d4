#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Sheepfold engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! presenters to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command
//! batches or derived reports.

use std::{fmt, ops::RangeInclusive};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Sheepfold.";

/// Smallest permitted board side length.
pub const MIN_BOARD_SIDE: u32 = 7;

/// Largest permitted board side length.
pub const MAX_BOARD_SIDE: u32 = 40;

/// Smallest permitted number of wolves.
pub const MIN_WOLVES: u32 = 1;

/// Largest permitted number of wolves.
pub const MAX_WOLVES: u32 = 3;

/// Row that every bear and wolf races toward.
pub const GOAL_ROW: u32 = 0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Opens a new round of play.
    BeginRound,
    /// Moves the bear toward the goal by the rolled number of rows.
    MoveBear {
        /// Result of the bear's die roll.
        roll: DieRoll,
    },
    /// Moves a wolf diagonally toward the goal for the rolled number of steps.
    MoveWolf {
        /// Identifier of the wolf taking its turn.
        wolf: WolfId,
        /// Result of the wolf's die roll.
        roll: DieRoll,
        /// Horizontal drift chosen for the whole turn.
        bias: Bias,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Announces that a new round has begun.
    RoundStarted {
        /// One-based index of the round.
        round: u32,
    },
    /// Reports the die roll that drives a piece's movement.
    DiceRolled {
        /// Piece that rolled the die.
        piece: PieceId,
        /// Value shown by the die.
        roll: DieRoll,
    },
    /// Reports that a piece was asked to move after it already reached the goal row.
    GoalAlreadyReached {
        /// Piece resting on the goal row.
        piece: PieceId,
    },
    /// Confirms that a piece moved between two tiles.
    PieceMoved {
        /// Piece that moved.
        piece: PieceId,
        /// Tile occupied before the move.
        from: Position,
        /// Tile occupied after the move.
        to: Position,
    },
    /// Reports that a wolf bounced off a board edge and reversed its drift.
    BiasFlipped {
        /// Wolf that bounced.
        wolf: WolfId,
        /// Drift applied after the bounce.
        bias: Bias,
    },
    /// Confirms that a sheep was captured and scored.
    SheepCaptured {
        /// Piece credited with the capture.
        piece: PieceId,
        /// Tile the sheep occupied.
        at: Position,
        /// Score of the capturing piece after the capture.
        score: u32,
        /// Point of the move where the capture happened.
        stage: CaptureStage,
    },
    /// Confirms that the shepherd was captured. Shepherd captures never score.
    ShepherdCaptured {
        /// Piece that captured the shepherd.
        piece: PieceId,
        /// Tile the shepherd occupied.
        at: Position,
        /// Point of the move where the capture happened.
        stage: CaptureStage,
    },
}

/// Point of a move at which a capture happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureStage {
    /// The capture happened on a tile passed over during the move.
    Path,
    /// The capture happened on the tile where the move ended.
    Landing,
}

/// Location of a single board tile expressed as row and column indices.
///
/// Row zero is the goal row; rows decrease as pieces advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: u32,
    column: u32,
}

impl Position {
    /// Creates a new board position.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Reports whether the position lies on the goal row.
    #[must_use]
    pub const fn is_goal(&self) -> bool {
        self.row == GOAL_ROW
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Validated board dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardDimensions {
    width: u32,
    height: u32,
}

impl BoardDimensions {
    /// Creates board dimensions, rejecting sides outside the permitted range.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigurationError> {
        if !(MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&width) {
            return Err(ConfigurationError::WidthOutOfRange { width });
        }
        if !(MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&height) {
            return Err(ConfigurationError::HeightOutOfRange { height });
        }
        Ok(Self { width, height })
    }

    /// Creates square board dimensions.
    pub fn square(side: u32) -> Result<Self, ConfigurationError> {
        Self::new(side, side)
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of tiles on the board.
    #[must_use]
    pub const fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Row on which the bear and wolves begin, farthest from the goal.
    #[must_use]
    pub const fn start_row(&self) -> u32 {
        self.height - 1
    }

    /// Reports whether the position lies within the board.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.row() < self.height && position.column() < self.width
    }
}

/// Inclusive range of sheep counts accepted for the provided board.
///
/// The lower bound is a fifth of the board area and the upper bound half of
/// it, both rounded down.
#[must_use]
pub fn sheep_bounds(dimensions: BoardDimensions) -> RangeInclusive<u32> {
    let area = dimensions.area();
    (area / 5)..=(area / 2)
}

/// Checks a sheep count against [`sheep_bounds`].
pub fn validate_sheep_count(
    dimensions: BoardDimensions,
    count: u32,
) -> Result<(), ConfigurationError> {
    let bounds = sheep_bounds(dimensions);
    if bounds.contains(&count) {
        Ok(())
    } else {
        Err(ConfigurationError::SheepCountOutOfRange {
            count,
            min: *bounds.start(),
            max: *bounds.end(),
        })
    }
}

/// Checks a wolf count against the permitted range.
pub fn validate_wolf_count(count: u32) -> Result<(), ConfigurationError> {
    if (MIN_WOLVES..=MAX_WOLVES).contains(&count) {
        Ok(())
    } else {
        Err(ConfigurationError::WolfCountOutOfRange { count })
    }
}

/// Fully validated parameters for a new game.
///
/// A value of this type can only be obtained through [`GameConfig::new`], so
/// holding one proves that every bound has been checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    dimensions: BoardDimensions,
    sheep_count: u32,
    wolf_count: u32,
}

impl GameConfig {
    /// Validates the provided parameters.
    ///
    /// Board size is checked first, then the wolf count, then the sheep count.
    pub fn new(
        width: u32,
        height: u32,
        sheep_count: u32,
        wolf_count: u32,
    ) -> Result<Self, ConfigurationError> {
        let dimensions = BoardDimensions::new(width, height)?;
        Self::with_dimensions(dimensions, sheep_count, wolf_count)
    }

    /// Validates piece counts against already validated dimensions.
    pub fn with_dimensions(
        dimensions: BoardDimensions,
        sheep_count: u32,
        wolf_count: u32,
    ) -> Result<Self, ConfigurationError> {
        validate_wolf_count(wolf_count)?;
        validate_sheep_count(dimensions, sheep_count)?;
        Ok(Self {
            dimensions,
            sheep_count,
            wolf_count,
        })
    }

    /// Board dimensions for the game.
    #[must_use]
    pub const fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    /// Number of sheep scattered during setup.
    #[must_use]
    pub const fn sheep_count(&self) -> u32 {
        self.sheep_count
    }

    /// Number of wolves joining the bear.
    #[must_use]
    pub const fn wolf_count(&self) -> u32 {
        self.wolf_count
    }
}

/// Reasons a game configuration may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ConfigurationError {
    /// The board width lies outside the permitted side lengths.
    #[error("board size must be between 7x7 and 40x40 (width was {width})")]
    WidthOutOfRange {
        /// Width that failed validation.
        width: u32,
    },
    /// The board height lies outside the permitted side lengths.
    #[error("board size must be between 7x7 and 40x40 (height was {height})")]
    HeightOutOfRange {
        /// Height that failed validation.
        height: u32,
    },
    /// The wolf count lies outside the permitted range.
    #[error("the number of wolves must be between 1 and 3 (received {count})")]
    WolfCountOutOfRange {
        /// Wolf count that failed validation.
        count: u32,
    },
    /// The sheep count lies outside the range derived from the board area.
    #[error("the number of sheep must be between {min} and {max} (received {count})")]
    SheepCountOutOfRange {
        /// Sheep count that failed validation.
        count: u32,
        /// Smallest accepted sheep count for the board.
        min: u32,
        /// Largest accepted sheep count for the board.
        max: u32,
    },
}

/// Unique identifier assigned to a wolf, in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WolfId(u8);

impl WolfId {
    /// Creates a wolf identifier from its zero-based registration index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Zero-based registration index of the wolf.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Registration index usable for slice access.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Identifies one of the scoring pieces on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceId {
    /// The single bear.
    Bear,
    /// One of the wolves.
    Wolf(WolfId),
}

impl PieceId {
    /// Board symbol used for the piece.
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Bear => 'B',
            Self::Wolf(_) => 'W',
        }
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bear => write!(f, "Bear"),
            Self::Wolf(wolf) => write!(f, "Wolf{}", u32::from(wolf.get()) + 1),
        }
    }
}

/// Value shown by a six-sided die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DieRoll(u8);

impl DieRoll {
    /// Number of faces on the die.
    pub const FACES: u8 = 6;

    /// Creates a roll, returning `None` for values that no face shows.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= Self::FACES {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Creates a roll, clamping the value onto the die's faces.
    #[must_use]
    pub fn clamped(value: u8) -> Self {
        Self(value.clamp(1, Self::FACES))
    }

    /// Value shown by the die.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for DieRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Horizontal drift applied to a wolf for the duration of its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bias {
    /// Drift toward decreasing column indices.
    Left,
    /// Drift toward increasing column indices.
    Right,
}

impl Bias {
    /// Returns the opposite drift.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Signed column offset applied by a single step.
    #[must_use]
    pub const fn offset(self) -> i64 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Explicit placement of every piece, used to assemble a world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Tile occupied by the bear.
    pub bear: Position,
    /// Tiles occupied by the wolves, in registration order.
    pub wolves: Vec<Position>,
    /// Tiles occupied by sheep, in placement order.
    pub sheep: Vec<Position>,
    /// Tile occupied by the shepherd, if present.
    pub shepherd: Option<Position>,
}

/// Immutable representation of a scoring piece used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    /// Identifier of the piece.
    pub id: PieceId,
    /// Tile currently occupied by the piece.
    pub position: Position,
    /// Points accumulated by the piece.
    pub score: u32,
}

/// Contents of a single tile captured for presentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellContents {
    /// Indicates whether the bear stands on the tile.
    pub bear: bool,
    /// Number of wolves standing on the tile.
    pub wolves: u8,
    /// Indicates whether a sheep grazes on the tile.
    pub sheep: bool,
    /// Indicates whether the shepherd stands on the tile.
    pub shepherd: bool,
}

impl CellContents {
    /// Reports whether a bear or wolf stands on the tile.
    #[must_use]
    pub const fn has_big_piece(&self) -> bool {
        self.bear || self.wolves > 0
    }

    /// Reports whether nothing occupies the tile.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.has_big_piece() && !self.sheep && !self.shepherd
    }
}

/// Read-only snapshot of every tile on the board, in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    dimensions: BoardDimensions,
    cells: Vec<CellContents>,
}

impl BoardView {
    /// Captures a new board view from row-major cell contents.
    ///
    /// Missing trailing cells are treated as empty and surplus cells are
    /// discarded so the view always matches the dimensions.
    #[must_use]
    pub fn new(dimensions: BoardDimensions, mut cells: Vec<CellContents>) -> Self {
        let area = usize::try_from(dimensions.area()).unwrap_or(0);
        cells.resize(area, CellContents::default());
        Self { dimensions, cells }
    }

    /// Dimensions of the captured board.
    #[must_use]
    pub const fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    /// Returns the contents of the provided tile, if it lies on the board.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<&CellContents> {
        if !self.dimensions.contains(position) {
            return None;
        }
        let width = usize::try_from(self.dimensions.width()).ok()?;
        let row = usize::try_from(position.row()).ok()?;
        let column = usize::try_from(position.column()).ok()?;
        self.cells.get(row * width + column)
    }

    /// Iterator over board rows, starting from the goal row.
    pub fn rows(&self) -> impl Iterator<Item = &[CellContents]> {
        let width = usize::try_from(self.dimensions.width()).unwrap_or(1).max(1);
        self.cells.chunks(width)
    }
}

/// Final score of a single piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Standing {
    /// Piece that earned the score.
    pub piece: PieceId,
    /// Number of sheep the piece captured.
    pub score: u32,
}

impl From<PieceSnapshot> for Standing {
    fn from(snapshot: PieceSnapshot) -> Self {
        Self {
            piece: snapshot.id,
            score: snapshot.score,
        }
    }
}

/// Result of adjudicating the final scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A single piece holds the winning score.
    Winner(Standing),
    /// No single winner could be declared.
    Tie,
}

/// End-of-game summary listing every score and the outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    /// Final standings with the bear first, followed by wolves in registration order.
    pub standings: Vec<Standing>,
    /// Winner or tie declaration.
    pub outcome: Outcome,
}
