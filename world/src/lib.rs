#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Sheepfold.
//!
//! The world owns the grid together with every piece on it and resolves the
//! turn engine's movement commands. All mutation flows through [`apply`];
//! read access goes through the [`query`] module.

mod grid;
mod setup;

use std::collections::HashSet;

use rand::Rng;
use sheepfold_core::{
    BoardDimensions, Bias, CaptureStage, Command, DieRoll, Event, GameConfig, Layout, PieceId,
    PieceSnapshot, Position, WolfId, MAX_WOLVES, MIN_WOLVES,
};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::grid::{Grid, Occupant, SheepId};

/// Represents the authoritative Sheepfold world state.
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    bear: Piece,
    wolves: Vec<Piece>,
    sheep: Vec<Sheep>,
    shepherd: Option<Position>,
    initial_sheep: u32,
    round: u32,
}

impl World {
    /// Creates a new world by scattering the configured pieces at random.
    ///
    /// The generator is consumed in placement order, so a seeded generator
    /// reproduces the same board.
    #[must_use]
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let layout = setup::scatter(config, rng);
        Self::assemble(config.dimensions(), &layout)
    }

    /// Creates a world from an explicit placement of every piece.
    ///
    /// Piece counts are not checked against the sheep bounds, which allows
    /// hand-built scenarios. Every piece must sit on its own tile within the
    /// board, and the layout must list one to three wolves.
    pub fn from_layout(dimensions: BoardDimensions, layout: Layout) -> Result<Self, LayoutError> {
        validate_layout(dimensions, &layout)?;
        Ok(Self::assemble(dimensions, &layout))
    }

    fn assemble(dimensions: BoardDimensions, layout: &Layout) -> Self {
        let mut grid = Grid::new(dimensions);

        let bear = Piece::new(PieceId::Bear, layout.bear);
        grid.place(Occupant::Piece(bear.id), bear.position);

        let wolves: Vec<Piece> = layout
            .wolves
            .iter()
            .zip(0u8..)
            .map(|(position, index)| Piece::new(PieceId::Wolf(WolfId::new(index)), *position))
            .collect();
        for wolf in &wolves {
            grid.place(Occupant::Piece(wolf.id), wolf.position);
        }

        let sheep: Vec<Sheep> = layout
            .sheep
            .iter()
            .zip(0u32..)
            .map(|(position, index)| Sheep {
                id: SheepId::new(index),
                position: *position,
            })
            .collect();
        for lamb in &sheep {
            grid.place(Occupant::Sheep(lamb.id), lamb.position);
        }

        if let Some(shepherd) = layout.shepherd {
            grid.place(Occupant::Shepherd, shepherd);
        }

        let initial_sheep = u32::try_from(sheep.len()).unwrap_or(u32::MAX);
        Self {
            grid,
            bear,
            wolves,
            sheep,
            shepherd: layout.shepherd,
            initial_sheep,
            round: 0,
        }
    }

    fn piece(&self, id: PieceId) -> Option<&Piece> {
        match id {
            PieceId::Bear => Some(&self.bear),
            PieceId::Wolf(wolf) => self.wolves.get(wolf.index()),
        }
    }

    fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        match id {
            PieceId::Bear => Some(&mut self.bear),
            PieceId::Wolf(wolf) => self.wolves.get_mut(wolf.index()),
        }
    }

    fn move_bear(&mut self, roll: DieRoll, out_events: &mut Vec<Event>) {
        let start = self.bear.position;
        if start.is_goal() {
            out_events.push(Event::GoalAlreadyReached {
                piece: PieceId::Bear,
            });
            return;
        }

        let distance = u32::from(roll.get());
        for offset in 0..distance {
            let Some(row) = start.row().checked_sub(offset) else {
                break;
            };
            self.bear_captures(Position::new(row, start.column()), CaptureStage::Path, out_events);
        }

        let landing = Position::new(start.row().saturating_sub(distance), start.column());
        self.relocate(PieceId::Bear, start, landing, out_events);
        self.bear_captures(landing, CaptureStage::Landing, out_events);
    }

    fn bear_captures(&mut self, tile: Position, stage: CaptureStage, out_events: &mut Vec<Event>) {
        self.capture_sheep(PieceId::Bear, tile, stage, out_events);

        if self.grid.cell(tile).has_shepherd() {
            let removed = self.grid.remove(Occupant::Shepherd, tile);
            debug_assert!(removed, "shepherd missing from {tile}");
            self.shepherd = None;
            debug!(at = %tile, ?stage, "bear captured the shepherd");
            out_events.push(Event::ShepherdCaptured {
                piece: PieceId::Bear,
                at: tile,
                stage,
            });
        }
    }

    fn move_wolf(&mut self, wolf: WolfId, roll: DieRoll, bias: Bias, out_events: &mut Vec<Event>) {
        let piece = PieceId::Wolf(wolf);
        let Some(start) = self.piece(piece).map(|wolf| wolf.position) else {
            warn!(%piece, "ignoring movement for unknown wolf");
            return;
        };
        if start.is_goal() {
            out_events.push(Event::GoalAlreadyReached { piece });
            return;
        }

        let width = self.grid.dimensions().width();
        let mut bias = bias;
        let mut position = start;
        let steps = roll.get();
        for step in 1..=steps {
            let (column, heading) = drift(position.column(), width, bias);
            if heading != bias {
                bias = heading;
                out_events.push(Event::BiasFlipped { wolf, bias });
            }
            let next = Position::new(position.row().saturating_sub(1), column);
            trace!(%piece, from = %position, to = %next, "wolf step");

            let stage = if step == steps || next.is_goal() {
                CaptureStage::Landing
            } else {
                CaptureStage::Path
            };
            self.capture_sheep(piece, next, stage, out_events);
            self.relocate(piece, position, next, out_events);
            position = next;

            if position.is_goal() {
                break;
            }
        }
    }

    fn capture_sheep(
        &mut self,
        piece: PieceId,
        tile: Position,
        stage: CaptureStage,
        out_events: &mut Vec<Event>,
    ) {
        let Some(sheep) = self.grid.cell(tile).sheep() else {
            return;
        };
        let removed = self.grid.remove(Occupant::Sheep(sheep), tile);
        debug_assert!(removed, "sheep missing from {tile}");
        if let Some(index) = self.sheep.iter().position(|lamb| lamb.id == sheep) {
            let _ = self.sheep.remove(index);
        }

        let Some(capturer) = self.piece_mut(piece) else {
            return;
        };
        capturer.score = capturer.score.saturating_add(1);
        let score = capturer.score;
        debug!(%piece, at = %tile, score, ?stage, "sheep captured");
        out_events.push(Event::SheepCaptured {
            piece,
            at: tile,
            score,
            stage,
        });
    }

    fn relocate(&mut self, piece: PieceId, from: Position, to: Position, out_events: &mut Vec<Event>) {
        let removed = self.grid.remove(Occupant::Piece(piece), from);
        debug_assert!(removed, "{piece} missing from {from}");
        self.grid.place(Occupant::Piece(piece), to);
        if let Some(moved) = self.piece_mut(piece) {
            moved.position = to;
        }
        out_events.push(Event::PieceMoved { piece, from, to });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::BeginRound => {
            world.round = world.round.saturating_add(1);
            info!(round = world.round, "round started");
            out_events.push(Event::RoundStarted { round: world.round });
        }
        Command::MoveBear { roll } => {
            out_events.push(Event::DiceRolled {
                piece: PieceId::Bear,
                roll,
            });
            world.move_bear(roll, out_events);
        }
        Command::MoveWolf { wolf, roll, bias } => {
            out_events.push(Event::DiceRolled {
                piece: PieceId::Wolf(wolf),
                roll,
            });
            world.move_wolf(wolf, roll, bias, out_events);
        }
    }

    debug_assert!(
        query::is_consistent(world),
        "grid occupancy diverged from piece positions"
    );
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Piece, World};
    use sheepfold_core::{BoardView, PieceId, PieceSnapshot, Position, Standing, WolfId};

    /// Number of rounds started so far.
    #[must_use]
    pub fn round(world: &World) -> u32 {
        world.round
    }

    /// Captures the bear's current state.
    #[must_use]
    pub fn bear(world: &World) -> PieceSnapshot {
        world.bear.snapshot()
    }

    /// Captures every wolf's current state in registration order.
    #[must_use]
    pub fn wolves(world: &World) -> Vec<PieceSnapshot> {
        world.wolves.iter().map(Piece::snapshot).collect()
    }

    /// Identifiers of every wolf in registration order.
    #[must_use]
    pub fn wolf_ids(world: &World) -> Vec<WolfId> {
        world
            .wolves
            .iter()
            .filter_map(|wolf| match wolf.id {
                PieceId::Wolf(id) => Some(id),
                PieceId::Bear => None,
            })
            .collect()
    }

    /// Captures the bear followed by every wolf.
    #[must_use]
    pub fn pieces(world: &World) -> Vec<PieceSnapshot> {
        std::iter::once(&world.bear)
            .chain(world.wolves.iter())
            .map(Piece::snapshot)
            .collect()
    }

    /// Scores of the bear followed by every wolf.
    #[must_use]
    pub fn standings(world: &World) -> Vec<Standing> {
        pieces(world).into_iter().map(Standing::from).collect()
    }

    /// Tiles of every sheep still grazing, in placement order.
    #[must_use]
    pub fn sheep(world: &World) -> Vec<Position> {
        world.sheep.iter().map(|sheep| sheep.position).collect()
    }

    /// Number of sheep placed when the world was created.
    #[must_use]
    pub fn initial_sheep_count(world: &World) -> u32 {
        world.initial_sheep
    }

    /// Tile of the shepherd, unless it has been captured.
    #[must_use]
    pub fn shepherd(world: &World) -> Option<Position> {
        world.shepherd
    }

    /// Captures a read-only view of every tile.
    #[must_use]
    pub fn board_view(world: &World) -> BoardView {
        world.grid.view()
    }

    /// Reports whether the bear and every wolf rest on the goal row.
    #[must_use]
    pub fn is_finished(world: &World) -> bool {
        world.bear.position.is_goal() && world.wolves.iter().all(|wolf| wolf.position.is_goal())
    }

    /// Verifies that grid occupancy and piece positions agree in both directions.
    #[must_use]
    pub fn is_consistent(world: &World) -> bool {
        let pieces_listed = std::iter::once(&world.bear)
            .chain(world.wolves.iter())
            .all(|piece| world.grid.cell(piece.position).pieces().contains(&piece.id));
        let sheep_listed = world
            .sheep
            .iter()
            .all(|sheep| world.grid.cell(sheep.position).sheep() == Some(sheep.id));
        let shepherd_listed = world
            .shepherd
            .map_or(true, |position| world.grid.cell(position).has_shepherd());
        if !(pieces_listed && sheep_listed && shepherd_listed) {
            return false;
        }

        world.grid.iter().all(|(position, cell)| {
            let pieces_placed = cell.pieces().iter().all(|id| {
                world
                    .piece(*id)
                    .is_some_and(|piece| piece.position == position)
            });
            let sheep_placed = cell.sheep().map_or(true, |id| {
                world
                    .sheep
                    .iter()
                    .any(|sheep| sheep.id == id && sheep.position == position)
            });
            let shepherd_placed = !cell.has_shepherd() || world.shepherd == Some(position);
            pieces_placed && sheep_placed && shepherd_placed
        })
    }

    /// Reports whether any piece stands on the provided tile.
    #[must_use]
    pub fn is_occupied(world: &World, position: Position) -> bool {
        world.grid.is_occupied(position)
    }

    /// Reports whether a sheep grazes on the provided tile.
    #[must_use]
    pub fn has_sheep(world: &World, position: Position) -> bool {
        world.grid.cell(position).sheep().is_some()
    }

    #[cfg(test)]
    pub(crate) fn holds_piece(world: &World, position: Position, piece: PieceId) -> bool {
        world.grid.cell(position).pieces().contains(&piece)
    }
}

/// Reasons an explicit layout may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A piece was placed beyond the board edges.
    #[error("layout places a piece at {position}, outside the board")]
    OutOfBounds {
        /// Offending tile.
        position: Position,
    },
    /// Two pieces were placed on the same tile.
    #[error("layout places more than one piece at {position}")]
    Overlap {
        /// Offending tile.
        position: Position,
    },
    /// The layout lists too few or too many wolves.
    #[error("layout lists {count} wolves; between 1 and 3 are required")]
    WolfCount {
        /// Number of wolves listed.
        count: usize,
    },
}

fn validate_layout(dimensions: BoardDimensions, layout: &Layout) -> Result<(), LayoutError> {
    let wolf_count = layout.wolves.len();
    if !(MIN_WOLVES as usize..=MAX_WOLVES as usize).contains(&wolf_count) {
        return Err(LayoutError::WolfCount { count: wolf_count });
    }

    let mut seen = HashSet::new();
    let positions = std::iter::once(layout.bear)
        .chain(layout.wolves.iter().copied())
        .chain(layout.sheep.iter().copied())
        .chain(layout.shepherd);
    for position in positions {
        if !dimensions.contains(position) {
            return Err(LayoutError::OutOfBounds { position });
        }
        if !seen.insert(position) {
            return Err(LayoutError::Overlap { position });
        }
    }
    Ok(())
}

/// Computes the column reached by one diagonal step, bouncing off the edges.
///
/// Returns the new column together with the drift that produced it.
fn drift(column: u32, width: u32, bias: Bias) -> (u32, Bias) {
    let shifted = i64::from(column) + bias.offset();
    if (0..i64::from(width)).contains(&shifted) {
        return (u32::try_from(shifted).unwrap_or(column), bias);
    }

    let flipped = bias.flipped();
    let rebounded = (i64::from(column) + flipped.offset()).clamp(0, i64::from(width) - 1);
    (u32::try_from(rebounded).unwrap_or(column), flipped)
}

#[derive(Clone, Debug)]
struct Piece {
    id: PieceId,
    position: Position,
    score: u32,
}

impl Piece {
    fn new(id: PieceId, position: Position) -> Self {
        Self {
            id,
            position,
            score: 0,
        }
    }

    fn snapshot(&self) -> PieceSnapshot {
        PieceSnapshot {
            id: self.id,
            position: self.position,
            score: self.score,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Sheep {
    id: SheepId,
    position: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimensions() -> BoardDimensions {
        BoardDimensions::square(7).expect("valid dimensions")
    }

    fn world(layout: Layout) -> World {
        World::from_layout(dimensions(), layout).expect("valid layout")
    }

    #[test]
    fn begin_round_advances_counter() {
        let mut world = world(Layout {
            bear: Position::new(6, 0),
            wolves: vec![Position::new(6, 1)],
            sheep: Vec::new(),
            shepherd: None,
        });
        let mut events = Vec::new();

        apply(&mut world, Command::BeginRound, &mut events);
        apply(&mut world, Command::BeginRound, &mut events);

        assert_eq!(query::round(&world), 2);
        assert_eq!(
            events,
            vec![
                Event::RoundStarted { round: 1 },
                Event::RoundStarted { round: 2 }
            ]
        );
    }

    #[test]
    fn drift_bounces_off_both_edges() {
        assert_eq!(drift(3, 7, Bias::Right), (4, Bias::Right));
        assert_eq!(drift(0, 7, Bias::Left), (1, Bias::Right));
        assert_eq!(drift(6, 7, Bias::Right), (5, Bias::Left));
    }

    #[test]
    fn layout_rejects_stacked_pieces() {
        let result = World::from_layout(
            dimensions(),
            Layout {
                bear: Position::new(6, 2),
                wolves: vec![Position::new(6, 2)],
                sheep: Vec::new(),
                shepherd: None,
            },
        );
        assert_eq!(
            result.err(),
            Some(LayoutError::Overlap {
                position: Position::new(6, 2)
            })
        );
    }

    #[test]
    fn layout_rejects_out_of_bounds_and_missing_wolves() {
        let outside = World::from_layout(
            dimensions(),
            Layout {
                bear: Position::new(7, 0),
                wolves: vec![Position::new(6, 1)],
                sheep: Vec::new(),
                shepherd: None,
            },
        );
        assert!(matches!(outside, Err(LayoutError::OutOfBounds { .. })));

        let lonely = World::from_layout(
            dimensions(),
            Layout {
                bear: Position::new(6, 0),
                wolves: Vec::new(),
                sheep: Vec::new(),
                shepherd: None,
            },
        );
        assert!(matches!(lonely, Err(LayoutError::WolfCount { count: 0 })));
    }

    #[test]
    fn relocation_keeps_occupancy_in_step() {
        let mut world = world(Layout {
            bear: Position::new(6, 3),
            wolves: vec![Position::new(6, 4)],
            sheep: Vec::new(),
            shepherd: None,
        });
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MoveBear {
                roll: DieRoll::clamped(2),
            },
            &mut events,
        );

        assert!(query::holds_piece(&world, Position::new(4, 3), PieceId::Bear));
        assert!(!query::is_occupied(&world, Position::new(6, 3)));
        assert!(query::is_consistent(&world));
    }
}
