#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Sheepfold adapters.
//!
//! Rendering never touches the world directly: adapters capture a
//! [`BoardView`] and the events of a round, build a [`Presentation`] from them
//! and hand it to a [`RenderingBackend`].

use std::{fmt, io::Write};

use anyhow::{Context, Result as AnyResult};
use sheepfold_core::{BoardView, CaptureStage, CellContents, Event, FinalReport, Outcome, PieceId};

/// Symbol drawn for a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// The bear stands on the tile.
    Bear,
    /// At least one wolf, and no bear, stands on the tile.
    Wolf,
    /// The shepherd stands on the tile.
    Shepherd,
    /// A sheep grazes on an otherwise empty tile.
    Sheep,
    /// Nothing occupies the tile.
    Empty,
}

impl Glyph {
    /// Picks the glyph for a tile.
    ///
    /// The shepherd is drawn over a bear or wolf sharing its tile, and those
    /// are drawn over a sheep. A bear is drawn over wolves.
    #[must_use]
    pub const fn from_cell(cell: &CellContents) -> Self {
        if cell.shepherd {
            Self::Shepherd
        } else if cell.bear {
            Self::Bear
        } else if cell.wolves > 0 {
            Self::Wolf
        } else if cell.sheep {
            Self::Sheep
        } else {
            Self::Empty
        }
    }

    /// Character printed for the glyph.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Bear => 'B',
            Self::Wolf => 'W',
            Self::Shepherd => 'S',
            Self::Sheep => 'O',
            Self::Empty => '.',
        }
    }
}

/// Board converted into rows of glyphs, starting from the goal row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    rows: Vec<Vec<Glyph>>,
}

impl Scene {
    /// Builds a scene from a board snapshot.
    #[must_use]
    pub fn from_board(view: &BoardView) -> Self {
        let rows = view
            .rows()
            .map(|row| row.iter().map(Glyph::from_cell).collect())
            .collect();
        Self { rows }
    }

    /// Iterator over the glyph rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for glyph in row {
                write!(f, "{} ", glyph.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Describes a piece the way the commentary addresses it.
fn subject(piece: PieceId) -> String {
    match piece {
        PieceId::Bear => "The Bear".to_owned(),
        PieceId::Wolf(_) => piece.to_string(),
    }
}

/// Turns a world event into a line of running commentary.
///
/// Events that carry no commentary, such as individual steps, yield `None`.
#[must_use]
pub fn narrate(event: &Event) -> Option<String> {
    let line = match *event {
        Event::DiceRolled { piece, roll } => {
            format!("{} rolls the dice and got: {roll}", subject(piece))
        }
        Event::GoalAlreadyReached { piece } => {
            format!("{} has already reached the goal.", subject(piece))
        }
        Event::SheepCaptured {
            piece: PieceId::Bear,
            score,
            stage,
            ..
        } => format!(
            "The Bear ate a sheep {} and scored a point. Current score: {score}",
            place(stage)
        ),
        Event::SheepCaptured { piece, score, .. } => {
            format!("{piece} ate a sheep and scored a point. Score {piece}: {score}")
        }
        Event::ShepherdCaptured { piece, stage, .. } => {
            format!("{} ate the shepherd {}.", subject(piece), place(stage))
        }
        Event::RoundStarted { .. } | Event::PieceMoved { .. } | Event::BiasFlipped { .. } => {
            return None;
        }
    };
    Some(line)
}

fn place(stage: CaptureStage) -> &'static str {
    match stage {
        CaptureStage::Path => "on the way",
        CaptureStage::Landing => "on its tile",
    }
}

/// Formats the end-of-game summary, one line per entry.
#[must_use]
pub fn report_lines(report: &FinalReport) -> Vec<String> {
    let mut lines = vec!["The game is over!".to_owned()];
    for standing in &report.standings {
        lines.push(match standing.piece {
            PieceId::Bear => format!("Bear's score: {}", standing.score),
            PieceId::Wolf(_) => format!("{}: {}", standing.piece, standing.score),
        });
    }
    lines.push(match report.outcome {
        Outcome::Tie => "The game ends in a tie!".to_owned(),
        Outcome::Winner(winner) => format!(
            "The winner is: {} with a score of: {}",
            winner.piece, winner.score
        ),
    });
    lines
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    /// Commentary printed before the board.
    pub narration: Vec<String>,
    /// Board drawn after the commentary.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a presentation showing only the board.
    #[must_use]
    pub fn new(scene: Scene) -> Self {
        Self {
            narration: Vec::new(),
            scene,
        }
    }

    /// Constructs a presentation narrating the provided events above the board.
    #[must_use]
    pub fn from_events(events: &[Event], view: &BoardView) -> Self {
        Self {
            narration: events.iter().filter_map(narrate).collect(),
            scene: Scene::from_board(view),
        }
    }
}

/// Rendering backend capable of presenting Sheepfold boards and reports.
pub trait RenderingBackend {
    /// Presents commentary and the board after setup or a round.
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()>;

    /// Presents the end-of-game report.
    fn conclude(&mut self, report: &FinalReport) -> AnyResult<()>;

    /// Presents a standalone message such as a banner or a diagnostic.
    fn notify(&mut self, message: &str) -> AnyResult<()>;
}

/// Backend that writes plain text to any writer.
#[derive(Debug)]
pub struct TextBackend<W> {
    out: W,
}

impl<W: Write> TextBackend<W> {
    /// Creates a backend writing to the provided sink.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Releases the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()> {
        for line in &presentation.narration {
            writeln!(self.out, "{line}").context("failed to write commentary")?;
        }
        write!(self.out, "{}", presentation.scene).context("failed to write board")?;
        self.out.flush().context("failed to flush output")
    }

    fn conclude(&mut self, report: &FinalReport) -> AnyResult<()> {
        for line in report_lines(report) {
            writeln!(self.out, "{line}").context("failed to write report")?;
        }
        self.out.flush().context("failed to flush output")
    }

    fn notify(&mut self, message: &str) -> AnyResult<()> {
        writeln!(self.out, "{message}").context("failed to write message")?;
        self.out.flush().context("failed to flush output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheepfold_core::{DieRoll, Position, Standing, WolfId};

    #[test]
    fn glyph_precedence_favours_shepherd_then_big_pieces() {
        let crowded = CellContents {
            bear: true,
            wolves: 1,
            sheep: true,
            shepherd: true,
        };
        assert_eq!(Glyph::from_cell(&crowded), Glyph::Shepherd);

        let shared = CellContents {
            shepherd: false,
            ..crowded
        };
        assert_eq!(Glyph::from_cell(&shared), Glyph::Bear);

        let wolf_on_sheep = CellContents {
            bear: false,
            ..shared
        };
        assert_eq!(Glyph::from_cell(&wolf_on_sheep), Glyph::Wolf);

        let grazing = CellContents {
            sheep: true,
            ..CellContents::default()
        };
        assert_eq!(Glyph::from_cell(&grazing), Glyph::Sheep);
        assert_eq!(Glyph::from_cell(&CellContents::default()), Glyph::Empty);
    }

    #[test]
    fn narration_matches_commentary() {
        let wolf = PieceId::Wolf(WolfId::new(1));
        let at = Position::new(2, 2);

        assert_eq!(
            narrate(&Event::DiceRolled {
                piece: PieceId::Bear,
                roll: DieRoll::clamped(4),
            })
            .as_deref(),
            Some("The Bear rolls the dice and got: 4")
        );
        assert_eq!(
            narrate(&Event::SheepCaptured {
                piece: PieceId::Bear,
                at,
                score: 2,
                stage: CaptureStage::Path,
            })
            .as_deref(),
            Some("The Bear ate a sheep on the way and scored a point. Current score: 2")
        );
        assert_eq!(
            narrate(&Event::SheepCaptured {
                piece: wolf,
                at,
                score: 1,
                stage: CaptureStage::Landing,
            })
            .as_deref(),
            Some("Wolf2 ate a sheep and scored a point. Score Wolf2: 1")
        );
        assert_eq!(
            narrate(&Event::ShepherdCaptured {
                piece: PieceId::Bear,
                at,
                stage: CaptureStage::Landing,
            })
            .as_deref(),
            Some("The Bear ate the shepherd on its tile.")
        );
        assert_eq!(
            narrate(&Event::GoalAlreadyReached { piece: wolf }).as_deref(),
            Some("Wolf2 has already reached the goal.")
        );
        assert_eq!(narrate(&Event::RoundStarted { round: 3 }), None);
    }

    #[test]
    fn report_lists_scores_then_outcome() {
        let bear = Standing {
            piece: PieceId::Bear,
            score: 1,
        };
        let wolf = Standing {
            piece: PieceId::Wolf(WolfId::new(0)),
            score: 4,
        };
        let report = FinalReport {
            standings: vec![bear, wolf],
            outcome: Outcome::Winner(wolf),
        };

        assert_eq!(
            report_lines(&report),
            vec![
                "The game is over!",
                "Bear's score: 1",
                "Wolf1: 4",
                "The winner is: Wolf1 with a score of: 4",
            ]
        );

        let tied = FinalReport {
            outcome: Outcome::Tie,
            ..report
        };
        assert_eq!(
            report_lines(&tied).last().map(String::as_str),
            Some("The game ends in a tie!")
        );
    }
}
