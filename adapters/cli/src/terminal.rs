//! Terminal turn signals and the console observer.

use std::io::{BufRead, Write};

use anyhow::Result;
use sheepfold_core::{Event, FinalReport, PieceId};
use sheepfold_rendering::{Presentation, RenderingBackend, Scene};
use sheepfold_system_game_loop::{RoundObserver, SignalError, TurnSignal};
use sheepfold_world::{query, World};

/// Waits for the player to press Enter before every round.
pub(crate) struct LineSignal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineSignal<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> TurnSignal for LineSignal<R, W> {
    fn await_turn(&mut self, _round: u32) -> Result<(), SignalError> {
        writeln!(self.output, "--- New turn --- Press Enter to continue")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SignalError::Closed);
        }
        Ok(())
    }
}

/// Advances rounds immediately, announcing each one.
pub(crate) struct AutoSignal<W> {
    output: W,
}

impl<W: Write> AutoSignal<W> {
    pub(crate) fn new(output: W) -> Self {
        Self { output }
    }
}

impl<W: Write> TurnSignal for AutoSignal<W> {
    fn await_turn(&mut self, round: u32) -> Result<(), SignalError> {
        writeln!(self.output, "--- Turn {round} ---")?;
        Ok(())
    }
}

/// Observer that prints commentary and the board through a rendering backend.
///
/// The board is drawn after the bear moves and again after the wolves.
pub(crate) struct Console<B> {
    backend: B,
    narrated: usize,
}

impl<B: RenderingBackend> Console<B> {
    pub(crate) fn new(backend: B) -> Self {
        Self {
            backend,
            narrated: 0,
        }
    }

    pub(crate) fn announce(&mut self, message: &str) -> Result<()> {
        self.backend.notify(message)
    }

    pub(crate) fn conclude(&mut self, report: &FinalReport) -> Result<()> {
        self.backend.conclude(report)
    }
}

impl<B: RenderingBackend> RoundObserver for Console<B> {
    fn setup_complete(&mut self, world: &World) -> Result<()> {
        let scene = Scene::from_board(&query::board_view(world));
        self.backend.present(&Presentation::new(scene))
    }

    fn bear_moved(&mut self, _round: u32, events: &[Event], world: &World) -> Result<()> {
        self.narrated = events.len();
        let presentation = Presentation::from_events(events, &query::board_view(world));
        let stayed = events.contains(&Event::GoalAlreadyReached {
            piece: PieceId::Bear,
        });
        if !stayed {
            return self.backend.present(&presentation);
        }
        for line in &presentation.narration {
            self.backend.notify(line)?;
        }
        Ok(())
    }

    fn round_resolved(&mut self, _round: u32, events: &[Event], world: &World) -> Result<()> {
        let fresh = events.get(self.narrated..).unwrap_or(events);
        self.narrated = 0;
        self.backend
            .present(&Presentation::from_events(fresh, &query::board_view(world)))
    }

    fn interrupted(&mut self, error: &SignalError) -> Result<()> {
        let notice = match error {
            SignalError::Closed => "Input closed before the game finished.".to_owned(),
            SignalError::Io(source) => {
                format!("An error occurred while reading from the console: {source}")
            }
        };
        self.backend.notify(&notice)
    }
}
