#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Round driver that plays a Sheepfold game to its conclusion.
//!
//! The loop waits for a turn signal before every round, lets the dice system
//! roll for each piece, applies the resulting commands to the world and hands
//! the produced events to an observer, once after the bear moves and again
//! when the round is over. It stops once every bear and wolf rests
//! on the goal row, or as soon as the turn signal fails, and then adjudicates
//! the standings.

use std::io;

use anyhow::Result as AnyResult;
use rand::Rng;
use sheepfold_core::{Command, Event, FinalReport};
use sheepfold_system_dice::Dice;
use sheepfold_system_scoring::Scoring;
use sheepfold_world::{self as world, query, World};
use thiserror::Error;
use tracing::{info, warn};

/// Source of the discrete trigger that advances the game by one round.
pub trait TurnSignal {
    /// Blocks until the next round may begin.
    ///
    /// `round` is the one-based index of the round about to be played.
    fn await_turn(&mut self, round: u32) -> Result<(), SignalError>;
}

/// Reasons a turn signal may fail to deliver.
#[derive(Debug, Error)]
pub enum SignalError {
    /// The signal source was closed before the game finished.
    #[error("turn signal closed before the game finished")]
    Closed,
    /// Reading the signal source failed.
    #[error("failed to read the turn signal")]
    Io(#[from] io::Error),
}

/// Receives progress notifications while a game is played.
pub trait RoundObserver {
    /// Called once before the first round with the freshly scattered world.
    fn setup_complete(&mut self, _world: &World) -> AnyResult<()> {
        Ok(())
    }

    /// Called once the bear has moved, before any wolf rolls.
    ///
    /// `events` holds everything the round has produced so far.
    fn bear_moved(&mut self, _round: u32, _events: &[Event], _world: &World) -> AnyResult<()> {
        Ok(())
    }

    /// Called after every round with the events it produced.
    fn round_resolved(&mut self, round: u32, events: &[Event], world: &World) -> AnyResult<()>;

    /// Called when the turn signal fails and the game is cut short.
    fn interrupted(&mut self, _error: &SignalError) -> AnyResult<()> {
        Ok(())
    }
}

/// Summary returned once the loop stops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conclusion {
    /// Adjudicated standings at the time the loop stopped.
    pub report: FinalReport,
    /// Number of rounds played.
    pub rounds: u32,
    /// Indicates whether the turn signal cut the game short.
    pub interrupted: bool,
}

/// Drives rounds against a world until the game ends.
#[derive(Debug)]
pub struct GameLoop<R> {
    dice: Dice<R>,
    scoring: Scoring,
}

impl<R: Rng> GameLoop<R> {
    /// Creates a loop that rolls with the provided dice and adjudicates with the scoring system.
    #[must_use]
    pub const fn new(dice: Dice<R>, scoring: Scoring) -> Self {
        Self { dice, scoring }
    }

    /// Plays a single round and returns every event it produced.
    ///
    /// The round opens with [`Command::BeginRound`]; the dice then move the
    /// bear followed by each wolf in registration order.
    pub fn play_round(&mut self, world: &mut World) -> Vec<Event> {
        let mut events = Vec::new();
        for command in self.open_round(world, &mut events) {
            world::apply(world, command, &mut events);
        }
        events
    }

    fn open_round(&mut self, world: &mut World, events: &mut Vec<Event>) -> Vec<Command> {
        world::apply(world, Command::BeginRound, events);

        let mut commands = Vec::new();
        self.dice
            .handle(events, &query::wolf_ids(world), &mut commands);
        commands
    }

    /// Plays rounds until every piece reaches the goal row or the signal fails.
    ///
    /// Observer failures abort the loop and are returned to the caller.
    pub fn run<S, O>(
        &mut self,
        world: &mut World,
        signal: &mut S,
        observer: &mut O,
    ) -> AnyResult<Conclusion>
    where
        S: TurnSignal + ?Sized,
        O: RoundObserver + ?Sized,
    {
        observer.setup_complete(world)?;

        let mut rounds = 0;
        let mut interrupted = false;
        while !query::is_finished(world) {
            let next = query::round(world).saturating_add(1);
            if let Err(error) = signal.await_turn(next) {
                warn!(round = next, %error, "turn signal failed; ending the game early");
                observer.interrupted(&error)?;
                interrupted = true;
                break;
            }

            let mut events = Vec::new();
            for command in self.open_round(world, &mut events) {
                world::apply(world, command, &mut events);
                if matches!(command, Command::MoveBear { .. }) {
                    observer.bear_moved(next, &events, world)?;
                }
            }
            rounds += 1;
            observer.round_resolved(next, &events, world)?;
        }

        let report = self.scoring.report(&query::standings(world));
        info!(rounds, interrupted, "game concluded");
        Ok(Conclusion {
            report,
            rounds,
            interrupted,
        })
    }
}
