#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Dice system that turns round announcements into movement commands.
//!
//! Every round the bear rolls first, then each wolf rolls and draws the
//! horizontal drift it keeps for the whole turn. Draws always happen in that
//! order, so a seeded generator replays a game exactly.

use rand::Rng;
use sheepfold_core::{Bias, Command, DieRoll, Event, WolfId};
use tracing::trace;

/// Pure system that rolls dice for every piece when a round starts.
#[derive(Debug)]
pub struct Dice<R> {
    rng: R,
}

impl<R: Rng> Dice<R> {
    /// Creates a dice system drawing from the provided generator.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Consumes world events and emits the movement commands for each round started.
    ///
    /// Pieces resting on the goal row still roll; the world reports that they
    /// stay put.
    pub fn handle(&mut self, events: &[Event], wolves: &[WolfId], out: &mut Vec<Command>) {
        for event in events {
            let Event::RoundStarted { round } = event else {
                continue;
            };

            let roll = self.roll();
            trace!(round, %roll, "bear rolled");
            out.push(Command::MoveBear { roll });

            for &wolf in wolves {
                let roll = self.roll();
                let bias = self.bias();
                trace!(round, wolf = wolf.get(), %roll, ?bias, "wolf rolled");
                out.push(Command::MoveWolf { wolf, roll, bias });
            }
        }
    }

    fn roll(&mut self) -> DieRoll {
        DieRoll::clamped(self.rng.gen_range(1..=DieRoll::FACES))
    }

    fn bias(&mut self) -> Bias {
        if self.rng.gen_bool(0.5) {
            Bias::Right
        } else {
            Bias::Left
        }
    }
}
