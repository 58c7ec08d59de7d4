#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! End-of-game adjudication that turns final standings into a report.

use serde::{Deserialize, Serialize};
use sheepfold_core::{FinalReport, Outcome, Standing};
use tracing::info;

/// Policy used to decide whether the final scores produce a tie.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TieRule {
    /// Scans the wolves against the best score seen so far; once any wolf
    /// matches that score the game is a tie, even if a later wolf beats it.
    #[default]
    Sticky,
    /// Declares a tie only when more than one piece holds the maximum score.
    StrictMaximum,
}

/// Pure system that adjudicates final standings.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scoring {
    rule: TieRule,
}

impl Scoring {
    /// Creates a scoring system applying the provided tie rule.
    #[must_use]
    pub const fn new(rule: TieRule) -> Self {
        Self { rule }
    }

    /// Tie rule applied by this system.
    #[must_use]
    pub const fn rule(&self) -> TieRule {
        self.rule
    }

    /// Builds the end-of-game report for standings listed bear first.
    #[must_use]
    pub fn report(&self, standings: &[Standing]) -> FinalReport {
        let outcome = self.adjudicate(standings);
        info!(?outcome, rule = ?self.rule, "game adjudicated");
        FinalReport {
            standings: standings.to_vec(),
            outcome,
        }
    }

    /// Determines the winner, scanning the standings in order.
    ///
    /// The first entry is the bear; the remaining entries are wolves in
    /// registration order. An empty slice is reported as a tie.
    #[must_use]
    pub fn adjudicate(&self, standings: &[Standing]) -> Outcome {
        let Some((first, rest)) = standings.split_first() else {
            return Outcome::Tie;
        };

        let mut best = *first;
        let mut tied = false;
        for standing in rest {
            if standing.score > best.score {
                best = *standing;
                if self.rule == TieRule::StrictMaximum {
                    tied = false;
                }
            } else if standing.score == best.score {
                tied = true;
            }
        }

        if tied {
            Outcome::Tie
        } else {
            Outcome::Winner(best)
        }
    }
}
