//! Command-line flags and configuration resolution.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use sheepfold_core::{validate_sheep_count, validate_wolf_count, BoardDimensions, GameConfig};
use sheepfold_system_scoring::TieRule;

use crate::prompt::Prompter;

/// Plays a game of Sheepfold in the terminal.
///
/// Values not supplied as flags are asked for interactively.
#[derive(Debug, Parser)]
#[command(name = "sheepfold", version)]
pub(crate) struct Args {
    /// Side length of a square board (7-40).
    #[arg(long)]
    pub(crate) size: Option<u32>,
    /// Board width, overriding --size. Needs --height unless --size is set.
    #[arg(long)]
    pub(crate) width: Option<u32>,
    /// Board height, overriding --size. Needs --width unless --size is set.
    #[arg(long)]
    pub(crate) height: Option<u32>,
    /// Number of sheep scattered on the board.
    #[arg(long)]
    pub(crate) sheep: Option<u32>,
    /// Number of wolves chasing the bear (1-3).
    #[arg(long)]
    pub(crate) wolves: Option<u32>,
    /// Seed for the random generator, for replaying a game.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Rule used to decide ties at the end of the game.
    #[arg(long, value_enum, default_value_t = TieRuleArg::Sticky)]
    pub(crate) tie_rule: TieRuleArg,
    /// Advance rounds without waiting for Enter.
    #[arg(long)]
    pub(crate) auto: bool,
}

/// Tie rules selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum TieRuleArg {
    /// A wolf matching the running best score forces a tie.
    Sticky,
    /// Only a shared maximum score is a tie.
    StrictMaximum,
}

impl From<TieRuleArg> for TieRule {
    fn from(value: TieRuleArg) -> Self {
        match value {
            TieRuleArg::Sticky => Self::Sticky,
            TieRuleArg::StrictMaximum => Self::StrictMaximum,
        }
    }
}

impl Args {
    /// Builds the game configuration, prompting for anything the flags leave out.
    ///
    /// Invalid flag values abort; invalid interactive answers are asked again.
    pub(crate) fn resolve_config<R, W>(&self, input: &mut R, output: &mut W) -> Result<GameConfig>
    where
        R: BufRead,
        W: Write,
    {
        let mut prompter = Prompter::new(input, output);

        let dimensions = match (self.width.or(self.size), self.height.or(self.size)) {
            (Some(width), Some(height)) => {
                BoardDimensions::new(width, height).context("invalid board size flags")?
            }
            (None, None) => prompter.board_size()?,
            (Some(_), None) | (None, Some(_)) => {
                bail!("invalid board size flags: pass --width with --height, or --size")
            }
        };

        let sheep = match self.sheep {
            Some(count) => {
                validate_sheep_count(dimensions, count).context("invalid --sheep flag")?;
                count
            }
            None => prompter.sheep_count(dimensions)?,
        };

        let wolves = match self.wolves {
            Some(count) => {
                validate_wolf_count(count).context("invalid --wolves flag")?;
                count
            }
            None => prompter.wolf_count()?,
        };

        GameConfig::with_dimensions(dimensions, sheep, wolves).context("invalid configuration")
    }
}
