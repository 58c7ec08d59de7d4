//! Interactive configuration prompts.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use sheepfold_core::{
    sheep_bounds, validate_sheep_count, validate_wolf_count, BoardDimensions, ConfigurationError,
    MAX_BOARD_SIDE, MAX_WOLVES, MIN_BOARD_SIDE, MIN_WOLVES,
};
use tracing::debug;

/// Line-oriented console used to ask for configuration values.
pub(crate) struct Prompter<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Prompter<'a, R, W> {
    pub(crate) fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self { input, output }
    }

    pub(crate) fn board_size(&mut self) -> Result<BoardDimensions> {
        self.ask(
            "Enter the board size (square): ",
            &format!(
                "Invalid board size. Please enter a number between {MIN_BOARD_SIDE} and {MAX_BOARD_SIDE}: "
            ),
            BoardDimensions::square,
        )
    }

    pub(crate) fn sheep_count(&mut self, dimensions: BoardDimensions) -> Result<u32> {
        let bounds = sheep_bounds(dimensions);
        let (min, max) = (bounds.start(), bounds.end());
        self.ask(
            &format!("Enter the number of sheep on the board (between {min} and {max}): "),
            &format!("Invalid number of sheep. Please enter a number between {min} and {max}: "),
            |count| validate_sheep_count(dimensions, count).map(|()| count),
        )
    }

    pub(crate) fn wolf_count(&mut self) -> Result<u32> {
        self.ask(
            &format!("Enter the number of wolves on the board ({MIN_WOLVES}-{MAX_WOLVES}): "),
            &format!(
                "Invalid number of wolves. Please enter a number between {MIN_WOLVES} and {MAX_WOLVES}: "
            ),
            |count| validate_wolf_count(count).map(|()| count),
        )
    }

    /// Repeats the question until a line parses and passes validation.
    fn ask<T, F>(&mut self, question: &str, retry: &str, mut accept: F) -> Result<T>
    where
        F: FnMut(u32) -> Result<T, ConfigurationError>,
    {
        writeln!(self.output, "{question}").context("failed to write prompt")?;
        loop {
            self.output.flush().context("failed to flush prompt")?;
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read configuration input")?;
            if read == 0 {
                bail!("input closed before the game was configured");
            }

            match line.trim().parse::<u32>() {
                Ok(value) => match accept(value) {
                    Ok(accepted) => return Ok(accepted),
                    Err(error) => debug!(%error, "rejected configuration value"),
                },
                Err(error) => debug!(%error, input = line.trim(), "unparsable configuration value"),
            }
            writeln!(self.output, "{retry}").context("failed to write prompt")?;
        }
    }
}
