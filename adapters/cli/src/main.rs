#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Sheepfold in the terminal.

mod args;
mod prompt;
mod terminal;

use std::io;

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sheepfold_rendering::TextBackend;
use sheepfold_system_dice::Dice;
use sheepfold_system_game_loop::GameLoop;
use sheepfold_system_scoring::Scoring;
use sheepfold_world::World;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    args::Args,
    terminal::{AutoSignal, Console, LineSignal},
};

/// Entry point for the Sheepfold command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut console = Console::new(TextBackend::new(io::stdout()));
    console.announce(sheepfold_core::WELCOME_BANNER)?;

    let mut input = io::stdin().lock();
    let config = args.resolve_config(&mut input, &mut io::stdout())?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, ?config, "starting game");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut world = World::new(&config, &mut rng);

    let mut game_loop = GameLoop::new(Dice::new(rng), Scoring::new(args.tie_rule.into()));
    let conclusion = if args.auto {
        game_loop.run(&mut world, &mut AutoSignal::new(io::stdout()), &mut console)?
    } else {
        game_loop.run(
            &mut world,
            &mut LineSignal::new(input, io::stdout()),
            &mut console,
        )?
    };

    console.conclude(&conclusion.report)
}

/// Routes diagnostics to stderr, filtered by `RUST_LOG` and quiet by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
