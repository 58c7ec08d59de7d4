//! Random placement of pieces for a freshly configured game.
//!
//! Pieces are placed in a fixed order (bear, sheep, wolves, shepherd) and
//! every draw consumes the generator in the same sequence, so a seeded
//! generator always reproduces the same layout.

use rand::Rng;
use sheepfold_core::{GameConfig, Layout, PieceId, Position, WolfId};
use tracing::debug;

use crate::grid::{Grid, Occupant, SheepId};

/// Scatters every piece required by the configuration onto distinct tiles.
///
/// Occupied tiles are rejected and redrawn. The configuration bounds keep the
/// number of pieces well below the number of eligible tiles, so sampling
/// always terminates.
pub(crate) fn scatter<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Layout {
    let dimensions = config.dimensions();
    let width = dimensions.width();
    let start_row = dimensions.start_row();
    let mut grid = Grid::new(dimensions);

    let bear = Position::new(start_row, rng.gen_range(0..width));
    grid.place(Occupant::Piece(PieceId::Bear), bear);

    let mut sheep = Vec::with_capacity(config.sheep_count() as usize);
    for index in 0..config.sheep_count() {
        let position = sample_free(&grid, rng, |rng| {
            Position::new(rng.gen_range(0..start_row), rng.gen_range(0..width))
        });
        grid.place(Occupant::Sheep(SheepId::new(index)), position);
        sheep.push(position);
    }

    let mut wolves = Vec::with_capacity(config.wolf_count() as usize);
    for index in 0..config.wolf_count() {
        let wolf = PieceId::Wolf(WolfId::new(u8::try_from(index).unwrap_or(u8::MAX)));
        let position = sample_free(&grid, rng, |rng| {
            Position::new(start_row, rng.gen_range(0..width))
        });
        grid.place(Occupant::Piece(wolf), position);
        wolves.push(position);
    }

    let shepherd = sample_free(&grid, rng, |rng| {
        Position::new(rng.gen_range(0..start_row), rng.gen_range(0..width))
    });

    debug!(
        bear = %bear,
        sheep = sheep.len(),
        wolves = wolves.len(),
        shepherd = %shepherd,
        "scattered pieces"
    );

    Layout {
        bear,
        wolves,
        sheep,
        shepherd: Some(shepherd),
    }
}

fn sample_free<R, F>(grid: &Grid, rng: &mut R, mut draw: F) -> Position
where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> Position,
{
    loop {
        let candidate = draw(rng);
        if !grid.is_occupied(candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn scatter_respects_rows_and_counts() {
        let config = GameConfig::new(9, 7, 25, 3).expect("valid configuration");
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let layout = scatter(&config, &mut rng);

        assert_eq!(layout.bear.row(), 6);
        assert_eq!(layout.sheep.len(), 25);
        assert_eq!(layout.wolves.len(), 3);
        assert!(layout.wolves.iter().all(|wolf| wolf.row() == 6));
        assert!(layout.sheep.iter().all(|sheep| sheep.row() < 6));
        assert!(layout.shepherd.is_some_and(|shepherd| shepherd.row() < 6));
    }

    #[test]
    fn scatter_never_stacks_pieces() {
        let config = GameConfig::new(7, 7, 24, 3).expect("valid configuration");
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let layout = scatter(&config, &mut rng);

            let mut seen = HashSet::new();
            let all = std::iter::once(layout.bear)
                .chain(layout.wolves.iter().copied())
                .chain(layout.sheep.iter().copied())
                .chain(layout.shepherd);
            for position in all {
                assert!(seen.insert(position), "seed {seed} stacked {position}");
            }
        }
    }
}
