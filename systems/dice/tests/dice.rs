use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sheepfold_core::{Command, Event, GameConfig, WolfId};
use sheepfold_system_dice::Dice;
use sheepfold_world::{self as world, query, World};

fn wolves(count: u8) -> Vec<WolfId> {
    (0..count).map(WolfId::new).collect()
}

#[test]
fn ignores_events_other_than_round_start() {
    let mut dice = Dice::new(ChaCha8Rng::seed_from_u64(1));
    let mut commands = Vec::new();

    dice.handle(
        &[Event::GoalAlreadyReached {
            piece: sheepfold_core::PieceId::Bear,
        }],
        &wolves(3),
        &mut commands,
    );

    assert!(commands.is_empty());
}

#[test]
fn bear_moves_before_wolves_in_registration_order() {
    let mut dice = Dice::new(ChaCha8Rng::seed_from_u64(2));
    let mut commands = Vec::new();

    dice.handle(&[Event::RoundStarted { round: 1 }], &wolves(3), &mut commands);

    assert_eq!(commands.len(), 4);
    assert!(matches!(commands[0], Command::MoveBear { .. }));
    let order: Vec<WolfId> = commands[1..]
        .iter()
        .map(|command| match command {
            Command::MoveWolf { wolf, .. } => *wolf,
            other => panic!("unexpected command emitted: {other:?}"),
        })
        .collect();
    assert_eq!(order, wolves(3));
}

#[test]
fn rolls_stay_on_the_die_faces_and_both_drifts_appear() {
    let mut dice = Dice::new(ChaCha8Rng::seed_from_u64(3));
    let mut commands = Vec::new();

    for round in 1..=200 {
        dice.handle(&[Event::RoundStarted { round }], &wolves(2), &mut commands);
    }

    let mut faces = [false; 6];
    let mut drifts = Vec::new();
    for command in &commands {
        let roll = match command {
            Command::MoveBear { roll } => *roll,
            Command::MoveWolf { roll, bias, .. } => {
                drifts.push(*bias);
                *roll
            }
            Command::BeginRound => panic!("dice never open rounds"),
        };
        assert!((1..=6).contains(&roll.get()));
        faces[usize::from(roll.get() - 1)] = true;
    }

    assert!(faces.iter().all(|seen| *seen), "every face should come up");
    assert!(drifts.contains(&sheepfold_core::Bias::Left));
    assert!(drifts.contains(&sheepfold_core::Bias::Right));
}

#[test]
fn seeded_dice_replay_identically() {
    let roll_all = |seed| {
        let mut dice = Dice::new(ChaCha8Rng::seed_from_u64(seed));
        let mut commands = Vec::new();
        for round in 1..=10 {
            dice.handle(&[Event::RoundStarted { round }], &wolves(3), &mut commands);
        }
        commands
    };

    assert_eq!(roll_all(42), roll_all(42));
    assert_ne!(roll_all(42), roll_all(43));
}

#[test]
fn drives_a_world_to_completion() {
    let config = GameConfig::new(8, 8, 14, 2).expect("valid configuration");
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut world = World::new(&config, &mut rng);
    let mut dice = Dice::new(rng);

    let mut rounds = 0;
    while !query::is_finished(&world) {
        rounds += 1;
        let mut events = Vec::new();
        world::apply(&mut world, Command::BeginRound, &mut events);

        let mut commands = Vec::new();
        dice.handle(&events, &query::wolf_ids(&world), &mut commands);
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
    }

    assert!(rounds <= 7);
    assert_eq!(query::round(&world), rounds);
}
