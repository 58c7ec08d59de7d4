use sheepfold_core::{BoardDimensions, Command, DieRoll, Layout, Position};
use sheepfold_rendering::{Glyph, Presentation, RenderingBackend, Scene, TextBackend};
use sheepfold_world::{self as world, query, World};

fn world() -> World {
    World::from_layout(
        BoardDimensions::square(7).expect("valid dimensions"),
        Layout {
            bear: Position::new(6, 1),
            wolves: vec![Position::new(6, 4)],
            sheep: vec![Position::new(5, 1), Position::new(0, 6)],
            shepherd: Some(Position::new(3, 3)),
        },
    )
    .expect("valid layout")
}

#[test]
fn scene_rows_start_at_the_goal_row() {
    let scene = Scene::from_board(&query::board_view(&world()));
    let rows: Vec<&[Glyph]> = scene.rows().collect();

    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0][6], Glyph::Sheep);
    assert_eq!(rows[3][3], Glyph::Shepherd);
    assert_eq!(rows[6][1], Glyph::Bear);
    assert_eq!(rows[6][4], Glyph::Wolf);
}

#[test]
fn text_form_prints_glyphs_followed_by_spaces() {
    let scene = Scene::from_board(&query::board_view(&world()));
    let text = scene.to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], ". . . . . . O ");
    assert_eq!(lines[3], ". . . S . . . ");
    assert_eq!(lines[5], ". O . . . . . ");
    assert_eq!(lines[6], ". B . . W . . ");
}

#[test]
fn backend_narrates_a_round_above_the_board() {
    let mut world = world();
    let mut events = Vec::new();
    world::apply(&mut world, Command::BeginRound, &mut events);
    world::apply(
        &mut world,
        Command::MoveBear {
            roll: DieRoll::clamped(1),
        },
        &mut events,
    );

    let mut backend = TextBackend::new(Vec::new());
    backend
        .present(&Presentation::from_events(&events, &query::board_view(&world)))
        .expect("writing to memory succeeds");
    let output = String::from_utf8(backend.into_inner()).expect("utf-8 output");
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "The Bear rolls the dice and got: 1");
    assert_eq!(
        lines[1],
        "The Bear ate a sheep on its tile and scored a point. Current score: 1"
    );
    assert_eq!(lines[2 + 5], ". B . . . . . ");
    assert_eq!(lines.len(), 2 + 7);
}

#[test]
fn backend_writes_the_final_report() {
    let world = world();
    let report = sheepfold_core::FinalReport {
        standings: query::standings(&world),
        outcome: sheepfold_core::Outcome::Tie,
    };

    let mut backend = TextBackend::new(Vec::new());
    backend.conclude(&report).expect("writing to memory succeeds");
    backend.notify("bye").expect("writing to memory succeeds");
    let output = String::from_utf8(backend.into_inner()).expect("utf-8 output");

    assert_eq!(
        output,
        "The game is over!\nBear's score: 0\nWolf1: 0\nThe game ends in a tie!\nbye\n"
    );
}

#[test]
fn bare_presentation_draws_only_the_board() {
    let scene = Scene::from_board(&query::board_view(&world()));
    let presentation = Presentation::new(scene.clone());
    let mut backend = TextBackend::new(Vec::new());
    backend
        .present(&presentation)
        .expect("writing to memory succeeds");
    let output = String::from_utf8(backend.into_inner()).expect("utf-8 output");

    assert_eq!(output, scene.to_string());
}
