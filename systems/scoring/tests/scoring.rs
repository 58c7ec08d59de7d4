use sheepfold_core::{Layout, Outcome, PieceId, Position, Standing, WolfId};
use sheepfold_system_scoring::{Scoring, TieRule};

fn standings(scores: &[u32]) -> Vec<Standing> {
    scores
        .iter()
        .zip(0u8..)
        .map(|(score, index)| Standing {
            piece: if index == 0 {
                PieceId::Bear
            } else {
                PieceId::Wolf(WolfId::new(index - 1))
            },
            score: *score,
        })
        .collect()
}

#[test]
fn equal_scores_across_bear_and_wolves_tie() {
    let scoring = Scoring::default();
    let report = scoring.report(&standings(&[2, 2, 2]));

    assert_eq!(report.outcome, Outcome::Tie);
    assert_eq!(report.standings, standings(&[2, 2, 2]));
}

#[test]
fn unique_maximum_wins_under_both_rules() {
    for rule in [TieRule::Sticky, TieRule::StrictMaximum] {
        let outcome = Scoring::new(rule).adjudicate(&standings(&[1, 4, 2]));
        assert_eq!(
            outcome,
            Outcome::Winner(Standing {
                piece: PieceId::Wolf(WolfId::new(0)),
                score: 4,
            }),
            "rule {rule:?}"
        );
    }
}

#[test]
fn bear_wins_when_wolves_trail() {
    let outcome = Scoring::default().adjudicate(&standings(&[3, 0, 2, 1]));
    assert_eq!(
        outcome,
        Outcome::Winner(Standing {
            piece: PieceId::Bear,
            score: 3,
        })
    );
}

#[test]
fn sticky_tie_survives_a_later_higher_score() {
    let scores = standings(&[1, 1, 3]);

    assert_eq!(Scoring::new(TieRule::Sticky).adjudicate(&scores), Outcome::Tie);
    assert_eq!(
        Scoring::new(TieRule::StrictMaximum).adjudicate(&scores),
        Outcome::Winner(Standing {
            piece: PieceId::Wolf(WolfId::new(1)),
            score: 3,
        })
    );
}

#[test]
fn strict_rule_still_ties_on_shared_maximum() {
    let scoring = Scoring::new(TieRule::StrictMaximum);
    assert_eq!(scoring.adjudicate(&standings(&[0, 2, 1, 2])), Outcome::Tie);
    assert_eq!(scoring.rule(), TieRule::StrictMaximum);
}

#[test]
fn scoreless_game_is_a_tie() {
    assert_eq!(Scoring::default().adjudicate(&standings(&[0, 0])), Outcome::Tie);
    assert_eq!(Scoring::default().adjudicate(&[]), Outcome::Tie);
}

#[test]
fn reports_scores_straight_from_the_world() {
    let world = sheepfold_world::World::from_layout(
        sheepfold_core::BoardDimensions::square(7).expect("valid dimensions"),
        Layout {
            bear: Position::new(6, 0),
            wolves: vec![Position::new(6, 3), Position::new(6, 5)],
            sheep: vec![Position::new(2, 2)],
            shepherd: None,
        },
    )
    .expect("valid layout");

    let report = Scoring::default().report(&sheepfold_world::query::standings(&world));

    assert_eq!(report.standings.len(), 3);
    assert_eq!(report.standings[0].piece, PieceId::Bear);
    assert_eq!(report.outcome, Outcome::Tie);
}
