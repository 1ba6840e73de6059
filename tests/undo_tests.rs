use scorebook::{
    apply_at, undo, DeliveryInput, InningsState, MatchContext, Player, ScoreError, Team,
    WicketType,
};

fn team(id: &str) -> Team {
    let players = (1..=11)
        .map(|n| Player::new(format!("{}{}", id, n), format!("Player {}", n), n))
        .collect();
    Team::with_roster_order(id, id, players).unwrap()
}

fn start() -> InningsState {
    InningsState::start(&team("a"), &team("b"), vec!["b10".into(), "b11".into()]).unwrap()
}

fn play(state: &InningsState, inputs: &[DeliveryInput]) -> InningsState {
    let ctx = MatchContext::first_innings(20);
    inputs
        .iter()
        .fold(state.clone(), |s, input| apply_at(&s, &ctx, *input, 0).unwrap())
}

#[test]
fn undo_on_empty_log_fails() {
    assert_eq!(undo(&start()).unwrap_err(), ScoreError::NothingToUndo);
}

#[test]
fn undo_of_a_dot_ball_restores_the_state_exactly() {
    let s = play(&start(), &[DeliveryInput::runs(2)]);
    let next = play(&s, &[DeliveryInput::dot()]);
    assert_eq!(undo(&next).unwrap(), s);
}

#[test]
fn undo_removes_extras() {
    let s = play(&start(), &[DeliveryInput::runs(4), DeliveryInput::wide(2)]);
    assert_eq!((s.runs, s.extras), (7, 3));
    let s = undo(&s).unwrap();
    assert_eq!((s.runs, s.extras), (4, 0));
    assert_eq!(s.deliveries.len(), 1);
}

#[test]
fn undo_of_wicket_restores_wicket_count() {
    let s = play(&start(), &[DeliveryInput::wicket(WicketType::Bowled)]);
    assert_eq!(s.wickets, 1);
    let s = undo(&s).unwrap();
    assert_eq!(s.wickets, 0);
    assert_eq!(s.legal_balls(), 0);
}

#[test]
fn undo_across_over_boundary() {
    let s = play(&start(), &[DeliveryInput::dot(); 6]);
    assert_eq!((s.current_over, s.current_ball), (1, 0));
    let s = undo(&s).unwrap();
    assert_eq!((s.current_over, s.current_ball), (0, 5));
    // ends and bowler stay as they were after the over
    assert_eq!(s.bowler_idx, 1);
    assert_eq!(s.striker_idx, 1);
}

#[test]
fn undo_of_no_ball_clears_free_hit() {
    let s = play(&start(), &[DeliveryInput::no_ball(1)]);
    assert!(s.next_ball_is_free_hit);
    let s = undo(&s).unwrap();
    assert!(!s.next_ball_is_free_hit);
    assert_eq!(s.runs, 0);
}

#[test]
fn repeated_undo_empties_the_log() {
    let mut s = play(
        &start(),
        &[
            DeliveryInput::runs(1),
            DeliveryInput::bye(2),
            DeliveryInput::no_ball(0),
            DeliveryInput::runs(6),
        ],
    );
    while !s.deliveries.is_empty() {
        s = undo(&s).unwrap();
    }
    assert_eq!((s.runs, s.extras, s.wickets), (0, 0, 0));
    assert_eq!(s.legal_balls(), 0);
    assert!(undo(&s).is_err());
}
