use scorebook::{
    apply_at, DeliveryInput, InningsEnd, InningsState, MatchContext, Player, ScoreError, Team,
    WicketType,
};

fn team(id: &str, name: &str, size: u32) -> Team {
    let players = (1..=size)
        .map(|n| Player::new(format!("{}{}", id, n), format!("{} {}", name, n), n))
        .collect();
    Team::with_roster_order(id, name, players).unwrap()
}

fn start() -> InningsState {
    let batting = team("a", "Alpha", 11);
    let bowling = team("b", "Beta", 11);
    InningsState::start(&batting, &bowling, vec!["b10".into(), "b11".into()]).unwrap()
}

fn ball(state: &InningsState, ctx: &MatchContext, input: DeliveryInput) -> InningsState {
    apply_at(state, ctx, input, 0).unwrap()
}

#[test]
fn runs_off_the_bat_credit_the_striker() {
    let ctx = MatchContext::first_innings(20);
    let s = ball(&start(), &ctx, DeliveryInput::runs(4));
    assert_eq!(s.runs, 4);
    assert_eq!(s.extras, 0);
    assert_eq!(s.current_ball, 1);
    let d = &s.deliveries[0];
    assert_eq!(d.batsman_id, "a1");
    assert_eq!(d.bowler_id, "b10");
    assert_eq!((d.runs, d.extra_runs, d.total_runs), (4, 0, 4));
    assert_eq!(d.ball_number, 1);
    assert_eq!(s.striker_idx, 0);
}

#[test]
fn wide_with_runs_adds_penalty_and_is_not_a_legal_ball() {
    let ctx = MatchContext::first_innings(20);
    let s = ball(&start(), &ctx, DeliveryInput::wide(2));
    assert_eq!(s.runs, 3);
    assert_eq!(s.extras, 3);
    assert_eq!(s.legal_balls(), 0);
    let d = &s.deliveries[0];
    assert_eq!((d.runs, d.extra_runs, d.total_runs), (0, 3, 3));
    assert!(!d.is_legal());
    assert_eq!(d.code(), "3wd");
}

#[test]
fn no_ball_credits_bat_runs_and_grants_free_hit() {
    let ctx = MatchContext::first_innings(20);
    let s = ball(&start(), &ctx, DeliveryInput::no_ball(4));
    assert_eq!(s.runs, 5);
    assert_eq!(s.extras, 1);
    assert_eq!(s.deliveries[0].runs, 4);
    assert_eq!(s.current_ball, 0);
    assert!(s.next_ball_is_free_hit);
}

#[test]
fn byes_and_leg_byes_are_extras() {
    let ctx = MatchContext::first_innings(20);
    let s = ball(&start(), &ctx, DeliveryInput::bye(2));
    let s = ball(&s, &ctx, DeliveryInput::leg_bye(4));
    assert_eq!(s.runs, 6);
    assert_eq!(s.extras, 6);
    assert_eq!(s.legal_balls(), 2);
    assert!(s.deliveries.iter().all(|d| d.runs == 0));
}

#[test]
fn odd_runs_rotate_strike() {
    let ctx = MatchContext::first_innings(20);
    let s = ball(&start(), &ctx, DeliveryInput::runs(1));
    assert_eq!(s.striker_id().map(String::as_str), Some("a2"));
    assert_eq!(s.non_striker_id().map(String::as_str), Some("a1"));
    let s = ball(&s, &ctx, DeliveryInput::runs(3));
    assert_eq!(s.striker_id().map(String::as_str), Some("a1"));
    let s = ball(&s, &ctx, DeliveryInput::runs(2));
    assert_eq!(s.striker_id().map(String::as_str), Some("a1"));
}

#[test]
fn only_legal_balls_rotate_on_parity() {
    let ctx = MatchContext::first_innings(20);
    for input in [
        DeliveryInput::wide(1),
        DeliveryInput::no_ball(1),
        DeliveryInput::no_ball(3),
        DeliveryInput::bye(1),
        DeliveryInput::leg_bye(3),
    ] {
        let s = ball(&start(), &ctx, input);
        assert_eq!(s.striker_id().map(String::as_str), Some("a1"), "{:?}", input);
        assert_eq!(s.non_striker_id().map(String::as_str), Some("a2"), "{:?}", input);
    }
}

#[test]
fn end_of_over_changes_bowler_and_ends() {
    let ctx = MatchContext::first_innings(20);
    let mut s = start();
    for _ in 0..6 {
        s = ball(&s, &ctx, DeliveryInput::dot());
    }
    assert_eq!((s.current_over, s.current_ball), (1, 0));
    assert_eq!(s.bowler_id().map(String::as_str), Some("b11"));
    assert_eq!(s.striker_idx, 1);
    assert_eq!(s.non_striker_idx, 0);
    // the rotation wraps round
    for _ in 0..6 {
        s = ball(&s, &ctx, DeliveryInput::dot());
    }
    assert_eq!(s.bowler_id().map(String::as_str), Some("b10"));
}

#[test]
fn wides_and_no_balls_do_not_end_the_over() {
    let ctx = MatchContext::first_innings(20);
    let mut s = start();
    for _ in 0..5 {
        s = ball(&s, &ctx, DeliveryInput::dot());
    }
    s = ball(&s, &ctx, DeliveryInput::wide(0));
    s = ball(&s, &ctx, DeliveryInput::no_ball(0));
    assert_eq!((s.current_over, s.current_ball), (0, 5));
    assert_eq!(s.this_over().count(), 7);
    s = ball(&s, &ctx, DeliveryInput::dot());
    assert_eq!((s.current_over, s.current_ball), (1, 0));
}

#[test]
fn free_hit_only_allows_run_out() {
    let ctx = MatchContext::first_innings(20);
    let s = ball(&start(), &ctx, DeliveryInput::no_ball(0));
    let err = apply_at(&s, &ctx, DeliveryInput::wicket(WicketType::Bowled), 0).unwrap_err();
    assert!(matches!(err, ScoreError::InvalidDelivery(_)));
    assert!(s.next_ball_is_free_hit);

    let out = ball(&s, &ctx, DeliveryInput::runs(1).with_wicket(WicketType::RunOut));
    assert_eq!(out.wickets, 1);
    assert!(out.deliveries[1].is_free_hit);
    assert!(!out.next_ball_is_free_hit);
}

#[test]
fn free_hit_carries_over_a_wide() {
    let ctx = MatchContext::first_innings(20);
    let s = ball(&start(), &ctx, DeliveryInput::no_ball(0));
    let s = ball(&s, &ctx, DeliveryInput::wide(0));
    assert!(s.next_ball_is_free_hit);
    let s = ball(&s, &ctx, DeliveryInput::dot());
    assert!(!s.next_ball_is_free_hit);
}

#[test]
fn wicket_brings_in_next_batsman() {
    let ctx = MatchContext::first_innings(20);
    let s = ball(&start(), &ctx, DeliveryInput::wicket(WicketType::Caught));
    assert_eq!(s.wickets, 1);
    assert_eq!(s.striker_id().map(String::as_str), Some("a3"));
    assert_eq!(s.non_striker_id().map(String::as_str), Some("a2"));
    let d = &s.deliveries[0];
    assert_eq!(d.dismissed_batsman_id.as_deref(), Some("a1"));
    assert_eq!(d.wicket_type, Some(WicketType::Caught));
    assert_eq!(d.code(), "W");
}

#[test]
fn invalid_inputs_are_rejected() {
    let ctx = MatchContext::first_innings(20);
    let s = start();
    let bad = [
        DeliveryInput::runs(7),
        DeliveryInput {
            is_wicket: true,
            ..DeliveryInput::default()
        },
        DeliveryInput {
            is_wide: true,
            is_no_ball: true,
            ..DeliveryInput::default()
        },
        DeliveryInput {
            is_bye: true,
            is_wide: true,
            ..DeliveryInput::default()
        },
        DeliveryInput {
            is_bye: true,
            is_leg_bye: true,
            ..DeliveryInput::default()
        },
    ];
    for input in bad {
        let err = apply_at(&s, &ctx, input, 0).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidDelivery(_)), "{:?}", input);
    }
}

#[test]
fn tenth_wicket_ends_the_innings() {
    let ctx = MatchContext::first_innings(20);
    let mut s = start();
    for _ in 0..9 {
        s = ball(&s, &ctx, DeliveryInput::wicket(WicketType::Bowled));
    }
    assert_eq!(s.wickets, 9);
    assert!(!s.is_over(&ctx));
    s = ball(&s, &ctx, DeliveryInput::wicket(WicketType::Bowled));
    assert_eq!(s.end(&ctx), Some(InningsEnd::AllOut));
    let err = apply_at(&s, &ctx, DeliveryInput::dot(), 0).unwrap_err();
    assert_eq!(err, ScoreError::InningsOver(InningsEnd::AllOut));
}

#[test]
fn short_batting_order_is_all_out_early() {
    let ctx = MatchContext::first_innings(20);
    let batting = team("a", "Alpha", 3);
    let bowling = team("b", "Beta", 11);
    let mut s = InningsState::start(&batting, &bowling, vec!["b1".into()]).unwrap();
    assert_eq!(s.wicket_limit(), 2);
    s = ball(&s, &ctx, DeliveryInput::wicket(WicketType::Lbw));
    assert!(!s.is_over(&ctx));
    s = ball(&s, &ctx, DeliveryInput::wicket(WicketType::Stumped));
    assert_eq!(s.end(&ctx), Some(InningsEnd::AllOut));
}

#[test]
fn passing_the_target_ends_the_chase() {
    let ctx = MatchContext::chase(20, 10);
    assert_eq!(ctx.target(), Some(11));
    let s = ball(&start(), &ctx, DeliveryInput::runs(6));
    let s = ball(&s, &ctx, DeliveryInput::runs(4));
    assert_eq!(s.runs_required(&ctx), Some(1));
    assert!(!s.is_over(&ctx));
    let s = ball(&s, &ctx, DeliveryInput::wide(0));
    assert_eq!(s.end(&ctx), Some(InningsEnd::TargetAchieved));
    let err = apply_at(&s, &ctx, DeliveryInput::dot(), 0).unwrap_err();
    assert_eq!(err, ScoreError::InningsOver(InningsEnd::TargetAchieved));
}

#[test]
fn last_legal_ball_completes_the_overs() {
    let ctx = MatchContext::first_innings(1);
    let mut s = start();
    for _ in 0..6 {
        assert!(!s.is_over(&ctx));
        s = ball(&s, &ctx, DeliveryInput::runs(2));
    }
    assert_eq!(s.end(&ctx), Some(InningsEnd::OversComplete));
    assert_eq!(s.balls_remaining(&ctx), 0);
}

#[test]
fn rejected_ball_leaves_state_untouched() {
    let ctx = MatchContext::first_innings(20);
    let s = ball(&start(), &ctx, DeliveryInput::runs(2));
    let before = s.clone();
    assert!(apply_at(&s, &ctx, DeliveryInput::runs(9), 0).is_err());
    assert_eq!(s, before);
}

#[test]
fn manual_strike_and_bowler_changes() {
    let s = start();
    let swapped = s.rotate_strike();
    assert_eq!(swapped.striker_idx, 1);
    assert_eq!(swapped.non_striker_idx, 0);
    assert_eq!(s.striker_idx, 0);
    let next = s.advance_bowler().advance_bowler();
    assert_eq!(next.bowler_idx, 0);
    assert_eq!(s.advance_bowler().bowler().map(|p| p.name.as_str()), Some("Beta 11"));
}

#[test]
fn run_rates_follow_the_chase() {
    let ctx = MatchContext::chase(2, 20);
    let mut s = start();
    for _ in 0..6 {
        s = ball(&s, &ctx, DeliveryInput::runs(1));
    }
    assert!((s.run_rate() - 6.0).abs() < 1e-9);
    assert_eq!(s.runs_required(&ctx), Some(15));
    let rrr = s.required_run_rate(&ctx).unwrap();
    assert!((rrr - 15.0).abs() < 1e-9);
    assert_eq!(s.recent(4).len(), 4);
    assert_eq!(s.recent(50).len(), 6);
}
