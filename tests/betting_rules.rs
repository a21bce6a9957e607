use holdem_rs::player::PlayerStatus;
use holdem_rs::round::{
    ActionError, Phase, PlayerAction, RoundController, TableConfig,
};
use holdem_rs::sources::{drive_hand, CallingSource, NullSink};

fn table(n: usize, stack: u64) -> RoundController {
    RoundController::new(TableConfig::default(), n, stack)
}

fn bank(rc: &RoundController) -> u64 {
    rc.players().iter().map(|p| p.chips()).sum::<u64>() + rc.pot_total()
}

#[test]
fn a_bet_of_30_into_a_20_bet_is_rejected_but_40_is_accepted() {
    let mut rc = table(4, 1000);
    rc.start_hand_seeded(31).unwrap();
    assert_eq!(rc.current_highest_bet(), 20);

    let seat = rc.seat_to_act().unwrap();
    assert_eq!(
        rc.submit_action(seat, PlayerAction::Bet(30)),
        Err(ActionError::BetBelowMinimum { min: 40, got: 30 })
    );
    assert_eq!(rc.seat_to_act(), Some(seat), "turn order holds on rejection");

    rc.submit_action(seat, PlayerAction::Bet(40)).unwrap();
    assert_eq!(rc.current_highest_bet(), 40, "the raise becomes the bet to match");
}

#[test]
fn fifteen_chips_facing_a_fifty_call_go_all_in() {
    // Five seats; the short stack acts right after the opener.
    let stacks = [1000, 1000, 1000, 1000, 15];
    let mut rc = RoundController::with_stacks(TableConfig::default(), &stacks);
    rc.start_hand_seeded(32).unwrap();
    assert_eq!(rc.seat_to_act(), Some(3));

    rc.submit_action(3, PlayerAction::Bet(50)).unwrap();
    let out = rc.submit_action(4, PlayerAction::Call).unwrap();
    assert_eq!(out.chips_paid, 15, "all-in for the remaining stack, not rejected");
    assert!(out.all_in);
    assert_eq!(rc.players()[4].status(), PlayerStatus::AllIn);
}

#[test]
fn all_in_is_always_legal_even_below_the_minimum_raise() {
    let stacks = [1000, 1000, 1000, 25];
    let mut rc = RoundController::with_stacks(TableConfig::default(), &stacks);
    rc.start_hand_seeded(33).unwrap();
    assert_eq!(rc.seat_to_act(), Some(3));
    // 25 is above the blind but below the 40 minimum raise; as an all-in it
    // stands and becomes the bet to match.
    let out = rc.submit_action(3, PlayerAction::AllIn).unwrap();
    assert_eq!(out.chips_paid, 25);
    assert_eq!(rc.current_highest_bet(), 25);
}

#[test]
fn fold_out_settles_immediately_and_deals_nothing_more() {
    let mut rc = table(5, 600);
    rc.start_hand_seeded(34).unwrap();
    let before = bank(&rc);
    while rc.phase() == Phase::PreflopBetting {
        let seat = rc.seat_to_act().unwrap();
        rc.submit_action(seat, PlayerAction::Fold).unwrap();
    }
    assert_eq!(rc.phase(), Phase::Settled);
    assert!(rc.community().is_empty());
    assert_eq!(bank(&rc), before);
    let award = &rc.showdown_results()[0];
    assert_eq!(award.winners, vec![rc.big_blind_seat()]);
    assert_eq!(award.amount, 30);
}

#[test]
fn uneven_stacks_produce_layered_pots_and_conserve_chips() {
    let stacks = [30, 60, 1000];
    let mut rc = RoundController::with_stacks(TableConfig::default(), &stacks);
    rc.start_hand_seeded(35).unwrap();
    let before = bank(&rc);

    while let Some(seat) = rc.seat_to_act() {
        rc.submit_action(seat, PlayerAction::AllIn).unwrap();
    }
    assert_eq!(rc.phase(), Phase::Settled);
    assert_eq!(rc.community().len(), 5, "contested all-in runs the board out");
    assert_eq!(bank(&rc), before);

    let paid: u64 = rc
        .showdown_results()
        .iter()
        .flat_map(|a| a.payouts.iter().map(|&(_, amount)| amount))
        .sum();
    // Every contributed chip is paid back out, the deep stack's uncalled
    // excess included.
    assert_eq!(paid, 30 + 60 + 1000);
}

#[test]
fn many_hands_of_calling_stations_never_leak_chips() {
    let mut rc = table(4, 500);
    for seed in 40..48 {
        if rc.players().iter().filter(|p| p.chips() > 0).count() < 2 {
            break;
        }
        rc.start_hand_seeded(seed).unwrap();
        drive_hand(&mut rc, &mut CallingSource, &mut NullSink).unwrap();
        assert_eq!(rc.phase(), Phase::Settled);
        assert_eq!(bank(&rc), 2000, "chips are conserved across hands");
    }
}

#[test]
fn queries_expose_public_state_during_a_street() {
    let mut rc = table(3, 1000);
    rc.start_hand_seeded(41).unwrap();

    assert_eq!(rc.pot_total(), 30);
    assert_eq!(rc.current_highest_bet(), 20);
    assert!(rc.community().is_empty());

    let seat = rc.seat_to_act().unwrap();
    assert_eq!(rc.to_call(seat), 20);
    assert_eq!(rc.min_bet(), 40);

    let pots = rc.pots();
    assert_eq!(pots.len(), 1);
    assert_eq!(pots[0].amount, 30);

    for p in rc.players() {
        assert!(p.chips() <= 1000);
        assert!(!p.has_folded());
    }
}
