use potsplit::core::session::{Phase, Session, SessionError};
use potsplit::settlement::engine::SettlementEngine;
use potsplit::store::file_store::FileStore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Full session test: seat players, play, settle, verify every transfer.
#[test]
fn full_session_home_game() {
    let mut session = Session::new();

    let alice = session.add_player("Alice", dec!(50)).unwrap();
    let bob = session.add_player("Bob", dec!(50)).unwrap();
    let carol = session.add_player("Carol", dec!(50)).unwrap();
    let dave = session.add_player("Dave", dec!(50)).unwrap();
    assert_eq!(session.phase(), Phase::Collecting);
    assert_eq!(session.pot(), dec!(200));

    session.start_game().unwrap();
    session.add_rebuy(bob, dec!(50)).unwrap();
    assert_eq!(session.pot(), dec!(250));

    session.set_payout(alice, "120").unwrap();
    session.set_payout(bob, "30").unwrap();
    session.set_payout(carol, "50").unwrap();
    session.set_payout(dave, "50").unwrap();

    let report = session.settle().unwrap();
    assert_eq!(session.phase(), Phase::Settled);
    assert_eq!(report.total_buy_ins(), dec!(250));
    assert_eq!(report.total_payouts(), dec!(250));

    // Bob is the only loser; Carol and Dave broke even and stay out.
    assert_eq!(report.transfer_count(), 1);
    assert_eq!(report.transfers()[0].from, "Bob");
    assert_eq!(report.transfers()[0].to, "Alice");
    assert_eq!(report.transfers()[0].amount, dec!(70));
    assert!(report.is_conserved(session.players()));
    assert_eq!(session.settlements(), report.transfers());

    // Settled sessions are frozen.
    assert!(matches!(
        session.add_player("Eve", dec!(50)),
        Err(SessionError::PhaseMismatch { .. })
    ));
}

/// Two players, one pot swing: the loser pays the winner the difference.
#[test]
fn two_player_winner_paid_by_loser() {
    let mut session = Session::new();
    let alice = session.add_player("Alice", dec!(50)).unwrap();
    let bob = session.add_player("Bob", dec!(50)).unwrap();
    session.start_game().unwrap();
    session.set_payout(alice, "80").unwrap();
    session.set_payout(bob, "20").unwrap();

    let report = session.settle().unwrap();
    assert_eq!(report.transfer_count(), 1);
    assert_eq!(report.transfers()[0].from, "Bob");
    assert_eq!(report.transfers()[0].to, "Alice");
    assert_eq!(report.transfers()[0].amount, dec!(30));
}

/// Equal debts are matched in seating order, so the output is stable.
#[test]
fn equal_debts_pay_in_seating_order() {
    let mut session = Session::new();
    let alice = session.add_player("Alice", dec!(50)).unwrap();
    let bob = session.add_player("Bob", dec!(50)).unwrap();
    let carol = session.add_player("Carol", dec!(50)).unwrap();
    session.start_game().unwrap();
    session.set_payout(alice, "0").unwrap();
    session.set_payout(bob, "150").unwrap();
    session.set_payout(carol, "0").unwrap();

    let report = session.settle().unwrap();
    assert_eq!(report.transfer_count(), 2);
    assert_eq!(report.transfers()[0].from, "Alice");
    assert_eq!(report.transfers()[0].to, "Bob");
    assert_eq!(report.transfers()[0].amount, dec!(50));
    assert_eq!(report.transfers()[1].from, "Carol");
    assert_eq!(report.transfers()[1].to, "Bob");
    assert_eq!(report.transfers()[1].amount, dec!(50));
}

/// A table that does not balance refuses to settle and stays open for
/// corrections.
#[test]
fn imbalanced_table_keeps_session_open() {
    let mut session = Session::new();
    let alice = session.add_player("Alice", dec!(75)).unwrap();
    let bob = session.add_player("Bob", dec!(75)).unwrap();
    session.start_game().unwrap();
    session.set_payout(alice, "100").unwrap();
    session.set_payout(bob, "40").unwrap();

    let err = session.settle().unwrap_err();
    match err {
        SessionError::Imbalanced(e) => {
            assert_eq!(e.total_buy_ins, dec!(150));
            assert_eq!(e.total_payouts, dec!(140));
        }
        other => panic!("expected imbalance, got {other}"),
    }
    assert_eq!(session.phase(), Phase::Active);
    assert!(session.settlements().is_empty());

    // A fat-fingered payout is fixed and settlement goes through.
    session.set_payout(bob, "50").unwrap();
    let report = session.settle().unwrap();
    assert_eq!(session.phase(), Phase::Settled);
    assert_eq!(report.transfers()[0].from, "Bob");
    assert_eq!(report.transfers()[0].amount, dec!(25));
}

/// Someone joining after the cards are in the air is still settled.
#[test]
fn late_arrival_buys_in_mid_game() {
    let mut session = Session::new();
    let alice = session.add_player("Alice", dec!(50)).unwrap();
    let bob = session.add_player("Bob", dec!(50)).unwrap();
    session.start_game().unwrap();

    let carol = session.add_player("Carol", dec!(100)).unwrap();
    assert_eq!(session.pot(), dec!(200));

    session.set_payout(alice, "0").unwrap();
    session.set_payout(bob, "50").unwrap();
    session.set_payout(carol, "150").unwrap();

    let report = session.settle().unwrap();
    assert_eq!(report.transfer_count(), 1);
    assert_eq!(report.transfers()[0].from, "Alice");
    assert_eq!(report.transfers()[0].to, "Carol");
    assert_eq!(report.transfers()[0].amount, dec!(50));
}

/// Settlement reports serialize with their totals and transfer list.
#[test]
fn report_serializes() {
    let mut session = Session::new();
    let alice = session.add_player("Alice", dec!(50)).unwrap();
    let bob = session.add_player("Bob", dec!(50)).unwrap();
    session.start_game().unwrap();
    session.set_payout(alice, "70").unwrap();
    session.set_payout(bob, "30").unwrap();

    let report = session.settle().unwrap();
    let json = serde_json::to_string_pretty(&report).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed.get("total_buy_ins").is_some());
    assert!(parsed.get("total_payouts").is_some());
    assert_eq!(parsed["transfers"][0]["from"], "Bob");
    assert_eq!(parsed["transfers"][0]["to"], "Alice");
}

/// A mid-game session written to disk comes back whole and can finish.
#[test]
fn session_survives_disk_round_trip() {
    let path = std::env::temp_dir().join(format!("potsplit-it-{}.json", Uuid::new_v4()));
    let store = FileStore::new(&path);

    let mut session = Session::new();
    let alice = session.add_player("Alice", dec!(50)).unwrap();
    let bob = session.add_player("Bob", dec!(50)).unwrap();
    session.start_game().unwrap();
    session.add_rebuy(alice, dec!(25)).unwrap();
    session.set_payout(alice, "100").unwrap();
    store.try_save(&session).unwrap();

    let mut loaded = store.try_load().unwrap().unwrap();
    assert_eq!(loaded.phase(), Phase::Active);
    assert_eq!(loaded.player_count(), 2);

    let alice_loaded = loaded.player_by_name("Alice").unwrap();
    assert_eq!(alice_loaded.id(), alice);
    assert_eq!(alice_loaded.buy_in(), dec!(50));
    assert_eq!(alice_loaded.additional_buy_ins(), &[dec!(25)]);
    assert_eq!(alice_loaded.total_buy_in(), dec!(75));
    assert_eq!(alice_loaded.payout(), dec!(100));

    // The night goes on from where the file left off.
    loaded.set_payout(bob, "25").unwrap();
    let report = loaded.settle().unwrap();
    assert_eq!(report.transfers()[0].from, "Bob");
    assert_eq!(report.transfers()[0].to, "Alice");
    assert_eq!(report.transfers()[0].amount, dec!(25));

    std::fs::remove_file(&path).ok();
}

/// A settled session restores frozen, transfers and all.
#[test]
fn settled_session_restores_frozen() {
    let path = std::env::temp_dir().join(format!("potsplit-it-{}.json", Uuid::new_v4()));
    let store = FileStore::new(&path);

    let mut session = Session::new();
    let alice = session.add_player("Alice", dec!(50)).unwrap();
    let bob = session.add_player("Bob", dec!(50)).unwrap();
    session.start_game().unwrap();
    session.set_payout(alice, "80").unwrap();
    session.set_payout(bob, "20").unwrap();
    session.settle().unwrap();
    store.try_save(&session).unwrap();

    let mut loaded = store.try_load().unwrap().unwrap();
    assert_eq!(loaded.phase(), Phase::Settled);
    assert_eq!(loaded.settlements(), session.settlements());
    assert!(matches!(
        loaded.add_player("Eve", dec!(50)),
        Err(SessionError::PhaseMismatch { .. })
    ));

    std::fs::remove_file(&path).ok();
}

/// Reset wipes the session and its file; the next night starts clean.
#[test]
fn reset_starts_clean() {
    let path = std::env::temp_dir().join(format!("potsplit-it-{}.json", Uuid::new_v4()));
    let store = FileStore::new(&path);

    let mut session = Session::new();
    let alice = session.add_player("Alice", dec!(50)).unwrap();
    let bob = session.add_player("Bob", dec!(50)).unwrap();
    session.start_game().unwrap();
    session.set_payout(alice, "60").unwrap();
    session.set_payout(bob, "40").unwrap();
    session.settle().unwrap();
    store.try_save(&session).unwrap();
    assert!(path.exists());

    session.reset();
    store.clear();
    assert!(!path.exists());
    assert_eq!(session.phase(), Phase::Collecting);
    assert_eq!(session.player_count(), 0);
    assert_eq!(session.pot(), Decimal::ZERO);

    session.add_player("Fresh", dec!(10)).unwrap();
    assert_eq!(session.player_count(), 1);
}

/// Payouts entered with sub-cent noise still settle: rounding happens on
/// nets and totals, not on what was typed.
#[test]
fn sub_cent_noise_settles_cleanly() {
    let mut session = Session::new();
    let alice = session.add_player("Alice", dec!(50)).unwrap();
    let bob = session.add_player("Bob", dec!(50)).unwrap();
    let carol = session.add_player("Carol", dec!(50)).unwrap();
    session.start_game().unwrap();
    session.set_payout(alice, "66.666").unwrap();
    session.set_payout(bob, "50.001").unwrap();
    session.set_payout(carol, "33.333").unwrap();

    // Raw payouts sum to exactly 150.000, so the rounded total is 150.00.
    let report = session.settle().unwrap();
    assert!(report.is_conserved(session.players()));
    assert_eq!(report.transfer_count(), 1);
    assert_eq!(report.transfers()[0].from, "Carol");
    assert_eq!(report.transfers()[0].to, "Alice");
    assert_eq!(report.transfers()[0].amount, dec!(16.67));
}

/// The engine alone is reusable on any roster snapshot without touching
/// session state.
#[test]
fn engine_is_pure_over_roster() {
    let mut session = Session::new();
    let alice = session.add_player("Alice", dec!(50)).unwrap();
    let bob = session.add_player("Bob", dec!(50)).unwrap();
    session.start_game().unwrap();
    session.set_payout(alice, "70").unwrap();
    session.set_payout(bob, "30").unwrap();

    let first = SettlementEngine::settle(session.players()).unwrap();
    let second = SettlementEngine::settle(session.players()).unwrap();
    assert_eq!(first, second);
    assert_eq!(session.phase(), Phase::Active);
    assert!(session.settlements().is_empty());
}
