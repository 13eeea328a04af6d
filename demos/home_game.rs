//! A scripted Friday-night cash game, from first buy-in to settlement.
//!
//! Shows the full session lifecycle: seating players, starting play,
//! rebuys, payouts, and the final transfer list.

use potsplit::core::session::{Session, SessionError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn main() -> Result<(), SessionError> {
    println!("╔══════════════════════════════╗");
    println!("║  potsplit: Friday Home Game  ║");
    println!("╚══════════════════════════════╝\n");

    // --- Collecting buy-ins ---
    println!("━━━ Buying In ━━━\n");

    let mut session = Session::new();
    let alice = session.add_player("Alice", dec!(50))?;
    let bob = session.add_player("Bob", dec!(50))?;
    let carol = session.add_player("Carol", dec!(50))?;
    let dave = session.add_player("Dave", dec!(50))?;

    for player in session.players() {
        println!("  {:<8} buys in for ${:.2}", player.name(), player.buy_in());
    }

    session.start_game()?;
    println!("\nGame on: ${:.2} on the table.\n", session.pot());

    // --- Mid-game rebuys ---
    println!("━━━ Rebuys ━━━\n");

    session.add_rebuy(bob, dec!(50))?;
    session.add_rebuy(dave, dec!(25))?;
    println!("  Bob reloads for $50.00");
    println!("  Dave tops up for $25.00");
    println!("\nPot is now ${:.2}.\n", session.pot());

    // --- Cashing out ---
    println!("━━━ Cashing Out ━━━\n");

    session.set_payout(alice, "190")?;
    session.set_payout(bob, "0")?;
    session.set_payout(carol, "50")?;
    session.set_payout(dave, "35")?;

    for player in session.players() {
        println!(
            "  {:<8} walks with ${:.2}",
            player.name(),
            player.payout()
        );
    }
    println!();

    // --- Settlement ---
    let report = session.settle()?;
    println!("{}", report);

    println!("━━━ Net Results ━━━\n");
    for player in session.players() {
        let net = player.net_result();
        let status = if net > Decimal::ZERO {
            "WINNER"
        } else if net < Decimal::ZERO {
            "LOSER"
        } else {
            "EVEN"
        };
        let signed = if net < Decimal::ZERO {
            format!("-${:.2}", net.abs())
        } else {
            format!("+${:.2}", net)
        };
        println!("  {:<8} {:>10}  [{}]", player.name(), signed, status);
    }

    println!("\n━━━ Interpretation ━━━\n");
    println!("  Two payments square the whole table. Carol broke even, so she");
    println!("  never appears on the settlement sheet.");

    Ok(())
}
