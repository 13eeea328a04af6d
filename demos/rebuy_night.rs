//! Messy bookkeeping on a rebuy-heavy night.
//!
//! Shows the forgiving side of the ledger: payouts typed with typos and
//! sub-cent noise, an imbalance caught before anyone pays, and the
//! one-cent tolerance absorbing what rounding leaves behind.

use potsplit::core::session::{Session, SessionError};
use rust_decimal_macros::dec;

fn main() -> Result<(), SessionError> {
    println!("╔═══════════════════════════════╗");
    println!("║  potsplit: Messy Rebuy Night  ║");
    println!("╚═══════════════════════════════╝\n");

    let mut session = Session::new();
    let noah = session.add_player("Noah", dec!(40))?;
    let mia = session.add_player("Mia", dec!(40))?;
    let leo = session.add_player("Leo", dec!(40))?;
    session.start_game()?;
    session.add_rebuy(leo, dec!(20))?;

    println!("Noah and Mia are in for $40.00 each; Leo rebought, $60.00 total.");
    println!("Pot: ${:.2}\n", session.pot());

    // --- Payouts as actually typed at 1am ---
    println!("━━━ Payouts, As Typed ━━━\n");

    session.set_payout(noah, "93.335")?;
    session.set_payout(mia, "56.665")?;
    session.set_payout(leo, "oops")?;

    for player in session.players() {
        println!("  {:<6} recorded as ${}", player.name(), player.payout());
    }
    println!("\n  (\"oops\" does not parse, so Leo stands at zero.)\n");

    // --- First settlement attempt ---
    println!("━━━ First Attempt ━━━\n");

    match session.settle() {
        Ok(_) => println!("  Settled (unexpected!)"),
        Err(e) => println!("  Refused: {e}"),
    }
    println!("\n  Mia's payout was fat-fingered; the table does not balance,");
    println!("  so nothing was frozen and nothing was paid.\n");

    // --- Correct and settle ---
    println!("━━━ Corrected ━━━\n");

    session.set_payout(mia, "46.665")?;
    let report = session.settle()?;
    println!("{}", report);

    println!("━━━ Interpretation ━━━\n");
    println!("  Rounded to cents, Noah is owed $53.34 and Mia $6.67, one cent");
    println!("  more than Leo's $60.00 loss. The tolerance lets it settle; Mia");
    println!("  is short the cent nobody is going to chase.");

    Ok(())
}
