use crate::core::money::{round_to_cents, CENT};
use crate::core::player::Player;
use crate::core::session::{total_buy_ins, total_payouts};
use crate::settlement::transfer::{SettlementReport, Transfer};
use rust_decimal::Decimal;
use thiserror::Error;

/// The table does not balance: money paid out differs from money paid in
/// by more than one cent.
///
/// Carries both totals so callers can show the discrepancy instead of a
/// bare refusal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("total payouts (${total_payouts:.2}) must equal total buy-ins (${total_buy_ins:.2})")]
pub struct ImbalanceError {
    pub total_buy_ins: Decimal,
    pub total_payouts: Decimal,
}

/// An unsettled balance still owed by (or to) a player during matching.
#[derive(Debug, Clone)]
struct Outstanding {
    name: String,
    remaining: Decimal,
}

/// Greedy settlement: matches the largest debts against the largest
/// credits until every balance is exhausted.
///
/// The engine is a pure function of the roster. It never mutates players
/// and produces the same transfer list for the same roster every time.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Compute the transfer list that settles a balanced table.
    ///
    /// Fails with [`ImbalanceError`] when total payouts and total buy-ins
    /// disagree by more than one cent; no partial result is produced.
    ///
    /// Players whose net is below one cent in magnitude broke even and are
    /// left out entirely. The rest are matched largest-first, each pairing
    /// transferring the smaller of the two open balances, so at most
    /// `n - 1` transfers are emitted for `n` participants.
    pub fn settle(players: &[Player]) -> Result<SettlementReport, ImbalanceError> {
        let total_buy_ins = total_buy_ins(players);
        let total_payouts = total_payouts(players);
        if (total_payouts - total_buy_ins).abs() > CENT {
            return Err(ImbalanceError {
                total_buy_ins,
                total_payouts,
            });
        }

        let (mut debtors, mut creditors) = partition(players);
        // Stable sort: equal balances keep roster order.
        debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

        let mut transfers = Vec::new();
        let mut d = 0;
        let mut c = 0;
        while d < debtors.len() && c < creditors.len() {
            let amount = round_to_cents(debtors[d].remaining.min(creditors[c].remaining));
            transfers.push(Transfer {
                from: debtors[d].name.clone(),
                to: creditors[c].name.clone(),
                amount,
            });

            debtors[d].remaining = round_to_cents(debtors[d].remaining - amount);
            creditors[c].remaining = round_to_cents(creditors[c].remaining - amount);

            // Each match exhausts at least one side, so the loop advances.
            if debtors[d].remaining < CENT {
                d += 1;
            }
            if creditors[c].remaining < CENT {
                c += 1;
            }
        }

        Ok(SettlementReport::new(transfers, total_buy_ins, total_payouts))
    }
}

/// Split the roster into open debts and open credits, skipping anyone
/// whose net is within one cent of zero. Balances are stored as positive
/// magnitudes; direction lives in which list they joined.
fn partition(players: &[Player]) -> (Vec<Outstanding>, Vec<Outstanding>) {
    let mut debtors = Vec::new();
    let mut creditors = Vec::new();
    for player in players {
        let net = player.net_result();
        if net <= -CENT {
            debtors.push(Outstanding {
                name: player.name().to_string(),
                remaining: -net,
            });
        } else if net >= CENT {
            creditors.push(Outstanding {
                name: player.name().to_string(),
                remaining: net,
            });
        }
    }
    (debtors, creditors)
}
