use crate::core::money::CENT;
use crate::core::player::Player;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed payment from one player to another.
///
/// Transfers address players by display name (the settlement sheet is read
/// by people, not machines) and always carry a strictly positive amount
/// rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// The debtor: who pays.
    pub from: String,
    /// The creditor: who receives.
    pub to: String,
    /// Amount in currency units, strictly positive, rounded to cents.
    pub amount: Decimal,
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} ${:.2}", self.from, self.to, self.amount)
    }
}

/// The outcome of settling a balanced table: the ordered transfer list
/// plus the validated totals it was computed from.
///
/// Produced exactly once per settlement; an empty transfer list is a valid
/// outcome (everyone broke even), not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementReport {
    transfers: Vec<Transfer>,
    total_buy_ins: Decimal,
    total_payouts: Decimal,
}

impl SettlementReport {
    pub fn new(transfers: Vec<Transfer>, total_buy_ins: Decimal, total_payouts: Decimal) -> Self {
        Self {
            transfers,
            total_buy_ins,
            total_payouts,
        }
    }

    /// The transfers, in emission order (largest matches first).
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Consume the report, keeping only the transfers.
    pub fn into_transfers(self) -> Vec<Transfer> {
        self.transfers
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers.len()
    }

    /// True when nobody owes anybody: every player broke even.
    pub fn is_even(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Total buy-ins the settlement was validated against.
    pub fn total_buy_ins(&self) -> Decimal {
        self.total_buy_ins
    }

    /// Total payouts the settlement was validated against.
    pub fn total_payouts(&self) -> Decimal {
        self.total_payouts
    }

    /// Net amount this settlement moves toward `name`: received minus paid.
    ///
    /// For a conserving settlement this equals the player's net result
    /// (within the one-cent tolerance).
    pub fn net_for(&self, name: &str) -> Decimal {
        let received: Decimal = self
            .transfers
            .iter()
            .filter(|t| t.to == name)
            .map(|t| t.amount)
            .sum();
        let paid: Decimal = self
            .transfers
            .iter()
            .filter(|t| t.from == name)
            .map(|t| t.amount)
            .sum();
        received - paid
    }

    /// Verify conservation against the roster the report was computed from:
    /// each player's transfer flow must match their net position to within
    /// one cent.
    pub fn is_conserved(&self, players: &[Player]) -> bool {
        players
            .iter()
            .all(|p| (self.net_for(p.name()) - p.net_result()).abs() <= CENT)
    }
}

impl fmt::Display for SettlementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Settlement ===")?;
        writeln!(f, "Total buy-ins:  ${:.2}", self.total_buy_ins)?;
        writeln!(f, "Total payouts:  ${:.2}", self.total_payouts)?;
        writeln!(f, "Transfers:      {}", self.transfers.len())?;
        if self.transfers.is_empty() {
            writeln!(f, "\nNo transfers needed. Everyone broke even.")?;
        } else {
            writeln!(f)?;
            for transfer in &self.transfers {
                writeln!(
                    f,
                    "  {:<12} -> {:<12} ${:>10.2}",
                    transfer.from, transfer.to, transfer.amount
                )?;
            }
        }
        Ok(())
    }
}
