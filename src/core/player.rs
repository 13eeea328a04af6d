use crate::core::money::round_to_cents;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique, stable identifier for a player at the table.
///
/// Identity survives renames-in-spirit (display names are only required to
/// be unique case-insensitively); every ledger operation addresses players
/// by id, while presentation layers resolve names to ids.
///
/// # Examples
///
/// ```
/// use potsplit::core::player::PlayerId;
///
/// let a = PlayerId::new();
/// let b = PlayerId::new();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing identifier (used when restoring persisted state).
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant in the cash pool: their buy-ins and final payout.
///
/// `total_buy_in` is derived state, the rounded sum of the initial buy-in
/// and every rebuy, and is recomputed whenever a rebuy lands. It is never
/// mutated independently.
///
/// # Examples
///
/// ```
/// use potsplit::core::player::Player;
/// use rust_decimal_macros::dec;
///
/// let mut alice = Player::new("Alice", dec!(50));
/// alice.add_rebuy(dec!(20));
/// alice.set_payout(dec!(100));
///
/// assert_eq!(alice.total_buy_in(), dec!(70));
/// assert_eq!(alice.net_result(), dec!(30));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    id: PlayerId,
    name: String,
    buy_in: Decimal,
    additional_buy_ins: Vec<Decimal>,
    total_buy_in: Decimal,
    payout: Decimal,
}

impl Player {
    /// Create a player with an initial buy-in.
    ///
    /// The buy-in is rounded to cents on entry. Name and amount validation
    /// against the rest of the table (uniqueness, emptiness) belongs to the
    /// session; this constructor only rejects what can never be valid.
    ///
    /// # Panics
    ///
    /// Panics if `buy_in` is not positive.
    pub fn new(name: impl Into<String>, buy_in: Decimal) -> Self {
        assert!(
            buy_in > Decimal::ZERO,
            "buy-in must be positive, got {}",
            buy_in
        );
        let buy_in = round_to_cents(buy_in);
        Self {
            id: PlayerId::new(),
            name: name.into(),
            buy_in,
            additional_buy_ins: Vec::new(),
            total_buy_in: buy_in,
            payout: Decimal::ZERO,
        }
    }

    /// Restore a player from persisted parts.
    ///
    /// The stored total is deliberately ignored: `total_buy_in` is derived
    /// state and is recomputed from the parts on every load.
    pub fn from_parts(
        id: PlayerId,
        name: impl Into<String>,
        buy_in: Decimal,
        additional_buy_ins: Vec<Decimal>,
        payout: Decimal,
    ) -> Self {
        let mut player = Self {
            id,
            name: name.into(),
            buy_in,
            additional_buy_ins,
            total_buy_in: Decimal::ZERO,
            payout: payout.max(Decimal::ZERO),
        };
        player.recompute_total();
        player
    }

    /// Record an additional buy-in (a rebuy) and recompute the total.
    ///
    /// The amount is rounded to cents on entry, and the running total is
    /// rounded again after summation, so repeated rebuys cannot accumulate
    /// sub-cent drift.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive.
    pub fn add_rebuy(&mut self, amount: Decimal) {
        assert!(
            amount > Decimal::ZERO,
            "rebuy must be positive, got {}",
            amount
        );
        self.additional_buy_ins.push(round_to_cents(amount));
        self.recompute_total();
    }

    /// Set the final payout. Negative values clamp to zero; payouts are
    /// stored as entered and only rounded when aggregated.
    pub fn set_payout(&mut self, amount: Decimal) {
        self.payout = amount.max(Decimal::ZERO);
    }

    fn recompute_total(&mut self) {
        let rebuys: Decimal = self.additional_buy_ins.iter().sum();
        self.total_buy_in = round_to_cents(self.buy_in + rebuys);
    }

    // --- Accessors ---

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn buy_in(&self) -> Decimal {
        self.buy_in
    }

    pub fn additional_buy_ins(&self) -> &[Decimal] {
        &self.additional_buy_ins
    }

    pub fn total_buy_in(&self) -> Decimal {
        self.total_buy_in
    }

    pub fn payout(&self) -> Decimal {
        self.payout
    }

    /// Net position: payout minus total buy-in, rounded to cents.
    /// Positive means the pool owes the player (creditor); negative means
    /// the player owes the pool (debtor).
    pub fn net_result(&self) -> Decimal {
        round_to_cents(self.payout - self.total_buy_in)
    }
}
