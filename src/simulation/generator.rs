//! Random table generation.
//!
//! Builds balanced, in-play sessions for demos, stress runs and the
//! `generate` command. Payouts always redistribute exactly what was
//! bought in, so a generated table is guaranteed to settle.

use crate::core::money::CENT;
use crate::core::player::Player;
use crate::core::session::{Phase, Session};
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};

/// Configuration for generating a random table.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Number of players seated.
    pub player_count: usize,
    /// Smallest initial buy-in.
    pub min_buy_in: Decimal,
    /// Largest initial buy-in.
    pub max_buy_in: Decimal,
    /// Chance that a given player rebuys once, in `0.0..=1.0`.
    pub rebuy_probability: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            player_count: 8,
            min_buy_in: Decimal::from(20),
            max_buy_in: Decimal::from(200),
            rebuy_probability: 0.3,
        }
    }
}

/// Generate a random in-play session with payouts already recorded.
///
/// The pot is split by random weights, with fractional cents floored so
/// the running total never overshoots; the last player takes whatever
/// remains. Total payouts therefore equal total buy-ins to the cent.
pub fn generate_random_table(config: &TableConfig) -> Session {
    assert!(config.player_count >= 2, "need at least 2 players");

    let mut rng = rand::thread_rng();

    let mut players: Vec<Player> = (0..config.player_count)
        .map(|i| {
            let name = format!("Player-{:02}", i + 1);
            let mut player = Player::new(name, random_amount(&mut rng, config));
            if rng.gen_bool(config.rebuy_probability) {
                player.add_rebuy(random_amount(&mut rng, config));
            }
            player
        })
        .collect();

    let pot: Decimal = players.iter().map(|p| p.total_buy_in()).sum();

    let weights: Vec<u64> = (0..players.len()).map(|_| rng.gen_range(1..=100)).collect();
    let total_weight: u64 = weights.iter().sum();

    let mut distributed = Decimal::ZERO;
    let last = players.len() - 1;
    for (i, player) in players.iter_mut().enumerate() {
        let payout = if i == last {
            pot - distributed
        } else {
            let share = pot * Decimal::from(weights[i]) / Decimal::from(total_weight);
            share.round_dp_with_strategy(2, RoundingStrategy::ToZero)
        };
        distributed += payout;
        player.set_payout(payout);
    }

    Session::from_parts(players, Phase::Active, Vec::new())
}

/// Random cent-resolution amount in the configured buy-in range.
fn random_amount(rng: &mut impl Rng, config: &TableConfig) -> Decimal {
    let min: f64 = config.min_buy_in.to_string().parse().unwrap_or(20.0);
    let max: f64 = config.max_buy_in.to_string().parse().unwrap_or(200.0);
    let amount = rng.gen_range(min..=max);
    Decimal::from_f64_retain(amount)
        .unwrap_or(Decimal::from(50))
        .round_dp(2)
        .max(CENT)
}
