use crate::core::player::{Player, PlayerId};
use crate::core::session::{Phase, Session};
use crate::settlement::transfer::Transfer;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stored form of a single player.
///
/// `totalBuyIn` is written for the benefit of anyone reading the file,
/// but it is derived data: restoring recomputes it from the buy-in and
/// rebuy list, so a stale or hand-edited total cannot poison a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    #[serde(default)]
    pub id: PlayerId,
    pub name: String,
    pub buy_in: Decimal,
    #[serde(default)]
    pub additional_buy_ins: Vec<Decimal>,
    #[serde(default)]
    pub total_buy_in: Decimal,
    #[serde(default)]
    pub payout: Decimal,
}

impl PlayerRecord {
    fn capture(player: &Player) -> Self {
        Self {
            id: player.id(),
            name: player.name().to_string(),
            buy_in: player.buy_in(),
            additional_buy_ins: player.additional_buy_ins().to_vec(),
            total_buy_in: player.total_buy_in(),
            payout: player.payout(),
        }
    }

    fn restore(self) -> Player {
        Player::from_parts(
            self.id,
            self.name,
            self.buy_in,
            self.additional_buy_ins,
            self.payout,
        )
    }
}

/// One saved session, exactly as it lands on disk.
///
/// The lifecycle phase is flattened into two booleans so the file stays
/// readable: `gameStarted`/`gameEnded` false/false while collecting,
/// true/false in play, true/true once settled. `gameEnded` wins if the
/// pair is inconsistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
    #[serde(default)]
    pub game_started: bool,
    #[serde(default)]
    pub game_ended: bool,
    #[serde(default)]
    pub settlements: Vec<Transfer>,
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
}

impl SessionSnapshot {
    /// Snapshot a live session, stamping the current time.
    pub fn capture(session: &Session) -> Self {
        let (game_started, game_ended) = match session.phase() {
            Phase::Collecting => (false, false),
            Phase::Active => (true, false),
            Phase::Settled => (true, true),
        };
        Self {
            players: session.players().iter().map(PlayerRecord::capture).collect(),
            game_started,
            game_ended,
            settlements: session.settlements().to_vec(),
            saved_at: Utc::now(),
        }
    }

    /// Rebuild the live session this snapshot describes.
    pub fn restore(self) -> Session {
        let phase = match (self.game_started, self.game_ended) {
            (_, true) => Phase::Settled,
            (true, false) => Phase::Active,
            (false, false) => Phase::Collecting,
        };
        let players: Vec<Player> = self.players.into_iter().map(PlayerRecord::restore).collect();
        Session::from_parts(players, phase, self.settlements)
    }
}
