use crate::core::money::{parse_payout, round_to_cents};
use crate::core::player::{Player, PlayerId};
use crate::settlement::engine::{ImbalanceError, SettlementEngine};
use crate::settlement::transfer::{SettlementReport, Transfer};
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Where a session is in its lifecycle.
///
/// Phases only move forward (`Collecting` -> `Active` -> `Settled`);
/// the sole way back is [`Session::reset`], which starts over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Taking down names and initial buy-ins. Play has not started.
    #[default]
    Collecting,
    /// The game is running: rebuys and payouts are being recorded.
    Active,
    /// Settled and frozen. Only a reset changes anything now.
    Settled,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Collecting => "collecting",
            Phase::Active => "active",
            Phase::Settled => "settled",
        };
        write!(f, "{s}")
    }
}

/// Errors arising from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("player name must not be empty")]
    EmptyName,
    #[error("a player named \"{0}\" is already at the table")]
    DuplicateName(String),
    #[error("amount must be positive, got {0}")]
    AmountNotPositive(Decimal),
    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),
    #[error("need at least 2 players to start, got {0}")]
    TooFewPlayers(usize),
    #[error("cannot {action} while the session is {phase}")]
    PhaseMismatch { action: &'static str, phase: Phase },
    #[error(transparent)]
    Imbalanced(#[from] ImbalanceError),
}

/// A single cash-game session: the roster, the lifecycle phase, and the
/// settlement once one has been computed.
///
/// The session is the in-memory book of record. Every amount that enters
/// it has already been rounded to cents (buy-ins, rebuys) or clamped
/// (payouts), so the sums it reports are reproducible.
#[derive(Debug, Clone, Default)]
pub struct Session {
    players: Vec<Player>,
    phase: Phase,
    settlements: Vec<Transfer>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassemble a session from stored state. Trusts the caller; used
    /// when restoring a saved session.
    pub fn from_parts(players: Vec<Player>, phase: Phase, settlements: Vec<Transfer>) -> Self {
        Self {
            players,
            phase,
            settlements,
        }
    }

    /// Seat a new player with their initial buy-in.
    ///
    /// Allowed while collecting and mid-game (late arrivals buy in at the
    /// table all the time), but not after settlement. Names are trimmed
    /// and must be unique, ignoring case.
    pub fn add_player(&mut self, name: &str, buy_in: Decimal) -> Result<PlayerId, SessionError> {
        if self.phase == Phase::Settled {
            return Err(SessionError::PhaseMismatch {
                action: "add a player",
                phase: self.phase,
            });
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if buy_in <= Decimal::ZERO {
            return Err(SessionError::AmountNotPositive(buy_in));
        }
        // Unicode case folding, not just ASCII: "Özil" and "özil" collide.
        let lowered = name.to_lowercase();
        if self
            .players
            .iter()
            .any(|p| p.name().to_lowercase() == lowered)
        {
            return Err(SessionError::DuplicateName(name.to_string()));
        }

        let player = Player::new(name.to_string(), buy_in);
        let id = player.id();
        self.players.push(player);
        Ok(id)
    }

    /// Record an additional buy-in for a seated player.
    pub fn add_rebuy(&mut self, id: PlayerId, amount: Decimal) -> Result<(), SessionError> {
        self.require_phase(Phase::Active, "record a rebuy")?;
        if amount <= Decimal::ZERO {
            return Err(SessionError::AmountNotPositive(amount));
        }
        self.player_mut(id)?.add_rebuy(amount);
        Ok(())
    }

    /// Record what a player walked away with, from raw text.
    ///
    /// Ingestion is permissive: text that does not parse as a number
    /// counts as zero, and negative values are clamped to zero. Payouts
    /// may be corrected any number of times before settlement.
    pub fn set_payout(&mut self, id: PlayerId, raw: &str) -> Result<(), SessionError> {
        self.require_phase(Phase::Active, "record a payout")?;
        let amount = parse_payout(raw);
        self.player_mut(id)?.set_payout(amount);
        Ok(())
    }

    /// Start play. Needs at least two seated players.
    pub fn start_game(&mut self) -> Result<(), SessionError> {
        self.require_phase(Phase::Collecting, "start the game")?;
        if self.players.len() < 2 {
            return Err(SessionError::TooFewPlayers(self.players.len()));
        }
        self.phase = Phase::Active;
        Ok(())
    }

    /// Settle the table: compute who pays whom and freeze the session.
    ///
    /// Fails without side effects if the table does not balance; the
    /// session stays active so payouts can be corrected and settlement
    /// retried.
    pub fn settle(&mut self) -> Result<SettlementReport, SessionError> {
        self.require_phase(Phase::Active, "settle")?;
        let report = SettlementEngine::settle(&self.players)?;
        self.settlements = report.transfers().to_vec();
        self.phase = Phase::Settled;
        Ok(report)
    }

    /// Throw everything away and start a fresh session.
    pub fn reset(&mut self) {
        *self = Session::new();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seated players, in seating order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Look a player up by display name, ignoring case (full Unicode
    /// folding, matching the duplicate check in [`Session::add_player`]).
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        let wanted = name.trim().to_lowercase();
        self.players
            .iter()
            .find(|p| p.name().to_lowercase() == wanted)
    }

    /// Transfers from the last settlement. Empty until settled.
    pub fn settlements(&self) -> &[Transfer] {
        &self.settlements
    }

    /// Everything paid into the table so far, including rebuys.
    pub fn total_buy_ins(&self) -> Decimal {
        total_buy_ins(&self.players)
    }

    /// Everything recorded as paid out so far, rounded to cents.
    pub fn total_payouts(&self) -> Decimal {
        total_payouts(&self.players)
    }

    /// The money on the table. Same as total buy-ins.
    pub fn pot(&self) -> Decimal {
        self.total_buy_ins()
    }

    fn require_phase(&self, expected: Phase, action: &'static str) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::PhaseMismatch {
                action,
                phase: self.phase,
            })
        }
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, SessionError> {
        self.players
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(SessionError::UnknownPlayer(id))
    }
}

/// Sum of every player's total buy-in, rounded to cents.
pub fn total_buy_ins(players: &[Player]) -> Decimal {
    let sum: Decimal = players.iter().map(|p| p.total_buy_in()).sum();
    round_to_cents(sum)
}

/// Sum of every player's payout, rounded to cents.
///
/// Individual payouts are stored as entered; rounding happens here, on
/// the aggregate, so the balance check sees cent-resolution totals.
pub fn total_payouts(players: &[Player]) -> Decimal {
    let sum: Decimal = players.iter().map(|p| p.payout()).sum();
    round_to_cents(sum)
}
