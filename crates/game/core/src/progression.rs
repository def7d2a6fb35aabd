//! Progression bookkeeping: levels, gold and game results.
//!
//! Independent of equipment. Level and experience belong to the character;
//! gold and the win/loss record belong to the player profile.

use crate::error::{ErrorKind, GameError};
use crate::state::{PlayerId, Timestamp};

/// Level reached with `experience` points: `experience / per_level + 1`.
///
/// A zero `per_level` is treated as 1.
pub fn level_for_experience(experience: u64, per_level: u64) -> u32 {
    let levels = experience / per_level.max(1);
    u32::try_from(levels).unwrap_or(u32::MAX - 1).saturating_add(1)
}

/// Result of an experience grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperienceGain {
    /// Levels gained by this grant, 0 when no threshold was crossed.
    pub levels_gained: u32,
    /// Level after the grant.
    pub level: u32,
}

impl ExperienceGain {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GameOutcome {
    Win,
    Loss,
}

/// Win/loss tally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameRecord {
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
}

impl GameRecord {
    pub fn record(&mut self, outcome: GameOutcome) {
        self.total_games = self.total_games.saturating_add(1);
        match outcome {
            GameOutcome::Win => self.wins = self.wins.saturating_add(1),
            GameOutcome::Loss => self.losses = self.losses.saturating_add(1),
        }
    }

    /// Percentage of games won, rounded to one decimal. 0 with no games.
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        let rate = f64::from(self.wins) / f64::from(self.total_games) * 100.0;
        (rate * 10.0).round() / 10.0
    }
}

/// Per-player economy and record, created alongside the player.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    pub player: PlayerId,
    gold: u64,
    pub record: GameRecord,
    pub last_login: Timestamp,
    pub created_at: Timestamp,
}

impl PlayerProfile {
    pub fn new(player: PlayerId, starting_gold: u64, now: Timestamp) -> Self {
        Self {
            player,
            gold: starting_gold,
            record: GameRecord::default(),
            last_login: now,
            created_at: now,
        }
    }

    pub fn gold(&self) -> u64 {
        self.gold
    }

    /// Credits (positive) or debits (negative) gold. Returns the new balance.
    pub fn adjust_gold(&mut self, delta: i64) -> Result<u64, ProgressionError> {
        let magnitude = delta.unsigned_abs();
        let balance = if delta >= 0 {
            self.gold
                .checked_add(magnitude)
                .ok_or(ProgressionError::GoldOverflow)?
        } else {
            self.gold
                .checked_sub(magnitude)
                .ok_or(ProgressionError::InsufficientGold {
                    requested: magnitude,
                    available: self.gold,
                })?
        };
        self.gold = balance;
        Ok(balance)
    }

    pub fn win_rate(&self) -> f64 {
        self.record.win_rate()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressionError {
    #[error("requested {requested} gold but only {available} available")]
    InsufficientGold { requested: u64, available: u64 },

    #[error("gold balance would overflow")]
    GoldOverflow,
}

impl GameError for ProgressionError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientGold { .. } => ErrorKind::InsufficientResource,
            Self::GoldOverflow => ErrorKind::InvalidInput,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientGold { .. } => "PROGRESSION_INSUFFICIENT_GOLD",
            Self::GoldOverflow => "PROGRESSION_GOLD_OVERFLOW",
        }
    }
}
