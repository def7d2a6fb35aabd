//! Experience, game results and gold.

use progression_core::{ExperienceGain, ExternalId, GameOutcome, GameRecord, PlayerProfile};

use crate::api::errors::{Result, RuntimeError};
use crate::api::handle::RuntimeHandle;
use crate::events::ProgressionEvent;
use crate::repository::ChangeSet;

impl RuntimeHandle {
    /// Adds experience to the player's character.
    ///
    /// Levels follow `experience / experience_per_level + 1`; every level
    /// gained adds free skill points. Derived stats are not touched. A zero
    /// amount writes nothing and publishes nothing.
    pub async fn grant_experience(&self, external: ExternalId, amount: u64) -> Result<ExperienceGain> {
        let player = self.resolve(external)?;
        let _guard = self.inner.locks.player(player.id).await;

        let mut character = self
            .repo()
            .character_of(player.id)?
            .ok_or(RuntimeError::CharacterNotFound(external))?;
        let gain = self
            .engine()
            .grant_experience(&mut character, amount, self.now());
        if amount == 0 {
            return Ok(gain);
        }
        self.repo().commit(ChangeSet::new().character(character))?;

        self.publish(ProgressionEvent::ExperienceGranted {
            player: external,
            amount,
            gain,
        });
        if gain.leveled_up() {
            tracing::info!(
                player = %external,
                level = gain.level,
                levels_gained = gain.levels_gained,
                "character leveled up"
            );
            self.publish(ProgressionEvent::LevelUp {
                player: external,
                level: gain.level,
                levels_gained: gain.levels_gained,
            });
        }
        Ok(gain)
    }

    /// Counts one finished game for the player.
    pub async fn record_game_result(
        &self,
        external: ExternalId,
        outcome: GameOutcome,
    ) -> Result<GameRecord> {
        let profile = self
            .with_profile(external, |profile| {
                profile.record.record(outcome);
                Ok(())
            })
            .await?;

        self.publish(ProgressionEvent::GameRecorded {
            player: external,
            outcome,
            record: profile.record,
        });
        Ok(profile.record)
    }

    /// Credits or debits gold. Returns the new balance.
    pub async fn adjust_gold(&self, external: ExternalId, delta: i64) -> Result<u64> {
        let profile = self
            .with_profile(external, |profile| {
                profile.adjust_gold(delta)?;
                Ok(())
            })
            .await?;

        let balance = profile.gold();
        tracing::debug!(player = %external, delta, balance, "adjusted gold");
        self.publish(ProgressionEvent::GoldAdjusted {
            player: external,
            delta,
            balance,
        });
        Ok(balance)
    }

    async fn with_profile(
        &self,
        external: ExternalId,
        update: impl FnOnce(&mut PlayerProfile) -> Result<()>,
    ) -> Result<PlayerProfile> {
        let player = self.resolve(external)?;
        let _guard = self.inner.locks.player(player.id).await;

        let mut profile = self
            .repo()
            .profile(player.id)?
            .ok_or(RuntimeError::PlayerNotFound(external))?;
        update(&mut profile)?;
        self.repo().commit(ChangeSet::new().profile(profile.clone()))?;
        Ok(profile)
    }
}
