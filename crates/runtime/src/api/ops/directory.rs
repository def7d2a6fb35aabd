//! Player registration, linked accounts and character creation.

use progression_core::{
    Character, CharacterError, ExternalId, ExternalIdentity, LinkedIdentity, Player,
    PlayerProfile, SkillAllocation, Timestamp,
};

use crate::api::errors::{Result, RuntimeError};
use crate::api::handle::RuntimeHandle;
use crate::api::views::Registration;
use crate::events::{CharacterEvent, ProgressionEvent};
use crate::repository::ChangeSet;

impl RuntimeHandle {
    /// Get-or-create for an external identity.
    ///
    /// A first contact creates the player and its profile with the starting
    /// gold. A repeat contact refreshes reported metadata. Both record the
    /// login time.
    pub async fn register_player(&self, identity: ExternalIdentity) -> Result<Registration> {
        let external = identity.external_id;
        let _guard = self.inner.locks.registration(external).await;
        let now = self.now();

        if let Some(mut player) = self.repo().player_by_external(external)? {
            let _player_guard = self.inner.locks.player(player.id).await;
            let refreshed = player.refresh_metadata(&identity, now);
            let mut profile = match self.repo().profile(player.id)? {
                Some(profile) => profile,
                None => {
                    tracing::warn!(player = %external, "player had no profile, creating one");
                    PlayerProfile::new(player.id, self.engine().config().starting_gold, now)
                }
            };
            profile.last_login = now;

            let mut changes = ChangeSet::new().profile(profile.clone());
            if refreshed {
                changes = changes.player(player.clone());
            }
            self.repo().commit(changes)?;
            tracing::debug!(player = %external, refreshed, "player logged in");

            return Ok(Registration {
                player,
                profile,
                created: false,
            });
        }

        let id = self.repo().next_player_id()?;
        let player = Player::new(id, identity, now);
        let profile = PlayerProfile::new(id, self.engine().config().starting_gold, now);
        self.repo().commit(
            ChangeSet::new()
                .player(player.clone())
                .profile(profile.clone()),
        )?;

        tracing::info!(player = %external, id = %id, "registered player");
        self.publish(ProgressionEvent::PlayerRegistered { player: external });

        Ok(Registration {
            player,
            profile,
            created: true,
        })
    }

    pub fn player(&self, external: ExternalId) -> Result<Player> {
        self.resolve(external)
    }

    pub fn profile(&self, external: ExternalId) -> Result<PlayerProfile> {
        let player = self.resolve(external)?;
        self.repo()
            .profile(player.id)?
            .ok_or(RuntimeError::PlayerNotFound(external))
    }

    /// Stores a third-party account connection, replacing any previous one.
    pub async fn link_identity(
        &self,
        external: ExternalId,
        identity: LinkedIdentity,
    ) -> Result<Player> {
        self.update_player(external, |player, now| {
            player.link(identity, now);
            true
        })
        .await
    }

    /// Drops the third-party account connection. A player without one is
    /// left unchanged.
    pub async fn unlink_identity(&self, external: ExternalId) -> Result<Player> {
        self.update_player(external, |player, now| player.unlink(now))
            .await
    }

    async fn update_player(
        &self,
        external: ExternalId,
        update: impl FnOnce(&mut Player, Timestamp) -> bool,
    ) -> Result<Player> {
        let player = self.resolve(external)?;
        let _guard = self.inner.locks.player(player.id).await;

        // re-read under the lock
        let mut player = self
            .repo()
            .player(player.id)?
            .ok_or(RuntimeError::PlayerNotFound(external))?;
        if update(&mut player, self.now()) {
            self.repo().commit(ChangeSet::new().player(player.clone()))?;
        }
        Ok(player)
    }

    /// Creates the player's only character.
    ///
    /// Fails with `AlreadyHasCharacter` if the player owns one, with
    /// `DuplicateName` if the name is taken ignoring case, and with a skill
    /// error unless the allocation respects the floor and spends exactly the
    /// creation budget. Stats are derived before the character is stored.
    pub async fn create_character(
        &self,
        external: ExternalId,
        name: &str,
        strength: i32,
        agility: i32,
        vitality: i32,
    ) -> Result<Character> {
        let player = self.resolve(external)?;
        let _creation = self.inner.locks.creation().await;
        let _guard = self.inner.locks.player(player.id).await;

        if self.repo().character_of(player.id)?.is_some() {
            return Err(CharacterError::AlreadyHasCharacter.into());
        }
        let trimmed = name.trim();
        if self.repo().name_taken(trimmed)? {
            return Err(CharacterError::DuplicateName {
                name: trimmed.to_string(),
            }
            .into());
        }

        let skills = SkillAllocation::new(strength, agility, vitality);
        let engine = self.engine();
        skills.validate_for_creation(engine.config())?;

        let id = self.repo().next_character_id()?;
        let character = engine.create_character(id, player.id, name, skills, self.now())?;
        self.repo()
            .commit(ChangeSet::new().character(character.clone()))?;

        tracing::info!(
            player = %external,
            character = %character.id,
            name = %character.name,
            "created character"
        );
        self.publish(CharacterEvent::Created {
            player: external,
            character: character.id,
            name: character.name.clone(),
        });

        Ok(character)
    }
}
