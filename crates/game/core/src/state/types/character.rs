//! Character record.
//!
//! Base skills and progression are authoritative. The derived stat block is a
//! cache: it can only be replaced wholesale by the engine's recompute step.

use crate::config::ProgressionConfig;
use crate::progression::{ExperienceGain, level_for_experience};
use crate::state::types::{CharacterId, PlayerId, Timestamp};
use crate::stats::{DerivedStats, Skill, SkillAllocation, SkillError};

/// Longest accepted character name, in characters.
pub const MAX_NAME_LEN: usize = 50;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub owner: PlayerId,
    pub name: String,
    skills: SkillAllocation,
    free_skill_points: u32,
    level: u32,
    experience: u64,
    current_health: i32,
    derived: DerivedStats,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Character {
    /// Builds a level-1 character with an already-computed stat block.
    pub(crate) fn new(
        id: CharacterId,
        owner: PlayerId,
        name: String,
        skills: SkillAllocation,
        derived: DerivedStats,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            owner,
            name,
            skills,
            free_skill_points: 0,
            level: 1,
            experience: 0,
            current_health: derived.max_health,
            derived,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn skills(&self) -> &SkillAllocation {
        &self.skills
    }

    pub fn free_skill_points(&self) -> u32 {
        self.free_skill_points
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    pub fn derived(&self) -> &DerivedStats {
        &self.derived
    }

    /// Lowercased name used for uniqueness checks.
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }

    /// Spends free points on one skill.
    pub(crate) fn spend_skill_points(&mut self, skill: Skill, points: u32) -> Result<(), SkillError> {
        if points == 0 {
            return Err(SkillError::NothingToSpend);
        }
        if points > self.free_skill_points {
            return Err(SkillError::NotEnoughPoints {
                requested: points,
                available: self.free_skill_points,
            });
        }

        self.skills.raise(skill, points)?;
        self.free_skill_points -= points;
        Ok(())
    }

    /// Adds experience and raises the level if the new total crosses a
    /// threshold. Experience never decreases.
    pub(crate) fn gain_experience(&mut self, amount: u64, config: &ProgressionConfig) -> ExperienceGain {
        self.experience = self.experience.saturating_add(amount);
        let reached = level_for_experience(self.experience, config.experience_per_level);

        let levels_gained = reached.saturating_sub(self.level);
        if levels_gained > 0 {
            self.level = reached;
            self.free_skill_points = self
                .free_skill_points
                .saturating_add(levels_gained.saturating_mul(config.skill_points_per_level));
        }

        ExperienceGain {
            levels_gained,
            level: self.level,
        }
    }

    /// Overwrites the stat cache and restores health to the new maximum.
    pub(crate) fn apply_derived(&mut self, derived: DerivedStats) {
        self.derived = derived;
        self.current_health = derived.max_health;
    }

    pub(crate) fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
    }
}

/// Normalizes a character name for case-insensitive comparison.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
