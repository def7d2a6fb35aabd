//! Skill allocation - Layer 1 of the stat system.
//!
//! The three base skills are the only stat values a character stores as
//! authoritative input. Equipment adds flat primary bonuses on top to give
//! [`EffectiveSkills`], which are never stored.

use super::bonus::{StatBonuses, StatLayer};
use crate::config::ProgressionConfig;
use crate::error::{ErrorKind, GameError};

/// Highest value a single skill may reach through allocation.
pub const MAX_SKILL: i32 = 10_000;

/// The three investable skills.
///
/// - **Strength**: maximum attack, critical chance
/// - **Agility**: minimum attack, dodge chance
/// - **Vitality**: health, defense
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Skill {
    Strength,
    Agility,
    Vitality,
}

/// Base skill investment of a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillAllocation {
    pub strength: i32,
    pub agility: i32,
    pub vitality: i32,
}

impl SkillAllocation {
    pub fn new(strength: i32, agility: i32, vitality: i32) -> Self {
        Self {
            strength,
            agility,
            vitality,
        }
    }

    /// Sum of the three skills.
    pub fn total(&self) -> i64 {
        i64::from(self.strength) + i64::from(self.agility) + i64::from(self.vitality)
    }

    pub fn get(&self, skill: Skill) -> i32 {
        match skill {
            Skill::Strength => self.strength,
            Skill::Agility => self.agility,
            Skill::Vitality => self.vitality,
        }
    }

    /// Raises one skill by `points`, up to [`MAX_SKILL`].
    pub fn raise(&mut self, skill: Skill, points: u32) -> Result<(), SkillError> {
        let slot = match skill {
            Skill::Strength => &mut self.strength,
            Skill::Agility => &mut self.agility,
            Skill::Vitality => &mut self.vitality,
        };
        let raised = i64::from(*slot) + i64::from(points);
        if raised > i64::from(MAX_SKILL) {
            return Err(SkillError::Overflow {
                skill,
                max: MAX_SKILL,
            });
        }
        *slot = raised as i32;
        Ok(())
    }

    /// Checks an allocation submitted at character creation.
    ///
    /// Every skill must reach the configured floor and the three must sum to
    /// exactly the creation budget.
    pub fn validate_for_creation(&self, config: &ProgressionConfig) -> Result<(), SkillError> {
        let floor = i64::from(config.skill_floor);
        for skill in [Skill::Strength, Skill::Agility, Skill::Vitality] {
            let value = self.get(skill);
            if i64::from(value) < floor {
                return Err(SkillError::BelowFloor {
                    skill,
                    value,
                    floor: config.skill_floor,
                });
            }
        }

        let budget = config.creation_budget();
        if self.total() != i64::from(budget) {
            return Err(SkillError::BudgetMismatch {
                total: self.total(),
                budget,
            });
        }

        Ok(())
    }
}

/// Skill values after equipment primary bonuses are applied.
///
/// NOT stored - recomputed whenever derived stats are.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectiveSkills {
    pub strength: i32,
    pub agility: i32,
    pub vitality: i32,
}

impl StatLayer for EffectiveSkills {
    type Base = SkillAllocation;
    type Bonuses = StatBonuses;
    type Final = Self;

    fn compute(base: &Self::Base, bonuses: &Self::Bonuses) -> Self::Final {
        Self {
            strength: base.strength.saturating_add(bonuses.strength),
            agility: base.agility.saturating_add(bonuses.agility),
            vitality: base.vitality.saturating_add(bonuses.vitality),
        }
    }

    fn empty_bonuses() -> Self::Bonuses {
        StatBonuses::NONE
    }
}

/// Errors raised while validating or spending skill points.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillError {
    #[error("{skill} is {value}, every skill must be at least {floor}")]
    BelowFloor { skill: Skill, value: i32, floor: u32 },

    #[error("skills add up to {total}, expected exactly {budget}")]
    BudgetMismatch { total: i64, budget: u32 },

    #[error("at least one skill point must be spent")]
    NothingToSpend,

    #[error("requested {requested} skill points but only {available} are free")]
    NotEnoughPoints { requested: u32, available: u32 },

    #[error("{skill} cannot be raised above {max}")]
    Overflow { skill: Skill, max: i32 },
}

impl GameError for SkillError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::BelowFloor { .. } | Self::BudgetMismatch { .. } | Self::NothingToSpend => {
                ErrorKind::InvalidInput
            }
            Self::NotEnoughPoints { .. } => ErrorKind::InsufficientResource,
            Self::Overflow { .. } => ErrorKind::InvalidInput,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BelowFloor { .. } => "SKILL_BELOW_FLOOR",
            Self::BudgetMismatch { .. } => "SKILL_BUDGET_MISMATCH",
            Self::NothingToSpend => "SKILL_NOTHING_TO_SPEND",
            Self::NotEnoughPoints { .. } => "SKILL_NOT_ENOUGH_POINTS",
            Self::Overflow { .. } => "SKILL_OVERFLOW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn creation_accepts_exact_budget() {
        let config = ProgressionConfig::default();
        assert!(SkillAllocation::new(10, 5, 5).validate_for_creation(&config).is_ok());
        assert!(SkillAllocation::new(7, 7, 6).validate_for_creation(&config).is_ok());
    }

    #[test]
    fn creation_rejects_skill_below_floor() {
        let config = ProgressionConfig::default();
        let err = SkillAllocation::new(11, 5, 4)
            .validate_for_creation(&config)
            .unwrap_err();
        assert_eq!(
            err,
            SkillError::BelowFloor {
                skill: Skill::Vitality,
                value: 4,
                floor: 5
            }
        );
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn creation_rejects_wrong_total() {
        let config = ProgressionConfig::default();
        let err = SkillAllocation::new(5, 5, 5)
            .validate_for_creation(&config)
            .unwrap_err();
        assert_eq!(err, SkillError::BudgetMismatch { total: 15, budget: 20 });
    }

    #[test]
    fn budget_follows_configuration() {
        let config = ProgressionConfig::default().with_creation_bonus(3);
        assert!(SkillAllocation::new(8, 5, 5).validate_for_creation(&config).is_ok());
        assert!(SkillAllocation::new(10, 5, 5).validate_for_creation(&config).is_err());
    }

    #[test]
    fn skill_names_parse_case_insensitively() {
        assert_eq!(Skill::from_str("Strength").unwrap(), Skill::Strength);
        assert_eq!(Skill::from_str("vitality").unwrap(), Skill::Vitality);
        assert_eq!(Skill::Agility.to_string(), "agility");
    }

    #[test]
    fn raise_stops_at_skill_cap() {
        let mut skills = SkillAllocation::new(10, 5, 5);
        skills.raise(Skill::Strength, (MAX_SKILL - 10) as u32).unwrap();
        assert_eq!(skills.strength, MAX_SKILL);

        let err = skills.raise(Skill::Strength, 1).unwrap_err();
        assert_eq!(err, SkillError::Overflow { skill: Skill::Strength, max: MAX_SKILL });
        assert_eq!(skills.strength, MAX_SKILL);

        assert!(skills.raise(Skill::Agility, u32::MAX).is_err());
        assert_eq!(skills.agility, 5);
    }

    #[test]
    fn effective_skills_add_primary_bonuses() {
        let base = SkillAllocation::new(8, 5, 5);
        let bonuses = StatBonuses::NONE.strength(2).vitality(1);
        let effective = EffectiveSkills::compute(&base, &bonuses);
        assert_eq!(effective.strength, 10);
        assert_eq!(effective.agility, 5);
        assert_eq!(effective.vitality, 6);
    }
}
