//! Derived Stats - Layer 2 of the stat system.
//!
//! Combat stats derived from [`EffectiveSkills`] plus the secondary bonuses of
//! equipped items. A character stores the last result as a cache, but it is
//! always overwritten by a fresh [`derive`] and never edited in place.

use super::bonus::{StatBonuses, StatLayer};
use super::skills::{EffectiveSkills, SkillAllocation};

/// Skill value at which a skill contributes nothing beyond the base stats.
const NEUTRAL_SKILL: i32 = 5;

const BASE_HEALTH: i32 = 100;
const BASE_MIN_ATTACK: i32 = 10;
const BASE_MAX_ATTACK: i32 = 15;
const BASE_DEFENSE: i32 = 5;
const BASE_CRIT_CHANCE: f64 = 5.0;
const BASE_DODGE_CHANCE: f64 = 5.0;

/// Derived combat statistics.
///
/// Crit and dodge are percentages kept at full precision; round them only
/// when displaying (see [`DerivedStats::rounded`]).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    pub max_health: i32,
    pub min_attack: i32,
    pub max_attack: i32,
    pub defense: i32,
    pub crit_chance: f64,
    pub dodge_chance: f64,
}

impl DerivedStats {
    /// Copy with crit and dodge rounded to one decimal place, for display.
    pub fn rounded(&self) -> Self {
        Self {
            crit_chance: round_tenths(self.crit_chance),
            dodge_chance: round_tenths(self.dodge_chance),
            ..*self
        }
    }
}

/// Layer 2: Derived Stats Layer
///
/// Base formulas (before item secondary bonuses):
/// - Max health: 100 + (VIT-5) × 15
/// - Min attack: 10 + (AGI-5) × 2
/// - Max attack: 15 + (STR-5) × 3
/// - Defense: 5 + (VIT-5) × 2
/// - Crit %: 5.0 + (STR-5) × 1.5
/// - Dodge %: 5.0 + (AGI-5) × 1.0
impl StatLayer for DerivedStats {
    type Base = EffectiveSkills;
    type Bonuses = StatBonuses;
    type Final = Self;

    fn compute(base: &Self::Base, bonuses: &Self::Bonuses) -> Self::Final {
        let strength = base.strength.saturating_sub(NEUTRAL_SKILL);
        let agility = base.agility.saturating_sub(NEUTRAL_SKILL);
        let vitality = base.vitality.saturating_sub(NEUTRAL_SKILL);

        // saturate instead of wrapping when catalog bonuses are extreme
        Self {
            max_health: scaled(BASE_HEALTH, vitality, 15, bonuses.health),
            min_attack: scaled(BASE_MIN_ATTACK, agility, 2, bonuses.attack),
            max_attack: scaled(BASE_MAX_ATTACK, strength, 3, bonuses.attack),
            defense: scaled(BASE_DEFENSE, vitality, 2, bonuses.defense),
            crit_chance: BASE_CRIT_CHANCE + f64::from(strength) * 1.5 + bonuses.crit_chance,
            dodge_chance: BASE_DODGE_CHANCE + f64::from(agility) * 1.0 + bonuses.dodge_chance,
        }
    }

    fn empty_bonuses() -> Self::Bonuses {
        StatBonuses::NONE
    }
}

/// Computes derived stats from base skills and the bonuses of every equipped
/// item (pure function).
///
/// The same item bonus block feeds both layers: its primary fields raise the
/// effective skills, its secondary fields are added to the derived values.
pub fn derive<'a>(
    skills: &SkillAllocation,
    equipped: impl IntoIterator<Item = &'a StatBonuses>,
) -> DerivedStats {
    let bonuses = StatBonuses::total(equipped);
    let effective = EffectiveSkills::compute(skills, &bonuses);
    DerivedStats::compute(&effective, &bonuses)
}

fn scaled(base: i32, skill: i32, per_point: i32, bonus: i32) -> i32 {
    base.saturating_add(skill.saturating_mul(per_point)).saturating_add(bonus)
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::skills::MAX_SKILL;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn neutral_skills_yield_base_stats() {
        let stats = derive(&SkillAllocation::new(5, 5, 5), []);
        assert_eq!(stats.max_health, 100);
        assert_eq!(stats.min_attack, 10);
        assert_eq!(stats.max_attack, 15);
        assert_eq!(stats.defense, 5);
        assert_close(stats.crit_chance, 5.0);
        assert_close(stats.dodge_chance, 5.0);
    }

    #[test]
    fn strength_investment_without_equipment() {
        let stats = derive(&SkillAllocation::new(8, 5, 5), []);
        assert_eq!(stats.max_attack, 24);
        assert_close(stats.crit_chance, 9.5);
        assert_eq!(stats.min_attack, 10);
    }

    #[test]
    fn weapon_bonus_applies_to_both_attack_bounds() {
        let sword = StatBonuses::NONE.attack(5).crit_chance(1.0);
        let stats = derive(&SkillAllocation::new(8, 5, 5), [&sword]);
        assert_eq!(stats.max_attack, 29);
        assert_eq!(stats.min_attack, 15);
        assert_close(stats.crit_chance, 10.5);
    }

    #[test]
    fn primary_bonuses_flow_through_formulas() {
        // +2 vitality from gear: health 100 + (7-5)×15 + 20 = 150, defense 5 + 4 + 3 = 12
        let cuirass = StatBonuses::NONE.vitality(2).health(20).defense(3);
        let stats = derive(&SkillAllocation::new(5, 5, 5), [&cuirass]);
        assert_eq!(stats.max_health, 150);
        assert_eq!(stats.defense, 12);
    }

    #[test]
    fn agility_drives_min_attack_and_dodge() {
        let stats = derive(&SkillAllocation::new(5, 9, 6), []);
        assert_eq!(stats.min_attack, 18);
        assert_close(stats.dodge_chance, 9.0);
        assert_eq!(stats.max_health, 115);
        assert_eq!(stats.defense, 7);
    }

    #[test]
    fn derive_is_deterministic() {
        let skills = SkillAllocation::new(7, 6, 7);
        let ring = StatBonuses::NONE.crit_chance(0.1).dodge_chance(0.2);
        let amulet = StatBonuses::NONE.crit_chance(0.2).strength(1);
        let first = derive(&skills, [&ring, &amulet]);
        let second = derive(&skills, [&ring, &amulet]);
        assert_eq!(first, second);
    }

    #[test]
    fn rounding_is_presentation_only() {
        let ring = StatBonuses::NONE.crit_chance(0.04);
        let stats = derive(&SkillAllocation::new(5, 5, 5), [&ring]);
        assert_close(stats.crit_chance, 5.04);
        assert_close(stats.rounded().crit_chance, 5.0);
    }

    #[test]
    fn capped_skills_and_huge_bonuses_do_not_wrap() {
        let skills = SkillAllocation::new(MAX_SKILL, 5, MAX_SKILL);
        let relic = StatBonuses::NONE.attack(i32::MAX).strength(i32::MAX);
        let stats = derive(&skills, [&relic]);

        assert_eq!(stats.max_attack, i32::MAX);
        assert_eq!(stats.max_health, 100 + (MAX_SKILL - 5) * 15);
        assert!(stats.crit_chance > 0.0);
    }
}
