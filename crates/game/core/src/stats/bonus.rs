//! Typed item bonuses and the layer trait shared by every stat computation.
//!
//! Every catalog item carries the full [`StatBonuses`] block; fields an item
//! does not use are zero. Summing is plain field-wise addition, so the order
//! in which equipped items are visited never changes the result.

use core::iter::Sum;
use core::ops::{Add, AddAssign};

/// Bonuses one item grants while equipped.
///
/// Primary bonuses (`strength`, `agility`, `vitality`) feed the effective
/// skill values before the derived formulas run. Secondary bonuses are added
/// on top of the derived values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBonuses {
    pub strength: i32,
    pub agility: i32,
    pub vitality: i32,

    /// Added to both minimum and maximum attack.
    pub attack: i32,
    pub defense: i32,
    pub health: i32,

    /// Percentage points.
    pub crit_chance: f64,
    /// Percentage points.
    pub dodge_chance: f64,
}

impl StatBonuses {
    /// Bonus block with every field zero.
    pub const NONE: Self = Self {
        strength: 0,
        agility: 0,
        vitality: 0,
        attack: 0,
        defense: 0,
        health: 0,
        crit_chance: 0.0,
        dodge_chance: 0.0,
    };

    /// Sums the bonuses of every equipped item.
    pub fn total<'a>(items: impl IntoIterator<Item = &'a StatBonuses>) -> Self {
        items.into_iter().copied().sum()
    }

    /// Returns true if the item grants nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Builder-style setters, mostly used by catalog fixtures.
impl StatBonuses {
    pub fn strength(mut self, value: i32) -> Self {
        self.strength = value;
        self
    }

    pub fn agility(mut self, value: i32) -> Self {
        self.agility = value;
        self
    }

    pub fn vitality(mut self, value: i32) -> Self {
        self.vitality = value;
        self
    }

    pub fn attack(mut self, value: i32) -> Self {
        self.attack = value;
        self
    }

    pub fn defense(mut self, value: i32) -> Self {
        self.defense = value;
        self
    }

    pub fn health(mut self, value: i32) -> Self {
        self.health = value;
        self
    }

    pub fn crit_chance(mut self, value: f64) -> Self {
        self.crit_chance = value;
        self
    }

    pub fn dodge_chance(mut self, value: f64) -> Self {
        self.dodge_chance = value;
        self
    }
}

impl Add for StatBonuses {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            strength: self.strength.saturating_add(rhs.strength),
            agility: self.agility.saturating_add(rhs.agility),
            vitality: self.vitality.saturating_add(rhs.vitality),
            attack: self.attack.saturating_add(rhs.attack),
            defense: self.defense.saturating_add(rhs.defense),
            health: self.health.saturating_add(rhs.health),
            crit_chance: self.crit_chance + rhs.crit_chance,
            dodge_chance: self.dodge_chance + rhs.dodge_chance,
        }
    }
}

impl AddAssign for StatBonuses {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for StatBonuses {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::NONE, Add::add)
    }
}

/// Trait for stat layers that follow the Base -> Bonuses -> Final pattern.
///
/// ```text
/// Layer 1: SkillAllocation + StatBonuses -> EffectiveSkills
/// Layer 2: EffectiveSkills + StatBonuses -> DerivedStats
/// ```
///
/// # Examples
///
/// ```
/// # use progression_core::stats::*;
/// let skills = SkillAllocation::new(8, 5, 5);
/// let effective = EffectiveSkills::from_base(&skills);
/// let derived = DerivedStats::from_base(&effective);
/// assert_eq!(derived.max_attack, 24);
/// ```
pub trait StatLayer {
    /// The base/input type for this layer
    type Base;

    /// The bonuses type for this layer
    type Bonuses;

    /// The final/output type for this layer
    type Final;

    /// Compute the final values from base and bonuses
    fn compute(base: &Self::Base, bonuses: &Self::Bonuses) -> Self::Final;

    /// Create an empty bonus holder
    fn empty_bonuses() -> Self::Bonuses;

    /// Compute with no bonuses (convenience method)
    fn from_base(base: &Self::Base) -> Self::Final {
        Self::compute(base, &Self::empty_bonuses())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_order_independent() {
        let sword = StatBonuses::NONE.attack(5).crit_chance(1.0);
        let vest = StatBonuses::NONE.defense(3).health(20).vitality(1);
        let ring = StatBonuses::NONE.dodge_chance(2.5).agility(2);

        let forward = StatBonuses::total([&sword, &vest, &ring]);
        let backward = StatBonuses::total([&ring, &vest, &sword]);

        assert_eq!(forward, backward);
        assert_eq!(forward.attack, 5);
        assert_eq!(forward.health, 20);
        assert_eq!(forward.agility, 2);
    }

    #[test]
    fn empty_total_is_none() {
        let total = StatBonuses::total(core::iter::empty());
        assert!(total.is_empty());
    }
}
