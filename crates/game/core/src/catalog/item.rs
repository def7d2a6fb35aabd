use crate::state::{EquipSlot, ItemHandle};
use crate::stats::StatBonuses;

/// Item definition from the static catalog.
///
/// # Design: Template + Bonus Block
///
/// - Descriptive fields (name, type, rarity, value) are for display and economy
/// - `equip_tag` decides which board slot, if any, the item may occupy
/// - `bonuses` is the full typed bonus block, zero where unused
///
/// # Stacking
///
/// `max_stack` is advisory: equipping and unequipping always merge into the
/// existing inventory entry, so a non-stackable item can still be held twice.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub handle: ItemHandle,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub kind: ItemType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equip_tag: EquipTag,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: StatBonuses,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_max_stack"))]
    pub max_stack: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u64,
}

#[cfg(feature = "serde")]
fn default_max_stack() -> u32 {
    1
}

impl ItemDefinition {
    /// Creates a plain, non-equippable, non-stackable definition.
    pub fn new(handle: ItemHandle, name: impl Into<String>, kind: ItemType) -> Self {
        Self {
            handle,
            name: name.into(),
            description: String::new(),
            kind,
            rarity: Rarity::default(),
            equip_tag: EquipTag::None,
            bonuses: StatBonuses::NONE,
            stackable: false,
            max_stack: 1,
            value: 0,
        }
    }

    pub fn with_tag(mut self, tag: EquipTag) -> Self {
        self.equip_tag = tag;
        self
    }

    pub fn with_bonuses(mut self, bonuses: StatBonuses) -> Self {
        self.bonuses = bonuses;
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }

    pub fn stacking(mut self, max_stack: u32) -> Self {
        self.stackable = true;
        self.max_stack = max_stack;
        self
    }

    /// Whether the catalog tags this item for any equip position at all.
    pub fn is_equippable(&self) -> bool {
        self.equip_tag != EquipTag::None
    }

    /// Whether the item may be placed in the given board slot.
    pub fn fits(&self, slot: EquipSlot) -> bool {
        self.equip_tag.board_slot() == Some(slot)
    }
}

/// Broad item category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemType {
    Weapon,
    Armor,
    Consumable,
    Resource,
    Misc,
}

/// Item rarity tier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Catalog equip tag of an item.
///
/// The tag taxonomy is wider than the board: only `Weapon` and `Torso` map to
/// a board slot today, the rest can be catalogued but not equipped.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EquipTag {
    Weapon,
    Torso,
    Head,
    Hands,
    Legs,
    Feet,
    Accessory,
    #[default]
    None,
}

impl EquipTag {
    /// Board slot this tag may occupy, if any.
    pub fn board_slot(self) -> Option<EquipSlot> {
        match self {
            EquipTag::Weapon => Some(EquipSlot::Weapon),
            EquipTag::Torso => Some(EquipSlot::Torso),
            EquipTag::Head
            | EquipTag::Hands
            | EquipTag::Legs
            | EquipTag::Feet
            | EquipTag::Accessory
            | EquipTag::None => None,
        }
    }
}
