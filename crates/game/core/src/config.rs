/// Progression configuration constants and tunable parameters.
///
/// The stat formulas themselves are fixed (see [`crate::stats::derived`]);
/// only budget and pacing values live here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionConfig {
    /// Lowest value any base skill may hold.
    pub skill_floor: u32,

    /// Points every character starts with across the three skills.
    pub base_skill_points: u32,

    /// Extra points a new character distributes at creation.
    pub creation_bonus_points: u32,

    /// Experience required per level (`level = experience / this + 1`).
    pub experience_per_level: u64,

    /// Free skill points awarded for each level gained.
    pub skill_points_per_level: u32,

    /// Gold credited to a freshly registered player profile.
    pub starting_gold: u64,
}

impl ProgressionConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SKILL_FLOOR: u32 = 5;
    pub const DEFAULT_BASE_SKILL_POINTS: u32 = 15;
    pub const DEFAULT_CREATION_BONUS_POINTS: u32 = 5;
    pub const DEFAULT_EXPERIENCE_PER_LEVEL: u64 = 100;
    pub const DEFAULT_SKILL_POINTS_PER_LEVEL: u32 = 1;
    pub const DEFAULT_STARTING_GOLD: u64 = 100;

    pub fn new() -> Self {
        Self {
            skill_floor: Self::DEFAULT_SKILL_FLOOR,
            base_skill_points: Self::DEFAULT_BASE_SKILL_POINTS,
            creation_bonus_points: Self::DEFAULT_CREATION_BONUS_POINTS,
            experience_per_level: Self::DEFAULT_EXPERIENCE_PER_LEVEL,
            skill_points_per_level: Self::DEFAULT_SKILL_POINTS_PER_LEVEL,
            starting_gold: Self::DEFAULT_STARTING_GOLD,
        }
    }

    /// Total points the three skills must sum to when a character is created.
    pub fn creation_budget(&self) -> u32 {
        self.base_skill_points + self.creation_bonus_points
    }

    /// Returns a copy with a different creation bonus, keeping everything else.
    pub fn with_creation_bonus(mut self, points: u32) -> Self {
        self.creation_bonus_points = points;
        self
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self::new()
    }
}
