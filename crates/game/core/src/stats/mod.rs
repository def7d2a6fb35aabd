//! Stat System
//!
//! ```text
//! [ Skill Allocation (Layer 1) ] + item primary bonuses
//!      ↓
//! [ Effective Skills ]
//!      ↓
//! [ Derived Stats (Layer 2) ] + item secondary bonuses
//! ```
//!
//! ## Principles
//!
//! 1. **SSOT**: Only the base skill allocation is authoritative
//! 2. **Cached projection**: Derived stats are stored but always overwritten
//! 3. **Deterministic**: Pure functions, no I/O
//! 4. **Typed bonuses**: Every item exposes the full bonus block, zero by default

pub mod bonus;
pub mod derived;
pub mod skills;

pub use bonus::{StatBonuses, StatLayer};
pub use derived::{DerivedStats, derive};
pub use skills::{EffectiveSkills, MAX_SKILL, Skill, SkillAllocation, SkillError};
