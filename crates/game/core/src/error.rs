//! Common error infrastructure for progression-core.
//!
//! Domain errors (`InventoryError`, `EquipmentError`, `SkillError`, ...) live
//! next to the rules that raise them. They all implement [`GameError`] so the
//! runtime can classify any failure into one of the [`ErrorKind`] buckets
//! without matching on every variant.

/// Category of a failure, used by callers to pick a user-facing response.
///
/// Everything except [`ErrorKind::Internal`] is recoverable: the operation was
/// rejected and nothing changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Referenced player, character, item or slot does not exist.
    NotFound,

    /// Request collides with existing state (duplicate name, second character).
    Conflict,

    /// Request is malformed (skill budget, unknown slot, zero quantity).
    InvalidInput,

    /// Request needs more than is available (inventory stack, gold, skill points).
    InsufficientResource,

    /// Storage or invariant failure. Logged, never shown verbatim to players.
    Internal,
}

impl ErrorKind {
    /// Returns true for every kind except [`ErrorKind::Internal`].
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Internal)
    }
}

/// Common trait for all progression-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify by what the caller should do, not by where it failed
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the category of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns a static string identifier for this error variant.
    ///
    /// Stable across releases; intended for metrics and client-side lookup.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
