//! Buffered weapon requests and notifications.
//!
//! Producers (input, pickups) only write intent; the consumers are the single writers of
//! inventory and weapon state.

use bevy::prelude::*;

use super::stats::ProjectileStats;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchKind {
    Slot(usize),
    Next,
    Previous,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwitchWeaponRequest {
    /// Entity carrying the `WeaponInventory`.
    pub inventory: Entity,
    pub kind: SwitchKind,
}

/// Written whenever an inventory (re)selects its current weapon.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeaponChanged {
    pub weapon: Entity,
    pub index: usize,
    pub slot_count: usize,
}

#[derive(Message, Clone, Debug)]
pub struct UpgradeWeaponStats {
    pub weapon: Entity,
    pub stats: ProjectileStats,
}
