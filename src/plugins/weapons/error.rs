//! Weapon and inventory errors.
//!
//! None of these are fatal. Systems log them and carry on with the tick: a missing weapon is
//! "nothing to do", not corruption.

use std::fmt;

use bevy::prelude::*;

use super::pool::PoolError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeaponError {
    /// Slot index outside `0..len`. Inventory state is unchanged.
    InvalidIndex { index: usize, len: usize },
    /// Fire was requested with nothing selected.
    NoCurrentWeapon,
    /// An inventory slot points at an entity without a `Weapon`.
    MissingWeapon { entity: Entity },
    /// The weapon's pool could not produce a projectile; the shot was dropped.
    Pool(PoolError),
}

impl fmt::Display for WeaponError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeaponError::InvalidIndex { index, len } => {
                write!(f, "invalid weapon index {index} (inventory holds {len})")
            }
            WeaponError::NoCurrentWeapon => write!(f, "no current weapon"),
            WeaponError::MissingWeapon { entity } => {
                write!(f, "entity {entity} has no Weapon component")
            }
            WeaponError::Pool(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for WeaponError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WeaponError::Pool(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PoolError> for WeaponError {
    fn from(err: PoolError) -> Self {
        WeaponError::Pool(err)
    }
}
