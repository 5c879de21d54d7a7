//! Return commit: recycle projectiles back into their owner's pool.
//!
//! This system is the "owner" of the *Idle invariants*.
//!
//! Invariant: Idle projectiles must be:
//! - hidden
//! - velocity = 0
//! - collide with nothing (filters empty)
//! - lifetime timer stopped
//!
//! Centralizing these writes here prevents inconsistencies.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::pool::PooledHandle;
use super::projectile::{inactive_projectile_layers, Projectile, ProjectileState};
use super::weapon::Weapon;

pub fn return_to_owner_commit(
    mut commands: Commands,
    mut q_projectiles: Query<(
        Entity,
        &mut Projectile,
        &mut ProjectileState,
        &mut Visibility,
        &mut LinearVelocity,
        &mut CollisionLayers,
    )>,
    mut q_weapons: Query<&mut Weapon>,
) {
    for (e, mut projectile, mut state, mut vis, mut vel, mut layers) in &mut q_projectiles {
        if *state != ProjectileState::PendingReturn {
            continue;
        }

        projectile.cancel_lifetime();
        *state = ProjectileState::Idle;
        *vis = Visibility::Hidden;
        vel.0 = Vec2::ZERO;
        *layers = inactive_projectile_layers();

        let owner = projectile.owner.and_then(|owner| q_weapons.get_mut(owner).ok());
        match owner {
            Some(mut weapon) => {
                weapon.pool_mut().release(PooledHandle(e));
            }
            None => {
                // Owner weapon is gone: there is no pool to return to.
                projectile.owner = None;
                commands.entity(e).despawn();
            }
        }
    }
}
