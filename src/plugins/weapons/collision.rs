//! Collision resolution for armed projectiles.
//!
//! Layer filtering is the accept/reject gate: a collision with a party outside the projectile's
//! target mask is ignored and the projectile keeps flying.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::damage::Health;
use super::projectile::{Projectile, ProjectileState};

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    /// Gameplay data (health) lives on the rigid body when there is one.
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget { collider: ev.collider1, body: ev.body1 },
        CollisionTarget { collider: ev.collider2, body: ev.body2 },
    )
}

pub fn process_projectile_collisions(
    mut started: MessageReader<CollisionStart>,
    mut q_projectiles: Query<(&Projectile, &mut ProjectileState)>,
    q_layers: Query<&CollisionLayers>,
    mut q_health: Query<&mut Health>,
) {
    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let p1 = q_projectiles.contains(t1.collider);
        let p2 = q_projectiles.contains(t2.collider);
        if !(p1 ^ p2) {
            continue; // must be exactly one projectile
        }
        let (projectile_side, other_side) = if p1 { (t1, t2) } else { (t2, t1) };

        let Ok((projectile, mut state)) = q_projectiles.get_mut(projectile_side.collider) else {
            continue;
        };

        // A second event in the same tick finds it PendingReturn already.
        if !state.is_armed() {
            continue;
        }

        let Some(stats) = projectile.stats.as_deref() else {
            debug!(
                "Armed projectile {} has no stats; ignoring collision",
                projectile_side.collider
            );
            continue;
        };

        let memberships = q_layers
            .get(other_side.collider)
            .map_or(CollisionLayers::default().memberships, |layers| layers.memberships);
        if !stats.targets(memberships) {
            continue;
        }

        if let Ok(mut health) = q_health.get_mut(other_side.gameplay_owner()) {
            health.take_damage(stats.damage);
        }

        state.begin_return();
    }
}
