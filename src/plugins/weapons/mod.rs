//! Weapons plugin: pooled projectiles, fire-rate cooldowns and a switchable inventory.
//!
//! # Ownership
//! - A `WeaponInventory` (on the player) lists weapon entities in slot order.
//! - Each `Weapon` owns an `EntityPool` of projectile entities. There is no global pool.
//! - Each `Projectile` points back at its weapon by `Entity`. That is not ownership: when the
//!   weapon is gone the lookup fails and the projectile is despawned instead of pooled.
//!
//! # Data flow
//! ```text
//!   Update schedule (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Input (player plugin): FireController.firing_requested (level),       │
//!│      SwitchWeaponRequest messages                                          │
//!│                                                                            │
//!│  (B) apply_switch_requests → WeaponInventory.current, WeaponChanged        │
//!│  (C) apply_stat_upgrades   → Weapon.stats, idle pooled Projectile.stats    │
//!│  (D) drive_fire_controllers                                                │
//!│      - inventory.current → Weapon::fire (cooldown gate)                    │
//!│      - EntityPool::acquire (grows on demand) → arm_projectile              │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!FixedUpdate / FixedPostUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (E) Solver moves armed projectiles; expire_projectiles (→ PendingReturn)  │
//!│  (F) Physics emits CollisionStart messages (Avian)                         │
//!│  (G) process_projectile_collisions (layer gate, damage → PendingReturn)    │
//!│  (H) return_to_owner_commit (→ Idle, EntityPool::release, or despawn)      │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Collision and expiry may both target one projectile in the same tick. Only the first
//! `begin_return` wins, and `EntityPool::release` ignores handles that are already free.

pub mod collision;
pub mod commit;
pub mod controller;
pub mod damage;
pub mod error;
pub mod inventory;
pub mod messages;
pub mod pool;
pub mod projectile;
pub mod stats;
pub mod weapon;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;

pub struct WeaponsPlugin;

impl Plugin for WeaponsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<messages::SwitchWeaponRequest>()
            .add_message::<messages::WeaponChanged>()
            .add_message::<messages::UpgradeWeaponStats>();

        app.add_systems(
            Update,
            (
                controller::apply_switch_requests,
                weapon::apply_stat_upgrades,
                controller::drive_fire_controllers,
                controller::log_weapon_changes,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedUpdate,
            projectile::expire_projectiles.run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            collision::process_projectile_collisions
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            commit::return_to_owner_commit
                .after(collision::process_projectile_collisions)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
