//! Projectile lifecycle: Idle (pooled) → Armed (flying) → PendingReturn → Idle.
//!
//! Inactive projectiles keep every physics component. They are "disabled" by value:
//! hidden, zero velocity and empty collision filters, so they never generate collision events.
//! That avoids archetype moves on every shot.
//!
//! Armed projectiles are dynamic sensor bodies; the solver moves them by their `LinearVelocity`.

use std::sync::Arc;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;

use super::pool::PooledHandle;
use super::stats::ProjectileStats;

/// Depth of projectile sprites.
pub const PROJECTILE_Z: f32 = 2.0;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    /// In the pool, inactive.
    #[default]
    Idle,
    /// Checked out, moving, collidable, lifetime timer running.
    Armed,
    /// Hit something or timed out; the return commit will pool it this tick.
    PendingReturn,
}

impl ProjectileState {
    /// First half of return-to-owner. Idempotent: only an Armed projectile starts returning,
    /// so a collision and a timer expiry in the same tick resolve to a single return.
    #[inline]
    pub fn begin_return(&mut self) -> bool {
        if *self != ProjectileState::Armed {
            return false;
        }
        *self = ProjectileState::PendingReturn;
        true
    }

    #[inline]
    pub fn is_armed(self) -> bool {
        self == ProjectileState::Armed
    }
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    /// Weapon entity whose pool owns this projectile. Non-owning: the weapon may be gone.
    pub owner: Option<Entity>,
    /// Snapshot the projectile was armed (or last configured) with.
    pub stats: Option<Arc<ProjectileStats>>,
    pub lifetime: Timer,
}

impl Projectile {
    pub fn pooled(owner: Entity) -> Self {
        Self { owner: Some(owner), stats: None, lifetime: stopped_timer() }
    }

    pub fn armed(owner: Entity, stats: Arc<ProjectileStats>) -> Self {
        let lifetime = Timer::from_seconds(stats.lifetime.max(0.0), TimerMode::Once);
        Self { owner: Some(owner), stats: Some(stats), lifetime }
    }

    /// Preload an idle projectile with the snapshot its next shot will use.
    pub fn configure(&mut self, stats: Arc<ProjectileStats>) {
        self.stats = Some(stats);
    }

    /// Stop the pending lifetime timer so it can never fire for a later shot.
    #[inline]
    pub fn cancel_lifetime(&mut self) {
        self.lifetime = stopped_timer();
    }
}

#[inline]
fn stopped_timer() -> Timer {
    let mut timer = Timer::from_seconds(0.0, TimerMode::Once);
    timer.pause();
    timer
}

#[inline]
pub fn active_projectile_layers(targets: LayerMask) -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerProjectile, targets)
}

/// "Disabled" without structural changes: empty filters means we collide with nothing.
#[inline]
pub fn inactive_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerProjectile, [] as [Layer; 0])
}

/// Everything a pooled projectile entity is spawned with.
#[derive(Bundle)]
pub struct ProjectileBundle {
    name: Name,
    projectile: Projectile,
    state: ProjectileState,
    sprite: Sprite,
    transform: Transform,
    visibility: Visibility,
    body: RigidBody,
    collider: Collider,
    sensor: Sensor,
    layers: CollisionLayers,
    velocity: LinearVelocity,
    events: CollisionEventsEnabled,
}

impl ProjectileBundle {
    pub fn pooled(owner: Entity, radius: f32) -> Self {
        Self {
            name: Name::new("Projectile(Pooled)"),
            projectile: Projectile::pooled(owner),
            state: ProjectileState::Idle,
            sprite: Sprite {
                color: Color::WHITE,
                custom_size: Some(Vec2::splat(radius * 2.0)),
                ..default()
            },
            transform: Transform::from_xyz(0.0, 0.0, PROJECTILE_Z),
            visibility: Visibility::Hidden,
            body: RigidBody::Dynamic,
            collider: Collider::circle(radius),
            sensor: Sensor,
            layers: inactive_projectile_layers(),
            velocity: LinearVelocity(Vec2::ZERO),
            events: CollisionEventsEnabled,
        }
    }
}

/// Arm a checked-out projectile at `pose` with `stats`, flying along the pose's local up axis.
///
/// Writes go through `commands` because the handle may have been spawned this same tick.
/// The whole `Projectile` is replaced, which also drops any stale lifetime timer.
pub fn arm_projectile(
    commands: &mut Commands,
    handle: PooledHandle,
    owner: Entity,
    pose: Transform,
    stats: Arc<ProjectileStats>,
    radius: f32,
) {
    let sprite = Sprite {
        color: stats.color,
        custom_size: Some(Vec2::splat(radius * 2.0)),
        ..default()
    };
    let layers = active_projectile_layers(stats.target_layers);
    let velocity = LinearVelocity(launch_velocity(pose.rotation, stats.speed));
    let transform = pose.with_scale(stats.scale.extend(1.0));

    commands.entity(handle.entity()).insert((
        Projectile::armed(owner, stats),
        ProjectileState::Armed,
        transform,
        sprite,
        velocity,
        Visibility::Visible,
        layers,
    ));
}

/// Velocity of a projectile launched with `rotation` at `speed` px/s.
#[inline]
pub fn launch_velocity(rotation: Quat, speed: f32) -> Vec2 {
    (rotation * Vec3::Y).truncate() * speed
}

/// Tick lifetime timers; expiry is a miss and starts the return to the owner.
pub fn expire_projectiles(
    time: Res<Time<Fixed>>,
    mut q: Query<(&mut Projectile, &mut ProjectileState)>,
) {
    for (mut projectile, mut state) in &mut q {
        if !state.is_armed() {
            continue;
        }
        projectile.lifetime.tick(time.delta());
        if projectile.lifetime.is_finished() {
            state.begin_return();
        }
    }
}
