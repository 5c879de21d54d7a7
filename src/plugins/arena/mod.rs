//! Arena plugin: walls, a floor grid and stationary practice targets.
//!
//! Targets carry `Health`, so player projectiles damage them. A target whose health runs out
//! stops interacting right away, plays a short fade, and is despawned in PostUpdate.
//!
//! ```text
//! OnEnter(InGame):  spawn walls, floor, targets
//! FixedPostUpdate:  target_death_trigger (after projectile collisions) -> target_death_progress
//! PostUpdate:       despawn_cleared_targets
//! ```

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::weapons::{collision::process_projectile_collisions, damage::Health};

const TILE: i32 = 64;
const HALF_W: i32 = TILE * 16;
const HALF_H: i32 = TILE * 9;

const TARGET_HP: f32 = 5.0;
const TARGET_RADIUS: f32 = 16.0;
const DEATH_FADE_SECS: f32 = 0.35;

#[derive(Component, Debug, Clone, Copy)]
pub struct Target;

#[derive(Component, Debug, Clone)]
pub enum TargetState {
    Alive,
    Dying { timer: Timer },
    Dead,
}

/// Marks a target for removal once the fixed step is over.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_walls, spawn_floor, spawn_targets));

    app.add_systems(
        FixedPostUpdate,
        (target_death_trigger, target_death_progress)
            .chain()
            .after(process_projectile_collisions)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        PostUpdate,
        despawn_cleared_targets.run_if(in_state(GameState::InGame)),
    );
}

#[inline]
fn wall_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::World, [Layer::Player, Layer::Enemy, Layer::PlayerProjectile])
}

#[inline]
fn target_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [Layer::World, Layer::Player, Layer::PlayerProjectile])
}

/// Keeps the `Enemy` membership but collides with nothing.
#[inline]
fn cleared_target_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [] as [Layer; 0])
}

fn spawn_walls(mut commands: Commands) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);
    let thickness = 30.0;
    let half_w = HALF_W as f32;
    let half_h = HALF_H as f32;

    let walls = [
        (
            "WallTop",
            Vec2::new(0.0, half_h + thickness * 0.5),
            Vec2::new(half_w * 2.0 + thickness * 2.0, thickness),
        ),
        (
            "WallBottom",
            Vec2::new(0.0, -half_h - thickness * 0.5),
            Vec2::new(half_w * 2.0 + thickness * 2.0, thickness),
        ),
        (
            "WallLeft",
            Vec2::new(-half_w - thickness * 0.5, 0.0),
            Vec2::new(thickness, half_h * 2.0),
        ),
        (
            "WallRight",
            Vec2::new(half_w + thickness * 0.5, 0.0),
            Vec2::new(thickness, half_h * 2.0),
        ),
    ];

    for (name, pos, size) in walls {
        commands.spawn((
            Name::new(name),
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// Checkerboard of solid-color sprites; the project ships no assets.
fn spawn_floor(mut commands: Commands) {
    (-(HALF_H / TILE)..=HALF_H / TILE)
        .flat_map(|y| (-(HALF_W / TILE)..=HALF_W / TILE).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let world_pos = Vec3::new((x * TILE) as f32, (y * TILE) as f32, -1.0);
            let color = if (x + y) % 2 == 0 {
                Color::srgb(0.14, 0.14, 0.16)
            } else {
                Color::srgb(0.12, 0.12, 0.14)
            };

            commands.spawn((
                Sprite::from_color(color, Vec2::splat(TILE as f32)),
                Transform::from_translation(world_pos),
                DespawnOnExit(GameState::InGame),
            ));
        });
}

fn spawn_targets(mut commands: Commands) {
    for (i, x) in [-200.0, 0.0, 200.0].into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Target{i}")),
            Target,
            Health::new(TARGET_HP),
            TargetState::Alive,
            Sprite {
                color: Color::srgb(0.9, 0.25, 0.25),
                custom_size: Some(Vec2::splat(TARGET_RADIUS * 2.0)),
                ..default()
            },
            Transform::from_xyz(x, 200.0, 1.0),
            RigidBody::Static,
            Collider::circle(TARGET_RADIUS),
            target_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// Alive -> Dying once health is depleted. Does not despawn.
fn target_death_trigger(
    mut q: Query<
        (&Health, &mut TargetState, &mut CollisionLayers, &mut Sprite),
        (With<Target>, Without<PendingDespawn>),
    >,
) {
    for (health, mut state, mut layers, mut sprite) in &mut q {
        if !matches!(*state, TargetState::Alive) || !health.is_depleted() {
            continue;
        }

        *state = TargetState::Dying {
            timer: Timer::from_seconds(DEATH_FADE_SECS, TimerMode::Once),
        };
        *layers = cleared_target_layers();
        sprite.color = Color::srgba(0.8, 0.8, 0.8, 1.0);
        debug!("Target cleared");
    }
}

/// Fade Dying targets out, then mark them for despawn.
fn target_death_progress(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut q: Query<
        (Entity, &mut TargetState, &mut Sprite, &mut Transform),
        (With<Target>, Without<PendingDespawn>),
    >,
) {
    for (e, mut state, mut sprite, mut tf) in &mut q {
        let TargetState::Dying { timer } = &mut *state else {
            continue;
        };

        timer.tick(time.delta());

        let dur = timer.duration().as_secs_f32().max(0.0001);
        let t = (timer.elapsed_secs() / dur).clamp(0.0, 1.0);
        tf.scale = Vec3::splat(1.0 - t);

        let mut c = sprite.color.to_srgba();
        c.alpha = 1.0 - t;
        sprite.color = c.into();

        if timer.is_finished() {
            *state = TargetState::Dead;
            commands.entity(e).insert(PendingDespawn);
        }
    }
}

fn despawn_cleared_targets(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}

#[cfg(test)]
mod tests;
