//! Player plugin.
//!
//! Pipeline:
//! - OnEnter(InGame): spawn the player with the stock arsenal equipped, slot 0 selected
//! - Update: sample input into `PlayerInput`, the `FireController` and switch requests
//! - FixedUpdate: apply velocity and face the movement direction
//!
//! Weapons are children of the player, so their fire points follow its position and facing.
//!
//! Controls: WASD move, left mouse (held) fires, Tab / Q cycle weapons, 1-4 pick a slot.
//!
//! Input resources are optional: headless apps have no `ButtonInput`, and the systems then
//! leave the controller state untouched.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::weapons::{
    controller::{apply_switch_requests, FireController},
    inventory::WeaponInventory,
    messages::{SwitchKind, SwitchWeaponRequest, WeaponChanged},
    stats::WeaponConfig,
    weapon::spawn_weapon,
};

const SLOT_KEYS: [KeyCode; 4] =
    [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4];

#[derive(Component)]
pub struct Player;

#[derive(Resource, Default, Debug)]
struct PlayerInput {
    move_axis: Vec2,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (gather_move_input, gather_weapon_input.before(apply_switch_requests))
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedUpdate, apply_movement.run_if(in_state(GameState::InGame)));
}

fn spawn(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut changed: MessageWriter<WeaponChanged>,
) {
    let layers = CollisionLayers::new(Layer::Player, [Layer::World, Layer::Enemy]);

    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            FireController::default(),
            Sprite {
                color: Color::srgb(0.2, 0.75, 0.9),
                custom_size: Some(Vec2::splat(26.0)),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 1.0),
            RigidBody::Kinematic,
            Collider::circle(13.0),
            layers,
            LinearVelocity::ZERO,
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    let mut inventory = WeaponInventory::new(player);
    for config in WeaponConfig::arsenal() {
        match spawn_weapon(&mut commands, &config, tunables.projectile_radius) {
            Ok(weapon) => {
                inventory.add(weapon, &mut commands);
            }
            Err(err) => error!("Could not equip {}: {err}", config.name),
        }
    }

    match inventory.switch_to(0, &mut commands) {
        Ok(msg) => {
            changed.write(msg);
        }
        Err(err) => warn!("Player spawned unarmed: {err}"),
    }

    commands.entity(player).insert(inventory);
}

fn gather_move_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else {
        return;
    };
    let mut axis = Vec2::ZERO;

    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
}

/// Level-triggered fire request plus edge-triggered switch requests.
fn gather_weapon_input(
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut q_player: Query<(Entity, &mut FireController, &WeaponInventory), With<Player>>,
    mut switches: MessageWriter<SwitchWeaponRequest>,
) {
    let Ok((player, mut controller, inventory)) = q_player.single_mut() else {
        return;
    };

    if let Some(mouse) = mouse {
        let held = mouse.pressed(MouseButton::Left);
        if controller.firing_requested != held {
            controller.firing_requested = held;
        }
    }

    let Some(keys) = keys else {
        return;
    };

    let mut request = |kind| {
        switches.write(SwitchWeaponRequest { inventory: player, kind });
    };

    if keys.just_pressed(KeyCode::Tab) {
        request(SwitchKind::Next);
    }
    if keys.just_pressed(KeyCode::KeyQ) {
        request(SwitchKind::Previous);
    }
    for (slot, key) in SLOT_KEYS.into_iter().enumerate() {
        if slot < inventory.len() && keys.just_pressed(key) {
            request(SwitchKind::Slot(slot));
        }
    }
}

/// Move, and turn to face the direction of travel so the weapons aim along it.
fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<(&mut LinearVelocity, &mut Rotation), With<Player>>,
) {
    let Ok((mut vel, mut rot)) = q_player.single_mut() else {
        return;
    };
    vel.0 = input.move_axis * tunables.player_speed;

    if input.move_axis != Vec2::ZERO {
        *rot = Rotation::radians(Vec2::Y.angle_to(input.move_axis));
    }
}
