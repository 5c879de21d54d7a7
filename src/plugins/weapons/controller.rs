//! Per-frame fire driver and the switch-request consumer.
//!
//! `FireController::firing_requested` is level-triggered: it stays true while the fire control
//! is held. Rate limiting lives entirely in the weapon cooldown.

use bevy::prelude::*;

use super::inventory::{slot_label, WeaponInventory, WeaponQuery};
use super::messages::{SwitchKind, SwitchWeaponRequest, WeaponChanged};
use super::weapon::Weapon;

#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FireController {
    pub firing_requested: bool,
}

/// Apply queued switch requests to their inventories.
pub fn apply_switch_requests(
    mut commands: Commands,
    mut reader: MessageReader<SwitchWeaponRequest>,
    mut q_inventories: Query<&mut WeaponInventory>,
    mut changed: MessageWriter<WeaponChanged>,
) {
    for req in reader.read() {
        let Ok(mut inventory) = q_inventories.get_mut(req.inventory) else {
            debug!("Switch request for {} without a WeaponInventory", req.inventory);
            continue;
        };

        let result = match req.kind {
            SwitchKind::Slot(index) => inventory.switch_to(index, &mut commands).map(Some),
            SwitchKind::Next => inventory.switch_to_next(&mut commands),
            SwitchKind::Previous => inventory.switch_to_previous(&mut commands),
        };

        match result {
            Ok(Some(msg)) => {
                changed.write(msg);
            }
            Ok(None) => {}
            Err(err) => warn!("Weapon switch ignored: {err}"),
        }
    }
}

/// Fire the current weapon of every controller whose trigger is held.
pub fn drive_fire_controllers(
    mut commands: Commands,
    time: Res<Time>,
    q_controllers: Query<(&FireController, &WeaponInventory)>,
    mut q_weapons: WeaponQuery,
) {
    let now = time.elapsed();

    for (controller, inventory) in &q_controllers {
        if !controller.firing_requested || !inventory.can_fire(now, &q_weapons) {
            continue;
        }
        if let Err(err) = inventory.fire(now, &mut q_weapons, &mut commands) {
            warn!("Shot dropped: {err}");
        }
    }
}

/// Log every selection change as `"Switched to weapon: <name> (i/n)"`.
pub fn log_weapon_changes(
    mut reader: MessageReader<WeaponChanged>,
    q_weapons: Query<&Weapon>,
) {
    for msg in reader.read() {
        let name = q_weapons.get(msg.weapon).map(Weapon::name).unwrap_or("<missing>");
        info!("Switched to weapon: {}", slot_label(name, msg.index, msg.slot_count));
    }
}
