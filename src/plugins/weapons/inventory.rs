//! Ordered weapon inventory and the "current weapon" state machine.
//!
//! # Invariants
//! - `current`, when set, is a valid index into `slots`.
//! - An empty inventory has no current weapon.
//! - Exactly one slot is active (visible) at a time: the current one.
//!
//! Weapons live on their own entities, parented to the inventory's owner so their fire points
//! follow it. The inventory only stores their ids in slot order, so operations that touch weapon
//! data take the weapon query explicitly.

use std::time::Duration;

use bevy::prelude::*;

use super::error::WeaponError;
use super::messages::WeaponChanged;
use super::weapon::{destroy_weapon, Weapon};

/// Weapons plus the transform their projectiles are fired from.
pub type WeaponQuery<'w, 's> = Query<'w, 's, (&'static mut Weapon, &'static GlobalTransform)>;

#[derive(Component, Debug, Clone)]
pub struct WeaponInventory {
    /// Entity carrying this inventory; every held weapon is its child.
    owner: Entity,
    slots: Vec<Entity>,
    current: Option<usize>,
}

impl WeaponInventory {
    pub fn new(owner: Entity) -> Self {
        Self { owner, slots: Vec::new(), current: None }
    }

    #[inline]
    pub fn owner(&self) -> Entity {
        self.owner
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Entity] {
        &self.slots
    }

    #[inline]
    pub fn weapon_at(&self, index: usize) -> Option<Entity> {
        self.slots.get(index).copied()
    }

    #[inline]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    #[inline]
    pub fn current_weapon(&self) -> Option<Entity> {
        self.current.and_then(|i| self.weapon_at(i))
    }

    /// Append a weapon, deactivated and mounted on the owner. Does not change the selection.
    /// Returns its slot.
    pub fn add(&mut self, weapon: Entity, commands: &mut Commands) -> usize {
        self.slots.push(weapon);
        self.mount(weapon, commands);
        self.slots.len() - 1
    }

    /// Parent `weapon` to the owner at the owner's origin, hidden.
    fn mount(&self, weapon: Entity, commands: &mut Commands) {
        commands.entity(self.owner).add_child(weapon);
        commands.entity(weapon).insert((Transform::IDENTITY, Visibility::Hidden));
    }

    /// Select slot `index`. Re-selecting the current slot is allowed and still notifies.
    pub fn switch_to(
        &mut self,
        index: usize,
        commands: &mut Commands,
    ) -> Result<WeaponChanged, WeaponError> {
        let Some(target) = self.weapon_at(index) else {
            return Err(WeaponError::InvalidIndex { index, len: self.len() });
        };

        let previous = self.current_weapon();
        if let Some(previous) = previous.filter(|&p| p != target) {
            commands.entity(previous).insert(Visibility::Hidden);
        }

        self.current = Some(index);

        if previous != Some(target) {
            commands.entity(target).insert(Visibility::Inherited);
        }

        Ok(WeaponChanged { weapon: target, index, slot_count: self.len() })
    }

    /// Cycle forward. `Ok(None)` when there is nothing to cycle through.
    pub fn switch_to_next(
        &mut self,
        commands: &mut Commands,
    ) -> Result<Option<WeaponChanged>, WeaponError> {
        let len = self.len();
        if len <= 1 {
            return Ok(None);
        }
        let next = (self.current.unwrap_or(0) + 1) % len;
        self.switch_to(next, commands).map(Some)
    }

    /// Cycle backward. `Ok(None)` when there is nothing to cycle through.
    pub fn switch_to_previous(
        &mut self,
        commands: &mut Commands,
    ) -> Result<Option<WeaponChanged>, WeaponError> {
        let len = self.len();
        if len <= 1 {
            return Ok(None);
        }
        let previous = (self.current.unwrap_or(0) + len - 1) % len;
        self.switch_to(previous, commands).map(Some)
    }

    /// Remove and destroy the weapon in slot `index` (its pool goes with it).
    ///
    /// Removing the current weapon selects the one that slides into its slot, or the new last
    /// slot; removing a slot before the current one keeps the same weapon selected.
    pub fn remove(
        &mut self,
        index: usize,
        weapons: &mut Query<&mut Weapon>,
        commands: &mut Commands,
    ) -> Result<Option<WeaponChanged>, WeaponError> {
        if index >= self.len() {
            return Err(WeaponError::InvalidIndex { index, len: self.len() });
        }

        let removed = self.slots.remove(index);
        let mut changed = None;

        match self.current {
            Some(current) if current == index => {
                self.current = None;
                if !self.slots.is_empty() {
                    let fallback = current.min(self.len() - 1);
                    changed = Some(self.switch_to(fallback, commands)?);
                }
            }
            Some(current) if index < current => self.current = Some(current - 1),
            _ => {}
        }

        let mut weapon = weapons.get_mut(removed).ok();
        let destroyed = destroy_weapon(commands, removed, weapon.as_deref_mut());
        debug!("Removed weapon {removed} from slot {index} ({destroyed} projectiles destroyed)");

        Ok(changed)
    }

    /// Swap the current weapon for `weapon` in the same slot and select it.
    pub fn replace_current(
        &mut self,
        weapon: Entity,
        weapons: &mut Query<&mut Weapon>,
        commands: &mut Commands,
    ) -> Result<WeaponChanged, WeaponError> {
        if self.is_empty() {
            return Err(WeaponError::NoCurrentWeapon);
        }
        let index = self.current.unwrap_or(0);

        let old = std::mem::replace(&mut self.slots[index], weapon);
        self.mount(weapon, commands);
        if self.current == Some(index) {
            self.current = None;
        }
        let mut old_weapon = weapons.get_mut(old).ok();
        destroy_weapon(commands, old, old_weapon.as_deref_mut());

        self.switch_to(index, commands)
    }

    pub fn can_fire(&self, now: Duration, weapons: &WeaponQuery) -> bool {
        self.current_weapon()
            .and_then(|entity| weapons.get(entity).ok())
            .is_some_and(|(weapon, _)| weapon.can_fire(now))
    }

    /// Fire the current weapon. Returns the number of projectiles armed.
    pub fn fire(
        &self,
        now: Duration,
        weapons: &mut WeaponQuery,
        commands: &mut Commands,
    ) -> Result<usize, WeaponError> {
        let entity = self.current_weapon().ok_or(WeaponError::NoCurrentWeapon)?;
        let (mut weapon, fire_point) = weapons
            .get_mut(entity)
            .map_err(|_| WeaponError::MissingWeapon { entity })?;

        weapon.fire(now, fire_point, commands)
    }

    /// HUD-style label, e.g. `"Shotgun (4/5)"`.
    pub fn current_label(&self, current_name: Option<&str>) -> String {
        match (self.current, current_name) {
            (Some(index), Some(name)) => slot_label(name, index, self.len()),
            _ => "No Weapon".to_string(),
        }
    }
}

/// `"<name> (<index + 1>/<slot_count>)"`.
pub fn slot_label(name: &str, index: usize, slot_count: usize) -> String {
    format!("{name} ({}/{slot_count})", index + 1)
}
