//! Damage capability.
//!
//! Anything a projectile may hurt carries `Health`. Colliding parties without it are unaffected
//! beyond stopping the projectile.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub hp: f32,
}

impl Health {
    pub fn new(hp: f32) -> Self {
        Self { hp }
    }

    #[inline]
    pub fn take_damage(&mut self, amount: f32) {
        self.hp -= amount;
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.hp <= 0.0
    }
}
