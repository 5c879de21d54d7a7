//! Physics plugin: Avian in pixel units, top-down (no gravity).
//!
//! Projectiles are dynamic sensors driven by their launch velocity; they never push anything,
//! they only produce `CollisionStart` messages.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let ppm = app.world().resource::<Tunables>().pixels_per_meter;
    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm));
    app.insert_resource(Gravity(Vec2::ZERO));
}
