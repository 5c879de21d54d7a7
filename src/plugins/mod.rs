//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::weapons::WeaponsPlugin;

pub mod arena;
pub mod core;
pub mod physics;
pub mod player;
pub mod weapons;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
///
/// `core` goes first: physics reads `Tunables` while building.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    arena::plugin(app);
    app.add_plugins(WeaponsPlugin);
    player::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
