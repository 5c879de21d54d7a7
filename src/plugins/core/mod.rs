//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

/// Backdrop behind the arena floor.
pub const BACKGROUND: Color = Color::srgb(0.05, 0.05, 0.07);

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>();
    app.insert_resource(ClearColor(BACKGROUND));
}

#[cfg(test)]
mod tests;
