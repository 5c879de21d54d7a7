//! Global game state.
//!
//! Gameplay systems (firing, projectile lifecycle) only run while `InGame`.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
