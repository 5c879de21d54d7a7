//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - `rapid_fire::game::configure_headless` installs gameplay plugins.

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;

use rapid_fire::plugins::player::Player;
use rapid_fire::plugins::weapons::inventory::WeaponInventory;

pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    rapid_fire::game::configure_headless(&mut app);
    // Complete plugin setup as `App::run` would (avian registers resources in `finish`).
    app.finish();
    app.cleanup();
    app
}

/// Headless app after the first frame: `InGame` entered, player spawned.
pub fn app_in_game() -> (App, Entity) {
    let mut app = app_headless();
    app.update();

    let player = app
        .world_mut()
        .query_filtered::<Entity, (With<Player>, With<WeaponInventory>)>()
        .single(app.world())
        .expect("player spawned on entering InGame");
    (app, player)
}
