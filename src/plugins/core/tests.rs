use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::core;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);

    let tunables = app.world().resource::<Tunables>();
    assert!(tunables.projectile_radius > 0.0);
    assert!(tunables.player_speed > 0.0);
    assert_eq!(app.world().resource::<ClearColor>().0, core::BACKGROUND);
}

#[test]
fn keeps_tunables_inserted_before_the_plugin() {
    let mut app = App::new();
    app.insert_resource(Tunables { projectile_radius: 9.0, ..Tunables::default() });
    core::plugin(&mut app);

    assert_eq!(app.world().resource::<Tunables>().projectile_radius, 9.0);
}
