use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::test_utils::{fixed_time_with_delta, run_system_once};
use crate::plugins::weapons::damage::Health;

use super::*;

#[test]
fn spawns_four_static_walls_on_the_world_layer() {
    let mut world = World::new();
    run_system_once(&mut world, spawn_walls);

    let walls: Vec<CollisionLayers> = world
        .query::<(&Name, &RigidBody, &CollisionLayers)>()
        .iter(&world)
        .filter(|(n, rb, _)| n.as_str().starts_with("Wall") && matches!(**rb, RigidBody::Static))
        .map(|(_, _, layers)| *layers)
        .collect();

    assert_eq!(walls.len(), 4);
    assert!(walls.iter().all(|l| l.memberships.has_all(Layer::World)));
    assert!(walls.iter().all(|l| l.filters.has_all(Layer::PlayerProjectile)));
}

#[test]
fn spawns_three_targets_with_health_on_the_enemy_layer() {
    let mut world = World::new();
    run_system_once(&mut world, spawn_targets);

    let mut q = world.query_filtered::<(&Health, &CollisionLayers), With<Target>>();
    let targets: Vec<_> = q.iter(&world).collect();

    assert_eq!(targets.len(), 3);
    for (health, layers) in targets {
        assert_eq!(health.hp, TARGET_HP);
        assert!(layers.memberships.has_all(Layer::Enemy));
        assert!(layers.filters.has_all(Layer::PlayerProjectile));
    }
}

#[test]
fn depleted_target_starts_dying_and_stops_colliding() {
    let mut world = World::new();
    let e = world
        .spawn((
            Target,
            Health::new(0.0),
            TargetState::Alive,
            Sprite::default(),
            target_layers(),
        ))
        .id();
    let healthy = world
        .spawn((Target, Health::new(1.0), TargetState::Alive, Sprite::default(), target_layers()))
        .id();

    run_system_once(&mut world, target_death_trigger);

    assert!(matches!(world.get::<TargetState>(e).unwrap(), TargetState::Dying { .. }));
    assert_eq!(*world.get::<CollisionLayers>(e).unwrap(), cleared_target_layers());
    assert!(matches!(world.get::<TargetState>(healthy).unwrap(), TargetState::Alive));
}

#[test]
fn finished_fade_marks_pending_despawn_and_cleanup_removes_it() {
    let mut world = World::new();
    world.insert_resource(fixed_time_with_delta(1.0));
    let e = world
        .spawn((
            Target,
            TargetState::Dying { timer: Timer::from_seconds(DEATH_FADE_SECS, TimerMode::Once) },
            Sprite::default(),
            Transform::default(),
        ))
        .id();

    run_system_once(&mut world, target_death_progress);

    assert!(world.get::<PendingDespawn>(e).is_some());
    assert!(matches!(world.get::<TargetState>(e).unwrap(), TargetState::Dead));

    run_system_once(&mut world, despawn_cleared_targets);
    assert!(world.get_entity(e).is_err());
}
