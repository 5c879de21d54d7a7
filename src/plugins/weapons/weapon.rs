//! A weapon owns its projectile pool, its firing parameters and its cooldown clock.

use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;

use super::error::WeaponError;
use super::messages::UpgradeWeaponStats;
use super::pool::{EntityPool, PooledHandle};
use super::projectile::{arm_projectile, Projectile, ProjectileBundle, PROJECTILE_Z};
use super::stats::{ProjectileStats, WeaponConfig};

#[derive(Component, Debug)]
pub struct Weapon {
    /// The entity this component lives on; written into every projectile as its owner.
    entity: Entity,
    name: String,
    description: String,
    stats: Arc<ProjectileStats>,
    cooldown: Duration,
    bullets_per_shot: u32,
    spread_angle: f32,
    fire_offset: Vec2,
    projectile_radius: f32,
    next_fire_at: Duration,
    pool: EntityPool<ProjectileBundle>,
}

impl Weapon {
    pub fn new(entity: Entity, config: &WeaponConfig, projectile_radius: f32) -> Self {
        let pool = EntityPool::new(config.pool_size, move || {
            Ok(ProjectileBundle::pooled(entity, projectile_radius))
        });
        Self::with_pool(entity, config, projectile_radius, pool)
    }

    /// Build a weapon around an existing pool (custom factories, tests).
    pub fn with_pool(
        entity: Entity,
        config: &WeaponConfig,
        projectile_radius: f32,
        pool: EntityPool<ProjectileBundle>,
    ) -> Self {
        Self {
            entity,
            name: config.name.clone(),
            description: config.description.clone(),
            stats: Arc::new(config.stats.clone()),
            cooldown: Duration::from_secs_f32(config.cooldown.max(0.0)),
            bullets_per_shot: config.bullets_per_shot,
            spread_angle: config.spread_angle,
            fire_offset: config.fire_offset,
            projectile_radius,
            next_fire_at: Duration::ZERO,
            pool,
        }
    }

    #[inline]
    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn stats(&self) -> &Arc<ProjectileStats> {
        &self.stats
    }

    #[inline]
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    #[inline]
    pub fn ready_at(&self) -> Duration {
        self.next_fire_at
    }

    #[inline]
    pub fn pool(&self) -> &EntityPool<ProjectileBundle> {
        &self.pool
    }

    #[inline]
    pub fn pool_mut(&mut self) -> &mut EntityPool<ProjectileBundle> {
        &mut self.pool
    }

    #[inline]
    pub fn can_fire(&self, now: Duration) -> bool {
        now >= self.next_fire_at
    }

    /// Fire one shot from `fire_point` (the weapon's world transform). Returns the number of
    /// projectiles armed; 0 while cooling down.
    ///
    /// The cooldown restarts at `now`, so calls during the cooldown cannot bank shots.
    /// If the pool cannot supply every projectile of the shot, none is armed and the
    /// already-acquired handles go straight back to the pool.
    pub fn fire(
        &mut self,
        now: Duration,
        fire_point: &GlobalTransform,
        commands: &mut Commands,
    ) -> Result<usize, WeaponError> {
        if !self.can_fire(now) {
            return Ok(0);
        }
        self.next_fire_at = now + self.cooldown;

        let mut handles: Vec<PooledHandle> = Vec::with_capacity(self.bullets_per_shot as usize);
        for _ in 0..self.bullets_per_shot {
            match self.pool.acquire(commands) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    for handle in handles {
                        self.pool.release(handle);
                    }
                    return Err(err.into());
                }
            }
        }

        let base = fire_point.compute_transform();
        let origin = base.transform_point(self.fire_offset.extend(0.0));
        let origin = origin.truncate().extend(PROJECTILE_Z);

        for (handle, angle) in handles
            .iter()
            .zip(spread_angles(self.bullets_per_shot, self.spread_angle))
        {
            let rotation = base.rotation * Quat::from_rotation_z(angle.to_radians());
            let pose = Transform::from_translation(origin).with_rotation(rotation);
            arm_projectile(
                commands,
                *handle,
                self.entity,
                pose,
                Arc::clone(&self.stats),
                self.projectile_radius,
            );
        }

        Ok(handles.len())
    }

    /// Swap in a new stats snapshot and preload it into every idle pooled projectile.
    /// Projectiles already in flight keep the snapshot they were armed with.
    ///
    /// Returns the number of idle projectiles reconfigured.
    pub fn upgrade_stats(
        &mut self,
        stats: ProjectileStats,
        projectiles: &mut Query<&mut Projectile>,
    ) -> usize {
        self.stats = Arc::new(stats);

        let mut configured = 0;
        for handle in self.pool.free_handles() {
            if let Ok(mut projectile) = projectiles.get_mut(handle.entity()) {
                projectile.configure(Arc::clone(&self.stats));
                configured += 1;
            }
        }
        configured
    }
}

/// Fan angles in degrees, in index order, centered on 0.
pub fn spread_angles(bullets_per_shot: u32, spread_angle: f32) -> impl Iterator<Item = f32> {
    let step = if bullets_per_shot > 1 {
        spread_angle / (bullets_per_shot - 1) as f32
    } else {
        0.0
    };
    let start = if bullets_per_shot > 1 { -spread_angle / 2.0 } else { 0.0 };

    (0..bullets_per_shot).map(move |i| start + i as f32 * step)
}

/// Spawn a weapon entity (hidden) and pre-warm its pool.
pub fn spawn_weapon(
    commands: &mut Commands,
    config: &WeaponConfig,
    projectile_radius: f32,
) -> Result<Entity, WeaponError> {
    let entity = commands.spawn_empty().id();
    let mut weapon = Weapon::new(entity, config, projectile_radius);

    if let Err(err) = weapon.pool_mut().prewarm(commands) {
        weapon.pool_mut().drain_and_destroy(commands);
        commands.entity(entity).despawn();
        return Err(err.into());
    }

    debug!(
        "Spawned {} ({}): cooldown {:?}, pool of {}",
        weapon.name(),
        weapon.description(),
        weapon.cooldown(),
        weapon.pool().free_count()
    );
    commands.entity(entity).insert((
        Name::new(config.name.clone()),
        weapon,
        Transform::default(),
        Visibility::Hidden,
    ));
    Ok(entity)
}

/// Tear a weapon down: its pool (including in-flight projectiles) and then the weapon itself.
pub fn destroy_weapon(
    commands: &mut Commands,
    entity: Entity,
    weapon: Option<&mut Weapon>,
) -> usize {
    let destroyed = weapon.map_or(0, |w| w.pool_mut().drain_and_destroy(commands));
    commands.entity(entity).try_despawn();
    destroyed
}

/// Consumer for [`UpgradeWeaponStats`] (power-ups and similar producers).
pub fn apply_stat_upgrades(
    mut reader: MessageReader<UpgradeWeaponStats>,
    mut q_weapons: Query<&mut Weapon>,
    mut q_projectiles: Query<&mut Projectile>,
) {
    for req in reader.read() {
        let Ok(mut weapon) = q_weapons.get_mut(req.weapon) else {
            warn!("Stat upgrade ignored: {}", WeaponError::MissingWeapon { entity: req.weapon });
            continue;
        };

        let configured = weapon.upgrade_stats(req.stats.clone(), &mut q_projectiles);
        debug!("Upgraded {}: {configured} pooled projectiles reconfigured", weapon.name());
    }
}
