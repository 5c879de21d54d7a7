//! Immutable weapon configuration records and presets.
//!
//! `ProjectileStats` is shared as `Arc<ProjectileStats>`: a weapon holds the current snapshot and
//! every armed projectile holds the snapshot it was armed with. Reconfiguring a weapon swaps the
//! whole `Arc`, never a field.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileStats {
    /// Pixels per second along the projectile's local up axis.
    pub speed: f32,
    /// Seconds before an unhit projectile returns to its pool.
    pub lifetime: f32,
    pub damage: f32,
    pub target_layers: LayerMask,
    pub color: Color,
    pub scale: Vec2,
}

impl ProjectileStats {
    pub fn new(speed: f32, lifetime: f32, damage: f32) -> Self {
        Self {
            speed,
            lifetime,
            damage,
            target_layers: default_target_layers(),
            color: Color::WHITE,
            scale: Vec2::ONE,
        }
    }

    pub fn with_target_layers(mut self, layers: impl Into<LayerMask>) -> Self {
        self.target_layers = layers.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Bitmask test against the colliding party's layer memberships.
    #[inline]
    pub fn targets(&self, memberships: LayerMask) -> bool {
        self.target_layers.0 & memberships.0 != 0
    }

    pub fn basic() -> Self {
        Self::new(600.0, 3.0, 1.0)
    }

    pub fn rapid_fire() -> Self {
        Self::new(720.0, 2.5, 0.7)
            .with_color(Color::srgb(1.0, 0.92, 0.016))
            .with_scale(Vec2::splat(0.8))
    }

    pub fn heavy() -> Self {
        Self::new(360.0, 4.0, 2.5)
            .with_color(Color::srgb(1.0, 0.0, 0.0))
            .with_scale(Vec2::splat(1.3))
    }

    pub fn shotgun() -> Self {
        Self::new(480.0, 2.0, 0.8)
            .with_color(Color::srgb(1.0, 0.5, 0.0))
            .with_scale(Vec2::splat(0.7))
    }

    pub fn laser() -> Self {
        Self::new(1200.0, 1.5, 1.2)
            .with_color(Color::srgb(0.0, 1.0, 1.0))
            .with_scale(Vec2::new(0.5, 2.0))
    }
}

impl Default for ProjectileStats {
    fn default() -> Self {
        Self::basic()
    }
}

/// Player projectiles hit walls and enemies, never each other.
fn default_target_layers() -> LayerMask {
    LayerMask::from([Layer::World, Layer::Enemy])
}

/// Everything needed to build one weapon.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponConfig {
    pub name: String,
    pub description: String,
    pub stats: ProjectileStats,
    /// Seconds between shots.
    pub cooldown: f32,
    pub bullets_per_shot: u32,
    /// Total fan width in degrees.
    pub spread_angle: f32,
    pub pool_size: usize,
    /// Fire point relative to the weapon's transform.
    pub fire_offset: Vec2,
}

impl WeaponConfig {
    pub const DEFAULT_POOL_SIZE: usize = 20;

    pub fn new(name: impl Into<String>, stats: ProjectileStats) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            stats,
            cooldown: 0.2,
            bullets_per_shot: 1,
            spread_angle: 0.0,
            pool_size: Self::DEFAULT_POOL_SIZE,
            fire_offset: Vec2::new(0.0, 18.0),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cooldown(mut self, seconds: f32) -> Self {
        self.cooldown = seconds;
        self
    }

    pub fn with_spread(mut self, bullets_per_shot: u32, spread_angle: f32) -> Self {
        self.bullets_per_shot = bullets_per_shot;
        self.spread_angle = spread_angle;
        self
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_fire_offset(mut self, offset: Vec2) -> Self {
        self.fire_offset = offset;
        self
    }

    pub fn basic_blaster() -> Self {
        Self::new("Basic Blaster", ProjectileStats::basic())
            .with_description("A basic weapon")
            .with_cooldown(0.3)
    }

    pub fn rapid_blaster() -> Self {
        Self::new("Rapid Blaster", ProjectileStats::rapid_fire())
            .with_description("Light rounds, high rate of fire")
            .with_cooldown(0.1)
    }

    pub fn heavy_cannon() -> Self {
        Self::new("Heavy Cannon", ProjectileStats::heavy())
            .with_description("Slow, hard-hitting shells")
            .with_cooldown(0.8)
    }

    pub fn shotgun() -> Self {
        Self::new("Shotgun", ProjectileStats::shotgun())
            .with_description("Five pellets in a 30 degree fan")
            .with_cooldown(0.6)
            .with_spread(5, 30.0)
    }

    pub fn laser_rifle() -> Self {
        Self::new("Laser Rifle", ProjectileStats::laser())
            .with_description("Fast, long bolts")
            .with_cooldown(0.15)
    }

    /// The default loadout, in slot order.
    pub fn arsenal() -> Vec<Self> {
        vec![
            Self::basic_blaster(),
            Self::rapid_blaster(),
            Self::heavy_cannon(),
            Self::shotgun(),
            Self::laser_rifle(),
        ]
    }
}
