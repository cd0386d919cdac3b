//! Mission constants and tuning parameters.

use glam::Vec3;

/// Host frame rate the runner drives ticks at (Hz).
pub const TICK_RATE: u32 = 30;

// --- Targets ---

/// Number of target slots, one per spawn location.
pub const TARGET_COUNT: usize = 6;

/// Fixed world positions the targets are created at, in slot order.
pub const TARGET_SPAWNS: [Vec3; TARGET_COUNT] = [
    Vec3::new(-829.0, -1219.0, 6.0),
    Vec3::new(-3021.0, 84.0, 11.0),
    Vec3::new(6.0, -711.0, 45.0),
    Vec3::new(378.0, -1901.0, 24.0),
    Vec3::new(-291.0, -428.0, 29.0),
    Vec3::new(-1155.0, -524.0, 31.0),
];

/// Name of the relationship group targets are assigned to.
pub const TARGET_RELATIONSHIP_GROUP: &str = "_ASSASSIN_TARGETS";

/// Label on the target blip.
pub const TARGET_BLIP_NAME: &str = "Assassination Target";

/// Target blip scale.
pub const TARGET_BLIP_SCALE: f32 = 0.8;

// --- Squads ---

/// Smallest bodyguard squad per target.
pub const GUARD_COUNT_MIN: u32 = 1;

/// Largest bodyguard squad per target.
pub const GUARD_COUNT_MAX: u32 = 3;

/// Guards spawn within +/- this many units of the target on x and y.
pub const GUARD_SPREAD: f32 = 2.0;

/// Armor granted to each guard.
pub const GUARD_ARMOR: u32 = 300;

/// Ammo granted with the guard rifle. Effectively unlimited.
pub const GUARD_AMMO: u32 = u32::MAX;

/// Minimum spacing between squad members.
pub const SQUAD_SEPARATION: f32 = 1.0;

// --- HUD ---

/// How long the start subtitle stays up (seconds).
pub const START_SUBTITLE_SECS: u64 = 15;

// --- Rewards and penalties ---

/// Wanted level the player is raised to after killing a target.
pub const WANTED_FLOOR: u8 = 3;

/// Money granted on success.
pub const MONEY_REWARD: i32 = 5000;

/// Experience granted on success.
pub const XP_REWARD: i32 = 30;
