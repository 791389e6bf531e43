//! Lane Rush - a three-lane endless runner game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tick, spawning, collisions, game state)
//! - `engine`: Session driver (timer cadence, input routing, event draining)
//! - `economy`: Currency balance and cosmetic unlock ledger
//! - `store`: Key-value persistence backends

pub mod economy;
pub mod engine;
pub mod sim;
pub mod store;

pub use economy::{CATALOG, Economy, UnlockDef};
pub use engine::Engine;
pub use store::{KvStore, MemStore, StoreError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick period (milliseconds)
    pub const TICK_MS: f64 = 20.0;
    /// Obstacle spawn cadence (milliseconds)
    pub const OBSTACLE_SPAWN_MS: f64 = 2000.0;
    /// Coin spawn cadence (milliseconds)
    pub const COIN_SPAWN_MS: f64 = 1500.0;
    /// Speed escalation cadence (milliseconds)
    pub const SPEED_UP_MS: f64 = 10_000.0;
    /// Maximum catch-up ticks per advance to prevent spiral of death
    pub const MAX_CATCHUP_TICKS: u32 = 8;
    /// Elapsed time per advance is clamped here (stalled/background host)
    pub const MAX_ADVANCE_MS: f64 = 250.0;

    /// Number of lanes
    pub const LANES: u8 = 3;
    /// Starting lane (center)
    pub const CENTER_LANE: u8 = 1;
    /// Horizontal spacing between lane centers
    pub const LANE_WIDTH: f32 = 120.0;

    /// Run speed at the start of a run (units per tick)
    pub const BASE_SPEED: f32 = 5.0;
    /// Speed cap
    pub const MAX_SPEED: f32 = 15.0;
    /// Speed added per escalation interval
    pub const SPEED_STEP: f32 = 0.5;
    /// Display multiplier added per escalation interval
    pub const MULTIPLIER_STEP: f32 = 0.1;
    /// Score accrued per tick while running
    pub const SCORE_PER_TICK: f64 = 0.1;

    /// Probability that a spawned coin is a super coin
    pub const SUPER_COIN_CHANCE: f64 = 0.05;
    /// Currency value of a normal coin
    pub const COIN_VALUE: u32 = 1;
    /// Currency value of a super coin
    pub const SUPER_COIN_VALUE: u32 = 10;

    /// Vertical rise/fall per tick while jumping
    pub const JUMP_STEP: f32 = 5.0;
    /// Jump height cap - ascent flips to descent here
    pub const JUMP_APEX: f32 = 100.0;

    /// Distance coordinate entities spawn at (maximum render distance)
    pub const SPAWN_DISTANCE: f32 = 1000.0;
    /// Obstacles below this position are despawned
    pub const OBSTACLE_DESPAWN: f32 = -150.0;
    /// Coins below this position are despawned
    pub const COIN_DESPAWN: f32 = -50.0;

    /// Player bounding box (rest height is the bottom edge at offset 0)
    pub const PLAYER_REST: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;

    /// Entity bounding boxes
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    pub const OBSTACLE_HEIGHT: f32 = 60.0;
    pub const COIN_SIZE: f32 = 30.0;
}

/// Horizontal center of a lane in world units (center lane at 0)
#[inline]
pub fn lane_center_x(lane: u8) -> f32 {
    (lane as f32 - consts::CENTER_LANE as f32) * consts::LANE_WIDTH
}

/// Hook up `log` to the browser console (call once from the host page)
#[cfg(target_arch = "wasm32")]
pub fn init_console_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
