//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick period only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, coin_box, obstacle_box, player_box};
pub use spawn::{spawn_coin, spawn_obstacle};
pub use state::{Coin, GameEvent, GamePhase, GameState, JumpPhase, Obstacle, Player};
pub use tick::{increase_speed, tick};
