//! Entity spawning
//!
//! Obstacles and coins enter the world at the maximum render distance in a
//! uniformly random lane. Overlapping spawns are permitted - there is no
//! collision avoidance between simultaneously spawned entities.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Coin, GameState, Obstacle};
use crate::consts::*;

/// Spawn one obstacle in a random lane at the spawn distance
pub fn spawn_obstacle(state: &mut GameState, rng: &mut Pcg32) {
    let lane = rng.random_range(0..LANES);
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        lane,
        pos: SPAWN_DISTANCE,
        spawned_tick: state.time_ticks,
    });
}

/// Spawn one coin in a random lane; 5% chance of the super variant
pub fn spawn_coin(state: &mut GameState, rng: &mut Pcg32) {
    let super_coin = rng.random_bool(SUPER_COIN_CHANCE);
    let lane = rng.random_range(0..LANES);
    let id = state.next_entity_id();
    state.coins.push(Coin {
        id,
        lane,
        pos: SPAWN_DISTANCE,
        super_coin,
        value: if super_coin { SUPER_COIN_VALUE } else { COIN_VALUE },
    });
}
