//! Lane-gated collision detection
//!
//! Boxes are computed from numeric model fields only. Entities in a lane
//! other than the player's never collide - the x axis exists so the model
//! mirrors the on-screen geometry, but the lane gate decides first.

use glam::Vec2;

use super::state::{Coin, Obstacle, Player};
use crate::consts::*;
use crate::lane_center_x;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box centered on `x`, standing on `bottom`
    pub fn standing(x: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x - width / 2.0, bottom),
            max: Vec2::new(x + width / 2.0, bottom + height),
        }
    }

    /// True when the boxes overlap (touching edges count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }
}

/// Player box at its current lane and jump height
pub fn player_box(player: &Player) -> Aabb {
    Aabb::standing(
        lane_center_x(player.lane),
        PLAYER_REST + player.height,
        PLAYER_WIDTH,
        PLAYER_HEIGHT,
    )
}

pub fn obstacle_box(obstacle: &Obstacle) -> Aabb {
    Aabb::standing(
        lane_center_x(obstacle.lane),
        obstacle.pos,
        OBSTACLE_WIDTH,
        OBSTACLE_HEIGHT,
    )
}

pub fn coin_box(coin: &Coin) -> Aabb {
    Aabb::standing(lane_center_x(coin.lane), coin.pos, COIN_SIZE, COIN_SIZE)
}
