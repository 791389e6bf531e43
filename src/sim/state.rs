//! Game state and core simulation types
//!
//! The authoritative session state: phase, run progress, the player, and
//! every live entity. Mutated only by input requests and the fixed tick.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu shown, no run active
    #[default]
    Idle,
    /// Tick loop active
    Running,
    /// Run ended, score frozen
    GameOver,
}

/// Player vertical sub-state - one jump in flight at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpPhase {
    #[default]
    Grounded,
    Ascending,
    Descending,
}

/// The player sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Lane index (0 left, 1 center, 2 right)
    pub lane: u8,
    /// Vertical offset above rest (rest = 0)
    pub height: f32,
    pub jump: JumpPhase,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            lane: CENTER_LANE,
            height: 0.0,
            jump: JumpPhase::Grounded,
        }
    }
}

impl Player {
    /// True while a jump is in flight
    pub fn airborne(&self) -> bool {
        self.jump != JumpPhase::Grounded
    }
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: u8,
    /// Distance coordinate, decreasing toward the player each tick
    pub pos: f32,
    /// Tick the obstacle was created on
    pub spawned_tick: u64,
}

/// A coin entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub lane: u8,
    pub pos: f32,
    /// Rare bonus variant
    pub super_coin: bool,
    /// Currency awarded on collection (1 or 10)
    pub value: u32,
}

/// Discrete notifications for host collaborators (audio, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    CoinCollected { value: u32, super_coin: bool },
    GameOver { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Accumulated score (displayed floored)
    pub score: f64,
    /// Current run speed, bounded [BASE_SPEED, MAX_SPEED]
    pub speed: f32,
    /// Display-only multiplier, incremented independently of speed
    pub speed_multiplier: f32,
    /// Ticks elapsed in the current run
    pub time_ticks: u64,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    /// Pending events, drained by the engine after each advance
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create an idle session
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0.0,
            speed: BASE_SPEED,
            speed_multiplier: 1.0,
            time_ticks: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            coins: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Reset run state and enter Running. Valid from Idle or GameOver;
    /// a start request while already Running is a no-op.
    pub fn start_run(&mut self) {
        if self.phase == GamePhase::Running {
            return;
        }
        self.score = 0.0;
        self.speed = BASE_SPEED;
        self.speed_multiplier = 1.0;
        self.time_ticks = 0;
        self.player = Player::default();
        self.obstacles.clear();
        self.coins.clear();
        self.phase = GamePhase::Running;
        log::info!("run started");
    }

    /// End the run. Valid only from Running; calling twice is a no-op.
    pub fn game_over(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;
        let score = self.score_display();
        self.events.push(GameEvent::GameOver { score });
        log::info!(
            "run over: score {} after {} ticks",
            score,
            self.time_ticks
        );
    }

    /// Move one lane left (-1) or right (+1). Out-of-range requests and
    /// requests outside Running are no-ops.
    pub fn request_lane_change(&mut self, direction: i8) {
        if self.phase != GamePhase::Running {
            return;
        }
        let target = self.player.lane as i8 + direction;
        if (0..LANES as i8).contains(&target) {
            self.player.lane = target as u8;
        }
    }

    /// Begin a jump. Ignored (not queued) while a jump is already in flight
    /// or outside Running.
    pub fn request_jump(&mut self) {
        if self.phase != GamePhase::Running || self.player.airborne() {
            return;
        }
        self.player.jump = JumpPhase::Ascending;
    }

    /// Displayed score: floor of the accumulated value
    pub fn score_display(&self) -> u64 {
        self.score.floor() as u64
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
