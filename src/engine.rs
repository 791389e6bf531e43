//! Session driver
//!
//! Owns the cooperative timer set (tick, obstacle spawn, coin spawn, speed
//! escalation), routes UI input into the simulation, applies the economy
//! effects of simulation events, and exposes read-only snapshots for the
//! render surface. Everything runs on the host's single control thread -
//! the host calls `advance` with elapsed wall-clock time each frame.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::economy::Economy;
use crate::sim::state::{Coin, GameEvent, GamePhase, GameState, Obstacle, Player};
use crate::sim::{increase_speed, spawn_coin, spawn_obstacle, tick};
use crate::store::KvStore;

/// A fixed-period cooperative task driven by elapsed milliseconds
#[derive(Debug, Clone)]
struct Periodic {
    period_ms: f64,
    elapsed_ms: f64,
}

impl Periodic {
    fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Drop any accumulated time (cancellation)
    fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }

    /// Accumulate `dt_ms` and return how many times the task fires,
    /// capped per call; leftover time stays accumulated.
    fn fire(&mut self, dt_ms: f64, cap: u32) -> u32 {
        self.elapsed_ms += dt_ms;
        let mut count = 0;
        while self.elapsed_ms >= self.period_ms && count < cap {
            self.elapsed_ms -= self.period_ms;
            count += 1;
        }
        count
    }
}

/// An instantiable game session: one per page load / process
pub struct Engine<S: KvStore> {
    state: GameState,
    economy: Economy,
    store: S,
    rng: Pcg32,
    tick_timer: Periodic,
    obstacle_timer: Periodic,
    coin_timer: Periodic,
    speed_timer: Periodic,
    events: Vec<GameEvent>,
}

impl<S: KvStore> Engine<S> {
    /// Create an idle session. The economy ledger is restored from the
    /// store; the seed drives the spawn RNG for the whole session.
    pub fn new(seed: u64, store: S) -> Self {
        let economy = Economy::load(&store);
        log::info!("engine ready (seed {seed})");
        Self {
            state: GameState::new(),
            economy,
            store,
            rng: Pcg32::seed_from_u64(seed),
            tick_timer: Periodic::new(TICK_MS),
            obstacle_timer: Periodic::new(OBSTACLE_SPAWN_MS),
            coin_timer: Periodic::new(COIN_SPAWN_MS),
            speed_timer: Periodic::new(SPEED_UP_MS),
            events: Vec::new(),
        }
    }

    /// Start a run. Valid from Idle or GameOver; a request while already
    /// Running is a no-op. Prior timers are cancelled before scheduling
    /// so no stale accumulated time leaks into the new run.
    pub fn request_start(&mut self) {
        if self.state.phase == GamePhase::Running {
            return;
        }
        self.cancel_timers();
        self.state.start_run();
    }

    /// Advance all scheduled tasks by `dt_ms` of wall-clock time.
    ///
    /// Tasks fire in a fixed order (ticks, then spawns, then speed-up) and
    /// each runs to completion before the next. A stalled host (background
    /// tab) is clamped to a bounded catch-up rather than spiraling.
    pub fn advance(&mut self, dt_ms: f64) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        let dt_ms = dt_ms.min(MAX_ADVANCE_MS);

        for _ in 0..self.tick_timer.fire(dt_ms, MAX_CATCHUP_TICKS) {
            tick(&mut self.state);
            if self.state.phase != GamePhase::Running {
                break;
            }
        }

        if self.state.phase == GamePhase::Running {
            for _ in 0..self.obstacle_timer.fire(dt_ms, 1) {
                spawn_obstacle(&mut self.state, &mut self.rng);
            }
            for _ in 0..self.coin_timer.fire(dt_ms, 1) {
                spawn_coin(&mut self.state, &mut self.rng);
            }
            for _ in 0..self.speed_timer.fire(dt_ms, 1) {
                increase_speed(&mut self.state);
            }
        } else {
            // Run ended mid-advance: cancel everything for cleanliness
            self.cancel_timers();
        }

        self.apply_events();
    }

    fn cancel_timers(&mut self) {
        self.tick_timer.reset();
        self.obstacle_timer.reset();
        self.coin_timer.reset();
        self.speed_timer.reset();
    }

    /// Move simulation events into the host-facing queue, applying their
    /// economy side effects on the way through.
    fn apply_events(&mut self) {
        for event in self.state.events.drain(..) {
            if let GameEvent::CoinCollected { value, .. } = event {
                self.economy.collect_coin(&mut self.store, value);
            }
            self.events.push(event);
        }
    }

    /// Take all pending events (audio and UI collaborators subscribe here)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // --- input requests -------------------------------------------------

    pub fn request_jump(&mut self) {
        self.state.request_jump();
    }

    pub fn request_lane_change(&mut self, direction: i8) {
        self.state.request_lane_change(direction);
    }

    pub fn request_purchase(&mut self, id: &str) {
        self.economy.purchase(&mut self.store, id);
    }

    pub fn request_equip(&mut self, id: &str) {
        self.economy.equip(&mut self.store, id);
    }

    // --- read-only snapshots --------------------------------------------

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Displayed (floored) score
    pub fn score(&self) -> u64 {
        self.state.score_display()
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.state.speed_multiplier
    }

    pub fn balance(&self) -> u64 {
        self.economy.balance()
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.state.obstacles
    }

    pub fn coins(&self) -> &[Coin] {
        &self.state.coins
    }

    pub fn equipped(&self) -> &str {
        self.economy.equipped()
    }

    pub fn owns(&self, id: &str) -> bool {
        self.economy.owns(id)
    }
}
