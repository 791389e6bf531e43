//! Fixed-period simulation tick
//!
//! Advances one tick in a fixed order: player motion, entity motion,
//! collision resolution, off-screen cleanup, score accrual. The engine
//! drives the cadence; this module never touches timers.

use super::collision::{coin_box, obstacle_box, player_box};
use super::state::{GameEvent, GamePhase, GameState, JumpPhase};
use crate::consts::*;

/// Advance the simulation by one tick. No-op unless Running.
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.time_ticks += 1;

    advance_player(state);
    advance_entities(state);
    resolve_collisions(state);
    despawn_offscreen(state);

    // Score stops accruing the tick the run ends
    if state.phase == GamePhase::Running {
        state.score += SCORE_PER_TICK;
    }
}

/// Speed escalation, fired on its own cadence while Running.
/// Past the cap the interval keeps firing harmlessly.
pub fn increase_speed(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }
    if state.speed < MAX_SPEED {
        state.speed += SPEED_STEP;
        state.speed_multiplier += MULTIPLIER_STEP;
        log::debug!(
            "speed up: {:.1} (x{:.1})",
            state.speed,
            state.speed_multiplier
        );
    }
}

/// Jump/fall state machine, one step per tick
fn advance_player(state: &mut GameState) {
    let player = &mut state.player;
    match player.jump {
        JumpPhase::Grounded => {}
        JumpPhase::Ascending => {
            player.height += JUMP_STEP;
            if player.height >= JUMP_APEX {
                player.height = JUMP_APEX;
                player.jump = JumpPhase::Descending;
            }
        }
        JumpPhase::Descending => {
            player.height -= JUMP_STEP;
            if player.height <= 0.0 {
                player.height = 0.0;
                player.jump = JumpPhase::Grounded;
            }
        }
    }
}

/// Every live entity closes in by the current speed
fn advance_entities(state: &mut GameState) {
    let speed = state.speed;
    for obstacle in &mut state.obstacles {
        obstacle.pos -= speed;
    }
    for coin in &mut state.coins {
        coin.pos -= speed;
    }
}

/// Lane-gated overlap checks. An obstacle hit ends the run immediately
/// (at most once per tick); coin hits collect and remove the coin.
fn resolve_collisions(state: &mut GameState) {
    let player = player_box(&state.player);
    let lane = state.player.lane;

    for obstacle in &state.obstacles {
        if obstacle.lane == lane && player.overlaps(&obstacle_box(obstacle)) {
            state.game_over();
            return;
        }
    }

    // Reverse index order - collected coins are removed mid-iteration
    for i in (0..state.coins.len()).rev() {
        let coin = &state.coins[i];
        if coin.lane == lane && player.overlaps(&coin_box(coin)) {
            state.events.push(GameEvent::CoinCollected {
                value: coin.value,
                super_coin: coin.super_coin,
            });
            state.coins.remove(i);
        }
    }
}

fn despawn_offscreen(state: &mut GameState) {
    state.obstacles.retain(|o| o.pos >= OBSTACLE_DESPAWN);
    state.coins.retain(|c| c.pos >= COIN_DESPAWN);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, Obstacle};
    use proptest::prelude::*;

    fn running_state() -> GameState {
        let mut state = GameState::new();
        state.start_run();
        state
    }

    fn place_obstacle(state: &mut GameState, lane: u8, pos: f32) {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            lane,
            pos,
            spawned_tick: state.time_ticks,
        });
    }

    fn place_coin(state: &mut GameState, lane: u8, pos: f32, super_coin: bool) {
        let id = state.next_entity_id();
        state.coins.push(Coin {
            id,
            lane,
            pos,
            super_coin,
            value: if super_coin { SUPER_COIN_VALUE } else { COIN_VALUE },
        });
    }

    #[test]
    fn test_tick_noop_outside_running() {
        let mut state = GameState::new();
        tick(&mut state);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.score, 0.0);

        state.start_run();
        state.game_over();
        let ticks = state.time_ticks;
        tick(&mut state);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_score_accrual_10_seconds() {
        // 10000ms of ticks with no spawns -> floor(500 * 0.1) = 50
        let mut state = running_state();
        for _ in 0..500 {
            tick(&mut state);
        }
        assert_eq!(state.score_display(), 50);
    }

    #[test]
    fn test_speed_escalation_to_cap() {
        // 5.0 -> 5.5 after one interval; capped at 15.0 from interval 20 on
        let mut state = running_state();
        increase_speed(&mut state);
        assert_eq!(state.speed, 5.5);
        assert!((state.speed_multiplier - 1.1).abs() < 1e-6);

        for _ in 0..20 {
            increase_speed(&mut state);
        }
        assert_eq!(state.speed, MAX_SPEED);
        let mult_at_cap = state.speed_multiplier;
        increase_speed(&mut state);
        assert_eq!(state.speed, MAX_SPEED);
        assert_eq!(state.speed_multiplier, mult_at_cap);
    }

    #[test]
    fn test_entities_close_in_by_speed() {
        let mut state = running_state();
        place_obstacle(&mut state, 0, SPAWN_DISTANCE);
        place_coin(&mut state, 2, SPAWN_DISTANCE, false);
        tick(&mut state);
        assert_eq!(state.obstacles[0].pos, SPAWN_DISTANCE - BASE_SPEED);
        assert_eq!(state.coins[0].pos, SPAWN_DISTANCE - BASE_SPEED);
    }

    #[test]
    fn test_jump_cycle_returns_to_rest() {
        let mut state = running_state();
        state.request_jump();

        let mut peak: f32 = 0.0;
        let mut airborne_ticks = 0;
        loop {
            tick(&mut state);
            peak = peak.max(state.player.height);
            airborne_ticks += 1;
            if !state.player.airborne() {
                break;
            }
            assert!(airborne_ticks < 100, "jump never landed");
        }

        assert_eq!(peak, JUMP_APEX);
        assert_eq!(state.player.height, 0.0);
        // 20 ticks up, 20 ticks down
        assert_eq!(airborne_ticks, 40);
    }

    #[test]
    fn test_midair_jump_request_ignored() {
        let mut expected = running_state();
        expected.request_jump();
        let mut actual = expected.clone();

        let mut trajectory_expected = Vec::new();
        let mut trajectory_actual = Vec::new();
        for i in 0..50 {
            tick(&mut expected);
            trajectory_expected.push(expected.player.height);

            if i == 10 {
                actual.request_jump(); // airborne - must not re-trigger
            }
            tick(&mut actual);
            trajectory_actual.push(actual.player.height);
        }
        assert_eq!(trajectory_expected, trajectory_actual);
    }

    #[test]
    fn test_obstacle_hit_ends_run_once() {
        // Two obstacles overlap the player band simultaneously
        let mut state = running_state();
        let lane = state.player.lane;
        place_obstacle(&mut state, lane, PLAYER_REST + BASE_SPEED);
        place_obstacle(&mut state, lane, PLAYER_REST + BASE_SPEED);
        tick(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        let overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_cross_lane_obstacle_is_harmless() {
        let mut state = running_state();
        let other_lane = (state.player.lane + 1) % LANES;
        place_obstacle(&mut state, other_lane, PLAYER_REST + BASE_SPEED);
        tick(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_coin_collected_exactly_once() {
        let mut state = running_state();
        let lane = state.player.lane;
        place_coin(&mut state, lane, PLAYER_REST + BASE_SPEED, true);
        place_coin(&mut state, lane, PLAYER_REST + BASE_SPEED, false);
        tick(&mut state);

        assert!(state.coins.is_empty());
        let collected: Vec<_> = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::CoinCollected { .. }))
            .collect();
        assert_eq!(collected.len(), 2);

        // Nothing left to double-award
        tick(&mut state);
        let collected = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::CoinCollected { .. }))
            .count();
        assert_eq!(collected, 2);
    }

    #[test]
    fn test_obstacle_and_coin_outcomes_are_exclusive() {
        // An obstacle hit ends the tick; the coin survives for the next run
        let mut state = running_state();
        let lane = state.player.lane;
        place_obstacle(&mut state, lane, PLAYER_REST + BASE_SPEED);
        place_coin(&mut state, lane, PLAYER_REST + BASE_SPEED, false);
        tick(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(
            !state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::CoinCollected { .. }))
        );
        assert_eq!(state.coins.len(), 1);
    }

    #[test]
    fn test_despawn_thresholds() {
        let mut state = running_state();
        place_obstacle(&mut state, 0, OBSTACLE_DESPAWN + BASE_SPEED / 2.0);
        place_coin(&mut state, 0, COIN_DESPAWN + BASE_SPEED / 2.0, false);
        tick(&mut state);
        assert!(state.obstacles.is_empty());
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_no_entity_below_threshold_after_tick() {
        let mut state = running_state();
        for i in 0..20 {
            place_obstacle(&mut state, (i % 3) as u8, i as f32 * 50.0 - 200.0);
            place_coin(&mut state, (i % 3) as u8, i as f32 * 50.0 - 200.0, false);
        }
        for _ in 0..100 {
            tick(&mut state);
            assert!(state.obstacles.iter().all(|o| o.pos >= OBSTACLE_DESPAWN));
            assert!(state.coins.iter().all(|c| c.pos >= COIN_DESPAWN));
            if state.phase != GamePhase::Running {
                break;
            }
        }
    }

    proptest! {
        #[test]
        fn prop_speed_monotone_and_bounded(ops in proptest::collection::vec(any::<bool>(), 0..256)) {
            let mut state = running_state();
            let mut last = state.speed;
            for escalate in ops {
                if escalate {
                    increase_speed(&mut state);
                } else {
                    tick(&mut state);
                }
                prop_assert!(state.speed >= last);
                prop_assert!(state.speed >= BASE_SPEED && state.speed <= MAX_SPEED);
                last = state.speed;
            }
        }

        #[test]
        fn prop_jump_lands_at_exactly_zero(start_tick in 0u32..30) {
            let mut state = running_state();
            for _ in 0..start_tick {
                tick(&mut state);
            }
            state.request_jump();
            for _ in 0..80 {
                tick(&mut state);
                prop_assert!(state.player.height >= 0.0 && state.player.height <= JUMP_APEX);
            }
            prop_assert_eq!(state.player.height, 0.0);
            prop_assert!(!state.player.airborne());
        }
    }
}
