//! Lane Rush entry point
//!
//! The browser host drives the engine through the library surface; the
//! native build runs a short headless demo with a simple autopilot.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_rush::consts::TICK_MS;
    use lane_rush::sim::GamePhase;
    use lane_rush::{Engine, MemStore};

    env_logger::init();
    log::info!("Lane Rush (native) starting...");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);

    let mut engine = Engine::new(seed, MemStore::new());
    engine.request_start();

    // Up to 60 simulated seconds of autopiloted play
    let mut ticks: u64 = 0;
    while engine.phase() == GamePhase::Running && ticks < 3000 {
        autopilot(&mut engine);
        engine.advance(TICK_MS);
        engine.drain_events();
        ticks += 1;
    }

    println!("final score: {}", engine.score());
    println!("coins banked: {}", engine.balance());
    println!("speed multiplier: x{:.1}", engine.speed_multiplier());
}

/// Demo pilot: sidestep approaching obstacles, and drift toward the
/// nearest coin when the current lane is clear.
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(engine: &mut lane_rush::Engine<lane_rush::MemStore>) {
    use lane_rush::consts::LANES;

    let lane = engine.player().lane;
    let threatened = |l: u8| {
        engine
            .obstacles()
            .iter()
            .any(|o| o.lane == l && o.pos < 400.0)
    };

    if threatened(lane) {
        if let Some(target) = (0..LANES).find(|&l| !threatened(l)) {
            engine.request_lane_change((target as i8 - lane as i8).signum());
        }
        return;
    }

    if let Some(coin) = engine
        .coins()
        .iter()
        .filter(|c| c.pos > 0.0)
        .min_by(|a, b| a.pos.total_cmp(&b.pos))
    {
        let dir = (coin.lane as i8 - lane as i8).signum();
        if dir != 0 && !threatened((lane as i8 + dir) as u8) {
            engine.request_lane_change(dir);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM hosts call into the library directly; nothing to do here
}
