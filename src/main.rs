//! Pixel Snake entry point
//!
//! On the web the page mounts `SnakeHandle` directly. Natively this runs a
//! headless autopilot game against in-memory storage.

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::IVec2;
    use pixel_snake::consts::GRID_SIZE;
    use pixel_snake::platform::Key;
    use pixel_snake::sim::{Direction, GameState, wrap};

    /// Shortest distance between two cells on the torus
    fn torus_distance(a: IVec2, b: IVec2) -> i32 {
        let d = (a - b).abs();
        d.x.min(GRID_SIZE - d.x) + d.y.min(GRID_SIZE - d.y)
    }

    /// Greedy move toward the food that doesn't hit the body next tick
    pub fn choose(state: &GameState) -> Option<Direction> {
        let target = state.food?.position;
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
            .into_iter()
            .filter(|&dir| dir != state.direction.opposite())
            .map(|dir| (dir, wrap(state.head() + dir.delta())))
            .filter(|(_, next)| !state.snake.iter().skip(1).any(|s| s == next))
            .min_by_key(|&(_, next)| torus_distance(next, target))
            .map(|(dir, _)| dir)
    }

    pub fn key_for(direction: Direction) -> Key {
        match direction {
            Direction::Up => Key::Up,
            Direction::Down => Key::Down,
            Direction::Left => Key::Left,
            Direction::Right => Key::Right,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pixel_snake::GameSession;
    use pixel_snake::audio::SilentAudio;
    use pixel_snake::highscores::format_date;
    use pixel_snake::persistence::GameStorage;
    use pixel_snake::platform::{Key, SeededRandom, now_ms};
    use pixel_snake::sim::StepOutcome;

    const MAX_TICKS: u32 = 5_000;

    env_logger::init();
    log::info!("Pixel Snake (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(now_ms);
    log::info!("Seed: {}", seed);

    let mut session = GameSession::mount(
        GameStorage::in_memory(),
        SeededRandom::new(seed),
        SilentAudio,
        true,
    );

    let mut now = 0;
    session.tick(now);
    for _ in 0..MAX_TICKS {
        if let Some(direction) = autopilot::choose(session.state()) {
            session.key_down(autopilot::key_for(direction), now);
        }
        now += session.state().speed_ms;
        if session.tick(now) == Some(StepOutcome::Collided) {
            break;
        }
    }

    if session.awaiting_name_entry() {
        if let Some(rank) = session.pending_rank() {
            log::info!("Run places #{rank}");
        }
        // B, O, T
        for (slot, steps) in [1, 14, 19].into_iter().enumerate() {
            if slot > 0 {
                session.key_down(Key::Right, now);
            }
            for _ in 0..steps {
                session.key_down(Key::Up, now);
            }
        }
        session.key_down(Key::Enter, now);
    }

    println!("\nScore: {}", session.score());
    println!("High Score: {}", session.high_score());
    println!(
        "Snake length: {}, game over: {}",
        session.state().len(),
        session.is_over()
    );
    match session.leaderboard().top_score() {
        Some(best) => println!("\nLeaderboard (best {best})"),
        None => println!("\nLeaderboard (empty)"),
    }
    for entry in &session.leaderboard().entries {
        println!(
            "  {} - {} pts ({})",
            entry.name,
            entry.score,
            format_date(entry.date, now)
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is SnakeHandle, this is just to satisfy the compiler
}
