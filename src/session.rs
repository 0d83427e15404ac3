//! Game session controller
//!
//! Owns one play session and everything around it: which input goes where,
//! when the simulation runs, the high score and leaderboard writes, and
//! the (mute-gated) sound effects.
//!
//! ```text
//! Ready --tick--> Running --collide, score > 0--> AwaitingName --confirm--> Final
//!                    \--------collide, score == 0------------------------->/
//! Final --restart--> Ready
//! ```

use crate::audio::{AudioPort, SoundEffect};
use crate::highscores::Leaderboard;
use crate::name_entry::{NameEntry, NameInput};
use crate::persistence::GameStorage;
use crate::platform::{Key, RandomSource};
use crate::sim::{Direction, GameState, StepOutcome, step};
use crate::tuning::Tuning;

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Fresh board, waiting for the first tick
    Ready,
    /// Simulation advancing
    Running,
    /// Collided with a score; name entry owns the keyboard
    AwaitingName,
    /// Run finished; waiting for restart
    Final,
}

/// Where a key press goes in a given phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Steer(Direction),
    Name(NameInput),
    Restart,
    Ignore,
}

/// Input routing table. Exactly one consumer is live per phase.
fn route(phase: SessionPhase, key: Key) -> Route {
    use SessionPhase::*;

    match (phase, key) {
        (Ready | Running, Key::Up) => Route::Steer(Direction::Up),
        (Ready | Running, Key::Down) => Route::Steer(Direction::Down),
        (Ready | Running, Key::Left) => Route::Steer(Direction::Left),
        (Ready | Running, Key::Right) => Route::Steer(Direction::Right),

        (AwaitingName, Key::Up) => Route::Name(NameInput::Increment),
        (AwaitingName, Key::Down) => Route::Name(NameInput::Decrement),
        (AwaitingName, Key::Left) => Route::Name(NameInput::Left),
        (AwaitingName, Key::Right) => Route::Name(NameInput::Right),
        (AwaitingName, Key::Enter) => Route::Name(NameInput::Confirm),

        (Final, Key::Enter | Key::Space) => Route::Restart,

        _ => Route::Ignore,
    }
}

/// One mounted game
pub struct GameSession {
    state: GameState,
    phase: SessionPhase,
    /// Latest accepted direction not yet applied by a move
    pending_direction: Option<Direction>,
    name_entry: Option<NameEntry>,
    high_score: u64,
    new_high_score: bool,
    leaderboard: Leaderboard,
    storage: GameStorage,
    tuning: Tuning,
    rng: Box<dyn RandomSource>,
    audio: Box<dyn AudioPort>,
    muted: bool,
    mounted: bool,
}

impl GameSession {
    /// Mount with default tuning
    pub fn mount(
        storage: GameStorage,
        rng: impl RandomSource + 'static,
        audio: impl AudioPort + 'static,
        muted: bool,
    ) -> Self {
        Self::mount_with_tuning(storage, rng, audio, muted, Tuning::default())
    }

    /// Mount: migrates legacy data, loads scores and builds a fresh board
    pub fn mount_with_tuning(
        mut storage: GameStorage,
        rng: impl RandomSource + 'static,
        audio: impl AudioPort + 'static,
        muted: bool,
        tuning: Tuning,
    ) -> Self {
        let mut rng: Box<dyn RandomSource> = Box::new(rng);
        let high_score = storage.high_score();
        let leaderboard = Leaderboard::load(storage.store());
        let state = GameState::new(tuning, rng.as_mut());
        log::info!("Snake mounted (high score {high_score})");

        Self {
            state,
            phase: SessionPhase::Ready,
            pending_direction: None,
            name_entry: None,
            high_score,
            new_high_score: false,
            leaderboard,
            storage,
            tuning,
            rng,
            audio: Box::new(audio),
            muted,
            mounted: true,
        }
    }

    /// Stop reacting to ticks and keys
    pub fn unmount(&mut self) {
        if self.mounted {
            log::info!("Snake unmounted");
        }
        self.mounted = false;
        self.pending_direction = None;
    }

    /// One scheduling tick (call every frame). Returns None when the
    /// simulation is not live in the current phase.
    pub fn tick(&mut self, now: u64) -> Option<StepOutcome> {
        if !self.mounted {
            return None;
        }
        match self.phase {
            SessionPhase::Ready => {
                self.state.last_move_ms = now;
                self.phase = SessionPhase::Running;
                Some(StepOutcome::Waiting)
            }
            SessionPhase::Running => {
                let direction = self.pending_direction.unwrap_or(self.state.direction);
                let outcome = step(&mut self.state, direction, now, self.rng.as_mut());
                match outcome {
                    StepOutcome::Waiting => {}
                    StepOutcome::Continue => self.pending_direction = None,
                    StepOutcome::AteFood => {
                        self.pending_direction = None;
                        self.feedback(SoundEffect::Eat);
                    }
                    StepOutcome::Collided => {
                        self.pending_direction = None;
                        self.on_collision();
                    }
                }
                Some(outcome)
            }
            SessionPhase::AwaitingName | SessionPhase::Final => None,
        }
    }

    /// Route a key press. Returns whether it was consumed.
    pub fn key_down(&mut self, key: Key, now: u64) -> bool {
        if !self.mounted {
            return false;
        }
        match route(self.phase, key) {
            Route::Steer(direction) => self.steer(direction),
            Route::Name(input) => {
                let submitted = self.name_entry.as_mut().and_then(|entry| entry.handle(input));
                if let Some(name) = submitted {
                    self.submit_name(&name, now);
                }
                true
            }
            Route::Restart => self.restart(),
            Route::Ignore => false,
        }
    }

    /// Start over. Refused while the name entry is open.
    pub fn restart(&mut self) -> bool {
        if !self.mounted || self.phase == SessionPhase::AwaitingName {
            return false;
        }
        self.state = GameState::new(self.tuning, self.rng.as_mut());
        self.phase = SessionPhase::Ready;
        self.pending_direction = None;
        self.name_entry = None;
        self.new_high_score = false;
        true
    }

    /// Affects sound only, never the simulation
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effects volume, 0.0 - 1.0
    pub fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(volume.clamp(0.0, 1.0));
    }

    fn steer(&mut self, direction: Direction) -> bool {
        // Compared with the last move, not the last press, so two quick
        // presses can't fold the head back onto the neck
        if direction == self.state.direction.opposite() {
            return false;
        }
        self.pending_direction = Some(direction);
        self.feedback(SoundEffect::Move);
        true
    }

    fn on_collision(&mut self) {
        self.feedback(SoundEffect::Die);
        let score = u64::from(self.state.score);
        log::info!("Game over with score {score}");

        if score > self.high_score {
            self.high_score = score;
            self.new_high_score = true;
            self.storage.set_high_score(score);
            self.feedback(SoundEffect::HighScore);
        }

        if score > 0 {
            self.name_entry = Some(NameEntry::new());
            self.phase = SessionPhase::AwaitingName;
        } else {
            self.phase = SessionPhase::Final;
        }
    }

    fn submit_name(&mut self, name: &str, now: u64) {
        let score = u64::from(self.state.score);
        let rank = self
            .leaderboard
            .record(self.storage.store_mut(), score, name, now);
        match rank {
            Some(rank) => log::info!("{name} placed #{rank} with {score}"),
            None => log::info!("{name} scored {score}, off the board"),
        }
        self.name_entry = None;
        self.phase = SessionPhase::Final;
    }

    fn feedback(&self, effect: SoundEffect) {
        if !self.muted {
            self.audio.play(effect);
        }
    }

    // === Observables ===

    pub fn score(&self) -> u64 {
        u64::from(self.state.score)
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Whether the last run set a new high score
    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn awaiting_name_entry(&self) -> bool {
        self.phase == SessionPhase::AwaitingName
    }

    /// Open name entry, if any
    pub fn name_entry(&self) -> Option<&NameEntry> {
        self.name_entry.as_ref()
    }

    /// Board place the finished run will take once its name is confirmed
    pub fn pending_rank(&self) -> Option<usize> {
        if self.phase != SessionPhase::AwaitingName {
            return None;
        }
        self.leaderboard.potential_rank(self.score())
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn storage_mut(&mut self) -> &mut GameStorage {
        &mut self.storage
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
