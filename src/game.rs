//! Frame driver
//!
//! Owns the simulation state plus everything around it that is not
//! simulation: the command queue, held-key sampling, the frame clock,
//! scheduled level transitions, sound cues and restart seeding.
//!
//! The host calls [`Game::frame`] once per display frame with a monotonic
//! timestamp in milliseconds.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{AudioManager, SoundEffect};
use crate::error::ConfigError;
use crate::input::{Command, CommandQueue, HeldKeys, MoveSampler};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, run_scheduled, tick};
use crate::tuning::Tuning;
use crate::view::{Hud, Renderer, SceneView};

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    state: GameState,
    settings: Settings,
    commands: CommandQueue,
    held: HeldKeys,
    sampler: MoveSampler,
    /// Jump pressed since the last tick
    jump_pending: bool,
    last_time: Option<f64>,
    last_delta_ms: f64,
    /// Seeds for restarted runs, derived from the session seed
    seeds: Pcg32,
    audio: AudioManager,
    events: Vec<GameEvent>,
}

impl Game {
    /// New session with default balance and settings
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default(), Settings::default())
    }

    /// New session with validated balance and settings
    pub fn with_config(seed: u64, tuning: Tuning, settings: Settings) -> Result<Self, ConfigError> {
        tuning.validate()?;
        settings.validate()?;
        Ok(Self::build(seed, tuning, settings))
    }

    fn build(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            sampler: MoveSampler::new(settings.move_sample_ms),
            audio: AudioManager::new(!settings.sound_enabled),
            settings,
            commands: CommandQueue::default(),
            held: HeldKeys::default(),
            jump_pending: false,
            last_time: None,
            last_delta_ms: 0.0,
            seeds: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Queue a command for the next frame
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Run one display frame: apply queued commands, fire due level
    /// transitions, then (while playing) one simulation tick and one render.
    pub fn frame(&mut self, now_ms: f64, renderer: &mut impl Renderer) {
        self.last_delta_ms = self.last_time.map_or(0.0, |last| now_ms - last);
        self.last_time = Some(now_ms);

        self.apply_commands(now_ms);
        run_scheduled(&mut self.state, now_ms);

        if self.state.phase == GamePhase::Playing {
            let move_dir = if self.sampler.poll(now_ms) {
                self.held.direction()
            } else {
                None
            };
            let input = TickInput {
                now_ms,
                move_dir,
                jump: std::mem::take(&mut self.jump_pending),
            };
            tick(&mut self.state, &input);
            renderer.render(&SceneView::new(&self.state));
        }

        for event in self.state.drain_events() {
            log::debug!("{:?}", event);
            self.audio.on_event(&event);
            self.events.push(event);
        }
    }

    fn apply_commands(&mut self, now_ms: f64) {
        let commands: Vec<Command> = self.commands.drain().collect();
        for command in commands {
            match command {
                Command::Start => {
                    if !self.state.start() {
                        log::warn!("Start ignored in {:?}", self.state.phase);
                    }
                }
                Command::Pause => {
                    if self.state.pause() {
                        self.jump_pending = false;
                    } else {
                        log::warn!("Pause ignored in {:?}", self.state.phase);
                    }
                }
                Command::Resume => {
                    if self.state.resume() {
                        // No catch-up after a pause
                        self.last_time = Some(now_ms);
                        self.last_delta_ms = 0.0;
                        self.sampler.reset();
                    } else {
                        log::warn!("Resume ignored in {:?}", self.state.phase);
                    }
                }
                Command::Restart => self.restart(),
                Command::Jump => {
                    if self.state.phase == GamePhase::Playing {
                        self.jump_pending = true;
                    }
                }
                Command::Hold(dir, down) => self.held.set(dir, down),
                Command::ToggleSound => {
                    let enabled = self.settings.toggle_sound();
                    self.audio.set_muted(!enabled);
                    log::info!("Sound {}", if enabled { "on" } else { "off" });
                }
            }
        }
    }

    /// Throw away the run and start a fresh one straight into play
    fn restart(&mut self) {
        let seed: u64 = self.seeds.random();
        let tuning = self.state.tuning.clone();
        log::info!("Restarting with seed {}", seed);

        self.state = GameState::with_tuning(seed, tuning);
        self.state.start();
        self.held = HeldKeys::default();
        self.jump_pending = false;
        self.sampler.reset();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for tools and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn hud(&self) -> Hud {
        Hud::new(&self.state, &self.settings)
    }

    /// Milliseconds between the last two frames (0 on the first frame and
    /// right after a resume)
    pub fn delta_ms(&self) -> f64 {
        self.last_delta_ms
    }

    /// Take the gameplay events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Take the sound cues raised since the last call
    pub fn drain_sounds(&mut self) -> Vec<SoundEffect> {
        self.audio.drain()
    }
}
