use std::rc::Rc;
use std::time::{Duration, Instant};

use circular_buffer::CircularBuffer;
use thousands::Separable;
use tracing::{debug, info, info_span, warn};

use crate::asset::{AssetStore, CharacterKind, SpriteCache};
use crate::config::{RunConfig, Settings};
use crate::constants::LOOP_TIME;
use crate::error::{GameError, GameResult};
use crate::formatter;
use crate::game::{GameController, GameState, KeyOutcome};
use crate::input::KeyCode;
use crate::platform::{self, NaturalSizeSource, TraceSurface};
use crate::pool::Random;

/// The number of frame durations kept for statistics.
const TIMING_WINDOW_SIZE: usize = 120;

/// A rolling window of frame durations.
#[derive(Debug, Default)]
pub struct FrameTimings {
    buffer: CircularBuffer<TIMING_WINDOW_SIZE, Duration>,
}

impl FrameTimings {
    pub fn add_timing(&mut self, duration: Duration) {
        self.buffer.push_back(duration);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Mean and sample standard deviation of the window.
    pub fn stats(&self) -> (Duration, Duration) {
        // Welford's algorithm
        let mut count = 0u32;
        let mut mean = 0.0f64;
        let mut sum_squared_diff = 0.0f64;

        for duration in self.buffer.iter() {
            let secs = duration.as_secs_f64();
            count += 1;

            let diff = secs - mean;
            mean += diff / count as f64;
            sum_squared_diff += diff * (secs - mean);
        }

        if count == 0 {
            return (Duration::ZERO, Duration::ZERO);
        }

        let variance = if count > 1 {
            sum_squared_diff / (count - 1) as f64
        } else {
            0.0
        };
        (Duration::from_secs_f64(mean), Duration::from_secs_f64(variance.sqrt()))
    }
}

/// Presses one key at a fixed interval.
#[derive(Debug, Clone)]
pub struct Autopilot {
    key: KeyCode,
    interval: Duration,
    last_press: Option<Instant>,
}

impl Autopilot {
    pub fn new(key: KeyCode, interval: Duration) -> Self {
        Self {
            key,
            interval,
            last_press: None,
        }
    }

    /// Starts counting the interval from `now`.
    pub fn restart(&mut self, now: Instant) {
        self.last_press = Some(now);
    }

    /// The key to press at `now`, if the interval has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<KeyCode> {
        let due = self
            .last_press
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval);
        if due {
            self.last_press = Some(now);
            Some(self.key)
        } else {
            None
        }
    }
}

/// How a single round ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundReport {
    pub round: u32,
    /// `Playing` if the round hit the frame cap before it was decided.
    pub outcome: GameState,
    pub score: i64,
    pub frames: u32,
    pub mean_frame: Duration,
    pub frame_std_dev: Duration,
}

/// Plays rounds headlessly, pacing frames at 60 Hz.
pub struct App {
    controller: GameController<TraceSurface, SpriteCache>,
    run: RunConfig,
    autopilot: Autopilot,
    timings: FrameTimings,
}

impl App {
    pub fn new(settings: Settings) -> GameResult<Self> {
        let Settings { game, run } = settings;

        let mut controller = GameController::new(Rc::new(game), SpriteCache::new(), TraceSurface::new(), Random::new(run.seed));
        controller.select_character(CharacterKind::default());

        let resolved = controller.assets_mut().pump(&mut NaturalSizeSource)?;
        debug!(resolved, "Sprites loaded");

        if !controller.assets().is_ready() {
            return Err(GameError::InvalidState("sprites still pending after preload".into()));
        }
        if !controller.modals().setup.play_button().is_visible() {
            return Err(GameError::InvalidState("play button was never revealed".into()));
        }

        let autopilot = Autopilot::new(KeyCode::UP, Duration::from_millis(run.key_interval_ms));
        Ok(Self {
            controller,
            run,
            autopilot,
            timings: FrameTimings::default(),
        })
    }

    /// Plays every configured round, stopping early if an exit key is pressed.
    pub fn run(&mut self) -> Vec<RoundReport> {
        info!(
            rounds = self.run.rounds,
            loop_time_ms = LOOP_TIME.as_secs_f32() * 1000.0,
            "Starting headless run"
        );

        let mut reports = Vec::new();
        for round in 1..=self.run.rounds {
            match self.play_round(round) {
                Some(report) => reports.push(report),
                None => {
                    info!("Exit requested. Exiting...");
                    break;
                }
            }
        }
        reports
    }

    /// Runs one round to completion. Returns `None` if an exit key was pressed.
    fn play_round(&mut self, round: u32) -> Option<RoundReport> {
        let _span = info_span!("round", round).entered();

        self.timings.clear();
        let started = Instant::now();
        let mut ticket = Some(self.controller.start_new_game(started));
        self.autopilot.restart(started);
        let mut frames = 0u32;

        while let Some(current) = ticket {
            let start = Instant::now();
            let mut current = current;

            if let Some(key) = self.autopilot.poll(start) {
                match self.controller.handle_key(key, start) {
                    KeyOutcome::ExitRequested => return None,
                    KeyOutcome::Started(fresh) => current = fresh,
                    KeyOutcome::Handled | KeyOutcome::Ignored => {}
                }
            }

            ticket = self.controller.play(current, start);
            formatter::increment_frame();
            frames += 1;

            let elapsed = start.elapsed();
            self.timings.add_timing(elapsed);

            if frames >= self.run.max_frames_per_round {
                warn!(frames, "Round undecided, abandoning");
                break;
            }

            if elapsed < LOOP_TIME {
                platform::sleep(LOOP_TIME - elapsed);
            } else {
                warn!("Game loop behind schedule by: {:?}", elapsed - LOOP_TIME);
            }
        }

        let (mean_frame, frame_std_dev) = self.timings.stats();
        let report = RoundReport {
            round,
            outcome: self.controller.state(),
            score: self.controller.player().score(),
            frames,
            mean_frame,
            frame_std_dev,
        };

        info!(
            outcome = report.outcome.as_ref(),
            score = %report.score.separate_with_commas(),
            frames,
            mean = ?mean_frame,
            std_dev = ?frame_std_dev,
            draws = self.controller.surface().draws(),
            "Round finished"
        );
        Some(report)
    }
}
