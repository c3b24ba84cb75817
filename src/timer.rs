use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_SESSION_SECS: u32 = 25 * 60;

pub const QUOTES: [&str; 5] = [
    "Focus on progress, not perfection.",
    "Small steps lead to big results.",
    "Stay consistent. The results will come.",
    "Discipline beats motivation.",
    "Make today count!",
];

/// Picks a motivational line to show above the countdown
pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUOTES.choose(rng).copied().unwrap_or(QUOTES[0])
}

/// What a single `tick()` did to the timer
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed.
    Ignored,
    /// One second elapsed and the session is still going.
    Progress { remaining: u32, progress: f64 },
    /// The countdown hit zero. The timer is already idle with full time restored.
    Completed { sessions_completed: u32 },
}

/// Single-session countdown with start/pause/reset controls.
///
/// The timer never sleeps; an external scheduler calls [`CountdownTimer::tick`]
/// once per elapsed second while [`CountdownTimer::is_running`] is true.
#[derive(Debug, Clone, PartialEq)]
pub struct CountdownTimer {
    session_secs: u32,
    remaining_secs: u32,
    running: bool,
    sessions_completed: u32,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_SECS)
    }
}

impl CountdownTimer {
    pub fn new(session_secs: u32) -> Self {
        let session_secs = session_secs.max(1);
        Self {
            session_secs,
            remaining_secs: session_secs,
            running: false,
            sessions_completed: 0,
        }
    }

    pub fn session_secs(&self) -> u32 {
        self.session_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    /// Fraction of the session already elapsed, 0.0 on a fresh session
    pub fn progress(&self) -> f64 {
        1.0 - self.remaining_secs as f64 / self.session_secs as f64
    }

    /// Remaining time as `MM:SS`
    pub fn clock_label(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }

    /// Returns true when this call moved the timer from idle to running
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        debug!("event=timer_start remaining={}", self.remaining_secs);
        true
    }

    pub fn pause(&mut self) {
        if self.running {
            debug!("event=timer_pause remaining={}", self.remaining_secs);
        }
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_secs = self.session_secs;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Ignored;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return TickOutcome::Progress {
                remaining: self.remaining_secs,
                progress: self.progress(),
            };
        }

        // zero is never observable: stop, count and refill in one step
        self.sessions_completed += 1;
        self.reset();
        info!(
            "event=timer_completed sessions_completed={}",
            self.sessions_completed
        );
        TickOutcome::Completed {
            sessions_completed: self.sessions_completed,
        }
    }
}
