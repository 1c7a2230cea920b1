//! Pomodoro countdown shown in the TUI header.
//!
//! Purely decorative: driven by the event-loop tick, never touches the task
//! store. Work and break phases alternate; finishing a phase is reported so
//! the app can raise a notification.

use std::time::Duration;

const WORK: Duration = Duration::from_secs(25 * 60);
const BREAK: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    fn length(self) -> Duration {
        match self {
            Phase::Work => WORK,
            Phase::Break => BREAK,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }
}

/// Alternating work/break countdown.
pub struct Pomodoro {
    phase: Phase,
    remaining: Duration,
    running: bool,
}

impl Default for Pomodoro {
    fn default() -> Self {
        Pomodoro {
            phase: Phase::Work,
            remaining: WORK,
            running: false,
        }
    }
}

impl Pomodoro {
    /// Advance the countdown. Returns the phase that just finished, if any,
    /// so the caller can notify the user.
    pub fn tick(&mut self, elapsed: Duration) -> Option<Phase> {
        if !self.running {
            return None;
        }
        if elapsed < self.remaining {
            self.remaining -= elapsed;
            return None;
        }
        let finished = self.phase;
        self.phase = match self.phase {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        };
        self.remaining = self.phase.length();
        self.running = false;
        Some(finished)
    }

    /// Start or pause the countdown.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Back to a fresh, paused work phase.
    pub fn reset(&mut self) {
        *self = Pomodoro::default();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Header readout, e.g. "24:59 work".
    pub fn readout(&self) -> String {
        let secs = self.remaining.as_secs();
        let state = if self.running { "" } else { " (paused)" };
        format!(
            "{:02}:{:02} {}{}",
            secs / 60,
            secs % 60,
            self.phase.label(),
            state
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_timer_does_not_move() {
        let mut p = Pomodoro::default();
        assert_eq!(p.tick(Duration::from_secs(60)), None);
        assert_eq!(p.readout(), "25:00 work (paused)");
    }

    #[test]
    fn test_work_phase_rolls_into_break() {
        let mut p = Pomodoro::default();
        p.toggle();
        assert_eq!(p.tick(Duration::from_secs(24 * 60)), None);
        assert_eq!(p.readout(), "01:00 work");
        // Crossing zero finishes the phase and pauses on the break.
        assert_eq!(p.tick(Duration::from_secs(90)), Some(Phase::Work));
        assert!(!p.is_running());
        assert_eq!(p.readout(), "05:00 break (paused)");
    }

    #[test]
    fn test_reset_returns_to_fresh_work_phase() {
        let mut p = Pomodoro::default();
        p.toggle();
        p.tick(Duration::from_secs(100));
        p.reset();
        assert_eq!(p.readout(), "25:00 work (paused)");
    }
}
