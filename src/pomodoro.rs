//! Pomodoro Timer
//!
//! Pure state machine; the UI drives it with a one-second interval.

use serde::{Deserialize, Serialize};

/// Longest phase accepted from configuration
pub const MAX_PHASE_MINUTES: u32 = 24 * 60;

fn minutes_to_secs(minutes: u32) -> u32 {
    minutes.saturating_mul(60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PomodoroSettings {
    pub focus_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    /// A long break replaces every Nth short break
    pub long_break_every: u32,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            long_break_every: 4,
        }
    }
}

impl PomodoroSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.focus_minutes == 0 || self.short_break_minutes == 0 || self.long_break_minutes == 0 {
            return Err("pomodoro durations must be positive".to_string());
        }
        let longest = self.focus_minutes.max(self.short_break_minutes).max(self.long_break_minutes);
        if longest > MAX_PHASE_MINUTES {
            return Err(format!("pomodoro durations must not exceed {} minutes", MAX_PHASE_MINUTES));
        }
        if self.long_break_every == 0 {
            return Err("pomodoro longBreakEvery must be positive".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::ShortBreak => "Short break",
            Phase::LongBreak => "Long break",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PomodoroTimer {
    settings: PomodoroSettings,
    phase: Phase,
    remaining_secs: u32,
    completed_focus: u32,
    running: bool,
}

impl PomodoroTimer {
    pub fn new(settings: PomodoroSettings) -> Self {
        Self {
            settings,
            phase: Phase::Focus,
            remaining_secs: minutes_to_secs(settings.focus_minutes),
            completed_focus: 0,
            running: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn completed_focus(&self) -> u32 {
        self.completed_focus
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn duration_of(&self, phase: Phase) -> u32 {
        let minutes = match phase {
            Phase::Focus => self.settings.focus_minutes,
            Phase::ShortBreak => self.settings.short_break_minutes,
            Phase::LongBreak => self.settings.long_break_minutes,
        };
        minutes_to_secs(minutes)
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Back to a fresh, stopped focus session
    pub fn reset(&mut self) {
        *self = Self::new(self.settings);
    }

    /// Jump to the next phase without counting the current one
    pub fn skip(&mut self) {
        self.advance(false);
    }

    /// One second elapsed. Returns the new phase when a transition happened.
    pub fn tick(&mut self) -> Option<Phase> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.advance(true);
            return Some(self.phase);
        }
        None
    }

    fn advance(&mut self, completed: bool) {
        self.phase = match self.phase {
            Phase::Focus => {
                if completed {
                    self.completed_focus += 1;
                }
                if completed && self.completed_focus % self.settings.long_break_every == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Focus,
        };
        self.remaining_secs = self.duration_of(self.phase);
    }

    /// `MM:SS`
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    /// Elapsed fraction of the current phase, 0.0..=1.0
    pub fn progress(&self) -> f64 {
        let total = self.duration_of(self.phase);
        if total == 0 {
            return 0.0;
        }
        f64::from(total - self.remaining_secs.min(total)) / f64::from(total)
    }
}
