//! Debounce and hold detection for a single input bit.
//!
//! Two timers run side by side. The debounce delay rejects level changes that
//! arrive too soon after the previous accepted one; the stable time decides
//! when an uninterrupted stretch at one level counts as a deliberate press.
//! A confirmed stretch escalates exactly once; the next accepted level change
//! re-arms it.
//!
//! Timestamps are milliseconds from a wrapping `u32` counter. Only
//! differences are ever compared, so the counter may wrap freely.

use crate::config::Config;
use crate::expander::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub debounce_delay: u32,
    pub stable_time: u32,
}

impl From<&Config> for Timing {
    fn from(config: &Config) -> Self {
        Timing {
            debounce_delay: config.debounce_delay.0,
            stable_time: config.stable_time.0,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Timing::from(&Config::default())
    }
}

/// Emitted once per confirmed stable stretch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Escalation {
    pub level: Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Settling,
    StablePending,
    StableConfirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Uninitialized,
    Tracking {
        /// Level seen on the previous poll.
        level: Level,
        /// When the last change passing the debounce delay was accepted.
        last_change: u32,
        /// When the current stable stretch began.
        stretch_start: u32,
        confirmed: bool,
    },
}

impl DebounceState {
    pub fn new() -> Self {
        DebounceState::Uninitialized
    }

    /// Advances the state in place. See [`step`].
    pub fn advance(&mut self, level: Level, now: u32, timing: &Timing) -> Option<Escalation> {
        let (next, escalation) = step(*self, level, now, timing);
        *self = next;
        escalation
    }

    pub fn phase(&self, now: u32, timing: &Timing) -> Phase {
        match *self {
            DebounceState::Uninitialized => Phase::Uninitialized,
            DebounceState::Tracking { confirmed: true, .. } => Phase::StableConfirmed,
            DebounceState::Tracking { stretch_start, .. } => {
                if now.wrapping_sub(stretch_start) > timing.debounce_delay {
                    Phase::StablePending
                } else {
                    Phase::Settling
                }
            }
        }
    }

    /// Drops a confirmation whose escalation could not be delivered, so the
    /// next poll at the same level escalates again.
    pub fn rearm(&mut self) {
        if let DebounceState::Tracking { confirmed, .. } = self {
            *confirmed = false;
        }
    }

    pub fn level(&self) -> Option<Level> {
        match *self {
            DebounceState::Uninitialized => None,
            DebounceState::Tracking { level, .. } => Some(level),
        }
    }
}

impl Default for DebounceState {
    fn default() -> Self {
        Self::new()
    }
}

/// One poll of the monitored bit.
///
/// A change that arrives within the debounce delay of the last accepted one is
/// remembered as the current level but leaves both timers alone, so bounce
/// cannot hold the stable clock back forever. Stability is only evaluated on
/// polls where the level did not change.
pub fn step(
    state: DebounceState,
    level: Level,
    now: u32,
    timing: &Timing,
) -> (DebounceState, Option<Escalation>) {
    match state {
        DebounceState::Uninitialized => (
            DebounceState::Tracking {
                level,
                last_change: now,
                stretch_start: now,
                confirmed: false,
            },
            None,
        ),
        DebounceState::Tracking {
            level: previous,
            last_change,
            stretch_start,
            confirmed,
        } => {
            if level != previous {
                if now.wrapping_sub(last_change) > timing.debounce_delay {
                    return (
                        DebounceState::Tracking {
                            level,
                            last_change: now,
                            stretch_start: now,
                            confirmed: false,
                        },
                        None,
                    );
                }
                return (
                    DebounceState::Tracking {
                        level,
                        last_change,
                        stretch_start,
                        confirmed,
                    },
                    None,
                );
            }

            if !confirmed && now.wrapping_sub(stretch_start) > timing.stable_time {
                return (
                    DebounceState::Tracking {
                        level,
                        last_change,
                        stretch_start,
                        confirmed: true,
                    },
                    Some(Escalation { level }),
                );
            }

            (state, None)
        }
    }
}
