//! Controller configuration: pacing speed and diagnostics.
//!
//! Speed is a small integer level mapped through a fixed delay table. The
//! level one past the table is manual mode: the controller holds every node
//! before reporting it until [`ControllerHandle::trigger_step`] is called.
//!
//! [`ControllerHandle::trigger_step`]: crate::runner::ControllerHandle::trigger_step

use std::time::Duration;

use serde::{Deserialize, Serialize};
use wayfinder_search::LogPolicy;

use crate::runner::ControllerError;

/// Per-step delay in milliseconds, indexed by speed level.
pub const SPEED_DELAYS_MS: [u64; 6] = [1000, 500, 250, 100, 25, 0];

/// The speed level that switches the controller into manual stepping.
#[allow(clippy::cast_possible_truncation)]
pub const MANUAL_LEVEL: u8 = SPEED_DELAYS_MS.len() as u8;

const DEFAULT_SPEED_LEVEL: u8 = 2;

/// How the controller advances between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep for the given delay, then continue.
    Automatic(Duration),
    /// Wait for an external trigger.
    Manual,
}

impl Pacing {
    /// Resolve a speed level.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnknownSpeedLevel`] for levels above
    /// [`MANUAL_LEVEL`].
    pub fn for_level(level: u8) -> Result<Self, ControllerError> {
        if level == MANUAL_LEVEL {
            return Ok(Self::Manual);
        }
        SPEED_DELAYS_MS
            .get(usize::from(level))
            .map(|&ms| Self::Automatic(Duration::from_millis(ms)))
            .ok_or(ControllerError::UnknownSpeedLevel { level })
    }

    #[must_use]
    pub fn is_manual(self) -> bool {
        self == Self::Manual
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Initial speed level (`0..=MANUAL_LEVEL`).
    pub speed_level: u8,
    pub log: LogPolicy,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            speed_level: DEFAULT_SPEED_LEVEL,
            log: LogPolicy::default(),
        }
    }
}

impl ControllerConfig {
    /// # Errors
    ///
    /// Returns [`ControllerError::UnknownSpeedLevel`] if `speed_level` is out
    /// of range.
    pub fn validate(&self) -> Result<(), ControllerError> {
        Pacing::for_level(self.speed_level).map(|_| ())
    }
}
