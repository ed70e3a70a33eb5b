// Copyright 2025 the cadence developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Timing configuration for the controller loop.

use crate::error::ControlError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default fixed step duration, in seconds.
pub const DEFAULT_DT: f64 = 0.1;

/// Default throttle: minimum accumulated real time before handlers fire.
pub const DEFAULT_MIN_T: f64 = 1.0 / 60.0;

/// Timing parameters for a [`Controller`](crate::Controller).
///
/// Changes made through the controller's setters while the loop is running
/// are buffered and take effect at the start of the next iteration, never
/// retroactively within an iteration already past its timing check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Fixed step duration in seconds. Must be strictly positive.
    pub dt: f64,

    /// Minimum accumulated real time, in seconds, before the move and show
    /// phases fire. Zero disables throttling entirely. Must not be negative.
    pub min_t: f64,

    /// Optional voluntary sleep applied between iterations.
    pub delay: Option<Duration>,
}

impl ControllerConfig {
    /// Creates a configuration with the stock defaults
    /// (`dt = 0.1`, `min_t = 1/60`, no delay).
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the contract on every field.
    ///
    /// ## Returns
    /// `Ok(())` when all values are usable, otherwise the first
    /// [`ControlError::InvalidArgument`] encountered.
    pub fn validate(&self) -> Result<(), ControlError> {
        // `!(x > 0.0)` also rejects NaN.
        if !(self.dt > 0.0) {
            return Err(ControlError::InvalidArgument {
                name: "dt",
                value: self.dt,
            });
        }
        if !(self.min_t >= 0.0) {
            return Err(ControlError::InvalidArgument {
                name: "min_t",
                value: self.min_t,
            });
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            min_t: DEFAULT_MIN_T,
            delay: None,
        }
    }
}
