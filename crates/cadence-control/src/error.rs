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

//! Error types for the controller loop.

use cadence_core::SourceError;
use thiserror::Error;

/// Errors surfaced by the controller's public operations.
#[derive(Debug, Error)]
pub enum ControlError {
    /// A removal named an id (or identity) that matches no current entry.
    /// Non-fatal; the registry is left untouched.
    #[error("no matching handler is registered")]
    NotFound,

    /// A configuration value violated its contract (`dt > 0`,
    /// `min_t >= 0`). Rejected up front rather than producing undefined
    /// timing behavior.
    #[error("invalid value for `{name}`: {value}")]
    InvalidArgument {
        /// The parameter that was rejected.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A platform collaborator (the event source) failed; propagated out of
    /// `run`/`pause` without retrying.
    #[error("event source failed")]
    Collaborator(#[from] SourceError),
}
