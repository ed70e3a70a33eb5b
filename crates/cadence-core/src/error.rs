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

//! Error types for the platform-service collaborators.

use thiserror::Error;

/// A failure reported by an event source backend.
///
/// The loop driving the source performs no retries; these are
/// infrastructure preconditions expected to hold before a loop is entered,
/// so the error is propagated to the caller as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Every producer handle for the source has been dropped; no further
    /// events can ever arrive, so a blocking wait would hang forever.
    #[error("event source disconnected: all producer handles dropped")]
    Disconnected,

    /// The underlying backend reported a failure (device lost, subsystem
    /// not initialized, ...). The message is backend-specific.
    #[error("event source backend failure: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_display_is_descriptive() {
        let disconnected = SourceError::Disconnected;
        assert!(disconnected.to_string().contains("disconnected"));

        let backend = SourceError::Backend("joystick subsystem not initialized".to_string());
        assert!(backend.to_string().contains("joystick subsystem"));
    }
}
