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

//! # Cadence Core
//!
//! Foundational crate containing the platform-service traits (event source,
//! clock, sleeper), their stock implementations, and the error contracts
//! shared by the rest of the workspace.
//!
//! Nothing in this crate knows about the controller loop itself; it only
//! defines the seams the loop drives. Any backend (SDL, winit, a test
//! script) can implement these traits to feed a controller.

#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod platform;

pub use error::SourceError;
pub use event::queue::EventQueue;
pub use event::EventSlot;
pub use platform::{Clock, EventSource, MonotonicClock, Sleeper, ThreadSleeper};
