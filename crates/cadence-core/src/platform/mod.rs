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

//! Platform-service traits consumed by the controller loop.
//!
//! The loop treats its collaborators as opaque services behind these three
//! seams: where events come from ([`EventSource`]), how time is read
//! ([`Clock`]), and how the thread yields between iterations ([`Sleeper`]).

mod clock;
mod sleep;

pub use clock::MonotonicClock;
pub use sleep::ThreadSleeper;

use crate::error::SourceError;
use std::time::Duration;

/// A source of input events of type `E`.
///
/// Any backend (a windowing library's event pump, a channel fed by another
/// thread, a scripted sequence in a test) can implement this trait to drive
/// a controller.
pub trait EventSource<E> {
    /// Refreshes the backend's internal input state.
    ///
    /// Called once at the start of every event phase, before draining with
    /// [`poll`](Self::poll). Sources with no notion of pumping return `Ok(())`.
    fn pump(&mut self) -> Result<(), SourceError>;

    /// Dequeues the next pending event without blocking.
    ///
    /// Returns `Ok(None)` when no event is pending. Must never stall the
    /// calling loop.
    fn poll(&mut self) -> Result<Option<E>, SourceError>;

    /// Blocks the calling thread until the next event arrives.
    ///
    /// Used by the pause loop only; the run loop itself never blocks on
    /// input.
    fn wait(&mut self) -> Result<E, SourceError>;
}

/// A monotonic, high-resolution time reading in seconds.
///
/// The epoch is arbitrary; callers only ever subtract two readings.
pub trait Clock {
    /// Returns the current reading, in seconds. Must never go backwards.
    fn now(&self) -> f64;
}

/// A voluntary-yield primitive for inter-iteration throttling.
pub trait Sleeper {
    /// Suspends the calling thread for roughly `duration`.
    fn sleep(&mut self, duration: Duration);
}
