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

//! Event transport types: the reusable decode slot and the channel-backed
//! queue.

pub mod queue;

/// A single reusable buffer an event is decoded into before dispatch.
///
/// The slot is owned exclusively by whoever drives the event source (one
/// slot per loop) and is never shared with concurrent readers: an event is
/// loaded, taken out for dispatch, and the slot is empty again before the
/// next poll. Holding at most one event at a time is the point; this is a
/// staging cell, not a queue.
#[derive(Debug)]
pub struct EventSlot<E> {
    current: Option<E>,
}

impl<E> EventSlot<E> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Loads a freshly decoded event, replacing whatever was left behind.
    ///
    /// A leftover event only exists if a previous dispatch was abandoned
    /// mid-way; overwriting it is the intended recovery.
    pub fn load(&mut self, event: E) {
        self.current = Some(event);
    }

    /// Takes the buffered event out for dispatch, leaving the slot empty.
    pub fn take(&mut self) -> Option<E> {
        self.current.take()
    }

    /// Returns true when no event is buffered.
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

impl<E> Default for EventSlot<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_starts_empty() {
        let slot: EventSlot<u32> = EventSlot::new();
        assert!(slot.is_empty());
    }

    #[test]
    fn load_then_take_round_trips_one_event() {
        let mut slot = EventSlot::new();
        slot.load(42u32);
        assert!(!slot.is_empty());
        assert_eq!(slot.take(), Some(42));
        assert!(slot.is_empty());
        assert_eq!(slot.take(), None, "Second take should find the slot empty");
    }

    #[test]
    fn load_overwrites_a_leftover_event() {
        let mut slot = EventSlot::new();
        slot.load(1u32);
        slot.load(2u32);
        assert_eq!(slot.take(), Some(2));
        assert_eq!(slot.take(), None);
    }
}
