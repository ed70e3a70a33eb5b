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

use crate::error::SourceError;
use crate::platform::EventSource;
use flume::TryRecvError;
use log;

/// A channel-backed [`EventSource`].
///
/// This queue is generic over the type `E` of event it transports, which
/// keeps `cadence-core` decoupled from the event types defined by whoever
/// embeds it. Producers anywhere (other threads included) push through
/// cloned [`sender`](EventQueue::sender) handles; the owning loop drains
/// with the non-blocking [`EventSource::poll`] or suspends on
/// [`EventSource::wait`].
#[derive(Debug)]
pub struct EventQueue<E> {
    sender: flume::Sender<E>,
    receiver: flume::Receiver<E>,
}

impl<E> EventQueue<E> {
    /// Creates a new queue backed by an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::info!("EventQueue initialized.");
        Self { sender, receiver }
    }

    /// Pushes an event onto the queue, logging an error if the receiving
    /// end has been dropped.
    pub fn push(&self, event: E) {
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to queue event: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a clone of the producer end of the channel.
    /// Hand these out to whatever parts of the system generate events.
    pub fn sender(&self) -> flume::Sender<E> {
        self.sender.clone()
    }

    /// Returns the number of events currently queued.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns true when no events are queued.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventSource<E> for EventQueue<E> {
    fn pump(&mut self) -> Result<(), SourceError> {
        // Channel delivery is push-based; there is no input state to refresh.
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<E>, SourceError> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(SourceError::Disconnected),
        }
    }

    fn wait(&mut self) -> Result<E, SourceError> {
        // The queue holds a sender of its own, so in practice this only
        // fails once the queue itself is being torn down.
        self.receiver.recv().map_err(|_| SourceError::Disconnected)
    }
}
