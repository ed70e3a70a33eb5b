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

//! Ordered callback registries with stable ids.
//!
//! Each dispatch phase (event, move, show) owns one [`HandlerList`]. The
//! list is a slot vector with tombstones: registration appends a slot and
//! hands back the slot index as a stable [`HandlerId`]; removal vacates the
//! slot without shifting anything, so ids held elsewhere stay valid.
//! Dispatch iterates over a snapshot of the live entries captured at phase
//! start, which is what makes in-callback add/remove safe.

use crate::controller::Controller;
use std::cell::RefCell;
use std::rc::Rc;

/// A registered event handler: invoked once per decoded event with the
/// event and the controller driving the loop.
pub type EventHandler<E> = Rc<RefCell<dyn FnMut(&E, &mut Controller<E>)>>;

/// A registered move handler: invoked with the step fraction (`1.0` for a
/// whole step, less for the trailing partial step), the controller, and the
/// total elapsed simulation time in seconds.
pub type MoveHandler<E> = Rc<RefCell<dyn FnMut(f64, &mut Controller<E>, f64)>>;

/// A registered show handler: invoked once per iteration with the seconds
/// elapsed since the previous show dispatch and the controller.
pub type ShowHandler<E> = Rc<RefCell<dyn FnMut(f64, &mut Controller<E>)>>;

/// Wraps a plain closure as an [`EventHandler`].
///
/// Keep a clone of the returned handle if you intend to remove the handler
/// by identity later.
pub fn event_handler<E, F>(f: F) -> EventHandler<E>
where
    F: FnMut(&E, &mut Controller<E>) + 'static,
{
    Rc::new(RefCell::new(f))
}

/// Wraps a plain closure as a [`MoveHandler`].
pub fn move_handler<E, F>(f: F) -> MoveHandler<E>
where
    F: FnMut(f64, &mut Controller<E>, f64) + 'static,
{
    Rc::new(RefCell::new(f))
}

/// Wraps a plain closure as a [`ShowHandler`].
pub fn show_handler<E, F>(f: F) -> ShowHandler<E>
where
    F: FnMut(f64, &mut Controller<E>) + 'static,
{
    Rc::new(RefCell::new(f))
}

/// Stable identifier assigned to a handler at registration, scoped to the
/// list (and therefore the phase) it was registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub(crate) usize);

/// An ordered sequence of callback registrations of one phase kind.
///
/// Insertion order defines execution order. Slots vacated by removal are
/// tombstoned, never reused, so a [`HandlerId`] can only ever refer to the
/// entry it was issued for. [`clear`](HandlerList::clear) resets the list
/// wholesale; ids restart from zero only once nothing occupies the list.
#[derive(Debug)]
pub struct HandlerList<H> {
    slots: Vec<Option<H>>,
    live: usize,
}

impl<H> HandlerList<H> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Appends a handler and returns its stable id.
    pub fn insert(&mut self, handler: H) -> HandlerId {
        let id = HandlerId(self.slots.len());
        self.slots.push(Some(handler));
        self.live += 1;
        id
    }

    /// Removes and returns the entry registered under `id`.
    ///
    /// Returns `None` when the id is out of range or its slot was already
    /// vacated, leaving the list untouched. Removing the same id twice
    /// yields the entry once and `None` thereafter.
    pub fn remove(&mut self, id: HandlerId) -> Option<H> {
        let removed = self.slots.get_mut(id.0)?.take();
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    /// Removes and returns the first live entry matching `is_match`,
    /// scanning in registration order.
    pub fn remove_where<F>(&mut self, is_match: F) -> Option<(HandlerId, H)>
    where
        F: Fn(&H) -> bool,
    {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.as_ref().is_some_and(&is_match) {
                self.live -= 1;
                return slot.take().map(|h| (HandlerId(index), h));
            }
        }
        None
    }

    /// Drops every entry. Ids issued afterwards restart from zero, which is
    /// safe precisely because nothing occupies the list any more.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.live = 0;
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true when no live entries remain.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns true when `id` still refers to a live entry.
    pub fn contains(&self, id: HandlerId) -> bool {
        self.slots.get(id.0).is_some_and(|s| s.is_some())
    }
}

impl<H: Clone> HandlerList<H> {
    /// Clones the live entries, in registration order, for one dispatch
    /// pass. Mutating the list while the snapshot is being walked cannot
    /// invalidate the walk.
    pub fn snapshot(&self) -> Vec<H> {
        self.slots.iter().filter_map(|s| s.clone()).collect()
    }
}

impl<H> Default for HandlerList<H> {
    fn default() -> Self {
        Self::new()
    }
}
