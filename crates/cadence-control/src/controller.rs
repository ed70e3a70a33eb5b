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

//! The fixed-timestep controller.

use crate::config::ControllerConfig;
use crate::error::ControlError;
use crate::handler::{EventHandler, HandlerId, HandlerList, MoveHandler, ShowHandler};
use cadence_core::{Clock, EventSlot, EventSource, Sleeper, ThreadSleeper};
use log;
use std::rc::Rc;
use std::time::Duration;

/// The loop's mutable clock bookkeeping. Epoch is fixed when `run` starts.
#[derive(Debug, Default)]
struct ClockState {
    current_time: f64,
    accumulated_time: f64,
    last_show_time: f64,
    running: bool,
    paused: bool,
}

/// Drives the fixed-timestep loop over an event source and a clock.
///
/// One iteration of [`run`](Controller::run) drains pending events, then
/// dispatches as many whole movement steps of `dt` seconds as the elapsed
/// real time has queued up (plus one bounded partial step for the
/// remainder), then dispatches the show handlers once. Handlers execute
/// synchronously on the driving thread, in registration order, and receive
/// the controller itself, so they can stop the loop, enter a pause, or
/// rewire the registries mid-flight.
///
/// Dispatch passes iterate over a snapshot of the registry captured at
/// phase start; a handler adding or removing handlers takes effect from the
/// next pass onward.
pub struct Controller<E: 'static> {
    source: Box<dyn EventSource<E>>,
    clock: Box<dyn Clock>,
    sleeper: Box<dyn Sleeper>,
    config: ControllerConfig,
    pending_config: Option<ControllerConfig>,
    state: ClockState,
    slot: EventSlot<E>,
    event_handlers: HandlerList<EventHandler<E>>,
    move_handlers: HandlerList<MoveHandler<E>>,
    show_handlers: HandlerList<ShowHandler<E>>,
}

impl<E: 'static> Controller<E> {
    /// Creates a controller with the default configuration
    /// (`dt = 0.1`, `min_t = 1/60`, no delay) and empty registries.
    pub fn new(source: Box<dyn EventSource<E>>, clock: Box<dyn Clock>) -> Self {
        Self::build(source, clock, ControllerConfig::default())
    }

    /// Creates a controller with an explicit configuration.
    ///
    /// ## Returns
    /// The controller, or [`ControlError::InvalidArgument`] when the
    /// configuration violates its contract.
    pub fn with_config(
        source: Box<dyn EventSource<E>>,
        clock: Box<dyn Clock>,
        config: ControllerConfig,
    ) -> Result<Self, ControlError> {
        config.validate()?;
        Ok(Self::build(source, clock, config))
    }

    fn build(source: Box<dyn EventSource<E>>, clock: Box<dyn Clock>, config: ControllerConfig) -> Self {
        Self {
            source,
            clock,
            sleeper: Box::new(ThreadSleeper),
            config,
            pending_config: None,
            state: ClockState::default(),
            slot: EventSlot::new(),
            event_handlers: HandlerList::new(),
            move_handlers: HandlerList::new(),
            show_handlers: HandlerList::new(),
        }
    }

    /// Replaces the sleeper used for the optional inter-iteration delay.
    pub fn set_sleeper(&mut self, sleeper: Box<dyn Sleeper>) {
        self.sleeper = sleeper;
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Enters the main loop and blocks until [`stop`](Controller::stop).
    ///
    /// Each iteration runs, in order: the event phase (pump, then drain the
    /// non-blocking poll, dispatching every decoded event to every event
    /// handler), the timing check (`frame_time < min_t` skips straight to
    /// the delay), the move phase, the show phase, and the optional delay.
    ///
    /// ## Returns
    /// `Ok(())` once stopped, or [`ControlError::Collaborator`] the moment
    /// the event source fails.
    pub fn run(&mut self) -> Result<(), ControlError> {
        if self.state.running {
            log::warn!("run() called while the loop is already running; ignoring.");
            return Ok(());
        }

        self.state.running = true;
        self.state.paused = false;
        let start = self.clock.now();
        self.state.current_time = start;
        self.state.accumulated_time = 0.0;
        self.state.last_show_time = start;
        log::info!(
            "Controller loop starting (dt = {}s, min_t = {}s).",
            self.config.dt,
            self.config.min_t
        );

        while self.state.running {
            // Buffered dt/min_t/delay changes land here, never mid-iteration.
            if let Some(config) = self.pending_config.take() {
                log::debug!("Applying buffered config change: {config:?}");
                self.config = config;
            }

            if let Err(e) = self.dispatch_events() {
                self.state.running = false;
                log::error!("Event source failed; leaving the loop: {e}");
                return Err(e);
            }

            let new_time = self.clock.now();
            let frame_time = new_time - self.state.current_time;
            if frame_time < self.config.min_t {
                // Throttled: too little real time has passed. current_time
                // is left untouched so the shortfall keeps accumulating.
                self.apply_delay();
                continue;
            }
            self.state.current_time = new_time;
            self.state.accumulated_time += frame_time;

            self.dispatch_moves();
            self.dispatch_shows();
            self.apply_delay();
        }

        log::info!("Controller loop stopped.");
        Ok(())
    }

    /// Requests loop exit. Level-triggered: the flag is observed at the top
    /// of the next iteration, so an iteration already inside dispatch runs
    /// to completion.
    pub fn stop(&mut self) {
        log::debug!("Stop requested; loop exits at the next iteration check.");
        self.state.running = false;
    }

    /// Enters a nested blocking loop, suspending on the event source's
    /// blocking wait and feeding each event to `callback` until it returns
    /// `true`. Normally invoked from within an event handler.
    ///
    /// While inside, [`paused`](Controller::paused) reports `true`.
    ///
    /// `current_time` is *not* refreshed on return: the caller must reset
    /// it (see [`resume`](Controller::resume)), otherwise the real time
    /// spent paused is misattributed to `accumulated_time` and produces a
    /// burst of move steps on the next iteration.
    pub fn pause<F>(&mut self, mut callback: F) -> Result<(), ControlError>
    where
        F: FnMut(&E, &mut Self) -> bool,
    {
        log::debug!("Entering pause loop.");
        self.state.paused = true;
        loop {
            let event = match self.source.wait() {
                Ok(event) => event,
                Err(e) => {
                    self.state.paused = false;
                    return Err(e.into());
                }
            };
            self.slot.load(event);
            let resume = match self.slot.take() {
                Some(event) => callback(&event, self),
                None => false,
            };
            if resume {
                break;
            }
        }
        self.state.paused = false;
        log::debug!("Pause loop exited.");
        Ok(())
    }

    /// Performs the documented post-pause compensation: resets
    /// `current_time` to the clock's current reading so the paused span is
    /// not counted as elapsed simulation time.
    pub fn resume(&mut self) {
        self.state.current_time = self.clock.now();
    }

    /// True while a [`pause`](Controller::pause) loop is on the stack.
    /// Readable from inside a pause callback to distinguish entering from
    /// exiting in toggle logic.
    pub fn paused(&self) -> bool {
        self.state.paused
    }

    /// True while [`run`](Controller::run) is looping.
    pub fn running(&self) -> bool {
        self.state.running
    }

    // ------------------------------------------------------------------
    // Handler registration
    // ------------------------------------------------------------------

    /// Appends an event handler; returns its stable id.
    pub fn add_event_handler(&mut self, handler: EventHandler<E>) -> HandlerId {
        self.event_handlers.insert(handler)
    }

    /// Appends a move handler; returns its stable id.
    pub fn add_move_handler(&mut self, handler: MoveHandler<E>) -> HandlerId {
        self.move_handlers.insert(handler)
    }

    /// Appends a show handler; returns its stable id.
    pub fn add_show_handler(&mut self, handler: ShowHandler<E>) -> HandlerId {
        self.show_handlers.insert(handler)
    }

    /// Removes and returns the event handler registered under `id`.
    pub fn remove_event_handler(&mut self, id: HandlerId) -> Result<EventHandler<E>, ControlError> {
        self.event_handlers.remove(id).ok_or(ControlError::NotFound)
    }

    /// Removes and returns the move handler registered under `id`.
    pub fn remove_move_handler(&mut self, id: HandlerId) -> Result<MoveHandler<E>, ControlError> {
        self.move_handlers.remove(id).ok_or(ControlError::NotFound)
    }

    /// Removes and returns the show handler registered under `id`.
    pub fn remove_show_handler(&mut self, id: HandlerId) -> Result<ShowHandler<E>, ControlError> {
        self.show_handlers.remove(id).ok_or(ControlError::NotFound)
    }

    /// Removes the first event handler that is the same allocation as
    /// `handler` (compared with [`Rc::ptr_eq`]).
    pub fn remove_event_handler_by_identity(
        &mut self,
        handler: &EventHandler<E>,
    ) -> Result<EventHandler<E>, ControlError> {
        self.event_handlers
            .remove_where(|h| Rc::ptr_eq(h, handler))
            .map(|(_, h)| h)
            .ok_or(ControlError::NotFound)
    }

    /// Removes the first move handler that is the same allocation as
    /// `handler` (compared with [`Rc::ptr_eq`]).
    pub fn remove_move_handler_by_identity(
        &mut self,
        handler: &MoveHandler<E>,
    ) -> Result<MoveHandler<E>, ControlError> {
        self.move_handlers
            .remove_where(|h| Rc::ptr_eq(h, handler))
            .map(|(_, h)| h)
            .ok_or(ControlError::NotFound)
    }

    /// Removes the first show handler that is the same allocation as
    /// `handler` (compared with [`Rc::ptr_eq`]).
    pub fn remove_show_handler_by_identity(
        &mut self,
        handler: &ShowHandler<E>,
    ) -> Result<ShowHandler<E>, ControlError> {
        self.show_handlers
            .remove_where(|h| Rc::ptr_eq(h, handler))
            .map(|(_, h)| h)
            .ok_or(ControlError::NotFound)
    }

    /// Clears the event handler registry.
    pub fn remove_all_event_handlers(&mut self) {
        self.event_handlers.clear();
    }

    /// Clears the move handler registry.
    pub fn remove_all_move_handlers(&mut self) {
        self.move_handlers.clear();
    }

    /// Clears the show handler registry.
    pub fn remove_all_show_handlers(&mut self) {
        self.show_handlers.clear();
    }

    /// Clears all three registries.
    pub fn remove_all_handlers(&mut self) {
        self.remove_all_event_handlers();
        self.remove_all_move_handlers();
        self.remove_all_show_handlers();
    }

    /// Number of registered event handlers.
    pub fn event_handler_count(&self) -> usize {
        self.event_handlers.len()
    }

    /// Number of registered move handlers.
    pub fn move_handler_count(&self) -> usize {
        self.move_handlers.len()
    }

    /// Number of registered show handlers.
    pub fn show_handler_count(&self) -> usize {
        self.show_handlers.len()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The fixed step duration in seconds. Reports the most recently set
    /// value, including one still buffered for the next iteration.
    pub fn dt(&self) -> f64 {
        self.pending_config.as_ref().unwrap_or(&self.config).dt
    }

    /// Sets the fixed step duration. Mid-run, the change is buffered and
    /// applied at the start of the next iteration.
    pub fn set_dt(&mut self, dt: f64) -> Result<(), ControlError> {
        if !(dt > 0.0) {
            return Err(ControlError::InvalidArgument {
                name: "dt",
                value: dt,
            });
        }
        self.target_config().dt = dt;
        Ok(())
    }

    /// The throttle threshold in seconds. Reports the most recently set
    /// value, including one still buffered for the next iteration.
    pub fn min_t(&self) -> f64 {
        self.pending_config.as_ref().unwrap_or(&self.config).min_t
    }

    /// Sets the throttle threshold (`0` disables throttling). Mid-run, the
    /// change is buffered and applied at the start of the next iteration.
    pub fn set_min_t(&mut self, min_t: f64) -> Result<(), ControlError> {
        if !(min_t >= 0.0) {
            return Err(ControlError::InvalidArgument {
                name: "min_t",
                value: min_t,
            });
        }
        self.target_config().min_t = min_t;
        Ok(())
    }

    /// The configured inter-iteration delay, if any.
    pub fn delay(&self) -> Option<Duration> {
        self.pending_config.as_ref().unwrap_or(&self.config).delay
    }

    /// Sets (or clears) the inter-iteration delay. Mid-run, the change is
    /// buffered like `dt` and `min_t`.
    pub fn set_delay(&mut self, delay: Option<Duration>) {
        self.target_config().delay = delay;
    }

    /// The simulation clock reading, in seconds since the epoch fixed when
    /// `run` started.
    pub fn current_time(&self) -> f64 {
        self.state.current_time
    }

    /// Overwrites the simulation clock reading, effective immediately.
    /// This is the documented mechanism for pause compensation.
    pub fn set_current_time(&mut self, seconds: f64) {
        self.state.current_time = seconds;
    }

    /// Unconsumed time carried toward the next movement dispatch. Zero
    /// outside the move phase; exposed for introspection.
    pub fn accumulated_time(&self) -> f64 {
        self.state.accumulated_time
    }

    /// Routes a config mutation to the active config directly, or to the
    /// pending buffer while the loop is running.
    fn target_config(&mut self) -> &mut ControllerConfig {
        if self.state.running {
            let active = self.config.clone();
            self.pending_config.get_or_insert_with(|| active)
        } else {
            &mut self.config
        }
    }

    // ------------------------------------------------------------------
    // Dispatch phases
    // ------------------------------------------------------------------

    /// Event phase: pump once, then drain the non-blocking poll. Every
    /// decoded event goes to every handler in the snapshot, in order.
    fn dispatch_events(&mut self) -> Result<(), ControlError> {
        self.source.pump()?;
        let handlers = self.event_handlers.snapshot();
        while let Some(event) = self.source.poll()? {
            self.slot.load(event);
            if let Some(event) = self.slot.take() {
                for handler in &handlers {
                    (&mut *handler.borrow_mut())(&event, self);
                }
            }
        }
        Ok(())
    }

    /// Move phase: whole steps at `step = 1.0` while a full `dt` is queued,
    /// then one partial step for the remainder. The partial call is skipped
    /// when the remainder is exactly zero after at least one whole step,
    /// but still made (with `step = 0.0`) when the iteration consumed no
    /// whole step at all, so an unthrottled zero-length frame is observable.
    fn dispatch_moves(&mut self) {
        let handlers = self.move_handlers.snapshot();
        let dt = self.config.dt;
        let elapsed_total = self.state.current_time;
        let mut whole_steps: u32 = 0;

        while self.state.accumulated_time >= dt {
            for handler in &handlers {
                (&mut *handler.borrow_mut())(1.0, self, elapsed_total);
            }
            self.state.accumulated_time -= dt;
            whole_steps += 1;
        }

        let remainder = self.state.accumulated_time;
        if remainder > 0.0 || whole_steps == 0 {
            let step = remainder / dt;
            for handler in &handlers {
                (&mut *handler.borrow_mut())(step, self, elapsed_total);
            }
        }
        self.state.accumulated_time = 0.0;
    }

    /// Show phase: one dispatch per iteration, carrying the seconds elapsed
    /// since the previous show dispatch (throttled iterations included).
    fn dispatch_shows(&mut self) {
        let delta = self.state.current_time - self.state.last_show_time;
        self.state.last_show_time = self.state.current_time;
        let handlers = self.show_handlers.snapshot();
        for handler in &handlers {
            (&mut *handler.borrow_mut())(delta, self);
        }
    }

    fn apply_delay(&mut self) {
        if let Some(delay) = self.config.delay {
            self.sleeper.sleep(delay);
        }
    }
}
