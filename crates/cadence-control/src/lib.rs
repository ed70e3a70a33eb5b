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

//! # Cadence Control
//!
//! The fixed-timestep controller loop. A [`Controller`] owns a monotonic
//! simulation clock, three ordered handler registries (event, move, show)
//! and drives one iteration of: drain pending events, dispatch queued
//! fixed-size movement steps plus a bounded partial step, dispatch the
//! render callbacks. Every iteration, until stopped.
//!
//! The loop is single-threaded and cooperative: handlers run synchronously
//! on the driving thread, in registration order, and the only blocking
//! operation is the wait inside [`Controller::pause`].

#![warn(missing_docs)]

pub mod config;
pub mod controller;
pub mod error;
pub mod handler;

pub use config::ControllerConfig;
pub use controller::Controller;
pub use error::ControlError;
pub use handler::{
    event_handler, move_handler, show_handler, EventHandler, HandlerId, HandlerList, MoveHandler,
    ShowHandler,
};
