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

//! Canonical wiring of a controller: an [`EventQueue`] as the event source,
//! the monotonic clock, and one handler of each phase kind. The show
//! handler queues a quit event after fifty frames, the event handler stops
//! the loop when it arrives.
//!
//! Run with `RUST_LOG=info cargo run -p cadence-sandbox`.

use anyhow::Result;
use cadence_control::{event_handler, move_handler, show_handler, Controller, ControllerConfig};
use cadence_core::{EventQueue, MonotonicClock};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum DemoEvent {
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let queue: EventQueue<DemoEvent> = EventQueue::new();
    let sender = queue.sender();

    let mut controller = Controller::with_config(
        Box::new(queue),
        Box::new(MonotonicClock::new()),
        ControllerConfig {
            dt: 0.1,
            min_t: 1.0 / 60.0,
            delay: Some(Duration::from_millis(2)),
        },
    )?;

    controller.add_event_handler(event_handler(|event: &DemoEvent, c| {
        if *event == DemoEvent::Quit {
            log::info!("Quit received; stopping the loop.");
            c.stop();
        }
    }));

    controller.add_move_handler(move_handler(|step, _, elapsed| {
        log::debug!("move: step = {step:.3}, elapsed = {elapsed:.3}s");
    }));

    let mut frames = 0u32;
    controller.add_show_handler(show_handler(move |delta, _| {
        frames += 1;
        log::info!("frame {frames}: {delta:.4}s since last show");
        if frames == 50 {
            if let Err(e) = sender.send(DemoEvent::Quit) {
                log::error!("Failed to queue the quit event: {e}");
            }
        }
    }));

    controller.run()?;
    log::info!("Demo finished after a clean stop.");
    Ok(())
}
