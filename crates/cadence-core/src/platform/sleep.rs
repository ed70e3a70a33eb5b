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

use super::Sleeper;
use std::thread;
use std::time::Duration;

/// The stock [`Sleeper`], backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn sleeps_for_roughly_the_requested_duration() {
        let mut sleeper = ThreadSleeper;
        let start = Instant::now();
        sleeper.sleep(Duration::from_millis(20));
        assert!(
            start.elapsed() >= Duration::from_millis(20),
            "Sleep returned too early"
        );
    }

    #[test]
    fn zero_duration_returns_immediately() {
        let mut sleeper = ThreadSleeper;
        let start = Instant::now();
        sleeper.sleep(Duration::ZERO);
        assert!(
            start.elapsed() < Duration::from_millis(15),
            "Zero-duration sleep should not suspend the thread"
        );
    }
}
