// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use time::OffsetDateTime;

/// A source for the current time.
///
/// The claims encode unix timestamps, so the clock returns an
/// `OffsetDateTime` rather than a `std::time::Instant`, which has no epoch.
pub trait Clock: std::fmt::Debug + Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Reads the system wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Always returns the same time.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(OffsetDateTime);

impl FixedClock {
    pub fn new(now: OffsetDateTime) -> Self {
        Self(now)
    }

    /// A clock fixed at `seconds` after the unix epoch.
    ///
    /// Returns `None` if `seconds` is out of range for `OffsetDateTime`.
    pub fn from_unix_timestamp(seconds: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp(seconds).ok().map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
