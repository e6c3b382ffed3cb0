//! Retry schedule.

use std::time::Duration;

use tokio_retry::strategy::ExponentialBackoff;

/// One planned try of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    /// 0-based, always below the fetch's attempt count
    pub index: u32,
    /// Wait before this attempt starts
    pub backoff: Duration,
}

impl Attempt {
    pub fn is_first(&self) -> bool {
        self.index == 0
    }
}

/// Delays before each attempt: nothing before the first, then `2^i` units.
///
/// Built on [`ExponentialBackoff`] with base 2 and the unit as its factor, so
/// the unit is applied in whole milliseconds and delays saturate at
/// `u64::MAX` ms instead of overflowing.
fn backoff_delays(unit: Duration) -> impl Iterator<Item = Duration> {
    let unit_ms = u64::try_from(unit.as_millis()).unwrap_or(u64::MAX);
    std::iter::once(Duration::ZERO).chain(ExponentialBackoff::from_millis(2).factor(unit_ms))
}

/// Backoff before attempt `index`: nothing for the first attempt, `2^index`
/// units afterwards.
pub fn backoff_for(index: u32, unit: Duration) -> Duration {
    backoff_delays(unit)
        .nth(index as usize)
        .unwrap_or(Duration::ZERO)
}

/// Creates the exponential retry schedule for a fetch.
///
/// Yields `max_attempts` attempts with backoffs of 0, 2, 4, 8, ... units.
/// No jitter and no cap: the attempt count bounds the total wait.
pub fn retry_schedule(max_attempts: u32, unit: Duration) -> impl Iterator<Item = Attempt> {
    (0..max_attempts)
        .zip(backoff_delays(unit))
        .map(|(index, backoff)| Attempt { index, backoff })
}
