//! Delay units, wait lengths, and the optional frame clock used to snap
//! waits onto a fixed tick.

use crate::error::InvalidInput;
use std::time::Duration;

/// A wait length expressed as a multiple of the run's delay unit.  Kept as a
/// ratio so that fractional waits (Decay waits a sixteenth of a unit) stay
/// exact whatever the delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beats {
    numer: u32,
    denom: u32,
}

impl Beats {
    pub const fn whole(multiple: u32) -> Self {
        Self {
            numer: multiple,
            denom: 1,
        }
    }

    pub const fn fraction(numer: u32, denom: u32) -> Self {
        assert!(denom > 0, "a wait cannot be divided into zero parts");
        Self { numer, denom }
    }

    pub fn is_zero(&self) -> bool {
        self.numer == 0
    }
}

/// The delay unit of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    delay: Duration,
}

impl Timing {
    pub fn from_millis(delay_ms: i64) -> Result<Self, InvalidInput> {
        match u64::try_from(delay_ms) {
            Ok(ms) if ms > 0 => Ok(Self {
                delay: Duration::from_millis(ms),
            }),
            _ => Err(InvalidInput::NonPositiveDelay(delay_ms)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Length of a wait of `beats` delay units
    pub fn wait(&self, beats: Beats) -> Duration {
        self.delay
            .checked_mul(beats.numer)
            .map_or(Duration::MAX, |d| d / beats.denom)
    }
}

/// Snaps waits onto a fixed tick.  Each wait is rounded so that the running
/// total of emitted waits stays within half a tick of the exact total; a
/// single wait may come out a tick shorter or longer than asked, but errors
/// never accumulate.  With no tick configured waits pass through unchanged.
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick: Option<Duration>,
    exact: Duration,
    emitted: Duration,
}

impl FrameClock {
    pub fn new(tick: Option<Duration>) -> Self {
        Self {
            tick: tick.filter(|t| !t.is_zero()),
            exact: Duration::ZERO,
            emitted: Duration::ZERO,
        }
    }

    pub fn quantise(&mut self, wait: Duration) -> Duration {
        let Some(tick) = self.tick else {
            return wait;
        };

        self.exact = self.exact.saturating_add(wait);
        let tick_ns = tick.as_nanos();
        let ticks = (self.exact.as_nanos() + tick_ns / 2) / tick_ns;
        let target_ns = u64::try_from(ticks * tick_ns).unwrap_or(u64::MAX);
        let step = Duration::from_nanos(target_ns).saturating_sub(self.emitted);
        self.emitted += step;
        step
    }
}
