//! Minimum-delay wrapper around a geocoder.

use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::domain::GeoCoordinate;
use crate::geo::{GeocodeError, Geocoder};

/// Waits until at least `min_delay` has passed since the previous lookup
/// started before issuing the next one. A zero delay never sleeps.
pub struct RateLimited<G> {
    inner: G,
    min_delay: Duration,
    last_call: Cell<Option<Instant>>,
}

impl<G: Geocoder> RateLimited<G> {
    pub fn new(inner: G, min_delay: Duration) -> Self {
        Self {
            inner,
            min_delay,
            last_call: Cell::new(None),
        }
    }

    pub fn into_inner(self) -> G {
        self.inner
    }

    fn wait_turn(&self) {
        if self.min_delay.is_zero() {
            return;
        }
        if let Some(last) = self.last_call.get() {
            let elapsed = last.elapsed();
            if elapsed < self.min_delay {
                std::thread::sleep(self.min_delay - elapsed);
            }
        }
        self.last_call.set(Some(Instant::now()));
    }
}

impl<G: Geocoder> Geocoder for RateLimited<G> {
    fn geocode(&self, query: &str) -> Result<Option<GeoCoordinate>, GeocodeError> {
        self.wait_turn();
        self.inner.geocode(query)
    }
}
