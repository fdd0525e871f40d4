//! Geocoding: free-text place names to coordinates.
//!
//! - the `Geocoder` seam and its error type (here)
//! - a Nominatim-compatible HTTP geocoder (`nominatim`)
//! - a minimum-delay wrapper applied to every lookup (`rate_limit`)
//! - segment-dropping resolution over a friend list (`resolve`)

use crate::domain::GeoCoordinate;

pub mod nominatim;
pub mod rate_limit;
pub mod resolve;

pub use nominatim::NominatimGeocoder;
pub use rate_limit::RateLimited;
pub use resolve::{GeocodeReport, geocode_friends, resolve_location};

/// Why a single lookup did not produce an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    /// The service could not be reached or asked us to back off. The entry is
    /// skipped and the run continues.
    Unavailable(String),
    /// Anything else; fatal for the run.
    Failed(String),
}

impl std::fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocodeError::Unavailable(msg) => write!(f, "geocoder unavailable: {msg}"),
            GeocodeError::Failed(msg) => write!(f, "geocoding failed: {msg}"),
        }
    }
}

impl std::error::Error for GeocodeError {}

/// A geocoding service.
///
/// `Ok(None)` means the service answered but found no match for `query`.
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<Option<GeoCoordinate>, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, query: &str) -> Result<Option<GeoCoordinate>, GeocodeError> {
        (**self).geocode(query)
    }
}
