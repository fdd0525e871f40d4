//! Resolve friend locations to coordinates.
//!
//! Free-text profile locations are often more specific than the geocoder can
//! match ("Old Town, District, City"). Resolution queries the full text first,
//! then keeps dropping the leftmost comma-separated segment until something
//! matches or nothing is left.

use crate::domain::{FriendLocation, GeoCoordinate, GeocodedFriend};
use crate::error::AppError;
use crate::geo::{GeocodeError, Geocoder};

/// Outcome of geocoding a friend list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeocodeReport {
    /// Resolved friends, in input order.
    pub located: Vec<GeocodedFriend>,
    /// Screen names skipped because the service was unavailable.
    pub unavailable: Vec<String>,
    /// Screen names whose location never matched, even after truncation.
    pub not_found: Vec<String>,
}

impl GeocodeReport {
    pub fn skipped(&self) -> usize {
        self.unavailable.len() + self.not_found.len()
    }
}

/// Resolve one location text, dropping leading segments until a match.
///
/// Returns `Ok(None)` once the remaining text is empty. Empty queries are never
/// sent to the service.
pub fn resolve_location<G: Geocoder>(
    geocoder: &G,
    text: &str,
) -> Result<Option<GeoCoordinate>, GeocodeError> {
    let mut segments: Vec<&str> = text.split(',').collect();

    loop {
        let query = segments.join(",");
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        if let Some(coord) = geocoder.geocode(query)? {
            tracing::debug!(query, lat = coord.latitude, lon = coord.longitude, "geocoded");
            return Ok(Some(coord));
        }
        tracing::debug!(query, "no match");

        if segments.len() <= 1 {
            return Ok(None);
        }
        segments.remove(0);
    }
}

/// Geocode every friend. Unavailable and unmatched entries are skipped; any
/// other geocoder failure aborts the run.
pub fn geocode_friends<G: Geocoder>(
    geocoder: &G,
    friends: &[FriendLocation],
) -> Result<GeocodeReport, AppError> {
    let mut report = GeocodeReport {
        located: Vec::with_capacity(friends.len()),
        ..GeocodeReport::default()
    };

    for friend in friends {
        match resolve_location(geocoder, &friend.location) {
            Ok(Some(coordinate)) => report.located.push(GeocodedFriend {
                screen_name: friend.screen_name.clone(),
                coordinate,
            }),
            Ok(None) => {
                tracing::warn!(
                    screen_name = %friend.screen_name,
                    location = %friend.location,
                    "location not found, skipping"
                );
                report.not_found.push(friend.screen_name.clone());
            }
            Err(GeocodeError::Unavailable(reason)) => {
                tracing::warn!(screen_name = %friend.screen_name, %reason, "geocoder unavailable, skipping");
                report.unavailable.push(friend.screen_name.clone());
            }
            Err(GeocodeError::Failed(reason)) => {
                return Err(AppError::network(format!(
                    "Geocoding '{}' for {} failed: {reason}",
                    friend.location, friend.screen_name
                )));
            }
        }
    }

    tracing::info!(
        located = report.located.len(),
        skipped = report.skipped(),
        "geocoded friend locations"
    );
    Ok(report)
}
