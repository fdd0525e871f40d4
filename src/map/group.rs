//! Group geocoded friends by coordinate.

use crate::domain::{CoordinateGroups, GeocodedFriend};

/// Put every screen name into the group of its exact coordinate.
pub fn group_by_coordinate(friends: &[GeocodedFriend]) -> CoordinateGroups {
    let mut groups = CoordinateGroups::new();
    for friend in friends {
        groups.insert(friend.coordinate, friend.screen_name.as_str());
    }
    tracing::info!(friends = friends.len(), markers = groups.len(), "grouped friends by coordinate");
    groups
}
