//! Shared domain types.
//!
//! These are the values handed from one pipeline stage to the next:
//!
//! - `FriendLocation` (extractor output)
//! - `GeocodedFriend` (geocoder output)
//! - `CoordinateGroups` (aggregator output, renderer input)

use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// A friend whose profile carries a non-empty free-text location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendLocation {
    pub screen_name: String,
    pub location: String,
}

impl FriendLocation {
    pub fn new(screen_name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            screen_name: screen_name.into(),
            location: location.into(),
        }
    }
}

/// A resolved `(latitude, longitude)` pair.
///
/// Equality and hashing compare the raw bit patterns of both components, so two
/// coordinates are the same key only when they are bit-identical. There is no
/// proximity clustering.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    fn bits(&self) -> (u64, u64) {
        (self.latitude.to_bits(), self.longitude.to_bits())
    }
}

impl PartialEq for GeoCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for GeoCoordinate {}

impl Hash for GeoCoordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedFriend {
    pub screen_name: String,
    pub coordinate: GeoCoordinate,
}

/// One map marker: a coordinate and every screen name resolved to it.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateGroup {
    pub coordinate: GeoCoordinate,
    pub screen_names: BTreeSet<String>,
}

impl CoordinateGroup {
    /// Popup label: the screen names joined with `", "`.
    pub fn label(&self) -> String {
        self.screen_names
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Mapping from coordinate to the set of screen names at that coordinate.
///
/// Groups iterate in the order their coordinate was first seen; names inside a
/// group iterate sorted. Both orders are stable so rendering the same input
/// twice yields the same markers.
#[derive(Debug, Clone, Default)]
pub struct CoordinateGroups {
    groups: Vec<CoordinateGroup>,
    index: HashMap<GeoCoordinate, usize>,
}

impl CoordinateGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `screen_name` to the group for `coordinate`, creating it if needed.
    pub fn insert(&mut self, coordinate: GeoCoordinate, screen_name: impl Into<String>) {
        let slot = match self.index.get(&coordinate) {
            Some(&slot) => slot,
            None => {
                self.groups.push(CoordinateGroup {
                    coordinate,
                    screen_names: BTreeSet::new(),
                });
                self.index.insert(coordinate, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].screen_names.insert(screen_name.into());
    }

    pub fn get(&self, coordinate: &GeoCoordinate) -> Option<&BTreeSet<String>> {
        self.index
            .get(coordinate)
            .map(|&slot| &self.groups[slot].screen_names)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoordinateGroup> {
        self.groups.iter()
    }

    /// Number of distinct coordinates (one marker each).
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of screen names across all groups.
    pub fn member_count(&self) -> usize {
        self.groups.iter().map(|g| g.screen_names.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_compare_bitwise() {
        let a = GeoCoordinate::new(50.45, 30.52);
        let b = GeoCoordinate::new(50.45, 30.52);
        assert_eq!(a, b);
        assert_ne!(a, GeoCoordinate::new(50.45 + f64::EPSILON * 64.0, 30.52));
        assert_ne!(GeoCoordinate::new(0.0, 0.0), GeoCoordinate::new(-0.0, 0.0));
    }

    #[test]
    fn groups_keep_first_seen_order_and_sorted_names() {
        let kyiv = GeoCoordinate::new(50.45, 30.52);
        let lviv = GeoCoordinate::new(49.84, 24.03);

        let mut groups = CoordinateGroups::new();
        groups.insert(lviv, "zed");
        groups.insert(kyiv, "bob");
        groups.insert(lviv, "amy");
        groups.insert(lviv, "amy");

        let order: Vec<_> = groups.iter().map(|g| g.coordinate).collect();
        assert_eq!(order, vec![lviv, kyiv]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.member_count(), 3);
        assert_eq!(groups.iter().next().unwrap().label(), "amy, zed");
    }
}
