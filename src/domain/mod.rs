//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - extracted friend locations (`FriendLocation`)
//! - resolved coordinates (`GeoCoordinate`, `GeocodedFriend`)
//! - grouped markers (`CoordinateGroups`)

pub mod types;

pub use types::*;
