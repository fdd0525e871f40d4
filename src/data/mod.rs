//! Social API data: fetching the friends list and extracting locations.

pub mod extract;
pub mod social;

pub use extract::extract_friends;
pub use social::{DEFAULT_COUNT, DEFAULT_SCREEN_NAME, FriendsQuery, SocialClient};
