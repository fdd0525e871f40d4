//! Shared friends-map pipeline used by the CLI and the form handler.
//!
//! friends fetch -> location extraction -> geocoding -> grouping -> rendering
//!
//! Every stage consumes the previous stage's output in full. Front-ends only
//! decide where the rendered map goes.

use serde_json::Value;

use crate::config::Settings;
use crate::data::{FriendsQuery, SocialClient, extract_friends};
use crate::domain::{CoordinateGroups, FriendLocation};
use crate::error::AppError;
use crate::geo::{GeocodeReport, Geocoder, NominatimGeocoder, RateLimited, geocode_friends};
use crate::map::{RenderMode, group_by_coordinate, render_map, write_page};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub raw: Value,
    pub friends: Vec<FriendLocation>,
    pub geocoded: GeocodeReport,
    pub groups: CoordinateGroups,
    pub html: String,
    pub mode: RenderMode,
}

/// Source of the raw friends-list body.
///
/// The HTTP client is the real implementation; tests feed canned JSON.
pub trait FriendsSource {
    fn fetch(&self, query: &FriendsQuery) -> Result<Value, AppError>;
}

impl FriendsSource for SocialClient {
    fn fetch(&self, query: &FriendsQuery) -> Result<Value, AppError> {
        self.fetch_friends(query)
    }
}

/// Execute the full pipeline against the live services.
///
/// In `Page` mode the result is also written to `settings.output`.
pub fn run(settings: &Settings, query: &FriendsQuery, mode: RenderMode) -> Result<RunOutput, AppError> {
    let social = SocialClient::new(settings)?;
    let geocoder = RateLimited::new(NominatimGeocoder::new(settings)?, settings.geocode_delay);

    let output = run_with(&social, &geocoder, settings, query, mode)?;
    if mode == RenderMode::Page {
        write_page(&settings.output, &output.html)?;
    }
    Ok(output)
}

/// Execute the pipeline with caller-supplied collaborators. Nothing is written.
pub fn run_with<S, G>(
    source: &S,
    geocoder: &G,
    settings: &Settings,
    query: &FriendsQuery,
    mode: RenderMode,
) -> Result<RunOutput, AppError>
where
    S: FriendsSource + ?Sized,
    G: Geocoder,
{
    // 1) Fetch the friends list.
    let raw = source.fetch(query)?;

    // 2) Keep friends that state a location.
    let friends = extract_friends(&raw)?;

    // 3) Resolve locations; unavailable/unmatched entries are skipped.
    let geocoded = geocode_friends(geocoder, &friends)?;

    // 4) Group by coordinate and render.
    let groups = group_by_coordinate(&geocoded.located);
    let html = render_map(&groups, &settings.map, mode)?;

    Ok(RunOutput {
        raw,
        friends,
        geocoded,
        groups,
        html,
        mode,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::GeoCoordinate;
    use crate::error::ErrorKind;
    use crate::geo::GeocodeError;
    use serde_json::json;

    pub(crate) struct Canned(pub Value);

    impl FriendsSource for Canned {
        fn fetch(&self, _query: &FriendsQuery) -> Result<Value, AppError> {
            Ok(self.0.clone())
        }
    }

    pub(crate) struct KyivOnly;

    pub(crate) const KYIV: GeoCoordinate = GeoCoordinate {
        latitude: 50.4500336,
        longitude: 30.5241361,
    };

    impl Geocoder for KyivOnly {
        fn geocode(&self, query: &str) -> Result<Option<GeoCoordinate>, GeocodeError> {
            Ok((query == "Kyiv").then_some(KYIV))
        }
    }

    fn query() -> FriendsQuery {
        FriendsQuery::new("token", "", "").unwrap()
    }

    #[test]
    fn end_to_end_single_friend() {
        let source = Canned(json!({"users": [{"screen_name": "nufipo", "location": "Kyiv"}]}));
        let out = run_with(&source, &KyivOnly, &Settings::default(), &query(), RenderMode::Fragment).unwrap();

        assert_eq!(out.friends, vec![FriendLocation::new("nufipo", "Kyiv")]);
        assert_eq!(out.geocoded.located.len(), 1);
        assert_eq!(out.geocoded.located[0].coordinate, KYIV);
        assert_eq!(out.groups.len(), 1);
        assert_eq!(out.groups.get(&KYIV).unwrap().iter().collect::<Vec<_>>(), vec!["nufipo"]);
        assert!(out.html.contains("\"popup\":\"nufipo\""));
    }

    #[test]
    fn friends_in_same_place_share_a_marker() {
        let source = Canned(json!({"users": [
            {"screen_name": "a", "location": "Kyiv"},
            {"screen_name": "b", "location": ""},
            {"screen_name": "c", "location": "Podil, Kyiv"},
            {"screen_name": "d", "location": "Atlantis"}
        ]}));
        let out = run_with(&source, &KyivOnly, &Settings::default(), &query(), RenderMode::Fragment).unwrap();

        assert_eq!(out.friends.len(), 3);
        assert_eq!(out.geocoded.not_found, vec!["d".to_string()]);
        assert_eq!(out.groups.len(), 1);
        assert!(out.html.contains("\"popup\":\"a, c\""));
    }

    #[test]
    fn api_error_payload_is_a_lookup_error() {
        let source = Canned(json!({"errors": [{"code": 89, "message": "Invalid or expired token."}]}));
        let err = run_with(&source, &KyivOnly, &Settings::default(), &query(), RenderMode::Page).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }
}
