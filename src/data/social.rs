//! Social API integration: the "friends list" endpoint.

use reqwest::blocking::Client;
use serde_json::Value;

use crate::config::Settings;
use crate::error::AppError;

const FRIENDS_ENDPOINT: &str = "1.1/friends/list.json";

pub const DEFAULT_SCREEN_NAME: &str = "@BarackObama";
pub const DEFAULT_COUNT: &str = "2";

/// Parameters of one friends-list request, after default substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendsQuery {
    pub bearer: String,
    pub screen_name: String,
    pub count: i64,
}

impl FriendsQuery {
    /// Apply defaults to empty inputs and parse `count`.
    ///
    /// - empty screen name -> `@BarackObama`
    /// - empty count -> `2`
    /// - a count that does not parse as an integer is a value error; any
    ///   integer is sent as-is and left for the API to judge
    pub fn new(bearer: &str, screen_name: &str, count: &str) -> Result<Self, AppError> {
        let screen_name = if screen_name.is_empty() {
            DEFAULT_SCREEN_NAME
        } else {
            screen_name
        };
        let count = if count.is_empty() { DEFAULT_COUNT } else { count };
        let count = count
            .trim()
            .parse::<i64>()
            .map_err(|e| AppError::value(format!("Invalid count '{count}': {e}")))?;

        Ok(Self {
            bearer: bearer.to_string(),
            screen_name: screen_name.to_string(),
            count,
        })
    }
}

pub struct SocialClient {
    client: Client,
    api_base: String,
}

impl SocialClient {
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(settings.http_timeout)
            .build()
            .map_err(|e| AppError::network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_base: settings.api_base.clone(),
        })
    }

    pub fn friends_url(&self) -> String {
        join_url(&self.api_base, FRIENDS_ENDPOINT)
    }

    /// Fetch the friends list and return the decoded JSON body.
    ///
    /// The status code is not inspected: API error payloads (`{"errors": [...]}`)
    /// are returned like any other body and left to the extractor. A body that
    /// is not JSON is a value error; transport failures are network errors.
    pub fn fetch_friends(&self, query: &FriendsQuery) -> Result<Value, AppError> {
        let url = self.friends_url();
        let count = query.count.to_string();
        tracing::info!(screen_name = %query.screen_name, count = query.count, "fetching friends list");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&query.bearer)
            .query(&[
                ("screen_name", query.screen_name.as_str()),
                ("count", count.as_str()),
            ])
            .send()
            .map_err(|e| AppError::network(format!("Social API request failed: {e}")))?;

        tracing::debug!(status = %resp.status(), "social API responded");

        let body = resp
            .text()
            .map_err(|e| AppError::network(format!("Failed to read social API response: {e}")))?;
        serde_json::from_str::<Value>(&body)
            .map_err(|e| AppError::value(format!("Social API response is not JSON: {e}")))
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::{closed_port, serve_once};
    use std::time::Duration;

    fn client_for(addr: std::net::SocketAddr) -> SocialClient {
        let settings = Settings {
            api_base: format!("http://{addr}/"),
            http_timeout: Duration::from_secs(5),
            ..Settings::default()
        };
        SocialClient::new(&settings).unwrap()
    }

    #[test]
    fn empty_inputs_take_defaults() {
        let query = FriendsQuery::new("token", "", "").unwrap();
        assert_eq!(query.screen_name, "@BarackObama");
        assert_eq!(query.count, 2);
        assert_eq!(query.bearer, "token");
    }

    #[test]
    fn explicit_inputs_are_kept() {
        let query = FriendsQuery::new("t", "@nufipo", "15").unwrap();
        assert_eq!(query.screen_name, "@nufipo");
        assert_eq!(query.count, 15);
    }

    #[test]
    fn non_numeric_count_is_a_value_error() {
        for bad in ["two", "1.5", " "] {
            let err = FriendsQuery::new("t", "x", bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Value, "count {bad:?}");
        }
    }

    #[test]
    fn any_integer_count_is_accepted() {
        assert_eq!(FriendsQuery::new("t", "x", "-1").unwrap().count, -1);
        assert_eq!(FriendsQuery::new("t", "x", "5000000000").unwrap().count, 5_000_000_000);
        assert_eq!(FriendsQuery::new("t", "x", " 7 ").unwrap().count, 7);
    }

    #[test]
    fn fetch_sends_bearer_and_query_parameters() {
        let (addr, server) = serve_once("200 OK", "application/json", r#"{"users": []}"#);
        let query = FriendsQuery::new("tok", "", "").unwrap();

        let body = client_for(addr).fetch_friends(&query).unwrap();
        assert_eq!(body, serde_json::json!({"users": []}));

        let head = server.join().unwrap();
        let request_line = head.lines().next().unwrap();
        assert_eq!(
            request_line,
            "GET /1.1/friends/list.json?screen_name=%40BarackObama&count=2 HTTP/1.1"
        );
        assert!(head.to_ascii_lowercase().contains("authorization: bearer tok\r\n"));
    }

    #[test]
    fn error_status_body_is_returned_as_is() {
        let payload = r#"{"errors": [{"code": 89, "message": "Invalid or expired token."}]}"#;
        let (addr, server) = serve_once("401 Unauthorized", "application/json", payload);
        let query = FriendsQuery::new("bad", "@nufipo", "-1").unwrap();

        let body = client_for(addr).fetch_friends(&query).unwrap();
        assert_eq!(body["errors"][0]["code"], 89);
        assert!(server.join().unwrap().contains("count=-1"));
    }

    #[test]
    fn non_json_body_is_a_value_error() {
        let (addr, server) = serve_once("503 Service Unavailable", "text/html", "<html>Over capacity</html>");
        let query = FriendsQuery::new("tok", "", "").unwrap();

        let err = client_for(addr).fetch_friends(&query).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        server.join().unwrap();
    }

    #[test]
    fn unreachable_api_is_a_network_error() {
        let query = FriendsQuery::new("tok", "", "").unwrap();
        let err = client_for(closed_port()).fetch_friends(&query).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[test]
    fn friends_url_joins_base_and_endpoint() {
        let mut settings = Settings::default();
        let client = SocialClient::new(&settings).unwrap();
        assert_eq!(client.friends_url(), "https://api.twitter.com/1.1/friends/list.json");

        settings.api_base = "http://localhost:8080".to_string();
        let client = SocialClient::new(&settings).unwrap();
        assert_eq!(client.friends_url(), "http://localhost:8080/1.1/friends/list.json");
    }
}
