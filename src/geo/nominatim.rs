//! Nominatim-compatible search API client.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::Settings;
use crate::domain::GeoCoordinate;
use crate::error::AppError;
use crate::geo::{GeocodeError, Geocoder};

pub struct NominatimGeocoder {
    client: Client,
    url: String,
}

impl NominatimGeocoder {
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.http_timeout)
            .build()
            .map_err(|e| AppError::network(format!("Failed to build geocoder HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: settings.geocoder_url.clone(),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: &str) -> Result<Option<GeoCoordinate>, GeocodeError> {
        let resp = self
            .client
            .get(&self.url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    GeocodeError::Unavailable(e.to_string())
                } else {
                    GeocodeError::Failed(e.to_string())
                }
            })?;

        let status = resp.status();
        if is_transient(status) {
            return Err(GeocodeError::Unavailable(format!("status {status}")));
        }
        if !status.is_success() {
            return Err(GeocodeError::Failed(format!("status {status}")));
        }

        let places: Vec<Place> = resp
            .json()
            .map_err(|e| GeocodeError::Failed(format!("invalid geocoder response: {e}")))?;

        match places.first() {
            Some(place) => place.coordinate().map(Some),
            None => Ok(None),
        }
    }
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// One search hit. Nominatim returns coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl Place {
    fn coordinate(&self) -> Result<GeoCoordinate, GeocodeError> {
        let latitude = parse_degrees(&self.lat)?;
        let longitude = parse_degrees(&self.lon)?;
        Ok(GeoCoordinate::new(latitude, longitude))
    }
}

fn parse_degrees(raw: &str) -> Result<f64, GeocodeError> {
    let v = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| GeocodeError::Failed(format!("non-numeric coordinate '{raw}'")))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GeocodeError::Failed(format!("non-finite coordinate '{raw}'")))
    }
}
