//! Form-submission handling for a web front end.
//!
//! Route wiring and templates belong to whatever hosts this crate. This module
//! only turns submitted fields into one of four responses:
//!
//! - the rendered map
//! - "missing fields" (pipeline not run)
//! - "lookup failure" (unexpected social API response)
//! - "value failure" (non-numeric count or a non-JSON API reply)
//!
//! Any other error is returned to the caller.

use crate::app::pipeline::{self, FriendsSource};
use crate::config::Settings;
use crate::data::FriendsQuery;
use crate::error::{AppError, ErrorKind};
use crate::geo::Geocoder;
use crate::map::{RenderMode, write_page};

/// Raw form fields as submitted. Absent and empty are treated the same.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    pub bearer: Option<String>,
    pub screen_name: Option<String>,
    pub count: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResponse {
    Map(String),
    MissingFields,
    LookupFailure,
    ValueFailure,
}

impl FormResponse {
    /// HTML body to send back.
    pub fn body(&self) -> String {
        match self {
            FormResponse::Map(html) => html.clone(),
            FormResponse::MissingFields => {
                failure_page("Please fill in the bearer token, screen name and count.")
            }
            FormResponse::LookupFailure => failure_page(
                "The social API did not return a friends list. Check the bearer token and screen name.",
            ),
            FormResponse::ValueFailure => failure_page(
                "A value could not be read. Count must be a whole number and the social API must answer with JSON.",
            ),
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, FormResponse::Map(_))
    }
}

impl FormSubmission {
    /// Validated `(bearer, screen_name, count)`, or `None` if any is missing.
    fn fields(&self) -> Option<(&str, &str, &str)> {
        fn present(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.is_empty())
        }
        Some((
            present(&self.bearer)?,
            present(&self.screen_name)?,
            present(&self.count)?,
        ))
    }
}

/// Handle a submission against the live services.
///
/// In `Page` mode the map is also saved to `settings.output`.
pub fn handle_form(settings: &Settings, form: &FormSubmission, mode: RenderMode) -> Result<FormResponse, AppError> {
    let Some((bearer, screen_name, count)) = form.fields() else {
        return Ok(FormResponse::MissingFields);
    };
    let outcome = FriendsQuery::new(bearer, screen_name, count)
        .and_then(|query| pipeline::run(settings, &query, mode));
    respond(outcome.map(|out| out.html))
}

/// Handle a submission with caller-supplied collaborators.
pub fn handle_form_with<S, G>(
    source: &S,
    geocoder: &G,
    settings: &Settings,
    form: &FormSubmission,
    mode: RenderMode,
) -> Result<FormResponse, AppError>
where
    S: FriendsSource + ?Sized,
    G: Geocoder,
{
    let Some((bearer, screen_name, count)) = form.fields() else {
        return Ok(FormResponse::MissingFields);
    };
    let outcome = FriendsQuery::new(bearer, screen_name, count)
        .and_then(|query| pipeline::run_with(source, geocoder, settings, &query, mode))
        .and_then(|out| {
            if mode == RenderMode::Page {
                write_page(&settings.output, &out.html)?;
            }
            Ok(out.html)
        });
    respond(outcome)
}

fn respond(outcome: Result<String, AppError>) -> Result<FormResponse, AppError> {
    match outcome {
        Ok(html) => Ok(FormResponse::Map(html)),
        Err(err) => match err.kind() {
            ErrorKind::Lookup => {
                tracing::warn!(%err, "form request failed: lookup");
                Ok(FormResponse::LookupFailure)
            }
            ErrorKind::Value => {
                tracing::warn!(%err, "form request failed: value");
                Ok(FormResponse::ValueFailure)
            }
            _ => Err(err),
        },
    }
}

fn failure_page(message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"/><title>Friends map</title></head>\n\
         <body>\n<h1>Could not build the map</h1>\n<p>{message}</p>\n<p><a href=\"/\">Back</a></p>\n</body>\n</html>\n"
    )
}
