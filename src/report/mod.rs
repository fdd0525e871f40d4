//! Terminal summary of a pipeline run.
//!
//! Formatting lives here so the pipeline stages only return data.

use std::path::Path;

use crate::app::pipeline::RunOutput;
use crate::data::FriendsQuery;

/// Format the run summary: counts per stage, skipped friends, output location.
pub fn format_run_summary(query: &FriendsQuery, run: &RunOutput, saved_to: Option<&Path>) -> String {
    let mut out = String::new();

    out.push_str("=== friends-map ===\n");
    out.push_str(&format!("Screen name: {} (count={})\n", query.screen_name, query.count));
    out.push_str(&format!("Friends with a location: {}\n", run.friends.len()));
    out.push_str(&format!("Located: {}\n", run.geocoded.located.len()));

    if !run.geocoded.not_found.is_empty() {
        out.push_str(&format!(
            "Not found ({}): {}\n",
            run.geocoded.not_found.len(),
            run.geocoded.not_found.join(", ")
        ));
    }
    if !run.geocoded.unavailable.is_empty() {
        out.push_str(&format!(
            "Geocoder unavailable ({}): {}\n",
            run.geocoded.unavailable.len(),
            run.geocoded.unavailable.join(", ")
        ));
    }

    out.push_str(&format!("Markers: {}", run.groups.len()));
    if let Some(path) = saved_to {
        out.push_str(&format!("\nSaved map: {}", path.display()));
    }

    out
}
