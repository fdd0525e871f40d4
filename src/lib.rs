//! `friends-map` library crate.
//!
//! Fetches a user's friends from the social API, geocodes their profile
//! locations and renders a web map with one marker per location.
//!
//! The binary (`friends-map`) is a thin wrapper around this library so that:
//!
//! - each pipeline stage is testable without network access
//! - a web front end can call the form handler directly

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod form;
pub mod geo;
pub mod map;
pub mod report;

#[cfg(test)]
mod test_support;
