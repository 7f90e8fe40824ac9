//! Integration tests for the auditor
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! sitemap resolver, the page pipeline, the full audit and the JSON API
//! end-to-end.

mod audit_tests;
mod common;
mod fetch_tests;
mod server_tests;
mod sitemap_tests;
