//! Integration tests for the harvester
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! HTTP fetcher and the full discover-list-filter cycle end-to-end.

mod fetcher_tests;
mod harvest_tests;
