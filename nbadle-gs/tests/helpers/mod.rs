//! Test Helper Utilities
//!
//! Shared fakes and request helpers for nbadle-gs integration tests

pub mod fake_provider;
pub mod http;

pub use fake_provider::{curry_row, luka_row, FakeProvider};
pub use http::{get_json, post_json, test_app, test_state};
