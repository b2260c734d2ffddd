//! # NBA-dle Common Library
//!
//! Shared code for the NBA-dle game server including:
//! - Error types
//! - Bootstrap configuration loading
//! - Calendar clock and day keys
//! - Domain models (players, clues, daily selection)
//! - API request/response types

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod time;

pub use error::{Error, Result};
