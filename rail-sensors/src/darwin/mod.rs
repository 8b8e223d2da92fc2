//! Darwin LDB (Live Departure Boards) client.
//!
//! This module provides an HTTP client for the National Rail Darwin API.
//! The service uses it as a connectivity probe: a token is only accepted
//! once a board request made with it succeeds.
//!
//! Key characteristics of Darwin:
//! - Authentication is an `x-apikey` header
//! - Times are in "HH:MM" format (UK local time)
//! - A destination filter (`filterCrs`) restricts the board to services
//!   calling at that station

mod client;
mod convert;
mod error;
#[cfg(test)]
pub mod mock;
mod types;

pub use client::{BoardQuery, BoardSource, DarwinClient, DarwinConfig};
pub use convert::{Departure, DepartureBoard};
pub use error::DarwinError;
