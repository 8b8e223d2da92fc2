//! Journey planning through a third-party provider.
//!
//! The provider returns a raw payload; `to_simple_itineraries` maps it
//! into the provider-independent `Itinerary` shape. Only TransportAPI is
//! implemented.

mod client;
mod config;
mod convert;
mod error;
#[cfg(test)]
pub mod mock;
mod types;

pub use client::{JourneyPlanner, TransportApiClient};
pub use config::{DEFAULT_TRANSPORTAPI_URL, PlannerCredentials, PlannerProvider, TransportApiConfig};
pub use convert::to_simple_itineraries;
pub use error::PlannerError;
