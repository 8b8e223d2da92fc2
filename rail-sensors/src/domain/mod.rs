//! Domain types for the rail journey sensors.
//!
//! Station codes, journey requests, simplified itineraries and the
//! snapshots a coordinator publishes. Types that carry an invariant
//! enforce it at construction time.

mod journey;
mod known;
mod snapshot;
mod station;

pub use journey::{Itinerary, ItineraryLeg, JourneyRequest, MAX_ITINERARIES, truncate_itineraries};
pub use known::KNOWN_STATIONS;
pub use snapshot::{Snapshot, SnapshotError};
pub use station::{Crs, InvalidCrs, is_known, normalize_code, normalize_codes, normalize_optional};
