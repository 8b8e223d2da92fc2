//! Rail journey sensors.
//!
//! Config entries name a station and destinations. Each entry is checked
//! against the live departure board service when it is created, then
//! polled against a journey planner; the results are exposed as sensors.

pub mod config;
pub mod config_flow;
pub mod coordinator;
pub mod darwin;
pub mod domain;
pub mod entry;
pub mod planner;
pub mod registry;
pub mod sensor;
pub mod web;
