//! Stop consolidation for a city transit GTFS export.
//!
//! Turns the schedule's stop groups and stakes into the GTFS stop table:
//! physical stakes become stops, virtual stakes are aliased to a physical
//! twin, and railway stations become a single stop or a hub with platforms.
//! Only the stops the schedule actually visits are exported.

pub mod config;
pub mod consolidate;
pub mod domain;
pub mod export;
pub mod input;
pub mod matcher;
pub mod names;
pub mod reference;
pub mod registry;
pub mod rules;
