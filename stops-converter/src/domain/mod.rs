//! Domain types for the stop converter.
//!
//! Stakes and groups come in from the source parser; exported stops,
//! aliases and zone labels come out of consolidation. Codes and positions
//! are validated at construction time.

mod group;
mod position;
mod stake;
mod stop;
mod zone;

pub use group::{CAPITAL_LOCALITY, Group, GroupKind, group_key, is_railway_group};
pub use position::{InvalidPosition, Position};
pub use stake::{InvalidStakeCode, Stake, StakeCode};
pub use stop::{Alias, ExportedStop, InvalidWheelchairCode, LocationType, WheelchairBoarding};
pub use zone::{BOUNDARY_LABEL, ZoneLabel};
