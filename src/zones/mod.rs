//! Per-player card zones.

pub mod player_zones;

pub use player_zones::{PlayerZones, ZonePosition, ZoneSizes};
