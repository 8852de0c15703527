//! Spawn zones: which entities define them, and how they become the records written to `.nsz` files.

use crate::brush::BrushBounds;
use crate::*;

pub mod extract;
pub mod resolve;

pub use extract::{EmptyZoneReason, ExtractionError, extract};
pub use resolve::{ResolutionError, resolve};

/// One box of a zone, from a single brush of the zone entity.
pub type ZoneBrush = BrushBounds;

/// Property keys read from spawn zone entities.
pub mod keys {
	pub const NAME: &str = "zone_name";
	pub const TARGET: &str = "zone_target";
	pub const FOG: &str = "zone_fog";
	pub const ADJACENT_ZONES: &str = "adjacent_zones";
}

/// The properties of a spawn zone entity, split into the ones the zone file uses and everything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneProperties {
	pub name: String,
	pub target: String,
	/// Empty if the entity doesn't set one.
	pub fog: String,
	/// Names of neighbouring zones, in the order listed.
	pub adjacent_zones: Vec<String>,
	/// Properties that aren't written to the zone file, `classname` included.
	pub extra: IndexMap<String, String>,
}

/// A zone read from the map, before identifiers have been assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateZone {
	/// Index of the entity this zone came from.
	pub entity: usize,
	pub properties: ZoneProperties,
	/// Never empty, and no box is degenerate.
	pub brushes: Vec<ZoneBrush>,
}

/// A fully resolved zone, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
	pub name: String,
	/// Starts at 1.
	pub id: u32,
	pub target: String,
	pub fog: String,
	pub adjacent_zones: Vec<u32>,
	pub brushes: Vec<ZoneBrush>,
	/// Index of the entity this zone came from.
	pub entity: usize,
}
