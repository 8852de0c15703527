#![doc = include_str!("../readme.md")]

pub mod brush;
pub mod config;
pub mod nsz;
pub mod prelude;
pub mod qmap;
pub mod util;
pub mod zone;

pub(crate) use prelude::*;

pub use config::{AdjacencyPolicy, NszConfig};

// Re-exports
pub use anyhow;
pub use indexmap;
pub use toml;

use qmap::ParseError;
use zone::{ExtractionError, ResolutionError};

/// Everything that can stop a map from becoming a zone file. Nothing is written when any of these occur.
#[derive(Error, Debug)]
pub enum ConversionError {
	#[error("parsing map: {0}")]
	Parse(#[from] ParseError),
	#[error("extracting zones: {0}")]
	Extraction(#[from] ExtractionError),
	#[error("resolving zones: {0}")]
	Resolution(#[from] ResolutionError),
	#[error(transparent)]
	Io(#[from] io::Error),
}

/// Converts map source text into the bytes of a `.nsz` file.
///
/// Pure and deterministic, the same source and config always produce the same bytes.
pub fn convert(source: &str, config: &NszConfig) -> Result<Vec<u8>, ConversionError> {
	Ok(nsz::serialize(&compile_zones(source, config)?))
}

/// Runs the pipeline up to (but not including) serialization.
pub fn compile_zones(source: &str, config: &NszConfig) -> Result<Vec<Zone>, ConversionError> {
	let map = qmap::parse(source, config)?;
	info!("Total entities: {} ({} brushes)", map.entities.len(), map.brush_count());
	if !map.formats.is_empty() {
		debug!("Face formats: {}", map.formats.iter().join(", "));
	}
	match map.worldspawn() {
		Some(worldspawn) => debug!("Worldspawn on line {}, wad {:?}", worldspawn.line, worldspawn.property("wad").unwrap_or_default()),
		None => warn!("Map has no worldspawn entity"),
	}

	let candidates = zone::extract(&map, config)?;
	let zones = zone::resolve(candidates, config)?;

	for zone in &zones {
		info!(
			"Zone {} {:?} (entity {}): target {:?}, fog {:?}, adjacent {:?}, {} brush(es)",
			zone.id,
			zone.name,
			zone.entity,
			zone.target,
			zone.fog,
			zone.adjacent_zones,
			zone.brushes.len()
		);
	}

	Ok(zones)
}

/// Reads the map at `input` and writes its zone file to `output`.
///
/// `output` is only touched once the whole conversion has succeeded.
pub fn convert_file(input: &Path, output: &Path, config: &NszConfig) -> Result<usize, ConversionError> {
	info!("Loading map: {}", input.display());
	let source = fs::read_to_string(input)?;

	let zones = compile_zones(&source, config)?;

	info!("Writing {} zones to: {}", zones.len(), output.display());
	nsz::write_file(output, &nsz::serialize(&zones))?;

	Ok(zones.len())
}
