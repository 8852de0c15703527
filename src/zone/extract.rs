use super::*;

/// Finds every spawn zone entity in `map` and reads its properties and brush boxes, in entity order.
///
/// Entities with any other classname are ordinary level geometry and skipped.
pub fn extract(map: &MapDocument, config: &NszConfig) -> Result<Vec<CandidateZone>, ExtractionError> {
	let mut zones = Vec::new();

	for (entity_idx, entity) in map.entities.iter().enumerate() {
		if entity.classname() != Some(config.zone_classname.as_str()) {
			trace!("Skipping entity {entity_idx} ({})", entity.classname().unwrap_or("no classname"));
			continue;
		}

		let properties = ZoneProperties::from_entity(entity_idx, entity)?;

		debug!(
			"Found {} entity {entity_idx} on line {}: name {:?}, target {:?}, fog {:?}, adjacent {:?}",
			config.zone_classname, entity.line, properties.name, properties.target, properties.fog, properties.adjacent_zones
		);
		if !properties.extra.is_empty() {
			debug!("Zone {:?} has properties not written to the zone file: {:?}", properties.name, properties.extra.keys().collect_vec());
		}

		let empty_zone = |reason| ExtractionError::EmptyZone { entity: entity_idx, name: properties.name.clone(), reason };

		if entity.brushes.is_empty() {
			return Err(empty_zone(EmptyZoneReason::NoBrushes));
		}

		let mut brushes = Vec::with_capacity(entity.brushes.len());
		for (brush_idx, brush) in entity.brushes.iter().enumerate() {
			let bounds = brush.plane_point_bounds().ok_or_else(|| empty_zone(EmptyZoneReason::NoFaces { brush: brush_idx }))?;

			if let Some(axis) = bounds.degenerate_axis() {
				return Err(empty_zone(EmptyZoneReason::Degenerate { brush: brush_idx, axis: AXIS_NAMES[axis] }));
			}

			debug!(" - Brush {brush_idx}: mins={} maxs={}", bounds.mins, bounds.maxs);
			brushes.push(bounds);
		}

		zones.push(CandidateZone { entity: entity_idx, properties, brushes });
	}

	Ok(zones)
}

const AXIS_NAMES: [char; 3] = ['x', 'y', 'z'];

impl ZoneProperties {
	/// Reads the zone's properties, `zone_name` and `zone_target` are required.
	pub fn from_entity(entity_idx: usize, entity: &MapEntity) -> Result<Self, ExtractionError> {
		let mut properties = Self::default();
		let (mut name, mut target) = (None, None);

		for (key, value) in &entity.properties {
			match key.as_str() {
				keys::NAME => name = Some(value.clone()),
				keys::TARGET => target = Some(value.clone()),
				keys::FOG => properties.fog = value.clone(),
				keys::ADJACENT_ZONES => properties.adjacent_zones = parse_adjacent_zones(value),
				_ => {
					properties.extra.insert(key.clone(), value.clone());
				}
			}
		}

		let missing = |property| ExtractionError::MissingProperty { entity: entity_idx, property };
		properties.name = name.ok_or_else(|| missing(keys::NAME))?;
		properties.target = target.ok_or_else(|| missing(keys::TARGET))?;

		Ok(properties)
	}
}

/// Splits a comma separated list of zone names, trimming each and dropping empty ones.
pub fn parse_adjacent_zones(value: &str) -> Vec<String> {
	value.split(',').map(str::trim).filter(|name| !name.is_empty()).map(String::from).collect()
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
	#[error("spawn zone {name:?} (entity {entity}) {reason}")]
	EmptyZone { entity: usize, name: String, reason: EmptyZoneReason },
	#[error("spawn zone entity {entity} is missing required property `{property}`")]
	MissingProperty { entity: usize, property: &'static str },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyZoneReason {
	#[error("has no brushes")]
	NoBrushes,
	#[error("has a brush ({brush}) with no faces")]
	NoFaces { brush: usize },
	#[error("has a brush ({brush}) with no extent on the {axis} axis")]
	Degenerate { brush: usize, axis: char },
}
