use super::*;

/// Assigns identifiers to the extracted zones and resolves their adjacency lists.
///
/// Zones keep the order they had in the map. Identifiers count up from 1 in order of first mention,
/// where a zone's adjacency list is read before its own name, so a zone first named as another's neighbour
/// has already been given its identifier by the time its own entity is reached.
pub fn resolve(candidates: Vec<CandidateZone>, config: &NszConfig) -> Result<Vec<Zone>, ResolutionError> {
	check_duplicate_names(&candidates)?;

	let defined: HashSet<&str> = candidates.iter().map(|zone| zone.properties.name.as_str()).collect();
	for zone in &candidates {
		for adjacent in &zone.properties.adjacent_zones {
			if adjacent == &zone.properties.name {
				warn!("Zone {:?} lists itself as adjacent", zone.properties.name);
			} else if !defined.contains(adjacent.as_str()) {
				match config.unknown_adjacent_zones {
					AdjacencyPolicy::Warn => {
						warn!("Zone {:?} lists {adjacent:?} as adjacent, but no zone has that name", zone.properties.name)
					}
					AdjacencyPolicy::Reject => {
						return Err(ResolutionError::UnknownAdjacentZone { zone: zone.properties.name.clone(), adjacent: adjacent.clone() });
					}
				}
			}
		}
	}

	let mut ids = ZoneIds::default();
	let mut zones = Vec::with_capacity(candidates.len());

	for CandidateZone { entity, properties, brushes } in candidates {
		let adjacent_zones = properties.adjacent_zones.iter().map(|name| ids.get(name)).collect::<Result<_, _>>()?;
		let id = ids.get(&properties.name)?;

		zones.push(Zone { name: properties.name, id, target: properties.target, fog: properties.fog, adjacent_zones, brushes, entity });
	}

	Ok(zones)
}

/// Fails if more than one zone uses the same name.
///
/// The error names the two lowest entity indices sharing a name, and if several names are shared,
/// the one whose pair comes first, so the result doesn't depend on the order zones are visited in.
fn check_duplicate_names(candidates: &[CandidateZone]) -> Result<(), ResolutionError> {
	let mut entities: HashMap<&str, Vec<usize>> = HashMap::new();
	for zone in candidates {
		entities.entry(&zone.properties.name).or_default().push(zone.entity);
	}

	let duplicate = entities
		.into_iter()
		.filter(|(_, entities)| entities.len() > 1)
		.map(|(name, mut entities)| {
			entities.sort_unstable();
			(entities[0], entities[1], name)
		})
		.min();

	match duplicate {
		Some((first, second, name)) => Err(ResolutionError::DuplicateZoneId { name: name.to_string(), first, second }),
		None => Ok(()),
	}
}

/// Hands out zone identifiers in order of first request.
#[derive(Debug, Default)]
struct ZoneIds {
	ids: HashMap<String, u32>,
}

impl ZoneIds {
	fn get(&mut self, name: &str) -> Result<u32, ResolutionError> {
		if let Some(&id) = self.ids.get(name) {
			return Ok(id);
		}
		let id = u32::try_from(self.ids.len() + 1).map_err(|_| ResolutionError::TooManyZones { name: name.to_string() })?;
		self.ids.insert(name.to_string(), id);
		Ok(id)
	}
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
	#[error("zone name {name:?} is used by both entity {first} and entity {second}")]
	DuplicateZoneId { name: String, first: usize, second: usize },
	#[error("zone {zone:?} lists {adjacent:?} as adjacent, but no zone has that name")]
	UnknownAdjacentZone { zone: String, adjacent: String },
	#[error("ran out of zone identifiers at {name:?}")]
	TooManyZones { name: String },
}
