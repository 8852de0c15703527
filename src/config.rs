use crate::*;

/// The main configuration structure for converting maps into spawn zone files.
///
/// Every stage of the pipeline reads from this, it can be built in code with the chained setters,
/// or loaded from a TOML file with [`NszConfig::load`].
#[derive(Debug, Clone, PartialEq, SmartDefault, DefaultBuilder, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NszConfig {
	/// The classname marking an entity as a spawn zone. (Default: "spawn_zone")
	#[default("spawn_zone".into())]
	#[builder(into)]
	pub zone_classname: String,

	/// Whether an entity may define the same property more than once, in which case the last value wins.
	/// If false, this is a [`ParseErrorKind::DuplicateKey`](crate::qmap::ParseErrorKind::DuplicateKey) error. (Default: false)
	pub allow_duplicate_keys: bool,

	/// What to do when a zone lists an adjacent zone that no `spawn_zone` entity defines. (Default: [`AdjacencyPolicy::Warn`])
	pub unknown_adjacent_zones: AdjacencyPolicy,
}

impl NszConfig {
	/// Reads a config from a TOML file. Fields not present in the file keep their default values.
	pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
		let path = path.as_ref();
		let text = fs::read_to_string(path)?;
		Self::from_toml(&text).map_err(|err| anyhow::anyhow!("parsing config {}: {err}", path.display()))
	}

	pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(text)
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString, strum::EnumIs)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AdjacencyPolicy {
	/// Log a warning, the unknown name still receives an id.
	#[default]
	Warn,
	/// Fail resolution with [`ResolutionError::UnknownAdjacentZone`](crate::zone::ResolutionError::UnknownAdjacentZone).
	Reject,
}
