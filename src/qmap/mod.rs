use crate::brush::Brush;
use crate::*;

pub mod lexer;
pub mod parser;

pub use parser::parse;

/// Quake map parsed from a .map file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
	/// Entities in the order they appear in the source.
	pub entities: Vec<MapEntity>,
	/// Every face format encountered, in the order first seen. Usually only one.
	pub formats: Vec<MapFormat>,
}

impl MapDocument {
	/// The first entity with the `worldspawn` classname. Editors always write it first.
	pub fn worldspawn(&self) -> Option<&MapEntity> {
		self.entities.iter().find(|ent| ent.classname() == Some("worldspawn"))
	}

	pub fn brush_count(&self) -> usize {
		self.entities.iter().map(|ent| ent.brushes.len()).sum()
	}
}

/// A single entity from a quake map, containing the entity's property map, and optionally, brushes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapEntity {
	/// The properties defined in this entity instance, in source order. Properties nothing reads are kept as well.
	pub properties: IndexMap<String, String>,
	pub brushes: Vec<Brush>,
	/// The line of the entity's opening brace.
	pub line: usize,
}

impl MapEntity {
	pub fn classname(&self) -> Option<&str> {
		self.property("classname")
	}

	pub fn property(&self, key: &str) -> Option<&str> {
		self.properties.get(key).map(String::as_str)
	}
}

/// How brush faces lay out their texture alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumIs)]
pub enum MapFormat {
	/// `offset_x offset_y rotation scale_x scale_y`
	Standard,
	/// Valve 220: `[ ux uy uz offset_x ] [ vx vy vz offset_y ] rotation scale_x scale_y`
	Valve,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
	/// 1-based line of the offending token.
	pub line: usize,
	pub kind: ParseErrorKind,
}

impl ParseError {
	pub fn new(line: usize, kind: ParseErrorKind) -> Self {
		Self { line, kind }
	}
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
	#[error("block opened on line {opened_at} is never closed")]
	UnterminatedBlock { opened_at: usize },
	#[error("quoted string is not closed before the end of the line")]
	UnterminatedString,
	#[error("`{token}` is not a valid number")]
	MalformedNumber { token: String },
	#[error("property `{key}` is defined more than once")]
	DuplicateKey { key: String },
	#[error("expected {expected}, found {found}")]
	UnexpectedToken { expected: &'static str, found: String },
}
