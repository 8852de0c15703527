use std::fs;
use std::path::{Path, PathBuf};

use nzp_spawn_zones::qmap::ParseErrorKind;
use nzp_spawn_zones::zone::{EmptyZoneReason, ExtractionError, ResolutionError};
use nzp_spawn_zones::{ConversionError, NszConfig, convert, convert_file};

fn corpus_dir() -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("tests")
}

fn reference_maps() -> Vec<PathBuf> {
	let mut maps: Vec<PathBuf> = fs::read_dir(corpus_dir().join("maps"))
		.unwrap()
		.map(|entry| entry.unwrap().path())
		.filter(|path| path.extension().is_some_and(|ext| ext == "map"))
		.collect();
	maps.sort();
	maps
}

#[test]
fn matches_reference_corpus() {
	let maps = reference_maps();
	assert!(!maps.is_empty());

	for map in maps {
		let expected_path = corpus_dir().join("nszs").join(map.file_stem().unwrap()).with_extension("nsz");
		let expected = fs::read(&expected_path).unwrap_or_else(|err| panic!("reading {}: {err}", expected_path.display()));

		let source = fs::read_to_string(&map).unwrap();
		let output = convert(&source, &NszConfig::default()).unwrap_or_else(|err| panic!("converting {}: {err}", map.display()));

		assert!(
			output == expected,
			"{} does not match its reference\n--- got ---\n{}\n--- expected ---\n{}",
			map.display(),
			String::from_utf8_lossy(&output),
			String::from_utf8_lossy(&expected)
		);
	}
}

#[test]
fn conversion_is_deterministic() {
	for map in reference_maps() {
		let source = fs::read_to_string(&map).unwrap();
		let config = NszConfig::default();
		assert_eq!(convert(&source, &config).unwrap(), convert(&source, &config).unwrap());
	}
}

/// A box brush written the way TrenchBroom writes them.
fn box_brush(mins: [i32; 3], maxs: [i32; 3]) -> String {
	let [x0, y0, z0] = mins;
	let [x1, y1, z1] = maxs;
	format!(
		"{{\n\
		( {x0} {y0} {z0} ) ( {x0} {} {z0} ) ( {x0} {y0} {} ) __TB_empty 0 0 0 1 1\n\
		( {x0} {y0} {z0} ) ( {x0} {y0} {} ) ( {} {y0} {z0} ) __TB_empty 0 0 0 1 1\n\
		( {x0} {y0} {z0} ) ( {} {y0} {z0} ) ( {x0} {} {z0} ) __TB_empty 0 0 0 1 1\n\
		( {x1} {y1} {z1} ) ( {x1} {} {z1} ) ( {} {y1} {z1} ) __TB_empty 0 0 0 1 1\n\
		( {x1} {y1} {z1} ) ( {} {y1} {z1} ) ( {x1} {y1} {} ) __TB_empty 0 0 0 1 1\n\
		( {x1} {y1} {z1} ) ( {x1} {y1} {} ) ( {x1} {} {z1} ) __TB_empty 0 0 0 1 1\n\
		}}\n",
		y0 + 1,
		z0 + 1,
		z0 + 1,
		x0 + 1,
		x0 + 1,
		y0 + 1,
		y1 + 1,
		x1 + 1,
		x1 + 1,
		z1 + 1,
		z1 + 1,
		y1 + 1,
	)
}

fn entity(properties: &[(&str, &str)], brushes: &[String]) -> String {
	let mut s = String::from("{\n");
	for (key, value) in properties {
		s.push_str(&format!("\"{key}\" \"{value}\"\n"));
	}
	for brush in brushes {
		s.push_str(brush);
	}
	s.push_str("}\n");
	s
}

fn zone(name: &str, adjacent: &str, offset: i32) -> String {
	entity(
		&[("classname", "spawn_zone"), ("zone_name", name), ("zone_target", format!("{name}_spawns").as_str()), ("adjacent_zones", adjacent)],
		&[box_brush([offset, 0, 0], [offset + 64, 64, 128])],
	)
}

fn worldspawn() -> String {
	entity(&[("classname", "worldspawn")], &[box_brush([-512, -512, -16], [512, 512, 0])])
}

fn light() -> String {
	entity(&[("classname", "light"), ("origin", "0 0 64")], &[])
}

#[test]
fn non_zone_entities_do_not_affect_output() {
	let config = NszConfig::default();
	let [a, b] = [zone("a", "b", 0), zone("b", "a", 64)];

	let reference = convert(&[worldspawn(), a.clone(), light(), b.clone()].concat(), &config).unwrap();

	for order in [[worldspawn(), light(), a.clone(), b.clone()], [a.clone(), b.clone(), light(), worldspawn()], [light(), a.clone(), worldspawn(), b.clone()]] {
		assert_eq!(convert(&order.concat(), &config).unwrap(), reference);
	}
}

#[test]
fn zone_order_changes_output() {
	let config = NszConfig::default();
	let [a, b] = [zone("a", "", 0), zone("b", "", 64)];

	let forward = String::from_utf8(convert(&[worldspawn(), a.clone(), b.clone()].concat(), &config).unwrap()).unwrap();
	let backward = String::from_utf8(convert(&[worldspawn(), b, a].concat(), &config).unwrap()).unwrap();

	assert!(forward.starts_with("zone_file_version: 1.0.0\nnumber_of_zones: 2\na\n1\na_spawns\n\n0\n1\n0.0 0.0 0.0\n65.0 65.0 129.0\nb\n2\n"));
	assert!(backward.starts_with("zone_file_version: 1.0.0\nnumber_of_zones: 2\nb\n1\nb_spawns\n\n0\n1\n64.0 0.0 0.0\n129.0 65.0 129.0\na\n2\n"));
}

#[test]
fn degenerate_zones_are_rejected() {
	let config = NszConfig::default();

	let no_brushes = entity(&[("classname", "spawn_zone"), ("zone_name", "empty"), ("zone_target", "t")], &[]);
	let err = convert(&[worldspawn(), no_brushes].concat(), &config).unwrap_err();
	assert!(matches!(err, ConversionError::Extraction(ExtractionError::EmptyZone { entity: 1, reason: EmptyZoneReason::NoBrushes, .. })));

	// Every plane point on z = 32.
	let flat = "{\n( 0 0 32 ) ( 0 64 32 ) ( 64 0 32 ) __TB_empty 0 0 0 1 1\n( 64 64 32 ) ( 64 0 32 ) ( 0 64 32 ) __TB_empty 0 0 0 1 1\n}\n".to_string();
	let flat_zone = entity(&[("classname", "spawn_zone"), ("zone_name", "flat"), ("zone_target", "t")], &[flat]);
	let err = convert(&flat_zone, &config).unwrap_err();
	assert!(matches!(
		err,
		ConversionError::Extraction(ExtractionError::EmptyZone { entity: 0, reason: EmptyZoneReason::Degenerate { brush: 0, axis: 'z' }, .. })
	));
}

#[test]
fn negative_zero_coordinates_are_written_as_zero() {
	let brush = "{\n\
		( -0 -0 -0 ) ( -0 64 -0 ) ( -0 -0 64 ) __TB_empty 0 0 0 1 1\n\
		( 64 64 64 ) ( 64 -0 64 ) ( 64 64 -0 ) __TB_empty 0 0 0 1 1\n\
		}\n"
	.to_string();
	let zone = entity(&[("classname", "spawn_zone"), ("zone_name", "origin"), ("zone_target", "t")], &[brush]);

	let output = String::from_utf8(convert(&[worldspawn(), zone].concat(), &NszConfig::default()).unwrap()).unwrap();
	assert!(output.ends_with("\n1\n0.0 0.0 0.0\n64.0 64.0 64.0\n"), "{output}");
	assert!(!output.contains("-0.0"));
}

#[test]
fn duplicate_zone_names_are_rejected() {
	let config = NszConfig::default();
	let (first, second) = (zone("dupe", "", 0), zone("dupe", "", 64));

	for source in [[worldspawn(), first.clone(), light(), second.clone()].concat(), [worldspawn(), second, light(), first].concat()] {
		match convert(&source, &config).unwrap_err() {
			ConversionError::Resolution(ResolutionError::DuplicateZoneId { name, first, second }) => {
				assert_eq!((name.as_str(), first, second), ("dupe", 1, 3));
			}
			err => panic!("unexpected error {err}"),
		}
	}
}

#[test]
fn failed_conversion_writes_nothing() {
	let dir = std::env::temp_dir().join(format!("nsz_reference_test_{}", std::process::id()));
	fs::create_dir_all(&dir).unwrap();

	let input = dir.join("broken.map");
	let output = dir.join("broken.nsz");
	fs::write(&input, format!("{}{{\n\"classname\" \"spawn_zone\"\n", worldspawn())).unwrap();

	let err = convert_file(&input, &output, &NszConfig::default()).unwrap_err();
	assert!(matches!(err, ConversionError::Parse(ref parse) if matches!(parse.kind, ParseErrorKind::UnterminatedBlock { .. })));
	assert!(!output.exists());

	let err = convert_file(&dir.join("missing.map"), &output, &NszConfig::default()).unwrap_err();
	assert!(matches!(err, ConversionError::Io(_)));
	assert!(!output.exists());

	fs::write(&input, [worldspawn(), zone("a", "", 0)].concat()).unwrap();
	assert_eq!(convert_file(&input, &output, &NszConfig::default()).unwrap(), 1);
	assert!(fs::read_to_string(&output).unwrap().starts_with("zone_file_version: 1.0.0\nnumber_of_zones: 1\n"));

	fs::remove_dir_all(&dir).unwrap();
}
