//! Writing `.nsz` (NZ:P spawn zone) files.
//!
//! The format is line based text:
//! ```text
//! zone_file_version: 1.0.0
//! number_of_zones: <count>
//! ```
//! followed by, for every zone: name, id, target, fog, the number of adjacent zones and one id per line,
//! then the number of brushes and two lines per brush, `mins` then `maxs`, each as three space separated floats.

use crate::util::ZoneFileFloat;
use crate::*;

pub const FORMAT_VERSION: &str = "1.0.0";

/// Serializes resolved zones into the bytes of a `.nsz` file.
pub fn serialize(zones: &[Zone]) -> Vec<u8> {
	use fmt::Write;
	let mut s = String::new();
	macro_rules! push_line {($($arg:tt)*) => {
		s.write_fmt(format_args!($($arg)*)).ok();
		s.push('\n');
	};}

	push_line!("zone_file_version: {FORMAT_VERSION}");
	push_line!("number_of_zones: {}", zones.len());

	for zone in zones {
		push_line!("{}", zone.name);
		push_line!("{}", zone.id);
		push_line!("{}", zone.target);
		push_line!("{}", zone.fog);

		push_line!("{}", zone.adjacent_zones.len());
		for adjacent in &zone.adjacent_zones {
			push_line!("{adjacent}");
		}

		push_line!("{}", zone.brushes.len());
		for brush in &zone.brushes {
			for point in [brush.mins, brush.maxs] {
				push_line!("{}", point.to_array().map(f64::zone_file_string).join(" "));
			}
		}
	}

	s.into_bytes()
}

/// Writes `bytes` to `path` through a temporary file next to it, so `path` either keeps its old contents or gets all of the new ones.
pub fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
	let mut tmp_name = path.file_name().map(|name| name.to_os_string()).unwrap_or_else(|| "zones.nsz".into());
	tmp_name.push(".tmp");
	let tmp_path = path.with_file_name(tmp_name);

	let result = fs::write(&tmp_path, bytes).and_then(|()| fs::rename(&tmp_path, path));
	if result.is_err() {
		// Whatever went wrong is the error worth reporting, not the cleanup.
		let _ = fs::remove_file(&tmp_path);
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;

	fn text(zones: &[Zone]) -> String {
		String::from_utf8(serialize(zones)).unwrap()
	}

	#[test]
	fn no_zones() {
		assert_eq!(text(&[]), "zone_file_version: 1.0.0\nnumber_of_zones: 0\n");
	}

	#[test]
	fn single_box_zone() {
		let zone = Zone {
			name: "spawn_room".into(),
			id: 1,
			target: "spawn_room_zombies".into(),
			fog: "0.1 0.1 0.1 250 1000".into(),
			adjacent_zones: vec![],
			brushes: vec![ZoneBrush { mins: dvec3(-64., -64., 0.), maxs: dvec3(64., 64., 256.) }],
			entity: 1,
		};

		assert_eq!(
			text(&[zone]),
			"zone_file_version: 1.0.0\n\
			number_of_zones: 1\n\
			spawn_room\n\
			1\n\
			spawn_room_zombies\n\
			0.1 0.1 0.1 250 1000\n\
			0\n\
			1\n\
			-64.0 -64.0 0.0\n\
			64.0 64.0 256.0\n"
		);
	}

	#[test]
	fn adjacency_and_multiple_brushes() {
		let zones = [
			Zone {
				name: "a".into(),
				id: 2,
				target: "a_t".into(),
				fog: String::new(),
				adjacent_zones: vec![1, 3],
				brushes: vec![
					ZoneBrush { mins: dvec3(0.5, 0., 1e-5), maxs: dvec3(16., 16., 16.) },
					ZoneBrush { mins: dvec3(-8., -8., -8.), maxs: dvec3(8., 8., 1e16) },
				],
				entity: 0,
			},
			Zone { name: "b".into(), id: 1, target: "b_t".into(), fog: String::new(), adjacent_zones: vec![], brushes: vec![], entity: 3 },
		];

		assert_eq!(
			text(&zones),
			"zone_file_version: 1.0.0\nnumber_of_zones: 2\n\
			a\n2\na_t\n\n2\n1\n3\n2\n0.5 0.0 1e-05\n16.0 16.0 16.0\n-8.0 -8.0 -8.0\n8.0 8.0 1e+16\n\
			b\n1\nb_t\n\n0\n0\n"
		);
	}

	#[test]
	fn atomic_write() {
		let dir = std::env::temp_dir().join(format!("nsz_write_test_{}", std::process::id()));
		fs::create_dir_all(&dir).unwrap();
		let path = dir.join("out.nsz");

		write_file(&path, b"first").unwrap();
		write_file(&path, b"second").unwrap();

		assert_eq!(fs::read(&path).unwrap(), b"second");
		assert!(!dir.join("out.nsz.tmp").exists());

		assert!(write_file(&dir.join("missing").join("out.nsz"), b"x").is_err());
		fs::remove_dir_all(&dir).unwrap();
	}
}
