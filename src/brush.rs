//! Contains Brush definitions and bounds math.

use crate::*;

/// Brush face UV coordinates. Parsed so the face can be read in full, nothing in the zone pipeline uses it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrushUV {
	pub offset: DVec2,
	pub rotation: f64,
	pub scale: DVec2,

	/// Describes the X and Y texture-space axes, if the map is using the `Valve220` format.
	pub axes: Option<[DVec3; 2]>,
}

/// A surface of a brush, defined by three points on its plane, the texture of the surface, and the UV coordinates that the texture follows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrushSurface {
	/// The three points defining the plane, in the order they were written.
	pub points: [DVec3; 3],
	pub texture: String,
	pub uv: BrushUV,
	/// Trailing values some formats put after the alignment (Quake 2 content flags, surface flags and value), kept verbatim.
	pub extra: Vec<String>,
}

/// A convex hull with texture data attached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Brush {
	pub surfaces: Vec<BrushSurface>,
}

impl Brush {
	/// Iterates over every plane-definition point of every surface, in source order.
	pub fn plane_points(&self) -> impl Iterator<Item = DVec3> + '_ {
		self.surfaces.iter().flat_map(|surface| surface.points)
	}

	/// Calculates the axis-aligned bounds of the points defining the brush's planes.
	///
	/// This isn't the tightest box around the hull, plane points can sit anywhere on their plane,
	/// but it's what spawn zone files have always been built from, so it must stay this way.
	///
	/// Coordinates of `-0` come out as `0.0`.
	///
	/// Returns `None` if the brush has no surfaces.
	pub fn plane_point_bounds(&self) -> Option<BrushBounds> {
		// Adding zero turns `-0.0` into `0.0` and leaves every other value alone.
		let mut points = self.plane_points().map(|point| point + DVec3::ZERO);
		let first = points.next()?;

		let mut bounds = BrushBounds { mins: first, maxs: first };
		for point in points {
			bounds.extend(point);
		}

		Some(bounds)
	}
}

/// Axis-aligned bounding box of a [`Brush`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BrushBounds {
	pub mins: DVec3,
	pub maxs: DVec3,
}

impl BrushBounds {
	/// Grows the box to contain `point`.
	pub fn extend(&mut self, point: DVec3) {
		self.mins = self.mins.min(point);
		self.maxs = self.maxs.max(point);
	}

	pub fn size(&self) -> DVec3 {
		self.maxs - self.mins
	}

	/// Returns the first axis (0 = x, 1 = y, 2 = z) the box has no extent on, if any.
	pub fn degenerate_axis(&self) -> Option<usize> {
		let size = self.size();
		(0..3).find(|&axis| size[axis] <= 0.)
	}
}

#[cfg(test)]
pub(crate) fn box_brush(mins: DVec3, maxs: DVec3) -> Brush {
	// Same face layout TrenchBroom writes for a new box brush.
	let face = |points: [DVec3; 3]| BrushSurface { points, texture: "__TB_empty".into(), uv: BrushUV { scale: DVec2::ONE, ..Default::default() }, extra: Vec::new() };

	Brush {
		surfaces: vec![
			face([dvec3(mins.x, mins.y, mins.z), dvec3(mins.x, mins.y + 1., mins.z), dvec3(mins.x, mins.y, mins.z + 1.)]),
			face([dvec3(mins.x, mins.y, mins.z), dvec3(mins.x, mins.y, mins.z + 1.), dvec3(mins.x + 1., mins.y, mins.z)]),
			face([dvec3(mins.x, mins.y, mins.z), dvec3(mins.x + 1., mins.y, mins.z), dvec3(mins.x, mins.y + 1., mins.z)]),
			face([dvec3(maxs.x, maxs.y, maxs.z), dvec3(maxs.x, maxs.y + 1., maxs.z), dvec3(maxs.x + 1., maxs.y, maxs.z)]),
			face([dvec3(maxs.x, maxs.y, maxs.z), dvec3(maxs.x + 1., maxs.y, maxs.z), dvec3(maxs.x, maxs.y, maxs.z + 1.)]),
			face([dvec3(maxs.x, maxs.y, maxs.z), dvec3(maxs.x, maxs.y, maxs.z + 1.), dvec3(maxs.x, maxs.y + 1., maxs.z)]),
		],
	}
}

#[test]
fn bounds_include_all_plane_points() {
	let brush = box_brush(dvec3(-64., -64., 0.), dvec3(64., 64., 256.));
	let bounds = brush.plane_point_bounds().unwrap();

	// The +1 offsets TrenchBroom uses for the second and third points leak into the bounds.
	assert_eq!(bounds.mins, dvec3(-64., -64., 0.));
	assert_eq!(bounds.maxs, dvec3(65., 65., 257.));
	assert_eq!(bounds.degenerate_axis(), None);
}

#[test]
fn empty_brush_has_no_bounds() {
	assert_eq!(Brush::default().plane_point_bounds(), None);
}

#[test]
fn negative_zero_bounds_are_positive() {
	let brush = box_brush(dvec3(-0., -0., -0.), dvec3(64., 64., 64.));
	let bounds = brush.plane_point_bounds().unwrap();

	assert_eq!(bounds.mins, DVec3::ZERO);
	assert!(bounds.mins.to_array().iter().all(|value| value.is_sign_positive()));
	assert_eq!(bounds.maxs, DVec3::splat(65.));
}

#[test]
fn degenerate_axes() {
	let flat = BrushBounds { mins: dvec3(0., 0., 16.), maxs: dvec3(32., 32., 16.) };
	assert_eq!(flat.degenerate_axis(), Some(2));

	let point = BrushBounds::default();
	assert_eq!(point.degenerate_axis(), Some(0));
}
