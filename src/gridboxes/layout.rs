//! A [GridLayout] places a [crate::prelude::Grid] over a rectangular floor
//! lying on the `x-z` plane so that world positions can be translated into
//! grid box indices and back again.
//!
//! The floor is divided evenly, each box covering `floor_length / columns`
//! by `floor_depth / rows` units. Box `0` sits in the top-left corner of the
//! floor where top-left means the `(-x, +z)` direction from the floor centre.
//! Columns advance towards `+x` and rows advance towards `-z`:
//!
//! ```text
//!              +z
//!     ___________________
//!    |0__|1__|2__|3__|4__|
//! -x |5__|6__|7__|8__|9__| +x
//!    |10_|11_|12_|13_|14_|
//!              -z
//! ```
//!

use crate::prelude::*;
use bevy::prelude::*;

/// World placement of a grid
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Clone, Copy, Debug, PartialEq, Reflect)]
pub struct GridLayout {
	/// Centre of the floor the grid is mapped onto, the `y` coordinate is
	/// used as the height of every box centre
	floor_centre: Vec3,
	/// `(x, z)` extents of the floor
	floor_size: Vec2,
	/// Number of rows of boxes along `z`
	rows: usize,
	/// Number of boxes in each row along `x`
	columns: usize,
}

impl GridLayout {
	/// Create a new instance of [GridLayout]
	pub fn new(
		floor_centre: Vec3,
		floor_size: Vec2,
		rows: usize,
		columns: usize,
	) -> Result<Self, GridError> {
		if rows == 0 || columns == 0 || rows.checked_mul(columns).is_none() {
			return Err(GridError::InvalidDimensions { rows, columns });
		}
		if !(floor_size.x > 0.0 && floor_size.y > 0.0)
			|| !floor_size.is_finite()
			|| !floor_centre.is_finite()
		{
			return Err(GridError::InvalidFloor {
				length: floor_size.x,
				depth: floor_size.y,
			});
		}
		Ok(GridLayout {
			floor_centre,
			floor_size,
			rows,
			columns,
		})
	}
	/// Centre of the floor
	pub fn get_floor_centre(&self) -> Vec3 {
		self.floor_centre
	}
	/// `(x, z)` extents of the floor
	pub fn get_floor_size(&self) -> Vec2 {
		self.floor_size
	}
	/// Number of rows of boxes
	pub fn get_rows(&self) -> usize {
		self.rows
	}
	/// Number of boxes in each row
	pub fn get_columns(&self) -> usize {
		self.columns
	}
	/// `(x, z)` size of a single box
	pub fn get_box_size(&self) -> Vec2 {
		Vec2::new(
			self.floor_size.x / self.columns as f32,
			self.floor_size.y / self.rows as f32,
		)
	}
	/// World position of the top-left corner of the floor
	fn get_top_left_corner(&self) -> Vec3 {
		Vec3::new(
			self.floor_centre.x - self.floor_size.x / 2.0,
			self.floor_centre.y,
			self.floor_centre.z + self.floor_size.y / 2.0,
		)
	}
	/// Centre of a box in world space, [None] if the index is outside of the
	/// grid
	pub fn get_xyz_from_index(&self, index: usize) -> Option<Vec3> {
		if index >= self.rows * self.columns {
			return None;
		}
		let (row, column) = (index / self.columns, index % self.columns);
		let size = self.get_box_size();
		let corner = self.get_top_left_corner();
		// NB: add half of the box size to obtain the centre position
		Some(Vec3::new(
			corner.x + column as f32 * size.x + size.x / 2.0,
			corner.y,
			corner.z - (row as f32 * size.y + size.y / 2.0),
		))
	}
	/// From a world position find the box that contains it. The `y`
	/// coordinate is ignored. Positions outside of the floor return [None]
	pub fn get_index_from_xyz(&self, position: Vec3) -> Option<usize> {
		let corner = self.get_top_left_corner();
		// translate into a coordinate system with its origin in the top left
		let x_origin = position.x - corner.x;
		let z_origin = corner.z - position.z;
		if x_origin < 0.0
			|| x_origin > self.floor_size.x
			|| z_origin < 0.0
			|| z_origin > self.floor_size.y
			|| !x_origin.is_finite()
			|| !z_origin.is_finite()
		{
			error!("Position is out of bounds of the floor, x {}, z {}, cannot calculate a grid box. Is the actor outside of the floor or trying to request a route outside of it?", position.x, position.z);
			return None;
		}
		let size = self.get_box_size();
		let mut column = (x_origin / size.x).floor() as usize;
		let mut row = (z_origin / size.y).floor() as usize;
		// safety for x-z being at the exact limits of the floor
		if column >= self.columns {
			column = self.columns - 1;
		}
		if row >= self.rows {
			row = self.rows - 1;
		}
		Some(row * self.columns + column)
	}
	/// The four ground corners of a box ordered top-left, top-right,
	/// bottom-right, bottom-left
	pub fn get_box_corners(&self, index: usize) -> Option<[Vec3; 4]> {
		let centre = self.get_xyz_from_index(index)?;
		let half = self.get_box_size() / 2.0;
		Some([
			centre + Vec3::new(-half.x, 0.0, half.y),
			centre + Vec3::new(half.x, 0.0, half.y),
			centre + Vec3::new(half.x, 0.0, -half.y),
			centre + Vec3::new(-half.x, 0.0, -half.y),
		])
	}
}
