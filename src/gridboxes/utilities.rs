//! Useful structures and tools used across the grid
//!

use bevy::prelude::*;

/// Number of orthogonal neighbours a grid box can have
pub const NEIGHBOUR_COUNT: usize = 4;

/// Convenience way of accessing the 4 sides of a [crate::prelude::GridBox].
/// The top of the grid (row `0`) is [Ordinal::North] and the first column is
/// along the [Ordinal::West] edge
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Reflect)]
pub enum Ordinal {
	North,
	East,
	South,
	West,
}

impl Ordinal {
	/// Every [Ordinal] in the order neighbours are stored within a grid box
	pub const ALL: [Ordinal; NEIGHBOUR_COUNT] =
		[Ordinal::North, Ordinal::East, Ordinal::South, Ordinal::West];
	/// Position of the direction within a neighbour array
	pub fn get_slot(&self) -> usize {
		match self {
			Ordinal::North => 0,
			Ordinal::East => 1,
			Ordinal::South => 2,
			Ordinal::West => 3,
		}
	}
	/// Returns the opposite [Ordinal] of the current
	pub fn inverse(&self) -> Ordinal {
		match self {
			Ordinal::North => Ordinal::South,
			Ordinal::East => Ordinal::West,
			Ordinal::South => Ordinal::North,
			Ordinal::West => Ordinal::East,
		}
	}
	/// For two grid boxes next to each other find the [Ordinal] pointing from
	/// the `source` to the `target`. Returns [None] if they are not
	/// orthogonally adjacent
	pub fn cell_to_cell_direction(target: usize, source: usize, columns: usize) -> Option<Self> {
		let (target_row, target_column) = (target / columns, target % columns);
		let (source_row, source_column) = (source / columns, source % columns);
		let direction = (
			target_column as i64 - source_column as i64,
			target_row as i64 - source_row as i64,
		);
		match direction {
			(0, -1) => Some(Ordinal::North),
			(1, 0) => Some(Ordinal::East),
			(0, 1) => Some(Ordinal::South),
			(-1, 0) => Some(Ordinal::West),
			_ => None,
		}
	}
}

/// Number of orthogonal steps between two grid boxes, `|Δrow| + |Δcolumn|`
pub fn manhattan_distance(a: usize, b: usize, columns: usize) -> u32 {
	let row_delta = (a / columns).abs_diff(b / columns);
	let column_delta = (a % columns).abs_diff(b % columns);
	(row_delta + column_delta) as u32
}
