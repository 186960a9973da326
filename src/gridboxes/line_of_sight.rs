//! Trajectory obstruction check between two grid boxes.
//!
//! Rather than rasterising the true line between two boxes every box inside
//! the inclusive bounding rectangle of the pair is inspected. This
//! over-approximates the boxes a straight trajectory would cross, diagonal
//! trajectories can be reported as obstructed when the line itself would
//! slip past the obstruction:
//!
//! ```text
//!  ____________
//! |S_|__|__|__|
//! |__|__|__|x_|
//! |__|__|__|T_|
//! ```
//!
//! Here `S -> T` is obstructed by `x` even though a line from the centre of
//! `S` to the centre of `T` would not touch it.
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Does any blocked box lie within the inclusive rectangle spanned by `from`
/// and `to`.
///
/// Identical indices are never obstructed. An index which does not exist in
/// the grid (such as an actor that has not yet been placed on it) cannot be
/// reasoned about and is reported as unobstructed, callers should treat that
/// case as degenerate rather than as a confirmed clear line
pub fn is_obstructed(grid: &Grid, from: usize, to: usize) -> bool {
	if from == to {
		return false;
	}
	if !grid.contains(from) || !grid.contains(to) {
		warn!(
			"Trajectory check between {} and {} references a box outside of the grid, treating as unobstructed",
			from, to
		);
		return false;
	}
	let (from_row, from_column) = grid.get_row_column(from);
	let (to_row, to_column) = grid.get_row_column(to);
	let columns = grid.get_columns();
	for row in from_row.min(to_row)..=from_row.max(to_row) {
		for column in from_column.min(to_column)..=from_column.max(to_column) {
			if grid.is_blocked(row * columns + column) {
				return true;
			}
		}
	}
	false
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn same_box_never_obstructed() {
		let mut grid = Grid::new(3, 3).unwrap();
		grid.set_obstruction(4, true).unwrap();
		for i in 0..9 {
			assert!(!is_obstructed(&grid, i, i));
		}
	}
	#[test]
	fn open_grid() {
		let grid = Grid::new(4, 4).unwrap();
		assert!(!is_obstructed(&grid, 0, 15));
		assert!(!is_obstructed(&grid, 12, 3));
	}
	#[test]
	fn straight_line_blocked() {
		//  ____________
		// |S_|__|x_|T_|
		// |__|__|__|__|
		let mut grid = Grid::new(2, 4).unwrap();
		grid.set_obstruction(2, true).unwrap();
		assert!(is_obstructed(&grid, 0, 3));
		assert!(is_obstructed(&grid, 3, 0));
		// the row beneath is clear
		assert!(!is_obstructed(&grid, 4, 7));
	}
	#[test]
	fn bounding_rectangle_over_approximates() {
		//  ____________
		// |S_|__|__|__|
		// |__|__|__|x_|
		// |__|__|__|T_|
		let mut grid = Grid::new(3, 4).unwrap();
		grid.set_obstruction(7, true).unwrap();
		assert!(is_obstructed(&grid, 0, 11));
		// rectangle from 0 to 10 excludes column 3
		assert!(!is_obstructed(&grid, 0, 10));
	}
	#[test]
	fn endpoints_are_inspected() {
		let mut grid = Grid::new(3, 3).unwrap();
		grid.set_obstruction(8, true).unwrap();
		assert!(is_obstructed(&grid, 0, 8));
	}
	#[test]
	fn outside_grid_short_circuits() {
		let mut grid = Grid::new(2, 2).unwrap();
		grid.apply_obstructions(&|_i: usize| true);
		assert!(!is_obstructed(&grid, 0, 4));
		assert!(!is_obstructed(&grid, usize::MAX, 1));
	}
	#[test]
	fn grid_method_matches() {
		let mut grid = Grid::new(3, 3).unwrap();
		grid.set_obstruction(4, true).unwrap();
		assert_eq!(is_obstructed(&grid, 0, 8), grid.is_trajectory_obstructed(0, 8));
		assert!(!grid.is_trajectory_obstructed(0, 2));
	}
}
