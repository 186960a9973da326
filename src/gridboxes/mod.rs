//! Grid boxes are a means of pathfinding for an actor across a flat floor.
//!
//! The floor is divided into a uniform grid of boxes, each box knowing its
//! (up to) four orthogonal neighbours and whether something obstructs it.
//! A path request from one box to another is answered by an A* search over
//! the unobstructed boxes, the resulting box-by-box path is then collapsed
//! into a handful of waypoints the actor can move straight between.
//!
//! Definitions:
//!
//! * Grid box - one addressable cell of the grid, indexed row-major from the
//!   top-left corner
//!
//! ```text
//!  ______________
//! |__|__|__|__|__|
//! |__|__|__|__|__|
//! |__|__|__|__|__|
//! |__|__|__|__|__|
//! ```
//!
//! * Neighbour - one of the up to four boxes orthogonally adjacent to a box
//! * Obstruction - a box marked as impassable, supplied by an
//!   [ObstructionOracle] which the host application implements with whatever
//!   spatial queries suit it
//! * Open set - boxes discovered but not yet finalised during a search
//! * Closed set - boxes whose shortest distance from the start is final
//! * Heuristic - the Manhattan distance from a box to the goal
//! * Naturalization - collapsing a box-by-box path into the boxes where an
//!   actor needs to turn
//!
//! The three calls a host needs are [build_grid], [set_obstruction] (or
//! [apply_obstructions]) and [find_naturalized_path]
//!

pub mod astar;
pub mod error;
pub mod grid;
pub mod gridbox;
pub mod layout;
pub mod line_of_sight;
pub mod naturalize;
pub mod obstruction;
pub mod utilities;

use crate::prelude::*;

/// Create an unobstructed `rows x columns` [Grid]
pub fn build_grid(rows: usize, columns: usize) -> Result<Grid, GridError> {
	Grid::new(rows, columns)
}

/// Mark a single box of the grid as obstructed or clear
pub fn set_obstruction(grid: &mut Grid, index: usize, blocked: bool) -> Result<(), GridError> {
	grid.set_obstruction(index, blocked)
}

/// Refresh the obstruction of every box from an [ObstructionOracle]
pub fn apply_obstructions<O: ObstructionOracle + ?Sized>(grid: &mut Grid, oracle: &O) {
	grid.apply_obstructions(oracle);
}

/// Find a path between two boxes and collapse it into waypoints, see
/// [PathFinder::find_naturalized_path]
pub fn find_naturalized_path(grid: &Grid, from: usize, to: usize) -> Result<Vec<usize>, PathError> {
	PathFinder::new().find_naturalized_path(grid, from, to)
}
