//! A path produced by the [PathFinder] steps through every box between the
//! start and the goal. An actor following it box by box moves in a jagged,
//! unnatural way, so the path is collapsed into the few boxes where the actor
//! actually needs to turn.
//!
//! Beginning from the first box of the raw path (where the actor currently
//! stands) the path is scanned forward for as long as the trajectory from the
//! current anchor remains unobstructed. When the trajectory to a box becomes
//! obstructed the previous box becomes a waypoint and the new anchor:
//!
//! ```text
//!  _______________           _______________
//! |S_|->|->|->|v_|          |S_|__|__|__|__|
//! |__|__|__|__|v_|          |__|__|__|__|1_|
//! |x_|x_|x_|x_|v_|   --->   |x_|x_|x_|x_|__|
//! |v_|<-|<-|<-|<_|          |__|__|__|__|2_|
//! |G_|__|__|__|__|          |G_|__|__|__|__|
//! ```
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Collapse a raw cell-by-cell path into waypoints.
///
/// The first element of `raw_path` is the anchor the actor starts from and is
/// not included in the result, the final element always is. Consecutive
/// waypoints (and the anchor with the first waypoint) are never obstructed
/// according to [is_obstructed]. A single element path produces that element,
/// an empty path produces no waypoints
pub fn naturalize(grid: &Grid, raw_path: &[usize]) -> Vec<usize> {
	let Some((&start, rest)) = raw_path.split_first() else {
		return Vec::new();
	};
	let mut waypoints = Vec::new();
	let mut anchor = start;
	let mut last_visible = start;
	for &next in rest {
		if is_obstructed(grid, anchor, next) {
			if last_visible != anchor {
				waypoints.push(last_visible);
				anchor = last_visible;
			}
			// a box that cannot be seen even from its predecessor (a path
			// not produced by the finder) is kept as a waypoint as is
			if is_obstructed(grid, anchor, next) {
				waypoints.push(next);
				anchor = next;
			}
		}
		last_visible = next;
	}
	let goal = *raw_path.last().unwrap_or(&start);
	if waypoints.last() != Some(&goal) {
		waypoints.push(goal);
	}
	waypoints
}

impl PathFinder {
	/// Find a path from `from` to `to` and collapse it into waypoints. When
	/// nothing obstructs the direct trajectory the search is skipped
	/// entirely and the only waypoint is `to`
	pub fn find_naturalized_path(
		&mut self,
		grid: &Grid,
		from: usize,
		to: usize,
	) -> Result<Vec<usize>, PathError> {
		if let Err(e) = check_endpoint(grid, from).and(check_endpoint(grid, to)) {
			self.conclude_without_search(SearchStatus::Failed);
			return Err(e);
		}
		if !is_obstructed(grid, from, to) {
			self.conclude_without_search(SearchStatus::Succeeded);
			return Ok(vec![to]);
		}
		let raw_path = self.find_path(grid, from, to)?;
		let waypoints = naturalize(grid, &raw_path);
		trace!(
			"Naturalized a path of {} boxes into {} waypoints",
			raw_path.len(),
			waypoints.len()
		);
		Ok(waypoints)
	}
}
