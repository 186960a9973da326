//! Obstruction detection is left to the host application, the grid only
//! consumes a yes/no answer per box through an [ObstructionOracle].
//!
//! Simple oracles are provided for closures, sets of blocked indices and
//! boolean masks. [CornerProbe] adapts any spatial query, such as a physics
//! raycast against world colliders, into an oracle by testing the four
//! ground corners of each box
//!

use std::collections::{BTreeSet, HashSet};

use crate::prelude::*;
use bevy::prelude::*;

/// Default distance below the floor at which the corners of a box are
/// probed, keeps the probe from starting inside the floor surface itself
pub const DEFAULT_PROBE_OFFSET: f32 = 0.1;

/// Supplies the obstruction status of grid boxes
pub trait ObstructionOracle {
	/// Is the box at `index` impassable
	fn is_blocked(&self, index: usize) -> bool;
}

impl<F> ObstructionOracle for F
where
	F: Fn(usize) -> bool,
{
	fn is_blocked(&self, index: usize) -> bool {
		self(index)
	}
}

impl ObstructionOracle for HashSet<usize> {
	fn is_blocked(&self, index: usize) -> bool {
		self.contains(&index)
	}
}

impl ObstructionOracle for BTreeSet<usize> {
	fn is_blocked(&self, index: usize) -> bool {
		self.contains(&index)
	}
}

/// A row-major mask, indices beyond the end of the mask are clear
impl ObstructionOracle for [bool] {
	fn is_blocked(&self, index: usize) -> bool {
		self.get(index).copied().unwrap_or(false)
	}
}

impl ObstructionOracle for Vec<bool> {
	fn is_blocked(&self, index: usize) -> bool {
		self.as_slice().is_blocked(index)
	}
}

/// Determines obstruction by probing the four ground corners of a box with a
/// host supplied spatial query. Each corner is lowered by a small offset
/// beneath the floor before being handed to the query, if the query reports
/// an obstruction at any corner the whole box is blocked
pub struct CornerProbe<'a, F>
where
	F: Fn(Vec3) -> bool,
{
	/// Placement of the grid in the world
	layout: &'a GridLayout,
	/// Returns `true` when something obstructive is found at or above the
	/// supplied point
	query: F,
	/// Distance below the floor each probe starts from
	probe_offset: f32,
}

impl<'a, F> CornerProbe<'a, F>
where
	F: Fn(Vec3) -> bool,
{
	/// Create a new instance of [CornerProbe]
	pub fn new(layout: &'a GridLayout, query: F) -> Self {
		CornerProbe {
			layout,
			query,
			probe_offset: DEFAULT_PROBE_OFFSET,
		}
	}
	/// Use a different depth beneath the floor for each probe
	pub fn with_probe_offset(mut self, probe_offset: f32) -> Self {
		self.probe_offset = probe_offset;
		self
	}
	/// Get the probe depth
	pub fn get_probe_offset(&self) -> f32 {
		self.probe_offset
	}
}

impl<F> ObstructionOracle for CornerProbe<'_, F>
where
	F: Fn(Vec3) -> bool,
{
	fn is_blocked(&self, index: usize) -> bool {
		match self.layout.get_box_corners(index) {
			Some(corners) => corners
				.iter()
				.any(|corner| (self.query)(*corner - Vec3::Y * self.probe_offset)),
			None => {
				warn!("Cannot probe grid box {}, it is outside of the layout", index);
				false
			}
		}
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn closure_oracle() {
		let oracle = |i: usize| i > 2;
		assert!(!oracle.is_blocked(2));
		assert!(oracle.is_blocked(3));
	}
	#[test]
	fn set_oracles() {
		let hash: HashSet<usize> = [1, 4].into_iter().collect();
		let btree: BTreeSet<usize> = [1, 4].into_iter().collect();
		for i in 0..6 {
			assert_eq!(i == 1 || i == 4, hash.is_blocked(i));
			assert_eq!(i == 1 || i == 4, btree.is_blocked(i));
		}
	}
	#[test]
	fn mask_oracle() {
		let mask = vec![false, true, false];
		assert!(mask.is_blocked(1));
		assert!(!mask.is_blocked(2));
		assert!(!mask.is_blocked(10));
	}
	#[test]
	fn corner_probe_marks_overlapped_boxes() {
		// 10x10 floor, 5x5 boxes of 2x2
		//  _______________
		// |__|__|__|__|__|
		// |__|__|__|__|__|
		// |__|__|x_|__|__|
		// |__|__|__|__|__|
		// |__|__|__|__|__|
		let layout = GridLayout::new(Vec3::ZERO, Vec2::new(10.0, 10.0), 5, 5).unwrap();
		// a pillar strictly within the centre box, touching none of its corners
		let pillar = |p: Vec3| p.x.abs() < 0.5 && p.z.abs() < 0.5;
		let probe = CornerProbe::new(&layout, pillar);
		let mut grid = Grid::new(5, 5).unwrap();
		grid.apply_obstructions(&probe);
		assert_eq!(0, grid.get_blocked_count());
		// a crate covering the centre box corners and nothing further out
		let crate_box = |p: Vec3| p.x.abs() <= 1.0 && p.z.abs() <= 1.0;
		let probe = CornerProbe::new(&layout, crate_box);
		grid.apply_obstructions(&probe);
		// the corners of the centre box are shared with its eight surrounding boxes
		assert_eq!(9, grid.get_blocked_count());
		assert!(grid.is_blocked(12));
		assert!(!grid.is_blocked(0));
	}
	#[test]
	fn corner_probe_is_lowered() {
		let layout = GridLayout::new(Vec3::new(0.0, 2.0, 0.0), Vec2::new(2.0, 2.0), 1, 1).unwrap();
		let probe = CornerProbe::new(&layout, |p: Vec3| p.y < 2.0).with_probe_offset(0.5);
		assert_eq!(0.5, probe.get_probe_offset());
		assert!(probe.is_blocked(0));
		let probe = CornerProbe::new(&layout, |p: Vec3| p.y >= 2.0);
		assert!(!probe.is_blocked(0));
	}
	#[test]
	fn corner_probe_outside_layout() {
		let layout = GridLayout::new(Vec3::ZERO, Vec2::new(2.0, 2.0), 1, 1).unwrap();
		let probe = CornerProbe::new(&layout, |_p: Vec3| true);
		assert!(!probe.is_blocked(1));
	}
}
