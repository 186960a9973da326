//! A [GridBox] is the smallest addressable unit of a [crate::prelude::Grid].
//! It knows its own index, the indices of its up to four orthogonal
//! neighbours and whether something currently obstructs it
//!

use crate::prelude::*;
use bevy::prelude::*;

/// A single box of the grid
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub struct GridBox {
	/// Row-major position of the box, `row * columns + column`
	index: usize,
	/// Indices of the neighbouring boxes ordered `[North, East, South, West]`,
	/// [None] where the box sits on the boundary of the grid
	neighbours: [Option<usize>; NEIGHBOUR_COUNT],
	/// Whether the box is impassable
	blocked: bool,
}

impl GridBox {
	/// Create a new unobstructed [GridBox]
	pub fn new(index: usize, neighbours: [Option<usize>; NEIGHBOUR_COUNT]) -> Self {
		GridBox {
			index,
			neighbours,
			blocked: false,
		}
	}
	/// Get the index of the box
	pub fn get_index(&self) -> usize {
		self.index
	}
	/// Get the neighbour array, ordered `[North, East, South, West]`
	pub fn get_neighbours(&self) -> &[Option<usize>; NEIGHBOUR_COUNT] {
		&self.neighbours
	}
	/// Get the neighbour in a particular direction
	pub fn get_neighbour(&self, ordinal: Ordinal) -> Option<usize> {
		self.neighbours[ordinal.get_slot()]
	}
	/// Iterate over the neighbours which exist along with their direction
	pub fn iter_neighbours(&self) -> impl Iterator<Item = (Ordinal, usize)> + '_ {
		Ordinal::ALL
			.into_iter()
			.filter_map(move |ordinal| self.get_neighbour(ordinal).map(|n| (ordinal, n)))
	}
	/// Is the box obstructed
	pub fn is_blocked(&self) -> bool {
		self.blocked
	}
	/// Mark the box as obstructed or clear
	pub fn set_blocked(&mut self, blocked: bool) {
		self.blocked = blocked;
	}
}
