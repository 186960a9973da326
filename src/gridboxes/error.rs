//! Failure modes of building a [crate::prelude::Grid] and of searching it
//!

use thiserror::Error;

/// Problems encountered constructing, mutating or loading a grid
#[derive(Error, Debug)]
pub enum GridError {
	/// A grid needs at least one row and one column of boxes
	#[error("Invalid grid dimensions: {rows} rows by {columns} columns")]
	InvalidDimensions {
		/// Requested number of rows
		rows: usize,
		/// Requested number of columns
		columns: usize,
	},
	/// A layout needs a finite floor with a positive area
	#[error("Invalid floor size: length {length}, depth {depth}")]
	InvalidFloor {
		/// Extent of the floor along `x`
		length: f32,
		/// Extent of the floor along `z`
		depth: f32,
	},
	/// A grid box index beyond the end of the grid was used
	#[error("Grid box index {index} is out of bounds, the grid holds {len} boxes")]
	IndexOutOfBounds {
		/// The offending index
		index: usize,
		/// Number of boxes in the grid
		len: usize,
	},
	/// Reading a grid source from disk failed
	#[error("Failed reading grid source: {0}")]
	Io(#[from] std::io::Error),
	/// A `ron` blueprint could not be deserialized
	#[cfg(feature = "ron")]
	#[error("Failed deserializing grid blueprint: {0}")]
	Ron(#[from] ron::error::SpannedError),
	/// A CSV record could not be read
	#[cfg(feature = "csv")]
	#[error("Failed reading grid csv: {0}")]
	Csv(#[from] csv::Error),
	/// The source parsed but does not describe a rectangular grid of boxes
	#[error("Malformed grid source: {0}")]
	MalformedSource(String),
	/// A heightmap image could not be opened
	#[cfg(feature = "heightmap")]
	#[error("Failed opening heightmap: {0}")]
	Heightmap(String),
}

/// Reasons a path could not be produced
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
	/// The start or goal is blocked or lies outside of the grid, the caller
	/// should pick a different endpoint
	#[error("Grid box {index} cannot be used as a path endpoint")]
	InvalidEndpoint {
		/// The rejected endpoint
		index: usize,
	},
	/// Every box reachable from `start` was explored without meeting `goal`
	#[error("No path exists from grid box {start} to grid box {goal}")]
	NoPathFound {
		/// Where the search began
		start: usize,
		/// Where the search was trying to reach
		goal: usize,
	},
}
