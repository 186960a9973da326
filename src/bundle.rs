//! Assembles the components an entity needs to act as a pathable floor
//!

use crate::prelude::*;
use bevy::prelude::*;

/// A [Grid] paired with the [GridLayout] placing it in the world
#[derive(Bundle, Clone)]
pub struct GridBoxBundle {
	/// Boxes and their obstructions
	grid: Grid,
	/// World placement of the boxes
	layout: GridLayout,
}

impl GridBoxBundle {
	/// Create a new instance of [GridBoxBundle] with an unobstructed grid
	/// sized from the layout
	pub fn new(layout: GridLayout) -> Result<Self, GridError> {
		let grid = Grid::new(layout.get_rows(), layout.get_columns())?;
		Ok(GridBoxBundle { grid, layout })
	}
	/// Create a new instance of [GridBoxBundle] with obstructions applied
	/// from an [ObstructionOracle]
	pub fn new_with_oracle<O: ObstructionOracle + ?Sized>(
		layout: GridLayout,
		oracle: &O,
	) -> Result<Self, GridError> {
		let mut bundle = GridBoxBundle::new(layout)?;
		bundle.grid.apply_obstructions(oracle);
		Ok(bundle)
	}
	/// Create a new instance of [GridBoxBundle] where the [Grid] is read from
	/// a [GridBlueprint] on disk, the blueprint must agree with the number of
	/// rows and columns of the layout
	#[cfg(feature = "ron")]
	pub fn new_from_disk(layout: GridLayout, path: &str) -> Result<Self, GridError> {
		let grid = Grid::from_ron(path)?;
		if grid.get_rows() != layout.get_rows() || grid.get_columns() != layout.get_columns() {
			return Err(GridError::MalformedSource(format!(
				"Blueprint is {}x{} but the layout is {}x{}",
				grid.get_rows(),
				grid.get_columns(),
				layout.get_rows(),
				layout.get_columns()
			)));
		}
		Ok(GridBoxBundle { grid, layout })
	}
	/// Get a reference to the grid
	pub fn get_grid(&self) -> &Grid {
		&self.grid
	}
	/// Get a reference to the layout
	pub fn get_layout(&self) -> &GridLayout {
		&self.layout
	}
}
