//! The [Grid] is a `rows x columns` arrangement of [GridBox] stored in
//! row-major order. Neighbour links are derived once during construction and
//! never change afterwards, only the obstruction flag of each box is mutable.
//!
//! Boxes are indexed from the top-left corner of the grid:
//!
//! ```text
//!  ________________
//! |0_|1_|2_|3_|4_|
//! |5_|6_|7_|8_|9_|
//! |10|11|12|13|14|
//! ```
//!
//! For any box the neighbours are derived independently per direction:
//!
//! * North - `index - columns`, absent on the top row
//! * East - `index + 1`, absent on the rightmost column
//! * South - `index + columns`, absent on the bottom row
//! * West - `index - 1`, absent on the leftmost column
//!

use crate::prelude::*;
use bevy::prelude::*;

/// A grid of [GridBox] used for pathfinding
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Clone, Debug, Reflect)]
pub struct Grid {
	/// Number of rows of boxes
	rows: usize,
	/// Number of boxes in each row
	columns: usize,
	/// Every box of the grid in row-major order
	boxes: Vec<GridBox>,
}

impl Grid {
	/// Create a new unobstructed [Grid] of `rows x columns` boxes
	pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
		let len = rows
			.checked_mul(columns)
			.filter(|len| *len > 0)
			.ok_or(GridError::InvalidDimensions { rows, columns })?;
		let mut boxes = Vec::with_capacity(len);
		for index in 0..len {
			boxes.push(GridBox::new(
				index,
				Self::derive_neighbours(index, rows, columns),
			));
		}
		Ok(Grid {
			rows,
			columns,
			boxes,
		})
	}
	/// Calculate the `[North, East, South, West]` neighbours of a box
	fn derive_neighbours(
		index: usize,
		rows: usize,
		columns: usize,
	) -> [Option<usize>; NEIGHBOUR_COUNT] {
		let len = rows * columns;
		let north = (index >= columns).then(|| index - columns);
		let east = ((index + 1) % columns != 0).then(|| index + 1);
		let south = (index < len - columns).then(|| index + columns);
		let west = (index % columns != 0).then(|| index - 1);
		[north, east, south, west]
	}
	/// Number of rows of boxes
	pub fn get_rows(&self) -> usize {
		self.rows
	}
	/// Number of boxes in each row
	pub fn get_columns(&self) -> usize {
		self.columns
	}
	/// Total number of boxes
	pub fn len(&self) -> usize {
		self.boxes.len()
	}
	/// A grid always has at least one box
	pub fn is_empty(&self) -> bool {
		self.boxes.is_empty()
	}
	/// Does `index` refer to a box of this grid
	pub fn contains(&self, index: usize) -> bool {
		index < self.boxes.len()
	}
	/// Get a reference to every box
	pub fn get_boxes(&self) -> &[GridBox] {
		&self.boxes
	}
	/// Retrieve a box, [None] if `index` is out of bounds
	pub fn get_box(&self, index: usize) -> Option<&GridBox> {
		self.boxes.get(index)
	}
	/// `(row, column)` of a box index
	pub fn get_row_column(&self, index: usize) -> (usize, usize) {
		(index / self.columns, index % self.columns)
	}
	/// Index of the box at `(row, column)`, [None] if outside the grid
	pub fn get_index(&self, row: usize, column: usize) -> Option<usize> {
		if row < self.rows && column < self.columns {
			Some(row * self.columns + column)
		} else {
			None
		}
	}
	/// Is the box at `index` obstructed. Out of bounds indices are treated as
	/// blocked
	pub fn is_blocked(&self, index: usize) -> bool {
		self.boxes.get(index).is_none_or(|b| b.is_blocked())
	}
	/// Mark a single box as obstructed or clear
	pub fn set_obstruction(&mut self, index: usize, blocked: bool) -> Result<(), GridError> {
		let len = self.boxes.len();
		match self.boxes.get_mut(index) {
			Some(gridbox) => {
				gridbox.set_blocked(blocked);
				Ok(())
			}
			None => Err(GridError::IndexOutOfBounds { index, len }),
		}
	}
	/// Query the `oracle` for every box and record the result. Call again
	/// whenever the world changes
	pub fn apply_obstructions<O: ObstructionOracle + ?Sized>(&mut self, oracle: &O) {
		for gridbox in self.boxes.iter_mut() {
			let blocked = oracle.is_blocked(gridbox.get_index());
			gridbox.set_blocked(blocked);
		}
		trace!(
			"Applied obstructions, {} of {} boxes blocked",
			self.get_blocked_count(),
			self.len()
		);
	}
	/// Mark every box as clear
	pub fn clear_obstructions(&mut self) {
		for gridbox in self.boxes.iter_mut() {
			gridbox.set_blocked(false);
		}
	}
	/// Number of obstructed boxes
	pub fn get_blocked_count(&self) -> usize {
		self.boxes.iter().filter(|b| b.is_blocked()).count()
	}
	/// Whether a straight trajectory between two boxes would cross an
	/// obstruction, see [is_obstructed]
	pub fn is_trajectory_obstructed(&self, from: usize, to: usize) -> bool {
		is_obstructed(self, from, to)
	}
}

/// A compact description of a grid, its size and which boxes are blocked
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridBlueprint {
	/// Number of rows of boxes
	pub rows: usize,
	/// Number of boxes in each row
	pub columns: usize,
	/// Indices of obstructed boxes
	#[cfg_attr(feature = "serde", serde(default))]
	pub blocked: Vec<usize>,
}

impl GridBlueprint {
	/// Build the [Grid] described by the blueprint
	pub fn build(&self) -> Result<Grid, GridError> {
		let mut grid = Grid::new(self.rows, self.columns)?;
		for index in self.blocked.iter() {
			grid.set_obstruction(*index, true)?;
		}
		Ok(grid)
	}
}

impl From<&Grid> for GridBlueprint {
	fn from(grid: &Grid) -> Self {
		GridBlueprint {
			rows: grid.get_rows(),
			columns: grid.get_columns(),
			blocked: grid
				.get_boxes()
				.iter()
				.filter(|b| b.is_blocked())
				.map(|b| b.get_index())
				.collect(),
		}
	}
}

impl Grid {
	/// From a `ron` file containing a [GridBlueprint] generate the [Grid]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self, GridError> {
		let file = std::fs::File::open(path)?;
		let blueprint: GridBlueprint = ron::de::from_reader(file)?;
		debug!(
			"Loaded blueprint of {}x{} from {}",
			blueprint.rows, blueprint.columns, path
		);
		blueprint.build()
	}
	/// From a header-less CSV file of `0` (clear) and `1` (blocked) values,
	/// where each record is a row of the grid, generate the [Grid]
	#[cfg(feature = "csv")]
	pub fn from_csv(path: &str) -> Result<Self, GridError> {
		let mut rdr = csv::ReaderBuilder::new()
			.has_headers(false)
			.flexible(true)
			.trim(csv::Trim::All)
			.from_path(path)?;
		let mut rows_of_values: Vec<Vec<bool>> = Vec::new();
		for record in rdr.records() {
			let record = record?;
			let mut row = Vec::with_capacity(record.len());
			for value in record.iter() {
				match value {
					"0" => row.push(false),
					"1" => row.push(true),
					other => {
						return Err(GridError::MalformedSource(format!(
							"CSV expects 0 or 1, found `{}`",
							other
						)))
					}
				}
			}
			rows_of_values.push(row);
		}
		let rows = rows_of_values.len();
		let columns = rows_of_values.first().map_or(0, |r| r.len());
		if rows_of_values.iter().any(|r| r.len() != columns) {
			return Err(GridError::MalformedSource(
				"CSV rows have differing lengths".to_string(),
			));
		}
		let mut grid = Grid::new(rows, columns)?;
		let mask: Vec<bool> = rows_of_values.into_iter().flatten().collect();
		grid.apply_obstructions(mask.as_slice());
		Ok(grid)
	}
	/// Create a [Grid] from an image where each pixel represents a box. Any
	/// pixel whose average brightness is below `threshold` marks its box as
	/// blocked, so dark areas of the image are walls
	#[cfg(feature = "heightmap")]
	pub fn from_heightmap(path: &str, threshold: u8) -> Result<Self, GridError> {
		use photon_rs::native::open_image;
		let img = open_image(path).map_err(|e| GridError::Heightmap(format!("{:?}", e)))?;
		let img_width = img.get_width() as usize;
		let img_height = img.get_height() as usize;
		let mut grid = Grid::new(img_height, img_width)?;
		let raw_pixels = img.get_raw_pixels();
		// raw pixels are arranged from the top left of the image and come in sets of either 3 or 4 (if alpha channel is inlcuded).
		let chunk_size = if img_width * img_height * 4 == raw_pixels.len() {
			4
		} else {
			3
		};
		let mask: Vec<bool> = raw_pixels
			.chunks(chunk_size)
			.map(|px| {
				// careful of u8 overflow
				let colour_avg = (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0;
				colour_avg < threshold as f32
			})
			.collect();
		if mask.len() != grid.len() {
			return Err(GridError::MalformedSource(format!(
				"Heightmap has {} pixels, expected {}",
				mask.len(),
				grid.len()
			)));
		}
		grid.apply_obstructions(mask.as_slice());
		Ok(grid)
	}
}
