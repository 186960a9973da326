//! A* search across the unobstructed boxes of a [Grid].
//!
//! Movement is restricted to the four orthogonal neighbours of a box with
//! every step costing `1`. The Manhattan distance between two boxes is used
//! as the heuristic. On this kind of grid it never overestimates and is
//! consistent, the first time the goal is taken from the open set the path to
//! it is optimal.
//!
//! When several open boxes share the lowest `f` score the one with the larger
//! `g` score (the one further along its route) is expanded first, any
//! remaining tie is broken by the lower index so that searches are
//! deterministic.
//!
//! The per-box scores live in a scratch table owned by the [PathFinder]
//! rather than on the boxes themselves. The table is reset at the beginning
//! and at the end of every search so nothing from one search can leak into
//! the next.
//!

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::prelude::*;
use bevy::prelude::*;

/// Progress of a box through a search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VisitStatus {
	/// Not yet discovered
	#[default]
	Unvisited,
	/// Discovered and waiting in the open set
	Open,
	/// Shortest distance from the start is final
	Closed,
}

/// Transient scores of a single box during one search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SearchState {
	/// Steps taken from the start to reach the box
	g_score: u32,
	/// Estimated steps remaining to the goal
	h_score: u32,
	/// Where the box is in the search
	visit: VisitStatus,
	/// The box this one was reached from along the best known route
	predecessor: Option<usize>,
}

impl SearchState {
	/// Steps taken from the start
	pub fn get_g_score(&self) -> u32 {
		self.g_score
	}
	/// Estimated steps remaining
	pub fn get_h_score(&self) -> u32 {
		self.h_score
	}
	/// `g + h`, the estimated length of a route through this box
	pub fn get_f_score(&self) -> u32 {
		self.g_score + self.h_score
	}
	/// Where the box is in the search
	pub fn get_visit(&self) -> VisitStatus {
		self.visit
	}
	/// The box this one was reached from
	pub fn get_predecessor(&self) -> Option<usize> {
		self.predecessor
	}
}

/// Lifecycle of a [PathFinder]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SearchStatus {
	/// No search has been run yet
	#[default]
	Idle,
	/// A search is underway
	Running,
	/// The last search reached its goal
	Succeeded,
	/// The last search was rejected or exhausted the grid
	Failed,
}

/// An entry of the open set. Entries are never removed when a box receives
/// a better score, the outdated entry is skipped when it is popped instead
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OpenEntry {
	/// `f` score at the time of insertion
	f_score: u32,
	/// `g` score at the time of insertion
	g_score: u32,
	/// Box the entry refers to
	index: usize,
}

// [BinaryHeap] is a max-heap so the "greatest" entry must be the one to expand next
impl Ord for OpenEntry {
	fn cmp(&self, other: &Self) -> Ordering {
		other
			.f_score
			.cmp(&self.f_score)
			.then_with(|| self.g_score.cmp(&other.g_score))
			.then_with(|| other.index.cmp(&self.index))
	}
}

impl PartialOrd for OpenEntry {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// Runs A* searches over a [Grid]. A single finder can be reused for many
/// searches (and many grids), its scratch memory is retained between calls
#[derive(Debug, Default)]
pub struct PathFinder {
	/// Scores of every box, indexed like the grid
	states: Vec<SearchState>,
	/// Boxes discovered but not yet finalised
	open: BinaryHeap<OpenEntry>,
	/// Current lifecycle stage
	status: SearchStatus,
	/// Number of boxes closed by the most recent search
	expanded: usize,
}

impl PathFinder {
	/// Create a new instance of [PathFinder]
	pub fn new() -> Self {
		PathFinder::default()
	}
	/// Lifecycle stage of the finder
	pub fn get_status(&self) -> SearchStatus {
		self.status
	}
	/// Number of boxes closed by the most recent search
	pub fn get_expanded_count(&self) -> usize {
		self.expanded
	}
	/// Scores of a box, only meaningful while a search is running, between
	/// searches every box reads as the default unvisited state
	pub fn get_state(&self, index: usize) -> Option<&SearchState> {
		self.states.get(index)
	}
	/// Record the outcome of a request answered without running a search
	pub(crate) fn conclude_without_search(&mut self, status: SearchStatus) {
		self.expanded = 0;
		self.status = status;
	}
	/// Return every box to an unvisited state with zeroed scores
	fn reset(&mut self, len: usize) {
		self.states.clear();
		self.states.resize(len, SearchState::default());
		self.open.clear();
	}
	/// Find the shortest route from `start` to `goal` inclusive of both.
	///
	/// A blocked or out of bounds endpoint is rejected with
	/// [PathError::InvalidEndpoint], if every box reachable from `start` is
	/// explored without meeting `goal` then [PathError::NoPathFound] is
	/// returned
	pub fn find_path(
		&mut self,
		grid: &Grid,
		start: usize,
		goal: usize,
	) -> Result<Vec<usize>, PathError> {
		if let Err(e) = check_endpoint(grid, start).and(check_endpoint(grid, goal)) {
			self.status = SearchStatus::Failed;
			return Err(e);
		}
		self.reset(grid.len());
		self.expanded = 0;
		self.status = SearchStatus::Running;
		let result = self.search(grid, start, goal);
		self.status = if result.is_ok() {
			SearchStatus::Succeeded
		} else {
			SearchStatus::Failed
		};
		trace!(
			"Search from {} to {} closed {} boxes",
			start,
			goal,
			self.expanded
		);
		self.reset(grid.len());
		result
	}
	/// The main A* loop
	fn search(&mut self, grid: &Grid, start: usize, goal: usize) -> Result<Vec<usize>, PathError> {
		let columns = grid.get_columns();
		let start_h = manhattan_distance(start, goal, columns);
		self.states[start] = SearchState {
			g_score: 0,
			h_score: start_h,
			visit: VisitStatus::Open,
			predecessor: None,
		};
		self.open.push(OpenEntry {
			f_score: start_h,
			g_score: 0,
			index: start,
		});
		while let Some(entry) = self.open.pop() {
			let current = self.states[entry.index];
			// skip entries superseded by a better route or already finalised
			if current.visit == VisitStatus::Closed || current.g_score != entry.g_score {
				continue;
			}
			self.states[entry.index].visit = VisitStatus::Closed;
			self.expanded += 1;
			if entry.index == goal {
				return Ok(self.reconstruct(goal));
			}
			let Some(gridbox) = grid.get_box(entry.index) else {
				continue;
			};
			for (_ordinal, n) in gridbox.iter_neighbours() {
				if grid.is_blocked(n) {
					continue;
				}
				let neighbour = self.states[n];
				if neighbour.visit == VisitStatus::Closed {
					continue;
				}
				let tentative_g = current.g_score + 1;
				if neighbour.visit == VisitStatus::Unvisited || tentative_g < neighbour.g_score {
					let h_score = manhattan_distance(n, goal, columns);
					self.states[n] = SearchState {
						g_score: tentative_g,
						h_score,
						visit: VisitStatus::Open,
						predecessor: Some(entry.index),
					};
					self.open.push(OpenEntry {
						f_score: tentative_g + h_score,
						g_score: tentative_g,
						index: n,
					});
				}
			}
		}
		debug!("Open set exhausted, no path from {} to {}", start, goal);
		Err(PathError::NoPathFound { start, goal })
	}
	/// Walk the predecessors back from the goal and reverse them into a
	/// start to goal path
	fn reconstruct(&self, goal: usize) -> Vec<usize> {
		let mut path = vec![goal];
		let mut current = goal;
		while let Some(previous) = self.states[current].predecessor {
			path.push(previous);
			current = previous;
		}
		path.reverse();
		path
	}
}

/// A path can only begin or end on an unobstructed box inside the grid
pub fn check_endpoint(grid: &Grid, index: usize) -> Result<(), PathError> {
	if grid.contains(index) && !grid.is_blocked(index) {
		Ok(())
	} else {
		Err(PathError::InvalidEndpoint { index })
	}
}

/// Find the shortest route from `start` to `goal` with a single use
/// [PathFinder]
pub fn find_path(grid: &Grid, start: usize, goal: usize) -> Result<Vec<usize>, PathError> {
	PathFinder::new().find_path(grid, start, goal)
}

/// Number of steps along a path
pub fn path_cost(path: &[usize]) -> usize {
	path.len().saturating_sub(1)
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use std::collections::VecDeque;

	use super::*;

	/// Breadth first search step count, used as a reference for optimality
	fn bfs_steps(grid: &Grid, start: usize, goal: usize) -> Option<usize> {
		let mut distance = vec![None; grid.len()];
		distance[start] = Some(0);
		let mut queue = VecDeque::from([start]);
		while let Some(current) = queue.pop_front() {
			if current == goal {
				return distance[current];
			}
			for (_o, n) in grid.get_box(current).unwrap().iter_neighbours() {
				if !grid.is_blocked(n) && distance[n].is_none() {
					distance[n] = Some(distance[current].unwrap() + 1);
					queue.push_back(n);
				}
			}
		}
		None
	}

	/// Every consecutive pair is adjacent and no box is blocked
	fn assert_valid_path(grid: &Grid, path: &[usize]) {
		for pair in path.windows(2) {
			let neighbours = grid.get_box(pair[0]).unwrap().get_neighbours();
			assert!(neighbours.contains(&Some(pair[1])), "{} is not adjacent to {}", pair[0], pair[1]);
		}
		for index in path {
			assert!(!grid.is_blocked(*index));
		}
	}

	#[test]
	fn start_is_goal() {
		let grid = Grid::new(5, 5).unwrap();
		for s in 0..25 {
			assert_eq!(Ok(vec![s]), find_path(&grid, s, s));
		}
	}
	#[test]
	fn corner_to_corner_open() {
		let grid = Grid::new(5, 5).unwrap();
		let path = find_path(&grid, 0, 24).unwrap();
		assert_eq!(9, path.len());
		assert_eq!(manhattan_distance(0, 24, 5) as usize, path_cost(&path));
		assert_eq!(0, path[0]);
		assert_eq!(24, path[8]);
		assert_valid_path(&grid, &path);
	}
	#[test]
	fn tie_break_prefers_depth() {
		//  _______________
		// |S_|->|->|->|v_|
		// |__|__|__|__|v_|
		// |__|__|__|__|v_|
		// |__|__|__|__|v_|
		// |__|__|__|__|G_|
		let grid = Grid::new(5, 5).unwrap();
		let path = find_path(&grid, 0, 24).unwrap();
		assert_eq!(vec![0, 1, 2, 3, 4, 9, 14, 19, 24], path);
	}
	#[test]
	fn route_through_gap() {
		//  _______________
		// |S_|__|__|__|__|
		// |__|__|__|__|__|
		// |x_|x_|x_|x_|__|
		// |__|__|__|__|__|
		// |G_|__|__|__|__|
		let mut grid = Grid::new(5, 5).unwrap();
		for i in 10..14 {
			grid.set_obstruction(i, true).unwrap();
		}
		let path = find_path(&grid, 0, 20).unwrap();
		assert!(path.contains(&14));
		assert_eq!(13, path.len());
		assert_valid_path(&grid, &path);
		let path = find_path(&grid, 22, 1).unwrap();
		assert!(path.contains(&14));
	}
	#[test]
	fn wall_without_gap() {
		let mut grid = Grid::new(5, 5).unwrap();
		for i in 10..15 {
			grid.set_obstruction(i, true).unwrap();
		}
		for start in 0..10 {
			for goal in 15..25 {
				assert_eq!(Err(PathError::NoPathFound { start, goal }), find_path(&grid, start, goal));
				assert_eq!(Err(PathError::NoPathFound { start: goal, goal: start }), find_path(&grid, goal, start));
			}
		}
	}
	#[test]
	fn enclosed_goal() {
		//  _________
		// |S_|__|__|
		// |__|__|x_|
		// |__|x_|G_|
		let mut grid = Grid::new(3, 3).unwrap();
		grid.set_obstruction(5, true).unwrap();
		grid.set_obstruction(7, true).unwrap();
		assert_eq!(Err(PathError::NoPathFound { start: 0, goal: 8 }), find_path(&grid, 0, 8));
	}
	#[test]
	fn blocked_endpoints() {
		let mut grid = Grid::new(3, 3).unwrap();
		grid.set_obstruction(4, true).unwrap();
		assert_eq!(Err(PathError::InvalidEndpoint { index: 4 }), find_path(&grid, 4, 0));
		assert_eq!(Err(PathError::InvalidEndpoint { index: 4 }), find_path(&grid, 0, 4));
		assert_eq!(Err(PathError::InvalidEndpoint { index: 9 }), find_path(&grid, 0, 9));
	}
	#[test]
	fn detour_is_optimal() {
		// serpentine obstructions which force long detours
		let mut grid = Grid::new(8, 8).unwrap();
		grid.apply_obstructions(&|i: usize| {
			let (row, column) = (i / 8, i % 8);
			(row == 1 && column < 7) || (row == 3 && column > 0) || (row == 5 && column < 7)
		});
		let path = find_path(&grid, 0, 63).unwrap();
		assert_valid_path(&grid, &path);
		assert_eq!(bfs_steps(&grid, 0, 63), Some(path_cost(&path)));
	}
	#[test]
	fn matches_breadth_first_reference() {
		let mut grid = Grid::new(9, 11).unwrap();
		grid.apply_obstructions(&|i: usize| (i * 7 + 3) % 6 == 0);
		let mut finder = PathFinder::new();
		for goal in 0..grid.len() {
			match finder.find_path(&grid, 0, goal) {
				Ok(path) => {
					assert_valid_path(&grid, &path);
					assert_eq!(bfs_steps(&grid, 0, goal), Some(path_cost(&path)));
				}
				Err(PathError::NoPathFound { .. }) => assert_eq!(None, bfs_steps(&grid, 0, goal)),
				Err(PathError::InvalidEndpoint { index }) => assert!(grid.is_blocked(index)),
			}
		}
	}
	#[test]
	fn status_lifecycle() {
		let mut grid = Grid::new(3, 3).unwrap();
		let mut finder = PathFinder::new();
		assert_eq!(SearchStatus::Idle, finder.get_status());
		finder.find_path(&grid, 0, 8).unwrap();
		assert_eq!(SearchStatus::Succeeded, finder.get_status());
		// 0, 1, 2, 5 then 8
		assert_eq!(5, finder.get_expanded_count());
		grid.set_obstruction(8, true).unwrap();
		assert!(finder.find_path(&grid, 0, 8).is_err());
		assert_eq!(SearchStatus::Failed, finder.get_status());
	}
	#[test]
	fn no_state_leaks_between_searches() {
		let mut grid = Grid::new(4, 4).unwrap();
		let mut finder = PathFinder::new();
		finder.find_path(&grid, 0, 15).unwrap();
		for i in 0..16 {
			assert_eq!(Some(&SearchState::default()), finder.get_state(i));
		}
		// reuse the finder across a failed and a successful search on a changed grid
		for i in [4, 5, 6, 7] {
			grid.set_obstruction(i, true).unwrap();
		}
		assert!(finder.find_path(&grid, 0, 15).is_err());
		for i in 0..16 {
			assert_eq!(Some(&SearchState::default()), finder.get_state(i));
		}
		grid.set_obstruction(7, false).unwrap();
		let path = finder.find_path(&grid, 0, 15).unwrap();
		assert!(path.contains(&7));
		assert_eq!(bfs_steps(&grid, 0, 15), Some(path_cost(&path)));
	}
	#[test]
	fn open_entry_ordering() {
		let mut heap = BinaryHeap::new();
		heap.push(OpenEntry { f_score: 6, g_score: 1, index: 0 });
		heap.push(OpenEntry { f_score: 4, g_score: 1, index: 5 });
		heap.push(OpenEntry { f_score: 4, g_score: 3, index: 9 });
		heap.push(OpenEntry { f_score: 4, g_score: 3, index: 2 });
		assert_eq!(2, heap.pop().unwrap().index);
		assert_eq!(9, heap.pop().unwrap().index);
		assert_eq!(5, heap.pop().unwrap().index);
		assert_eq!(0, heap.pop().unwrap().index);
	}
	#[test]
	fn path_cost_of_paths() {
		assert_eq!(0, path_cost(&[]));
		assert_eq!(0, path_cost(&[3]));
		assert_eq!(2, path_cost(&[3, 4, 5]));
	}
}
