//! Logic for handling changes to the obstruction of grid boxes. Any
//! [Waypoints] already handed out are left alone, an actor wanting to react
//! to a changed grid sends a fresh [EventPathRequest]
//!

use std::collections::HashMap;

use crate::prelude::*;
use bevy::prelude::*;

/// Used to mark a grid box as obstructed or clear
#[derive(Event, Clone, Copy, Debug)]
pub struct EventUpdateObstruction {
	/// Grid box to update
	index: usize,
	/// Whether the grid box should be impassable
	blocked: bool,
}

impl EventUpdateObstruction {
	/// Create a new instance of [EventUpdateObstruction]
	#[cfg(not(tarpaulin_include))]
	pub fn new(index: usize, blocked: bool) -> Self {
		EventUpdateObstruction { index, blocked }
	}
	/// Get the grid box index
	#[cfg(not(tarpaulin_include))]
	pub fn get_index(&self) -> usize {
		self.index
	}
	/// Get whether the grid box should be impassable
	#[cfg(not(tarpaulin_include))]
	pub fn is_blocked(&self) -> bool {
		self.blocked
	}
}

/// Read [EventUpdateObstruction] and update the obstruction of each [Grid]
#[cfg(not(tarpaulin_include))]
pub fn process_obstruction_updates(
	mut events: EventReader<EventUpdateObstruction>,
	mut query: Query<&mut Grid>,
) {
	// coalesce events so each box is only written once with its latest value
	let mut coalesced: HashMap<usize, bool> = HashMap::new();
	for event in events.read() {
		coalesced.insert(event.get_index(), event.is_blocked());
	}
	if coalesced.is_empty() {
		return;
	}
	for mut grid in query.iter_mut() {
		for (index, blocked) in coalesced.iter() {
			if let Err(e) = grid.set_obstruction(*index, *blocked) {
				error!("Cannot update obstruction: {}", e);
			}
		}
		debug!(
			"Applied {} obstruction updates, {} boxes now blocked",
			coalesced.len(),
			grid.get_blocked_count()
		);
	}
}
