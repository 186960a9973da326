//! Logic relating to answering path requests with [Waypoints]
//!

use std::collections::VecDeque;

use crate::prelude::*;
use bevy::prelude::*;

/// A request for an actor to be given [Waypoints] leading from one grid box
/// to another
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventPathRequest {
	/// The entity which will receive the [Waypoints]
	requester: Entity,
	/// The grid box the actor currently occupies
	from: usize,
	/// The grid box the actor wants to reach
	to: usize,
}

impl EventPathRequest {
	/// Create a new instance of [EventPathRequest]
	pub fn new(requester: Entity, from: usize, to: usize) -> Self {
		EventPathRequest {
			requester,
			from,
			to,
		}
	}
	/// Get the requesting entity
	#[cfg(not(tarpaulin_include))]
	pub fn get_requester(&self) -> Entity {
		self.requester
	}
	/// Get the starting grid box
	#[cfg(not(tarpaulin_include))]
	pub fn get_from(&self) -> usize {
		self.from
	}
	/// Get the target grid box
	#[cfg(not(tarpaulin_include))]
	pub fn get_to(&self) -> usize {
		self.to
	}
}

/// The naturalized path an actor is following, front of the queue is the
/// grid box to head for next
#[derive(Component, Clone, Debug, Default, PartialEq, Eq, Reflect)]
pub struct Waypoints(VecDeque<usize>);

impl Waypoints {
	/// Create a new instance of [Waypoints]
	pub fn new(waypoints: Vec<usize>) -> Self {
		Waypoints(VecDeque::from(waypoints))
	}
	/// Get the grid box currently being headed for
	pub fn current(&self) -> Option<usize> {
		self.0.front().copied()
	}
	/// The current waypoint has been reached, drop it and return the next one
	pub fn advance(&mut self) -> Option<usize> {
		self.0.pop_front();
		self.current()
	}
	/// Have all waypoints been reached
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
	/// Number of waypoints left
	pub fn len(&self) -> usize {
		self.0.len()
	}
	/// Get a reference to the remaining waypoints
	pub fn get(&self) -> &VecDeque<usize> {
		&self.0
	}
	/// Cardinal heading from the grid box `from` toward the current waypoint,
	/// [None] when there is no waypoint, the actor already stands on it or the
	/// two are not in a common row or column
	pub fn heading(&self, columns: usize, from: usize) -> Option<Ordinal> {
		let target = self.current()?;
		if columns == 0 || target == from {
			return None;
		}
		let (target_row, target_column) = (target / columns, target % columns);
		let (from_row, from_column) = (from / columns, from % columns);
		// first box stepped onto when heading straight for the waypoint
		let first_step = if target_row == from_row {
			if target_column > from_column {
				from + 1
			} else {
				from - 1
			}
		} else if target_column == from_column {
			if target_row > from_row {
				from + columns
			} else {
				from - columns
			}
		} else {
			return None;
		};
		Ordinal::cell_to_cell_direction(first_step, from, columns)
	}
}

/// Process [EventPathRequest] against the first [Grid] found and insert the
/// resulting [Waypoints] onto the requester. When no path can be made any
/// stale [Waypoints] are removed so the actor stays where it is
#[cfg(not(tarpaulin_include))]
pub fn process_path_requests(
	mut events: EventReader<EventPathRequest>,
	grids: Query<&Grid>,
	mut finder: Local<PathFinder>,
	mut commands: Commands,
) {
	// several actors may send requests at once, only the latest request of
	// each requester is worth answering
	let mut latest: Vec<EventPathRequest> = Vec::new();
	for event in events.read() {
		match latest
			.iter_mut()
			.find(|r| r.get_requester() == event.get_requester())
		{
			Some(request) => *request = *event,
			None => latest.push(*event),
		}
	}
	if latest.is_empty() {
		return;
	}
	let Some(grid) = grids.iter().next() else {
		warn!("Path requests received but there is no Grid to search");
		return;
	};
	for request in latest.iter() {
		let Ok(mut entity) = commands.get_entity(request.get_requester()) else {
			debug!("Requester {:?} no longer exists", request.get_requester());
			continue;
		};
		match finder.find_naturalized_path(grid, request.get_from(), request.get_to()) {
			Ok(waypoints) => {
				trace!(
					"Waypoints for {:?}: {:?}",
					request.get_requester(),
					waypoints
				);
				entity.insert(Waypoints::new(waypoints));
			}
			Err(e @ PathError::NoPathFound { .. }) => {
				debug!("{}", e);
				entity.remove::<Waypoints>();
			}
			Err(e @ PathError::InvalidEndpoint { .. }) => {
				warn!("{}", e);
				entity.remove::<Waypoints>();
			}
		}
	}
}
