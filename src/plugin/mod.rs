//! Defines the Bevy [Plugin] for GridBox pathing
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod obstruction_layer;
pub mod path_layer;

/// Obstruction changes are applied before any path request is answered
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	/// Apply [obstruction_layer::EventUpdateObstruction]s
	Obstruct,
	/// Answer [path_layer::EventPathRequest]s
	Calculate,
}

/// Registers the types, events and systems which handle grid box pathing
pub struct GridBoxPathingPlugin;

impl Plugin for GridBoxPathingPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<Ordinal>()
			.register_type::<GridBox>()
			.register_type::<Grid>()
			.register_type::<GridLayout>()
			.register_type::<Waypoints>()
			.add_event::<obstruction_layer::EventUpdateObstruction>()
			.add_event::<path_layer::EventPathRequest>()
			.configure_sets(Update, (OrderingSet::Obstruct, OrderingSet::Calculate).chain())
			.add_systems(
				Update,
				(
					obstruction_layer::process_obstruction_updates.in_set(OrderingSet::Obstruct),
					path_layer::process_path_requests.in_set(OrderingSet::Calculate),
				),
			);
	}
}
