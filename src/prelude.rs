//! `use bevy_gridbox_pathing_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::gridboxes::{
	astar::*, error::*, grid::*, gridbox::*, layout::*, line_of_sight::*, naturalize::*,
	obstruction::*, utilities::*, *,
};

#[doc(hidden)]
pub use crate::{
	bundle::*,
	plugin::{obstruction_layer::*, path_layer::*, *},
};
