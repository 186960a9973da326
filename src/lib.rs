//! This is a plugin for Bevy game engine to setup and handle the logic for pathfinding across a grid of boxes
//!

pub mod bundle;
pub mod gridboxes;
pub mod plugin;

pub mod prelude;
