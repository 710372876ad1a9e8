//! Agent behavior and navigation module
//!
//! Provides A* pathfinding, a wander-path generator, the creature movement
//! primitive, and the forager state machine.

mod behavior;
mod creature;
mod path;
mod pathfinding;
mod wander;

pub use behavior::{
    Ant, AntParams, FoodItem, ForageError, ForageState, Forager, Surroundings, select_food,
};
pub use creature::Creature;
pub use path::Path;
pub use pathfinding::{Grid, PathError, find_path};
pub use wander::wander;
