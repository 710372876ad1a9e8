//! A 2D ant-colony foraging simulation core
//!
//! This crate provides:
//! - A* pathfinding over a walkability grid
//! - Forager agents with a wander / seek-food / return-home state machine
//! - Entity storage built on hecs for food and nest entities
//! - A deterministic, tick-driven simulation loop with seedable randomness
//!
//! Rendering, input handling and the outer game loop belong to the host;
//! the simulation exposes agent positions, path waypoints and an event
//! queue for it to consume.

pub mod ai;
pub mod core;
pub mod ecs;

// Re-exports for convenience
pub use glam;
pub use hecs;
pub use rand;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::ai::{
        Ant, AntParams, Creature, FoodItem, ForageError, ForageState, Forager, Grid, Path,
        PathError, Surroundings, find_path, wander,
    };
    pub use crate::core::{
        ConfigError, EventQueue, Scenario, ScenarioError, SimConfig, SimEvent, SimStats,
        Simulation,
    };
    pub use crate::ecs::{FoodSource, Name, Nest, Position, World};
    pub use glam::Vec2;
}
