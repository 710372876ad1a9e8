//! Core simulation module
//!
//! Contains the simulation driver, configuration, scenarios, events and
//! statistics

mod config;
mod events;
mod scenario;
mod sim;
mod stats;

pub use config::{ConfigError, SimConfig};
pub use events::{EventQueue, SimEvent};
pub use scenario::{FoodSpawn, Scenario, ScenarioError};
pub use sim::Simulation;
pub use stats::SimStats;
