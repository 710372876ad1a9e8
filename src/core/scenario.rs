//! Scenario serialization and deserialization
//!
//! Food and nest placement are inputs to the simulation, not something it
//! invents. A `Scenario` captures one world layout and round-trips through
//! RON (Rusty Object Notation) or JSON so hosts and tests can share setups.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A food placement in a scenario
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FoodSpawn {
    /// World position
    pub position: Vec2,
    /// Units the source starts with
    pub size: u32,
}

/// A serializable world layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name
    pub name: String,
    /// Scenario version for compatibility
    pub version: u32,
    /// Nest position; ants spawn here
    pub nest: Vec2,
    /// Number of ants to spawn
    pub ants: u32,
    /// Food placements
    pub foods: Vec<FoodSpawn>,
    /// Blocked navigation cells
    #[serde(default)]
    pub walls: Vec<(u32, u32)>,
}

impl Scenario {
    /// Create an empty scenario around a nest position
    #[must_use]
    pub fn new(name: impl Into<String>, nest: Vec2) -> Self {
        Self {
            name: name.into(),
            version: 1,
            nest,
            ants: 0,
            foods: Vec::new(),
            walls: Vec::new(),
        }
    }

    /// Add a food placement
    pub fn add_food(&mut self, position: Vec2, size: u32) -> &mut Self {
        self.foods.push(FoodSpawn { position, size });
        self
    }

    /// Block a navigation cell
    pub fn add_wall(&mut self, x: u32, y: u32) -> &mut Self {
        self.walls.push((x, y));
        self
    }

    /// Save the scenario to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), ScenarioError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ScenarioError::SerializeError(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| ScenarioError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load a scenario from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let content =
            fs::read_to_string(path).map_err(|e| ScenarioError::IoError(e.to_string()))?;
        let scenario: Scenario =
            ron::from_str(&content).map_err(|e| ScenarioError::DeserializeError(e.to_string()))?;
        Ok(scenario)
    }

    /// Save the scenario to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ScenarioError> {
        let json_string = serde_json::to_string_pretty(self)
            .map_err(|e| ScenarioError::SerializeError(e.to_string()))?;
        fs::write(path, json_string).map_err(|e| ScenarioError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load a scenario from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let content =
            fs::read_to_string(path).map_err(|e| ScenarioError::IoError(e.to_string()))?;
        let scenario: Scenario = serde_json::from_str(&content)
            .map_err(|e| ScenarioError::DeserializeError(e.to_string()))?;
        Ok(scenario)
    }

    /// Total food units across all placements
    #[must_use]
    pub fn total_food(&self) -> u32 {
        self.foods.iter().map(|f| f.size).sum()
    }
}

/// Errors that can occur during scenario operations
#[derive(Debug, Clone)]
pub enum ScenarioError {
    /// IO error
    IoError(String),
    /// Serialization error
    SerializeError(String),
    /// Deserialization error
    DeserializeError(String),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
        }
    }
}

impl std::error::Error for ScenarioError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_serialization_ron() {
        let mut scenario = Scenario::new("Test Meadow", Vec2::new(10.0, 10.0));
        scenario.ants = 4;
        scenario.add_food(Vec2::new(30.0, 25.0), 12);
        scenario.add_wall(15, 15);

        let ron_str =
            ron::ser::to_string_pretty(&scenario, ron::ser::PrettyConfig::default()).unwrap();
        assert!(ron_str.contains("Test Meadow"));

        let loaded: Scenario = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded.name, "Test Meadow");
        assert_eq!(loaded.ants, 4);
        assert_eq!(loaded.foods.len(), 1);
        assert_eq!(loaded.walls, vec![(15, 15)]);
        assert_eq!(loaded.total_food(), 12);
    }

    #[test]
    fn test_scenario_serialization_json() {
        let mut scenario = Scenario::new("JSON Meadow", Vec2::ZERO);
        scenario.ants = 1;
        scenario.add_food(Vec2::new(5.0, 5.0), 3);

        let json_str = serde_json::to_string(&scenario).unwrap();

        let loaded: Scenario = serde_json::from_str(&json_str).unwrap();
        assert_eq!(loaded.name, "JSON Meadow");
        assert_eq!(loaded.nest, Vec2::ZERO);
        assert_eq!(loaded.foods[0].size, 3);
    }

    #[test]
    fn test_walls_default_to_empty() {
        let json = r#"{"name":"bare","version":1,"nest":[0.0,0.0],"ants":0,"foods":[]}"#;

        let loaded: Scenario = serde_json::from_str(json).unwrap();

        assert!(loaded.walls.is_empty());
    }
}
