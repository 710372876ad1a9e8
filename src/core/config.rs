//! Simulation configuration and validation

/// Simulation configuration
///
/// Built with `Default` plus `with_*` methods; validated once by
/// [`Simulation::new`](crate::core::Simulation::new). A malformed
/// configuration is a programming error and refuses to start, it is never
/// patched up silently.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// World width in units
    pub world_width: f32,
    /// World height in units
    pub world_height: f32,
    /// Navigation cell size in world units
    pub cell_size: f32,
    /// Agent movement per tick in world units
    pub step_size: f32,
    /// Maximum food units an ant can carry
    pub max_carry: u32,
    /// Contact distance for food pickup and nest deposit
    pub interact_radius: f32,
    /// Distance at which a wandering ant notices food and resumes seeking
    pub sight_radius: f32,
    /// Maximum distance of a wander destination
    pub wander_radius: f32,
    /// Flat bonus term in food target scoring
    pub score_bonus: f32,
    /// Scale of the random term in food target scoring
    pub score_jitter: f32,
    /// Ants start out seeking food; false starts them wandering
    pub start_seeking: bool,
    /// Seed for the shared random source
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: 128.0,
            world_height: 128.0,
            cell_size: 1.0,
            step_size: 1.0,
            max_carry: 1,
            interact_radius: 1.0,
            sight_radius: 30.0,
            wander_radius: 10.0,
            score_bonus: 100.0,
            score_jitter: 50.0,
            start_seeking: true,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Set world dimensions
    pub fn with_world_size(mut self, width: f32, height: f32) -> Self {
        self.world_width = width;
        self.world_height = height;
        self
    }

    /// Set the navigation cell size
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set movement per tick
    pub fn with_step_size(mut self, step_size: f32) -> Self {
        self.step_size = step_size;
        self
    }

    /// Set carry capacity
    pub fn with_max_carry(mut self, max_carry: u32) -> Self {
        self.max_carry = max_carry;
        self
    }

    /// Set the contact distance for pickups and deposits
    pub fn with_interact_radius(mut self, radius: f32) -> Self {
        self.interact_radius = radius;
        self
    }

    /// Set the food sight distance for wandering ants
    pub fn with_sight_radius(mut self, radius: f32) -> Self {
        self.sight_radius = radius;
        self
    }

    /// Set the wander destination radius
    pub fn with_wander_radius(mut self, radius: f32) -> Self {
        self.wander_radius = radius;
        self
    }

    /// Set the food scoring constants
    pub fn with_scoring(mut self, bonus: f32, jitter: f32) -> Self {
        self.score_bonus = bonus;
        self.score_jitter = jitter;
        self
    }

    /// Choose the initial behavior state variant
    pub fn with_seeking_start(mut self, seeking: bool) -> Self {
        self.start_seeking = seeking;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every field for sanity.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_width > 0.0 && self.world_width.is_finite())
            || !(self.world_height > 0.0 && self.world_height.is_finite())
        {
            return Err(ConfigError::InvalidWorldSize {
                width: self.world_width,
                height: self.world_height,
            });
        }
        if !(self.cell_size > 0.0 && self.cell_size.is_finite()) {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if !(self.step_size > 0.0 && self.step_size.is_finite()) {
            return Err(ConfigError::InvalidStepSize(self.step_size));
        }
        if self.max_carry == 0 {
            return Err(ConfigError::ZeroCarryCapacity);
        }
        if !(self.interact_radius > 0.0 && self.interact_radius.is_finite()) {
            return Err(ConfigError::InvalidRadius {
                name: "interact_radius",
                value: self.interact_radius,
            });
        }
        if !(self.sight_radius > 0.0 && self.sight_radius.is_finite()) {
            return Err(ConfigError::InvalidRadius {
                name: "sight_radius",
                value: self.sight_radius,
            });
        }
        if !(self.wander_radius > 0.0 && self.wander_radius.is_finite()) {
            return Err(ConfigError::InvalidRadius {
                name: "wander_radius",
                value: self.wander_radius,
            });
        }
        if !(self.score_jitter >= 0.0 && self.score_jitter.is_finite()) {
            return Err(ConfigError::InvalidScoreJitter(self.score_jitter));
        }
        Ok(())
    }
}

/// Errors reported for malformed configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// World dimensions must be positive and finite
    InvalidWorldSize { width: f32, height: f32 },
    /// Cell size must be positive and finite
    InvalidCellSize(f32),
    /// Step size must be positive and finite
    InvalidStepSize(f32),
    /// Carry capacity must be at least one
    ZeroCarryCapacity,
    /// A radius must be positive and finite
    InvalidRadius { name: &'static str, value: f32 },
    /// Score jitter must be non-negative and finite
    InvalidScoreJitter(f32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWorldSize { width, height } => {
                write!(f, "invalid world size {width}x{height}")
            }
            Self::InvalidCellSize(v) => write!(f, "invalid cell size {v}"),
            Self::InvalidStepSize(v) => write!(f, "invalid step size {v}"),
            Self::ZeroCarryCapacity => write!(f, "carry capacity must be at least 1"),
            Self::InvalidRadius { name, value } => write!(f, "invalid {name} {value}"),
            Self::InvalidScoreJitter(v) => write!(f, "invalid score jitter {v}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = SimConfig::default().with_max_carry(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroCarryCapacity));
    }

    #[test]
    fn test_negative_world_rejected() {
        let config = SimConfig::default().with_world_size(-10.0, 20.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWorldSize { .. })
        ));
    }

    #[test]
    fn test_nan_step_rejected() {
        let config = SimConfig::default().with_step_size(f32::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidStepSize(_))
        ));
    }
}
