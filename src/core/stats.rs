//! Simulation statistics

/// Running counters for a simulation
#[derive(Debug, Clone, Copy, Default)]
pub struct SimStats {
    ticks: u64,
    paths_planned: u64,
    paths_failed: u64,
    wander_paths: u64,
    food_collected: u64,
    food_delivered: u64,
}

impl SimStats {
    /// Create a zeroed counter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Successful pathfinder routes
    pub fn paths_planned(&self) -> u64 {
        self.paths_planned
    }

    /// Failed pathfinder routes
    pub fn paths_failed(&self) -> u64 {
        self.paths_failed
    }

    /// Wander paths generated
    pub fn wander_paths(&self) -> u64 {
        self.wander_paths
    }

    /// Food units picked up from sources
    pub fn food_collected(&self) -> u64 {
        self.food_collected
    }

    /// Food units delivered to the nest
    pub fn food_delivered(&self) -> u64 {
        self.food_delivered
    }

    pub(crate) fn record_tick(&mut self) {
        self.ticks += 1;
    }

    pub(crate) fn record_path_planned(&mut self) {
        self.paths_planned += 1;
    }

    pub(crate) fn record_path_failed(&mut self) {
        self.paths_failed += 1;
    }

    pub(crate) fn record_wander(&mut self) {
        self.wander_paths += 1;
    }

    pub(crate) fn record_collected(&mut self, amount: u32) {
        self.food_collected += u64::from(amount);
    }

    pub(crate) fn record_delivered(&mut self, amount: u32) {
        self.food_delivered += u64::from(amount);
    }
}
