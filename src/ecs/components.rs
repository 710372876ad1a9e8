//! Common ECS components

use glam::Vec2;

/// World-space position component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

impl Position {
    /// Create a position from coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// A harvestable pile of food
#[derive(Debug, Clone, Copy)]
pub struct FoodSource {
    remaining: u32,
}

impl FoodSource {
    /// Create a food source holding `size` units
    pub fn new(size: u32) -> Self {
        Self { remaining: size }
    }

    /// Units left to take
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// True once every unit has been taken
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Take up to `amount` units, returning how many were actually taken
    pub fn take(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.remaining);
        self.remaining -= taken;
        taken
    }
}

/// The colony's home, accumulating delivered food
#[derive(Debug, Clone, Copy, Default)]
pub struct Nest {
    stored: u32,
}

impl Nest {
    /// Create an empty nest
    pub fn new() -> Self {
        Self::default()
    }

    /// Total food delivered so far
    pub fn stored(&self) -> u32 {
        self.stored
    }

    /// Add delivered food to the running total
    pub fn deposit(&mut self, amount: u32) {
        self.stored += amount;
    }
}

/// Name component for debugging
#[derive(Debug, Clone)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_source_take_clamps() {
        let mut food = FoodSource::new(3);

        assert_eq!(food.take(2), 2);
        assert_eq!(food.take(5), 1);
        assert_eq!(food.take(1), 0);
        assert!(food.is_exhausted());
    }

    #[test]
    fn test_nest_accumulates() {
        let mut nest = Nest::new();
        nest.deposit(2);
        nest.deposit(3);

        assert_eq!(nest.stored(), 5);
    }
}
