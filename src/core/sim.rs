//! Simulation driver
//!
//! Owns the world, the navigation grid, the agents and the one shared
//! random source, and advances everything in synchronous ticks. Each tick
//! processes every ant in spawn order: behavior transitions, path requests,
//! then exactly one movement step, all before the tick completes.

use glam::Vec2;
use hecs::Entity;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::ai::{
    Ant, AntParams, FoodItem, ForageState, Grid, Path, PathError, Surroundings, find_path, wander,
};
use crate::core::{ConfigError, EventQueue, Scenario, SimConfig, SimEvent, SimStats};
use crate::ecs::{FoodSource, Name, Nest, Position, World};

/// A tick-driven foraging simulation.
///
/// Hosts spawn the nest, food and ants, then call [`tick`](Simulation::tick)
/// once per frame and read positions, paths and events back out for
/// rendering. Runs with the same configuration and spawn sequence replay
/// identically.
pub struct Simulation {
    config: SimConfig,
    world: World,
    grid: Grid,
    ants: Vec<Ant>,
    rng: ChaCha8Rng,
    events: EventQueue,
    stats: SimStats,
}

impl Simulation {
    /// Create an empty simulation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for malformed configuration; this is the
    /// one failure treated as fatal, since it indicates a programming error
    /// rather than anything that can happen at runtime.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let columns = (config.world_width / config.cell_size).ceil() as usize;
        let rows = (config.world_height / config.cell_size).ceil() as usize;
        let grid = Grid::new(columns, rows, config.cell_size);

        log::info!(
            "simulation ready: {columns}x{rows} cells, seed {}",
            config.seed
        );

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            world: World::new(),
            grid,
            ants: Vec::new(),
            events: EventQueue::new(),
            stats: SimStats::new(),
            config,
        })
    }

    /// Create a simulation and populate it from a scenario.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for malformed configuration.
    pub fn from_scenario(config: SimConfig, scenario: &Scenario) -> Result<Self, ConfigError> {
        let mut sim = Self::new(config)?;
        sim.apply_scenario(scenario);
        Ok(sim)
    }

    /// Spawn the nest, food and ants a scenario describes.
    pub fn apply_scenario(&mut self, scenario: &Scenario) {
        for &(x, y) in &scenario.walls {
            self.grid.set_walkable(x as usize, y as usize, false);
        }
        self.spawn_nest(scenario.nest);
        for food in &scenario.foods {
            self.spawn_food(food.position, food.size);
        }
        for _ in 0..scenario.ants {
            self.spawn_ant(scenario.nest);
        }
        log::info!(
            "scenario '{}' loaded: {} ants, {} food units, {} walls",
            scenario.name,
            scenario.ants,
            scenario.total_food(),
            scenario.walls.len()
        );
    }

    /// Spawn the colony nest. Later spawns are ignored by nest lookups.
    pub fn spawn_nest(&mut self, position: Vec2) -> Entity {
        self.world
            .spawn((Position(position), Nest::new(), Name::new("nest")))
    }

    /// Spawn a food source holding `size` units.
    pub fn spawn_food(&mut self, position: Vec2, size: u32) -> Entity {
        self.world.spawn((Position(position), FoodSource::new(size)))
    }

    /// Spawn an ant, returning its spawn-order index.
    pub fn spawn_ant(&mut self, position: Vec2) -> usize {
        let initial_state = if self.config.start_seeking {
            ForageState::SeekingFood
        } else {
            ForageState::Wandering
        };
        self.ants.push(Ant::new(
            position,
            AntParams {
                step_size: self.config.step_size,
                initial_state,
                max_carry: self.config.max_carry,
                interact_radius: self.config.interact_radius,
                sight_radius: self.config.sight_radius,
                score_bonus: self.config.score_bonus,
                score_jitter: self.config.score_jitter,
            },
        ));
        self.ants.len() - 1
    }

    /// Advance the simulation by one tick.
    ///
    /// Every ant runs its behavior update and one movement step, in spawn
    /// order, within this single synchronous pass. Events emitted during
    /// the tick are published when it completes.
    pub fn tick(&mut self) {
        self.stats.record_tick();
        let nest = self.world.nest();

        let mut ants = std::mem::take(&mut self.ants);
        for (index, ant) in ants.iter_mut().enumerate() {
            let before = ant.state();

            let mut view = WorldView {
                world: &mut self.world,
                grid: &self.grid,
                rng: &mut self.rng,
                events: &mut self.events,
                stats: &mut self.stats,
                nest,
                wander_radius: self.config.wander_radius,
                ant: index,
            };
            ant.advance(&mut view);

            let after = ant.state();
            if after != before {
                self.events.push(SimEvent::StateChanged {
                    ant: index,
                    from: before,
                    to: after,
                });
            }
        }
        self.ants = ants;

        self.events.swap();
    }

    /// Active configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The navigation grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access, e.g. for hosts carving obstacles directly.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// The entity world holding food and nest.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// All ants in spawn order.
    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    /// Current position of every ant, in spawn order. For rendering.
    pub fn positions(&self) -> Vec<Vec2> {
        self.ants.iter().map(Ant::position).collect()
    }

    /// Events published by the most recent tick.
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Mutable event access for hosts that prefer draining.
    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Running counters.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Food accumulated in the nest so far.
    pub fn nest_total(&self) -> u32 {
        let Some((entity, _)) = self.world.nest() else {
            return 0;
        };
        self.world
            .get::<Nest>(entity)
            .map(|nest| nest.stored())
            .unwrap_or(0)
    }

    /// Food units still out in the world.
    pub fn food_remaining(&self) -> u32 {
        self.world.food_remaining()
    }
}

/// The narrow world view handed to each ant during its update.
///
/// Implements [`Surroundings`] over the entity world, the grid and the
/// shared random source, and records events and stats as a side channel.
struct WorldView<'a> {
    world: &'a mut World,
    grid: &'a Grid,
    rng: &'a mut ChaCha8Rng,
    events: &'a mut EventQueue,
    stats: &'a mut SimStats,
    nest: Option<(Entity, Vec2)>,
    wander_radius: f32,
    /// Spawn-order index of the ant being updated
    ant: usize,
}

impl Surroundings for WorldView<'_> {
    fn visible_food(&self) -> Vec<FoodItem> {
        self.world.food_items()
    }

    fn take_food(&mut self, food: Entity, amount: u32) -> (u32, u32) {
        let Ok(mut source) = self.world.get_mut::<FoodSource>(food) else {
            return (0, 0);
        };
        let taken = source.take(amount);
        let remaining = source.remaining();
        drop(source);

        if taken > 0 {
            self.stats.record_collected(taken);
            self.events.push(SimEvent::FoodPicked {
                ant: self.ant,
                food,
                amount: taken,
            });
        }
        if remaining == 0 {
            log::debug!("food source {food:?} exhausted");
            self.events.push(SimEvent::FoodExhausted { food });
            let _ = self.world.despawn(food);
        }

        (taken, remaining)
    }

    fn nest_position(&self) -> Vec2 {
        self.nest.map(|(_, position)| position).unwrap_or(Vec2::ZERO)
    }

    fn deposit(&mut self, amount: u32) {
        let Some((entity, _)) = self.nest else {
            return;
        };
        if let Ok(mut nest) = self.world.get_mut::<Nest>(entity) {
            nest.deposit(amount);
            let total = nest.stored();
            drop(nest);

            self.stats.record_delivered(amount);
            self.events.push(SimEvent::FoodDelivered {
                ant: self.ant,
                amount,
                total,
            });
        }
    }

    fn plan_route(&mut self, from: Vec2, to: Vec2) -> Result<Path, PathError> {
        match find_path(self.grid, from, to) {
            Ok(path) => {
                self.stats.record_path_planned();
                self.events.push(SimEvent::PathPlanned {
                    ant: self.ant,
                    waypoints: path.len(),
                });
                Ok(path)
            }
            Err(err) => {
                self.stats.record_path_failed();
                self.events.push(SimEvent::PathFailed { ant: self.ant });
                Err(err)
            }
        }
    }

    fn wander_route(&mut self, from: Vec2) -> Path {
        self.stats.record_wander();
        wander(from, self.grid, self.wander_radius, self.rng)
    }

    fn route_cost(&self, from: Vec2, to: Vec2) -> f32 {
        self.grid.estimate_cost(from, to)
    }

    fn random_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(seed: u64) -> SimConfig {
        SimConfig::default()
            .with_world_size(32.0, 32.0)
            .with_seed(seed)
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let result = Simulation::new(SimConfig::default().with_max_carry(0));
        assert!(matches!(result, Err(ConfigError::ZeroCarryCapacity)));
    }

    #[test]
    fn test_forage_cycle_end_to_end() {
        let mut sim = Simulation::new(small_config(1)).unwrap();
        sim.spawn_nest(Vec2::ZERO);
        sim.spawn_food(Vec2::new(10.0, 10.0), 5);
        sim.spawn_ant(Vec2::ZERO);

        for _ in 0..2000 {
            sim.tick();
            let ant = &sim.ants()[0];
            assert!(ant.carried() <= sim.config().max_carry);
            if sim.nest_total() == 5 {
                break;
            }
        }

        assert_eq!(sim.nest_total(), 5);
        assert_eq!(sim.food_remaining(), 0);
        assert_eq!(sim.stats().food_delivered(), 5);
        assert!(sim.world().food_items().is_empty());
        // The last delivery flips the ant back to seeking; with nothing left
        // it ends up wandering, never stalled.
        let state = sim.ants()[0].state();
        assert!(state == ForageState::Wandering || state == ForageState::SeekingFood);
    }

    #[test]
    fn test_same_seed_replays_identically() {
        let mut scenario = Scenario::new("replay", Vec2::new(16.0, 16.0));
        scenario.ants = 4;
        scenario.add_food(Vec2::new(4.0, 4.0), 6);
        scenario.add_food(Vec2::new(28.0, 25.0), 3);
        for y in 8..20 {
            scenario.add_wall(12, y);
        }

        let mut a = Simulation::from_scenario(small_config(99), &scenario).unwrap();
        let mut b = Simulation::from_scenario(small_config(99), &scenario).unwrap();

        for _ in 0..400 {
            a.tick();
            b.tick();
        }

        assert_eq!(a.nest_total(), b.nest_total());
        for (ant_a, ant_b) in a.ants().iter().zip(b.ants()) {
            assert_eq!(ant_a.position(), ant_b.position());
            assert_eq!(ant_a.state(), ant_b.state());
            assert_eq!(ant_a.carried(), ant_b.carried());
        }
    }

    #[test]
    fn test_no_food_world_keeps_ants_wandering_in_bounds() {
        let mut sim = Simulation::new(small_config(5)).unwrap();
        sim.spawn_nest(Vec2::new(16.0, 16.0));
        sim.spawn_ant(Vec2::new(16.0, 16.0));
        sim.spawn_ant(Vec2::new(16.0, 16.0));

        for _ in 0..300 {
            sim.tick();
        }

        for ant in sim.ants() {
            assert_eq!(ant.state(), ForageState::Wandering);
            let p = ant.position();
            assert!(p.x >= 0.0 && p.x <= 32.0);
            assert!(p.y >= 0.0 && p.y <= 32.0);
        }
        assert_eq!(sim.stats().paths_failed(), 0);
    }

    #[test]
    fn test_wandering_start_variant() {
        let config = small_config(3)
            .with_seeking_start(false)
            .with_sight_radius(5.0);
        let mut sim = Simulation::new(config).unwrap();
        sim.spawn_nest(Vec2::new(16.0, 16.0));
        sim.spawn_food(Vec2::new(4.0, 4.0), 2);
        sim.spawn_ant(Vec2::new(16.0, 16.0));

        sim.tick();

        // Out-of-sight food leaves the ant roaming.
        assert_eq!(sim.ants()[0].state(), ForageState::Wandering);
        assert!(sim.stats().wander_paths() > 0);
    }

    #[test]
    fn test_walled_off_food_is_retried_not_fatal() {
        let mut sim = Simulation::new(small_config(8)).unwrap();
        sim.spawn_nest(Vec2::new(4.0, 4.0));
        sim.spawn_food(Vec2::new(20.5, 20.5), 3);
        sim.spawn_ant(Vec2::new(4.0, 4.0));
        // Seal the food source inside a ring of walls.
        for x in 19..=21 {
            for y in 19..=21 {
                if (x, y) != (20, 20) {
                    sim.grid_mut().set_walkable(x, y, false);
                }
            }
        }

        for _ in 0..50 {
            sim.tick();
        }

        let ant = &sim.ants()[0];
        assert_eq!(ant.state(), ForageState::SeekingFood);
        assert_eq!(ant.carried(), 0);
        assert!(sim.stats().paths_failed() > 0);
        assert_eq!(sim.stats().paths_planned(), 0);
    }

    #[test]
    fn test_tick_publishes_events() {
        let mut sim = Simulation::new(small_config(2)).unwrap();
        sim.spawn_nest(Vec2::new(30.0, 30.0));
        sim.spawn_food(Vec2::new(0.5, 0.5), 4);
        sim.spawn_ant(Vec2::new(0.5, 0.5));

        sim.tick();

        let events: Vec<_> = sim.events().iter().collect();
        assert!(
            events
                .iter()
                .any(|e| matches!(e, SimEvent::FoodPicked { ant: 0, amount: 1, .. }))
        );
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::StateChanged {
                ant: 0,
                from: ForageState::SeekingFood,
                to: ForageState::Returning,
            }
        )));
    }

    #[test]
    fn test_positions_accessor_tracks_ants() {
        let mut sim = Simulation::new(small_config(4)).unwrap();
        sim.spawn_nest(Vec2::new(16.0, 16.0));
        sim.spawn_ant(Vec2::new(16.0, 16.0));
        sim.spawn_ant(Vec2::new(10.0, 10.0));

        let positions = sim.positions();

        assert_eq!(positions.len(), 2);
        assert_eq!(positions[1], Vec2::new(10.0, 10.0));
    }
}
