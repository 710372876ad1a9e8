//! Forager behavior state machine
//!
//! Drives an ant through its foraging loop: wander idly, seek out food,
//! carry it home, repeat. The state is a single enum so contradictory
//! intents are unrepresentable, and every interaction with the outside
//! world goes through the narrow [`Surroundings`] trait.
//!
//! # Tick order
//!
//! Each [`Ant::advance`] call evaluates, in order:
//!
//! 1. Harvest food in contact (while seeking, below capacity)
//! 2. Full load forces `Returning`
//! 3. Contact with the nest deposits the load and restarts `SeekingFood`
//! 4. The state's movement branch requests a path if one is needed
//! 5. Exactly one movement step

use std::fmt;

use glam::Vec2;

use crate::ai::{Creature, Path, PathError};

// ============================================================================
// State
// ============================================================================

/// The forager's current intent. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForageState {
    /// Drifting toward random nearby points.
    #[default]
    Wandering,
    /// Heading for a chosen food source.
    SeekingFood,
    /// Carrying food back to the nest.
    Returning,
}

impl ForageState {
    /// State name for logging and debugging.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Wandering => "Wandering",
            Self::SeekingFood => "SeekingFood",
            Self::Returning => "Returning",
        }
    }
}

impl fmt::Display for ForageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Surroundings
// ============================================================================

/// A food source as seen by a forager.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodItem {
    /// Handle for take-food commands
    pub id: hecs::Entity,
    /// World position
    pub position: Vec2,
    /// Units left to take
    pub remaining: u32,
}

/// The narrow world interface the behavior core runs against.
///
/// Foragers never touch entity storage, the grid, or the random source
/// directly; the simulation driver implements this trait over all of them.
/// Tests substitute a hand-rolled double.
pub trait Surroundings {
    /// Snapshot of the food currently available, in a stable order.
    fn visible_food(&self) -> Vec<FoodItem>;

    /// Take up to `amount` units from a food source.
    ///
    /// Returns `(taken, remaining)`; `taken` is zero if the source is
    /// already gone.
    fn take_food(&mut self, food: hecs::Entity, amount: u32) -> (u32, u32);

    /// Home nest position.
    fn nest_position(&self) -> Vec2;

    /// Deposit food units at the nest.
    fn deposit(&mut self, amount: u32);

    /// Plan a route between two points.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotFound`] when no route exists; callers treat
    /// this as "stay put and retry next tick", never as fatal.
    fn plan_route(&mut self, from: Vec2, to: Vec2) -> Result<Path, PathError>;

    /// Produce a short random path for idle movement. Never fails.
    fn wander_route(&mut self, from: Vec2) -> Path;

    /// Estimated traversal cost between two points, for target scoring.
    fn route_cost(&self, from: Vec2, to: Vec2) -> f32;

    /// Uniform random value in `[0, 1)` from the shared simulation source.
    fn random_unit(&mut self) -> f32;
}

// ============================================================================
// Errors
// ============================================================================

/// Errors produced while choosing a forage target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForageError {
    /// No food exists anywhere; the forager falls back to wandering.
    NoTargetAvailable,
}

impl fmt::Display for ForageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTargetAvailable => write!(f, "no food available to target"),
        }
    }
}

impl std::error::Error for ForageError {}

// ============================================================================
// Forager
// ============================================================================

/// Behavior-side state of an ant: intent plus the carried-food counter.
#[derive(Debug, Clone, Copy)]
pub struct Forager {
    state: ForageState,
    carried: u32,
    max_carry: u32,
}

impl Forager {
    /// Create a forager in `initial` state with the given carry capacity.
    #[must_use]
    pub fn new(initial: ForageState, max_carry: u32) -> Self {
        Self {
            state: initial,
            carried: 0,
            max_carry,
        }
    }

    /// Current intent.
    #[must_use]
    pub fn state(&self) -> ForageState {
        self.state
    }

    /// Food units currently carried. Always within `0..=max_carry`.
    #[must_use]
    pub fn carried(&self) -> u32 {
        self.carried
    }

    /// Carry capacity.
    #[must_use]
    pub fn max_carry(&self) -> u32 {
        self.max_carry
    }

    /// True when no more food can be picked up.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.carried >= self.max_carry
    }

    /// Units of capacity still free.
    #[must_use]
    pub fn free_capacity(&self) -> u32 {
        self.max_carry - self.carried
    }

    fn set_state(&mut self, state: ForageState) {
        if self.state != state {
            log::debug!("forager: {} -> {}", self.state, state);
            self.state = state;
        }
    }

    fn add_carried(&mut self, taken: u32) {
        self.carried = (self.carried + taken).min(self.max_carry);
    }

    fn drop_carried(&mut self) -> u32 {
        std::mem::take(&mut self.carried)
    }
}

// ============================================================================
// Target scoring
// ============================================================================

/// Choose the most attractive food source.
///
/// Score is `bonus + remaining + jitter − route cost`: larger and closer
/// food wins, with a random component so a crowd of foragers does not herd
/// onto a single source. Exhausted entries are skipped.
///
/// # Errors
///
/// Returns [`ForageError::NoTargetAvailable`] when no food remains anywhere.
pub fn select_food(
    from: Vec2,
    bonus: f32,
    jitter: f32,
    env: &mut impl Surroundings,
) -> Result<FoodItem, ForageError> {
    let mut best: Option<FoodItem> = None;
    let mut best_score = f32::NEG_INFINITY;

    for food in env.visible_food() {
        if food.remaining == 0 {
            continue;
        }
        let score =
            bonus + food.remaining as f32 + env.random_unit() * jitter - env.route_cost(from, food.position);
        if score > best_score {
            best_score = score;
            best = Some(food);
        }
    }

    best.ok_or(ForageError::NoTargetAvailable)
}

// ============================================================================
// Ant
// ============================================================================

/// Construction parameters for an ant
#[derive(Debug, Clone, Copy)]
pub struct AntParams {
    /// Movement per tick in world units
    pub step_size: f32,
    /// Starting behavior state
    pub initial_state: ForageState,
    /// Maximum food units carried
    pub max_carry: u32,
    /// Contact distance for food pickup and nest deposit
    pub interact_radius: f32,
    /// Distance at which a wandering ant notices food and resumes seeking
    pub sight_radius: f32,
    /// Flat bonus term in food target scoring
    pub score_bonus: f32,
    /// Scale of the random term in food target scoring
    pub score_jitter: f32,
}

impl Default for AntParams {
    fn default() -> Self {
        Self {
            step_size: 1.0,
            initial_state: ForageState::SeekingFood,
            max_carry: 1,
            interact_radius: 1.0,
            sight_radius: 30.0,
            score_bonus: 100.0,
            score_jitter: 50.0,
        }
    }
}

/// A foraging agent: movement primitive and behavior state, composed.
///
/// `Ant` owns a [`Creature`] for position and path-following and a
/// [`Forager`] for intent and cargo; `advance` wires the two together once
/// per tick. Neither half knows about the other.
#[derive(Debug, Clone)]
pub struct Ant {
    /// Movement: position, step size, current path.
    pub creature: Creature,
    /// Behavior: intent and carried food.
    pub forager: Forager,
    interact_radius: f32,
    sight_radius: f32,
    score_bonus: f32,
    score_jitter: f32,
}

impl Ant {
    /// Create an ant at `position`.
    #[must_use]
    pub fn new(position: Vec2, params: AntParams) -> Self {
        Self {
            creature: Creature::new(position, params.step_size),
            forager: Forager::new(params.initial_state, params.max_carry),
            interact_radius: params.interact_radius,
            sight_radius: params.sight_radius,
            score_bonus: params.score_bonus,
            score_jitter: params.score_jitter,
        }
    }

    /// Current world position.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.creature.position()
    }

    /// Current intent.
    #[must_use]
    pub fn state(&self) -> ForageState {
        self.forager.state()
    }

    /// Food units currently carried.
    #[must_use]
    pub fn carried(&self) -> u32 {
        self.forager.carried()
    }

    /// Run one behavior tick: transitions, path requests, one movement step.
    pub fn advance(&mut self, env: &mut impl Surroundings) {
        let position = self.creature.position();

        // Harvest anything in contact while seeking with free capacity.
        if self.forager.state() == ForageState::SeekingFood && !self.forager.is_full() {
            for food in env.visible_food() {
                if position.distance(food.position) > self.interact_radius {
                    continue;
                }
                let (taken, remaining) = env.take_food(food.id, self.forager.free_capacity());
                self.forager.add_carried(taken);
                if remaining == 0 && self.forager.carried() > 0 {
                    // The source ran dry under us; head home with what we have.
                    // An empty-handed ant keeps seeking instead.
                    self.forager.set_state(ForageState::Returning);
                }
                if self.forager.is_full() {
                    break;
                }
            }
        }

        // A full load always forces the trip home.
        if self.forager.is_full() {
            self.forager.set_state(ForageState::Returning);
        }

        // Deposit on nest contact.
        if self.forager.carried() > 0
            && position.distance(env.nest_position()) <= self.interact_radius
        {
            let load = self.forager.drop_carried();
            env.deposit(load);
            self.creature.clear_path();
            self.forager.set_state(ForageState::SeekingFood);
        }

        // A wanderer that drifts near food rejoins the forage loop.
        if self.forager.state() == ForageState::Wandering
            && self.creature.needs_path()
            && env
                .visible_food()
                .iter()
                .any(|food| position.distance(food.position) <= self.sight_radius)
        {
            self.forager.set_state(ForageState::SeekingFood);
        }

        // Movement branch for the (possibly just changed) state.
        match self.forager.state() {
            ForageState::Wandering => {
                if self.creature.needs_path() {
                    let path = env.wander_route(position);
                    self.creature.set_path(path);
                }
            }
            ForageState::SeekingFood => {
                if self.creature.needs_path() {
                    match select_food(position, self.score_bonus, self.score_jitter, env) {
                        Ok(target) => match env.plan_route(position, target.position) {
                            Ok(path) => self.creature.set_path(path),
                            // Unreachable target; stay put and retry next tick.
                            Err(PathError::NotFound) => self.creature.clear_path(),
                        },
                        Err(ForageError::NoTargetAvailable) => {
                            log::debug!("forager: no food anywhere, falling back to wandering");
                            self.forager.set_state(ForageState::Wandering);
                            let path = env.wander_route(position);
                            self.creature.set_path(path);
                        }
                    }
                }
            }
            ForageState::Returning => {
                let nest = env.nest_position();
                match env.plan_route(position, nest) {
                    Ok(path) => self.creature.set_path(path),
                    Err(PathError::NotFound) => self.creature.clear_path(),
                }
            }
        }

        self.creature.step();
    }
}

// ============================================================================
// Tests
// ============================================================================
