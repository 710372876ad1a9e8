//! Creature movement primitive

use glam::Vec2;

use crate::ai::Path;

/// A moving body: position, step size, and the path it is following.
///
/// The creature advances at most one step-size increment per [`step`] call
/// and snaps onto waypoints rather than overshooting them. It never picks
/// its own destinations; behavior code supplies whole paths via
/// [`set_path`] and replaces them when a new destination is chosen.
///
/// [`step`]: Creature::step
/// [`set_path`]: Creature::set_path
#[derive(Debug, Clone)]
pub struct Creature {
    position: Vec2,
    step_size: f32,
    path: Option<Path>,
    /// Index of the next unreached waypoint in `path`.
    next_waypoint: usize,
}

impl Creature {
    /// Create a creature at `position` moving `step_size` units per tick.
    #[must_use]
    pub fn new(position: Vec2, step_size: f32) -> Self {
        Self {
            position,
            step_size,
            path: None,
            next_waypoint: 0,
        }
    }

    /// Current world position.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Movement per tick in world units.
    #[must_use]
    pub fn step_size(&self) -> f32 {
        self.step_size
    }

    /// The path currently being followed, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Replace the current path. The old one is discarded whole.
    pub fn set_path(&mut self, path: Path) {
        self.path = Some(path);
        self.next_waypoint = 0;
    }

    /// Drop the current path, leaving the creature idle.
    pub fn clear_path(&mut self) {
        self.path = None;
        self.next_waypoint = 0;
    }

    /// True when a path is set and its destination not yet reached.
    #[must_use]
    pub fn is_following_path(&self) -> bool {
        self.path
            .as_ref()
            .is_some_and(|path| self.next_waypoint < path.len())
    }

    /// True when the current path has been walked to its destination.
    ///
    /// False with no path set: an idle creature is not "at" anything.
    #[must_use]
    pub fn at_destination(&self) -> bool {
        self.path
            .as_ref()
            .is_some_and(|path| self.next_waypoint >= path.len())
    }

    /// True when a new path is needed to keep moving.
    #[must_use]
    pub fn needs_path(&self) -> bool {
        !self.is_following_path()
    }

    /// Advance along the path by at most one step-size increment.
    ///
    /// The step budget carries across waypoints reached mid-step, snapping
    /// onto each exactly; total movement per call never exceeds the step
    /// size. With no path, or with the destination already reached, this is
    /// a no-op; the caller must supply a new path to continue.
    pub fn step(&mut self) {
        let Some(path) = &self.path else {
            return;
        };

        let mut budget = self.step_size;
        while budget > 0.0 {
            let Some(target) = path.waypoint(self.next_waypoint) else {
                break;
            };

            let to_target = target - self.position;
            let distance = to_target.length();

            if distance <= budget {
                self.position = target;
                self.next_waypoint += 1;
                budget -= distance;
            } else {
                self.position += to_target * (budget / distance);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_without_path_is_noop() {
        let mut creature = Creature::new(Vec2::new(1.0, 2.0), 0.5);

        creature.step();

        assert_eq!(creature.position(), Vec2::new(1.0, 2.0));
        assert!(!creature.at_destination());
    }

    #[test]
    fn test_step_moves_at_most_step_size() {
        let mut creature = Creature::new(Vec2::ZERO, 1.0);
        creature.set_path(Path::direct(Vec2::new(10.0, 0.0)));

        creature.step();

        assert!((creature.position().x - 1.0).abs() < 1e-5);
        assert_eq!(creature.position().y, 0.0);
    }

    #[test]
    fn test_step_snaps_to_waypoint() {
        let mut creature = Creature::new(Vec2::ZERO, 1.0);
        creature.set_path(Path::direct(Vec2::new(0.3, 0.4)));

        creature.step();

        assert_eq!(creature.position(), Vec2::new(0.3, 0.4));
        assert!(creature.at_destination());
    }

    #[test]
    fn test_walks_multi_waypoint_path() {
        let mut creature = Creature::new(Vec2::ZERO, 1.0);
        creature.set_path(Path::new(vec![
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 1.0),
        ]));

        for _ in 0..3 {
            creature.step();
        }

        assert_eq!(creature.position(), Vec2::new(2.0, 1.0));
        assert!(creature.at_destination());

        // Further steps stay put until a new path arrives.
        creature.step();
        assert_eq!(creature.position(), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_set_path_resets_progress() {
        let mut creature = Creature::new(Vec2::ZERO, 1.0);
        creature.set_path(Path::direct(Vec2::new(0.5, 0.0)));
        creature.step();
        assert!(creature.at_destination());

        creature.set_path(Path::direct(Vec2::new(0.5, 0.5)));

        assert!(creature.is_following_path());
        assert!(!creature.at_destination());
    }
}
