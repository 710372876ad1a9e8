//! A* pathfinding on a 2D grid
//!
//! Grid-based navigation for forager agents. Searches are deterministic:
//! frontier ties are broken by accumulated cost, then by insertion order, so
//! the same query on the same grid always yields the same path.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use glam::Vec2;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::ai::Path;

/// A 2D navigation grid
#[derive(Debug, Clone)]
pub struct Grid {
    /// Width in cells
    pub width: usize,
    /// Height in cells
    pub height: usize,
    /// Cell size in world units
    pub cell_size: f32,
    /// Walkable cells (true = walkable)
    cells: Vec<bool>,
    /// World origin offset
    pub origin: Vec2,
}

impl Grid {
    /// Create a new grid (all cells walkable by default)
    #[must_use]
    pub fn new(width: usize, height: usize, cell_size: f32) -> Self {
        Self {
            width,
            height,
            cell_size,
            cells: vec![true; width * height],
            origin: Vec2::ZERO,
        }
    }

    /// Set a cell's walkability
    pub fn set_walkable(&mut self, x: usize, y: usize, walkable: bool) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = walkable;
        }
    }

    /// Check if a cell is walkable
    #[must_use]
    pub fn is_walkable(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y * self.width + x]
    }

    /// Check if a world position falls on a walkable cell
    #[must_use]
    pub fn is_walkable_world(&self, pos: Vec2) -> bool {
        let (x, y) = self.world_to_grid(pos);
        x >= 0 && y >= 0 && self.is_walkable(x as usize, y as usize)
    }

    /// Convert world position to grid coordinates
    #[must_use]
    pub fn world_to_grid(&self, pos: Vec2) -> (i32, i32) {
        let local = pos - self.origin;
        (
            (local.x / self.cell_size).floor() as i32,
            (local.y / self.cell_size).floor() as i32,
        )
    }

    /// Convert grid coordinates to world position (center of cell)
    #[must_use]
    pub fn grid_to_world(&self, x: usize, y: usize) -> Vec2 {
        self.origin
            + Vec2::new(
                (x as f32 + 0.5) * self.cell_size,
                (y as f32 + 0.5) * self.cell_size,
            )
    }

    /// World-space lower bound of the grid
    #[must_use]
    pub fn world_min(&self) -> Vec2 {
        self.origin
    }

    /// World-space upper bound of the grid
    #[must_use]
    pub fn world_max(&self) -> Vec2 {
        self.origin
            + Vec2::new(
                self.width as f32 * self.cell_size,
                self.height as f32 * self.cell_size,
            )
    }

    /// Estimated traversal cost between two world positions, in cell steps.
    ///
    /// This is the same Manhattan measure the search heuristic uses, so it
    /// never overestimates the true cost of a 4-connected route.
    #[must_use]
    pub fn estimate_cost(&self, from: Vec2, to: Vec2) -> f32 {
        let (fx, fy) = self.world_to_grid(from);
        let (tx, ty) = self.world_to_grid(to);
        ((fx - tx).abs() + (fy - ty).abs()) as f32
    }

    /// Get neighbors of a cell (4-directional)
    fn neighbors(&self, x: usize, y: usize) -> SmallVec<[(usize, usize); 4]> {
        let mut result = SmallVec::new();

        if x > 0 && self.is_walkable(x - 1, y) {
            result.push((x - 1, y));
        }
        if x + 1 < self.width && self.is_walkable(x + 1, y) {
            result.push((x + 1, y));
        }
        if y > 0 && self.is_walkable(x, y - 1) {
            result.push((x, y - 1));
        }
        if y + 1 < self.height && self.is_walkable(x, y + 1) {
            result.push((x, y + 1));
        }

        result
    }
}

/// A* node for the priority queue
#[derive(Debug, Clone)]
struct Node {
    x: usize,
    y: usize,
    /// Cost from start
    g_cost: f32,
    /// g_cost + heuristic
    f_cost: f32,
    /// Insertion order, the final tie-break key
    seq: u64,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on every key so the max-heap pops the smallest f,
        // then the smallest g, then the earliest insertion.
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
            .then(
                other
                    .g_cost
                    .partial_cmp(&self.g_cost)
                    .unwrap_or(Ordering::Equal),
            )
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Errors that can occur during path search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The frontier emptied before reaching the goal: the goal is outside
    /// the grid, on a blocked cell, or walled off from the start.
    NotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "no path to goal"),
        }
    }
}

impl std::error::Error for PathError {}

/// Find a path using the A* algorithm.
///
/// The returned path starts at the start cell's center and ends exactly at
/// `goal`. Intermediate waypoints are cell centers of a 4-connected route.
///
/// # Errors
///
/// Returns [`PathError::NotFound`] when either endpoint is outside the grid
/// or blocked, or when no connected route exists.
pub fn find_path(grid: &Grid, start: Vec2, goal: Vec2) -> Result<Path, PathError> {
    let (start_x, start_y) = grid.world_to_grid(start);
    let (goal_x, goal_y) = grid.world_to_grid(goal);

    if start_x < 0 || start_y < 0 || goal_x < 0 || goal_y < 0 {
        return Err(PathError::NotFound);
    }

    let start_x = start_x as usize;
    let start_y = start_y as usize;
    let goal_x = goal_x as usize;
    let goal_y = goal_y as usize;

    if !grid.is_walkable(start_x, start_y) || !grid.is_walkable(goal_x, goal_y) {
        return Err(PathError::NotFound);
    }

    // Goal within the start cell: the discretization treats this as arrived.
    if start_x == goal_x && start_y == goal_y {
        return Ok(Path::direct(goal));
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: FxHashMap<(usize, usize), (usize, usize)> = FxHashMap::default();
    let mut g_score: FxHashMap<(usize, usize), f32> = FxHashMap::default();
    let mut seq: u64 = 0;

    let heuristic = |x: usize, y: usize| -> f32 {
        let dx = (x as f32 - goal_x as f32).abs();
        let dy = (y as f32 - goal_y as f32).abs();
        dx + dy // Manhattan distance
    };

    g_score.insert((start_x, start_y), 0.0);
    open_set.push(Node {
        x: start_x,
        y: start_y,
        g_cost: 0.0,
        f_cost: heuristic(start_x, start_y),
        seq,
    });

    while let Some(current) = open_set.pop() {
        if current.x == goal_x && current.y == goal_y {
            return Ok(reconstruct(grid, &came_from, (goal_x, goal_y), goal));
        }

        // Stale entry from an earlier, more expensive route to this cell.
        if current.g_cost > *g_score.get(&(current.x, current.y)).unwrap_or(&f32::MAX) {
            continue;
        }

        for (nx, ny) in grid.neighbors(current.x, current.y) {
            let tentative_g = current.g_cost + 1.0;

            if tentative_g < *g_score.get(&(nx, ny)).unwrap_or(&f32::MAX) {
                came_from.insert((nx, ny), (current.x, current.y));
                g_score.insert((nx, ny), tentative_g);

                seq += 1;
                open_set.push(Node {
                    x: nx,
                    y: ny,
                    g_cost: tentative_g,
                    f_cost: tentative_g + heuristic(nx, ny),
                    seq,
                });
            }
        }
    }

    Err(PathError::NotFound)
}

/// Walk the back-pointers into a waypoint list, snapping the final waypoint
/// onto the exact goal position.
fn reconstruct(
    grid: &Grid,
    came_from: &FxHashMap<(usize, usize), (usize, usize)>,
    goal_cell: (usize, usize),
    goal: Vec2,
) -> Path {
    let mut cells = vec![goal_cell];
    let mut curr = goal_cell;

    while let Some(&prev) = came_from.get(&curr) {
        cells.push(prev);
        curr = prev;
    }

    cells.reverse();

    let mut waypoints: Vec<Vec2> = cells
        .iter()
        .map(|&(x, y)| grid.grid_to_world(x, y))
        .collect();
    if let Some(last) = waypoints.last_mut() {
        *last = goal;
    }

    Path::new(waypoints)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_pathfinding() {
        let mut grid = Grid::new(10, 10, 1.0);

        // Create a wall
        for y in 2..8 {
            grid.set_walkable(5, y, false);
        }

        let path = find_path(&grid, Vec2::new(2.5, 5.5), Vec2::new(8.5, 5.5)).unwrap();

        assert!(path.len() > 7); // Must go around the wall
        assert_eq!(path.destination(), Vec2::new(8.5, 5.5));
    }

    #[test]
    fn test_direct_path() {
        let grid = Grid::new(10, 10, 1.0);

        let path = find_path(&grid, Vec2::new(0.5, 0.5), Vec2::new(3.5, 0.5)).unwrap();

        assert_eq!(path.len(), 4); // 4 cells in a line
        assert_eq!(path.waypoint(0), Some(Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn test_no_path() {
        let mut grid = Grid::new(5, 5, 1.0);

        // Block everything around the goal
        grid.set_walkable(3, 2, false);
        grid.set_walkable(3, 4, false);
        grid.set_walkable(2, 3, false);
        grid.set_walkable(4, 3, false);

        let result = find_path(&grid, Vec2::new(0.5, 0.5), Vec2::new(3.5, 3.5));

        assert_eq!(result, Err(PathError::NotFound));
    }

    #[test]
    fn test_goal_outside_grid() {
        let grid = Grid::new(5, 5, 1.0);

        let result = find_path(&grid, Vec2::new(0.5, 0.5), Vec2::new(-2.0, 1.0));
        assert_eq!(result, Err(PathError::NotFound));

        let result = find_path(&grid, Vec2::new(0.5, 0.5), Vec2::new(20.0, 1.0));
        assert_eq!(result, Err(PathError::NotFound));
    }

    #[test]
    fn test_endpoint_properties() {
        let grid = Grid::new(16, 16, 2.0);
        let start = Vec2::new(1.2, 1.7);
        let goal = Vec2::new(29.0, 30.5);

        let path = find_path(&grid, start, goal).unwrap();

        // First waypoint is the start cell's center, last is the exact goal.
        let first = path.waypoint(0).unwrap();
        assert!(first.distance(start) <= grid.cell_size);
        assert_eq!(path.destination(), goal);
    }

    #[test]
    fn test_search_is_deterministic() {
        let mut grid = Grid::new(12, 12, 1.0);
        for y in 3..9 {
            grid.set_walkable(6, y, false);
        }
        let start = Vec2::new(1.5, 6.5);
        let goal = Vec2::new(10.5, 6.5);

        // Equal-cost detours exist on both sides of the wall; the tie-break
        // must pick the same one every time.
        let a = find_path(&grid, start, goal).unwrap();
        let b = find_path(&grid, start, goal).unwrap();

        assert_eq!(a.waypoints(), b.waypoints());
    }

    #[test]
    fn test_same_cell_start_and_goal() {
        let grid = Grid::new(5, 5, 1.0);

        let path = find_path(&grid, Vec2::new(2.1, 2.1), Vec2::new(2.9, 2.9)).unwrap();

        assert_eq!(path.len(), 1);
        assert_eq!(path.destination(), Vec2::new(2.9, 2.9));
    }

    #[test]
    fn test_estimate_cost_matches_heuristic() {
        let grid = Grid::new(10, 10, 1.0);

        let cost = grid.estimate_cost(Vec2::new(0.5, 0.5), Vec2::new(4.5, 3.5));
        assert!((cost - 7.0).abs() < f32::EPSILON);
    }
}
