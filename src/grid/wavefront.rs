//! Multi-target wavefront pathfinding
//!
//! A wavefront is a multi-source breadth-first distance field: every target
//! cell sits at distance 0 and every reachable cell holds its BFS distance
//! to the nearest target. Paths are extracted by walking strictly downhill
//! through the field. Movement is 4-connected only; the downhill tie-break
//! is the lexicographically smallest `(y, x)` neighbor, so paths are fully
//! deterministic and tests can pin them exactly.

use std::collections::VecDeque;

use crate::core::types::Coordinate;
use crate::grid::tile::TileGrid;

/// Sentinel distance for unreachable cells
pub const UNREACHABLE: u32 = u32::MAX;

/// Dense per-tile distance field produced by [`wavefront_distances`]
#[derive(Debug, Clone)]
pub struct DistanceField {
    distances: Vec<u32>,
    width: i32,
    height: i32,
}

impl DistanceField {
    /// Distance at a coordinate, or [`UNREACHABLE`] outside the grid
    pub fn get(&self, coord: &Coordinate) -> u32 {
        if coord.x < 0 || coord.y < 0 || coord.x >= self.width || coord.y >= self.height {
            return UNREACHABLE;
        }
        self.distances[(coord.y * self.width + coord.x) as usize]
    }

    pub fn is_reachable(&self, coord: &Coordinate) -> bool {
        self.get(coord) != UNREACHABLE
    }
}

/// Compute the BFS distance field for a set of target tiles
///
/// Targets that are blocked or out of bounds are ignored. Each cell is
/// enqueued at most once: distances only ever decrease from the sentinel,
/// so the first write is the shortest.
pub fn wavefront_distances(grid: &TileGrid, targets: &[Coordinate]) -> DistanceField {
    let mut field = DistanceField {
        distances: vec![UNREACHABLE; grid.tile_count()],
        width: grid.width(),
        height: grid.height(),
    };

    let mut queue: VecDeque<Coordinate> = VecDeque::new();
    for target in targets {
        if !grid.is_walkable(target) {
            continue;
        }
        let idx = grid.index_of(target);
        if field.distances[idx] != UNREACHABLE {
            continue; // duplicate target
        }
        field.distances[idx] = 0;
        queue.push_back(*target);
    }

    while let Some(current) = queue.pop_front() {
        let next_dist = field.distances[grid.index_of(&current)] + 1;
        for neighbor in current.neighbors4() {
            if !grid.is_walkable(&neighbor) {
                continue;
            }
            let idx = grid.index_of(&neighbor);
            if field.distances[idx] == UNREACHABLE {
                field.distances[idx] = next_dist;
                queue.push_back(neighbor);
            }
        }
    }

    field
}

/// Best single step from `from` through the field, if any
///
/// Chooses the walkable neighbor with strictly smaller distance, breaking
/// ties by the smallest `(y, x)` coordinate. `Coordinate::cmp` is already
/// `(y, x)`, so a plain min over (distance, coordinate) pairs implements
/// the rule.
fn descend_step(grid: &TileGrid, field: &DistanceField, from: &Coordinate) -> Option<Coordinate> {
    let here = field.get(from);
    if here == UNREACHABLE || here == 0 {
        return None;
    }
    from.neighbors4()
        .into_iter()
        .filter(|n| grid.is_walkable(n))
        .map(|n| (field.get(&n), n))
        .filter(|(d, _)| *d < here)
        .min()
        .map(|(_, n)| n)
}

/// Full path from `start` to the nearest target
///
/// Returns an empty path when `start` is already a target, when there are
/// no targets, or when every target is unreachable. Otherwise the result
/// is the sequence of tiles stepped onto, excluding `start` and including
/// the final target; callers consume it incrementally.
pub fn find_path_to_nearest_target(
    grid: &TileGrid,
    start: Coordinate,
    targets: &[Coordinate],
) -> Vec<Coordinate> {
    if targets.is_empty() || targets.contains(&start) {
        return Vec::new();
    }

    let field = wavefront_distances(grid, targets);
    if !field.is_reachable(&start) {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut current = start;
    while let Some(next) = descend_step(grid, &field, &current) {
        path.push(next);
        current = next;
    }
    path
}

/// One shared distance field, one best next step per start
///
/// Optimization contract for the common case of many agents pathing toward
/// the same target set in one tick: behaviorally identical to calling
/// [`find_path_to_nearest_target`] per start and taking its first step.
pub fn batch_next_steps_by_wavefront(
    grid: &TileGrid,
    starts: &[Coordinate],
    targets: &[Coordinate],
) -> Vec<Option<Coordinate>> {
    if targets.is_empty() {
        return vec![None; starts.len()];
    }
    let field = wavefront_distances(grid, targets);
    starts
        .iter()
        .map(|start| {
            if targets.contains(start) {
                None
            } else {
                descend_step(grid, &field, start)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    fn grid_with_blocked(width: i32, height: i32, blocked: &[(i32, i32)]) -> TileGrid {
        let set: AHashSet<Coordinate> = blocked
            .iter()
            .map(|&(x, y)| Coordinate::new(x, y))
            .collect();
        TileGrid::new(width, height, set)
    }

    #[test]
    fn test_distance_field_single_target() {
        let grid = TileGrid::open(4, 4);
        let field = wavefront_distances(&grid, &[Coordinate::new(0, 0)]);
        assert_eq!(field.get(&Coordinate::new(0, 0)), 0);
        assert_eq!(field.get(&Coordinate::new(1, 0)), 1);
        assert_eq!(field.get(&Coordinate::new(3, 3)), 6);
    }

    #[test]
    fn test_distance_field_multi_source_takes_nearest() {
        let grid = TileGrid::open(10, 1);
        let targets = [Coordinate::new(0, 0), Coordinate::new(9, 0)];
        let field = wavefront_distances(&grid, &targets);
        assert_eq!(field.get(&Coordinate::new(2, 0)), 2);
        assert_eq!(field.get(&Coordinate::new(7, 0)), 2);
        assert_eq!(field.get(&Coordinate::new(4, 0)), 4);
    }

    #[test]
    fn test_blocked_targets_ignored() {
        let grid = grid_with_blocked(3, 3, &[(1, 1)]);
        let field = wavefront_distances(&grid, &[Coordinate::new(1, 1)]);
        // No valid source means nothing is reachable
        assert!(!field.is_reachable(&Coordinate::new(0, 0)));
    }

    #[test]
    fn test_wall_makes_cells_unreachable() {
        // Vertical wall splits a 3-wide corridor
        let grid = grid_with_blocked(3, 3, &[(1, 0), (1, 1), (1, 2)]);
        let field = wavefront_distances(&grid, &[Coordinate::new(0, 0)]);
        assert!(field.is_reachable(&Coordinate::new(0, 2)));
        assert!(!field.is_reachable(&Coordinate::new(2, 0)));
    }

    #[test]
    fn test_path_exact_straight_line() {
        let grid = TileGrid::open(5, 1);
        let path =
            find_path_to_nearest_target(&grid, Coordinate::new(0, 0), &[Coordinate::new(3, 0)]);
        assert_eq!(
            path,
            vec![
                Coordinate::new(1, 0),
                Coordinate::new(2, 0),
                Coordinate::new(3, 0)
            ]
        );
    }

    #[test]
    fn test_path_tie_break_prefers_smallest_y_then_x() {
        // From (1,1) toward target (1,1)->... both (1,0) and (0,1) descend
        // when the target is at (0,0); the (y,x) rule must pick (1,0).
        let grid = TileGrid::open(3, 3);
        let path =
            find_path_to_nearest_target(&grid, Coordinate::new(1, 1), &[Coordinate::new(0, 0)]);
        assert_eq!(
            path,
            vec![Coordinate::new(1, 0), Coordinate::new(0, 0)],
            "tie at equal distance must resolve to the smaller (y, x) neighbor"
        );
    }

    #[test]
    fn test_path_never_crosses_blocked_and_has_no_diagonals() {
        let grid = grid_with_blocked(5, 5, &[(2, 0), (2, 1), (2, 2), (2, 3)]);
        let start = Coordinate::new(0, 0);
        let path = find_path_to_nearest_target(&grid, start, &[Coordinate::new(4, 0)]);
        assert!(!path.is_empty());
        assert_eq!(path.last(), Some(&Coordinate::new(4, 0)));
        let mut prev = start;
        for step in &path {
            assert!(grid.is_walkable(step), "path crossed blocked tile {:?}", step);
            assert_eq!(
                (step.x - prev.x).abs() + (step.y - prev.y).abs(),
                1,
                "diagonal or non-adjacent step {:?} -> {:?}",
                prev,
                step
            );
            prev = *step;
        }
    }

    #[test]
    fn test_path_exact_around_wall() {
        // Wall at x=1 covering y=0..=1 forces the detour through y=2
        let grid = grid_with_blocked(3, 3, &[(1, 0), (1, 1)]);
        let path =
            find_path_to_nearest_target(&grid, Coordinate::new(0, 0), &[Coordinate::new(2, 0)]);
        assert_eq!(
            path,
            vec![
                Coordinate::new(0, 1),
                Coordinate::new(0, 2),
                Coordinate::new(1, 2),
                Coordinate::new(2, 2),
                Coordinate::new(2, 1),
                Coordinate::new(2, 0),
            ]
        );
    }

    #[test]
    fn test_path_empty_when_start_is_target() {
        let grid = TileGrid::open(3, 3);
        let start = Coordinate::new(1, 1);
        assert!(find_path_to_nearest_target(&grid, start, &[start]).is_empty());
    }

    #[test]
    fn test_path_empty_when_no_targets() {
        let grid = TileGrid::open(3, 3);
        assert!(find_path_to_nearest_target(&grid, Coordinate::new(1, 1), &[]).is_empty());
    }

    #[test]
    fn test_path_empty_when_unreachable() {
        let grid = grid_with_blocked(3, 1, &[(1, 0)]);
        let path =
            find_path_to_nearest_target(&grid, Coordinate::new(0, 0), &[Coordinate::new(2, 0)]);
        assert!(path.is_empty());
    }

    #[test]
    fn test_distance_at_start_matches_path_length() {
        let grid = grid_with_blocked(6, 6, &[(3, 0), (3, 1), (3, 2)]);
        let start = Coordinate::new(0, 0);
        let targets = [Coordinate::new(5, 0)];
        let field = wavefront_distances(&grid, &targets);
        let path = find_path_to_nearest_target(&grid, start, &targets);
        assert_eq!(field.get(&start) as usize, path.len());
    }

    #[test]
    fn test_batch_matches_per_start_first_step() {
        let grid = grid_with_blocked(6, 6, &[(2, 2), (2, 3), (3, 2)]);
        let targets = [Coordinate::new(5, 5), Coordinate::new(0, 4)];
        let starts = [
            Coordinate::new(0, 0),
            Coordinate::new(5, 0),
            Coordinate::new(0, 4), // already a target
            Coordinate::new(3, 3),
        ];
        let batch = batch_next_steps_by_wavefront(&grid, &starts, &targets);
        for (start, step) in starts.iter().zip(&batch) {
            let path = find_path_to_nearest_target(&grid, *start, &targets);
            assert_eq!(step, &path.first().copied(), "mismatch for start {:?}", start);
        }
    }

    #[test]
    fn test_batch_no_targets_yields_all_none() {
        let grid = TileGrid::open(3, 3);
        let starts = [Coordinate::new(0, 0), Coordinate::new(2, 2)];
        let batch = batch_next_steps_by_wavefront(&grid, &starts, &[]);
        assert_eq!(batch, vec![None, None]);
    }
}
