//! Property tests for the engine's universal invariants

use ahash::AHashSet;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

use hearthvale::core::types::Coordinate;
use hearthvale::grid::{find_path_to_nearest_target, wavefront_distances, TileGrid};
use hearthvale::guild::GuildDispatcher;
use hearthvale::world::{Entity, EntityManager, ResourceEntity};

fn coord_strategy(width: i32, height: i32) -> impl Strategy<Value = Coordinate> {
    (0..width, 0..height).prop_map(|(x, y)| Coordinate::new(x, y))
}

fn grid_strategy() -> impl Strategy<Value = (TileGrid, Coordinate, Vec<Coordinate>)> {
    (4i32..12, 4i32..12).prop_flat_map(|(width, height)| {
        (
            proptest::collection::vec(coord_strategy(width, height), 0..20),
            coord_strategy(width, height),
            proptest::collection::vec(coord_strategy(width, height), 1..4),
        )
            .prop_map(move |(blocked, start, targets)| {
                let mut set: AHashSet<Coordinate> = blocked.into_iter().collect();
                set.remove(&start);
                (TileGrid::new(width, height, set), start, targets)
            })
    })
}

proptest! {
    #[test]
    fn path_never_crosses_blocked_tiles((grid, start, targets) in grid_strategy()) {
        let path = find_path_to_nearest_target(&grid, start, &targets);
        let mut prev = start;
        for step in &path {
            prop_assert!(grid.is_walkable(step), "step onto blocked tile {:?}", step);
            prop_assert_eq!(
                (step.x - prev.x).abs() + (step.y - prev.y).abs(),
                1,
                "non-orthogonal step"
            );
            prev = *step;
        }
        if let Some(last) = path.last() {
            prop_assert!(targets.contains(last));
        }
    }

    #[test]
    fn path_length_matches_distance_field((grid, start, targets) in grid_strategy()) {
        let field = wavefront_distances(&grid, &targets);
        let path = find_path_to_nearest_target(&grid, start, &targets);
        if !targets.contains(&start) && field.is_reachable(&start) {
            prop_assert_eq!(path.len() as u32, field.get(&start));
        } else {
            prop_assert!(path.is_empty());
        }
    }

    #[test]
    fn gather_issue_never_exceeds_availability(
        available in 0u32..200,
        stock in 0u32..200,
        target_stock in 0u32..400,
        target_available in 0u32..400,
    ) {
        let entities = EntityManager::new(vec![Entity::Resource(
            ResourceEntity::new("herb", "Herb", Coordinate::new(0, 0), 200, available)
                .discovered(),
        )]);
        let starting: BTreeMap<String, u32> =
            [("herb".to_string(), stock)].into_iter().collect();
        let dispatcher = GuildDispatcher::from_world(
            &entities,
            Some(&["herb".to_string()]),
            &starting,
            true,
        );
        let stock_targets: BTreeMap<String, u32> =
            [("herb".to_string(), target_stock)].into_iter().collect();
        let avail_targets: BTreeMap<String, u32> =
            [("herb".to_string(), target_available)].into_iter().collect();

        for issue in dispatcher.issue_for_targets(&stock_targets, &avail_targets) {
            prop_assert!(issue.amount > 0, "zero-amount issue emitted");
            if !issue.is_explore() {
                prop_assert!(
                    issue.amount <= available,
                    "gather {} exceeds availability {}",
                    issue.amount,
                    available
                );
            }
        }
    }

    #[test]
    fn consume_never_underflows(
        quantity in 0u32..50,
        amounts in proptest::collection::vec(0u32..20, 1..30),
        seed in 0u64..64,
    ) {
        let mut entities = EntityManager::new(vec![Entity::Resource(
            ResourceEntity::new("ore", "Ore", Coordinate::new(0, 0), 50, quantity).discovered(),
        )]);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for amount in amounts {
            entities.consume("ore", amount, &mut rng);
            match entities.find_by_key("ore").and_then(|e| e.as_resource()) {
                // quantity is unsigned; what matters is that depleted
                // entities are gone, not lingering at zero
                Some(resource) => prop_assert!(resource.current_quantity > 0),
                None => {
                    prop_assert!(entities.candidates_by_key("ore", false).is_empty());
                    prop_assert!(!entities.consume("ore", 1, &mut rng));
                    break;
                }
            }
        }
    }
}
