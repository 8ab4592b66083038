use std::collections::BTreeSet;

use blockpop_core::*;
use proptest::prelude::*;

fn config() -> impl Strategy<Value = EngineConfig> {
    (1..=8u8, 1..=8u8, 1..=5u8, 0..=6u16).prop_map(|(width, height, block_types, moves)| {
        EngineConfig {
            grid: GridConfig::new_unchecked((width, height), block_types),
            initial_moves: moves,
        }
    })
}

fn assert_well_formed(grid: &Grid) {
    let (width, height) = grid.size();
    for x in 0..width {
        for y in 0..height {
            let block = grid[(x, y)].expect("grid should be full between taps");
            assert_eq!(block.coords(), (x, y));
            assert!(block.kind.0 < grid.block_types());
        }
    }
}

proptest! {
    #[test]
    fn clusters_are_connected_and_single_typed(config in config(), seed in any::<u64>(), x in any::<u8>(), y in any::<u8>()) {
        let engine = Engine::from_seed(config, seed).unwrap();
        let grid = engine.grid();
        let (width, height) = grid.size();
        let origin = (x % width, y % height);

        let cluster = grid.find_cluster(origin).unwrap();

        prop_assert!(cluster.contains(origin));
        prop_assert_eq!(usize::from(cluster.size()), cluster.coords().len());
        for &pos in cluster.coords() {
            prop_assert_eq!(grid.kind_at(pos), Some(cluster.kind()));
        }

        // every member reachable from the origin through members only
        let mut reached = BTreeSet::from([origin]);
        let mut frontier = vec![origin];
        while let Some(pos) = frontier.pop() {
            for next in NeighborIter::new(pos, grid.size()) {
                if cluster.contains(next) && reached.insert(next) {
                    frontier.push(next);
                }
            }
        }
        prop_assert_eq!(&reached, cluster.coords());

        // and no same-typed neighbor was left outside
        for &pos in cluster.coords() {
            for next in NeighborIter::new(pos, grid.size()) {
                if grid.kind_at(next) == Some(cluster.kind()) {
                    prop_assert!(cluster.contains(next));
                }
            }
        }
    }

    #[test]
    fn sessions_keep_invariants(
        config in config(),
        seed in any::<u64>(),
        taps in proptest::collection::vec((any::<u8>(), any::<u8>()), 0..24),
    ) {
        let mut engine = Engine::from_seed(config, seed).unwrap();
        let (width, height) = config.grid.size;
        assert_well_formed(engine.grid());

        for (x, y) in taps {
            let coords = (x % width, y % height);
            let score = engine.session().score();
            let moves = engine.session().moves_remaining();
            let was_over = engine.session().is_game_over();

            match engine.tap(coords).unwrap() {
                TapOutcome::Rejected(reason) => {
                    prop_assert!(was_over);
                    prop_assert_eq!(reason, RejectReason::GameOver);
                    prop_assert_eq!(engine.session().score(), score);
                }
                TapOutcome::NoOp => {
                    prop_assert_eq!(engine.grid().find_cluster(coords).unwrap().size(), 1);
                    prop_assert_eq!(engine.session().score(), score);
                    prop_assert_eq!(engine.session().moves_remaining(), moves);
                }
                TapOutcome::Cleared(clearance) => {
                    prop_assert!(clearance.size >= MIN_CLUSTER_SIZE);
                    prop_assert_eq!(usize::from(clearance.size), clearance.coordinates.len());
                    prop_assert_eq!(engine.session().score(), score + Score::from(clearance.size));
                    prop_assert_eq!(engine.session().moves_remaining(), moves - 1);
                    prop_assert!(engine.is_busy());

                    let report = engine.commit_refill();
                    prop_assert_eq!(report.spawns.len(), clearance.coordinates.len());
                    prop_assert!(!engine.is_busy());
                    assert_well_formed(engine.grid());
                }
            }

            prop_assert_eq!(
                engine.session().is_game_over(),
                engine.session().moves_remaining() == 0
            );
        }

        engine.replay();
        prop_assert_eq!(engine.session().score(), 0);
        prop_assert_eq!(engine.session().moves_remaining(), config.initial_moves);
        prop_assert!(!engine.is_busy());
        assert_well_formed(engine.grid());
    }

    #[test]
    fn refill_moves_only_downward(config in config(), seed in any::<u64>(), x in any::<u8>(), y in any::<u8>()) {
        let mut engine = Engine::from_seed(config, seed).unwrap();
        let (width, height) = config.grid.size;

        if let TapOutcome::Cleared(clearance) = engine.tap((x % width, y % height)).unwrap() {
            let report = engine.commit_refill();
            for event in &report.moves {
                prop_assert!(event.to_y > event.from_y);
            }
            for column in 0..width {
                let cleared = clearance.coordinates.iter().filter(|pos| pos.0 == column).count();
                let spawned = report.spawns.iter().filter(|event| event.x == column).count();
                prop_assert_eq!(cleared, spawned);
                // spawns land in the top rows of the column
                for event in report.spawns.iter().filter(|event| event.x == column) {
                    prop_assert!(usize::from(event.y) < cleared);
                }
            }
        }
    }
}
