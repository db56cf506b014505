//! Property tests for detection, bounds and store invariants under random
//! drag sequences.

use std::collections::HashSet;

use proptest::prelude::*;

use lineup_core::config::LineupConfig;
use lineup_core::models::FieldCoord;
use lineup_core::state::{BenchDropOutcome, DropOutcome, LineupStore};
use lineup_core::{detect_position, FieldBounds, FormationType, StaticRoster};

fn coord() -> impl Strategy<Value = FieldCoord> {
    (-50.0f32..150.0, -50.0f32..150.0).prop_map(|(x, y)| FieldCoord::new(x, y))
}

#[derive(Debug, Clone)]
enum Op {
    Drop { slot: usize, to: FieldCoord },
    BenchDrop { bench: usize, to: FieldCoord },
    ToBench { slot: usize },
    Formation(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..16, coord()).prop_map(|(slot, to)| Op::Drop { slot, to }),
        3 => (0usize..10, coord()).prop_map(|(bench, to)| Op::BenchDrop { bench, to }),
        1 => (0usize..16).prop_map(|slot| Op::ToBench { slot }),
        1 => (0usize..3).prop_map(Op::Formation),
    ]
}

fn fresh_store() -> LineupStore {
    let mut store = LineupStore::from_provider(&LineupConfig::default(), &StaticRoster::default_squad());
    store.reset();
    store
}

fn assert_membership(store: &LineupStore) {
    let mut seen = HashSet::new();
    for placement in store.lineup() {
        assert!(seen.insert(placement.player.id.clone()), "{} placed twice", placement.player.id);
    }
    for entry in store.bench() {
        assert!(seen.insert(entry.player.id.clone()), "{} both placed and benched", entry.player.id);
    }
    let indices: HashSet<usize> = store.bench().iter().map(|e| e.bench_index).collect();
    assert_eq!(indices.len(), store.bench().len(), "duplicate bench index");
    let ids: HashSet<&str> = store.lineup().iter().map(|p| p.placement_id.as_str()).collect();
    assert_eq!(ids.len(), store.lineup().len(), "duplicate placement id");
}

fn assert_clear_of_others(store: &LineupStore, placement_id: &str) {
    let threshold = store.rules().collision.threshold();
    let moved = store.placement(placement_id).expect("placement still on the pitch");
    for other in store.lineup().iter().filter(|p| p.placement_id != placement_id) {
        assert!(
            moved.field_position.distance_to(other.field_position) >= threshold,
            "{} landed within {} of {}",
            placement_id,
            threshold,
            other.placement_id
        );
    }
}

proptest! {
    #[test]
    fn detection_is_deterministic_and_bounded(x in -20.0f32..120.0, y in -20.0f32..120.0) {
        let first = detect_position(x, y);
        let second = detect_position(x, y);
        prop_assert_eq!(first, second);
        prop_assert!((0.0..=1.0).contains(&first.confidence));
    }

    #[test]
    fn clamp_is_idempotent_and_contained(c in coord()) {
        let bounds = FieldBounds::default();
        let once = bounds.clamp(c);
        prop_assert!(bounds.contains(once));
        prop_assert_eq!(bounds.clamp(once), once);
    }

    #[test]
    fn clamp_leaves_contained_points_alone(x in 12.0f32..=88.0, y in 12.0f32..=88.0) {
        let bounds = FieldBounds::default();
        prop_assert_eq!(bounds.clamp(FieldCoord::new(x, y)), FieldCoord::new(x, y));
    }

    #[test]
    fn random_drag_sequences_keep_store_consistent(ops in prop::collection::vec(op(), 1..40)) {
        let mut store = fresh_store();
        let total = store.lineup().len() + store.bench().len();
        let bounds = store.rules().bounds;

        for op in ops {
            match op {
                Op::Drop { slot, to } => {
                    let Some(placement) = store.lineup().get(slot).cloned() else { continue };
                    let original = placement.field_position;
                    match store.relocate_with_validation(&placement.placement_id, to, original) {
                        DropOutcome::Committed { coordinate, detection } => {
                            prop_assert!(bounds.is_in_bounds(coordinate.x, coordinate.y));
                            let moved = store.placement(&placement.placement_id).unwrap();
                            prop_assert_eq!(moved.field_position, coordinate);
                            prop_assert_eq!(moved.detected_position, detection.position);
                            assert_clear_of_others(&store, &placement.placement_id);
                        }
                        DropOutcome::SnappedBack { coordinate, .. } => {
                            prop_assert_eq!(coordinate, original);
                            let restored = store.placement(&placement.placement_id).unwrap();
                            prop_assert_eq!(restored.field_position, original);
                        }
                        DropOutcome::SentToBench { bench_index } => {
                            prop_assert!(to.y > bounds.bench_edge_y);
                            let entry = store.bench_entry(bench_index).unwrap();
                            prop_assert_eq!(&entry.player.id, &placement.player.id);
                        }
                        DropOutcome::Ignored => prop_assert!(false, "existing placement ignored"),
                    }
                }
                Op::BenchDrop { bench, to } => {
                    let Some(entry) = store.bench().get(bench).cloned() else { continue };
                    match store.drop_bench_player(&entry.player.id, to) {
                        BenchDropOutcome::Added { placement_id, coordinate, .. } => {
                            prop_assert!(bounds.contains(coordinate));
                            prop_assert!(placement_id.starts_with("sub_"));
                            assert_clear_of_others(&store, &placement_id);
                        }
                        BenchDropOutcome::Substituted { placement_id, outgoing_player_id, bench_index } => {
                            prop_assert_eq!(bench_index, entry.bench_index);
                            let on = store.placement(&placement_id).unwrap();
                            prop_assert_eq!(&on.player.id, &entry.player.id);
                            prop_assert!(store.is_on_bench(&outgoing_player_id));
                        }
                        BenchDropOutcome::Rejected => {
                            prop_assert!(!bounds.contains(to) || to.y > bounds.bench_edge_y);
                            prop_assert!(store.is_on_bench(&entry.player.id));
                        }
                        BenchDropOutcome::Ignored => prop_assert!(false, "bench player ignored"),
                    }
                }
                Op::ToBench { slot } => {
                    let Some(id) = store.lineup().get(slot).map(|p| p.placement_id.clone()) else { continue };
                    prop_assert!(store.remove_to_bench(&id).is_some());
                }
                Op::Formation(i) => {
                    store.select_formation(FormationType::all()[i]);
                }
            }

            assert_membership(&store);
            prop_assert_eq!(store.lineup().len() + store.bench().len(), total);
        }
    }
}
