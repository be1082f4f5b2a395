//! Turns driven through the public API, checked against cube invariants.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;

use wordcube::geometry::{linearize, Coord};
use wordcube::slice::snapped_quarter_turns;
use wordcube::{AxisPair, Cube, GameSession, Puzzle, SessionEvent, SliceId, TurnOutcome, WordInfo};

/// Every cubit sits in the cell its coordinates name, and every slice holds
/// exactly the cubits whose coordinates put them in it.
fn assert_indexed(cube: &Cube) {
    for cubit in cube.cubits() {
        assert!(!cubit.is_displaced());
        assert_eq!(
            cube.cells()[linearize(cubit.coord(), cube.size())],
            Some(cubit.id())
        );
        for slice in cube.slices_containing(cubit.id()) {
            assert!(cube.slice_cubits(slice).unwrap().contains(&cubit.id()));
        }
    }
    for pair in AxisPair::ALL {
        for order in 0..cube.size() {
            let slice = SliceId::new(pair, order);
            for cubit in cube.slice_cubits(slice).unwrap() {
                assert_eq!(cube.slices_containing(cubit)[pair.index()], slice);
            }
        }
    }
}

fn snapshot(cube: &Cube) -> Vec<(Coord, Vec<(wordcube::Axis, wordcube::cubit::FaceId)>)> {
    cube.cubits()
        .iter()
        .map(|cubit| (cubit.coord(), cubit.active_faces().collect()))
        .collect()
}

#[test]
fn test_word_cube_top_row_turn() {
    let mut cube = Cube::new(4).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let puzzle = Puzzle::new(&mut cube, "word", 0.8, &mut rng).unwrap();
    let mut session = GameSession::new(cube, puzzle, WordInfo::new("word"), 4);
    assert_indexed(session.cube());

    let top = SliceId::new(AxisPair::Row, 3);
    let before: FxHashSet<_> = session.cube().slice_cubits(top).unwrap().into_iter().collect();
    let old_total = session.puzzle().solution_count();

    let outcome = session.turn(top, 90.0).unwrap();
    assert_eq!(outcome, TurnOutcome::Committed { quarter_turns: 1 });
    assert_eq!(session.moves(), 1);
    assert_indexed(session.cube());

    let after: FxHashSet<_> = session.cube().slice_cubits(top).unwrap().into_iter().collect();
    assert_eq!(before, after);

    let new_total = session.puzzle().solution_count();
    let events = session.drain_events();
    let deltas: Vec<i64> = events
        .iter()
        .filter_map(|event| match event {
            SessionEvent::ComboChanged { delta, .. } => Some(*delta),
            SessionEvent::PuzzleSolved { .. } => None,
        })
        .collect();
    if new_total == old_total {
        assert!(deltas.is_empty());
    } else {
        assert_eq!(deltas, vec![new_total as i64 - old_total as i64]);
    }
    assert_eq!(session.combo(), new_total);
}

#[test]
fn test_four_quarter_turns_restore_the_cube() {
    let mut cube = Cube::new(5).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    Puzzle::new(&mut cube, "sonar", 0.7, &mut rng).unwrap();
    let start = snapshot(&cube);

    let slice = SliceId::new(AxisPair::Col, 2);
    for _ in 0..4 {
        cube.set_angle(slice, 90.0).unwrap();
        cube.commit_or_revert(slice).unwrap();
    }
    assert_eq!(cube.drain_events().len(), 4);
    assert_eq!(snapshot(&cube), start);
}

fn turn_strategy() -> impl Strategy<Value = (usize, usize, usize, f32)> {
    (1usize..=5).prop_flat_map(|size| (Just(size), 0..size, 0usize..3, -400.0f32..400.0))
}

proptest! {
    #[test]
    fn prop_turn_permutes_only_the_slice((size, order, pair, degrees) in turn_strategy()) {
        let mut cube = Cube::new(size).unwrap();
        let pair = AxisPair::ALL[pair];
        let slice = SliceId::new(pair, order);
        let members: FxHashSet<_> = cube.slice_cubits(slice).unwrap().into_iter().collect();
        let start = snapshot(&cube);

        cube.set_angle(slice, degrees).unwrap();
        let outcome = cube.commit_or_revert(slice).unwrap();
        assert_indexed(&cube);

        let end = snapshot(&cube);
        if snapped_quarter_turns(degrees) == 0 {
            prop_assert_eq!(outcome, TurnOutcome::Reverted);
            prop_assert_eq!(&end, &start);
            prop_assert!(cube.drain_events().is_empty());
        }

        let before: FxHashSet<Coord> = members.iter().map(|id| start[id.0].0).collect();
        let after: FxHashSet<Coord> = members.iter().map(|id| end[id.0].0).collect();
        prop_assert_eq!(before, after);
        for cubit in cube.cubits() {
            if !members.contains(&cubit.id()) {
                prop_assert_eq!(&end[cubit.id().0], &start[cubit.id().0]);
            }
        }
    }
}
