//! Property tests for the synchronization engine.

use kform_models::{Formation, Member, Position};
use kform_sync::{interpolate, locate, FormationSync};
use proptest::prelude::*;

fn formation(id: usize, time: f64) -> Formation {
    Formation::new(
        format!("f{}", id),
        time,
        vec![
            Position::new("a", (id * 7 % 100) as f64, (id * 13 % 100) as f64),
            Position::new("b", (id * 11 % 100) as f64, (id * 3 % 100) as f64),
        ],
    )
}

fn members() -> Vec<Member> {
    vec![
        Member::new("a", "artist", "Luna", "#FF6B9D", 1),
        Member::new("b", "artist", "Hana", "#4ECDC4", 2),
    ]
}

/// Formations with unique times, plus the same formations in shuffled order.
fn formations_and_shuffled() -> impl Strategy<Value = (Vec<Formation>, Vec<Formation>)> {
    prop::collection::btree_set(0u32..2000, 1..24).prop_flat_map(|ticks| {
        let formations: Vec<Formation> = ticks
            .into_iter()
            .enumerate()
            .map(|(i, tick)| formation(i, tick as f64 / 8.0))
            .collect();
        (Just(formations.clone()), Just(formations).prop_shuffle())
    })
}

fn ids(formations: &[Formation], t: f64) -> (Option<String>, Option<String>) {
    let window = locate(formations, t);
    (
        window.current.map(|f| f.id.to_string()),
        window.next.map(|f| f.id.to_string()),
    )
}

proptest! {
    #[test]
    fn test_locate_ignores_input_order(
        (sorted, shuffled) in formations_and_shuffled(),
        t in -10.0f64..300.0,
    ) {
        prop_assert_eq!(ids(&sorted, t), ids(&shuffled, t));
    }

    #[test]
    fn test_current_never_after_query_unless_before_first(
        (sorted, _) in formations_and_shuffled(),
        t in -10.0f64..300.0,
    ) {
        let window = locate(&sorted, t);
        let current = window.current.expect("non-empty input has a current formation");
        if t >= sorted[0].time {
            prop_assert!(current.time <= t);
        } else {
            prop_assert_eq!(&current.id, &sorted[0].id);
        }
        if let Some(next) = window.next {
            prop_assert!(next.time > current.time);
        }
    }

    #[test]
    fn test_interpolated_positions_stay_between_endpoints(
        (sorted, _) in formations_and_shuffled(),
        t in -10.0f64..300.0,
    ) {
        let window = locate(&sorted, t);
        let current = window.current.expect("non-empty input has a current formation");
        let result = interpolate(current, window.next, t, &members());

        prop_assert_eq!(result.len(), current.positions.len());
        for pos in &result {
            let from = current.position_of(&pos.member_id).unwrap();
            let to = window.next.and_then(|n| n.position_of(&pos.member_id)).unwrap_or(from);
            prop_assert!(pos.x >= from.x.min(to.x) - 1e-9 && pos.x <= from.x.max(to.x) + 1e-9);
            prop_assert!(pos.y >= from.y.min(to.y) - 1e-9 && pos.y <= from.y.max(to.y) + 1e-9);
        }
    }

    #[test]
    fn test_frames_are_idempotent(
        (sorted, _) in formations_and_shuffled(),
        t in -10.0f64..300.0,
    ) {
        let sync = FormationSync::default();
        prop_assert_eq!(sync.frame(&sorted, &members(), t), sync.frame(&sorted, &members(), t));
    }

    #[test]
    fn test_empty_input_never_panics(t in any::<f64>()) {
        let window = locate(&[], t);
        prop_assert!(window.current.is_none());
        prop_assert!(window.next.is_none());
    }
}

#[test]
fn test_documented_boundaries() {
    let formations = vec![formation(0, 5.0), formation(1, 10.0), formation(2, 15.0)];

    let start = locate(&formations, 0.0);
    assert_eq!(start.current.map(|f| f.time), Some(5.0));
    assert_eq!(start.next.map(|f| f.time), Some(10.0));

    let end = locate(&formations, 100.0);
    assert_eq!(end.current.map(|f| f.time), Some(15.0));
    assert!(end.next.is_none());

    let exact = locate(&formations, 10.0);
    assert_eq!(exact.current.map(|f| f.time), Some(10.0));
}

#[test]
fn test_empty_input_with_negative_and_nan_time() {
    for t in [-1.0, f64::NAN, f64::NEG_INFINITY] {
        let window = locate(&[], t);
        assert!(window.current.is_none() && window.next.is_none());
    }
}
