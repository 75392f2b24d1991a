//! Drag pipeline behaviour observed through a recording layout.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use dropline::deferred::{ENABLE_ANIMATION_DELAY, INVALIDATE_RECTS_DELAY};
use dropline::options::DEFAULT_ANIMATION_DURATION;
use dropline::{
    Behaviour, ContainerId, ContainerOptions, DragManager, DragResult, DragScroller, DraggableInfo,
    DropResult, LayoutPort, Orientation, Payload,
};
use dropline_core::geometry::LayoutRect;
use dropline_core::math::Vec2;
use dropline_test_utils::{LayoutCall, MockLayout};

fn column(x: f32, height: f32, sizes: &[f32]) -> MockLayout {
    MockLayout::stacked(Orientation::Vertical, LayoutRect::new(x, 0.0, 100.0, height), sizes)
}

struct Board {
    manager: DragManager,
    a: ContainerId,
    b: ContainerId,
    layout_a: MockLayout,
    layout_b: MockLayout,
}

fn board(a_sizes: &[f32], b_height: f32, b_sizes: &[f32]) -> Board {
    let mut manager = DragManager::default().with_threshold(0.0);
    let lists = ContainerOptions::new().group_name("lists");
    let layout_a = column(0.0, 300.0, a_sizes);
    let layout_b = column(200.0, b_height, b_sizes);
    let a = manager.register(layout_a.clone(), lists.clone()).expect("valid");
    let b = manager.register(layout_b.clone(), lists).expect("valid");
    Board {
        manager,
        a,
        b,
        layout_a,
        layout_b,
    }
}

fn result_of(manager: &DragManager, id: ContainerId) -> DragResult {
    manager.drag_result(id).cloned().expect("registered")
}

#[test]
fn test_insertion_example_and_idempotence() {
    let mut board = board(&[50.0, 50.0, 50.0], 300.0, &[50.0, 50.0, 50.0]);
    board.manager.start_drag(board.a, 0, Vec2::new(50.0, 25.0)).expect("start");
    board.manager.update(Vec2::new(250.0, 120.0)).expect("drag");

    let settled = result_of(&board.manager, board.b);
    assert_eq!(settled.pos, Some(120.0));
    assert_eq!(settled.added_index, Some(2));
    assert_eq!(board.layout_b.translations(), vec![0.0, 0.0, 50.0]);
    assert_eq!(board.manager.target(), Some(board.b));

    board.layout_a.clear_calls();
    board.layout_b.clear_calls();
    board.manager.update(Vec2::new(250.0, 120.0)).expect("drag");

    assert_eq!(result_of(&board.manager, board.b), settled);
    assert_eq!(board.layout_b.count_translations(), 0);
    assert_eq!(board.layout_a.count_translations(), 0);
    assert_eq!(board.layout_b.call_count(), 0);
}

#[test]
fn test_shadow_present_iff_insertion() {
    let mut board = board(&[50.0, 30.0, 70.0, 40.0], 300.0, &[60.0, 20.0]);
    board.manager.start_drag(board.a, 1, Vec2::new(50.0, 60.0)).expect("start");

    let mut y = -20.0;
    while y < 320.0 {
        for x in [50.0, 250.0, 150.0] {
            board.manager.update(Vec2::new(x, y)).expect("drag");
            for id in [board.a, board.b] {
                let result = result_of(&board.manager, id);
                assert_eq!(
                    result.shadow_begin_end.is_some(),
                    result.added_index.is_some(),
                    "container {id:?} at ({x}, {y})"
                );
                assert_eq!(result.pos.is_some(), board.manager.target() == Some(id));
            }
        }
        y += 7.0;
    }
}

#[test]
fn test_repeated_sample_after_any_jump_changes_nothing() {
    let positions: Vec<f32> = (0..33).map(|i| -10.0 + (i * 37 % 33) as f32 * 10.0).collect();
    for k in 0..4 {
        for x in [50.0, 250.0] {
            let mut board = board(&[50.0, 30.0, 70.0, 40.0], 300.0, &[60.0, 20.0]);
            let start = board.layout_a.with_layout(|layout| layout.slot_rect(k).center());
            board.manager.start_drag(board.a, k, start).expect("start");

            for &y in &positions {
                board.manager.update(Vec2::new(x, y)).expect("drag");
                let settled = (result_of(&board.manager, board.a), result_of(&board.manager, board.b));

                board.layout_a.clear_calls();
                board.layout_b.clear_calls();
                board.manager.update(Vec2::new(x, y)).expect("drag");

                let again = (result_of(&board.manager, board.a), result_of(&board.manager, board.b));
                assert_eq!(again, settled, "k={k} x={x} y={y}");
                assert_eq!(board.layout_a.count_translations(), 0, "k={k} x={x} y={y}");
                assert_eq!(board.layout_b.count_translations(), 0, "k={k} x={x} y={y}");
            }
            board.manager.cancel_drag().expect("session");
        }
    }
}

#[test]
fn test_move_round_trip_corrects_forward_moves() {
    let items = ['a', 'b', 'c', 'd'];
    for k in 0..items.len() {
        for y in [5.0, 40.0, 75.0, 110.0, 145.0, 180.0, 215.0] {
            let mut board = board(&[50.0; 4], 300.0, &[]);
            let start = Vec2::new(50.0, 25.0 + 50.0 * k as f32);
            board.manager.start_drag(board.a, k, start).expect("start");
            board.manager.update(Vec2::new(50.0, y)).expect("drag");

            // The placeholder starts on the vacated slot. Above it the hovered
            // slot is pushed down; below it the hovered slot moves up.
            let hovered = (y / 50.0) as usize;
            let j = match hovered.cmp(&k) {
                std::cmp::Ordering::Less => Some(hovered),
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some((hovered + 1).min(items.len())),
            };
            let raw = result_of(&board.manager, board.a).added_index;
            if let Some(j) = j {
                assert_eq!(raw, Some(j), "k={k} y={y}");
            }

            let results = board.manager.end_drag().expect("session");
            assert_eq!(results.len(), 1);
            let result = &results[0];
            assert_eq!(result.removed_index, Some(k));
            // The item lands on the slot the pointer was over.
            let expected = hovered.min(items.len() - 1);
            assert_eq!(result.added_index, Some(expected), "k={k} y={y}");
            if let Some(j) = j {
                assert_eq!(expected, if k < j { j - 1 } else { j });
            }

            let mut reordered = items.to_vec();
            result.apply(&mut reordered, |_| None);
            assert_eq!(reordered.len(), items.len());
            assert_eq!(reordered[expected], items[k]);
        }
    }
}

#[test]
fn test_drop_into_empty_container() {
    let mut board = board(&[50.0, 50.0], 300.0, &[]);
    board.manager.start_drag(board.a, 1, Vec2::new(50.0, 75.0)).expect("start");
    board.layout_b.clear_calls();
    board.manager.update(Vec2::new(250.0, 120.0)).expect("drag");

    let result = result_of(&board.manager, board.b);
    assert_eq!(result.added_index, Some(0));
    let shadow = result.shadow_begin_end.expect("shadow");
    assert_eq!((shadow.begin, shadow.end), (0.0, 300.0));
    assert_eq!(board.layout_b.count_translations(), 0);
    // Nothing to push down, and the element fits.
    assert_eq!(board.layout_b.spacer(), None);

    let results = board.manager.end_drag().expect("session");
    let moves: Vec<_> = results
        .iter()
        .map(|r| (r.container, r.removed_index, r.added_index))
        .collect();
    assert_eq!(moves, vec![(board.a, Some(1), None), (board.b, None, Some(0))]);
}

#[test]
fn test_empty_container_overflows_from_its_begin() {
    let mut board = board(&[50.0, 50.0], 30.0, &[]);
    board.manager.start_drag(board.a, 0, Vec2::new(50.0, 25.0)).expect("start");
    board.manager.update(Vec2::new(250.0, 10.0)).expect("drag");

    let result = result_of(&board.manager, board.b);
    assert_eq!(result.added_index, Some(0));
    let shadow = result.shadow_begin_end.expect("shadow");
    assert_eq!((shadow.begin, shadow.end), (0.0, 30.0));
    assert_eq!(board.layout_b.spacer(), Some(20.0));
}

#[test]
fn test_move_to_end_reorders_items() {
    let mut board = board(&[50.0; 4], 300.0, &[]);
    board.manager.start_drag(board.a, 0, Vec2::new(50.0, 25.0)).expect("start");
    board.manager.update(Vec2::new(50.0, 190.0)).expect("drag");
    assert_eq!(result_of(&board.manager, board.a).added_index, Some(4));

    let results = board.manager.end_drag().expect("session");
    let mut items = vec!['a', 'b', 'c', 'd'];
    results[0].apply(&mut items, |_| None);
    assert_eq!(items, vec!['b', 'c', 'd', 'a']);
}

#[test]
fn test_copy_source_is_never_a_participant() {
    let mut manager = DragManager::default().with_threshold(0.0);
    let palette_layout = column(0.0, 300.0, &[50.0, 50.0]);
    let palette = manager
        .register(
            palette_layout.clone(),
            ContainerOptions::new()
                .group_name("cards")
                .behaviour(Behaviour::Copy)
                .child_payload(|index| Payload::new(format!("card-{index}"))),
        )
        .expect("valid");
    let board = manager
        .register(column(200.0, 300.0, &[50.0]), ContainerOptions::new().group_name("cards"))
        .expect("valid");
    palette_layout.clear_calls();

    manager.start_drag(palette, 1, Vec2::new(50.0, 75.0)).expect("start");
    assert_eq!(manager.session().map(|s| s.participants.clone()), Some(vec![board]));
    manager.update(Vec2::new(250.0, 40.0)).expect("drag");

    let results = manager.end_drag().expect("session");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].container, board);
    assert_eq!((results[0].removed_index, results[0].added_index), (None, Some(1)));
    assert_eq!(
        results[0].payload.downcast_ref::<String>().map(String::as_str),
        Some("card-1")
    );

    let mut cards = vec![String::from("card-0")];
    let leftover = results[0].apply(&mut cards, |payload| payload.downcast_ref::<String>().cloned());
    assert!(leftover.is_none());
    assert_eq!(cards, vec!["card-0", "card-1"]);

    assert_eq!(result_of(&manager, palette), DragResult::default());
    assert_eq!(palette_layout.call_count(), 0);
}

#[test]
fn test_drop_without_target_reverts_everything() {
    let drops = Rc::new(Cell::new(0));
    let counter = Rc::clone(&drops);
    let mut manager = DragManager::default().with_threshold(0.0);
    let layout = column(0.0, 300.0, &[50.0, 50.0, 50.0]);
    let list = manager
        .register(
            layout.clone(),
            ContainerOptions::new().on_drop(move |_: &DropResult| counter.set(counter.get() + 1)),
        )
        .expect("valid");

    manager.start_drag(list, 1, Vec2::new(50.0, 75.0)).expect("start");
    manager.update(Vec2::new(50.0, 10.0)).expect("drag");
    assert!(!layout.is_visible(1));
    assert_ne!(layout.translations(), vec![0.0, 0.0, 0.0]);

    manager.update(Vec2::new(1000.0, 1000.0)).expect("drag");
    assert_eq!(manager.target(), None);

    let results = manager.end_drag().expect("session");
    assert!(results.is_empty());
    assert_eq!(drops.get(), 0);
    assert_eq!(layout.translations(), vec![0.0, 0.0, 0.0]);
    assert!(layout.is_visible(1));
}

#[test]
fn test_drop_callback_fires_once_per_changed_container() {
    let drops = Rc::new(RefCell::new(Vec::new()));
    let mut manager = DragManager::default().with_threshold(0.0);
    let mut ids = Vec::new();
    for x in [0.0, 200.0, 400.0] {
        let sink = Rc::clone(&drops);
        let id = manager
            .register(
                column(x, 300.0, &[50.0, 50.0]),
                ContainerOptions::new()
                    .group_name("lists")
                    .on_drop(move |result: &DropResult| sink.borrow_mut().push(result.container)),
            )
            .expect("valid");
        ids.push(id);
    }

    manager.start_drag(ids[0], 0, Vec2::new(50.0, 25.0)).expect("start");
    manager.update(Vec2::new(450.0, 10.0)).expect("drag");
    manager.end_drag().expect("session");

    assert_eq!(*drops.borrow(), vec![ids[0], ids[2]]);
}

#[test]
fn test_overflow_spacer_and_deferred_invalidation() {
    let mut board = board(&[50.0, 50.0], 120.0, &[50.0, 50.0]);
    board.manager.start_drag(board.a, 0, Vec2::new(50.0, 25.0)).expect("start");
    board.manager.update(Vec2::new(250.0, 110.0)).expect("drag");
    assert_eq!(result_of(&board.manager, board.b).added_index, Some(2));
    assert_eq!(board.layout_b.spacer(), Some(30.0));

    board.layout_b.clear_calls();
    board.manager.tick(INVALIDATE_RECTS_DELAY / 2);
    assert_eq!(board.layout_b.count_invalidations(), 0);
    board.manager.tick(INVALIDATE_RECTS_DELAY / 2);
    assert_eq!(board.layout_b.count_invalidations(), 1);
    board.manager.tick(INVALIDATE_RECTS_DELAY);
    assert_eq!(board.layout_b.count_invalidations(), 1);

    board.manager.update(Vec2::new(250.0, 500.0)).expect("drag");
    assert_eq!(board.layout_b.spacer(), None);
    assert!(board.layout_b.calls().contains(&LayoutCall::HideSpacer));
    // The source never overflows.
    assert_eq!(board.layout_a.spacer(), None);
}

#[test]
fn test_animation_reenabled_after_drop_delay() {
    let mut board = board(&[50.0, 50.0], 300.0, &[50.0]);
    assert_eq!(board.layout_a.animation(0), Some(DEFAULT_ANIMATION_DURATION));

    board.manager.start_drag(board.a, 0, Vec2::new(50.0, 25.0)).expect("start");
    board.manager.update(Vec2::new(50.0, 80.0)).expect("drag");
    board.manager.end_drag().expect("session");
    assert_eq!(board.layout_a.animation(0), None);
    assert_eq!(board.layout_a.animation(1), None);

    board.manager.tick(ENABLE_ANIMATION_DELAY - Duration::from_millis(1));
    assert_eq!(board.layout_a.animation(1), None);
    board.manager.tick(Duration::from_millis(1));
    assert_eq!(board.layout_a.animation(0), Some(DEFAULT_ANIMATION_DURATION));
    assert_eq!(board.layout_a.animation(1), Some(DEFAULT_ANIMATION_DURATION));
}

#[test]
fn test_scroll_refreshes_placeholder() {
    let mut board = board(&[50.0], 300.0, &[50.0, 50.0, 50.0]);
    board.layout_b.with_layout(|layout| layout.set_scroll(400.0, 0.0));
    board.manager.start_drag(board.a, 0, Vec2::new(50.0, 25.0)).expect("start");
    board.manager.update(Vec2::new(250.0, 120.0)).expect("drag");

    let shadow = result_of(&board.manager, board.b).shadow_begin_end.expect("shadow");
    assert_eq!((shadow.begin, shadow.end), (100.0, 150.0));

    board.layout_b.with_layout(|layout| layout.set_scroll(400.0, 20.0));
    board.manager.on_scroll(board.b).expect("registered");
    let shadow = result_of(&board.manager, board.b).shadow_begin_end.expect("shadow");
    assert_eq!((shadow.begin, shadow.end), (80.0, 130.0));
    assert_eq!(result_of(&board.manager, board.b).added_index, Some(2));
}

#[derive(Clone, Default)]
struct RecordingScroller {
    samples: Rc<RefCell<Vec<Option<usize>>>>,
    resets: Rc<Cell<usize>>,
}

impl DragScroller for RecordingScroller {
    fn on_drag(&mut self, _info: &DraggableInfo, result: &DragResult) {
        self.samples.borrow_mut().push(result.added_index);
    }

    fn reset(&mut self) {
        self.resets.set(self.resets.get() + 1);
    }
}

#[test]
fn test_scroller_sees_every_sample_and_reset() {
    let mut board = board(&[50.0], 300.0, &[50.0, 50.0, 50.0]);
    let scroller = RecordingScroller::default();
    board
        .manager
        .registry_mut()
        .container_mut(board.b)
        .expect("registered")
        .set_scroller(scroller.clone());

    board.manager.start_drag(board.a, 0, Vec2::new(50.0, 25.0)).expect("start");
    board.manager.update(Vec2::new(250.0, 120.0)).expect("drag");
    board.manager.update(Vec2::new(250.0, 10.0)).expect("drag");
    board.manager.end_drag().expect("session");

    assert_eq!(*scroller.samples.borrow(), vec![None, Some(2), Some(0)]);
    assert_eq!(scroller.resets.get(), 1);
}
