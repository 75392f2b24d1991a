//! Kanban-style board: two card lanes nested inside a reorderable board.
//!
//! Run with `RUST_LOG=dropline=debug` to see the drag pipeline at work:
//!
//! ```sh
//! cargo run -p dropline --example nested_lists
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use dropline::{ContainerId, ContainerOptions, DndResult, DragManager, DropResult, Orientation, Payload, RectLayout};
use dropline_core::geometry::LayoutRect;
use dropline_core::logging;
use dropline_core::math::Vec2;
use dropline_core::profiling::{ProfilingBackend, init_profiling};
use tracing::info;

type Items = Rc<RefCell<Vec<String>>>;

fn lane_options(items: &Items) -> ContainerOptions {
    let payloads = items.clone();
    let sink = items.clone();
    ContainerOptions::new()
        .group_name("cards")
        .child_payload(move |index| {
            payloads
                .borrow()
                .get(index)
                .cloned()
                .map_or_else(Payload::empty, Payload::new)
        })
        .on_drop(move |result: &DropResult| {
            result.apply(&mut sink.borrow_mut(), |payload| payload.downcast_ref::<String>().cloned());
        })
}

fn card_lane(x: f32, count: usize) -> RectLayout {
    RectLayout::stacked(
        Orientation::Vertical,
        LayoutRect::new(x, 10.0, 280.0, 380.0),
        &vec![60.0; count],
    )
}

fn drag(manager: &mut DragManager, source: ContainerId, index: usize, path: &[(f32, f32)]) -> DndResult<()> {
    let mut points = path.iter().map(|&(x, y)| Vec2::new(x, y));
    let Some(start) = points.next() else {
        return Ok(());
    };
    manager.start_drag(source, index, start)?;
    for point in points {
        manager.update(point)?;
    }
    let results = manager.end_drag()?;
    info!(changed = results.len(), "drag finished");
    Ok(())
}

fn main() -> DndResult<()> {
    logging::init();
    if std::env::var_os("DROPLINE_PROFILE").is_some() {
        init_profiling(ProfilingBackend::PuffinHttp);
    }

    let todo: Items = Rc::new(RefCell::new(
        ["write tests", "fix scroll", "ship"].map(String::from).to_vec(),
    ));
    let done: Items = Rc::new(RefCell::new(["triage"].map(String::from).to_vec()));
    let lanes: Items = Rc::new(RefCell::new(["todo", "done"].map(String::from).to_vec()));

    let mut manager = DragManager::default();
    let board = manager.register(
        RectLayout::stacked(
            Orientation::Horizontal,
            LayoutRect::new(0.0, 0.0, 600.0, 400.0),
            &[300.0, 300.0],
        ),
        ContainerOptions::new()
            .group_name("lanes")
            .orientation(Orientation::Horizontal)
            .on_drop({
                let lanes = lanes.clone();
                move |result: &DropResult| {
                    result.apply(&mut lanes.borrow_mut(), |_| None);
                }
            }),
    )?;
    let todo_lane = manager.register(card_lane(10.0, 3), lane_options(&todo))?;
    let done_lane = manager.register(card_lane(310.0, 1), lane_options(&done))?;

    // "fix scroll" from the todo lane to the top of the done lane.
    drag(
        &mut manager,
        todo_lane,
        1,
        &[(150.0, 100.0), (160.0, 110.0), (400.0, 60.0), (450.0, 20.0)],
    )?;
    info!(todo = ?todo.borrow(), done = ?done.borrow(), "moved card");

    // Swap the lanes by dragging the todo lane past the done lane's midpoint.
    drag(
        &mut manager,
        board,
        0,
        &[(5.0, 200.0), (20.0, 200.0), (598.0, 200.0)],
    )?;
    info!(lanes = ?lanes.borrow(), "reordered lanes");

    // Let deferred effects such as animation re-enabling run.
    manager.tick(std::time::Duration::from_millis(100));
    info!(board = board.0, "done");
    Ok(())
}
