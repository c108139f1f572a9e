//! End-to-end tests of the frame pipeline through `Playspace`, using the
//! in-memory window source and recording hooks so no display is needed.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use sill_config::SillConfig;
use sill_core::events::VirtualKey;
use sill_core::{
    Aabb, DebugDrawMode, EventKind, FLOOR_ID, Playspace, PlayspaceEvent, Point2, RecordingHooks,
    StaticWindowSource, WindowRect,
};

const FRAME: Duration = Duration::from_millis(16);

fn desk() -> StaticWindowSource {
    StaticWindowSource::new()
        .with_screen(800, 600)
        .with_window(1, "Editor", WindowRect::new(100, 300, 400, 550))
        .with_window(2, "Terminal", WindowRect::new(200, 350, 300, 580))
        .with_window(3, "Browser", WindowRect::new(0, 500, 800, 590))
}

fn ids(playspace: &Playspace<StaticWindowSource, RecordingHooks>) -> Vec<String> {
    playspace
        .window_top_borders()
        .iter()
        .map(|s| s.id.clone())
        .collect()
}

#[test]
fn test_three_window_scenario() {
    let source = StaticWindowSource::new()
        .with_screen(800, 600)
        .with_window(1, "A", WindowRect::new(100, 300, 400, 550))
        .with_window(2, "B", WindowRect::new(200, 350, 300, 580))
        .with_window(3, "C", WindowRect::new(0, 100, 800, 590));
    let mut playspace = Playspace::new(source, RecordingHooks::new(), SillConfig::default());
    let report = playspace.tick(FRAME);

    assert_eq!(ids(&playspace), vec!["A_1_0", "C_3_0", FLOOR_ID]);
    assert_eq!(report.segments, 3);
    assert_eq!(report.sync.allocated, 3);
    assert_eq!(playspace.boundaries().len(), 3);

    let c = &playspace.window_top_borders()[1];
    assert_eq!((c.start.x, c.end.x, c.start.y), (0.0, 800.0, 500.0));
}

#[test]
fn test_back_window_split_by_front_window() {
    let mut playspace = Playspace::new(desk(), RecordingHooks::new(), SillConfig::default());
    playspace.tick(FRAME);

    assert_eq!(
        ids(&playspace),
        vec!["Editor_1_0", "Browser_3_0", "Browser_3_1", FLOOR_ID]
    );

    let browser_left = &playspace.window_top_borders()[1];
    assert_eq!(browser_left.start.x, 0.0);
    assert_eq!(browser_left.end.x, 100.0);
    assert_eq!(browser_left.start.y, 100.0);
}

#[test]
fn test_ids_are_unique_and_floor_appears_once() {
    let mut playspace = Playspace::new(desk(), RecordingHooks::new(), SillConfig::default());
    playspace.tick(FRAME);

    let ids = ids(&playspace);
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(ids.iter().filter(|id| *id == FLOOR_ID).count(), 1);
}

#[test]
fn test_colliders_track_moving_windows() {
    let mut playspace = Playspace::new(desk(), RecordingHooks::new(), SillConfig::default());
    playspace.tick(FRAME);
    let before: Vec<String> = ids(&playspace);

    // The terminal closes and the editor moves up above the browser's top
    // edge, so the browser top is whole again.
    playspace.window_source_mut().replace_windows(vec![
        (1, "Editor", WindowRect::new(500, 50, 700, 90)),
        (3, "Browser", WindowRect::new(0, 500, 800, 590)),
    ]);
    let report = playspace.tick(FRAME);

    assert_eq!(
        ids(&playspace),
        vec!["Editor_1_0", "Browser_3_0", FLOOR_ID]
    );
    assert_eq!(report.sync.retired, 1);
    assert_eq!(report.sync.allocated, 0);
    assert_eq!(report.sync.reconfigured, 3);
    assert_eq!(playspace.boundaries().len(), 3);
    assert_ne!(before, ids(&playspace));
}

#[test]
fn test_companion_can_stand_on_a_window() {
    let mut playspace = Playspace::new(desk(), RecordingHooks::new(), SillConfig::default());
    playspace.tick(FRAME);

    let editor = playspace
        .boundaries()
        .into_iter()
        .find(|c| c.id() == "Editor_1_0")
        .cloned();
    let editor = editor.unwrap();
    assert!(editor.is_one_way());

    // Feet resting on the middle of the editor's top edge in world space.
    let feet = Aabb::new(
        Point2::new(editor.position().x, editor.position().y),
        Point2::new(10.0, 10.0),
    );
    assert!(editor.is_touching(&feet));

    let far_away = Aabb::new(Point2::new(10_000.0, 10_000.0), Point2::new(1.0, 1.0));
    assert!(!editor.is_touching(&far_away));
}

#[test]
fn test_query_failure_keeps_floor_and_recovers() {
    let mut playspace = Playspace::new(desk(), RecordingHooks::new(), SillConfig::default());
    playspace.tick(FRAME);

    playspace.window_source_mut().set_failing(true);
    let report = playspace.tick(FRAME);
    assert_eq!(ids(&playspace), vec![FLOOR_ID]);
    assert_eq!(report.sync.retired, 3);

    playspace.window_source_mut().set_failing(false);
    let report = playspace.tick(FRAME);
    assert_eq!(ids(&playspace).len(), 4);
    assert_eq!(report.sync.allocated, 3);
}

#[test]
fn test_identical_frames_are_deterministic() {
    let mut first = Playspace::new(desk(), RecordingHooks::new(), SillConfig::default());
    let mut second = Playspace::new(desk(), RecordingHooks::new(), SillConfig::default());
    first.tick(FRAME);
    second.tick(FRAME);

    assert_eq!(first.window_top_borders(), second.window_top_borders());
}

#[test]
fn test_input_events_reach_filtered_listeners() {
    let hooks = RecordingHooks::new();
    let mut playspace = Playspace::new(desk(), hooks.clone(), SillConfig::default());

    let keys = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&keys);
    playspace.subscribe_to(EventKind::KeyDown, move |e| {
        if let PlayspaceEvent::KeyDown { key } = e {
            sink.borrow_mut().push(*key);
        }
    });

    hooks.press(0x20);
    hooks.release(0x20);
    hooks.press(0x1B);
    playspace.tick(FRAME);

    assert_eq!(*keys.borrow(), vec![VirtualKey(0x20), VirtualKey(0x1B)]);
}

#[test]
fn test_debug_drawing_does_not_change_surfaces() {
    let mut plain = Playspace::new(desk(), RecordingHooks::new(), SillConfig::default());
    let mut config = SillConfig::default();
    config.debug.draw_mode = Some(DebugDrawMode::WindowTops);
    let mut drawn = Playspace::new(desk(), RecordingHooks::new(), config);

    plain.tick(FRAME);
    drawn.tick(FRAME);

    assert_eq!(plain.window_top_borders(), drawn.window_top_borders());
    assert!(drawn.boundaries().iter().all(|c| c.debug_line().is_some()));
    assert!(plain.boundaries().iter().all(|c| c.debug_line().is_none()));
}
